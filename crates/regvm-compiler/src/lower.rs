//! Tree simplification before analysis and emission.
//!
//! - adjacent characters with the same case sensitivity become one literal
//! - non-capturing groups and `{1}` repeats disappear
//! - empty nodes are dropped from concatenations
//! - a concatenation containing [`Node::Nothing`] becomes `Nothing`
//! - nested alternations are flattened and dead branches removed
//! - `(?=)` becomes empty and `(?!)` becomes `Nothing`

use crate::parser::Node;

pub fn lower(node: Node) -> Node {
    match node {
        Node::Group(child) => lower(*child),
        Node::Concat(items) => lower_concat(items),
        Node::Alternate(items) => lower_alternate(items),
        Node::Repeat {
            child,
            min,
            max,
            lazy,
        } => {
            let child = lower(*child);
            if max == 0 || child == Node::Empty {
                return Node::Empty;
            }
            if child == Node::Nothing {
                return if min == 0 { Node::Empty } else { Node::Nothing };
            }
            if min == 1 && max == 1 {
                return child;
            }
            Node::Repeat {
                child: Box::new(child),
                min,
                max,
                lazy,
            }
        }
        Node::Capture { number, child } => Node::Capture {
            number,
            child: Box::new(lower(*child)),
        },
        Node::Atomic(child) => Node::Atomic(Box::new(lower(*child))),
        Node::Look {
            child,
            behind,
            negate,
        } => {
            let child = lower(*child);
            match (&child, negate) {
                (Node::Empty, false) => Node::Empty,
                (Node::Empty, true) => Node::Nothing,
                _ => Node::Look {
                    child: Box::new(child),
                    behind,
                    negate,
                },
            }
        }
        Node::CondRef { number, yes, no } => Node::CondRef {
            number,
            yes: Box::new(lower(*yes)),
            no: Box::new(lower(*no)),
        },
        Node::CondExpr { test, yes, no } => Node::CondExpr {
            test: Box::new(lower(*test)),
            yes: Box::new(lower(*yes)),
            no: Box::new(lower(*no)),
        },
        leaf => leaf,
    }
}

fn lower_concat(items: Vec<Node>) -> Node {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match lower(item) {
            Node::Empty => {}
            Node::Nothing => return Node::Nothing,
            Node::Concat(inner) => {
                for node in inner {
                    push_merged(&mut out, node);
                }
            }
            node => push_merged(&mut out, node),
        }
    }
    match out.len() {
        0 => Node::Empty,
        1 => out.pop().unwrap_or(Node::Empty),
        _ => Node::Concat(out),
    }
}

/// Appends `node`, folding it into a preceding character or literal.
fn push_merged(out: &mut Vec<Node>, node: Node) {
    let (text, ci) = match &node {
        Node::Char { ch, ci } => (ch.to_string(), *ci),
        Node::Literal { text, ci } => (text.clone(), *ci),
        _ => {
            out.push(node);
            return;
        }
    };

    if let Some(last) = out.last_mut() {
        let merged = match last {
            Node::Char { ch, ci: prev_ci } if *prev_ci == ci => Some(format!("{ch}{text}")),
            Node::Literal {
                text: prev,
                ci: prev_ci,
            } if *prev_ci == ci => Some(format!("{prev}{text}")),
            _ => None,
        };
        if let Some(text) = merged {
            *last = Node::Literal { text, ci };
            return;
        }
    }
    out.push(node);
}

fn lower_alternate(items: Vec<Node>) -> Node {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match lower(item) {
            Node::Nothing => {}
            Node::Alternate(inner) => out.extend(inner),
            node => out.push(node),
        }
    }
    match out.len() {
        0 => Node::Nothing,
        1 => out.pop().unwrap_or(Node::Nothing),
        _ => Node::Alternate(out),
    }
}
