//! Literal prefix extraction.

use crate::parser::Node;

/// Case-sensitive text every match must begin with (end with, in
/// right-to-left mode). Only the leading consuming node is considered.
pub fn literal_prefix(root: &Node, rtl: bool) -> Option<String> {
    let prefix = leading_literal(root, rtl)?;
    (!prefix.is_empty()).then_some(prefix)
}

fn leading_literal(node: &Node, rtl: bool) -> Option<String> {
    match node {
        Node::Char { ch, ci: false } => Some(ch.to_string()),
        Node::Literal { text, ci: false } => Some(text.clone()),
        Node::Concat(items) => {
            let mut ordered: Box<dyn Iterator<Item = &Node>> = if rtl {
                Box::new(items.iter().rev())
            } else {
                Box::new(items.iter())
            };
            let first = ordered.find(|item| !item.is_zero_width())?;
            leading_literal(first, rtl)
        }
        Node::Capture { child, .. } | Node::Group(child) | Node::Atomic(child) => {
            leading_literal(child, rtl)
        }
        Node::Repeat { child, min, .. } if *min > 0 => match child.as_ref() {
            Node::Char { ch, ci: false } => {
                let count = usize::try_from(*min).ok()?.min(MAX_REPEATED);
                Some(ch.to_string().repeat(count))
            }
            Node::Literal { text, ci: false } => Some(text.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// Longest prefix built from a repeated character.
const MAX_REPEATED: usize = 64;
