//! First-character sets.

use regvm_bytecode::FirstChars;
use regvm_core::{CharClass, CharRange, Culture};

use crate::parser::Node;

/// Characters a match can begin with (end with, in right-to-left mode).
///
/// Gives up when the pattern can match empty, mixes case-sensitive and
/// case-insensitive parts, starts with a backreference or conditional, or
/// when the set would admit every character.
pub fn first_chars(root: &Node, rtl: bool, culture: &Culture) -> Option<FirstChars> {
    let ci = uniform_case(root)?;
    let first = first_set(root, rtl, culture)?;
    if first.nullable {
        return None;
    }
    if first.class.ranges() == [CharRange::new('\0', char::MAX)] {
        return None;
    }
    Some(FirstChars {
        class: first.class,
        ci,
    })
}

struct FirstSet {
    class: CharClass,
    nullable: bool,
}

impl FirstSet {
    fn empty(nullable: bool) -> Self {
        Self {
            class: CharClass::new(),
            nullable,
        }
    }

    fn single(class: &CharClass) -> Self {
        let mut out = Self::empty(false);
        out.class.push_class(class);
        out
    }
}

fn first_set(node: &Node, rtl: bool, culture: &Culture) -> Option<FirstSet> {
    let set = match node {
        Node::Empty | Node::Anchor(_) | Node::Look { .. } => FirstSet::empty(true),
        Node::Nothing => FirstSet::empty(false),
        Node::Char { ch, ci } => FirstSet::single(&CharClass::from_char(fold(*ch, *ci, culture))),
        Node::NotChar { ch, ci } => {
            FirstSet::single(&CharClass::from_char(fold(*ch, *ci, culture)).negated())
        }
        Node::Class { class, ci: true } => FirstSet::single(&class.case_insensitive(culture)),
        Node::Class { class, ci: false } => FirstSet::single(class),
        Node::Literal { text, ci } => {
            let ch = if rtl { text.chars().next_back() } else { text.chars().next() };
            match ch {
                Some(ch) => FirstSet::single(&CharClass::from_char(fold(ch, *ci, culture))),
                None => FirstSet::empty(true),
            }
        }
        Node::Concat(items) => {
            let mut out = FirstSet::empty(true);
            let ordered: Box<dyn Iterator<Item = &Node>> = if rtl {
                Box::new(items.iter().rev())
            } else {
                Box::new(items.iter())
            };
            for item in ordered {
                let item = first_set(item, rtl, culture)?;
                out.class.push_class(&item.class);
                if !item.nullable {
                    out.nullable = false;
                    break;
                }
            }
            out
        }
        Node::Alternate(branches) => {
            let mut out = FirstSet::empty(false);
            for branch in branches {
                let branch = first_set(branch, rtl, culture)?;
                out.class.push_class(&branch.class);
                out.nullable |= branch.nullable;
            }
            out
        }
        Node::Repeat { child, min, .. } => {
            let mut out = first_set(child, rtl, culture)?;
            out.nullable |= *min == 0;
            out
        }
        Node::Capture { child, .. } | Node::Group(child) | Node::Atomic(child) => {
            first_set(child, rtl, culture)?
        }
        Node::BackRef { .. } | Node::CondRef { .. } | Node::CondExpr { .. } => return None,
    };
    Some(set)
}

fn fold(ch: char, ci: bool, culture: &Culture) -> char {
    if ci { culture.to_lower(ch) } else { ch }
}

/// The case sensitivity shared by every character-matching node, or `None`
/// when it is mixed. A tree without such nodes counts as case-sensitive.
fn uniform_case(root: &Node) -> Option<bool> {
    let mut seen = None;
    let mut mixed = false;
    visit_case(root, &mut |ci| match seen {
        None => seen = Some(ci),
        Some(prev) if prev != ci => mixed = true,
        Some(_) => {}
    });
    if mixed {
        return None;
    }
    Some(seen.unwrap_or(false))
}

fn visit_case(node: &Node, f: &mut impl FnMut(bool)) {
    match node {
        Node::Char { ci, .. }
        | Node::NotChar { ci, .. }
        | Node::Class { ci, .. }
        | Node::Literal { ci, .. }
        | Node::BackRef { ci, .. } => f(*ci),
        Node::Empty | Node::Nothing | Node::Anchor(_) => {}
        Node::Concat(items) | Node::Alternate(items) => {
            for item in items {
                visit_case(item, f);
            }
        }
        Node::Repeat { child, .. }
        | Node::Capture { child, .. }
        | Node::Group(child)
        | Node::Atomic(child)
        | Node::Look { child, .. } => visit_case(child, f),
        Node::CondRef { yes, no, .. } => {
            visit_case(yes, f);
            visit_case(no, f);
        }
        Node::CondExpr { test, yes, no } => {
            visit_case(test, f);
            visit_case(yes, f);
            visit_case(no, f);
        }
    }
}
