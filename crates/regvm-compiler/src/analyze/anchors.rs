//! Leading anchor detection.

use regvm_bytecode::{Anchor, Anchors};

use crate::parser::Node;

/// What a node says about where a match may start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lead {
    /// The match must start at one of these positions.
    Anchored(Anchors),
    /// Zero-width and unanchored; the next node decides.
    Transparent,
    /// Consumes input or cannot be reasoned about.
    Opaque,
}

/// Anchors that every match must start at. In right-to-left mode the match
/// starts at its right end, so the last node leads.
pub fn leading_anchors(root: &Node, rtl: bool) -> Anchors {
    match lead(root, rtl) {
        Lead::Anchored(anchors) => anchors,
        Lead::Transparent | Lead::Opaque => Anchors::NONE,
    }
}

fn lead(node: &Node, rtl: bool) -> Lead {
    match node {
        Node::Anchor(anchor) => match anchor {
            Anchor::Beginning => Lead::Anchored(Anchors::BEGINNING),
            Anchor::Start => Lead::Anchored(Anchors::START),
            Anchor::EndZ => Lead::Anchored(Anchors::END_Z),
            Anchor::End => Lead::Anchored(Anchors::END),
            _ => Lead::Transparent,
        },
        Node::Empty | Node::Look { .. } => Lead::Transparent,
        Node::Concat(items) => {
            let mut ordered: Box<dyn Iterator<Item = &Node>> = if rtl {
                Box::new(items.iter().rev())
            } else {
                Box::new(items.iter())
            };
            ordered
                .find_map(|item| match lead(item, rtl) {
                    Lead::Transparent => None,
                    decided => Some(decided),
                })
                .unwrap_or(Lead::Transparent)
        }
        Node::Alternate(branches) => {
            let mut common: Option<Anchors> = None;
            for branch in branches {
                let Lead::Anchored(anchors) = lead(branch, rtl) else {
                    return Lead::Opaque;
                };
                common = Some(match common {
                    Some(prev) => prev.intersection(anchors),
                    None => anchors,
                });
            }
            match common {
                Some(anchors) if !anchors.is_empty() => Lead::Anchored(anchors),
                _ => Lead::Opaque,
            }
        }
        Node::Capture { child, .. } | Node::Group(child) | Node::Atomic(child) => lead(child, rtl),
        Node::Repeat { child, min, .. } if *min > 0 => match lead(child, rtl) {
            Lead::Anchored(anchors) => Lead::Anchored(anchors),
            _ => Lead::Opaque,
        },
        _ => Lead::Opaque,
    }
}
