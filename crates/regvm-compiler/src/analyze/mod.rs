//! Scan accelerators derived from the tree.
//!
//! None of this affects what a pattern matches, only where the scanner
//! tries. A pattern gets at most one of a literal prefix and a first-char
//! set; anchors are computed independently.

mod anchors;
mod first_chars;
mod prefix;

#[cfg(test)]
mod analyze_tests;

pub use anchors::leading_anchors;
pub use first_chars::first_chars;
pub use prefix::literal_prefix;

use regvm_bytecode::{Anchors, FirstChars, LiteralPrefix};
use regvm_core::{Culture, RegexOptions};

use crate::parser::Node;

#[derive(Clone, Debug)]
pub struct Analysis {
    pub anchors: Anchors,
    pub prefix: Option<LiteralPrefix>,
    pub first_chars: Option<FirstChars>,
}

/// Analyzes a lowered tree.
pub fn analyze(root: &Node, options: RegexOptions, culture: &Culture) -> Analysis {
    let rtl = options.right_to_left();
    let anchors = leading_anchors(root, rtl);
    let prefix = literal_prefix(root, rtl).map(|literal| LiteralPrefix::new(&literal, rtl));
    let first_chars = match prefix {
        Some(_) => None,
        None => first_chars(root, rtl, culture),
    };
    Analysis {
        anchors,
        prefix,
        first_chars,
    }
}
