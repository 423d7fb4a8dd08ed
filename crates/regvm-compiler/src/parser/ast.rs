//! Pattern syntax tree.
//!
//! Nodes stay close to the source: `(?:..)` is kept as [`Node::Group`] and
//! literal characters are separate until lowering merges them. Case
//! sensitivity is recorded per character-matching node because inline
//! options can change it mid-pattern. Direction is not recorded; it is a
//! property of where a node is emitted.

use std::fmt;

use regvm_bytecode::{Anchor, CaptureTable, INFINITE};
use regvm_core::{CharClass, RegexOptions};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Matches the empty string.
    Empty,
    /// Never matches.
    Nothing,
    Char {
        ch: char,
        ci: bool,
    },
    /// Any character except `ch`.
    NotChar {
        ch: char,
        ci: bool,
    },
    Class {
        class: CharClass,
        ci: bool,
    },
    /// Produced by lowering from runs of [`Node::Char`].
    Literal {
        text: String,
        ci: bool,
    },
    BackRef {
        number: u32,
        ci: bool,
    },
    Anchor(Anchor),
    Concat(Vec<Node>),
    Alternate(Vec<Node>),
    Repeat {
        child: Box<Node>,
        min: u32,
        /// [`INFINITE`] when unbounded.
        max: u32,
        lazy: bool,
    },
    Capture {
        number: u32,
        child: Box<Node>,
    },
    /// `(?:..)`
    Group(Box<Node>),
    /// `(?>..)`
    Atomic(Box<Node>),
    Look {
        child: Box<Node>,
        behind: bool,
        negate: bool,
    },
    /// `(?(n)yes|no)`
    CondRef {
        number: u32,
        yes: Box<Node>,
        no: Box<Node>,
    },
    /// `(?(test)yes|no)`: `test` is a lookahead.
    CondExpr {
        test: Box<Node>,
        yes: Box<Node>,
        no: Box<Node>,
    },
}

/// Parsed pattern with its capture numbering.
#[derive(Clone, Debug)]
pub struct Ast {
    pub pattern: String,
    pub options: RegexOptions,
    pub root: Node,
    pub captures: CaptureTable,
}

impl Node {
    /// True for nodes that never consume input.
    pub fn is_zero_width(&self) -> bool {
        matches!(self, Node::Empty | Node::Anchor(_) | Node::Look { .. })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ci = |ci: bool| if ci { "i" } else { "" };
        match self {
            Node::Empty => f.write_str("Empty"),
            Node::Nothing => f.write_str("Nothing"),
            Node::Char { ch, ci: c } => write!(f, "{ch:?}{}", ci(*c)),
            Node::NotChar { ch, ci: c } => write!(f, "!{ch:?}{}", ci(*c)),
            Node::Class { class, ci: c } => write!(f, "{class}{}", ci(*c)),
            Node::Literal { text, ci: c } => write!(f, "{text:?}{}", ci(*c)),
            Node::BackRef { number, ci: c } => write!(f, "\\{number}{}", ci(*c)),
            Node::Anchor(anchor) => f.write_str(anchor.mnemonic()),
            Node::Concat(items) => write_list(f, "concat", items),
            Node::Alternate(items) => write_list(f, "alt", items),
            Node::Repeat {
                child,
                min,
                max,
                lazy,
            } => {
                let max = if *max == INFINITE {
                    String::new()
                } else {
                    max.to_string()
                };
                let lazy = if *lazy { "?" } else { "" };
                write!(f, "(repeat{{{min},{max}}}{lazy} {child})")
            }
            Node::Capture { number, child } => write!(f, "(capture {number} {child})"),
            Node::Group(child) => write!(f, "(group {child})"),
            Node::Atomic(child) => write!(f, "(atomic {child})"),
            Node::Look {
                child,
                behind,
                negate,
            } => {
                let dir = if *behind { "behind" } else { "ahead" };
                let sign = if *negate { "!" } else { "" };
                write!(f, "(look{dir}{sign} {child})")
            }
            Node::CondRef { number, yes, no } => write!(f, "(if \\{number} {yes} {no})"),
            Node::CondExpr { test, yes, no } => write!(f, "(if {test} {yes} {no})"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, head: &str, items: &[Node]) -> fmt::Result {
    write!(f, "({head}")?;
    for item in items {
        write!(f, " {item}")?;
    }
    f.write_str(")")
}
