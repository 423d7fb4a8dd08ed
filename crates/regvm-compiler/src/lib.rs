#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! regvm compiler: pattern text to [`Program`](regvm_bytecode::Program).
//!
//! Pipeline:
//! - `parser` - two-pass parser producing an [`Ast`] with capture numbering
//! - `lower` - tree simplification (literal merging, group unwrapping)
//! - `analyze` - leading anchors, literal prefix, first-char set
//! - `emit` - instruction emission and literal/class tables

pub mod analyze;
pub mod emit;
pub mod lower;
pub mod parser;

mod compiler;


pub use compiler::{Compiler, compile};
pub use parser::{Ast, Node, PatternSyntaxError, parse, unescape};
