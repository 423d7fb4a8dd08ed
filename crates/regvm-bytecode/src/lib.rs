#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Compiled program format for regvm.
//!
//! This crate contains:
//! - The instruction set ([`Op`], [`Instr`])
//! - The immutable [`Program`] and its capture table
//! - Scan accelerators: leading [`Anchors`], [`LiteralPrefix`], [`FirstChars`]
//! - A disassembler ([`dump`])

pub mod anchors;
pub mod captures;
pub mod dump;
pub mod instructions;
pub mod prefix;
pub mod program;

#[cfg(test)]
mod prefix_tests;

pub use anchors::Anchors;
pub use captures::CaptureTable;
pub use dump::{dump, format_operands};
pub use instructions::{Anchor, Atom, ClassId, INFINITE, Instr, Op, Slot, StepAddr, StringId};
pub use prefix::LiteralPrefix;
pub use program::{FirstChars, Program, ProgramParts};
