//! Matching engine.
//!
//! The [`Runner`] owns reusable stacks and drives the scan loop; each
//! candidate position is handed to the interpreter, which executes the
//! program until it reaches `Stop` or runs out of backtrack frames.

mod captures;
mod error;
mod interpreter;
mod runner;
mod stacks;
mod text;
mod timeout;
mod trace;

#[cfg(test)]
mod engine_tests;

pub use error::RuntimeError;
pub use runner::{RawMatch, Runner, ScanConfig, ScanInput, ScanMode, UnmatchedBackref};
pub use stacks::Resume;
pub use trace::{NoopTracer, PrintTracer, PrintTracerBuilder, Tracer, Verbosity};
