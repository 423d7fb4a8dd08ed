//! Code generation from the lowered tree.

mod emitter;
mod tables;

#[cfg(test)]
mod emit_tests;
#[cfg(test)]
mod tables_tests;

pub use emitter::{Emitted, emit};
pub use tables::{ClassTableBuilder, StringTableBuilder};
