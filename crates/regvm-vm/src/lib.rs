#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Runtime for compiled regvm programs.
//!
//! This crate provides the backtracking interpreter that runs a
//! [`Program`](regvm_bytecode::Program) at one start position, and the
//! runner that picks candidate positions and turns a successful run into
//! capture spans.

pub mod engine;

pub use engine::{
    NoopTracer, PrintTracer, RawMatch, Resume, Runner, RuntimeError, ScanConfig, ScanInput,
    ScanMode, Tracer, UnmatchedBackref, Verbosity,
};
