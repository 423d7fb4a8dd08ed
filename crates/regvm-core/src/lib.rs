#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared building blocks for the regvm engine.
//!
//! - [`RegexOptions`]: matching option flags
//! - [`Culture`]: locale-dependent case folding
//! - [`CharClass`]: character sets with negation and subtraction
//! - [`unicode`]: category tables and the `\w \d \s` shorthands

pub mod charclass;
pub mod colors;
pub mod culture;
pub mod options;
pub mod unicode;

#[cfg(test)]
mod charclass_tests;

pub use charclass::{CharClass, CharRange};
pub use colors::Colors;
pub use culture::Culture;
pub use options::{OptionsError, RegexOptions};
