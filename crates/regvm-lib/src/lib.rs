//! regvm: backtracking regular expressions.
//!
//! # Example
//!
//! ```
//! use regvm_lib::Regex;
//!
//! let re = Regex::new(r"(?<year>\d{4})-(?<month>\d{2})").unwrap();
//! let m = re.find("released 2024-05").unwrap().unwrap();
//! assert_eq!(m.as_str(), "2024-05");
//! assert_eq!(m.name("month").unwrap().as_str(), "05");
//!
//! let swapped = re.replace("2024-05", "${month}/${year}").unwrap();
//! assert_eq!(swapped, "05/2024");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod cache;
pub mod error;
pub mod escape;
pub mod matches;
pub mod regex;

mod pool;
mod replace;
mod split;

#[cfg(test)]
mod regex_tests;

pub use cache::PatternCache;
pub use error::{ArgumentError, MatchTimeoutError};
pub use escape::{escape, unescape};
pub use matches::{Capture, Group, Match, Matches};
pub use regex::{Regex, RegexBuilder};

pub use regvm_compiler::PatternSyntaxError;
pub use regvm_core::{Culture, OptionsError, RegexOptions};
pub use regvm_vm::UnmatchedBackref;

/// Errors that can occur while compiling or running a pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] PatternSyntaxError),

    #[error(transparent)]
    Timeout(#[from] MatchTimeoutError),

    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

/// Result type for regex operations.
pub type Result<T> = std::result::Result<T, Error>;
