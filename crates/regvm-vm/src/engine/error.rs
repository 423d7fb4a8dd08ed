//! Errors that can occur while scanning.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// The deadline computed at scan start passed.
    #[error("match timed out after {0:?}")]
    Timeout(Duration),
}
