//! Argument and timeout errors.

use std::time::Duration;

use regvm_core::OptionsError;

/// A caller-supplied argument was rejected before any matching started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    #[error("start offset {start} is past the end of the text ({len} bytes)")]
    StartOutOfRange { start: usize, len: usize },

    #[error("range {beg}..{end} does not fit in the text ({len} bytes)")]
    RangeOutOfBounds { beg: usize, end: usize, len: usize },

    #[error("offset {0} is not on a character boundary")]
    NotCharBoundary(usize),

    #[error("match timeout must be greater than zero")]
    ZeroTimeout,

    #[error("count must be {min} or greater (got {count})")]
    InvalidCount { count: isize, min: isize },

    #[error(transparent)]
    Options(#[from] OptionsError),
}

/// A match ran past its configured timeout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("matching '{pattern}' timed out after {timeout:?}")]
pub struct MatchTimeoutError {
    pub input: String,
    pub pattern: String,
    pub timeout: Duration,
}

/// Checks that `offset` is a valid position in `text`.
pub(crate) fn check_offset(text: &str, offset: usize) -> Result<(), ArgumentError> {
    if offset > text.len() {
        return Err(ArgumentError::StartOutOfRange {
            start: offset,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(offset) {
        return Err(ArgumentError::NotCharBoundary(offset));
    }
    Ok(())
}

/// Checks that `beg..beg + len` is a valid range of `text`.
pub(crate) fn check_range(text: &str, beg: usize, len: usize) -> Result<usize, ArgumentError> {
    let end = beg
        .checked_add(len)
        .filter(|&end| end <= text.len())
        .ok_or(ArgumentError::RangeOutOfBounds {
            beg,
            end: beg.saturating_add(len),
            len: text.len(),
        })?;
    for offset in [beg, end] {
        if !text.is_char_boundary(offset) {
            return Err(ArgumentError::NotCharBoundary(offset));
        }
    }
    Ok(end)
}

/// Checks a replace or split count against its lower bound.
pub(crate) fn check_count(count: isize, min: isize) -> Result<(), ArgumentError> {
    if count < min {
        return Err(ArgumentError::InvalidCount { count, min });
    }
    Ok(())
}
