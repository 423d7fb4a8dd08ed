//! Cooperative timeout.
//!
//! The deadline is fixed when a scan starts. Reading the clock is batched:
//! once per [`CHECK_INTERVAL`] dispatches and once per [`CHECK_INTERVAL`]
//! candidate positions.

use std::time::{Duration, Instant};

use super::error::RuntimeError;

pub const CHECK_INTERVAL: u32 = 1000;

#[derive(Debug)]
pub struct Governor {
    deadline: Option<(Instant, Duration)>,
    dispatches: u32,
    candidates: u32,
}

impl Governor {
    pub fn start(timeout: Option<Duration>) -> Self {
        Self {
            deadline: timeout.map(|t| (Instant::now() + t, t)),
            dispatches: 0,
            candidates: 0,
        }
    }

    /// Called before every instruction.
    #[inline]
    pub fn tick(&mut self) -> Result<(), RuntimeError> {
        if self.deadline.is_none() {
            return Ok(());
        }
        self.dispatches += 1;
        if self.dispatches < CHECK_INTERVAL {
            return Ok(());
        }
        self.dispatches = 0;
        self.check()
    }

    /// Called before every candidate position.
    #[inline]
    pub fn tick_candidate(&mut self) -> Result<(), RuntimeError> {
        if self.deadline.is_none() {
            return Ok(());
        }
        self.candidates += 1;
        if self.candidates < CHECK_INTERVAL {
            return Ok(());
        }
        self.candidates = 0;
        self.check()
    }

    fn check(&self) -> Result<(), RuntimeError> {
        match self.deadline {
            Some((deadline, timeout)) if Instant::now() >= deadline => {
                Err(RuntimeError::Timeout(timeout))
            }
            _ => Ok(()),
        }
    }
}
