//! Single-slot runner reuse.
//!
//! Each compiled regex keeps at most one idle [`Runner`]. Taking it never
//! blocks: if another thread holds the slot, the caller gets a fresh runner.

use std::sync::Mutex;

use regvm_vm::Runner;

#[derive(Debug, Default)]
pub(crate) struct RunnerSlot {
    slot: Mutex<Option<Runner>>,
}

impl RunnerSlot {
    pub fn take(&self) -> Runner {
        match self.slot.try_lock() {
            Ok(mut idle) => idle.take().unwrap_or_default(),
            Err(_) => Runner::new(),
        }
    }

    pub fn give_back(&self, runner: Runner) {
        if let Ok(mut idle) = self.slot.try_lock()
            && idle.is_none()
        {
            *idle = Some(runner);
        }
    }
}
