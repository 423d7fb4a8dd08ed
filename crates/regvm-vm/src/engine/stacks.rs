//! Track and mark stacks.
//!
//! Both are flat `isize` arenas, reused across attempts. A track frame is
//! zero to three saved values followed by a tag that names the opcode to
//! resume and how: `ip` for [`Resume::Back`], `-ip - 1` for
//! [`Resume::Back2`]. The resumed opcode knows how many values to pop.

use regvm_bytecode::StepAddr;

/// Mark value meaning "no position recorded yet".
pub const NO_MARK: isize = -1;

/// How the interpreter enters an opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resume {
    Forward,
    /// Backtracking into a frame pushed by this opcode.
    Back,
    /// Backtracking into the opcode's secondary frame.
    Back2,
}

#[derive(Debug, Default)]
pub struct TrackStack {
    data: Vec<isize>,
}

impl TrackStack {
    /// Push a frame for `ip`. `resume` must be `Back` or `Back2`.
    pub fn push(&mut self, values: &[isize], ip: StepAddr, resume: Resume) {
        debug_assert!(values.len() <= 3);
        self.data.extend_from_slice(values);
        let ip = ip as isize;
        let tag = match resume {
            Resume::Back => ip,
            Resume::Back2 => -ip - 1,
            Resume::Forward => panic!("track frames cannot resume forward"),
        };
        self.data.push(tag);
    }

    /// Pop the tag of the topmost frame. `None` when the stack is empty,
    /// which ends the attempt.
    pub fn pop_tag(&mut self) -> Option<(StepAddr, Resume)> {
        let tag = self.data.pop()?;
        Some(if tag >= 0 {
            (tag as StepAddr, Resume::Back)
        } else {
            ((-tag - 1) as StepAddr, Resume::Back2)
        })
    }

    pub fn pop(&mut self) -> isize {
        self.data.pop().expect("track stack underflow")
    }

    /// Pops two values, returned in push order.
    pub fn pop2(&mut self) -> (isize, isize) {
        let b = self.pop();
        let a = self.pop();
        (a, b)
    }

    /// Pops three values, returned in push order.
    pub fn pop3(&mut self) -> (isize, isize, isize) {
        let c = self.pop();
        let (a, b) = self.pop2();
        (a, b, c)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Discard every frame above `depth`.
    pub fn truncate(&mut self, depth: usize) {
        debug_assert!(depth <= self.data.len(), "track depth grew past its saved value");
        self.data.truncate(depth);
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

/// Grouping stack: loop marks, counters, and jump save points.
#[derive(Debug, Default)]
pub struct MarkStack {
    data: Vec<isize>,
}

impl MarkStack {
    #[inline]
    pub fn push(&mut self, value: isize) {
        self.data.push(value);
    }

    pub fn push2(&mut self, a: isize, b: isize) {
        self.data.push(a);
        self.data.push(b);
    }

    pub fn pop(&mut self) -> isize {
        self.data.pop().expect("mark stack underflow")
    }

    /// Pops two values, returned in push order.
    pub fn pop2(&mut self) -> (isize, isize) {
        let b = self.pop();
        let a = self.pop();
        (a, b)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}
