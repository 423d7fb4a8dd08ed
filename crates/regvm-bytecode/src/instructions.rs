//! Instruction set.
//!
//! A program is a flat array of [`Instr`]. Jump operands are array indices.
//! Every instruction carries two modifiers: `rtl` (consume right to left)
//! and `ci` (fold input through the culture before comparing).
//!
//! Backtracking opcodes push frames on the track stack when executed forward
//! and are re-entered in `Back` or `Back2` mode when a frame is popped.

/// Index into the instruction array.
pub type StepAddr = usize;

/// Index into the program's literal table.
pub type StringId = usize;

/// Index into the program's class table.
pub type ClassId = usize;

/// Dense capture slot.
pub type Slot = usize;

/// Loop bound meaning "no upper limit".
pub const INFINITE: u32 = u32::MAX;

/// Single-character matcher used by atom and loop opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Atom {
    Char(char),
    NotChar(char),
    Class(ClassId),
}

/// Zero-width position test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// `^` in multiline mode.
    LineStart,
    /// `$` in multiline mode.
    LineEnd,
    /// `\b`
    WordBoundary,
    /// `\B`
    NonWordBoundary,
    /// `\b` with ECMAScript word characters.
    EcmaWordBoundary,
    /// `\B` with ECMAScript word characters.
    NonEcmaWordBoundary,
    /// `\A`, or `^` without multiline.
    Beginning,
    /// `\G`
    Start,
    /// `\Z`, or `$` without multiline.
    EndZ,
    /// `\z`
    End,
}

impl Anchor {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Anchor::LineStart => "Bol",
            Anchor::LineEnd => "Eol",
            Anchor::WordBoundary => "Boundary",
            Anchor::NonWordBoundary => "NonBoundary",
            Anchor::EcmaWordBoundary => "EcmaBoundary",
            Anchor::NonEcmaWordBoundary => "NonEcmaBoundary",
            Anchor::Beginning => "Beginning",
            Anchor::Start => "Start",
            Anchor::EndZ => "EndZ",
            Anchor::End => "End",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Consume one character.
    Atom(Atom),
    /// Consume a literal string.
    Literal(StringId),
    /// Consume the last capture of a slot.
    BackRef(Slot),
    /// Consume exactly `count` characters.
    Repeat { atom: Atom, count: u32 },
    /// Consume up to `max` characters, giving them back one at a time.
    GreedyLoop { atom: Atom, max: u32 },
    /// Consume nothing, taking one more character per backtrack up to `max`.
    LazyLoop { atom: Atom, max: u32 },
    Assert(Anchor),
    /// Always fails.
    Fail,

    /// Continue; on backtrack resume at the target.
    LazyBranch(StepAddr),
    Goto(StepAddr),

    /// Push an "unset" mark.
    NullMark,
    /// Push the cursor as a mark.
    SetMark,
    /// Pop a mark and move the cursor back to it.
    GetMark,
    /// End of a greedy unbounded loop body.
    BranchMark(StepAddr),
    /// End of a lazy unbounded loop body.
    LazyBranchMark(StepAddr),

    /// Push an "unset" mark and a counter.
    NullCount(i32),
    /// Push the cursor and a counter.
    SetCount(i32),
    /// End of a greedy counted loop body.
    BranchCount { body: StepAddr, limit: u32 },
    /// End of a lazy counted loop body.
    LazyBranchCount { body: StepAddr, limit: u32 },

    /// Pop a mark and record `mark..cursor` as a capture.
    CaptureMark(Slot),
    /// Fail unless the slot has a capture.
    TestRef(Slot),

    /// Save track depth and capture log length on the mark stack.
    SetJump,
    /// Discard frames back to the saved depth, undo captures, then fail.
    BackJump,
    /// Discard frames back to the saved depth and continue.
    ForeJump,

    /// Successful end of the program.
    Stop,
}

impl Op {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Op::Atom(Atom::Char(_)) => "One",
            Op::Atom(Atom::NotChar(_)) => "NotOne",
            Op::Atom(Atom::Class(_)) => "Set",
            Op::Literal(_) => "Multi",
            Op::BackRef(_) => "Ref",
            Op::Repeat { atom, .. } => match atom {
                Atom::Char(_) => "OneRep",
                Atom::NotChar(_) => "NotOneRep",
                Atom::Class(_) => "SetRep",
            },
            Op::GreedyLoop { atom, .. } => match atom {
                Atom::Char(_) => "OneLoop",
                Atom::NotChar(_) => "NotOneLoop",
                Atom::Class(_) => "SetLoop",
            },
            Op::LazyLoop { atom, .. } => match atom {
                Atom::Char(_) => "OneLazy",
                Atom::NotChar(_) => "NotOneLazy",
                Atom::Class(_) => "SetLazy",
            },
            Op::Assert(anchor) => anchor.mnemonic(),
            Op::Fail => "Nothing",
            Op::LazyBranch(_) => "LazyBranch",
            Op::Goto(_) => "Goto",
            Op::NullMark => "NullMark",
            Op::SetMark => "SetMark",
            Op::GetMark => "GetMark",
            Op::BranchMark(_) => "BranchMark",
            Op::LazyBranchMark(_) => "LazyBranchMark",
            Op::NullCount(_) => "NullCount",
            Op::SetCount(_) => "SetCount",
            Op::BranchCount { .. } => "BranchCount",
            Op::LazyBranchCount { .. } => "LazyBranchCount",
            Op::CaptureMark(_) => "CaptureMark",
            Op::TestRef(_) => "TestRef",
            Op::SetJump => "SetJump",
            Op::BackJump => "BackJump",
            Op::ForeJump => "ForeJump",
            Op::Stop => "Stop",
        }
    }

    /// Jump target, if the opcode has one.
    pub fn target(&self) -> Option<StepAddr> {
        match *self {
            Op::LazyBranch(t)
            | Op::Goto(t)
            | Op::BranchMark(t)
            | Op::LazyBranchMark(t)
            | Op::BranchCount { body: t, .. }
            | Op::LazyBranchCount { body: t, .. } => Some(t),
            _ => None,
        }
    }

    /// Mutable jump target, used when patching forward jumps.
    pub fn target_mut(&mut self) -> Option<&mut StepAddr> {
        match self {
            Op::LazyBranch(t)
            | Op::Goto(t)
            | Op::BranchMark(t)
            | Op::LazyBranchMark(t)
            | Op::BranchCount { body: t, .. }
            | Op::LazyBranchCount { body: t, .. } => Some(t),
            _ => None,
        }
    }

    /// True for opcodes that push a track frame when run forward.
    pub fn pushes_frame(&self) -> bool {
        matches!(
            self,
            Op::GreedyLoop { .. }
                | Op::LazyLoop { .. }
                | Op::LazyBranch(_)
                | Op::NullMark
                | Op::SetMark
                | Op::GetMark
                | Op::BranchMark(_)
                | Op::LazyBranchMark(_)
                | Op::NullCount(_)
                | Op::SetCount(_)
                | Op::BranchCount { .. }
                | Op::LazyBranchCount { .. }
                | Op::CaptureMark(_)
                | Op::SetJump
                | Op::ForeJump
        )
    }

    /// True for opcodes affected by the `ci` modifier.
    pub fn folds_case(&self) -> bool {
        matches!(
            self,
            Op::Atom(_)
                | Op::Literal(_)
                | Op::BackRef(_)
                | Op::Repeat { .. }
                | Op::GreedyLoop { .. }
                | Op::LazyLoop { .. }
        )
    }
}

/// One program step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instr {
    pub op: Op,
    pub rtl: bool,
    pub ci: bool,
}

impl Instr {
    pub fn new(op: Op) -> Self {
        Self {
            op,
            rtl: false,
            ci: false,
        }
    }

    pub fn rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    pub fn ci(mut self, ci: bool) -> Self {
        self.ci = ci && self.op.folds_case();
        self
    }
}
