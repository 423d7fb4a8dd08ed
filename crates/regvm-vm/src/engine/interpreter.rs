//! Backtracking interpreter.
//!
//! One [`Interpreter::run`] is one match attempt at a fixed start position.
//! Every opcode has a forward behavior; opcodes that push track frames also
//! have a `Back` behavior (and sometimes `Back2`) that runs when their frame
//! is popped on failure.

use regvm_bytecode::{Anchor, Atom, INFINITE, Instr, Op, Program, Slot, StepAddr};
use regvm_core::unicode;

use super::captures::CaptureState;
use super::error::RuntimeError;
use super::runner::UnmatchedBackref;
use super::stacks::{MarkStack, NO_MARK, Resume, TrackStack};
use super::text::{next_char, prev_char};
use super::timeout::Governor;
use super::trace::Tracer;

/// Stacks and captures, reused across attempts.
#[derive(Debug, Default)]
pub struct State {
    pub track: TrackStack,
    pub marks: MarkStack,
    pub captures: CaptureState,
}

impl State {
    pub fn reset(&mut self, slot_count: usize) {
        self.track.clear();
        self.marks.clear();
        self.captures.reset(slot_count);
    }
}

/// Text window shared by every attempt of one scan.
#[derive(Clone, Copy, Debug)]
pub struct Window<'t> {
    pub text: &'t str,
    pub beg: usize,
    pub end: usize,
    /// Where the scan started; `\G` matches here.
    pub start: usize,
}

enum Step {
    Next,
    Jump(StepAddr),
    Fail,
    Stop,
}

fn check(ok: bool) -> Step {
    if ok { Step::Next } else { Step::Fail }
}

/// Loop bound as a signed count, unbounded for [`INFINITE`].
fn bound(n: u32) -> isize {
    if n == INFINITE { isize::MAX } else { n as isize }
}

pub struct Interpreter<'a, 't> {
    program: &'a Program,
    window: Window<'t>,
    state: &'a mut State,
    governor: &'a mut Governor,
    unmatched_backref: UnmatchedBackref,
    pos: usize,
    ip: StepAddr,
    resume: Resume,
}

impl<'a, 't> Interpreter<'a, 't> {
    pub fn new(
        program: &'a Program,
        window: Window<'t>,
        state: &'a mut State,
        governor: &'a mut Governor,
        unmatched_backref: UnmatchedBackref,
    ) -> Self {
        Self {
            program,
            window,
            state,
            governor,
            unmatched_backref,
            pos: 0,
            ip: 0,
            resume: Resume::Forward,
        }
    }

    /// Run the program from `start`. Returns the final position on success.
    pub fn run<T: Tracer>(
        mut self,
        start: usize,
        tracer: &mut T,
    ) -> Result<Option<usize>, RuntimeError> {
        self.pos = start;
        self.ip = 0;
        self.resume = Resume::Forward;

        loop {
            self.governor.tick()?;

            let instr = *self.program.step(self.ip);
            tracer.trace_instruction(self.ip, &instr, self.resume, self.pos);

            let step = match self.resume {
                Resume::Forward => self.forward(instr),
                Resume::Back => self.back(instr),
                Resume::Back2 => self.back2(instr),
            };

            match step {
                Step::Next => {
                    self.ip += 1;
                    self.resume = Resume::Forward;
                }
                Step::Jump(target) => {
                    self.ip = target;
                    self.resume = Resume::Forward;
                }
                Step::Stop => {
                    debug_assert!(
                        self.state.marks.is_empty(),
                        "mark stack not balanced at stop: {:?}",
                        self.state.marks
                    );
                    return Ok(Some(self.pos));
                }
                Step::Fail => {
                    let Some((ip, resume)) = self.state.track.pop_tag() else {
                        return Ok(None);
                    };
                    tracer.trace_backtrack(ip, resume);
                    self.ip = ip;
                    self.resume = resume;
                }
            }
        }
    }

    fn forward(&mut self, instr: Instr) -> Step {
        let ip = self.ip;
        let pos = self.pos as isize;
        match instr.op {
            Op::Atom(atom) => check(self.consume(atom, instr)),
            Op::Literal(id) => check(self.literal(id, instr)),
            Op::BackRef(slot) => self.backref(slot, instr),
            Op::Repeat { atom, count } => check((0..count).all(|_| self.consume(atom, instr))),
            Op::GreedyLoop { atom, max } => {
                let limit = bound(max);
                let mut n = 0isize;
                let mut last = self.pos;
                while n < limit {
                    let before = self.pos;
                    if !self.consume(atom, instr) {
                        break;
                    }
                    last = before;
                    n += 1;
                }
                if n > 0 {
                    self.state.track.push(&[n - 1, last as isize], ip, Resume::Back);
                }
                Step::Next
            }
            Op::LazyLoop { max, .. } => {
                if max > 0 {
                    self.state.track.push(&[bound(max) - 1, pos], ip, Resume::Back);
                }
                Step::Next
            }
            Op::Assert(anchor) => check(self.assert(anchor)),
            Op::Fail => Step::Fail,

            Op::LazyBranch(_) => {
                self.state.track.push(&[pos], ip, Resume::Back);
                Step::Next
            }
            Op::Goto(target) => Step::Jump(target),

            Op::NullMark | Op::SetMark => {
                let mark = if instr.op == Op::NullMark { NO_MARK } else { pos };
                self.state.marks.push(mark);
                self.state.track.push(&[], ip, Resume::Back);
                Step::Next
            }
            Op::GetMark => {
                let mark = self.state.marks.pop();
                self.state.track.push(&[mark], ip, Resume::Back);
                self.pos = mark as usize;
                Step::Next
            }
            Op::BranchMark(body) => {
                let mark = self.state.marks.pop();
                if pos != mark {
                    self.state.track.push(&[mark, pos], ip, Resume::Back);
                    self.state.marks.push(pos);
                    Step::Jump(body)
                } else {
                    self.state.track.push(&[mark], ip, Resume::Back2);
                    Step::Next
                }
            }
            Op::LazyBranchMark(_) => {
                let mark = self.state.marks.pop();
                if pos != mark {
                    let saved = if mark == NO_MARK { pos } else { mark };
                    self.state.track.push(&[saved, pos], ip, Resume::Back);
                } else {
                    // The empty iteration leaves no mark behind; the flag
                    // tells back2 there is nothing to pop.
                    self.state.track.push(&[mark, 0], ip, Resume::Back2);
                }
                Step::Next
            }

            Op::NullCount(count) | Op::SetCount(count) => {
                let mark = if matches!(instr.op, Op::NullCount(_)) { NO_MARK } else { pos };
                self.state.marks.push2(mark, count as isize);
                self.state.track.push(&[], ip, Resume::Back);
                Step::Next
            }
            Op::BranchCount { body, limit } => {
                let (mark, count) = self.state.marks.pop2();
                if count >= bound(limit) || (pos == mark && count >= 0) {
                    self.state.track.push(&[mark, count], ip, Resume::Back2);
                    Step::Next
                } else {
                    self.state.track.push(&[mark], ip, Resume::Back);
                    self.state.marks.push2(pos, count + 1);
                    Step::Jump(body)
                }
            }
            Op::LazyBranchCount { body, .. } => {
                let (mark, count) = self.state.marks.pop2();
                if count < 0 {
                    self.state.track.push(&[mark], ip, Resume::Back2);
                    self.state.marks.push2(pos, count + 1);
                    Step::Jump(body)
                } else {
                    self.state.track.push(&[mark, count, pos], ip, Resume::Back);
                    Step::Next
                }
            }

            Op::CaptureMark(slot) => {
                let start = self.state.marks.pop();
                self.state.captures.capture(slot, start as usize, self.pos);
                self.state.track.push(&[start], ip, Resume::Back);
                Step::Next
            }
            Op::TestRef(slot) => check(self.state.captures.is_matched(slot)),

            Op::SetJump => {
                let depth = self.state.track.len() as isize;
                let crawl = self.state.captures.crawl_len() as isize;
                self.state.marks.push2(depth, crawl);
                self.state.track.push(&[], ip, Resume::Back);
                Step::Next
            }
            Op::BackJump => {
                let (depth, crawl) = self.state.marks.pop2();
                self.state.track.truncate(depth as usize);
                self.state.captures.uncapture_to(crawl as usize);
                Step::Fail
            }
            Op::ForeJump => {
                let (depth, crawl) = self.state.marks.pop2();
                self.state.track.truncate(depth as usize);
                self.state.track.push(&[crawl], ip, Resume::Back);
                Step::Next
            }

            Op::Stop => Step::Stop,
        }
    }

    fn back(&mut self, instr: Instr) -> Step {
        let ip = self.ip;
        match instr.op {
            Op::GreedyLoop { .. } => {
                let (remaining, p) = self.state.track.pop2();
                self.pos = p as usize;
                if remaining > 0 {
                    let prev = self.give_back(self.pos, instr.rtl);
                    self.state.track.push(&[remaining - 1, prev as isize], ip, Resume::Back);
                }
                Step::Next
            }
            Op::LazyLoop { atom, .. } => {
                let (remaining, p) = self.state.track.pop2();
                self.pos = p as usize;
                if !self.consume(atom, instr) {
                    return Step::Fail;
                }
                if remaining > 0 {
                    let pos = self.pos as isize;
                    self.state.track.push(&[remaining - 1, pos], ip, Resume::Back);
                }
                Step::Next
            }
            Op::LazyBranch(target) => {
                self.pos = self.state.track.pop() as usize;
                Step::Jump(target)
            }
            Op::NullMark | Op::SetMark => {
                self.state.marks.pop();
                Step::Fail
            }
            Op::GetMark => {
                let mark = self.state.track.pop();
                self.state.marks.push(mark);
                Step::Fail
            }
            Op::BranchMark(_) => {
                let (mark, p) = self.state.track.pop2();
                self.state.marks.pop();
                self.pos = p as usize;
                self.state.track.push(&[mark], ip, Resume::Back2);
                Step::Next
            }
            Op::LazyBranchMark(body) => {
                let (mark, p) = self.state.track.pop2();
                self.state.track.push(&[mark, 1], ip, Resume::Back2);
                self.state.marks.push(p);
                self.pos = p as usize;
                Step::Jump(body)
            }
            Op::NullCount(_) | Op::SetCount(_) => {
                self.state.marks.pop2();
                Step::Fail
            }
            Op::BranchCount { .. } => {
                let mark = self.state.track.pop();
                let (m, count) = self.state.marks.pop2();
                if count > 0 {
                    self.pos = m as usize;
                    self.state.track.push(&[mark, count - 1], ip, Resume::Back2);
                    Step::Next
                } else {
                    self.state.marks.push2(mark, count - 1);
                    Step::Fail
                }
            }
            Op::LazyBranchCount { body, limit } => {
                let (mark, count, p) = self.state.track.pop3();
                if count < bound(limit) && p != mark {
                    self.pos = p as usize;
                    self.state.marks.push2(p, count + 1);
                    self.state.track.push(&[mark], ip, Resume::Back2);
                    Step::Jump(body)
                } else {
                    self.state.marks.push2(mark, count);
                    Step::Fail
                }
            }
            Op::CaptureMark(_) => {
                let start = self.state.track.pop();
                self.state.marks.push(start);
                self.state.captures.uncapture();
                Step::Fail
            }
            Op::SetJump => {
                self.state.marks.pop2();
                Step::Fail
            }
            Op::ForeJump => {
                let crawl = self.state.track.pop();
                self.state.captures.uncapture_to(crawl as usize);
                Step::Fail
            }
            _ => malformed(instr, Resume::Back),
        }
    }

    fn back2(&mut self, instr: Instr) -> Step {
        match instr.op {
            Op::BranchMark(_) => {
                let mark = self.state.track.pop();
                self.state.marks.push(mark);
                Step::Fail
            }
            Op::LazyBranchMark(_) => {
                let (mark, pushed) = self.state.track.pop2();
                if pushed != 0 {
                    self.state.marks.pop();
                }
                self.state.marks.push(mark);
                Step::Fail
            }
            Op::BranchCount { .. } => {
                let (mark, count) = self.state.track.pop2();
                self.state.marks.push2(mark, count);
                Step::Fail
            }
            Op::LazyBranchCount { .. } => {
                let mark = self.state.track.pop();
                let (_, count) = self.state.marks.pop2();
                self.state.marks.push2(mark, count - 1);
                Step::Fail
            }
            _ => malformed(instr, Resume::Back2),
        }
    }

    fn fold(&self, c: char, ci: bool) -> char {
        if ci { self.program.culture().to_lower(c) } else { c }
    }

    fn atom_matches(&self, atom: Atom, ci: bool, c: char) -> bool {
        let c = self.fold(c, ci);
        match atom {
            Atom::Char(expected) => c == expected,
            Atom::NotChar(excluded) => c != excluded,
            Atom::Class(id) => self.program.class(id).contains(c),
        }
    }

    /// Consume one character matching `atom` in the instruction's direction.
    fn consume(&mut self, atom: Atom, instr: Instr) -> bool {
        let Window { text, beg, end, .. } = self.window;
        let c = if instr.rtl {
            prev_char(text, self.pos, beg)
        } else {
            next_char(text, self.pos, end)
        };
        let Some(c) = c.filter(|&c| self.atom_matches(atom, instr.ci, c)) else {
            return false;
        };
        if instr.rtl {
            self.pos -= c.len_utf8();
        } else {
            self.pos += c.len_utf8();
        }
        true
    }

    /// Position one character back toward where a greedy loop started.
    fn give_back(&self, pos: usize, rtl: bool) -> usize {
        let Window { text, beg, end, .. } = self.window;
        let c = if rtl {
            next_char(text, pos, end)
        } else {
            prev_char(text, pos, beg)
        };
        let width = c.expect("greedy loop frame outside the text").len_utf8();
        if rtl { pos + width } else { pos - width }
    }

    /// Match `expected` at the cursor. Pattern text is already folded.
    fn consume_str(&mut self, expected: &str, fold_expected: bool, instr: Instr) -> bool {
        let Window { text, beg, end, .. } = self.window;
        let mut pos = self.pos;
        if instr.rtl {
            for e in expected.chars().rev() {
                let Some(c) = prev_char(text, pos, beg) else {
                    return false;
                };
                if self.fold(c, instr.ci) != self.fold(e, fold_expected) {
                    return false;
                }
                pos -= c.len_utf8();
            }
        } else {
            for e in expected.chars() {
                let Some(c) = next_char(text, pos, end) else {
                    return false;
                };
                if self.fold(c, instr.ci) != self.fold(e, fold_expected) {
                    return false;
                }
                pos += c.len_utf8();
            }
        }
        self.pos = pos;
        true
    }

    fn literal(&mut self, id: usize, instr: Instr) -> bool {
        let program = self.program;
        self.consume_str(program.literal(id), false, instr)
    }

    fn backref(&mut self, slot: Slot, instr: Instr) -> Step {
        let Some(span) = self.state.captures.last(slot) else {
            return match self.unmatched_backref {
                UnmatchedBackref::Fail => Step::Fail,
                UnmatchedBackref::MatchEmpty => Step::Next,
            };
        };
        let text = self.window.text;
        let captured = &text[span];
        check(self.consume_str(captured, instr.ci, instr))
    }

    fn assert(&self, anchor: Anchor) -> bool {
        let Window {
            text,
            beg,
            end,
            start,
        } = self.window;
        let pos = self.pos;
        match anchor {
            Anchor::LineStart => pos == beg || prev_char(text, pos, beg) == Some('\n'),
            Anchor::LineEnd => pos == end || next_char(text, pos, end) == Some('\n'),
            Anchor::WordBoundary => self.is_boundary(unicode::is_word_char),
            Anchor::NonWordBoundary => !self.is_boundary(unicode::is_word_char),
            Anchor::EcmaWordBoundary => self.is_boundary(unicode::is_ecma_word_char),
            Anchor::NonEcmaWordBoundary => !self.is_boundary(unicode::is_ecma_word_char),
            Anchor::Beginning => pos == beg,
            Anchor::Start => pos == start,
            Anchor::EndZ => {
                pos == end || (pos + 1 == end && next_char(text, pos, end) == Some('\n'))
            }
            Anchor::End => pos == end,
        }
    }

    fn is_boundary(&self, is_word: fn(char) -> bool) -> bool {
        let Window { text, beg, end, .. } = self.window;
        let before = prev_char(text, self.pos, beg).is_some_and(is_word);
        let after = next_char(text, self.pos, end).is_some_and(is_word);
        before != after
    }
}

fn malformed(instr: Instr, resume: Resume) -> Step {
    panic!(
        "malformed program: {} resumed in {resume:?} mode",
        instr.op.mnemonic()
    )
}
