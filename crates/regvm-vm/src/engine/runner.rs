//! Match scanner.
//!
//! Picks candidate start positions, using the program's anchors, literal
//! prefix, or first-character set to skip positions that cannot start a
//! match, and runs the interpreter at each one.

use std::ops::Range;
use std::time::Duration;

use regvm_bytecode::{Anchors, Program};
use regvm_core::RegexOptions;

use super::error::RuntimeError;
use super::interpreter::{Interpreter, State, Window};
use super::text::{bump, next_char, prev_char};
use super::timeout::Governor;
use super::trace::{NoopTracer, Tracer};

/// What a backreference to a group that has not captured does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnmatchedBackref {
    /// The reference fails.
    #[default]
    Fail,
    /// The reference matches the empty string.
    MatchEmpty,
}

impl UnmatchedBackref {
    /// `MatchEmpty` under ECMAScript, `Fail` otherwise.
    pub fn default_for(options: RegexOptions) -> Self {
        if options.ecma_script() {
            Self::MatchEmpty
        } else {
            Self::Fail
        }
    }
}

/// How much of a successful match to keep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanMode {
    /// Every group's captures.
    #[default]
    Full,
    /// Only the overall span.
    Exists,
}

/// Per-scan settings.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanConfig {
    pub(crate) timeout: Option<Duration>,
    pub(crate) unmatched_backref: UnmatchedBackref,
    pub(crate) mode: ScanMode,
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`RuntimeError::Timeout`] once this much time has passed.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn unmatched_backref(mut self, policy: UnmatchedBackref) -> Self {
        self.unmatched_backref = policy;
        self
    }

    pub fn mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Text, search bounds and starting point of one scan.
#[derive(Clone, Copy, Debug)]
pub struct ScanInput<'t> {
    pub text: &'t str,
    pub beg: usize,
    pub end: usize,
    pub start: usize,
    /// Length of the previous match when iterating.
    pub prev_len: Option<usize>,
}

impl<'t> ScanInput<'t> {
    /// Search all of `text` from `start`.
    pub fn new(text: &'t str, start: usize) -> Self {
        Self {
            text,
            beg: 0,
            end: text.len(),
            start,
            prev_len: None,
        }
    }

    /// Restrict matching to `beg..end`.
    pub fn bounds(mut self, beg: usize, end: usize) -> Self {
        self.beg = beg;
        self.end = end;
        self
    }

    /// Continue after a previous match of `len` bytes. An empty previous
    /// match moves the start one character on before the first attempt.
    pub fn after_match(mut self, len: usize) -> Self {
        self.prev_len = Some(len);
        self
    }
}

/// Capture spans of a successful scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawMatch {
    /// Spans per slot, oldest first. Slot 0 holds the whole match.
    groups: Vec<Vec<Range<usize>>>,
    /// Where the engine stopped: the match end, or its start in
    /// right-to-left mode.
    text_pos: usize,
}

impl RawMatch {
    pub fn span(&self) -> Range<usize> {
        self.groups[0]
            .last()
            .cloned()
            .expect("slot 0 is captured by every match")
    }

    pub fn groups(&self) -> &[Vec<Range<usize>>] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<Vec<Range<usize>>> {
        self.groups
    }

    pub fn text_pos(&self) -> usize {
        self.text_pos
    }
}

/// Reusable scanning state.
///
/// A runner holds only scratch memory; any runner can scan any program.
#[derive(Debug, Default)]
pub struct Runner {
    state: State,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the next match.
    ///
    /// This is a convenience method that uses `NoopTracer`.
    pub fn scan(
        &mut self,
        program: &Program,
        input: ScanInput<'_>,
        config: ScanConfig,
    ) -> Result<Option<RawMatch>, RuntimeError> {
        self.scan_with(program, input, config, &mut NoopTracer)
    }

    /// Find the next match, reporting every step to `tracer`.
    pub fn scan_with<T: Tracer>(
        &mut self,
        program: &Program,
        input: ScanInput<'_>,
        config: ScanConfig,
        tracer: &mut T,
    ) -> Result<Option<RawMatch>, RuntimeError> {
        let rtl = program.right_to_left();
        let mut governor = Governor::start(config.timeout);
        let window = Window {
            text: input.text,
            beg: input.beg,
            end: input.end,
            start: input.start,
        };
        let stop = if rtl { input.beg } else { input.end };

        let mut pos = input.start;
        if input.prev_len == Some(0) {
            match bump(input.text, pos, input.beg, input.end, rtl) {
                Some(next) if pos != stop => pos = next,
                _ => return Ok(None),
            }
        }

        loop {
            governor.tick_candidate()?;

            if find_candidate(program, window, &mut pos, &mut governor)? {
                tracer.trace_attempt(pos);
                self.state.reset(program.slot_count());
                let interpreter = Interpreter::new(
                    program,
                    window,
                    &mut self.state,
                    &mut governor,
                    config.unmatched_backref,
                );
                if let Some(text_pos) = interpreter.run(pos, tracer)? {
                    let found = self.materialize(text_pos, config.mode);
                    let span = found.span();
                    tracer.trace_match(span.start, span.end);
                    return Ok(Some(found));
                }
                tracer.trace_attempt_failed(pos);
            }

            if pos == stop {
                return Ok(None);
            }
            match bump(input.text, pos, input.beg, input.end, rtl) {
                Some(next) => pos = next,
                None => return Ok(None),
            }
        }
    }

    fn materialize(&self, text_pos: usize, mode: ScanMode) -> RawMatch {
        let spans = self.state.captures.spans();
        let groups = match mode {
            ScanMode::Full => spans.to_vec(),
            ScanMode::Exists => vec![spans[0].clone()],
        };
        RawMatch { groups, text_pos }
    }
}

/// Move `pos` to the next position where a match could start.
///
/// Returns false when no candidate remains; `pos` is then left where the
/// scan should give up, or at a position that failed a cheap check. Every
/// character skipped counts against the deadline like a candidate.
fn find_candidate(
    program: &Program,
    window: Window<'_>,
    pos: &mut usize,
    governor: &mut Governor,
) -> Result<bool, RuntimeError> {
    let Window {
        text,
        beg,
        end,
        start,
    } = window;
    let rtl = program.right_to_left();
    let anchors = program.anchors();
    let endz = if text[beg..end].ends_with('\n') { end - 1 } else { end };

    if !anchors.is_empty() {
        if rtl {
            if (anchors.contains(Anchors::END) && *pos < end)
                || (anchors.contains(Anchors::END_Z) && *pos < endz)
                || (anchors.contains(Anchors::START) && *pos < start)
            {
                *pos = beg;
                return Ok(false);
            }
            if anchors.contains(Anchors::BEGINNING) && *pos > beg {
                *pos = beg;
            }
        } else {
            if (anchors.contains(Anchors::BEGINNING) && *pos > beg)
                || (anchors.contains(Anchors::START) && *pos > start)
            {
                *pos = end;
                return Ok(false);
            }
            if anchors.contains(Anchors::END_Z) && *pos < endz {
                *pos = endz;
            } else if anchors.contains(Anchors::END) && *pos < end {
                *pos = end;
            }
        }
        return Ok(match program.prefix() {
            Some(prefix) => prefix.is_match_at(text.as_bytes(), *pos, beg, end),
            None => true,
        });
    }

    if let Some(prefix) = program.prefix() {
        return Ok(match prefix.find(text.as_bytes(), *pos, beg, end) {
            Some(found) => {
                *pos = found;
                true
            }
            None => {
                *pos = if rtl { beg } else { end };
                false
            }
        });
    }

    if let Some(first) = program.first_chars() {
        let culture = program.culture();
        let admits = |c: char| {
            let c = if first.ci { culture.to_lower(c) } else { c };
            first.class.contains(c)
        };
        if rtl {
            while let Some(c) = prev_char(text, *pos, beg) {
                if admits(c) {
                    return Ok(true);
                }
                governor.tick_candidate()?;
                *pos -= c.len_utf8();
            }
        } else {
            while let Some(c) = next_char(text, *pos, end) {
                if admits(c) {
                    return Ok(true);
                }
                governor.tick_candidate()?;
                *pos += c.len_utf8();
            }
        }
        return Ok(false);
    }

    Ok(true)
}
