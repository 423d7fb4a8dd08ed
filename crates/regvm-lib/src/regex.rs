//! Compiled regular expressions.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use regvm_bytecode::Program;
use regvm_compiler::Compiler;
use regvm_core::{Culture, RegexOptions};
use regvm_vm::{RawMatch, RuntimeError, ScanConfig, ScanInput, ScanMode, UnmatchedBackref};

use crate::error::{ArgumentError, MatchTimeoutError, check_count, check_offset, check_range};
use crate::matches::{Match, Matches};
use crate::pool::RunnerSlot;
use crate::replace::{Template, replace_matches};
use crate::{Result, escape, split};

/// A compiled pattern.
///
/// Cloning is cheap: clones share the program and its idle runner.
#[derive(Clone)]
pub struct Regex {
    inner: Arc<Inner>,
}

struct Inner {
    program: Program,
    timeout: Option<Duration>,
    unmatched_backref: UnmatchedBackref,
    runners: RunnerSlot,
}

/// Configures and compiles a [`Regex`].
#[derive(Clone, Debug)]
pub struct RegexBuilder {
    pattern: String,
    options: RegexOptions,
    culture: Option<Culture>,
    match_timeout: Option<Duration>,
    unmatched_backref: Option<UnmatchedBackref>,
}

impl RegexBuilder {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            options: RegexOptions::NONE,
            culture: None,
            match_timeout: None,
            unmatched_backref: None,
        }
    }

    pub fn options(mut self, options: RegexOptions) -> Self {
        self.options = options;
        self
    }

    /// Culture for case-insensitive matching. Defaults to the process
    /// locale.
    pub fn culture(mut self, culture: Culture) -> Self {
        self.culture = Some(culture);
        self
    }

    /// Fail matches that run longer than `timeout`. Must be non-zero.
    pub fn match_timeout(mut self, timeout: Duration) -> Self {
        self.match_timeout = Some(timeout);
        self
    }

    /// Override what a backreference to an unmatched group does.
    pub fn unmatched_backref(mut self, policy: UnmatchedBackref) -> Self {
        self.unmatched_backref = Some(policy);
        self
    }

    pub fn build(self) -> Result<Regex> {
        self.options.validate().map_err(ArgumentError::from)?;
        if self.match_timeout == Some(Duration::ZERO) {
            return Err(ArgumentError::ZeroTimeout.into());
        }

        let culture = self.culture.unwrap_or_else(Culture::from_env);
        let program = Compiler::new()
            .options(self.options)
            .culture(culture)
            .compile(&self.pattern)?;
        let unmatched_backref = self
            .unmatched_backref
            .unwrap_or_else(|| UnmatchedBackref::default_for(self.options));

        Ok(Regex {
            inner: Arc::new(Inner {
                program,
                timeout: self.match_timeout,
                unmatched_backref,
                runners: RunnerSlot::default(),
            }),
        })
    }
}

impl Regex {
    /// Compiles `pattern` with default options.
    pub fn new(pattern: &str) -> Result<Self> {
        RegexBuilder::new(pattern).build()
    }

    pub fn with_options(pattern: &str, options: RegexOptions) -> Result<Self> {
        RegexBuilder::new(pattern).options(options).build()
    }

    pub fn builder(pattern: &str) -> RegexBuilder {
        RegexBuilder::new(pattern)
    }

    pub fn pattern(&self) -> &str {
        self.inner.program.pattern()
    }

    pub fn options(&self) -> RegexOptions {
        self.inner.program.options()
    }

    /// Culture used for case folding.
    pub fn culture(&self) -> &Culture {
        self.inner.program.culture()
    }

    pub fn match_timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }

    /// How a backreference to a group that has not matched behaves.
    pub fn unmatched_backref(&self) -> UnmatchedBackref {
        self.inner.unmatched_backref
    }

    pub fn right_to_left(&self) -> bool {
        self.inner.program.right_to_left()
    }

    pub fn program(&self) -> &Program {
        &self.inner.program
    }

    /// Where a scan over the whole of `text` begins.
    fn default_start(&self, text: &str) -> usize {
        if self.right_to_left() { text.len() } else { 0 }
    }

    pub fn is_match(&self, text: &str) -> Result<bool> {
        self.is_match_at(text, self.default_start(text))
    }

    pub fn is_match_at(&self, text: &str, start: usize) -> Result<bool> {
        check_offset(text, start)?;
        let found = self.scan(ScanInput::new(text, start), ScanMode::Exists)?;
        Ok(found.is_some())
    }

    /// First match in scan order: leftmost, or rightmost in right-to-left
    /// mode.
    pub fn find<'t>(&self, text: &'t str) -> Result<Option<Match<'t>>> {
        self.find_at(text, self.default_start(text))
    }

    /// First match scanning from `start`. In right-to-left mode the scan
    /// moves left from `start`.
    pub fn find_at<'t>(&self, text: &'t str, start: usize) -> Result<Option<Match<'t>>> {
        check_offset(text, start)?;
        self.match_from(text, 0, text.len(), start, None)
    }

    /// First match inside `text[beg..beg + len]`. Anchors treat the range
    /// as the whole input.
    pub fn find_in<'t>(&self, text: &'t str, beg: usize, len: usize) -> Result<Option<Match<'t>>> {
        let end = check_range(text, beg, len)?;
        let start = if self.right_to_left() { end } else { beg };
        self.match_from(text, beg, end, start, None)
    }

    /// Lazily iterates over successive non-overlapping matches.
    pub fn find_iter<'t>(&self, text: &'t str) -> Matches<'t> {
        Matches::new(self.clone(), text, self.default_start(text))
    }

    pub fn find_iter_at<'t>(&self, text: &'t str, start: usize) -> Result<Matches<'t>> {
        check_offset(text, start)?;
        Ok(Matches::new(self.clone(), text, start))
    }

    /// Collects every match.
    pub fn find_all<'t>(&self, text: &'t str) -> Result<Vec<Match<'t>>> {
        self.find_iter(text).collect()
    }

    /// Replaces every match with an expanded template.
    ///
    /// Templates support `$1`, `${name}`, `$$`, `$&`, `` $` ``, `$'`, `$+`
    /// and `$_`. References to undefined groups stay literal.
    pub fn replace(&self, text: &str, template: &str) -> Result<String> {
        self.replace_n(text, template, -1, self.default_start(text))
    }

    /// Replaces at most `limit` matches (`-1` for all), scanning from
    /// `start`.
    pub fn replace_n(
        &self,
        text: &str,
        template: &str,
        limit: isize,
        start: usize,
    ) -> Result<String> {
        let template = Template::parse(template, self);
        if let Some(literal) = template.as_literal() {
            return self.replace_with_n(text, |_| literal.to_string(), limit, start);
        }
        self.replace_with_n(text, |m| m.expand_with(&template), limit, start)
    }

    /// Replaces every match with the callback's result.
    pub fn replace_with<F>(&self, text: &str, replacer: F) -> Result<String>
    where
        F: FnMut(&Match<'_>) -> String,
    {
        self.replace_with_n(text, replacer, -1, self.default_start(text))
    }

    pub fn replace_with_n<F>(
        &self,
        text: &str,
        replacer: F,
        limit: isize,
        start: usize,
    ) -> Result<String>
    where
        F: FnMut(&Match<'_>) -> String,
    {
        check_count(limit, -1)?;
        check_offset(text, start)?;
        replace_matches(self, text, replacer, limit, start)
    }

    /// Splits `text` around every match. Groups captured by a separator are
    /// included after the piece that precedes it.
    pub fn split<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        self.split_n(text, 0, self.default_start(text))
    }

    /// Splits into at most `count` pieces (`0` for no limit), scanning from
    /// `start`.
    pub fn split_n<'t>(&self, text: &'t str, count: isize, start: usize) -> Result<Vec<&'t str>> {
        check_count(count, 0)?;
        check_offset(text, start)?;
        split::split(self, text, count, start)
    }

    /// Escapes the metacharacters in `text`.
    pub fn escape(text: &str) -> String {
        escape::escape(text)
    }

    /// Replaces escape sequences in `text` with the characters they name.
    pub fn unescape(text: &str) -> Result<String> {
        escape::unescape(text)
    }

    /// Group names in number order. Unnamed groups are named by number.
    pub fn group_names(&self) -> Vec<String> {
        let captures = self.inner.program.captures();
        (0..captures.slot_count())
            .map(|slot| captures.slot_name(slot))
            .collect()
    }

    pub fn group_numbers(&self) -> Vec<u32> {
        self.inner.program.captures().numbers().to_vec()
    }

    pub fn group_name_from_number(&self, number: u32) -> Option<String> {
        let captures = self.inner.program.captures();
        let slot = captures.slot(number)?;
        Some(captures.slot_name(slot))
    }

    /// Number of a named group; numeric names resolve to defined numbers.
    pub fn group_number_from_name(&self, name: &str) -> Option<u32> {
        let captures = self.inner.program.captures();
        if let Some(number) = captures.number_of_name(name) {
            return Some(number);
        }
        let number: u32 = name.parse().ok()?;
        captures.slot(number).map(|_| number)
    }

    /// Runs one scan with this regex's timeout and backreference policy.
    pub(crate) fn scan(&self, input: ScanInput<'_>, mode: ScanMode) -> Result<Option<RawMatch>> {
        let config = ScanConfig::new()
            .timeout(self.inner.timeout)
            .unmatched_backref(self.inner.unmatched_backref)
            .mode(mode);

        let mut runner = self.inner.runners.take();
        let result = runner.scan(&self.inner.program, input, config);
        self.inner.runners.give_back(runner);

        result.map_err(|err| match err {
            RuntimeError::Timeout(timeout) => MatchTimeoutError {
                input: input.text.to_string(),
                pattern: self.pattern().to_string(),
                timeout,
            }
            .into(),
        })
    }

    /// Scans `text[beg..end]` from `start`. `prev_len` is the length of the
    /// match this scan continues from.
    pub(crate) fn match_from<'t>(
        &self,
        text: &'t str,
        beg: usize,
        end: usize,
        start: usize,
        prev_len: Option<usize>,
    ) -> Result<Option<Match<'t>>> {
        let mut input = ScanInput::new(text, start).bounds(beg, end);
        if let Some(len) = prev_len {
            input = input.after_match(len);
        }
        let raw = self.scan(input, ScanMode::Full)?;
        Ok(raw.map(|raw| Match::new(self.clone(), text, raw, beg, end)))
    }
}

impl fmt::Debug for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Regex")
            .field("pattern", &self.pattern())
            .field("options", &self.options())
            .field("culture", self.culture())
            .finish()
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}
