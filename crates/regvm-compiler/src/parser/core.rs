//! Parser state and cursor primitives.

use regvm_core::RegexOptions;
use regvm_core::unicode::is_word_char;

use super::error::PatternSyntaxError;
use super::numbering::{GroupDecl, GroupKind, Numbering};

/// Groups may nest this deep.
const MAX_DEPTH: u32 = 100;

/// Quantifier bounds and group numbers stay below this.
pub(super) const MAX_NUMBER: u32 = i32::MAX as u32;

pub(super) type PResult<T> = Result<T, PatternSyntaxError>;

/// Recursive-descent parser over the pattern text.
///
/// The same parser runs twice. Without a [`Numbering`] it only records group
/// declarations and skips reference checks; with one it resolves every
/// reference and builds the tree.
pub(super) struct Parser<'p> {
    pub(super) pattern: &'p str,
    pub(super) pos: usize,
    pub(super) options: RegexOptions,
    pub(super) numbering: Option<&'p Numbering>,
    pub(super) decls: Vec<GroupDecl>,
    /// Set when the next `(` is a conditional test and must not capture.
    pub(super) ignore_next_paren: bool,
    autocap: u32,
    depth: u32,
}

impl<'p> Parser<'p> {
    pub fn new(pattern: &'p str, options: RegexOptions, numbering: Option<&'p Numbering>) -> Self {
        Self {
            pattern,
            pos: 0,
            options,
            numbering,
            decls: Vec::new(),
            ignore_next_paren: false,
            autocap: 1,
            depth: 0,
        }
    }

    pub(super) fn rest(&self) -> &'p str {
        &self.pattern[self.pos..]
    }

    pub(super) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(super) fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    pub(super) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub(super) fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            return true;
        }
        false
    }

    pub(super) fn error(&self, offset: usize, message: impl Into<String>) -> PatternSyntaxError {
        PatternSyntaxError::new(self.pattern, offset, message)
    }

    /// Skips `(?#..)` comments, plus whitespace and `#` line comments under
    /// `IGNORE_PATTERN_WHITESPACE`.
    pub(super) fn skip_trivia(&mut self) -> PResult<()> {
        loop {
            if self.rest().starts_with("(?#") {
                let open = self.pos;
                match self.rest().find(')') {
                    Some(close) => self.pos += close + 1,
                    None => return Err(self.error(open, "unterminated (?#...) comment")),
                }
                continue;
            }
            if !self.options.ignore_pattern_whitespace() {
                return Ok(());
            }
            match self.peek() {
                Some(c) if is_pattern_space(c) => {
                    self.bump();
                }
                Some('#') => match self.rest().find('\n') {
                    Some(nl) => self.pos += nl + 1,
                    None => self.pos = self.pattern.len(),
                },
                _ => return Ok(()),
            }
        }
    }

    pub(super) fn enter(&mut self, offset: usize) -> PResult<()> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(offset, "pattern nested too deeply"));
        }
        self.depth += 1;
        Ok(())
    }

    pub(super) fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Number of the next unnamed capturing group.
    pub(super) fn unnamed_group(&mut self, offset: usize) -> u32 {
        let number = self.autocap;
        self.autocap = self.autocap.saturating_add(1);
        self.declare(GroupKind::Unnamed, offset);
        number
    }

    /// Number of a named or explicitly numbered group.
    pub(super) fn explicit_group(&mut self, kind: GroupKind, offset: usize) -> u32 {
        let number = match &kind {
            GroupKind::Numbered(n) => *n,
            GroupKind::Named(name) => self
                .numbering
                .and_then(|numbering| numbering.number_of(name))
                .unwrap_or(0),
            GroupKind::Unnamed => 0,
        };
        self.declare(kind, offset);
        number
    }

    fn declare(&mut self, kind: GroupKind, offset: usize) {
        if self.numbering.is_none() {
            self.decls.push(GroupDecl { kind, offset });
        }
    }

    /// Decimal number at the cursor. The caller checks a digit is present.
    pub(super) fn scan_decimal(&mut self) -> PResult<u32> {
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(d))
                .filter(|&v| v <= MAX_NUMBER)
                .ok_or_else(|| self.error(start, "number too large"))?;
            self.bump();
        }
        Ok(value)
    }

    /// Group name made of word characters.
    pub(super) fn scan_name(&mut self) -> &'p str {
        let start = self.pos;
        while self.peek().is_some_and(is_word_char) {
            self.bump();
        }
        &self.pattern[start..self.pos]
    }
}

fn is_pattern_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}
