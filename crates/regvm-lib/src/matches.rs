//! Match results.
//!
//! A [`Match`] owns the capture spans of one successful scan. Groups and
//! captures are views into it and borrow the searched text, so their
//! `as_str` values are slices of the input and never copies.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::Range;

use regvm_vm::RawMatch;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::Result;
use crate::regex::Regex;
use crate::replace::Template;

/// One successful match, with every group's captures.
#[derive(Clone)]
pub struct Match<'t> {
    regex: Regex,
    text: &'t str,
    /// Spans per slot, oldest first.
    groups: Vec<Vec<Range<usize>>>,
    /// Where scanning resumes for the next match.
    text_pos: usize,
    /// Search bounds the match was found in.
    beg: usize,
    end: usize,
}

impl<'t> Match<'t> {
    pub(crate) fn new(regex: Regex, text: &'t str, raw: RawMatch, beg: usize, end: usize) -> Self {
        let text_pos = raw.text_pos();
        Self {
            regex,
            text,
            groups: raw.into_groups(),
            text_pos,
            beg,
            end,
        }
    }

    pub fn start(&self) -> usize {
        self.range().start
    }

    pub fn end(&self) -> usize {
        self.range().end
    }

    pub fn len(&self) -> usize {
        self.range().len()
    }

    pub fn is_empty(&self) -> bool {
        self.range().is_empty()
    }

    pub fn range(&self) -> Range<usize> {
        self.groups[0]
            .last()
            .cloned()
            .expect("a match always captures group 0")
    }

    pub fn as_str(&self) -> &'t str {
        &self.text[self.range()]
    }

    /// The whole searched text.
    pub fn text(&self) -> &'t str {
        self.text
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Number of groups, including group 0.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Group by number. `None` if the pattern defines no such group.
    pub fn group(&self, number: u32) -> Option<Group<'_, 't>> {
        let slot = self.regex.program().captures().slot(number)?;
        Some(self.group_at(slot))
    }

    /// Group by name, or by number written as a name (`"2"`).
    pub fn name(&self, name: &str) -> Option<Group<'_, 't>> {
        let number = self.regex.group_number_from_name(name)?;
        self.group(number)
    }

    /// All groups in number order, starting with group 0.
    pub fn groups(&self) -> impl Iterator<Item = Group<'_, 't>> + '_ {
        (0..self.groups.len()).map(move |slot| self.group_at(slot))
    }

    /// The highest-numbered group.
    pub fn last_group(&self) -> Group<'_, 't> {
        self.group_at(self.groups.len() - 1)
    }

    fn group_at(&self, slot: usize) -> Group<'_, 't> {
        let captures = self.regex.program().captures();
        let number = captures.number(slot);
        Group {
            number,
            name: captures.name_of(number),
            text: self.text,
            spans: &self.groups[slot],
        }
    }

    /// The next match in the same text, continuing where this one ended.
    pub fn next_match(&self) -> Result<Option<Match<'t>>> {
        self.regex
            .match_from(self.text, self.beg, self.end, self.text_pos, Some(self.len()))
    }

    /// Substitutes this match's groups into a replacement template.
    pub fn expand(&self, template: &str) -> String {
        self.expand_with(&Template::parse(template, &self.regex))
    }

    pub(crate) fn expand_with(&self, template: &Template) -> String {
        let mut out = String::new();
        template.expand_into(self, &mut out);
        out
    }

    pub(crate) fn text_pos(&self) -> usize {
        self.text_pos
    }
}

impl fmt::Debug for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("range", &self.range())
            .field("value", &self.as_str())
            .finish()
    }
}

impl Serialize for Match<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let groups: Vec<Group<'_, '_>> = self.groups().collect();
        let mut s = serializer.serialize_struct("Match", 4)?;
        s.serialize_field("start", &self.start())?;
        s.serialize_field("end", &self.end())?;
        s.serialize_field("value", self.as_str())?;
        s.serialize_field("groups", &groups)?;
        s.end()
    }
}

/// All captures of one group.
///
/// An unmatched group reports an empty span at offset 0.
#[derive(Clone, Copy)]
pub struct Group<'m, 't> {
    number: u32,
    name: Option<&'m str>,
    text: &'t str,
    spans: &'m [Range<usize>],
}

impl<'m, 't> Group<'m, 't> {
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn name(&self) -> Option<&'m str> {
        self.name
    }

    pub fn matched(&self) -> bool {
        !self.spans.is_empty()
    }

    /// Span of the last capture.
    pub fn range(&self) -> Range<usize> {
        self.spans.last().cloned().unwrap_or(0..0)
    }

    pub fn start(&self) -> usize {
        self.range().start
    }

    pub fn end(&self) -> usize {
        self.range().end
    }

    pub fn len(&self) -> usize {
        self.range().len()
    }

    pub fn is_empty(&self) -> bool {
        self.range().is_empty()
    }

    /// Text of the last capture.
    pub fn as_str(&self) -> &'t str {
        &self.text[self.range()]
    }

    pub fn capture_count(&self) -> usize {
        self.spans.len()
    }

    /// Captures in the order they were made; one per loop iteration for a
    /// repeated group.
    pub fn captures(&self) -> impl ExactSizeIterator<Item = Capture<'t>> {
        let text = self.text;
        self.spans.iter().map(move |span| Capture {
            text,
            start: span.start,
            end: span.end,
        })
    }
}

impl fmt::Debug for Group<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("number", &self.number)
            .field("name", &self.name)
            .field("matched", &self.matched())
            .field("value", &self.as_str())
            .finish()
    }
}

impl Serialize for Group<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let captures: Vec<Capture<'_>> = self.captures().collect();
        let mut s = serializer.serialize_struct("Group", 7)?;
        s.serialize_field("number", &self.number)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("matched", &self.matched())?;
        s.serialize_field("start", &self.start())?;
        s.serialize_field("end", &self.end())?;
        s.serialize_field("value", self.as_str())?;
        s.serialize_field("captures", &captures)?;
        s.end()
    }
}

/// One captured span.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Capture<'t> {
    text: &'t str,
    start: usize,
    end: usize,
}

impl<'t> Capture<'t> {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn as_str(&self) -> &'t str {
        &self.text[self.start..self.end]
    }
}

impl fmt::Debug for Capture<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capture({:?} @ {:?})", self.as_str(), self.range())
    }
}

impl Serialize for Capture<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Capture", 3)?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("end", &self.end)?;
        s.serialize_field("value", self.as_str())?;
        s.end()
    }
}

/// Lazy iterator over successive matches.
///
/// Stops after the first scan that finds nothing or fails.
pub struct Matches<'t> {
    regex: Regex,
    text: &'t str,
    beg: usize,
    end: usize,
    /// Next scan start and the length of the previous match.
    next: Option<(usize, Option<usize>)>,
}

impl<'t> Matches<'t> {
    pub(crate) fn new(regex: Regex, text: &'t str, start: usize) -> Self {
        Self {
            regex,
            text,
            beg: 0,
            end: text.len(),
            next: Some((start, None)),
        }
    }
}

impl<'t> Iterator for Matches<'t> {
    type Item = Result<Match<'t>>;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, prev_len) = self.next.take()?;
        match self
            .regex
            .match_from(self.text, self.beg, self.end, start, prev_len)
        {
            Ok(Some(found)) => {
                self.next = Some((found.text_pos(), Some(found.len())));
                Some(Ok(found))
            }
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

impl FusedIterator for Matches<'_> {}
