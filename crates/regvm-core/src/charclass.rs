//! Character classes.
//!
//! A class is a canonical list of inclusive ranges (sorted, disjoint and
//! non-adjacent), a negation flag and an optional subtracted class, which is
//! how `[a-z-[aeiou]]` is represented.

use std::fmt;

use crate::culture::Culture;

/// Characters above this have no lowercase mapping.
const LAST_CASED: u32 = 0x1E943;

/// Inclusive range of scalar values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharRange {
    pub first: char,
    pub last: char,
}

impl CharRange {
    pub fn new(first: char, last: char) -> Self {
        debug_assert!(first <= last);
        Self { first, last }
    }

    pub fn single(c: char) -> Self {
        Self { first: c, last: c }
    }

    pub fn contains(&self, c: char) -> bool {
        self.first <= c && c <= self.last
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CharClass {
    ranges: Vec<CharRange>,
    negated: bool,
    subtraction: Option<Box<CharClass>>,
}

impl CharClass {
    /// The empty class.
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches every character.
    pub fn any() -> Self {
        Self::from_range('\0', char::MAX)
    }

    pub fn from_char(c: char) -> Self {
        Self::from_range(c, c)
    }

    pub fn from_range(first: char, last: char) -> Self {
        Self {
            ranges: vec![CharRange::new(first, last)],
            negated: false,
            subtraction: None,
        }
    }

    pub fn ranges(&self) -> &[CharRange] {
        &self.ranges
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn subtraction(&self) -> Option<&CharClass> {
        self.subtraction.as_deref()
    }

    pub fn push_char(&mut self, c: char) {
        self.push_range(c, c);
    }

    pub fn push_range(&mut self, first: char, last: char) {
        self.ranges.push(CharRange::new(first, last));
        self.ranges = canonicalize(std::mem::take(&mut self.ranges));
    }

    pub fn push_ranges(&mut self, ranges: impl IntoIterator<Item = CharRange>) {
        self.ranges.extend(ranges);
        self.ranges = canonicalize(std::mem::take(&mut self.ranges));
    }

    /// Adds every member of `other`, whatever its shape.
    pub fn push_class(&mut self, other: &CharClass) {
        self.push_ranges(other.members());
    }

    pub fn negate(&mut self) {
        self.negated = !self.negated;
    }

    pub fn negated(mut self) -> Self {
        self.negate();
        self
    }

    pub fn set_subtraction(&mut self, sub: CharClass) {
        self.subtraction = Some(Box::new(sub));
    }

    pub fn contains(&self, c: char) -> bool {
        let in_ranges = self
            .ranges
            .binary_search_by(|r| {
                if r.last < c {
                    std::cmp::Ordering::Less
                } else if r.first > c {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok();
        if in_ranges == self.negated {
            return false;
        }
        !self.subtraction.as_ref().is_some_and(|sub| sub.contains(c))
    }

    /// The single member of a one-character class.
    pub fn singleton(&self) -> Option<char> {
        match self.ranges.as_slice() {
            [r] if !self.negated && self.subtraction.is_none() && r.first == r.last => {
                Some(r.first)
            }
            _ => None,
        }
    }

    /// True when no character can match.
    pub fn is_empty(&self) -> bool {
        self.members().is_empty()
    }

    /// Positive ranges of every member, with negation and subtraction applied.
    pub fn members(&self) -> Vec<CharRange> {
        let base = if self.negated {
            complement(&self.ranges)
        } else {
            self.ranges.clone()
        };
        match &self.subtraction {
            Some(sub) => intersect(&base, &complement(&sub.members())),
            None => base,
        }
    }

    /// Class for case-insensitive matching: adds the culture lowercase of
    /// every listed character. Input characters are lowercased before the
    /// membership test.
    pub fn case_insensitive(&self, culture: &Culture) -> CharClass {
        if self.ranges == [CharRange::new('\0', char::MAX)] {
            return self.clone();
        }
        let mut lowered = Vec::new();
        for range in &self.ranges {
            let first = range.first as u32;
            let last = (range.last as u32).min(LAST_CASED);
            for code in first..=last {
                let Some(c) = char::from_u32(code) else {
                    continue;
                };
                let lower = culture.to_lower(c);
                if lower != c {
                    lowered.push(CharRange::single(lower));
                }
            }
        }
        let mut out = self.clone();
        out.push_ranges(lowered);
        if let Some(sub) = &self.subtraction {
            out.subtraction = Some(Box::new(sub.case_insensitive(culture)));
        }
        out
    }
}

fn canonicalize(mut ranges: Vec<CharRange>) -> Vec<CharRange> {
    ranges.sort();
    let mut out: Vec<CharRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        if let Some(prev) = out.last_mut() {
            let adjacent = char_after(prev.last).is_none_or(|next| range.first <= next);
            if adjacent {
                prev.last = prev.last.max(range.last);
                continue;
            }
        }
        out.push(range);
    }
    out
}

/// Complement within the scalar value space. Input must be canonical.
fn complement(ranges: &[CharRange]) -> Vec<CharRange> {
    let mut out = Vec::with_capacity(ranges.len() + 1);
    let mut next = Some('\0');
    for range in ranges {
        if let Some(start) = next
            && start < range.first
            && let Some(end) = char_before(range.first)
        {
            out.push(CharRange::new(start, end));
        }
        next = char_after(range.last);
    }
    if let Some(start) = next {
        out.push(CharRange::new(start, char::MAX));
    }
    out
}

/// Intersection of two canonical range lists.
fn intersect(a: &[CharRange], b: &[CharRange]) -> Vec<CharRange> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let first = a[i].first.max(b[j].first);
        let last = a[i].last.min(b[j].last);
        if first <= last {
            out.push(CharRange::new(first, last));
        }
        if a[i].last < b[j].last {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

fn char_after(c: char) -> Option<char> {
    match c as u32 {
        0xD7FF => Some('\u{E000}'),
        code => char::from_u32(code + 1),
    }
}

fn char_before(c: char) -> Option<char> {
    match c as u32 {
        0 => None,
        0xE000 => Some('\u{D7FF}'),
        code => char::from_u32(code - 1),
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SHOWN: usize = 8;

        f.write_str("[")?;
        if self.negated {
            f.write_str("^")?;
        }
        for range in self.ranges.iter().take(SHOWN) {
            write_class_char(f, range.first)?;
            if range.last != range.first {
                f.write_str("-")?;
                write_class_char(f, range.last)?;
            }
        }
        if self.ranges.len() > SHOWN {
            write!(f, "...+{}", self.ranges.len() - SHOWN)?;
        }
        if let Some(sub) = &self.subtraction {
            write!(f, "-{sub}")?;
        }
        f.write_str("]")
    }
}

fn write_class_char(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    match c {
        '\\' | ']' | '[' | '^' | '-' => write!(f, "\\{c}"),
        '\n' => f.write_str("\\n"),
        '\r' => f.write_str("\\r"),
        '\t' => f.write_str("\\t"),
        c if c.is_control() || c as u32 > 0x7E => write!(f, "\\u{{{:X}}}", c as u32),
        c => write!(f, "{c}"),
    }
}
