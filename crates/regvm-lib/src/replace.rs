//! Replacement templates and the replace loop.

use crate::Result;
use crate::matches::Match;
use crate::regex::Regex;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Piece {
    Literal(String),
    /// Last capture of a group, empty if it did not match.
    Group(u32),
    /// `$&`
    WholeMatch,
    /// `` $` ``
    Before,
    /// `$'`
    After,
    /// `$+`
    LastGroup,
    /// `$_`
    Input,
}

/// A parsed replacement template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Template {
    pieces: Vec<Piece>,
}

impl Template {
    /// Parses `template` against the groups `regex` defines. A `$` that
    /// does not start a valid reference is kept as text.
    pub fn parse(template: &str, regex: &Regex) -> Self {
        let ecma = regex.options().ecma_script();
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(dollar) = rest.find('$') {
            literal.push_str(&rest[..dollar]);
            let after = &rest[dollar + 1..];

            if let Some(tail) = after.strip_prefix('$') {
                literal.push('$');
                rest = tail;
                continue;
            }

            match reference(after, regex, ecma) {
                Some((piece, used)) => {
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(piece);
                    rest = &after[used..];
                }
                None => {
                    literal.push('$');
                    rest = after;
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }
        Self { pieces }
    }

    /// The replacement text when it does not depend on the match.
    pub fn as_literal(&self) -> Option<&str> {
        match self.pieces.as_slice() {
            [] => Some(""),
            [Piece::Literal(text)] => Some(text),
            _ => None,
        }
    }

    pub fn expand_into(&self, m: &Match<'_>, out: &mut String) {
        let text = m.text();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(s) => out.push_str(s),
                Piece::Group(number) => {
                    if let Some(group) = m.group(*number) {
                        out.push_str(group.as_str());
                    }
                }
                Piece::WholeMatch => out.push_str(m.as_str()),
                Piece::Before => out.push_str(&text[..m.start()]),
                Piece::After => out.push_str(&text[m.end()..]),
                Piece::LastGroup => out.push_str(m.last_group().as_str()),
                Piece::Input => out.push_str(text),
            }
        }
    }
}

/// Parses the reference after a `$`. Returns the piece and the bytes used.
fn reference(s: &str, regex: &Regex, ecma: bool) -> Option<(Piece, usize)> {
    let first = s.chars().next()?;
    let piece = match first {
        '{' => {
            let close = s.find('}')?;
            let number = regex.group_number_from_name(&s[1..close])?;
            return Some((Piece::Group(number), close + 1));
        }
        '0'..='9' => return numbered(s, regex, ecma),
        '&' => Piece::WholeMatch,
        '`' => Piece::Before,
        '\'' => Piece::After,
        '+' => Piece::LastGroup,
        '_' => Piece::Input,
        _ => return None,
    };
    Some((piece, 1))
}

/// `$n`. All digits must name a group, except under ECMAScript where the
/// longest prefix that names a group is used.
fn numbered(s: &str, regex: &Regex, ecma: bool) -> Option<(Piece, usize)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    let is_group = |n: u32| regex.group_name_from_number(n).is_some();

    if !ecma {
        let number: u32 = s[..digits].parse().ok()?;
        return is_group(number).then_some((Piece::Group(number), digits));
    }

    let mut found = None;
    let mut number = 0u32;
    for (i, d) in s[..digits].bytes().enumerate() {
        let Some(next) = number
            .checked_mul(10)
            .and_then(|n| n.checked_add(u32::from(d - b'0')))
        else {
            break;
        };
        if !is_group(next) {
            break;
        }
        number = next;
        found = Some((Piece::Group(number), i + 1));
    }
    found
}

/// Replaces up to `limit` matches (`-1` for all) found from `start`.
pub(crate) fn replace_matches<F>(
    regex: &Regex,
    text: &str,
    mut replacer: F,
    limit: isize,
    start: usize,
) -> Result<String>
where
    F: FnMut(&Match<'_>) -> String,
{
    if limit == 0 {
        return Ok(text.to_string());
    }

    let mut replaced = Vec::new();
    let mut remaining = limit;
    for found in regex.find_iter_at(text, start)? {
        let found = found?;
        replaced.push((found.range(), replacer(&found)));
        remaining -= 1;
        if remaining == 0 {
            break;
        }
    }
    if regex.right_to_left() {
        replaced.reverse();
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (range, replacement) in replaced {
        out.push_str(&text[last..range.start]);
        out.push_str(&replacement);
        last = range.end;
    }
    out.push_str(&text[last..]);
    Ok(out)
}
