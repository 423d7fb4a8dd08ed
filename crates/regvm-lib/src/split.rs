//! Splitting text around matches.

use crate::Result;
use crate::regex::Regex;

/// Splits into at most `count` pieces (`0` for no limit). Pieces come back
/// in text order even in right-to-left mode.
pub(crate) fn split<'t>(
    regex: &Regex,
    text: &'t str,
    count: isize,
    start: usize,
) -> Result<Vec<&'t str>> {
    if count == 1 {
        return Ok(vec![text]);
    }

    // Each separator carries the groups it captured.
    let mut separators = Vec::new();
    let mut remaining = count - 1;
    for found in regex.find_iter_at(text, start)? {
        let found = found?;
        let groups: Vec<&'t str> = found
            .groups()
            .skip(1)
            .filter(|group| group.matched())
            .map(|group| group.as_str())
            .collect();
        separators.push((found.range(), groups));
        remaining -= 1;
        if remaining == 0 {
            break;
        }
    }
    if regex.right_to_left() {
        separators.reverse();
    }

    let mut pieces = Vec::with_capacity(separators.len() + 1);
    let mut last = 0;
    for (range, groups) in separators {
        pieces.push(&text[last..range.start]);
        pieces.extend(groups);
        last = range.end;
    }
    pieces.push(&text[last..]);
    Ok(pieces)
}
