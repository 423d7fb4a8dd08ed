//! Character access by byte offset.
//!
//! Offsets are always on character boundaries, and `beg..end` bounds what
//! the engine may look at.

#[inline]
pub fn next_char(text: &str, pos: usize, end: usize) -> Option<char> {
    if pos >= end {
        return None;
    }
    text[pos..].chars().next()
}

#[inline]
pub fn prev_char(text: &str, pos: usize, beg: usize) -> Option<char> {
    if pos <= beg {
        return None;
    }
    text[..pos].chars().next_back()
}

/// Offset one character further in scan direction, if any.
pub fn bump(text: &str, pos: usize, beg: usize, end: usize, rtl: bool) -> Option<usize> {
    if rtl {
        prev_char(text, pos, beg).map(|c| pos - c.len_utf8())
    } else {
        next_char(text, pos, end).map(|c| pos + c.len_utf8())
    }
}
