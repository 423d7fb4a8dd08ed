//! Literal prefix search.
//!
//! Boyer-Moore over the UTF-8 bytes of a required literal. A match of valid
//! UTF-8 inside valid UTF-8 always starts on a character boundary, so the
//! byte-level search returns valid positions. Right-to-left search runs the
//! same algorithm over a reversed view of the text and the literal.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiteralPrefix {
    literal: String,
    /// Literal bytes in scan order.
    pattern: Vec<u8>,
    /// Last index of each byte in `pattern`, -1 when absent.
    last_occurrence: [isize; 256],
    /// Good-suffix shift indexed by the 1-based mismatch position.
    good_suffix: Vec<usize>,
    right_to_left: bool,
}

impl LiteralPrefix {
    /// Panics on an empty literal.
    pub fn new(literal: &str, right_to_left: bool) -> Self {
        assert!(!literal.is_empty(), "literal prefix must not be empty");

        let mut pattern = literal.as_bytes().to_vec();
        if right_to_left {
            pattern.reverse();
        }

        let mut last_occurrence = [-1isize; 256];
        for (i, &b) in pattern.iter().enumerate() {
            last_occurrence[b as usize] = i as isize;
        }
        let good_suffix = good_suffix_table(&pattern);

        Self {
            literal: literal.to_string(),
            pattern,
            last_occurrence,
            good_suffix,
            right_to_left,
        }
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn right_to_left(&self) -> bool {
        self.right_to_left
    }

    /// Next occurrence within `beg..end` in scan direction from `pos`.
    ///
    /// Left to right: the start of the leftmost occurrence starting at or
    /// after `pos`. Right to left: the end of the rightmost occurrence ending
    /// at or before `pos`, which is where a right-to-left match begins.
    pub fn find(&self, text: &[u8], pos: usize, beg: usize, end: usize) -> Option<usize> {
        let m = self.pattern.len();
        let span = if self.right_to_left {
            pos.checked_sub(beg)?
        } else {
            end.checked_sub(pos)?
        };
        let at = |k: usize| {
            if self.right_to_left {
                text[pos - 1 - k]
            } else {
                text[pos + k]
            }
        };

        let mut shift = 0usize;
        while shift + m <= span {
            let mut j = m;
            while j > 0 && self.pattern[j - 1] == at(shift + j - 1) {
                j -= 1;
            }
            if j == 0 {
                return Some(if self.right_to_left {
                    pos - shift
                } else {
                    pos + shift
                });
            }
            let bad = (j as isize - 1) - self.last_occurrence[at(shift + j - 1) as usize];
            shift += self.good_suffix[j].max(bad.max(1) as usize);
        }
        None
    }

    /// Whether the literal occurs exactly at `pos` in scan direction.
    pub fn is_match_at(&self, text: &[u8], pos: usize, beg: usize, end: usize) -> bool {
        let lit = self.literal.as_bytes();
        if self.right_to_left {
            pos >= beg + lit.len() && &text[pos - lit.len()..pos] == lit
        } else {
            pos + lit.len() <= end && &text[pos..pos + lit.len()] == lit
        }
    }
}

/// Strong good-suffix table, `m + 1` entries.
fn good_suffix_table(p: &[u8]) -> Vec<usize> {
    let m = p.len();
    let mut shift = vec![0usize; m + 1];
    let mut border = vec![0usize; m + 1];

    let mut i = m;
    let mut j = m + 1;
    border[i] = j;
    while i > 0 {
        while j <= m && p[i - 1] != p[j - 1] {
            if shift[j] == 0 {
                shift[j] = j - i;
            }
            j = border[j];
        }
        i -= 1;
        j -= 1;
        border[i] = j;
    }

    j = border[0];
    for (i, s) in shift.iter_mut().enumerate() {
        if *s == 0 {
            *s = j;
        }
        if i == j {
            j = border[j];
        }
    }
    shift
}
