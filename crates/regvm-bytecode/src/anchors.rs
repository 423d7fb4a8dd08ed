//! Leading anchors.
//!
//! When every match must begin at a fixed kind of position, the scanner tests
//! only that position instead of walking the text.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Anchors(u8);

impl Anchors {
    pub const NONE: Self = Self(0);
    /// `\A` or `^`: text beginning.
    pub const BEGINNING: Self = Self(0x1);
    /// `\G`: search start.
    pub const START: Self = Self(0x2);
    /// `\Z` or `$`: end, or before a final newline.
    pub const END_Z: Self = Self(0x4);
    /// `\z`: text end.
    pub const END: Self = Self(0x8);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }
}

impl fmt::Display for Anchors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let names = [
            (Self::BEGINNING, "Beginning"),
            (Self::START, "Start"),
            (Self::END_Z, "EndZ"),
            (Self::END, "End"),
        ];
        let parts: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&parts.join(" | "))
    }
}
