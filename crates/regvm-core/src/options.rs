//! Regex option flags.
//!
//! Options are a plain bitset. The numeric values mirror the conventional
//! layout so that combinations serialize to stable integers in cache keys
//! and diagnostics.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// Set of matching options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct RegexOptions(u16);

/// Invalid option combination or option string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("ECMAScript can only be combined with IgnoreCase and Multiline (got `{0}`)")]
    EcmaScriptCombination(RegexOptions),
    #[error("unknown option letter `{0}`")]
    UnknownLetter(char),
}

impl RegexOptions {
    pub const NONE: Self = Self(0);
    pub const IGNORE_CASE: Self = Self(0x0001);
    pub const MULTILINE: Self = Self(0x0002);
    pub const EXPLICIT_CAPTURE: Self = Self(0x0004);
    pub const SINGLELINE: Self = Self(0x0010);
    pub const IGNORE_PATTERN_WHITESPACE: Self = Self(0x0020);
    pub const RIGHT_TO_LEFT: Self = Self(0x0040);
    pub const ECMA_SCRIPT: Self = Self(0x0100);
    pub const CULTURE_INVARIANT: Self = Self(0x0200);

    const ALL: Self = Self(0x0377);

    /// Named flags in display order.
    const NAMED: [(Self, &'static str); 8] = [
        (Self::IGNORE_CASE, "IgnoreCase"),
        (Self::MULTILINE, "Multiline"),
        (Self::EXPLICIT_CAPTURE, "ExplicitCapture"),
        (Self::SINGLELINE, "Singleline"),
        (Self::IGNORE_PATTERN_WHITESPACE, "IgnorePatternWhitespace"),
        (Self::RIGHT_TO_LEFT, "RightToLeft"),
        (Self::ECMA_SCRIPT, "ECMAScript"),
        (Self::CULTURE_INVARIANT, "CultureInvariant"),
    ];

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Builds options from raw bits, dropping unknown bits.
    pub const fn from_bits_truncate(bits: u16) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    pub fn set(&mut self, other: Self, on: bool) {
        if on {
            self.insert(other)
        } else {
            self.remove(other)
        }
    }

    pub fn ignore_case(self) -> bool {
        self.contains(Self::IGNORE_CASE)
    }

    pub fn multiline(self) -> bool {
        self.contains(Self::MULTILINE)
    }

    pub fn explicit_capture(self) -> bool {
        self.contains(Self::EXPLICIT_CAPTURE)
    }

    pub fn singleline(self) -> bool {
        self.contains(Self::SINGLELINE)
    }

    pub fn ignore_pattern_whitespace(self) -> bool {
        self.contains(Self::IGNORE_PATTERN_WHITESPACE)
    }

    pub fn right_to_left(self) -> bool {
        self.contains(Self::RIGHT_TO_LEFT)
    }

    pub fn ecma_script(self) -> bool {
        self.contains(Self::ECMA_SCRIPT)
    }

    pub fn culture_invariant(self) -> bool {
        self.contains(Self::CULTURE_INVARIANT)
    }

    /// Checks that the combination is legal.
    ///
    /// ECMAScript mode only tolerates `IGNORE_CASE` and `MULTILINE` next to it.
    pub fn validate(self) -> Result<(), OptionsError> {
        let ecma_compatible = Self::ECMA_SCRIPT | Self::IGNORE_CASE | Self::MULTILINE;
        if self.ecma_script() && !(self & !ecma_compatible).is_empty() {
            return Err(OptionsError::EcmaScriptCombination(self));
        }
        Ok(())
    }

    /// Maps an inline option letter (`(?imnsx)`) to its flag.
    pub fn from_inline_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'i' => Some(Self::IGNORE_CASE),
            'm' => Some(Self::MULTILINE),
            'n' => Some(Self::EXPLICIT_CAPTURE),
            's' => Some(Self::SINGLELINE),
            'x' => Some(Self::IGNORE_PATTERN_WHITESPACE),
            _ => None,
        }
    }

    /// Parses a letter string such as `"imx"`.
    ///
    /// Beyond the inline letters, `r` selects right-to-left, `e` ECMAScript and
    /// `c` culture-invariant folding.
    pub fn parse_letters(s: &str) -> Result<Self, OptionsError> {
        let mut options = Self::NONE;
        for c in s.chars() {
            let flag = match c {
                'r' => Self::RIGHT_TO_LEFT,
                'e' => Self::ECMA_SCRIPT,
                'c' => Self::CULTURE_INVARIANT,
                _ => Self::from_inline_letter(c).ok_or(OptionsError::UnknownLetter(c))?,
            };
            options.insert(flag);
        }
        Ok(options)
    }
}

impl BitOr for RegexOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for RegexOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for RegexOptions {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for RegexOptions {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }
}

impl fmt::Display for RegexOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        let mut first = true;
        for (flag, name) in Self::NAMED {
            if !self.contains(flag) {
                continue;
            }
            if !first {
                f.write_str(" | ")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}
