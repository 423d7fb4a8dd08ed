//! Culture identifiers and case folding.
//!
//! Case-insensitive matching lowercases both the pattern (at compile time)
//! and every input character (at match time) through the same [`Culture`].
//! Only the Turkic cultures change the mapping: dotted and dotless `i` fold
//! to different characters there.

use std::env;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum CaseRules {
    Default,
    Turkic,
}

/// A named locale that controls case folding.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Culture {
    name: String,
    rules: CaseRules,
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

impl Culture {
    /// The invariant culture. Its name is the empty string.
    pub fn invariant() -> Self {
        Self {
            name: String::new(),
            rules: CaseRules::Default,
        }
    }

    /// Creates a culture from a BCP-47 or POSIX style name (`tr-TR`, `tr_TR.UTF-8`).
    pub fn new(name: &str) -> Self {
        let normalized = normalize_name(name);
        let language = normalized.split('-').next().unwrap_or_default();
        let rules = match language {
            "tr" | "az" => CaseRules::Turkic,
            _ => CaseRules::Default,
        };
        Self {
            name: normalized,
            rules,
        }
    }

    /// Culture from the process locale environment, invariant when unset.
    pub fn from_env() -> Self {
        ["LC_ALL", "LC_CTYPE", "LANG"]
            .iter()
            .filter_map(|key| env::var(key).ok())
            .find(|value| !value.is_empty())
            .map(|value| Self::new(&value))
            .unwrap_or_else(Self::invariant)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_invariant(&self) -> bool {
        self.name.is_empty()
    }

    /// Simple lowercase mapping. Characters whose lowercase form spans several
    /// scalars fold to themselves.
    pub fn to_lower(&self, c: char) -> char {
        if c.is_ascii() {
            if self.rules == CaseRules::Turkic && c == 'I' {
                return 'ı';
            }
            return c.to_ascii_lowercase();
        }
        if self.rules == CaseRules::Turkic && c == 'İ' {
            return 'i';
        }
        let mut lower = c.to_lowercase();
        match (lower.next(), lower.next()) {
            (Some(l), None) => l,
            _ => c,
        }
    }

    /// Compares two characters under this culture's folding.
    pub fn eq_ignore_case(&self, a: char, b: char) -> bool {
        a == b || self.to_lower(a) == self.to_lower(b)
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invariant() {
            f.write_str("(invariant)")
        } else {
            f.write_str(&self.name)
        }
    }
}

/// `tr_TR.UTF-8@euro` becomes `tr-tr`; `C` and `POSIX` become invariant.
fn normalize_name(name: &str) -> String {
    let base = name.split(['.', '@']).next().unwrap_or_default().trim();
    if base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix") {
        return String::new();
    }
    base.replace('_', "-").to_ascii_lowercase()
}
