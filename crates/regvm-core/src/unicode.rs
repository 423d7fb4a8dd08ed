//! Unicode property tables.
//!
//! General categories and scripts are resolved through `regex-syntax`, which
//! ships the Unicode tables. The shorthand classes (`\w`, `\d`, `\s`) are
//! built once and shared.

use std::sync::LazyLock;

use regex_syntax::hir::{Class, HirKind};

use crate::charclass::{CharClass, CharRange};

static WORD: LazyLock<CharClass> = LazyLock::new(|| {
    let mut class = CharClass::new();
    for name in ["L", "Mn", "Nd", "Pc"] {
        if let Some(ranges) = property_ranges(name) {
            class.push_ranges(ranges);
        }
    }
    class
});

static DIGIT: LazyLock<CharClass> = LazyLock::new(|| {
    let mut class = CharClass::new();
    if let Some(ranges) = property_ranges("Nd") {
        class.push_ranges(ranges);
    }
    class
});

static SPACE: LazyLock<CharClass> = LazyLock::new(|| {
    let mut class = CharClass::new();
    for c in ['\x0C', '\n', '\r', '\t', '\x0B', '\u{85}'] {
        class.push_char(c);
    }
    if let Some(ranges) = property_ranges("Z") {
        class.push_ranges(ranges);
    }
    class
});

/// Resolves a `\p{..}` name (general category or script) to its ranges.
///
/// Returns `None` for names the tables do not know. Block names (`IsGreek`)
/// are not supported and also yield `None`.
pub fn property_ranges(name: &str) -> Option<Vec<CharRange>> {
    let well_formed = !name.is_empty()
        && !name.starts_with("Is")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' ' | '='));
    if !well_formed {
        return None;
    }

    let hir = regex_syntax::Parser::new()
        .parse(&format!("\\p{{{name}}}"))
        .ok()?;
    match hir.kind() {
        HirKind::Class(Class::Unicode(class)) => Some(
            class
                .ranges()
                .iter()
                .map(|r| CharRange::new(r.start(), r.end()))
                .collect(),
        ),
        HirKind::Literal(lit) => {
            let c = std::str::from_utf8(&lit.0).ok()?.chars().next()?;
            Some(vec![CharRange::single(c)])
        }
        _ => None,
    }
}

/// `\w`. ECMAScript restricts it to `[a-zA-Z0-9_]`.
pub fn word_class(ecma: bool) -> CharClass {
    if ecma {
        let mut class = CharClass::new();
        class.push_range('a', 'z');
        class.push_range('A', 'Z');
        class.push_range('0', '9');
        class.push_char('_');
        return class;
    }
    WORD.clone()
}

/// `\d`. ECMAScript restricts it to `[0-9]`.
pub fn digit_class(ecma: bool) -> CharClass {
    if ecma {
        return CharClass::from_range('0', '9');
    }
    DIGIT.clone()
}

/// `\s`. ECMAScript restricts it to `[ \f\n\r\t\v]`.
pub fn space_class(ecma: bool) -> CharClass {
    if ecma {
        let mut class = CharClass::new();
        for c in [' ', '\x0C', '\n', '\r', '\t', '\x0B'] {
            class.push_char(c);
        }
        return class;
    }
    SPACE.clone()
}

/// Word character as seen by `\b`: `\w` plus the zero-width joiners.
pub fn is_word_char(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric() || c == '_';
    }
    c == '\u{200C}' || c == '\u{200D}' || WORD.contains(c)
}

pub fn is_ecma_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
