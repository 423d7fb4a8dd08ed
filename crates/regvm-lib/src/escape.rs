//! Escaping pattern metacharacters.

use crate::Result;

/// Escapes the characters that have a meaning in patterns, so the result
/// matches `text` literally. Whitespace is escaped too, which keeps the
/// result literal under `IGNORE_PATTERN_WHITESPACE`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '*' | '+' | '?' | '|' | '{' | '[' | '(' | ')' | '^' | '$' | '.' | '#' | ' ' => {
                out.push('\\');
                out.push(c);
            }
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0C' => out.push_str("\\f"),
            c => out.push(c),
        }
    }
    out
}

/// Replaces escape sequences with the characters they name. Fails on an
/// escape that names nothing, such as `\q` or a trailing `\`.
pub fn unescape(text: &str) -> Result<String> {
    Ok(regvm_compiler::unescape(text)?)
}
