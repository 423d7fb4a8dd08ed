//! Pattern parser.
//!
//! Parsing runs in two passes over the same grammar. The first records every
//! capturing group; the numbering is then fixed (see [`numbering`]) and the
//! second pass builds the tree, resolving backreferences and conditionals
//! against the complete group table.
//!
//! Option flags that can change mid-pattern (`i m n s x`) are tracked by the
//! parser and baked into the nodes they affect. `RIGHT_TO_LEFT` does not
//! change parsing.

pub mod ast;
mod class;
mod core;
mod error;
mod escape;
mod grammar;
mod numbering;

#[cfg(test)]
mod ast_tests;

pub use ast::{Ast, Node};
pub use error::PatternSyntaxError;

use regvm_core::RegexOptions;

use self::core::Parser;
use self::numbering::Numbering;

/// Parses `pattern` under `options`.
pub fn parse(pattern: &str, options: RegexOptions) -> Result<Ast, PatternSyntaxError> {
    let mut declare = Parser::new(pattern, options, None);
    declare.parse_root()?;
    let numbering = Numbering::assign(&declare.decls);

    let mut build = Parser::new(pattern, options, Some(&numbering));
    let root = build.parse_root()?;

    Ok(Ast {
        pattern: pattern.to_string(),
        options,
        root,
        captures: numbering.capture_table(),
    })
}

/// Replaces the escape sequences in `input` with the characters they name.
/// Escapes are read the way a character class reads them, so `\b` is a
/// backspace.
pub fn unescape(input: &str) -> Result<String, PatternSyntaxError> {
    if !input.contains('\\') {
        return Ok(input.to_string());
    }

    let mut parser = Parser::new(input, RegexOptions::NONE, None);
    let mut out = String::with_capacity(input.len());
    while let Some(c) = parser.bump() {
        if c == '\\' {
            let start = parser.pos - 1;
            out.push(parser.parse_char_escape(start, true)?);
        } else {
            out.push(c);
        }
    }
    Ok(out)
}
