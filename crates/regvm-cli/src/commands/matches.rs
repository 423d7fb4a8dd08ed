//! Print the matches of a pattern.

use std::fmt::Write as _;
use std::io::Write;

use regvm_core::Colors;
use regvm_lib::Match;

use super::common::{CommandError, Input, Outcome, RegexArgs, load_input};

pub struct MatchArgs {
    pub regex: RegexArgs,
    pub input: Option<Input>,
    pub first: bool,
    pub json: bool,
}

pub fn run(args: MatchArgs, out: &mut dyn Write) -> Result<Outcome, CommandError> {
    let regex = args.regex.compile()?;
    let text = load_input(args.input.as_ref())?;
    let colors = Colors::new(args.regex.color);
    let regex_err = |err: regvm_lib::Error| CommandError::from_regex(err, args.regex.color);

    let found = if args.first {
        regex.find(&text).map_err(regex_err)?.into_iter().collect()
    } else {
        regex.find_all(&text).map_err(regex_err)?
    };

    if args.json {
        if args.first {
            serde_json::to_writer_pretty(&mut *out, &found.first())?;
        } else {
            serde_json::to_writer_pretty(&mut *out, &found)?;
        }
        writeln!(out)?;
    } else {
        for m in &found {
            write!(out, "{}", format_match(m, colors))?;
        }
    }

    Ok(Outcome::found(!found.is_empty()))
}

/// One line for the match, then one indented line per group.
pub fn format_match(m: &Match<'_>, colors: Colors) -> String {
    let Colors {
        blue,
        green,
        dim,
        reset,
        ..
    } = colors;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{dim}{}..{}{reset} {green}{:?}{reset}",
        m.start(),
        m.end(),
        m.as_str()
    );

    for group in m.groups().skip(1) {
        let label = match group.name() {
            Some(name) => name.to_string(),
            None => group.number().to_string(),
        };
        if group.matched() {
            let _ = writeln!(
                out,
                "  {blue}{label}{reset} {dim}{}..{}{reset} {green}{:?}{reset}",
                group.start(),
                group.end(),
                group.as_str()
            );
        } else {
            let _ = writeln!(out, "  {blue}{label}{reset} {dim}unmatched{reset}");
        }
    }
    out
}
