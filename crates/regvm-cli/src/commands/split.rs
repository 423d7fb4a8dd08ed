use std::io::Write;

use super::common::{CommandError, Input, Outcome, RegexArgs, load_input};

pub struct SplitArgs {
    pub regex: RegexArgs,
    pub input: Option<Input>,
    pub count: isize,
    pub json: bool,
}

/// Pieces are printed one per line with `{:?}` so separators that
/// captured newlines stay visible.
pub fn run(args: SplitArgs, out: &mut dyn Write) -> Result<Outcome, CommandError> {
    let regex = args.regex.compile()?;
    let text = load_input(args.input.as_ref())?;
    let start = if regex.right_to_left() { text.len() } else { 0 };

    let pieces = regex
        .split_n(&text, args.count, start)
        .map_err(|err| CommandError::from_regex(err, args.regex.color))?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &pieces)?;
        writeln!(out)?;
    } else {
        for piece in &pieces {
            writeln!(out, "{piece:?}")?;
        }
    }
    Ok(Outcome::Success)
}
