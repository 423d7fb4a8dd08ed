use std::io::Write;

use super::common::{CommandError, Input, Outcome, RegexArgs, load_input};

pub struct ReplaceArgs {
    pub regex: RegexArgs,
    pub input: Option<Input>,
    pub replacement: String,
    pub count: isize,
}

pub fn run(args: ReplaceArgs, out: &mut dyn Write) -> Result<Outcome, CommandError> {
    let regex = args.regex.compile()?;
    let text = load_input(args.input.as_ref())?;
    let start = if regex.right_to_left() { text.len() } else { 0 };

    let replaced = regex
        .replace_n(&text, &args.replacement, args.count, start)
        .map_err(|err| CommandError::from_regex(err, args.regex.color))?;

    out.write_all(replaced.as_bytes())?;
    if !replaced.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(Outcome::Success)
}
