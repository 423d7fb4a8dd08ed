use std::io::Write;

use super::common::{CommandError, Outcome, RegexArgs};

pub struct CheckArgs {
    pub regex: RegexArgs,
}

/// Silent on success, like `cargo check`. Diagnostics are reported through
/// the returned error.
pub fn run(args: CheckArgs, _out: &mut dyn Write) -> Result<Outcome, CommandError> {
    args.regex.compile()?;
    Ok(Outcome::Success)
}
