use std::io::Write;

use regvm_bytecode::dump;
use regvm_core::Colors;

use super::common::{CommandError, Outcome, RegexArgs};

pub struct DumpArgs {
    pub regex: RegexArgs,
}

pub fn run(args: DumpArgs, out: &mut dyn Write) -> Result<Outcome, CommandError> {
    let regex = args.regex.compile()?;
    let colors = Colors::new(args.regex.color);
    write!(out, "{}", dump(regex.program(), colors))?;
    Ok(Outcome::Success)
}
