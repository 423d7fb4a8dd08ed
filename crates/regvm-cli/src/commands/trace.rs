//! Trace the interpreter while it searches for the first match.

use std::io::Write;

use regvm_vm::{PrintTracer, Runner, ScanConfig, ScanInput, Verbosity};

use super::common::{CommandError, Input, Outcome, RegexArgs, load_input};

pub struct TraceArgs {
    pub regex: RegexArgs,
    pub input: Option<Input>,
    pub verbosity: Verbosity,
}

pub fn run(args: TraceArgs, out: &mut dyn Write) -> Result<Outcome, CommandError> {
    let regex = args.regex.compile()?;
    let text = load_input(args.input.as_ref())?;
    let program = regex.program();

    let start = if regex.right_to_left() { text.len() } else { 0 };
    let config = ScanConfig::new()
        .timeout(regex.match_timeout())
        .unmatched_backref(regex.unmatched_backref());
    let mut tracer = PrintTracer::builder(&text, program)
        .verbosity(args.verbosity)
        .colored(args.regex.color)
        .build();

    let input = ScanInput::new(&text, start);
    let result = Runner::new().scan_with(program, input, config, &mut tracer);

    // Printed even when the scan timed out.
    write!(out, "{}", tracer.output())?;
    let found = result?;
    Ok(Outcome::found(found.is_some()))
}
