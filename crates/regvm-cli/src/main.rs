mod cli;
mod commands;

use std::io::{self, Write};
use std::process::ExitCode;

use cli::{
    CheckParams, DumpParams, MatchParams, ReplaceParams, SplitParams, TraceParams, build_cli,
};

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    let mut stdout = io::stdout().lock();

    let result = match matches.subcommand() {
        Some(("match", m)) => {
            let params = MatchParams::from_matches(m);
            commands::matches::run(params.into(), &mut stdout)
        }
        Some(("replace", m)) => {
            let params = ReplaceParams::from_matches(m);
            commands::replace::run(params.into(), &mut stdout)
        }
        Some(("split", m)) => {
            let params = SplitParams::from_matches(m);
            commands::split::run(params.into(), &mut stdout)
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into(), &mut stdout)
        }
        Some(("trace", m)) => {
            let params = TraceParams::from_matches(m);
            commands::trace::run(params.into(), &mut stdout)
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into(), &mut stdout)
        }
        _ => unreachable!("clap should have caught this"),
    };
    let _ = stdout.flush();

    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("{}", err.report().trim_end());
            ExitCode::from(err.exit_code())
        }
    }
}
