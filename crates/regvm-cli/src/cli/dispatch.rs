//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but are populated from clap;
//! the `From` impls resolve color and timeout settings on the way in.

use std::path::PathBuf;
use std::time::Duration;

use clap::ArgMatches;
use regvm_vm::Verbosity;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::common::{Input, RegexArgs};
use crate::commands::dump::DumpArgs;
use crate::commands::matches::MatchArgs;
use crate::commands::replace::ReplaceArgs;
use crate::commands::split::SplitArgs;
use crate::commands::trace::TraceArgs;

/// Flags every command accepts.
#[derive(Debug)]
pub struct RegexParams {
    pub pattern: String,
    pub options: String,
    pub culture: Option<String>,
    pub timeout_ms: Option<u64>,
    pub color: ColorChoice,
}

impl RegexParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            pattern: m.get_one::<String>("pattern").cloned().unwrap_or_default(),
            options: m.get_one::<String>("options").cloned().unwrap_or_default(),
            culture: m.get_one::<String>("culture").cloned(),
            timeout_ms: m.get_one::<u64>("timeout_ms").copied(),
            color: parse_color(m),
        }
    }
}

impl From<RegexParams> for RegexArgs {
    fn from(p: RegexParams) -> Self {
        Self {
            pattern: p.pattern,
            options: p.options,
            culture: p.culture,
            timeout: p.timeout_ms.map(Duration::from_millis),
            color: p.color.should_colorize(),
        }
    }
}

/// Input selection for commands that scan text.
#[derive(Debug)]
pub struct InputParams {
    pub input_path: Option<PathBuf>,
    pub text: Option<String>,
}

impl InputParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input_path: m.get_one::<PathBuf>("input_path").cloned(),
            text: m.get_one::<String>("text").cloned(),
        }
    }
}

impl From<InputParams> for Option<Input> {
    fn from(p: InputParams) -> Self {
        match (p.text, p.input_path) {
            (Some(text), _) => Some(Input::Text(text)),
            (None, Some(path)) if path.as_os_str() == "-" => Some(Input::Stdin),
            (None, Some(path)) => Some(Input::File(path)),
            (None, None) => None,
        }
    }
}

pub struct MatchParams {
    pub regex: RegexParams,
    pub input: InputParams,
    pub first: bool,
    pub json: bool,
}

impl MatchParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            regex: RegexParams::from_matches(m),
            input: InputParams::from_matches(m),
            first: m.get_flag("first"),
            json: m.get_flag("json"),
        }
    }
}

impl From<MatchParams> for MatchArgs {
    fn from(p: MatchParams) -> Self {
        Self {
            regex: p.regex.into(),
            input: p.input.into(),
            first: p.first,
            json: p.json,
        }
    }
}

pub struct ReplaceParams {
    pub regex: RegexParams,
    pub input: InputParams,
    pub replacement: String,
    pub count: isize,
}

impl ReplaceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            regex: RegexParams::from_matches(m),
            input: InputParams::from_matches(m),
            replacement: m.get_one::<String>("replacement").cloned().unwrap_or_default(),
            count: m.get_one::<isize>("count").copied().unwrap_or(-1),
        }
    }
}

impl From<ReplaceParams> for ReplaceArgs {
    fn from(p: ReplaceParams) -> Self {
        Self {
            regex: p.regex.into(),
            input: p.input.into(),
            replacement: p.replacement,
            count: p.count,
        }
    }
}

pub struct SplitParams {
    pub regex: RegexParams,
    pub input: InputParams,
    pub count: isize,
    pub json: bool,
}

impl SplitParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            regex: RegexParams::from_matches(m),
            input: InputParams::from_matches(m),
            count: m.get_one::<isize>("count").copied().unwrap_or(0),
            json: m.get_flag("json"),
        }
    }
}

impl From<SplitParams> for SplitArgs {
    fn from(p: SplitParams) -> Self {
        Self {
            regex: p.regex.into(),
            input: p.input.into(),
            count: p.count,
            json: p.json,
        }
    }
}

pub struct DumpParams {
    pub regex: RegexParams,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            regex: RegexParams::from_matches(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            regex: p.regex.into(),
        }
    }
}

pub struct TraceParams {
    pub regex: RegexParams,
    pub input: InputParams,
    pub verbose: u8,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            regex: RegexParams::from_matches(m),
            input: InputParams::from_matches(m),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            _ => Verbosity::Verbose,
        };

        Self {
            regex: p.regex.into(),
            input: p.input.into(),
            verbosity,
        }
    }
}

pub struct CheckParams {
    pub regex: RegexParams,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            regex: RegexParams::from_matches(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            regex: p.regex.into(),
        }
    }
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
