//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so the same definition is reused
//! across commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Pattern to compile (positional).
pub fn pattern_arg() -> Arg {
    Arg::new("pattern")
        .value_name("PATTERN")
        .required(true)
        .help("Regular expression")
}

/// Replacement template (positional).
pub fn replacement_arg() -> Arg {
    Arg::new("replacement")
        .value_name("REPLACEMENT")
        .required(true)
        .allow_hyphen_values(true)
        .help("Replacement template ($1, ${name}, $&, $$, ...)")
}

/// Input file (positional).
pub fn input_path_arg() -> Arg {
    Arg::new("input_path")
        .value_name("INPUT")
        .value_parser(value_parser!(PathBuf))
        .help("Input file (use \"-\" for stdin)")
}

/// Inline input text (-t/--text).
pub fn text_arg() -> Arg {
    Arg::new("text")
        .short('t')
        .long("text")
        .value_name("TEXT")
        .allow_hyphen_values(true)
        .conflicts_with("input_path")
        .help("Inline input text")
}

/// Option letters (-o/--options).
pub fn options_arg() -> Arg {
    Arg::new("options")
        .short('o')
        .long("options")
        .value_name("LETTERS")
        .default_value("")
        .hide_default_value(true)
        .help("Options: i m n s x, r (right to left), e (ECMAScript), c (culture invariant)")
}

/// Culture for case-insensitive matching (--culture).
pub fn culture_arg() -> Arg {
    Arg::new("culture")
        .long("culture")
        .value_name("NAME")
        .help("Culture name, such as tr-TR (default: invariant)")
}

/// Match timeout (--timeout-ms).
pub fn timeout_arg() -> Arg {
    Arg::new("timeout_ms")
        .long("timeout-ms")
        .value_name("MS")
        .value_parser(value_parser!(u64).range(1..))
        .help("Abort a scan after this many milliseconds")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print results as JSON")
}

/// Stop after the first match (--first).
pub fn first_arg() -> Arg {
    Arg::new("first")
        .long("first")
        .action(ArgAction::SetTrue)
        .help("Report only the first match")
}

/// Replacement limit (-n/--count).
pub fn replace_count_arg() -> Arg {
    Arg::new("count")
        .short('n')
        .long("count")
        .value_name("N")
        .default_value("-1")
        .allow_negative_numbers(true)
        .value_parser(value_parser!(isize))
        .help("Replace at most N matches (-1 for all)")
}

/// Piece limit (-n/--count).
pub fn split_count_arg() -> Arg {
    Arg::new("count")
        .short('n')
        .long("count")
        .value_name("N")
        .default_value("0")
        .allow_negative_numbers(true)
        .value_parser(value_parser!(isize))
        .help("Split into at most N pieces (0 for no limit)")
}

/// Verbosity level (-v).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Show the input at every step")
}
