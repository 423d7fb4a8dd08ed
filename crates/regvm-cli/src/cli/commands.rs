//! Command builders for the CLI.
//!
//! Every command takes the pattern plus the regex flags; commands that scan
//! text also take an input file or `-t`.

use clap::Command;

use super::args::*;

/// Pattern compilation flags shared by all commands.
fn with_regex_args(cmd: Command) -> Command {
    cmd.arg(pattern_arg())
        .arg(options_arg())
        .arg(culture_arg())
        .arg(timeout_arg())
        .arg(color_arg())
}

/// Input flags for commands that scan text.
fn with_input_args(cmd: Command) -> Command {
    cmd.arg(input_path_arg()).arg(text_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("regvm")
        .about("Backtracking regular expressions: match, replace, split and trace")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(match_command())
        .subcommand(replace_command())
        .subcommand(split_command())
        .subcommand(dump_command())
        .subcommand(trace_command())
        .subcommand(check_command())
}

/// Find matches in the input.
pub fn match_command() -> Command {
    let cmd = Command::new("match")
        .about("Print the matches of a pattern")
        .override_usage(
            "\
  regvm match <PATTERN> <INPUT>
  regvm match <PATTERN> -t <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  regvm match '\d+' -t 'a1b22'            # every match with its groups
  regvm match '(?<w>\w+)' notes.txt --json
  regvm match 'x' -t 'axbx' -o r --first  # rightmost match"#,
        );

    with_input_args(with_regex_args(cmd))
        .arg(first_arg())
        .arg(json_arg())
}

/// Replace matches in the input.
pub fn replace_command() -> Command {
    let cmd = Command::new("replace")
        .about("Replace matches with an expanded template")
        .override_usage(
            "\
  regvm replace <PATTERN> <REPLACEMENT> <INPUT>
  regvm replace <PATTERN> <REPLACEMENT> -t <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  regvm replace '(\w+)@(\w+)' '$2 at $1' -t 'me@host'
  regvm replace '\s+' ' ' notes.txt -n 1"#,
        );

    with_regex_args(cmd)
        .arg(replacement_arg())
        .arg(input_path_arg())
        .arg(text_arg())
        .arg(replace_count_arg())
}

/// Split the input around matches.
pub fn split_command() -> Command {
    let cmd = Command::new("split")
        .about("Split the input around matches, one piece per line")
        .override_usage(
            "\
  regvm split <PATTERN> <INPUT>
  regvm split <PATTERN> -t <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  regvm split ',\s*' -t 'a, b,c'
  regvm split '(-)' -t '1-2' --json       # captured separators included"#,
        );

    with_input_args(with_regex_args(cmd))
        .arg(split_count_arg())
        .arg(json_arg())
}

/// Show the compiled program.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the compiled program")
        .override_usage("  regvm dump <PATTERN> [-o <LETTERS>]")
        .after_help(
            r#"EXAMPLES:
  regvm dump 'a(b|c)*d'
  regvm dump '(?<=x)y' -o r"#,
        );

    with_regex_args(cmd)
}

/// Trace one scan step by step.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace the interpreter while it searches for the first match")
        .override_usage(
            "\
  regvm trace <PATTERN> <INPUT>
  regvm trace <PATTERN> -t <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  regvm trace 'a|ab' -t 'xab'
  regvm trace '(a+)+b' -t 'aaac' -v       # show the input at each step"#,
        );

    with_input_args(with_regex_args(cmd)).arg(verbose_arg())
}

/// Validate a pattern.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a pattern")
        .override_usage("  regvm check <PATTERN> [-o <LETTERS>]")
        .after_help(
            r#"EXAMPLES:
  regvm check 'a(b'                       # reports the missing )
  regvm check '(?<n>x)\k<n>' -o e"#,
        );

    with_regex_args(cmd)
}
