use std::io::Write as _;
use std::time::Duration;

use indoc::indoc;
use regvm_core::Colors;
use regvm_lib::Regex;
use regvm_vm::Verbosity;

use super::check::{self, CheckArgs};
use super::common::{CommandError, Input, Outcome, RegexArgs};
use super::dump::{self, DumpArgs};
use super::matches::{self, MatchArgs, format_match};
use super::replace::{self, ReplaceArgs};
use super::split::{self, SplitArgs};
use super::trace::{self, TraceArgs};

fn regex(pattern: &str) -> RegexArgs {
    RegexArgs {
        pattern: pattern.to_string(),
        options: String::new(),
        culture: None,
        timeout: None,
        color: false,
    }
}

fn text(s: &str) -> Option<Input> {
    Some(Input::Text(s.to_string()))
}

fn output(run: impl FnOnce(&mut Vec<u8>) -> Result<Outcome, CommandError>) -> (Outcome, String) {
    let mut out = Vec::new();
    let outcome = run(&mut out).unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

fn match_args(pattern: &str, input: &str) -> MatchArgs {
    MatchArgs {
        regex: regex(pattern),
        input: text(input),
        first: false,
        json: false,
    }
}

#[test]
fn match_prints_matches_and_groups() {
    let (outcome, out) = output(|out| matches::run(match_args(r"(?<k>\w)=(\d)?", "a=1 b="), out));

    assert_eq!(outcome, Outcome::Success);
    assert_eq!(
        out,
        indoc! {r#"
            0..3 "a=1"
              1 2..3 "1"
              k 0..1 "a"
            4..6 "b="
              1 unmatched
              k 4..5 "b"
        "#}
    );
}

#[test]
fn match_without_matches_reports_no_match() {
    let (outcome, out) = output(|out| matches::run(match_args("z", "abc"), out));

    assert_eq!(outcome, Outcome::NoMatch);
    assert_eq!(outcome.exit_code(), std::process::ExitCode::from(1));
    assert!(out.is_empty());
}

#[test]
fn match_first_as_json() {
    let args = MatchArgs {
        first: true,
        json: true,
        ..match_args(r"\d", "a1b2")
    };
    let (_, out) = output(|out| matches::run(args, out));

    insta::assert_snapshot!(out, @r#"
    {
      "start": 1,
      "end": 2,
      "value": "1",
      "groups": [
        {
          "number": 0,
          "name": null,
          "matched": true,
          "start": 1,
          "end": 2,
          "value": "1",
          "captures": [
            {
              "start": 1,
              "end": 2,
              "value": "1"
            }
          ]
        }
      ]
    }
    "#);
}

#[test]
fn match_first_without_match_prints_null() {
    let args = MatchArgs {
        first: true,
        json: true,
        ..match_args("z", "abc")
    };
    let (outcome, out) = output(|out| matches::run(args, out));

    assert_eq!(outcome, Outcome::NoMatch);
    assert_eq!(out, "null\n");
}

#[test]
fn match_right_to_left_first_is_rightmost() {
    let args = MatchArgs {
        regex: RegexArgs {
            options: "r".to_string(),
            ..regex(r"\d")
        },
        first: true,
        ..match_args("", "1a2")
    };
    let (_, out) = output(|out| matches::run(args, out));

    assert_eq!(out, "2..3 \"2\"\n");
}

#[test]
fn format_match_colors() {
    let re = Regex::new("b").unwrap();
    let m = re.find("ab").unwrap().unwrap();

    assert_eq!(
        format_match(&m, Colors::ON),
        "\x1b[2m1..2\x1b[0m \x1b[32m\"b\"\x1b[0m\n"
    );
}

#[test]
fn replace_expands_template() {
    let args = ReplaceArgs {
        regex: regex(r"(\w+)@(\w+)"),
        input: text("me@host"),
        replacement: "$2 at $1".to_string(),
        count: -1,
    };
    let (outcome, out) = output(|out| replace::run(args, out));

    assert_eq!(outcome, Outcome::Success);
    assert_eq!(out, "host at me\n");
}

#[test]
fn replace_reads_input_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "a a a\n").unwrap();

    let args = ReplaceArgs {
        regex: regex("a"),
        input: Some(Input::File(file.path().to_path_buf())),
        replacement: "b".to_string(),
        count: 2,
    };
    let (_, out) = output(|out| replace::run(args, out));

    assert_eq!(out, "b b a\n");
}

#[test]
fn missing_file_is_a_runtime_error() {
    let dir = tempfile::tempdir().unwrap();
    let args = ReplaceArgs {
        regex: regex("a"),
        input: Some(Input::File(dir.path().join("missing.txt"))),
        replacement: "b".to_string(),
        count: -1,
    };
    let err = replace::run(args, &mut Vec::new()).unwrap_err();

    assert!(matches!(err, CommandError::Read { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(err.report().starts_with("error: failed to read"));
}

#[test]
fn missing_input_is_reported() {
    let args = MatchArgs {
        input: None,
        ..match_args("a", "")
    };
    let err = matches::run(args, &mut Vec::new()).unwrap_err();

    assert!(matches!(err, CommandError::MissingInput));
}

#[test]
fn invalid_count_is_a_runtime_error() {
    let args = SplitArgs {
        regex: regex(","),
        input: text("a,b"),
        count: -1,
        json: false,
    };
    let err = split::run(args, &mut Vec::new()).unwrap_err();

    assert!(matches!(err, CommandError::Regex(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn split_prints_one_piece_per_line() {
    let args = SplitArgs {
        regex: regex(r"(-)|\n"),
        input: text("a-b\nc"),
        count: 0,
        json: false,
    };
    let (_, out) = output(|out| split::run(args, out));

    assert_eq!(
        out,
        indoc! {r#"
            "a"
            "-"
            "b"
            "c"
        "#}
    );
}

#[test]
fn split_as_json() {
    let args = SplitArgs {
        regex: regex(r",\s*"),
        input: text("a, b,c"),
        count: 2,
        json: true,
    };
    let (_, out) = output(|out| split::run(args, out));

    insta::assert_snapshot!(out, @r#"
    [
      "a",
      "b,c"
    ]
    "#);
}

#[test]
fn dump_prints_the_program() {
    let (outcome, out) = output(|out| dump::run(DumpArgs { regex: regex("ab+") }, out));

    assert_eq!(outcome, Outcome::Success);
    assert!(out.starts_with("[program]\n"));
    assert!(out.contains("\"ab+\""));
}

#[test]
fn check_is_silent_on_success() {
    let (outcome, out) = output(|out| check::run(CheckArgs { regex: regex("a(b)") }, out));

    assert_eq!(outcome, Outcome::Success);
    assert!(out.is_empty());
}

#[test]
fn check_renders_syntax_errors() {
    let err = check::run(CheckArgs { regex: regex("ab(c") }, &mut Vec::new()).unwrap_err();

    let CommandError::Syntax(rendered) = &err else {
        panic!("expected a syntax error, got {err:?}");
    };
    assert!(rendered.contains("not enough )'s"));
    assert!(rendered.contains("ab(c"));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(&err.report(), rendered);
}

#[test]
fn check_rejects_unknown_option_letters() {
    let args = CheckArgs {
        regex: RegexArgs {
            options: "iq".to_string(),
            ..regex("a")
        },
    };
    let err = check::run(args, &mut Vec::new()).unwrap_err();

    assert!(matches!(err, CommandError::Options(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn culture_flag_changes_case_folding() {
    let turkish = MatchArgs {
        regex: RegexArgs {
            options: "i".to_string(),
            culture: Some("tr-TR".to_string()),
            ..regex("i")
        },
        ..match_args("", "I")
    };
    let (outcome, _) = output(|out| matches::run(turkish, out));
    assert_eq!(outcome, Outcome::NoMatch);

    let invariant = MatchArgs {
        regex: RegexArgs {
            options: "i".to_string(),
            ..regex("i")
        },
        ..match_args("", "I")
    };
    let (outcome, _) = output(|out| matches::run(invariant, out));
    assert_eq!(outcome, Outcome::Success);
}

#[test]
fn trace_shows_steps_and_result() {
    let args = TraceArgs {
        regex: regex("a|b"),
        input: text("b"),
        verbosity: Verbosity::Default,
    };
    let (outcome, out) = output(|out| trace::run(args, out));

    assert_eq!(outcome, Outcome::Success);
    assert!(out.starts_with("attempt @0\n"));
    assert!(out.contains("match 0..1"));
}

#[test]
fn trace_timeout_still_prints_the_trace() {
    let args = TraceArgs {
        regex: RegexArgs {
            timeout: Some(Duration::from_millis(10)),
            ..regex("(a+)+b")
        },
        input: text(&"a".repeat(28)),
        verbosity: Verbosity::Default,
    };
    let mut out = Vec::new();
    let err = trace::run(args, &mut out).unwrap_err();

    assert!(matches!(err, CommandError::Runtime(_)));
    assert_eq!(err.exit_code(), 2);
    assert!(out.starts_with(b"attempt @0\n"));
}
