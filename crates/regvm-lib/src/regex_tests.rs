use std::time::Duration;

use regvm_core::{Culture, OptionsError, RegexOptions};
use regvm_vm::UnmatchedBackref;

use crate::{ArgumentError, Error, Regex};

fn spans(re: &Regex, text: &str) -> Vec<(usize, usize)> {
    re.find_iter(text)
        .map(|m| m.map(|m| (m.start(), m.end())).unwrap())
        .collect()
}

#[test]
fn compile_error_carries_offset() {
    let Err(Error::Syntax(err)) = Regex::new("ab(c") else {
        panic!("expected a syntax error");
    };

    assert_eq!(err.pattern(), "ab(c");
    assert_eq!(err.offset(), 4);
}

#[test]
fn ecma_script_rejects_other_options() {
    let err = Regex::with_options("a", RegexOptions::ECMA_SCRIPT | RegexOptions::SINGLELINE)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Argument(ArgumentError::Options(OptionsError::EcmaScriptCombination(_)))
    ));
    assert!(Regex::with_options("a", RegexOptions::ECMA_SCRIPT | RegexOptions::IGNORE_CASE).is_ok());
}

#[test]
fn zero_timeout_is_rejected() {
    let err = Regex::builder("a")
        .match_timeout(Duration::ZERO)
        .build()
        .unwrap_err();

    assert_eq!(err, Error::Argument(ArgumentError::ZeroTimeout));
}

#[test]
fn accessors_reflect_the_builder() {
    let re = Regex::builder("(?i)k")
        .options(RegexOptions::MULTILINE)
        .culture(Culture::new("tr-TR"))
        .match_timeout(Duration::from_secs(1))
        .build()
        .unwrap();

    assert_eq!(re.pattern(), "(?i)k");
    assert_eq!(re.to_string(), "(?i)k");
    assert_eq!(re.options(), RegexOptions::MULTILINE);
    assert_eq!(re.culture().name(), "tr-tr");
    assert_eq!(re.match_timeout(), Some(Duration::from_secs(1)));
    assert!(!re.right_to_left());
}

#[test]
fn is_match_and_find_agree() {
    let re = Regex::new(r"\d+").unwrap();

    assert!(re.is_match("abc 42").unwrap());
    assert_eq!(re.find("abc 42").unwrap().unwrap().as_str(), "42");
    assert!(!re.is_match("abc").unwrap());
    assert!(re.find("abc").unwrap().is_none());
}

#[test]
fn find_at_starts_scanning_at_offset() {
    let re = Regex::new("a").unwrap();

    assert_eq!(re.find_at("aba", 1).unwrap().unwrap().start(), 2);
    assert!(re.find_at("aba", 3).unwrap().is_none());
}

#[test]
fn find_at_lookbehind_sees_text_before_start() {
    let re = Regex::new("(?<=a)b").unwrap();

    assert_eq!(re.find_at("ab", 1).unwrap().unwrap().range(), 1..2);
}

#[test]
fn find_in_treats_range_as_whole_input() {
    let re = Regex::new("^b+$").unwrap();

    assert_eq!(re.find_in("abbc", 1, 2).unwrap().unwrap().range(), 1..3);
    assert!(re.find("abbc").unwrap().is_none());
}

#[test]
fn offsets_are_validated() {
    let re = Regex::new("a").unwrap();

    assert_eq!(
        re.find_at("abc", 4).unwrap_err(),
        Error::Argument(ArgumentError::StartOutOfRange { start: 4, len: 3 })
    );
    assert_eq!(
        re.is_match_at("é", 1).unwrap_err(),
        Error::Argument(ArgumentError::NotCharBoundary(1))
    );
    assert_eq!(
        re.find_in("abc", 2, 5).unwrap_err(),
        Error::Argument(ArgumentError::RangeOutOfBounds { beg: 2, end: 7, len: 3 })
    );
}

#[test]
fn find_iter_yields_non_overlapping_matches() {
    let re = Regex::new("aa").unwrap();

    assert_eq!(spans(&re, "aaaaa"), vec![(0, 2), (2, 4)]);
}

#[test]
fn find_iter_steps_past_empty_matches() {
    let re = Regex::new("x*").unwrap();

    assert_eq!(spans(&re, "axb"), vec![(0, 0), (1, 2), (2, 2), (3, 3)]);
}

#[test]
fn find_iter_right_to_left_goes_backwards() {
    let re = Regex::with_options("ab", RegexOptions::RIGHT_TO_LEFT).unwrap();

    assert_eq!(spans(&re, "ab-ab-ab"), vec![(6, 8), (3, 5), (0, 2)]);
}

#[test]
fn next_match_continues_the_scan() {
    let re = Regex::new(r"\w+").unwrap();
    let first = re.find("one two").unwrap().unwrap();
    let second = first.next_match().unwrap().unwrap();

    assert_eq!(second.as_str(), "two");
    assert!(second.next_match().unwrap().is_none());
}

#[test]
fn next_match_stays_inside_find_in_range() {
    let re = Regex::new("a").unwrap();
    let first = re.find_in("aaaa", 1, 2).unwrap().unwrap();
    let second = first.next_match().unwrap().unwrap();

    assert_eq!(first.range(), 1..2);
    assert_eq!(second.range(), 2..3);
    assert!(second.next_match().unwrap().is_none());
}

#[test]
fn find_all_collects_every_match() {
    let re = Regex::new(r"\d").unwrap();
    let found: Vec<_> = re
        .find_all("a1b2c3")
        .unwrap()
        .iter()
        .map(|m| m.as_str())
        .collect();

    assert_eq!(found, ["1", "2", "3"]);
}

#[test]
fn timeout_reports_input_and_pattern() {
    let text = "a".repeat(28);
    let re = Regex::builder("(a+)+b")
        .match_timeout(Duration::from_millis(10))
        .build()
        .unwrap();

    let Err(Error::Timeout(err)) = re.is_match(&text) else {
        panic!("expected a timeout");
    };

    assert_eq!(err.input, text);
    assert_eq!(err.pattern, "(a+)+b");
    assert_eq!(err.timeout, Duration::from_millis(10));
}

#[test]
fn find_iter_stops_after_an_error() {
    let text = format!("ab{}", "a".repeat(28));
    let re = Regex::builder("(a+)+b")
        .match_timeout(Duration::from_millis(10))
        .build()
        .unwrap();
    let mut iter = re.find_iter(&text);

    assert_eq!(iter.next().unwrap().unwrap().as_str(), "ab");
    assert!(matches!(iter.next(), Some(Err(Error::Timeout(_)))));
    assert!(iter.next().is_none());
}

#[test]
fn unmatched_backref_policy_follows_options() {
    let plain = Regex::new(r"(?:(a)|b)\1c").unwrap();
    assert!(!plain.is_match("bc").unwrap());

    let ecma = Regex::with_options(r"(?:(a)|b)\1c", RegexOptions::ECMA_SCRIPT).unwrap();
    assert!(ecma.is_match("bc").unwrap());

    let overridden = Regex::builder(r"(?:(a)|b)\1c")
        .unmatched_backref(UnmatchedBackref::MatchEmpty)
        .build()
        .unwrap();
    assert!(overridden.is_match("bc").unwrap());
}

#[test]
fn group_metadata() {
    let re = Regex::new(r"(?<year>\d+)-(\d+)-(?<7>x)?").unwrap();

    assert_eq!(re.group_numbers(), vec![0, 1, 2, 7]);
    assert_eq!(re.group_names(), ["0", "1", "year", "7"]);
    assert_eq!(re.group_name_from_number(2).as_deref(), Some("year"));
    assert_eq!(re.group_name_from_number(7).as_deref(), Some("7"));
    assert_eq!(re.group_name_from_number(3), None);
    assert_eq!(re.group_number_from_name("year"), Some(2));
    assert_eq!(re.group_number_from_name("7"), Some(7));
    assert_eq!(re.group_number_from_name("5"), None);
    assert_eq!(re.group_number_from_name("month"), None);
}

#[test]
fn clones_share_one_program() {
    let re = Regex::new("a+").unwrap();
    let clone = re.clone();

    assert!(std::ptr::eq(re.program(), clone.program()));
    assert!(clone.is_match("caab").unwrap());
}

#[test]
fn regex_is_shareable_across_threads() {
    let re = Regex::new(r"(\w)\1").unwrap();

    std::thread::scope(|scope| {
        for text in ["aa", "xbb", "ccc", "no"] {
            let re = &re;
            scope.spawn(move || {
                let expected = text != "no";
                assert_eq!(re.is_match(text).unwrap(), expected);
            });
        }
    });
}
