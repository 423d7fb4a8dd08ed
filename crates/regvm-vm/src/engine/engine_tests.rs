use std::ops::Range;
use std::time::Duration;

use regvm_bytecode::{Instr, Op, Program, ProgramParts};
use regvm_compiler::compile;
use regvm_core::{Culture, RegexOptions};

use super::{RawMatch, Runner, RuntimeError, ScanConfig, ScanInput, ScanMode, UnmatchedBackref};

fn scan_in(
    pattern: &str,
    options: RegexOptions,
    culture: &Culture,
    text: &str,
    config: ScanConfig,
) -> Result<Option<RawMatch>, RuntimeError> {
    let program = compile(pattern, options, culture).unwrap();
    let start = if program.right_to_left() { text.len() } else { 0 };
    Runner::new().scan(&program, ScanInput::new(text, start), config)
}

fn scan(pattern: &str, options: RegexOptions, text: &str) -> Option<RawMatch> {
    scan_in(pattern, options, &Culture::invariant(), text, ScanConfig::new()).unwrap()
}

/// Overall match span.
fn find(pattern: &str, text: &str) -> Option<Range<usize>> {
    scan(pattern, RegexOptions::NONE, text).map(|m| m.span())
}

/// Last capture of every slot.
fn groups(pattern: &str, text: &str) -> Vec<Option<Range<usize>>> {
    let found = scan(pattern, RegexOptions::NONE, text).expect("pattern should match");
    found
        .groups()
        .iter()
        .map(|spans| spans.last().cloned())
        .collect()
}

#[test]
fn alternation_prefers_leftmost_branch_that_lets_the_rest_match() {
    assert_eq!(
        groups("(a|ab)(c|bcd)(d*)", "abcd"),
        vec![Some(0..4), Some(0..1), Some(1..4), Some(4..4)]
    );
}

#[test]
fn greedy_and_lazy_star() {
    assert_eq!(find("a.*b", "axbxb"), Some(0..5));
    assert_eq!(find("a.*?b", "axbxb"), Some(0..3));
    assert_eq!(find("x+?", "xxx"), Some(0..1));
}

#[test]
fn empty_loop_bodies_terminate() {
    assert_eq!(find("(a?)*", "b"), Some(0..0));
    assert_eq!(find("(a?)*", "aab"), Some(0..2));
    assert_eq!(find("(?:a*)*b", "aaab"), Some(0..4));
    assert_eq!(find("(?:a*?)*?b", "aab"), Some(0..3));
}

#[test]
fn no_match() {
    assert_eq!(find("abc", "abx"), None);
    assert_eq!(find("a+b", ""), None);
    assert_eq!(find("a(?!)", "aaa"), None);
}

#[test]
fn backreference() {
    assert_eq!(find(r"(\w)\1", "abccd"), Some(2..4));
    assert_eq!(find(r"(?i)(a)\1", "aA"), Some(0..2));
    assert_eq!(find(r"(a)\1", "aA"), None);
}

#[test]
fn unmatched_backref_policy() {
    let culture = Culture::invariant();
    let pattern = r"(?:(a)|b)\1c";

    let failing = ScanConfig::new().unmatched_backref(UnmatchedBackref::Fail);
    let found = scan_in(pattern, RegexOptions::NONE, &culture, "bc", failing).unwrap();
    assert_eq!(found, None);

    let empty = ScanConfig::new().unmatched_backref(UnmatchedBackref::MatchEmpty);
    let found = scan_in(pattern, RegexOptions::NONE, &culture, "bc", empty).unwrap();
    assert_eq!(found.map(|m| m.span()), Some(0..2));
}

#[test]
fn unmatched_backref_default_follows_ecma_option() {
    assert_eq!(
        UnmatchedBackref::default_for(RegexOptions::ECMA_SCRIPT),
        UnmatchedBackref::MatchEmpty
    );
    assert_eq!(
        UnmatchedBackref::default_for(RegexOptions::IGNORE_CASE),
        UnmatchedBackref::Fail
    );
}

#[test]
fn lookarounds_are_zero_width() {
    assert_eq!(find("a(?=b)", "acab"), Some(2..3));
    assert_eq!(find("a(?!b)", "aba"), Some(2..3));
    assert_eq!(find("(?<=a)b", "cbab"), Some(3..4));
    assert_eq!(find("(?<!a)b", "abcb"), Some(3..4));
}

#[test]
fn lookahead_keeps_its_captures() {
    assert_eq!(
        groups("(?=(ab))a", "xab"),
        vec![Some(1..2), Some(1..3)]
    );
}

#[test]
fn negative_lookahead_discards_its_captures() {
    assert_eq!(groups("(?!(b))a", "a"), vec![Some(0..1), None]);
}

#[test]
fn atomic_group_does_not_give_back() {
    assert_eq!(find("(?>a*)a", "aaa"), None);
    assert_eq!(find("(?>a*)b", "aab"), Some(0..3));
    assert_eq!(find("(?>a|ab)c", "abc"), None);
}

#[test]
fn conditional_on_group() {
    assert_eq!(find("(a)?(?(1)b|c)", "ab"), Some(0..2));
    assert_eq!(find("(a)?(?(1)b|c)", "c"), Some(0..1));
    assert_eq!(find("^(a)?(?(1)b|c)$", "ac"), None);
}

#[test]
fn conditional_on_expression() {
    assert_eq!(find("(?(a)ab|cd)", "cd"), Some(0..2));
    assert_eq!(find("(?(a)ab|cd)", "ab"), Some(0..2));
    assert_eq!(find("^(?(a)ab|cd)", "ad"), None);
}

#[test]
fn counted_repetition() {
    assert_eq!(find("a{2,3}", "aaaa"), Some(0..3));
    assert_eq!(find("a{2,3}?", "aaaa"), Some(0..2));
    assert_eq!(find("(?:ab){2}", "ababab"), Some(0..4));
    assert_eq!(find("(?:ab|c){2,}", "abcab"), Some(0..5));
    assert_eq!(find("(?:ab){3}", "abab"), None);
}

#[test]
fn lazy_counted_repetition_extends_on_demand() {
    assert_eq!(find("(?:a|b){1,3}?c", "abac"), Some(0..4));
    assert_eq!(find("(?:a|b){1,2}?c", "abac"), Some(1..4));
    assert_eq!(find("(?:a|b){2,}?", "abab"), Some(0..2));
}

#[test]
fn right_to_left_finds_last_occurrence() {
    let found = scan("abc", RegexOptions::RIGHT_TO_LEFT, "abcabc").unwrap();

    assert_eq!(found.span(), 3..6);
    assert_eq!(found.text_pos(), 3);
}

#[test]
fn right_to_left_captures_are_ordered() {
    let found = scan("(a+)(b+)", RegexOptions::RIGHT_TO_LEFT, "xaabbx").unwrap();
    let last: Vec<_> = found.groups().iter().map(|s| s.last().cloned()).collect();

    assert_eq!(last, vec![Some(1..5), Some(1..3), Some(3..5)]);
}

#[test]
fn anchors() {
    assert_eq!(
        scan("^b", RegexOptions::MULTILINE, "a\nb").map(|m| m.span()),
        Some(2..3)
    );
    assert_eq!(find("^b", "a\nb"), None);
    assert_eq!(find("a$", "a\n"), Some(0..1));
    assert_eq!(find(r"a\z", "a\n"), None);
    assert_eq!(find(r"\bfoo\b", "afoo foo"), Some(5..8));
    assert_eq!(find(r"\Bo", "o oo"), Some(3..4));
}

#[test]
fn ignore_case_uses_culture() {
    let turkish = Culture::new("tr-TR");
    let config = ScanConfig::new();

    let dotted = scan_in("i", RegexOptions::IGNORE_CASE, &turkish, "İ", config).unwrap();
    assert_eq!(dotted.map(|m| m.span()), Some(0..2));

    let dotless = scan_in("i", RegexOptions::IGNORE_CASE, &turkish, "I", config).unwrap();
    assert_eq!(dotless, None);

    let invariant = Culture::invariant();
    let plain = scan_in("i", RegexOptions::IGNORE_CASE, &invariant, "I", config).unwrap();
    assert_eq!(plain.map(|m| m.span()), Some(0..1));
}

#[test]
fn catastrophic_pattern_times_out() {
    let timeout = Duration::from_millis(20);
    let config = ScanConfig::new().timeout(Some(timeout));
    let text = "a".repeat(30);

    let result = scan_in("(a+)+b", RegexOptions::NONE, &Culture::invariant(), &text, config);

    assert_eq!(result, Err(RuntimeError::Timeout(timeout)));
}

#[test]
fn skipping_to_first_chars_observes_the_deadline() {
    let config = ScanConfig::new().timeout(Some(Duration::ZERO));
    let text = "z".repeat(5000);

    let result = scan_in("[ab]x|cy", RegexOptions::NONE, &Culture::invariant(), &text, config);

    assert_eq!(result, Err(RuntimeError::Timeout(Duration::ZERO)));
    assert_eq!(find("[ab]x|cy", &text), None);
}

#[test]
fn empty_lazy_iteration_leaves_outer_marks_intact() {
    assert_eq!(find("b(?:b??)+?", "b"), Some(0..1));
    assert_eq!(find("(?:(?:a*)+?)*", "a"), Some(0..1));
    assert_eq!(groups("x((?:y??)+?)z", "xz"), vec![Some(0..2), Some(1..1)]);
}

#[test]
fn failing_nested_lazy_loops_terminate() {
    let config = ScanConfig::new().timeout(Some(Duration::from_secs(5)));
    let invariant = Culture::invariant();

    let result = scan_in("(?:(?:a??)+?){1,3}y", RegexOptions::NONE, &invariant, "ab", config);

    assert_eq!(result, Ok(None));
}

#[test]
fn nested_lazy_loops_in_counted_and_star_loops() {
    assert_eq!(find("(?:(?:ab??)+?){2}c", "ababc"), Some(0..5));
    assert_eq!(find("((?:x??)+?)*z", "xxz"), Some(0..3));
    assert_eq!(find("(?:(?:a??)+?){1,3}?b", "aab"), Some(0..3));
    assert_eq!(find("((?:a*?)+?)+?$", "aa"), Some(0..2));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "mark stack not balanced at stop")]
fn stop_with_a_leftover_mark_is_a_malformed_program() {
    let program = Program::new(ProgramParts {
        steps: vec![Instr::new(Op::SetMark), Instr::new(Op::Stop)],
        ..ProgramParts::default()
    });

    let _ = Runner::new().scan(&program, ScanInput::new("x", 0), ScanConfig::new());
}

#[test]
fn group_keeps_every_capture() {
    let found = scan("(a|b)+", RegexOptions::NONE, "abb").unwrap();

    assert_eq!(found.groups()[1], vec![0..1, 1..2, 2..3]);
}

#[test]
fn backtracking_drops_captures_of_abandoned_iterations() {
    let found = scan("(a)+ab", RegexOptions::NONE, "aaab").unwrap();

    assert_eq!(found.span(), 0..4);
    assert_eq!(found.groups()[1], vec![0..1, 1..2]);
}

#[test]
fn empty_previous_match_bumps_start() {
    let program = compile("a*", RegexOptions::NONE, &Culture::invariant()).unwrap();
    let mut runner = Runner::new();
    let config = ScanConfig::new();

    let first = runner.scan(&program, ScanInput::new("baa", 0), config).unwrap();
    assert_eq!(first.map(|m| m.span()), Some(0..0));

    let input = ScanInput::new("baa", 0).after_match(0);
    let second = runner.scan(&program, input, config).unwrap();
    assert_eq!(second.map(|m| m.span()), Some(1..3));

    let input = ScanInput::new("baa", 3).after_match(0);
    assert_eq!(runner.scan(&program, input, config).unwrap(), None);
}

#[test]
fn exists_mode_keeps_only_the_overall_span() {
    let config = ScanConfig::new().mode(ScanMode::Exists);
    let found = scan_in("(a)(b)", RegexOptions::NONE, &Culture::invariant(), "ab", config)
        .unwrap()
        .unwrap();

    assert_eq!(found.groups().len(), 1);
    assert_eq!(found.span(), 0..2);
}

#[test]
fn runner_is_reusable_across_programs() {
    let mut runner = Runner::new();
    let wide = compile("(a)(b)(c)", RegexOptions::NONE, &Culture::invariant()).unwrap();
    let narrow = compile("x", RegexOptions::NONE, &Culture::invariant()).unwrap();
    let config = ScanConfig::new();

    let found = runner.scan(&wide, ScanInput::new("abc", 0), config).unwrap();
    assert_eq!(found.map(|m| m.groups().len()), Some(4));

    let found = runner.scan(&narrow, ScanInput::new("yx", 0), config).unwrap();
    assert_eq!(found.map(|m| m.into_groups()), Some(vec![vec![1..2]]));
}

#[test]
#[should_panic(expected = "mark stack underflow")]
fn capture_without_mark_is_a_malformed_program() {
    let program = Program::new(ProgramParts {
        steps: vec![Instr::new(Op::CaptureMark(0)), Instr::new(Op::Stop)],
        ..ProgramParts::default()
    });

    let _ = Runner::new().scan(&program, ScanInput::new("x", 0), ScanConfig::new());
}
