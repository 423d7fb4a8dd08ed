use indoc::indoc;
use regvm_bytecode::dump;
use regvm_core::{Colors, Culture, RegexOptions};

use crate::compile;

fn code(pattern: &str) -> String {
    code_with(pattern, RegexOptions::NONE)
}

fn code_with(pattern: &str, options: RegexOptions) -> String {
    let program = compile(pattern, options, &Culture::invariant()).unwrap();
    let dumped = dump(&program, Colors::OFF);
    let (_, listing) = dumped.split_once("[code]\n").unwrap();
    listing.to_string()
}

#[test]
fn alternation_chains_lazy_branches() {
    assert_eq!(
        code("a|bc"),
        indoc! {r#"
            0  SetMark
            1  LazyBranch -> 4
            2  One 'a'
            3  Goto -> 5
            4  Multi "bc"
            5  CaptureMark 0
            6  Stop
        "#}
    );
}

#[test]
fn plus_over_group_uses_marks() {
    assert_eq!(
        code("(ab)+"),
        indoc! {r#"
            0  SetMark
            1  SetMark
            2  SetMark
            3  Multi "ab"
            4  CaptureMark 1
            5  BranchMark -> 2
            6  CaptureMark 0
            7  Stop
        "#}
    );
}

#[test]
fn lazy_star_skips_to_branch() {
    assert_eq!(
        code("(?:ab)*?"),
        indoc! {r#"
            0  SetMark
            1  NullMark
            2  Goto -> 4
            3  Multi "ab"
            4  LazyBranchMark -> 3
            5  CaptureMark 0
            6  Stop
        "#}
    );
}

#[test]
fn single_char_repeat_uses_loop_opcodes() {
    assert_eq!(
        code("x{2,5}?"),
        indoc! {"
            0  SetMark
            1  OneRep 'x' x2
            2  OneLazy 'x' max=3
            3  CaptureMark 0
            4  Stop
        "}
    );
}

#[test]
fn bounded_group_repeat_uses_counters() {
    assert_eq!(
        code("(?:ab|c){2,}"),
        indoc! {r#"
            0  SetMark
            1  SetCount -1
            2  LazyBranch -> 5
            3  Multi "ab"
            4  Goto -> 6
            5  One 'c'
            6  BranchCount -> 2 limit=inf
            7  CaptureMark 0
            8  Stop
        "#}
    );
}

#[test]
fn positive_lookahead_restores_position() {
    assert_eq!(
        code("(?=a)"),
        indoc! {"
            0  SetMark
            1  SetJump
            2  SetMark
            3  One 'a'
            4  GetMark
            5  ForeJump
            6  CaptureMark 0
            7  Stop
        "}
    );
}

#[test]
fn negative_lookbehind_runs_right_to_left() {
    assert_eq!(
        code("(?<!a)b"),
        indoc! {"
            0  SetMark
            1  SetJump
            2  LazyBranch -> 5
            3  One 'a' [rtl]
            4  BackJump
            5  ForeJump
            6  One 'b'
            7  CaptureMark 0
            8  Stop
        "}
    );
}

#[test]
fn atomic_group_discards_frames() {
    assert_eq!(
        code("(?>a*)b"),
        indoc! {"
            0  SetMark
            1  SetJump
            2  OneLoop 'a' max=inf
            3  ForeJump
            4  One 'b'
            5  CaptureMark 0
            6  Stop
        "}
    );
}

#[test]
fn backreference() {
    assert_eq!(
        code(r"(a)\1"),
        indoc! {"
            0  SetMark
            1  SetMark
            2  One 'a'
            3  CaptureMark 1
            4  Ref 1
            5  CaptureMark 0
            6  Stop
        "}
    );
}

#[test]
fn group_reference_conditional() {
    assert_eq!(
        code("(a)?(?(1)b|c)"),
        indoc! {"
            00  SetMark
            01  NullCount 0
            02  Goto -> 6
            03  SetMark
            04  One 'a'
            05  CaptureMark 1
            06  BranchCount -> 3 limit=1
            07  SetJump
            08  LazyBranch -> 13
            09  TestRef 1
            10  ForeJump
            11  One 'b'
            12  Goto -> 15
            13  ForeJump
            14  One 'c'
            15  CaptureMark 0
            16  Stop
        "}
    );
}

#[test]
fn expression_conditional_wraps_test_in_lookahead() {
    assert_eq!(
        code("(?(a)a|b)"),
        indoc! {"
            00  SetMark
            01  SetJump
            02  LazyBranch -> 11
            03  SetJump
            04  SetMark
            05  One 'a'
            06  GetMark
            07  ForeJump
            08  ForeJump
            09  One 'a'
            10  Goto -> 13
            11  ForeJump
            12  One 'b'
            13  CaptureMark 0
            14  Stop
        "}
    );
}

#[test]
fn right_to_left_marks_consuming_ops() {
    assert_eq!(
        code_with("a+b", RegexOptions::RIGHT_TO_LEFT),
        indoc! {"
            0  SetMark
            1  One 'b' [rtl]
            2  OneRep 'a' x1 [rtl]
            3  OneLoop 'a' max=inf [rtl]
            4  CaptureMark 0
            5  Stop
        "}
    );
}

#[test]
fn case_insensitive_folds_pattern() {
    assert_eq!(
        code("(?i)A[B-C]"),
        indoc! {"
            0  SetMark
            1  One 'a' [ci]
            2  Set [B-Cb-c] [ci]
            3  CaptureMark 0
            4  Stop
        "}
    );
}

#[test]
fn empty_negative_lookahead_never_matches() {
    assert_eq!(
        code("a(?!)"),
        indoc! {"
            0  SetMark
            1  Nothing
            2  CaptureMark 0
            3  Stop
        "}
    );
}
