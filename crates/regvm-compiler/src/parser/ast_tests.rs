use indoc::indoc;
use regvm_core::RegexOptions;

use super::parse;

fn tree(pattern: &str) -> String {
    tree_with(pattern, RegexOptions::NONE)
}

fn tree_with(pattern: &str, options: RegexOptions) -> String {
    parse(pattern, options).unwrap().root.to_string()
}

#[test]
fn concat_and_lazy_group_repeat() {
    insta::assert_snapshot!(tree("a(b|c)*?d"), @"(concat 'a' (repeat{0,}? (capture 1 (alt 'b' 'c'))) 'd')");
}

#[test]
fn anchors_and_bounded_class_repeat() {
    insta::assert_snapshot!(tree("^[a-z]{2,3}$"), @"(concat Beginning (repeat{2,3} [a-z]) EndZ)");
    insta::assert_snapshot!(
        tree_with("^x$", RegexOptions::MULTILINE),
        @"(concat Bol 'x' Eol)"
    );
}

#[test]
fn inline_options_apply_to_following_atoms() {
    insta::assert_snapshot!(tree("(?i)ab(?-i)c"), @"(concat 'a'i 'b'i 'c')");
    insta::assert_snapshot!(tree("a(?i:b)c"), @"(concat 'a' (group 'b'i) 'c')");
    insta::assert_snapshot!(tree("(?i)a|b"), @"(alt 'a'i 'b'i)");
}

#[test]
fn option_scope_ends_with_group() {
    insta::assert_snapshot!(tree("((?i)a)b"), @"(concat (capture 1 'a'i) 'b')");
}

#[test]
fn lookaround() {
    insta::assert_snapshot!(tree("(?<=x)y(?!z)"), @"(concat (lookbehind 'x') 'y' (lookahead! 'z'))");
    insta::assert_snapshot!(tree("(?=a)(?<!b)"), @"(concat (lookahead 'a') (lookbehind! 'b'))");
}

#[test]
fn atomic_group() {
    insta::assert_snapshot!(tree("(?>a+)b"), @"(concat (atomic (repeat{1,} 'a')) 'b')");
}

#[test]
fn conditional_on_group_number() {
    insta::assert_snapshot!(tree("(a)?(?(1)b|c)"), @r"(concat (repeat{0,1} (capture 1 'a')) (if \1 'b' 'c'))");
}

#[test]
fn conditional_on_expression() {
    insta::assert_snapshot!(tree("(?(x)y)"), @"(if (group 'x') 'y' Empty)");
    insta::assert_snapshot!(tree("(?(?=a)ab|c)"), @"(if (lookahead 'a') (concat 'a' 'b') 'c')");
}

#[test]
fn conditional_on_forward_named_group() {
    insta::assert_snapshot!(tree("(?(n)x|y)(?<n>z)"), @r"(concat (if \1 'x' 'y') (capture 1 'z'))");
}

#[test]
fn named_groups_follow_unnamed() {
    insta::assert_snapshot!(tree(r"(?<n>a)(b)\k<n>\1"), @r"(concat (capture 2 'a') (capture 1 'b') \2 \1)");
}

#[test]
fn whitespace_mode_skips_blanks_and_comments() {
    let pattern = indoc! {"
        a b # comment (not a group
         c
    "};
    insta::assert_snapshot!(
        tree_with(pattern, RegexOptions::IGNORE_PATTERN_WHITESPACE),
        @"(concat 'a' 'b' 'c')"
    );
}

#[test]
fn inline_comment_is_skipped() {
    insta::assert_snapshot!(tree("a(?#note)*"), @"(repeat{0,} 'a')");
}

#[test]
fn brace_without_quantifier_is_literal() {
    insta::assert_snapshot!(tree("a{,2}"), @"(concat 'a' '{' ',' '2' '}')");
    insta::assert_snapshot!(tree("{"), @"'{'");
}

#[test]
fn class_with_escapes() {
    insta::assert_snapshot!(tree(r"[^a-c\-]"), @r"[^\-a-c]");
    insta::assert_snapshot!(tree("[]a]"), @r"[\]a]");
    insta::assert_snapshot!(tree("[a-]"), @r"[\-a]");
}

#[test]
fn class_subtraction() {
    insta::assert_snapshot!(tree("[a-z-[aeiou]]"), @"[a-z-[aeiou]]");
}

#[test]
fn character_escapes() {
    insta::assert_snapshot!(tree(r"\x41B\101\cA\t"), @r"(concat 'A' 'B' 'A' '\u{1}' '\t')");
}

#[test]
fn dot_depends_on_singleline() {
    insta::assert_snapshot!(tree("."), @r"!'\n'");
    insta::assert_snapshot!(tree_with(".", RegexOptions::SINGLELINE), @r"[\u{0}-\u{10FFFF}]");
}

#[test]
fn backslash_anchors() {
    insta::assert_snapshot!(tree(r"\A\G\b\B\Z\z"), @"(concat Beginning Start Boundary NonBoundary EndZ End)");
    insta::assert_snapshot!(
        tree_with(r"\b", RegexOptions::ECMA_SCRIPT),
        @"EcmaBoundary"
    );
}

#[test]
fn ecma_backreference_falls_back_to_octal() {
    let ecma = RegexOptions::ECMA_SCRIPT;
    insta::assert_snapshot!(tree_with(r"(a)\1", ecma), @r"(concat (capture 1 'a') \1)");
    insta::assert_snapshot!(tree_with(r"(a)\2", ecma), @r"(concat (capture 1 'a') '\u{2}')");
    insta::assert_snapshot!(tree_with(r"\1(a)", ecma), @r"(concat '\u{1}' (capture 1 'a'))");
}

#[test]
fn large_backreference_falls_back_to_octal() {
    insta::assert_snapshot!(tree(r"(a)\10"), @r"(concat (capture 1 'a') '\u{8}')");
}

#[test]
fn explicit_capture_keeps_named_groups() {
    insta::assert_snapshot!(
        tree_with("(a)(?<n>b)", RegexOptions::EXPLICIT_CAPTURE),
        @"(concat (group 'a') (capture 1 'b'))"
    );
}

#[test]
fn empty_pattern_and_empty_branches() {
    insta::assert_snapshot!(tree(""), @"Empty");
    insta::assert_snapshot!(tree("a|"), @"(alt 'a' Empty)");
    insta::assert_snapshot!(tree("()"), @"(capture 1 Empty)");
}
