use regvm_bytecode::Anchors;
use regvm_core::{CharRange, Culture, RegexOptions};

use super::{Analysis, analyze};
use crate::lower::lower;
use crate::parser::parse;

fn analysis(pattern: &str) -> Analysis {
    analysis_with(pattern, RegexOptions::NONE)
}

fn analysis_with(pattern: &str, options: RegexOptions) -> Analysis {
    let root = lower(parse(pattern, options).unwrap().root);
    analyze(&root, options, &Culture::invariant())
}

fn prefix(analysis: &Analysis) -> Option<&str> {
    analysis.prefix.as_ref().map(|p| p.literal())
}

#[test]
fn beginning_anchor_with_prefix() {
    let a = analysis("^abc");

    assert_eq!(a.anchors, Anchors::BEGINNING);
    assert_eq!(prefix(&a), Some("abc"));
    assert!(a.first_chars.is_none());
}

#[test]
fn anchor_shared_by_all_branches() {
    assert_eq!(analysis(r"\Gx|\Gy").anchors, Anchors::START);
    assert_eq!(analysis(r"\Ax|\Gy").anchors, Anchors::NONE);
    assert_eq!(analysis("^a|b").anchors, Anchors::NONE);
}

#[test]
fn zero_width_nodes_are_skipped() {
    assert_eq!(analysis(r"\b(?=a)\z").anchors, Anchors::END);
    assert_eq!(analysis(r"a\z").anchors, Anchors::NONE);
}

#[test]
fn right_to_left_leads_with_last_node() {
    let a = analysis_with("abc$", RegexOptions::RIGHT_TO_LEFT);

    assert_eq!(a.anchors, Anchors::END_Z);
    assert_eq!(prefix(&a), Some("abc"));
    assert!(a.prefix.as_ref().unwrap().right_to_left());
}

#[test]
fn prefix_skips_zero_width() {
    assert_eq!(prefix(&analysis(r"\bfoo")), Some("foo"));
    assert_eq!(prefix(&analysis("(?<=x)yz")), Some("yz"));
}

#[test]
fn prefix_from_repeated_char() {
    assert_eq!(prefix(&analysis("x{3,}y")), Some("xxx"));
    assert_eq!(prefix(&analysis("x*y")), None);
}

#[test]
fn prefix_through_capture() {
    assert_eq!(prefix(&analysis("(ab)+c")), None);
    assert_eq!(prefix(&analysis("(ab)c")), Some("ab"));
}

#[test]
fn case_insensitive_uses_first_chars() {
    let a = analysis("(?i)Foo");

    assert!(a.prefix.is_none());
    let first = a.first_chars.unwrap();
    assert!(first.ci);
    assert_eq!(first.class.ranges(), [CharRange::single('f')]);
}

#[test]
fn first_chars_of_alternation() {
    let first = analysis("[ab]x|cy").first_chars.unwrap();

    assert!(!first.ci);
    assert_eq!(first.class.ranges(), [CharRange::new('a', 'c')]);
}

#[test]
fn first_chars_through_optional_prefix() {
    let first = analysis("a*b").first_chars.unwrap();

    assert_eq!(first.class.ranges(), [CharRange::new('a', 'b')]);
}

#[test]
fn first_chars_in_right_to_left_mode() {
    let first = analysis_with("a|xb*c", RegexOptions::RIGHT_TO_LEFT)
        .first_chars
        .unwrap();

    assert_eq!(first.class.ranges(), [CharRange::single('a'), CharRange::single('c')]);
}

#[test]
fn no_first_chars_when_nullable() {
    assert!(analysis("a?").first_chars.is_none());
    assert!(analysis("a|").first_chars.is_none());
}

#[test]
fn no_first_chars_for_backreferences_and_conditionals() {
    let a = analysis(r"\1(a)");
    assert!(a.prefix.is_none());
    assert!(a.first_chars.is_none());

    assert!(analysis("(a)?(?(1)b|c)").first_chars.is_none());
}

#[test]
fn no_first_chars_for_mixed_case() {
    assert!(analysis("(?i:a)|b").first_chars.is_none());
}

#[test]
fn no_first_chars_for_any_char() {
    assert!(analysis_with(".x", RegexOptions::SINGLELINE).first_chars.is_none());
}

#[test]
fn turkic_culture_folds_first_chars() {
    let root = lower(parse("(?i)Ix|y", RegexOptions::NONE).unwrap().root);
    let a = analyze(&root, RegexOptions::NONE, &Culture::new("tr-TR"));

    let first = a.first_chars.unwrap();
    assert!(first.class.contains('ı'));
    assert!(!first.class.contains('i'));
}
