use crate::charclass::{CharClass, CharRange};
use crate::culture::Culture;
use crate::unicode;

#[test]
fn ranges_are_merged() {
    let mut class = CharClass::new();
    class.push_range('d', 'f');
    class.push_range('a', 'c');
    class.push_char('x');
    class.push_range('e', 'h');

    assert_eq!(
        class.ranges(),
        &[CharRange::new('a', 'h'), CharRange::single('x')]
    );
}

#[test]
fn membership() {
    let class = CharClass::from_range('a', 'z');

    assert!(class.contains('a'));
    assert!(class.contains('m'));
    assert!(!class.contains('A'));
    assert!(!class.contains('{'));
}

#[test]
fn negation() {
    let class = CharClass::from_char('\n').negated();

    assert!(class.contains('a'));
    assert!(!class.contains('\n'));
    assert!(class.contains(char::MAX));
}

#[test]
fn subtraction() {
    let mut class = CharClass::from_range('a', 'z');
    let mut vowels = CharClass::new();
    for c in "aeiou".chars() {
        vowels.push_char(c);
    }
    class.set_subtraction(vowels);

    assert!(class.contains('b'));
    assert!(!class.contains('e'));
    assert!(!class.contains('B'));
}

#[test]
fn members_apply_negation_and_subtraction() {
    let mut class = CharClass::from_range('b', 'y').negated();
    class.set_subtraction(CharClass::from_char('a'));

    assert_eq!(
        class.members(),
        vec![CharRange::new('\0', '`'), CharRange::new('z', char::MAX)]
    );
}

#[test]
fn push_negated_class_adds_complement() {
    let mut class = CharClass::from_char('_');
    class.push_class(&CharClass::from_range('\0', 'x').negated());

    assert!(class.contains('_'));
    assert!(class.contains('y'));
    assert!(!class.contains('a'));
}

#[test]
fn complement_skips_surrogates() {
    let class = CharClass::from_range('\0', '\u{D7FF}').negated();

    assert_eq!(class.members(), vec![CharRange::new('\u{E000}', char::MAX)]);
}

#[test]
fn singleton() {
    assert_eq!(CharClass::from_char('q').singleton(), Some('q'));
    assert_eq!(CharClass::from_range('a', 'b').singleton(), None);
    assert_eq!(CharClass::from_char('q').negated().singleton(), None);
}

#[test]
fn empty_class() {
    let mut class = unicode::space_class(false);
    class.push_class(&unicode::space_class(false).negated());

    assert!(class.negated().is_empty());
    assert!(CharClass::new().is_empty());
}

#[test]
fn case_insensitive_adds_lowercase() {
    let class = CharClass::from_range('A', 'C').case_insensitive(&Culture::invariant());

    assert!(class.contains('a'));
    assert!(class.contains('C'));
    assert!(!class.contains('d'));
}

#[test]
fn case_insensitive_turkish() {
    let class = CharClass::from_char('I').case_insensitive(&Culture::new("tr"));

    assert!(class.contains('ı'));
    assert!(!class.contains('i'));
}

#[test]
fn unicode_shorthands() {
    let word = unicode::word_class(false);
    let digit = unicode::digit_class(false);
    let space = unicode::space_class(false);

    assert!(word.contains('é'));
    assert!(word.contains('_'));
    assert!(!word.contains('-'));
    assert!(digit.contains('٣'));
    assert!(space.contains('\u{A0}'));
    assert!(space.contains('\u{85}'));
}

#[test]
fn ecma_shorthands_are_ascii() {
    assert!(!unicode::word_class(true).contains('é'));
    assert!(!unicode::digit_class(true).contains('٣'));
    assert!(!unicode::space_class(true).contains('\u{A0}'));
    assert!(unicode::word_class(true).contains('Z'));
}

#[test]
fn property_lookup() {
    let upper = unicode::property_ranges("Lu").unwrap();
    let mut class = CharClass::new();
    class.push_ranges(upper);

    assert!(class.contains('Q'));
    assert!(!class.contains('q'));
    assert!(unicode::property_ranges("Greek").is_some());
    assert!(unicode::property_ranges("NotAThing").is_none());
    assert!(unicode::property_ranges("IsGreek").is_none());
    assert!(unicode::property_ranges("L}|x").is_none());
}

#[test]
fn word_boundary_chars() {
    assert!(unicode::is_word_char('a'));
    assert!(unicode::is_word_char('\u{200D}'));
    assert!(!unicode::is_word_char(' '));
    assert!(!unicode::is_ecma_word_char('é'));
}

#[test]
fn display() {
    let mut class = CharClass::from_range('a', 'z');
    class.push_char('-');
    let mut sub = CharClass::new();
    sub.push_char('q');
    class.set_subtraction(sub);

    assert_eq!(class.to_string(), "[\\-a-z-[q]]");
    assert_eq!(CharClass::from_char('\n').negated().to_string(), "[^\\n]");
}
