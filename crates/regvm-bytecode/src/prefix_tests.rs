use crate::prefix::LiteralPrefix;

#[test]
fn finds_leftmost_occurrence() {
    let prefix = LiteralPrefix::new("abc", false);
    let text = b"xxabcxabc";

    assert_eq!(prefix.find(text, 0, 0, text.len()), Some(2));
    assert_eq!(prefix.find(text, 3, 0, text.len()), Some(6));
    assert_eq!(prefix.find(text, 7, 0, text.len()), None);
}

#[test]
fn respects_end_bound() {
    let prefix = LiteralPrefix::new("abc", false);
    let text = b"xxabcxabc";

    assert_eq!(prefix.find(text, 3, 0, 8), None);
}

#[test]
fn right_to_left_returns_occurrence_end() {
    let prefix = LiteralPrefix::new("abc", true);
    let text = b"abcabc";

    assert_eq!(prefix.find(text, 6, 0, 6), Some(6));
    assert_eq!(prefix.find(text, 5, 0, 6), Some(3));
    assert_eq!(prefix.find(text, 2, 0, 6), None);
}

#[test]
fn right_to_left_respects_begin_bound() {
    let prefix = LiteralPrefix::new("abc", true);
    let text = b"abcabc";

    assert_eq!(prefix.find(text, 5, 1, 6), None);
}

#[test]
fn periodic_literal() {
    let prefix = LiteralPrefix::new("abab", false);
    let text = b"abaabababab";

    assert_eq!(prefix.find(text, 0, 0, text.len()), Some(3));
    assert_eq!(prefix.find(text, 4, 0, text.len()), Some(5));
}

#[test]
fn multibyte_literal() {
    let prefix = LiteralPrefix::new("é!", false);
    let text = "caféé!".as_bytes();

    assert_eq!(prefix.find(text, 0, 0, text.len()), Some(5));
}

#[test]
fn match_at_position() {
    let forward = LiteralPrefix::new("ab", false);
    let backward = LiteralPrefix::new("ab", true);
    let text = b"xab";

    assert!(forward.is_match_at(text, 1, 0, 3));
    assert!(!forward.is_match_at(text, 2, 0, 3));
    assert!(backward.is_match_at(text, 3, 0, 3));
    assert!(!backward.is_match_at(text, 3, 2, 3));
}
