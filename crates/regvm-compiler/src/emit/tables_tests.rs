use regvm_core::{CharClass, Culture, RegexOptions};

use super::{ClassTableBuilder, StringTableBuilder};
use crate::compile;

#[test]
fn strings_are_interned_once() {
    let mut table = StringTableBuilder::new();

    assert_eq!(table.intern("ab"), 0);
    assert_eq!(table.intern("cd"), 1);
    assert_eq!(table.intern("ab"), 0);
    assert_eq!(table.len(), 2);
    assert_eq!(table.finish(), ["ab", "cd"]);
}

#[test]
fn classes_are_interned_once() {
    let mut table = ClassTableBuilder::new();
    assert!(table.is_empty());

    let digits = CharClass::from_range('0', '9');
    assert_eq!(table.intern(digits.clone()), 0);
    assert_eq!(table.intern(digits.clone().negated()), 1);
    assert_eq!(table.intern(digits), 0);
    assert_eq!(table.len(), 2);
}

#[test]
fn program_shares_repeated_entries() {
    let program = compile("[ab]x[ab]|yz|yz", RegexOptions::NONE, &Culture::invariant()).unwrap();

    assert_eq!(program.classes().len(), 1);
    assert_eq!(program.strings(), ["yz"]);
}
