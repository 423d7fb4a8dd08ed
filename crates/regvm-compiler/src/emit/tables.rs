//! Literal and class tables.
//!
//! Instructions refer to strings and classes by index. Identical entries are
//! stored once.

use indexmap::IndexSet;
use regvm_bytecode::{ClassId, StringId};
use regvm_core::CharClass;

#[derive(Debug, Default)]
pub struct StringTableBuilder {
    strings: IndexSet<String>,
}

impl StringTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, s: &str) -> StringId {
        if let Some(id) = self.strings.get_index_of(s) {
            return id;
        }
        self.strings.insert_full(s.to_string()).0
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn finish(self) -> Vec<String> {
        self.strings.into_iter().collect()
    }
}

#[derive(Debug, Default)]
pub struct ClassTableBuilder {
    classes: IndexSet<CharClass>,
}

impl ClassTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, class: CharClass) -> ClassId {
        self.classes.insert_full(class).0
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn finish(self) -> Vec<CharClass> {
        self.classes.into_iter().collect()
    }
}
