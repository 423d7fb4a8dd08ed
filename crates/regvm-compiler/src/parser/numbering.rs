//! Capture group numbering.
//!
//! The first parsing pass only records where groups open and how they are
//! named. Numbers are assigned afterwards, so a reference can name a group
//! that opens later in the pattern:
//!
//! 1. Unnamed groups take `1, 2, 3, ..` in order of their opening paren.
//! 2. Explicitly numbered groups (`(?<7>..)`) keep their number.
//! 3. Named groups take the next numbers not already in use, in order of
//!    first appearance. Repeated names share a number.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use regvm_bytecode::CaptureTable;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum GroupKind {
    Unnamed,
    Numbered(u32),
    Named(String),
}

#[derive(Clone, Debug)]
pub(super) struct GroupDecl {
    pub kind: GroupKind,
    /// Offset of the opening paren.
    pub offset: usize,
}

#[derive(Clone, Debug, Default)]
pub(super) struct Numbering {
    /// Capture number to the offset where it first opens.
    numbers: BTreeMap<u32, usize>,
    names: IndexMap<String, u32>,
}

impl Numbering {
    pub fn assign(decls: &[GroupDecl]) -> Self {
        let mut numbers = BTreeMap::new();
        numbers.insert(0, 0);

        let mut autocap = 1u32;
        for decl in decls {
            match decl.kind {
                GroupKind::Unnamed => {
                    numbers.entry(autocap).or_insert(decl.offset);
                    autocap = autocap.saturating_add(1);
                }
                GroupKind::Numbered(n) => {
                    numbers.entry(n).or_insert(decl.offset);
                }
                GroupKind::Named(_) => {}
            }
        }

        let mut names = IndexMap::new();
        let mut next = autocap;
        for decl in decls {
            let GroupKind::Named(name) = &decl.kind else {
                continue;
            };
            if names.contains_key(name) {
                continue;
            }
            while numbers.contains_key(&next) {
                next = next.saturating_add(1);
            }
            names.insert(name.clone(), next);
            numbers.insert(next, decl.offset);
            next = next.saturating_add(1);
        }

        Self { numbers, names }
    }

    pub fn is_defined(&self, number: u32) -> bool {
        self.numbers.contains_key(&number)
    }

    pub fn number_of(&self, name: &str) -> Option<u32> {
        self.names.get(name).copied()
    }

    /// Offset of the paren that opens `number`.
    pub fn open_offset(&self, number: u32) -> Option<usize> {
        self.numbers.get(&number).copied()
    }

    pub fn max_number(&self) -> u32 {
        self.numbers.keys().next_back().copied().unwrap_or(0)
    }

    pub fn capture_table(&self) -> CaptureTable {
        CaptureTable::new(self.numbers.keys().copied().collect(), self.names.clone())
    }
}
