//! Capture number to slot mapping.
//!
//! Capture numbers come from the pattern and may be sparse (`(?<7>..)`).
//! Slots are dense indices used by the engine. When the numbers are exactly
//! `0..n` the mapping is the identity and no table is kept.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::instructions::Slot;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureTable {
    /// Capture number of each slot, ascending.
    numbers: Vec<u32>,
    /// Number to slot, only for sparse numbering.
    sparse: Option<HashMap<u32, Slot>>,
    /// Group name to capture number, in order of first appearance.
    names: IndexMap<String, u32>,
}

impl Default for CaptureTable {
    fn default() -> Self {
        Self::new(vec![0], IndexMap::new())
    }
}

impl CaptureTable {
    /// Builds the table from every capture number in use. Number 0 is always
    /// present.
    pub fn new(mut numbers: Vec<u32>, names: IndexMap<String, u32>) -> Self {
        numbers.push(0);
        numbers.sort_unstable();
        numbers.dedup();

        let dense = numbers.iter().enumerate().all(|(i, &n)| n as usize == i);
        let sparse = (!dense).then(|| {
            numbers
                .iter()
                .enumerate()
                .map(|(slot, &number)| (number, slot))
                .collect()
        });

        Self {
            numbers,
            sparse,
            names,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_sparse(&self) -> bool {
        self.sparse.is_some()
    }

    pub fn slot(&self, number: u32) -> Option<Slot> {
        match &self.sparse {
            Some(map) => map.get(&number).copied(),
            None => ((number as usize) < self.numbers.len()).then_some(number as usize),
        }
    }

    pub fn number(&self, slot: Slot) -> u32 {
        self.numbers[slot]
    }

    pub fn numbers(&self) -> &[u32] {
        &self.numbers
    }

    pub fn number_of_name(&self, name: &str) -> Option<u32> {
        self.names.get(name).copied()
    }

    pub fn name_of(&self, number: u32) -> Option<&str> {
        self.names
            .iter()
            .find(|&(_, &n)| n == number)
            .map(|(name, _)| name.as_str())
    }

    /// Display name of a slot: its group name, or its number.
    pub fn slot_name(&self, slot: Slot) -> String {
        let number = self.number(slot);
        match self.name_of(number) {
            Some(name) => name.to_string(),
            None => number.to_string(),
        }
    }

    pub fn names(&self) -> &IndexMap<String, u32> {
        &self.names
    }
}
