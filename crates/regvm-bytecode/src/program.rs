//! Compiled program.

use regvm_core::{CharClass, Culture, RegexOptions};

use crate::anchors::Anchors;
use crate::captures::CaptureTable;
use crate::instructions::{ClassId, Instr, StepAddr, StringId};
use crate::prefix::LiteralPrefix;

/// Characters that may begin a match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirstChars {
    pub class: CharClass,
    /// Input characters are folded before the membership test.
    pub ci: bool,
}

/// Everything the code generator produces, handed over in one piece.
#[derive(Clone, Debug, Default)]
pub struct ProgramParts {
    pub pattern: String,
    pub options: RegexOptions,
    pub culture: Culture,
    pub steps: Vec<Instr>,
    pub strings: Vec<String>,
    pub classes: Vec<CharClass>,
    pub captures: CaptureTable,
    pub anchors: Anchors,
    pub prefix: Option<LiteralPrefix>,
    pub first_chars: Option<FirstChars>,
}

/// Immutable compiled pattern, shared read-only by every execution.
#[derive(Clone, Debug)]
pub struct Program {
    pattern: String,
    options: RegexOptions,
    culture: Culture,
    steps: Vec<Instr>,
    strings: Vec<String>,
    classes: Vec<CharClass>,
    captures: CaptureTable,
    anchors: Anchors,
    prefix: Option<LiteralPrefix>,
    first_chars: Option<FirstChars>,
}

impl Program {
    pub fn new(parts: ProgramParts) -> Self {
        let ProgramParts {
            pattern,
            options,
            culture,
            steps,
            strings,
            classes,
            captures,
            anchors,
            prefix,
            first_chars,
        } = parts;
        Self {
            pattern,
            options,
            culture,
            steps,
            strings,
            classes,
            captures,
            anchors,
            prefix,
            first_chars,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn options(&self) -> RegexOptions {
        self.options
    }

    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    pub fn right_to_left(&self) -> bool {
        self.options.right_to_left()
    }

    pub fn steps(&self) -> &[Instr] {
        &self.steps
    }

    pub fn step(&self, addr: StepAddr) -> &Instr {
        &self.steps[addr]
    }

    pub fn literal(&self, id: StringId) -> &str {
        &self.strings[id]
    }

    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    pub fn class(&self, id: ClassId) -> &CharClass {
        &self.classes[id]
    }

    pub fn classes(&self) -> &[CharClass] {
        &self.classes
    }

    pub fn captures(&self) -> &CaptureTable {
        &self.captures
    }

    pub fn slot_count(&self) -> usize {
        self.captures.slot_count()
    }

    pub fn anchors(&self) -> Anchors {
        self.anchors
    }

    pub fn prefix(&self) -> Option<&LiteralPrefix> {
        self.prefix.as_ref()
    }

    pub fn first_chars(&self) -> Option<&FirstChars> {
        self.first_chars.as_ref()
    }
}
