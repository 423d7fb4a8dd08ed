//! Instruction emission.
//!
//! Each tree node expands into a fixed opcode shape. Forward jumps are
//! emitted with a placeholder target and patched once the target is known.
//!
//! ```text
//! pattern        SetMark; <root>; CaptureMark 0; Stop
//! a|b|c          LazyBranch L1; a; Goto E; L1: LazyBranch L2; b; Goto E; L2: c; E:
//! (x)            SetMark; x; CaptureMark n
//! (?>x)          SetJump; x; ForeJump
//! (?=x)          SetJump; SetMark; x; GetMark; ForeJump
//! (?!x)          SetJump; LazyBranch L; x; BackJump; L: ForeJump
//! (?(n)y|z)      SetJump; LazyBranch L; TestRef n; ForeJump; y; Goto E; L: ForeJump; z; E:
//! ```
//!
//! Repeats of a single character use the loop opcodes directly. Other
//! repeats wrap the body between an entry opcode and a branch opcode:
//! marks for `*` and `+`, counters whenever a bound must be tracked.

use regvm_bytecode::{Atom, CaptureTable, INFINITE, Instr, Op, Slot, StepAddr};
use regvm_core::{CharClass, Culture, RegexOptions};

use super::tables::{ClassTableBuilder, StringTableBuilder};
use crate::parser::Node;

/// Code and tables produced for one pattern.
#[derive(Clone, Debug)]
pub struct Emitted {
    pub steps: Vec<Instr>,
    pub strings: Vec<String>,
    pub classes: Vec<CharClass>,
}

/// Emits the program for a lowered tree.
pub fn emit(
    root: &Node,
    captures: &CaptureTable,
    options: RegexOptions,
    culture: &Culture,
) -> Emitted {
    let mut emitter = Emitter {
        steps: Vec::new(),
        strings: StringTableBuilder::new(),
        classes: ClassTableBuilder::new(),
        captures,
        culture,
        rtl: options.right_to_left(),
    };

    emitter.push(Op::SetMark);
    emitter.node(root);
    emitter.push(Op::CaptureMark(0));
    emitter.push(Op::Stop);

    let Emitter {
        steps,
        strings,
        classes,
        ..
    } = emitter;
    debug_assert!(
        steps
            .iter()
            .all(|step| step.op.target().is_none_or(|t| t < steps.len())),
        "jump target out of range"
    );

    Emitted {
        steps,
        strings: strings.finish(),
        classes: classes.finish(),
    }
}

struct Emitter<'a> {
    steps: Vec<Instr>,
    strings: StringTableBuilder,
    classes: ClassTableBuilder,
    captures: &'a CaptureTable,
    culture: &'a Culture,
    /// Direction of the sub-program being emitted.
    rtl: bool,
}

impl Emitter<'_> {
    fn here(&self) -> StepAddr {
        self.steps.len()
    }

    fn push(&mut self, op: Op) -> StepAddr {
        self.push_ci(op, false)
    }

    /// Only consuming opcodes carry the direction and case modifiers.
    fn push_ci(&mut self, op: Op, ci: bool) -> StepAddr {
        let addr = self.here();
        let consumes = op.folds_case();
        self.steps.push(Instr::new(op).rtl(self.rtl && consumes).ci(ci));
        addr
    }

    fn patch(&mut self, at: StepAddr, target: StepAddr) {
        if let Some(t) = self.steps[at].op.target_mut() {
            *t = target;
        }
    }

    fn slot(&self, number: u32) -> Slot {
        self.captures
            .slot(number)
            .expect("group numbers are resolved by the parser")
    }

    fn fold(&self, ch: char, ci: bool) -> char {
        if ci { self.culture.to_lower(ch) } else { ch }
    }

    fn node(&mut self, node: &Node) {
        match node {
            Node::Empty => {}
            Node::Nothing => {
                self.push(Op::Fail);
            }
            Node::Char { .. } | Node::NotChar { .. } | Node::Class { .. } => {
                if let Some((atom, ci)) = self.atom(node) {
                    self.push_ci(Op::Atom(atom), ci);
                }
            }
            Node::Literal { text, ci } => self.literal(text, *ci),
            Node::BackRef { number, ci } => {
                let slot = self.slot(*number);
                self.push_ci(Op::BackRef(slot), *ci);
            }
            Node::Anchor(anchor) => {
                self.push(Op::Assert(*anchor));
            }
            Node::Concat(items) => {
                if self.rtl {
                    items.iter().rev().for_each(|item| self.node(item));
                } else {
                    items.iter().for_each(|item| self.node(item));
                }
            }
            Node::Alternate(branches) => self.alternate(branches),
            Node::Repeat {
                child,
                min,
                max,
                lazy,
            } => self.repeat(child, *min, *max, *lazy),
            Node::Capture { number, child } => {
                let slot = self.slot(*number);
                self.push(Op::SetMark);
                self.node(child);
                self.push(Op::CaptureMark(slot));
            }
            Node::Group(child) => self.node(child),
            Node::Atomic(child) => {
                self.push(Op::SetJump);
                self.node(child);
                self.push(Op::ForeJump);
            }
            Node::Look {
                child,
                behind,
                negate,
            } => self.look(child, *behind, *negate),
            Node::CondRef { number, yes, no } => {
                let slot = self.slot(*number);
                self.conditional(
                    |e| {
                        e.push(Op::TestRef(slot));
                    },
                    yes,
                    no,
                );
            }
            Node::CondExpr { test, yes, no } => {
                self.conditional(
                    |e| match test.as_ref() {
                        Node::Look { .. } => e.node(test),
                        other => e.look(other, e.rtl, false),
                    },
                    yes,
                    no,
                );
            }
        }
    }

    /// Single-character matcher for `node`, with its case flag.
    fn atom(&mut self, node: &Node) -> Option<(Atom, bool)> {
        let atom = match node {
            Node::Char { ch, ci } => (Atom::Char(self.fold(*ch, *ci)), *ci),
            Node::NotChar { ch, ci } => (Atom::NotChar(self.fold(*ch, *ci)), *ci),
            Node::Class { class, ci } => {
                let class = if *ci {
                    class.case_insensitive(self.culture)
                } else {
                    class.clone()
                };
                (Atom::Class(self.classes.intern(class)), *ci)
            }
            _ => return None,
        };
        Some(atom)
    }

    fn literal(&mut self, text: &str, ci: bool) {
        let folded: String = text.chars().map(|c| self.fold(c, ci)).collect();
        let mut chars = folded.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            self.push_ci(Op::Atom(Atom::Char(ch)), ci);
            return;
        }
        let id = self.strings.intern(&folded);
        self.push_ci(Op::Literal(id), ci);
    }

    fn alternate(&mut self, branches: &[Node]) {
        let mut exits = Vec::with_capacity(branches.len());
        let last = branches.len().saturating_sub(1);
        for (i, branch) in branches.iter().enumerate() {
            if i == last {
                self.node(branch);
                break;
            }
            let fork = self.push(Op::LazyBranch(0));
            self.node(branch);
            exits.push(self.push(Op::Goto(0)));
            let next = self.here();
            self.patch(fork, next);
        }
        let end = self.here();
        for exit in exits {
            self.patch(exit, end);
        }
    }

    fn repeat(&mut self, child: &Node, min: u32, max: u32, lazy: bool) {
        if let Some((atom, ci)) = self.atom(child) {
            if min > 0 {
                self.push_ci(Op::Repeat { atom, count: min }, ci);
            }
            if max != min {
                let rest = if max == INFINITE { INFINITE } else { max - min };
                let op = if lazy {
                    Op::LazyLoop { atom, max: rest }
                } else {
                    Op::GreedyLoop { atom, max: rest }
                };
                self.push_ci(op, ci);
            }
            return;
        }

        let counted = max != INFINITE || min > 1;
        let enter = match (counted, min) {
            (false, 0) => Op::NullMark,
            (false, _) => Op::SetMark,
            (true, 0) => Op::NullCount(0),
            (true, _) => Op::SetCount(1 - i32::try_from(min).unwrap_or(i32::MAX)),
        };
        self.push(enter);
        let skip = (min == 0).then(|| self.push(Op::Goto(0)));

        let body = self.here();
        self.node(child);
        if let Some(skip) = skip {
            let branch = self.here();
            self.patch(skip, branch);
        }

        let limit = if max == INFINITE { INFINITE } else { max - min };
        let branch = match (counted, lazy) {
            (false, false) => Op::BranchMark(body),
            (false, true) => Op::LazyBranchMark(body),
            (true, false) => Op::BranchCount { body, limit },
            (true, true) => Op::LazyBranchCount { body, limit },
        };
        self.push(branch);
    }

    fn look(&mut self, child: &Node, behind: bool, negate: bool) {
        let saved = self.rtl;
        self.push(Op::SetJump);
        if negate {
            let fork = self.push(Op::LazyBranch(0));
            self.rtl = behind;
            self.node(child);
            self.rtl = saved;
            self.push(Op::BackJump);
            let next = self.here();
            self.patch(fork, next);
        } else {
            self.push(Op::SetMark);
            self.rtl = behind;
            self.node(child);
            self.rtl = saved;
            self.push(Op::GetMark);
        }
        self.push(Op::ForeJump);
    }

    fn conditional(&mut self, test: impl FnOnce(&mut Self), yes: &Node, no: &Node) {
        self.push(Op::SetJump);
        let fork = self.push(Op::LazyBranch(0));
        test(self);
        self.push(Op::ForeJump);
        self.node(yes);
        let exit = self.push(Op::Goto(0));

        let otherwise = self.here();
        self.patch(fork, otherwise);
        self.push(Op::ForeJump);
        self.node(no);

        let end = self.here();
        self.patch(exit, end);
    }
}
