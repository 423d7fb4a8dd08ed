//! Tracing infrastructure for debugging VM execution.
//!
//! The tracer is a zero-cost abstraction: the interpreter is generic over
//! [`Tracer`], and with [`NoopTracer`] every call is an empty inline
//! function that the compiler removes. [`PrintTracer`] collects one line
//! per dispatched instruction.

use regvm_bytecode::{Instr, Program, StepAddr, format_operands};
use regvm_core::Colors;

use super::stacks::Resume;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Instructions, attempts and results.
    #[default]
    Default,
    /// Also the input just after the cursor on every instruction line.
    Verbose,
}

/// Hooks called by the runner and interpreter.
///
/// - `trace_attempt` - before running the program at a candidate position
/// - `trace_instruction` - before executing an instruction
/// - `trace_backtrack` - after popping a track frame
/// - `trace_attempt_failed` - when an attempt runs out of frames
/// - `trace_match` - when a scan succeeds
pub trait Tracer {
    fn trace_attempt(&mut self, pos: usize);

    fn trace_instruction(&mut self, ip: StepAddr, instr: &Instr, resume: Resume, pos: usize);

    fn trace_backtrack(&mut self, ip: StepAddr, resume: Resume);

    fn trace_attempt_failed(&mut self, pos: usize);

    fn trace_match(&mut self, start: usize, end: usize);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_attempt(&mut self, _pos: usize) {}

    #[inline(always)]
    fn trace_instruction(&mut self, _ip: StepAddr, _instr: &Instr, _resume: Resume, _pos: usize) {
    }

    #[inline(always)]
    fn trace_backtrack(&mut self, _ip: StepAddr, _resume: Resume) {}

    #[inline(always)]
    fn trace_attempt_failed(&mut self, _pos: usize) {}

    #[inline(always)]
    fn trace_match(&mut self, _start: usize, _end: usize) {}
}

/// Column where the cursor position starts on instruction lines.
const POS_COLUMN: usize = 30;

/// Characters of input shown in verbose mode.
const CONTEXT_CHARS: usize = 8;

/// Tracer that collects an execution trace.
pub struct PrintTracer<'s> {
    text: &'s str,
    program: &'s Program,
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
    step_width: usize,
    /// Backtracks in the current attempt.
    backtracks: usize,
}

pub struct PrintTracerBuilder<'s> {
    text: &'s str,
    program: &'s Program,
    verbosity: Verbosity,
    colors: Colors,
}

impl<'s> PrintTracerBuilder<'s> {
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn colored(mut self, enabled: bool) -> Self {
        self.colors = Colors::new(enabled);
        self
    }

    pub fn build(self) -> PrintTracer<'s> {
        let last = self.program.steps().len().saturating_sub(1);
        PrintTracer {
            text: self.text,
            program: self.program,
            verbosity: self.verbosity,
            colors: self.colors,
            lines: Vec::new(),
            step_width: last.to_string().len(),
            backtracks: 0,
        }
    }
}

impl<'s> PrintTracer<'s> {
    pub fn builder(text: &'s str, program: &'s Program) -> PrintTracerBuilder<'s> {
        PrintTracerBuilder {
            text,
            program,
            verbosity: Verbosity::Default,
            colors: Colors::OFF,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The whole trace, one line per entry.
    pub fn output(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{line}");
        }
    }

    fn symbol(resume: Resume) -> &'static str {
        match resume {
            Resume::Forward => " ",
            Resume::Back => "◁",
            Resume::Back2 => "◀",
        }
    }

    fn context(&self, pos: usize) -> String {
        let ahead: String = self.text[pos..].chars().take(CONTEXT_CHARS + 1).collect();
        let shown: String = ahead.chars().take(CONTEXT_CHARS).collect();
        if ahead.chars().count() > CONTEXT_CHARS {
            format!("{shown:?}…")
        } else {
            format!("{shown:?}")
        }
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_attempt(&mut self, pos: usize) {
        let c = self.colors;
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.push(format!("{}attempt @{pos}{}", c.blue, c.reset));
        self.backtracks = 0;
    }

    fn trace_instruction(&mut self, ip: StepAddr, instr: &Instr, resume: Resume, pos: usize) {
        let c = self.colors;
        let sw = self.step_width;
        let symbol = Self::symbol(resume);
        let mnemonic = instr.op.mnemonic();
        let operands = format_operands(&instr.op, self.program, &Colors::OFF);
        let modifiers = match (instr.rtl, instr.ci) {
            (false, false) => "",
            (true, false) => " [rtl]",
            (false, true) => " [ci]",
            (true, true) => " [rtl ci]",
        };
        let operands = if operands.is_empty() {
            String::new()
        } else {
            format!(" {operands}")
        };

        let plain = format!("  {ip:0sw$} {symbol} {mnemonic}{operands}{modifiers}");
        let pad = POS_COLUMN.saturating_sub(plain.chars().count()).max(1);
        let mut line = format!(
            "  {}{ip:0sw$}{} {}{symbol}{} {}{mnemonic}{}{operands}{modifiers}{:pad$}{}@{pos}{}",
            c.dim, c.reset, c.yellow, c.reset, c.blue, c.reset, "", c.dim, c.reset
        );
        if self.verbosity == Verbosity::Verbose {
            line.push_str(&format!("  {}{}{}", c.green, self.context(pos), c.reset));
        }
        self.lines.push(line);
    }

    fn trace_backtrack(&mut self, _ip: StepAddr, _resume: Resume) {
        self.backtracks += 1;
    }

    fn trace_attempt_failed(&mut self, _pos: usize) {
        let c = self.colors;
        self.lines.push(format!(
            "  {}✗ no match{} (backtracks: {})",
            c.yellow, c.reset, self.backtracks
        ));
    }

    fn trace_match(&mut self, start: usize, end: usize) {
        let c = self.colors;
        self.lines.push(format!(
            "  {}● match {start}..{end}{} (backtracks: {})",
            c.green, c.reset, self.backtracks
        ));
    }
}
