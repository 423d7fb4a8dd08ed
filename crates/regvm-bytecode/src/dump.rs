//! Human-readable program dump.
//!
//! Sections: `[program]` metadata, `[groups]` slot table, `[code]` listing.

use std::fmt::Write as _;

use regvm_core::Colors;

use crate::instructions::{Atom, INFINITE, Instr, Op};
use crate::program::Program;

/// Generate a human-readable dump of the program.
pub fn dump(program: &Program, colors: Colors) -> String {
    let mut out = String::new();
    let ctx = DumpContext::new(program, colors);

    dump_header(&mut out, program, &ctx);
    dump_groups(&mut out, program, &ctx);
    dump_code(&mut out, program, &ctx);

    out
}

struct DumpContext {
    /// Width of step addresses.
    step_width: usize,
    colors: Colors,
}

impl DumpContext {
    fn new(program: &Program, colors: Colors) -> Self {
        let last = program.steps().len().saturating_sub(1);
        Self {
            step_width: last.to_string().len(),
            colors,
        }
    }
}

fn dump_header(out: &mut String, program: &Program, ctx: &DumpContext) {
    let c = &ctx.colors;

    writeln!(out, "{}[program]{}", c.blue, c.reset).unwrap();
    writeln!(out, "pattern  {}{:?}{}", c.green, program.pattern(), c.reset).unwrap();
    writeln!(out, "options  {}", program.options()).unwrap();
    writeln!(out, "culture  {}", program.culture()).unwrap();
    writeln!(out, "anchors  {}", program.anchors()).unwrap();
    match program.prefix() {
        Some(prefix) => {
            writeln!(out, "prefix   {}{:?}{}", c.green, prefix.literal(), c.reset).unwrap()
        }
        None => writeln!(out, "prefix   -").unwrap(),
    }
    match program.first_chars() {
        Some(fc) => {
            let ci = if fc.ci { " ci" } else { "" };
            writeln!(out, "first    {}{}{}{ci}", c.green, fc.class, c.reset).unwrap()
        }
        None => writeln!(out, "first    -").unwrap(),
    }
    out.push('\n');
}

fn dump_groups(out: &mut String, program: &Program, ctx: &DumpContext) {
    let c = &ctx.colors;
    let captures = program.captures();

    writeln!(out, "{}[groups]{}", c.blue, c.reset).unwrap();
    for slot in 0..captures.slot_count() {
        let number = captures.number(slot);
        match captures.name_of(number) {
            Some(name) => {
                writeln!(out, "{slot} #{number} {}{name}{}", c.green, c.reset).unwrap()
            }
            None => writeln!(out, "{slot} #{number}").unwrap(),
        }
    }
    out.push('\n');
}

fn dump_code(out: &mut String, program: &Program, ctx: &DumpContext) {
    let c = &ctx.colors;

    writeln!(out, "{}[code]{}", c.blue, c.reset).unwrap();
    for (addr, instr) in program.steps().iter().enumerate() {
        let line = format_instr(addr, instr, program, ctx);
        out.push_str(&line);
        out.push('\n');
    }
}

fn format_instr(addr: usize, instr: &Instr, program: &Program, ctx: &DumpContext) -> String {
    let c = &ctx.colors;
    let w = ctx.step_width;
    let mut line = format!(
        "{}{addr:0w$}{}  {}{}{}",
        c.dim,
        c.reset,
        c.blue,
        instr.op.mnemonic(),
        c.reset
    );

    let operands = format_operands(&instr.op, program, c);
    if !operands.is_empty() {
        line.push(' ');
        line.push_str(&operands);
    }

    match (instr.rtl, instr.ci) {
        (false, false) => {}
        (true, false) => write!(line, " {}[rtl]{}", c.dim, c.reset).unwrap(),
        (false, true) => write!(line, " {}[ci]{}", c.dim, c.reset).unwrap(),
        (true, true) => write!(line, " {}[rtl ci]{}", c.dim, c.reset).unwrap(),
    }
    line
}

/// Operand text for one opcode, empty for opcodes without operands.
pub fn format_operands(op: &Op, program: &Program, c: &Colors) -> String {
    match *op {
        Op::Atom(atom) => format_atom(atom, program, c),
        Op::Literal(id) => format!("{}{:?}{}", c.green, program.literal(id), c.reset),
        Op::BackRef(slot) | Op::CaptureMark(slot) | Op::TestRef(slot) => {
            format!("{}", program.captures().number(slot))
        }
        Op::Repeat { atom, count } => format!("{} x{count}", format_atom(atom, program, c)),
        Op::GreedyLoop { atom, max } | Op::LazyLoop { atom, max } => {
            format!("{} max={}", format_atom(atom, program, c), format_bound(max))
        }
        Op::LazyBranch(t) | Op::Goto(t) | Op::BranchMark(t) | Op::LazyBranchMark(t) => {
            format!("-> {t}")
        }
        Op::NullCount(n) | Op::SetCount(n) => format!("{n}"),
        Op::BranchCount { body, limit } | Op::LazyBranchCount { body, limit } => {
            format!("-> {body} limit={}", format_bound(limit))
        }
        Op::Assert(_)
        | Op::Fail
        | Op::NullMark
        | Op::SetMark
        | Op::GetMark
        | Op::SetJump
        | Op::BackJump
        | Op::ForeJump
        | Op::Stop => String::new(),
    }
}

fn format_atom(atom: Atom, program: &Program, c: &Colors) -> String {
    match atom {
        Atom::Char(ch) => format!("{}{ch:?}{}", c.green, c.reset),
        Atom::NotChar(ch) => format!("{}{ch:?}{}", c.green, c.reset),
        Atom::Class(id) => format!("{}{}{}", c.green, program.class(id), c.reset),
    }
}

fn format_bound(n: u32) -> String {
    if n == INFINITE {
        "inf".to_string()
    } else {
        n.to_string()
    }
}
