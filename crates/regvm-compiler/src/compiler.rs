//! Compilation pipeline: parse, lower, analyze, emit.

use regvm_bytecode::{Program, ProgramParts};
use regvm_core::{Culture, RegexOptions};

use crate::analyze::analyze;
use crate::emit::emit;
use crate::lower::lower;
use crate::parser::{PatternSyntaxError, parse};

/// Compiler configuration.
///
/// ```ignore
/// let program = Compiler::new()
///     .options(RegexOptions::IGNORE_CASE)
///     .culture(Culture::new("tr-TR"))
///     .compile(r"\bİstanbul\b")?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    options: RegexOptions,
    culture: Culture,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(mut self, options: RegexOptions) -> Self {
        self.options = options;
        self
    }

    /// Culture for case folding. Ignored under `CULTURE_INVARIANT`.
    pub fn culture(mut self, culture: Culture) -> Self {
        self.culture = culture;
        self
    }

    pub fn compile(&self, pattern: &str) -> Result<Program, PatternSyntaxError> {
        let options = self.options;
        let culture = if options.culture_invariant() {
            Culture::invariant()
        } else {
            self.culture.clone()
        };

        let ast = parse(pattern, options)?;
        let root = lower(ast.root);
        let analysis = analyze(&root, options, &culture);
        let emitted = emit(&root, &ast.captures, options, &culture);

        Ok(Program::new(ProgramParts {
            pattern: ast.pattern,
            options,
            culture,
            steps: emitted.steps,
            strings: emitted.strings,
            classes: emitted.classes,
            captures: ast.captures,
            anchors: analysis.anchors,
            prefix: analysis.prefix,
            first_chars: analysis.first_chars,
        }))
    }
}

/// Compiles `pattern` with the given options and culture.
pub fn compile(
    pattern: &str,
    options: RegexOptions,
    culture: &Culture,
) -> Result<Program, PatternSyntaxError> {
    Compiler::new()
        .options(options)
        .culture(culture.clone())
        .compile(pattern)
}
