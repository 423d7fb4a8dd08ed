//! Shared logic for all commands: input loading, regex construction and
//! error reporting.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use regvm_core::{Culture, OptionsError, RegexOptions};
use regvm_lib::{Error, Regex};
use regvm_vm::RuntimeError;

/// Where the text to scan comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Text(String),
    File(PathBuf),
    Stdin,
}

impl Input {
    pub fn read(&self) -> Result<String, CommandError> {
        match self {
            Input::Text(text) => Ok(text.clone()),
            Input::File(path) => fs::read_to_string(path).map_err(|source| CommandError::Read {
                path: path.clone(),
                source,
            }),
            Input::Stdin => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(CommandError::Stdin)?;
                Ok(buf)
            }
        }
    }
}

/// Reads the input a scanning command was given.
pub fn load_input(input: Option<&Input>) -> Result<String, CommandError> {
    input.ok_or(CommandError::MissingInput)?.read()
}

/// Pattern and compilation flags.
#[derive(Clone, Debug)]
pub struct RegexArgs {
    pub pattern: String,
    pub options: String,
    pub culture: Option<String>,
    pub timeout: Option<Duration>,
    pub color: bool,
}

impl RegexArgs {
    pub fn options(&self) -> Result<RegexOptions, CommandError> {
        Ok(RegexOptions::parse_letters(&self.options)?)
    }

    /// Without `--culture`, case folding is culture invariant so results do
    /// not depend on the environment.
    pub fn culture(&self) -> Culture {
        self.culture
            .as_deref()
            .map_or_else(Culture::invariant, Culture::new)
    }

    pub fn compile(&self) -> Result<Regex, CommandError> {
        let mut builder = Regex::builder(&self.pattern)
            .options(self.options()?)
            .culture(self.culture());
        if let Some(timeout) = self.timeout {
            builder = builder.match_timeout(timeout);
        }
        builder.build().map_err(|err| CommandError::from_regex(err, self.color))
    }
}

/// How a command that ran to completion ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    NoMatch,
}

impl Outcome {
    pub fn found(found: bool) -> Self {
        if found { Outcome::Success } else { Outcome::NoMatch }
    }

    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::NoMatch => ExitCode::from(1),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("no input: pass a file, '-' for stdin, or -t <TEXT>")]
    MissingInput,

    /// A syntax error, already rendered against the pattern.
    #[error("{0}")]
    Syntax(String),

    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Regex(Error),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommandError {
    pub fn from_regex(err: Error, color: bool) -> Self {
        match err {
            Error::Syntax(err) => CommandError::Syntax(err.render(color)),
            err => CommandError::Regex(err),
        }
    }

    /// Syntax errors exit with 1 like a failed match; everything else is a
    /// runtime failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::Syntax(_) => 1,
            _ => 2,
        }
    }

    /// Text for stderr.
    pub fn report(&self) -> String {
        match self {
            CommandError::Syntax(rendered) => rendered.clone(),
            err => format!("error: {err}"),
        }
    }
}
