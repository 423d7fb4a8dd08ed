//! Pattern syntax errors.

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use serde::{Serialize, Serializer};

/// Malformed pattern. `offset` is the byte offset of the offending construct.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[error("invalid pattern '{pattern}' at offset {offset}: {message}")]
pub struct PatternSyntaxError {
    #[serde(serialize_with = "serialize_str")]
    pattern: Box<str>,
    offset: usize,
    message: String,
}

fn serialize_str<S: Serializer>(value: &str, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(value)
}

impl PatternSyntaxError {
    pub fn new(pattern: &str, offset: usize, message: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            offset,
            message: message.into(),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Renders the error as an annotated snippet of the pattern.
    pub fn render(&self, colored: bool) -> String {
        let renderer = if colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let snippet = Snippet::source(&*self.pattern)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(self.span()).label(&self.message));
        let report: Vec<Group> = vec![Level::ERROR.primary_title(&self.message).element(snippet)];

        renderer.render(&report).to_string()
    }

    /// Span of the offending character; empty at the end of the pattern.
    fn span(&self) -> std::ops::Range<usize> {
        let start = self.offset.min(self.pattern.len());
        let width = self.pattern[start..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
        start..start + width
    }
}
