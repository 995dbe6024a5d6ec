//! Parse error type.
//!
//! Lexer failures are folded into [`ParseError`] so callers see a single
//! error type per file. Line and column are filled in from the span once the
//! parser knows the source text.

use thiserror::Error;
use vy_ir::Span;
use vy_lexer::LexError;

/// Failure to parse a source file. Fatal for that file.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    /// 1-based line of `span.start`.
    pub line: u32,
    /// 1-based column of `span.start`, in characters.
    pub column: u32,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
            line: 0,
            column: 0,
        }
    }

    /// Fill in `line` and `column` from the span.
    #[must_use]
    pub fn located(mut self, source: &str) -> Self {
        let offset = (self.span.start as usize).min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line = before.matches('\n').count() + 1;
        let column = before[line_start..].chars().count() + 1;
        self.line = u32::try_from(line).unwrap_or(u32::MAX);
        self.column = u32::try_from(column).unwrap_or(u32::MAX);
        self
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(err.to_string(), err.span())
    }
}

#[cfg(test)]
mod tests;
