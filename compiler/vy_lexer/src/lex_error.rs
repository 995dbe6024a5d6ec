//! Lexer error types.

use thiserror::Error;
use vy_ir::Span;

/// Failure to tokenize a source file. Fatal for that file.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("unexpected character {ch:?}")]
    UnexpectedCharacter { ch: char, span: Span },

    #[error("unindent to column {found} does not match any outer indentation level (expected {expected})")]
    InconsistentDedent { found: u32, expected: u32, span: Span },

    #[error("unmatched closing bracket {bracket:?}")]
    UnmatchedBracket { bracket: char, span: Span },

    #[error("bracket {bracket:?} is never closed")]
    UnclosedBracket { bracket: char, span: Span },
}

impl LexError {
    /// Location the error points at.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::UnexpectedCharacter { span, .. }
            | LexError::InconsistentDedent { span, .. }
            | LexError::UnmatchedBracket { span, .. }
            | LexError::UnclosedBracket { span, .. } => *span,
        }
    }
}
