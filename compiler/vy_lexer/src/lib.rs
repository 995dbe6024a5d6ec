//! Lexer for Vyper source, built on logos.
//!
//! [`lex`] produces the logical token stream: raw tokens from
//! [`raw_token`](crate::raw_token) run through the indentation
//! [`layout`](crate::layout) pass, which synthesizes `Newline`, `Indent` and
//! `Dedent` tokens and classifies comments.

mod layout;
mod lex_error;
mod raw_token;
mod token_flags;

use logos::Logos;
use tracing::debug;
use vy_ir::Span;

pub use layout::{Token, TAB_WIDTH};
pub use lex_error::LexError;
pub use token_flags::TokenFlags;

use layout::Layout;
use raw_token::RawToken;

/// Tokenize `source` into the logical token stream.
///
/// `source` is expected to be normalized (see [`normalize_source`]) but any
/// text is accepted.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut layout = Layout::new(source);
    let mut lexer = RawToken::lexer(source);
    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        match result {
            Ok(raw) => layout.push(raw, span)?,
            Err(()) => return Err(classify_error(lexer.slice(), span)),
        }
    }
    let tokens = layout.finish()?;
    debug!(tokens = tokens.len(), "lexed");
    Ok(tokens)
}

fn classify_error(slice: &str, span: Span) -> LexError {
    if slice.contains(['"', '\'']) {
        return LexError::UnterminatedString { span };
    }
    LexError::UnexpectedCharacter {
        ch: slice.chars().next().unwrap_or('\0'),
        span,
    }
}

/// Strip trailing spaces and tabs from every line, turn `\r\n` into `\n`
/// and make sure the text ends with a newline.
pub fn normalize_source(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 1);
    for line in source.split_inclusive('\n') {
        let content = line.strip_suffix('\n').unwrap_or(line);
        out.push_str(content.trim_end_matches([' ', '\t', '\r']));
        out.push('\n');
    }
    if out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests;
