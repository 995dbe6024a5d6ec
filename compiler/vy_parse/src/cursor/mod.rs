//! Token cursor for navigating the logical token stream.
//!
//! Comments are transparent to lookahead: `current` and `peek_kind` see
//! through them. The parser decides where each comment lands by draining
//! them explicitly (`take_comment`, `take_trailing_comment`) before and
//! after consuming a significant token.

use vy_ir::{Span, TokenKind};
use vy_lexer::Token;

pub(crate) struct Cursor<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

#[inline]
fn is_comment(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Comment | TokenKind::StandaloneComment)
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Cursor {
            source,
            tokens,
            pos: 0,
        }
    }

    #[inline]
    pub(crate) fn source(&self) -> &'a str {
        self.source
    }

    /// The `n`th significant token from the current position.
    pub(crate) fn peek(&self, n: usize) -> Option<&Token> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|token| !is_comment(token.kind))
            .nth(n)
    }

    #[inline]
    pub(crate) fn current(&self) -> Option<&Token> {
        self.peek(0)
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> Option<TokenKind> {
        self.peek_kind(0)
    }

    #[inline]
    pub(crate) fn peek_kind(&self, n: usize) -> Option<TokenKind> {
        self.peek(n).map(|token| token.kind)
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    /// Text of the `n`th significant token, empty past the end.
    pub(crate) fn peek_text(&self, n: usize) -> &'a str {
        self.peek(n).map_or("", |token| token.text(self.source))
    }

    /// True if the `n`th significant token is the word `word`.
    pub(crate) fn peek_word(&self, n: usize, word: &str) -> bool {
        self.peek(n)
            .is_some_and(|token| token.kind == TokenKind::Name && token.text(self.source) == word)
    }

    #[inline]
    pub(crate) fn check_word(&self, word: &str) -> bool {
        self.peek_word(0, word)
    }

    /// Span of the current significant token, or an empty span at the end
    /// of the source.
    pub(crate) fn current_span(&self) -> Span {
        self.current().map_or_else(
            || {
                let end = u32::try_from(self.source.len()).unwrap_or(u32::MAX);
                Span::new(end, end)
            },
            |token| token.span,
        )
    }

    /// Consume the comment at the raw position, if there is one.
    pub(crate) fn take_comment(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).filter(|token| is_comment(token.kind))?;
        let token = token.clone();
        self.pos += 1;
        Some(token)
    }

    /// Consume a trailing comment at the raw position, if there is one.
    pub(crate) fn take_trailing_comment(&mut self) -> Option<Token> {
        let token = self
            .tokens
            .get(self.pos)
            .filter(|token| token.kind == TokenKind::Comment)?;
        let token = token.clone();
        self.pos += 1;
        Some(token)
    }

    /// Consume the token at the raw position. Callers drain comments first.
    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.clone();
        self.pos += 1;
        Some(token)
    }
}
