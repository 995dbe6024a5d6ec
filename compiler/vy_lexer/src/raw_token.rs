//! Raw Token Definition
//!
//! The logos-derived tokenizer output, before layout. Identifiers and
//! reserved words are both `Name` here; the parser owns the keyword table.
//! Backslash line continuations are skipped like other whitespace.

use logos::{Lexer, Logos};
use vy_ir::TokenKind;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"([ \t\r\x0c]|\\[ \t]*\r?\n)+")]
pub(crate) enum RawToken {
    #[regex(r"#[^\n]*")]
    Comment,

    #[token("\n")]
    Newline,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,

    #[regex(r"0[xX][0-9a-fA-F_]+")]
    #[regex(r"0[bB][01_]+")]
    #[regex(r"0[oO][0-7_]+")]
    #[regex(r"[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#"[bBxXrRuUfF]?"([^"\\\n]|\\.)*""#)]
    #[regex(r#"[bBxXrRuUfF]?'([^'\\\n]|\\.)*'"#)]
    String,

    #[regex(r#"[bBxXrRuUfF]?""""#, |lex| close_triple_quote(lex, b'"'))]
    #[regex(r"[bBxXrRuUfF]?'''", |lex| close_triple_quote(lex, b'\''))]
    TripleString,

    #[token("(")]
    LPar,
    #[token(")")]
    RPar,
    #[token("[")]
    LSqb,
    #[token("]")]
    RSqb,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("@")]
    At,
    #[token("->")]
    Arrow,
    #[token("=")]
    Equal,
    #[token(":=")]
    ColonEqual,

    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("//=")]
    #[token("%=")]
    #[token("**=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<=")]
    #[token(">>=")]
    AugAssign,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("//")]
    DoubleSlash,
    #[token("%")]
    Percent,
    #[token("**")]
    DoubleStar,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amper,
    #[token("|")]
    VBar,
    #[token("^")]
    Circumflex,
    #[token("<<")]
    LeftShift,
    #[token(">>")]
    RightShift,

    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("==")]
    EqEqual,
    #[token("!=")]
    NotEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
}

/// Extend a triple-quoted string token up to and including its closing
/// quotes. Returns `false` (a lex error) when the string never closes.
fn close_triple_quote(lex: &mut Lexer<'_, RawToken>, quote: u8) -> bool {
    let rest = lex.remainder().as_bytes();
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            b'\\' => i += 2,
            b if b == quote && rest[i..].starts_with(&[quote, quote, quote]) => {
                lex.bump(i + 3);
                return true;
            }
            _ => i += 1,
        }
    }
    false
}

impl RawToken {
    /// Kind of the tree leaf this token becomes.
    ///
    /// `Comment` maps to a trailing comment; the layout pass reclassifies
    /// comments that sit on their own line.
    pub(crate) fn kind(self) -> TokenKind {
        match self {
            RawToken::Comment => TokenKind::Comment,
            RawToken::Newline => TokenKind::Newline,
            RawToken::Name => TokenKind::Name,
            RawToken::Number => TokenKind::Number,
            RawToken::String | RawToken::TripleString => TokenKind::String,
            RawToken::LPar => TokenKind::LPar,
            RawToken::RPar => TokenKind::RPar,
            RawToken::LSqb => TokenKind::LSqb,
            RawToken::RSqb => TokenKind::RSqb,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Ellipsis => TokenKind::Ellipsis,
            RawToken::At => TokenKind::At,
            RawToken::Arrow => TokenKind::Arrow,
            RawToken::Equal => TokenKind::Equal,
            RawToken::ColonEqual => TokenKind::ColonEqual,
            RawToken::AugAssign => TokenKind::AugAssign,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::DoubleSlash => TokenKind::DoubleSlash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::DoubleStar => TokenKind::DoubleStar,
            RawToken::Tilde => TokenKind::Tilde,
            RawToken::Amper => TokenKind::Amper,
            RawToken::VBar => TokenKind::VBar,
            RawToken::Circumflex => TokenKind::Circumflex,
            RawToken::LeftShift => TokenKind::LeftShift,
            RawToken::RightShift => TokenKind::RightShift,
            RawToken::Less => TokenKind::Less,
            RawToken::Greater => TokenKind::Greater,
            RawToken::EqEqual => TokenKind::EqEqual,
            RawToken::NotEqual => TokenKind::NotEqual,
            RawToken::LessEqual => TokenKind::LessEqual,
            RawToken::GreaterEqual => TokenKind::GreaterEqual,
        }
    }
}
