//! Recursive descent parser for Vyper.
//!
//! Builds the concrete syntax tree the formatter consumes. Every token and
//! comment of the source ends up as a leaf; blank lines are recorded as
//! newlines in the prefix of the leaf that follows them.
//!
//! # Comment placement
//!
//! - A trailing comment joins the node of the token it follows.
//! - A standalone comment between statements is a sibling of those
//!   statements in their `Module` or `Body`.
//! - A standalone comment inside brackets joins the node of the token
//!   after it.
//!
//! # Usage
//!
//! Build one [`Parser`] and reuse it for every file; construction builds the
//! keyword table.

mod cursor;
pub mod equivalence;
mod error;
mod grammar;
mod regions;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};
use vy_ir::{Leaf, Tree, TreeBuilder, TokenKind};
use vy_lexer::{Token, TokenFlags};

use cursor::Cursor;

pub use error::ParseError;

/// Reserved words and the leaf kind each one becomes.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("def", TokenKind::FuncDecl),
    ("event", TokenKind::EventDecl),
    ("enum", TokenKind::EnumDecl),
    ("flag", TokenKind::EnumDecl),
    ("struct", TokenKind::StructDecl),
    ("interface", TokenKind::InterfaceDecl),
    ("if", TokenKind::Keyword),
    ("elif", TokenKind::Keyword),
    ("else", TokenKind::Keyword),
    ("for", TokenKind::Keyword),
    ("in", TokenKind::Keyword),
    ("not", TokenKind::Keyword),
    ("and", TokenKind::Keyword),
    ("or", TokenKind::Keyword),
    ("return", TokenKind::Keyword),
    ("pass", TokenKind::Keyword),
    ("break", TokenKind::Keyword),
    ("continue", TokenKind::Keyword),
    ("raise", TokenKind::Keyword),
    ("assert", TokenKind::Keyword),
    ("log", TokenKind::Keyword),
    ("import", TokenKind::Keyword),
    ("from", TokenKind::Keyword),
    ("as", TokenKind::Keyword),
    ("implements", TokenKind::Keyword),
    ("uses", TokenKind::Keyword),
    ("initializes", TokenKind::Keyword),
    ("exports", TokenKind::Keyword),
    ("extcall", TokenKind::Keyword),
    ("staticcall", TokenKind::Keyword),
];

/// Words that can never start an expression.
const HARD_KEYWORDS: &[&str] = &[
    "if", "elif", "else", "for", "in", "and", "or", "return", "pass", "break", "continue", "raise",
    "assert", "import", "from", "as", "def",
];

/// Reusable Vyper parser.
pub struct Parser {
    keywords: FxHashMap<&'static str, TokenKind>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            keywords: KEYWORDS.iter().copied().collect(),
        }
    }

    /// Leaf kind of a reserved word, `None` for identifiers.
    #[inline]
    pub fn keyword_kind(&self, word: &str) -> Option<TokenKind> {
        self.keywords.get(word).copied()
    }

    /// Parse a whole source file.
    ///
    /// Trailing whitespace is stripped and a final newline is added before
    /// lexing; leaf positions refer to that text. The text of fmt:off
    /// regions is taken from `raw` unchanged.
    pub fn parse(&self, raw: &str) -> Result<Tree, ParseError> {
        let source = vy_lexer::normalize_source(raw);
        let tokens =
            vy_lexer::lex(&source).map_err(|err| ParseError::from(err).located(&source))?;
        let regions = regions::verbatim_regions(raw, &source, &tokens);
        if !regions.is_empty() {
            debug!(regions = regions.len(), "fmt: off regions");
        }

        let mut state = ParserState::new(&source, tokens, self);
        state.module().map_err(|err| err.located(&source))?;
        let tree = state.builder.finish(regions);
        debug!(elements = tree.len(), "parsed");
        Ok(tree)
    }
}

/// Per-file parsing state; the grammar modules add the productions.
pub(crate) struct ParserState<'a> {
    cursor: Cursor<'a>,
    builder: TreeBuilder,
    parser: &'a Parser,
}

impl<'a> ParserState<'a> {
    fn new(source: &'a str, tokens: Vec<Token>, parser: &'a Parser) -> Self {
        ParserState {
            cursor: Cursor::new(source, tokens),
            builder: TreeBuilder::new(),
            parser,
        }
    }

    // Lookahead

    #[inline]
    pub(crate) fn current_kind(&self) -> Option<TokenKind> {
        self.cursor.current_kind()
    }

    #[inline]
    pub(crate) fn peek_kind(&self, n: usize) -> Option<TokenKind> {
        self.cursor.peek_kind(n)
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    pub(crate) fn check_word(&self, word: &str) -> bool {
        self.cursor.check_word(word)
    }

    #[inline]
    pub(crate) fn peek_word(&self, n: usize, word: &str) -> bool {
        self.cursor.peek_word(n, word)
    }

    #[inline]
    pub(crate) fn current_text(&self) -> &'a str {
        self.cursor.peek_text(0)
    }

    /// True if the current token is a reserved word that cannot start an
    /// expression.
    pub(crate) fn at_hard_keyword(&self) -> bool {
        self.check(TokenKind::Name) && HARD_KEYWORDS.contains(&self.current_text())
    }

    // Consumption

    fn leaf(&self, token: &Token, kind: TokenKind) -> Leaf {
        let mut leaf =
            Leaf::new(kind, token.text(self.cursor.source())).at(token.line, token.column);
        if token.flags.contains(TokenFlags::LINE_START)
            && !token.flags.contains(TokenFlags::IN_BRACKETS)
            && token.blank_lines > 0
        {
            leaf.prefix = "\n".repeat(token.blank_lines as usize);
        }
        leaf
    }

    fn push(&mut self, token: &Token, kind: TokenKind) {
        trace!(kind = %kind, line = token.line, "leaf");
        let leaf = self.leaf(token, kind);
        self.builder.push_leaf(leaf);
    }

    /// Push every comment at the cursor into the open node.
    pub(crate) fn eat_comments(&mut self) {
        while let Some(token) = self.cursor.take_comment() {
            self.push(&token, token.kind);
        }
    }

    fn bump_as(&mut self, kind: impl FnOnce(&Self, &Token) -> TokenKind) {
        self.eat_comments();
        let Some(token) = self.cursor.advance() else {
            return;
        };
        let kind = kind(self, &token);
        self.push(&token, kind);
        while let Some(comment) = self.cursor.take_trailing_comment() {
            self.push(&comment, comment.kind);
        }
    }

    /// Consume the current token as a leaf of its lexical kind.
    pub(crate) fn bump(&mut self) {
        self.bump_as(|_, token| token.kind);
    }

    /// Consume the current word as a reserved word.
    pub(crate) fn bump_keyword(&mut self) {
        self.bump_as(|state, token| {
            state
                .parser
                .keyword_kind(token.text(state.cursor.source()))
                .unwrap_or(TokenKind::Keyword)
        });
    }

    /// Consume the current token as a docstring.
    pub(crate) fn bump_docstring(&mut self) {
        self.bump_as(|_, _| TokenKind::Docstring);
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected(&describe(kind)))
        }
    }

    pub(crate) fn expect_keyword(&mut self, word: &str) -> Result<(), ParseError> {
        if self.check_word(word) {
            self.bump_keyword();
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{word}'")))
        }
    }

    /// Consume an identifier.
    pub(crate) fn expect_name(&mut self) -> Result<(), ParseError> {
        if self.check(TokenKind::Name) && !self.at_hard_keyword() {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected("a name"))
        }
    }

    /// Error pointing at the current token.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        let found = match self.cursor.current() {
            None => "end of file".to_owned(),
            Some(token) if token.kind.is_layout() => describe(token.kind),
            Some(token) => format!("'{}'", token.text(self.cursor.source())),
        };
        ParseError::new(
            format!("expected {expected}, found {found}"),
            self.cursor.current_span(),
        )
    }
}

fn describe(kind: TokenKind) -> String {
    match kind {
        TokenKind::Newline => "end of line".to_owned(),
        TokenKind::Indent => "an indented block".to_owned(),
        TokenKind::Dedent => "end of block".to_owned(),
        TokenKind::Name => "a name".to_owned(),
        TokenKind::Number => "a number".to_owned(),
        TokenKind::String => "a string".to_owned(),
        TokenKind::LPar => "'('".to_owned(),
        TokenKind::RPar => "')'".to_owned(),
        TokenKind::LSqb => "'['".to_owned(),
        TokenKind::RSqb => "']'".to_owned(),
        TokenKind::LBrace => "'{'".to_owned(),
        TokenKind::RBrace => "'}'".to_owned(),
        TokenKind::Colon => "':'".to_owned(),
        TokenKind::Comma => "','".to_owned(),
        TokenKind::Equal => "'='".to_owned(),
        other => other.name().to_lowercase(),
    }
}

#[cfg(test)]
mod tests;
