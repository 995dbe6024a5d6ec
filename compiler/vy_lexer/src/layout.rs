//! Indentation layout.
//!
//! Turns the raw token stream into the logical token stream the parser
//! reads: `Newline` ends every logical line, `Indent`/`Dedent` bracket every
//! block, and comments are split into trailing and standalone ones.
//!
//! Inside brackets, line breaks and indentation are insignificant. A comment
//! that is alone on its line at bracket depth 0 is held back until the next
//! code line decides the indentation, so it lands in the block it visually
//! belongs to: with the body when it is indented at least as deep as the
//! body, after the closing `Dedent`s otherwise.

use tracing::trace;
use vy_ir::{Span, TokenKind};

use crate::raw_token::RawToken;
use crate::{LexError, TokenFlags};

/// Columns a tab counts for when measuring indentation.
pub const TAB_WIDTH: u32 = 4;

/// A token of the logical stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based source line.
    pub line: u32,
    /// 0-based byte column.
    pub column: u32,
    /// Blank source lines right before this token (depth 0 only).
    pub blank_lines: u32,
    pub flags: TokenFlags,
}

impl Token {
    /// Source text of the token; empty for synthesized tokens.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span.to_range()).unwrap_or("")
    }
}

/// Byte offsets of line starts.
pub(crate) struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineIndex { starts }
    }

    /// 1-based line and 0-based column of `offset`.
    pub(crate) fn locate(&self, offset: usize) -> (u32, u32) {
        let line = self.starts.partition_point(|&start| start <= offset).max(1) - 1;
        let column = offset - self.starts[line];
        (to_u32(line + 1), to_u32(column))
    }

    /// Indentation width of the line containing `offset`.
    pub(crate) fn indent_width(&self, source: &str, offset: usize) -> u32 {
        let line = self.starts.partition_point(|&start| start <= offset).max(1) - 1;
        source.as_bytes()[self.starts[line]..]
            .iter()
            .map_while(|&b| match b {
                b' ' => Some(1),
                b'\t' => Some(TAB_WIDTH),
                _ => None,
            })
            .sum()
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

struct PendingComment {
    token: Token,
    indent: u32,
}

pub(crate) struct Layout<'src> {
    source: &'src str,
    lines: LineIndex,
    out: Vec<Token>,
    indents: Vec<u32>,
    brackets: Vec<(char, Span)>,
    pending: Vec<PendingComment>,
    blank_lines: u32,
    line_has_code: bool,
    line_has_any: bool,
    at_line_start: bool,
}

impl<'src> Layout<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Layout {
            source,
            lines: LineIndex::new(source),
            out: Vec::new(),
            indents: vec![0],
            brackets: Vec::new(),
            pending: Vec::new(),
            blank_lines: 0,
            line_has_code: false,
            line_has_any: false,
            at_line_start: true,
        }
    }

    fn token(&self, kind: TokenKind, span: Span, flags: TokenFlags) -> Token {
        let (line, column) = self.lines.locate(span.start as usize);
        Token {
            kind,
            span,
            line,
            column,
            blank_lines: 0,
            flags,
        }
    }

    fn emit(&mut self, token: Token) {
        trace!(kind = %token.kind, line = token.line, "token");
        self.out.push(token);
    }

    fn emit_synthetic(&mut self, kind: TokenKind, at: u32) {
        let token = self.token(kind, Span::new(at, at), TokenFlags::SYNTHETIC);
        self.emit(token);
    }

    fn current_flags(&self) -> TokenFlags {
        let mut flags = TokenFlags::empty();
        if self.at_line_start {
            flags |= TokenFlags::LINE_START;
        }
        if !self.brackets.is_empty() {
            flags |= TokenFlags::IN_BRACKETS;
        }
        flags
    }

    pub(crate) fn push(&mut self, raw: RawToken, span: Span) -> Result<(), LexError> {
        match raw {
            RawToken::Newline => self.newline(span),
            RawToken::Comment => self.comment(span),
            _ => self.code(raw.kind(), span)?,
        }
        Ok(())
    }

    fn newline(&mut self, span: Span) {
        if self.brackets.is_empty() {
            if self.line_has_code {
                self.emit_synthetic(TokenKind::Newline, span.start);
                self.line_has_code = false;
            } else if !self.line_has_any {
                self.blank_lines += 1;
            }
        }
        self.at_line_start = true;
        self.line_has_any = false;
    }

    fn comment(&mut self, span: Span) {
        let flags = self.current_flags();
        if !self.at_line_start {
            let token = self.token(TokenKind::Comment, span, flags);
            self.emit(token);
        } else if self.brackets.is_empty() {
            let mut token = self.token(TokenKind::StandaloneComment, span, flags);
            token.blank_lines = std::mem::take(&mut self.blank_lines);
            let indent = self.lines.indent_width(self.source, span.start as usize);
            self.pending.push(PendingComment { token, indent });
        } else {
            let token = self.token(TokenKind::StandaloneComment, span, flags);
            self.emit(token);
        }
        self.line_has_any = true;
        self.at_line_start = false;
    }

    fn code(&mut self, kind: TokenKind, span: Span) -> Result<(), LexError> {
        if self.at_line_start && self.brackets.is_empty() {
            self.indent_to(span)?;
        }
        let mut token = self.token(kind, span, self.current_flags());
        if self.at_line_start && self.brackets.is_empty() {
            token.blank_lines = std::mem::take(&mut self.blank_lines);
        }

        if kind.is_closing_bracket() {
            if self.brackets.pop().is_none() {
                return Err(LexError::UnmatchedBracket {
                    bracket: bracket_char(kind),
                    span,
                });
            }
        } else if kind.is_opening_bracket() {
            self.brackets.push((bracket_char(kind), span));
        }

        self.emit(token);
        self.line_has_code = true;
        self.line_has_any = true;
        self.at_line_start = false;
        Ok(())
    }

    /// Emit the `Indent`/`Dedent` tokens and held-back comments that come
    /// before a code line starting at `span`.
    fn indent_to(&mut self, span: Span) -> Result<(), LexError> {
        let width = self.lines.indent_width(self.source, span.start as usize);
        let top = self.indent();

        if width > top {
            trace!(from = top, to = width, "indent");
            self.emit_synthetic(TokenKind::Indent, span.start);
            self.indents.push(width);
            self.flush_pending(width, span.start);
            return Ok(());
        }

        self.flush_pending(width, span.start);
        if self.indent() != width {
            return Err(LexError::InconsistentDedent {
                found: width,
                expected: self.indent(),
                span,
            });
        }
        Ok(())
    }

    fn indent(&self) -> u32 {
        self.indents.last().copied().unwrap_or(0)
    }

    /// Emit held-back comments, closing blocks deeper than each comment
    /// (and deeper than `target`) first. Leaves the stack at `target` or at
    /// the innermost level below it.
    fn flush_pending(&mut self, target: u32, at: u32) {
        let pending = std::mem::take(&mut self.pending);
        for comment in pending {
            let keep = comment.indent.max(target);
            self.dedent_past(keep, at);
            self.emit(comment.token);
        }
        self.dedent_past(target, at);
    }

    fn dedent_past(&mut self, keep: u32, at: u32) {
        while self.indents.len() > 1 && self.indent() > keep {
            self.indents.pop();
            trace!(to = self.indent(), "dedent");
            self.emit_synthetic(TokenKind::Dedent, at);
        }
    }

    pub(crate) fn finish(mut self) -> Result<Vec<Token>, LexError> {
        if let Some(&(bracket, span)) = self.brackets.first() {
            return Err(LexError::UnclosedBracket { bracket, span });
        }
        let end = u32::try_from(self.source.len()).unwrap_or(u32::MAX);
        if self.line_has_code {
            self.emit_synthetic(TokenKind::Newline, end);
        }
        self.flush_pending(0, end);
        Ok(self.out)
    }
}

fn bracket_char(kind: TokenKind) -> char {
    match kind {
        TokenKind::LPar => '(',
        TokenKind::RPar => ')',
        TokenKind::LSqb => '[',
        TokenKind::RSqb => ']',
        TokenKind::LBrace => '{',
        _ => '}',
    }
}
