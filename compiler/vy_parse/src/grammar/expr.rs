//! Expression parsing.
//!
//! Precedence, loosest first: ternary, `or`, `and`, `not`, comparisons
//! (including `in` / `not in`), `|`, `^`, `&`, shifts, `+ -`,
//! `* / // %`, unary `- + ~`, `**`, then calls, subscripts and attribute
//! access. Type annotations are parsed as expressions too.

use vy_ir::{NodeKind, TokenKind};
use vy_stack::ensure_sufficient_stack;

use crate::{ParseError, ParserState};

/// Operator tokens of one binary precedence level.
const BINARY_LEVELS: &[&[TokenKind]] = &[
    &[TokenKind::VBar],
    &[TokenKind::Circumflex],
    &[TokenKind::Amper],
    &[TokenKind::LeftShift, TokenKind::RightShift],
    &[TokenKind::Plus, TokenKind::Minus],
    &[
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::DoubleSlash,
        TokenKind::Percent,
    ],
];

impl ParserState<'_> {
    /// A single expression.
    pub(crate) fn expression(&mut self) -> Result<(), ParseError> {
        ensure_sufficient_stack(|| self.ternary())
    }

    /// One or more comma separated expressions. More than one (or a
    /// trailing comma) makes an `ExprList`.
    pub(crate) fn expression_list(&mut self) -> Result<(), ParseError> {
        let start = self.builder.checkpoint();
        self.expression()?;
        if !self.check(TokenKind::Comma) {
            return Ok(());
        }
        self.builder.start_node_at(start, NodeKind::ExprList);
        while self.check(TokenKind::Comma) {
            self.bump();
            if !self.at_expression_start() {
                break;
            }
            self.expression()?;
        }
        self.builder.finish_node();
        Ok(())
    }

    /// True if the current token can begin an expression.
    pub(crate) fn at_expression_start(&self) -> bool {
        match self.current_kind() {
            Some(TokenKind::Name) => !self.at_hard_keyword(),
            Some(
                TokenKind::Number
                | TokenKind::String
                | TokenKind::LPar
                | TokenKind::LSqb
                | TokenKind::LBrace
                | TokenKind::Minus
                | TokenKind::Plus
                | TokenKind::Tilde
                | TokenKind::Ellipsis,
            ) => true,
            _ => false,
        }
    }

    fn ternary(&mut self) -> Result<(), ParseError> {
        let start = self.builder.checkpoint();
        self.or_test()?;
        if self.check_word("if") {
            self.builder.start_node_at(start, NodeKind::Ternary);
            self.bump_keyword();
            self.or_test()?;
            self.expect_keyword("else")?;
            self.expression()?;
            self.builder.finish_node();
        }
        Ok(())
    }

    fn or_test(&mut self) -> Result<(), ParseError> {
        self.bool_chain("or", Self::and_test)
    }

    fn and_test(&mut self) -> Result<(), ParseError> {
        self.bool_chain("and", Self::not_test)
    }

    /// A flat `BoolOp` for `a op b op c`.
    fn bool_chain(
        &mut self,
        word: &str,
        operand: fn(&mut Self) -> Result<(), ParseError>,
    ) -> Result<(), ParseError> {
        let start = self.builder.checkpoint();
        operand(self)?;
        if !self.check_word(word) {
            return Ok(());
        }
        self.builder.start_node_at(start, NodeKind::BoolOp);
        while self.check_word(word) {
            self.bump_keyword();
            operand(self)?;
        }
        self.builder.finish_node();
        Ok(())
    }

    fn not_test(&mut self) -> Result<(), ParseError> {
        if !self.check_word("not") {
            return self.comparison();
        }
        self.builder.start_node(NodeKind::Not);
        self.bump_keyword();
        ensure_sufficient_stack(|| self.not_test())?;
        self.builder.finish_node();
        Ok(())
    }

    fn at_comparison_operator(&self) -> bool {
        self.current_kind().is_some_and(TokenKind::is_comparator)
            || self.check_word("in")
            || (self.check_word("not") && self.peek_word(1, "in"))
    }

    fn comparison(&mut self) -> Result<(), ParseError> {
        let start = self.builder.checkpoint();
        self.binary(0)?;
        if !self.at_comparison_operator() {
            return Ok(());
        }
        self.builder.start_node_at(start, NodeKind::Comparison);
        while self.at_comparison_operator() {
            if self.check(TokenKind::Name) {
                if self.check_word("not") {
                    self.bump_keyword();
                }
                self.bump_keyword();
            } else {
                self.bump();
            }
            self.binary(0)?;
        }
        self.builder.finish_node();
        Ok(())
    }

    /// Left associative binary operators from `BINARY_LEVELS[level]` down.
    fn binary(&mut self, level: usize) -> Result<(), ParseError> {
        let Some(operators) = BINARY_LEVELS.get(level) else {
            return self.factor();
        };
        let start = self.builder.checkpoint();
        self.binary(level + 1)?;
        while self
            .current_kind()
            .is_some_and(|kind| operators.contains(&kind))
        {
            self.builder.start_node_at(start, NodeKind::BinOp);
            self.bump();
            self.binary(level + 1)?;
            self.builder.finish_node();
        }
        Ok(())
    }

    fn factor(&mut self) -> Result<(), ParseError> {
        if matches!(
            self.current_kind(),
            Some(TokenKind::Minus | TokenKind::Plus | TokenKind::Tilde)
        ) {
            self.builder.start_node(NodeKind::Unary);
            self.bump();
            ensure_sufficient_stack(|| self.factor())?;
            self.builder.finish_node();
            return Ok(());
        }
        self.power()
    }

    fn power(&mut self) -> Result<(), ParseError> {
        let start = self.builder.checkpoint();
        self.primary()?;
        if self.check(TokenKind::DoubleStar) {
            self.builder.start_node_at(start, NodeKind::Power);
            self.bump();
            self.factor()?;
            self.builder.finish_node();
        }
        Ok(())
    }

    /// An atom followed by calls, subscripts and attribute accesses.
    pub(crate) fn primary(&mut self) -> Result<(), ParseError> {
        let start = self.builder.checkpoint();
        self.atom()?;
        loop {
            match self.current_kind() {
                Some(TokenKind::LPar) => {
                    self.builder.start_node_at(start, NodeKind::Call);
                    self.bump();
                    if !self.check(TokenKind::RPar) {
                        self.arguments()?;
                    }
                    self.expect(TokenKind::RPar)?;
                }
                Some(TokenKind::LSqb) => {
                    self.builder.start_node_at(start, NodeKind::Subscript);
                    self.bump();
                    self.subscript_items()?;
                    self.expect(TokenKind::RSqb)?;
                }
                Some(TokenKind::Dot) => {
                    self.builder.start_node_at(start, NodeKind::Attribute);
                    self.bump();
                    self.expect_name()?;
                }
                _ => return Ok(()),
            }
            self.builder.finish_node();
        }
    }

    /// Subscript contents: an expression list whose items may also be
    /// `name := value` bindings, as in `initializes: lib[dep := dep]`.
    fn subscript_items(&mut self) -> Result<(), ParseError> {
        let start = self.builder.checkpoint();
        self.subscript_item()?;
        if !self.check(TokenKind::Comma) {
            return Ok(());
        }
        self.builder.start_node_at(start, NodeKind::ExprList);
        while self.check(TokenKind::Comma) {
            self.bump();
            if !self.at_expression_start() {
                break;
            }
            self.subscript_item()?;
        }
        self.builder.finish_node();
        Ok(())
    }

    fn subscript_item(&mut self) -> Result<(), ParseError> {
        if !(self.check(TokenKind::Name) && self.peek_kind(1) == Some(TokenKind::ColonEqual)) {
            return self.expression();
        }
        self.builder.start_node(NodeKind::NamedExpr);
        self.expect_name()?;
        self.bump();
        self.expression()?;
        self.builder.finish_node();
        Ok(())
    }

    /// Call arguments, positional and `name=value`.
    pub(crate) fn arguments(&mut self) -> Result<(), ParseError> {
        self.builder.start_node(NodeKind::Arguments);
        loop {
            if self.check(TokenKind::Name) && self.peek_kind(1) == Some(TokenKind::Equal) {
                self.builder.start_node(NodeKind::Kwarg);
                self.bump();
                self.bump();
                self.expression()?;
                self.builder.finish_node();
            } else {
                self.expression()?;
            }
            if !self.check(TokenKind::Comma) {
                break;
            }
            self.bump();
            if self.check(TokenKind::RPar) {
                break;
            }
        }
        self.builder.finish_node();
        Ok(())
    }

    fn atom(&mut self) -> Result<(), ParseError> {
        match self.current_kind() {
            Some(TokenKind::Name) if self.check_word("extcall") || self.check_word("staticcall") => {
                self.builder.start_node(NodeKind::ExternalCall);
                self.bump_keyword();
                self.primary()?;
                self.builder.finish_node();
                Ok(())
            }
            Some(TokenKind::Name) if !self.at_hard_keyword() => {
                self.bump();
                Ok(())
            }
            Some(TokenKind::String) => {
                self.strings();
                Ok(())
            }
            Some(TokenKind::Number | TokenKind::Ellipsis) => {
                self.bump();
                Ok(())
            }
            Some(TokenKind::LPar) => self.parenthesized(),
            Some(TokenKind::LSqb) => self.list(),
            Some(TokenKind::LBrace) => self.dict(),
            _ => Err(self.unexpected("an expression")),
        }
    }

    /// One string literal, or a `StringConcat` of adjacent ones.
    fn strings(&mut self) {
        let start = self.builder.checkpoint();
        self.bump();
        if !self.check(TokenKind::String) {
            return;
        }
        self.builder.start_node_at(start, NodeKind::StringConcat);
        while self.check(TokenKind::String) {
            self.bump();
        }
        self.builder.finish_node();
    }

    /// `()`, `(expr)` or `(a, b, ...)`.
    fn parenthesized(&mut self) -> Result<(), ParseError> {
        self.builder.start_node(NodeKind::Atom);
        self.bump();
        if !self.check(TokenKind::RPar) {
            self.expression_list()?;
        }
        self.expect(TokenKind::RPar)?;
        self.builder.finish_node();
        Ok(())
    }

    fn list(&mut self) -> Result<(), ParseError> {
        self.builder.start_node(NodeKind::List);
        self.bump();
        if !self.check(TokenKind::RSqb) {
            self.expression_list()?;
        }
        self.expect(TokenKind::RSqb)?;
        self.builder.finish_node();
        Ok(())
    }

    /// `{key: value, ...}`, used for struct literals.
    fn dict(&mut self) -> Result<(), ParseError> {
        self.builder.start_node(NodeKind::Dict);
        self.bump();
        while !self.check(TokenKind::RBrace) {
            self.builder.start_node(NodeKind::DictEntry);
            self.expression()?;
            self.expect(TokenKind::Colon)?;
            self.expression()?;
            self.builder.finish_node();
            if !self.check(TokenKind::Comma) {
                break;
            }
            self.bump();
        }
        self.expect(TokenKind::RBrace)?;
        self.builder.finish_node();
        Ok(())
    }
}
