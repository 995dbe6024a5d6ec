//! Blocks and statements.

use vy_ir::{NodeKind, TokenKind};

use crate::{ParseError, ParserState};

/// What a block may contain besides `pass` and docstrings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum BodyContent {
    Statements,
    StructMembers,
    EventMembers,
    EnumMembers,
    InterfaceFunctions,
}

impl ParserState<'_> {
    /// The block after a colon: an indented suite, or a single statement on
    /// the same line.
    pub(crate) fn body(&mut self, content: BodyContent) -> Result<(), ParseError> {
        self.builder.start_node(NodeKind::Body);
        if self.check(TokenKind::Newline) {
            self.bump();
            self.eat_comments();
            self.expect(TokenKind::Indent)?;
            loop {
                self.eat_comments();
                match self.current_kind() {
                    None => break,
                    Some(TokenKind::Dedent) => {
                        self.bump();
                        break;
                    }
                    Some(_) => self.body_item(content)?,
                }
            }
        } else {
            self.line_of(|p| p.simple_statement(content))?;
        }
        self.builder.finish_node();
        Ok(())
    }

    fn body_item(&mut self, content: BodyContent) -> Result<(), ParseError> {
        match content {
            BodyContent::Statements => self.statement(),
            _ => self.line_of(|p| p.simple_statement(content)),
        }
    }

    /// A compound or simple statement inside a function body.
    pub(crate) fn statement(&mut self) -> Result<(), ParseError> {
        if self.check_word("if") {
            return self.if_stmt();
        }
        if self.check_word("for") {
            return self.for_stmt();
        }
        self.line_of(|p| p.simple_statement(BodyContent::Statements))
    }

    /// `if cond: body (elif cond: body)* [else: body]`
    fn if_stmt(&mut self) -> Result<(), ParseError> {
        self.builder.start_node(NodeKind::IfStmt);
        self.bump_keyword();
        self.cond_exec()?;
        while self.check_word("elif") {
            self.bump_keyword();
            self.cond_exec()?;
        }
        if self.check_word("else") {
            self.bump_keyword();
            self.expect(TokenKind::Colon)?;
            self.body(BodyContent::Statements)?;
        }
        self.builder.finish_node();
        Ok(())
    }

    fn cond_exec(&mut self) -> Result<(), ParseError> {
        self.builder.start_node(NodeKind::CondExec);
        self.expression()?;
        self.expect(TokenKind::Colon)?;
        self.body(BodyContent::Statements)?;
        self.builder.finish_node();
        Ok(())
    }

    /// `for name [: type] in iterable: body`
    fn for_stmt(&mut self) -> Result<(), ParseError> {
        self.builder.start_node(NodeKind::ForStmt);
        self.bump_keyword();
        self.expect_name()?;
        if self.check(TokenKind::Colon) {
            self.bump();
            // A full expression here would swallow `in` as a comparison.
            self.primary()?;
        }
        self.expect_keyword("in")?;
        self.expression()?;
        self.expect(TokenKind::Colon)?;
        self.body(BodyContent::Statements)?;
        self.builder.finish_node();
        Ok(())
    }

    /// A statement that fits on one logical line, without its newline.
    pub(crate) fn simple_statement(&mut self, content: BodyContent) -> Result<(), ParseError> {
        if self.check(TokenKind::String) && self.peek_kind(1) == Some(TokenKind::Newline) {
            self.builder.start_node(NodeKind::ExprStmt);
            self.bump_docstring();
            self.builder.finish_node();
            return Ok(());
        }
        if self.check_word("pass") {
            return self.keyword_statement(NodeKind::PassStmt);
        }
        match content {
            BodyContent::Statements => self.function_statement(),
            BodyContent::StructMembers => self.member(NodeKind::StructMember),
            BodyContent::EventMembers => self.member(NodeKind::EventMember),
            BodyContent::EnumMembers => {
                self.builder.start_node(NodeKind::EnumMember);
                self.expect_name()?;
                self.builder.finish_node();
                Ok(())
            }
            BodyContent::InterfaceFunctions => {
                self.builder.start_node(NodeKind::InterfaceFunction);
                self.function_sig()?;
                self.expect_name()?;
                self.builder.finish_node();
                Ok(())
            }
        }
    }

    fn keyword_statement(&mut self, kind: NodeKind) -> Result<(), ParseError> {
        self.builder.start_node(kind);
        self.bump_keyword();
        self.builder.finish_node();
        Ok(())
    }

    /// `name: type` inside a struct or event.
    fn member(&mut self, kind: NodeKind) -> Result<(), ParseError> {
        self.builder.start_node(kind);
        self.expect_name()?;
        self.expect(TokenKind::Colon)?;
        self.expression()?;
        self.builder.finish_node();
        Ok(())
    }

    fn function_statement(&mut self) -> Result<(), ParseError> {
        let word = if self.check(TokenKind::Name) {
            self.current_text()
        } else {
            ""
        };
        match word {
            "break" => return self.keyword_statement(NodeKind::BreakStmt),
            "continue" => return self.keyword_statement(NodeKind::ContinueStmt),
            "return" => return self.optional_operand(NodeKind::ReturnStmt, true),
            "raise" => return self.optional_operand(NodeKind::RaiseStmt, false),
            "assert" => return self.assert_stmt(),
            "log" => {
                self.builder.start_node(NodeKind::LogStmt);
                self.bump_keyword();
                self.expression()?;
                self.builder.finish_node();
                return Ok(());
            }
            _ => {}
        }

        if self.check(TokenKind::Name)
            && !self.at_hard_keyword()
            && self.peek_kind(1) == Some(TokenKind::Colon)
        {
            self.builder.start_node(NodeKind::Declaration);
            self.bump();
            self.bump();
            self.expression()?;
            if self.check(TokenKind::Equal) {
                self.bump();
                self.expression()?;
            }
            self.builder.finish_node();
            return Ok(());
        }

        let start = self.builder.checkpoint();
        self.expression_list()?;
        let kind = match self.current_kind() {
            Some(TokenKind::Equal) => NodeKind::Assign,
            Some(TokenKind::AugAssign) => NodeKind::AugAssign,
            _ => NodeKind::ExprStmt,
        };
        self.builder.start_node_at(start, kind);
        if kind != NodeKind::ExprStmt {
            self.bump();
            self.expression_list()?;
        }
        self.builder.finish_node();
        Ok(())
    }

    /// `return [values]` and `raise [reason]`.
    fn optional_operand(&mut self, kind: NodeKind, list: bool) -> Result<(), ParseError> {
        self.builder.start_node(kind);
        self.bump_keyword();
        if self.at_expression_start() {
            if list {
                self.expression_list()?;
            } else {
                self.expression()?;
            }
        }
        self.builder.finish_node();
        Ok(())
    }

    /// `assert test [, message]`
    fn assert_stmt(&mut self) -> Result<(), ParseError> {
        self.builder.start_node(NodeKind::AssertStmt);
        self.bump_keyword();
        self.expression()?;
        if self.check(TokenKind::Comma) {
            self.bump();
            self.expression()?;
        }
        self.builder.finish_node();
        Ok(())
    }
}
