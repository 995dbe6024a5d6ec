//! Module-level declarations.

use vy_ir::{NodeKind, TokenKind};

use crate::grammar::stmt::BodyContent;
use crate::{ParseError, ParserState};

impl ParserState<'_> {
    /// Parse the whole token stream into a `Module` node.
    pub(crate) fn module(&mut self) -> Result<(), ParseError> {
        self.builder.start_node(NodeKind::Module);
        loop {
            self.eat_comments();
            match self.current_kind() {
                None => break,
                Some(TokenKind::Indent) => return Err(self.unexpected("a declaration")),
                Some(_) => self.item()?,
            }
        }
        self.builder.finish_node();
        Ok(())
    }

    fn item(&mut self) -> Result<(), ParseError> {
        if self.check(TokenKind::At) || self.check_word("def") {
            return self.function_def();
        }
        if self.check(TokenKind::Name) && self.peek_kind(1) == Some(TokenKind::Name) {
            let block = match self.current_text() {
                "struct" => Some((NodeKind::StructDef, BodyContent::StructMembers)),
                "event" => Some((NodeKind::EventDef, BodyContent::EventMembers)),
                "enum" | "flag" => Some((NodeKind::EnumDef, BodyContent::EnumMembers)),
                "interface" => Some((NodeKind::InterfaceDef, BodyContent::InterfaceFunctions)),
                _ => None,
            };
            if let Some((kind, content)) = block {
                return self.declaration_block(kind, content);
            }
        }
        if self.check_word("import") || self.check_word("from") {
            return self.line_of(Self::import);
        }
        if self.check(TokenKind::Name) && self.peek_kind(1) == Some(TokenKind::Colon) {
            let directive = match self.current_text() {
                "implements" => Some(NodeKind::ImplementsDef),
                "uses" => Some(NodeKind::UsesDef),
                "initializes" => Some(NodeKind::InitializesDef),
                "exports" => Some(NodeKind::ExportsDef),
                _ => None,
            };
            return match directive {
                Some(kind) => self.line_of(|p| p.directive(kind)),
                None => self.line_of(Self::variable_def),
            };
        }
        self.statement()
    }

    /// Run `production`, then consume the end of line as a sibling.
    pub(crate) fn line_of(
        &mut self,
        production: impl FnOnce(&mut Self) -> Result<(), ParseError>,
    ) -> Result<(), ParseError> {
        production(self)?;
        self.expect(TokenKind::Newline)
    }

    /// `[decorators] def name(params) [-> type]: body`
    fn function_def(&mut self) -> Result<(), ParseError> {
        self.builder.start_node(NodeKind::FunctionDef);
        if self.check(TokenKind::At) {
            self.builder.start_node(NodeKind::Decorators);
            while self.check(TokenKind::At) {
                self.decorator()?;
                self.expect(TokenKind::Newline)?;
                self.eat_comments();
            }
            self.builder.finish_node();
        }
        self.function_sig()?;
        self.body(BodyContent::Statements)?;
        self.builder.finish_node();
        Ok(())
    }

    /// `@name[.name]*[(args)]`, kept flat so no spaces are put inside it.
    fn decorator(&mut self) -> Result<(), ParseError> {
        self.builder.start_node(NodeKind::Decorator);
        self.expect(TokenKind::At)?;
        self.expect_name()?;
        while self.check(TokenKind::Dot) {
            self.bump();
            self.expect_name()?;
        }
        if self.check(TokenKind::LPar) {
            self.bump();
            if !self.check(TokenKind::RPar) {
                self.arguments()?;
            }
            self.expect(TokenKind::RPar)?;
        }
        self.builder.finish_node();
        Ok(())
    }

    pub(crate) fn function_sig(&mut self) -> Result<(), ParseError> {
        self.builder.start_node(NodeKind::FunctionSig);
        self.expect_keyword("def")?;
        self.expect_name()?;
        self.expect(TokenKind::LPar)?;
        if !self.check(TokenKind::RPar) {
            self.parameters()?;
        }
        self.expect(TokenKind::RPar)?;
        if self.check(TokenKind::Arrow) {
            self.bump();
            self.expression()?;
        }
        self.expect(TokenKind::Colon)?;
        self.builder.finish_node();
        Ok(())
    }

    fn parameters(&mut self) -> Result<(), ParseError> {
        self.builder.start_node(NodeKind::Parameters);
        loop {
            self.builder.start_node(NodeKind::Parameter);
            self.expect_name()?;
            if self.check(TokenKind::Colon) {
                self.bump();
                self.expression()?;
            }
            if self.check(TokenKind::Equal) {
                self.bump();
                self.expression()?;
            }
            self.builder.finish_node();

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

    /// `struct`/`event`/`enum`/`flag`/`interface` with its member block.
    fn declaration_block(&mut self, kind: NodeKind, content: BodyContent) -> Result<(), ParseError> {
        self.builder.start_node(kind);
        self.bump_keyword();
        self.expect_name()?;
        self.expect(TokenKind::Colon)?;
        self.body(content)?;
        self.builder.finish_node();
        Ok(())
    }

    /// `name: type [= value]` at module level.
    ///
    /// The kind depends on the type wrapper: `constant(...)` and
    /// `immutable(...)` get their own nodes.
    fn variable_def(&mut self) -> Result<(), ParseError> {
        let wrapped =
            |word: &str| self.peek_word(2, word) && self.peek_kind(3) == Some(TokenKind::LPar);
        let kind = if wrapped("constant") {
            NodeKind::ConstantDef
        } else if wrapped("immutable") {
            NodeKind::ImmutableDef
        } else {
            NodeKind::VariableDef
        };
        self.builder.start_node(kind);
        self.expect_name()?;
        self.expect(TokenKind::Colon)?;
        self.expression()?;
        if self.check(TokenKind::Equal) {
            self.bump();
            self.expression()?;
        }
        self.builder.finish_node();
        Ok(())
    }

    /// `implements: I`, `uses: lib`, `initializes: lib`, `exports: ...`
    fn directive(&mut self, kind: NodeKind) -> Result<(), ParseError> {
        self.builder.start_node(kind);
        self.bump_keyword();
        self.expect(TokenKind::Colon)?;
        self.expression_list()?;
        self.builder.finish_node();
        Ok(())
    }

    /// `import a.b [as c]` or `from [.]*a import b [as c], ...`.
    ///
    /// Imports stay flat: every name, dot and bracket is a direct child.
    fn import(&mut self) -> Result<(), ParseError> {
        self.builder.start_node(NodeKind::Import);
        if self.check_word("import") {
            self.bump_keyword();
            self.dotted_name()?;
            self.import_alias()?;
        } else {
            self.expect_keyword("from")?;
            let mut relative = false;
            while self.check(TokenKind::Dot) || self.check(TokenKind::Ellipsis) {
                self.bump();
                relative = true;
            }
            if !relative || !self.check_word("import") {
                self.dotted_name()?;
            }
            self.expect_keyword("import")?;
            if self.check(TokenKind::Star) {
                self.bump();
            } else if self.check(TokenKind::LPar) {
                self.bump();
                self.import_names(true)?;
                self.expect(TokenKind::RPar)?;
            } else {
                self.import_names(false)?;
            }
        }
        self.builder.finish_node();
        Ok(())
    }

    fn dotted_name(&mut self) -> Result<(), ParseError> {
        self.expect_name()?;
        while self.check(TokenKind::Dot) {
            self.bump();
            self.expect_name()?;
        }
        Ok(())
    }

    fn import_alias(&mut self) -> Result<(), ParseError> {
        if self.check_word("as") {
            self.bump_keyword();
            self.expect_name()?;
        }
        Ok(())
    }

    fn import_names(&mut self, parenthesized: bool) -> Result<(), ParseError> {
        loop {
            self.expect_name()?;
            self.import_alias()?;
            if !self.check(TokenKind::Comma) {
                return Ok(());
            }
            self.bump();
            if parenthesized && self.check(TokenKind::RPar) {
                return Ok(());
            }
        }
    }
}
