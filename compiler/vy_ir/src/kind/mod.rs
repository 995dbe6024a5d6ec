//! Terminal and rule kinds of the concrete syntax tree.
//!
//! `TokenKind` tags leaves, `NodeKind` tags interior nodes. Both carry the
//! small classification predicates the formatter asks about (brackets,
//! declarations, statement shapes) so that every consumer agrees on them.

use std::fmt;

/// Kind of a leaf (terminal) element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    Name,
    Number,
    String,
    Docstring,
    /// Comment that shares its line with code.
    Comment,
    /// Comment that occupies its own line.
    StandaloneComment,
    /// Version pragma comment, recognized by the line generator.
    Pragma,
    Newline,
    Indent,
    Dedent,

    LPar,
    RPar,
    LSqb,
    RSqb,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Dot,
    Ellipsis,
    At,
    /// `->` introducing a return type.
    Arrow,
    Equal,
    /// `:=` binding a module dependency in `initializes`.
    ColonEqual,
    /// Any augmented assignment operator (`+=`, `**=`, ...).
    AugAssign,

    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash,
    Percent,
    DoubleStar,
    Tilde,
    Amper,
    VBar,
    Circumflex,
    LeftShift,
    RightShift,

    Less,
    Greater,
    EqEqual,
    NotEqual,
    LessEqual,
    GreaterEqual,

    /// Reserved word other than a declaration keyword; the value says which.
    Keyword,
    /// `def`
    FuncDecl,
    /// `event`
    EventDecl,
    /// `enum` or `flag`
    EnumDecl,
    /// `struct`
    StructDecl,
    /// `interface`
    InterfaceDecl,
}

impl TokenKind {
    #[inline]
    pub const fn is_opening_bracket(self) -> bool {
        matches!(self, TokenKind::LPar | TokenKind::LSqb | TokenKind::LBrace)
    }

    #[inline]
    pub const fn is_closing_bracket(self) -> bool {
        matches!(self, TokenKind::RPar | TokenKind::RSqb | TokenKind::RBrace)
    }

    #[inline]
    pub const fn is_bracket(self) -> bool {
        self.is_opening_bracket() || self.is_closing_bracket()
    }

    /// The closing bracket that matches an opening one.
    pub const fn closing_bracket(self) -> Option<TokenKind> {
        match self {
            TokenKind::LPar => Some(TokenKind::RPar),
            TokenKind::LSqb => Some(TokenKind::RSqb),
            TokenKind::LBrace => Some(TokenKind::RBrace),
            _ => None,
        }
    }

    /// Keywords that open a declaration block (`def`, `struct`, ...).
    #[inline]
    pub const fn is_declaration(self) -> bool {
        matches!(
            self,
            TokenKind::FuncDecl
                | TokenKind::EventDecl
                | TokenKind::EnumDecl
                | TokenKind::StructDecl
                | TokenKind::InterfaceDecl
        )
    }

    /// Layout tokens synthesized by the indenter. They never reach a line.
    #[inline]
    pub const fn is_layout(self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent)
    }

    #[inline]
    pub const fn is_comment(self) -> bool {
        matches!(
            self,
            TokenKind::Comment | TokenKind::StandaloneComment | TokenKind::Pragma
        )
    }

    /// Binary arithmetic, bitwise and shift operators.
    #[inline]
    pub const fn is_math_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::DoubleSlash
                | TokenKind::Percent
                | TokenKind::DoubleStar
                | TokenKind::Tilde
                | TokenKind::Amper
                | TokenKind::VBar
                | TokenKind::Circumflex
                | TokenKind::LeftShift
                | TokenKind::RightShift
        )
    }

    #[inline]
    pub const fn is_comparator(self) -> bool {
        matches!(
            self,
            TokenKind::Less
                | TokenKind::Greater
                | TokenKind::EqEqual
                | TokenKind::NotEqual
                | TokenKind::LessEqual
                | TokenKind::GreaterEqual
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Name => "NAME",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Docstring => "DOCSTRING",
            TokenKind::Comment => "COMMENT",
            TokenKind::StandaloneComment => "STANDALONE_COMMENT",
            TokenKind::Pragma => "PRAGMA",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::LPar => "LPAR",
            TokenKind::RPar => "RPAR",
            TokenKind::LSqb => "LSQB",
            TokenKind::RSqb => "RSQB",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Colon => "COLON",
            TokenKind::Dot => "DOT",
            TokenKind::Ellipsis => "ELLIPSIS",
            TokenKind::At => "AT",
            TokenKind::Arrow => "ARROW",
            TokenKind::Equal => "EQUAL",
            TokenKind::ColonEqual => "COLONEQUAL",
            TokenKind::AugAssign => "AUG_ASSIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::DoubleSlash => "DOUBLESLASH",
            TokenKind::Percent => "PERCENT",
            TokenKind::DoubleStar => "DOUBLESTAR",
            TokenKind::Tilde => "TILDE",
            TokenKind::Amper => "AMPER",
            TokenKind::VBar => "VBAR",
            TokenKind::Circumflex => "CIRCUMFLEX",
            TokenKind::LeftShift => "LEFTSHIFT",
            TokenKind::RightShift => "RIGHTSHIFT",
            TokenKind::Less => "LESS",
            TokenKind::Greater => "GREATER",
            TokenKind::EqEqual => "EQEQUAL",
            TokenKind::NotEqual => "NOTEQUAL",
            TokenKind::LessEqual => "LESSEQUAL",
            TokenKind::GreaterEqual => "GREATEREQUAL",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::FuncDecl => "FUNC_DECL",
            TokenKind::EventDecl => "EVENT_DECL",
            TokenKind::EnumDecl => "ENUM_DECL",
            TokenKind::StructDecl => "STRUCT_DECL",
            TokenKind::InterfaceDecl => "INTERFACE_DECL",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of an interior node, one per grammar rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Module,
    /// Indented block, or the single statement after a colon.
    Body,

    FunctionDef,
    Decorators,
    Decorator,
    FunctionSig,
    Parameters,
    Parameter,
    InterfaceDef,
    InterfaceFunction,
    StructDef,
    StructMember,
    EventDef,
    EventMember,
    EnumDef,
    EnumMember,
    ConstantDef,
    ImmutableDef,
    VariableDef,
    ImplementsDef,
    UsesDef,
    InitializesDef,
    ExportsDef,
    Import,

    /// Local variable declaration `x: T = v`.
    Declaration,
    Assign,
    AugAssign,
    ReturnStmt,
    PassStmt,
    BreakStmt,
    ContinueStmt,
    RaiseStmt,
    AssertStmt,
    LogStmt,
    ExprStmt,
    IfStmt,
    /// Condition, colon and body of an `if`/`elif` clause.
    CondExec,
    ForStmt,

    Ternary,
    BoolOp,
    Not,
    Comparison,
    BinOp,
    Power,
    Unary,
    Call,
    ExternalCall,
    Arguments,
    Kwarg,
    Attribute,
    Subscript,
    /// Parenthesized expression or tuple, possibly with invisible parens.
    Atom,
    /// `name := value` inside a subscript.
    NamedExpr,
    /// Adjacent string literals, joined at compile time.
    StringConcat,
    List,
    Dict,
    DictEntry,
    /// Comma separated expressions outside brackets (`a, b = ...`).
    ExprList,
}

impl NodeKind {
    /// Nodes whose children are statements.
    #[inline]
    pub const fn is_body(self) -> bool {
        matches!(self, NodeKind::Module | NodeKind::Body)
    }

    /// Statements without nested statements. Each one starts its own line.
    pub const fn is_simple_statement(self) -> bool {
        matches!(
            self,
            NodeKind::VariableDef
                | NodeKind::ConstantDef
                | NodeKind::ImmutableDef
                | NodeKind::ImplementsDef
                | NodeKind::UsesDef
                | NodeKind::InitializesDef
                | NodeKind::ExportsDef
                | NodeKind::InterfaceDef
                | NodeKind::StructDef
                | NodeKind::EventDef
                | NodeKind::EnumDef
                | NodeKind::StructMember
                | NodeKind::EventMember
                | NodeKind::EnumMember
                | NodeKind::InterfaceFunction
                | NodeKind::Declaration
                | NodeKind::Assign
                | NodeKind::AugAssign
                | NodeKind::ReturnStmt
                | NodeKind::PassStmt
                | NodeKind::BreakStmt
                | NodeKind::ContinueStmt
                | NodeKind::RaiseStmt
                | NodeKind::AssertStmt
                | NodeKind::LogStmt
                | NodeKind::ExprStmt
        )
    }

    /// Statements whose right-hand side follows an assignment sign.
    #[inline]
    pub const fn is_assignment(self) -> bool {
        matches!(
            self,
            NodeKind::Declaration
                | NodeKind::ConstantDef
                | NodeKind::VariableDef
                | NodeKind::Assign
                | NodeKind::AugAssign
        )
    }

    /// Nodes whose opening `(`/`[` hugs the preceding leaf.
    #[inline]
    pub const fn hugs_brackets(self) -> bool {
        matches!(
            self,
            NodeKind::FunctionSig | NodeKind::Call | NodeKind::Subscript | NodeKind::Decorator
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::Module => "module",
            NodeKind::Body => "body",
            NodeKind::FunctionDef => "function_def",
            NodeKind::Decorators => "decorators",
            NodeKind::Decorator => "decorator",
            NodeKind::FunctionSig => "function_sig",
            NodeKind::Parameters => "parameters",
            NodeKind::Parameter => "parameter",
            NodeKind::InterfaceDef => "interface_def",
            NodeKind::InterfaceFunction => "interface_function",
            NodeKind::StructDef => "struct_def",
            NodeKind::StructMember => "struct_member",
            NodeKind::EventDef => "event_def",
            NodeKind::EventMember => "event_member",
            NodeKind::EnumDef => "enum_def",
            NodeKind::EnumMember => "enum_member",
            NodeKind::ConstantDef => "constant_def",
            NodeKind::ImmutableDef => "immutable_def",
            NodeKind::VariableDef => "variable_def",
            NodeKind::ImplementsDef => "implements_def",
            NodeKind::UsesDef => "uses_def",
            NodeKind::InitializesDef => "initializes_def",
            NodeKind::ExportsDef => "exports_def",
            NodeKind::Import => "import",
            NodeKind::Declaration => "declaration",
            NodeKind::Assign => "assign",
            NodeKind::AugAssign => "aug_assign",
            NodeKind::ReturnStmt => "return_stmt",
            NodeKind::PassStmt => "pass_stmt",
            NodeKind::BreakStmt => "break_stmt",
            NodeKind::ContinueStmt => "continue_stmt",
            NodeKind::RaiseStmt => "raise_stmt",
            NodeKind::AssertStmt => "assert_stmt",
            NodeKind::LogStmt => "log_stmt",
            NodeKind::ExprStmt => "expr_stmt",
            NodeKind::IfStmt => "if_stmt",
            NodeKind::CondExec => "cond_exec",
            NodeKind::ForStmt => "for_stmt",
            NodeKind::Ternary => "ternary",
            NodeKind::BoolOp => "bool_op",
            NodeKind::Not => "not",
            NodeKind::Comparison => "comparison",
            NodeKind::BinOp => "bin_op",
            NodeKind::Power => "power",
            NodeKind::Unary => "unary",
            NodeKind::Call => "call",
            NodeKind::ExternalCall => "external_call",
            NodeKind::Arguments => "arguments",
            NodeKind::Kwarg => "kwarg",
            NodeKind::Attribute => "attribute",
            NodeKind::Subscript => "subscript",
            NodeKind::Atom => "atom",
            NodeKind::NamedExpr => "named_expr",
            NodeKind::StringConcat => "string_concat",
            NodeKind::List => "list",
            NodeKind::Dict => "dict",
            NodeKind::DictEntry => "dict_entry",
            NodeKind::ExprList => "expr_list",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
