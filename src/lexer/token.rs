//! Token types and representations for Cypher lexical analysis.

use crate::ast::Span;
use smol_str::SmolStr;
use std::fmt;

/// The kind of a lexical token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Clause keywords
    Match,
    Optional,
    Mandatory,
    Create,
    Merge,
    Set,
    Delete,
    Detach,
    Remove,
    With,
    Unwind,
    Return,
    Union,
    Call,
    Yield,
    Where,
    Order,
    By,
    Skip,
    Limit,
    On,
    Cypher,

    // Modifiers
    Asc,
    Ascending,
    Desc,
    Descending,
    Distinct,
    As,
    All,

    // CASE
    Case,
    When,
    Then,
    Else,
    End,

    // Logical and predicate keywords
    And,
    Or,
    Xor,
    Not,
    In,
    Is,
    Contains,
    Starts,
    Ends,
    Exists,

    // Literal keywords
    True,
    False,
    Null,

    // Reserved for schema commands
    Add,
    Constraint,
    Do,
    Drop,
    For,
    Of,
    Require,
    Scalar,
    Unique,

    // Multi-word operators
    StartsWith,
    EndsWith,
    IsNull,
    IsNotNull,

    // Values
    Identifier(SmolStr),
    StringLiteral(SmolStr),
    IntegerLiteral(SmolStr),
    FloatLiteral(SmolStr),
    Parameter(SmolStr),

    // Operators
    Plus,     // +
    PlusEq,   // +=
    Minus,    // -
    Arrow,    // ->
    Star,     // *
    Slash,    // /
    Percent,  // %
    Caret,    // ^
    Eq,       // =
    NotEq,    // <>
    Lt,       // <
    LtEq,     // <=
    Gt,       // >
    GtEq,     // >=
    Pipe,     // |
    DotDot,   // ..

    // Punctuation
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }
    Colon,    // :
    Comma,    // ,
    Dot,      // .

    Eof,
}

/// Coarse classification of a token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Literal,
    Identifier,
    Keyword,
    Operator,
    Punctuation,
    Eof,
}

impl TokenKind {
    /// Returns the coarse category of this token kind.
    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::Identifier(_) | TokenKind::Parameter(_) => TokenCategory::Identifier,
            TokenKind::StringLiteral(_)
            | TokenKind::IntegerLiteral(_)
            | TokenKind::FloatLiteral(_) => TokenCategory::Literal,
            TokenKind::StartsWith
            | TokenKind::EndsWith
            | TokenKind::IsNull
            | TokenKind::IsNotNull
            | TokenKind::Plus
            | TokenKind::PlusEq
            | TokenKind::Minus
            | TokenKind::Arrow
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Percent
            | TokenKind::Caret
            | TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Gt
            | TokenKind::GtEq
            | TokenKind::Pipe
            | TokenKind::DotDot => TokenCategory::Operator,
            TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::LBracket
            | TokenKind::RBracket
            | TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::Colon
            | TokenKind::Comma
            | TokenKind::Dot => TokenCategory::Punctuation,
            TokenKind::Eof => TokenCategory::Eof,
            _ => TokenCategory::Keyword,
        }
    }

    /// Returns true if this token kind is a reserved word.
    pub fn is_keyword(&self) -> bool {
        self.category() == TokenCategory::Keyword
    }

    /// Returns true if this token kind is a literal value.
    ///
    /// `TRUE`, `FALSE` and `NULL` are keywords that denote literals, so they
    /// count here as well.
    pub fn is_literal(&self) -> bool {
        self.category() == TokenCategory::Literal
            || matches!(self, TokenKind::True | TokenKind::False | TokenKind::Null)
    }

    /// Returns true if this token kind is an operator.
    pub fn is_operator(&self) -> bool {
        self.category() == TokenCategory::Operator
    }

    /// Returns true for keywords that start a clause.
    pub fn starts_clause(&self) -> bool {
        matches!(
            self,
            TokenKind::Match
                | TokenKind::Optional
                | TokenKind::Mandatory
                | TokenKind::Create
                | TokenKind::Merge
                | TokenKind::Set
                | TokenKind::Delete
                | TokenKind::Detach
                | TokenKind::Remove
                | TokenKind::With
                | TokenKind::Unwind
                | TokenKind::Return
                | TokenKind::Call
                | TokenKind::Order
                | TokenKind::Skip
                | TokenKind::Limit
                | TokenKind::Union
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Match => "MATCH",
            TokenKind::Optional => "OPTIONAL",
            TokenKind::Mandatory => "MANDATORY",
            TokenKind::Create => "CREATE",
            TokenKind::Merge => "MERGE",
            TokenKind::Set => "SET",
            TokenKind::Delete => "DELETE",
            TokenKind::Detach => "DETACH",
            TokenKind::Remove => "REMOVE",
            TokenKind::With => "WITH",
            TokenKind::Unwind => "UNWIND",
            TokenKind::Return => "RETURN",
            TokenKind::Union => "UNION",
            TokenKind::Call => "CALL",
            TokenKind::Yield => "YIELD",
            TokenKind::Where => "WHERE",
            TokenKind::Order => "ORDER",
            TokenKind::By => "BY",
            TokenKind::Skip => "SKIP",
            TokenKind::Limit => "LIMIT",
            TokenKind::On => "ON",
            TokenKind::Cypher => "CYPHER",
            TokenKind::Asc => "ASC",
            TokenKind::Ascending => "ASCENDING",
            TokenKind::Desc => "DESC",
            TokenKind::Descending => "DESCENDING",
            TokenKind::Distinct => "DISTINCT",
            TokenKind::As => "AS",
            TokenKind::All => "ALL",
            TokenKind::Case => "CASE",
            TokenKind::When => "WHEN",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::End => "END",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Xor => "XOR",
            TokenKind::Not => "NOT",
            TokenKind::In => "IN",
            TokenKind::Is => "IS",
            TokenKind::Contains => "CONTAINS",
            TokenKind::Starts => "STARTS",
            TokenKind::Ends => "ENDS",
            TokenKind::Exists => "EXISTS",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Null => "NULL",
            TokenKind::Add => "ADD",
            TokenKind::Constraint => "CONSTRAINT",
            TokenKind::Do => "DO",
            TokenKind::Drop => "DROP",
            TokenKind::For => "FOR",
            TokenKind::Of => "OF",
            TokenKind::Require => "REQUIRE",
            TokenKind::Scalar => "SCALAR",
            TokenKind::Unique => "UNIQUE",
            TokenKind::StartsWith => "STARTS WITH",
            TokenKind::EndsWith => "ENDS WITH",
            TokenKind::IsNull => "IS NULL",
            TokenKind::IsNotNull => "IS NOT NULL",
            TokenKind::Identifier(name) => return write!(f, "{name}"),
            TokenKind::StringLiteral(value) => return write!(f, "'{value}'"),
            TokenKind::IntegerLiteral(text) | TokenKind::FloatLiteral(text) => {
                return write!(f, "{text}");
            }
            TokenKind::Parameter(name) => return write!(f, "${name}"),
            TokenKind::Plus => "+",
            TokenKind::PlusEq => "+=",
            TokenKind::Minus => "-",
            TokenKind::Arrow => "->",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Caret => "^",
            TokenKind::Eq => "=",
            TokenKind::NotEq => "<>",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Pipe => "|",
            TokenKind::DotDot => "..",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// A lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token, carrying the value for identifiers and literals.
    pub kind: TokenKind,
    /// The byte span in source text.
    pub span: Span,
    /// The 1-based line the token starts on.
    pub line: usize,
    /// The raw source lexeme.
    pub text: SmolStr,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, span: Span, line: usize, text: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            span,
            line,
            text: text.into(),
        }
    }

    /// Returns the lexeme to show in diagnostics.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.text),
        }
    }
}
