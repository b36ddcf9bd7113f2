//! Cypher parser with rich diagnostics.
//!
//! This library turns Cypher query text into a typed syntax tree, reporting
//! lexical and syntax problems as diagnostics built on miette. Every tree node
//! renders back to canonical Cypher through `Display`.
//!
//! # Example
//!
//! ```
//! use cypher_parser::{parse, tokenize, TokenKind};
//!
//! let source = "MATCH (n:Person) WHERE n.age > 18 RETURN n.name";
//!
//! let result = tokenize(source);
//! assert_eq!(result.tokens[0].kind, TokenKind::Match);
//! assert!(result.diagnostics.is_empty());
//!
//! let query = parse(source).unwrap();
//! assert_eq!(
//!     query.to_string(),
//!     "MATCH (n:Person) WHERE (n.age > 18) RETURN n.name"
//! );
//! ```
//!
//! Failed parses carry every diagnostic along with the source text:
//!
//! ```
//! use cypher_parser::parse;
//!
//! let err = parse("MATCH (n) RETURN a < b < c").unwrap_err();
//! assert_eq!(err.diagnostics()[0].code.as_deref(), Some("P004"));
//! ```

pub mod ast;
pub mod diag;
pub mod lexer;
pub mod parser;

pub use ast::{Query, Span};

pub use diag::{Diag, DiagLabel, DiagSeverity, LabelRole, SourceFile};
pub use lexer::token::{Token, TokenCategory, TokenKind};
pub use lexer::{Lexer, LexerResult, tokenize};
pub use parser::{ParseConfig, ParseError, ParseOutcome, Parser, parse, parse_with_config};
