//! Parser infrastructure for Cypher queries.
//!
//! The parser consumes the token stream produced by the lexer and builds a
//! [`Query`]. Clauses and patterns are parsed by recursive descent; operator
//! expressions go through a shift-reduce engine driven by the table in
//! [`precedence`].

mod base;
mod expression;
mod patterns;
pub mod precedence;
mod query;
mod recovery;

use std::fmt;

use crate::ast::{Query, Span};
use crate::diag::{
    BuiltDiagnostic, Diag, EXPECTED_TOKEN, NESTING_TOO_DEEP, SourceFile,
    UNEXPECTED_TOKEN, build_diagnostic, convert_diagnostics_to_reports,
};
use crate::lexer::token::{Token, TokenKind};
use crate::lexer::{LexerResult, tokenize};
use base::{ParseResult, TokenStream, symbolic_name};
use miette::Report;
use smol_str::SmolStr;
use tracing::debug;

/// Parser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Maximum expression nesting before the parse is abandoned.
    pub max_depth: usize,
    /// Replace malformed expressions with [`Expression::Error`] and keep
    /// going, instead of aborting on the first one.
    ///
    /// [`Expression::Error`]: crate::ast::Expression::Error
    pub recover_expressions: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_depth: 256,
            recover_expressions: true,
        }
    }
}

impl ParseConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_expression_recovery(mut self, enabled: bool) -> Self {
        self.recover_expressions = enabled;
        self
    }
}

/// Everything a parse produced: the tree (if the parse reached the end) and
/// all lexical and syntax diagnostics in the order they were found.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    /// `None` when a syntax error aborted the parse.
    pub ast: Option<Query>,
    pub diagnostics: Vec<Diag>,
}

impl ParseOutcome {
    /// Returns true if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diag::is_error)
    }

    /// Converts into a `Result`, failing on any error diagnostic even when a
    /// tree was built.
    pub fn into_result(self, source: SourceFile) -> Result<Query, ParseError> {
        let has_errors = self.has_errors();
        match self.ast {
            Some(query) if !has_errors => Ok(query),
            _ => Err(ParseError::new(self.diagnostics, source)),
        }
    }
}

/// Cypher parser entry point.
///
/// ```
/// use cypher_parser::{ParseConfig, Parser};
///
/// let outcome = Parser::new("MATCH (n) RETURN n")
///     .with_config(ParseConfig::default().with_max_depth(64))
///     .parse();
/// assert!(outcome.ast.is_some());
/// assert!(outcome.diagnostics.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    source: &'source str,
    config: ParseConfig,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            config: ParseConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ParseConfig) -> Self {
        self.config = config;
        self
    }

    /// Tokenizes and parses the source text.
    pub fn parse(self) -> ParseOutcome {
        debug!(bytes = self.source.len(), "parsing query");
        let LexerResult {
            tokens,
            mut diagnostics,
        } = tokenize(self.source);

        let mut parser = QueryParser::new(&tokens, &self.config);
        let ast = match parser.parse_query() {
            Ok(query) => Some(query),
            Err(diag) => {
                parser.diagnostics.push(*diag);
                None
            }
        };
        diagnostics.append(&mut parser.diagnostics);

        debug!(
            complete = ast.is_some(),
            diagnostics = diagnostics.len(),
            "parse finished"
        );
        ParseOutcome { ast, diagnostics }
    }
}

/// Parses a query with the default configuration.
pub fn parse(query: &str) -> Result<Query, ParseError> {
    parse_with_config(query, &ParseConfig::default())
}

/// Parses a query with an explicit configuration.
pub fn parse_with_config(query: &str, config: &ParseConfig) -> Result<Query, ParseError> {
    Parser::new(query)
        .with_config(config.clone())
        .parse()
        .into_result(SourceFile::new(query))
}

/// A failed parse: every diagnostic plus the source they point into.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diag>,
    source: SourceFile,
    related: Vec<BuiltDiagnostic>,
}

impl ParseError {
    pub fn new(diagnostics: Vec<Diag>, source: SourceFile) -> Self {
        let related = diagnostics
            .iter()
            .map(|diag| build_diagnostic(diag, &source))
            .collect();
        Self {
            diagnostics,
            source,
            related,
        }
    }

    pub fn diagnostics(&self) -> &[Diag] {
        &self.diagnostics
    }

    pub fn source_file(&self) -> &SourceFile {
        &self.source
    }

    /// Converts every diagnostic into a standalone report with source context.
    pub fn reports(&self) -> Vec<Report> {
        convert_diagnostics_to_reports(&self.diagnostics, &self.source)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.diagnostics.first() {
            Some(first) if self.diagnostics.len() > 1 => {
                write!(f, "{first} (and {} more)", self.diagnostics.len() - 1)
            }
            Some(first) => write!(f, "{first}"),
            None => write!(f, "query could not be parsed"),
        }
    }
}

impl std::error::Error for ParseError {}

impl miette::Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostics
            .first()
            .and_then(|diag| diag.code.as_ref())
            .map(|code| Box::new(code) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.source as &dyn miette::SourceCode)
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn miette::Diagnostic> + 'a>> {
        if self.related.is_empty() {
            return None;
        }
        Some(Box::new(
            self.related.iter().map(|diag| diag as &dyn miette::Diagnostic),
        ))
    }
}

/// Grammar state shared by the clause, pattern and expression parsers.
pub(crate) struct QueryParser<'a> {
    stream: TokenStream<'a>,
    config: &'a ParseConfig,
    depth: usize,
    diagnostics: Vec<Diag>,
}

impl<'a> QueryParser<'a> {
    pub(crate) fn new(tokens: &'a [Token], config: &'a ParseConfig) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            config,
            depth: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Enters one level of nesting, failing once the configured limit is
    /// exceeded. Every successful call must be paired with [`Self::leave`].
    fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= self.config.max_depth {
            return Err(self.nesting_too_deep());
        }
        self.depth += 1;
        Ok(())
    }

    /// Fails once a tree being built grows taller than the configured limit.
    fn check_height(&self, height: usize) -> ParseResult<()> {
        if height > self.config.max_depth {
            return Err(self.nesting_too_deep());
        }
        Ok(())
    }

    fn nesting_too_deep(&self) -> Box<Diag> {
        self.stream.error_here(
            NESTING_TOO_DEEP,
            format!(
                "nesting exceeds the limit of {} at {}",
                self.config.max_depth,
                self.stream.current().describe()
            ),
        )
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Parses a variable or alias: an identifier, never a bare keyword.
    fn expect_variable(&mut self, what: &str) -> ParseResult<(SmolStr, Span)> {
        let token = self.stream.current();
        if let TokenKind::Identifier(name) = &token.kind {
            self.stream.advance();
            return Ok((name.clone(), token.span.clone()));
        }
        let mut diag = self.stream.error_here(
            EXPECTED_TOKEN,
            format!("expected {what}, found {}", token.describe()),
        );
        if token.kind.is_keyword() {
            diag.help = Some(format!(
                "'{}' is a reserved word; quote it with backticks to use it as a name",
                token.text
            ));
        }
        Err(diag)
    }

    /// Parses a label, relationship type, property key or map key.
    fn expect_symbolic_name(&mut self, what: &str) -> ParseResult<(SmolStr, Span)> {
        let token = self.stream.current();
        match symbolic_name(token) {
            Some(name) => {
                self.stream.advance();
                Ok((name, token.span.clone()))
            }
            None => Err(self.stream.error_here(
                EXPECTED_TOKEN,
                format!("expected {what}, found {}", token.describe()),
            )),
        }
    }

    /// Parses `:A:B...`, at least one label.
    fn parse_label_list(&mut self) -> ParseResult<Vec<SmolStr>> {
        let mut labels = Vec::new();
        while self.stream.consume(&TokenKind::Colon) {
            let (label, _) = self.expect_symbolic_name("a label")?;
            labels.push(label);
        }
        if labels.is_empty() {
            return Err(self.unexpected("expected ':' and a label"));
        }
        Ok(labels)
    }

    /// Error for a token that has no place at the current position.
    fn unexpected(&self, context: &str) -> Box<Diag> {
        let token = self.stream.current();
        self.stream.error_here(
            UNEXPECTED_TOKEN,
            format!("unexpected {}: {context}", token.describe()),
        )
    }
}
