//! Shared parser infrastructure for token stream navigation and error handling.
//!
//! All grammar modules navigate tokens through [`TokenStream`] rather than
//! indexing the token vector themselves.

use crate::ast::Span;
use crate::diag::{Diag, EXPECTED_TOKEN};
use crate::lexer::token::{Token, TokenKind};
use smol_str::SmolStr;

/// Common result type for parsing operations.
///
/// The error is boxed to keep `Result` small on the hot path.
pub type ParseResult<T> = Result<T, Box<Diag>>;

/// Token stream navigator with lookahead.
///
/// The token slice must be non-empty and end with `Eof`; the lexer always
/// produces such a slice. Positions past the end resolve to that last token.
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a new token stream from a token slice.
    pub fn new(tokens: &'a [Token]) -> Self {
        debug_assert!(
            matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)),
            "token stream must end with EOF"
        );
        Self { tokens, pos: 0 }
    }

    /// Returns the current token.
    pub fn current(&self) -> &'a Token {
        self.nth(0)
    }

    /// Returns the token `n` positions ahead of the current one.
    pub fn nth(&self, n: usize) -> &'a Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + n).min(last)]
    }

    /// Returns the kind of the token `n` positions ahead.
    pub fn nth_kind(&self, n: usize) -> &'a TokenKind {
        &self.nth(n).kind
    }

    /// Advances to the next token.
    ///
    /// Does nothing if already at EOF (last token).
    pub fn advance(&mut self) {
        if self.pos < self.tokens.len().saturating_sub(1) {
            self.pos += 1;
        }
    }

    /// Returns the current token and advances past it.
    pub fn bump(&mut self) -> &'a Token {
        let token = self.current();
        self.advance();
        token
    }

    /// Checks if the current token matches the given kind.
    pub fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    /// Returns true at the end of input.
    pub fn is_eof(&self) -> bool {
        self.check(&TokenKind::Eof)
    }

    /// Consumes the current token if it matches the given kind.
    ///
    /// Returns `true` if the token was consumed, `false` otherwise.
    pub fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a specific token kind and returns its span.
    ///
    /// If the current token doesn't match, returns an error and leaves the
    /// position unchanged.
    pub fn expect(&mut self, kind: TokenKind) -> ParseResult<Span> {
        if self.check(&kind) {
            Ok(self.bump().span.clone())
        } else {
            Err(self.error_here(
                EXPECTED_TOKEN,
                format!("expected '{kind}', found {}", self.current().describe()),
            ))
        }
    }

    /// Creates an error at the current token, recording its line and lexeme.
    pub fn error_here(&self, code: &str, message: impl Into<String>) -> Box<Diag> {
        Box::new(error_at(self.current(), code, message))
    }

    /// Returns the span of the previous token (useful after consuming a token).
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span.clone()
        } else {
            self.current().span.clone()
        }
    }

    /// Returns the byte offset where the current token starts.
    pub fn start(&self) -> usize {
        self.current().span.start
    }

    /// Returns a span from `start` to the end of the previous token.
    pub fn span_from(&self, start: usize) -> Span {
        start..self.previous_span().end.max(start)
    }
}

/// Builds an error diagnostic pointing at `token`.
pub fn error_at(token: &Token, code: &str, message: impl Into<String>) -> Diag {
    let diag = Diag::error(message)
        .with_primary_label(token.span.clone(), "here")
        .with_code(code)
        .with_line(token.line);
    match token.kind {
        TokenKind::Eof => diag,
        _ => diag.with_lexeme(token.text.clone()),
    }
}

/// Returns the name spelled by a token usable as a label, relationship type,
/// property key or map key: any identifier or reserved word.
pub fn symbolic_name(token: &Token) -> Option<SmolStr> {
    match &token.kind {
        TokenKind::Identifier(name) => Some(name.clone()),
        kind if kind.is_keyword() => Some(token.text.clone()),
        _ => None,
    }
}
