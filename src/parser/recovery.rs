//! Expression-level error recovery.
//!
//! A missing or malformed operand is the one syntax error the parser
//! survives: it is reported, the offending tokens are skipped up to the next
//! boundary, and an [`Expression::Error`] placeholder takes their place.

use crate::ast::Expression;
use crate::diag::EXPECTED_EXPRESSION;
use crate::lexer::token::TokenKind;
use crate::parser::QueryParser;
use crate::parser::base::{ParseResult, error_at};
use tracing::trace;

/// Token kinds that end an expression besides the clause keywords.
const EXPRESSION_BOUNDARY_TOKENS: &[TokenKind] = &[
    TokenKind::Comma,
    TokenKind::RParen,
    TokenKind::RBracket,
    TokenKind::RBrace,
    TokenKind::Pipe,
    TokenKind::As,
    TokenKind::Then,
    TokenKind::Else,
    TokenKind::End,
    TokenKind::When,
    TokenKind::Where,
    TokenKind::On,
    TokenKind::Yield,
    TokenKind::Eof,
];

/// Returns true when `kind` ends an expression.
pub(crate) fn is_expression_boundary(kind: &TokenKind) -> bool {
    EXPRESSION_BOUNDARY_TOKENS.contains(kind) || kind.starts_clause()
}

impl QueryParser<'_> {
    /// Reports the current token as unable to start an expression.
    ///
    /// With recovery enabled the diagnostic is recorded, tokens are skipped up
    /// to the next boundary (bracketed groups are skipped whole) and an error
    /// placeholder covering them is returned. Otherwise the diagnostic aborts
    /// the parse.
    pub(super) fn recover_expression(&mut self) -> ParseResult<Expression> {
        let token = self.stream.current();
        let diag = error_at(
            token,
            EXPECTED_EXPRESSION,
            format!("expected an expression, found {}", token.describe()),
        );
        if !self.config.recover_expressions {
            return Err(Box::new(diag));
        }
        self.diagnostics.push(diag);

        let start = token.span.start;
        let mut end = start;
        let mut nesting = 0usize;
        loop {
            let kind = self.stream.nth_kind(0);
            if *kind == TokenKind::Eof || (nesting == 0 && is_expression_boundary(kind)) {
                break;
            }
            match kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => nesting += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => nesting -= 1,
                _ => {}
            }
            end = self.stream.bump().span.end;
        }

        trace!(skipped = end - start, "replaced malformed expression");
        Ok(Expression::Error(start..end))
    }
}
