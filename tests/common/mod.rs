//! Common test utilities
//!
//! Shared helpers for the integration suites.
//!
//! # Diagnostic Helpers
//! - [`format_diagnostics`] - Render diagnostics for assertion messages
//! - [`codes`] - Collect diagnostic codes in order
//!
//! # Parsing Helpers
//! - [`parse_cleanly`] - Parse source and return the tree, panicking on errors
//! - [`render`] - Parse cleanly and return the canonical rendering
//! - [`tokenize_cleanly`] - Tokenize source and return tokens, panicking on errors
//! - [`assert_parse_fails`] - Assert that parsing fails and return the error

#![allow(dead_code)]

use cypher_parser::{Diag, ParseError, Query, Token, TokenKind, parse, tokenize};

/// Format diagnostics for display in assertion messages.
pub fn format_diagnostics(diags: &[Diag]) -> String {
    diags
        .iter()
        .map(|diag| diag.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Diagnostic codes in the order they were reported.
pub fn codes(diags: &[Diag]) -> Vec<&str> {
    diags.iter().filter_map(|diag| diag.code.as_deref()).collect()
}

/// Parse source and return the tree, panicking if any diagnostic is reported.
pub fn parse_cleanly(source: &str) -> Query {
    match parse(source) {
        Ok(query) => query,
        Err(err) => panic!(
            "unexpected diagnostics for `{source}`:\n{}",
            format_diagnostics(err.diagnostics())
        ),
    }
}

/// Canonical rendering of a cleanly parsed query.
pub fn render(source: &str) -> String {
    parse_cleanly(source).to_string()
}

/// Tokenize source and return the token kinds, panicking on lexer diagnostics.
pub fn tokenize_cleanly(source: &str) -> Vec<Token> {
    let lexed = tokenize(source);
    assert!(
        lexed.diagnostics.is_empty(),
        "unexpected lexer diagnostics for `{source}`:\n{}",
        format_diagnostics(&lexed.diagnostics)
    );
    lexed.tokens
}

/// Token kinds of `source`, without the trailing EOF.
pub fn kinds(source: &str) -> Vec<TokenKind> {
    let mut kinds: Vec<_> = tokenize_cleanly(source)
        .into_iter()
        .map(|token| token.kind)
        .collect();
    assert_eq!(kinds.pop(), Some(TokenKind::Eof));
    kinds
}

/// Assert that `source` fails to parse and return the error.
pub fn assert_parse_fails(source: &str) -> ParseError {
    match parse(source) {
        Ok(query) => panic!("expected `{source}` to fail, parsed as `{query}`"),
        Err(err) => {
            assert!(
                !err.diagnostics().is_empty(),
                "failed parse of `{source}` carried no diagnostics"
            );
            err
        }
    }
}
