//! Diagnostics: codes, positions, recovery and rendering.

mod common;

use common::{assert_parse_fails, codes};
use cypher_parser::diag::{
    EXPECTED_EXPRESSION, EXPECTED_TOKEN, ILLEGAL_CHARACTER, UNCLOSED_DELIMITER, UNEXPECTED_TOKEN,
};
use cypher_parser::{DiagSeverity, ParseConfig, Parser, SourceFile};
use miette::Diagnostic;
use pretty_assertions::assert_eq;

#[test]
fn empty_input() {
    let err = assert_parse_fails("");
    let diag = &err.diagnostics()[0];
    assert_eq!(diag.code.as_deref(), Some(UNEXPECTED_TOKEN));
    assert_eq!(diag.message, "unexpected end of input: expected a clause");
    assert_eq!(diag.lexeme, None);
    assert_eq!(diag.line, Some(1));
}

#[test]
fn comment_only_input() {
    let err = assert_parse_fails("// nothing here\n/* at all */");
    assert_eq!(err.diagnostics()[0].line, Some(2));
}

#[test]
fn trailing_tokens() {
    let err = assert_parse_fails("RETURN 1 2");
    let diag = &err.diagnostics()[0];
    assert_eq!(
        diag.message,
        "unexpected '2': expected a clause or end of input"
    );
    assert_eq!(diag.lexeme.as_deref(), Some("2"));
}

#[test]
fn union_needs_a_right_side() {
    let err = assert_parse_fails("MATCH (n) RETURN n UNION");
    assert_eq!(codes(err.diagnostics()), vec![UNEXPECTED_TOKEN]);
}

#[test]
fn version_must_be_a_number() {
    let err = assert_parse_fails("CYPHER x RETURN 1");
    assert_eq!(
        err.diagnostics()[0].message,
        "expected a version number, found 'x'"
    );
}

#[test]
fn missing_keyword_after_clause_prefix() {
    let err = assert_parse_fails("OPTIONAL (n) RETURN n");
    assert_eq!(codes(err.diagnostics()), vec![EXPECTED_TOKEN]);
    assert_eq!(
        err.diagnostics()[0].message,
        "expected 'MATCH', found '('"
    );

    let err = assert_parse_fails("MATCH (n) ORDER n.x RETURN n");
    assert_eq!(err.diagnostics()[0].message, "expected 'BY', found 'n'");
}

#[test]
fn merge_action_needs_create_or_match() {
    let err = assert_parse_fails("MERGE (n) ON DELETE SET n.x = 1");
    assert_eq!(
        err.diagnostics()[0].message,
        "expected 'CREATE' or 'MATCH', found 'DELETE'"
    );
}

#[test]
fn set_needs_an_assignment() {
    let err = assert_parse_fails("MATCH (n) SET n.x 1");
    assert_eq!(
        err.diagnostics()[0].message,
        "expected '=' or '+=', found '1'"
    );
}

#[test]
fn error_lines_follow_the_source() {
    let err = assert_parse_fails("MATCH (n)\nWHERE n.x =\nRETURN n");
    let diag = &err.diagnostics()[0];
    assert_eq!(diag.code.as_deref(), Some(EXPECTED_EXPRESSION));
    assert_eq!(diag.message, "expected an expression, found 'RETURN'");
    assert_eq!(diag.line, Some(3));
}

#[test]
fn missing_operand_at_end_of_input() {
    let err = assert_parse_fails("MATCH (n)\nRETURN n +");
    let diag = &err.diagnostics()[0];
    assert_eq!(diag.message, "expected an expression, found end of input");
    assert_eq!(diag.line, Some(2));
    assert_eq!(diag.lexeme, None);
}

#[test]
fn recovery_collects_every_malformed_expression() {
    let source = "RETURN f(=), [1, ], g(<)";
    let outcome = Parser::new(source).parse();
    assert_eq!(
        codes(&outcome.diagnostics),
        vec![EXPECTED_EXPRESSION, EXPECTED_EXPRESSION, EXPECTED_EXPRESSION]
    );
    let ast = outcome.ast.as_ref().expect("recovery keeps the tree");
    assert_eq!(ast.to_string(), "RETURN f(<error>), [1, <error>], g(<error>)");

    let err = assert_parse_fails(source);
    assert_eq!(err.diagnostics().len(), 3);
}

#[test]
fn without_recovery_the_first_malformed_expression_aborts() {
    let config = ParseConfig::default().with_expression_recovery(false);
    let outcome = Parser::new("RETURN f(=), g(<)").with_config(config).parse();
    assert!(outcome.ast.is_none());
    assert_eq!(codes(&outcome.diagnostics), vec![EXPECTED_EXPRESSION]);
}

#[test]
fn lexical_diagnostics_come_first() {
    let err = assert_parse_fails("RETURN 1 @ 2");
    assert_eq!(
        codes(err.diagnostics()),
        vec![ILLEGAL_CHARACTER, UNEXPECTED_TOKEN]
    );
    let lexical = &err.diagnostics()[0];
    assert!(lexical.is_lexical());
    assert_eq!(lexical.lexeme.as_deref(), Some("@"));
}

#[test]
fn illegal_character_fails_an_otherwise_valid_query() {
    let err = assert_parse_fails("MATCH (n) RETURN n #");
    assert_eq!(codes(err.diagnostics()), vec![ILLEGAL_CHARACTER]);
    assert_eq!(err.diagnostics()[0].severity, DiagSeverity::Error);
}

#[test]
fn unclosed_string_fails_the_parse() {
    let err = assert_parse_fails("RETURN 'abc");
    assert_eq!(codes(err.diagnostics()), vec![UNCLOSED_DELIMITER]);
}

#[test]
fn display_summarizes_the_first_diagnostic() {
    let single = assert_parse_fails("RETURN");
    assert_eq!(
        single.to_string(),
        "error[P001] (line 1): expected an expression, found end of input"
    );

    let many = assert_parse_fails("RETURN 1 @ 2");
    assert_eq!(
        many.to_string(),
        "error[L001] (line 1): illegal character '@' (and 1 more)"
    );
}

#[test]
fn miette_integration() {
    let err = assert_parse_fails("MATCH (n) RETURN n.");
    assert_eq!(err.code().map(|code| code.to_string()), Some("P002".to_string()));
    assert!(err.source_code().is_some());
    assert_eq!(err.related().map(Iterator::count), Some(1));

    let reports = err.reports();
    assert_eq!(reports.len(), 1);
    let rendered = format!("{:?}", reports[0]);
    assert!(
        rendered.contains("expected a property key, found end of input"),
        "unexpected rendering:\n{rendered}"
    );
}

#[test]
fn error_keeps_the_source() {
    let source = "MATCH (n RETURN n";
    let err = assert_parse_fails(source);
    assert_eq!(err.source_file(), &SourceFile::new(source));
    let span = err.diagnostics()[0].primary_span().cloned();
    assert_eq!(span, Some(9..15));
}
