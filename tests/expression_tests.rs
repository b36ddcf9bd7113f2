//! Expression parsing: precedence, associativity and every operand form.

mod common;

use common::{assert_parse_fails, codes, parse_cleanly};
use cypher_parser::ast::{
    BinaryOperator, Clause, Expression, ProjectionItem, QueryBody,
};
use cypher_parser::diag::{CHAINED_COMPARISON, NESTING_TOO_DEEP};
use cypher_parser::{ParseConfig, parse_with_config};
use pretty_assertions::assert_eq;

/// Parses `RETURN <source>` and renders the single returned expression.
fn expr(source: &str) -> String {
    returned(source).to_string()
}

fn returned(source: &str) -> Expression {
    let query = parse_cleanly(&format!("RETURN {source}"));
    let QueryBody::Single(single) = query.body else {
        panic!("expected a single query");
    };
    let Some(Clause::Return(clause)) = single.clauses.into_iter().next() else {
        panic!("expected RETURN");
    };
    match clause.projection.items.into_iter().next() {
        Some(ProjectionItem::Expression { expression, .. }) => expression,
        other => panic!("expected an expression item, got {other:?}"),
    }
}

#[test]
fn multiplication_nests_inside_addition() {
    let Expression::Binary(BinaryOperator::Add, left, right, _) = returned("1 + 2 * 3") else {
        panic!("expected addition at the root");
    };
    assert_eq!(left.to_string(), "1");
    assert!(matches!(
        *right,
        Expression::Binary(BinaryOperator::Multiply, ..)
    ));
    assert_eq!(expr("1 * 2 + 3"), "((1 * 2) + 3)");
}

#[test]
fn power_is_right_associative() {
    let Expression::Binary(BinaryOperator::Power, left, right, _) = returned("2 ^ 3 ^ 2") else {
        panic!("expected power at the root");
    };
    assert_eq!(left.to_string(), "2");
    assert_eq!(right.to_string(), "(3 ^ 2)");
}

#[test]
fn arithmetic_is_left_associative() {
    assert_eq!(expr("1 - 2 - 3"), "((1 - 2) - 3)");
    assert_eq!(expr("8 / 4 % 3 * 2"), "(((8 / 4) % 3) * 2)");
}

#[test]
fn unary_minus_binds_tighter_than_power() {
    assert_eq!(expr("-2 ^ 2"), "(-2 ^ 2)");
    assert_eq!(expr("1 - -1"), "(1 - -1)");
}

#[test]
fn boolean_operators() {
    assert_eq!(expr("a OR b AND c"), "(a OR (b AND c))");
    assert_eq!(expr("a XOR b OR c"), "((a XOR b) OR c)");
    assert_eq!(expr("a AND b = c"), "(a AND (b = c))");
}

#[test]
fn not_has_the_lowest_precedence() {
    assert_eq!(expr("NOT a = b"), "(NOT (a = b))");
    assert_eq!(expr("NOT a AND b"), "(NOT (a AND b))");
    assert_eq!(expr("NOT NOT a"), "(NOT (NOT a))");
}

#[test]
fn comparisons() {
    for op in ["=", "<>", "<", "<=", ">", ">="] {
        assert_eq!(expr(&format!("a {op} b + 1")), format!("(a {op} (b + 1))"));
    }
}

#[test]
fn parenthesized_comparisons_can_chain() {
    assert_eq!(expr("(a < b) < c"), "((a < b) < c)");
    assert_eq!(expr("a < b AND b < c"), "((a < b) AND (b < c))");
}

#[test]
fn chained_comparison_fails() {
    for source in [
        "RETURN a < b < c",
        "RETURN a = b = c",
        "RETURN a < b + 1 >= c",
        "RETURN a IN b = c",
    ] {
        let err = assert_parse_fails(source);
        assert_eq!(codes(err.diagnostics()), vec![CHAINED_COMPARISON], "{source}");
    }
}

#[test]
fn chained_comparison_points_at_both_operators() {
    let err = assert_parse_fails("RETURN a < b < c");
    let diag = &err.diagnostics()[0];
    assert_eq!(
        diag.message,
        "chained comparison: '<' cannot follow '<' without parentheses"
    );
    let spans: Vec<_> = diag.labels.iter().map(|label| label.span.clone()).collect();
    assert_eq!(spans, vec![13..14, 9..10]);
}

#[test]
fn string_predicates() {
    assert_eq!(
        expr("n.name STARTS WITH 'A' AND n.name ENDS WITH 'z'"),
        "((n.name STARTS WITH 'A') AND (n.name ENDS WITH 'z'))"
    );
    assert_eq!(expr("a CONTAINS b + 'x'"), "(a CONTAINS (b + 'x'))");
    assert_eq!(expr("a starts with b contains c"), "((a STARTS WITH b) CONTAINS c)");
}

#[test]
fn null_checks() {
    assert_eq!(expr("a IS NULL"), "(a IS NULL)");
    assert_eq!(expr("a + 1 IS NOT NULL"), "((a + 1) IS NOT NULL)");
    assert_eq!(expr("a = b IS NULL"), "(a = (b IS NULL))");
    assert_eq!(expr("a IS NULL OR b IS NOT NULL"), "((a IS NULL) OR (b IS NOT NULL))");
}

#[test]
fn membership() {
    assert_eq!(expr("x IN [1, 2] AND y"), "((x IN [1, 2]) AND y)");
}

#[test]
fn literals() {
    assert_eq!(expr("42"), "42");
    assert_eq!(expr("3.14"), "3.14");
    assert_eq!(expr("'text'"), "'text'");
    assert_eq!(expr("\"double\""), "'double'");
    assert_eq!(expr("true"), "TRUE");
    assert_eq!(expr("False"), "FALSE");
    assert_eq!(expr("null"), "NULL");
    assert_eq!(expr("$param"), "$param");
}

#[test]
fn lists_and_maps() {
    assert_eq!(expr("[]"), "[]");
    assert_eq!(expr("[1, 'a', [true]]"), "[1, 'a', [TRUE]]");
    assert_eq!(expr("{}"), "{}");
    assert_eq!(expr("{a: 1, `b c`: [null]}"), "{a: 1, `b c`: [NULL]}");
}

#[test]
fn property_access_subscripts_and_slices() {
    assert_eq!(expr("a.b.c"), "a.b.c");
    assert_eq!(expr("list[0]"), "list[0]");
    assert_eq!(expr("list[1..2]"), "list[1..2]");
    assert_eq!(expr("list[..2]"), "list[..2]");
    assert_eq!(expr("list[1..]"), "list[1..]");
    assert_eq!(expr("m['key'].x[0]"), "m['key'].x[0]");
}

#[test]
fn operator_words_as_property_keys() {
    assert_eq!(expr("n.is IS NULL"), "(n.is IS NULL)");
    assert_eq!(expr("n.starts STARTS WITH 'a'"), "(n.starts STARTS WITH 'a')");
    assert_eq!(expr("n.ends IS NOT NULL"), "(n.ends IS NOT NULL)");
}

#[test]
fn label_checks() {
    assert_eq!(expr("n:Person:Admin"), "n:Person:Admin");
    assert_eq!(expr("NOT n:Person"), "(NOT n:Person)");
}

#[test]
fn function_calls() {
    assert_eq!(expr("count(*)"), "count(*)");
    assert_eq!(expr("count(DISTINCT n)"), "count(DISTINCT n)");
    assert_eq!(expr("toUpper(n.name)"), "toUpper(n.name)");
    assert_eq!(expr("rand()"), "rand()");
    assert_eq!(expr("apoc.text.join(['a'], ',')"), "apoc.text.join(['a'], ',')");
    assert_eq!(expr("EXISTS(n.prop)"), "exists(n.prop)");
}

#[test]
fn qualified_function_name() {
    let Expression::FunctionCall(call) = returned("apoc.coll.sum([1])") else {
        panic!("expected a function call");
    };
    assert_eq!(call.qualified_name(), "apoc.coll.sum");
    assert_eq!(call.arguments.len(), 1);
}

#[test]
fn list_comprehension() {
    assert_eq!(
        expr("[x IN range(1, 3) WHERE x > 1 | x ^ 2]"),
        "[x IN range(1, 3) WHERE (x > 1) | (x ^ 2)]"
    );
    assert_eq!(expr("[x IN xs]"), "[x IN xs]");
    assert_eq!(expr("[x IN xs | x.name]"), "[x IN xs | x.name]");
}

#[test]
fn map_projection() {
    assert_eq!(
        expr("n {.name, age: n.age + 1, .*, other}"),
        "n {.name, age: (n.age + 1), .*, other}"
    );
    assert_eq!(expr("n {}"), "n {}");
}

#[test]
fn case_expressions() {
    assert_eq!(
        expr("CASE n.x WHEN 1 THEN 'one' WHEN 2 THEN 'two' ELSE 'many' END"),
        "CASE n.x WHEN 1 THEN 'one' WHEN 2 THEN 'two' ELSE 'many' END"
    );
    assert_eq!(
        expr("case when a > 1 then true end"),
        "CASE WHEN (a > 1) THEN TRUE END"
    );
}

#[test]
fn case_without_when_fails() {
    let err = assert_parse_fails("RETURN CASE x ELSE 1 END");
    assert_eq!(err.diagnostics()[0].message, "expected 'WHEN', found 'ELSE'");
}

#[test]
fn distinct_argument_covers_the_whole_expression() {
    assert_eq!(expr("collect(DISTINCT a + b)"), "collect(DISTINCT (a + b))");
}

#[test]
fn distinct_after_return_marks_the_projection() {
    let query = parse_cleanly("RETURN DISTINCT a + b");
    let QueryBody::Single(single) = query.body else {
        panic!("expected a single query");
    };
    let Clause::Return(clause) = &single.clauses[0] else {
        panic!("expected RETURN");
    };
    assert!(clause.projection.distinct);
    assert_eq!(clause.projection.to_string(), "DISTINCT (a + b)");
}

#[test]
fn expression_spans() {
    let expression = returned("a.b + f(1)");
    assert_eq!(expression.span(), 7..17);
}

#[test]
fn nesting_limit_is_reported() {
    let nested = format!("RETURN {}1{}", "[".repeat(40), "]".repeat(40));
    let config = ParseConfig::default().with_max_depth(32);
    let err = parse_with_config(&nested, &config).unwrap_err();
    assert_eq!(codes(err.diagnostics()), vec![NESTING_TOO_DEEP]);
}

#[test]
fn default_nesting_limit_stops_runaway_input() {
    let nested = format!("RETURN {}1{}", "(".repeat(1000), ")".repeat(1000));
    let err = assert_parse_fails(&nested);
    assert_eq!(codes(err.diagnostics()), vec![NESTING_TOO_DEEP]);
}

#[test]
fn long_operator_chains_hit_the_nesting_limit() {
    let inputs = [
        format!("RETURN 1{}", " + 1".repeat(5_000)),
        format!("RETURN {}1", "- ".repeat(200_000)),
        format!("RETURN {}TRUE", "NOT ".repeat(5_000)),
        format!("RETURN 2{}", " ^ 2".repeat(5_000)),
        format!("RETURN n{}", ".key".repeat(5_000)),
        format!("RETURN n{}", "[0]".repeat(5_000)),
        format!("RETURN n{}", " IS NULL".repeat(5_000)),
    ];
    for input in &inputs {
        let err = assert_parse_fails(input);
        assert_eq!(codes(err.diagnostics()), vec![NESTING_TOO_DEEP]);
    }
}

#[test]
fn chain_height_counts_nested_operands() {
    let config = ParseConfig::default().with_max_depth(8);
    assert!(parse_with_config("RETURN 1 + 1 + 1 + 1", &config).is_ok());

    let inner = format!("[1{}]", " + 1".repeat(4));
    let source = format!("RETURN 1{}", format!(" + {inner}").repeat(4));
    let err = parse_with_config(&source, &config).unwrap_err();
    assert_eq!(codes(err.diagnostics()), vec![NESTING_TOO_DEEP]);
}

#[test]
fn chains_within_the_limit_render() {
    let source = format!("1{}", " + 1".repeat(200));
    let rendered = expr(&source);
    assert!(rendered.starts_with(&"(".repeat(200)));
    assert_eq!(parse_cleanly(&format!("RETURN {rendered}")).to_string(), format!("RETURN {rendered}"));
}
