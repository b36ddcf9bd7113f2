//! Pattern parsing in MATCH, CREATE and MERGE, plus patterns used as
//! expressions.

mod common;

use common::{assert_parse_fails, codes, parse_cleanly, render};
use cypher_parser::ast::{Clause, Direction, Expression, Pattern, Properties, QueryBody};
use cypher_parser::diag::{EXPECTED_TOKEN, NUMBER_OUT_OF_RANGE, UNEXPECTED_TOKEN};
use pretty_assertions::assert_eq;

fn match_patterns(source: &str) -> Vec<Pattern> {
    let QueryBody::Single(query) = parse_cleanly(source).body else {
        panic!("expected a single query");
    };
    match query.clauses.into_iter().next() {
        Some(Clause::Match(m)) => m.patterns,
        Some(Clause::Create(c)) => c.patterns,
        Some(Clause::Merge(m)) => m.patterns,
        other => panic!("expected a pattern clause, got {other:?}"),
    }
}

fn single_pattern(source: &str) -> Pattern {
    let mut patterns = match_patterns(source);
    assert_eq!(patterns.len(), 1, "expected one pattern in `{source}`");
    patterns.remove(0)
}

#[test]
fn directions_and_abbreviations() {
    let pattern = single_pattern("MATCH (a)-->(b)<--(c)--(d)-[]->(e)<-[]-(f)-[]-(g) RETURN a");
    let directions: Vec<_> = pattern
        .chain
        .iter()
        .map(|link| link.relationship.direction)
        .collect();
    assert_eq!(
        directions,
        vec![
            Direction::Outgoing,
            Direction::Incoming,
            Direction::Undirected,
            Direction::Outgoing,
            Direction::Incoming,
            Direction::Undirected,
        ]
    );
    assert!(pattern.chain.iter().all(|link| link.relationship.types.is_empty()));
    assert_eq!(
        pattern.to_string(),
        "(a)-->(b)<--(c)--(d)-->(e)<--(f)--(g)"
    );
}

#[test]
fn relationship_with_everything() {
    let pattern = single_pattern("MATCH (a)-[r:KNOWS|:LIKES*2..5 {since: 2020}]->(b) RETURN r");
    let rel = &pattern.chain[0].relationship;
    assert_eq!(rel.variable.as_deref(), Some("r"));
    assert_eq!(rel.types, vec!["KNOWS", "LIKES"]);
    let length = rel.length.unwrap();
    assert_eq!((length.min, length.max), (Some(2), Some(5)));
    assert!(matches!(rel.properties, Some(Properties::Map(ref entries, _)) if entries.len() == 1));
    assert_eq!(
        pattern.to_string(),
        "(a)-[r:KNOWS|LIKES*2..5 {since: 2020}]->(b)"
    );
}

#[test]
fn variable_length_bounds() {
    let cases = [
        ("*", (None, None)),
        ("*3", (Some(3), Some(3))),
        ("*1..", (Some(1), None)),
        ("*..4", (None, Some(4))),
        ("*0..2", (Some(0), Some(2))),
    ];
    for (suffix, bounds) in cases {
        let source = format!("MATCH (a)-[{suffix}]->(b) RETURN b");
        let pattern = single_pattern(&source);
        let length = pattern.chain[0].relationship.length.unwrap();
        assert_eq!((length.min, length.max), bounds, "bounds of `{suffix}`");
    }
}

#[test]
fn oversized_length_bound_is_rejected() {
    let err = assert_parse_fails("MATCH (a)-[*1..99999999999]->(b) RETURN b");
    assert_eq!(codes(err.diagnostics()), vec![NUMBER_OUT_OF_RANGE]);
}

#[test]
fn node_forms() {
    assert_eq!(render("MATCH () RETURN 1"), "MATCH () RETURN 1");
    assert_eq!(render("MATCH (:A:B) RETURN 1"), "MATCH (:A:B) RETURN 1");
    assert_eq!(
        render("MATCH (n $props) RETURN n"),
        "MATCH (n $props) RETURN n"
    );
    assert_eq!(render("MATCH ({id: 1}) RETURN 1"), "MATCH ({id: 1}) RETURN 1");
}

#[test]
fn multiple_patterns_and_aliases() {
    let patterns = match_patterns("MATCH p = (a)-->(b), q = (c), (d) RETURN p");
    let aliases: Vec<_> = patterns.iter().map(|p| p.alias.as_deref()).collect();
    assert_eq!(aliases, vec![Some("p"), Some("q"), None]);
}

#[test]
fn create_and_merge_patterns() {
    assert_eq!(
        render("CREATE (a:Person {name: 'A'})-[:KNOWS {since: 1}]->(b:Person)"),
        "CREATE (a:Person {name: 'A'})-[:KNOWS {since: 1}]->(b:Person)"
    );
    let pattern = single_pattern("MERGE (a)-[r:R]-(b)");
    assert_eq!(pattern.chain[0].relationship.direction, Direction::Undirected);
}

#[test]
fn keywords_work_as_labels_types_and_keys() {
    assert_eq!(
        render("MATCH (n:Match)-[:RETURN]->(m {end: 1}) RETURN n.order"),
        "MATCH (n:Match)-[:RETURN]->(m {end: 1}) RETURN n.order"
    );
}

#[test]
fn keyword_variable_needs_backticks() {
    let err = assert_parse_fails("MATCH (order) RETURN 1");
    assert_eq!(err.diagnostics()[0].message, "expected ')', found 'order'");

    let err = assert_parse_fails("MATCH p = (a)-->(b) UNWIND [1] AS order RETURN 1");
    let diag = &err.diagnostics()[0];
    assert!(diag.help.as_deref().is_some_and(|help| help.contains("backticks")));
}

#[test]
fn pattern_predicate_in_where() {
    let QueryBody::Single(query) =
        parse_cleanly("MATCH (a), (b) WHERE (a)-[:KNOWS]->(b) RETURN a").body
    else {
        panic!("expected a single query");
    };
    let Clause::Match(m) = &query.clauses[0] else {
        panic!("expected MATCH");
    };
    let Some(Expression::PatternPredicate(pattern)) = &m.where_clause else {
        panic!("expected a pattern predicate, got {:?}", m.where_clause);
    };
    assert_eq!(pattern.len(), 1);
}

#[test]
fn negated_pattern_predicate() {
    assert_eq!(
        render("MATCH (a) WHERE NOT (a)-->() RETURN a"),
        "MATCH (a) WHERE (NOT (a)-->()) RETURN a"
    );
}

#[test]
fn parenthesized_variable_is_not_a_pattern() {
    assert_eq!(
        render("MATCH (a) WHERE (a) IS NOT NULL RETURN a"),
        "MATCH (a) WHERE (a IS NOT NULL) RETURN a"
    );
}

#[test]
fn pattern_comprehension() {
    assert_eq!(
        render("MATCH (a) RETURN [(a)-[:KNOWS]->(b) WHERE b.age > 1 | b.name] AS names"),
        "MATCH (a) RETURN [(a)-[:KNOWS]->(b) WHERE (b.age > 1) | b.name] AS names"
    );
    assert_eq!(
        render("MATCH (a) RETURN [p = (a)-->() | p]"),
        "MATCH (a) RETURN [p = (a)-->() | p]"
    );
}

#[test]
fn parenthesized_list_items_stay_a_list() {
    assert_eq!(render("WITH 1 AS a RETURN [(a), 2]"), "WITH 1 AS a RETURN [a, 2]");
}

#[test]
fn both_way_arrow_is_rejected() {
    let err = assert_parse_fails("MATCH (a)<-->(b) RETURN a");
    assert_eq!(codes(err.diagnostics()), vec![UNEXPECTED_TOKEN]);
}

#[test]
fn unclosed_node_and_relationship() {
    let err = assert_parse_fails("MATCH (a RETURN a");
    assert_eq!(codes(err.diagnostics()), vec![EXPECTED_TOKEN]);
    assert_eq!(err.diagnostics()[0].message, "expected ')', found 'RETURN'");

    let err = assert_parse_fails("MATCH (a)-[:R->(b) RETURN a");
    assert_eq!(codes(err.diagnostics()), vec![EXPECTED_TOKEN]);
}

#[test]
fn match_without_pattern_fails() {
    let err = assert_parse_fails("MATCH RETURN 1");
    assert_eq!(err.diagnostics()[0].lexeme.as_deref(), Some("RETURN"));
}

#[test]
fn node_spans() {
    let pattern = single_pattern("MATCH (a:A)-[r]->(b) RETURN a");
    assert_eq!(pattern.span, 6..20);
    assert_eq!(pattern.start.span, 6..11);
    assert_eq!(pattern.chain[0].relationship.span, 11..17);
    assert_eq!(pattern.chain[0].node.span, 17..20);
}
