//! Graph pattern AST nodes.
//!
//! A pattern is a start node followed by a chain of relationship/node links,
//! `(a)-[:KNOWS]->(b)<-[:OWNS]-(c)`.

use crate::ast::{Expression, Span};
use smol_str::SmolStr;

/// A path pattern, optionally bound to a name (`p = (a)-->(b)`).
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub alias: Option<SmolStr>,
    pub start: NodePattern,
    /// Links in source order
    pub chain: Vec<PatternLink>,
    pub span: Span,
}

impl Pattern {
    /// Returns the number of relationships in the chain.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Returns true for a single-node pattern.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Returns the height of the tallest property value in the pattern, plus
    /// one for the map holding it. Zero when no property map has entries.
    pub fn expression_height(&self) -> usize {
        let nodes = std::iter::once(&self.start.properties)
            .chain(self.chain.iter().map(|link| &link.node.properties));
        let relationships = self
            .chain
            .iter()
            .map(|link| &link.relationship.properties);
        nodes
            .chain(relationships)
            .filter_map(|properties| match properties {
                Some(Properties::Map(entries, _)) => entries
                    .iter()
                    .map(|entry| entry.value.height() + 1)
                    .max(),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }
}

/// One hop of a pattern chain.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternLink {
    pub relationship: RelationshipPattern,
    pub node: NodePattern,
}

/// `(variable:Label1:Label2 {props})`
#[derive(Debug, Clone, PartialEq)]
pub struct NodePattern {
    pub variable: Option<SmolStr>,
    pub labels: Vec<SmolStr>,
    pub properties: Option<Properties>,
    pub span: Span,
}

/// Inline property constraint of a node or relationship.
#[derive(Debug, Clone, PartialEq)]
pub enum Properties {
    Map(Vec<MapEntry>, Span),
    Parameter(SmolStr, Span),
}

/// A `key: value` entry of a map literal or property map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub key: SmolStr,
    pub value: Expression,
    pub span: Span,
}

/// `-[variable:TYPE1|TYPE2*1..3 {props}]->`
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipPattern {
    pub direction: Direction,
    pub variable: Option<SmolStr>,
    /// Type alternatives in source order
    pub types: Vec<SmolStr>,
    pub length: Option<VariableLength>,
    pub properties: Option<Properties>,
    pub span: Span,
}

/// Relationship direction relative to the reading order of the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `-->`
    Outgoing,
    /// `<--`
    Incoming,
    /// `--`
    Undirected,
}

/// Variable-length bound of a relationship.
///
/// `*` leaves both bounds open; `*3` fixes both to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariableLength {
    pub min: Option<u32>,
    pub max: Option<u32>,
}
