//! Syntax tree for Cypher queries.
//!
//! Every node carries the byte [`Span`] it was parsed from. Nodes implement
//! `Display` with a canonical rendering (see [`display`](self::display)), which
//! is also the easiest way to compare trees without caring about spans.

mod display;
mod expression;
mod pattern;
mod query;
mod span;

pub use span::{Span, join};

pub use expression::{
    BinaryOperator, CaseBranch, CaseExpression, ComparisonOperator, Expression, FunctionCall,
    ListComprehension, Literal, LogicalOperator, MapProjection, MapProjectionItem,
    PatternComprehension, StringOperator, UnaryOperator,
};

pub use pattern::{
    Direction, MapEntry, NodePattern, Pattern, PatternLink, Properties, RelationshipPattern,
    VariableLength,
};

pub use query::{
    CallClause, Clause, CreateClause, DeleteClause, MatchClause, MatchKind, MergeAction,
    MergeClause, MergeTrigger, OrderByClause, Projection, ProjectionItem, PropertyPath, Query,
    QueryBody, RemoveClause, RemoveItem, ReturnClause, SetClause, SetItem, SingleQuery,
    SortDirection, SortItem, UnwindClause, WithClause, YieldItem,
};

pub use smol_str::SmolStr;
