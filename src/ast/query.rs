//! Query and clause AST nodes.
//!
//! A query is one or more single queries joined by `UNION [ALL]`. A single
//! query is an ordered list of clauses, kept exactly as written; the parser
//! does not check clause ordering rules such as "RETURN comes last".

use crate::ast::{Expression, Pattern, Span};
use smol_str::SmolStr;

// ============================================================================
// Query structure
// ============================================================================

/// A complete parsed query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// The version number of a leading `CYPHER <n>` header, if present
    pub version: Option<SmolStr>,
    pub body: QueryBody,
    pub span: Span,
}

/// Single query or a left-associative union chain.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryBody {
    Single(SingleQuery),
    Union {
        all: bool,
        left: Box<QueryBody>,
        right: SingleQuery,
        span: Span,
    },
}

impl QueryBody {
    pub fn span(&self) -> Span {
        match self {
            QueryBody::Single(query) => query.span.clone(),
            QueryBody::Union { span, .. } => span.clone(),
        }
    }

    /// Returns the single queries of a union chain in source order.
    pub fn parts(&self) -> Vec<&SingleQuery> {
        match self {
            QueryBody::Single(query) => vec![query],
            QueryBody::Union { left, right, .. } => {
                let mut parts = left.parts();
                parts.push(right);
                parts
            }
        }
    }
}

/// Ordered clauses of one query part.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleQuery {
    pub clauses: Vec<Clause>,
    pub span: Span,
}

// ============================================================================
// Clauses
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Match(MatchClause),
    Create(CreateClause),
    Merge(MergeClause),
    Set(SetClause),
    Delete(DeleteClause),
    Remove(RemoveClause),
    With(WithClause),
    Unwind(UnwindClause),
    Return(ReturnClause),
    OrderBy(OrderByClause),
    Skip(Expression, Span),
    Limit(Expression, Span),
    Call(CallClause),
}

impl Clause {
    /// Returns the span of this clause
    pub fn span(&self) -> Span {
        match self {
            Clause::Match(c) => c.span.clone(),
            Clause::Create(c) => c.span.clone(),
            Clause::Merge(c) => c.span.clone(),
            Clause::Set(c) => c.span.clone(),
            Clause::Delete(c) => c.span.clone(),
            Clause::Remove(c) => c.span.clone(),
            Clause::With(c) => c.span.clone(),
            Clause::Unwind(c) => c.span.clone(),
            Clause::Return(c) => c.span.clone(),
            Clause::OrderBy(c) => c.span.clone(),
            Clause::Skip(_, span) | Clause::Limit(_, span) => span.clone(),
            Clause::Call(c) => c.span.clone(),
        }
    }
}

/// `[OPTIONAL | MANDATORY] MATCH patterns [WHERE expr]`
#[derive(Debug, Clone, PartialEq)]
pub struct MatchClause {
    pub kind: MatchKind,
    pub patterns: Vec<Pattern>,
    pub where_clause: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Regular,
    Optional,
    Mandatory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateClause {
    pub patterns: Vec<Pattern>,
    pub span: Span,
}

/// `MERGE patterns [ON CREATE SET ..] [ON MATCH SET ..]`
#[derive(Debug, Clone, PartialEq)]
pub struct MergeClause {
    pub patterns: Vec<Pattern>,
    /// Actions in source order
    pub actions: Vec<MergeAction>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeAction {
    pub trigger: MergeTrigger,
    pub items: Vec<SetItem>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeTrigger {
    OnCreate,
    OnMatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    pub items: Vec<SetItem>,
    pub span: Span,
}

/// A single assignment of a SET clause.
#[derive(Debug, Clone, PartialEq)]
pub enum SetItem {
    /// `a.key = value`
    Property {
        target: PropertyPath,
        value: Expression,
        span: Span,
    },
    /// `a = value`
    Variable {
        variable: SmolStr,
        value: Expression,
        span: Span,
    },
    /// `a += value`
    MergeVariable {
        variable: SmolStr,
        value: Expression,
        span: Span,
    },
    /// `a.key += value`
    MergeProperty {
        target: PropertyPath,
        value: Expression,
        span: Span,
    },
    /// `a:Label1:Label2`
    Labels {
        variable: SmolStr,
        labels: Vec<SmolStr>,
        span: Span,
    },
}

/// `variable.key`, the target of SET and REMOVE property items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    pub variable: SmolStr,
    pub key: SmolStr,
    pub span: Span,
}

/// `[DETACH] DELETE expr, ...`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteClause {
    pub detach: bool,
    pub expressions: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoveClause {
    pub items: Vec<RemoveItem>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemoveItem {
    /// `a.key`
    Property(PropertyPath),
    /// `a:Label1:Label2`
    Labels {
        variable: SmolStr,
        labels: Vec<SmolStr>,
        span: Span,
    },
}

/// `WITH [DISTINCT] items [WHERE expr]`
#[derive(Debug, Clone, PartialEq)]
pub struct WithClause {
    pub projection: Projection,
    pub where_clause: Option<Expression>,
    pub span: Span,
}

/// `UNWIND expr AS alias`
#[derive(Debug, Clone, PartialEq)]
pub struct UnwindClause {
    pub expression: Expression,
    pub alias: SmolStr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnClause {
    pub projection: Projection,
    pub span: Span,
}

/// `ORDER BY item, ...`
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByClause {
    pub items: Vec<SortItem>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortItem {
    pub expression: Expression,
    pub direction: SortDirection,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// `CALL name.space.proc(args) YIELD a, b AS c WHERE expr`
#[derive(Debug, Clone, PartialEq)]
pub struct CallClause {
    /// Dotted procedure name parts
    pub procedure: Vec<SmolStr>,
    /// `None` when the call has no parentheses at all
    pub arguments: Option<Vec<Expression>>,
    pub yield_items: Option<Vec<YieldItem>>,
    pub where_clause: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YieldItem {
    pub name: SmolStr,
    pub alias: Option<SmolStr>,
    pub span: Span,
}

// ============================================================================
// Projections
// ============================================================================

/// Item list shared by WITH and RETURN.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub distinct: bool,
    pub items: Vec<ProjectionItem>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionItem {
    /// `*`
    Wildcard(Span),
    /// `expr [AS alias]`
    Expression {
        expression: Expression,
        alias: Option<SmolStr>,
        span: Span,
    },
}
