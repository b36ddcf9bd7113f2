//! Expression AST nodes for Cypher.
//!
//! This module defines the complete expression system including:
//! - Literals (integer, float, string, boolean, null)
//! - Operators (arithmetic, comparison, logical, string predicates, membership)
//! - Postfix forms (property access, indexing, slicing, label checks)
//! - Collection forms (lists, maps, comprehensions, map projections)
//! - Function calls and CASE expressions

use crate::ast::{MapEntry, Pattern, Span};
use smol_str::SmolStr;

// ============================================================================
// Expression - Top-level expression type
// ============================================================================

/// Represents any expression in Cypher.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal value
    Literal(Literal, Span),

    /// Variable reference
    Variable(SmolStr, Span),

    /// Parameter reference (`$name`), stored without the `$`
    Parameter(SmolStr, Span),

    /// Property access (`expr.key`)
    Property(Box<Expression>, SmolStr, Span),

    /// Index access (`expr[index]`)
    Index(Box<Expression>, Box<Expression>, Span),

    /// Slice (`expr[from..to]`), either bound optional
    Slice(
        Box<Expression>,
        Option<Box<Expression>>,
        Option<Box<Expression>>,
        Span,
    ),

    /// List literal `[a, b, c]`
    List(Vec<Expression>, Span),

    /// List comprehension `[x IN list WHERE pred | proj]`
    ListComprehension(Box<ListComprehension>),

    /// Pattern comprehension `[(a)-->(b) WHERE pred | proj]`
    PatternComprehension(Box<PatternComprehension>),

    /// A relationship pattern used as a boolean predicate
    PatternPredicate(Box<Pattern>),

    /// Map literal `{key: value, ...}`
    Map(Vec<MapEntry>, Span),

    /// Map projection `n {.name, .*, key: expr, other}`
    MapProjection(MapProjection),

    /// Function call
    FunctionCall(FunctionCall),

    /// CASE expression
    Case(Box<CaseExpression>),

    /// Unary expression (`-`, `NOT`)
    Unary(UnaryOperator, Box<Expression>, Span),

    /// Binary arithmetic expression
    Binary(BinaryOperator, Box<Expression>, Box<Expression>, Span),

    /// Comparison expression
    Comparison(ComparisonOperator, Box<Expression>, Box<Expression>, Span),

    /// Logical expression (AND, OR, XOR)
    Logical(LogicalOperator, Box<Expression>, Box<Expression>, Span),

    /// String predicate (STARTS WITH, ENDS WITH, CONTAINS)
    StringPredicate(StringOperator, Box<Expression>, Box<Expression>, Span),

    /// Membership test (`expr IN list`)
    In(Box<Expression>, Box<Expression>, Span),

    /// `IS NULL`, or `IS NOT NULL` when the flag is set
    IsNull(Box<Expression>, bool, Span),

    /// Label check (`n:Person:Admin`)
    LabelCheck(Box<Expression>, Vec<SmolStr>, Span),

    /// DISTINCT wrapper
    Distinct(Box<Expression>, Span),

    /// The `*` argument of `count(*)`
    Star(Span),

    /// Placeholder left where a malformed expression was skipped
    Error(Span),
}

impl Expression {
    /// Returns the span of this expression
    pub fn span(&self) -> Span {
        match self {
            Expression::Literal(_, span)
            | Expression::Variable(_, span)
            | Expression::Parameter(_, span)
            | Expression::Property(_, _, span)
            | Expression::Index(_, _, span)
            | Expression::Slice(_, _, _, span)
            | Expression::List(_, span)
            | Expression::Map(_, span)
            | Expression::Unary(_, _, span)
            | Expression::Binary(_, _, _, span)
            | Expression::Comparison(_, _, _, span)
            | Expression::Logical(_, _, _, span)
            | Expression::StringPredicate(_, _, _, span)
            | Expression::In(_, _, span)
            | Expression::IsNull(_, _, span)
            | Expression::LabelCheck(_, _, span)
            | Expression::Distinct(_, span)
            | Expression::Star(span)
            | Expression::Error(span) => span.clone(),
            Expression::ListComprehension(lc) => lc.span.clone(),
            Expression::PatternComprehension(pc) => pc.span.clone(),
            Expression::PatternPredicate(pattern) => pattern.span.clone(),
            Expression::MapProjection(mp) => mp.span.clone(),
            Expression::FunctionCall(fc) => fc.span.clone(),
            Expression::Case(ce) => ce.span.clone(),
        }
    }

    /// Returns the number of nested expression levels, counting this node.
    ///
    /// Leaves have height 1. Expressions inside patterns count too.
    pub fn height(&self) -> usize {
        let children = match self {
            Expression::Literal(..)
            | Expression::Variable(..)
            | Expression::Parameter(..)
            | Expression::Star(_)
            | Expression::Error(_) => 0,
            Expression::Property(inner, ..)
            | Expression::Unary(_, inner, _)
            | Expression::IsNull(inner, ..)
            | Expression::LabelCheck(inner, ..)
            | Expression::Distinct(inner, _) => inner.height(),
            Expression::Index(left, right, _)
            | Expression::Binary(_, left, right, _)
            | Expression::Comparison(_, left, right, _)
            | Expression::Logical(_, left, right, _)
            | Expression::StringPredicate(_, left, right, _)
            | Expression::In(left, right, _) => left.height().max(right.height()),
            Expression::Slice(target, from, to, _) => target
                .height()
                .max(from.as_deref().map_or(0, Expression::height))
                .max(to.as_deref().map_or(0, Expression::height)),
            Expression::List(items, _) => tallest(items),
            Expression::Map(entries, _) => entries
                .iter()
                .map(|entry| entry.value.height())
                .max()
                .unwrap_or(0),
            Expression::ListComprehension(lc) => lc
                .source
                .height()
                .max(optional_height(&lc.filter))
                .max(optional_height(&lc.projection)),
            Expression::PatternComprehension(pc) => pc
                .pattern
                .expression_height()
                .max(optional_height(&pc.filter))
                .max(pc.projection.height()),
            Expression::PatternPredicate(pattern) => pattern.expression_height(),
            Expression::MapProjection(mp) => mp
                .items
                .iter()
                .map(|item| match item {
                    MapProjectionItem::Entry(entry) => entry.value.height(),
                    _ => 0,
                })
                .max()
                .unwrap_or(0),
            Expression::FunctionCall(fc) => tallest(&fc.arguments),
            Expression::Case(ce) => ce
                .branches
                .iter()
                .map(|branch| branch.when.height().max(branch.then.height()))
                .max()
                .unwrap_or(0)
                .max(optional_height(&ce.operand))
                .max(optional_height(&ce.default)),
        };
        children + 1
    }
}

fn tallest(expressions: &[Expression]) -> usize {
    expressions.iter().map(Expression::height).max().unwrap_or(0)
}

fn optional_height(expression: &Option<Expression>) -> usize {
    expression.as_ref().map_or(0, Expression::height)
}

// ============================================================================
// Literals
// ============================================================================

/// Literal value types.
///
/// Numbers keep their source text so no precision is lost before a consumer
/// decides how to interpret them.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal, as written
    Integer(SmolStr),

    /// Float literal, as written
    Float(SmolStr),

    /// String literal with escapes decoded
    String(SmolStr),

    /// TRUE or FALSE
    Boolean(bool),

    /// NULL
    Null,
}

// ============================================================================
// Operators
// ============================================================================

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (-)
    Negate,
    /// Logical NOT
    Not,
}

impl UnaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::Not => "NOT",
        }
    }
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Modulo (%)
    Modulo,
    /// Exponentiation (^)
    Power,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Power => "^",
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// Equal (=)
    Eq,
    /// Not equal (<>)
    NotEq,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    LtEq,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    GtEq,
}

impl ComparisonOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::NotEq => "<>",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::LtEq => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::GtEq => ">=",
        }
    }
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
    Xor,
}

impl LogicalOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
            LogicalOperator::Xor => "XOR",
        }
    }
}

/// String predicate operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringOperator {
    StartsWith,
    EndsWith,
    Contains,
}

impl StringOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            StringOperator::StartsWith => "STARTS WITH",
            StringOperator::EndsWith => "ENDS WITH",
            StringOperator::Contains => "CONTAINS",
        }
    }
}

// ============================================================================
// Comprehensions and projections
// ============================================================================

/// `[variable IN source WHERE filter | projection]`
#[derive(Debug, Clone, PartialEq)]
pub struct ListComprehension {
    pub variable: SmolStr,
    pub source: Expression,
    pub filter: Option<Expression>,
    pub projection: Option<Expression>,
    pub span: Span,
}

/// `[pattern WHERE filter | projection]`
#[derive(Debug, Clone, PartialEq)]
pub struct PatternComprehension {
    pub pattern: Pattern,
    pub filter: Option<Expression>,
    pub projection: Expression,
    pub span: Span,
}

/// Map projection over a variable: `n {.name, .*, total: n.a + n.b, other}`
#[derive(Debug, Clone, PartialEq)]
pub struct MapProjection {
    pub variable: SmolStr,
    pub items: Vec<MapProjectionItem>,
    pub span: Span,
}

/// One selector inside a map projection.
#[derive(Debug, Clone, PartialEq)]
pub enum MapProjectionItem {
    /// `.key`
    Property(SmolStr, Span),
    /// `.*`
    AllProperties(Span),
    /// `key: expression`
    Entry(MapEntry),
    /// A bare variable, projected under its own name
    Variable(SmolStr, Span),
}

// ============================================================================
// Function Calls
// ============================================================================

/// Function call expression
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Name parts, more than one for namespaced calls like `apoc.text.join`
    pub name: Vec<SmolStr>,
    /// Arguments in source order
    pub arguments: Vec<Expression>,
    pub span: Span,
}

impl FunctionCall {
    /// Returns the dotted function name.
    pub fn qualified_name(&self) -> String {
        self.name.join(".")
    }
}

// ============================================================================
// CASE Expression
// ============================================================================

/// `CASE [operand] WHEN .. THEN .. [ELSE ..] END`
///
/// Without an operand every `when` is a condition; with one, each `when` is a
/// value compared against it.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpression {
    pub operand: Option<Expression>,
    /// Branches in source order, at least one
    pub branches: Vec<CaseBranch>,
    pub default: Option<Expression>,
    pub span: Span,
}

/// One `WHEN .. THEN ..` branch.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseBranch {
    pub when: Expression,
    pub then: Expression,
    pub span: Span,
}
