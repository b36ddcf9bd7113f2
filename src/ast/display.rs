//! Canonical Cypher rendering of the syntax tree.
//!
//! Keywords are upper-case, separators are single spaces, and every operator
//! node is wrapped in parentheses so nesting is explicit: `RETURN 1 + 2 * 3`
//! renders as `RETURN (1 + (2 * 3))`. Spans are ignored, so two queries that
//! differ only in layout or keyword case render identically.

use crate::ast::*;
use crate::lexer::keywords::is_keyword;
use std::fmt::{self, Display, Formatter, Write};

/// Writes `items` separated by `", "`.
fn comma_separated<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item.fmt(f)?;
    }
    Ok(())
}

fn is_identifier_shaped(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn write_backticked(f: &mut Formatter<'_>, name: &str) -> fmt::Result {
    f.write_char('`')?;
    for ch in name.chars() {
        if ch == '`' || ch == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(ch)?;
    }
    f.write_char('`')
}

/// A variable or alias; keywords need backticks.
struct Name<'a>(&'a str);

impl Display for Name<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if is_identifier_shaped(self.0) && !is_keyword(self.0) {
            f.write_str(self.0)
        } else {
            write_backticked(f, self.0)
        }
    }
}

/// A label, relationship type or key; keywords are fine as-is.
struct Symbol<'a>(&'a str);

impl Display for Symbol<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if is_identifier_shaped(self.0) {
            f.write_str(self.0)
        } else {
            write_backticked(f, self.0)
        }
    }
}

fn write_labels(f: &mut Formatter<'_>, labels: &[SmolStr]) -> fmt::Result {
    for label in labels {
        write!(f, ":{}", Symbol(label))?;
    }
    Ok(())
}

fn write_dotted(f: &mut Formatter<'_>, parts: &[SmolStr]) -> fmt::Result {
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            f.write_char('.')?;
        }
        Symbol(part).fmt(f)?;
    }
    Ok(())
}

fn write_string_literal(f: &mut Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('\'')?;
    for ch in value.chars() {
        match ch {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            _ => f.write_char(ch)?,
        }
    }
    f.write_char('\'')
}

// ============================================================================
// Queries and clauses
// ============================================================================

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(version) = &self.version {
            write!(f, "CYPHER {version} ")?;
        }
        self.body.fmt(f)
    }
}

impl Display for QueryBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            QueryBody::Single(query) => query.fmt(f),
            QueryBody::Union {
                all, left, right, ..
            } => {
                let keyword = if *all { "UNION ALL" } else { "UNION" };
                write!(f, "{left} {keyword} {right}")
            }
        }
    }
}

impl Display for SingleQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            clause.fmt(f)?;
        }
        Ok(())
    }
}

fn write_where(f: &mut Formatter<'_>, where_clause: &Option<Expression>) -> fmt::Result {
    match where_clause {
        Some(predicate) => write!(f, " WHERE {predicate}"),
        None => Ok(()),
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Match(clause) => {
                match clause.kind {
                    MatchKind::Regular => {}
                    MatchKind::Optional => f.write_str("OPTIONAL ")?,
                    MatchKind::Mandatory => f.write_str("MANDATORY ")?,
                }
                f.write_str("MATCH ")?;
                comma_separated(f, &clause.patterns)?;
                write_where(f, &clause.where_clause)
            }
            Clause::Create(clause) => {
                f.write_str("CREATE ")?;
                comma_separated(f, &clause.patterns)
            }
            Clause::Merge(clause) => {
                f.write_str("MERGE ")?;
                comma_separated(f, &clause.patterns)?;
                for action in &clause.actions {
                    let trigger = match action.trigger {
                        MergeTrigger::OnCreate => "ON CREATE SET",
                        MergeTrigger::OnMatch => "ON MATCH SET",
                    };
                    write!(f, " {trigger} ")?;
                    comma_separated(f, &action.items)?;
                }
                Ok(())
            }
            Clause::Set(clause) => {
                f.write_str("SET ")?;
                comma_separated(f, &clause.items)
            }
            Clause::Delete(clause) => {
                if clause.detach {
                    f.write_str("DETACH ")?;
                }
                f.write_str("DELETE ")?;
                comma_separated(f, &clause.expressions)
            }
            Clause::Remove(clause) => {
                f.write_str("REMOVE ")?;
                comma_separated(f, &clause.items)
            }
            Clause::With(clause) => {
                write!(f, "WITH {}", clause.projection)?;
                write_where(f, &clause.where_clause)
            }
            Clause::Unwind(clause) => {
                write!(f, "UNWIND {} AS {}", clause.expression, Name(&clause.alias))
            }
            Clause::Return(clause) => write!(f, "RETURN {}", clause.projection),
            Clause::OrderBy(clause) => {
                f.write_str("ORDER BY ")?;
                comma_separated(f, &clause.items)
            }
            Clause::Skip(expression, _) => write!(f, "SKIP {expression}"),
            Clause::Limit(expression, _) => write!(f, "LIMIT {expression}"),
            Clause::Call(clause) => {
                f.write_str("CALL ")?;
                write_dotted(f, &clause.procedure)?;
                if let Some(arguments) = &clause.arguments {
                    f.write_char('(')?;
                    comma_separated(f, arguments)?;
                    f.write_char(')')?;
                }
                if let Some(items) = &clause.yield_items {
                    f.write_str(" YIELD ")?;
                    comma_separated(f, items)?;
                }
                write_where(f, &clause.where_clause)
            }
        }
    }
}

impl Display for SetItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SetItem::Property { target, value, .. } => write!(f, "{target} = {value}"),
            SetItem::Variable {
                variable, value, ..
            } => write!(f, "{} = {value}", Name(variable)),
            SetItem::MergeVariable {
                variable, value, ..
            } => write!(f, "{} += {value}", Name(variable)),
            SetItem::MergeProperty { target, value, .. } => write!(f, "{target} += {value}"),
            SetItem::Labels {
                variable, labels, ..
            } => {
                Name(variable).fmt(f)?;
                write_labels(f, labels)
            }
        }
    }
}

impl Display for RemoveItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RemoveItem::Property(target) => target.fmt(f),
            RemoveItem::Labels {
                variable, labels, ..
            } => {
                Name(variable).fmt(f)?;
                write_labels(f, labels)
            }
        }
    }
}

impl Display for PropertyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", Name(&self.variable), Symbol(&self.key))
    }
}

impl Display for SortItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.expression.fmt(f)?;
        match self.direction {
            SortDirection::Ascending => Ok(()),
            SortDirection::Descending => f.write_str(" DESC"),
        }
    }
}

impl Display for YieldItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Name(&self.name).fmt(f)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", Name(alias))?;
        }
        Ok(())
    }
}

impl Display for Projection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        comma_separated(f, &self.items)
    }
}

impl Display for ProjectionItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionItem::Wildcard(_) => f.write_char('*'),
            ProjectionItem::Expression {
                expression, alias, ..
            } => {
                expression.fmt(f)?;
                if let Some(alias) = alias {
                    write!(f, " AS {}", Name(alias))?;
                }
                Ok(())
            }
        }
    }
}

// ============================================================================
// Patterns
// ============================================================================

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(alias) = &self.alias {
            write!(f, "{} = ", Name(alias))?;
        }
        self.start.fmt(f)?;
        for link in &self.chain {
            write!(f, "{}{}", link.relationship, link.node)?;
        }
        Ok(())
    }
}

impl Display for NodePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('(')?;
        if let Some(variable) = &self.variable {
            Name(variable).fmt(f)?;
        }
        write_labels(f, &self.labels)?;
        if let Some(properties) = &self.properties {
            if self.variable.is_some() || !self.labels.is_empty() {
                f.write_char(' ')?;
            }
            properties.fmt(f)?;
        }
        f.write_char(')')
    }
}

impl Display for RelationshipPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut detail = String::new();
        if let Some(variable) = &self.variable {
            write!(detail, "{}", Name(variable))?;
        }
        for (i, kind) in self.types.iter().enumerate() {
            detail.push(if i == 0 { ':' } else { '|' });
            write!(detail, "{}", Symbol(kind))?;
        }
        if let Some(length) = &self.length {
            write!(detail, "{length}")?;
        }
        if let Some(properties) = &self.properties {
            if !detail.is_empty() {
                detail.push(' ');
            }
            write!(detail, "{properties}")?;
        }

        let (left, right) = match self.direction {
            Direction::Outgoing => ("-", "->"),
            Direction::Incoming => ("<-", "-"),
            Direction::Undirected => ("-", "-"),
        };
        if detail.is_empty() {
            write!(f, "{left}{right}")
        } else {
            write!(f, "{left}[{detail}]{right}")
        }
    }
}

impl Display for VariableLength {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('*')?;
        match (self.min, self.max) {
            (None, None) => Ok(()),
            (Some(min), Some(max)) if min == max => write!(f, "{min}"),
            (Some(min), Some(max)) => write!(f, "{min}..{max}"),
            (Some(min), None) => write!(f, "{min}.."),
            (None, Some(max)) => write!(f, "..{max}"),
        }
    }
}

impl Display for Properties {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Properties::Map(entries, _) => write_map(f, entries),
            Properties::Parameter(name, _) => write!(f, "${name}"),
        }
    }
}

impl Display for MapEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", Symbol(&self.key), self.value)
    }
}

fn write_map(f: &mut Formatter<'_>, entries: &[MapEntry]) -> fmt::Result {
    f.write_char('{')?;
    comma_separated(f, entries)?;
    f.write_char('}')
}

// ============================================================================
// Expressions
// ============================================================================

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(text) | Literal::Float(text) => f.write_str(text),
            Literal::String(value) => write_string_literal(f, value),
            Literal::Boolean(true) => f.write_str("TRUE"),
            Literal::Boolean(false) => f.write_str("FALSE"),
            Literal::Null => f.write_str("NULL"),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(literal, _) => literal.fmt(f),
            Expression::Variable(name, _) => Name(name).fmt(f),
            Expression::Parameter(name, _) => write!(f, "${name}"),
            Expression::Property(target, key, _) => write!(f, "{target}.{}", Symbol(key)),
            Expression::Index(target, index, _) => write!(f, "{target}[{index}]"),
            Expression::Slice(target, from, to, _) => {
                write!(f, "{target}[")?;
                if let Some(from) = from {
                    from.fmt(f)?;
                }
                f.write_str("..")?;
                if let Some(to) = to {
                    to.fmt(f)?;
                }
                f.write_char(']')
            }
            Expression::List(items, _) => {
                f.write_char('[')?;
                comma_separated(f, items)?;
                f.write_char(']')
            }
            Expression::ListComprehension(lc) => {
                write!(f, "[{} IN {}", Name(&lc.variable), lc.source)?;
                write_where(f, &lc.filter)?;
                if let Some(projection) = &lc.projection {
                    write!(f, " | {projection}")?;
                }
                f.write_char(']')
            }
            Expression::PatternComprehension(pc) => {
                write!(f, "[{}", pc.pattern)?;
                write_where(f, &pc.filter)?;
                write!(f, " | {}]", pc.projection)
            }
            Expression::PatternPredicate(pattern) => pattern.fmt(f),
            Expression::Map(entries, _) => write_map(f, entries),
            Expression::MapProjection(mp) => {
                write!(f, "{} {{", Name(&mp.variable))?;
                comma_separated(f, &mp.items)?;
                f.write_char('}')
            }
            Expression::FunctionCall(call) => {
                write_dotted(f, &call.name)?;
                f.write_char('(')?;
                comma_separated(f, &call.arguments)?;
                f.write_char(')')
            }
            Expression::Case(case) => case.fmt(f),
            Expression::Unary(UnaryOperator::Negate, operand, _) => write!(f, "-{operand}"),
            Expression::Unary(UnaryOperator::Not, operand, _) => write!(f, "(NOT {operand})"),
            Expression::Binary(op, left, right, _) => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            Expression::Comparison(op, left, right, _) => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            Expression::Logical(op, left, right, _) => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            Expression::StringPredicate(op, left, right, _) => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            Expression::In(left, right, _) => write!(f, "({left} IN {right})"),
            Expression::IsNull(operand, false, _) => write!(f, "({operand} IS NULL)"),
            Expression::IsNull(operand, true, _) => write!(f, "({operand} IS NOT NULL)"),
            Expression::LabelCheck(target, labels, _) => {
                target.fmt(f)?;
                write_labels(f, labels)
            }
            Expression::Distinct(operand, _) => write!(f, "DISTINCT {operand}"),
            Expression::Star(_) => f.write_char('*'),
            Expression::Error(_) => f.write_str("<error>"),
        }
    }
}

impl Display for MapProjectionItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MapProjectionItem::Property(key, _) => write!(f, ".{}", Symbol(key)),
            MapProjectionItem::AllProperties(_) => f.write_str(".*"),
            MapProjectionItem::Entry(entry) => entry.fmt(f),
            MapProjectionItem::Variable(name, _) => Name(name).fmt(f),
        }
    }
}

impl Display for CaseExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("CASE")?;
        if let Some(operand) = &self.operand {
            write!(f, " {operand}")?;
        }
        for branch in &self.branches {
            write!(f, " WHEN {} THEN {}", branch.when, branch.then)?;
        }
        if let Some(default) = &self.default {
            write!(f, " ELSE {default}")?;
        }
        f.write_str(" END")
    }
}
