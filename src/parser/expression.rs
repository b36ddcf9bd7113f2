//! Expression parsing.
//!
//! Operators are handled by a shift-reduce loop over an operand stack and an
//! operator stack, guided by [`PRECEDENCE_TABLE`](super::precedence::PRECEDENCE_TABLE).
//! Operands (literals, variables, lists, maps, calls, CASE, pattern
//! predicates...) are parsed by recursive descent, followed by the postfix
//! chain of property access, subscripts and label checks.

use crate::ast::{
    CaseBranch, CaseExpression, Expression, FunctionCall, ListComprehension, Literal,
    MapProjection, MapProjectionItem, PatternComprehension, Span, join,
};
use crate::diag::{CHAINED_COMPARISON, DiagLabel, EXPECTED_TOKEN};
use crate::lexer::token::TokenKind;
use crate::parser::QueryParser;
use crate::parser::base::{ParseResult, symbolic_name};
use crate::parser::precedence::{Assoc, Fixity, InfixOperator, PrefixOperator, lookup};
use smol_str::SmolStr;

#[derive(Debug, Clone, Copy)]
enum PendingKind {
    Prefix(PrefixOperator),
    Infix(InfixOperator),
}

/// An operator shifted onto the stack, waiting for its right operand.
#[derive(Debug)]
struct PendingOperator {
    kind: PendingKind,
    binding: u8,
    text: SmolStr,
    span: Span,
}

/// Operand and operator stacks. Each operand carries its tree height, and a
/// reduction that would grow past `limit` is refused and flags `too_deep`.
struct ShiftReduce {
    operands: Vec<(Expression, usize)>,
    operators: Vec<PendingOperator>,
    limit: usize,
    too_deep: bool,
}

impl ShiftReduce {
    fn new(limit: usize) -> Self {
        Self {
            operands: Vec::new(),
            operators: Vec::new(),
            limit,
            too_deep: false,
        }
    }

    /// Reduces every pending operator that binds at least as tightly as an
    /// incoming operator of the given binding and associativity.
    fn reduce_above(&mut self, binding: u8, assoc: Assoc) {
        while let Some(top) = self.operators.last() {
            let reduces = top.binding > binding || (top.binding == binding && assoc == Assoc::Left);
            if !reduces || !self.reduce() {
                break;
            }
        }
    }

    /// Pops the top operator and its operands and pushes the combined node.
    fn reduce(&mut self) -> bool {
        let Some(pending) = self.operators.pop() else {
            return false;
        };
        let Some((right, right_height)) = self.operands.pop() else {
            return false;
        };
        let (node, height) = match pending.kind {
            PendingKind::Prefix(op) => {
                let span = pending.span.start..right.span().end;
                let node = match op {
                    PrefixOperator::Distinct => Expression::Distinct(Box::new(right), span),
                    PrefixOperator::Unary(unary) => {
                        Expression::Unary(unary, Box::new(right), span)
                    }
                };
                (node, right_height + 1)
            }
            PendingKind::Infix(op) => {
                let Some((left, left_height)) = self.operands.pop() else {
                    return false;
                };
                (combine(op, left, right), left_height.max(right_height) + 1)
            }
        };
        if height > self.limit {
            self.too_deep = true;
            return false;
        }
        self.operands.push((node, height));
        true
    }

    fn apply_null_check(&mut self, negated: bool, end: usize) {
        if let Some((operand, height)) = self.operands.pop() {
            if height >= self.limit {
                self.too_deep = true;
                return;
            }
            let span = operand.span().start..end;
            self.operands
                .push((Expression::IsNull(Box::new(operand), negated, span), height + 1));
        }
    }

    fn finish(&mut self) -> Option<Expression> {
        while self.reduce() {}
        self.operands.pop().map(|(expression, _)| expression)
    }
}

fn combine(op: InfixOperator, left: Expression, right: Expression) -> Expression {
    let span = join(&left.span(), &right.span());
    let (left, right) = (Box::new(left), Box::new(right));
    match op {
        InfixOperator::Binary(op) => Expression::Binary(op, left, right, span),
        InfixOperator::Comparison(op) => Expression::Comparison(op, left, right, span),
        InfixOperator::Logical(op) => Expression::Logical(op, left, right, span),
        InfixOperator::String(op) => Expression::StringPredicate(op, left, right, span),
        InfixOperator::In => Expression::In(left, right, span),
    }
}

impl QueryParser<'_> {
    /// Parses a complete expression.
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.enter()?;
        let result = self.parse_operator_expression();
        self.leave();
        result
    }

    fn parse_operator_expression(&mut self) -> ParseResult<Expression> {
        let mut stacks = ShiftReduce::new(self.config.max_depth);

        loop {
            // Operand position: shift prefix operators, then one operand.
            loop {
                let token = self.stream.current();
                let (Some(level), Some(op)) = (
                    lookup(&token.kind, Fixity::Prefix),
                    PrefixOperator::from_token(&token.kind),
                ) else {
                    break;
                };
                stacks.operators.push(PendingOperator {
                    kind: PendingKind::Prefix(op),
                    binding: level.binding,
                    text: token.text.clone(),
                    span: token.span.clone(),
                });
                self.stream.advance();
            }
            let operand = self.parse_operand()?;
            stacks.operands.push(operand);

            // Operator position: apply postfix null checks, then either shift
            // an infix operator or stop.
            let token = loop {
                let token = self.stream.current();
                match lookup(&token.kind, Fixity::Postfix) {
                    Some(level) => {
                        stacks.reduce_above(level.binding, level.assoc);
                        stacks.apply_null_check(
                            token.kind == TokenKind::IsNotNull,
                            token.span.end,
                        );
                        if stacks.too_deep {
                            return Err(self.nesting_too_deep());
                        }
                        self.stream.advance();
                    }
                    None => break token,
                }
            };

            let (Some(level), Some(op)) = (
                lookup(&token.kind, Fixity::Infix),
                InfixOperator::from_token(&token.kind),
            ) else {
                break;
            };

            stacks.reduce_above(level.binding, level.assoc);
            if stacks.too_deep {
                return Err(self.nesting_too_deep());
            }
            if level.assoc == Assoc::NonAssoc {
                if let Some(previous) = stacks
                    .operators
                    .last()
                    .filter(|top| top.binding == level.binding)
                {
                    let mut diag = self.stream.error_here(
                        CHAINED_COMPARISON,
                        format!(
                            "chained comparison: '{}' cannot follow '{}' without parentheses",
                            token.text, previous.text
                        ),
                    );
                    diag.labels.push(DiagLabel::secondary(
                        previous.span.clone(),
                        "previous comparison",
                    ));
                    diag.help = Some("combine the comparisons with AND".into());
                    return Err(diag);
                }
            }

            stacks.operators.push(PendingOperator {
                kind: PendingKind::Infix(op),
                binding: level.binding,
                text: token.text.clone(),
                span: token.span.clone(),
            });
            self.stream.advance();
        }

        let finished = stacks.finish();
        if stacks.too_deep {
            return Err(self.nesting_too_deep());
        }
        match finished {
            Some(expression) => Ok(expression),
            None => self.recover_expression(),
        }
    }

    /// Parses an atom followed by its postfix chain, returning it with its
    /// tree height.
    fn parse_operand(&mut self) -> ParseResult<(Expression, usize)> {
        let atom = self.parse_atom()?;
        let height = atom.height();
        self.check_height(height)?;
        self.parse_postfix(atom, height)
    }

    fn parse_atom(&mut self) -> ParseResult<Expression> {
        let token = self.stream.current();
        let span = token.span.clone();
        let literal = match &token.kind {
            TokenKind::IntegerLiteral(text) => Literal::Integer(text.clone()),
            TokenKind::FloatLiteral(text) => Literal::Float(text.clone()),
            TokenKind::StringLiteral(value) => Literal::String(value.clone()),
            TokenKind::True => Literal::Boolean(true),
            TokenKind::False => Literal::Boolean(false),
            TokenKind::Null => Literal::Null,
            TokenKind::Parameter(name) => {
                self.stream.advance();
                return Ok(Expression::Parameter(name.clone(), span));
            }
            TokenKind::Star => {
                self.stream.advance();
                return Ok(Expression::Star(span));
            }
            TokenKind::LParen if self.pattern_predicate_at(0) => {
                let pattern = self.parse_pattern_chain(None, span.start)?;
                return Ok(Expression::PatternPredicate(Box::new(pattern)));
            }
            TokenKind::LParen => return self.parse_parenthesized(),
            TokenKind::LBracket => return self.parse_list(),
            TokenKind::LBrace => {
                let (entries, span) = self.parse_map_entries()?;
                return Ok(Expression::Map(entries, span));
            }
            TokenKind::Case => return self.parse_case(),
            TokenKind::Exists => {
                self.stream.advance();
                return self.parse_call_arguments(vec![SmolStr::new_static("exists")], span.start);
            }
            TokenKind::Identifier(name) => return self.parse_name_atom(name.clone(), span),
            _ => return self.recover_expression(),
        };
        self.stream.advance();
        Ok(Expression::Literal(literal, span))
    }

    fn parse_parenthesized(&mut self) -> ParseResult<Expression> {
        self.stream.expect(TokenKind::LParen)?;
        let inner = self.parse_expression()?;
        self.stream.expect(TokenKind::RParen)?;
        Ok(inner)
    }

    /// Variable, function call or map projection.
    fn parse_name_atom(&mut self, name: SmolStr, span: Span) -> ParseResult<Expression> {
        if self.function_call_ahead() {
            self.stream.advance();
            let mut parts = vec![name];
            while self.stream.consume(&TokenKind::Dot) {
                parts.push(self.expect_symbolic_name("a function name")?.0);
            }
            return self.parse_call_arguments(parts, span.start);
        }

        self.stream.advance();
        if self.stream.check(&TokenKind::LBrace) {
            return self.parse_map_projection(name, span.start);
        }
        Ok(Expression::Variable(name, span))
    }

    /// Returns true if `name(` or `name.part.part(` starts here.
    fn function_call_ahead(&self) -> bool {
        let mut offset = 1;
        while *self.stream.nth_kind(offset) == TokenKind::Dot
            && symbolic_name(self.stream.nth(offset + 1)).is_some()
        {
            offset += 2;
        }
        *self.stream.nth_kind(offset) == TokenKind::LParen
    }

    fn parse_call_arguments(&mut self, name: Vec<SmolStr>, start: usize) -> ParseResult<Expression> {
        self.stream.expect(TokenKind::LParen)?;
        let arguments = self.parse_expression_list(&TokenKind::RParen)?;
        self.stream.expect(TokenKind::RParen)?;
        Ok(Expression::FunctionCall(FunctionCall {
            name,
            arguments,
            span: self.stream.span_from(start),
        }))
    }

    /// Parses `expr, expr, ...` up to (not including) `close`; empty if
    /// `close` comes first.
    pub(super) fn parse_expression_list(&mut self, close: &TokenKind) -> ParseResult<Vec<Expression>> {
        let mut items = Vec::new();
        if self.stream.check(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_expression()?);
            if !self.stream.consume(&TokenKind::Comma) {
                return Ok(items);
            }
        }
    }

    /// `name { .key, .*, key: expr, variable }`
    fn parse_map_projection(&mut self, variable: SmolStr, start: usize) -> ParseResult<Expression> {
        self.stream.expect(TokenKind::LBrace)?;
        let mut items = Vec::new();
        if !self.stream.check(&TokenKind::RBrace) {
            loop {
                items.push(self.parse_map_projection_item()?);
                if !self.stream.consume(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.stream.expect(TokenKind::RBrace)?;
        Ok(Expression::MapProjection(MapProjection {
            variable,
            items,
            span: self.stream.span_from(start),
        }))
    }

    fn parse_map_projection_item(&mut self) -> ParseResult<MapProjectionItem> {
        let start = self.stream.start();
        if self.stream.consume(&TokenKind::Dot) {
            if self.stream.consume(&TokenKind::Star) {
                return Ok(MapProjectionItem::AllProperties(self.stream.span_from(start)));
            }
            let (key, _) = self.expect_symbolic_name("a property key")?;
            return Ok(MapProjectionItem::Property(key, self.stream.span_from(start)));
        }
        if *self.stream.nth_kind(1) == TokenKind::Colon {
            return Ok(MapProjectionItem::Entry(self.parse_map_entry()?));
        }
        let (name, span) = self.expect_variable("a map projection item")?;
        Ok(MapProjectionItem::Variable(name, span))
    }

    /// List literal, list comprehension or pattern comprehension.
    fn parse_list(&mut self) -> ParseResult<Expression> {
        if let (TokenKind::Identifier(_), TokenKind::In) =
            (self.stream.nth_kind(1), self.stream.nth_kind(2))
        {
            return self.parse_list_comprehension();
        }
        if self.pattern_comprehension_at(1) {
            return self.parse_pattern_comprehension();
        }

        let start = self.stream.start();
        self.stream.expect(TokenKind::LBracket)?;
        let items = self.parse_expression_list(&TokenKind::RBracket)?;
        self.stream.expect(TokenKind::RBracket)?;
        Ok(Expression::List(items, self.stream.span_from(start)))
    }

    /// `[x IN list [WHERE predicate] [| projection]]`
    fn parse_list_comprehension(&mut self) -> ParseResult<Expression> {
        let start = self.stream.start();
        self.stream.expect(TokenKind::LBracket)?;
        let (variable, _) = self.expect_variable("a variable")?;
        self.stream.expect(TokenKind::In)?;
        let source = self.parse_expression()?;
        let filter = self.parse_optional_where()?;
        let projection = if self.stream.consume(&TokenKind::Pipe) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.stream.expect(TokenKind::RBracket)?;

        Ok(Expression::ListComprehension(Box::new(ListComprehension {
            variable,
            source,
            filter,
            projection,
            span: self.stream.span_from(start),
        })))
    }

    /// `[pattern [WHERE predicate] | projection]`
    fn parse_pattern_comprehension(&mut self) -> ParseResult<Expression> {
        let start = self.stream.start();
        self.stream.expect(TokenKind::LBracket)?;
        let pattern = self.parse_pattern()?;
        let filter = self.parse_optional_where()?;
        self.stream.expect(TokenKind::Pipe)?;
        let projection = self.parse_expression()?;
        self.stream.expect(TokenKind::RBracket)?;

        Ok(Expression::PatternComprehension(Box::new(
            PatternComprehension {
                pattern,
                filter,
                projection,
                span: self.stream.span_from(start),
            },
        )))
    }

    /// Parses `WHERE expr` if the next token is `WHERE`.
    pub(super) fn parse_optional_where(&mut self) -> ParseResult<Option<Expression>> {
        if self.stream.consume(&TokenKind::Where) {
            Ok(Some(self.parse_expression()?))
        } else {
            Ok(None)
        }
    }

    /// `CASE [operand] (WHEN a THEN b)+ [ELSE c] END`
    fn parse_case(&mut self) -> ParseResult<Expression> {
        let start = self.stream.expect(TokenKind::Case)?.start;
        let operand = if self.stream.check(&TokenKind::When) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        let mut branches = Vec::new();
        while self.stream.check(&TokenKind::When) {
            let branch_start = self.stream.start();
            self.stream.advance();
            let when = self.parse_expression()?;
            self.stream.expect(TokenKind::Then)?;
            let then = self.parse_expression()?;
            branches.push(CaseBranch {
                when,
                then,
                span: self.stream.span_from(branch_start),
            });
        }
        if branches.is_empty() {
            return Err(self.stream.error_here(
                EXPECTED_TOKEN,
                format!("expected 'WHEN', found {}", self.stream.current().describe()),
            ));
        }

        let default = if self.stream.consume(&TokenKind::Else) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.stream.expect(TokenKind::End)?;

        Ok(Expression::Case(Box::new(CaseExpression {
            operand,
            branches,
            default,
            span: self.stream.span_from(start),
        })))
    }

    /// Applies `.key`, `[index]`, `[from..to]` and `:Label` suffixes.
    fn parse_postfix(
        &mut self,
        mut expr: Expression,
        mut height: usize,
    ) -> ParseResult<(Expression, usize)> {
        loop {
            let start = expr.span().start;
            let (next, inner_height) = match self.stream.nth_kind(0) {
                TokenKind::Dot => {
                    self.stream.advance();
                    let (key, _) = self.expect_symbolic_name("a property key")?;
                    let span = self.stream.span_from(start);
                    (Expression::Property(Box::new(expr), key, span), 0)
                }
                TokenKind::LBracket => self.parse_subscript(expr)?,
                TokenKind::Colon if symbolic_name(self.stream.nth(1)).is_some() => {
                    let labels = self.parse_label_list()?;
                    let span = self.stream.span_from(start);
                    (Expression::LabelCheck(Box::new(expr), labels, span), 0)
                }
                _ => return Ok((expr, height)),
            };
            height = height.max(inner_height) + 1;
            self.check_height(height)?;
            expr = next;
        }
    }

    /// Parses `[index]` or `[from..to]` applied to `target`. Also returns the
    /// height of the tallest bound.
    fn parse_subscript(&mut self, target: Expression) -> ParseResult<(Expression, usize)> {
        let start = target.span().start;
        self.stream.expect(TokenKind::LBracket)?;

        let from = if self.stream.check(&TokenKind::DotDot) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        match from {
            Some(index) if !self.stream.check(&TokenKind::DotDot) => {
                self.stream.expect(TokenKind::RBracket)?;
                let height = index.height();
                let node = Expression::Index(
                    Box::new(target),
                    Box::new(index),
                    self.stream.span_from(start),
                );
                Ok((node, height))
            }
            from => {
                self.stream.expect(TokenKind::DotDot)?;
                let to = if self.stream.check(&TokenKind::RBracket) {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                self.stream.expect(TokenKind::RBracket)?;
                let height = [&from, &to]
                    .into_iter()
                    .flatten()
                    .map(Expression::height)
                    .max()
                    .unwrap_or(0);
                let node = Expression::Slice(
                    Box::new(target),
                    from.map(Box::new),
                    to.map(Box::new),
                    self.stream.span_from(start),
                );
                Ok((node, height))
            }
        }
    }
}
