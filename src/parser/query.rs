//! Query and clause parsing.
//!
//! ```text
//! query        := ['CYPHER' number] single_query ('UNION' ['ALL'] single_query)*
//! single_query := clause+
//! ```

use crate::ast::{
    CallClause, Clause, CreateClause, DeleteClause, MatchClause, MatchKind, MergeAction,
    MergeClause, MergeTrigger, OrderByClause, Projection, ProjectionItem, PropertyPath, Query,
    QueryBody, RemoveClause, RemoveItem, ReturnClause, SetClause, SetItem, SingleQuery,
    SortDirection, SortItem, UnwindClause, WithClause, YieldItem,
};
use crate::diag::{EXPECTED_TOKEN, UNEXPECTED_TOKEN};
use crate::lexer::token::TokenKind;
use crate::parser::QueryParser;
use crate::parser::base::{ParseResult, error_at};
use smol_str::SmolStr;
use tracing::trace;

impl QueryParser<'_> {
    /// Parses a whole query and requires the input to end after it.
    pub(crate) fn parse_query(&mut self) -> ParseResult<Query> {
        let start = self.stream.start();
        let version = self.parse_version()?;

        let mut body = QueryBody::Single(self.parse_single_query()?);
        let mut height = 1;
        while self.stream.consume(&TokenKind::Union) {
            height += 1;
            self.check_height(height)?;
            let all = self.stream.consume(&TokenKind::All);
            let right = self.parse_single_query()?;
            let span = body.span().start..right.span.end;
            body = QueryBody::Union {
                all,
                left: Box::new(body),
                right,
                span,
            };
        }

        if !self.stream.is_eof() {
            return Err(self.unexpected("expected a clause or end of input"));
        }

        Ok(Query {
            version,
            body,
            span: self.stream.span_from(start),
        })
    }

    fn parse_version(&mut self) -> ParseResult<Option<SmolStr>> {
        if !self.stream.consume(&TokenKind::Cypher) {
            return Ok(None);
        }
        let token = self.stream.current();
        match &token.kind {
            TokenKind::IntegerLiteral(text) | TokenKind::FloatLiteral(text) => {
                self.stream.advance();
                Ok(Some(text.clone()))
            }
            _ => Err(self.stream.error_here(
                EXPECTED_TOKEN,
                format!("expected a version number, found {}", token.describe()),
            )),
        }
    }

    fn parse_single_query(&mut self) -> ParseResult<SingleQuery> {
        let start = self.stream.start();
        let mut clauses = Vec::new();
        while self.at_clause_start() {
            clauses.push(self.parse_clause()?);
        }
        if clauses.is_empty() {
            return Err(self.unexpected("expected a clause"));
        }
        trace!(clauses = clauses.len(), "parsed single query");
        Ok(SingleQuery {
            clauses,
            span: self.stream.span_from(start),
        })
    }

    fn at_clause_start(&self) -> bool {
        let kind = self.stream.nth_kind(0);
        kind.starts_clause() && *kind != TokenKind::Union
    }

    fn parse_clause(&mut self) -> ParseResult<Clause> {
        let start = self.stream.start();
        let token = self.stream.bump();
        let clause = match token.kind {
            TokenKind::Match => Clause::Match(self.parse_match(MatchKind::Regular, start)?),
            TokenKind::Optional => {
                self.stream.expect(TokenKind::Match)?;
                Clause::Match(self.parse_match(MatchKind::Optional, start)?)
            }
            TokenKind::Mandatory => {
                self.stream.expect(TokenKind::Match)?;
                Clause::Match(self.parse_match(MatchKind::Mandatory, start)?)
            }
            TokenKind::Create => Clause::Create(CreateClause {
                patterns: self.parse_pattern_list()?,
                span: self.stream.span_from(start),
            }),
            TokenKind::Merge => Clause::Merge(self.parse_merge(start)?),
            TokenKind::Set => Clause::Set(SetClause {
                items: self.parse_set_items()?,
                span: self.stream.span_from(start),
            }),
            TokenKind::Delete => Clause::Delete(self.parse_delete(false, start)?),
            TokenKind::Detach => {
                self.stream.expect(TokenKind::Delete)?;
                Clause::Delete(self.parse_delete(true, start)?)
            }
            TokenKind::Remove => Clause::Remove(self.parse_remove(start)?),
            TokenKind::With => {
                let projection = self.parse_projection()?;
                let where_clause = self.parse_optional_where()?;
                Clause::With(WithClause {
                    projection,
                    where_clause,
                    span: self.stream.span_from(start),
                })
            }
            TokenKind::Unwind => {
                let expression = self.parse_expression()?;
                self.stream.expect(TokenKind::As)?;
                let (alias, _) = self.expect_variable("an alias")?;
                Clause::Unwind(UnwindClause {
                    expression,
                    alias,
                    span: self.stream.span_from(start),
                })
            }
            TokenKind::Return => Clause::Return(ReturnClause {
                projection: self.parse_projection()?,
                span: self.stream.span_from(start),
            }),
            TokenKind::Order => {
                self.stream.expect(TokenKind::By)?;
                Clause::OrderBy(self.parse_order_by(start)?)
            }
            TokenKind::Skip => {
                let expression = self.parse_expression()?;
                Clause::Skip(expression, self.stream.span_from(start))
            }
            TokenKind::Limit => {
                let expression = self.parse_expression()?;
                Clause::Limit(expression, self.stream.span_from(start))
            }
            TokenKind::Call => Clause::Call(self.parse_call(start)?),
            _ => {
                return Err(Box::new(error_at(
                    token,
                    UNEXPECTED_TOKEN,
                    format!("unexpected {}: expected a clause", token.describe()),
                )));
            }
        };
        trace!(keyword = %token.kind, "parsed clause");
        Ok(clause)
    }

    fn parse_match(&mut self, kind: MatchKind, start: usize) -> ParseResult<MatchClause> {
        let patterns = self.parse_pattern_list()?;
        let where_clause = self.parse_optional_where()?;
        Ok(MatchClause {
            kind,
            patterns,
            where_clause,
            span: self.stream.span_from(start),
        })
    }

    fn parse_merge(&mut self, start: usize) -> ParseResult<MergeClause> {
        let patterns = self.parse_pattern_list()?;

        let mut actions = Vec::new();
        while self.stream.check(&TokenKind::On) {
            let action_start = self.stream.start();
            self.stream.advance();
            let trigger = if self.stream.consume(&TokenKind::Create) {
                MergeTrigger::OnCreate
            } else if self.stream.consume(&TokenKind::Match) {
                MergeTrigger::OnMatch
            } else {
                return Err(self.stream.error_here(
                    EXPECTED_TOKEN,
                    format!(
                        "expected 'CREATE' or 'MATCH', found {}",
                        self.stream.current().describe()
                    ),
                ));
            };
            self.stream.expect(TokenKind::Set)?;
            let items = self.parse_set_items()?;
            actions.push(MergeAction {
                trigger,
                items,
                span: self.stream.span_from(action_start),
            });
        }

        Ok(MergeClause {
            patterns,
            actions,
            span: self.stream.span_from(start),
        })
    }

    fn parse_set_items(&mut self) -> ParseResult<Vec<SetItem>> {
        let mut items = vec![self.parse_set_item()?];
        while self.stream.consume(&TokenKind::Comma) {
            items.push(self.parse_set_item()?);
        }
        Ok(items)
    }

    /// One of `a.k = v`, `a.k += v`, `a = v`, `a += v`, `a:L1:L2`.
    fn parse_set_item(&mut self) -> ParseResult<SetItem> {
        let start = self.stream.start();
        let (variable, _) = self.expect_variable("a variable")?;

        match self.stream.nth_kind(0) {
            TokenKind::Dot => {
                self.stream.advance();
                let (key, _) = self.expect_symbolic_name("a property key")?;
                let target = PropertyPath {
                    variable,
                    key,
                    span: self.stream.span_from(start),
                };
                let merge = self.parse_assignment_operator()?;
                let value = self.parse_expression()?;
                let span = self.stream.span_from(start);
                Ok(if merge {
                    SetItem::MergeProperty {
                        target,
                        value,
                        span,
                    }
                } else {
                    SetItem::Property {
                        target,
                        value,
                        span,
                    }
                })
            }
            TokenKind::Colon => {
                let labels = self.parse_label_list()?;
                Ok(SetItem::Labels {
                    variable,
                    labels,
                    span: self.stream.span_from(start),
                })
            }
            _ => {
                let merge = self.parse_assignment_operator()?;
                let value = self.parse_expression()?;
                let span = self.stream.span_from(start);
                Ok(if merge {
                    SetItem::MergeVariable {
                        variable,
                        value,
                        span,
                    }
                } else {
                    SetItem::Variable {
                        variable,
                        value,
                        span,
                    }
                })
            }
        }
    }

    /// Consumes `=` or `+=`, returning true for `+=`.
    fn parse_assignment_operator(&mut self) -> ParseResult<bool> {
        if self.stream.consume(&TokenKind::Eq) {
            Ok(false)
        } else if self.stream.consume(&TokenKind::PlusEq) {
            Ok(true)
        } else {
            Err(self.stream.error_here(
                EXPECTED_TOKEN,
                format!(
                    "expected '=' or '+=', found {}",
                    self.stream.current().describe()
                ),
            ))
        }
    }

    fn parse_delete(&mut self, detach: bool, start: usize) -> ParseResult<DeleteClause> {
        let mut expressions = vec![self.parse_expression()?];
        while self.stream.consume(&TokenKind::Comma) {
            expressions.push(self.parse_expression()?);
        }
        Ok(DeleteClause {
            detach,
            expressions,
            span: self.stream.span_from(start),
        })
    }

    fn parse_remove(&mut self, start: usize) -> ParseResult<RemoveClause> {
        let mut items = vec![self.parse_remove_item()?];
        while self.stream.consume(&TokenKind::Comma) {
            items.push(self.parse_remove_item()?);
        }
        Ok(RemoveClause {
            items,
            span: self.stream.span_from(start),
        })
    }

    fn parse_remove_item(&mut self) -> ParseResult<RemoveItem> {
        let start = self.stream.start();
        let (variable, _) = self.expect_variable("a variable")?;
        if self.stream.consume(&TokenKind::Dot) {
            let (key, _) = self.expect_symbolic_name("a property key")?;
            return Ok(RemoveItem::Property(PropertyPath {
                variable,
                key,
                span: self.stream.span_from(start),
            }));
        }
        let labels = self.parse_label_list()?;
        Ok(RemoveItem::Labels {
            variable,
            labels,
            span: self.stream.span_from(start),
        })
    }

    /// `[DISTINCT] (* | expr [AS alias]), ...`
    fn parse_projection(&mut self) -> ParseResult<Projection> {
        let start = self.stream.start();
        let distinct = self.stream.consume(&TokenKind::Distinct);

        let mut items = vec![self.parse_projection_item()?];
        while self.stream.consume(&TokenKind::Comma) {
            items.push(self.parse_projection_item()?);
        }
        Ok(Projection {
            distinct,
            items,
            span: self.stream.span_from(start),
        })
    }

    fn parse_projection_item(&mut self) -> ParseResult<ProjectionItem> {
        let start = self.stream.start();
        if self.stream.check(&TokenKind::Star) {
            let span = self.stream.bump().span.clone();
            return Ok(ProjectionItem::Wildcard(span));
        }
        let expression = self.parse_expression()?;
        let alias = self.parse_optional_alias()?;
        Ok(ProjectionItem::Expression {
            expression,
            alias,
            span: self.stream.span_from(start),
        })
    }

    fn parse_optional_alias(&mut self) -> ParseResult<Option<SmolStr>> {
        if self.stream.consume(&TokenKind::As) {
            Ok(Some(self.expect_variable("an alias")?.0))
        } else {
            Ok(None)
        }
    }

    fn parse_order_by(&mut self, start: usize) -> ParseResult<OrderByClause> {
        let mut items = vec![self.parse_sort_item()?];
        while self.stream.consume(&TokenKind::Comma) {
            items.push(self.parse_sort_item()?);
        }
        Ok(OrderByClause {
            items,
            span: self.stream.span_from(start),
        })
    }

    fn parse_sort_item(&mut self) -> ParseResult<SortItem> {
        let start = self.stream.start();
        let expression = self.parse_expression()?;
        let direction = match self.stream.nth_kind(0) {
            TokenKind::Asc | TokenKind::Ascending => {
                self.stream.advance();
                SortDirection::Ascending
            }
            TokenKind::Desc | TokenKind::Descending => {
                self.stream.advance();
                SortDirection::Descending
            }
            _ => SortDirection::default(),
        };
        Ok(SortItem {
            expression,
            direction,
            span: self.stream.span_from(start),
        })
    }

    /// `CALL a.b.proc[(args)] [YIELD name [AS alias], ...] [WHERE expr]`
    fn parse_call(&mut self, start: usize) -> ParseResult<CallClause> {
        let mut procedure = vec![self.expect_symbolic_name("a procedure name")?.0];
        while self.stream.consume(&TokenKind::Dot) {
            procedure.push(self.expect_symbolic_name("a procedure name")?.0);
        }

        let arguments = if self.stream.consume(&TokenKind::LParen) {
            let arguments = self.parse_expression_list(&TokenKind::RParen)?;
            self.stream.expect(TokenKind::RParen)?;
            Some(arguments)
        } else {
            None
        };

        let yield_items = if self.stream.consume(&TokenKind::Yield) {
            let mut items = vec![self.parse_yield_item()?];
            while self.stream.consume(&TokenKind::Comma) {
                items.push(self.parse_yield_item()?);
            }
            Some(items)
        } else {
            None
        };

        let where_clause = self.parse_optional_where()?;
        Ok(CallClause {
            procedure,
            arguments,
            yield_items,
            where_clause,
            span: self.stream.span_from(start),
        })
    }

    fn parse_yield_item(&mut self) -> ParseResult<YieldItem> {
        let start = self.stream.start();
        let (name, _) = self.expect_variable("a result field")?;
        let alias = self.parse_optional_alias()?;
        Ok(YieldItem {
            name,
            alias,
            span: self.stream.span_from(start),
        })
    }
}
