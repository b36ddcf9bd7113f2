//! Graph pattern parsing.
//!
//! ```text
//! pattern      := [name '='] node (relationship node)*
//! node         := '(' [var] (':' label)* [map | $param] ')'
//! relationship := ['<'] '-' ['[' detail ']'] ('-' | '->')
//! detail       := [var] [':' type ('|' [':'] type)*] ['*' [min] ['..' [max]]] [map | $param]
//! ```

use crate::ast::{
    Direction, MapEntry, NodePattern, Pattern, PatternLink, Properties, RelationshipPattern, Span,
    VariableLength,
};
use crate::diag::NUMBER_OUT_OF_RANGE;
use crate::lexer::token::TokenKind;
use crate::parser::QueryParser;
use crate::parser::base::ParseResult;
use smol_str::SmolStr;

/// Everything between the brackets of `-[...]-`.
#[derive(Default)]
struct RelationshipDetail {
    variable: Option<SmolStr>,
    types: Vec<SmolStr>,
    length: Option<VariableLength>,
    properties: Option<Properties>,
}

impl QueryParser<'_> {
    /// Parses a comma-separated list of patterns.
    pub(super) fn parse_pattern_list(&mut self) -> ParseResult<Vec<Pattern>> {
        let mut patterns = vec![self.parse_pattern()?];
        while self.stream.consume(&TokenKind::Comma) {
            patterns.push(self.parse_pattern()?);
        }
        Ok(patterns)
    }

    /// Parses a pattern with an optional `name =` prefix.
    pub(super) fn parse_pattern(&mut self) -> ParseResult<Pattern> {
        let start = self.stream.start();
        let alias = match (self.stream.nth_kind(0), self.stream.nth_kind(1)) {
            (TokenKind::Identifier(name), TokenKind::Eq) => {
                self.stream.advance();
                self.stream.advance();
                Some(name.clone())
            }
            _ => None,
        };
        self.parse_pattern_chain(alias, start)
    }

    /// Parses `node (relationship node)*`.
    pub(super) fn parse_pattern_chain(
        &mut self,
        alias: Option<SmolStr>,
        start: usize,
    ) -> ParseResult<Pattern> {
        let first = self.parse_node_pattern()?;
        let mut chain = Vec::new();
        while self.relationship_at(0) {
            let relationship = self.parse_relationship_pattern()?;
            let node = self.parse_node_pattern()?;
            chain.push(PatternLink { relationship, node });
        }
        Ok(Pattern {
            alias,
            start: first,
            chain,
            span: self.stream.span_from(start),
        })
    }

    fn parse_node_pattern(&mut self) -> ParseResult<NodePattern> {
        let start = self.stream.start();
        self.stream.expect(TokenKind::LParen)?;

        let variable = self.optional_variable();
        let labels = if self.stream.check(&TokenKind::Colon) {
            self.parse_label_list()?
        } else {
            Vec::new()
        };
        let properties = self.parse_properties()?;
        self.stream.expect(TokenKind::RParen)?;

        Ok(NodePattern {
            variable,
            labels,
            properties,
            span: self.stream.span_from(start),
        })
    }

    fn parse_relationship_pattern(&mut self) -> ParseResult<RelationshipPattern> {
        let start = self.stream.start();
        let incoming = self.stream.consume(&TokenKind::Lt);
        self.stream.expect(TokenKind::Minus)?;

        let detail = if self.stream.consume(&TokenKind::LBracket) {
            let detail = self.parse_relationship_detail()?;
            self.stream.expect(TokenKind::RBracket)?;
            detail
        } else {
            RelationshipDetail::default()
        };

        let direction = if self.stream.check(&TokenKind::Arrow) {
            if incoming {
                return Err(self.unexpected("a relationship cannot point both ways"));
            }
            self.stream.advance();
            Direction::Outgoing
        } else {
            self.stream.expect(TokenKind::Minus)?;
            if incoming {
                Direction::Incoming
            } else {
                Direction::Undirected
            }
        };

        Ok(RelationshipPattern {
            direction,
            variable: detail.variable,
            types: detail.types,
            length: detail.length,
            properties: detail.properties,
            span: self.stream.span_from(start),
        })
    }

    fn parse_relationship_detail(&mut self) -> ParseResult<RelationshipDetail> {
        let variable = self.optional_variable();

        let mut types = Vec::new();
        if self.stream.consume(&TokenKind::Colon) {
            types.push(self.expect_symbolic_name("a relationship type")?.0);
            while self.stream.consume(&TokenKind::Pipe) {
                self.stream.consume(&TokenKind::Colon);
                types.push(self.expect_symbolic_name("a relationship type")?.0);
            }
        }

        let length = if self.stream.consume(&TokenKind::Star) {
            Some(self.parse_variable_length()?)
        } else {
            None
        };

        Ok(RelationshipDetail {
            variable,
            types,
            length,
            properties: self.parse_properties()?,
        })
    }

    /// Parses what follows `*`: nothing, `n`, `n..`, `..m` or `n..m`.
    fn parse_variable_length(&mut self) -> ParseResult<VariableLength> {
        let min = self.parse_length_bound()?;
        if self.stream.consume(&TokenKind::DotDot) {
            let max = self.parse_length_bound()?;
            Ok(VariableLength { min, max })
        } else {
            Ok(VariableLength { min, max: min })
        }
    }

    fn parse_length_bound(&mut self) -> ParseResult<Option<u32>> {
        let TokenKind::IntegerLiteral(text) = self.stream.nth_kind(0) else {
            return Ok(None);
        };
        match text.parse::<u32>() {
            Ok(bound) => {
                self.stream.advance();
                Ok(Some(bound))
            }
            Err(_) => Err(self.stream.error_here(
                NUMBER_OUT_OF_RANGE,
                format!("relationship length bound '{text}' is out of range"),
            )),
        }
    }

    /// Parses an optional `{map}` or `$param` property constraint.
    pub(super) fn parse_properties(&mut self) -> ParseResult<Option<Properties>> {
        let token = self.stream.current();
        match &token.kind {
            TokenKind::LBrace => {
                let (entries, span) = self.parse_map_entries()?;
                Ok(Some(Properties::Map(entries, span)))
            }
            TokenKind::Parameter(name) => {
                self.stream.advance();
                Ok(Some(Properties::Parameter(name.clone(), token.span.clone())))
            }
            _ => Ok(None),
        }
    }

    /// Parses `{key: value, ...}`.
    pub(super) fn parse_map_entries(&mut self) -> ParseResult<(Vec<MapEntry>, Span)> {
        let start = self.stream.start();
        self.stream.expect(TokenKind::LBrace)?;

        let mut entries = Vec::new();
        if !self.stream.consume(&TokenKind::RBrace) {
            loop {
                entries.push(self.parse_map_entry()?);
                if !self.stream.consume(&TokenKind::Comma) {
                    break;
                }
            }
            self.stream.expect(TokenKind::RBrace)?;
        }
        Ok((entries, self.stream.span_from(start)))
    }

    pub(super) fn parse_map_entry(&mut self) -> ParseResult<MapEntry> {
        let start = self.stream.start();
        let (key, _) = self.expect_symbolic_name("a map key")?;
        self.stream.expect(TokenKind::Colon)?;
        let value = self.parse_expression()?;
        Ok(MapEntry {
            key,
            value,
            span: self.stream.span_from(start),
        })
    }

    fn optional_variable(&mut self) -> Option<SmolStr> {
        match self.stream.nth_kind(0) {
            TokenKind::Identifier(name) => {
                self.stream.advance();
                Some(name.clone())
            }
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Lookahead used to tell patterns apart from expressions
    // ------------------------------------------------------------------

    /// Returns true if a relationship (`-[`, `--`, `->`, `<-[`, `<--`)
    /// starts `offset` tokens ahead.
    pub(super) fn relationship_at(&self, offset: usize) -> bool {
        match self.stream.nth_kind(offset) {
            TokenKind::Minus => matches!(
                self.stream.nth_kind(offset + 1),
                TokenKind::LBracket | TokenKind::Minus | TokenKind::Arrow
            ),
            TokenKind::Lt => {
                *self.stream.nth_kind(offset + 1) == TokenKind::Minus
                    && matches!(
                        self.stream.nth_kind(offset + 2),
                        TokenKind::LBracket | TokenKind::Minus | TokenKind::Arrow
                    )
            }
            _ => false,
        }
    }

    /// Returns true if the tokens at `offset` open something shaped like a
    /// node pattern: `()`, `(:`, `({`, `($`, or a name followed by one of
    /// those.
    fn node_opens_at(&self, offset: usize) -> bool {
        if *self.stream.nth_kind(offset) != TokenKind::LParen {
            return false;
        }
        let after_open = |kind: &TokenKind| {
            matches!(
                kind,
                TokenKind::RParen | TokenKind::Colon | TokenKind::LBrace | TokenKind::Parameter(_)
            )
        };
        match self.stream.nth_kind(offset + 1) {
            TokenKind::Identifier(_) => after_open(self.stream.nth_kind(offset + 2)),
            kind => after_open(kind),
        }
    }

    /// Returns the offset just past the `)` matching the `(` at `offset`.
    fn after_closing_paren(&self, offset: usize) -> Option<usize> {
        let mut nesting = 0usize;
        let mut cursor = offset;
        loop {
            match self.stream.nth_kind(cursor) {
                TokenKind::LParen => nesting += 1,
                TokenKind::RParen => {
                    nesting -= 1;
                    if nesting == 0 {
                        return Some(cursor + 1);
                    }
                }
                TokenKind::Eof => return None,
                _ => {}
            }
            cursor += 1;
        }
    }

    /// Returns true if a node at `offset` is followed by a relationship, so
    /// the parenthesized group starts a pattern rather than an expression.
    pub(super) fn pattern_predicate_at(&self, offset: usize) -> bool {
        self.node_opens_at(offset)
            && self
                .after_closing_paren(offset)
                .is_some_and(|after| self.relationship_at(after))
    }

    /// Returns true if a list opened just before `offset` holds a pattern
    /// comprehension: an optionally named node followed by a relationship,
    /// `WHERE` or `|`.
    pub(super) fn pattern_comprehension_at(&self, offset: usize) -> bool {
        let node = match (self.stream.nth_kind(offset), self.stream.nth_kind(offset + 1)) {
            (TokenKind::Identifier(_), TokenKind::Eq) => offset + 2,
            _ => offset,
        };
        if !self.node_opens_at(node) {
            return false;
        }
        match self.after_closing_paren(node) {
            Some(after) => {
                self.relationship_at(after)
                    || matches!(
                        self.stream.nth_kind(after),
                        TokenKind::Where | TokenKind::Pipe
                    )
            }
            None => false,
        }
    }
}
