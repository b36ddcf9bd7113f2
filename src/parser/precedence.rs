//! Operator precedence table for the expression engine.
//!
//! Rows run from loosest to tightest binding. Property access, indexing,
//! slicing and label checks bind tighter than anything here and are applied
//! while an operand is parsed, so they have no row.

use crate::ast::{
    BinaryOperator, ComparisonOperator, LogicalOperator, StringOperator, UnaryOperator,
};
use crate::lexer::token::TokenKind;

/// How operators of equal binding group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
    /// `a < b < c` is rejected
    NonAssoc,
}

/// Where an operator sits relative to its operand(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    Prefix,
    Infix,
    Postfix,
}

/// One level of the precedence table.
#[derive(Debug)]
pub struct Level {
    pub binding: u8,
    pub fixity: Fixity,
    pub assoc: Assoc,
    pub tokens: &'static [TokenKind],
}

pub const PRECEDENCE_TABLE: &[Level] = &[
    Level {
        binding: 1,
        fixity: Fixity::Prefix,
        assoc: Assoc::Right,
        tokens: &[TokenKind::Distinct],
    },
    Level {
        binding: 2,
        fixity: Fixity::Prefix,
        assoc: Assoc::Right,
        tokens: &[TokenKind::Not],
    },
    Level {
        binding: 3,
        fixity: Fixity::Infix,
        assoc: Assoc::Left,
        tokens: &[TokenKind::Or, TokenKind::Xor],
    },
    Level {
        binding: 4,
        fixity: Fixity::Infix,
        assoc: Assoc::Left,
        tokens: &[TokenKind::And],
    },
    Level {
        binding: 5,
        fixity: Fixity::Infix,
        assoc: Assoc::NonAssoc,
        tokens: &[
            TokenKind::Eq,
            TokenKind::NotEq,
            TokenKind::Lt,
            TokenKind::LtEq,
            TokenKind::Gt,
            TokenKind::GtEq,
            TokenKind::In,
        ],
    },
    Level {
        binding: 6,
        fixity: Fixity::Infix,
        assoc: Assoc::Left,
        tokens: &[TokenKind::StartsWith, TokenKind::EndsWith, TokenKind::Contains],
    },
    Level {
        binding: 6,
        fixity: Fixity::Postfix,
        assoc: Assoc::Left,
        tokens: &[TokenKind::IsNull, TokenKind::IsNotNull],
    },
    Level {
        binding: 7,
        fixity: Fixity::Infix,
        assoc: Assoc::Left,
        tokens: &[TokenKind::Plus, TokenKind::Minus],
    },
    Level {
        binding: 8,
        fixity: Fixity::Infix,
        assoc: Assoc::Left,
        tokens: &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent],
    },
    Level {
        binding: 9,
        fixity: Fixity::Infix,
        assoc: Assoc::Right,
        tokens: &[TokenKind::Caret],
    },
    Level {
        binding: 10,
        fixity: Fixity::Prefix,
        assoc: Assoc::Right,
        tokens: &[TokenKind::Minus],
    },
];

/// Looks up the row for `kind` used with the given fixity.
///
/// `-` has both an infix and a prefix row; the engine knows which one applies
/// from whether it is expecting an operand.
pub fn lookup(kind: &TokenKind, fixity: Fixity) -> Option<&'static Level> {
    PRECEDENCE_TABLE
        .iter()
        .find(|level| level.fixity == fixity && level.tokens.contains(kind))
}

/// Operators applied before their operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Distinct,
    Unary(UnaryOperator),
}

impl PrefixOperator {
    pub fn from_token(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Distinct => Some(PrefixOperator::Distinct),
            TokenKind::Not => Some(PrefixOperator::Unary(UnaryOperator::Not)),
            TokenKind::Minus => Some(PrefixOperator::Unary(UnaryOperator::Negate)),
            _ => None,
        }
    }
}

/// Operators between two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Binary(BinaryOperator),
    Comparison(ComparisonOperator),
    Logical(LogicalOperator),
    String(StringOperator),
    In,
}

impl InfixOperator {
    pub fn from_token(kind: &TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Or => InfixOperator::Logical(LogicalOperator::Or),
            TokenKind::Xor => InfixOperator::Logical(LogicalOperator::Xor),
            TokenKind::And => InfixOperator::Logical(LogicalOperator::And),
            TokenKind::Eq => InfixOperator::Comparison(ComparisonOperator::Eq),
            TokenKind::NotEq => InfixOperator::Comparison(ComparisonOperator::NotEq),
            TokenKind::Lt => InfixOperator::Comparison(ComparisonOperator::Lt),
            TokenKind::LtEq => InfixOperator::Comparison(ComparisonOperator::LtEq),
            TokenKind::Gt => InfixOperator::Comparison(ComparisonOperator::Gt),
            TokenKind::GtEq => InfixOperator::Comparison(ComparisonOperator::GtEq),
            TokenKind::In => InfixOperator::In,
            TokenKind::StartsWith => InfixOperator::String(StringOperator::StartsWith),
            TokenKind::EndsWith => InfixOperator::String(StringOperator::EndsWith),
            TokenKind::Contains => InfixOperator::String(StringOperator::Contains),
            TokenKind::Plus => InfixOperator::Binary(BinaryOperator::Add),
            TokenKind::Minus => InfixOperator::Binary(BinaryOperator::Subtract),
            TokenKind::Star => InfixOperator::Binary(BinaryOperator::Multiply),
            TokenKind::Slash => InfixOperator::Binary(BinaryOperator::Divide),
            TokenKind::Percent => InfixOperator::Binary(BinaryOperator::Modulo),
            TokenKind::Caret => InfixOperator::Binary(BinaryOperator::Power),
            _ => return None,
        };
        Some(op)
    }
}
