//! Lexical analysis for Cypher.
//!
//! Scanning happens in two layers. [`RawToken`] is a `logos` DFA that carves
//! the source into lexemes and tracks line numbers. [`Lexer`] sits on top of
//! it: it folds identifiers into keywords, decodes string escapes, reports
//! illegal input as diagnostics and merges multi-word operators such as
//! `STARTS WITH` and `IS NOT NULL` into single tokens.

pub mod keywords;
pub mod token;

use crate::diag::{Diag, ILLEGAL_CHARACTER, UNCLOSED_DELIMITER};
use logos::{Logos, Skip};
use smol_str::SmolStr;
use token::{Token, TokenKind};
use tracing::trace;

/// Result of lexical analysis.
///
/// Contains both the tokens produced and any diagnostics encountered during scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerResult {
    /// The tokens produced, including an EOF token at the end.
    pub tokens: Vec<Token>,
    /// Diagnostics (errors, warnings) encountered during lexing.
    pub diagnostics: Vec<Diag>,
}

/// Line bookkeeping carried through the raw lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTracker {
    /// Current 1-based line.
    pub line: usize,
}

impl Default for LineTracker {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Whether a number lexeme had a fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Integer,
    Float,
}

/// Raw lexemes recognized by the DFA, before keyword folding.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = LineTracker)]
#[logos(skip r"[ \t\r\f]+")]
pub enum RawToken {
    // Skipped by their callbacks.
    #[token("\n", newline)]
    Newline,
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", block_comment)]
    BlockComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\**")]
    UnclosedComment,

    #[regex("[0-9]+", number)]
    Number(NumberKind),

    #[regex(r"'([^'\\\n]|\\[^\n])*'")]
    SingleQuoted,
    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    DoubleQuoted,
    #[regex(r#"'([^'\\\n]|\\[^\n])*\\?"#)]
    #[regex(r#""([^"\\\n]|\\[^\n])*\\?"#)]
    UnclosedString,

    #[regex(r"`([^`\\]|\\(.|\n))*`")]
    Backtick,
    #[regex(r"`([^`\\]|\\(.|\n))*\\?")]
    UnclosedBacktick,

    #[regex("[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*")]
    Param,

    #[token("+")]
    Plus,
    #[token("+=")]
    PlusEq,
    #[token("-")]
    Minus,
    #[token("->")]
    Arrow,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("=")]
    Eq,
    #[token("<>")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("|")]
    Pipe,
    #[token("..")]
    DotDot,
    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
}

fn newline(lex: &mut logos::Lexer<RawToken>) -> Skip {
    lex.extras.line += 1;
    Skip
}

fn block_comment(lex: &mut logos::Lexer<RawToken>) -> Skip {
    lex.extras.line += count_newlines(lex.slice());
    Skip
}

/// Extends an integer lexeme over a `.digits` fraction.
///
/// Done by hand so that `1..3` stays `1`, `..`, `3`.
fn number(lex: &mut logos::Lexer<RawToken>) -> NumberKind {
    let rest = lex.remainder().as_bytes();
    if rest.first() == Some(&b'.') {
        let digits = rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits > 0 {
            lex.bump(1 + digits);
            return NumberKind::Float;
        }
    }
    NumberKind::Integer
}

fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

/// A lexical analyzer for Cypher source text.
///
/// Scanning never stops at bad input: illegal characters are reported and
/// skipped, unclosed literals are reported and closed at the end of their line
/// (or input).
pub struct Lexer<'a> {
    /// The source text being lexed.
    source: &'a str,
    /// Accumulated tokens.
    tokens: Vec<Token>,
    /// Accumulated diagnostics.
    diagnostics: Vec<Diag>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Tokenizes the source text and returns the result.
    ///
    /// This consumes the lexer and returns both tokens and diagnostics.
    pub fn tokenize(mut self) -> LexerResult {
        let source = self.source;
        let mut offset = 0;
        let mut lines = LineTracker::default();

        // Each pass runs the DFA until it hits input it cannot match, then
        // restarts it just past the offending character.
        'scan: while offset < source.len() {
            let mut raw = RawToken::lexer_with_extras(&source[offset..], lines);
            while let Some(result) = raw.next() {
                let local = raw.span();
                let span = offset + local.start..offset + local.end;
                let line = raw.extras.line;
                match result {
                    Ok(kind) => {
                        self.push_raw(kind, span, line, raw.slice());
                        if matches!(
                            kind,
                            RawToken::Backtick | RawToken::UnclosedBacktick | RawToken::UnclosedComment
                        ) {
                            raw.extras.line += count_newlines(raw.slice());
                        }
                    }
                    Err(()) => {
                        let Some(ch) = source[span.start..].chars().next() else {
                            break;
                        };
                        self.illegal_character(ch, span.start, line);
                        lines = raw.extras;
                        offset = span.start + ch.len_utf8();
                        continue 'scan;
                    }
                }
            }
            lines = raw.extras;
            break;
        }

        let eof = source.len();
        self.tokens
            .push(Token::new(TokenKind::Eof, eof..eof, lines.line, ""));

        let tokens = merge_multi_word_operators(source, self.tokens);
        trace!(
            tokens = tokens.len(),
            diagnostics = self.diagnostics.len(),
            "tokenized"
        );

        LexerResult {
            tokens,
            diagnostics: self.diagnostics,
        }
    }

    /// Classifies one raw lexeme into a token.
    fn push_raw(&mut self, raw: RawToken, span: crate::ast::Span, line: usize, text: &str) {
        let kind = match raw {
            RawToken::Newline | RawToken::LineComment | RawToken::BlockComment => return,
            RawToken::UnclosedComment => {
                self.unclosed(span, line, "unclosed block comment", "comment starts here");
                return;
            }
            RawToken::Number(NumberKind::Integer) => TokenKind::IntegerLiteral(text.into()),
            RawToken::Number(NumberKind::Float) => TokenKind::FloatLiteral(text.into()),
            RawToken::SingleQuoted | RawToken::DoubleQuoted => {
                TokenKind::StringLiteral(unescape_string(&text[1..text.len() - 1]))
            }
            RawToken::UnclosedString => {
                self.unclosed(span.clone(), line, "unclosed string literal", "string starts here");
                TokenKind::StringLiteral(unescape_string(&text[1..]))
            }
            RawToken::Backtick => TokenKind::Identifier(unescape_backtick(&text[1..text.len() - 1])),
            RawToken::UnclosedBacktick => {
                self.unclosed(
                    span.clone(),
                    line,
                    "unclosed backtick identifier",
                    "identifier starts here",
                );
                TokenKind::Identifier(unescape_backtick(&text[1..]))
            }
            RawToken::Ident => {
                keywords::lookup_keyword(text).unwrap_or_else(|| TokenKind::Identifier(text.into()))
            }
            RawToken::Param => TokenKind::Parameter(text[1..].into()),
            RawToken::Plus => TokenKind::Plus,
            RawToken::PlusEq => TokenKind::PlusEq,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Arrow => TokenKind::Arrow,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::Caret => TokenKind::Caret,
            RawToken::Eq => TokenKind::Eq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::Gt => TokenKind::Gt,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Pipe => TokenKind::Pipe,
            RawToken::DotDot => TokenKind::DotDot,
            RawToken::Dot => TokenKind::Dot,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Comma => TokenKind::Comma,
        };
        self.tokens.push(Token::new(kind, span, line, text));
    }

    fn illegal_character(&mut self, ch: char, pos: usize, line: usize) {
        trace!(%ch, line, "skipping illegal character");
        self.diagnostics.push(
            Diag::error(format!("illegal character '{ch}'"))
                .with_primary_label(pos..pos + ch.len_utf8(), "skipped")
                .with_code(ILLEGAL_CHARACTER)
                .with_line(line)
                .with_lexeme(ch.to_string()),
        );
    }

    fn unclosed(&mut self, span: crate::ast::Span, line: usize, message: &str, label: &str) {
        let lexeme = self.source[span.start..].chars().next().map(String::from);
        let mut diag = Diag::error(message)
            .with_primary_label(span.start..span.end, label)
            .with_code(UNCLOSED_DELIMITER)
            .with_line(line);
        if let Some(lexeme) = lexeme {
            diag = diag.with_lexeme(lexeme);
        }
        self.diagnostics.push(diag);
    }
}

/// Folds `STARTS WITH`, `ENDS WITH`, `IS NULL` and `IS NOT NULL` into single
/// operator tokens. Words must be separated by whitespace only. A word right
/// after `.` is a property key and is never merged.
fn merge_multi_word_operators(source: &str, tokens: Vec<Token>) -> Vec<Token> {
    let mut merged: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        let rest = &tokens[i..];
        let after_dot = merged.last().is_some_and(|prev| prev.kind == TokenKind::Dot);
        let candidate = match rest[0].kind {
            _ if after_dot => None,
            TokenKind::Starts => {
                followed_by(source, rest, &[TokenKind::With]).map(|n| (TokenKind::StartsWith, n))
            }
            TokenKind::Ends => {
                followed_by(source, rest, &[TokenKind::With]).map(|n| (TokenKind::EndsWith, n))
            }
            TokenKind::Is => followed_by(source, rest, &[TokenKind::Null])
                .map(|n| (TokenKind::IsNull, n))
                .or_else(|| {
                    followed_by(source, rest, &[TokenKind::Not, TokenKind::Null])
                        .map(|n| (TokenKind::IsNotNull, n))
                }),
            _ => None,
        };

        match candidate {
            Some((kind, count)) => {
                let first = &rest[0];
                let span = first.span.start..rest[count].span.end;
                let text = &source[span.clone()];
                merged.push(Token::new(kind, span, first.line, text));
                i += count + 1;
            }
            None => {
                merged.push(rest[0].clone());
                i += 1;
            }
        }
    }

    merged
}

/// Returns how many tokens after `tokens[0]` spell out `words`, each preceded
/// by a whitespace-only gap.
fn followed_by(source: &str, tokens: &[Token], words: &[TokenKind]) -> Option<usize> {
    for (n, word) in words.iter().enumerate() {
        let prev = tokens.get(n)?;
        let next = tokens.get(n + 1)?;
        let gap = source.get(prev.span.end..next.span.start)?;
        if &next.kind != word || gap.is_empty() || !gap.chars().all(char::is_whitespace) {
            return None;
        }
    }
    Some(words.len())
}

/// Decodes the body of a quoted string.
///
/// Unknown escapes are kept verbatim, backslash included.
fn unescape_string(body: &str) -> SmolStr {
    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            value.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('r') => value.push('\r'),
            Some('b') => value.push('\u{8}'),
            Some('f') => value.push('\u{c}'),
            Some('\'') => value.push('\''),
            Some('"') => value.push('"'),
            Some('\\') => value.push('\\'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                let decoded = (hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit()))
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(decoded) => {
                        value.push(decoded);
                        for _ in 0..4 {
                            chars.next();
                        }
                    }
                    None => value.push_str("\\u"),
                }
            }
            Some(other) => {
                value.push('\\');
                value.push(other);
            }
            None => value.push('\\'),
        }
    }

    SmolStr::from(value)
}

/// Decodes the body of a backtick-quoted identifier.
fn unescape_backtick(body: &str) -> SmolStr {
    if !body.contains('\\') {
        return SmolStr::from(body);
    }
    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        match (ch, chars.clone().next()) {
            ('\\', Some(next @ ('`' | '\\'))) => {
                value.push(next);
                chars.next();
            }
            _ => value.push(ch),
        }
    }
    SmolStr::from(value)
}

/// Tokenizes the given source text.
///
/// This is the main entry point for lexical analysis.
pub fn tokenize(source: &str) -> LexerResult {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).tokens.into_iter().map(|t| t.kind).collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(name.into())
    }

    #[test]
    fn empty_input() {
        let result = tokenize("");
        assert_eq!(result.tokens.len(), 1); // Just EOF
        assert_eq!(result.tokens[0].kind, TokenKind::Eof);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn whitespace_only() {
        let result = tokenize("   \t\n  ");
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].line, 2);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn keyword_case_insensitive() {
        let result = tokenize("match Match MATCH MaTcH");
        assert_eq!(result.tokens.len(), 5);
        for token in &result.tokens[..4] {
            assert_eq!(token.kind, TokenKind::Match);
        }
        assert_eq!(result.tokens[1].text, "Match");
    }

    #[test]
    fn identifiers_keep_casing() {
        assert_eq!(
            kinds("myVar _test foo123 N"),
            vec![ident("myVar"), ident("_test"), ident("foo123"), ident("N"), TokenKind::Eof]
        );
    }

    #[test]
    fn backtick_identifier_is_never_a_keyword() {
        assert_eq!(
            kinds("`match` `my var` `a\\`b`"),
            vec![ident("match"), ident("my var"), ident("a`b"), TokenKind::Eof]
        );
    }

    #[test]
    fn string_literals_strip_quotes() {
        assert_eq!(
            kinds(r#"'hello' "world""#),
            vec![
                TokenKind::StringLiteral("hello".into()),
                TokenKind::StringLiteral("world".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_escapes() {
        assert_eq!(
            kinds(r#"'it\'s' "a\"b" 'x\ny' 'back\\slash' '\u0041'"#),
            vec![
                TokenKind::StringLiteral("it's".into()),
                TokenKind::StringLiteral("a\"b".into()),
                TokenKind::StringLiteral("x\ny".into()),
                TokenKind::StringLiteral("back\\slash".into()),
                TokenKind::StringLiteral("A".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unknown_escape_is_kept_verbatim() {
        let result = tokenize(r"'a\qb' '\u12'");
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.tokens[0].kind, TokenKind::StringLiteral(r"a\qb".into()));
        assert_eq!(result.tokens[1].kind, TokenKind::StringLiteral(r"\u12".into()));
    }

    #[test]
    fn unclosed_string_runs_to_end_of_line() {
        let result = tokenize("'open\nRETURN");
        assert_eq!(result.tokens[0].kind, TokenKind::StringLiteral("open".into()));
        assert_eq!(result.tokens[1].kind, TokenKind::Return);
        assert_eq!(result.tokens[1].line, 2);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].code.as_deref(), Some(UNCLOSED_DELIMITER));
        assert!(result.diagnostics[0].message.contains("unclosed string"));
    }

    #[test]
    fn numbers() {
        assert_eq!(
            kinds("42 3.14 0"),
            vec![
                TokenKind::IntegerLiteral("42".into()),
                TokenKind::FloatLiteral("3.14".into()),
                TokenKind::IntegerLiteral("0".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn range_is_not_a_float() {
        assert_eq!(
            kinds("1..3"),
            vec![
                TokenKind::IntegerLiteral("1".into()),
                TokenKind::DotDot,
                TokenKind::IntegerLiteral("3".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn trailing_dot_is_property_access() {
        assert_eq!(
            kinds("1.x"),
            vec![
                TokenKind::IntegerLiteral("1".into()),
                TokenKind::Dot,
                ident("x"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn parameters_drop_dollar() {
        let result = tokenize("$name $_1");
        assert_eq!(result.tokens[0].kind, TokenKind::Parameter("name".into()));
        assert_eq!(result.tokens[0].text, "$name");
        assert_eq!(result.tokens[1].kind, TokenKind::Parameter("_1".into()));
    }

    #[test]
    fn operators() {
        assert_eq!(
            kinds("+ += - -> * / % ^ = <> < <= > >= | .. ."),
            vec![
                TokenKind::Plus,
                TokenKind::PlusEq,
                TokenKind::Minus,
                TokenKind::Arrow,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Caret,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Pipe,
                TokenKind::DotDot,
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn incoming_arrow_is_lt_minus() {
        assert_eq!(
            kinds("<--"),
            vec![TokenKind::Lt, TokenKind::Minus, TokenKind::Minus, TokenKind::Eof]
        );
        assert_eq!(
            kinds("-->"),
            vec![TokenKind::Minus, TokenKind::Arrow, TokenKind::Eof]
        );
    }

    #[test]
    fn multi_word_operators() {
        assert_eq!(
            kinds("STARTS WITH ends   with IS NULL is\nnot\tnull"),
            vec![
                TokenKind::StartsWith,
                TokenKind::EndsWith,
                TokenKind::IsNull,
                TokenKind::IsNotNull,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn merged_operator_keeps_first_line_and_full_span() {
        let result = tokenize("x IS\nNOT NULL");
        let token = &result.tokens[1];
        assert_eq!(token.kind, TokenKind::IsNotNull);
        assert_eq!(token.line, 1);
        assert_eq!(token.span, 2..13);
        assert_eq!(token.text, "IS\nNOT NULL");
    }

    #[test]
    fn is_without_null_stays_keyword() {
        assert_eq!(
            kinds("IS NOT x"),
            vec![TokenKind::Is, TokenKind::Not, ident("x"), TokenKind::Eof]
        );
    }

    #[test]
    fn property_key_after_dot_is_not_merged() {
        assert_eq!(
            kinds("n.is NULL"),
            vec![
                ident("n"),
                TokenKind::Dot,
                TokenKind::Is,
                TokenKind::Null,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("n.starts STARTS WITH"),
            vec![
                ident("n"),
                TokenKind::Dot,
                TokenKind::Starts,
                TokenKind::StartsWith,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comment_between_words_blocks_merge() {
        assert_eq!(
            kinds("STARTS /* */ WITH"),
            vec![TokenKind::Starts, TokenKind::With, TokenKind::Eof]
        );
    }

    #[test]
    fn comments_are_discarded() {
        assert_eq!(
            kinds("MATCH // comment\nRETURN /* a\nb */ n"),
            vec![TokenKind::Match, TokenKind::Return, ident("n"), TokenKind::Eof]
        );
    }

    #[test]
    fn block_comment_advances_lines() {
        let result = tokenize("/* one\ntwo\nthree */ RETURN");
        assert_eq!(result.tokens[0].kind, TokenKind::Return);
        assert_eq!(result.tokens[0].line, 3);
    }

    #[test]
    fn unclosed_block_comment_is_reported() {
        let result = tokenize("RETURN 1 /* never closed");
        assert_eq!(result.tokens.len(), 3);
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].message.contains("unclosed block comment"));
    }

    #[test]
    fn illegal_character_is_skipped() {
        let result = tokenize("RETURN 1 @ 2");
        assert_eq!(
            result.tokens.iter().map(|t| t.kind.clone()).collect::<Vec<_>>(),
            vec![
                TokenKind::Return,
                TokenKind::IntegerLiteral("1".into()),
                TokenKind::IntegerLiteral("2".into()),
                TokenKind::Eof,
            ]
        );
        assert_eq!(result.diagnostics.len(), 1);
        let diag = &result.diagnostics[0];
        assert_eq!(diag.code.as_deref(), Some(ILLEGAL_CHARACTER));
        assert_eq!(diag.lexeme.as_deref(), Some("@"));
        assert_eq!(diag.line, Some(1));
        assert_eq!(diag.primary_span(), Some(&(9..10)));
    }

    #[test]
    fn every_illegal_character_is_reported() {
        let result = tokenize("@ # £\n!");
        assert_eq!(result.diagnostics.len(), 4);
        assert_eq!(result.diagnostics[3].line, Some(2));
    }

    #[test]
    fn line_numbers() {
        let result = tokenize("MATCH\n\n(n)\nRETURN n");
        let lines: Vec<usize> = result.tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 3, 3, 3, 4, 4, 4]);
    }

    #[test]
    fn complex_query() {
        let result = tokenize("MATCH (n:Person {name: 'Alice'}) RETURN n.age");
        assert_eq!(result.tokens.len(), 16);
        assert!(result.diagnostics.is_empty());
    }
}
