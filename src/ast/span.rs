//! Source spans shared by tokens, diagnostics, and syntax tree nodes.

use std::ops::Range;

/// A byte range in source text.
/// This is the canonical span type used throughout the parser.
pub type Span = Range<usize>;

/// Returns a span starting where `start` starts and ending where `end` ends.
pub fn join(start: &Span, end: &Span) -> Span {
    start.start..end.end.max(start.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_basic_properties() {
        let span: Span = 5..10;
        assert_eq!(span.start, 5);
        assert_eq!(span.end, 10);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn join_covers_both_spans() {
        assert_eq!(join(&(2..4), &(8..12)), 2..12);
    }

    #[test]
    fn join_never_inverts() {
        let joined = join(&(10..12), &(0..3));
        assert_eq!(joined, 10..10);
        assert!(joined.is_empty());
    }
}
