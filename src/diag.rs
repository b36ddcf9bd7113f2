//! Diagnostic model for lexical and syntax errors.
//!
//! The lexer and parser never print. Every problem they find is recorded as a
//! [`Diag`] and handed back to the caller, who may render it through miette
//! with [`convert_diagnostics_to_reports`].

use crate::ast::Span;
use miette::{Diagnostic, LabeledSpan, Report, Severity};
use smol_str::SmolStr;
use std::fmt;

/// Illegal character skipped by the lexer.
pub const ILLEGAL_CHARACTER: &str = "L001";
/// String, backtick identifier or block comment missing its closing delimiter.
pub const UNCLOSED_DELIMITER: &str = "L002";
/// An expression was required but the token cannot start one.
pub const EXPECTED_EXPRESSION: &str = "P001";
/// A specific token was required.
pub const EXPECTED_TOKEN: &str = "P002";
/// A token that fits no production at this point.
pub const UNEXPECTED_TOKEN: &str = "P003";
/// Two non-associative comparisons in a row.
pub const CHAINED_COMPARISON: &str = "P004";
/// A numeric bound that does not fit the target type.
pub const NUMBER_OUT_OF_RANGE: &str = "P005";
/// Nesting deeper than the configured limit.
pub const NESTING_TOO_DEEP: &str = "P006";

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagSeverity {
    /// A problem that makes the parse fail.
    Error,
    /// A suspicious construct that still parses.
    Warning,
    /// An informational note or advice.
    Note,
}

impl fmt::Display for DiagSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagSeverity::Error => write!(f, "error"),
            DiagSeverity::Warning => write!(f, "warning"),
            DiagSeverity::Note => write!(f, "note"),
        }
    }
}

/// Role of a diagnostic label in the overall diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    /// The primary location related to this diagnostic.
    Primary,
    /// A secondary or supporting location.
    Secondary,
}

/// A labeled span within a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagLabel {
    /// The span this label refers to.
    pub span: Span,
    /// The label text explaining this span's relevance.
    pub message: String,
    /// Whether this is a primary or secondary label.
    pub role: LabelRole,
}

impl DiagLabel {
    /// Creates a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            role: LabelRole::Primary,
        }
    }

    /// Creates a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            role: LabelRole::Secondary,
        }
    }
}

/// A structured diagnostic message.
///
/// Besides the labeled spans used for rendering, a diagnostic records the
/// 1-based source line and the offending lexeme so callers can point at the
/// defect without re-scanning the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    /// The severity level of this diagnostic.
    pub severity: DiagSeverity,
    /// The main diagnostic message.
    pub message: String,
    /// Labeled spans showing relevant source locations.
    pub labels: Vec<DiagLabel>,
    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,
    /// Additional notes providing context or related information.
    pub notes: Vec<String>,
    /// Diagnostic code, see the constants in this module.
    pub code: Option<String>,
    /// Source line (1-based) of the primary location.
    pub line: Option<usize>,
    /// The offending lexeme, `None` at end of input.
    pub lexeme: Option<SmolStr>,
}

impl Diag {
    /// Creates a new diagnostic with the given severity and message.
    pub fn new(severity: DiagSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            labels: Vec::new(),
            help: None,
            notes: Vec::new(),
            code: None,
            line: None,
            lexeme: None,
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagSeverity::Error, message)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagSeverity::Warning, message)
    }

    /// Adds a primary label to this diagnostic.
    pub fn with_primary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(DiagLabel::primary(span, message));
        self
    }

    /// Adds a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(DiagLabel::secondary(span, message));
        self
    }

    /// Sets the help text for this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Sets the diagnostic code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the source line of the primary location.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Records the offending lexeme.
    pub fn with_lexeme(mut self, lexeme: impl Into<SmolStr>) -> Self {
        self.lexeme = Some(lexeme.into());
        self
    }

    /// Returns true for diagnostics that make a parse fail.
    pub fn is_error(&self) -> bool {
        self.severity == DiagSeverity::Error
    }

    /// Returns true for diagnostics raised while tokenizing.
    pub fn is_lexical(&self) -> bool {
        self.code.as_deref().is_some_and(|code| code.starts_with('L'))
    }

    /// Returns the span of the first primary label, if any.
    pub fn primary_span(&self) -> Option<&Span> {
        self.labels
            .iter()
            .find(|label| label.role == LabelRole::Primary)
            .map(|label| &label.span)
    }
}

impl fmt::Display for Diag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(code) = &self.code {
            write!(f, "[{code}]")?;
        }
        if let Some(line) = self.line {
            write!(f, " (line {line})")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// A wrapper around source text for diagnostic rendering.
///
/// Spans are validated against the actual source bounds before they reach
/// miette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    content: String,
    name: Option<String>,
}

impl SourceFile {
    /// Creates a new source file from the given content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: None,
        }
    }

    /// Creates a new source file with a name.
    pub fn with_name(content: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: Some(name.into()),
        }
    }

    /// Returns the source content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the source file name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Clamps a span to valid bounds within this source.
    pub fn clamp_span(&self, span: &Span) -> Span {
        let len = self.content.len();
        let start = span.start.min(len);
        let end = span.end.min(len).max(start);
        start..end
    }
}

impl miette::SourceCode for SourceFile {
    fn read_span<'a>(
        &'a self,
        span: &miette::SourceSpan,
        context_lines_before: usize,
        context_lines_after: usize,
    ) -> Result<Box<dyn miette::SpanContents<'a> + 'a>, miette::MietteError> {
        self.content
            .read_span(span, context_lines_before, context_lines_after)
    }
}

/// Converts diagnostics to miette reports carrying the source text.
pub fn convert_diagnostics_to_reports(diagnostics: &[Diag], source: &SourceFile) -> Vec<Report> {
    diagnostics
        .iter()
        .map(|diag| convert_diag_to_report(diag, source))
        .collect()
}

/// Converts a single diagnostic to a miette report.
///
/// Out-of-bounds spans are clamped instead of rejected.
pub fn convert_diag_to_report(diag: &Diag, source: &SourceFile) -> Report {
    let report = Report::new(build_diagnostic(diag, source));

    if let Some(name) = source.name() {
        report.with_source_code(miette::NamedSource::new(name, source.content().to_string()))
    } else {
        report.with_source_code(source.content().to_string())
    }
}

pub(crate) fn build_diagnostic(diag: &Diag, source: &SourceFile) -> BuiltDiagnostic {
    let labels = diag
        .labels
        .iter()
        .map(|label| {
            let clamped = source.clamp_span(&label.span);
            let span = (clamped.start, clamped.end - clamped.start);
            match label.role {
                LabelRole::Primary => {
                    LabeledSpan::new_primary_with_span(Some(label.message.clone()), span)
                }
                LabelRole::Secondary => {
                    LabeledSpan::new_with_span(Some(label.message.clone()), span)
                }
            }
        })
        .collect();

    let message = match diag.line {
        Some(line) => format!("{} (line {line})", diag.message),
        None => diag.message.clone(),
    };

    BuiltDiagnostic {
        message,
        severity: match diag.severity {
            DiagSeverity::Error => Severity::Error,
            DiagSeverity::Warning => Severity::Warning,
            DiagSeverity::Note => Severity::Advice,
        },
        code: diag.code.clone(),
        help: diag.help.clone(),
        labels,
        related: diag.notes.iter().cloned().map(NoteDiagnostic).collect(),
    }
}

/// A diagnostic in the shape miette renders.
#[derive(Debug)]
pub(crate) struct BuiltDiagnostic {
    message: String,
    severity: Severity,
    code: Option<String>,
    help: Option<String>,
    labels: Vec<LabeledSpan>,
    related: Vec<NoteDiagnostic>,
}

#[derive(Debug)]
struct NoteDiagnostic(String);

impl fmt::Display for NoteDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for BuiltDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for BuiltDiagnostic {}
impl std::error::Error for NoteDiagnostic {}

impl Diagnostic for BuiltDiagnostic {
    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.code
            .as_ref()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            None
        } else {
            Some(Box::new(self.labels.clone().into_iter()))
        }
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        if self.related.is_empty() {
            None
        } else {
            Some(Box::new(
                self.related.iter().map(|diag| diag as &dyn Diagnostic),
            ))
        }
    }
}

impl Diagnostic for NoteDiagnostic {
    fn severity(&self) -> Option<Severity> {
        Some(Severity::Advice)
    }
}
