//! Diagnostic report construction

use std::fmt;

use crate::{Level, ReportKind, Span};

/// One diagnostic: what went wrong, how bad it is, and where.
///
/// Built with the fluent methods starting from [`ReportKind::title`]:
///
/// ```
/// use sharc_report::{Level, ReportKind, SourceMap, Span};
///
/// let mut sources = SourceMap::new();
/// let file = sources.add("main.shd", "let s = \"abc\n");
/// let report = ReportKind::UnterminatedStringLiteral
///     .title("string literal is missing a closing quote")
///     .with_span(Span::new(file, 8, 13))
///     .with_label("started here")
///     .with_note("string literals may span multiple lines");
/// assert_eq!(report.level, Level::Error);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Classification of the problem
    pub kind: ReportKind,

    /// Severity, defaulting to [`ReportKind::level`]
    pub level: Level,

    /// One-line description
    pub title: String,

    /// Primary location, if the problem points at source text
    pub span: Option<Span>,

    /// Short label printed under the underline
    pub label: Option<String>,

    /// Additional `= note:` lines
    pub notes: Vec<String>,

    /// Optional `= help:` line
    pub help: Option<String>,
}

impl Report {
    /// Create a report with the kind's default severity.
    pub fn new(kind: ReportKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            level: kind.level(),
            title: title.into(),
            span: None,
            label: None,
            notes: Vec::new(),
            help: None,
        }
    }

    /// Point the report at a source range.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Label the underlined range.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Append a `= note:` line.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Set the `= help:` line.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Override the kind's default severity.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

impl fmt::Display for Report {
    /// Bare one-line form, used for logging. Full rendering with source
    /// context is the job of [`crate::Renderer`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.level, self.kind, self.title)
    }
}
