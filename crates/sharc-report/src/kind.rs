//! Classification of diagnostic reports

use std::fmt;

use crate::{Level, Report};

/// What went wrong, independent of where.
///
/// Each kind carries a default severity; a report may override it with
/// [`Report::with_level`]. The kind name appears in brackets in the
/// rendered header, e.g. `error[unterminated-string-literal]: ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// The command line could not be understood.
    ArgumentParserError,

    /// A file could not be read or written.
    IoError,

    /// A verb on the command line names no known pipeline stage.
    UnknownVerb,

    /// A character the lexer has no rule for.
    UnexpectedCharacter,

    /// A string literal ran to end of file without a closing quote.
    UnterminatedStringLiteral,

    /// A character literal without a closing quote.
    UnterminatedCharLiteral,

    /// A block comment still open at end of file.
    UnterminatedBlockComment,

    /// A backslash escape the language does not define.
    InvalidEscapeSequence,

    /// An integer literal that does not fit in 64 bits.
    IntegerLiteralOverflow,

    /// `''` — a character literal with nothing in it.
    EmptyCharLiteral,
}

impl ReportKind {
    /// The default severity for this kind.
    pub fn level(self) -> Level {
        match self {
            ReportKind::ArgumentParserError | ReportKind::IoError | ReportKind::UnknownVerb => {
                Level::Fatal
            }
            ReportKind::UnexpectedCharacter
            | ReportKind::UnterminatedStringLiteral
            | ReportKind::UnterminatedCharLiteral
            | ReportKind::UnterminatedBlockComment
            | ReportKind::InvalidEscapeSequence
            | ReportKind::IntegerLiteralOverflow
            | ReportKind::EmptyCharLiteral => Level::Error,
        }
    }

    /// Kebab-case name used in rendered headers.
    pub fn name(self) -> &'static str {
        match self {
            ReportKind::ArgumentParserError => "argument-parser-error",
            ReportKind::IoError => "io-error",
            ReportKind::UnknownVerb => "unknown-verb",
            ReportKind::UnexpectedCharacter => "unexpected-character",
            ReportKind::UnterminatedStringLiteral => "unterminated-string-literal",
            ReportKind::UnterminatedCharLiteral => "unterminated-char-literal",
            ReportKind::UnterminatedBlockComment => "unterminated-block-comment",
            ReportKind::InvalidEscapeSequence => "invalid-escape-sequence",
            ReportKind::IntegerLiteralOverflow => "integer-literal-overflow",
            ReportKind::EmptyCharLiteral => "empty-char-literal",
        }
    }

    /// Start a report of this kind.
    ///
    /// This is the entry point every stage uses:
    ///
    /// ```
    /// use sharc_report::ReportKind;
    ///
    /// let report = ReportKind::UnknownVerb
    ///     .title("unknown verb `fly`")
    ///     .with_help("known verbs are `check` and `lex`");
    /// assert_eq!(report.kind, ReportKind::UnknownVerb);
    /// ```
    pub fn title(self, title: impl Into<String>) -> Report {
        Report::new(self, title)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
