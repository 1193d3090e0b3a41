//! Human-readable rendering of reports
//!
//! Rendering is separated from collection so the driver can decide once,
//! at the end of a run, how reports are presented: with or without ANSI
//! color (terminal detection) and with or without the source snippet
//! (`--no-context`).

use crate::{Report, SourceFile, SourceMap, Span};

const BOLD: &str = "\x1b[1m";
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

/// Formats a [`Report`] against a [`SourceMap`].
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Emit ANSI escape sequences.
    pub color: bool,

    /// Include the source line and caret underline for spanned reports.
    pub context: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            color: false,
            context: true,
        }
    }
}

impl Renderer {
    /// Plain renderer with code context and no color.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render one report to a string, without a trailing blank line.
    ///
    /// The header is always present. The location line and snippet appear
    /// only when the report has a span pointing into a file registered in
    /// `sources`; the snippet additionally requires `context`.
    pub fn render(&self, report: &Report, sources: &SourceMap) -> String {
        let mut out = String::new();
        self.push_header(&mut out, report);

        let located = report
            .span
            .and_then(|span| sources.file(span.file).map(|file| (span, file)));

        match located {
            Some((span, file)) => {
                let at = file.locate(span.start);
                let gutter = at.line.to_string().len();
                out.push_str(&format!(
                    "{pad:gutter$}{arrow} {name}:{line}:{col}\n",
                    pad = "",
                    arrow = self.paint(BLUE, "-->"),
                    name = file.name,
                    line = at.line,
                    col = at.column,
                ));
                if self.context {
                    self.push_snippet(&mut out, report, span, file, gutter);
                }
                self.push_footers(&mut out, report, gutter);
            }
            None => self.push_footers(&mut out, report, 1),
        }
        out
    }

    fn push_header(&self, out: &mut String, report: &Report) {
        if self.color {
            out.push_str(&format!(
                "{color}{BOLD}{level}[{kind}]{RESET}: {BOLD}{title}{RESET}\n",
                color = report.level.color(),
                level = report.level,
                kind = report.kind,
                title = report.title,
            ));
        } else {
            out.push_str(&format!(
                "{}[{}]: {}\n",
                report.level, report.kind, report.title
            ));
        }
    }

    /// The framed source line with a caret underline:
    ///
    /// ```text
    ///   |
    /// 3 |     let s = "abc
    ///   |             ^^^^ started here
    /// ```
    fn push_snippet(
        &self,
        out: &mut String,
        report: &Report,
        span: Span,
        file: &SourceFile,
        gutter: usize,
    ) {
        let at = file.locate(span.start);
        let line_text = file.line_text(at.line).unwrap_or("");
        let line_start = file.line_start(at.line).unwrap_or(0);
        let line_end = line_start + line_text.len();

        // Spans snap to char boundaries so a mid-character offset cannot
        // panic the slice below.
        let mut start = span.start.min(file.text.len());
        while !file.text.is_char_boundary(start) {
            start -= 1;
        }

        // Underline is clamped to the first line of multi-line spans.
        let caret_len = if start < line_end {
            let mut end = span.end.min(line_end).max(start);
            while !file.text.is_char_boundary(end) {
                end -= 1;
            }
            file.text[start..end].chars().count().max(1)
        } else {
            1
        };

        let bar = self.paint(BLUE, "|");
        out.push_str(&format!("{pad:gutter$} {bar}\n", pad = ""));
        out.push_str(&format!(
            "{num} {bar} {line_text}\n",
            num = self.paint(BLUE, &at.line.to_string()),
        ));
        let carets = self.paint(report.level.color(), &"^".repeat(caret_len));
        let label = match &report.label {
            Some(label) => format!(" {label}"),
            None => String::new(),
        };
        out.push_str(&format!(
            "{pad:gutter$} {bar} {blank:blanks$}{carets}{label}\n",
            pad = "",
            blank = "",
            blanks = at.column - 1,
        ));
    }

    fn push_footers(&self, out: &mut String, report: &Report, gutter: usize) {
        let eq = self.paint(BLUE, "=");
        for note in &report.notes {
            out.push_str(&format!("{pad:gutter$} {eq} note: {note}\n", pad = ""));
        }
        if let Some(help) = &report.help {
            out.push_str(&format!("{pad:gutter$} {eq} help: {help}\n", pad = ""));
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}
