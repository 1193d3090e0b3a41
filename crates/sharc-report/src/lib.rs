//! # sharc-report
//!
//! Diagnostics engine for the Shard compiler front-end.
//!
//! Every stage of the compiler communicates problems through the same
//! pipeline: it builds a [`Report`] (a severity [`Level`], a [`ReportKind`],
//! a title, and optionally a [`Span`] into a registered source file), emits
//! it into a [`ReportSink`], and the driver renders the collected reports at
//! the end of the run with a [`Renderer`].
//!
//! ## Architecture
//!
//! ```text
//! Stage → Report → [ReportSink] → Renderer + SourceMap → terminal
//! ```
//!
//! Severity filtering happens at render time only: a report below the
//! configured threshold is never printed, but errors still fail the run.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kind;
pub mod level;
pub mod render;
pub mod report;
pub mod sink;
pub mod source;

// Re-export main types
pub use kind::ReportKind;
pub use level::{InvalidLevel, Level};
pub use render::Renderer;
pub use report::Report;
pub use sink::ReportSink;
pub use source::{FileId, LineCol, SourceError, SourceFile, SourceMap, Span};

/// sharc-report version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
