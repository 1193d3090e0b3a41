//! Diagnostic severity levels

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Severity of a diagnostic report.
///
/// Variants are declared from most to least severe, and the derived
/// ordering reflects that: `Fatal < Error < Warn < Note < Silent`.
/// `Silent` is a threshold-only value — no report is ever emitted at that
/// level, but selecting it as the reporting threshold suppresses all
/// output (the run still fails if errors were collected).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// The run cannot continue (bad arguments, unreadable input).
    Fatal,

    /// The input is invalid; no artifact will be produced.
    Error,

    /// Suspicious but valid input.
    #[default]
    Warn,

    /// Informational detail attached to the run.
    Note,

    /// Threshold-only: print nothing.
    Silent,
}

impl Level {
    /// Whether a report at `report` severity should be printed under this
    /// threshold.
    ///
    /// The default threshold (`Warn`) shows fatal, error and warn reports
    /// and hides notes. `Silent` permits nothing.
    pub fn permits(self, report: Level) -> bool {
        self != Level::Silent && report <= self
    }

    /// Whether this severity fails the run.
    pub fn is_error(self) -> bool {
        matches!(self, Level::Fatal | Level::Error)
    }

    /// Lowercase name, as printed in report headers.
    pub fn name(self) -> &'static str {
        match self {
            Level::Fatal => "fatal",
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Note => "note",
            Level::Silent => "silent",
        }
    }

    /// ANSI color sequence for headers at this severity.
    pub(crate) fn color(self) -> &'static str {
        match self {
            Level::Fatal | Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Note | Level::Silent => "\x1b[36m",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown level name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid level `{0}` (expected fatal|error|warn|note|silent)")]
pub struct InvalidLevel(
    /// The rejected level name.
    pub String,
);

impl FromStr for Level {
    type Err = InvalidLevel;

    /// Accepts the full names and the single-letter aliases used by the
    /// `--error-level` flag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "f" | "fatal" => Ok(Level::Fatal),
            "e" | "error" => Ok(Level::Error),
            "w" | "warn" => Ok(Level::Warn),
            "n" | "note" => Ok(Level::Note),
            "s" | "silent" => Ok(Level::Silent),
            _ => Err(InvalidLevel(s.to_string())),
        }
    }
}
