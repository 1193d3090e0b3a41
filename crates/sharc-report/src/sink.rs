//! Report collection and run outcome

use std::io::{self, Write};

use crate::{Level, Renderer, Report, SourceMap};

/// Collects every report a run produces and remembers the counts.
///
/// Stages emit into the sink as they go; the driver drains it once at the
/// end. Draining clears the stored reports but keeps the counts, because
/// the exit code depends on how many errors were collected, not on how
/// many the severity threshold allowed to print.
#[derive(Debug, Clone, Default)]
pub struct ReportSink {
    reports: Vec<Report>,
    counts: [usize; 4],
}

impl ReportSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a report.
    pub fn emit(&mut self, report: Report) {
        if let Some(slot) = Self::slot(report.level) {
            self.counts[slot] += 1;
        }
        self.reports.push(report);
    }

    /// Reports collected and not yet drained, in emission order.
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// How many reports were emitted at `level`, drained or not.
    pub fn count(&self, level: Level) -> usize {
        Self::slot(level).map_or(0, |slot| self.counts[slot])
    }

    /// Total fatal and error reports.
    pub fn error_count(&self) -> usize {
        self.count(Level::Fatal) + self.count(Level::Error)
    }

    /// Whether the run succeeded so far.
    pub fn ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Render every report `threshold` permits into `out`, in emission
    /// order, separated by blank lines. Returns how many were printed.
    ///
    /// All reports are removed, including suppressed ones; the counts are
    /// retained.
    pub fn drain_to<W: io::Write>(
        &mut self,
        out: &mut W,
        renderer: &Renderer,
        sources: &SourceMap,
        threshold: Level,
    ) -> io::Result<usize> {
        let mut printed = 0;
        for report in self.reports.drain(..) {
            if !threshold.permits(report.level) {
                continue;
            }
            if printed > 0 {
                writeln!(out)?;
            }
            out.write_all(renderer.render(&report, sources).as_bytes())?;
            printed += 1;
        }
        Ok(printed)
    }

    fn slot(level: Level) -> Option<usize> {
        match level {
            Level::Fatal => Some(0),
            Level::Error => Some(1),
            Level::Warn => Some(2),
            Level::Note => Some(3),
            Level::Silent => None,
        }
    }
}
