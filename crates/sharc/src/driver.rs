//! Compilation driver
//!
//! The driver owns the run: it resolves the verbs given on the command
//! line, loads the input file into the source map, executes each stage,
//! and finally drains the report sink to the terminal. Stages communicate
//! only through reports, so a failing stage never aborts the process
//! mid-run — the exit code is decided once, from the sink.

use std::fs;
use std::io::{self, IsTerminal, Write};

use tracing::debug;

use sharc_report::{FileId, Renderer, ReportKind, ReportSink, SourceMap};

use crate::args::Args;
use crate::lexer::{Lexer, Token};

/// A pipeline stage selectable as a verb on the command line.
///
/// An empty verb list means [`Verb::Check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Tokenize and report diagnostics; produce no artifact.
    Check,

    /// Tokenize and write a `line:col: token` listing to the output file.
    Lex,
}

impl Verb {
    /// Resolve a command-line verb name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "check" => Some(Verb::Check),
            "lex" => Some(Verb::Lex),
            _ => None,
        }
    }

    /// The name this verb is selected by.
    pub fn name(self) -> &'static str {
        match self {
            Verb::Check => "check",
            Verb::Lex => "lex",
        }
    }
}

/// Orchestrates one compiler invocation.
pub struct Driver {
    args: Args,
    sources: SourceMap,
    sink: ReportSink,
}

impl Driver {
    /// Create a driver for the given command line.
    pub fn new(args: Args) -> Self {
        Self {
            args,
            sources: SourceMap::new(),
            sink: ReportSink::new(),
        }
    }

    /// Run the stages, print the permitted reports to stderr, and return
    /// whether the run succeeded.
    pub fn run(&mut self) -> bool {
        self.run_stages();
        let color = io::stderr().is_terminal();
        let mut stderr = io::stderr().lock();
        self.print_reports(&mut stderr, color).ok();
        self.sink.ok()
    }

    /// Execute the verbs without printing anything. Split from [`run`]
    /// so reports can be captured.
    ///
    /// [`run`]: Driver::run
    pub fn run_stages(&mut self) {
        let verbs = self.resolve_verbs();
        if !self.sink.ok() {
            return;
        }
        let Some(file) = self.load_source() else {
            return;
        };
        for verb in verbs {
            debug!(verb = verb.name(), "running stage");
            self.execute(verb, file);
        }
    }

    /// Drain the sink into `out`, honoring `--error-level` and
    /// `--no-context`. Returns how many reports were printed.
    pub fn print_reports<W: Write>(&mut self, out: &mut W, color: bool) -> io::Result<usize> {
        let renderer = Renderer {
            color,
            context: !self.args.no_context,
        };
        self.sink
            .drain_to(out, &renderer, &self.sources, self.args.level)
    }

    /// The reports collected so far.
    pub fn sink(&self) -> &ReportSink {
        &self.sink
    }

    fn resolve_verbs(&mut self) -> Vec<Verb> {
        if self.args.verbs.is_empty() {
            return vec![Verb::Check];
        }
        let mut verbs = Vec::new();
        for name in &self.args.verbs {
            match Verb::from_name(name) {
                Some(verb) => verbs.push(verb),
                None => self.sink.emit(
                    ReportKind::UnknownVerb
                        .title(format!("unknown verb `{name}`"))
                        .with_help("known verbs are `check` and `lex`"),
                ),
            }
        }
        verbs
    }

    fn load_source(&mut self) -> Option<FileId> {
        match self.sources.load(&self.args.file) {
            Ok(file) => {
                debug!(file = %self.args.file, "loaded source");
                Some(file)
            }
            Err(err) => {
                self.sink.emit(ReportKind::IoError.title(err.to_string()));
                None
            }
        }
    }

    fn execute(&mut self, verb: Verb, file: FileId) {
        let Some(source) = self.sources.file(file) else {
            return;
        };
        let tokens = Lexer::new(file, &source.text).tokenize(&mut self.sink);
        match verb {
            Verb::Check => {
                debug!(tokens = tokens.len(), "check finished");
            }
            Verb::Lex => self.write_listing(file, &tokens),
        }
    }

    fn write_listing(&mut self, file: FileId, tokens: &[Token]) {
        let Some(source) = self.sources.file(file) else {
            return;
        };
        let mut listing = String::new();
        for token in tokens {
            let at = source.locate(token.span.start);
            listing.push_str(&format!("{}:{}: {}\n", at.line, at.column, token.kind));
        }
        match fs::write(&self.args.output, listing) {
            Ok(()) => debug!(
                output = %self.args.output,
                tokens = tokens.len(),
                "wrote token listing"
            ),
            Err(err) => self.sink.emit(
                ReportKind::IoError
                    .title(format!("failed to write `{}`: {err}", self.args.output)),
            ),
        }
    }
}
