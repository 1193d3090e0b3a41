//! Source text management and byte spans
//!
//! All positions in reports are byte offsets into a [`SourceFile`]
//! registered with the [`SourceMap`]. Line and column numbers are derived
//! on demand from a precomputed table of line start offsets, so emitting a
//! span is free and locating it costs one binary search at render time.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use thiserror::Error;

/// Handle to a file registered in a [`SourceMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(usize);

/// A half-open byte range `[start, end)` in one source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// File the range points into
    pub file: FileId,

    /// Byte offset of the first byte
    pub start: usize,

    /// Byte offset one past the last byte
    pub end: usize,
}

impl Span {
    /// Create a span over `[start, end)`.
    pub fn new(file: FileId, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { file, start, end }
    }

    /// Zero-width span at a single offset.
    pub fn point(file: FileId, at: usize) -> Self {
        Self::new(file, at, at)
    }

    /// Smallest span covering both `self` and `other`.
    ///
    /// Both spans must point into the same file.
    pub fn to(self, other: Span) -> Span {
        debug_assert_eq!(self.file, other.file);
        Span::new(
            self.file,
            self.start.min(other.start),
            self.end.max(other.end),
        )
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A 1-indexed line and column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    /// Line number, starting at 1
    pub line: usize,

    /// Column number in characters, starting at 1
    pub column: usize,
}

/// One registered source file: its name, full text, and line start table.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Display name (usually the path it was loaded from)
    pub name: String,

    /// Complete text of the file
    pub text: String,

    line_starts: Vec<usize>,
}

impl SourceFile {
    /// Register text under a display name, computing the line table.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            name: name.into(),
            text,
            line_starts,
        }
    }

    /// Number of lines; the empty file has one (empty) line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line and column of a byte offset.
    ///
    /// Offsets past the end of the file clamp to the last position, and
    /// offsets inside a multi-byte UTF-8 sequence snap back to the start
    /// of that character; this never panics. Columns count characters,
    /// not bytes, so multi-byte sequences occupy a single column.
    pub fn locate(&self, offset: usize) -> LineCol {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        // line_starts[0] == 0, so the partition point is never 0
        let line = self.line_starts.partition_point(|&s| s <= offset) - 1;
        let column = self.text[self.line_starts[line]..offset].chars().count() + 1;
        LineCol {
            line: line + 1,
            column,
        }
    }

    /// Text of a 1-indexed line, without the trailing line break.
    pub fn line_text(&self, line: usize) -> Option<&str> {
        if line == 0 || line > self.line_starts.len() {
            return None;
        }
        let start = self.line_starts[line - 1];
        let end = self
            .line_starts
            .get(line)
            .copied()
            .unwrap_or(self.text.len());
        let text = &self.text[start..end];
        Some(text.trim_end_matches('\n').trim_end_matches('\r'))
    }

    /// Byte offset at which a 1-indexed line starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        if line == 0 {
            return None;
        }
        self.line_starts.get(line - 1).copied()
    }
}

/// Error produced when a source file cannot be read.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file could not be read from disk.
    #[error("failed to read `{path}`: {source}")]
    Read {
        /// Path that was attempted
        path: String,

        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Registry of all source files touched by a run, in load order.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    files: IndexMap<String, SourceFile>,
}

impl SourceMap {
    /// Create an empty source map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file from disk and register it under its path.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<FileId, SourceError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: name.clone(),
            source,
        })?;
        Ok(self.add(name, text))
    }

    /// Register in-memory text under a display name.
    ///
    /// Registering the same name twice replaces the text and returns the
    /// original handle.
    pub fn add(&mut self, name: impl Into<String>, text: impl Into<String>) -> FileId {
        let name = name.into();
        let file = SourceFile::new(name.clone(), text);
        let (index, _) = self.files.insert_full(name, file);
        FileId(index)
    }

    /// Look up a registered file.
    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get_index(id.0).map(|(_, f)| f)
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no files have been registered.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
