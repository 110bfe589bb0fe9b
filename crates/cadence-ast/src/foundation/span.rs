//! Source locations for diagnostics.
//!
//! # Design
//!
//! - `Span`: compact byte range inside one source file, with the start line cached
//! - `SourceMap`: owns every source file of a compilation unit
//! - `SourceFile`: one file plus its line index
//!
//! # Examples
//!
//! ```
//! # use cadence_ast::foundation::span::*;
//! # use std::path::PathBuf;
//! let mut map = SourceMap::new();
//! let file_id = map.add_file(PathBuf::from("A.cdc"), "access(all) struct interface A {}".to_string());
//! let span = Span::new(file_id, 29, 30, 1);
//!
//! assert_eq!(map.snippet(&span), "A");
//! assert_eq!(map.line_col(&span), (1, 30));
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Byte range in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Index into [`SourceMap`] files
    pub file_id: u16,
    /// Byte offset of the first character
    pub start: u32,
    /// Byte offset one past the last character
    pub end: u32,
    /// 1-based line of `start`
    pub start_line: u16,
}

impl Span {
    pub fn new(file_id: u16, start: u32, end: u32, start_line: u16) -> Self {
        Self {
            file_id,
            start,
            end,
            start_line,
        }
    }

    /// Placeholder span for synthesized nodes.
    pub fn synthetic() -> Self {
        Self::new(0, 0, 0, 1)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`.
    ///
    /// Spans from different files keep `self` unchanged.
    pub fn to(&self, other: &Span) -> Span {
        if self.file_id != other.file_id {
            return *self;
        }
        Span {
            file_id: self.file_id,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            start_line: self.start_line.min(other.start_line),
        }
    }
}

/// All source files of one compilation unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

/// One source file with line start offsets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub source: String,
    /// Byte offset of each line start; the last entry is the EOF sentinel.
    pub line_starts: Vec<u32>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Register a file and return its id.
    pub fn add_file(&mut self, path: PathBuf, source: String) -> u16 {
        let file_id = u16::try_from(self.files.len()).unwrap_or(u16::MAX);
        self.files.push(SourceFile::new(path, source));
        file_id
    }

    pub fn get(&self, span: &Span) -> Option<&SourceFile> {
        self.files.get(span.file_id as usize)
    }

    /// Path of the file a span points into, or `<unknown>`.
    pub fn file_path(&self, span: &Span) -> &Path {
        self.get(span)
            .map(|file| file.path.as_path())
            .unwrap_or_else(|| Path::new("<unknown>"))
    }

    /// Source text covered by a span. Out-of-range spans yield an empty string.
    pub fn snippet(&self, span: &Span) -> &str {
        self.get(span)
            .and_then(|file| file.source.get(span.start as usize..span.end as usize))
            .unwrap_or("")
    }

    /// 1-based (line, column) of the span start.
    pub fn line_col(&self, span: &Span) -> (u32, u32) {
        self.get(span)
            .map(|file| file.line_col(span.start))
            .unwrap_or((u32::from(span.start_line), 1))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl SourceFile {
    pub fn new(path: PathBuf, source: String) -> Self {
        let line_starts = compute_line_starts(&source);
        Self {
            path,
            source,
            line_starts,
        }
    }

    /// 1-based (line, column) of a byte offset, clamped to EOF.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let offset = offset.min(self.source.len() as u32);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx.min(self.line_starts.len().saturating_sub(2)),
            Err(idx) => idx.max(1) - 1,
        };
        let line = line_idx as u32 + 1;
        let col = offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Text of a 1-based line without its trailing newline.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        if line == 0 || line as usize >= self.line_starts.len() {
            return None;
        }
        let start = self.line_starts[line as usize - 1] as usize;
        let end = self.line_starts[line as usize] as usize;
        self.source
            .get(start..end)
            .map(|text| text.trim_end_matches(['\n', '\r']))
    }
}

fn compute_line_starts(source: &str) -> Vec<u32> {
    let mut starts = vec![0];
    for (offset, byte) in source.bytes().enumerate() {
        if byte == b'\n' {
            starts.push(offset as u32 + 1);
        }
    }
    if starts.last().copied() != Some(source.len() as u32) {
        starts.push(source.len() as u32);
    }
    starts
}
