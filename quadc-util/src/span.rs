//! Source locations.
//!
//! A `Span` is a byte range into a single source file, plus the
//! 1-indexed line/column of its first byte for error messages. Spans
//! are produced by the lexer on every token and threaded through the
//! parser onto every IR node that can fail a later check, so a
//! `SemanticError` raised while lowering an expression can still point
//! at the exact place the offending token came from.

use std::fmt;
use std::path::{Path, PathBuf};

/// Identifies a source file registered with a `SourceMap`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u32);

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

impl FileId {
    /// A synthetic id for unit tests that lex or parse a fragment
    /// without registering it in a `SourceMap`.
    pub fn synthetic() -> FileId {
        FileId(0)
    }
}

/// A byte range within one file, with the 1-indexed line/column of `start`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub file_id: FileId,
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(file_id: FileId, start: u32, end: u32, line: u32, column: u32) -> Self {
        Span { file_id, start, end, line, column }
    }

    /// A span covering neither file has any meaningful provenance for
    /// (e.g. a synthetic cast node inserted by the compiler itself).
    pub fn dummy() -> Self {
        Span { file_id: FileId(u32::MAX), start: 0, end: 0, line: 0, column: 0 }
    }

    pub fn to(self, other: Span) -> Span {
        Span { file_id: self.file_id, start: self.start, end: other.end, line: self.line, column: self.column }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

struct SourceFile {
    path: PathBuf,
    contents: String,
}

/// Owns the text of every file passed to the compiler, assigning each a
/// stable `FileId` so spans can be resolved back to `path:line:column`
/// without carrying a filename on every token.
#[derive(Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        SourceMap { files: Vec::new() }
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, contents: String) -> FileId {
        let id = FileId(self.files.len() as u32);
        self.files.push(SourceFile { path: path.into(), contents });
        id
    }

    pub fn path(&self, file_id: FileId) -> &Path {
        &self.files[file_id.0 as usize].path
    }

    pub fn contents(&self, file_id: FileId) -> &str {
        &self.files[file_id.0 as usize].contents
    }

    /// Renders `path:line:column` for a span, the format every
    /// diagnostic in this compiler uses (spec.md §6).
    pub fn format_location(&self, span: Span) -> String {
        format!("{}:{}:{}", self.path(span.file_id).display(), span.line, span.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_location_matches_file_line_column() {
        let mut map = SourceMap::new();
        let file = map.add_file("a.txt", "int x;".to_string());
        let span = Span::new(file, 0, 3, 1, 1);
        assert_eq!(map.format_location(span), "a.txt:1:1");
    }
}
