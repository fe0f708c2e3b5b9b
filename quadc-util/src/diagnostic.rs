//! Diagnostic reporting.
//!
//! Every stage-specific error type (`LexError`, `SyntaxError`,
//! `SemanticError`, `BackendError`) converts into a `Diagnostic` so the
//! driver renders all of them the same way: `path:line:column: level:
//! message`. A `Handler` just accumulates diagnostics for one file and
//! answers whether any of them were fatal.

use std::fmt;

use crate::span::{SourceMap, Span};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Level {
    Error,
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A single reported problem, already carrying everything needed to
/// print it: where, how severe, and what went wrong.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Diagnostic { level: Level::Error, span, message: message.into() }
    }

    pub fn warning(span: Span, message: impl Into<String>) -> Self {
        Diagnostic { level: Level::Warning, span, message: message.into() }
    }

    /// Renders `path:line:column: level: message`, the exact format
    /// spec.md §6 requires on stderr.
    pub fn render(&self, sources: &SourceMap) -> String {
        format!("{}: {}: {}", sources.format_location(self.span), self.level, self.message)
    }
}

/// Accumulates diagnostics emitted while compiling one file.
#[derive(Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    pub fn new() -> Self {
        Handler { diagnostics: Vec::new() }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == Level::Error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
