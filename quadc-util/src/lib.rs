//! Shared foundation for the quadc pipeline: interned symbols, source
//! spans, diagnostics, and the typed-index vectors every later stage
//! uses for basic blocks and labels. No stage-specific logic lives
//! here — a crate further down the pipeline (`quadc-lex`, `quadc-par`,
//! ...) should never need to reach past these re-exports.

pub mod diagnostic;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceMap, Span};
pub use symbol::Symbol;
