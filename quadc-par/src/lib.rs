//! Parsing: recursive-descent over the token stream, with declaration
//! lookups, implicit-cast insertion, and the switch-label constant
//! evaluator all invoked inline (spec.md §4.2) so `parse` hands back a
//! fully-typed `ast::Program` or the first error encountered.

pub mod ast;
pub mod consteval;
pub mod error;
pub mod parser;

pub use ast::{BinaryOp, Case, Literal, Program, Stmt, UnaryOp, Value};
pub use error::{ParseError, SyntaxError};

use quadc_util::FileId;

/// Parses one file's source text into a `Program`.
pub fn parse(file_id: FileId, source: &str) -> Result<Program, ParseError> {
    parser::Parser::new(file_id, source)?.parse()
}
