//! Semantic machinery consulted synchronously by the parser: the type
//! lattice, the flat declaration table, and the implicit-cast rule.
//! This crate owns no AST — it is called into while the parser builds
//! one, so the result is fully-typed the instant parsing finishes.

pub mod decl;
pub mod error;
pub mod infer;
pub mod types;

pub use decl::{DeclTable, VarId, Variable};
pub use error::SemanticError;
pub use infer::{plan_cast, CastPlan, NarrowingAssignment};
pub use types::Type;
