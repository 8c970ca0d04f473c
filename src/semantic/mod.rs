//! Scope tracking and semantic diagnostics
//!
//! - [`scope`]: arena-backed tree of scopes with ancestry lookup
//! - [`errors`]: recoverable diagnostics recorded during parsing
//! - [`types`]: nominal expression types used for mismatch detection
//!
//! The checks themselves run inline while parsing; see
//! [`crate::parser::parse::Parser`].

pub mod errors;
pub mod scope;
pub mod types;

pub use errors::SemanticError;
pub use scope::{AlreadyDeclared, ScopeId, ScopeKind, ScopeTable, Symbol, SymbolKind};
pub use types::ExprType;
