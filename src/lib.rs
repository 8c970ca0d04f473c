//! # Introduction
//!
//! minifront is a single-pass front end for a small C/Java-like language. It
//! tokenizes source text, parses it into an AST and resolves every name
//! against a tree of lexical scopes as it goes, reporting semantic problems
//! without stopping.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser ⇄ ScopeTable → (AST, scopes, diagnostics)
//! ```
//!
//! 1. [`parser::lexer`] classifies source text into tokens.
//! 2. [`parser::parse`] runs recursive descent over the tokens, opening and
//!    closing scopes and checking names and types inline.
//! 3. [`semantic`] holds the scope arena, expression types and diagnostics.
//! 4. [`config`] controls which builtin symbols the root scope starts with.
//!
//! ## Errors
//!
//! A malformed token sequence aborts with a [`ParseError`]. Redeclarations,
//! undeclared names and type mismatches are collected in
//! [`Analysis::errors`] and parsing continues.
//!
//! ```
//! let analysis = minifront::analyze("int x = \"hello\";").unwrap();
//! assert_eq!(analysis.errors.len(), 1);
//! ```

pub mod config;
pub mod parser;
pub mod semantic;

pub use config::AnalyzerConfig;
pub use parser::ast::{AstNode, SourceLocation};
pub use parser::parse::{Analysis, ParseError, Parser};
pub use semantic::{ScopeId, ScopeTable, SemanticError};

use parser::lexer::Lexer;

/// Analyze `source` with the default builtins.
pub fn analyze(source: &str) -> Result<Analysis, ParseError> {
    analyze_with(source, &AnalyzerConfig::default())
}

pub fn analyze_with(source: &str, config: &AnalyzerConfig) -> Result<Analysis, ParseError> {
    let tokens = Lexer::new(source).tokenize();
    tracing::debug!(tokens = tokens.len(), "tokenized source");
    Parser::with_config(tokens, config).parse_program()
}
