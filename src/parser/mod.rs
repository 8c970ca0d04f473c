//! Source parser with inline semantic checking
//!
//! This module transforms source text into an Abstract Syntax Tree (AST)
//! while building the scope table in the same pass:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST + scopes + diagnostics)
//! - [`ast`]: AST node definitions
//!
//! # Supported Subset
//!
//! - Types: `int`, `float`, `double`, `char`, `boolean`, `String`, `void`
//! - Declarations: variables, methods, classes with fields and constructors
//! - Statements: `if`/`else`, `while`, `for`, `return`, `break`, `continue`
//! - Expressions: arithmetic, comparison, unary `-`/`!`, postfix `++`/`--`,
//!   assignment, field access and calls
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
mod checks;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
