//! Semantic diagnostics
//!
//! Unlike [`ParseError`](crate::parser::parse::ParseError), these never stop
//! the parse. The analyzer appends them to its log in detection order and
//! keeps going, so a single pass reports as many problems as possible.

use crate::parser::ast::SourceLocation;
use thiserror::Error;

/// A meaning violation in otherwise well-formed input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// A name bound twice in the same scope; the first binding is kept
    #[error("line {}: '{name}' is already declared in this scope", .location.line)]
    Redeclaration {
        name: String,
        location: SourceLocation,
    },

    /// A reference with no binding in any enclosing scope
    #[error("line {}: '{name}' is not declared", .location.line)]
    Undeclared {
        name: String,
        location: SourceLocation,
    },

    /// Initializer or assigned value whose type differs from the target's
    #[error(
        "line {}: cannot assign a value of type '{found}' to '{target}' of type '{expected}'",
        .location.line
    )]
    TypeMismatch {
        target: String,
        expected: String,
        found: String,
        location: SourceLocation,
    },

    /// Binary operator applied to operands of different types
    #[error(
        "line {}: incompatible operand types '{left}' and '{right}' for operator '{op}'",
        .location.line
    )]
    IncompatibleOperands {
        op: String,
        left: String,
        right: String,
        location: SourceLocation,
    },
}

impl SemanticError {
    pub fn location(&self) -> SourceLocation {
        match self {
            SemanticError::Redeclaration { location, .. }
            | SemanticError::Undeclared { location, .. }
            | SemanticError::TypeMismatch { location, .. }
            | SemanticError::IncompatibleOperands { location, .. } => *location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_readable() {
        let err = SemanticError::TypeMismatch {
            target: "x".to_string(),
            expected: "int".to_string(),
            found: "String".to_string(),
            location: SourceLocation::new(3, 5),
        };
        assert_eq!(
            err.to_string(),
            "line 3: cannot assign a value of type 'String' to 'x' of type 'int'"
        );
        assert_eq!(err.location(), SourceLocation::new(3, 5));
    }
}
