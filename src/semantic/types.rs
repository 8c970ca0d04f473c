//! Nominal expression types
//!
//! Types are compared by exact name. There are no widening rules: `int` and
//! `double` are different types. [`ExprType::Unknown`] stands in for anything
//! that could not be resolved and is compatible with every type, so one
//! undeclared name does not cascade into further mismatches.

use std::fmt;

/// Name of the type given to integer literals
pub const INT_TYPE: &str = "int";
/// Name of the type given to literals with a fractional part
pub const DOUBLE_TYPE: &str = "double";
/// Name of the type given to string literals
pub const STRING_TYPE: &str = "String";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprType {
    Known(String),
    Unknown,
}

impl ExprType {
    pub fn known(name: impl Into<String>) -> Self {
        ExprType::Known(name.into())
    }

    /// Type of a numeric literal given its source text
    pub fn of_number(text: &str) -> Self {
        if text.contains('.') {
            ExprType::known(DOUBLE_TYPE)
        } else {
            ExprType::known(INT_TYPE)
        }
    }

    pub fn is_compatible(&self, other: &ExprType) -> bool {
        match (self, other) {
            (ExprType::Known(a), ExprType::Known(b)) => a == b,
            _ => true,
        }
    }
}

impl fmt::Display for ExprType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprType::Known(name) => f.write_str(name),
            ExprType::Unknown => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_equality() {
        assert!(ExprType::known("int").is_compatible(&ExprType::known("int")));
        assert!(!ExprType::known("int").is_compatible(&ExprType::known("double")));
    }

    #[test]
    fn test_unknown_matches_anything() {
        assert!(ExprType::Unknown.is_compatible(&ExprType::known("String")));
        assert!(ExprType::known("int").is_compatible(&ExprType::Unknown));
    }

    #[test]
    fn test_number_literal_types() {
        assert_eq!(ExprType::of_number("42"), ExprType::known("int"));
        assert_eq!(ExprType::of_number("4.2"), ExprType::known("double"));
    }
}
