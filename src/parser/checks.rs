//! Inline type evaluation for expressions
//!
//! Runs against the scope that is current at the point the expression was
//! parsed, so references see exactly the bindings visible there.
//!
//! # Type Rules
//!
//! - Number literals are `int`, or `double` when they have a fractional part
//! - String literals are `String`
//! - A variable reference has its symbol's declared type
//! - A binary expression has the type of its left operand
//! - Unary and postfix expressions have their operand's type
//! - An assignment has the type of its target
//! - A call has the declared type of its callee symbol
//! - Field access is not resolved and yields an unknown type
//!
//! Diagnostics found on the way (undeclared names, mismatched operands or
//! assignments) are recorded and never abort the parse.

use crate::parser::ast::*;
use crate::parser::parse::Parser;
use crate::semantic::types::STRING_TYPE;
use crate::semantic::{ExprType, SemanticError};

impl Parser {
    /// Evaluate the type of `expr`, recording any semantic errors inside it.
    ///
    /// Each reference is visited once, so calling this once per expression
    /// reports each undeclared name exactly once.
    pub(crate) fn infer_expr_type(&mut self, expr: &AstNode) -> ExprType {
        match expr {
            AstNode::NumberLiteral(text, _) => ExprType::of_number(text),

            AstNode::StringLiteral(_, _) => ExprType::known(STRING_TYPE),

            AstNode::VariableReference(name, location) => {
                let declared = self
                    .scopes
                    .lookup(self.current_scope, name)
                    .map(|symbol| symbol.declared_type.clone());
                match declared {
                    Some(declared_type) => ExprType::Known(declared_type),
                    None => {
                        self.record(SemanticError::Undeclared {
                            name: name.clone(),
                            location: *location,
                        });
                        ExprType::Unknown
                    }
                }
            }

            AstNode::BinaryExpression { .. } => self.infer_binary_type(expr),

            AstNode::UnaryExpression { operand, .. }
            | AstNode::PostfixExpression { operand, .. } => self.infer_expr_type(operand),

            AstNode::Assignment {
                target,
                value,
                location,
            } => {
                let expected = self.infer_expr_type(target);
                let found = self.infer_expr_type(value);
                if !expected.is_compatible(&found) {
                    self.record(SemanticError::TypeMismatch {
                        target: target.to_string(),
                        expected: expected.to_string(),
                        found: found.to_string(),
                        location: *location,
                    });
                }
                expected
            }

            AstNode::FieldAccess { object, .. } => {
                self.infer_expr_type(object);
                ExprType::Unknown
            }

            AstNode::FunctionCall { callee, args, .. } => {
                let callee_type = self.infer_expr_type(callee);
                for arg in args {
                    self.infer_expr_type(arg);
                }
                callee_type
            }

            // Statements carry no value
            AstNode::VariableDeclaration { .. }
            | AstNode::MethodDeclaration { .. }
            | AstNode::ClassDeclaration { .. }
            | AstNode::BlockStatement { .. }
            | AstNode::IfStatement { .. }
            | AstNode::WhileStatement { .. }
            | AstNode::ForStatement { .. }
            | AstNode::ReturnStatement { .. }
            | AstNode::BreakStatement { .. }
            | AstNode::ContinueStatement { .. } => ExprType::Unknown,
        }
    }

    /// Evaluate a binary expression without recursing down its left spine.
    ///
    /// Left-associative chains nest to the left, one level per operator, so
    /// the spine is collected first and folded from the innermost operand
    /// outward. Only right operands are evaluated recursively.
    fn infer_binary_type(&mut self, expr: &AstNode) -> ExprType {
        let mut spine = Vec::new();
        let mut node = expr;
        while let AstNode::BinaryExpression {
            op,
            left,
            right,
            location,
        } = node
        {
            spine.push((*op, &**right, *location));
            node = &**left;
        }

        let left_type = self.infer_expr_type(node);
        for (op, right, location) in spine.into_iter().rev() {
            let right_type = self.infer_expr_type(right);
            if !left_type.is_compatible(&right_type) {
                self.record(SemanticError::IncompatibleOperands {
                    op: op.symbol().to_string(),
                    left: left_type.to_string(),
                    right: right_type.to_string(),
                    location,
                });
            }
        }
        left_type
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse::Parser;
    use crate::semantic::SemanticError;

    fn errors(source: &str) -> Vec<SemanticError> {
        Parser::new(source).parse_program().unwrap().errors
    }

    #[test]
    fn test_undeclared_reported_once() {
        let errs = errors("y = 5;");

        assert_eq!(errs.len(), 1);
        assert!(matches!(&errs[0], SemanticError::Undeclared { name, .. } if name == "y"));
    }

    #[test]
    fn test_assignment_mismatch() {
        let errs = errors("int x; x = \"hello\";");

        assert_eq!(errs.len(), 1);
        match &errs[0] {
            SemanticError::TypeMismatch {
                target,
                expected,
                found,
                ..
            } => {
                assert_eq!(target, "x");
                assert_eq!(expected, "int");
                assert_eq!(found, "String");
            }
            other => panic!("Expected type mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_incompatible_operands() {
        let errs = errors("int a = 1; String s = \"t\"; a = a + s;");

        assert!(errs
            .iter()
            .any(|e| matches!(e, SemanticError::IncompatibleOperands { op, .. } if op == "+")));
    }

    #[test]
    fn test_call_takes_callee_type() {
        let errs = errors("int f() { return 1; } int x = f();");

        assert!(errs.is_empty(), "{errs:?}");
    }

    #[test]
    fn test_unknown_does_not_cascade() {
        let errs = errors("int x = missing + 1;");

        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], SemanticError::Undeclared { .. }));
    }

    #[test]
    fn test_long_operator_chain() {
        let source = format!("int x = 1{};", " + 1".repeat(5000));
        assert!(errors(&source).is_empty());

        let source = format!("int x = 1{} + \"s\" + 1;", " + 1".repeat(5000));
        let errs = errors(&source);
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], SemanticError::IncompatibleOperands { .. }));
    }

    #[test]
    fn test_field_access_resolves_base_only() {
        assert!(errors("System.out.println(1);").is_empty());
        assert_eq!(errors("Nope.out.println(1);").len(), 1);
    }
}
