//! Expression parsing implementation
//!
//! This module handles expressions using one loop per binary precedence
//! level and recursive descent for everything else.
//!
//! # Precedence (lowest to highest)
//!
//! ```text
//! expression     ::= equality ("=" expression)?
//! equality       ::= relational (("==" | "!=") relational)*
//! relational     ::= additive (("<" | ">" | "<=" | ">=") additive)*
//! additive       ::= multiplicative (("+" | "-") multiplicative)*
//! multiplicative ::= unary (("*" | "/") unary)*
//! unary          ::= ("-" | "!") unary | postfix
//! postfix        ::= primary ("++" | "--")*
//! primary        ::= "(" expression ")" | number | string | chain
//! chain          ::= identifier ("." identifier | "(" args? ")")*
//! ```
//!
//! Every binary level is left-associative: the loop folds the running left
//! operand with each newly matched operator. Assignment is right-associative
//! and only recognized at the top of an expression, so its target must be a
//! variable or field on its own.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point), including assignment
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        let target = self.parse_equality()?;

        if !self.check_op("=") {
            return Ok(target);
        }

        let loc = self.current_location();
        if !matches!(
            target,
            AstNode::VariableReference(..) | AstNode::FieldAccess { .. }
        ) {
            return Err(ParseError {
                message: format!("Invalid assignment target '{target}'"),
                location: loc,
            });
        }
        self.advance();

        let value = Box::new(self.parse_expression()?);
        Ok(AstNode::Assignment {
            target: Box::new(target),
            value,
            location: loc,
        })
    }

    /// Match one of `ops` at the current position, returning the operator
    fn match_binary(&mut self, ops: &[(TokenKind, &str, BinOp)]) -> Option<BinOp> {
        let found = ops
            .iter()
            .find(|(kind, text, _)| self.check(*kind, text))
            .map(|(_, _, op)| *op);
        if found.is_some() {
            self.advance();
        }
        found
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_relational()?;

        loop {
            let loc = self.current_location();
            let Some(op) = self.match_binary(&[
                (TokenKind::Comparison, "==", BinOp::Eq),
                (TokenKind::Comparison, "!=", BinOp::Ne),
            ]) else {
                break;
            };

            let right = Box::new(self.parse_relational()?);
            left = AstNode::BinaryExpression {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse relational (< <= > >=)
    fn parse_relational(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            let loc = self.current_location();
            let Some(op) = self.match_binary(&[
                (TokenKind::Comparison, "<", BinOp::Lt),
                (TokenKind::Comparison, "<=", BinOp::Le),
                (TokenKind::Comparison, ">", BinOp::Gt),
                (TokenKind::Comparison, ">=", BinOp::Ge),
            ]) else {
                break;
            };

            let right = Box::new(self.parse_additive()?);
            left = AstNode::BinaryExpression {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let loc = self.current_location();
            let Some(op) = self.match_binary(&[
                (TokenKind::Operator, "+", BinOp::Add),
                (TokenKind::Operator, "-", BinOp::Sub),
            ]) else {
                break;
            };

            let right = Box::new(self.parse_multiplicative()?);
            left = AstNode::BinaryExpression {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_multiplicative(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let loc = self.current_location();
            let Some(op) = self.match_binary(&[
                (TokenKind::Operator, "*", BinOp::Mul),
                (TokenKind::Operator, "/", BinOp::Div),
            ]) else {
                break;
            };

            let right = Box::new(self.parse_unary()?);
            left = AstNode::BinaryExpression {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse unary prefix (- !)
    fn parse_unary(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();

        let op = if self.match_op("-") {
            UnOp::Neg
        } else if self.match_op("!") {
            UnOp::Not
        } else {
            return self.parse_postfix();
        };

        let operand = Box::new(self.parse_unary()?);
        Ok(AstNode::UnaryExpression {
            op,
            operand,
            location: loc,
        })
    }

    /// Parse postfix (++ --)
    fn parse_postfix(&mut self) -> Result<AstNode, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_op("++") {
                PostfixOp::Inc
            } else if self.match_op("--") {
                PostfixOp::Dec
            } else {
                break;
            };

            expr = AstNode::PostfixExpression {
                op,
                operand: Box::new(expr),
                location: loc,
            };
        }

        Ok(expr)
    }

    /// Parse primary (literals, identifier chains, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::Number => {
                self.advance();
                Ok(AstNode::NumberLiteral(token.text, token.location))
            }
            TokenKind::Str => {
                self.advance();
                Ok(AstNode::StringLiteral(token.text, token.location))
            }
            TokenKind::Identifier => self.parse_identifier_chain(),
            TokenKind::Operator if token.text == "(" => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_rparen("after expression")?;
                Ok(expr)
            }
            _ => Err(self.error_here("Unexpected token in expression")),
        }
    }

    /// Parse `name(.field | (args))*`
    fn parse_identifier_chain(&mut self) -> Result<AstNode, ParseError> {
        let (name, name_loc) = self.expect_identifier("in expression")?;
        let mut expr = AstNode::VariableReference(name, name_loc);

        loop {
            let loc = self.current_location();

            if self.match_op(".") {
                let (field, _) = self.expect_identifier("after '.'")?;
                expr = AstNode::FieldAccess {
                    object: Box::new(expr),
                    field,
                    location: loc,
                };
            } else if self.match_op("(") {
                let args = self.parse_argument_list()?;
                self.expect_rparen("after function arguments")?;
                expr = AstNode::FunctionCall {
                    callee: Box::new(expr),
                    args,
                    location: loc,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parse argument list: (expr, expr, ...)
    fn parse_argument_list(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut args = Vec::new();

        if self.check_op(")") {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            if !self.match_op(",") {
                break;
            }
        }

        Ok(args)
    }
}
