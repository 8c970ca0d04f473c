//! Statement parsing implementation
//!
//! This module handles statement dispatch and control flow:
//!
//! - Declarations: variables, methods, classes (see `declarations`)
//! - Control flow: `if`/`else`, `while`, `for`
//! - Jump statements: `return`, `break`, `continue`
//! - Bare blocks: `{` and `}` open and close a scope without producing a node
//! - Expression statements: assignments, calls, references
//!
//! # Grammar
//!
//! ```text
//! statement ::= var_decl | method_decl | class_decl | if_stmt | while_stmt
//!             | for_stmt | return_stmt | "break" ";"? | "continue" ";"?
//!             | "{" | "}" | expr_stmt
//! body      ::= "{" statement* "}"
//! ```
//!
//! Tokens that cannot start a statement are consumed and ignored.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use crate::semantic::ScopeKind;

impl Parser {
    /// Parse one statement. Returns `None` for tokens that produce no node.
    pub(crate) fn parse_statement(&mut self) -> Result<Option<AstNode>, ParseError> {
        let token = self.peek().clone();
        tracing::trace!(%token, position = self.position, "statement");

        match token.kind {
            TokenKind::DataType if self.peek_ahead(2).is(TokenKind::Operator, "(") => {
                self.parse_method_declaration(true).map(Some)
            }
            TokenKind::DataType => self.parse_variable_declaration().map(Some),
            TokenKind::Identifier => self.parse_expression_statement().map(Some),
            TokenKind::Reserved => match token.text.as_str() {
                "if" => self.parse_if_statement().map(Some),
                "while" => self.parse_while_statement().map(Some),
                "for" => self.parse_for_statement().map(Some),
                "return" => self.parse_return_statement().map(Some),
                "break" => {
                    self.advance();
                    self.match_token(TokenKind::Semicolon, ";");
                    Ok(Some(AstNode::BreakStatement {
                        location: token.location,
                    }))
                }
                "continue" => {
                    self.advance();
                    self.match_token(TokenKind::Semicolon, ";");
                    Ok(Some(AstNode::ContinueStatement {
                        location: token.location,
                    }))
                }
                "class" => self.parse_class_declaration().map(Some),
                _ => {
                    self.advance();
                    Ok(None)
                }
            },
            TokenKind::Operator if token.text == "{" => {
                self.advance();
                self.open_blocks += 1;
                self.enter_scope(ScopeKind::Block);
                Ok(None)
            }
            TokenKind::Operator if token.text == "}" => {
                self.advance();
                self.open_blocks = self.open_blocks.saturating_sub(1);
                self.exit_scope();
                Ok(None)
            }
            _ => {
                self.advance();
                Ok(None)
            }
        }
    }

    /// Parse `{ statement* }` in the current scope.
    ///
    /// Bare blocks opened inside the body must be closed before the body's
    /// own `}` is recognized.
    pub(crate) fn parse_body(&mut self, ctx: &str) -> Result<Vec<AstNode>, ParseError> {
        self.expect_lbrace(&format!("before {ctx}"))?;

        let floor = self.open_blocks;
        let mut statements = Vec::new();
        while !self.is_at_end() && !(self.check_op("}") && self.open_blocks == floor) {
            if let Some(node) = self.parse_statement()? {
                statements.push(node);
            }
        }

        self.expect_rbrace(&format!("after {ctx}"))?;
        Ok(statements)
    }

    /// Parse a body inside its own child scope
    fn parse_scoped_body(&mut self, ctx: &str) -> Result<Vec<AstNode>, ParseError> {
        self.with_child_scope(ScopeKind::Block, |p| p.parse_body(ctx))
    }

    /// Parse an identifier-led expression followed by `;`
    fn parse_expression_statement(&mut self) -> Result<AstNode, ParseError> {
        let expr = self.parse_expression()?;
        self.infer_expr_type(&expr);
        self.expect_semicolon("after expression")?;
        Ok(expr)
    }

    /// Parse a condition in parentheses and check it
    fn parse_condition(&mut self, keyword: &str) -> Result<AstNode, ParseError> {
        self.expect_lparen(&format!("after '{keyword}'"))?;
        let condition = self.parse_expression()?;
        self.infer_expr_type(&condition);
        self.expect_rparen(&format!("after {keyword} condition"))?;
        Ok(condition)
    }

    /// Parse if statement; `else if` nests a second if inside the else branch
    fn parse_if_statement(&mut self) -> Result<AstNode, ParseError> {
        let location = self.advance().location;

        let condition = Box::new(self.parse_condition("if")?);
        let then_branch = self.parse_scoped_body("if body")?;

        let else_branch = if self.match_token(TokenKind::Reserved, "else") {
            if self.check_reserved("if") {
                Some(vec![self.parse_if_statement()?])
            } else {
                Some(self.parse_scoped_body("else body")?)
            }
        } else {
            None
        };

        Ok(AstNode::IfStatement {
            condition,
            then_branch,
            else_branch,
            location,
        })
    }

    fn parse_while_statement(&mut self) -> Result<AstNode, ParseError> {
        let location = self.advance().location;

        let condition = Box::new(self.parse_condition("while")?);
        let body = self.parse_scoped_body("while body")?;

        Ok(AstNode::WhileStatement {
            condition,
            body,
            location,
        })
    }

    /// Parse for statement. The initializer, condition, update and body all
    /// share one scope, so a loop variable is visible only inside the loop.
    fn parse_for_statement(&mut self) -> Result<AstNode, ParseError> {
        let location = self.advance().location;
        self.expect_lparen("after 'for'")?;

        self.with_child_scope(ScopeKind::Block, |p| {
            let init = if p.match_token(TokenKind::Semicolon, ";") {
                None
            } else if p.peek().kind == TokenKind::DataType {
                Some(Box::new(p.parse_variable_declaration()?))
            } else {
                let expr = p.parse_expression()?;
                p.infer_expr_type(&expr);
                p.expect_semicolon("after for initializer")?;
                Some(Box::new(expr))
            };

            let condition = if p.check(TokenKind::Semicolon, ";") {
                None
            } else {
                let expr = p.parse_expression()?;
                p.infer_expr_type(&expr);
                Some(Box::new(expr))
            };
            p.expect_semicolon("after for condition")?;

            let update = if p.check_op(")") {
                None
            } else {
                let expr = p.parse_expression()?;
                p.infer_expr_type(&expr);
                Some(Box::new(expr))
            };
            p.expect_rparen("after for clauses")?;

            let body = p.parse_body("for body")?;

            Ok(AstNode::ForStatement {
                init,
                condition,
                update,
                body,
                location,
            })
        })
    }

    fn parse_return_statement(&mut self) -> Result<AstNode, ParseError> {
        let location = self.advance().location;

        let value = if self.check(TokenKind::Semicolon, ";") {
            None
        } else {
            let expr = self.parse_expression()?;
            self.infer_expr_type(&expr);
            Some(Box::new(expr))
        };
        self.expect_semicolon("after return")?;

        Ok(AstNode::ReturnStatement { value, location })
    }
}
