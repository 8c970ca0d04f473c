//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, scope bookkeeping, and the main
//! parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: statement dispatch and control flow
//! - `declarations`: variable, method and class declarations
//! - `expressions`: expressions with precedence climbing
//! - `checks`: inline expression type evaluation
//!
//! # Errors
//!
//! Syntax errors abort: every parsing method returns `Result<_, ParseError>`
//! and the first failure propagates out of [`Parser::parse_program`].
//! Semantic errors accumulate: they are pushed onto the analyzer's log and
//! parsing carries on.

use crate::config::AnalyzerConfig;
use crate::parser::ast::*;
use crate::parser::lexer::{Lexer, Token, TokenKind};
use crate::semantic::{ScopeId, ScopeKind, ScopeTable, SemanticError, Symbol};
use thiserror::Error;

/// Structural (syntax) error. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

/// Everything a completed parse produces
#[derive(Debug, Clone)]
pub struct Analysis {
    /// A `BlockStatement` wrapping all top-level statements
    pub program: AstNode,
    pub scopes: ScopeTable,
    /// Scope the parser was in when input ran out
    pub current_scope: ScopeId,
    /// Semantic diagnostics in detection order
    pub errors: Vec<SemanticError>,
}

impl Analysis {
    /// True when the parse recorded no semantic errors
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Diagnostics rendered as human-readable strings
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Single-pass recursive descent parser and semantic analyzer
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) scopes: ScopeTable,
    pub(crate) current_scope: ScopeId,
    pub(crate) errors: Vec<SemanticError>,
    /// Bare `{` blocks currently open
    pub(crate) open_blocks: usize,
}

impl Parser {
    /// Tokenize `source` and build a parser with the default configuration.
    pub fn new(source: &str) -> Self {
        Self::from_tokens(Lexer::new(source).tokenize())
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self::with_config(tokens, &AnalyzerConfig::default())
    }

    /// Build a parser over a pre-materialized token sequence. A missing
    /// end-of-input sentinel is appended.
    pub fn with_config(mut tokens: Vec<Token>, config: &AnalyzerConfig) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EndOfInput) {
            let location = tokens
                .last()
                .map(|t| t.location)
                .unwrap_or_else(|| SourceLocation::new(1, 1));
            tokens.push(Token::new(TokenKind::EndOfInput, "", location));
        }

        let mut scopes = ScopeTable::new();
        let root = scopes.root();
        for builtin in &config.builtins {
            // Duplicate builtins keep the first entry
            let _ = scopes.insert(root, builtin.clone());
        }

        Self {
            tokens,
            position: 0,
            scopes,
            current_scope: root,
            errors: Vec::new(),
            open_blocks: 0,
        }
    }

    /// Parse the entire token sequence.
    pub fn parse_program(mut self) -> Result<Analysis, ParseError> {
        let location = self.current_location();
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(node) = self.parse_statement()? {
                statements.push(node);
            }
        }

        tracing::debug!(
            statements = statements.len(),
            scopes = self.scopes.len(),
            errors = self.errors.len(),
            "parse finished"
        );

        Ok(Analysis {
            program: AstNode::BlockStatement {
                statements,
                location,
            },
            scopes: self.scopes,
            current_scope: self.current_scope,
            errors: self.errors,
        })
    }

    // ===== Scope bookkeeping =====

    pub(crate) fn enter_scope(&mut self, kind: ScopeKind) {
        let child = self.scopes.enter_child(self.current_scope, kind);
        tracing::debug!(
            scope = child.index(),
            parent = self.current_scope.index(),
            ?kind,
            "entered scope"
        );
        self.current_scope = child;
    }

    pub(crate) fn exit_scope(&mut self) {
        let parent = self.scopes.exit_to_parent(self.current_scope);
        tracing::debug!(
            scope = self.current_scope.index(),
            parent = parent.index(),
            "exited scope"
        );
        self.current_scope = parent;
    }

    /// Run `f` inside a fresh child scope. The scope is left again on every
    /// path, including when `f` fails, along with any bare blocks it opened.
    pub(crate) fn with_child_scope<T>(
        &mut self,
        kind: ScopeKind,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved_scope = self.current_scope;
        let saved_blocks = self.open_blocks;

        self.enter_scope(kind);
        let result = f(self);

        while self.current_scope != saved_scope
            && self.scopes.parent(self.current_scope).is_some()
        {
            self.exit_scope();
        }
        self.open_blocks = saved_blocks;

        result
    }

    /// Bind `symbol` in the current scope, logging a redeclaration instead
    /// when the name is already bound there.
    pub(crate) fn declare(&mut self, symbol: Symbol, location: SourceLocation) -> bool {
        match self.scopes.insert(self.current_scope, symbol) {
            Ok(()) => true,
            Err(err) => {
                self.record(SemanticError::Redeclaration {
                    name: err.name,
                    location,
                });
                false
            }
        }
    }

    pub(crate) fn record(&mut self, error: SemanticError) {
        tracing::debug!(%error, location = %error.location(), "semantic error");
        self.errors.push(error);
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.position.min(last)]
    }

    /// Token `n` positions ahead; the sentinel once past the end
    pub(crate) fn peek_ahead(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + n).min(last)]
    }

    /// Consume the current token. Never moves past the sentinel.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::EndOfInput
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    pub(crate) fn check(&self, kind: TokenKind, text: &str) -> bool {
        self.peek().is(kind, text)
    }

    pub(crate) fn check_op(&self, text: &str) -> bool {
        self.check(TokenKind::Operator, text)
    }

    pub(crate) fn check_reserved(&self, word: &str) -> bool {
        self.check(TokenKind::Reserved, word)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind, text: &str) -> bool {
        if self.check(kind, text) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn match_op(&mut self, text: &str) -> bool {
        self.match_token(TokenKind::Operator, text)
    }

    pub(crate) fn error_here(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: format!("{}, found {}", message.into(), self.peek()),
            location: self.current_location(),
        }
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        text: &str,
        message: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind, text) {
            Ok(self.advance())
        } else {
            Err(self.error_here(message))
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::Operator, "(", &format!("Expected '(' {ctx}"))
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::Operator, ")", &format!("Expected ')' {ctx}"))
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::Operator, "{", &format!("Expected '{{' {ctx}"))
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::Operator, "}", &format!("Expected '}}' {ctx}"))
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::Semicolon, ";", &format!("Expected ';' {ctx}"))
    }

    pub(crate) fn expect_identifier(
        &mut self,
        ctx: &str,
    ) -> Result<(String, SourceLocation), ParseError> {
        if self.peek().kind == TokenKind::Identifier {
            let token = self.advance();
            Ok((token.text, token.location))
        } else {
            Err(self.error_here(format!("Expected identifier {ctx}")))
        }
    }

    pub(crate) fn expect_data_type(&mut self, ctx: &str) -> Result<String, ParseError> {
        if self.peek().kind == TokenKind::DataType {
            Ok(self.advance().text)
        } else {
            Err(self.error_here(format!("Expected type {ctx}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Analysis, ParseError> {
        Parser::new(source).parse_program()
    }

    #[test]
    fn test_parse_simple_declaration() {
        let analysis = parse("int x = 5;").unwrap();

        let statements = analysis.program.statements();
        assert_eq!(statements.len(), 1);
        match &statements[0] {
            AstNode::VariableDeclaration {
                var_type,
                name,
                init,
                ..
            } => {
                assert_eq!(var_type, "int");
                assert_eq!(name, "x");
                assert!(matches!(init.as_deref(), Some(AstNode::NumberLiteral(n, _)) if n == "5"));
            }
            _ => panic!("Expected variable declaration"),
        }
        assert!(analysis.is_clean());
    }

    #[test]
    fn test_messages_follow_detection_order() {
        let analysis = parse("int a; int a; b = 1;").unwrap();

        assert_eq!(
            analysis.messages(),
            vec![
                "line 1: 'a' is already declared in this scope".to_string(),
                "line 1: 'b' is not declared".to_string(),
            ]
        );
    }

    #[test]
    fn test_builtins_are_preloaded() {
        let analysis = parse("").unwrap();
        let root = analysis.scopes.root();

        assert!(analysis.scopes.contains_local(root, "System"));
        assert!(analysis.scopes.contains_local(root, "println"));
    }

    #[test]
    fn test_bare_config_has_empty_root() {
        let tokens = Lexer::new("").tokenize();
        let analysis = Parser::with_config(tokens, &AnalyzerConfig::bare())
            .parse_program()
            .unwrap();

        assert!(analysis.scopes.symbols(analysis.scopes.root()).is_empty());
    }

    #[test]
    fn test_missing_sentinel_is_appended() {
        let mut tokens = Lexer::new("int a;").tokenize();
        tokens.pop();

        let analysis = Parser::from_tokens(tokens).parse_program().unwrap();
        assert_eq!(analysis.program.statements().len(), 1);
    }

    #[test]
    fn test_error_reports_location() {
        let err = parse("int x = 5").unwrap_err();

        assert!(err.message.contains("Expected ';'"));
        assert!(err.message.contains("end of input"));
        assert_eq!(err.location.line, 1);
        assert!(err.to_string().starts_with("Parse error at line 1"));
    }

    #[test]
    fn test_scope_restored_after_failed_body() {
        let mut parser = Parser::new("while (1) { { int y; ");
        let root = parser.current_scope;

        let result = parser.parse_statement();
        assert!(result.is_err());
        assert_eq!(parser.current_scope, root);
        assert_eq!(parser.open_blocks, 0);
    }
}
