//! Declaration parsing implementation
//!
//! This module handles declarations and their scope effects:
//!
//! - Variable declarations: `type name (= expr)? ;`
//! - Method declarations: `type name(params) { body }`
//! - Constructors inside classes: `Name(params) { body }`
//! - Class declarations: `class Name { members }`
//!
//! # Grammar
//!
//! ```text
//! var_decl    ::= data_type identifier ("=" expression)? ";"
//! method_decl ::= data_type? identifier "(" params? ")" body
//! params      ::= data_type identifier ("," data_type identifier)*
//! class_decl  ::= "class" identifier "{" member* "}"
//! member      ::= modifier* (var_decl | method_decl)
//! ```
//!
//! Each declaration binds its name in the scope that is current when it is
//! parsed. Methods and classes then open a child scope for their contents.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use crate::semantic::{ExprType, ScopeKind, SemanticError, Symbol, SymbolKind};

/// Reserved words accepted in front of a class member
const MODIFIERS: &[&str] = &["public", "private", "protected", "static"];

/// A parsed class member
enum Member {
    Field(AstNode),
    Method(AstNode),
}

impl Parser {
    /// Parse variable declaration: type name (= init)? ;
    ///
    /// A redeclared name is reported and not rebound; the first declaration
    /// keeps its type.
    pub(crate) fn parse_variable_declaration(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        let var_type = self.expect_data_type("at start of declaration")?;
        let (name, name_location) = self.expect_identifier("after type")?;

        self.declare(
            Symbol::new(&name, &var_type, SymbolKind::Variable),
            name_location,
        );

        let init = if self.match_op("=") {
            let value = self.parse_expression()?;
            let found = self.infer_expr_type(&value);
            let expected = ExprType::known(&var_type);
            if !expected.is_compatible(&found) {
                self.record(SemanticError::TypeMismatch {
                    target: name.clone(),
                    expected: var_type.clone(),
                    found: found.to_string(),
                    location: *value.location(),
                });
            }
            Some(Box::new(value))
        } else {
            None
        };

        self.expect_semicolon("after variable declaration")?;

        Ok(AstNode::VariableDeclaration {
            var_type,
            name,
            init,
            location,
        })
    }

    /// Parse method declaration: type? name(params) { body }
    ///
    /// Without a return type the method is a constructor and its symbol is
    /// typed with its own name.
    pub(crate) fn parse_method_declaration(
        &mut self,
        has_return_type: bool,
    ) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        let return_type = if has_return_type {
            Some(self.expect_data_type("before method name")?)
        } else {
            None
        };
        let (name, name_location) = self.expect_identifier("for method name")?;

        let symbol_type = return_type.clone().unwrap_or_else(|| name.clone());
        self.declare(
            Symbol::new(&name, symbol_type, SymbolKind::Method),
            name_location,
        );

        self.expect_lparen("after method name")?;

        self.with_child_scope(ScopeKind::Method, |p| {
            let params = p.parse_parameter_list()?;
            p.expect_rparen("after parameters")?;
            let body = p.parse_body("method body")?;

            Ok(AstNode::MethodDeclaration {
                return_type,
                name,
                params,
                body,
                location,
            })
        })
    }

    /// Parse parameter list: (type name, type name, ...)
    ///
    /// Each parameter is bound in the method's scope.
    fn parse_parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check_op(")") {
            return Ok(params);
        }

        loop {
            let param_type = self.expect_data_type("for parameter")?;
            let (param_name, param_location) = self.expect_identifier("for parameter name")?;

            self.declare(
                Symbol::new(&param_name, &param_type, SymbolKind::Parameter),
                param_location,
            );
            params.push(Param {
                name: param_name,
                param_type,
            });

            if !self.match_op(",") {
                break;
            }
        }

        Ok(params)
    }

    /// Parse class declaration: class Name { members }
    ///
    /// The class name is bound in the enclosing scope before the class's own
    /// scope is opened.
    pub(crate) fn parse_class_declaration(&mut self) -> Result<AstNode, ParseError> {
        let location = self.advance().location;
        let (name, name_location) = self.expect_identifier("after 'class'")?;

        self.declare(
            Symbol::new(&name, "class", SymbolKind::Class),
            name_location,
        );

        self.expect_lbrace("after class name")?;

        self.with_child_scope(ScopeKind::Class, |p| {
            let mut fields = Vec::new();
            let mut methods = Vec::new();

            while !p.check_op("}") && !p.is_at_end() {
                match p.parse_class_member(&name)? {
                    Member::Field(field) => fields.push(field),
                    Member::Method(method) => methods.push(method),
                }
            }

            p.expect_rbrace("after class body")?;

            Ok(AstNode::ClassDeclaration {
                name,
                fields,
                methods,
                location,
            })
        })
    }

    /// Classify and parse one class member.
    ///
    /// `type name (` is a method and `type name` anything else is a field.
    /// The two are told apart by consuming the type and name speculatively
    /// and rewinding before committing.
    fn parse_class_member(&mut self, class_name: &str) -> Result<Member, ParseError> {
        while self.peek().kind == TokenKind::Reserved
            && MODIFIERS.contains(&self.peek().text.as_str())
        {
            self.advance();
        }

        let kind = self.peek().kind;
        match kind {
            TokenKind::DataType => {
                let saved_pos = self.position;
                self.advance(); // type
                let is_method = self.peek().kind == TokenKind::Identifier && {
                    self.advance(); // name
                    self.check_op("(")
                };
                self.position = saved_pos;

                if is_method {
                    self.parse_method_declaration(true).map(Member::Method)
                } else {
                    self.parse_variable_declaration().map(Member::Field)
                }
            }
            TokenKind::Identifier if self.peek_ahead(1).is(TokenKind::Operator, "(") => {
                if self.peek().text != class_name {
                    return Err(ParseError {
                        message: format!(
                            "Expected return type for method '{}' in class '{}'",
                            self.peek().text,
                            class_name
                        ),
                        location: self.current_location(),
                    });
                }
                self.parse_method_declaration(false).map(Member::Method)
            }
            _ => Err(self.error_here(format!("Expected member of class '{class_name}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::Parser;
    use crate::semantic::{ScopeKind, SymbolKind};

    #[test]
    fn test_parse_method_with_params() {
        let analysis = Parser::new("int add(int a, int b) { return a + b; }")
            .parse_program()
            .unwrap();

        match &analysis.program.statements()[0] {
            AstNode::MethodDeclaration {
                return_type,
                name,
                params,
                body,
                ..
            } => {
                assert_eq!(return_type.as_deref(), Some("int"));
                assert_eq!(name, "add");
                assert_eq!(params.len(), 2);
                assert_eq!(params[1].name, "b");
                assert_eq!(body.len(), 1);
            }
            other => panic!("Expected method declaration, got {other:?}"),
        }

        let scopes = &analysis.scopes;
        let method_scope = scopes.children(scopes.root())[0];
        assert_eq!(scopes.kind(method_scope), ScopeKind::Method);
        let params: Vec<_> = scopes
            .symbols(method_scope)
            .iter()
            .map(|s| (s.name.as_str(), s.kind))
            .collect();
        assert_eq!(
            params,
            vec![("a", SymbolKind::Parameter), ("b", SymbolKind::Parameter)]
        );
        assert!(analysis.is_clean());
    }

    #[test]
    fn test_parse_class_members() {
        let source = r#"
            class Point {
                private int x;
                public int y = 0;
                Point(int px) { x = px; }
                public static int sum() { return x + y; }
            }
        "#;
        let analysis = Parser::new(source).parse_program().unwrap();

        match &analysis.program.statements()[0] {
            AstNode::ClassDeclaration {
                name,
                fields,
                methods,
                ..
            } => {
                assert_eq!(name, "Point");
                assert_eq!(fields.len(), 2);
                assert_eq!(methods.len(), 2);
                assert!(matches!(
                    &methods[0],
                    AstNode::MethodDeclaration { return_type: None, .. }
                ));
            }
            other => panic!("Expected class declaration, got {other:?}"),
        }

        let scopes = &analysis.scopes;
        let class_symbol = scopes.lookup(scopes.root(), "Point").unwrap();
        assert_eq!(class_symbol.kind, SymbolKind::Class);
        assert!(analysis.is_clean(), "{:?}", analysis.errors);
    }

    #[test]
    fn test_class_member_rejects_statement() {
        let err = Parser::new("class A { return 1; }")
            .parse_program()
            .unwrap_err();

        assert!(err.message.contains("Expected member of class 'A'"));
    }

    #[test]
    fn test_constructor_name_must_match_class() {
        let err = Parser::new("class A { B() { } }")
            .parse_program()
            .unwrap_err();

        assert!(err.message.contains("Expected return type"));
    }
}
