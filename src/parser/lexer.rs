//! Lexer (tokenizer) for source text
//!
//! Converts raw source text into a flat [`Token`] sequence consumed by the
//! parser. The lexer never fails: characters it cannot classify become
//! [`TokenKind::Unknown`] tokens and the sequence always ends with a single
//! [`TokenKind::EndOfInput`] sentinel.

use super::ast::SourceLocation;
use std::fmt;

/// Built-in data type keywords.
const DATA_TYPES: &[&str] = &["int", "float", "double", "char", "boolean", "String", "void"];

/// Reserved words that are not data types.
const RESERVED_WORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "break", "continue", "return",
    "public", "private", "protected", "class", "static", "try", "catch", "finally",
];

/// Lexical classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Str,
    Identifier,
    DataType,
    Reserved,
    Operator,
    Comparison,
    Semicolon,
    Unknown,
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Str => "STRING",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::DataType => "DATA_TYPE",
            TokenKind::Reserved => "RESERVED",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Comparison => "COMPARISON",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Unknown => "UNKNOWN",
            TokenKind::EndOfInput => "END_OF_INPUT",
        };
        f.write_str(name)
    }
}

/// A classified lexeme.
///
/// `text` is the literal source text, except for string literals where the
/// surrounding quotes are stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    /// Returns true if this token has the given kind and exact text.
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "end of input"),
            TokenKind::Str => write!(f, "string literal \"{}\"", self.text),
            TokenKind::Number => write!(f, "number {}", self.text),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

/// Lexer for source text
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            if self.is_at_end() {
                tokens.push(Token::new(
                    TokenKind::EndOfInput,
                    "",
                    self.current_location(),
                ));
                break;
            }

            tokens.push(self.next_token());
        }

        tokens
    }

    fn next_token(&mut self) -> Token {
        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Token::new(TokenKind::EndOfInput, "", loc);
        };

        match ch {
            '"' => self.string_literal(loc),
            '0'..='9' => self.number_literal(ch, loc),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch, loc),

            '=' | '!' | '<' | '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::Comparison, format!("{ch}="), loc)
                } else if ch == '<' || ch == '>' {
                    Token::new(TokenKind::Comparison, ch.to_string(), loc)
                } else {
                    Token::new(TokenKind::Operator, ch.to_string(), loc)
                }
            }
            '+' | '-' => {
                if self.peek() == Some(ch) {
                    self.advance();
                    Token::new(TokenKind::Operator, format!("{ch}{ch}"), loc)
                } else {
                    Token::new(TokenKind::Operator, ch.to_string(), loc)
                }
            }
            '*' | '/' | '{' | '}' | '(' | ')' | '.' | ',' => {
                Token::new(TokenKind::Operator, ch.to_string(), loc)
            }
            ';' => Token::new(TokenKind::Semicolon, ";", loc),

            _ => Token::new(TokenKind::Unknown, ch.to_string(), loc),
        }
    }

    /// Parse string literal. An unterminated literal leaves the quote as an
    /// unknown token and resumes right after it.
    fn string_literal(&mut self, loc: SourceLocation) -> Token {
        let start = self.position;
        let (line, column) = (self.line, self.column);

        let mut string = String::new();
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '"' {
                return Token::new(TokenKind::Str, string, loc);
            }
            string.push(ch);
        }

        self.position = start;
        self.line = line;
        self.column = column;
        Token::new(TokenKind::Unknown, "\"", loc)
    }

    /// Parse numeric literal: digits with an optional fractional part
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut num_str = String::new();
        num_str.push(first_digit);
        self.take_digits(&mut num_str);

        let has_fraction = self.peek() == Some('.')
            && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit());
        if has_fraction {
            num_str.push('.');
            self.advance();
            self.take_digits(&mut num_str);
        }

        Token::new(TokenKind::Number, num_str, loc)
    }

    fn take_digits(&mut self, out: &mut String) {
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            out.push(ch);
            self.advance();
        }
    }

    /// Parse identifier, data type or reserved word
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if DATA_TYPES.contains(&ident.as_str()) {
            TokenKind::DataType
        } else if RESERVED_WORDS.contains(&ident.as_str()) {
            TokenKind::Reserved
        } else {
            TokenKind::Identifier
        };

        Token::new(kind, ident, loc)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => self.skip_line_comment(),
                Some('/') if self.peek_ahead(1) == Some('*') => self.skip_block_comment(),
                _ => break,
            }
        }
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */); an unterminated one runs to the end
    fn skip_block_comment(&mut self) {
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return;
            }
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
