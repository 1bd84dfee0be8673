//! Parser for the varconf configuration language
//!
//! This module implements a recursive descent parser with one token of
//! lookahead. There is no separate AST: each grammar production returns the
//! [`Value`] it denotes, and `^name` expressions are resolved against the
//! parser's own [`SymbolTable`] as soon as they are read.
//!
//! ```text
//! document  := statement (";"? statement)* ";"?
//! statement := var | dict | array
//! var       := "var" IDENT "=" value
//! value     := NUMBER | STRING | BOOLEAN | array | dict | eval
//! array     := "(" (value ","?)* ")"
//! dict      := "@{" (IDENT "=" value ";"?)* "}"
//! eval      := "^" IDENT (("+" | "-" | "*" | "/") value)?
//! ```

use indexmap::IndexMap;

use crate::errors::{undefined_variable_help, ConfError, ConfResult, Span};
use crate::evaluator::{BinaryOp, Evaluator, SymbolTable, Value};
use crate::lexer::token::{Token, TokenKind};
use crate::lexer::TokenCursor;

/// Parser for varconf source code
pub struct Parser {
    cursor: TokenCursor,
    source: String,
    /// Variables declared so far in this parse
    symbols: SymbolTable,
}

impl Parser {
    /// Create a new parser from a token cursor
    pub fn new(cursor: impl Into<TokenCursor>, source: impl Into<String>) -> Self {
        Self {
            cursor: cursor.into(),
            source: source.into(),
            symbols: SymbolTable::new(),
        }
    }

    /// Variables declared so far
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Parse every statement. A single statement is returned as-is,
    /// several are returned as an array in source order.
    pub fn parse(&mut self) -> ConfResult<Value> {
        let mut statements = Vec::new();

        while !self.cursor.is_exhausted() {
            statements.push(self.parse_statement()?);

            if self.cursor.peek_kind() == Some(TokenKind::Semicolon) {
                self.cursor.next_token();
            }
        }

        tracing::debug!(
            statements = statements.len(),
            variables = self.symbols.len(),
            "parsed document"
        );

        match statements.len() {
            0 => Err(ConfError::unexpected_token(
                self.source.clone(),
                "statement",
                None,
                "a document needs at least one `var`, `@{ ... }` or `( ... )` statement",
            )),
            1 => Ok(statements.remove(0)),
            _ => Ok(Value::Array(statements)),
        }
    }

    /// Parse one top-level statement
    fn parse_statement(&mut self) -> ConfResult<Value> {
        match self.cursor.peek_kind() {
            Some(TokenKind::Var) => self.parse_var(),
            Some(TokenKind::DictStart) => self.parse_dict(),
            Some(TokenKind::ArrayStart) => self.parse_array(),
            _ => Err(self.error_unexpected(
                "statement",
                "a statement starts with `var`, `@{` or `(`",
            )),
        }
    }

    /// Parse variable declaration: `var name = value`
    fn parse_var(&mut self) -> ConfResult<Value> {
        self.expect(TokenKind::Var)?;
        let name = self.expect_identifier("identifier after 'var'")?;
        self.expect(TokenKind::Equals)?;
        let value = self.parse_value()?;

        tracing::debug!(name = %name.lexeme, kind = value.type_name(), "declared variable");
        self.symbols.define(name.lexeme.clone(), value.clone());

        Ok(Value::entry(name.lexeme, value))
    }

    /// Parse a value
    fn parse_value(&mut self) -> ConfResult<Value> {
        let kind = match self.cursor.peek_kind() {
            Some(kind) => kind,
            None => return Err(self.error_unexpected("value", "a value is missing here")),
        };

        match kind {
            TokenKind::Number => {
                let token = self.expect(TokenKind::Number)?;
                token
                    .lexeme
                    .parse::<i64>()
                    .map(Value::Int)
                    .map_err(|_| ConfError::integer_out_of_range(self.source.clone(), &token))
            }
            TokenKind::String => {
                let token = self.expect(TokenKind::String)?;
                Ok(Value::String(token.lexeme.trim_matches('"').to_string()))
            }
            TokenKind::Boolean => {
                let token = self.expect(TokenKind::Boolean)?;
                Ok(Value::Bool(token.lexeme == "true"))
            }
            TokenKind::ArrayStart => self.parse_array(),
            TokenKind::DictStart => self.parse_dict(),
            TokenKind::Eval => self.parse_eval(),
            _ => Err(self.error_unexpected(
                "value",
                "values are numbers, \"strings\", booleans, ( arrays ), @{ dictionaries } or ^variables",
            )),
        }
    }

    /// Parse array literal: `( v1, v2, ... )`
    fn parse_array(&mut self) -> ConfResult<Value> {
        self.expect(TokenKind::ArrayStart)?;

        let mut items = Vec::new();
        while self.at_item_of(TokenKind::ArrayEnd) {
            items.push(self.parse_value()?);

            if self.cursor.peek_kind() == Some(TokenKind::Comma) {
                self.cursor.next_token();
            }
        }

        self.expect(TokenKind::ArrayEnd)?;
        Ok(Value::Array(items))
    }

    /// Parse dictionary literal: `@{ k1 = v1; k2 = v2 }`
    fn parse_dict(&mut self) -> ConfResult<Value> {
        self.expect(TokenKind::DictStart)?;

        let mut entries = IndexMap::new();
        while self.at_item_of(TokenKind::DictEnd) {
            let key = self.expect_identifier("identifier as key")?;
            self.expect(TokenKind::Equals)?;
            let value = self.parse_value()?;
            // Duplicate keys keep their first position, last value wins
            entries.insert(key.lexeme, value);

            if self.cursor.peek_kind() == Some(TokenKind::Semicolon) {
                self.cursor.next_token();
            }
        }

        self.expect(TokenKind::DictEnd)?;
        Ok(Value::Object(entries))
    }

    /// Parse evaluation expression: `^name [op value]`
    fn parse_eval(&mut self) -> ConfResult<Value> {
        let start = self.expect(TokenKind::Eval)?.offset;
        let name = self.expect_identifier("identifier after '^'")?;

        let value = match self.symbols.get(&name.lexeme) {
            Some(value) => value.clone(),
            None => {
                let help = undefined_variable_help(&name.lexeme, &self.symbols.names());
                return Err(ConfError::undefined_variable(
                    self.source.clone(),
                    &name,
                    help,
                ));
            }
        };

        let op = match self.cursor.peek_kind().and_then(BinaryOp::from_token) {
            Some(op) => op,
            None => return Ok(value),
        };
        self.cursor.next_token();

        let right = self.parse_value()?;
        let end = self.cursor.previous().map_or(start, Token::end);

        tracing::trace!(name = %name.lexeme, op = op.symbol(), "evaluate");
        Evaluator::new(&self.source).apply(op, value, &right, Span { start, end })
    }

    // ==================== Helpers ====================

    /// Check that there is a next token and it does not close the current literal
    fn at_item_of(&self, closing: TokenKind) -> bool {
        matches!(self.cursor.peek_kind(), Some(kind) if kind != closing)
    }

    /// Consume the next token, which must be of `kind`
    fn expect(&mut self, kind: TokenKind) -> ConfResult<Token> {
        match self.cursor.next_token() {
            Some(token) if token.kind == kind => Ok(token),
            found => Err(ConfError::unexpected_token(
                self.source.clone(),
                kind.name(),
                found.as_ref(),
                expect_help(kind),
            )),
        }
    }

    /// Consume the next token, which must be an identifier
    fn expect_identifier(&mut self, context: &str) -> ConfResult<Token> {
        match self.cursor.next_token() {
            Some(token) if token.kind == TokenKind::Identifier => Ok(token),
            found => Err(ConfError::unexpected_token(
                self.source.clone(),
                context,
                found.as_ref(),
                "names start with a letter or '_' followed by letters, digits or '_'",
            )),
        }
    }

    /// Create an "unexpected token" error for the next unconsumed token
    fn error_unexpected(&self, expected: &str, help: &str) -> ConfError {
        ConfError::unexpected_token(self.source.clone(), expected, self.cursor.peek(), help)
    }
}

fn expect_help(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::DictEnd => "close the dictionary with '}'",
        TokenKind::ArrayEnd => "close the array with ')'",
        TokenKind::Equals => "use '=' between a name and its value",
        _ => "check syntax",
    }
}
