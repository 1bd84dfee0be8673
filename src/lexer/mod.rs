//! Lexer (tokenizer) for the varconf configuration language.
//!
//! Converts source text into a list of [`token::Token`]s, then hands them to
//! the parser through a [`TokenCursor`].
//!
//! Lexing is table driven: at every cursor position the rules in [`RULES`] are
//! tried in order and the first one that matches wins. Order matters, since
//! `var`, `true` and `false` are also valid identifiers.

pub mod token;

use std::sync::OnceLock;

use regex::Regex;

use crate::errors::{ConfError, ConfResult};
use token::{Token, TokenKind};

/// Lexical rules in priority order. A `None` kind matches but emits nothing.
pub const RULES: &[(&str, Option<TokenKind>)] = &[
    (r"[\s\x1c-\x1f]+", None),
    (r"var", Some(TokenKind::Var)),
    (r"\^", Some(TokenKind::Eval)),
    (r"\*", Some(TokenKind::Multiply)),
    (r"@\{", Some(TokenKind::DictStart)),
    (r"\}", Some(TokenKind::DictEnd)),
    (r"/", Some(TokenKind::Divide)),
    (r"\(", Some(TokenKind::ArrayStart)),
    (r"\)", Some(TokenKind::ArrayEnd)),
    (r",", Some(TokenKind::Comma)),
    (r"=", Some(TokenKind::Equals)),
    (r"true|false", Some(TokenKind::Boolean)),
    (r"[0-9]+", Some(TokenKind::Number)),
    (r#""[^"]*""#, Some(TokenKind::String)),
    (r"[_A-Za-z][_a-zA-Z0-9]*", Some(TokenKind::Identifier)),
    (r";", Some(TokenKind::Semicolon)),
    (r"\+", Some(TokenKind::Plus)),
    (r"-", Some(TokenKind::Minus)),
];

/// A compiled lexical rule, anchored at the cursor
struct LexRule {
    pattern: Regex,
    kind: Option<TokenKind>,
}

/// Compile [`RULES`] once per process
fn compiled_rules() -> &'static [LexRule] {
    static COMPILED: OnceLock<Vec<LexRule>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        RULES
            .iter()
            .map(|(pattern, kind)| LexRule {
                pattern: Regex::new(&format!("^(?:{})", pattern))
                    .expect("lexical rule patterns are valid regexes"),
                kind: *kind,
            })
            .collect()
    })
}

/// Lexer for varconf source
pub struct Lexer<'a> {
    /// Source code being lexed
    source: &'a str,
    /// Current position in bytes
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Tokenize the entire source and return all tokens
    pub fn tokenize(&mut self) -> ConfResult<Vec<Token>> {
        let mut tokens = Vec::new();

        while self.position < self.source.len() {
            if let Some(token) = self.next_match()? {
                tracing::trace!(kind = %token.kind, offset = token.offset, lexeme = %token.lexeme, "token");
                tokens.push(token);
            }
        }

        tracing::debug!(count = tokens.len(), bytes = self.source.len(), "tokenized source");
        Ok(tokens)
    }

    /// Tokenize the entire source into a cursor ready for parsing
    pub fn into_cursor(mut self) -> ConfResult<TokenCursor> {
        Ok(TokenCursor::new(self.tokenize()?))
    }

    /// Match one rule at the cursor and advance past it.
    /// Returns `None` for skipped matches (whitespace).
    fn next_match(&mut self) -> ConfResult<Option<Token>> {
        let rest = &self.source[self.position..];

        for rule in compiled_rules() {
            if let Some(m) = rule.pattern.find(rest) {
                let start = self.position;
                self.position += m.end();
                return Ok(rule.kind.map(|kind| Token::new(kind, m.as_str(), start)));
            }
        }

        // Non-empty remainder, so there is always a next char
        let ch = rest.chars().next().unwrap_or('\0');
        Err(ConfError::unexpected_character(self.source, self.position, ch))
    }
}

/// Cursor over an owned token list: read without advancing, or read and advance
#[derive(Debug, Clone, Default)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Next unconsumed token, if any
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Kind of the next unconsumed token, if any
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Consume and return the next token
    pub fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Most recently consumed token, if any
    pub fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// Check if every token has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Number of tokens not yet consumed
    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }
}

impl From<Vec<Token>> for TokenCursor {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}
