use std::fmt;

/// Token type enumeration - every lexical class of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Var, // var

    // Operators
    Eval,     // ^
    Multiply, // *
    Divide,   // /
    Plus,     // +
    Minus,    // -

    // Punctuation
    DictStart,  // @{
    DictEnd,    // }
    ArrayStart, // (
    ArrayEnd,   // )
    Comma,      // ,
    Equals,     // =
    Semicolon,  // ;

    // Literals
    Boolean,
    Number,
    String,

    // Identifiers
    Identifier,
}

impl TokenKind {
    /// Upper-case name used in diagnostics (e.g. `DICT_END`)
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Var => "VAR",
            TokenKind::Eval => "EVAL",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::DictStart => "DICT_START",
            TokenKind::DictEnd => "DICT_END",
            TokenKind::ArrayStart => "ARRAY_START",
            TokenKind::ArrayEnd => "ARRAY_END",
            TokenKind::Comma => "COMMA",
            TokenKind::Equals => "EQUALS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Identifier => "IDENTIFIER",
        }
    }

    /// Check if this token is one of the four arithmetic operators
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Multiply | TokenKind::Divide
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its kind, matched text and byte offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The matched substring of the source
    pub lexeme: String,
    /// Byte offset where the match began
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            offset,
        }
    }

    /// Byte offset one past the end of the lexeme
    pub fn end(&self) -> usize {
        self.offset + self.lexeme.len()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' at offset {}", self.kind, self.lexeme, self.offset)
    }
}
