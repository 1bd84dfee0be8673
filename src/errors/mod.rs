//! Error types, diagnostics, and result aliases for varconf.
//!
//! All user-facing errors are variants of [`ConfError`], rendered via `miette` diagnostics.
//! Each variant belongs to one [`ErrorKind`] category so callers can report lexical,
//! syntax and evaluation failures differently.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::lexer::token::Token;

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, ca) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Find the closest declared name within `max_distance` edits
pub fn find_similar<'a>(
    name: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    max_distance: usize,
) -> Option<&'a str> {
    let mut best: Option<(&str, usize)> = None;

    for candidate in candidates {
        let distance = levenshtein_distance(name, candidate);
        if distance <= max_distance && best.map_or(true, |(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }

    best.map(|(c, _)| c)
}

/// Generate a help message for an undefined variable with suggestions
pub fn undefined_variable_help(name: &str, declared: &[&str]) -> String {
    // Longer names tolerate more typos
    let max_distance = (name.len() / 3).clamp(2, 3);

    if let Some(suggestion) = find_similar(name, declared.iter().copied(), max_distance) {
        format!("did you mean '{}'?", suggestion)
    } else if declared.is_empty() {
        "no variables have been declared yet; use `var name = value` first".to_string()
    } else if declared.len() <= 5 {
        format!("declared variables: {}", declared.join(", "))
    } else {
        "variables must be declared with `var` before they are evaluated".to_string()
    }
}

/// Category of a [`ConfError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No lexical rule matched
    Lexical,
    /// Token stream does not follow the grammar
    Syntax,
    /// Undefined variable or invalid arithmetic
    Semantic,
    /// Reading source or writing output failed
    Io,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Semantic => write!(f, "evaluation error"),
            ErrorKind::Io => write!(f, "I/O error"),
        }
    }
}

/// Main error type for varconf
#[derive(Error, Debug, Diagnostic)]
pub enum ConfError {
    #[error("unexpected character '{ch}' at offset {offset}")]
    #[diagnostic(code(E0001), help("{help}"))]
    UnexpectedCharacter {
        #[source_code]
        src: String,
        #[label("unexpected: '{ch}'")]
        span: SourceSpan,
        ch: char,
        offset: usize,
        help: String,
    },

    #[error("expected {expected}, found {found}")]
    #[diagnostic(code(E0101), help("{help}"))]
    UnexpectedToken {
        #[source_code]
        src: String,
        #[label("unexpected: {found}")]
        span: SourceSpan,
        expected: String,
        found: String,
        help: String,
    },

    #[error("integer literal out of range")]
    #[diagnostic(
        code(E0102),
        help("integers must fit in a signed 64-bit value")
    )]
    IntegerOutOfRange {
        #[source_code]
        src: String,
        #[label("{literal}")]
        span: SourceSpan,
        literal: String,
    },

    #[error("undefined variable '{name}'")]
    #[diagnostic(code(E0201), help("{help}"))]
    UndefinedVariable {
        #[source_code]
        src: String,
        #[label("'{name}' was never declared")]
        span: SourceSpan,
        name: String,
        help: String,
    },

    #[error("division by zero")]
    #[diagnostic(code(E0202), help("divisor must be non-zero"))]
    DivisionByZero {
        #[source_code]
        src: String,
        #[label("division by zero here")]
        span: SourceSpan,
    },

    #[error("type mismatch: cannot apply '{operator}' to {left} and {right}")]
    #[diagnostic(code(E0203), help("{help}"))]
    TypeMismatch {
        #[source_code]
        src: String,
        #[label("{left} {operator} {right}")]
        span: SourceSpan,
        operator: String,
        left: String,
        right: String,
        help: String,
    },

    #[error("arithmetic overflow")]
    #[diagnostic(code(E0204), help("result exceeds the signed 64-bit integer range"))]
    ArithmeticOverflow {
        #[source_code]
        src: String,
        #[label("{operation}")]
        span: SourceSpan,
        operation: String,
    },

    #[error("I/O error: {message}")]
    IoError { message: String },
}

impl ConfError {
    /// Create an UnexpectedCharacter error
    pub fn unexpected_character(src: impl Into<String>, offset: usize, ch: char) -> Self {
        let help = match ch {
            '{' => "dictionaries open with '@{'".to_string(),
            '\'' => "strings use double quotes: \"...\"".to_string(),
            '#' => "comments are not supported".to_string(),
            '.' => "only integer numbers are supported".to_string(),
            _ => format!("'{}' is not valid syntax", ch),
        };
        ConfError::UnexpectedCharacter {
            src: src.into(),
            span: (offset, ch.len_utf8()).into(),
            ch,
            offset,
            help,
        }
    }

    /// Create an UnexpectedToken error; `found` of `None` means end of input
    pub fn unexpected_token(
        src: impl Into<String>,
        expected: impl Into<String>,
        found: Option<&Token>,
        help: impl Into<String>,
    ) -> Self {
        let src = src.into();
        let (span, found): (SourceSpan, String) = match found {
            Some(token) => (
                (token.offset, token.lexeme.len()).into(),
                format!("{} '{}'", token.kind, token.lexeme),
            ),
            None => ((src.len(), 0).into(), "end of input".to_string()),
        };
        ConfError::UnexpectedToken {
            src,
            span,
            expected: expected.into(),
            found,
            help: help.into(),
        }
    }

    /// Create an IntegerOutOfRange error for a NUMBER token
    pub fn integer_out_of_range(src: impl Into<String>, token: &Token) -> Self {
        ConfError::IntegerOutOfRange {
            src: src.into(),
            span: (token.offset, token.lexeme.len()).into(),
            literal: token.lexeme.clone(),
        }
    }

    /// Create an UndefinedVariable error
    pub fn undefined_variable(
        src: impl Into<String>,
        token: &Token,
        help: impl Into<String>,
    ) -> Self {
        ConfError::UndefinedVariable {
            src: src.into(),
            span: (token.offset, token.lexeme.len()).into(),
            name: token.lexeme.clone(),
            help: help.into(),
        }
    }

    /// Create an IoError
    pub fn io_error(message: impl Into<String>) -> Self {
        ConfError::IoError {
            message: message.into(),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfError::UnexpectedCharacter { .. } => ErrorKind::Lexical,
            ConfError::UnexpectedToken { .. } | ConfError::IntegerOutOfRange { .. } => {
                ErrorKind::Syntax
            }
            ConfError::UndefinedVariable { .. }
            | ConfError::DivisionByZero { .. }
            | ConfError::TypeMismatch { .. }
            | ConfError::ArithmeticOverflow { .. } => ErrorKind::Semantic,
            ConfError::IoError { .. } => ErrorKind::Io,
        }
    }

    /// Get the span (start, end) for this error, if it has one
    pub fn span(&self) -> Option<Span> {
        match self {
            ConfError::UnexpectedCharacter { span, .. }
            | ConfError::UnexpectedToken { span, .. }
            | ConfError::IntegerOutOfRange { span, .. }
            | ConfError::UndefinedVariable { span, .. }
            | ConfError::DivisionByZero { span, .. }
            | ConfError::TypeMismatch { span, .. }
            | ConfError::ArithmeticOverflow { span, .. } => Some(Span::from(*span)),
            ConfError::IoError { .. } => None,
        }
    }

    /// Get a simple error message (without source context)
    pub fn message(&self) -> String {
        match self {
            ConfError::UnexpectedCharacter { ch, offset, .. } => {
                format!("unexpected character '{}' at offset {}", ch, offset)
            }
            ConfError::UnexpectedToken {
                expected, found, ..
            } => format!("unexpected token: expected {}, found {}", expected, found),
            ConfError::IntegerOutOfRange { literal, .. } => {
                format!("integer literal out of range: {}", literal)
            }
            ConfError::UndefinedVariable { name, .. } => {
                format!("undefined variable: '{}'", name)
            }
            ConfError::DivisionByZero { .. } => "division by zero".to_string(),
            ConfError::TypeMismatch {
                operator,
                left,
                right,
                ..
            } => format!(
                "type mismatch: cannot apply '{}' to {} and {}",
                operator, left, right
            ),
            ConfError::ArithmeticOverflow { operation, .. } => {
                format!("arithmetic overflow: {}", operation)
            }
            ConfError::IoError { message } => format!("I/O error: {}", message),
        }
    }
}

/// Simple span type (offset, length) -> (start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl From<SourceSpan> for Span {
    fn from(span: SourceSpan) -> Self {
        Self {
            start: span.offset(),
            end: span.offset() + span.len(),
        }
    }
}

/// Result type for varconf operations
pub type ConfResult<T> = Result<T, ConfError>;
