//! Evaluation support for `^name [op value]` expressions
//!
//! The parser resolves evaluation expressions while it parses, so this module
//! only holds the pieces it needs: the [`Value`] type, the [`SymbolTable`],
//! and the arithmetic rules applied by [`Evaluator::apply`].
//!
//! Arithmetic is defined per operand pair:
//! - `+`: int + int, string + string (concatenation), array + array (concatenation)
//! - `-`, `*`: int with int
//! - `/`: int with int, truncating toward zero; a zero divisor is rejected
//!   before the operand types are looked at
//!
//! Any other pair is a type mismatch. Integer overflow is an error, never a wrap.

pub mod scope;
pub mod value;

pub use scope::SymbolTable;
pub use value::Value;

use crate::errors::{ConfError, ConfResult, Span};
use crate::lexer::token::TokenKind;

/// The four binary operators of an evaluation expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Map an operator token to its operation
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::Multiply => Some(BinaryOp::Mul),
            TokenKind::Divide => Some(BinaryOp::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

/// Applies binary operators, reporting failures against the source text
pub struct Evaluator<'a> {
    source: &'a str,
}

impl<'a> Evaluator<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Apply `op` to `left` and `right`; `span` covers the operator and right operand
    pub fn apply(&self, op: BinaryOp, left: Value, right: &Value, span: Span) -> ConfResult<Value> {
        match op {
            BinaryOp::Add => self.eval_add(left, right, span),
            BinaryOp::Sub => self.eval_int(op, left, right, span, i64::checked_sub),
            BinaryOp::Mul => self.eval_int(op, left, right, span, i64::checked_mul),
            BinaryOp::Div => self.eval_div(left, right, span),
        }
    }

    fn eval_add(&self, left: Value, right: &Value, span: Span) -> ConfResult<Value> {
        match (left, right) {
            (Value::String(mut a), Value::String(b)) => {
                a.push_str(b);
                Ok(Value::String(a))
            }
            (Value::Array(mut a), Value::Array(b)) => {
                a.extend(b.iter().cloned());
                Ok(Value::Array(a))
            }
            (left, right) => self.eval_int(BinaryOp::Add, left, right, span, i64::checked_add),
        }
    }

    fn eval_div(&self, left: Value, right: &Value, span: Span) -> ConfResult<Value> {
        if matches!(right, Value::Int(0)) {
            return Err(ConfError::DivisionByZero {
                src: self.source.to_string(),
                span: (span.start, span.end - span.start).into(),
            });
        }
        self.eval_int(BinaryOp::Div, left, right, span, i64::checked_div)
    }

    /// Int-with-int arithmetic; anything else is a type mismatch
    fn eval_int(
        &self,
        op: BinaryOp,
        left: Value,
        right: &Value,
        span: Span,
        checked: fn(i64, i64) -> Option<i64>,
    ) -> ConfResult<Value> {
        match (&left, right) {
            (Value::Int(a), Value::Int(b)) => {
                checked(*a, *b)
                    .map(Value::Int)
                    .ok_or_else(|| ConfError::ArithmeticOverflow {
                        src: self.source.to_string(),
                        span: (span.start, span.end - span.start).into(),
                        operation: format!("{} {} {}", a, op.symbol(), b),
                    })
            }
            _ => Err(self.type_mismatch(op, &left, right, span)),
        }
    }

    fn type_mismatch(&self, op: BinaryOp, left: &Value, right: &Value, span: Span) -> ConfError {
        let help = match op {
            BinaryOp::Add => "'+' accepts two ints, two strings or two arrays",
            BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => "this operator accepts two ints",
        };
        ConfError::TypeMismatch {
            src: self.source.to_string(),
            span: (span.start, span.end - span.start).into(),
            operator: op.symbol().to_string(),
            left: left.type_name().to_string(),
            right: right.type_name().to_string(),
            help: help.to_string(),
        }
    }
}
