use std::io;

use crate::ast::Operator;
use crate::token::{Position, TokenKind};
use crate::types::WabbitType;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected {expected}, got {found}")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },
    #[error("expected {expected}, got end of input")]
    UnexpectedEof { expected: &'static str },
    #[error("unexpected token {found}, expected an expression")]
    ExpectedExpression { found: TokenKind },
    #[error("invalid integer literal '{lexeme}'")]
    InvalidInteger { lexeme: String },
    #[error("invalid float literal '{lexeme}'")]
    InvalidFloat { lexeme: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("parse error at line {}, col {}: {kind}", .pos.line, .pos.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub pos: Position,
}

#[derive(Debug, Error)]
pub enum RuntimeErrorKind {
    #[error("division by zero")]
    DivisionByZero,
    #[error("unsupported operand type(s) for {op}: '{lhs}' and '{rhs}'")]
    UnsupportedOperands { op: Operator, lhs: WabbitType, rhs: WabbitType },
    #[error("unsupported unary operator {op}")]
    UnsupportedUnary { op: Operator },
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[derive(Debug, Error)]
#[error("runtime error{}: {kind}", location(.pos))]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub pos: Option<Position>,
}

fn location(pos: &Option<Position>) -> String {
    match pos {
        Some(p) => format!(" at line {}, col {}", p.line, p.column),
        None => String::new(),
    }
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, pos: Option<Position>) -> Self { Self { kind, pos } }
}

impl From<io::Error> for RuntimeError {
    fn from(e: io::Error) -> Self { Self::new(RuntimeErrorKind::Output(e), None) }
}

/// Any failure that stops the pipeline. Type errors are not in here: they are
/// collected as diagnostics, not raised.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

pub type ParseResult<T> = Result<T, ParseError>;
pub type RuntimeResult<T> = Result<T, RuntimeError>;
