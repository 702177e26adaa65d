use std::io::{self, Write};

use crate::ast::Operator;
use crate::error::RuntimeErrorKind;
use crate::value::Scalar;

pub type OpResult = Result<Scalar, RuntimeErrorKind>;

/// One row of the binary operator table: an implementation per operand type.
struct BinaryImpl {
    int: fn(i32, i32) -> Result<i32, RuntimeErrorKind>,
    float: fn(f32, f32) -> f32,
}

// Integer arithmetic is 32-bit two's complement and wraps on overflow.
fn binary_impl(op: Operator) -> BinaryImpl {
    match op {
        Operator::Plus => BinaryImpl { int: |a, b| Ok(a.wrapping_add(b)), float: |a, b| a + b },
        Operator::Minus => BinaryImpl { int: |a, b| Ok(a.wrapping_sub(b)), float: |a, b| a - b },
        Operator::Times => BinaryImpl { int: |a, b| Ok(a.wrapping_mul(b)), float: |a, b| a * b },
        Operator::Divide => BinaryImpl {
            int: |a, b| if b == 0 { Err(RuntimeErrorKind::DivisionByZero) } else { Ok(a.wrapping_div(b)) },
            float: |a, b| a / b,
        },
    }
}

fn negate(operand: Scalar) -> Scalar {
    match operand {
        Scalar::Int(n) => Scalar::Int(n.wrapping_mul(-1)),
        Scalar::Float(x) => Scalar::Float(-1.0 * x),
    }
}

// Unary plus is absolute value, not identity.
fn absolute(operand: Scalar) -> Scalar {
    match operand {
        Scalar::Int(n) => Scalar::Int(if n >= 0 { n } else { n.wrapping_mul(-1) }),
        Scalar::Float(x) => Scalar::Float(if x >= 0.0 { x } else { -1.0 * x }),
    }
}

/// Arithmetic and output for the interpreter. Program output goes to `out`,
/// one line per printed value.
pub struct Runtime<W: Write> {
    out: W,
}

impl<W: Write> Runtime<W> {
    pub fn new(out: W) -> Self { Self { out } }

    pub fn into_inner(self) -> W { self.out }

    pub fn println(&mut self, value: Scalar) -> io::Result<()> {
        writeln!(self.out, "{}", value)
    }

    /// Applies `op`, picking the implementation from the left operand's type.
    /// The right operand has to be of that same type.
    pub fn binary_op(&self, op: Operator, lhs: Scalar, rhs: Scalar) -> OpResult {
        let imp = binary_impl(op);
        match (lhs, rhs) {
            (Scalar::Int(a), Scalar::Int(b)) => (imp.int)(a, b).map(Scalar::Int),
            (Scalar::Float(a), Scalar::Float(b)) => Ok(Scalar::Float((imp.float)(a, b))),
            _ => Err(RuntimeErrorKind::UnsupportedOperands { op, lhs: lhs.kind(), rhs: rhs.kind() }),
        }
    }

    pub fn unary_op(&self, op: Operator, operand: Scalar) -> OpResult {
        match op {
            Operator::Minus => Ok(negate(operand)),
            Operator::Plus => Ok(absolute(operand)),
            Operator::Times | Operator::Divide => Err(RuntimeErrorKind::UnsupportedUnary { op }),
        }
    }
}

impl Runtime<io::Stdout> {
    pub fn stdout() -> Self { Self::new(io::stdout()) }
}
