use std::io::Write;

use crate::ast::*;
use crate::error::{RuntimeError, RuntimeResult};
use crate::runtime::Runtime;
use crate::token::Position;
use crate::types::WabbitType;
use crate::value::WabbitValue;

/// Runs `program`, printing through `runtime`.
///
/// Stops at the first runtime error; whatever earlier statements printed has
/// already been written.
pub fn interpret<W: Write>(program: &Program, runtime: &mut Runtime<W>) -> RuntimeResult<()> {
    Interpreter::new(runtime).run(program)
}

pub struct Interpreter<'rt, W: Write> {
    runtime: &'rt mut Runtime<W>,
}

impl<'rt, W: Write> Interpreter<'rt, W> {
    pub fn new(runtime: &'rt mut Runtime<W>) -> Self { Self { runtime } }

    pub fn run(&mut self, program: &Program) -> RuntimeResult<()> {
        for stmt in program.body.iter() {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> RuntimeResult<()> {
        match stmt {
            Stmt::Print { expr } => {
                let value = self.eval_expr(expr)?;
                debug_assert!(value.ty == WabbitType::Any || value.ty == value.scalar.kind());
                self.runtime.println(value.scalar)?;
                Ok(())
            }
        }
    }

    // Post-order walk over an explicit work list and value stack; expression
    // depth only grows the two vectors. LHS is evaluated before RHS.
    fn eval_expr(&mut self, expr: &Expr) -> RuntimeResult<WabbitValue> {
        let mut work = vec![Work::Eval(expr)];
        let mut values: Vec<WabbitValue> = Vec::new();
        while let Some(item) = work.pop() {
            match item {
                Work::Eval(Expr::Int { value, .. }) => values.push(WabbitValue::int(*value)),
                Work::Eval(Expr::Float { value, .. }) => values.push(WabbitValue::float(*value)),
                Work::Eval(Expr::Binary { op, lhs, rhs, pos }) => {
                    work.push(Work::Binary(*op, *pos));
                    work.push(Work::Eval(rhs));
                    work.push(Work::Eval(lhs));
                }
                Work::Eval(Expr::Unary { op, operand }) => {
                    work.push(Work::Unary(*op));
                    work.push(Work::Eval(operand));
                }
                Work::Eval(Expr::Grouping(inner)) => work.push(Work::Eval(inner)),
                Work::Binary(op, pos) => {
                    let (l, r) = match (values.pop(), values.pop()) {
                        (Some(r), Some(l)) => (l, r),
                        _ => unreachable!("binary node evaluated without two operands"),
                    };
                    let result = self
                        .runtime
                        .binary_op(op, l.scalar, r.scalar)
                        .map_err(|kind| RuntimeError::new(kind, Some(pos)))?;
                    values.push(WabbitValue::any(result));
                }
                Work::Unary(op) => {
                    let Some(v) = values.pop() else { unreachable!("unary node evaluated without an operand") };
                    let result = self.runtime.unary_op(op, v.scalar).map_err(|kind| RuntimeError::new(kind, None))?;
                    values.push(WabbitValue::any(result));
                }
            }
        }
        match values.pop() {
            Some(v) if values.is_empty() => Ok(v),
            _ => unreachable!("expression left {} values", values.len() + 1),
        }
    }
}

enum Work<'a> {
    Eval(&'a Expr),
    Binary(Operator, Position),
    Unary(Operator),
}
