use std::fmt;
use std::mem;

use crate::token::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Statements,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statements {
    pub items: Vec<Stmt>,
}

impl Statements {
    pub fn len(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> { self.items.iter() }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Print { expr: Expr },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int { value: i32, pos: Position },
    Float { value: f32, pos: Position },
    Binary { op: Operator, lhs: Box<Expr>, rhs: Box<Expr>, pos: Position },
    Unary { op: Operator, operand: Box<Expr> },
    Grouping(Box<Expr>),
}

// Dropped iteratively: operator chains nest one level per operator.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut child) = pending.pop() {
            detach_children(&mut child, &mut pending);
        }
    }
}

fn detach_children(expr: &mut Expr, pending: &mut Vec<Box<Expr>>) {
    match expr {
        Expr::Int { .. } | Expr::Float { .. } => {}
        Expr::Binary { lhs, rhs, .. } => {
            detach(lhs, pending);
            detach(rhs, pending);
        }
        Expr::Unary { operand, .. } => detach(operand, pending),
        Expr::Grouping(inner) => detach(inner, pending),
    }
}

fn detach(slot: &mut Box<Expr>, pending: &mut Vec<Box<Expr>>) {
    if !matches!(**slot, Expr::Int { .. } | Expr::Float { .. }) {
        let placeholder = Box::new(Expr::Int { value: 0, pos: Position::new(0, 0) });
        pending.push(mem::replace(slot, placeholder));
    }
}

/// Arithmetic operators. Unary expressions only ever carry `Plus` or `Minus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator { Plus, Minus, Times, Divide }

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Minus => '-',
            Operator::Times => '*',
            Operator::Divide => '/',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Plus => "PLUS",
            Operator::Minus => "MINUS",
            Operator::Times => "TIMES",
            Operator::Divide => "DIVIDE",
        };
        f.write_str(name)
    }
}

// Compact s-expression rendering, used by `wabbit parse` and in tests.

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int { value, .. } => write!(f, "{}", value),
            Expr::Float { value, .. } => write!(f, "{:?}", value),
            Expr::Binary { op, lhs, rhs, .. } => write!(f, "({} {} {})", op.symbol(), lhs, rhs),
            Expr::Unary { op, operand } => write!(f, "({} {})", op.symbol(), operand),
            Expr::Grouping(inner) => write!(f, "(group {})", inner),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Print { expr } => write!(f, "(print {})", expr),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in self.body.iter() {
            writeln!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
