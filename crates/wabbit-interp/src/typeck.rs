use std::fmt;

use crate::ast::*;
use crate::token::Position;
use crate::types::WabbitType;

/// A binary operator whose operands disagree in type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeError {
    pub op: Operator,
    pub lhs: WabbitType,
    pub rhs: WabbitType,
    pub pos: Position,
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type Error: unsupported operand type(s) for {}: '{}' and '{}'", self.op, self.lhs, self.rhs)
    }
}

#[derive(Default)]
struct Tc {
    errors: Vec<TypeError>,
}

impl Tc {
    fn check_program(&mut self, program: &Program) {
        for stmt in program.body.iter() {
            self.check_stmt(stmt);
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Print { expr } => { self.check_expr(expr); }
        }
    }

    // `None` means the expression is not type-checked at all (unary and
    // grouped expressions), so nothing can be said about its type. The walk is
    // post-order over an explicit work list, LHS before RHS.
    fn check_expr(&mut self, expr: &Expr) -> Option<WabbitType> {
        let mut work = vec![Work::Visit(expr)];
        let mut types: Vec<Option<WabbitType>> = Vec::new();
        while let Some(item) = work.pop() {
            match item {
                Work::Visit(Expr::Int { .. }) => types.push(Some(WabbitType::Int)),
                Work::Visit(Expr::Float { .. }) => types.push(Some(WabbitType::Float)),
                Work::Visit(Expr::Binary { op, lhs, rhs, pos }) => {
                    work.push(Work::Combine(*op, *pos));
                    work.push(Work::Visit(rhs));
                    work.push(Work::Visit(lhs));
                }
                Work::Visit(Expr::Unary { .. } | Expr::Grouping(_)) => types.push(None),
                Work::Combine(op, pos) => {
                    let r = types.pop().flatten();
                    let l = types.pop().flatten();
                    if let (Some(l), Some(r)) = (l, r) {
                        if l != r {
                            self.errors.push(TypeError { op, lhs: l, rhs: r, pos });
                        }
                    }
                    // the node takes the LHS type either way, so a mismatch further
                    // up the chain is reported again for its own node
                    types.push(l);
                }
            }
        }
        types.pop().flatten()
    }
}

enum Work<'a> {
    Visit(&'a Expr),
    Combine(Operator, Position),
}

/// Collects every operand mismatch in `program`, in source order.
pub fn type_errors(program: &Program) -> Vec<TypeError> {
    let mut tc = Tc::default();
    tc.check_program(program);
    tc.errors
}

/// Type checks `program` and renders each error as a diagnostic block that
/// quotes the offending line of `source`. An empty list means the program is
/// well typed.
pub fn check(program: &Program, filename: &str, source: &str) -> Vec<String> {
    type_errors(program).iter().map(|e| format_diagnostic(filename, source, e)).collect()
}

pub fn format_diagnostic(filename: &str, source: &str, err: &TypeError) -> String {
    let Position { line, column } = err.pos;
    let subject = source.split('\n').nth(line.saturating_sub(1)).unwrap_or("");
    let pad = " ".repeat(column.saturating_sub(2));
    format!("File '{}', line {}, col {}\n\t{}\n\t {}^------\n{}\n", filename, line, column, subject, pad, err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn errors(src: &str) -> Vec<TypeError> {
        let prog = Parser::from_source(src).parse_program().expect("parse ok");
        type_errors(&prog)
    }

    fn pos(line: usize, column: usize) -> Position { Position::new(line, column) }

    #[test]
    fn mixed_operands_report_once() {
        // hand-built so the node sits where the diagnostic should point
        let program = Program {
            body: Statements {
                items: vec![Stmt::Print {
                    expr: Expr::Binary {
                        op: Operator::Plus,
                        lhs: Box::new(Expr::Int { value: 2, pos: pos(1, 7) }),
                        rhs: Box::new(Expr::Float { value: 3.5, pos: pos(1, 11) }),
                        pos: pos(1, 7),
                    },
                }],
            },
        };
        let diags = check(&program, "test.wb", "print 2 + 3.5;");
        assert_eq!(diags, vec![
            "File 'test.wb', line 1, col 7\n\
             \tprint 2 + 3.5;\n\
             \t      ^------\n\
             Type Error: unsupported operand type(s) for PLUS: 'INT' and 'FLOAT'\n"
                .to_string(),
        ]);
    }

    #[test]
    fn matching_operands_are_fine() {
        assert!(errors("print 1 + 2 * 3;\nprint 1.5 / 2.0;").is_empty());
    }

    #[test]
    fn each_mismatched_node_reports() {
        // (1 + 2.0) -> INT vs FLOAT, then INT + 3.0 -> INT vs FLOAT again
        let errs = errors("print 1 + 2.0 + 3.0;");
        assert_eq!(errs.len(), 2);
        assert_eq!(errs[0], TypeError { op: Operator::Plus, lhs: WabbitType::Int, rhs: WabbitType::Float, pos: pos(1, 9) });
        assert_eq!(errs[1].pos, pos(1, 15));
    }

    #[test]
    fn lhs_type_flows_upward() {
        // 2.0 * 3 is a mismatch typed FLOAT, so FLOAT + 1.0 is fine
        let errs = errors("print 2.0 * 3 + 1.0;");
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].op, Operator::Times);
        assert_eq!((errs[0].lhs, errs[0].rhs), (WabbitType::Float, WabbitType::Int));
    }

    #[test]
    fn unary_and_grouping_are_not_checked() {
        assert!(errors("print -(1 + 2.0);").is_empty());
        assert!(errors("print (1 + 2.0) * 3;").is_empty());
        assert!(errors("print 1 + (2.0);").is_empty());
    }

    #[test]
    fn checking_twice_gives_the_same_answer() {
        let src = "print 1 + 2.0;\nprint 3.0 - 4;";
        let prog = Parser::from_source(src).parse_program().unwrap();
        let first = check(&prog, "a.wb", src);
        assert_eq!(first.len(), 2);
        assert_eq!(first, check(&prog, "a.wb", src));
    }

    #[test]
    fn diagnostic_quotes_the_right_line() {
        let src = "print 1;\nprint 1 * 2.0;";
        let prog = Parser::from_source(src).parse_program().unwrap();
        let diags = check(&prog, "two.wb", src);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].starts_with("File 'two.wb', line 2, col 9\n\tprint 1 * 2.0;\n"));
        assert!(diags[0].contains("for TIMES: 'INT' and 'FLOAT'"));
    }

    #[test]
    fn long_chains_are_checked_without_recursion() {
        let src = format!("print 1{} + 2.0;", " + 1".repeat(20_000));
        let errs = errors(&src);
        assert_eq!(errs.len(), 1);
        assert_eq!((errs[0].lhs, errs[0].rhs), (WabbitType::Int, WabbitType::Float));
    }
}
