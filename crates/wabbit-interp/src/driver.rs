use std::io::Write;

use crate::error::Error;
use crate::interp::interpret;
use crate::parser::Parser;
use crate::runtime::Runtime;
use crate::typeck::check;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The program type checked and ran to completion.
    Executed,
    /// The type checker found problems; nothing was run.
    Rejected(Vec<String>),
}

/// Parses and type checks `source`, then interprets it if no type errors were
/// found. `filename` is only used in diagnostics.
pub fn run<W: Write>(filename: &str, source: &str, runtime: &mut Runtime<W>) -> Result<Outcome, Error> {
    let program = Parser::from_source(source).parse_program()?;
    let diagnostics = check(&program, filename, source);
    if !diagnostics.is_empty() {
        return Ok(Outcome::Rejected(diagnostics));
    }
    interpret(&program, runtime)?;
    Ok(Outcome::Executed)
}

/// Parses and interprets `source` without type checking it first.
pub fn run_unchecked<W: Write>(source: &str, runtime: &mut Runtime<W>) -> Result<(), Error> {
    let program = Parser::from_source(source).parse_program()?;
    interpret(&program, runtime)?;
    Ok(())
}
