pub mod token;
pub mod error;
pub mod lexer;
pub mod types;
pub mod ast;
pub mod parser;
pub mod typeck;
pub mod value;
pub mod runtime;
pub mod interp;
pub mod driver;

pub use token::{Token, TokenKind, Position};
pub use error::{Error, ParseError, ParseErrorKind, ParseResult, RuntimeError, RuntimeErrorKind, RuntimeResult};
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, Parser};
pub use types::WabbitType;
pub use typeck::{check, type_errors, TypeError};
pub use value::{Scalar, WabbitValue};
pub use runtime::Runtime;
pub use interp::interpret;
pub use driver::{run, run_unchecked, Outcome};
