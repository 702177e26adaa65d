use crate::ast::*;
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::lexer::tokenize;
use crate::token::{Position, Token, TokenKind};

/// Parses a complete token stream (as produced by [`tokenize`]) into a program.
pub fn parse(tokens: Vec<Token>) -> ParseResult<Program> {
    Parser::new(tokens).parse_program()
}

pub struct Parser {
    tokens: Vec<Token>,
    idx: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // the cursor never moves past the final EOF, so make sure there is one
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let pos = tokens.last().map(|t| t.pos).unwrap_or(Position::new(1, 1));
            tokens.push(Token::new(TokenKind::Eof, "EOF", pos));
        }
        Self { tokens, idx: 0 }
    }

    pub fn from_source(src: &str) -> Self { Self::new(tokenize(src)) }

    /// `program := statement* EOF`
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut body = Statements::default();
        while !self.is(TokenKind::Eof) {
            match self.cur().kind {
                TokenKind::Print => body.items.push(self.parse_print()?),
                TokenKind::Comment => self.bump(),
                _ => return Err(self.unexpected(TokenKind::Print)),
            }
        }
        Ok(Program { body })
    }

    fn cur(&self) -> &Token { &self.tokens[self.idx] }
    fn is(&self, kind: TokenKind) -> bool { self.cur().kind == kind }

    fn bump(&mut self) { if self.idx < self.tokens.len() - 1 { self.idx += 1; } }

    fn expect(&mut self, expected: TokenKind) -> ParseResult<Token> {
        if self.is(expected) {
            let t = self.cur().clone();
            self.bump();
            Ok(t)
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: TokenKind) -> ParseError {
        let found = self.cur();
        let kind = if found.kind == TokenKind::Eof {
            ParseErrorKind::UnexpectedEof { expected: expected.name() }
        } else {
            ParseErrorKind::UnexpectedToken { expected, found: found.kind }
        };
        ParseError { kind, pos: found.pos }
    }

    /// `"print" expression ";"`
    fn parse_print(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::Print)?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semi)?;
        Ok(Stmt::Print { expr })
    }

    fn parse_expr(&mut self) -> ParseResult<Expr> { self.parse_sum() }

    /// `sum := mul (("+"|"-") mul)*`, folded left.
    fn parse_sum(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_mul()?;
        loop {
            let op = match self.cur().kind {
                TokenKind::Plus => Operator::Plus,
                TokenKind::Minus => Operator::Minus,
                _ => break,
            };
            let pos = self.cur().pos;
            self.bump();
            let rhs = self.parse_mul()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs), pos };
        }
        Ok(lhs)
    }

    /// `mul := factor (("*"|"/") factor)*`, folded left.
    fn parse_mul(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_factor()?;
        loop {
            let op = match self.cur().kind {
                TokenKind::Times => Operator::Times,
                TokenKind::Divide => Operator::Divide,
                _ => break,
            };
            let pos = self.cur().pos;
            self.bump();
            let rhs = self.parse_factor()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs), pos };
        }
        Ok(lhs)
    }

    fn parse_factor(&mut self) -> ParseResult<Expr> {
        let tok = self.cur().clone();
        match tok.kind {
            TokenKind::Integer => {
                self.bump();
                let value = tok.lexeme.parse::<i32>().map_err(|_| ParseError {
                    kind: ParseErrorKind::InvalidInteger { lexeme: tok.lexeme.clone() },
                    pos: tok.pos,
                })?;
                Ok(Expr::Int { value, pos: tok.pos })
            }
            TokenKind::Float => {
                self.bump();
                let value = tok.lexeme.parse::<f32>().map_err(|_| ParseError {
                    kind: ParseErrorKind::InvalidFloat { lexeme: tok.lexeme.clone() },
                    pos: tok.pos,
                })?;
                Ok(Expr::Float { value, pos: tok.pos })
            }
            // A sign takes a whole expression as its operand, so `-2 + 3` is `-(2 + 3)`.
            TokenKind::Plus | TokenKind::Minus => {
                self.bump();
                let op = if tok.kind == TokenKind::Plus { Operator::Plus } else { Operator::Minus };
                let operand = self.parse_expr()?;
                Ok(Expr::Unary { op, operand: Box::new(operand) })
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(Expr::Grouping(Box::new(inner)))
            }
            TokenKind::Eof => Err(ParseError {
                kind: ParseErrorKind::UnexpectedEof { expected: "an expression" },
                pos: tok.pos,
            }),
            found => Err(ParseError { kind: ParseErrorKind::ExpectedExpression { found }, pos: tok.pos }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_src(src: &str) -> ParseResult<Program> { Parser::from_source(src).parse_program() }

    fn sexpr(src: &str) -> String {
        parse_src(src).expect("parse ok").to_string()
    }

    #[test]
    fn precedence_and_left_fold() {
        assert_eq!(sexpr("print 2 + 3 * 4;"), "(print (+ 2 (* 3 4)))\n");
        assert_eq!(sexpr("print 1 - 2 - 3;"), "(print (- (- 1 2) 3))\n");
        assert_eq!(sexpr("print 8 / 4 / 2;"), "(print (/ (/ 8 4) 2))\n");
        assert_eq!(sexpr("print (2 + 3) * 4;"), "(print (* (group (+ 2 3)) 4))\n");
    }

    #[test]
    fn unary_swallows_the_rest_of_the_expression() {
        assert_eq!(sexpr("print -2 + 3;"), "(print (- (+ 2 3)))\n");
        assert_eq!(sexpr("print +(-5);"), "(print (+ (group (- 5))))\n");
    }

    #[test]
    fn binary_position_is_the_operator() {
        let prog = parse_src("print 2 + 3.5;").unwrap();
        let Stmt::Print { expr } = &prog.body.items[0];
        match expr {
            Expr::Binary { op, pos, lhs, rhs } => {
                assert_eq!(*op, Operator::Plus);
                assert_eq!(*pos, Position::new(1, 9));
                assert_eq!(**lhs, Expr::Int { value: 2, pos: Position::new(1, 7) });
                assert_eq!(**rhs, Expr::Float { value: 3.5, pos: Position::new(1, 11) });
            }
            other => panic!("expected binary op, got {:?}", other),
        }
    }

    #[test]
    fn comments_produce_no_statements() {
        let prog = parse_src("// one\nprint 1; /* two */ print 2;").unwrap();
        assert_eq!(prog.body.len(), 2);
    }

    #[test]
    fn missing_semicolon_is_fatal() {
        let err = parse_src("print 1").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof { expected: "SEMI" });
        assert_eq!(err.pos, Position::new(1, 8));
    }

    #[test]
    fn stray_token_at_statement_level() {
        let err = parse_src("foo;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken { expected: TokenKind::Print, found: TokenKind::Name });
    }

    #[test]
    fn unclosed_group() {
        let err = parse_src("print (1 + 2;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken { expected: TokenKind::RParen, found: TokenKind::Semi });
    }

    #[test]
    fn bad_literals() {
        let err = parse_src("print 99999999999;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidInteger { lexeme: "99999999999".into() });
        let err = parse_src("print 1.2.3;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidFloat { lexeme: "1.2.3".into() });
    }

    #[test]
    fn expression_required_after_print() {
        let err = parse_src("print ;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedExpression { found: TokenKind::Semi });
    }
}
