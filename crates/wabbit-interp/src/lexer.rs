use crate::token::{Position, Token, TokenKind};

/// Tokenizes `source` into a token list that always ends with a single `EOF`.
///
/// Lexing never fails: characters that start no token are skipped and an
/// unterminated block comment simply runs to the end of input.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lex = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let tok = lex.next_token();
        let done = tok.kind == TokenKind::Eof;
        tokens.push(tok);
        if done { break; }
    }
    tokens
}

pub struct Lexer {
    input: Vec<char>,
    len: usize,
    idx: usize,
    line: usize,
    // offset of the most recent '\n', columns are measured from it
    last_newline: Option<usize>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let input: Vec<char> = source.chars().collect();
        let len = input.len();
        Self { input, len, idx: 0, line: 1, last_newline: None }
    }

    fn pos_at(&self, offset: usize) -> Position {
        let column = match self.last_newline {
            Some(nl) => offset - nl,
            None => offset + 1,
        };
        Position::new(self.line, column)
    }

    fn peek(&self) -> Option<char> { self.input.get(self.idx).copied() }

    fn starts_with(&self, pat: &str) -> bool {
        pat.chars().enumerate().all(|(i, c)| self.input.get(self.idx + i) == Some(&c))
    }

    fn slice(&self, start: usize, end: usize) -> String { self.input[start..end].iter().collect() }

    fn newline_at(&mut self, offset: usize) {
        self.line += 1;
        self.last_newline = Some(offset);
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> (usize, String) {
        let start = self.idx;
        while let Some(ch) = self.peek() {
            if pred(ch) { self.idx += 1; } else { break; }
        }
        (start, self.slice(start, self.idx))
    }

    fn read_block_comment(&mut self) -> Token {
        let start = self.idx;
        let pos = self.pos_at(start);
        let mut end = self.len;
        let mut i = start + 2;
        while i + 1 < self.len {
            if self.input[i] == '*' && self.input[i + 1] == '/' {
                end = i + 2;
                break;
            }
            i += 1;
        }
        for offset in start..end {
            if self.input[offset] == '\n' { self.newline_at(offset); }
        }
        self.idx = end;
        Token::new(TokenKind::Comment, self.slice(start, end), pos)
    }

    fn read_line_comment(&mut self) -> Token {
        let (start, text) = self.take_while(|ch| ch != '\n');
        Token::new(TokenKind::Comment, text, self.pos_at(start))
    }

    fn read_name_or_kw(&mut self) -> Token {
        let (start, text) = self.take_while(char::is_alphabetic);
        let kind = match text.as_str() {
            "print" => TokenKind::Print,
            _ => TokenKind::Name,
        };
        Token::new(kind, text, self.pos_at(start))
    }

    // A numeral is a float when a '.' shows up before the next whitespace or ';'.
    fn decimal_ahead(&self) -> bool {
        self.input[self.idx..]
            .iter()
            .take_while(|ch| !ch.is_whitespace() && **ch != ';')
            .any(|ch| *ch == '.')
    }

    fn read_number(&mut self) -> Token {
        if self.decimal_ahead() {
            let (start, text) = self.take_while(|ch| ch.is_ascii_digit() || ch == '.');
            Token::new(TokenKind::Float, text, self.pos_at(start))
        } else {
            let (start, text) = self.take_while(|ch| ch.is_ascii_digit());
            Token::new(TokenKind::Integer, text, self.pos_at(start))
        }
    }

    pub fn next_token(&mut self) -> Token {
        loop {
            let Some(ch) = self.peek() else {
                return Token::new(TokenKind::Eof, "EOF", self.pos_at(self.len));
            };
            if self.starts_with("/*") { return self.read_block_comment(); }
            if self.starts_with("//") { return self.read_line_comment(); }
            let kind = match ch {
                c if c.is_alphabetic() => return self.read_name_or_kw(),
                c if c.is_ascii_digit() || c == '.' => return self.read_number(),
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Times,
                '/' => TokenKind::Divide,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                ';' => TokenKind::Semi,
                '\n' => {
                    self.newline_at(self.idx);
                    self.idx += 1;
                    continue;
                }
                _ => {
                    self.idx += 1;
                    continue;
                }
            };
            let pos = self.pos_at(self.idx);
            self.idx += 1;
            return Token::new(kind, ch.to_string(), pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn lex(src: &str) -> Vec<(TokenKind, String, usize, usize)> {
        tokenize(src).into_iter().map(|t| (t.kind, t.lexeme, t.pos.line, t.pos.column)).collect()
    }

    fn tok(kind: TokenKind, lexeme: &str, line: usize, column: usize) -> (TokenKind, String, usize, usize) {
        (kind, lexeme.to_string(), line, column)
    }

    #[test]
    fn print_int_literal() {
        assert_eq!(lex("print 42;"), vec![
            tok(Print, "print", 1, 1),
            tok(Integer, "42", 1, 7),
            tok(Semi, ";", 1, 9),
            tok(Eof, "EOF", 1, 10),
        ]);
    }

    #[test]
    fn multiline_comment_keeps_line_numbers() {
        let src = "/*\n    Comment\n\n    More comments\n*/\n\nprint 42;\n";
        assert_eq!(lex(src), vec![
            tok(Comment, "/*\n    Comment\n\n    More comments\n*/", 1, 1),
            tok(Print, "print", 7, 1),
            tok(Integer, "42", 7, 7),
            tok(Semi, ";", 7, 9),
            tok(Eof, "EOF", 8, 1),
        ]);
    }

    #[test]
    fn columns_after_comment_closing_mid_line() {
        let toks = lex("/* a\nb */ print 1;");
        assert_eq!(toks[1], tok(Print, "print", 2, 6));
    }

    #[test]
    fn line_comments() {
        let src = "print 42; // comment 1\n\n// comment 2\nprint 34;\n";
        assert_eq!(lex(src), vec![
            tok(Print, "print", 1, 1),
            tok(Integer, "42", 1, 7),
            tok(Semi, ";", 1, 9),
            tok(Comment, "// comment 1", 1, 11),
            tok(Comment, "// comment 2", 3, 1),
            tok(Print, "print", 4, 1),
            tok(Integer, "34", 4, 7),
            tok(Semi, ";", 4, 9),
            tok(Eof, "EOF", 5, 1),
        ]);
    }

    #[test]
    fn line_comment_without_newline() {
        assert_eq!(lex("print 42; // comment"), vec![
            tok(Print, "print", 1, 1),
            tok(Integer, "42", 1, 7),
            tok(Semi, ";", 1, 9),
            tok(Comment, "// comment", 1, 11),
            tok(Eof, "EOF", 1, 21),
        ]);
    }

    #[test]
    fn numbers() {
        let src = "print 42;\nprint 2.3;\nprint .15;\n";
        assert_eq!(lex(src), vec![
            tok(Print, "print", 1, 1),
            tok(Integer, "42", 1, 7),
            tok(Semi, ";", 1, 9),
            tok(Print, "print", 2, 1),
            tok(Float, "2.3", 2, 7),
            tok(Semi, ";", 2, 10),
            tok(Print, "print", 3, 1),
            tok(Float, ".15", 3, 7),
            tok(Semi, ";", 3, 10),
            tok(Eof, "EOF", 4, 1),
        ]);
    }

    #[test]
    fn operators_and_parens() {
        let kinds: Vec<_> = tokenize("print -(2 + 3) * 4 / 5;").into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![
            Print, Minus, LParen, Integer, Plus, Integer, RParen, Times, Integer, Divide, Integer, Semi, Eof,
        ]);
    }

    #[test]
    fn unterminated_block_comment_runs_to_end() {
        assert_eq!(lex("/* never closes"), vec![
            tok(Comment, "/* never closes", 1, 1),
            tok(Eof, "EOF", 1, 16),
        ]);
    }

    #[test]
    fn names_and_unknown_characters() {
        assert_eq!(lex("foo $ print"), vec![
            tok(Name, "foo", 1, 1),
            tok(Print, "print", 1, 7),
            tok(Eof, "EOF", 1, 12),
        ]);
    }

    #[test]
    fn leading_newline_counts_for_columns() {
        assert_eq!(lex("\nprint 1;")[0], tok(Print, "print", 2, 1));
    }

    #[test]
    fn empty_input_is_just_eof() {
        assert_eq!(lex(""), vec![tok(Eof, "EOF", 1, 1)]);
    }
}
