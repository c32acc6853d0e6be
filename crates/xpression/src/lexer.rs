//! Lexer: raw expression text to a flat token list.

use crate::error::{LexErrorKind, XpressionError};
use crate::token::{Operator, Token, TokenKind, OPERATOR_SPELLING};
use crate::types::{Operand, RegexFlags, Regexp};

/// Maximum number of significant digits in a hexadecimal literal.
const MAX_HEX_DIGITS: usize = 16;

/// Splits `input` into tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>, XpressionError> {
    Lexer::new(input).tokenize()
}

/// Whitespace and commas separate tokens and carry no meaning.
fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b','
}

/// Bytes that end the name part of a variable reference.
fn is_bound(b: u8) -> bool {
    is_separator(b)
        || matches!(b, b'[' | b'(' | b')')
        || OPERATOR_SPELLING.iter().any(|(s, _)| s.as_bytes()[0] == b)
}

fn can_start_variable(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'$' || b == b'@'
}

pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    /// True at the start and after an operator or `(`: a `-` here is unary
    /// and a `/` opens a regexp literal.
    expect_operand: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.as_bytes(),
            pos: 0,
            expect_operand: true,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, XpressionError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Token>, XpressionError> {
        while self.peek().is_some_and(is_separator) {
            self.pos += 1;
        }
        let start = self.pos;
        let Some(ch) = self.peek() else {
            return Ok(None);
        };
        let kind = self
            .read_token(ch)
            .map_err(|kind| XpressionError::lex(kind, self.input, start))?;
        self.expect_operand = matches!(kind, TokenKind::Operator(_) | TokenKind::LeftParen);
        Ok(Some(Token::new(kind, start)))
    }

    fn read_token(&mut self, ch: u8) -> Result<TokenKind, LexErrorKind> {
        match ch {
            b'(' => {
                self.pos += 1;
                return Ok(TokenKind::LeftParen);
            }
            b')' => {
                self.pos += 1;
                return Ok(TokenKind::RightParen);
            }
            _ => {}
        }

        let rest = &self.input[self.pos..];
        if let Some(&(spelling, op)) = OPERATOR_SPELLING
            .iter()
            .find(|(s, _)| rest.starts_with(s.as_bytes()))
        {
            if op == Operator::Divide && self.expect_operand {
                return self.read_regexp();
            }
            self.pos += spelling.len();
            let op = if op == Operator::Minus && self.expect_operand {
                Operator::UnaryMinus
            } else {
                op
            };
            return Ok(TokenKind::Operator(op));
        }

        if ch.is_ascii_digit() {
            return self.read_number();
        }
        if ch == b'"' || ch == b'\'' {
            return self.read_string(ch);
        }
        if let Some(literal) = self.read_keyword() {
            return Ok(TokenKind::Literal(literal));
        }
        if can_start_variable(ch) {
            return self.read_variable();
        }
        if ch.is_ascii() {
            Err(LexErrorKind::UnknownToken)
        } else {
            Err(LexErrorKind::InvalidCharacter)
        }
    }

    fn read_number(&mut self) -> Result<TokenKind, LexErrorKind> {
        let rest = &self.input[self.pos..];
        if rest.starts_with(b"0x") || rest.starts_with(b"0X") {
            return self.read_hex();
        }

        let start = self.pos;
        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' | b'.' => self.pos += 1,
                b'e' | b'E' => {
                    self.pos += 1;
                    if matches!(self.peek(), Some(b'+' | b'-')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
        let text = self.slice(start);
        text.parse::<f64>()
            .map(|n| TokenKind::Literal(Operand::Number(n)))
            .map_err(|e| LexErrorKind::InvalidNumber(format!("parsing {:?}: {}", text, e)))
    }

    fn read_hex(&mut self) -> Result<TokenKind, LexErrorKind> {
        self.pos += 2;
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        let digits = &self.input[start..self.pos];
        if digits.is_empty() || !digits.iter().all(u8::is_ascii_hexdigit) {
            return Err(LexErrorKind::InvalidHexadecimal);
        }
        let significant = match digits.iter().position(|&b| b != b'0') {
            Some(first) => &digits[first..],
            None => &digits[digits.len() - 1..],
        };
        if significant.len() > MAX_HEX_DIGITS {
            return Err(LexErrorKind::HexadecimalTooLong);
        }
        let value = significant
            .iter()
            .fold(0u64, |acc, &b| (acc << 4) | hex_value(b));
        Ok(TokenKind::Literal(Operand::Number(value as f64)))
    }

    /// Reads a quoted string. `\<quote>` and `\\` are unescaped, any other
    /// backslash pair is kept as written.
    fn read_string(&mut self, quote: u8) -> Result<TokenKind, LexErrorKind> {
        self.pos += 1;
        let mut out = Vec::new();
        loop {
            match self.peek() {
                None => return Err(LexErrorKind::UnexpectedEndOfString),
                Some(b'\\') => match self.input.get(self.pos + 1) {
                    Some(&next) if next == quote || next == b'\\' => {
                        out.push(next);
                        self.pos += 2;
                    }
                    Some(_) => {
                        out.push(b'\\');
                        self.pos += 1;
                    }
                    None => return Err(LexErrorKind::UnexpectedEndOfString),
                },
                Some(b) if b == quote => {
                    self.pos += 1;
                    break;
                }
                Some(b) => {
                    out.push(b);
                    self.pos += 1;
                }
            }
        }
        let s = String::from_utf8_lossy(&out).into_owned();
        Ok(TokenKind::Literal(Operand::String(s)))
    }

    /// `true`, `false` or `null`, when not followed by more name characters.
    fn read_keyword(&mut self) -> Option<Operand> {
        let rest = &self.input[self.pos..];
        for (word, literal) in [
            ("true", Operand::Boolean(true)),
            ("false", Operand::Boolean(false)),
            ("null", Operand::Null),
        ] {
            if rest.starts_with(word.as_bytes())
                && rest.get(word.len()).map_or(true, |&b| is_bound(b))
            {
                self.pos += word.len();
                return Some(literal);
            }
        }
        None
    }

    fn read_regexp(&mut self) -> Result<TokenKind, LexErrorKind> {
        self.pos += 1;
        let mut body = Vec::new();
        loop {
            match self.peek() {
                None => return Err(LexErrorKind::UnexpectedEnd),
                Some(b'\\') => match self.input.get(self.pos + 1) {
                    Some(b'/') => {
                        body.push(b'/');
                        self.pos += 2;
                    }
                    Some(&next) => {
                        body.extend_from_slice(&[b'\\', next]);
                        self.pos += 2;
                    }
                    None => return Err(LexErrorKind::UnexpectedEnd),
                },
                Some(b'/') => {
                    self.pos += 1;
                    break;
                }
                Some(b) => {
                    body.push(b);
                    self.pos += 1;
                }
            }
        }

        let mut flags = RegexFlags::default();
        while let Some(b) = self.peek() {
            if !flags.set(b) {
                break;
            }
            self.pos += 1;
        }

        let source = String::from_utf8_lossy(&body);
        let re = Regexp::new(&source, flags)?;
        Ok(TokenKind::Literal(Operand::Regexp(re)))
    }

    /// A variable reference: a name run followed by any number of `[...]`
    /// groups, repeated, e.g. `$.items[0].tags["a b"]`. The text is kept
    /// verbatim for the resolver.
    fn read_variable(&mut self) -> Result<TokenKind, LexErrorKind> {
        let start = self.pos;
        loop {
            while self.peek().is_some_and(|b| !is_bound(b)) {
                self.pos += 1;
            }
            if self.peek() == Some(b'[') {
                self.skip_brackets()?;
            } else {
                break;
            }
        }
        Ok(TokenKind::Variable(self.slice(start)))
    }

    fn skip_brackets(&mut self) -> Result<(), LexErrorKind> {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => return Err(LexErrorKind::UnexpectedEnd),
                Some(b'[') => {
                    depth += 1;
                    self.pos += 1;
                }
                Some(b']') => {
                    depth -= 1;
                    self.pos += 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(q @ (b'"' | b'\'')) => self.skip_quoted(q)?,
                Some(_) => self.pos += 1,
            }
        }
    }

    fn skip_quoted(&mut self, quote: u8) -> Result<(), LexErrorKind> {
        self.pos += 1;
        loop {
            match self.peek() {
                None => return Err(LexErrorKind::UnexpectedEndOfString),
                Some(b'\\') => self.pos += 2,
                Some(b) if b == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn slice(&self, start: usize) -> String {
        let end = self.pos.min(self.input.len());
        String::from_utf8_lossy(&self.input[start..end]).into_owned()
    }
}

fn hex_value(b: u8) -> u64 {
    match b {
        b'0'..=b'9' => (b - b'0') as u64,
        b'a'..=b'f' => (b - b'a' + 10) as u64,
        _ => (b - b'A' + 10) as u64,
    }
}
