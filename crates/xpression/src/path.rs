//! Variable paths into a JSON environment: `$.a.b`, `@.items[0]`, `$['key']`.

use crate::types::Operand;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PathError {
    #[error("path must start with '$' or '@': {0}")]
    ExpectedRoot(String),
    #[error("unexpected character {ch:?} at {pos} in path")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("unexpected end of path")]
    UnexpectedEnd,
    #[error("empty member name at {0} in path")]
    EmptyName(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Splits a path into its member and index segments.
pub fn parse_path(path: &str) -> Result<Vec<Segment>, PathError> {
    PathParser { input: path, pos: 0 }.parse()
}

/// Walks `segments` from `root`. Any step that does not exist yields
/// `undefined`, as JavaScript property access does. The last segment may be
/// `length` on an array or string.
pub fn walk(root: &Value, segments: &[Segment]) -> Operand {
    let mut current = root;
    for (i, segment) in segments.iter().enumerate() {
        let last = i + 1 == segments.len();
        let next = match (current, segment) {
            (Value::Object(map), Segment::Key(key)) => map.get(key),
            (Value::Object(map), Segment::Index(index)) => map.get(&index.to_string()),
            (Value::Array(items), Segment::Index(index)) => items.get(*index),
            (Value::Array(items), Segment::Key(key)) if last && key == "length" => {
                return Operand::Number(items.len() as f64)
            }
            (Value::Array(items), Segment::Key(key)) => {
                key.parse::<usize>().ok().and_then(|index| items.get(index))
            }
            (Value::String(s), Segment::Key(key)) if last && key == "length" => {
                return Operand::Number(s.encode_utf16().count() as f64)
            }
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return Operand::Undefined,
        }
    }
    Operand::from(current)
}

struct PathParser<'a> {
    input: &'a str,
    pos: usize,
}

impl PathParser<'_> {
    fn parse(mut self) -> Result<Vec<Segment>, PathError> {
        match self.peek() {
            Some('$') | Some('@') => self.advance(),
            _ => return Err(PathError::ExpectedRoot(self.input.to_string())),
        }

        let mut segments = Vec::new();
        while let Some(ch) = self.peek() {
            match ch {
                '.' => {
                    self.advance();
                    segments.push(Segment::Key(self.parse_name()?));
                }
                '[' => {
                    self.advance();
                    segments.push(self.parse_bracket()?);
                }
                _ => return Err(PathError::UnexpectedChar { ch, pos: self.pos }),
            }
        }
        Ok(segments)
    }

    fn parse_name(&mut self) -> Result<String, PathError> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch == '.' || ch == '[' {
                break;
            }
            self.advance();
        }
        if self.pos == start {
            return Err(PathError::EmptyName(start));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_bracket(&mut self) -> Result<Segment, PathError> {
        let segment = match self.peek() {
            Some(quote @ ('\'' | '"')) => {
                self.advance();
                Segment::Key(self.parse_quoted(quote)?)
            }
            Some(ch) if ch.is_ascii_digit() => {
                let start = self.pos;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
                let digits = &self.input[start..self.pos];
                match digits.parse::<usize>() {
                    Ok(index) => Segment::Index(index),
                    // Too large for any array; still a valid object key.
                    Err(_) => Segment::Key(digits.to_string()),
                }
            }
            Some(ch) => return Err(PathError::UnexpectedChar { ch, pos: self.pos }),
            None => return Err(PathError::UnexpectedEnd),
        };
        self.expect(']')?;
        Ok(segment)
    }

    /// Reads up to the closing `quote`. A backslash escapes the next character.
    fn parse_quoted(&mut self, quote: char) -> Result<String, PathError> {
        let mut out = String::new();
        loop {
            let ch = self.peek().ok_or(PathError::UnexpectedEnd)?;
            self.advance();
            match ch {
                '\\' => {
                    let escaped = self.peek().ok_or(PathError::UnexpectedEnd)?;
                    self.advance();
                    out.push(escaped);
                }
                c if c == quote => return Ok(out),
                c => out.push(c),
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), PathError> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            Some(ch) => Err(PathError::UnexpectedChar { ch, pos: self.pos }),
            None => Err(PathError::UnexpectedEnd),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }
}
