use crate::coerce;
use crate::error::LexErrorKind;
use regex::Regex;
use serde_json::Value;
use std::fmt;

/// A runtime value: one of the six JavaScript-like operand kinds.
#[derive(Debug, Clone)]
pub enum Operand {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Undefined,
    Regexp(Regexp),
}

impl Operand {
    pub fn type_name(&self) -> &'static str {
        match self {
            Operand::String(_) => "string",
            Operand::Number(_) => "number",
            Operand::Boolean(_) => "boolean",
            Operand::Null => "null",
            Operand::Undefined => "undefined",
            Operand::Regexp(_) => "regexp",
        }
    }

    /// `null` or `undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Operand::Null | Operand::Undefined)
    }

    pub fn same_type(&self, other: &Operand) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl PartialEq for Operand {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Operand::String(a), Operand::String(b)) => a == b,
            // NaN == NaN here so that rendered results can be compared in tests.
            (Operand::Number(a), Operand::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Operand::Boolean(a), Operand::Boolean(b)) => a == b,
            (Operand::Null, Operand::Null) => true,
            (Operand::Undefined, Operand::Undefined) => true,
            (Operand::Regexp(a), Operand::Regexp(b)) => a == b,
            _ => false,
        }
    }
}

/// Canonical rendering: numbers in shortest round-trip form, strings quoted,
/// regular expressions as `/body/flags`.
impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::String(s) => {
                f.write_str("\"")?;
                for ch in s.chars() {
                    if ch == '"' || ch == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", ch)?;
                }
                f.write_str("\"")
            }
            Operand::Number(n) => f.write_str(&coerce::format_number(*n)),
            Operand::Boolean(b) => write!(f, "{}", b),
            Operand::Null => f.write_str("null"),
            Operand::Undefined => f.write_str("undefined"),
            Operand::Regexp(re) => write!(f, "{}", re),
        }
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Operand::from(&v)
    }
}

/// Arrays and objects have no operand kind and become `undefined`.
impl From<&Value> for Operand {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => Operand::Null,
            Value::Bool(b) => Operand::Boolean(*b),
            Value::Number(n) => Operand::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Operand::String(s.clone()),
            Value::Array(_) | Value::Object(_) => Operand::Undefined,
        }
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Boolean(b)
    }
}

impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        Operand::Number(n)
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Operand::Number(n as f64)
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::String(s)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::String(s.to_string())
    }
}

impl From<Regexp> for Operand {
    fn from(re: Regexp) -> Self {
        Operand::Regexp(re)
    }
}

/// Regular expression flags accepted after a regexp literal: `i`, `m`, `s`, `U`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexFlags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_all: bool,
    pub ungreedy: bool,
}

impl RegexFlags {
    /// Sets the flag named by `ch`. Returns `false` if `ch` is not a flag.
    pub fn set(&mut self, ch: u8) -> bool {
        match ch {
            b'i' => self.case_insensitive = true,
            b'm' => self.multi_line = true,
            b's' => self.dot_all = true,
            b'U' => self.ungreedy = true,
            _ => return false,
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        *self == RegexFlags::default()
    }
}

impl fmt::Display for RegexFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (on, ch) in [
            (self.case_insensitive, 'i'),
            (self.multi_line, 'm'),
            (self.dot_all, 's'),
            (self.ungreedy, 'U'),
        ] {
            if on {
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

/// A compiled regular expression together with the source it was built from.
#[derive(Debug, Clone)]
pub struct Regexp {
    regex: Regex,
    source: String,
    flags: RegexFlags,
}

impl Regexp {
    /// Compiles `(?flags)source`, or the bare source when no flag is set.
    ///
    /// The error carries the compiler message; the lexer attaches the offset.
    pub fn new(source: &str, flags: RegexFlags) -> Result<Self, LexErrorKind> {
        let pattern = if flags.is_empty() {
            source.to_string()
        } else {
            format!("(?{}){}", flags, source)
        };
        let regex = Regex::new(&pattern).map_err(|e| LexErrorKind::InvalidRegex(e.to_string()))?;
        Ok(Regexp {
            regex,
            source: source.to_string(),
            flags,
        })
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> RegexFlags {
        self.flags
    }
}

impl PartialEq for Regexp {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl fmt::Display for Regexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source.replace('/', "\\/"), self.flags)
    }
}
