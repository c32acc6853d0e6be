use thiserror::Error;

/// What went wrong while turning source text into tokens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexErrorKind {
    #[error("unknown token")]
    UnknownToken,

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected end of string")]
    UnexpectedEndOfString,

    #[error("invalid character")]
    InvalidCharacter,

    #[error("invalid hexadecimal")]
    InvalidHexadecimal,

    #[error("hexadecimal too long")]
    HexadecimalTooLong,

    #[error("invalid number literal: {0}")]
    InvalidNumber(String),

    #[error("invalid regexp: {0}")]
    InvalidRegex(String),
}

/// Stage of the pipeline an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    Lex,
    Parse,
    Eval,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum XpressionError {
    /// `offset` is the byte offset of the offending token, `text` the run of
    /// non-whitespace starting there.
    #[error("{kind} at {offset}: {text}")]
    Lex {
        kind: LexErrorKind,
        offset: usize,
        text: String,
    },

    #[error("mismatched parentheses")]
    MismatchedParentheses,

    #[error("not enough arguments")]
    NotEnoughArguments,

    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    /// A variable token was met but no resolver was supplied.
    #[error("unknown token at {offset}: {text}")]
    UnresolvedVariable { offset: usize, text: String },

    #[error("variable {0} not found")]
    VariableNotFound(String),

    #[error("{0}")]
    Resolver(String),

    #[error("expression is nested deeper than {0} levels")]
    TooDeep(usize),
}

impl XpressionError {
    pub fn stage(&self) -> ErrorStage {
        match self {
            XpressionError::Lex { .. } => ErrorStage::Lex,
            XpressionError::MismatchedParentheses => ErrorStage::Parse,
            _ => ErrorStage::Eval,
        }
    }

    pub(crate) fn lex(kind: LexErrorKind, input: &[u8], offset: usize) -> Self {
        XpressionError::Lex {
            kind,
            offset,
            text: last_word(input, offset),
        }
    }
}

/// Returns the run of non-whitespace bytes starting at `offset`.
fn last_word(input: &[u8], offset: usize) -> String {
    let start = offset.min(input.len());
    let end = input[start..]
        .iter()
        .position(|b| b.is_ascii_whitespace())
        .map_or(input.len(), |p| start + p);
    String::from_utf8_lossy(&input[start..end]).into_owned()
}
