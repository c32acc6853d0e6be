use crate::types::Operand;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Operator codes. Unary minus is distinct from binary subtraction; the lexer
/// picks one or the other from the preceding token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equal,
    StrictEqual,
    NotEqual,
    StrictNotEqual,
    GreaterOrEqual,
    Greater,
    LessOrEqual,
    Less,
    RegexMatch,
    NotRegexMatch,
    ShiftRight,
    ShiftLeft,
    Plus,
    Minus,
    Multiply,
    Divide,
    Remainder,
    Exponentiation,
    LogicalNot,
    BitwiseNot,
    UnaryMinus,
}

/// Associativity, precedence and arity of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorDetail {
    pub associativity: Associativity,
    pub precedence: u8,
    pub arity: usize,
}

const fn detail(associativity: Associativity, precedence: u8, arity: usize) -> OperatorDetail {
    OperatorDetail {
        associativity,
        precedence,
        arity,
    }
}

/// Operator spellings. Longer spellings come before their prefixes
/// (`!=~` before `!=` before `!`) so the first match is the longest one.
pub const OPERATOR_SPELLING: &[(&str, Operator)] = &[
    ("||", Operator::LogicalOr),
    ("&&", Operator::LogicalAnd),
    ("|", Operator::BitwiseOr),
    ("&", Operator::BitwiseAnd),
    ("^", Operator::BitwiseXor),
    ("!=~", Operator::NotRegexMatch),
    ("!~", Operator::NotRegexMatch),
    ("===", Operator::StrictEqual),
    ("==", Operator::Equal),
    ("!==", Operator::StrictNotEqual),
    ("!=", Operator::NotEqual),
    (">>", Operator::ShiftRight),
    ("<<", Operator::ShiftLeft),
    (">=", Operator::GreaterOrEqual),
    (">", Operator::Greater),
    ("<=", Operator::LessOrEqual),
    ("<", Operator::Less),
    ("=~", Operator::RegexMatch),
    ("**", Operator::Exponentiation),
    ("+", Operator::Plus),
    ("-", Operator::Minus),
    ("*", Operator::Multiply),
    ("/", Operator::Divide),
    ("%", Operator::Remainder),
    ("!", Operator::LogicalNot),
    ("~", Operator::BitwiseNot),
];

impl Operator {
    pub fn detail(self) -> OperatorDetail {
        use Associativity::*;
        match self {
            Operator::LogicalOr => detail(Left, 1, 2),
            Operator::LogicalAnd => detail(Left, 2, 2),
            Operator::BitwiseOr => detail(Left, 3, 2),
            Operator::BitwiseXor => detail(Left, 4, 2),
            Operator::BitwiseAnd => detail(Left, 5, 2),
            Operator::Equal
            | Operator::StrictEqual
            | Operator::NotEqual
            | Operator::StrictNotEqual => detail(Left, 6, 2),
            Operator::GreaterOrEqual
            | Operator::Greater
            | Operator::LessOrEqual
            | Operator::Less
            | Operator::RegexMatch
            | Operator::NotRegexMatch => detail(Left, 7, 2),
            Operator::ShiftRight | Operator::ShiftLeft => detail(Left, 8, 2),
            Operator::Plus | Operator::Minus => detail(Left, 9, 2),
            Operator::Multiply | Operator::Divide | Operator::Remainder => detail(Left, 10, 2),
            Operator::Exponentiation => detail(Right, 11, 2),
            Operator::LogicalNot | Operator::BitwiseNot | Operator::UnaryMinus => {
                detail(Left, 12, 1)
            }
        }
    }

    pub fn precedence(self) -> u8 {
        self.detail().precedence
    }

    pub fn arity(self) -> usize {
        self.detail().arity
    }

    pub fn spelling(self) -> &'static str {
        if self == Operator::UnaryMinus {
            return "-";
        }
        OPERATOR_SPELLING
            .iter()
            .find(|(_, op)| *op == self)
            .map(|(s, _)| *s)
            .unwrap_or("?")
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Literal(Operand),
    Operator(Operator),
    LeftParen,
    RightParen,
    /// Raw, unresolved variable path such as `@.items[0]`.
    Variable(String),
}

/// A lexical unit and the byte offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize) -> Self {
        Token { kind, offset }
    }

    pub fn operator(&self) -> Option<Operator> {
        match self.kind {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Literal(operand) => write!(f, "{}", operand),
            TokenKind::Operator(op) => write!(f, "{}", op),
            TokenKind::LeftParen => f.write_str("("),
            TokenKind::RightParen => f.write_str(")"),
            TokenKind::Variable(path) => f.write_str(path),
        }
    }
}
