//! Arithmetic operators: `+ - * / % **` and unary minus.

use crate::coerce::{to_number, to_string};
use crate::token::Operator;
use crate::types::Operand;

/// `+` concatenates when either side is a string, otherwise adds numbers.
pub fn add(left: &Operand, right: &Operand) -> Operand {
    if matches!(left, Operand::String(_)) || matches!(right, Operand::String(_)) {
        let mut s = to_string(left).into_owned();
        s.push_str(&to_string(right));
        return Operand::String(s);
    }
    Operand::Number(to_number(left) + to_number(right))
}

/// Numeric binary arithmetic. Division by zero follows IEEE-754 and `%`
/// takes the sign of the dividend.
pub fn apply(op: Operator, left: &Operand, right: &Operand) -> Option<Operand> {
    if op == Operator::Plus {
        return Some(add(left, right));
    }
    let (a, b) = (to_number(left), to_number(right));
    let n = match op {
        Operator::Minus => a - b,
        Operator::Multiply => a * b,
        Operator::Divide => a / b,
        Operator::Remainder => a % b,
        Operator::Exponentiation => a.powf(b),
        _ => return None,
    };
    Some(Operand::Number(n))
}

pub fn negate(operand: &Operand) -> Operand {
    Operand::Number(-to_number(operand))
}
