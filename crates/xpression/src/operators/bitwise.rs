//! Bitwise operators. Operands are truncated to 64-bit signed integers.

use crate::coerce::to_integer;
use crate::token::Operator;
use crate::types::Operand;

pub fn apply(op: Operator, left: &Operand, right: &Operand) -> Option<Operand> {
    let (a, b) = (to_integer(left), to_integer(right));
    let n = match op {
        Operator::BitwiseOr => a | b,
        Operator::BitwiseXor => a ^ b,
        Operator::BitwiseAnd => a & b,
        Operator::ShiftLeft => shift_left(a, b),
        Operator::ShiftRight => shift_right(a, b),
        _ => return None,
    };
    Some(Operand::Number(n as f64))
}

pub fn not(operand: &Operand) -> Operand {
    Operand::Number(!to_integer(operand) as f64)
}

/// Shifting by 64 or more (or by a negative count) clears every bit.
fn shift_left(a: i64, count: i64) -> i64 {
    u32::try_from(count)
        .ok()
        .and_then(|c| a.checked_shl(c))
        .unwrap_or(0)
}

/// Arithmetic shift; an oversized count leaves only the sign.
fn shift_right(a: i64, count: i64) -> i64 {
    u32::try_from(count)
        .ok()
        .and_then(|c| a.checked_shr(c))
        .unwrap_or(if a < 0 { -1 } else { 0 })
}
