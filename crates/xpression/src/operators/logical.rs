//! Logical operators. `&&` and `||` yield one of their operands unchanged.

use crate::coerce::to_boolean;
use crate::error::XpressionError;
use crate::evaluate::Evaluator;
use crate::token::Operator;
use crate::types::Operand;

/// Reduces the left operand and only evaluates the right one when the left
/// does not decide the result; otherwise the right operand is skipped.
pub(crate) fn eval_short_circuit(
    op: Operator,
    ev: &mut Evaluator<'_>,
) -> Result<Operand, XpressionError> {
    let left = ev.reduce()?;
    if decides(op, &left) {
        ev.skip()?;
        return Ok(left);
    }
    ev.reduce()
}

pub fn not(operand: &Operand) -> Operand {
    Operand::Boolean(!to_boolean(operand))
}

/// A falsy left side decides `&&`, a truthy one decides `||`.
fn decides(op: Operator, left: &Operand) -> bool {
    match op {
        Operator::LogicalAnd => !to_boolean(left),
        _ => to_boolean(left),
    }
}
