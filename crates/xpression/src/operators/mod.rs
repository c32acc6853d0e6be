//! Operator semantics, grouped by family.

pub mod arithmetic;
pub mod bitwise;
pub mod comparison;
pub mod logical;

use crate::error::XpressionError;
use crate::evaluate::Evaluator;
use crate::token::Operator;
use crate::types::Operand;

/// Pulls the operator's operands from the evaluator and applies it.
pub(crate) fn eval(op: Operator, ev: &mut Evaluator<'_>) -> Result<Operand, XpressionError> {
    match op {
        Operator::LogicalAnd | Operator::LogicalOr => logical::eval_short_circuit(op, ev),
        _ if op.arity() == 1 => {
            let operand = ev.reduce()?;
            apply_unary(op, &operand)
        }
        _ => {
            let left = ev.reduce()?;
            let right = ev.reduce()?;
            apply_binary(op, &left, &right)
        }
    }
}

pub fn apply_unary(op: Operator, operand: &Operand) -> Result<Operand, XpressionError> {
    match op {
        Operator::LogicalNot => Ok(logical::not(operand)),
        Operator::BitwiseNot => Ok(bitwise::not(operand)),
        Operator::UnaryMinus => Ok(arithmetic::negate(operand)),
        _ => Err(XpressionError::UnknownOperator(op.to_string())),
    }
}

/// Applies a binary operator to evaluated operands. `&&` and `||` need the
/// unevaluated right side and are rejected here.
pub fn apply_binary(
    op: Operator,
    left: &Operand,
    right: &Operand,
) -> Result<Operand, XpressionError> {
    arithmetic::apply(op, left, right)
        .or_else(|| bitwise::apply(op, left, right))
        .or_else(|| comparison::compare(op, left, right).map(Operand::Boolean))
        .ok_or_else(|| XpressionError::UnknownOperator(op.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_binary() {
        let (one, two) = (Operand::Number(1.0), Operand::Number(2.0));
        assert_eq!(
            apply_binary(Operator::Plus, &one, &two),
            Ok(Operand::Number(3.0))
        );
        assert_eq!(
            apply_binary(Operator::Less, &one, &two),
            Ok(Operand::Boolean(true))
        );
        assert_eq!(
            apply_binary(Operator::ShiftLeft, &one, &two),
            Ok(Operand::Number(4.0))
        );
    }

    #[test]
    fn test_apply_rejects_misplaced_operators() {
        let one = Operand::Number(1.0);
        for op in [Operator::LogicalAnd, Operator::LogicalOr, Operator::LogicalNot] {
            assert_eq!(
                apply_binary(op, &one, &one),
                Err(XpressionError::UnknownOperator(op.to_string()))
            );
        }
        assert_eq!(
            apply_unary(Operator::Plus, &one),
            Err(XpressionError::UnknownOperator("+".to_string()))
        );
        assert_eq!(
            apply_unary(Operator::UnaryMinus, &one),
            Ok(Operand::Number(-1.0))
        );
    }
}
