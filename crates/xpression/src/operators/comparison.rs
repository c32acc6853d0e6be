//! Equality, relational and regexp-match operators.
//!
//! Follows the ECMA-262 abstract equality and relational comparison with two
//! local rules: strings compare byte-wise (not by code point), and `=~`/`!=~`
//! only apply to exactly one regexp operand.

use crate::coerce::{to_number, to_string};
use crate::token::Operator;
use crate::types::Operand;
use std::cmp::Ordering;

pub fn compare(op: Operator, left: &Operand, right: &Operand) -> Option<bool> {
    match op {
        Operator::Equal | Operator::NotEqual => Some(loose_equality(op, left, right)),
        Operator::StrictEqual | Operator::StrictNotEqual => {
            Some(strict_equality(op, left, right))
        }
        Operator::RegexMatch | Operator::NotRegexMatch => Some(regex_match(op, left, right)),
        Operator::Greater | Operator::GreaterOrEqual | Operator::Less | Operator::LessOrEqual => {
            Some(relational(op, left, right))
        }
        _ => None,
    }
}

/// `==` / `!=`: `null` and `undefined` only equal each other.
fn loose_equality(op: Operator, left: &Operand, right: &Operand) -> bool {
    if left.is_nullish() || right.is_nullish() {
        let equal = left.is_nullish() && right.is_nullish();
        return if op == Operator::Equal { equal } else { !equal };
    }
    relational(op, left, right)
}

/// `===` / `!==`: operands of different kinds are never equal.
fn strict_equality(op: Operator, left: &Operand, right: &Operand) -> bool {
    let equal = if !left.same_type(right) {
        false
    } else if left.is_nullish() {
        true
    } else {
        return relational(op, left, right);
    };
    if op == Operator::StrictEqual {
        equal
    } else {
        !equal
    }
}

/// Exactly one side must be a regexp; the other side is stringified.
fn regex_match(op: Operator, left: &Operand, right: &Operand) -> bool {
    let (re, subject) = match (left, right) {
        (Operand::Regexp(_), Operand::Regexp(_)) => return false,
        (Operand::Regexp(re), other) | (other, Operand::Regexp(re)) => (re, other),
        _ => return false,
    };
    let matched = re.is_match(&to_string(subject));
    if op == Operator::RegexMatch {
        matched
    } else {
        !matched
    }
}

/// Two strings compare as bytes; anything else compares as numbers.
fn relational(op: Operator, left: &Operand, right: &Operand) -> bool {
    if let (Operand::String(a), Operand::String(b)) = (left, right) {
        return ordering_holds(op, a.as_bytes().cmp(b.as_bytes()));
    }
    let (a, b) = (to_number(left), to_number(right));
    match a.partial_cmp(&b) {
        Some(ordering) => ordering_holds(op, ordering),
        // NaN on either side: only the inequality operators hold.
        None => matches!(op, Operator::NotEqual | Operator::StrictNotEqual),
    }
}

fn ordering_holds(op: Operator, ordering: Ordering) -> bool {
    match op {
        Operator::Equal | Operator::StrictEqual => ordering == Ordering::Equal,
        Operator::NotEqual | Operator::StrictNotEqual => ordering != Ordering::Equal,
        Operator::Greater => ordering == Ordering::Greater,
        Operator::GreaterOrEqual => ordering != Ordering::Less,
        Operator::Less => ordering == Ordering::Less,
        Operator::LessOrEqual => ordering != Ordering::Greater,
        _ => false,
    }
}
