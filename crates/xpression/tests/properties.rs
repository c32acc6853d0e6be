//! Property tests: literal rendering round-trips and whitespace insensitivity.

use proptest::prelude::*;
use xpression::{eval, Operand, RegexFlags, Regexp};

fn render_round_trip(value: &Operand) -> Result<(), TestCaseError> {
    let rendered = value.to_string();
    let evaluated = eval(&rendered)
        .map_err(|e| TestCaseError::fail(format!("eval({}) failed: {}", rendered, e)))?;
    prop_assert_eq!(evaluated.to_string(), rendered);
    Ok(())
}

fn regexp_literal() -> impl Strategy<Value = Regexp> {
    ("[a-z/.*+?]{1,8}", any::<[bool; 4]>()).prop_filter_map("valid regex", |(source, bits)| {
        let flags = RegexFlags {
            case_insensitive: bits[0],
            multi_line: bits[1],
            dot_all: bits[2],
            ungreedy: bits[3],
        };
        Regexp::new(&source, flags).ok()
    })
}

/// A small numeric expression grammar, rendered with generous whitespace.
#[derive(Debug, Clone)]
enum Expr {
    Num(u16),
    Neg(Box<Expr>),
    Bin(Box<Expr>, &'static str, Box<Expr>),
}

impl Expr {
    fn render(&self) -> String {
        match self {
            Expr::Num(n) => n.to_string(),
            Expr::Neg(e) => format!("- {}", e.render()),
            Expr::Bin(l, op, r) => format!("( {} {} {} )", l.render(), op, r.render()),
        }
    }
}

fn expr() -> impl Strategy<Value = Expr> {
    let leaf = any::<u16>().prop_map(Expr::Num);
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|e| Expr::Neg(Box::new(e))),
            (
                inner.clone(),
                prop::sample::select(vec![
                    "+", "-", "*", "/", "%", "**", "<", ">=", "==", "!==", "&&", "||", "|",
                    "^", "<<", ">>",
                ]),
                inner,
            )
                .prop_map(|(l, op, r)| Expr::Bin(Box::new(l), op, Box::new(r))),
        ]
    })
}

proptest! {
    #[test]
    fn prop_number_round_trip(n in any::<f64>().prop_filter("finite", |n| n.is_finite())) {
        render_round_trip(&Operand::Number(n))?;
    }

    #[test]
    fn prop_string_round_trip(s in any::<String>()) {
        render_round_trip(&Operand::String(s))?;
    }

    #[test]
    fn prop_regexp_round_trip(re in regexp_literal()) {
        render_round_trip(&Operand::Regexp(re))?;
    }

    #[test]
    fn prop_keyword_round_trip(value in prop_oneof![
        Just(Operand::Null),
        Just(Operand::Boolean(true)),
        Just(Operand::Boolean(false)),
    ]) {
        render_round_trip(&value)?;
    }

    #[test]
    fn prop_whitespace_is_insignificant(e in expr()) {
        let spaced = e.render();
        let compact: String = spaced.chars().filter(|c| !c.is_whitespace()).collect();
        prop_assert_eq!(eval(&spaced), eval(&compact), "{} vs {}", spaced, compact);
    }
}
