//! Head-first evaluation of a prefix-ordered token sequence.
//!
//! The evaluator walks an index cursor over an immutable token slice. Each
//! operator pulls its operands by recursing on the cursor, so no operand
//! stack and no sub-slices are needed.

use crate::error::XpressionError;
use crate::eval_ctx::{EvalOptions, Resolver};
use crate::operators;
use crate::parser;
use crate::token::{Token, TokenKind};
use crate::types::Operand;

pub(crate) struct Evaluator<'a> {
    tokens: &'a [Token],
    pos: usize,
    resolver: Option<&'a dyn Resolver>,
    options: EvalOptions,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(
        tokens: &'a [Token],
        resolver: Option<&'a dyn Resolver>,
        options: EvalOptions,
    ) -> Self {
        Evaluator {
            tokens,
            pos: 0,
            resolver,
            options,
            depth: 0,
        }
    }

    /// Reduces one complete expression and requires the sequence to be used up.
    pub(crate) fn run(mut self) -> Result<Operand, XpressionError> {
        let result = self.reduce()?;
        if self.pos != self.tokens.len() {
            tracing::debug!(
                consumed = self.pos,
                total = self.tokens.len(),
                "trailing tokens after expression"
            );
            return Err(XpressionError::NotEnoughArguments);
        }
        Ok(result)
    }

    /// Reduces the expression starting at the cursor to a single value.
    pub(crate) fn reduce(&mut self) -> Result<Operand, XpressionError> {
        let token = self.next()?;
        match &token.kind {
            TokenKind::Literal(operand) => Ok(operand.clone()),
            TokenKind::Variable(path) => self.resolve(token, path),
            TokenKind::Operator(op) => {
                self.enter()?;
                let result = operators::eval(*op, self);
                self.depth -= 1;
                result
            }
            TokenKind::LeftParen | TokenKind::RightParen => {
                Err(XpressionError::UnknownOperator(token.to_string()))
            }
        }
    }

    /// Moves the cursor past the expression starting at it without
    /// evaluating anything.
    pub(crate) fn skip(&mut self) -> Result<(), XpressionError> {
        let mut pending = 1usize;
        while pending > 0 {
            let token = self.next()?;
            pending -= 1;
            match &token.kind {
                TokenKind::Operator(op) => pending += op.arity(),
                TokenKind::Literal(_) | TokenKind::Variable(_) => {}
                TokenKind::LeftParen | TokenKind::RightParen => {
                    return Err(XpressionError::UnknownOperator(token.to_string()))
                }
            }
        }
        Ok(())
    }

    fn next(&mut self) -> Result<&'a Token, XpressionError> {
        let tokens = self.tokens;
        let token = tokens
            .get(self.pos)
            .ok_or(XpressionError::NotEnoughArguments)?;
        self.pos += 1;
        Ok(token)
    }

    fn enter(&mut self) -> Result<(), XpressionError> {
        if let Some(limit) = self.options.max_depth {
            if self.depth >= limit {
                return Err(XpressionError::TooDeep(limit));
            }
        }
        self.depth += 1;
        Ok(())
    }

    fn resolve(&self, token: &Token, path: &str) -> Result<Operand, XpressionError> {
        let resolver = self
            .resolver
            .ok_or_else(|| XpressionError::UnresolvedVariable {
                offset: token.offset,
                text: path.to_string(),
            })?;
        let value = resolver.resolve(path)?;
        tracing::trace!(path, kind = value.type_name(), "resolved variable");
        Ok(value)
    }
}

/// Evaluates a prefix-ordered token sequence. Variable tokens are looked up
/// through `resolver`; without one they fail with
/// [`XpressionError::UnresolvedVariable`].
pub fn evaluate(
    tokens: &[Token],
    resolver: Option<&dyn Resolver>,
) -> Result<Operand, XpressionError> {
    evaluate_with_options(tokens, resolver, EvalOptions::default())
}

pub fn evaluate_with_options(
    tokens: &[Token],
    resolver: Option<&dyn Resolver>,
    options: EvalOptions,
) -> Result<Operand, XpressionError> {
    Evaluator::new(tokens, resolver, options).run()
}

/// Parses and evaluates `text` in one call, without variables.
pub fn eval(text: &str) -> Result<Operand, XpressionError> {
    let tokens = parser::parse(text)?;
    evaluate(&tokens, None)
}

/// Parses and evaluates `text` in one call, resolving variables through
/// `resolver`.
pub fn eval_with(text: &str, resolver: &dyn Resolver) -> Result<Operand, XpressionError> {
    let tokens = parser::parse(text)?;
    evaluate(&tokens, Some(resolver))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_empty_sequence() {
        assert_eq!(eval(""), Err(XpressionError::NotEnoughArguments));
        assert_eq!(eval("()"), Err(XpressionError::NotEnoughArguments));
    }

    #[test]
    fn test_trailing_tokens() {
        assert_eq!(eval("1 2"), Err(XpressionError::NotEnoughArguments));
        assert_eq!(eval("1 +"), Err(XpressionError::NotEnoughArguments));
    }

    #[test]
    fn test_short_circuit_skips_resolver() {
        let calls = Cell::new(0);
        let resolver = |_: &str| -> Result<Operand, XpressionError> {
            calls.set(calls.get() + 1);
            Ok(Operand::Boolean(true))
        };
        assert_eq!(
            eval_with("false && (@.a || @.b)", &resolver),
            Ok(Operand::Boolean(false))
        );
        assert_eq!(calls.get(), 0);
        assert_eq!(eval_with("1 || @.a", &resolver), Ok(Operand::Number(1.0)));
        assert_eq!(calls.get(), 0);
        assert_eq!(eval_with("0 || @.a", &resolver), Ok(Operand::Boolean(true)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_depth_limit() {
        let tokens = parser::parse("1 + 2 + 3").unwrap();
        let options = EvalOptions::default().with_max_depth(2);
        assert_eq!(
            evaluate_with_options(&tokens, None, options),
            Ok(Operand::Number(6.0))
        );
        let options = EvalOptions::default().with_max_depth(1);
        assert_eq!(
            evaluate_with_options(&tokens, None, options),
            Err(XpressionError::TooDeep(1))
        );
    }

    #[test]
    fn test_paren_token_is_rejected() {
        let tokens = crate::lexer::tokenize("(1)").unwrap();
        assert_eq!(
            evaluate(&tokens, None),
            Err(XpressionError::UnknownOperator("(".to_string()))
        );
    }
}
