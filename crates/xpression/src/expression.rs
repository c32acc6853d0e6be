//! Parse once, evaluate many times.

use crate::error::XpressionError;
use crate::eval_ctx::{EvalOptions, Resolver};
use crate::evaluate::Evaluator;
use crate::parser;
use crate::token::Token;
use crate::types::Operand;
use std::fmt;
use std::str::FromStr;

/// A parsed expression: the source text and its prefix-ordered tokens.
///
/// Evaluation never mutates the expression, so one `Expression` can be
/// evaluated any number of times against different resolvers.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    tokens: Vec<Token>,
    options: EvalOptions,
}

impl Expression {
    pub fn parse(text: &str) -> Result<Self, XpressionError> {
        Ok(Expression {
            source: text.to_string(),
            tokens: parser::parse(text)?,
            options: EvalOptions::default(),
        })
    }

    pub fn with_options(mut self, options: EvalOptions) -> Self {
        self.options = options;
        self
    }

    #[tracing::instrument(level = "debug", skip_all, fields(source = %self.source))]
    pub fn evaluate(&self, resolver: &dyn Resolver) -> Result<Operand, XpressionError> {
        self.run(Some(resolver))
    }

    /// Evaluates without a resolver; any variable token is an error.
    pub fn evaluate_plain(&self) -> Result<Operand, XpressionError> {
        self.run(None)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn options(&self) -> EvalOptions {
        self.options
    }

    fn run(&self, resolver: Option<&dyn Resolver>) -> Result<Operand, XpressionError> {
        let result = Evaluator::new(&self.tokens, resolver, self.options).run();
        if let Err(e) = &result {
            tracing::debug!(error = %e, "evaluation failed");
        }
        result
    }
}

impl FromStr for Expression {
    type Err = XpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::parse(s)
    }
}

/// Prints the prefix-ordered tokens separated by spaces.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
