use crate::error::XpressionError;
use crate::types::Operand;

/// Maps the raw text of a variable token (such as `@.items[0]` or `$.name`)
/// to a value.
///
/// Any `Fn(&str) -> Result<Operand, XpressionError>` closure is a resolver.
pub trait Resolver {
    fn resolve(&self, path: &str) -> Result<Operand, XpressionError>;
}

impl<F> Resolver for F
where
    F: Fn(&str) -> Result<Operand, XpressionError>,
{
    fn resolve(&self, path: &str) -> Result<Operand, XpressionError> {
        self(path)
    }
}

/// Evaluation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// Maximum operator nesting depth. `None` leaves nesting unbounded.
    pub max_depth: Option<usize>,
}

impl EvalOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}
