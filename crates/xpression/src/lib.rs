//! Embeddable expression language with JavaScript value-coercion semantics.
//!
//! # Overview
//!
//! Source text is split into tokens, reordered into prefix (operator-first)
//! order by an operator-precedence parser, then reduced head-first to a single
//! [`Operand`]. Variables such as `@.user.name` are handed verbatim to a
//! [`Resolver`] supplied by the host.
//!
//! # Example
//!
//! ```
//! use xpression::{eval, eval_with, Expression, Operand, Vars};
//! use serde_json::json;
//!
//! assert_eq!(eval("1 + 2 * 3").unwrap(), Operand::Number(7.0));
//! assert_eq!(eval(r#"null + "able""#).unwrap(), Operand::from("nullable"));
//!
//! let vars = Vars::new(json!({"user": {"age": 42}}));
//! assert_eq!(eval_with("@.user.age >= 18", &vars).unwrap(), Operand::Boolean(true));
//!
//! let expr = Expression::parse("2 ** 3 ** 2").unwrap();
//! assert_eq!(expr.to_string(), "** 2 ** 3 2");
//! assert_eq!(expr.evaluate_plain().unwrap(), Operand::Number(512.0));
//! ```

pub mod coerce;
pub mod error;
pub mod eval_ctx;
pub mod evaluate;
pub mod expression;
pub mod lexer;
pub mod operators;
pub mod parser;
pub mod path;
pub mod token;
pub mod types;
pub mod vars;

pub use error::{ErrorStage, LexErrorKind, XpressionError};
pub use eval_ctx::{EvalOptions, Resolver};
pub use evaluate::{eval, eval_with, evaluate, evaluate_with_options};
pub use expression::Expression;
pub use parser::parse;
pub use token::{Associativity, Operator, Token, TokenKind};
pub use types::{Operand, RegexFlags, Regexp};
pub use vars::Vars;
