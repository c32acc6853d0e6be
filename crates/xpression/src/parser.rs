//! Operator-precedence parser producing prefix (operator-first) order.
//!
//! This is shunting-yard run over the reversed token list; reversing the
//! output at the end yields prefix order, which the evaluator consumes
//! head-first without an operand stack.

use crate::error::XpressionError;
use crate::lexer;
use crate::token::{Associativity, Token, TokenKind};

/// Lexes and parses `text`. Trailing whitespace is ignored.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn parse(text: &str) -> Result<Vec<Token>, XpressionError> {
    let tokens = lexer::tokenize(text.trim_end()).map_err(|e| {
        tracing::debug!(error = %e, "tokenize failed");
        e
    })?;
    let ordered = to_prefix(tokens).map_err(|e| {
        tracing::debug!(error = %e, "parse failed");
        e
    })?;
    tracing::debug!(tokens = ordered.len(), "parsed");
    Ok(ordered)
}

/// Reorders a token list into prefix order, dropping parentheses.
pub fn to_prefix(mut tokens: Vec<Token>) -> Result<Vec<Token>, XpressionError> {
    tokens.reverse();
    let mut stack: Vec<Token> = Vec::new();
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token.kind {
            TokenKind::Literal(_) | TokenKind::Variable(_) => output.push(token),
            TokenKind::Operator(op) => {
                let incoming = op.detail();
                while let Some(top) = stack.last().and_then(Token::operator) {
                    let top_precedence = top.precedence();
                    let pop = incoming.precedence < top_precedence
                        || (incoming.precedence == top_precedence
                            && incoming.associativity == Associativity::Right);
                    if !pop {
                        break;
                    }
                    output.extend(stack.pop());
                }
                stack.push(token);
            }
            // Scanning backwards, a closing parenthesis opens a group.
            TokenKind::RightParen => stack.push(token),
            TokenKind::LeftParen => loop {
                match stack.pop() {
                    None => return Err(XpressionError::MismatchedParentheses),
                    Some(Token {
                        kind: TokenKind::RightParen,
                        ..
                    }) => break,
                    Some(top) => output.push(top),
                }
            },
        }
    }

    while let Some(top) = stack.pop() {
        if top.kind == TokenKind::RightParen {
            return Err(XpressionError::MismatchedParentheses);
        }
        output.push(top);
    }

    output.reverse();
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn npn(text: &str) -> String {
        parse(text)
            .unwrap_or_else(|e| panic!("parse({}) failed: {}", text, e))
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_precedence() {
        assert_eq!(npn("1 + 2 * 3"), "+ 1 * 2 3");
        assert_eq!(npn("1 * 2 + 3"), "+ * 1 2 3");
        assert_eq!(npn("1 || 2 && 3"), "|| 1 && 2 3");
        assert_eq!(npn("1 | 2 ^ 3 & 4"), "| 1 ^ 2 & 3 4");
        assert_eq!(npn("1 < 2 == 3 > 4"), "== < 1 2 > 3 4");
        assert_eq!(npn("1 << 2 + 3"), "<< 1 + 2 3");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(npn("1 - 2 - 3"), "- - 1 2 3");
        assert_eq!(npn("8 / 4 / 2"), "/ / 8 4 2");
    }

    #[test]
    fn test_right_associative_exponent() {
        assert_eq!(npn("2 ** 3 ** 2"), "** 2 ** 3 2");
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(npn("-2 ** 2"), "** - 2 2");
        assert_eq!(npn("--1"), "- - 1");
        assert_eq!(npn("1 + -2 * 3"), "+ 1 * - 2 3");
        assert_eq!(npn("!true && false"), "&& ! true false");
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(npn("(1 + 2) * 3"), "* + 1 2 3");
        assert_eq!(npn("((1 + 2))"), "+ 1 2");
        assert_eq!(npn("2 ** (3 - 1)"), "** 2 - 3 1");
        assert_eq!(npn("()"), "");
    }

    #[test]
    fn test_mismatched_parentheses() {
        for text in [r#""a" ( "b""#, "(1 + 2", "1 + 2)", ")(", "(1))"] {
            assert_eq!(
                parse(text),
                Err(XpressionError::MismatchedParentheses),
                "text: {}",
                text
            );
        }
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn debug_log_of(text: &str) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
            .with_writer(move || writer.clone())
            .finish();
        let _ = tracing::subscriber::with_default(subscriber, || parse(text));
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn test_failures_are_logged() {
        let log = debug_log_of("(1 + 2");
        assert!(log.contains("parse failed"), "log: {}", log);
        assert!(log.contains("mismatched parentheses"), "log: {}", log);

        let log = debug_log_of("1 + #");
        assert!(log.contains("tokenize failed"), "log: {}", log);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   ").unwrap().is_empty());
    }
}
