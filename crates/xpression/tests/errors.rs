//! Error table: lexer, parser and evaluator failures with their messages.

use xpression::{eval, ErrorStage, LexErrorKind, XpressionError};

fn check_err(text: &str) -> XpressionError {
    eval(text)
        .err()
        .unwrap_or_else(|| panic!("expected error for {}", text))
}

fn check_msg(text: &str, expected: &str) {
    assert_eq!(check_err(text).to_string(), expected, "expression: {}", text);
}

#[test]
fn test_not_enough_arguments() {
    check_msg("", "not enough arguments");
    check_msg("()", "not enough arguments");
    check_msg("1 + 2 +", "not enough arguments");
    check_msg("2 * + 2", "not enough arguments");
    check_msg("1 2", "not enough arguments");
    check_msg("!", "not enough arguments");
}

#[test]
fn test_invalid_number() {
    let msg = check_err("1..0 +").to_string();
    assert!(msg.starts_with("invalid number literal: "), "got: {}", msg);
    assert!(msg.ends_with(" at 0: 1..0"), "got: {}", msg);
}

#[test]
fn test_unexpected_end_of_string() {
    check_msg(r#""a" + "b"#, r#"unexpected end of string at 6: "b"#);
    check_msg(r#"'abc"#, "unexpected end of string at 0: 'abc");
}

#[test]
fn test_unknown_token() {
    check_msg(r#""a" # "b""#, "unknown token at 4: #");
    check_msg("1 + ?", "unknown token at 4: ?");
}

#[test]
fn test_variable_without_resolver() {
    check_msg("troo", "unknown token at 0: troo");
    check_msg("nool", "unknown token at 0: nool");
    check_msg("1 + @.x", "unknown token at 4: @.x");
    assert_eq!(
        check_err("1 + @.x"),
        XpressionError::UnresolvedVariable {
            offset: 4,
            text: "@.x".to_string()
        }
    );
}

#[test]
fn test_mismatched_parentheses() {
    check_msg(r#""a" ( "b""#, "mismatched parentheses");
    check_msg("(1 + 2", "mismatched parentheses");
    check_msg("1 + 2)", "mismatched parentheses");
}

#[test]
fn test_invalid_regex() {
    match check_err(r#""a" =~ /a(b/"#) {
        XpressionError::Lex { kind, offset, text } => {
            assert!(matches!(kind, LexErrorKind::InvalidRegex(_)), "got: {:?}", kind);
            assert_eq!(offset, 7);
            assert_eq!(text, "/a(b/");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_unterminated_regex() {
    match check_err(r#""a" =~ /abc"#) {
        XpressionError::Lex { kind, offset, .. } => {
            assert_eq!(kind, LexErrorKind::UnexpectedEnd);
            assert_eq!(offset, 7);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_invalid_character() {
    check_msg("1 + ∑", "invalid character at 4: ∑");
}

#[test]
fn test_hexadecimal() {
    check_msg("0xZZ", "invalid hexadecimal at 0: 0xZZ");
    check_msg("0x1234567890abcdef0", "hexadecimal too long at 0: 0x1234567890abcdef0");
}

#[test]
fn test_error_stages() {
    assert_eq!(check_err("#").stage(), ErrorStage::Lex);
    assert_eq!(check_err("(1").stage(), ErrorStage::Parse);
    assert_eq!(check_err("1 +").stage(), ErrorStage::Eval);
    assert_eq!(check_err("troo").stage(), ErrorStage::Eval);
}
