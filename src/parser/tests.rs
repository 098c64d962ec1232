//! Unit tests for the parser module.
//!
//! Covers atoms, nested lists, the single top-level form rule and the
//! positioned errors for malformed programs.

use std::rc::Rc;

use crate::{ast::ast::Expr, errors::errors::ErrorImpl, lexer::lexer::tokenize};

use super::parser::parse;

fn parse_source(source: &str) -> Result<Expr, crate::errors::errors::Error> {
    let tokens = tokenize(source.to_string(), Some("test.cyl".to_string())).unwrap();
    parse(tokens, Rc::new("test.cyl".to_string()))
}

#[test]
fn test_parse_printf_form() {
    let expr = parse_source("(printf \"I like number %d!! \\n\" 7)").unwrap();

    assert_eq!(
        expr,
        Expr::List(vec![
            Expr::Symbol("printf".to_string()),
            Expr::String("I like number %d!! \\n".to_string()),
            Expr::Number(7),
        ])
    );
}

#[test]
fn test_parse_atoms() {
    assert_eq!(parse_source("42").unwrap(), Expr::Number(42));
    assert_eq!(parse_source("-2147483648").unwrap(), Expr::Number(i32::MIN));
    assert_eq!(
        parse_source("\"hi\"").unwrap(),
        Expr::String("hi".to_string())
    );
    assert_eq!(parse_source("x").unwrap(), Expr::Symbol("x".to_string()));
}

#[test]
fn test_parse_nested_lists() {
    let expr = parse_source("(a (b 1) ())").unwrap();

    assert_eq!(
        expr,
        Expr::List(vec![
            Expr::Symbol("a".to_string()),
            Expr::List(vec![Expr::Symbol("b".to_string()), Expr::Number(1)]),
            Expr::List(vec![]),
        ])
    );
}

#[test]
fn test_parse_number_out_of_range() {
    let error = parse_source("(printf \"%d\" 2147483648)").unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::NumberParseError {
            token: "2147483648".to_string()
        }
    );
    assert_eq!(error.get_position().0, 13);
}

#[test]
fn test_parse_unclosed_list() {
    let error = parse_source("(printf \"%d\" 7").unwrap_err();

    assert_eq!(error.get_internal_error(), &ErrorImpl::UnexpectedEof);
}

#[test]
fn test_parse_stray_close_paren() {
    let error = parse_source(")").unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            token: ")".to_string()
        }
    );
}

#[test]
fn test_parse_trailing_form() {
    let error = parse_source("(a) (b)").unwrap_err();

    assert_eq!(error.get_error_name(), "TrailingInput");
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_parse_empty_program() {
    let error = parse_source("  ; nothing here").unwrap_err();

    assert_eq!(error.get_internal_error(), &ErrorImpl::UnexpectedEof);
}

#[test]
fn test_parse_without_eof_token() {
    let expr = parse(vec![], Rc::new("test.cyl".to_string()));

    assert!(expr.is_err());
}
