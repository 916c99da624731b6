// tests/parser_tests.rs

use bdb_expr::expr::builders::*;
use bdb_expr::lexer::{LexError, Lexer};
use bdb_expr::parser::{ParseError, Parser};
use bdb_expr::{Expression, Token};
use chrono::NaiveDate;

fn parse(input: &str) -> Expression {
    Parser::parse_str(input).unwrap()
}

// ============================================================================
// Lexer
// ============================================================================

#[test]
fn test_lex_delimiters_and_atoms() {
    let mut lexer = Lexer::new(r#"(attr "what/date" date)"#);
    assert_eq!(lexer.next_token().unwrap(), Token::LParen);
    assert_eq!(lexer.next_token().unwrap(), Token::Symbol("attr".to_string()));
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Text("what/date".to_string())
    );
    assert_eq!(lexer.next_token().unwrap(), Token::Symbol("date".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::RParen);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_lex_literals() {
    let test_cases = vec![
        ("42", Token::Integer(42)),
        ("-7", Token::Integer(-7)),
        ("3.5", Token::Float(3.5)),
        ("2e-3", Token::Float(0.002)),
        ("true", Token::Boolean(true)),
        ("false", Token::Boolean(false)),
        (r#""""#, Token::Text(String::new())),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_token().unwrap(), expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_lex_escapes() {
    let mut lexer = Lexer::new(r#""a\"b\\c\nd\te""#);
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Text("a\"b\\c\nd\te".to_string())
    );
}

#[test]
fn test_lex_errors() {
    assert_eq!(
        Lexer::new(r#""open"#).next_token(),
        Err(LexError::UnterminatedText(0))
    );
    assert!(matches!(
        Lexer::new(r#""bad \q""#).next_token(),
        Err(LexError::InvalidEscape { ch: 'q', .. })
    ));
    assert!(matches!(
        Lexer::new("12abc").next_token(),
        Err(LexError::InvalidNumber { .. })
    ));
}

// ============================================================================
// Parser
// ============================================================================

#[test]
fn test_parse_atoms() {
    assert_eq!(parse("42"), Expression::Integer(42));
    assert_eq!(parse("3.0"), Expression::Float(3.0));
    assert_eq!(parse("false"), Expression::Boolean(false));
    assert_eq!(parse(r#""PVOL""#), literal("PVOL"));
    assert_eq!(parse("bropo"), symbol("bropo"));
}

#[test]
fn test_parse_call() {
    let expr = parse(r#"(= (attr "how/task" string) "bropo")"#);
    assert_eq!(
        expr,
        list([
            symbol("="),
            list([symbol("attr"), literal("how/task"), symbol("string")]),
            literal("bropo"),
        ])
    );
}

#[test]
fn test_parse_list_literals() {
    assert_eq!(parse("()"), Expression::List(vec![]));
    assert_eq!(
        parse("(1 (2 3) \"x\")"),
        list([
            literal(1),
            list([literal(2), literal(3)]),
            literal("x"),
        ])
    );
}

#[test]
fn test_parse_whitespace_insensitive() {
    assert_eq!(
        parse("  ( +\n\t1   2 )  "),
        add(literal(1), literal(2))
    );
}

#[test]
fn test_render_then_parse_round_trip() {
    let exprs = vec![
        and(
            eq(attribute("what/object", "string"), literal("PVOL")),
            ge(attribute("where/elangle", "double"), literal(0.5)),
        ),
        in_(
            attribute("what/source:WMO", "string"),
            list([literal("02606"), literal("02588")]),
        ),
        like(attribute("how/task", "string"), literal("se.smhi.*")),
        date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()),
        not(literal(true)),
        literal(3.0),
        literal(-12),
        literal("quote \" and \\ backslash"),
        Expression::List(vec![]),
    ];

    for expr in exprs {
        let rendered = expr.to_string();
        assert_eq!(parse(&rendered), expr, "Failed for: {}", rendered);
    }
}

#[test]
fn test_symbol_round_trip() {
    let test_cases = vec![
        ("attr", true),
        ("<=", true),
        ("what/source:WMO", true),
        ("-", true),
        ("-x", true),
        ("1", false),
        ("-2.5", false),
        ("true", false),
        ("", false),
        ("two words", false),
        ("a(b", false),
        ("say\"hi", false),
    ];

    for (name, readable) in test_cases {
        assert_eq!(Lexer::reads_as_symbol(name), readable, "Failed for: {:?}", name);
        let expr = symbol(name);
        let read_back = Parser::parse_str(&expr.to_string()).ok();
        assert_eq!(read_back == Some(expr), readable, "Failed for: {:?}", name);
    }

    assert_eq!(parse(&symbol("1").to_string()), Expression::Integer(1));
}

#[test]
fn test_from_str() {
    let expr: Expression = "(not true)".parse().unwrap();
    assert_eq!(expr, not(literal(true)));
}

#[test]
fn test_parse_errors() {
    assert_eq!(Parser::parse_str(""), Err(ParseError::UnexpectedEof));
    assert_eq!(Parser::parse_str("(+ 1 2"), Err(ParseError::UnexpectedEof));
    assert!(matches!(
        Parser::parse_str(")"),
        Err(ParseError::UnbalancedClose(_))
    ));
    assert!(matches!(
        Parser::parse_str("(+ 1 2) 3"),
        Err(ParseError::TrailingInput(_))
    ));
    assert!(matches!(
        Parser::parse_str("(\"open"),
        Err(ParseError::Lex(LexError::UnterminatedText(_)))
    ));
}
