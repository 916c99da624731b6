// tests/expression_tests.rs

use bdb_expr::expr::builders::*;
use bdb_expr::{Expression, ExpressionError, ExpressionType};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

fn int_list(values: &[i64]) -> Expression {
    values.iter().map(|&n| Expression::Integer(n)).collect()
}

// ============================================================================
// Equality and Tags
// ============================================================================

#[test]
fn test_structural_equality() {
    assert_eq!(Expression::Integer(3), Expression::Integer(3));
    assert_eq!(Expression::Text("PVOL".into()), literal("PVOL"));
    assert_eq!(int_list(&[1, 2]), int_list(&[1, 2]));
    assert_ne!(int_list(&[1, 2]), int_list(&[2, 1]));
}

#[test]
fn test_integer_and_float_are_not_equal() {
    assert_ne!(Expression::Integer(3), Expression::Float(3.0));
    assert_ne!(Expression::Text("x".into()), Expression::Symbol("x".into()));
}

#[test]
fn test_tags() {
    let test_cases = vec![
        (int_list(&[]), ExpressionType::List),
        (Expression::Integer(1), ExpressionType::Integer),
        (Expression::Float(1.5), ExpressionType::Float),
        (Expression::Boolean(true), ExpressionType::Boolean),
        (literal("a"), ExpressionType::Text),
        (symbol("attr"), ExpressionType::Symbol),
    ];

    for (expr, expected) in test_cases {
        assert_eq!(expr.tag(), expected, "Failed for: {}", expr);
    }
}

// ============================================================================
// Coercion Accessors
// ============================================================================

#[test]
fn test_accessors_on_matching_tag() {
    assert_eq!(Expression::Integer(7).as_integer(), Some(7));
    assert_eq!(Expression::Float(0.5).as_float(), Some(0.5));
    assert_eq!(Expression::Boolean(false).as_boolean(), Some(false));
    assert_eq!(literal("x").as_text(), Some("x"));
    assert_eq!(symbol("attr").as_symbol(), Some("attr"));
    assert_eq!(int_list(&[1]).as_list().map(<[_]>::len), Some(1));
}

#[test]
fn test_integer_reads_as_float_but_not_the_reverse() {
    assert_eq!(Expression::Integer(3).as_float(), Some(3.0));
    assert_eq!(Expression::Float(3.0).as_integer(), None);
}

#[test]
fn test_accessors_on_mismatched_tag_are_absent() {
    let text = literal("3");
    assert_eq!(text.as_integer(), None);
    assert_eq!(text.as_float(), None);
    assert_eq!(text.as_boolean(), None);
    assert_eq!(text.as_symbol(), None);
    assert!(text.as_list().is_none());
    assert_eq!(symbol("x").as_text(), None);
}

#[test]
fn test_truthiness() {
    assert!(!int_list(&[]).is_truthy());
    assert!(int_list(&[0]).is_truthy());
    assert!(!Expression::Integer(0).is_truthy());
    assert!(Expression::Integer(-1).is_truthy());
    assert!(!Expression::Float(0.0).is_truthy());
    assert!(!literal("").is_truthy());
    assert!(literal("False").is_truthy());
    assert!(!Expression::Boolean(false).is_truthy());
}

// ============================================================================
// List Operations
// ============================================================================

#[test]
fn test_list_size_and_get() {
    let list = int_list(&[10, 20, 30]);
    assert_eq!(list.len(), 3);
    assert_eq!(list.get(1).unwrap(), &Expression::Integer(20));
    assert_eq!(
        list.get(3),
        Err(ExpressionError::OutOfRange { index: 3, len: 3 })
    );
}

#[test]
fn test_non_list_behaves_as_empty() {
    let scalar = Expression::Integer(5);
    assert_eq!(scalar.len(), 0);
    assert!(scalar.is_empty());
    assert_eq!(scalar.iter().count(), 0);
    assert!(scalar.get(0).is_err());
}

#[test]
fn test_pop_front() {
    let mut list = int_list(&[1, 2]);
    assert_eq!(list.pop_front().unwrap(), Expression::Integer(1));
    assert_eq!(list.pop_front().unwrap(), Expression::Integer(2));
    assert!(matches!(
        list.pop_front(),
        Err(ExpressionError::OutOfRange { .. })
    ));

    let mut scalar = literal("x");
    assert!(scalar.pop_front().is_err());
}

#[test]
fn test_iterate_in_order() {
    let list = int_list(&[3, 1, 2]);
    let collected: Vec<i64> = list.iter().filter_map(Expression::as_integer).collect();
    assert_eq!(collected, vec![3, 1, 2]);
}

#[test]
fn test_text_from_absent_value_fails() {
    let absent: Option<String> = None;
    assert_eq!(
        Expression::try_from(absent),
        Err(ExpressionError::AbsentLiteral("text"))
    );
    assert_eq!(
        Expression::try_from(Some("PVOL")).unwrap(),
        literal("PVOL")
    );
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_render_literals() {
    assert_eq!(Expression::Integer(-4).to_string(), "-4");
    assert_eq!(Expression::Float(3.0).to_string(), "3.0");
    assert_eq!(Expression::Float(0.25).to_string(), "0.25");
    assert_eq!(Expression::Boolean(true).to_string(), "true");
    assert_eq!(literal("a \"b\"\n").to_string(), r#""a \"b\"\n""#);
    assert_eq!(symbol("<=").to_string(), "<=");
}

#[test]
fn test_render_nested_lists() {
    let expr = and(
        eq(attribute("what/object", "string"), literal("PVOL")),
        not(lt(literal(1), literal(2.5))),
    );
    assert_eq!(
        expr.to_string(),
        r#"(and (= (attr "what/object" "string") "PVOL") (not (< 1 2.5)))"#
    );
    assert_eq!(int_list(&[]).to_string(), "()");
}

// ============================================================================
// Builders
// ============================================================================

#[test]
fn test_binary_builders_emit_operator_symbols() {
    let one = || literal(1);
    let test_cases = vec![
        (add(one(), one()), "+"),
        (sub(one(), one()), "-"),
        (mul(one(), one()), "*"),
        (div(one(), one()), "/"),
        (eq(one(), one()), "="),
        (ne(one(), one()), "!="),
        (lt(one(), one()), "<"),
        (le(one(), one()), "<="),
        (gt(one(), one()), ">"),
        (ge(one(), one()), ">="),
        (and(one(), one()), "and"),
        (or(one(), one()), "or"),
        (like(one(), one()), "like"),
        (in_(one(), one()), "in"),
    ];

    for (expr, op) in test_cases {
        assert_eq!(expr.len(), 3, "Failed for: {}", op);
        assert_eq!(expr.get(0).unwrap(), &symbol(op));
    }
}

#[test]
fn test_attribute_builder() {
    assert_eq!(
        attribute("where/elangle", "double"),
        list([symbol("attr"), literal("where/elangle"), literal("double")])
    );
}

#[test]
fn test_folding_connectives() {
    assert_eq!(and_all(Vec::<Expression>::new()), Expression::Boolean(true));
    assert_eq!(or_any(Vec::<Expression>::new()), Expression::Boolean(false));
    assert_eq!(
        and_all([literal(1), literal(2), literal(3)]),
        and(and(literal(1), literal(2)), literal(3))
    );
}

#[test]
fn test_temporal_builders() {
    let d = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let t = NaiveTime::from_hms_opt(12, 5, 0).unwrap();
    assert_eq!(date(d).to_string(), "(date 2024 5 1)");
    assert_eq!(time(t).to_string(), "(time 12 5 0)");
    assert_eq!(
        datetime(NaiveDateTime::new(d, t)).to_string(),
        "(datetime 2024 5 1 12 5 0)"
    );
}

#[test]
fn test_marker_builders() {
    let quantity = attribute("what/quantity", "string");
    assert_eq!(asc(quantity.clone()).get(0).unwrap(), &symbol("asc"));
    assert_eq!(desc(quantity.clone()).get(0).unwrap(), &symbol("desc"));
    assert_eq!(count(quantity.clone()).to_string(), r#"(count (attr "what/quantity" "string"))"#);
    assert_eq!(sum(quantity.clone()).get(1).unwrap(), &quantity);
    assert_eq!(min(quantity.clone()).get(0).unwrap(), &symbol("min"));
    assert_eq!(max(quantity).get(0).unwrap(), &symbol("max"));
}
