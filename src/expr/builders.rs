//! Constructors for the forms query construction code emits.
//!
//! Every builder returns a plain [`Expression`]; nothing here evaluates.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::expr::Expression;

pub fn symbol(name: impl Into<String>) -> Expression {
    Expression::Symbol(name.into())
}

pub fn literal(value: impl Into<Expression>) -> Expression {
    value.into()
}

pub fn list(items: impl IntoIterator<Item = Expression>) -> Expression {
    items.into_iter().collect()
}

/// `(name arg...)`
pub fn call(name: &str, args: impl IntoIterator<Item = Expression>) -> Expression {
    std::iter::once(symbol(name)).chain(args).collect()
}

fn binary(op: &str, lhs: Expression, rhs: Expression) -> Expression {
    call(op, [lhs, rhs])
}

/// Reference to a metadata attribute, resolved during matching.
///
/// `value_type` is one of `string`, `long`, `double`, `bool`, `date`, `time`.
pub fn attribute(name: impl Into<String>, value_type: impl Into<String>) -> Expression {
    call(
        "attr",
        [
            Expression::Text(name.into()),
            Expression::Text(value_type.into()),
        ],
    )
}

pub fn add(lhs: Expression, rhs: Expression) -> Expression {
    binary("+", lhs, rhs)
}

pub fn sub(lhs: Expression, rhs: Expression) -> Expression {
    binary("-", lhs, rhs)
}

pub fn mul(lhs: Expression, rhs: Expression) -> Expression {
    binary("*", lhs, rhs)
}

pub fn div(lhs: Expression, rhs: Expression) -> Expression {
    binary("/", lhs, rhs)
}

pub fn eq(lhs: Expression, rhs: Expression) -> Expression {
    binary("=", lhs, rhs)
}

pub fn ne(lhs: Expression, rhs: Expression) -> Expression {
    binary("!=", lhs, rhs)
}

pub fn lt(lhs: Expression, rhs: Expression) -> Expression {
    binary("<", lhs, rhs)
}

pub fn le(lhs: Expression, rhs: Expression) -> Expression {
    binary("<=", lhs, rhs)
}

pub fn gt(lhs: Expression, rhs: Expression) -> Expression {
    binary(">", lhs, rhs)
}

pub fn ge(lhs: Expression, rhs: Expression) -> Expression {
    binary(">=", lhs, rhs)
}

pub fn and(lhs: Expression, rhs: Expression) -> Expression {
    binary("and", lhs, rhs)
}

pub fn or(lhs: Expression, rhs: Expression) -> Expression {
    binary("or", lhs, rhs)
}

pub fn not(expr: Expression) -> Expression {
    call("not", [expr])
}

/// Glob match, `*` for any run and `?` for a single character.
pub fn like(lhs: Expression, pattern: Expression) -> Expression {
    binary("like", lhs, pattern)
}

pub fn in_(lhs: Expression, rhs: Expression) -> Expression {
    binary("in", lhs, rhs)
}

/// Folds the expressions into nested `and`s; an empty input is `true`.
pub fn and_all(exprs: impl IntoIterator<Item = Expression>) -> Expression {
    exprs
        .into_iter()
        .reduce(and)
        .unwrap_or(Expression::Boolean(true))
}

/// Folds the expressions into nested `or`s; an empty input is `false`.
pub fn or_any(exprs: impl IntoIterator<Item = Expression>) -> Expression {
    exprs
        .into_iter()
        .reduce(or)
        .unwrap_or(Expression::Boolean(false))
}

pub fn date(value: NaiveDate) -> Expression {
    call(
        "date",
        [
            Expression::Integer(value.year().into()),
            Expression::Integer(value.month().into()),
            Expression::Integer(value.day().into()),
        ],
    )
}

pub fn time(value: NaiveTime) -> Expression {
    call(
        "time",
        [
            Expression::Integer(value.hour().into()),
            Expression::Integer(value.minute().into()),
            Expression::Integer(value.second().into()),
        ],
    )
}

pub fn datetime(value: NaiveDateTime) -> Expression {
    call(
        "datetime",
        [
            Expression::Integer(value.year().into()),
            Expression::Integer(value.month().into()),
            Expression::Integer(value.day().into()),
            Expression::Integer(value.hour().into()),
            Expression::Integer(value.minute().into()),
            Expression::Integer(value.second().into()),
        ],
    )
}

// Request-encoding markers. The matcher has no procedure for these.

pub fn asc(expr: Expression) -> Expression {
    call("asc", [expr])
}

pub fn desc(expr: Expression) -> Expression {
    call("desc", [expr])
}

pub fn count(expr: Expression) -> Expression {
    call("count", [expr])
}

pub fn sum(expr: Expression) -> Expression {
    call("sum", [expr])
}

pub fn min(expr: Expression) -> Expression {
    call("min", [expr])
}

pub fn max(expr: Expression) -> Expression {
    call("max", [expr])
}
