//! Scalar operators and the wrappers that let them accept list operands.
//!
//! Attribute lookups yield lists (zero, one or many occurrences), so the
//! scalar operators are lifted two ways:
//!
//! - [`cartesian`] for arithmetic: `(+ (1 2) (3 4))` is `(4 5 5 6)`.
//! - [`existential`] for comparisons: `(= (1 2) 2)` is true because some
//!   pairing compares equal.
//!
//! Membership ([`is_member`]) has its own list rules.

use std::cmp::Ordering;

use regex::Regex;
use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};

use crate::{evaluator::EvalError, expr::Expression};

/// A scalar operator producing a value.
pub type BinaryOp = fn(&Expression, &Expression) -> Result<Expression, EvalError>;

/// A scalar operator producing a truth value.
pub type Predicate = fn(&Expression, &Expression) -> Result<bool, EvalError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arithmetic {
    Add,
    Sub,
    Mul,
    Div,
}

impl Arithmetic {
    fn verb(&self) -> &'static str {
        match self {
            Arithmetic::Add => "add",
            Arithmetic::Sub => "subtract",
            Arithmetic::Mul => "multiply",
            Arithmetic::Div => "divide",
        }
    }
}

fn type_mismatch(verb: &str, lhs: &Expression, rhs: &Expression) -> EvalError {
    EvalError::TypeError(format!("cannot {} {} and {}", verb, lhs.tag(), rhs.tag()))
}

fn integer_arithmetic(op: Arithmetic, a: i64, b: i64) -> Result<Expression, EvalError> {
    let result = match op {
        Arithmetic::Add => a.checked_add(b),
        Arithmetic::Sub => a.checked_sub(b),
        Arithmetic::Mul => a.checked_mul(b),
        Arithmetic::Div => {
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            // Inexact integer division widens to a float; MIN % -1 overflows
            let rem = a.checked_rem(b).ok_or(EvalError::Overflow(op.verb()))?;
            if rem != 0 {
                return Ok(Expression::Float(a as f64 / b as f64));
            }
            a.checked_div(b)
        }
    };
    result
        .map(Expression::Integer)
        .ok_or(EvalError::Overflow(op.verb()))
}

fn float_arithmetic(op: Arithmetic, a: f64, b: f64) -> Result<Expression, EvalError> {
    let result = match op {
        Arithmetic::Add => a + b,
        Arithmetic::Sub => a - b,
        Arithmetic::Mul => a * b,
        Arithmetic::Div => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            a / b
        }
    };
    Ok(Expression::Float(result))
}

/// Integer/float mixes go through `Decimal` so `1 + 0.1` stays `1.1`.
fn mixed_arithmetic(
    op: Arithmetic,
    a: (Option<Decimal>, f64),
    b: (Option<Decimal>, f64),
) -> Result<Expression, EvalError> {
    if op == Arithmetic::Div && b.1 == 0.0 {
        return Err(EvalError::DivisionByZero);
    }

    if let (Some(ad), Some(bd)) = (a.0, b.0) {
        let rd = match op {
            Arithmetic::Add => ad.checked_add(bd),
            Arithmetic::Sub => ad.checked_sub(bd),
            Arithmetic::Mul => ad.checked_mul(bd),
            Arithmetic::Div => ad.checked_div(bd),
        };
        if let Some(r) = rd.and_then(|rd| rd.to_f64()) {
            return Ok(Expression::Float(r));
        }
    }

    float_arithmetic(op, a.1, b.1)
}

fn arithmetic(op: Arithmetic, lhs: &Expression, rhs: &Expression) -> Result<Expression, EvalError> {
    use Expression::*;
    match (lhs, rhs) {
        (Integer(a), Integer(b)) => integer_arithmetic(op, *a, *b),
        (Float(a), Float(b)) => float_arithmetic(op, *a, *b),
        (Integer(a), Float(b)) => mixed_arithmetic(
            op,
            (Decimal::from_i64(*a), *a as f64),
            (Decimal::from_f64(*b), *b),
        ),
        (Float(a), Integer(b)) => mixed_arithmetic(
            op,
            (Decimal::from_f64(*a), *a),
            (Decimal::from_i64(*b), *b as f64),
        ),
        (Text(a), Text(b)) if op == Arithmetic::Add => Ok(Text(format!("{}{}", a, b))),
        (a, b) => Err(type_mismatch(op.verb(), a, b)),
    }
}

pub fn add(lhs: &Expression, rhs: &Expression) -> Result<Expression, EvalError> {
    arithmetic(Arithmetic::Add, lhs, rhs)
}

pub fn sub(lhs: &Expression, rhs: &Expression) -> Result<Expression, EvalError> {
    arithmetic(Arithmetic::Sub, lhs, rhs)
}

pub fn mul(lhs: &Expression, rhs: &Expression) -> Result<Expression, EvalError> {
    arithmetic(Arithmetic::Mul, lhs, rhs)
}

pub fn div(lhs: &Expression, rhs: &Expression) -> Result<Expression, EvalError> {
    arithmetic(Arithmetic::Div, lhs, rhs)
}

/// Value equality: integers and floats compare numerically, every other
/// pair of differing tags is unequal.
pub fn equals(lhs: &Expression, rhs: &Expression) -> bool {
    match (lhs, rhs) {
        (Expression::Integer(a), Expression::Float(b))
        | (Expression::Float(b), Expression::Integer(a)) => *a as f64 == *b,
        _ => lhs == rhs,
    }
}

/// `None` when the operands are unordered (a NaN is involved).
fn ordering(lhs: &Expression, rhs: &Expression) -> Result<Option<Ordering>, EvalError> {
    use Expression::*;
    match (lhs, rhs) {
        (Integer(a), Integer(b)) => Ok(Some(a.cmp(b))),
        (Integer(_) | Float(_), Integer(_) | Float(_)) => {
            let (Some(a), Some(b)) = (lhs.as_float(), rhs.as_float()) else {
                return Err(type_mismatch("compare", lhs, rhs));
            };
            Ok(a.partial_cmp(&b))
        }
        (Text(a), Text(b)) => Ok(Some(a.cmp(b))),
        (Boolean(a), Boolean(b)) => Ok(Some(a.cmp(b))),
        (a, b) => Err(type_mismatch("compare", a, b)),
    }
}

pub fn eq(lhs: &Expression, rhs: &Expression) -> Result<bool, EvalError> {
    Ok(equals(lhs, rhs))
}

pub fn ne(lhs: &Expression, rhs: &Expression) -> Result<bool, EvalError> {
    Ok(!equals(lhs, rhs))
}

pub fn lt(lhs: &Expression, rhs: &Expression) -> Result<bool, EvalError> {
    Ok(ordering(lhs, rhs)? == Some(Ordering::Less))
}

pub fn le(lhs: &Expression, rhs: &Expression) -> Result<bool, EvalError> {
    Ok(matches!(
        ordering(lhs, rhs)?,
        Some(Ordering::Less | Ordering::Equal)
    ))
}

pub fn gt(lhs: &Expression, rhs: &Expression) -> Result<bool, EvalError> {
    Ok(ordering(lhs, rhs)? == Some(Ordering::Greater))
}

pub fn ge(lhs: &Expression, rhs: &Expression) -> Result<bool, EvalError> {
    Ok(matches!(
        ordering(lhs, rhs)?,
        Some(Ordering::Greater | Ordering::Equal)
    ))
}

/// Translates a glob (`*` any run, `?` one character) into an anchored regex.
fn glob_to_regex(pattern: &str) -> Result<Regex, EvalError> {
    let mut re = String::from("(?s)^");
    let mut buf = [0u8; 4];
    for ch in pattern.chars() {
        match ch {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            c => re.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    re.push('$');
    Regex::new(&re).map_err(|e| EvalError::InvalidArgument(format!("bad pattern '{}': {}", pattern, e)))
}

pub fn like(lhs: &Expression, rhs: &Expression) -> Result<bool, EvalError> {
    match (lhs, rhs) {
        (Expression::Text(value), Expression::Text(pattern)) => {
            Ok(glob_to_regex(pattern)?.is_match(value))
        }
        (a, b) => Err(type_mismatch("match", a, b)),
    }
}

/// Lifts `op` over list operands.
///
/// One list side maps `op` over its elements against the scalar; two list
/// sides produce every (left, right) pair, left outer and right inner, so the
/// result has `|lhs| * |rhs|` elements. Two scalars call `op` directly.
pub fn cartesian(op: BinaryOp, lhs: &Expression, rhs: &Expression) -> Result<Expression, EvalError> {
    match (lhs, rhs) {
        (Expression::List(ls), Expression::List(rs)) => ls
            .iter()
            .flat_map(|l| rs.iter().map(move |r| op(l, r)))
            .collect::<Result<Vec<_>, _>>()
            .map(Expression::List),
        (Expression::List(ls), r) => ls
            .iter()
            .map(|l| op(l, r))
            .collect::<Result<Vec<_>, _>>()
            .map(Expression::List),
        (l, Expression::List(rs)) => rs
            .iter()
            .map(|r| op(l, r))
            .collect::<Result<Vec<_>, _>>()
            .map(Expression::List),
        (l, r) => op(l, r),
    }
}

/// True when any pairing of list elements (or element and scalar) satisfies
/// `pred`. Stops at the first success; an empty list side is false.
pub fn existential(pred: Predicate, lhs: &Expression, rhs: &Expression) -> Result<bool, EvalError> {
    match (lhs, rhs) {
        (Expression::List(ls), Expression::List(rs)) => {
            for l in ls {
                for r in rs {
                    if pred(l, r)? {
                        return Ok(true);
                    }
                }
            }
            Ok(false)
        }
        (Expression::List(ls), r) => {
            for l in ls {
                if pred(l, r)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        (l, Expression::List(rs)) => {
            for r in rs {
                if pred(l, r)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        (l, r) => pred(l, r),
    }
}

/// `lhs in rhs`. The right side must be a list; a list on the left is a
/// member when any of its elements is.
pub fn is_member(lhs: &Expression, rhs: &Expression) -> Result<bool, EvalError> {
    let Expression::List(haystack) = rhs else {
        return Err(EvalError::InvalidArgument(format!(
            "right-hand side of 'in' must be a list, got {}",
            rhs.tag()
        )));
    };

    let contains = |needle: &Expression| haystack.iter().any(|item| equals(needle, item));
    match lhs {
        Expression::List(needles) => Ok(needles.iter().any(contains)),
        needle => Ok(contains(needle)),
    }
}
