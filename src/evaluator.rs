use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    expr::Expression,
    metadata::{DATE_FORMAT, Metadata, TIME_FORMAT},
    operators::{self, BinaryOp, Predicate},
    resolve::{self, AttributeType},
};

/// Errors that can occur during expression evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// Operand types no operator can reconcile
    #[error("Type error: {0}")]
    TypeError(String),

    /// Wrong number of arguments at a call site
    #[error("Arity error: '{procedure}' expects {expected} argument(s), got {got}")]
    Arity {
        procedure: &'static str,
        expected: usize,
        got: usize,
    },

    /// List headed by a symbol no procedure is registered under
    #[error("Unknown procedure: {0}")]
    UnknownProcedure(String),

    /// Argument of the right type but an unusable value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Integer overflow in {0}")]
    Overflow(&'static str),

    /// Programming error in the query itself, e.g. an unknown attribute type
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// The closed set of procedures a call can dispatch to.
///
/// Attribute lookup only exists bound to a metadata tree, so it can only be
/// resolved by an evaluator that carries one.
#[derive(Debug, Clone, Copy)]
pub enum Procedure<'m> {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Not,
    Like,
    In,
    Symbol,
    List,
    Date,
    Time,
    DateTime,
    Attr(&'m Metadata),
}

impl<'m> Procedure<'m> {
    /// Finds the procedure registered under `name`.
    ///
    /// `attr` resolves only when `metadata` is bound.
    pub fn lookup(name: &str, metadata: Option<&'m Metadata>) -> Option<Self> {
        let procedure = match name {
            "+" => Procedure::Add,
            "-" => Procedure::Sub,
            "*" => Procedure::Mul,
            "/" => Procedure::Div,
            "=" => Procedure::Eq,
            "!=" => Procedure::Ne,
            "<" => Procedure::Lt,
            "<=" => Procedure::Le,
            ">" => Procedure::Gt,
            ">=" => Procedure::Ge,
            "and" => Procedure::And,
            "or" => Procedure::Or,
            "not" => Procedure::Not,
            "like" => Procedure::Like,
            "in" => Procedure::In,
            "symbol" => Procedure::Symbol,
            "list" => Procedure::List,
            "date" => Procedure::Date,
            "time" => Procedure::Time,
            "datetime" => Procedure::DateTime,
            "attr" => Procedure::Attr(metadata?),
            _ => return None,
        };
        Some(procedure)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Procedure::Add => "+",
            Procedure::Sub => "-",
            Procedure::Mul => "*",
            Procedure::Div => "/",
            Procedure::Eq => "=",
            Procedure::Ne => "!=",
            Procedure::Lt => "<",
            Procedure::Le => "<=",
            Procedure::Gt => ">",
            Procedure::Ge => ">=",
            Procedure::And => "and",
            Procedure::Or => "or",
            Procedure::Not => "not",
            Procedure::Like => "like",
            Procedure::In => "in",
            Procedure::Symbol => "symbol",
            Procedure::List => "list",
            Procedure::Date => "date",
            Procedure::Time => "time",
            Procedure::DateTime => "datetime",
            Procedure::Attr(_) => "attr",
        }
    }

    /// Fixed argument count, `None` for variadic procedures.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Procedure::Not | Procedure::Symbol => Some(1),
            Procedure::List => None,
            Procedure::Date | Procedure::Time => Some(3),
            Procedure::DateTime => Some(6),
            _ => Some(2),
        }
    }

    /// Destructures arguments already checked against [`arity`](Self::arity).
    fn args<const N: usize>(&self, args: Vec<Expression>) -> Result<[Expression; N], EvalError> {
        args.try_into().map_err(|args: Vec<Expression>| EvalError::Arity {
            procedure: self.name(),
            expected: N,
            got: args.len(),
        })
    }

    fn cartesian(&self, op: BinaryOp, args: Vec<Expression>) -> Result<Expression, EvalError> {
        let [lhs, rhs] = self.args::<2>(args)?;
        operators::cartesian(op, &lhs, &rhs)
    }

    fn existential(&self, pred: Predicate, args: Vec<Expression>) -> Result<Expression, EvalError> {
        let [lhs, rhs] = self.args::<2>(args)?;
        operators::existential(pred, &lhs, &rhs).map(Expression::Boolean)
    }

    fn integer_arg<T: TryFrom<i64>>(&self, arg: &Expression) -> Result<T, EvalError> {
        let n = arg.as_integer().ok_or_else(|| {
            EvalError::TypeError(format!(
                "'{}' expects integer arguments, got {}",
                self.name(),
                arg.tag()
            ))
        })?;
        T::try_from(n).map_err(|_| {
            EvalError::InvalidArgument(format!("{} out of range for '{}'", n, self.name()))
        })
    }

    fn make_date(&self, [y, m, d]: &[Expression; 3]) -> Result<NaiveDate, EvalError> {
        NaiveDate::from_ymd_opt(
            self.integer_arg(y)?,
            self.integer_arg(m)?,
            self.integer_arg(d)?,
        )
        .ok_or_else(|| EvalError::InvalidArgument(format!("invalid date {} {} {}", y, m, d)))
    }

    fn make_time(&self, [h, m, s]: &[Expression; 3]) -> Result<NaiveTime, EvalError> {
        NaiveTime::from_hms_opt(
            self.integer_arg(h)?,
            self.integer_arg(m)?,
            self.integer_arg(s)?,
        )
        .ok_or_else(|| EvalError::InvalidArgument(format!("invalid time {} {} {}", h, m, s)))
    }

    /// Invokes the procedure on already evaluated arguments.
    pub fn call(&self, args: Vec<Expression>) -> Result<Expression, EvalError> {
        if let Some(expected) = self.arity()
            && args.len() != expected
        {
            return Err(EvalError::Arity {
                procedure: self.name(),
                expected,
                got: args.len(),
            });
        }

        match self {
            Procedure::Add => self.cartesian(operators::add, args),
            Procedure::Sub => self.cartesian(operators::sub, args),
            Procedure::Mul => self.cartesian(operators::mul, args),
            Procedure::Div => self.cartesian(operators::div, args),
            Procedure::Eq => self.existential(operators::eq, args),
            Procedure::Ne => self.existential(operators::ne, args),
            Procedure::Lt => self.existential(operators::lt, args),
            Procedure::Le => self.existential(operators::le, args),
            Procedure::Gt => self.existential(operators::gt, args),
            Procedure::Ge => self.existential(operators::ge, args),
            Procedure::Like => self.existential(operators::like, args),
            Procedure::And => {
                let [lhs, rhs] = self.args::<2>(args)?;
                Ok(Expression::Boolean(lhs.is_truthy() && rhs.is_truthy()))
            }
            Procedure::Or => {
                let [lhs, rhs] = self.args::<2>(args)?;
                Ok(Expression::Boolean(lhs.is_truthy() || rhs.is_truthy()))
            }
            Procedure::Not => {
                let [operand] = self.args::<1>(args)?;
                Ok(Expression::Boolean(!operand.is_truthy()))
            }
            Procedure::In => {
                let [lhs, rhs] = self.args::<2>(args)?;
                operators::is_member(&lhs, &rhs).map(Expression::Boolean)
            }
            Procedure::Symbol => match self.args::<1>(args)? {
                [Expression::Text(name) | Expression::Symbol(name)] => {
                    Ok(Expression::Symbol(name))
                }
                [other] => Err(EvalError::TypeError(format!(
                    "'symbol' expects text, got {}",
                    other.tag()
                ))),
            },
            Procedure::List => Ok(Expression::List(args)),
            Procedure::Date => {
                let date = self.make_date(&self.args(args)?)?;
                Ok(Expression::Text(date.format(DATE_FORMAT).to_string()))
            }
            Procedure::Time => {
                let time = self.make_time(&self.args(args)?)?;
                Ok(Expression::Text(time.format(TIME_FORMAT).to_string()))
            }
            Procedure::DateTime => {
                let [y, mo, d, h, mi, s] = self.args::<6>(args)?;
                let datetime = NaiveDateTime::new(
                    self.make_date(&[y, mo, d])?,
                    self.make_time(&[h, mi, s])?,
                );
                Ok(Expression::Text(
                    datetime
                        .format(&format!("{}{}", DATE_FORMAT, TIME_FORMAT))
                        .to_string(),
                ))
            }
            Procedure::Attr(metadata) => {
                let [path, value_type] = self.args::<2>(args)?;
                let Some(path) = path.as_text() else {
                    return Err(EvalError::TypeError(format!(
                        "'attr' expects a text path, got {}",
                        path.tag()
                    )));
                };
                let value_type: AttributeType = value_type
                    .as_text()
                    .or(value_type.as_symbol())
                    .ok_or_else(|| {
                        EvalError::Configuration(format!(
                            "attribute type must be text, got {}",
                            value_type.tag()
                        ))
                    })?
                    .parse()?;
                resolve::resolve(metadata, path, value_type).map(Expression::List)
            }
        }
    }
}

/// Recursive evaluator for [`Expression`] trees.
///
/// Literals and lone symbols evaluate to themselves. A list headed by a
/// symbol is a call: its remaining elements are evaluated in order and passed
/// to the named [`Procedure`]. Any other list evaluates element-wise.
///
/// # Examples
///
/// ```
/// use bdb_expr::{Evaluator, Expression, Parser};
///
/// let evaluator = Evaluator::new();
/// let expr = Parser::parse_str("(+ (1 2) 1)").unwrap();
/// assert_eq!(
///     evaluator.eval(&expr).unwrap(),
///     Expression::List(vec![Expression::Integer(2), Expression::Integer(3)])
/// );
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator<'m> {
    metadata: Option<&'m Metadata>,
}

impl<'m> Evaluator<'m> {
    /// An evaluator without metadata; `attr` is not available.
    pub fn new() -> Self {
        Self::default()
    }

    /// An evaluator whose `attr` procedure reads from `metadata`.
    pub fn with_metadata(metadata: &'m Metadata) -> Self {
        Evaluator {
            metadata: Some(metadata),
        }
    }

    pub fn eval(&self, expr: &Expression) -> Result<Expression, EvalError> {
        let Expression::List(items) = expr else {
            return Ok(expr.clone());
        };

        match items.split_first() {
            Some((Expression::Symbol(name), rest)) => {
                let args = rest
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                let procedure = Procedure::lookup(name, self.metadata)
                    .ok_or_else(|| EvalError::UnknownProcedure(name.clone()))?;
                tracing::trace!(procedure = procedure.name(), args = args.len(), "calling procedure");
                procedure.call(args)
            }
            _ => items
                .iter()
                .map(|item| self.eval(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Expression::List),
        }
    }
}
