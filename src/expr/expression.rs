use std::fmt;

/// Errors raised by the expression tree itself.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpressionError {
    /// Indexed access or pop past the end of a list (or on a non-list)
    #[error("index {index} out of range for expression of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// A literal was requested from an absent value
    #[error("cannot build a {0} literal from an absent value")]
    AbsentLiteral(&'static str),
}

/// The tag of an [`Expression`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionType {
    List,
    Integer,
    Float,
    Boolean,
    Text,
    Symbol,
}

impl ExpressionType {
    pub fn name(&self) -> &'static str {
        match self {
            ExpressionType::List => "list",
            ExpressionType::Integer => "integer",
            ExpressionType::Float => "float",
            ExpressionType::Boolean => "boolean",
            ExpressionType::Text => "text",
            ExpressionType::Symbol => "symbol",
        }
    }
}

impl fmt::Display for ExpressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of the query language.
///
/// Every form the language knows (filters, fetch projections, ordering and
/// grouping markers) is one of these: a literal, a symbol, or a list of
/// sub-expressions. A list whose head is a symbol is a procedure call when
/// evaluated; any other list is a plain list literal.
///
/// Equality is structural and tag-sensitive:
///
/// ```
/// use bdb_expr::Expression;
///
/// assert_eq!(Expression::Integer(3), Expression::Integer(3));
/// assert_ne!(Expression::Integer(3), Expression::Float(3.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Ordered sequence of sub-expressions
    List(Vec<Expression>),

    /// Signed 64-bit integer literal
    Integer(i64),

    /// Double precision literal
    Float(f64),

    /// Boolean literal
    Boolean(bool),

    /// UTF-8 text literal
    Text(String),

    /// Symbolic name, usually a procedure
    Symbol(String),
}

impl Expression {
    pub fn tag(&self) -> ExpressionType {
        match self {
            Expression::List(_) => ExpressionType::List,
            Expression::Integer(_) => ExpressionType::Integer,
            Expression::Float(_) => ExpressionType::Float,
            Expression::Boolean(_) => ExpressionType::Boolean,
            Expression::Text(_) => ExpressionType::Text,
            Expression::Symbol(_) => ExpressionType::Symbol,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Expression::List(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Expression::Symbol(_))
    }

    /// Integer payload, or `None` for any other tag.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Expression::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Float payload. Integers are upcast; the reverse never happens.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Expression::Float(n) => Some(*n),
            Expression::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Expression::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Expression::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expression::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Expression]> {
        match self {
            Expression::List(items) => Some(items),
            _ => None,
        }
    }

    /// Truth value used when a match result is reduced to a boolean.
    ///
    /// Empty lists, empty text, zero and `false` are false; everything else
    /// (symbols included) is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Expression::List(items) => !items.is_empty(),
            Expression::Integer(n) => *n != 0,
            Expression::Float(n) => *n != 0.0,
            Expression::Boolean(b) => *b,
            Expression::Text(s) => !s.is_empty(),
            Expression::Symbol(_) => true,
        }
    }

    /// Number of elements; 0 for anything that is not a list.
    pub fn len(&self) -> usize {
        match self {
            Expression::List(items) => items.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Result<&Expression, ExpressionError> {
        match self {
            Expression::List(items) => items.get(index).ok_or(ExpressionError::OutOfRange {
                index,
                len: items.len(),
            }),
            _ => Err(ExpressionError::OutOfRange { index, len: 0 }),
        }
    }

    /// Removes and returns the first element of a list.
    pub fn pop_front(&mut self) -> Result<Expression, ExpressionError> {
        match self {
            Expression::List(items) if !items.is_empty() => Ok(items.remove(0)),
            _ => Err(ExpressionError::OutOfRange { index: 0, len: 0 }),
        }
    }

    /// Iterates the elements of a list; yields nothing for other tags.
    pub fn iter(&self) -> std::slice::Iter<'_, Expression> {
        match self {
            Expression::List(items) => items.iter(),
            _ => Default::default(),
        }
    }
}

impl<'a> IntoIterator for &'a Expression {
    type Item = &'a Expression;
    type IntoIter = std::slice::Iter<'a, Expression>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<i64> for Expression {
    fn from(n: i64) -> Self {
        Expression::Integer(n)
    }
}

impl From<i32> for Expression {
    fn from(n: i32) -> Self {
        Expression::Integer(n.into())
    }
}

impl From<f64> for Expression {
    fn from(n: f64) -> Self {
        Expression::Float(n)
    }
}

impl From<bool> for Expression {
    fn from(b: bool) -> Self {
        Expression::Boolean(b)
    }
}

impl From<&str> for Expression {
    fn from(s: &str) -> Self {
        Expression::Text(s.to_string())
    }
}

impl From<String> for Expression {
    fn from(s: String) -> Self {
        Expression::Text(s)
    }
}

impl From<Vec<Expression>> for Expression {
    fn from(items: Vec<Expression>) -> Self {
        Expression::List(items)
    }
}

/// The language has no null leaf; absence only exists as an empty list.
impl TryFrom<Option<String>> for Expression {
    type Error = ExpressionError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        value
            .map(Expression::Text)
            .ok_or(ExpressionError::AbsentLiteral("text"))
    }
}

impl TryFrom<Option<&str>> for Expression {
    type Error = ExpressionError;

    fn try_from(value: Option<&str>) -> Result<Self, Self::Error> {
        Expression::try_from(value.map(str::to_string))
    }
}

impl FromIterator<Expression> for Expression {
    fn from_iter<I: IntoIterator<Item = Expression>>(iter: I) -> Self {
        Expression::List(iter.into_iter().collect())
    }
}

/// Canonical rendering: parenthesized, space-separated lists; text quoted
/// with escapes; floats always carry a decimal point or exponent. Read back
/// by [`Parser`](crate::Parser).
///
/// Symbols are written bare, so only names accepted by
/// [`Lexer::reads_as_symbol`](crate::Lexer::reads_as_symbol) survive the trip:
/// `Symbol("1")` reads back as `Integer(1)`. Non-finite floats render as
/// `NaN`/`inf` and read back as symbols.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
            Expression::Integer(n) => write!(f, "{}", n),
            // Debug keeps the trailing ".0" on whole floats
            Expression::Float(n) => write!(f, "{:?}", n),
            Expression::Boolean(b) => write!(f, "{}", b),
            Expression::Text(s) => {
                f.write_str("\"")?;
                for ch in s.chars() {
                    match ch {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        '\r' => f.write_str("\\r")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            Expression::Symbol(s) => f.write_str(s),
        }
    }
}
