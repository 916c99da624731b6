/// Lexical tokens of the canonical expression rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Floating-point number, always written with a decimal point or exponent
    ///
    /// # Examples
    /// ```text
    /// 3.0
    /// -0.5
    /// 1e20
    /// ```
    Float(f64),

    /// Integer
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -10
    /// ```
    Integer(i64),

    /// Text literal enclosed in double quotes
    ///
    /// # Examples
    /// ```text
    /// "what/object"
    /// "WMO:02606,RAD:SE50"
    /// ```
    Text(String),

    /// Boolean values
    ///
    /// # Examples
    /// ```text
    /// true
    /// false
    /// ```
    Boolean(bool),

    /// Bare symbol: any run of characters that is not whitespace, a paren or
    /// a quote and does not read as a number or boolean
    ///
    /// # Examples
    /// ```text
    /// attr
    /// <=
    /// !=
    /// ```
    Symbol(String),

    // Delimiters
    /// Opening parenthesis, starts a list
    LParen,

    /// Closing parenthesis, ends a list
    RParen,

    /// End of input
    Eof,
}
