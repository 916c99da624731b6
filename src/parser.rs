use crate::{
    expr::{Expression, Token},
    lexer::{LexError, Lexer, Position},
};
use std::mem;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unexpected ')' at position {0}")]
    UnbalancedClose(Position),

    #[error("unexpected end of input, expected ')'")]
    UnexpectedEof,

    #[error("trailing input after expression at position {0}")]
    TrailingInput(Position),
}

/// Reads the canonical text rendering of an [`Expression`].
///
/// ```
/// use bdb_expr::{Expression, Parser};
///
/// let expr = Parser::parse_str("(= (attr \"what/object\" \"string\") \"PVOL\")").unwrap();
/// assert_eq!(expr.len(), 3);
/// assert_eq!(expr.get(0).unwrap(), &Expression::Symbol("=".into()));
/// ```
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
        })
    }

    /// Parses exactly one expression from `input`.
    pub fn parse_str(input: &str) -> Result<Expression, ParseError> {
        let mut parser = Parser::new(Lexer::new(input))?;
        parser.parse()
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    /// Parses one expression and requires the input to end after it.
    pub fn parse(&mut self) -> Result<Expression, ParseError> {
        let expr = self.parse_expression()?;
        if self.current_token != Token::Eof {
            return Err(ParseError::TrailingInput(self.lexer.position()));
        }
        Ok(expr)
    }

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let expr = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Integer(n) => Expression::Integer(n),
            Token::Float(n) => Expression::Float(n),
            Token::Boolean(b) => Expression::Boolean(b),
            Token::Text(s) => Expression::Text(s),
            Token::Symbol(s) => Expression::Symbol(s),
            Token::LParen => {
                self.advance()?;
                return self.parse_list();
            }
            Token::RParen => return Err(ParseError::UnbalancedClose(self.lexer.position())),
            Token::Eof => return Err(ParseError::UnexpectedEof),
        };
        self.advance()?;
        Ok(expr)
    }

    fn parse_list(&mut self) -> Result<Expression, ParseError> {
        let mut elements = vec![];

        loop {
            match self.current_token {
                Token::RParen => {
                    self.advance()?;
                    return Ok(Expression::List(elements));
                }
                Token::Eof => return Err(ParseError::UnexpectedEof),
                _ => elements.push(self.parse_expression()?),
            }
        }
    }
}

impl std::str::FromStr for Expression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::parse_str(s)
    }
}
