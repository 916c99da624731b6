use crate::expr::Token;

/// Position of a character in the lexer input (0-based, in chars).
pub type Position = usize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("unterminated text literal starting at position {0}")]
    UnterminatedText(Position),

    #[error("invalid escape sequence '\\{ch}' at position {position}")]
    InvalidEscape { ch: char, position: Position },

    #[error("invalid number '{text}' at position {position}")]
    InvalidNumber { text: String, position: Position },
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn is_delimiter(ch: char) -> bool {
        ch.is_whitespace() || ch == '(' || ch == ')' || ch == '"'
    }

    fn read_atom(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if Self::is_delimiter(ch) {
                break;
            }
            result.push(ch);
            self.advance();
        }
        result
    }

    fn read_text(&mut self) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('"') => result.push('"'),
                        Some('\\') => result.push('\\'),
                        Some(ch) => {
                            return Err(LexError::InvalidEscape {
                                ch,
                                position: self.position,
                            });
                        }
                        None => return Err(LexError::UnterminatedText(start)),
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedText(start))
    }

    /// Classifies a bare atom: number, boolean or symbol.
    fn classify_atom(atom: String, position: Position) -> Result<Token, LexError> {
        match atom.as_str() {
            "true" => return Ok(Token::Boolean(true)),
            "false" => return Ok(Token::Boolean(false)),
            _ => {}
        }

        let unsigned = atom.strip_prefix(['-', '+']).unwrap_or(&atom);
        if !unsigned.starts_with(|c: char| c.is_ascii_digit()) {
            return Ok(Token::Symbol(atom));
        }

        let is_float = unsigned.contains(['.', 'e', 'E']);
        let parsed = if is_float {
            atom.parse::<f64>().map(Token::Float).ok()
        } else {
            atom.parse::<i64>().map(Token::Integer).ok()
        };

        parsed.ok_or(LexError::InvalidNumber {
            text: atom,
            position,
        })
    }

    /// True when `name` written bare reads back as the same symbol.
    ///
    /// Names that are empty, contain whitespace, parens or quotes, or look
    /// like a number or boolean (`1`, `-2.5`, `true`) do not.
    pub fn reads_as_symbol(name: &str) -> bool {
        !name.is_empty()
            && !name.chars().any(Self::is_delimiter)
            && matches!(Self::classify_atom(name.to_string(), 0), Ok(Token::Symbol(_)))
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        match self.current_char() {
            None => Ok(Token::Eof),
            Some('(') => {
                self.advance();
                Ok(Token::LParen)
            }
            Some(')') => {
                self.advance();
                Ok(Token::RParen)
            }
            Some('"') => Ok(Token::Text(self.read_text()?)),
            Some(_) => {
                let start = self.position;
                let atom = self.read_atom();
                Self::classify_atom(atom, start)
            }
        }
    }
}

#[test]
fn test_operator_symbols() {
    let mut lexer = Lexer::new("(<= != + and)");
    assert_eq!(lexer.next_token().unwrap(), Token::LParen);
    assert_eq!(lexer.next_token().unwrap(), Token::Symbol("<=".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Symbol("!=".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Symbol("+".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Symbol("and".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::RParen);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_signed_numbers() {
    let mut lexer = Lexer::new("-1 +2 -0.5 1e3 -");
    assert_eq!(lexer.next_token().unwrap(), Token::Integer(-1));
    assert_eq!(lexer.next_token().unwrap(), Token::Integer(2));
    assert_eq!(lexer.next_token().unwrap(), Token::Float(-0.5));
    assert_eq!(lexer.next_token().unwrap(), Token::Float(1000.0));
    assert_eq!(lexer.next_token().unwrap(), Token::Symbol("-".to_string()));
}
