use crate::ast::Token;

/// Errors produced while tokenizing query text.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A character that starts no known token
    UnexpectedChar { ch: char, position: usize },

    /// `!` not followed by `=`
    IncompleteOperator { ch: char, position: usize },

    /// String literal without a closing quote
    UnterminatedString { position: usize },

    /// Regex literal without a closing slash
    UnterminatedRegex { position: usize },

    /// Regex literal with no pattern between the slashes
    EmptyRegex { position: usize },

    /// Numeric literal that does not parse as a float
    InvalidNumber { literal: String, position: usize },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexError::UnexpectedChar { ch, position } => {
                write!(f, "Unexpected character '{}' at position {}", ch, position)
            }
            LexError::IncompleteOperator { ch, position } => {
                write!(
                    f,
                    "Unexpected '{}' at position {} (did you mean '{}='?)",
                    ch, position, ch
                )
            }
            LexError::UnterminatedString { position } => {
                write!(f, "Unterminated string starting at position {}", position)
            }
            LexError::UnterminatedRegex { position } => {
                write!(f, "Unterminated regex starting at position {}", position)
            }
            LexError::EmptyRegex { position } => {
                write!(f, "Empty regex literal at position {}", position)
            }
            LexError::InvalidNumber { literal, position } => {
                write!(f, "Invalid number '{}' at position {}", literal, position)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Hand-written character lexer for the filter language.
///
/// Produces one token per [`Lexer::next_token`] call; whitespace is
/// recognized and discarded, never emitted. After the input is exhausted,
/// every further call yields [`Token::Eof`].
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

    /// Current character position, for error reporting.
    pub fn position(&self) -> usize {
        self.position
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
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

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Read a quoted string. The surrounding quotes are stripped; the
    /// contents are kept verbatim, with no escape processing.
    fn read_string(&mut self, quote: char) -> Result<Token, LexError> {
        let start = self.position;
        self.advance(); // consume opening quote

        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch == quote {
                self.advance();
                return Ok(Token::String(result));
            }
            result.push(ch);
            self.advance();
        }

        Err(LexError::UnterminatedString { position: start })
    }

    /// Read a regex literal delimited by `/`. An escaped slash `\/` is
    /// unescaped to a literal `/`; any other `\x` pair is kept as-is so the
    /// regex engine sees it unchanged.
    fn read_regex(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        self.advance(); // consume opening slash

        let mut pattern = String::new();
        while let Some(ch) = self.current_char() {
            match ch {
                '/' => {
                    self.advance();
                    if pattern.is_empty() {
                        return Err(LexError::EmptyRegex { position: start });
                    }
                    return Ok(Token::Regex(pattern));
                }
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some('/') => pattern.push('/'),
                        Some(next) => {
                            pattern.push('\\');
                            pattern.push(next);
                        }
                        None => break,
                    }
                    self.advance();
                }
                _ => {
                    pattern.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedRegex { position: start })
    }

    /// Read a numeric literal: optional sign, digits, optional fraction,
    /// optional exponent. All numbers become floats.
    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let mut literal = String::new();

        if let Some(sign @ ('+' | '-')) = self.current_char() {
            literal.push(sign);
            self.advance();
        }

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                literal.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if self.current_char() == Some('.')
            && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
        {
            literal.push('.');
            self.advance();
            while let Some(ch) = self.current_char() {
                if ch.is_ascii_digit() {
                    literal.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        if let Some(e @ ('e' | 'E')) = self.current_char() {
            let lookahead = if matches!(self.peek_char(1), Some('+') | Some('-')) {
                2
            } else {
                1
            };
            if self.peek_char(lookahead).is_some_and(|c| c.is_ascii_digit()) {
                literal.push(e);
                self.advance();
                if let Some(sign @ ('+' | '-')) = self.current_char() {
                    literal.push(sign);
                    self.advance();
                }
                while let Some(ch) = self.current_char() {
                    if ch.is_ascii_digit() {
                        literal.push(ch);
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
        }

        match literal.parse::<f64>() {
            Ok(n) => Ok(Token::Number(n)),
            Err(_) => Err(LexError::InvalidNumber {
                literal,
                position: start,
            }),
        }
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
            Some('=') => {
                self.advance();
                Ok(Token::Eq)
            }
            Some('<') => match self.peek_char(1) {
                Some('>') => {
                    self.advance();
                    self.advance();
                    Ok(Token::Ne)
                }
                Some('=') => {
                    self.advance();
                    self.advance();
                    Ok(Token::Le)
                }
                _ => {
                    self.advance();
                    Ok(Token::Lt)
                }
            },
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::Ge)
                } else {
                    self.advance();
                    Ok(Token::Gt)
                }
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::Ne)
                } else {
                    Err(LexError::IncompleteOperator {
                        ch: '!',
                        position: self.position,
                    })
                }
            }
            Some('"') => self.read_string('"'),
            Some('\'') => self.read_string('\''),
            Some('/') => self.read_regex(),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                let ident = self.read_identifier();

                // Keywords are case-insensitive
                match ident.to_ascii_uppercase().as_str() {
                    "AND" => Ok(Token::And),
                    "OR" => Ok(Token::Or),
                    "TRUE" => Ok(Token::True),
                    "FALSE" => Ok(Token::False),
                    "NULL" => Ok(Token::Null),
                    _ => Ok(Token::Identifier(ident)),
                }
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some('.') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number()
            }
            Some('+' | '-')
                if self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
                    || (self.peek_char(1) == Some('.')
                        && self.peek_char(2).is_some_and(|c| c.is_ascii_digit())) =>
            {
                self.read_number()
            }
            Some(ch) => Err(LexError::UnexpectedChar {
                ch,
                position: self.position,
            }),
        }
    }
}

#[test]
fn test_keywords_any_case() {
    let mut lexer = Lexer::new("AND or True FALSE null");
    assert_eq!(lexer.next_token().unwrap(), Token::And);
    assert_eq!(lexer.next_token().unwrap(), Token::Or);
    assert_eq!(lexer.next_token().unwrap(), Token::True);
    assert_eq!(lexer.next_token().unwrap(), Token::False);
    assert_eq!(lexer.next_token().unwrap(), Token::Null);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_predicate_stream() {
    let mut lexer = Lexer::new("a = 1 AND (b > 5 OR c = \"foo\")");
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("a".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eq);
    assert_eq!(lexer.next_token().unwrap(), Token::Number(1.0));
    assert_eq!(lexer.next_token().unwrap(), Token::And);
    assert_eq!(lexer.next_token().unwrap(), Token::LParen);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("b".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Gt);
    assert_eq!(lexer.next_token().unwrap(), Token::Number(5.0));
    assert_eq!(lexer.next_token().unwrap(), Token::Or);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("c".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eq);
    assert_eq!(lexer.next_token().unwrap(), Token::String("foo".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::RParen);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}
