use crate::{
    ast::{CompareOp, Comparison, Condition, Expression, OrTerm, Predicate, RegexValue, Token, Value},
    lexer::{LexError, Lexer},
    pattern::{self, PatternError},
};
use std::mem;

/// Errors produced while parsing a query.
#[derive(Debug)]
pub enum ParseError {
    /// Tokenization failure
    Lex(LexError),

    /// Regex literal rejected by the safety limits or the regex engine
    Pattern(PatternError),

    /// A token that does not fit the grammar at this point
    UnexpectedToken {
        expected: &'static str,
        found: Token,
        position: usize,
    },

    /// Leftover input after a complete expression
    TrailingTokens { found: Token, position: usize },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Lex(e) => write!(f, "{}", e),
            ParseError::Pattern(e) => write!(f, "{}", e),
            ParseError::UnexpectedToken {
                expected,
                found,
                position,
            } => {
                write!(
                    f,
                    "Expected {}, got {:?} near position {}",
                    expected, found, position
                )
            }
            ParseError::TrailingTokens { found, position } => {
                write!(
                    f,
                    "Unexpected {:?} after end of expression near position {}",
                    found, position
                )
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            ParseError::Pattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lex(e)
    }
}

impl From<PatternError> for ParseError {
    fn from(e: PatternError) -> Self {
        ParseError::Pattern(e)
    }
}

/// Recursive-descent parser for the filter grammar.
///
/// ```text
/// Expression := OrTerm ( "OR" OrTerm )*
/// OrTerm     := Condition ( "AND" Condition )*
/// Condition  := "(" Expression ")" | Predicate
/// Predicate  := Identifier Comparison
/// Comparison := Operator Value
/// Value      := Number | String | Regex | TRUE | FALSE | NULL
/// ```
///
/// The grammar has no left recursion and needs one token of lookahead.
/// Nesting depth is bounded only by the input.
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

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn unexpected(&mut self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: mem::replace(&mut self.current_token, Token::Eof),
            position: self.lexer.position(),
        }
    }

    /// Parse one complete query. Trailing tokens after the expression are
    /// an error.
    pub fn parse(&mut self) -> Result<Expression, ParseError> {
        let expr = self.parse_expression()?;
        if !self.check(&Token::Eof) {
            return Err(ParseError::TrailingTokens {
                found: mem::replace(&mut self.current_token, Token::Eof),
                position: self.lexer.position(),
            });
        }
        Ok(expr)
    }

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let mut terms = vec![self.parse_or_term()?];

        while self.check(&Token::Or) {
            self.advance()?;
            terms.push(self.parse_or_term()?);
        }

        Ok(Expression { terms })
    }

    fn parse_or_term(&mut self) -> Result<OrTerm, ParseError> {
        let mut conditions = vec![self.parse_condition()?];

        while self.check(&Token::And) {
            self.advance()?;
            conditions.push(self.parse_condition()?);
        }

        Ok(OrTerm { conditions })
    }

    fn parse_condition(&mut self) -> Result<Condition, ParseError> {
        if self.check(&Token::LParen) {
            self.advance()?;
            let expr = self.parse_expression()?;
            if !self.check(&Token::RParen) {
                return Err(self.unexpected("')'"));
            }
            self.advance()?;
            Ok(Condition::Nested(expr))
        } else {
            Ok(Condition::Predicate(self.parse_predicate()?))
        }
    }

    fn parse_predicate(&mut self) -> Result<Predicate, ParseError> {
        let symbol = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Identifier(name) => {
                self.advance()?;
                name
            }
            found => {
                self.current_token = found;
                return Err(self.unexpected("field name"));
            }
        };

        let comparison = self.parse_comparison()?;
        Ok(Predicate { symbol, comparison })
    }

    fn parse_comparison(&mut self) -> Result<Comparison, ParseError> {
        let operator = match &self.current_token {
            Token::Eq => CompareOp::Eq,
            Token::Ne => CompareOp::Ne,
            Token::Lt => CompareOp::Lt,
            Token::Le => CompareOp::Le,
            Token::Gt => CompareOp::Gt,
            Token::Ge => CompareOp::Ge,
            _ => return Err(self.unexpected("comparison operator")),
        };
        self.advance()?;

        let value = self.parse_value()?;
        Ok(Comparison { operator, value })
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Number(n) => {
                self.advance()?;
                Ok(Value::Number(n))
            }
            Token::String(s) => {
                self.advance()?;
                Ok(Value::String(s))
            }
            Token::Regex(pattern) => {
                // Compile eagerly so a bad pattern fails the parse, not the
                // first evaluation.
                let regex = pattern::compile(&pattern)?;
                self.advance()?;
                Ok(Value::Regex(RegexValue { pattern, regex }))
            }
            Token::True => {
                self.advance()?;
                Ok(Value::Boolean(true))
            }
            Token::False => {
                self.advance()?;
                Ok(Value::Boolean(false))
            }
            Token::Null => {
                self.advance()?;
                Ok(Value::Null)
            }
            found => {
                self.current_token = found;
                Err(self.unexpected("value"))
            }
        }
    }
}
