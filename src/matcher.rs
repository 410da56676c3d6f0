use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    ast::Expression,
    evaluator::EvalError,
    lexer::Lexer,
    parser::{ParseError, Parser},
    record::Record,
};

/// Errors produced while compiling a query into a [`Matcher`].
#[derive(Debug)]
pub enum CompileError {
    /// Query string was empty or all whitespace
    EmptyQuery,

    /// Query failed to lex or parse
    Parse(ParseError),
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::EmptyQuery => write!(f, "Empty query string"),
            CompileError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Parse(e) => Some(e),
            CompileError::EmptyQuery => None,
        }
    }
}

impl From<ParseError> for CompileError {
    fn from(e: ParseError) -> Self {
        CompileError::Parse(e)
    }
}

/// Cooperative cancellation handle for [`Matcher::evaluate_with_cancel`].
///
/// Cloneable; all clones share the flag. Cancellation is checked once at the
/// start of an evaluation, not during the tree walk (a walk over a
/// single-query tree never runs long enough to need intra-walk checks).
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// A compiled query, ready to be evaluated against any number of records.
///
/// The expression tree (including compiled regexes) is built once by
/// [`Matcher::compile`] and never mutated afterwards, so a matcher can be
/// shared across threads and evaluated concurrently without locking.
///
/// # Examples
///
/// ```
/// use sieve_lang::{Matcher, Record};
///
/// let matcher = Matcher::compile("a = 1 AND b > 5").unwrap();
///
/// let mut record = Record::new();
/// record.insert("a", 1.0);
/// record.insert("b", 7.0);
///
/// assert!(matcher.evaluate(&record).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Matcher {
    expression: Expression,
    /// When set, dumps the compiled tree to stderr before each evaluation.
    /// Never alters the evaluation outcome.
    pub debug: bool,
}

impl Matcher {
    /// Compile a query string into a matcher.
    ///
    /// Fails immediately on an empty query, on malformed query text, and on
    /// regex literals rejected by the safety limits.
    pub fn compile(query: &str) -> Result<Self, CompileError> {
        if query.trim().is_empty() {
            return Err(CompileError::EmptyQuery);
        }

        let lexer = Lexer::new(query);
        let mut parser = Parser::new(lexer)?;
        let expression = parser.parse()?;

        Ok(Matcher {
            expression,
            debug: false,
        })
    }

    /// The compiled expression tree.
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Evaluate the compiled query against a record.
    pub fn evaluate(&self, record: &Record) -> Result<bool, EvalError> {
        if self.debug {
            eprintln!("{:#?}", self.expression);
        }
        self.expression.eval(record)
    }

    /// Evaluate with a cancellation check at the call boundary.
    ///
    /// Returns [`EvalError::Cancelled`] if the token is already cancelled;
    /// otherwise behaves exactly like [`Matcher::evaluate`].
    pub fn evaluate_with_cancel(
        &self,
        token: &CancelToken,
        record: &Record,
    ) -> Result<bool, EvalError> {
        if token.is_cancelled() {
            return Err(EvalError::Cancelled);
        }
        self.evaluate(record)
    }
}
