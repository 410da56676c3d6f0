//! CLI support for sieve-lang
//!
//! Provides programmatic access to the `sieve` CLI functionality for
//! embedding in other tools.

use std::io;

use crate::{CompileError, EvalError, Matcher, Record, RecordError};

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Query compilation error
    Compile(CompileError),
    /// Evaluation error
    Eval(EvalError),
    /// Record decoding error
    Record(RecordError),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Compile(e) => write!(f, "{}", e),
            CliError::Eval(e) => write!(f, "Evaluation error: {}", e),
            CliError::Record(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No input provided. Use --input or pipe JSON to stdin."),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Compile(e) => Some(e),
            CliError::Eval(e) => Some(e),
            CliError::Record(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::NoInput => None,
        }
    }
}

impl From<CompileError> for CliError {
    fn from(e: CompileError) -> Self {
        CliError::Compile(e)
    }
}

impl From<EvalError> for CliError {
    fn from(e: EvalError) -> Self {
        CliError::Eval(e)
    }
}

impl From<RecordError> for CliError {
    fn from(e: RecordError) -> Self {
        CliError::Record(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

/// Options for a match run
#[derive(Debug, Clone, Default)]
pub struct MatchOptions {
    /// The filter query to compile
    pub query: String,
    /// JSON record input
    pub input: Option<String>,
    /// Dump the compiled tree to stderr before evaluating
    pub debug: bool,
}

/// Result of a match run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The record satisfied the query
    Matched,
    /// The record did not satisfy the query
    Unmatched,
}

/// Compile the query, decode the record, and evaluate one against the other.
pub fn run_match(options: &MatchOptions) -> Result<MatchOutcome, CliError> {
    let mut matcher = Matcher::compile(&options.query)?;
    matcher.debug = options.debug;

    let json = options.input.as_ref().ok_or(CliError::NoInput)?;
    let record = Record::from_json_str(json)?;

    if matcher.evaluate(&record)? {
        Ok(MatchOutcome::Matched)
    } else {
        Ok(MatchOutcome::Unmatched)
    }
}
