//! Safety limits for regex literals.
//!
//! Patterns come straight from query text, so compilation is guarded three
//! ways: a length cap, a complexity cap (repetition operators are a cheap
//! proxy for catastrophic-backtracking risk), and a hard compilation
//! deadline. A pattern that trips any guard fails the parse; no partially
//! built matcher ever escapes.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Maximum pattern length in characters, after `\/` unescaping.
pub const MAX_PATTERN_LENGTH: usize = 1000;

/// Maximum complexity score: occurrences of `* + { } ? |`.
pub const MAX_PATTERN_COMPLEXITY: usize = 20;

/// Hard deadline for compiling a single pattern.
const COMPILE_DEADLINE: Duration = Duration::from_millis(100);

/// Errors produced while vetting or compiling a regex literal.
#[derive(Debug)]
pub enum PatternError {
    /// Pattern exceeds [`MAX_PATTERN_LENGTH`]
    TooLong { length: usize },

    /// Pattern exceeds [`MAX_PATTERN_COMPLEXITY`]
    TooComplex { score: usize },

    /// Compilation did not finish within the deadline
    CompileTimeout { pattern: String },

    /// Pattern rejected by the regex engine
    Invalid {
        pattern: String,
        source: regex::Error,
    },
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternError::TooLong { length } => {
                write!(
                    f,
                    "Regex pattern too long: {} characters (max {})",
                    length, MAX_PATTERN_LENGTH
                )
            }
            PatternError::TooComplex { score } => {
                write!(
                    f,
                    "Regex pattern too complex: complexity score {} (max {})",
                    score, MAX_PATTERN_COMPLEXITY
                )
            }
            PatternError::CompileTimeout { pattern } => {
                write!(f, "Regex compilation timed out for pattern '{}'", pattern)
            }
            PatternError::Invalid { pattern, source } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, source)
            }
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatternError::Invalid { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Count of repetition-operator characters in the pattern.
fn complexity_score(pattern: &str) -> usize {
    pattern
        .chars()
        .filter(|c| matches!(c, '*' | '+' | '{' | '}' | '?' | '|'))
        .count()
}

/// Vet and compile a regex pattern under the safety limits.
///
/// Compilation runs on a detached worker thread raced against
/// [`COMPILE_DEADLINE`]; on timeout the worker is abandoned, not joined on,
/// so a pathological pattern cannot stall the parse.
pub fn compile(pattern: &str) -> Result<regex::Regex, PatternError> {
    let length = pattern.chars().count();
    if length > MAX_PATTERN_LENGTH {
        return Err(PatternError::TooLong { length });
    }

    let score = complexity_score(pattern);
    if score > MAX_PATTERN_COMPLEXITY {
        return Err(PatternError::TooComplex { score });
    }

    let (tx, rx) = mpsc::channel();
    let owned = pattern.to_string();
    thread::spawn(move || {
        // The receiver may be gone already if the deadline elapsed.
        let _ = tx.send(regex::Regex::new(&owned));
    });

    match rx.recv_timeout(COMPILE_DEADLINE) {
        Ok(Ok(regex)) => Ok(regex),
        Ok(Err(source)) => Err(PatternError::Invalid {
            pattern: pattern.to_string(),
            source,
        }),
        Err(_) => Err(PatternError::CompileTimeout {
            pattern: pattern.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_limit() {
        let pattern = "a".repeat(MAX_PATTERN_LENGTH + 1);
        assert!(matches!(
            compile(&pattern),
            Err(PatternError::TooLong { .. })
        ));
    }

    #[test]
    fn test_complexity_limit() {
        let pattern = "a*".repeat(MAX_PATTERN_COMPLEXITY + 1);
        assert!(matches!(
            compile(&pattern),
            Err(PatternError::TooComplex { .. })
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            compile("(unclosed"),
            Err(PatternError::Invalid { .. })
        ));
    }

    #[test]
    fn test_simple_pattern_compiles() {
        let re = compile("^J.*").unwrap();
        assert!(re.is_match("John"));
        assert!(!re.is_match("Alice"));
    }
}
