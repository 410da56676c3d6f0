//! Evaluation of a compiled expression tree against a [`Record`].
//!
//! OR and AND chains short-circuit left to right and fail fast: the first
//! error aborts the walk with no partial result. A missing field is a
//! non-match, never an error. Evaluation has no side effects; it never
//! mutates the tree or the record, so a compiled tree can be evaluated
//! concurrently from any number of threads.

use crate::{
    ast::{CompareOp, Condition, Expression, OrTerm, Predicate, RegexValue, Value},
    record::{FieldValue, Record},
};

/// Errors that can occur while evaluating a query against a record.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The field's runtime kind is incompatible with the literal
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The operator cannot be applied to this value kind at all
    InvalidOperator {
        operator: CompareOp,
        kind: &'static str,
    },

    /// A string field compared against a boolean did not parse as one
    NotABoolean { field: String, content: String },

    /// Evaluation was cancelled before it started
    Cancelled,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::TypeMismatch {
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Type error: field '{}' is {}, expected {}",
                    field, found, expected
                )
            }
            EvalError::InvalidOperator { operator, kind } => {
                write!(
                    f,
                    "Invalid operator: cannot use '{}' with a {} value",
                    operator, kind
                )
            }
            EvalError::NotABoolean { field, content } => {
                write!(f, "Field '{}' is not a boolean value: '{}'", field, content)
            }
            EvalError::Cancelled => write!(f, "Evaluation cancelled"),
        }
    }
}

impl std::error::Error for EvalError {}

impl Expression {
    /// OR-reduce over the terms: true on the first term that is true,
    /// false if all are false, first error propagated.
    pub fn eval(&self, record: &Record) -> Result<bool, EvalError> {
        for term in &self.terms {
            if term.eval(record)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl OrTerm {
    /// AND-reduce over the conditions: false on the first condition that is
    /// false, true if all are true, first error propagated.
    pub fn eval(&self, record: &Record) -> Result<bool, EvalError> {
        for condition in &self.conditions {
            if !condition.eval(record)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Condition {
    pub fn eval(&self, record: &Record) -> Result<bool, EvalError> {
        match self {
            Condition::Nested(expr) => expr.eval(record),
            Condition::Predicate(pred) => pred.eval(record),
        }
    }
}

impl Predicate {
    pub fn eval(&self, record: &Record) -> Result<bool, EvalError> {
        let op = self.comparison.operator;
        match &self.comparison.value {
            // NULL compares against presence itself, so it is resolved
            // before the missing-field rule.
            Value::Null => self.compare_null(op, record),
            value => {
                let Some(field) = record.get(&self.symbol) else {
                    // Missing field: a non-match, never an error.
                    return Ok(false);
                };
                match value {
                    Value::Number(n) => self.compare_number(op, *n, field),
                    Value::String(s) => self.compare_string(op, s, field),
                    Value::Regex(r) => self.compare_regex(op, r, field),
                    Value::Boolean(b) => self.compare_boolean(op, *b, field),
                    Value::Null => unreachable!("handled above"),
                }
            }
        }
    }

    /// `field = NULL` is true iff the field is absent or present with an
    /// explicit null; `<>` is the exact negation. Ordering is undefined.
    fn compare_null(&self, op: CompareOp, record: &Record) -> Result<bool, EvalError> {
        if op.is_ordering() {
            return Err(EvalError::InvalidOperator {
                operator: op,
                kind: "null",
            });
        }
        let absent_or_null = matches!(record.get(&self.symbol), None | Some(FieldValue::Null));
        Ok(if op == CompareOp::Ne {
            !absent_or_null
        } else {
            absent_or_null
        })
    }

    fn compare_number(
        &self,
        op: CompareOp,
        n: f64,
        field: &FieldValue,
    ) -> Result<bool, EvalError> {
        match field {
            // True floating-point comparison, no tolerance, no truncation.
            FieldValue::Number(x) => Ok(compare_f64(op, *x, n)),
            // A string field compares as text against the number's fixed
            // six-decimal rendering, so "1" is not equal to 1 but
            // "1.000000" is.
            FieldValue::String(s) => Ok(compare_str(op, s, &format_number(n))),
            FieldValue::Bool(b) => {
                if op.is_ordering() {
                    return Err(EvalError::TypeMismatch {
                        field: self.symbol.clone(),
                        expected: "number or string",
                        found: "boolean",
                    });
                }
                // Truthiness: zero is false, anything else is true.
                let matched = *b == (n != 0.0);
                Ok(if op == CompareOp::Ne { !matched } else { matched })
            }
            FieldValue::Null => Err(EvalError::TypeMismatch {
                field: self.symbol.clone(),
                expected: "number",
                found: "null",
            }),
        }
    }

    fn compare_string(
        &self,
        op: CompareOp,
        literal: &str,
        field: &FieldValue,
    ) -> Result<bool, EvalError> {
        match field {
            FieldValue::String(s) => Ok(compare_str(op, s, literal)),
            // No coercion for equality: a non-string field is simply not
            // equal to a string literal.
            other => match op {
                CompareOp::Eq => Ok(false),
                CompareOp::Ne => Ok(true),
                _ => Err(EvalError::TypeMismatch {
                    field: self.symbol.clone(),
                    expected: "string",
                    found: other.kind(),
                }),
            },
        }
    }

    fn compare_regex(
        &self,
        op: CompareOp,
        regex: &RegexValue,
        field: &FieldValue,
    ) -> Result<bool, EvalError> {
        if op.is_ordering() {
            return Err(EvalError::InvalidOperator {
                operator: op,
                kind: "regex",
            });
        }
        match field {
            FieldValue::String(s) => {
                let matched = regex.is_match(s);
                Ok(if op == CompareOp::Ne { !matched } else { matched })
            }
            other => Err(EvalError::TypeMismatch {
                field: self.symbol.clone(),
                expected: "string",
                found: other.kind(),
            }),
        }
    }

    fn compare_boolean(
        &self,
        op: CompareOp,
        b: bool,
        field: &FieldValue,
    ) -> Result<bool, EvalError> {
        if op.is_ordering() {
            return Err(EvalError::InvalidOperator {
                operator: op,
                kind: "boolean",
            });
        }
        let actual = match field {
            FieldValue::Number(x) => *x != 0.0,
            FieldValue::Bool(x) => *x,
            FieldValue::String(s) => {
                parse_bool_literal(s).ok_or_else(|| EvalError::NotABoolean {
                    field: self.symbol.clone(),
                    content: s.clone(),
                })?
            }
            FieldValue::Null => {
                return Err(EvalError::TypeMismatch {
                    field: self.symbol.clone(),
                    expected: "boolean",
                    found: "null",
                });
            }
        };
        Ok(if op == CompareOp::Ne {
            actual != b
        } else {
            actual == b
        })
    }
}

fn compare_f64(op: CompareOp, x: f64, n: f64) -> bool {
    match op {
        CompareOp::Eq => x == n,
        CompareOp::Ne => x != n,
        CompareOp::Lt => x < n,
        CompareOp::Le => x <= n,
        CompareOp::Gt => x > n,
        CompareOp::Ge => x >= n,
    }
}

/// Fixed six-decimal rendering of a number literal, the form string fields
/// are compared against.
fn format_number(n: f64) -> String {
    format!("{:.6}", n)
}

fn compare_str(op: CompareOp, x: &str, y: &str) -> bool {
    match op {
        CompareOp::Eq => x == y,
        CompareOp::Ne => x != y,
        CompareOp::Lt => x < y,
        CompareOp::Le => x <= y,
        CompareOp::Gt => x > y,
        CompareOp::Ge => x >= y,
    }
}

/// Accepts the boolean spellings `1/t/true` and `0/f/false`, any case.
fn parse_bool_literal(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_literal() {
        assert_eq!(parse_bool_literal("TRUE"), Some(true));
        assert_eq!(parse_bool_literal("t"), Some(true));
        assert_eq!(parse_bool_literal("1"), Some(true));
        assert_eq!(parse_bool_literal("False"), Some(false));
        assert_eq!(parse_bool_literal("0"), Some(false));
        assert_eq!(parse_bool_literal("yes"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1.000000");
        assert_eq!(format_number(-63.183265), "-63.183265");
        assert_eq!(format_number(0.5), "0.500000");
    }

    #[test]
    fn test_compare_f64_nan_never_matches() {
        assert!(!compare_f64(CompareOp::Eq, f64::NAN, f64::NAN));
        assert!(compare_f64(CompareOp::Ne, f64::NAN, 1.0));
    }
}
