use crate::ast::CompareOp;

/// Root of a parsed query: one or more OR terms.
///
/// The whole expression is true when any term is true. Terms are evaluated
/// left to right with short-circuiting.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub terms: Vec<OrTerm>,
}

/// One alternative of an OR chain: one or more AND-ed conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct OrTerm {
    pub conditions: Vec<Condition>,
}

/// A single condition: either a parenthesized sub-expression or a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Parenthesized nested expression
    ///
    /// # Example
    /// ```text
    /// (a = 1 OR b = 2)
    /// ```
    Nested(Expression),

    /// A single field comparison
    ///
    /// # Example
    /// ```text
    /// price >= 100
    /// ```
    Predicate(Predicate),
}

/// A field name plus the comparison applied to it.
///
/// The atomic unit of the grammar: `symbol OP value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Field name looked up in the record at evaluation time
    pub symbol: String,
    pub comparison: Comparison,
}

/// A comparison operator together with its right-hand literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub operator: CompareOp,
    pub value: Value,
}

/// A literal value on the right-hand side of a comparison.
///
/// Constructed once at parse time. Regex literals carry their compiled
/// matcher; a `Value::Regex` cannot exist without one.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Numeric literal (all numbers are floats)
    Number(f64),

    /// String literal
    String(String),

    /// Regex literal with its compiled matcher
    Regex(RegexValue),

    /// Boolean literal (`TRUE` / `FALSE`)
    Boolean(bool),

    /// `NULL` literal
    Null,
}

impl Value {
    /// Human-readable kind name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Regex(_) => "regex",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
        }
    }
}

/// A regex literal: the unescaped pattern text and its compiled form.
#[derive(Debug, Clone)]
pub struct RegexValue {
    pub pattern: String,
    pub regex: regex::Regex,
}

impl RegexValue {
    /// True if the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

// Compiled automata carry no identity of their own; two regex values are
// equal when their pattern text is.
impl PartialEq for RegexValue {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}
