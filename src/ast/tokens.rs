#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Numeric literal, always lexed as a float
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// -1.5e3
    /// ```
    Number(f64),

    /// String literal enclosed in single or double quotes
    ///
    /// The surrounding quotes are stripped; the contents are kept verbatim.
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// 'item #1'
    /// ```
    String(String),

    /// Regex literal delimited by slashes
    ///
    /// Carries the pattern text with `\/` already unescaped to `/`.
    /// Compilation happens in the parser, not here.
    ///
    /// # Examples
    /// ```text
    /// /^J.*/
    /// /a\/b/
    /// ```
    Regex(String),

    // Identifiers
    /// Field name
    ///
    /// Must start with a letter or underscore, followed by letters, digits,
    /// or underscores.
    ///
    /// # Examples
    /// ```text
    /// user
    /// item_count
    /// _internal
    /// ```
    Identifier(String),

    // Keywords (case-insensitive in the source text)
    /// Boolean literal `TRUE`
    True,

    /// Boolean literal `FALSE`
    False,

    /// Logical AND keyword
    And,

    /// Logical OR keyword
    Or,

    /// Null literal `NULL`
    Null,

    // Comparison operators
    /// Equality (`=`)
    Eq,

    /// Inequality (`<>` or `!=`)
    Ne,

    /// Less than (`<`)
    Lt,

    /// Less than or equal (`<=`)
    Le,

    /// Greater than (`>`)
    Gt,

    /// Greater than or equal (`>=`)
    Ge,

    // Delimiters
    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    /// End of input
    Eof,
}
