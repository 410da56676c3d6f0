// tests/parser_tests.rs

use sieve_lang::ast::{CompareOp, Condition, Expression, Value};
use sieve_lang::lexer::Lexer;
use sieve_lang::parser::{ParseError, Parser};
use sieve_lang::pattern::{MAX_PATTERN_COMPLEXITY, MAX_PATTERN_LENGTH};
use sieve_lang::PatternError;

fn parse(query: &str) -> Result<Expression, ParseError> {
    let mut parser = Parser::new(Lexer::new(query))?;
    parser.parse()
}

fn first_predicate(expr: &Expression) -> (&str, CompareOp, &Value) {
    match &expr.terms[0].conditions[0] {
        Condition::Predicate(p) => (&p.symbol, p.comparison.operator, &p.comparison.value),
        Condition::Nested(_) => panic!("Expected a predicate, got a nested expression"),
    }
}

// ============================================================================
// Basic Predicates
// ============================================================================

#[test]
fn test_simple_predicate() {
    let expr = parse("a = 1").unwrap();
    assert_eq!(expr.terms.len(), 1);
    assert_eq!(expr.terms[0].conditions.len(), 1);

    let (symbol, op, value) = first_predicate(&expr);
    assert_eq!(symbol, "a");
    assert_eq!(op, CompareOp::Eq);
    assert_eq!(value, &Value::Number(1.0));
}

#[test]
fn test_all_operators() {
    let test_cases = vec![
        ("a = 1", CompareOp::Eq),
        ("a <> 1", CompareOp::Ne),
        ("a != 1", CompareOp::Ne),
        ("a < 1", CompareOp::Lt),
        ("a <= 1", CompareOp::Le),
        ("a > 1", CompareOp::Gt),
        ("a >= 1", CompareOp::Ge),
    ];

    for (query, expected) in test_cases {
        let expr = parse(query).unwrap();
        let (_, op, _) = first_predicate(&expr);
        assert_eq!(op, expected, "Failed for query: {}", query);
    }
}

#[test]
fn test_value_kinds() {
    let expr = parse("a = 3.5").unwrap();
    assert_eq!(first_predicate(&expr).2, &Value::Number(3.5));

    let expr = parse("a = \"foo\"").unwrap();
    assert_eq!(first_predicate(&expr).2, &Value::String("foo".to_string()));

    let expr = parse("a = 'bar'").unwrap();
    assert_eq!(first_predicate(&expr).2, &Value::String("bar".to_string()));

    let expr = parse("a = TRUE").unwrap();
    assert_eq!(first_predicate(&expr).2, &Value::Boolean(true));

    let expr = parse("a = false").unwrap();
    assert_eq!(first_predicate(&expr).2, &Value::Boolean(false));

    let expr = parse("a = NULL").unwrap();
    assert_eq!(first_predicate(&expr).2, &Value::Null);

    let expr = parse("a = /^J.*/").unwrap();
    match first_predicate(&expr).2 {
        Value::Regex(r) => assert_eq!(r.pattern, "^J.*"),
        other => panic!("Expected a regex value, got {:?}", other),
    }
}

// ============================================================================
// Precedence and Grouping
// ============================================================================

#[test]
fn test_and_binds_tighter_than_or() {
    // a=1 OR (b=2 AND c=3)
    let expr = parse("a = 1 OR b = 2 AND c = 3").unwrap();
    assert_eq!(expr.terms.len(), 2);
    assert_eq!(expr.terms[0].conditions.len(), 1);
    assert_eq!(expr.terms[1].conditions.len(), 2);
}

#[test]
fn test_parentheses_override_precedence() {
    let expr = parse("(a = 1 OR b = 2) AND c = 3").unwrap();
    assert_eq!(expr.terms.len(), 1);
    assert_eq!(expr.terms[0].conditions.len(), 2);

    match &expr.terms[0].conditions[0] {
        Condition::Nested(inner) => assert_eq!(inner.terms.len(), 2),
        Condition::Predicate(_) => panic!("Expected nested expression"),
    }
}

#[test]
fn test_and_chain() {
    let expr = parse("a = 1 AND b = 2 AND c = 3 AND d = 4").unwrap();
    assert_eq!(expr.terms.len(), 1);
    assert_eq!(expr.terms[0].conditions.len(), 4);
}

#[test]
fn test_or_chain() {
    let expr = parse("a = 1 OR b = 2 OR c = 3").unwrap();
    assert_eq!(expr.terms.len(), 3);
}

#[test]
fn test_deep_nesting() {
    // 25 levels of parentheses parse without issue
    let query = format!("{}a = 1{}", "(".repeat(25), ")".repeat(25));
    let expr = parse(&query).unwrap();
    assert_eq!(expr.terms.len(), 1);
}

#[test]
fn test_case_insensitive_keywords_give_equal_trees() {
    let lower = parse("a=1 and a>0 or b=true").unwrap();
    let upper = parse("a=1 AND a>0 OR b=TRUE").unwrap();
    assert_eq!(lower, upper);
}

// ============================================================================
// Parse Errors
// ============================================================================

#[test]
fn test_trailing_tokens_are_an_error() {
    let result = parse("a = 1 b = 2");
    assert!(matches!(result, Err(ParseError::TrailingTokens { .. })));
}

#[test]
fn test_missing_value() {
    let result = parse("a =");
    assert!(matches!(
        result,
        Err(ParseError::UnexpectedToken {
            expected: "value",
            ..
        })
    ));
}

#[test]
fn test_missing_operator() {
    let result = parse("a");
    assert!(matches!(
        result,
        Err(ParseError::UnexpectedToken {
            expected: "comparison operator",
            ..
        })
    ));
}

#[test]
fn test_missing_field_name() {
    let result = parse("= 1");
    assert!(matches!(
        result,
        Err(ParseError::UnexpectedToken {
            expected: "field name",
            ..
        })
    ));
}

#[test]
fn test_unclosed_paren() {
    let result = parse("(a = 1");
    assert!(matches!(
        result,
        Err(ParseError::UnexpectedToken { expected: "')'", .. })
    ));
}

#[test]
fn test_dangling_and() {
    let result = parse("a = 1 AND");
    assert!(result.is_err());
}

#[test]
fn test_lex_error_surfaces_as_parse_error() {
    let result = parse("a = #");
    assert!(matches!(result, Err(ParseError::Lex(_))));
}

// ============================================================================
// Regex Safety Limits
// ============================================================================

#[test]
fn test_regex_too_long_fails_parse() {
    let pattern = "a".repeat(MAX_PATTERN_LENGTH + 1);
    let result = parse(&format!("name = /{}/", pattern));
    match result {
        Err(ParseError::Pattern(PatternError::TooLong { length })) => {
            assert_eq!(length, MAX_PATTERN_LENGTH + 1);
        }
        other => panic!("Expected TooLong, got {:?}", other.err()),
    }
}

#[test]
fn test_regex_too_complex_fails_parse() {
    let pattern = "a*".repeat(MAX_PATTERN_COMPLEXITY + 1);
    let result = parse(&format!("name = /{}/", pattern));
    assert!(matches!(
        result,
        Err(ParseError::Pattern(PatternError::TooComplex { .. }))
    ));
}

#[test]
fn test_regex_at_complexity_limit_parses() {
    let pattern = "a*".repeat(MAX_PATTERN_COMPLEXITY);
    assert!(parse(&format!("name = /{}/", pattern)).is_ok());
}

#[test]
fn test_invalid_regex_fails_parse() {
    let result = parse("name = /(unclosed/");
    assert!(matches!(
        result,
        Err(ParseError::Pattern(PatternError::Invalid { .. }))
    ));
}

#[test]
fn test_pattern_error_is_descriptive() {
    let pattern = "b+".repeat(MAX_PATTERN_COMPLEXITY + 1);
    let err = parse(&format!("name = /{}/", pattern)).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("too complex"), "got: {}", message);
}
