//! # Sieve Query Language - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for the sieve filter
//! language, a small boolean query language evaluated against flat
//! field -> value records.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Comparison operators
//! - **[expressions]** - The expression tree (OR terms, AND conditions,
//!   predicates, literal values)
//!
//! ## Quick Start
//!
//! ```text
//! a = 1 AND (b > 5 OR c = "foo")
//! ```
//!
//! This query matches records whose field `a` equals 1 and whose field `b`
//! exceeds 5 or whose field `c` is exactly `"foo"`.
//!
//! ## Core Concepts
//!
//! ### Precedence
//!
//! `OR` binds loosest, `AND` next, comparisons tightest. Parentheses
//! override:
//!
//! ```text
//! a = 1 OR b = 2 AND c = 3      // a = 1 OR (b = 2 AND c = 3)
//! (a = 1 OR b = 2) AND c = 3    // grouping wins
//! ```
//!
//! ### Value Kinds
//!
//! A predicate compares a field against exactly one literal kind: a number,
//! a quoted string, a `/regex/`, a boolean, or `NULL`. Regex literals are
//! compiled (and safety-checked) at parse time, never at evaluation time.
//!
//! ### Evaluation
//!
//! The tree is immutable once built. Evaluation walks it with short-circuit
//! AND/OR reduction; a missing field is a non-match, never an error.
pub mod tokens;
pub mod operators;
pub mod expressions;

pub use tokens::Token;
pub use operators::CompareOp;
pub use expressions::{Comparison, Condition, Expression, OrTerm, Predicate, RegexValue, Value};
