pub mod ast;
pub mod cli;
pub mod evaluator;
pub mod lexer;
pub mod matcher;
pub mod parser;
pub mod pattern;
pub mod record;

pub use ast::{CompareOp, Comparison, Condition, Expression, OrTerm, Predicate, Token, Value};
pub use evaluator::EvalError;
pub use lexer::{LexError, Lexer};
pub use matcher::{CancelToken, CompileError, Matcher};
pub use parser::{ParseError, Parser};
pub use pattern::PatternError;
pub use record::{FieldValue, Record, RecordError};
