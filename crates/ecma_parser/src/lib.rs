//! A parser for ECMAScript scripts.
//!
//! Covers every statement form of the language core (declarations, branches,
//! loops, jumps, `try`, `switch`, labels, `with`) and an expression subset:
//! literals, names, arrays, calls, `new`, member access, unary, update,
//! binary, logical, conditional, assignment, sequence and function
//! expressions. Automatic semicolon insertion follows the usual line-break
//! rules.
//!
//! ```ignore
//! let script = ecma_parser::parse_script("if (a) { foo(); }")?;
//! assert_eq!(script.body.len(), 1);
//! ```

use ecma_ast::TextRange;

pub use parser::parse_script;

mod lexer;
mod parser;

/// Represents errors that occur while tokenizing or parsing source text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} at byte offset {}", .message, u32::from(.range.start()))]
pub struct ParseError {
    pub message: String,
    pub range: TextRange,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}
