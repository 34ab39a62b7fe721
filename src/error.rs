//! Error types for query compilation and evaluation.

use crate::subblock::Dimension;
use thiserror::Error;

/// Errors raised while compiling a query string.
///
/// Only [`ParseError::Syntax`] carries a byte offset; the other kinds are
/// reported without position information.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No valid token could be matched at the given byte offset, or a
    /// required separating whitespace was missing.
    #[error("syntax error in query string at offset {offset}")]
    Syntax { offset: usize },

    /// An integer literal failed to parse or exceeds the signed 32-bit range.
    #[error("integer literal does not fit into a signed 32-bit value")]
    InvalidNumberFormat,

    /// A `)` with no matching open, or a `(` left unclosed at end of input.
    #[error("unbalanced parenthesis in query string")]
    UnbalancedParenthesis,

    /// The token sequence violates operator arity or sequencing rules.
    #[error("ill-formed query expression")]
    IllformedExpression,
}

/// Errors raised while evaluating a compiled query against a subblock.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// The query references a dimension the subblock does not have, and the
    /// query was compiled with
    /// [`NonExistentDimensionHandling::Error`](crate::NonExistentDimensionHandling::Error).
    #[error("dimension '{0}' does not exist on the subblock")]
    NonExistentDimension(Dimension),
}
