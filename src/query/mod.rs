//! The query language for selecting subblocks.
//!
//! Syntax:
//!   T=5                     - relational condition (= != < > <= >=)
//!   T=[2,4]                 - inclusive range
//!   T={1,3,5}               - list membership
//!   Width>=1024             - derived attributes (Width, Height, LogPosX,
//!                             LogPosY, LogPosWidth, LogPosHeight, IsLayer0)
//!   expr AND expr           - AND (binds tighter than OR/XOR)
//!   expr OR expr            - OR
//!   expr XOR expr           - XOR
//!   NOT expr                - NOT (applies to the following operand)
//!   (expr)                  - grouping
//!
//! A query string is compiled once (lexer -> shunting-yard -> postfix
//! program) into an immutable [`QueryCondition`] and then evaluated against
//! any number of subblock records.

mod eval;
mod filter;
mod lexer;
mod parser;
mod token;

pub use eval::EvaluationData;
pub use filter::{enum_subset, sub_blocks_matching, sub_blocks_matching_par};
pub use token::{Attribute, Condition, ConditionTest, Operator, RelationOp, Token, Variable};

use crate::error::{EvalError, ParseError};
use token::PostfixToken;

/// How a condition referencing a dimension that does not exist on a subblock
/// is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NonExistentDimensionHandling {
    /// The condition evaluates to true.
    #[default]
    EvaluateToTrue,
    /// The condition evaluates to false.
    EvaluateToFalse,
    /// Evaluation fails with [`EvalError::NonExistentDimension`].
    Error,
}

/// Options for query compilation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub non_existent_dimensions: NonExistentDimensionHandling,
}

/// A compiled query: an immutable postfix program, reusable across any
/// number of evaluations and threads.
#[derive(Debug, Clone)]
pub struct QueryCondition {
    program: Vec<PostfixToken>,
    non_existent_dimensions: NonExistentDimensionHandling,
}

impl QueryCondition {
    /// Compile a query string with default options.
    pub fn parse(text: &str) -> Result<QueryCondition, ParseError> {
        QueryCondition::parse_with_options(text, &QueryOptions::default())
    }

    /// Compile a query string.
    pub fn parse_with_options(
        text: &str,
        options: &QueryOptions,
    ) -> Result<QueryCondition, ParseError> {
        let tokens = lexer::tokenize(text)?;
        let program = parser::to_postfix(tokens)?;
        tracing::debug!(items = program.len(), "compiled query expression");
        Ok(QueryCondition {
            program,
            non_existent_dimensions: options.non_existent_dimensions,
        })
    }

    /// Evaluate the query against one record.
    pub fn evaluate<D: EvaluationData + ?Sized>(&self, data: &D) -> Result<bool, EvalError> {
        eval::evaluate(&self.program, data, self.non_existent_dimensions)
    }
}
