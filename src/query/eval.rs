//! Stack-machine evaluation of a compiled postfix program against one
//! subblock record.

use super::NonExistentDimensionHandling;
use super::token::{Attribute, Condition, Operator, PostfixToken, Variable};
use crate::error::EvalError;
use crate::subblock::Dimension;

/// Per-record view resolving the variables a query may reference.
///
/// An implementation is a stateful view of one record and must not be shared
/// across concurrent evaluations; the compiled program itself may be.
pub trait EvaluationData {
    /// The coordinate value for the given dimension, or `None` if the record
    /// has no position on that dimension.
    fn coordinate(&self, dimension: Dimension) -> Option<i32>;

    /// The value of a derived attribute. Attributes exist on every record.
    fn attribute(&self, attribute: Attribute) -> i32;
}

/// Execute a postfix program. The program is assumed to satisfy the arity
/// invariant checked at parse time; a violation here is a broken internal
/// invariant and panics.
pub(crate) fn evaluate<D: EvaluationData + ?Sized>(
    program: &[PostfixToken],
    data: &D,
    handling: NonExistentDimensionHandling,
) -> Result<bool, EvalError> {
    let mut stack: Vec<bool> = Vec::new();

    for item in program {
        match item {
            PostfixToken::Condition(condition) => {
                stack.push(evaluate_condition(condition, data, handling)?);
            }
            PostfixToken::Operator(Operator::Not) => {
                let value = stack.pop().expect("postfix program arity invariant");
                stack.push(!value);
            }
            PostfixToken::Operator(op) => {
                let b = stack.pop().expect("postfix program arity invariant");
                let a = stack.pop().expect("postfix program arity invariant");
                stack.push(match op {
                    Operator::And => a && b,
                    Operator::Or => a || b,
                    Operator::Xor => a ^ b,
                    Operator::Not => unreachable!("handled above"),
                });
            }
        }
    }

    let result = stack.pop().expect("postfix program arity invariant");
    debug_assert!(stack.is_empty(), "postfix program arity invariant");
    Ok(result)
}

fn evaluate_condition<D: EvaluationData + ?Sized>(
    condition: &Condition,
    data: &D,
    handling: NonExistentDimensionHandling,
) -> Result<bool, EvalError> {
    let value = match condition.variable {
        Variable::Dimension(dimension) => match data.coordinate(dimension) {
            Some(value) => value,
            None => {
                return match handling {
                    NonExistentDimensionHandling::EvaluateToTrue => Ok(true),
                    NonExistentDimensionHandling::EvaluateToFalse => Ok(false),
                    NonExistentDimensionHandling::Error => {
                        Err(EvalError::NonExistentDimension(dimension))
                    }
                };
            }
        },
        Variable::Attribute(attribute) => data.attribute(attribute),
    };

    Ok(condition.matches(value))
}
