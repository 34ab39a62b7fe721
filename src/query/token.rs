//! Token and condition model for the query language.

use crate::subblock::Dimension;

/// A derived attribute of a subblock, computed from its geometry or pyramid
/// membership rather than stored as a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// The physical width of the subblock in pixels (`Width`).
    PhysicalWidth,
    /// The physical height of the subblock in pixels (`Height`).
    PhysicalHeight,
    /// The x-position of the logical subblock position (`LogPosX`).
    LogicalPositionX,
    /// The y-position of the logical subblock position (`LogPosY`).
    LogicalPositionY,
    /// The width of the logical subblock position (`LogPosWidth`).
    LogicalPositionWidth,
    /// The height of the logical subblock position (`LogPosHeight`).
    LogicalPositionHeight,
    /// 1 if the subblock is in pyramid layer 0, 0 otherwise (`IsLayer0`).
    IsLayer0,
}

/// The variable a condition reads: a dimension coordinate or a derived
/// attribute. Resolved once, at lex time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    Dimension(Dimension),
    Attribute(Attribute),
}

/// A relational operator in a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationOp {
    Equal,
    Unequal,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
}

/// The test a condition applies to its variable's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionTest {
    /// Compare against a constant, e.g. `T>=4`.
    Relation { op: RelationOp, constant: i32 },
    /// Inclusive range test, e.g. `T=[2,4]`.
    Range { start: i32, end: i32 },
    /// Membership in a non-empty list, e.g. `T={1,3,5}`.
    List(Vec<i32>),
}

/// One leaf predicate of a query: a variable and the test applied to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub variable: Variable,
    pub test: ConditionTest,
}

impl Condition {
    /// Apply the condition's test to a resolved variable value.
    pub fn matches(&self, value: i32) -> bool {
        match &self.test {
            ConditionTest::Relation { op, constant } => match op {
                RelationOp::Equal => value == *constant,
                RelationOp::Unequal => value != *constant,
                RelationOp::LessThan => value < *constant,
                RelationOp::GreaterThan => value > *constant,
                RelationOp::LessThanOrEqual => value <= *constant,
                RelationOp::GreaterThanOrEqual => value >= *constant,
            },
            ConditionTest::Range { start, end } => *start <= value && value <= *end,
            ConditionTest::List(values) => values.contains(&value),
        }
    }
}

/// A boolean operator. `Not` is unary prefix, the rest are binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    Xor,
    Not,
}

impl Operator {
    /// `And` binds tighter than `Or`/`Xor`; `Or` and `Xor` are equal.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Not => 3,
            Operator::And => 2,
            Operator::Or | Operator::Xor => 1,
        }
    }

    pub fn is_binary(self) -> bool {
        !matches!(self, Operator::Not)
    }
}

/// A token produced by the lexer, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Condition(Condition),
    Operator(Operator),
    LeftParenthesis,
    RightParenthesis,
}

/// One element of a compiled postfix program: parentheses are gone, only
/// conditions and operators remain.
#[derive(Debug, Clone, PartialEq)]
pub enum PostfixToken {
    Condition(Condition),
    Operator(Operator),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition(test: ConditionTest) -> Condition {
        Condition {
            variable: Variable::Dimension(Dimension::T),
            test,
        }
    }

    #[test]
    fn relation_tests() {
        let cond = condition(ConditionTest::Relation {
            op: RelationOp::GreaterThanOrEqual,
            constant: 4,
        });
        assert!(!cond.matches(3));
        assert!(cond.matches(4));
        assert!(cond.matches(5));

        let cond = condition(ConditionTest::Relation {
            op: RelationOp::Unequal,
            constant: 0,
        });
        assert!(cond.matches(-1));
        assert!(!cond.matches(0));
    }

    #[test]
    fn range_is_inclusive() {
        let cond = condition(ConditionTest::Range { start: -2, end: 4 });
        assert!(!cond.matches(-3));
        assert!(cond.matches(-2));
        assert!(cond.matches(4));
        assert!(!cond.matches(5));
    }

    #[test]
    fn list_is_membership() {
        let cond = condition(ConditionTest::List(vec![9, 10, 23]));
        assert!(cond.matches(10));
        assert!(!cond.matches(11));
    }

    #[test]
    fn operator_precedence_tiers() {
        assert!(Operator::And.precedence() > Operator::Or.precedence());
        assert_eq!(Operator::Or.precedence(), Operator::Xor.precedence());
        assert!(Operator::Not.precedence() > Operator::And.precedence());
        assert!(!Operator::Not.is_binary());
        assert!(Operator::Xor.is_binary());
    }
}
