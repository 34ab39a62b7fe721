//! Conversion of the token stream into a postfix (reverse Polish) program.
//!
//! The grammar has exactly two binary precedence tiers (`AND` above
//! `OR`/`XOR`) plus the unary prefix `NOT`, so a single-pass shunting-yard
//! with one operator stack suffices; no recursive descent is needed.

use super::token::{Operator, PostfixToken, Token};
use crate::error::ParseError;

/// An entry on the shunting-yard operator stack.
enum StackItem {
    Operator(Operator),
    LeftParenthesis,
}

/// Reorder the lexed token stream into postfix, validating parenthesis
/// balance and operator sequencing.
pub(crate) fn to_postfix(tokens: Vec<Token>) -> Result<Vec<PostfixToken>, ParseError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<StackItem> = Vec::new();
    // After a NOT, only a group, a condition or another NOT may follow.
    let mut expect_not_operand = false;

    for token in tokens {
        if expect_not_operand {
            match &token {
                Token::Condition(_)
                | Token::LeftParenthesis
                | Token::Operator(Operator::Not) => {}
                _ => return Err(ParseError::IllformedExpression),
            }
            expect_not_operand = false;
        }

        match token {
            Token::Condition(condition) => output.push(PostfixToken::Condition(condition)),
            Token::Operator(Operator::Not) => {
                stack.push(StackItem::Operator(Operator::Not));
                expect_not_operand = true;
            }
            Token::Operator(op) => {
                while let Some(StackItem::Operator(top)) = stack.last() {
                    if top.is_binary() && top.precedence() >= op.precedence() {
                        output.push(PostfixToken::Operator(*top));
                        stack.pop();
                    } else {
                        break;
                    }
                }
                stack.push(StackItem::Operator(op));
            }
            Token::LeftParenthesis => stack.push(StackItem::LeftParenthesis),
            Token::RightParenthesis => loop {
                match stack.pop() {
                    Some(StackItem::Operator(op)) => output.push(PostfixToken::Operator(op)),
                    Some(StackItem::LeftParenthesis) => break,
                    None => return Err(ParseError::UnbalancedParenthesis),
                }
            },
        }
    }

    if expect_not_operand {
        // Dangling NOT at end of input.
        return Err(ParseError::IllformedExpression);
    }

    while let Some(item) = stack.pop() {
        match item {
            StackItem::Operator(op) => output.push(PostfixToken::Operator(op)),
            StackItem::LeftParenthesis => return Err(ParseError::UnbalancedParenthesis),
        }
    }

    if !is_well_formed(&output) {
        return Err(ParseError::IllformedExpression);
    }

    Ok(output)
}

/// Check the arity invariant of a postfix program: simulating a stack depth
/// counter (+1 per condition, -1 per binary operator, unchanged per NOT)
/// must never underflow and must end at exactly 1.
fn is_well_formed(program: &[PostfixToken]) -> bool {
    let mut depth = 0usize;
    for item in program {
        match item {
            PostfixToken::Condition(_) => depth += 1,
            PostfixToken::Operator(Operator::Not) => {
                if depth < 1 {
                    return false;
                }
            }
            PostfixToken::Operator(_) => {
                if depth < 2 {
                    return false;
                }
                depth -= 1;
            }
        }
    }
    depth == 1
}

#[cfg(test)]
mod tests {
    use super::super::lexer::tokenize;
    use super::super::token::{Condition, ConditionTest, RelationOp, Variable};
    use super::*;
    use crate::subblock::Dimension;

    fn compile(text: &str) -> Result<Vec<PostfixToken>, ParseError> {
        to_postfix(tokenize(text).unwrap())
    }

    /// Render a program as e.g. "T Z AND C OR" for compact shape checks.
    fn shape(program: &[PostfixToken]) -> String {
        program
            .iter()
            .map(|item| match item {
                PostfixToken::Condition(condition) => match condition.variable {
                    Variable::Dimension(dimension) => dimension.to_char().to_string(),
                    Variable::Attribute(_) => "A".to_string(),
                },
                PostfixToken::Operator(Operator::And) => "AND".to_string(),
                PostfixToken::Operator(Operator::Or) => "OR".to_string(),
                PostfixToken::Operator(Operator::Xor) => "XOR".to_string(),
                PostfixToken::Operator(Operator::Not) => "NOT".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn and_binds_before_or() {
        let program = compile("T=3 AND Z=1 OR C=0").unwrap();
        assert_eq!(shape(&program), "T Z AND C OR");
    }

    #[test]
    fn parentheses_override_precedence() {
        let program = compile("T=3 AND (Z=1 OR C=0)").unwrap();
        assert_eq!(shape(&program), "T Z C OR AND");
    }

    #[test]
    fn or_and_xor_do_not_reorder() {
        let program = compile("T=1 OR Z=2 XOR C=3").unwrap();
        assert_eq!(shape(&program), "T Z OR C XOR");
    }

    #[test]
    fn not_chain_is_preserved() {
        let program = compile("NOT NOT NOT NOT NOT T=3").unwrap();
        assert_eq!(shape(&program), "T NOT NOT NOT NOT NOT");
    }

    #[test]
    fn deeply_nested_parentheses() {
        let program = compile("(((((((((T=1)))))))))").unwrap();
        assert_eq!(shape(&program), "T");

        let err = to_postfix(tokenize("((((((((((T=1)))))))))").unwrap()).unwrap_err();
        assert_eq!(err, ParseError::UnbalancedParenthesis);
    }

    #[test]
    fn stray_closing_parenthesis() {
        assert_eq!(
            compile("T=1 )").unwrap_err(),
            ParseError::UnbalancedParenthesis
        );
    }

    #[test]
    fn not_must_precede_an_operand() {
        assert_eq!(
            compile("T=1 NOT AND Z=2").unwrap_err(),
            ParseError::IllformedExpression
        );
        assert_eq!(
            compile("T=1 AND NOT").unwrap_err(),
            ParseError::IllformedExpression
        );
        assert_eq!(
            compile("NOT )").unwrap_err(),
            ParseError::IllformedExpression
        );
    }

    #[test]
    fn arity_violations_are_illformed() {
        assert_eq!(
            compile("T=1 Z=2").unwrap_err(),
            ParseError::IllformedExpression
        );
        assert_eq!(
            compile("AND T=1").unwrap_err(),
            ParseError::IllformedExpression
        );
        assert_eq!(
            compile("T=1 AND").unwrap_err(),
            ParseError::IllformedExpression
        );
        assert_eq!(compile("()").unwrap_err(), ParseError::IllformedExpression);
    }

    #[test]
    fn well_formedness_counter() {
        let condition = PostfixToken::Condition(Condition {
            variable: Variable::Dimension(Dimension::T),
            test: ConditionTest::Relation {
                op: RelationOp::Equal,
                constant: 0,
            },
        });

        assert!(is_well_formed(&[condition.clone()]));
        assert!(is_well_formed(&[
            condition.clone(),
            condition.clone(),
            PostfixToken::Operator(Operator::And),
        ]));
        // Underflow and leftovers are rejected.
        assert!(!is_well_formed(&[]));
        assert!(!is_well_formed(&[PostfixToken::Operator(Operator::Not)]));
        assert!(!is_well_formed(&[
            condition.clone(),
            PostfixToken::Operator(Operator::Xor),
        ]));
        assert!(!is_well_formed(&[condition.clone(), condition]));
    }
}
