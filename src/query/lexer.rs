//! Lexer/tokenizer for the query language.

use winnow::ascii::{digit1, space0};
use winnow::combinator::{alt, opt, separated};
use winnow::prelude::*;
use winnow::token::{any, one_of};

use super::token::{Attribute, Condition, ConditionTest, Operator, RelationOp, Token, Variable};
use crate::error::ParseError;
use crate::subblock::Dimension;

// Manually define PResult for resilience against winnow version changes
type PResult<T> = Result<T, winnow::error::ErrMode<winnow::error::ContextError>>;

/// A matched variable-statement before integer conversion. The literal spans
/// are converted outside of the combinators so that a well-shaped but
/// out-of-range literal reports `InvalidNumberFormat` rather than falling
/// through to a generic syntax error.
enum RawTest<'s> {
    Relation { op: RelationOp, constant: &'s str },
    Range { start: &'s str, end: &'s str },
    List(Vec<&'s str>),
}

enum Lexed<'s> {
    Plain(Token),
    Condition(Variable, RawTest<'s>),
}

/// Lex a variable: a derived-attribute name or a single dimension letter.
/// Attribute names are tried first so that e.g. `Height` is not mis-split
/// into the dimension `H`.
fn variable(input: &mut &str) -> PResult<Variable> {
    alt((
        "LogPosWidth".value(Variable::Attribute(Attribute::LogicalPositionWidth)),
        "LogPosHeight".value(Variable::Attribute(Attribute::LogicalPositionHeight)),
        "LogPosX".value(Variable::Attribute(Attribute::LogicalPositionX)),
        "LogPosY".value(Variable::Attribute(Attribute::LogicalPositionY)),
        "Width".value(Variable::Attribute(Attribute::PhysicalWidth)),
        "Height".value(Variable::Attribute(Attribute::PhysicalHeight)),
        "IsLayer0".value(Variable::Attribute(Attribute::IsLayer0)),
        any.verify_map(Dimension::from_char).map(Variable::Dimension),
    ))
    .parse_next(input)
}

/// Lex a signed integer literal, returning the matched span.
fn signed_int<'s>(input: &mut &'s str) -> PResult<&'s str> {
    (opt(one_of(['+', '-'])), digit1).take().parse_next(input)
}

fn relation_op(input: &mut &str) -> PResult<RelationOp> {
    alt((
        // Multi-char operators first
        "<=".value(RelationOp::LessThanOrEqual),
        ">=".value(RelationOp::GreaterThanOrEqual),
        "!=".value(RelationOp::Unequal),
        "<".value(RelationOp::LessThan),
        ">".value(RelationOp::GreaterThan),
        "=".value(RelationOp::Equal),
    ))
    .parse_next(input)
}

/// Relation statement tail, e.g. `>= 4`.
fn relation_test<'s>(input: &mut &'s str) -> PResult<RawTest<'s>> {
    let op = relation_op.parse_next(input)?;
    space0.parse_next(input)?;
    let constant = signed_int.parse_next(input)?;
    Ok(RawTest::Relation { op, constant })
}

/// Range statement tail, e.g. `= [2, 4]`.
fn range_test<'s>(input: &mut &'s str) -> PResult<RawTest<'s>> {
    ('=', space0, '[', space0).parse_next(input)?;
    let start = signed_int.parse_next(input)?;
    (space0, ',', space0).parse_next(input)?;
    let end = signed_int.parse_next(input)?;
    (space0, ']').parse_next(input)?;
    Ok(RawTest::Range { start, end })
}

fn list_element<'s>(input: &mut &'s str) -> PResult<&'s str> {
    (space0, signed_int, space0)
        .map(|(_, span, _)| span)
        .parse_next(input)
}

/// List statement tail, e.g. `= {9, 10, 23}`. The list must be non-empty.
fn list_test<'s>(input: &mut &'s str) -> PResult<RawTest<'s>> {
    ('=', space0, '{').parse_next(input)?;
    let elements: Vec<&str> = separated(1.., list_element, ',').parse_next(input)?;
    '}'.parse_next(input)?;
    Ok(RawTest::List(elements))
}

fn condition_statement<'s>(input: &mut &'s str) -> PResult<Lexed<'s>> {
    let variable = variable.parse_next(input)?;
    space0.parse_next(input)?;
    let test = alt((range_test, list_test, relation_test)).parse_next(input)?;
    Ok(Lexed::Condition(variable, test))
}

/// Lex a single token, anchored at the current position.
fn lex_token<'s>(input: &mut &'s str) -> PResult<Lexed<'s>> {
    alt((
        "AND".value(Token::Operator(Operator::And)).map(Lexed::Plain),
        "OR".value(Token::Operator(Operator::Or)).map(Lexed::Plain),
        "XOR".value(Token::Operator(Operator::Xor)).map(Lexed::Plain),
        "NOT".value(Token::Operator(Operator::Not)).map(Lexed::Plain),
        "(".value(Token::LeftParenthesis).map(Lexed::Plain),
        ")".value(Token::RightParenthesis).map(Lexed::Plain),
        condition_statement,
    ))
    .parse_next(input)
}

fn parse_i32(literal: &str) -> Result<i32, ParseError> {
    literal.parse().map_err(|_| ParseError::InvalidNumberFormat)
}

fn convert_test(raw: RawTest<'_>) -> Result<ConditionTest, ParseError> {
    match raw {
        RawTest::Relation { op, constant } => Ok(ConditionTest::Relation {
            op,
            constant: parse_i32(constant)?,
        }),
        RawTest::Range { start, end } => Ok(ConditionTest::Range {
            start: parse_i32(start)?,
            end: parse_i32(end)?,
        }),
        RawTest::List(elements) => Ok(ConditionTest::List(
            elements
                .into_iter()
                .map(parse_i32)
                .collect::<Result<Vec<i32>, _>>()?,
        )),
    }
}

/// Tokenize the entire query string.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut rest = input.trim_start();

    while !rest.is_empty() {
        let offset = input.len() - rest.len();
        let lexed = lex_token(&mut rest).map_err(|_| ParseError::Syntax { offset })?;
        let token = match lexed {
            Lexed::Plain(token) => token,
            Lexed::Condition(variable, test) => Token::Condition(Condition {
                variable,
                test: convert_test(test)?,
            }),
        };
        let is_parenthesis = matches!(token, Token::LeftParenthesis | Token::RightParenthesis);
        tokens.push(token);

        // Tokens other than parentheses must be separated from their
        // neighbors by whitespace; parentheses may be adjacent to anything.
        match rest.chars().next() {
            None => break,
            Some(next) => {
                if !(is_parenthesis || next == '(' || next == ')' || next.is_whitespace()) {
                    return Err(ParseError::Syntax {
                        offset: input.len() - rest.len(),
                    });
                }
            }
        }
        rest = rest.trim_start();
    }

    Ok(tokens)
}
