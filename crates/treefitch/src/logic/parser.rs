//! Parser for the truth-tree program's propositional expression syntax

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0},
    combinator::map,
    multi::many0,
    sequence::{delimited, preceded},
    IResult,
};
use std::fmt;

use super::formula::Formula;

/// Error produced when an expression does not parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub input: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed expression: {}", self.input)
    }
}

impl std::error::Error for ParseError {}

/// Parse an expression into a [`Formula`].
///
/// Accepts the display symbols and their ASCII substitutes:
/// `¬`/`~`/`!`, `∧`/`&`, `∨`/`|`, `→`/`$`, `↔`/`%`, `⊥`/`^`.
/// Conjunction and disjunction chains are n-ary; mixing the two at the same
/// nesting level requires parentheses. The arrow connectives bind loosest
/// and associate to the right.
pub fn parse_formula(input: &str) -> Result<Formula, ParseError> {
    match formula(input) {
        Ok((rest, parsed)) if rest.trim().is_empty() => Ok(parsed),
        _ => Err(ParseError {
            input: input.to_string(),
        }),
    }
}

fn formula(input: &str) -> IResult<&str, Formula> {
    let (after_lhs, lhs) = junction(input)?;
    if let Ok((rest, _)) = conditional_op(after_lhs) {
        let (rest, rhs) = formula(rest)?;
        return Ok((rest, Formula::Conditional(Box::new(lhs), Box::new(rhs))));
    }
    if let Ok((rest, _)) = biconditional_op(after_lhs) {
        let (rest, rhs) = formula(rest)?;
        return Ok((rest, Formula::Biconditional(Box::new(lhs), Box::new(rhs))));
    }
    Ok((after_lhs, lhs))
}

/// Conjunction and disjunction chains of a single connective
fn junction(input: &str) -> IResult<&str, Formula> {
    let (input, first) = unary(input)?;
    let (input, conjuncts) = many0(preceded(conjunction_op, unary))(input)?;
    if !conjuncts.is_empty() {
        let mut operands = vec![first];
        operands.extend(conjuncts);
        return Ok((input, Formula::Conjunction(operands)));
    }
    let (input, disjuncts) = many0(preceded(disjunction_op, unary))(input)?;
    if !disjuncts.is_empty() {
        let mut operands = vec![first];
        operands.extend(disjuncts);
        return Ok((input, Formula::Disjunction(operands)));
    }
    Ok((input, first))
}

fn unary(input: &str) -> IResult<&str, Formula> {
    let (input, _) = multispace0(input)?;
    if let Ok((rest, _)) = negation_op(input) {
        let (rest, operand) = unary(rest)?;
        return Ok((rest, Formula::Negation(Box::new(operand))));
    }
    primary(input)
}

fn primary(input: &str) -> IResult<&str, Formula> {
    let (input, _) = multispace0(input)?;
    alt((
        delimited(char('('), formula, preceded(multispace0, char(')'))),
        atom,
    ))(input)
}

fn atom(input: &str) -> IResult<&str, Formula> {
    alt((
        map(alt((tag("⊥"), tag("^"))), |_| Formula::contradiction()),
        map(take_while1(|c: char| c.is_alphanumeric()), |s: &str| {
            Formula::Atomic(s.to_string())
        }),
    ))(input)
}

fn conditional_op(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, alt((tag("→"), tag("$"))))(input)
}

fn biconditional_op(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, alt((tag("↔"), tag("%"))))(input)
}

fn conjunction_op(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, alt((tag("∧"), tag("&"))))(input)
}

fn disjunction_op(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, alt((tag("∨"), tag("|"))))(input)
}

fn negation_op(input: &str) -> IResult<&str, char> {
    alt((char('¬'), char('~'), char('!')))(input)
}
