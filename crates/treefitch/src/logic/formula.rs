//! Propositional formulas and their two renderings

use serde::{Deserialize, Serialize};
use std::fmt;

/// A propositional formula
///
/// Equality is the derived structural equality: operand order matters, so
/// `P ∧ Q` and `Q ∧ P` compare unequal. Callers that need commutative
/// matching must normalize first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    /// Atomic sentence, named by its symbol
    Atomic(String),
    /// Negation
    Negation(Box<Formula>),
    /// n-ary conjunction (at least two conjuncts)
    Conjunction(Vec<Formula>),
    /// n-ary disjunction (at least two disjuncts)
    Disjunction(Vec<Formula>),
    /// Material conditional
    Conditional(Box<Formula>, Box<Formula>),
    /// Biconditional
    Biconditional(Box<Formula>, Box<Formula>),
}

impl Formula {
    pub fn atom(symbol: impl Into<String>) -> Self {
        Formula::Atomic(symbol.into())
    }

    pub fn not(operand: Formula) -> Self {
        Formula::Negation(Box::new(operand))
    }

    pub fn and(lhs: Formula, rhs: Formula) -> Self {
        Formula::Conjunction(vec![lhs, rhs])
    }

    pub fn or(lhs: Formula, rhs: Formula) -> Self {
        Formula::Disjunction(vec![lhs, rhs])
    }

    pub fn cond(lhs: Formula, rhs: Formula) -> Self {
        Formula::Conditional(Box::new(lhs), Box::new(rhs))
    }

    pub fn bicond(lhs: Formula, rhs: Formula) -> Self {
        Formula::Biconditional(Box::new(lhs), Box::new(rhs))
    }

    /// The `⊥` atom carried by contradiction lines
    pub fn contradiction() -> Self {
        Formula::Atomic("⊥".to_string())
    }

    /// Render in the file-safe form the proof checker stores: every logical
    /// symbol replaced by its ASCII substitute.
    pub fn fitch_str(&self) -> String {
        self.to_string()
            .chars()
            .map(|c| match c {
                '¬' => '~',
                '∧' => '&',
                '∨' => '|',
                '→' => '$',
                '↔' => '%',
                '⊥' => '^',
                other => other,
            })
            .collect()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atomic(symbol) => write!(f, "{}", symbol),
            Formula::Negation(operand) => write!(f, "¬{}", Paren(operand)),
            Formula::Conjunction(operands) => write_infix(f, operands, " ∧ "),
            Formula::Disjunction(operands) => write_infix(f, operands, " ∨ "),
            Formula::Conditional(lhs, rhs) => write!(f, "{} → {}", Paren(lhs), Paren(rhs)),
            Formula::Biconditional(lhs, rhs) => write!(f, "{} ↔ {}", Paren(lhs), Paren(rhs)),
        }
    }
}

/// Operand rendering: atoms and negations stand bare, everything else is
/// wrapped in parentheses.
struct Paren<'a>(&'a Formula);

impl fmt::Display for Paren<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Formula::Atomic(_) | Formula::Negation(_) => write!(f, "{}", self.0),
            _ => write!(f, "({})", self.0),
        }
    }
}

fn write_infix(f: &mut fmt::Formatter<'_>, operands: &[Formula], op: &str) -> fmt::Result {
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", op)?;
        }
        write!(f, "{}", Paren(operand))?;
    }
    Ok(())
}
