//! The classical equivalences behind the conversion lemmas
//!
//! Each function builds the right-hand side of one lemma biconditional from
//! the operands of the decomposed connective. All are pure; none inspect
//! anything beyond the operands handed to them. The n-ary connectives use
//! their first two operands, the binary reading under which the lemmas are
//! stated.

use super::formula::Formula;

/// `¬(P ∧ Q) ↔ (¬P ∨ ¬Q)`: right-hand side from the conjuncts
pub fn demorgan1(conjuncts: &[Formula]) -> Formula {
    Formula::or(
        Formula::not(conjuncts[0].clone()),
        Formula::not(conjuncts[1].clone()),
    )
}

/// `¬(P ∨ Q) ↔ (¬P ∧ ¬Q)`: right-hand side from the disjuncts
pub fn demorgan2(disjuncts: &[Formula]) -> Formula {
    Formula::and(
        Formula::not(disjuncts[0].clone()),
        Formula::not(disjuncts[1].clone()),
    )
}

/// `(P → Q) ↔ (¬P ∨ Q)`: right-hand side from the conditional's operands
pub fn conditional(lhs: &Formula, rhs: &Formula) -> Formula {
    Formula::or(Formula::not(lhs.clone()), rhs.clone())
}

/// `¬(P → Q) ↔ (P ∧ ¬Q)`: right-hand side from the conditional's operands
pub fn neg_conditional(lhs: &Formula, rhs: &Formula) -> Formula {
    Formula::and(lhs.clone(), Formula::not(rhs.clone()))
}

/// `(P ↔ Q) ↔ ((P ∧ Q) ∨ (¬P ∧ ¬Q))`
pub fn biconditional(lhs: &Formula, rhs: &Formula) -> Formula {
    Formula::or(
        Formula::and(lhs.clone(), rhs.clone()),
        Formula::and(Formula::not(lhs.clone()), Formula::not(rhs.clone())),
    )
}

/// `¬(P ↔ Q) ↔ ((P ∧ ¬Q) ∨ (¬P ∧ Q))`
pub fn neg_biconditional(lhs: &Formula, rhs: &Formula) -> Formula {
    Formula::or(
        Formula::and(lhs.clone(), Formula::not(rhs.clone())),
        Formula::and(Formula::not(lhs.clone()), rhs.clone()),
    )
}
