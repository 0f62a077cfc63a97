//! One line of a Fitch proof

use std::fmt;

use crate::logic::Formula;

use super::fitch::FitchProof;

/// Step-info index of the target application's file format. A fixed value on
/// every line; the format does not vary it for converted proofs.
pub const FITCH_SI: u32 = 13;

/// Inference rules produced by the conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    NegIntro,
    NegElim,
    ConjElim,
    DisjElim,
    BicondElim,
    ContrIntro,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::NegIntro => "¬ Intro",
            Rule::NegElim => "¬ Elim",
            Rule::ConjElim => "∧ Elim",
            Rule::DisjElim => "∨ Elim",
            Rule::BicondElim => "↔ Elim",
            Rule::ContrIntro => "⊥ Intro",
        };
        write!(f, "{}", name)
    }
}

/// Equivalence lemmas spliced in where no elimination rule applies directly.
/// The name doubles as the stem of the lemma's reference proof file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lemma {
    DeMorgan1,
    DeMorgan2,
    Cond,
    NegCond,
    BiCond,
    NegBiCond,
}

impl Lemma {
    pub fn name(self) -> &'static str {
        match self {
            Lemma::DeMorgan1 => "DeMorgan1",
            Lemma::DeMorgan2 => "DeMorgan2",
            Lemma::Cond => "Cond",
            Lemma::NegCond => "NegCond",
            Lemma::BiCond => "BiCond",
            Lemma::NegBiCond => "NegBiCond",
        }
    }
}

impl fmt::Display for Lemma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Why a line stands in the proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Justification {
    /// Premises and subproof-opening assumptions carry no rule
    Assumption,
    Rule(Rule),
    Lemma(Lemma),
}

impl Justification {
    pub fn is_lemma(&self) -> bool {
        matches!(self, Justification::Lemma(_))
    }
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Justification::Assumption => Ok(()),
            Justification::Rule(rule) => write!(f, "{}", rule),
            Justification::Lemma(lemma) => write!(f, "{}", lemma),
        }
    }
}

/// How a new line moves the current subproof level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelChange {
    Hold,
    Open,
    Close,
}

/// A single proof line. Created once, appended, and not touched afterwards
/// apart from the bookkeeping flags set at construction time and the
/// serialization indices filled in by [`FitchProof::set_indices`].
#[derive(Debug, Clone)]
pub struct ProofLine {
    pub formula: Formula,
    pub justification: Justification,
    /// Subproof nesting depth; premises sit at 0
    pub level: u32,
    /// Supporting lines, as 0-based indices into the owning proof
    pub references: Vec<usize>,
    /// 1-based display number, assigned at append and never reassigned
    pub number: u32,
    pub is_premise: bool,
    pub starts_subproof: bool,
    pub ends_subproof: bool,
    /// Flat step-info index of the file format (fixed, see [`FITCH_SI`])
    pub si: u32,
    /// Dotted subproof address; empty until the indexing pass runs
    pub ss: Vec<u32>,
}

impl ProofLine {
    /// Build a line positioned after the proof's current last line. The level
    /// follows `change`, with one extra decrement when the previous line
    /// closed a subproof (the closed context is popped before the new line's
    /// own instruction applies).
    pub fn new(
        formula: Formula,
        proof: &FitchProof,
        change: LevelChange,
        justification: Justification,
    ) -> Self {
        let mut level = proof.current_level();
        match change {
            LevelChange::Hold => {}
            LevelChange::Open => level += 1,
            LevelChange::Close => level = level.saturating_sub(1),
        }
        if proof.lines().last().map_or(false, |l| l.ends_subproof) {
            level = level.saturating_sub(1);
        }
        ProofLine {
            formula,
            justification,
            level,
            references: Vec::new(),
            number: proof.len() as u32 + 1,
            is_premise: false,
            starts_subproof: false,
            ends_subproof: false,
            si: FITCH_SI,
            ss: Vec::new(),
        }
    }

    /// The dotted form of the subproof address, e.g. `2.4.0`
    pub fn ss_string(&self) -> String {
        self.ss
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Address of this line's enclosing subproof as seen from a line whose
    /// own address has `depth` components: the leading `depth` components,
    /// each with a trailing dot. Lines citing a whole subproof as support
    /// use this form.
    pub fn ss_enclosing(&self, depth: usize) -> String {
        self.ss[..depth].iter().map(|c| format!("{}.", c)).collect()
    }
}
