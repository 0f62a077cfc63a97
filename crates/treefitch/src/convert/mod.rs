//! Truth-tree to Fitch proof transformation
//!
//! The converter walks the tree once. Premises come first, the last premise
//! opens the refutation subproof, and the recursive visit turns every
//! decomposition into a justified proof line, inserting an equivalence lemma
//! wherever a rewrite has no direct elimination rule. A final negation
//! introduction discharges the assumed negated conclusion.

use std::fmt;

use indexmap::{IndexMap, IndexSet};

use crate::logic::{equivalence, Formula};
use crate::proof::{FitchProof, Justification, Lemma, LevelChange, ProofLine, Rule};
use crate::tree::{BranchId, LineContent, LineId, Tree};

/// Structural failures of a conversion
#[derive(Debug)]
pub enum ConvertError {
    /// The premise branch holds nothing beyond the loader's synthetic line
    NoPremises,
    /// A statement line with no formula outside the synthetic slot
    MissingFormula(LineId),
    /// A non-premise line that no decomposition produced
    UndecomposedLine(LineId),
    /// A line whose parent formula matches no decomposition rule
    UnsupportedDecompositionShape { line: LineId, parent: String },
    /// A justification points at a tree line that never produced a proof line
    MissingReference(LineId),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::NoPremises => {
                write!(f, "premise branch is empty after dropping the synthetic line")
            }
            ConvertError::MissingFormula(line) => {
                write!(f, "line {:?} carries no statement", line)
            }
            ConvertError::UndecomposedLine(line) => {
                write!(f, "line {:?} is not a premise and was not decomposed from anything", line)
            }
            ConvertError::UnsupportedDecompositionShape { line, parent } => {
                write!(
                    f,
                    "line {:?} was decomposed from `{}`, which matches no decomposition rule",
                    line, parent
                )
            }
            ConvertError::MissingReference(line) => {
                write!(f, "no proof line recorded for tree line {:?}", line)
            }
        }
    }
}

impl std::error::Error for ConvertError {}

/// Convert a recorded truth tree into a Fitch proof.
///
/// [`Tree::record_decompositions`] must have run (trees from
/// [`TreeBuilder::finish`](crate::tree::TreeBuilder::finish) already have).
pub fn convert(tree: &Tree) -> Result<FitchProof, ConvertError> {
    Converter::new(tree).run()
}

/// State for one conversion: the growing proof plus the bookkeeping that
/// keeps tree lines and proof lines in step.
struct Converter<'a> {
    tree: &'a Tree,
    proof: FitchProof,
    /// Decomposed lines whose lemma pair is already in the proof
    instantiated_lemmas: IndexSet<LineId>,
    /// Tree line -> the proof line currently standing for it. A lemma
    /// elimination supersedes the original entry for its parent.
    reference_map: IndexMap<LineId, usize>,
    /// Biconditional split -> the two case-assumption conjunction lines
    bicond_map: IndexMap<LineId, [Option<usize>; 2]>,
}

impl<'a> Converter<'a> {
    fn new(tree: &'a Tree) -> Self {
        Converter {
            tree,
            proof: FitchProof::new(),
            instantiated_lemmas: IndexSet::new(),
            reference_map: IndexMap::new(),
            bicond_map: IndexMap::new(),
        }
    }

    fn run(mut self) -> Result<FitchProof, ConvertError> {
        let root = self.tree.root();
        let premise_lines = self.tree.branch(root).lines.clone();

        // the loader always seeds the premise branch with one empty line
        let real = premise_lines.get(1..).unwrap_or_default();
        if real.is_empty() {
            return Err(ConvertError::NoPremises);
        }

        for &line_id in &real[..real.len() - 1] {
            let formula = self.statement(line_id)?.clone();
            let idx = self.proof.add_premise(formula);
            self.reference_map.insert(line_id, idx);
        }

        let goal_line = real[real.len() - 1];
        let formula = self.statement(goal_line)?.clone();
        let assumption = self.proof.assume_negated_goal(formula);
        self.reference_map.insert(goal_line, assumption);

        self.visit(root)?;

        // close whatever is still open and discharge the assumption
        let last = self.proof.len() - 1;
        self.proof.line_mut(last).ends_subproof = true;

        let assumed = self.proof.line(assumption).formula.clone();
        let mut neg_intro = ProofLine::new(
            Formula::not(assumed.clone()),
            &self.proof,
            LevelChange::Close,
            Justification::Rule(Rule::NegIntro),
        );
        neg_intro.references.extend(assumption..self.proof.len());
        let neg_intro_idx = self.proof.push(neg_intro);

        // land exactly on the goal when the assumption was itself a negation
        if let Formula::Negation(negand) = assumed {
            let mut neg_elim = ProofLine::new(
                *negand,
                &self.proof,
                LevelChange::Hold,
                Justification::Rule(Rule::NegElim),
            );
            neg_elim.references.push(neg_intro_idx);
            self.proof.push(neg_elim);
        }

        Ok(self.proof)
    }

    fn visit(&mut self, branch: BranchId) -> Result<(), ConvertError> {
        let node = self.tree.branch(branch);
        let line_ids = node.lines.clone();
        let children = node.children.clone();
        let cause = node.decomposed_from;

        if branch != self.tree.root() {
            for line_id in line_ids {
                match &self.tree.line(line_id).content {
                    LineContent::Terminator => self.close_branch(line_id)?,
                    LineContent::Statement(_) => self.emit_line(line_id)?,
                    LineContent::Empty => return Err(ConvertError::MissingFormula(line_id)),
                }
            }
        }

        // after this branch's own lines, before the children: the children's
        // eliminations read the updated reference for the causing line
        if let Some(cause) = cause {
            self.instantiate_lemma(cause)?;
        }

        for &child in &children {
            self.visit(child)?;
        }

        if children.len() > 1 {
            self.close_split(cause, &children)?;
        }
        Ok(())
    }

    /// One ordinary line: dispatch on the shape of the formula it was
    /// decomposed from, append the proof line(s), record the mapping.
    fn emit_line(&mut self, line_id: LineId) -> Result<(), ConvertError> {
        let formula = self.statement(line_id)?.clone();
        let parent_id = self
            .tree
            .line(line_id)
            .decomposed_from
            .ok_or(ConvertError::UndecomposedLine(line_id))?;
        let parent = self.statement(parent_id)?.clone();

        let idx = match &parent {
            Formula::Conjunction(_) => self.push_elimination(formula, parent_id, Rule::ConjElim)?,
            Formula::Disjunction(_) | Formula::Conditional(_, _) => self.push_assumption(formula),
            Formula::Biconditional(lhs, rhs) => {
                self.bicond_case(line_id, parent_id, &parent, formula, lhs, rhs, false)?
            }
            Formula::Negation(negand) => match &**negand {
                Formula::Negation(_) => self.push_elimination(formula, parent_id, Rule::NegElim)?,
                Formula::Conjunction(_) => self.push_assumption(formula),
                Formula::Disjunction(_) | Formula::Conditional(_, _) => {
                    // the rewrite does not branch, so its lemma is spliced in
                    // right where the first derived line needs it
                    self.ensure_lemma(parent_id)?;
                    self.push_elimination(formula, parent_id, Rule::ConjElim)?
                }
                Formula::Biconditional(lhs, rhs) => {
                    self.bicond_case(line_id, parent_id, &parent, formula, lhs, rhs, true)?
                }
                Formula::Atomic(_) => {
                    return Err(ConvertError::UnsupportedDecompositionShape {
                        line: line_id,
                        parent: parent.to_string(),
                    })
                }
            },
            Formula::Atomic(_) => {
                return Err(ConvertError::UnsupportedDecompositionShape {
                    line: line_id,
                    parent: parent.to_string(),
                })
            }
        };
        self.reference_map.insert(line_id, idx);
        Ok(())
    }

    /// A terminator becomes a `⊥` introduction citing the proof lines of its
    /// contradictory pair, and closes the enclosing subproof.
    fn close_branch(&mut self, line_id: LineId) -> Result<(), ConvertError> {
        let selected = self.tree.line(line_id).selected_lines.clone();
        let mut refs = Vec::with_capacity(selected.len());
        for justifying in selected {
            refs.push(self.current_ref(justifying)?);
        }
        let mut line = ProofLine::new(
            Formula::contradiction(),
            &self.proof,
            LevelChange::Hold,
            Justification::Rule(Rule::ContrIntro),
        );
        line.references = refs;
        line.ends_subproof = true;
        let idx = self.proof.push(line);
        self.reference_map.insert(line_id, idx);
        Ok(())
    }

    /// After a genuine case split: one `⊥` line by ∨-Elimination citing every
    /// line of every child branch plus the split's causing line.
    fn close_split(
        &mut self,
        cause: Option<LineId>,
        children: &[BranchId],
    ) -> Result<(), ConvertError> {
        let mut refs = Vec::new();
        for &child in children {
            for &line_id in &self.tree.branch(child).lines {
                refs.push(self.current_ref(line_id)?);
            }
        }
        if let Some(cause) = cause {
            refs.push(self.current_ref(cause)?);
        }
        let mut line = ProofLine::new(
            Formula::contradiction(),
            &self.proof,
            LevelChange::Close,
            Justification::Rule(Rule::DisjElim),
        );
        line.references = refs;
        line.ends_subproof = true;
        self.proof.push(line);
        Ok(())
    }

    /// Lemma insertion for a branch-causing line. Disjunctions eliminate
    /// directly and need none.
    fn instantiate_lemma(&mut self, cause: LineId) -> Result<(), ConvertError> {
        if matches!(self.statement(cause)?, Formula::Disjunction(_)) {
            return Ok(());
        }
        self.ensure_lemma(cause)
    }

    /// Append the lemma biconditional and its elimination for `cause`, at
    /// most once per distinct causing line. The elimination line becomes the
    /// current reference for `cause`.
    fn ensure_lemma(&mut self, cause: LineId) -> Result<(), ConvertError> {
        if self.instantiated_lemmas.contains(&cause) {
            return Ok(());
        }
        let parent = self.statement(cause)?.clone();
        let (lemma, equivalent) = match &parent {
            Formula::Conditional(lhs, rhs) => (Lemma::Cond, equivalence::conditional(lhs, rhs)),
            Formula::Biconditional(lhs, rhs) => {
                (Lemma::BiCond, equivalence::biconditional(lhs, rhs))
            }
            Formula::Negation(negand) => match &**negand {
                Formula::Conjunction(ops) => (Lemma::DeMorgan1, equivalence::demorgan1(ops)),
                Formula::Disjunction(ops) => (Lemma::DeMorgan2, equivalence::demorgan2(ops)),
                Formula::Conditional(lhs, rhs) => {
                    (Lemma::NegCond, equivalence::neg_conditional(lhs, rhs))
                }
                Formula::Biconditional(lhs, rhs) => {
                    (Lemma::NegBiCond, equivalence::neg_biconditional(lhs, rhs))
                }
                _ => {
                    return Err(ConvertError::UnsupportedDecompositionShape {
                        line: cause,
                        parent: parent.to_string(),
                    })
                }
            },
            _ => {
                return Err(ConvertError::UnsupportedDecompositionShape {
                    line: cause,
                    parent: parent.to_string(),
                })
            }
        };

        let lemma_line = ProofLine::new(
            Formula::bicond(parent, equivalent.clone()),
            &self.proof,
            LevelChange::Hold,
            Justification::Lemma(lemma),
        );
        let lemma_idx = self.proof.push(lemma_line);

        let parent_idx = self.current_ref(cause)?;
        let mut elim = ProofLine::new(
            equivalent,
            &self.proof,
            LevelChange::Hold,
            Justification::Rule(Rule::BicondElim),
        );
        elim.references.push(lemma_idx);
        elim.references.push(parent_idx);
        let elim_idx = self.proof.push(elim);

        self.reference_map.insert(cause, elim_idx);
        self.instantiated_lemmas.insert(cause);
        Ok(())
    }

    /// A biconditional (or negated-biconditional) case line: materialize the
    /// side's assumption conjunction once, then eliminate out of it.
    #[allow(clippy::too_many_arguments)]
    fn bicond_case(
        &mut self,
        line_id: LineId,
        parent_id: LineId,
        parent: &Formula,
        formula: Formula,
        lhs: &Formula,
        rhs: &Formula,
        negated: bool,
    ) -> Result<usize, ConvertError> {
        let neg_lhs = Formula::not(lhs.clone());
        let neg_rhs = Formula::not(rhs.clone());
        let bad_case = || ConvertError::UnsupportedDecompositionShape {
            line: line_id,
            parent: parent.to_string(),
        };

        let (side, case_conjunction) = if !negated {
            if formula == *lhs || formula == *rhs {
                (0, Formula::and(lhs.clone(), rhs.clone()))
            } else if formula == neg_lhs || formula == neg_rhs {
                (1, Formula::and(neg_lhs, neg_rhs))
            } else {
                return Err(bad_case());
            }
        } else if formula == *lhs || formula == neg_rhs {
            (0, Formula::and(lhs.clone(), neg_rhs))
        } else if formula == neg_lhs || formula == *rhs {
            (1, Formula::and(neg_lhs, rhs.clone()))
        } else {
            return Err(bad_case());
        };

        let cached = self.bicond_map.get(&parent_id).and_then(|slots| slots[side]);
        let conjunction_idx = match cached {
            Some(idx) => idx,
            None => {
                let idx = self.push_assumption(case_conjunction);
                let slots = self.bicond_map.entry(parent_id).or_insert([None, None]);
                slots[side] = Some(idx);
                idx
            }
        };

        let mut line = ProofLine::new(
            formula,
            &self.proof,
            LevelChange::Hold,
            Justification::Rule(Rule::ConjElim),
        );
        line.references.push(conjunction_idx);
        Ok(self.proof.push(line))
    }

    /// An assumption line opening a new subproof; carries no references
    fn push_assumption(&mut self, formula: Formula) -> usize {
        let mut line = ProofLine::new(
            formula,
            &self.proof,
            LevelChange::Open,
            Justification::Assumption,
        );
        line.starts_subproof = true;
        self.proof.push(line)
    }

    /// A same-level elimination citing the parent's current proof line
    fn push_elimination(
        &mut self,
        formula: Formula,
        parent_id: LineId,
        rule: Rule,
    ) -> Result<usize, ConvertError> {
        let parent_idx = self.current_ref(parent_id)?;
        let mut line = ProofLine::new(
            formula,
            &self.proof,
            LevelChange::Hold,
            Justification::Rule(rule),
        );
        line.references.push(parent_idx);
        Ok(self.proof.push(line))
    }

    fn current_ref(&self, line: LineId) -> Result<usize, ConvertError> {
        self.reference_map
            .get(&line)
            .copied()
            .ok_or(ConvertError::MissingReference(line))
    }

    fn statement(&self, line_id: LineId) -> Result<&Formula, ConvertError> {
        match &self.tree.line(line_id).content {
            LineContent::Statement(formula) => Ok(formula),
            _ => Err(ConvertError::MissingFormula(line_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeBuilder;

    fn p() -> Formula {
        Formula::atom("P")
    }

    fn q() -> Formula {
        Formula::atom("Q")
    }

    #[test]
    fn test_rejects_empty_premise_branch() {
        let mut b = TreeBuilder::new();
        b.add_empty_premise();
        let tree = b.finish();
        assert!(matches!(convert(&tree), Err(ConvertError::NoPremises)));
    }

    #[test]
    fn test_rejects_atomic_parent() {
        let mut b = TreeBuilder::new();
        b.add_empty_premise();
        let atom = b.add_premise(p());
        b.add_premise(Formula::not(q()));
        let trunk = b.add_branch(b.root());
        b.add_line(trunk, q(), atom);
        let tree = b.finish();
        assert!(matches!(
            convert(&tree),
            Err(ConvertError::UnsupportedDecompositionShape { .. })
        ));
    }

    #[test]
    fn test_premises_keep_order_and_level() {
        let mut b = TreeBuilder::new();
        b.add_empty_premise();
        let conj = b.add_premise(Formula::and(p(), q()));
        b.add_premise(Formula::atom("R"));
        let neg_p = b.add_premise(Formula::not(p()));
        let trunk = b.add_branch(b.root());
        let p_line = b.add_line(trunk, p(), conj);
        b.add_terminator(trunk, [p_line, neg_p]);
        let tree = b.finish();

        let proof = convert(&tree).unwrap();
        // two premises survive: the synthetic line is dropped, the last
        // premise becomes the assumed negated conclusion
        assert_eq!(proof.premises().len(), 2);
        assert_eq!(proof.line(0).formula, Formula::and(p(), q()));
        assert_eq!(proof.line(1).formula, Formula::atom("R"));
        assert!(proof.premises().iter().all(|&i| proof.line(i).level == 0));
        let assumption = proof.line(2);
        assert_eq!(assumption.formula, Formula::not(p()));
        assert!(assumption.starts_subproof);
        assert_eq!(assumption.level, 1);
        assert_eq!(proof.goal, Some(p()));
    }

    #[test]
    fn test_conjunction_scenario_end_to_end() {
        // premises {P ∧ Q}, conclusion P, so the tree assumes ¬P
        let mut b = TreeBuilder::new();
        b.add_empty_premise();
        let conj = b.add_premise(Formula::and(p(), q()));
        let neg_p = b.add_premise(Formula::not(p()));
        let trunk = b.add_branch(b.root());
        let p_line = b.add_line(trunk, p(), conj);
        b.add_terminator(trunk, [p_line, neg_p]);
        let tree = b.finish();

        let proof = convert(&tree).unwrap();
        let shape: Vec<(String, Justification)> = proof
            .lines()
            .iter()
            .map(|l| (l.formula.to_string(), l.justification))
            .collect();
        assert_eq!(
            shape,
            vec![
                ("P ∧ Q".to_string(), Justification::Assumption),
                ("¬P".to_string(), Justification::Assumption),
                ("P".to_string(), Justification::Rule(Rule::ConjElim)),
                ("⊥".to_string(), Justification::Rule(Rule::ContrIntro)),
                ("¬¬P".to_string(), Justification::Rule(Rule::NegIntro)),
                ("P".to_string(), Justification::Rule(Rule::NegElim)),
            ]
        );
        assert_eq!(proof.line(2).references, vec![0]);
        assert_eq!(proof.line(3).references, vec![2, 1]);
        assert!(proof.line(3).ends_subproof);
        assert_eq!(proof.line(4).references, vec![1, 2, 3]);
        assert_eq!(proof.line(5).references, vec![4]);
    }
}
