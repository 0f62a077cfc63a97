//! The Fitch proof container

use std::fmt;

use crate::logic::Formula;

use super::line::{Justification, LevelChange, ProofLine, FITCH_SI};

/// An append-only sequence of proof lines with subproof nesting.
///
/// Lines are appended once and never renumbered. The serialization indices
/// (`si`/`ss`) are filled in by [`set_indices`](FitchProof::set_indices),
/// which runs immediately before the proof is written out.
#[derive(Debug, Clone, Default)]
pub struct FitchProof {
    lines: Vec<ProofLine>,
    /// What the proof establishes: the un-negated conclusion
    pub goal: Option<Formula>,
    premises: Vec<usize>,
}

impl FitchProof {
    pub fn new() -> Self {
        FitchProof::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[ProofLine] {
        &self.lines
    }

    pub fn line(&self, idx: usize) -> &ProofLine {
        &self.lines[idx]
    }

    pub fn line_mut(&mut self, idx: usize) -> &mut ProofLine {
        &mut self.lines[idx]
    }

    /// Indices of the premise lines, in order
    pub fn premises(&self) -> &[usize] {
        &self.premises
    }

    /// The last line's subproof level, 0 for an empty proof
    pub fn current_level(&self) -> u32 {
        self.lines.last().map_or(0, |l| l.level)
    }

    /// Append a line, returning its 0-based index
    pub fn push(&mut self, line: ProofLine) -> usize {
        self.lines.push(line);
        self.lines.len() - 1
    }

    /// Append a premise at the top level
    pub fn add_premise(&mut self, formula: Formula) -> usize {
        let mut line = ProofLine::new(formula, self, LevelChange::Hold, Justification::Assumption);
        line.is_premise = true;
        let idx = self.push(line);
        self.premises.push(idx);
        idx
    }

    /// Open the refutation subproof with the negated conclusion and record
    /// the proof's goal: one negation level unwrapped if the assumption is
    /// itself a negation, otherwise the assumption negated.
    pub fn assume_negated_goal(&mut self, formula: Formula) -> usize {
        self.goal = Some(match &formula {
            Formula::Negation(negand) => (**negand).clone(),
            other => Formula::not(other.clone()),
        });
        let mut line = ProofLine::new(formula, self, LevelChange::Open, Justification::Assumption);
        line.starts_subproof = true;
        self.push(line)
    }

    /// Fill in the serialization indices: a single pass run immediately
    /// before serialization. The dotted address increments its last
    /// component per line, gains a trailing 0 when a line opens a subproof,
    /// and drops a component when the previous line closed one.
    pub fn set_indices(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        let mut ss: Vec<u32> = vec![0];
        self.lines[0].si = FITCH_SI;
        self.lines[0].ss = ss.clone();
        for i in 1..self.lines.len() {
            if self.lines[i - 1].ends_subproof {
                ss.pop();
            }
            if let Some(last) = ss.last_mut() {
                *last += 1;
            }
            if self.lines[i].starts_subproof {
                ss.push(0);
            }
            self.lines[i].ss = ss.clone();
        }
    }
}

impl fmt::Display for FitchProof {
    /// ASCII sketch of the proof: `|` rails per nesting level, a `+--` bar
    /// under the premises and under each assumption.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rail = String::from("|");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                let prev = &self.lines[i - 1];
                let break_line = (!line.is_premise && prev.is_premise) || prev.starts_subproof;
                if break_line {
                    writeln!(f, "{}+--", &rail[..rail.len() - 1])?;
                }
                if line.starts_subproof {
                    rail.push_str(" |");
                }
                if prev.ends_subproof {
                    rail.truncate(rail.len().saturating_sub(2));
                }
                if prev.ends_subproof && line.starts_subproof {
                    writeln!(f, "{}", rail)?;
                }
            }
            write!(f, "{}{}. {}\t{}", rail, line.number, line.formula, line.justification)?;
            for &r in &line.references {
                write!(f, " {}", self.lines[r].number)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::line::Rule;

    #[test]
    fn test_numbers_increase_by_one_per_append() {
        let mut proof = FitchProof::new();
        proof.add_premise(Formula::atom("P"));
        proof.add_premise(Formula::atom("Q"));
        proof.assume_negated_goal(Formula::not(Formula::atom("R")));
        let numbers: Vec<u32> = proof.lines().iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(proof.premises(), &[0, 1]);
    }

    #[test]
    fn test_level_arithmetic() {
        let mut proof = FitchProof::new();
        proof.add_premise(Formula::atom("P"));
        assert_eq!(proof.line(0).level, 0);

        let a = proof.assume_negated_goal(Formula::not(Formula::atom("Q")));
        assert_eq!(proof.line(a).level, 1);

        // a closing line inside the subproof
        let mut contra = ProofLine::new(
            Formula::contradiction(),
            &proof,
            LevelChange::Hold,
            Justification::Rule(Rule::ContrIntro),
        );
        contra.ends_subproof = true;
        assert_eq!(contra.level, 1);
        proof.push(contra);

        // a line after a closing line pops the closed context first
        let next = ProofLine::new(
            Formula::atom("Q"),
            &proof,
            LevelChange::Hold,
            Justification::Rule(Rule::NegElim),
        );
        assert_eq!(next.level, 0);
    }

    #[test]
    fn test_goal_unwraps_one_negation() {
        let mut proof = FitchProof::new();
        proof.assume_negated_goal(Formula::not(Formula::atom("Q")));
        assert_eq!(proof.goal, Some(Formula::atom("Q")));

        let mut doubled = FitchProof::new();
        doubled.assume_negated_goal(Formula::atom("Q"));
        assert_eq!(doubled.goal, Some(Formula::not(Formula::atom("Q"))));
    }

    #[test]
    fn test_set_indices_tracks_subproofs() {
        // premise; assumption; step; closing step; assumption; closing step; step
        let mut proof = FitchProof::new();
        proof.add_premise(Formula::atom("P"));
        proof.assume_negated_goal(Formula::not(Formula::atom("Q")));
        let step = ProofLine::new(
            Formula::atom("R"),
            &proof,
            LevelChange::Hold,
            Justification::Rule(Rule::ConjElim),
        );
        proof.push(step);
        let mut closer = ProofLine::new(
            Formula::contradiction(),
            &proof,
            LevelChange::Hold,
            Justification::Rule(Rule::ContrIntro),
        );
        closer.ends_subproof = true;
        proof.push(closer);
        let mut assume = ProofLine::new(
            Formula::atom("S"),
            &proof,
            LevelChange::Open,
            Justification::Assumption,
        );
        assume.starts_subproof = true;
        proof.push(assume);
        let mut closer2 = ProofLine::new(
            Formula::contradiction(),
            &proof,
            LevelChange::Hold,
            Justification::Rule(Rule::ContrIntro),
        );
        closer2.ends_subproof = true;
        proof.push(closer2);
        let last = ProofLine::new(
            Formula::atom("Q"),
            &proof,
            LevelChange::Close,
            Justification::Rule(Rule::NegIntro),
        );
        proof.push(last);

        proof.set_indices();
        let addresses: Vec<Vec<u32>> = proof.lines().iter().map(|l| l.ss.clone()).collect();
        assert_eq!(
            addresses,
            vec![
                vec![0],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
                vec![2, 0],
                vec![2, 1],
                vec![3],
            ]
        );
        assert!(proof.lines().iter().all(|l| l.si == FITCH_SI));
    }

    #[test]
    fn test_display_sketch() {
        let mut proof = FitchProof::new();
        proof.add_premise(Formula::atom("P"));
        proof.assume_negated_goal(Formula::not(Formula::atom("Q")));
        let rendered = proof.to_string();
        assert!(rendered.contains("|1. P"));
        assert!(rendered.contains("+--"));
        assert!(rendered.contains("| |2. ¬Q"));
    }
}
