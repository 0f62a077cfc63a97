//! JSON mirror types for exporting converted proofs
//!
//! A structured view of the conversion result for external tooling; this is
//! not the checker's `.prf` format.

use serde::{Deserialize, Serialize};

use crate::proof::{FitchProof, ProofLine};

/// JSON representation of one proof line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofLineJson {
    pub number: u32,
    pub formula: String,
    pub rule: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub references: Vec<u32>,
    pub level: u32,
    pub premise: bool,
    pub starts_subproof: bool,
    pub ends_subproof: bool,
}

impl ProofLineJson {
    pub fn from_line(line: &ProofLine, proof: &FitchProof) -> Self {
        ProofLineJson {
            number: line.number,
            formula: line.formula.to_string(),
            rule: line.justification.to_string(),
            references: line
                .references
                .iter()
                .map(|&r| proof.line(r).number)
                .collect(),
            level: line.level,
            premise: line.is_premise,
            starts_subproof: line.starts_subproof,
            ends_subproof: line.ends_subproof,
        }
    }
}

/// JSON representation of a full proof
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofJson {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub goal: Option<String>,
    pub lines: Vec<ProofLineJson>,
}

impl From<&FitchProof> for ProofJson {
    fn from(proof: &FitchProof) -> Self {
        ProofJson {
            goal: proof.goal.as_ref().map(|g| g.to_string()),
            lines: proof
                .lines()
                .iter()
                .map(|l| ProofLineJson::from_line(l, proof))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::Formula;

    #[test]
    fn test_proof_json_round_trip() {
        let mut proof = FitchProof::new();
        proof.add_premise(Formula::cond(Formula::atom("P"), Formula::atom("Q")));
        proof.assume_negated_goal(Formula::not(Formula::atom("Q")));

        let exported = ProofJson::from(&proof);
        assert_eq!(exported.goal.as_deref(), Some("Q"));
        assert_eq!(exported.lines.len(), 2);
        assert_eq!(exported.lines[0].formula, "P → Q");
        assert!(exported.lines[0].premise);
        assert!(exported.lines[1].starts_subproof);

        let json = serde_json::to_string(&exported).unwrap();
        let parsed: ProofJson = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.lines[1].number, exported.lines[1].number);
        assert_eq!(parsed.goal, exported.goal);
    }
}
