//! treefitch: compiles truth-tree refutations into Fitch-style natural
//! deduction proofs
//!
//! A truth tree derives a contradiction from a set of premises plus the
//! negated conclusion. This library turns that branching structure into a
//! linear proof with nested subproofs, splicing in biconditional lemmas
//! where a decomposition has no direct elimination rule, and writes the
//! result in the file notation of the Openproof family's Fitch checker.

pub mod convert;
pub mod json;
pub mod logic;
pub mod proof;
pub mod serialize;
pub mod tree;

use std::fmt;
use std::path::Path;

// Re-export the commonly used types
pub use convert::{convert, ConvertError};
pub use json::{ProofJson, ProofLineJson};
pub use logic::{parse_formula, Formula, ParseError};
pub use proof::{FitchProof, Justification, Lemma, LevelChange, ProofLine, Rule};
pub use serialize::{render, serialize, SerializeError, WriterConfig};
pub use tree::{BranchId, LineContent, LineId, Tree, TreeBuilder, TreeError};

/// Errors from the one-shot conversion pipeline
#[derive(Debug)]
pub enum PipelineError {
    Convert(ConvertError),
    Serialize(SerializeError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Convert(e) => write!(f, "{}", e),
            PipelineError::Serialize(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Convert(e) => Some(e),
            PipelineError::Serialize(e) => Some(e),
        }
    }
}

impl From<ConvertError> for PipelineError {
    fn from(e: ConvertError) -> Self {
        PipelineError::Convert(e)
    }
}

impl From<SerializeError> for PipelineError {
    fn from(e: SerializeError) -> Self {
        PipelineError::Serialize(e)
    }
}

/// Convert a recorded truth tree and write the proof file in one call
pub fn tree_to_fitch_file(
    tree: &Tree,
    dest: &Path,
    config: &WriterConfig,
) -> Result<FitchProof, PipelineError> {
    let mut proof = convert(tree)?;
    serialize(&mut proof, dest, config)?;
    Ok(proof)
}
