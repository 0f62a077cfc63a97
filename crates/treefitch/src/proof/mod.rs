//! Fitch proof model: lines, justifications, and the proof container

pub mod fitch;
pub mod line;

pub use fitch::FitchProof;
pub use line::{Justification, Lemma, LevelChange, ProofLine, Rule, FITCH_SI};
