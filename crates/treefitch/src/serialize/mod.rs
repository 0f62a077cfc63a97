//! Rendering a Fitch proof into the external checker's file notation
//!
//! The file is five fixed header lines, one long line holding the proof as
//! nested `openproof` objects, a checksum over everything written, and a
//! fixed trailer. The whole body is built in memory and written in a single
//! operation, so a failed conversion never leaves a truncated file that
//! carries a checksum.

mod templates;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::proof::{FitchProof, Justification, Lemma, Rule};

use templates::*;

/// Failures while writing a proof file
#[derive(Debug)]
pub enum SerializeError {
    Io(io::Error),
    /// A lemma reference file is missing or does not have the expected shape
    LemmaFile {
        lemma: Lemma,
        path: PathBuf,
        detail: String,
    },
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializeError::Io(e) => write!(f, "could not write proof file: {}", e),
            SerializeError::LemmaFile { lemma, path, detail } => write!(
                f,
                "lemma reference file for {} ({}): {}",
                lemma,
                path.display(),
                detail
            ),
        }
    }
}

impl std::error::Error for SerializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerializeError::Io(e) => Some(e),
            SerializeError::LemmaFile { .. } => None,
        }
    }
}

impl From<io::Error> for SerializeError {
    fn from(e: io::Error) -> Self {
        SerializeError::Io(e)
    }
}

/// Output configuration: where the lemma reference proofs live, plus the
/// literal header fields of the target application.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    pub lemma_dir: PathBuf,
    pub version: String,
    pub os_line: String,
    pub timestamps: String,
    pub file_format: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            lemma_dir: PathBuf::from("lemmas"),
            version: VERSION.to_string(),
            os_line: assemble_os_line(),
            timestamps: TIMESTAMPS.to_string(),
            file_format: FILE_FORMAT.to_string(),
        }
    }
}

/// Tag + name + version of the host OS, as the checker records it
fn assemble_os_line() -> String {
    let (tag, name) = match std::env::consts::OS {
        "macos" => (OS_TAG_MAC, "Mac OS X"),
        "windows" => (OS_TAG_WINDOWS, "Windows"),
        "linux" => (OS_TAG_LINUX, "Linux"),
        other => (OS_TAG_UNKNOWN, other),
    };
    format!("{}{}{}", tag, name, os_version())
}

/// Kernel release string; empty when unavailable
fn os_version() -> String {
    #[cfg(target_os = "linux")]
    {
        fs::read_to_string("/proc/sys/kernel/osrelease")
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }
    #[cfg(not(target_os = "linux"))]
    {
        String::new()
    }
}

/// Serialize `proof` to `dest`. Runs the indexing pass first; the proof is
/// otherwise untouched.
pub fn serialize(
    proof: &mut FitchProof,
    dest: &Path,
    config: &WriterConfig,
) -> Result<(), SerializeError> {
    let content = render(proof, config)?;
    fs::write(dest, content)?;
    Ok(())
}

/// Render the complete file, trailers included
pub fn render(proof: &mut FitchProof, config: &WriterConfig) -> Result<String, SerializeError> {
    proof.set_indices();
    let body = render_body(proof, config)?;

    let headers = [
        config.version.as_str(),
        config.os_line.as_str(),
        LINE3_CONSTANT,
        config.timestamps.as_str(),
        config.file_format.as_str(),
    ];
    let checksum: u64 = headers.iter().map(|h| char_sum(h)).sum::<u64>() + char_sum(&body);

    let mut file = String::new();
    for header in headers {
        file.push_str(header);
        file.push('\n');
    }
    file.push_str(&body);
    file.push_str(&format!("c={};\n", checksum));
    file.push_str(TRAILER);
    file.push('\n');
    Ok(file)
}

/// Sum of the character codes of a string, the checker's checksum measure
fn char_sum(s: &str) -> u64 {
    s.chars().map(|c| c as u64).sum()
}

/// Writes template fragments and tracks the closers they open.
///
/// `open` writes everything before the template's first delimiter and stacks
/// the remaining fragments; `close` pops them in LIFO order, so every opened
/// object closes exactly once, innermost first.
struct Emitter {
    out: String,
    closers: Vec<&'static str>,
}

impl Emitter {
    fn new() -> Self {
        Emitter {
            out: String::new(),
            closers: Vec::new(),
        }
    }

    fn open(&mut self, template: &'static str) {
        let mut parts = template.split(DELIM);
        if let Some(first) = parts.next() {
            self.out.push_str(first);
        }
        let rest: Vec<&'static str> = parts.collect();
        for part in rest.into_iter().rev() {
            self.closers.push(part);
        }
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn close(&mut self, count: usize) {
        for _ in 0..count {
            if let Some(part) = self.closers.pop() {
                self.out.push_str(part);
            }
        }
    }

    fn depth(&self) -> usize {
        self.closers.len()
    }
}

fn render_body(proof: &FitchProof, config: &WriterConfig) -> Result<String, SerializeError> {
    let mut em = Emitter::new();
    em.open(PROOF_OPENING_LINE);
    em.open(PROOF_DRIVER);

    for idx in 0..proof.len() {
        emit_step(&mut em, proof, idx, config)?;
    }

    em.write(PROOF_GOAL);
    em.write(PROOF_A);
    while em.depth() > 0 {
        em.close(1);
    }
    Ok(em.out)
}

fn emit_step(
    em: &mut Emitter,
    proof: &FitchProof,
    idx: usize,
    config: &WriterConfig,
) -> Result<(), SerializeError> {
    let line = proof.line(idx);
    if idx != 0 {
        em.write(",");
    }

    // a (sub)proof wrapper precedes the first line and every assumption
    if idx == 0 || line.starts_subproof {
        if idx == 0 {
            em.open(PROOF_STARTER);
        } else {
            em.open(PROOF_SUB_STARTER);
        }
        em.open(PROOF_STEP_INFO);
        em.write(PROOF_STEP_INFO_R_DEFAULT);
        em.close(1);
        em.write(PROOF_RULE_PROOF_START);
        if idx == 0 {
            em.write(PROOF_OBJECT_PROOF_START);
        } else {
            em.write(PROOF_OBJECT_SUBPROOF_START);
        }
        em.open(PROOF_SUPPORT);
        em.close(1);
        em.write(PROOF_B);
        em.open(PROOF_F);
    }

    em.open(PROOF_SIMPLE_STEP);
    em.open(PROOF_STEP_INFO);
    em.open(PROOF_STEP_INFO_R_NORMAL);
    em.write(&line.formula.fitch_str());
    em.close(2);

    match line.justification {
        Justification::Lemma(lemma) => emit_lemma(em, lemma, config)?,
        Justification::Assumption => em.write(PROOF_RULE_PREMISE),
        Justification::Rule(rule) => em.write(rule_fragment(rule)),
    }

    em.write(PROOF_OBJECT_NORMAL_LINE);

    em.open(PROOF_SUPPORT);
    emit_supports(em, proof, idx);
    em.close(1);

    em.write(PROOF_B);

    em.close(1); // the simple step

    if line.ends_subproof || idx == proof.len() - 1 {
        em.close(2); // the f(...) list and its (sub)proof wrapper
    }
    Ok(())
}

fn rule_fragment(rule: Rule) -> &'static str {
    match rule {
        Rule::NegIntro => PROOF_RULE_NEG_INTRO,
        Rule::NegElim => PROOF_RULE_NEG_ELIM,
        Rule::ConjElim => PROOF_RULE_CONJ_ELIM,
        Rule::DisjElim => PROOF_RULE_DISJ_ELIM,
        Rule::BicondElim => PROOF_RULE_BICOND_ELIM,
        Rule::ContrIntro => PROOF_RULE_CONTR_INTRO,
    }
}

/// Write the support packs for a line. A reference into a strictly deeper
/// subproof is collapsed to address that whole subproof, and a subproof is
/// addressed at most once however many of its lines are cited.
fn emit_supports(em: &mut Emitter, proof: &FitchProof, idx: usize) {
    let depth = proof.line(idx).ss.len();
    let mut referenced_subproofs: Vec<String> = Vec::new();
    let mut printed = 0usize;

    for &r in &proof.line(idx).references {
        let target = proof.line(r);
        let ss = if target.ss.len() > depth {
            let enclosing = target.ss_enclosing(depth);
            if referenced_subproofs.contains(&enclosing) {
                continue;
            }
            referenced_subproofs.push(enclosing.clone());
            enclosing
        } else {
            target.ss_string()
        };

        if printed != 0 {
            em.write(",");
        }
        em.open(PROOF_SUPPORT_STEP);
        em.write(&target.si.to_string());
        em.close(1);
        em.write(&ss);
        em.close(1);
        printed += 1;
    }
}

/// Splice a lemma rule: its name plus the proof body copied from the lemma's
/// reference file.
fn emit_lemma(em: &mut Emitter, lemma: Lemma, config: &WriterConfig) -> Result<(), SerializeError> {
    em.open(PROOF_STEP_INFO_R_LEMMA);
    em.write(lemma.name());
    em.close(1);
    let body = read_lemma_body(lemma, config)?;
    em.write(&body);
    em.close(1);
    Ok(())
}

/// Extract the proof body of a lemma reference file: skip the five header
/// lines, find the opening object marker, copy up to the checksum trailer.
fn read_lemma_body(lemma: Lemma, config: &WriterConfig) -> Result<String, SerializeError> {
    let path = config.lemma_dir.join(format!("{}.prf", lemma.name()));
    let lemma_error = |detail: &str| SerializeError::LemmaFile {
        lemma,
        path: path.clone(),
        detail: detail.to_string(),
    };

    let content = fs::read_to_string(&path).map_err(|e| lemma_error(&e.to_string()))?;
    let line = content
        .lines()
        .nth(5)
        .ok_or_else(|| lemma_error("fewer than six lines"))?;
    let after = match line.find(LEMMA_BODY_OPEN) {
        Some(pos) => &line[pos + LEMMA_BODY_OPEN.len()..],
        None => return Err(lemma_error("missing opening object marker")),
    };
    let end = after
        .find(LEMMA_BODY_END)
        .ok_or_else(|| lemma_error("missing checksum terminator"))?;
    Ok(after[..end].to_string())
}
