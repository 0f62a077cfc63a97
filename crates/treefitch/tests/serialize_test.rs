//! Output file format tests

use std::fs;
use std::path::PathBuf;

use treefitch::{
    convert, render, serialize, tree_to_fitch_file, Formula, SerializeError, Tree, TreeBuilder,
    WriterConfig,
};

fn p() -> Formula {
    Formula::atom("P")
}

fn q() -> Formula {
    Formula::atom("Q")
}

/// Premises {P ∧ Q}, conclusion P: a one-branch tree with no lemma
fn conjunction_tree() -> Tree {
    let mut b = TreeBuilder::new();
    b.add_empty_premise();
    let conj = b.add_premise(Formula::and(p(), q()));
    let neg_p = b.add_premise(Formula::not(p()));
    let trunk = b.add_branch(b.root());
    let p_line = b.add_line(trunk, p(), conj);
    b.add_terminator(trunk, [p_line, neg_p]);
    b.finish()
}

/// Premises {P → Q, P}, conclusion Q: needs the Cond lemma
fn conditional_tree() -> Tree {
    let mut b = TreeBuilder::new();
    b.add_empty_premise();
    let p_implies_q = b.add_premise(Formula::cond(p(), q()));
    let p_premise = b.add_premise(p());
    let neg_q = b.add_premise(Formula::not(q()));
    let trunk = b.add_branch(b.root());
    b.split_at(p_implies_q, trunk);
    let left = b.add_branch(trunk);
    let right = b.add_branch(trunk);
    let not_p = b.add_line(left, Formula::not(p()), p_implies_q);
    b.add_terminator(left, [p_premise, not_p]);
    let q_line = b.add_line(right, q(), p_implies_q);
    b.add_terminator(right, [q_line, neg_q]);
    b.finish()
}

/// Independent re-implementation of the checksum measure
fn char_sum(s: &str) -> u64 {
    s.chars().map(|c| c as u64).sum()
}

#[test]
fn test_written_file_has_headers_checksum_and_trailer() {
    let tree = conjunction_tree();
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.prf");
    let config = WriterConfig::default();

    let mut proof = convert(&tree).unwrap();
    serialize(&mut proof, &dest, &config).unwrap();

    let content = fs::read_to_string(&dest).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "3.5.3.24204");
    assert!(
        lines[1].starts_with("linux:")
            || lines[1].starts_with("macs:")
            || lines[1].starts_with("wnds:")
            || lines[1].starts_with("Unknown:")
    );
    assert_eq!(lines[2], "FchF");
    assert_eq!(lines[3], "C1462893784184D1462893817578");
    assert_eq!(lines[4], "newFormat");
    assert_eq!(lines[6], "s=123;");

    // the body opens the nested object notation
    assert!(lines[5].starts_with(
        "=openproof.zen.Openproof{p=openproof.fitch.FitchProofDriver{p=openproof.proofdriver.DRProof{"
    ));

    // checksum recomputed independently from the written file
    let trailer_at = lines[5].rfind("c=").unwrap();
    let body = &lines[5][..trailer_at];
    let written: u64 = lines[5][trailer_at + 2..]
        .trim_end_matches(';')
        .parse()
        .unwrap();
    let expected: u64 = lines[..5].iter().map(|l| char_sum(l)).sum::<u64>() + char_sum(body);
    assert_eq!(written, expected);
}

#[test]
fn test_body_nesting_is_balanced() {
    let tree = conjunction_tree();
    let mut proof = convert(&tree).unwrap();
    let body = render(&mut proof, &WriterConfig::default()).unwrap();
    let opens = body.matches('{').count();
    let closes = body.matches('}').count();
    assert_eq!(opens, closes);
    let parens_open = body.matches('(').count();
    let parens_close = body.matches(')').count();
    assert_eq!(parens_open, parens_close);
}

#[test]
fn test_body_carries_formulas_and_premise_rules() {
    let tree = conjunction_tree();
    let mut proof = convert(&tree).unwrap();
    let body = render(&mut proof, &WriterConfig::default()).unwrap();

    // file-safe formula text
    assert!(body.contains("t=\"P & Q\""));
    assert!(body.contains("t=\"~P\""));
    assert!(body.contains("t=\"^\""));

    // the premise and the assumption both carry the premise rule
    assert_eq!(body.matches("SRPremiseRule").count(), 2);
    assert!(body.contains("OPConjunctionElimRule"));
    assert!(body.contains("OPBottomIntroRule"));
    assert!(body.contains("OPNegationIntroRule"));

    // every line cites the fixed step-info index
    assert!(body.contains("si&13;"));
}

#[test]
fn test_supports_collapse_to_subproofs_and_deduplicate() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Cond.prf"),
        "3.5.3.24204\nlinux:Linux\nFchF\nC1D2\nnewFormat\n=openproof.zen.Openproof{FIXTURE-COND-BODY}c=42;\ns=123;\n",
    )
    .unwrap();
    let config = WriterConfig {
        lemma_dir: dir.path().to_path_buf(),
        ..WriterConfig::default()
    };

    let tree = conditional_tree();
    let mut proof = convert(&tree).unwrap();
    let body = render(&mut proof, &config).unwrap();

    // the lemma splice: name, then the reference file's proof body
    assert!(body.contains("r=openproof.fold.FOLLemmaRule{u=Cond;s=fol;FIXTURE-COND-BODY}"));

    // the ∨ elimination cites each case subproof once (collapsed, trailing
    // dot) and the rewrite disjunction as an ordinary line
    assert!(body.contains("ss=2.3.;"));
    assert!(body.contains("ss=2.4.;"));
    assert!(body.contains("ss=2.2;"));

    // the ¬ introduction cites the whole refutation subproof exactly once,
    // however many of its lines it references
    assert_eq!(body.matches("ss=2.;").count(), 1);

    // an in-subproof contradiction cites its neighbours as ordinary lines
    assert!(body.contains("ss=2.3.0;"));
}

#[test]
fn test_shipped_lemma_files_splice() {
    let lemma_dir = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/lemmas"));
    let config = WriterConfig {
        lemma_dir,
        ..WriterConfig::default()
    };

    let tree = conditional_tree();
    let mut proof = convert(&tree).unwrap();
    let body = render(&mut proof, &config).unwrap();
    assert!(body.contains("r=openproof.fold.FOLLemmaRule{u=Cond;s=fol;"));
    // the splice drops the reference file's own wrapper and trailer
    assert!(!body.contains("}c=0;"));
}

#[test]
fn test_missing_lemma_file_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = WriterConfig {
        lemma_dir: dir.path().join("nowhere"),
        ..WriterConfig::default()
    };
    let dest = dir.path().join("out.prf");

    let tree = conditional_tree();
    let mut proof = convert(&tree).unwrap();
    let result = serialize(&mut proof, &dest, &config);
    assert!(matches!(result, Err(SerializeError::LemmaFile { .. })));
    // nothing half-written
    assert!(!dest.exists());
}

#[test]
fn test_pipeline_driver_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.prf");
    let tree = conjunction_tree();

    let proof = tree_to_fitch_file(&tree, &dest, &WriterConfig::default()).unwrap();
    assert_eq!(proof.goal, Some(p()));
    let content = fs::read_to_string(&dest).unwrap();
    assert!(content.ends_with("s=123;\n"));
}
