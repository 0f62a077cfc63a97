//! Verbatim fragments of the proof checker's file notation
//!
//! Every template carries the literal text the checker expects; the values
//! are byte-compatibility constants and must not be edited. `$$$` marks
//! where nested content goes: the text before it is written when the object
//! opens, the text after it when the object closes.

pub const DELIM: &str = "$$$";

// header lines
pub const VERSION: &str = "3.5.3.24204";
pub const LINE3_CONSTANT: &str = "FchF";
pub const TIMESTAMPS: &str = "C1462893784184D1462893817578";
pub const FILE_FORMAT: &str = "newFormat";
pub const OS_TAG_MAC: &str = "macs:";
pub const OS_TAG_WINDOWS: &str = "wnds:";
pub const OS_TAG_LINUX: &str = "linux:";
pub const OS_TAG_UNKNOWN: &str = "Unknown:";

// trailer after the checksum
pub const TRAILER: &str = "s=123;";

// proof body structure
pub const PROOF_OPENING_LINE: &str = "=openproof.zen.Openproof{$$$}";
pub const PROOF_DRIVER: &str = "p=openproof.fitch.FitchProofDriver{$$$}";
pub const PROOF_STARTER: &str = "p=openproof.proofdriver.DRProof{$$$}";
pub const PROOF_SUB_STARTER: &str =
    "openproof.proofdriver.DRProof=openproof.proofdriver.DRProof{$$$}";
pub const PROOF_STEP_INFO: &str =
    "s(openproof.proofdriver.DRStepInfo=openproof.proofdriver.DRStepInfo{$$$})";
pub const PROOF_STEP_INFO_R_DEFAULT: &str = "r&1;";
pub const PROOF_STEP_INFO_R_NORMAL: &str = "r=openproof.foldriver.FOLDriver{t=\"$$$\";}";
pub const PROOF_STEP_INFO_R_LEMMA: &str = "r=openproof.fold.FOLLemmaRule{u=$$$;s=fol;$$$}";

// rule fragments
pub const PROOF_RULE_PROOF_START: &str = "r=openproof.proofdriver.DRProofRule{u=uProof;s=step;}";
pub const PROOF_RULE_PREMISE: &str = "r=openproof.stepdriver.SRPremiseRule{u=uPremise;s=step;}";
pub const PROOF_RULE_NEG_INTRO: &str =
    "r=openproof.fold.OPNegationIntroRule{u=\"u\\254 Intro\";s=fol;}";
pub const PROOF_RULE_NEG_ELIM: &str =
    "r=openproof.fold.OPNegationElimRule{u=\"u\\254 Elim\";s=fol;}";
pub const PROOF_RULE_CONJ_ELIM: &str =
    "r=openproof.fold.OPConjunctionElimRule{u=\"u\\u2227 Elim\";s=fol;}";
pub const PROOF_RULE_DISJ_ELIM: &str =
    "r=openproof.fold.OPDisjunctionElimRule{u=\"u\\u2228 Elim\";s=fol;}";
pub const PROOF_RULE_BICOND_ELIM: &str =
    "r=openproof.fold.OPBiconditionalElimRule{u=\"u\\u2194 Elim\";s=fol;}";
pub const PROOF_RULE_CONTR_INTRO: &str =
    "r=openproof.fold.OPBottomIntroRule{u=\"u\\u22A5 Intro\";s=fol;}";

// status objects
pub const PROOF_OBJECT_PROOF_START: &str =
    "o=openproof.zen.proofdriver.OPDStatusObject{c=1;s=\"\";l=\"\";d@k=\"\";t=false;}";
pub const PROOF_OBJECT_SUBPROOF_START: &str = "o&6;";
pub const PROOF_OBJECT_NORMAL_LINE: &str =
    "o=openproof.fold.FOLRuleStatus{c=1;s=\"\";l=\"\";d@k=\"\";t=false;f=1;}";

// support references
pub const PROOF_SUPPORT: &str = "u=openproof.proofdriver.DRSupport{t($$$)}";
pub const PROOF_SUPPORT_STEP: &str =
    "openproof.proofdriver.DRSupportPack=openproof.proofdriver.DRSupportPack{si&$$$;ss=$$$;sb=false;}";

pub const PROOF_B: &str = "b()";
pub const PROOF_F: &str = "f($$$)";
pub const PROOF_SIMPLE_STEP: &str =
    "openproof.proofdriver.DRSimpleStep=openproof.proofdriver.DRSimpleStep{$$$}";
pub const PROOF_GOAL: &str = "g=openproof.proofdriver.DRGoalList{g()}";
pub const PROOF_A: &str = "a=true;";

// lemma reference files: body sits between these two markers on line 6
pub const LEMMA_BODY_OPEN: &str = "=openproof.zen.Openproof{";
pub const LEMMA_BODY_END: &str = "}c=";
