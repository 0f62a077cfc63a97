//! Truth-tree input model
//!
//! The tree is read-only input produced by an external loader. Nodes live in
//! arenas owned by [`Tree`] and refer to each other through copyable ids, so
//! back-references like `decomposed_from` are index lookups rather than
//! shared pointers.

use std::fmt;

use crate::logic::Formula;

/// Id of a branch in the tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchId(usize);

/// Id of a line in the tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(usize);

/// What a branch line carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineContent {
    /// The loader's synthetic placeholder (always line 0 of the premise branch)
    Empty,
    /// An ordinary statement line
    Statement(Formula),
    /// A terminator closing the branch by contradiction
    Terminator,
}

/// A single line within a branch
#[derive(Debug, Clone)]
pub struct LineNode {
    pub content: LineContent,
    /// The line whose decomposition produced this one
    pub decomposed_from: Option<LineId>,
    /// Lines justifying this one (a terminator's contradictory pair)
    pub selected_lines: Vec<LineId>,
    /// Branches at which this line's decomposition split the tree
    pub selected_branches: Vec<BranchId>,
    pub is_premise: bool,
}

/// A branch: an ordered run of lines plus its child branches
#[derive(Debug, Clone)]
pub struct BranchNode {
    pub lines: Vec<LineId>,
    pub children: Vec<BranchId>,
    pub parent: Option<BranchId>,
    /// The line that forced this branch into existence, recorded by
    /// [`Tree::record_decompositions`]
    pub decomposed_from: Option<LineId>,
}

/// Error from terminator validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    NotATerminator(LineId),
    BadTerminatorSupport(usize),
    NoAtomInSupport,
    NoNegationInSupport,
    MismatchedPair,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::NotATerminator(_) => {
                write!(f, "line is not a branch terminator")
            }
            TreeError::BadTerminatorSupport(n) => write!(
                f,
                "invalid number of supporting statements for branch termination: {}",
                n
            ),
            TreeError::NoAtomInSupport => write!(
                f,
                "no atomic statement found in branch termination justification"
            ),
            TreeError::NoNegationInSupport => {
                write!(f, "no negation found in branch termination justification")
            }
            TreeError::MismatchedPair => write!(
                f,
                "incorrect atomic statement/negation pair in branch termination justification"
            ),
        }
    }
}

impl std::error::Error for TreeError {}

/// The whole tree. The root branch holds the premises.
#[derive(Debug, Clone)]
pub struct Tree {
    branches: Vec<BranchNode>,
    lines: Vec<LineNode>,
    root: BranchId,
}

impl Tree {
    pub fn root(&self) -> BranchId {
        self.root
    }

    pub fn branch(&self, id: BranchId) -> &BranchNode {
        &self.branches[id.0]
    }

    pub fn line(&self, id: LineId) -> &LineNode {
        &self.lines[id.0]
    }

    /// Record, for every branch, which line caused it to split: one recursive
    /// pass over the whole tree. Runs before any conversion; the converter
    /// relies on every branch already knowing its `decomposed_from`.
    pub fn record_decompositions(&mut self) {
        self.record_branch(self.root);
    }

    fn record_branch(&mut self, branch: BranchId) {
        let line_ids = self.branches[branch.0].lines.clone();
        for line_id in line_ids {
            let targets = self.lines[line_id.0].selected_branches.clone();
            for target in targets {
                self.branches[target.0].decomposed_from = Some(line_id);
            }
        }
        let children = self.branches[branch.0].children.clone();
        for child in children {
            self.record_branch(child);
        }
    }

    /// Check that a terminator is justified by exactly one atomic line and
    /// one line negating that same atomic.
    pub fn verify_terminator(&self, line_id: LineId) -> Result<(), TreeError> {
        let line = self.line(line_id);
        if !matches!(line.content, LineContent::Terminator) {
            return Err(TreeError::NotATerminator(line_id));
        }
        if line.selected_lines.len() != 2 {
            return Err(TreeError::BadTerminatorSupport(line.selected_lines.len()));
        }
        let first = &self.line(line.selected_lines[0]).content;
        let second = &self.line(line.selected_lines[1]).content;
        let (atom, other) = match (first, second) {
            (LineContent::Statement(a @ Formula::Atomic(_)), LineContent::Statement(b)) => (a, b),
            (LineContent::Statement(a), LineContent::Statement(b @ Formula::Atomic(_))) => (b, a),
            _ => return Err(TreeError::NoAtomInSupport),
        };
        match other {
            Formula::Negation(negand) if **negand == *atom => Ok(()),
            Formula::Negation(_) => Err(TreeError::MismatchedPair),
            _ => Err(TreeError::NoNegationInSupport),
        }
    }
}

/// Incremental construction of a [`Tree`], standing in for the external
/// loader. The root branch exists from the start and holds the premises.
#[derive(Debug)]
pub struct TreeBuilder {
    branches: Vec<BranchNode>,
    lines: Vec<LineNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder {
            branches: vec![BranchNode {
                lines: Vec::new(),
                children: Vec::new(),
                parent: None,
                decomposed_from: None,
            }],
            lines: Vec::new(),
        }
    }

    pub fn root(&self) -> BranchId {
        BranchId(0)
    }

    /// The loader's synthetic empty first line of the premise branch
    pub fn add_empty_premise(&mut self) -> LineId {
        self.push_line(BranchId(0), LineContent::Empty, true)
    }

    pub fn add_premise(&mut self, formula: Formula) -> LineId {
        self.push_line(BranchId(0), LineContent::Statement(formula), true)
    }

    /// Add a child branch under `parent`
    pub fn add_branch(&mut self, parent: BranchId) -> BranchId {
        let id = BranchId(self.branches.len());
        self.branches.push(BranchNode {
            lines: Vec::new(),
            children: Vec::new(),
            parent: Some(parent),
            decomposed_from: None,
        });
        self.branches[parent.0].children.push(id);
        id
    }

    /// Add a statement line decomposed from `parent_line`
    pub fn add_line(&mut self, branch: BranchId, formula: Formula, parent_line: LineId) -> LineId {
        let id = self.push_line(branch, LineContent::Statement(formula), false);
        self.lines[id.0].decomposed_from = Some(parent_line);
        id
    }

    /// Close a branch with a terminator justified by a contradictory pair
    pub fn add_terminator(&mut self, branch: BranchId, support: [LineId; 2]) -> LineId {
        let id = self.push_line(branch, LineContent::Terminator, false);
        self.lines[id.0].selected_lines = support.to_vec();
        id
    }

    /// Record that decomposing `line` split the tree at `branch`
    pub fn split_at(&mut self, line: LineId, branch: BranchId) {
        self.lines[line.0].selected_branches.push(branch);
    }

    /// Build the tree and run the decomposition-recording pass
    pub fn finish(self) -> Tree {
        let mut tree = Tree {
            branches: self.branches,
            lines: self.lines,
            root: BranchId(0),
        };
        tree.record_decompositions();
        tree
    }

    fn push_line(&mut self, branch: BranchId, content: LineContent, is_premise: bool) -> LineId {
        let id = LineId(self.lines.len());
        self.lines.push(LineNode {
            content,
            decomposed_from: None,
            selected_lines: Vec::new(),
            selected_branches: Vec::new(),
            is_premise,
        });
        self.branches[branch.0].lines.push(id);
        id
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        TreeBuilder::new()
    }
}
