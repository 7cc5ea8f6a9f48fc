use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::encoding::Symbol;
use crate::error::Result;
use crate::myers::{EditGraph, Vertex};

/// The kind of edit step a run is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RunKind {
    /// Diagonal steps: symbols present on both sides
    #[display(fmt = "Equal")]
    Equal,

    /// Vertical steps: symbols only in the new sequence
    #[display(fmt = "Insert")]
    Insert,

    /// Horizontal steps: symbols only in the old sequence
    #[display(fmt = "Delete")]
    Delete,
}

/// A maximal span of same-kind steps together with its symbols
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffRun {
    /// What the steps of this run do
    pub kind: RunKind,

    /// Symbols taken from the old side (equal, delete) or the new side (insert)
    pub symbols: Vec<Symbol>,
}

impl DiffRun {
    /// Create a new run
    pub fn new(kind: RunKind, symbols: Vec<Symbol>) -> Self {
        Self { kind, symbols }
    }

    pub fn equal(symbols: Vec<Symbol>) -> Self {
        Self::new(RunKind::Equal, symbols)
    }

    pub fn insert(symbols: Vec<Symbol>) -> Self {
        Self::new(RunKind::Insert, symbols)
    }

    pub fn delete(symbols: Vec<Symbol>) -> Self {
        Self::new(RunKind::Delete, symbols)
    }

    /// Number of symbols in the run
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of old-side symbols this run consumes
    pub fn old_len(&self) -> usize {
        match self.kind {
            RunKind::Equal | RunKind::Delete => self.len(),
            RunKind::Insert => 0,
        }
    }

    /// Number of new-side symbols this run consumes
    pub fn new_len(&self) -> usize {
        match self.kind {
            RunKind::Equal | RunKind::Insert => self.len(),
            RunKind::Delete => 0,
        }
    }
}

/// Diff two encoded sequences into coalesced runs
///
/// Two empty sequences give an empty list.
pub fn diff(old: &[Symbol], new: &[Symbol]) -> Result<Vec<DiffRun>> {
    diff_bounded(old, new, None)
}

/// Same as [`diff`] with a ceiling on the edit distance
pub fn diff_bounded(
    old: &[Symbol],
    new: &[Symbol],
    max_distance: Option<usize>,
) -> Result<Vec<DiffRun>> {
    let graph = EditGraph::solve(old, new, max_distance)?;
    let path = graph.path()?;
    Ok(build_runs(&path, old, new))
}

/// Classify each step of an edit path and coalesce same-kind steps
///
/// # Panics
///
/// Panics if two consecutive vertices are not one diagonal, horizontal or
/// vertical step apart, or if the path leaves the grid of `old` x `new`.
pub fn build_runs(path: &[Vertex], old: &[Symbol], new: &[Symbol]) -> Vec<DiffRun> {
    let mut runs: Vec<DiffRun> = Vec::new();

    for step in path.windows(2) {
        let (from, to) = (step[0], step[1]);
        let (kind, symbol) = match (to.x.checked_sub(from.x), to.y.checked_sub(from.y)) {
            (Some(1), Some(1)) => (RunKind::Equal, old[from.x]),
            (Some(1), Some(0)) => (RunKind::Delete, old[from.x]),
            (Some(0), Some(1)) => (RunKind::Insert, new[from.y]),
            _ => panic!("malformed edit path step {from:?} -> {to:?}"),
        };

        match runs.last_mut() {
            Some(run) if run.kind == kind => run.symbols.push(symbol),
            _ => runs.push(DiffRun::new(kind, vec![symbol])),
        }
    }

    runs
}

/// Rebuild the old sequence from a run list
pub fn reconstruct_old(runs: &[DiffRun]) -> Vec<Symbol> {
    runs.iter()
        .filter(|run| run.kind != RunKind::Insert)
        .flat_map(|run| run.symbols.iter().copied())
        .collect()
}

/// Rebuild the new sequence from a run list
pub fn reconstruct_new(runs: &[DiffRun]) -> Vec<Symbol> {
    runs.iter()
        .filter(|run| run.kind != RunKind::Delete)
        .flat_map(|run| run.symbols.iter().copied())
        .collect()
}
