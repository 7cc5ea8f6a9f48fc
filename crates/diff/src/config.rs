#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tuning constants deciding when a delete/insert pair is too dissimilar
/// to be shown as one modification
///
/// These only affect presentation, never correctness.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RefinementHeuristic {
    /// More isolated single-symbol matches than this may reject a merge
    pub isolated_match_limit: usize,

    /// ...provided they make up at least this fraction of all symbols
    pub isolated_match_ratio: f64,

    /// Texts sharing no symbol are merged only up to this many symbols
    pub unrelated_text_limit: usize,
}

impl Default for RefinementHeuristic {
    fn default() -> Self {
        Self {
            isolated_match_limit: 3,
            isolated_match_ratio: 0.03,
            unrelated_text_limit: 3,
        }
    }
}

/// Configuration for a diff computation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffConfig {
    /// Ceiling on the edit distance, applied to every solver run
    pub max_edit_distance: Option<usize>,

    /// Whether adjacent delete/insert runs are refined into modifications
    pub refine: bool,

    /// Similarity heuristic used by refinement
    pub heuristic: RefinementHeuristic,

    /// Refine independent delete/insert pairs on the rayon pool
    pub parallel: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: None,
            refine: true,
            heuristic: RefinementHeuristic::default(),
            parallel: false,
        }
    }
}

impl DiffConfig {
    /// Set the edit distance ceiling
    pub fn max_edit_distance(mut self, max_edit_distance: Option<usize>) -> Self {
        self.max_edit_distance = max_edit_distance;
        self
    }

    /// Enable or disable refinement
    pub fn refine(mut self, refine: bool) -> Self {
        self.refine = refine;
        self
    }

    /// Set the similarity heuristic
    pub fn heuristic(mut self, heuristic: RefinementHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Refine pairs in parallel
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
