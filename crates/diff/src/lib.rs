// Myers diff engine over interned line and character sequences
// This crate computes minimal line diffs and refines changed lines into character diffs

mod config;
mod diff_run;
mod encoding;
mod error;
mod myers;
mod refine;
mod text_diff;

pub use config::{DiffConfig, RefinementHeuristic};
pub use diff_run::{build_runs, diff, diff_bounded, reconstruct_new, reconstruct_old, DiffRun, RunKind};
pub use encoding::{decode_chars, encode, encode_chars, DecodingTable, Encoding, Symbol};
pub use error::{DiffError, Result};
pub use myers::{EditGraph, Vertex};
pub use refine::{refine, refine_with, ModifiedRun, RefinedRun, Similarity};
pub use text_diff::{DiffStats, LineDiff, TextDiff};
