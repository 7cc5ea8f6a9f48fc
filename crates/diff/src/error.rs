use thiserror::Error;

use crate::diff_run::RunKind;
use crate::encoding::Symbol;

/// Errors produced by the diff engine
///
/// None of these are recoverable for the call that produced them: there is
/// no partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// More distinct units than the symbol type can represent
    #[error("cannot encode more than {limit} distinct units")]
    EncodingOverflow { limit: usize },

    /// The edit distance exceeds the configured ceiling
    #[error("edit script is longer than {limit} edits")]
    ScriptTooLong { limit: usize },

    /// Backward reconstruction found no predecessor edge
    #[error("no non-diagonal edge before snake at distance {distance}, diagonal {diagonal}")]
    BrokenEditPath { distance: usize, diagonal: isize },

    /// A symbol with no entry in the decoding table
    #[error("symbol {0} has no decoding")]
    UnknownSymbol(Symbol),

    /// Two consecutive runs of the same non-equal kind
    #[error("run sequence is not coalesced: {previous} followed by {next}")]
    InvalidRunSequence { previous: RunKind, next: RunKind },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DiffError>;
