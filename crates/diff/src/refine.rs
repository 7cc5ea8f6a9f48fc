//! Turning adjacent delete/insert runs into character-level modifications
//!
//! A line-level diff shows a changed line as one deleted and one inserted
//! line. When the two texts are close enough, the pair is replaced by a
//! single [`ModifiedRun`] carrying a character diff of the joined texts.

use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{DiffConfig, RefinementHeuristic};
use crate::diff_run::{diff_bounded, reconstruct_new, reconstruct_old, DiffRun, RunKind};
use crate::encoding::{decode_chars, encode_chars, Symbol};
use crate::error::{DiffError, Result};

/// One entry of a refined diff
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RefinedRun {
    /// A line-level run passed through unchanged
    Run(DiffRun),

    /// A delete/insert pair judged similar
    Modified(ModifiedRun),
}

impl RefinedRun {
    /// Check if this entry changes anything
    pub fn has_changes(&self) -> bool {
        !matches!(self, RefinedRun::Run(run) if run.kind == RunKind::Equal)
    }

    pub fn as_run(&self) -> Option<&DiffRun> {
        match self {
            RefinedRun::Run(run) => Some(run),
            RefinedRun::Modified(_) => None,
        }
    }

    pub fn as_modified(&self) -> Option<&ModifiedRun> {
        match self {
            RefinedRun::Run(_) => None,
            RefinedRun::Modified(modified) => Some(modified),
        }
    }
}

/// A delete run and an insert run with the character diff between them
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModifiedRun {
    /// The line-level delete run
    pub deleted: DiffRun,

    /// The line-level insert run
    pub inserted: DiffRun,

    /// Character-level runs from the deleted text to the inserted text
    pub sub_runs: Vec<DiffRun>,
}

impl ModifiedRun {
    /// The deleted text as rebuilt from the character runs
    pub fn old_text(&self) -> Result<String> {
        decode_chars(&reconstruct_old(&self.sub_runs))
    }

    /// The inserted text as rebuilt from the character runs
    pub fn new_text(&self) -> Result<String> {
        decode_chars(&reconstruct_new(&self.sub_runs))
    }
}

/// Counts the refinement heuristic is evaluated on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Similarity {
    /// Equal runs of exactly one symbol
    pub isolated_matches: usize,

    /// Symbols inside equal runs
    pub equal_symbols: usize,

    /// Symbols across all runs
    pub total_symbols: usize,
}

impl Similarity {
    pub fn measure(runs: &[DiffRun]) -> Self {
        runs.iter().fold(Self::default(), |mut acc, run| {
            if run.kind == RunKind::Equal {
                acc.equal_symbols += run.len();
                if run.len() == 1 {
                    acc.isolated_matches += 1;
                }
            }
            acc.total_symbols += run.len();
            acc
        })
    }
}

impl RefinementHeuristic {
    /// Check if a character diff is too noisy to present as one modification
    pub fn rejects(&self, similarity: &Similarity) -> bool {
        let scattered = similarity.isolated_matches > self.isolated_match_limit
            && similarity.isolated_matches as f64
                >= self.isolated_match_ratio * similarity.total_symbols as f64;
        let unrelated = similarity.equal_symbols == 0
            && similarity.total_symbols > self.unrelated_text_limit;
        scattered || unrelated
    }
}

/// Refine line runs with the default configuration
///
/// `join` turns the symbols of a run back into the text the character diff
/// runs on, e.g. [`DecodingTable::join_lines`](crate::DecodingTable::join_lines).
pub fn refine<F>(runs: &[DiffRun], join: F) -> Result<Vec<RefinedRun>>
where
    F: Fn(&[Symbol]) -> Result<String> + Sync,
{
    refine_with(runs, join, &DiffConfig::default())
}

/// Refine line runs with an explicit configuration
pub fn refine_with<F>(runs: &[DiffRun], join: F, config: &DiffConfig) -> Result<Vec<RefinedRun>>
where
    F: Fn(&[Symbol]) -> Result<String> + Sync,
{
    let mut pairing = Pairing::default();
    for run in runs {
        pairing.feed(run.clone())?;
    }
    let slots = pairing.finish();

    let resolve = |slot: Slot| -> Result<Vec<RefinedRun>> {
        match slot {
            Slot::Done(run) => Ok(vec![run]),
            Slot::Pair(pair) => merge(pair, &join, config),
        }
    };

    let resolved: Vec<Vec<RefinedRun>> = if config.parallel {
        slots.into_par_iter().map(resolve).collect::<Result<_>>()?
    } else {
        slots.into_iter().map(resolve).collect::<Result<_>>()?
    };

    Ok(resolved.into_iter().flatten().collect())
}

fn merge<F>(pair: Pair, join: &F, config: &DiffConfig) -> Result<Vec<RefinedRun>>
where
    F: Fn(&[Symbol]) -> Result<String>,
{
    let old_text = join(pair.deleted.symbols.as_slice())?;
    let new_text = join(pair.inserted.symbols.as_slice())?;
    let (old, new) = (encode_chars(&old_text), encode_chars(&new_text));
    let sub_runs = diff_bounded(&old, &new, config.max_edit_distance)?;

    let similarity = Similarity::measure(&sub_runs);
    if config.heuristic.rejects(&similarity) {
        log::trace!("refine: keeping pair apart ({:?})", similarity);
        return Ok(pair.into_runs());
    }

    log::trace!("refine: merged pair into modification ({:?})", similarity);
    Ok(vec![RefinedRun::Modified(ModifiedRun {
        deleted: pair.deleted,
        inserted: pair.inserted,
        sub_runs,
    })])
}

/// A delete run and an insert run met back to back
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pair {
    deleted: DiffRun,
    inserted: DiffRun,
    insert_first: bool,
}

impl Pair {
    fn into_runs(self) -> Vec<RefinedRun> {
        let (first, second) = if self.insert_first {
            (self.inserted, self.deleted)
        } else {
            (self.deleted, self.inserted)
        };
        vec![RefinedRun::Run(first), RefinedRun::Run(second)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Done(RefinedRun),
    Pair(Pair),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Pending {
    #[default]
    Idle,
    Delete(DiffRun),
    Insert(DiffRun),
}

/// Line-level scan pairing each delete run with an adjacent insert run
#[derive(Debug, Default)]
struct Pairing {
    slots: Vec<Slot>,
    pending: Pending,
}

impl Pairing {
    fn feed(&mut self, run: DiffRun) -> Result<()> {
        match (std::mem::take(&mut self.pending), run.kind) {
            (pending, RunKind::Equal) => {
                self.flush(pending);
                self.slots.push(Slot::Done(RefinedRun::Run(run)));
            }
            (Pending::Idle, RunKind::Delete) => self.pending = Pending::Delete(run),
            (Pending::Idle, RunKind::Insert) => self.pending = Pending::Insert(run),
            (Pending::Delete(deleted), RunKind::Insert) => self.slots.push(Slot::Pair(Pair {
                deleted,
                inserted: run,
                insert_first: false,
            })),
            (Pending::Insert(inserted), RunKind::Delete) => self.slots.push(Slot::Pair(Pair {
                deleted: run,
                inserted,
                insert_first: true,
            })),
            (Pending::Delete(_), kind @ RunKind::Delete)
            | (Pending::Insert(_), kind @ RunKind::Insert) => {
                return Err(DiffError::InvalidRunSequence {
                    previous: kind,
                    next: kind,
                });
            }
        }
        Ok(())
    }

    fn flush(&mut self, pending: Pending) {
        match pending {
            Pending::Idle => {}
            Pending::Delete(run) | Pending::Insert(run) => {
                self.slots.push(Slot::Done(RefinedRun::Run(run)))
            }
        }
    }

    fn finish(mut self) -> Vec<Slot> {
        let pending = std::mem::take(&mut self.pending);
        self.flush(pending);
        self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn done(run: DiffRun) -> Slot {
        Slot::Done(RefinedRun::Run(run))
    }

    #[test]
    fn test_equal_flushes_pending() {
        let mut pairing = Pairing::default();
        pairing.feed(DiffRun::delete(vec![1])).unwrap();
        assert_eq!(pairing.pending, Pending::Delete(DiffRun::delete(vec![1])));

        pairing.feed(DiffRun::equal(vec![2])).unwrap();
        assert_eq!(pairing.pending, Pending::Idle);
        assert_eq!(
            pairing.finish(),
            vec![done(DiffRun::delete(vec![1])), done(DiffRun::equal(vec![2]))]
        );
    }

    #[test]
    fn test_opposite_kinds_pair_up() {
        let mut pairing = Pairing::default();
        pairing.feed(DiffRun::insert(vec![1])).unwrap();
        pairing.feed(DiffRun::delete(vec![2])).unwrap();
        assert_eq!(pairing.pending, Pending::Idle);

        // a third change run starts a new pending state
        pairing.feed(DiffRun::insert(vec![3])).unwrap();

        assert_eq!(
            pairing.finish(),
            vec![
                Slot::Pair(Pair {
                    deleted: DiffRun::delete(vec![2]),
                    inserted: DiffRun::insert(vec![1]),
                    insert_first: true,
                }),
                done(DiffRun::insert(vec![3])),
            ]
        );
    }

    #[test]
    fn test_same_kind_twice_is_rejected() {
        let mut pairing = Pairing::default();
        pairing.feed(DiffRun::delete(vec![1])).unwrap();

        assert_eq!(
            pairing.feed(DiffRun::delete(vec![2])).unwrap_err(),
            DiffError::InvalidRunSequence {
                previous: RunKind::Delete,
                next: RunKind::Delete,
            }
        );
    }

    #[test]
    fn test_similarity_counts() {
        let runs = vec![
            DiffRun::equal(vec![1, 2, 3]),
            DiffRun::delete(vec![4]),
            DiffRun::equal(vec![5]),
            DiffRun::insert(vec![6, 7]),
            DiffRun::equal(vec![8]),
        ];

        assert_eq!(
            Similarity::measure(&runs),
            Similarity {
                isolated_matches: 2,
                equal_symbols: 5,
                total_symbols: 8,
            }
        );
    }

    #[test]
    fn test_heuristic_thresholds() {
        let heuristic = RefinementHeuristic::default();
        let scattered = |isolated, total| Similarity {
            isolated_matches: isolated,
            equal_symbols: isolated,
            total_symbols: total,
        };

        // at most three isolated matches never rejects
        assert!(!heuristic.rejects(&scattered(3, 10)));
        // four isolated matches in 100 symbols is above 3%
        assert!(heuristic.rejects(&scattered(4, 100)));
        // ...but not in 200 symbols
        assert!(!heuristic.rejects(&scattered(4, 200)));

        let unrelated = |total| Similarity {
            isolated_matches: 0,
            equal_symbols: 0,
            total_symbols: total,
        };
        assert!(!heuristic.rejects(&unrelated(2)));
        assert!(heuristic.rejects(&unrelated(20)));
    }
}
