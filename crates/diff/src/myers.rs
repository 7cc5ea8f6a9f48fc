//! Myers shortest edit script over encoded sequences
//!
//! Greedy forward pass as in Myers, "An O(ND) Difference Algorithm and Its
//! Variations" (1986), keeping the frontier of every distance level so the
//! path can be walked back afterwards. Time and space are O((N+M)·D).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::encoding::Symbol;
use crate::error::{DiffError, Result};

/// A point of the edit graph: `x` symbols of old and `y` symbols of new consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    pub x: usize,
    pub y: usize,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Furthest-reaching x per diagonal for one distance level
///
/// Level `d` only has diagonals `-d, -d + 2, ..., d`, stored densely.
#[derive(Debug, Clone)]
struct Frontier {
    distance: usize,
    xs: Vec<usize>,
}

impl Frontier {
    fn slot(&self, k: isize) -> Option<usize> {
        let d = self.distance as isize;
        if k < -d || k > d || (k + d) % 2 != 0 {
            return None;
        }
        Some(((k + d) / 2) as usize)
    }

    fn get(&self, k: isize) -> Option<usize> {
        self.slot(k).and_then(|slot| self.xs.get(slot).copied())
    }

    /// Value on a diagonal the forward pass has already filled
    fn at(&self, k: isize) -> usize {
        debug_assert!(self.slot(k).is_some(), "diagonal {k} outside level {}", self.distance);
        self.xs[((k + self.distance as isize) / 2) as usize]
    }
}

/// The explored edit graph of two sequences
///
/// Built by [`EditGraph::solve`]; the shortest path is recovered on demand
/// with [`EditGraph::path`].
#[derive(Debug, Clone)]
pub struct EditGraph<'a> {
    old: &'a [Symbol],
    new: &'a [Symbol],
    history: Vec<Frontier>,
}

impl<'a> EditGraph<'a> {
    /// Run the forward pass until the end vertex is reached
    ///
    /// `max_distance` caps the edit distance; `None` leaves only the natural
    /// `N + M` bound.
    pub fn solve(old: &'a [Symbol], new: &'a [Symbol], max_distance: Option<usize>) -> Result<Self> {
        let (n, m) = (old.len(), new.len());
        let bound = n + m;
        let limit = max_distance.map_or(bound, |ceiling| ceiling.min(bound));

        let mut history: Vec<Frontier> = Vec::new();

        for d in 0..=limit {
            let di = d as isize;
            let mut xs = Vec::with_capacity(d + 1);
            let mut reached = false;

            for k in (-di..=di).step_by(2) {
                let start = match history.last() {
                    None => 0,
                    Some(prev) => {
                        if k == -di {
                            // only reachable from k+1, an insertion
                            prev.at(k + 1)
                        } else if k == di {
                            // only reachable from k-1, a deletion
                            prev.at(k - 1) + 1
                        } else {
                            // ties go to the deletion
                            let x_del = prev.at(k - 1);
                            let x_ins = prev.at(k + 1);
                            if x_del >= x_ins {
                                x_del + 1
                            } else {
                                x_ins
                            }
                        }
                    }
                };

                let x = follow_snake(old, new, start, k);
                xs.push(x);

                if x >= n && diagonal_y(x, k) >= m as isize {
                    reached = true;
                    break;
                }
            }

            history.push(Frontier { distance: d, xs });

            if reached {
                log::debug!(
                    "myers: {} x {} symbols, edit distance {}",
                    n,
                    m,
                    d
                );
                return Ok(Self { old, new, history });
            }
        }

        log::debug!("myers: gave up after {} levels ({} x {} symbols)", history.len(), n, m);
        Err(DiffError::ScriptTooLong { limit })
    }

    /// The minimal number of insertions plus deletions
    pub fn distance(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    /// Number of frontier levels kept for reconstruction
    pub fn levels(&self) -> usize {
        self.history.len()
    }

    /// Walk the history backwards and return the path from `(0, 0)` to `(N, M)`
    ///
    /// Every consecutive pair of vertices differs by exactly one diagonal,
    /// horizontal or vertical step.
    pub fn path(&self) -> Result<Vec<Vertex>> {
        let (n, m) = (self.old.len(), self.new.len());
        let mut d = self.distance();
        let mut k = n as isize - m as isize;
        let mut reversed = Vec::with_capacity(n + m + 1);

        loop {
            let broken = DiffError::BrokenEditPath {
                distance: d,
                diagonal: k,
            };
            let end_x = self.history[d].get(k).ok_or(broken.clone())?;
            let end_y = usize::try_from(diagonal_y(end_x, k)).map_err(|_| broken.clone())?;
            let prev = d.checked_sub(1).map(|p| &self.history[p]);

            // The snake must stop where the non-diagonal edge enters it,
            // otherwise the edge lands at the wrong place.
            let (mut x, mut y) = (end_x, end_y);
            let mut snake = 0;
            let mut entry = None;
            while x >= 1 && y >= 1 && self.old[x - 1] == self.new[y - 1] {
                if let Some(prev) = prev {
                    if enters_vertically(prev, k, x, y) || enters_horizontally(prev, k, x) {
                        entry = Some(snake);
                    }
                }
                snake += 1;
                x -= 1;
                y -= 1;
            }
            let snake = entry.unwrap_or(snake);
            let (x, y) = (end_x - snake, end_y - snake);

            for i in (1..=snake).rev() {
                reversed.push(Vertex::new(x + i, y + i));
            }

            let Some(prev) = prev else {
                if x != 0 || y != 0 {
                    return Err(broken);
                }
                break;
            };

            if enters_vertically(prev, k, x, y) {
                k += 1;
            } else if enters_horizontally(prev, k, x) {
                k -= 1;
            } else {
                return Err(broken);
            }
            reversed.push(Vertex::new(x, y));
            d -= 1;
        }

        reversed.push(Vertex::new(0, 0));
        reversed.reverse();
        Ok(reversed)
    }
}

fn follow_snake(old: &[Symbol], new: &[Symbol], start: usize, k: isize) -> usize {
    let mut x = start;
    let mut y = diagonal_y(x, k);
    while x < old.len() && y >= 0 && (y as usize) < new.len() && old[x] == new[y as usize] {
        x += 1;
        y += 1;
    }
    x
}

fn diagonal_y(x: usize, k: isize) -> isize {
    x as isize - k
}

/// `(x, y - 1)` on diagonal `k + 1` was reached at the previous level
fn enters_vertically(prev: &Frontier, k: isize, x: usize, y: usize) -> bool {
    y > 0 && prev.get(k + 1) == Some(x)
}

/// `(x - 1, y)` on diagonal `k - 1` was reached at the previous level
fn enters_horizontally(prev: &Frontier, k: isize, x: usize) -> bool {
    x > 0 && prev.get(k - 1) == Some(x - 1)
}
