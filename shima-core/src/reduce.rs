//! Application of adjacency pairs to the disjoint set.
//!
//! Pairs are either replayed on one thread, or applied by parallel producers
//! that take a single mutex around each `union`. Both paths leave the same
//! partition behind; only the chosen roots may differ.

use std::sync::Mutex;

use rayon::prelude::*;

use crate::{
    disjoint_set::DisjointSet,
    error::{LabelError, Result},
    pairs::CellPair,
};

/// How the union phase consumes the collected pairs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReduceMode {
    /// Replay every pair on the calling thread.
    #[default]
    Sequential,
    /// Apply pairs from parallel producers, serialised by one lock.
    Locked,
}

const LOCK_RESOURCE: &str = "disjoint set";

/// Applies every pair in order and returns how many merges happened.
///
/// # Examples
/// ```
/// use shima_core::{DisjointSet, apply_pairs};
///
/// let mut set = DisjointSet::with_len(3);
/// let merges = apply_pairs(&mut set, &[(0, 1), (1, 0), (1, 2)]);
/// assert_eq!(merges, 2);
/// assert_eq!(set.set_count(), 1);
/// ```
pub fn apply_pairs(set: &mut DisjointSet, pairs: &[CellPair]) -> usize {
    pairs
        .iter()
        .filter(|&&(left, right)| set.union(left, right))
        .count()
}

/// Applies pairs from parallel producers, one `union` per lock acquisition.
///
/// Pairs are split into slices of `batch` entries (at least one) that rayon
/// workers process independently; every slot write happens under the mutex.
///
/// # Errors
/// Returns [`LabelError::LockPoisoned`] if a producer panicked while holding
/// the lock.
pub fn apply_pairs_locked(
    set: &Mutex<DisjointSet>,
    pairs: &[CellPair],
    batch: usize,
) -> Result<usize> {
    pairs
        .par_chunks(batch.max(1))
        .map(|slice| {
            slice.iter().try_fold(0_usize, |merges, &(left, right)| {
                let mut guard = set.lock().map_err(|_| LabelError::LockPoisoned {
                    resource: LOCK_RESOURCE,
                })?;
                Ok(merges + usize::from(guard.union(left, right)))
            })
        })
        .try_reduce(|| 0, |left, right| Ok(left + right))
}

/// Runs the union phase in `mode` and returns the merge count.
///
/// # Errors
/// Returns [`LabelError::LockPoisoned`] when [`ReduceMode::Locked`] hits a
/// poisoned lock.
pub fn reduce(
    set: DisjointSet,
    pairs: &[CellPair],
    mode: ReduceMode,
    batch: usize,
) -> Result<(DisjointSet, usize)> {
    match mode {
        ReduceMode::Sequential => {
            let mut set = set;
            let merges = apply_pairs(&mut set, pairs);
            Ok((set, merges))
        }
        ReduceMode::Locked => {
            let shared = Mutex::new(set);
            let merges = apply_pairs_locked(&shared, pairs, batch)?;
            let set = shared.into_inner().map_err(|_| LabelError::LockPoisoned {
                resource: LOCK_RESOURCE,
            })?;
            Ok((set, merges))
        }
    }
}
