//! Full path compression once all unions are frozen.
//!
//! After either function returns, every member's parent is its root, so the
//! label pass resolves components with one lookup.

use rayon::prelude::*;

use crate::disjoint_set::{DisjointSet, NO_PARENT};

/// Points every member directly at its root, on the calling thread.
///
/// # Examples
/// ```
/// use shima_core::{DisjointSet, compress_paths};
///
/// let mut set = DisjointSet::with_len(4);
/// set.union(0, 1);
/// set.union(2, 3);
/// set.union(1, 3);
/// compress_paths(&mut set);
/// assert!(set.parents().iter().all(|&parent| parent == set.parents()[0]));
/// ```
pub fn compress_paths(set: &mut DisjointSet) {
    for node in 0..set.len() {
        if set.is_member(node) {
            let root = set.find(node);
            set.set_parent(node, root);
        }
    }
}

/// Resolves every root in parallel with read-only walks, then writes them back.
pub fn compress_paths_parallel(set: &mut DisjointSet) {
    let frozen = &*set;
    let roots: Vec<usize> = (0..frozen.len())
        .into_par_iter()
        .map(|node| {
            if frozen.is_member(node) {
                frozen.root_of(node)
            } else {
                NO_PARENT
            }
        })
        .collect();
    for (node, root) in roots.into_iter().enumerate() {
        if root != NO_PARENT {
            set.set_parent(node, root);
        }
    }
}
