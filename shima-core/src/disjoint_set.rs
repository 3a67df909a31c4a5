//! Array-backed union-find over raster cells.
//!
//! Foreground cells start as their own root; background cells hold the
//! [`NO_PARENT`] sentinel and never take part in a union. `find` uses
//! iterative path halving and `union` attaches by rank, so the structure never
//! allocates after construction.

use crate::raster::{FOREGROUND, RasterView};

/// Parent value of a cell that belongs to no component.
pub const NO_PARENT: usize = usize::MAX;

/// Union-find with union-by-rank and path halving.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Seeds one element per raster cell.
    ///
    /// # Examples
    /// ```
    /// use shima_core::{DisjointSet, NO_PARENT, RasterView};
    ///
    /// let cells = [1, 0];
    /// let view = RasterView::try_new(&cells, 2, 1)?;
    /// let set = DisjointSet::for_raster(&view);
    /// assert_eq!(set.parents(), &[0, NO_PARENT]);
    /// # Ok::<(), shima_core::RasterError>(())
    /// ```
    #[must_use]
    pub fn for_raster(view: &RasterView<'_>) -> Self {
        let parent = view
            .cells()
            .iter()
            .enumerate()
            .map(|(index, &cell)| if cell == FOREGROUND { index } else { NO_PARENT })
            .collect();
        Self {
            parent,
            rank: vec![0; view.len()],
        }
    }

    /// Seeds `len` elements, each its own root.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    /// Number of elements, members or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` when the set tracks no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns `true` when `node` belongs to some component.
    #[must_use]
    pub fn is_member(&self, node: usize) -> bool {
        self.parent.get(node).is_some_and(|&parent| parent != NO_PARENT)
    }

    /// Raw parent pointers, with [`NO_PARENT`] for non-members.
    #[must_use]
    pub fn parents(&self) -> &[usize] {
        &self.parent
    }

    /// Number of disjoint sets among member elements.
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.parent
            .iter()
            .enumerate()
            .filter(|(node, parent)| *node == **parent)
            .count()
    }

    /// Returns the root of `node`, halving the path on the way up.
    ///
    /// `node` must be a member; callers only pass foreground cells.
    pub fn find(&mut self, node: usize) -> usize {
        debug_assert!(self.is_member(node), "find called on non-member {node}");
        let mut current = node;
        loop {
            let parent = self.parent[current];
            if parent == current {
                return current;
            }
            let grandparent = self.parent[parent];
            self.parent[current] = grandparent;
            current = grandparent;
        }
    }

    /// Returns the root of `node` without touching the structure.
    ///
    /// Used when many readers resolve roots at once, after unions are frozen.
    #[must_use]
    pub fn root_of(&self, node: usize) -> usize {
        debug_assert!(self.is_member(node), "root_of called on non-member {node}");
        let mut current = node;
        loop {
            let parent = self.parent[current];
            if parent == current {
                return current;
            }
            current = parent;
        }
    }

    /// Merges the sets containing `left` and `right`.
    ///
    /// The lower-rank root goes under the higher-rank one. On a rank tie the
    /// right root goes under the left root, which gains one rank. Returns
    /// `true` when two distinct sets were merged.
    ///
    /// # Examples
    /// ```
    /// use shima_core::DisjointSet;
    ///
    /// let mut set = DisjointSet::with_len(3);
    /// assert!(set.union(0, 1));
    /// assert!(!set.union(1, 0));
    /// assert_eq!(set.find(1), 0);
    /// assert_eq!(set.set_count(), 2);
    /// ```
    pub fn union(&mut self, left: usize, right: usize) -> bool {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return false;
        }
        let left_rank = self.rank[left_root];
        let right_rank = self.rank[right_root];
        if left_rank < right_rank {
            self.parent[left_root] = right_root;
        } else {
            self.parent[right_root] = left_root;
            if left_rank == right_rank {
                self.rank[left_root] = left_rank.saturating_add(1);
            }
        }
        true
    }

    /// Points `node` straight at `root`. Only the path compressor calls this.
    pub(crate) fn set_parent(&mut self, node: usize, root: usize) {
        debug_assert!(self.is_member(node));
        self.parent[node] = root;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::test_utils::view;

    #[test]
    fn for_raster_marks_background_with_sentinel() {
        let cells = [1, 0, 0, 1];
        let set = DisjointSet::for_raster(&view(&cells, 2, 2));
        assert_eq!(set.parents(), &[0, NO_PARENT, NO_PARENT, 3]);
        assert!(set.is_member(0));
        assert!(!set.is_member(1));
        assert!(!set.is_member(4));
        assert_eq!(set.set_count(), 2);
    }

    #[test]
    fn union_tie_attaches_right_under_left() {
        let mut set = DisjointSet::with_len(2);
        assert!(set.union(0, 1));
        assert_eq!(set.parents(), &[0, 0]);
    }

    #[test]
    fn union_attaches_lower_rank_under_higher_rank() {
        let mut set = DisjointSet::with_len(3);
        set.union(1, 2);
        // Root 1 has rank 1, root 0 has rank 0: 0 must move under 1.
        set.union(0, 1);
        assert_eq!(set.find(0), 1);
        assert_eq!(set.find(2), 1);
    }

    #[test]
    fn find_halves_long_paths() {
        let mut set = DisjointSet::with_len(5);
        // Build a chain 4 -> 3 -> 2 -> 1 -> 0 by hand.
        for node in 1..5 {
            set.parent[node] = node - 1;
        }
        assert_eq!(set.find(4), 0);
        assert_eq!(set.parents(), &[0, 0, 0, 2, 2]);
    }

    #[test]
    fn root_of_does_not_mutate() {
        let mut set = DisjointSet::with_len(4);
        for node in 1..4 {
            set.parent[node] = node - 1;
        }
        let before = set.clone();
        assert_eq!(set.root_of(3), 0);
        assert_eq!(set, before);
    }

    #[rstest]
    #[case::forward(&[(0, 1), (1, 2), (3, 4)])]
    #[case::reversed(&[(4, 3), (2, 1), (1, 0)])]
    #[case::duplicated(&[(0, 1), (1, 0), (0, 1), (1, 2), (2, 1), (3, 4), (4, 3)])]
    fn partition_is_independent_of_union_order(#[case] pairs: &[(usize, usize)]) {
        let mut set = DisjointSet::with_len(6);
        for &(left, right) in pairs {
            set.union(left, right);
        }
        let roots: Vec<usize> = (0..6).map(|node| set.find(node)).collect();
        assert_eq!(roots[0], roots[1]);
        assert_eq!(roots[1], roots[2]);
        assert_eq!(roots[3], roots[4]);
        assert_ne!(roots[0], roots[3]);
        assert_ne!(roots[0], roots[5]);
        assert_ne!(roots[3], roots[5]);
        assert_eq!(set.set_count(), 3);
    }
}
