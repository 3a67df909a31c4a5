//! Result types for labelling runs.
//!
//! A [`Labelling`] owns the label grid produced by one run together with the
//! component count, and offers the per-component summaries callers usually
//! want next to the raw labels.

use thiserror::Error;

/// Output of a [`crate::Labeller`] run.
///
/// Labels are row-major, `0` for background and `1..=K` for the `K`
/// components.
///
/// # Examples
/// ```
/// use shima_core::label;
///
/// let labelling = label(&[1, 0, 0, 0, 0, 1], 3, 2)?;
/// assert_eq!(labelling.labels(), &[1, 0, 0, 0, 0, 2]);
/// assert_eq!(labelling.component_count(), 2);
/// # Ok::<(), shima_core::LabelError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labelling {
    width: usize,
    height: usize,
    labels: Vec<u32>,
    component_count: u32,
}

/// Error returned when a label grid is not a dense labelling of its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NonDenseLabels {
    /// The labels skip a value in `1..=K`.
    #[error("labels must be dense from 1; label {missing} is missing")]
    Gap {
        /// Smallest positive label that does not occur.
        missing: u64,
    },
    /// The grid length does not equal `width * height`.
    #[error("{len} labels cannot fill a {width}x{height} grid")]
    ShapeMismatch {
        /// Requested column count.
        width: usize,
        /// Requested row count.
        height: usize,
        /// Number of labels supplied.
        len: usize,
    },
    /// `width * height` does not fit in `usize`.
    #[error("a {width}x{height} grid exceeds the addressable size")]
    Overflow {
        /// Requested column count.
        width: usize,
        /// Requested row count.
        height: usize,
    },
}

impl Labelling {
    pub(crate) fn from_dense(
        width: usize,
        height: usize,
        labels: Vec<u32>,
        component_count: u32,
    ) -> Self {
        debug_assert_eq!(labels.len(), width * height);
        Self {
            width,
            height,
            labels,
            component_count,
        }
    }

    /// Builds a labelling from an explicit label grid.
    ///
    /// # Errors
    /// Returns [`NonDenseLabels::Overflow`] when the shape overflows,
    /// [`NonDenseLabels::ShapeMismatch`] when `labels` has the wrong length,
    /// and [`NonDenseLabels::Gap`] when the non-zero labels are not exactly
    /// `1..=K`.
    ///
    /// # Examples
    /// ```
    /// use shima_core::{Labelling, NonDenseLabels};
    ///
    /// let ok = Labelling::try_from_labels(2, 1, vec![2, 1]).expect("dense labels");
    /// assert_eq!(ok.component_count(), 2);
    ///
    /// let err = Labelling::try_from_labels(2, 1, vec![0, 2]).expect_err("label 1 missing");
    /// assert_eq!(err, NonDenseLabels::Gap { missing: 1 });
    /// ```
    pub fn try_from_labels(
        width: usize,
        height: usize,
        labels: Vec<u32>,
    ) -> Result<Self, NonDenseLabels> {
        let expected = width
            .checked_mul(height)
            .ok_or(NonDenseLabels::Overflow { width, height })?;
        if labels.len() != expected {
            return Err(NonDenseLabels::ShapeMismatch {
                width,
                height,
                len: labels.len(),
            });
        }

        // At most `len` distinct labels can occur, so anything larger leaves a gap.
        let mut seen = vec![false; labels.len() + 2];
        let mut max = 0_u32;
        for &label in &labels {
            max = max.max(label);
            if let Some(slot) = seen.get_mut(label as usize) {
                *slot = true;
            }
        }
        if let Some(missing) =
            (1..=max as usize).find(|&label| !seen.get(label).copied().unwrap_or(false))
        {
            return Err(NonDenseLabels::Gap {
                missing: missing as u64,
            });
        }

        Ok(Self {
            width,
            height,
            labels,
            component_count: max,
        })
    }

    /// Row-major labels.
    #[must_use]
    #[rustfmt::skip]
    pub fn labels(&self) -> &[u32] { &self.labels }

    /// Consumes the labelling and returns the label grid.
    #[must_use]
    pub fn into_labels(self) -> Vec<u32> {
        self.labels
    }

    /// Number of columns.
    #[must_use]
    #[rustfmt::skip]
    pub fn width(&self) -> usize { self.width }

    /// Number of rows.
    #[must_use]
    #[rustfmt::skip]
    pub fn height(&self) -> usize { self.height }

    /// Number of components, which is also the largest label.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> u32 { self.component_count }

    /// Label at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn label_at(&self, row: usize, col: usize) -> Option<u32> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.labels.get(row * self.width + col).copied()
    }

    /// Cell count per component; entry `k` belongs to label `k + 1`.
    ///
    /// # Examples
    /// ```
    /// use shima_core::label;
    ///
    /// // (1, 1) touches the top pair; (3, 2) stands alone.
    /// let labelling = label(&[1, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0], 4, 4)?;
    /// assert_eq!(labelling.component_sizes(), vec![3, 1]);
    /// # Ok::<(), shima_core::LabelError>(())
    /// ```
    #[must_use]
    pub fn component_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.component_count as usize];
        for &label in self.labels.iter().filter(|&&label| label != 0) {
            sizes[label as usize - 1] += 1;
        }
        sizes
    }

    /// Size and bounding box of every component, ordered by label.
    #[must_use]
    pub fn component_stats(&self) -> Vec<ComponentStats> {
        let mut stats: Vec<Option<ComponentStats>> = vec![None; self.component_count as usize];
        for (index, &label) in self.labels.iter().enumerate() {
            if label == 0 {
                continue;
            }
            let row = index / self.width;
            let col = index % self.width;
            let component = stats[label as usize - 1].get_or_insert(ComponentStats {
                label,
                cell_count: 0,
                bounds: BoundingBox::at(row, col),
            });
            component.cell_count += 1;
            component.bounds.include(row, col);
        }
        stats.into_iter().flatten().collect()
    }

    /// Returns `true` when both labellings group exactly the same cells,
    /// whatever numbers the components received.
    ///
    /// # Examples
    /// ```
    /// use shima_core::Labelling;
    ///
    /// let left = Labelling::try_from_labels(3, 1, vec![1, 0, 2]).expect("dense");
    /// let right = Labelling::try_from_labels(3, 1, vec![2, 0, 1]).expect("dense");
    /// assert!(left.same_partition(&right));
    /// ```
    #[must_use]
    pub fn same_partition(&self, other: &Self) -> bool {
        if self.width != other.width
            || self.height != other.height
            || self.component_count != other.component_count
        {
            return false;
        }
        let slots = self.component_count as usize + 1;
        let mut forward = vec![None; slots];
        let mut backward = vec![None; slots];
        self.labels
            .iter()
            .zip(&other.labels)
            .all(|(&left, &right)| {
                if (left == 0) != (right == 0) {
                    return false;
                }
                let forward_ok = *forward[left as usize].get_or_insert(right) == right;
                let backward_ok = *backward[right as usize].get_or_insert(left) == left;
                forward_ok && backward_ok
            })
    }
}

/// Inclusive cell bounds of one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Topmost row.
    pub min_row: usize,
    /// Leftmost column.
    pub min_col: usize,
    /// Bottom row.
    pub max_row: usize,
    /// Rightmost column.
    pub max_col: usize,
}

impl BoundingBox {
    fn at(row: usize, col: usize) -> Self {
        Self {
            min_row: row,
            min_col: col,
            max_row: row,
            max_col: col,
        }
    }

    fn include(&mut self, row: usize, col: usize) {
        self.min_row = self.min_row.min(row);
        self.min_col = self.min_col.min(col);
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
    }

    /// Number of columns spanned.
    #[must_use]
    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    /// Number of rows spanned.
    #[must_use]
    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }
}

/// Per-component summary returned by [`Labelling::component_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentStats {
    /// Component label.
    pub label: u32,
    /// Number of cells in the component.
    pub cell_count: usize,
    /// Inclusive bounds of the component.
    pub bounds: BoundingBox,
}
