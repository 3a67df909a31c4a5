//! Discovery of foreground adjacency pairs under 8-connectivity.
//!
//! The collector is read-only over the raster. Every foreground cell looks at
//! its neighbours in a fixed order and emits one pair per foreground neighbour,
//! so each undirected edge appears twice. The union phase is idempotent under
//! duplicates, which keeps the scan branch-light.

use std::ops::Range;

use rayon::prelude::*;

use crate::raster::RasterView;

/// An adjacency between two foreground cells, as linear indices.
pub type CellPair = (usize, usize);

/// Neighbour offsets as `(row delta, column delta)` in scan order:
/// NW, N, NE, W, E, SW, S, SE.
pub(crate) const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Returns the neighbour of `(row, col)` at `offset` when it lies inside a
/// `width` x `height` grid.
pub(crate) fn neighbour(
    row: usize,
    col: usize,
    offset: (isize, isize),
    width: usize,
    height: usize,
) -> Option<(usize, usize)> {
    let next_row = row.checked_add_signed(offset.0)?;
    let next_col = col.checked_add_signed(offset.1)?;
    (next_row < height && next_col < width).then_some((next_row, next_col))
}

/// Collects every foreground adjacency pair in row-major scan order.
///
/// # Examples
/// ```
/// use shima_core::{RasterView, collect_pairs};
///
/// let cells = [1, 0, 0, 1];
/// let view = RasterView::try_new(&cells, 2, 2)?;
/// assert_eq!(collect_pairs(&view), vec![(0, 3), (3, 0)]);
/// # Ok::<(), shima_core::RasterError>(())
/// ```
#[must_use]
pub fn collect_pairs(view: &RasterView<'_>) -> Vec<CellPair> {
    let mut pairs = Vec::new();
    collect_band(view, 0..view.height(), &mut pairs);
    pairs
}

/// Appends the pairs whose first cell lies in `rows` to `out`.
///
/// Neighbours outside the band are still examined against the whole raster,
/// so concatenating the output of consecutive bands yields exactly the
/// sequential pair list.
pub fn collect_band(view: &RasterView<'_>, rows: Range<usize>, out: &mut Vec<CellPair>) {
    let width = view.width();
    let height = view.height();
    let end = rows.end.min(height);
    for row in rows.start..end {
        for col in 0..width {
            let index = view.index_of(row, col);
            if !view.is_foreground(index) {
                continue;
            }
            for offset in NEIGHBOUR_OFFSETS {
                let Some((next_row, next_col)) = neighbour(row, col, offset, width, height) else {
                    continue;
                };
                let other = view.index_of(next_row, next_col);
                if view.is_foreground(other) {
                    out.push((index, other));
                }
            }
        }
    }
}

/// Collects pairs in parallel, one private buffer per band of `band_rows` rows.
///
/// Bands are merged in row order, so the result equals [`collect_pairs`].
/// A `band_rows` of zero is treated as one.
#[must_use]
pub fn collect_pairs_parallel(view: &RasterView<'_>, band_rows: usize) -> Vec<CellPair> {
    let band_rows = band_rows.max(1);
    let bands = view.height().div_ceil(band_rows);
    (0..bands)
        .into_par_iter()
        .fold(Vec::new, |mut acc, band| {
            let start = band * band_rows;
            collect_band(view, start..start + band_rows, &mut acc);
            acc
        })
        .reduce(Vec::new, |mut left, right| {
            left.extend(right);
            left
        })
}
