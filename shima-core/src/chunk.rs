//! Two-level labelling over row chunks.
//!
//! Each chunk is labelled on its own with a private disjoint set, giving dense
//! chunk-local labels. Reconciliation shifts those labels into one global key
//! space by a per-chunk offset, unions keys across every seam in a second
//! disjoint set and finally renumbers the global roots in row-major order.

use std::ops::Range;

use crate::{
    assign::{Relabeller, assign_labels},
    compress::compress_paths,
    disjoint_set::DisjointSet,
    error::{LabelError, Result},
    pairs::{NEIGHBOUR_OFFSETS, collect_pairs, neighbour},
    raster::RasterView,
    reduce::apply_pairs,
};

/// Splits `height` rows into at most `chunk_count` balanced, contiguous,
/// non-empty ranges.
///
/// The chunk count is clamped to `1..=height`; the first `height % n` chunks
/// hold one extra row.
///
/// # Examples
/// ```
/// use shima_core::plan_chunks;
///
/// assert_eq!(plan_chunks(10, 4), vec![0..3, 3..6, 6..8, 8..10]);
/// assert_eq!(plan_chunks(2, 5), vec![0..1, 1..2]);
/// ```
#[must_use]
pub fn plan_chunks(height: usize, chunk_count: usize) -> Vec<Range<usize>> {
    if height == 0 {
        return Vec::new();
    }
    let chunks = chunk_count.clamp(1, height);
    let base = height / chunks;
    let extra = height % chunks;
    let mut start = 0;
    (0..chunks)
        .map(|chunk| {
            let rows = base + usize::from(chunk < extra);
            let range = start..start + rows;
            start += rows;
            range
        })
        .collect()
}

/// Dense labels of one chunk, local to that chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkLabels {
    rows: Range<usize>,
    labels: Vec<u32>,
    count: u32,
}

impl ChunkLabels {
    /// Rows of the full raster this chunk covers.
    #[must_use]
    pub fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    /// Chunk-local labels, `0` for background and `1..=count` otherwise.
    #[must_use]
    #[rustfmt::skip]
    pub fn labels(&self) -> &[u32] { &self.labels }

    /// Number of components found inside the chunk alone.
    #[must_use]
    #[rustfmt::skip]
    pub fn count(&self) -> u32 { self.count }
}

/// Runs the full local pipeline over the band `rows` of `view`.
///
/// # Errors
/// Returns [`LabelError::TooManyComponents`] if the chunk's labels overflow.
pub fn label_chunk(view: &RasterView<'_>, rows: Range<usize>) -> Result<ChunkLabels> {
    let band = view.rows(rows.clone());
    let mut set = DisjointSet::for_raster(&band);
    apply_pairs(&mut set, &collect_pairs(&band));
    compress_paths(&mut set);
    let (labels, count) = assign_labels(&band, &set)?;
    Ok(ChunkLabels {
        rows,
        labels,
        count,
    })
}

/// Running totals of chunk label counts: the offset of chunk `c` is the sum
/// of the counts of chunks `0..c`.
///
/// # Examples
/// ```
/// use shima_core::{RasterView, chunk_offsets, label_chunk, plan_chunks};
///
/// let cells = [1, 0, 1, 0, 0, 0, 1, 1];
/// let view = RasterView::try_new(&cells, 2, 4)?;
/// let chunks = plan_chunks(4, 4)
///     .into_iter()
///     .map(|rows| label_chunk(&view, rows))
///     .collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(chunk_offsets(&chunks), vec![0, 1, 2, 2]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn chunk_offsets(chunks: &[ChunkLabels]) -> Vec<usize> {
    chunks
        .iter()
        .scan(0_usize, |total, chunk| {
            let offset = *total;
            *total += chunk.count as usize;
            Some(offset)
        })
        .collect()
}

/// Global key of a non-zero chunk-local label.
fn key(offset: usize, label: u32) -> usize {
    offset + label as usize - 1
}

/// Joins chunk-local labels into one dense global labelling written to `out`.
///
/// `chunks` must be the in-order results of [`label_chunk`] over the ranges
/// of [`plan_chunks`] for this `view`. Returns the component count. The
/// chunk layout is checked before anything is written to `out`.
///
/// # Errors
/// Returns [`LabelError::OutputLengthMismatch`] when `out` does not match the
/// raster, [`LabelError::ChunkLayoutMismatch`] or
/// [`LabelError::UncoveredRows`] when the chunks do not tile the raster rows
/// in order, and [`LabelError::TooManyComponents`] if labels overflow `u32`.
pub fn reconcile(view: &RasterView<'_>, chunks: &[ChunkLabels], out: &mut [u32]) -> Result<u32> {
    if out.len() != view.len() {
        return Err(LabelError::OutputLengthMismatch {
            out: out.len(),
            expected: view.len(),
        });
    }
    check_tiling(view, chunks)?;
    let offsets = chunk_offsets(chunks);
    let total = chunks.iter().map(|chunk| chunk.count as usize).sum();
    let mut global = DisjointSet::with_len(total);

    for (upper, lower) in (0..chunks.len()).zip(1..chunks.len()) {
        stitch_seam(
            view,
            (&chunks[upper], offsets[upper]),
            (&chunks[lower], offsets[lower]),
            &mut global,
        );
    }
    compress_paths(&mut global);

    let mut relabeller = Relabeller::new(total);
    let shifted = chunks
        .iter()
        .zip(offsets)
        .flat_map(|(chunk, offset)| chunk.labels.iter().map(move |&local| (offset, local)));
    for (slot, (offset, local)) in out.iter_mut().zip(shifted) {
        *slot = if local == 0 {
            0
        } else {
            relabeller.label_for(global.root_of(key(offset, local)))?
        };
    }
    Ok(relabeller.assigned())
}

/// Checks that `chunks` cover `0..height` contiguously, in order, each with
/// one label per cell.
fn check_tiling(view: &RasterView<'_>, chunks: &[ChunkLabels]) -> Result<()> {
    let mut next = 0;
    for (index, chunk) in chunks.iter().enumerate() {
        let rows = chunk.rows();
        let fits = rows.start == next
            && rows.start < rows.end
            && rows.end <= view.height()
            && Some(chunk.labels.len()) == rows.len().checked_mul(view.width());
        if !fits {
            return Err(LabelError::ChunkLayoutMismatch {
                chunk: index,
                rows,
                labels: chunk.labels.len(),
                expected_start: next,
            });
        }
        next = rows.end;
    }
    if next != view.height() {
        return Err(LabelError::UncoveredRows {
            covered: next,
            height: view.height(),
        });
    }
    Ok(())
}

/// Unions the first row of `lower` with the last row of `upper` through the
/// NW, N and NE neighbours of each lower cell.
fn stitch_seam(
    view: &RasterView<'_>,
    (upper, upper_offset): (&ChunkLabels, usize),
    (lower, lower_offset): (&ChunkLabels, usize),
    global: &mut DisjointSet,
) {
    let width = view.width();
    if upper.count == 0 || lower.count == 0 {
        return;
    }
    let (Some(upper_row), Some(lower_row)) = (
        upper.labels.rchunks_exact(width).next(),
        lower.labels.chunks_exact(width).next(),
    ) else {
        return;
    };
    for (col, &below) in lower_row.iter().enumerate() {
        if below == 0 {
            continue;
        }
        for offset in NEIGHBOUR_OFFSETS.iter().take(3) {
            let Some((_, next_col)) = neighbour(1, col, *offset, width, 2) else {
                continue;
            };
            let above = upper_row[next_col];
            if above != 0 {
                global.union(key(lower_offset, below), key(upper_offset, above));
            }
        }
    }
}
