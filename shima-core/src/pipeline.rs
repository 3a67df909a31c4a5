//! Labelling pipeline orchestration helpers.
//!
//! Each entry point runs the phases in strict order over an already validated
//! raster and writes the final labels into `out`:
//!
//! - collect adjacency pairs,
//! - union them into a disjoint set,
//! - flatten every path to its root,
//! - assign row-major first-occurrence labels.
//!
//! The chunked variant runs the first three phases per chunk and reconciles
//! the seams before the final numbering.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    Result,
    assign::assign_labels_into,
    chunk::{ChunkLabels, label_chunk, plan_chunks, reconcile},
    compress::{compress_paths, compress_paths_parallel},
    disjoint_set::DisjointSet,
    pairs::{collect_pairs, collect_pairs_parallel},
    raster::RasterView,
    reduce::{ReduceMode, apply_pairs, reduce},
};

/// Runs every phase on the calling thread and returns the component count.
#[instrument(
    name = "core.run_sequential",
    err,
    skip(view, out),
    fields(width = view.width(), height = view.height()),
)]
pub(crate) fn run_sequential(view: &RasterView<'_>, out: &mut [u32]) -> Result<u32> {
    let mut set = DisjointSet::for_raster(view);
    let pairs = collect_pairs(view);
    let merges = apply_pairs(&mut set, &pairs);
    compress_paths(&mut set);
    let components = assign_labels_into(view, &set, out)?;
    debug!(pairs = pairs.len(), merges, components, "sequential labelling finished");
    Ok(components)
}

/// Collects pairs per band and compresses paths on the current rayon pool.
///
/// Unions follow `mode`; label assignment stays single-threaded because its
/// scan order defines the label numbers.
#[instrument(
    name = "core.run_parallel",
    err,
    skip(view, out),
    fields(width = view.width(), height = view.height()),
)]
pub(crate) fn run_parallel(
    view: &RasterView<'_>,
    out: &mut [u32],
    band_rows: usize,
    mode: ReduceMode,
) -> Result<u32> {
    let pairs = collect_pairs_parallel(view, band_rows);
    let batch = band_rows.saturating_mul(view.width());
    let (mut set, merges) = reduce(DisjointSet::for_raster(view), &pairs, mode, batch)?;
    compress_paths_parallel(&mut set);
    let components = assign_labels_into(view, &set, out)?;
    debug!(pairs = pairs.len(), merges, components, "parallel labelling finished");
    Ok(components)
}

/// Labels row chunks in parallel, then stitches their seams.
#[instrument(
    name = "core.run_chunked",
    err,
    skip(view, out),
    fields(width = view.width(), height = view.height()),
)]
pub(crate) fn run_chunked(
    view: &RasterView<'_>,
    out: &mut [u32],
    chunk_count: usize,
) -> Result<u32> {
    let plan = plan_chunks(view.height(), chunk_count);
    let chunks = plan.len();
    let labelled: Vec<ChunkLabels> = plan
        .into_par_iter()
        .map(|rows| label_chunk(view, rows))
        .collect::<Result<_>>()?;
    let local: u64 = labelled.iter().map(|chunk| u64::from(chunk.count())).sum();
    let components = reconcile(view, &labelled, out)?;
    debug!(chunks, local, components, "chunked labelling finished");
    Ok(components)
}
