//! Shima core library: connected-component labelling of binary rasters.
//!
//! Foreground cells that touch under 8-connectivity share a label. The
//! pipeline collects adjacency pairs, unions them in a disjoint set, flattens
//! every path and numbers the components in row-major order of first
//! occurrence. Parallel and chunked strategies produce exactly the same
//! labels as the sequential one.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod assign;
mod builder;
mod chunk;
mod compress;
mod disjoint_set;
mod error;
mod labeller;
mod labelling;
mod pairs;
mod pipeline;
mod raster;
mod reduce;

#[cfg(test)]
mod property;
#[cfg(test)]
mod test_utils;

pub use crate::{
    assign::{Relabeller, assign_labels, assign_labels_into},
    builder::{AUTO_PARALLEL_THRESHOLD, ExecutionStrategy, LabellerBuilder},
    chunk::{ChunkLabels, chunk_offsets, label_chunk, plan_chunks, reconcile},
    compress::{compress_paths, compress_paths_parallel},
    disjoint_set::{DisjointSet, NO_PARENT},
    error::{LabelError, LabelErrorCode, RasterError, RasterErrorCode, Result},
    labeller::{Labeller, label, label_into},
    labelling::{BoundingBox, ComponentStats, Labelling, NonDenseLabels},
    pairs::{CellPair, collect_band, collect_pairs, collect_pairs_parallel},
    raster::{BACKGROUND, FOREGROUND, Raster, RasterSource, RasterView},
    reduce::{ReduceMode, apply_pairs, apply_pairs_locked, reduce},
};
