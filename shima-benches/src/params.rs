//! Benchmark parameter types.
//!
//! Each struct renders as the Criterion parameter label of one benchmark
//! input, so report directories stay stable across runs.

use std::fmt;

use crate::source::RasterPattern;

/// Parameters for a whole-raster labelling benchmark.
#[derive(Clone, Copy, Debug)]
pub struct LabelBenchParams {
    /// Side length of the square raster.
    pub side: usize,
    /// Layout of the synthetic raster.
    pub pattern: RasterPattern,
}

impl fmt::Display for LabelBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "side={},pattern={}", self.side, self.pattern)
    }
}

/// Parameters for a chunked labelling benchmark.
#[derive(Clone, Copy, Debug)]
pub struct ChunkBenchParams {
    /// Side length of the square raster.
    pub side: usize,
    /// Number of row chunks labelled independently.
    pub chunks: usize,
}

impl fmt::Display for ChunkBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "side={},chunks={}", self.side, self.chunks)
    }
}

/// Parameters for a single-phase benchmark.
#[derive(Clone, Copy, Debug)]
pub struct PhaseBenchParams {
    /// Side length of the square raster.
    pub side: usize,
    /// Rows per band during parallel pair collection.
    pub band_rows: usize,
}

impl fmt::Display for PhaseBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "side={},band={}", self.side, self.band_rows)
    }
}
