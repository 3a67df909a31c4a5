//! Benchmark setup error type.
//!
//! Aggregates the failures that may arise while preparing benchmark inputs
//! so that setup functions can propagate them with `?`.

use shima_core::{LabelError, RasterError};

use crate::source::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic raster generation failed.
    #[error("synthetic raster generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// A generated raster could not be viewed.
    #[error("raster validation failed: {0}")]
    Raster(#[from] RasterError),
    /// Building a labeller or labelling a raster failed.
    #[error("labelling failed: {0}")]
    Label(#[from] LabelError),
}
