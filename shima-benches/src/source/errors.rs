//! Error types for synthetic raster generation.

use shima_core::RasterError;

/// Errors that may occur while generating benchmark rasters.
#[derive(Debug, thiserror::Error)]
pub enum SyntheticError {
    /// The noise density lay outside `[0, 1]` or was not a number.
    #[error("foreground density must lie in [0, 1] (got {density})")]
    InvalidDensity {
        /// Requested density.
        density: f64,
    },
    /// The requested `width * height` overflowed `usize`.
    #[error("width * height overflows usize")]
    Overflow,
    /// The generated cells did not form a valid raster.
    #[error("generated raster is invalid: {0}")]
    Raster(#[from] RasterError),
}
