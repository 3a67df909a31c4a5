//! Seeded synthetic rasters for benchmarking.
//!
//! Noise rasters depend on the seed; the structured patterns are fixed by
//! their dimensions alone.

mod errors;

use std::fmt;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use shima_core::Raster;

pub use errors::SyntheticError;

/// Layout family of a synthetic raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RasterPattern {
    /// Independent cells, foreground with the configured density.
    Noise,
    /// Full rows separated by empty rows, one component per stripe.
    Stripes,
    /// Cells touching only diagonally. The whole raster is one component
    /// and every chunk seam carries merges.
    Checkerboard,
    /// Full rows joined at alternating ends into a single long path.
    Serpentine,
}

impl RasterPattern {
    /// Returns the short name used in raster names and benchmark labels.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Noise => "noise",
            Self::Stripes => "stripes",
            Self::Checkerboard => "checkerboard",
            Self::Serpentine => "serpentine",
        }
    }
}

impl fmt::Display for RasterPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for a synthetic raster.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticRasterConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Layout family.
    pub pattern: RasterPattern,
    /// Foreground probability for [`RasterPattern::Noise`].
    pub density: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Generates a raster named `synthetic-<pattern>`.
///
/// # Errors
/// Returns [`SyntheticError::InvalidDensity`] for a noise density outside
/// `[0, 1]`, [`SyntheticError::Overflow`] when the cell count does not fit in
/// `usize`, and [`SyntheticError::Raster`] for empty dimensions.
pub fn generate(config: &SyntheticRasterConfig) -> Result<Raster, SyntheticError> {
    let total = config
        .width
        .checked_mul(config.height)
        .ok_or(SyntheticError::Overflow)?;
    let cells = match config.pattern {
        RasterPattern::Noise => noise(total, config.density, config.seed)?,
        RasterPattern::Stripes => grid(config.width, config.height, stripe),
        RasterPattern::Checkerboard => grid(config.width, config.height, checker),
        RasterPattern::Serpentine => grid(config.width, config.height, serpentine),
    };
    let name = format!("synthetic-{}", config.pattern);
    Raster::try_new(name, config.width, config.height, cells).map_err(SyntheticError::from)
}

fn noise(total: usize, density: f64, seed: u64) -> Result<Vec<u8>, SyntheticError> {
    if !(0.0..=1.0).contains(&density) {
        return Err(SyntheticError::InvalidDensity { density });
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    Ok((0..total).map(|_| u8::from(rng.gen_bool(density))).collect())
}

fn grid(width: usize, height: usize, is_foreground: fn(usize, usize, usize) -> bool) -> Vec<u8> {
    (0..height)
        .flat_map(|row| (0..width).map(move |col| u8::from(is_foreground(row, col, width))))
        .collect()
}

const fn stripe(row: usize, _col: usize, _width: usize) -> bool {
    row & 1 == 0
}

const fn checker(row: usize, col: usize, _width: usize) -> bool {
    (row ^ col) & 1 == 0
}

const fn serpentine(row: usize, col: usize, width: usize) -> bool {
    if row & 1 == 0 {
        return true;
    }
    if row & 2 == 0 {
        col + 1 == width
    } else {
        col == 0
    }
}
