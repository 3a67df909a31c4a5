//! Dense providers for binary rasters stored as Arrow fixed-size lists.
//!
//! Each list is one raster row of `UInt8` cells, so a column of type
//! `FixedSizeList<UInt8, W>` with `H` rows loads as a `W` x `H` raster.

mod errors;
mod ingest;
mod provider;

pub use errors::ParquetRasterError;
pub use provider::ParquetRasterProvider;

#[cfg(test)]
mod tests;
