//! Benchmark support crate for shima.
//!
//! Provides seeded synthetic rasters and parameter types used by the
//! Criterion benchmarks for whole-raster labelling and for the individual
//! pipeline phases: pair collection, union reduction and path compression.

pub mod error;
pub mod params;
pub mod source;
