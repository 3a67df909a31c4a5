//! Raster generators for labelling property tests.
//!
//! Every generator is driven by a seeded [`SmallRng`], so a failing proptest
//! case can be replayed from its seed alone.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::types::{RasterFixture, RasterPattern};

/// Smallest generated side length.
const MIN_SIDE: usize = 1;
/// Largest generated side length. Small enough for the quadratic oracle
/// checks, large enough for several chunks and bands.
const MAX_SIDE: usize = 24;

/// Generates fixtures across every [`RasterPattern`].
pub(super) fn raster_fixture_strategy() -> impl Strategy<Value = RasterFixture> {
    (any::<RasterPattern>(), any::<u64>()).prop_map(|(pattern, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(pattern, &mut rng)
    })
}

/// Generates a fixture for a specific pattern.
pub(super) fn generate_fixture(pattern: RasterPattern, rng: &mut SmallRng) -> RasterFixture {
    let width = rng.gen_range(MIN_SIDE..=MAX_SIDE);
    let height = rng.gen_range(MIN_SIDE..=MAX_SIDE);
    let cells = match pattern {
        RasterPattern::Sparse => noise(width, height, rng.gen_range(0.02..0.15), rng),
        RasterPattern::Dense => noise(width, height, rng.gen_range(0.6..0.95), rng),
        RasterPattern::Stripes => stripes(width, height, rng),
        RasterPattern::Diagonal => diagonals(width, height, rng),
        RasterPattern::Checkerboard => checkerboard(width, height, rng.gen_bool(0.5)),
        RasterPattern::Blobs => blobs(width, height, rng),
    };
    RasterFixture {
        width,
        height,
        cells,
        pattern,
    }
}

fn noise(width: usize, height: usize, density: f64, rng: &mut SmallRng) -> Vec<u8> {
    (0..width * height)
        .map(|_| u8::from(rng.gen_bool(density)))
        .collect()
}

/// Rows are foreground in runs, each run followed by at least one empty row.
fn stripes(width: usize, height: usize, rng: &mut SmallRng) -> Vec<u8> {
    let mut cells = vec![0; width * height];
    let mut row = rng.gen_range(0..2);
    while row < height {
        let thickness = rng.gen_range(1..=3).min(height - row);
        cells[row * width..(row + thickness) * width].fill(1);
        row += thickness + rng.gen_range(1..=3);
    }
    cells
}

/// Down-right diagonals starting on the top row at random spacing.
fn diagonals(width: usize, height: usize, rng: &mut SmallRng) -> Vec<u8> {
    let mut cells = vec![0; width * height];
    let spacing = rng.gen_range(2..=5);
    let shift = rng.gen_range(0..spacing);
    for row in 0..height {
        for col in 0..width {
            if (col + spacing * height - row + shift) % spacing == 0 {
                cells[row * width + col] = 1;
            }
        }
    }
    cells
}

fn checkerboard(width: usize, height: usize, odd: bool) -> Vec<u8> {
    (0..height)
        .flat_map(|row| (0..width).map(move |col| u8::from(((row + col) % 2 == 1) == odd)))
        .collect()
}

fn blobs(width: usize, height: usize, rng: &mut SmallRng) -> Vec<u8> {
    let mut cells = vec![0; width * height];
    for _ in 0..rng.gen_range(1..=6) {
        let top = rng.gen_range(0..height);
        let left = rng.gen_range(0..width);
        let bottom = rng.gen_range(top..height.min(top + 6));
        let right = rng.gen_range(left..width.min(left + 6));
        for row in top..=bottom {
            cells[row * width + left..=row * width + right].fill(1);
        }
    }
    cells
}
