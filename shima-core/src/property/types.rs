//! Type definitions for labelling property tests.

use test_strategy::Arbitrary;

/// Shape family of a generated raster.
///
/// Each family stresses a different part of the pipeline: isolated cells
/// exercise the background sentinel, dense noise produces long union chains,
/// stripes and diagonals cross every chunk seam.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum RasterPattern {
    /// Few foreground cells, mostly singletons.
    Sparse,
    /// Mostly foreground with scattered holes.
    Dense,
    /// Full-width horizontal stripes separated by background rows.
    Stripes,
    /// Diagonal lines joined only through corner contacts.
    Diagonal,
    /// A checkerboard, which is one component under 8-connectivity.
    Checkerboard,
    /// Random filled rectangles that may overlap or touch.
    Blobs,
}

/// A generated raster with the context needed to diagnose a failure.
#[derive(Clone, Debug)]
pub(super) struct RasterFixture {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Row-major binary cells.
    pub cells: Vec<u8>,
    /// Family the raster was drawn from.
    pub pattern: RasterPattern,
}

impl RasterFixture {
    /// Short description used in failure messages.
    pub(super) fn describe(&self) -> String {
        format!(
            "pattern={:?}, {}x{}, foreground={}",
            self.pattern,
            self.width,
            self.height,
            self.cells.iter().filter(|&&cell| cell == 1).count(),
        )
    }
}
