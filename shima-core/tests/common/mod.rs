//! Raster builders shared by the integration tests.

/// A `width` x `height` raster with every cell set to `value`.
#[must_use]
pub fn filled(width: usize, height: usize, value: u8) -> Vec<u8> {
    vec![value; width * height]
}

/// A square raster whose main diagonal is foreground.
#[must_use]
pub fn main_diagonal(side: usize) -> Vec<u8> {
    let mut cells = filled(side, side, 0);
    for step in 0..side {
        cells[step * side + step] = 1;
    }
    cells
}

/// Sets the listed `(row, col)` cells of an empty raster to foreground.
#[must_use]
pub fn with_points(width: usize, height: usize, points: &[(usize, usize)]) -> Vec<u8> {
    let mut cells = filled(width, height, 0);
    for &(row, col) in points {
        cells[row * width + col] = 1;
    }
    cells
}
