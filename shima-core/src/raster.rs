//! Binary raster views and the source abstraction used by the labelling engine.
//!
//! A [`RasterView`] is the only shape of input the phase functions accept. It
//! is validated once, at construction, so the union-find pipeline can assume a
//! binary, correctly sized, row-major buffer.

use std::ops::Range;

use crate::error::RasterError;

/// Value of a foreground cell.
pub const FOREGROUND: u8 = 1;
/// Value of a background cell.
pub const BACKGROUND: u8 = 0;

/// Validated, borrowed, row-major binary raster.
///
/// # Examples
/// ```
/// use shima_core::RasterView;
///
/// let cells = [1, 0, 0, 1];
/// let view = RasterView::try_new(&cells, 2, 2)?;
/// assert_eq!(view.len(), 4);
/// assert!(view.is_foreground(view.index_of(1, 1)));
/// # Ok::<(), shima_core::RasterError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterView<'a> {
    cells: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> RasterView<'a> {
    /// Validates `cells` as a `width` x `height` binary raster.
    ///
    /// # Errors
    /// Returns [`RasterError::ZeroWidth`] or [`RasterError::ZeroHeight`] for
    /// empty dimensions, [`RasterError::DimensionOverflow`] when the cell count
    /// does not fit in `usize`, [`RasterError::LengthMismatch`] when the buffer
    /// length differs from `width * height`, and
    /// [`RasterError::NonBinaryValue`] for the first cell that is neither `0`
    /// nor `1`.
    pub fn try_new(cells: &'a [u8], width: usize, height: usize) -> Result<Self, RasterError> {
        if width == 0 {
            return Err(RasterError::ZeroWidth);
        }
        if height == 0 {
            return Err(RasterError::ZeroHeight);
        }
        let expected = width
            .checked_mul(height)
            .ok_or(RasterError::DimensionOverflow { width, height })?;
        if cells.len() != expected {
            return Err(RasterError::LengthMismatch {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }
        if let Some((index, &value)) = cells
            .iter()
            .enumerate()
            .find(|(_, value)| **value > FOREGROUND)
        {
            return Err(RasterError::NonBinaryValue { index, value });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Number of columns.
    #[must_use]
    #[rustfmt::skip]
    pub fn width(&self) -> usize { self.width }

    /// Number of rows.
    #[must_use]
    #[rustfmt::skip]
    pub fn height(&self) -> usize { self.height }

    /// Number of cells (`width * height`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` only for an empty band taken with [`Self::rows`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The underlying row-major cell buffer.
    #[must_use]
    pub fn cells(&self) -> &'a [u8] {
        self.cells
    }

    /// Returns `true` when the cell at linear `index` is foreground.
    ///
    /// Out-of-range indices read as background.
    #[must_use]
    pub fn is_foreground(&self, index: usize) -> bool {
        self.cells.get(index).is_some_and(|&value| value == FOREGROUND)
    }

    /// Linear row-major index of `(row, col)`.
    #[must_use]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.height && col < self.width);
        row * self.width + col
    }

    /// Returns a view over the contiguous band of `rows`, sharing the buffer.
    ///
    /// Indices inside the returned view are relative to the band's first row.
    ///
    /// # Examples
    /// ```
    /// use shima_core::RasterView;
    ///
    /// let cells = [0, 0, 1, 1, 0, 1];
    /// let view = RasterView::try_new(&cells, 2, 3)?;
    /// let band = view.rows(1..3);
    /// assert_eq!(band.height(), 2);
    /// assert_eq!(band.cells(), &[1, 1, 0, 1]);
    /// # Ok::<(), shima_core::RasterError>(())
    /// ```
    #[must_use]
    pub fn rows(&self, rows: Range<usize>) -> Self {
        let start = rows.start.min(self.height);
        let end = rows.end.clamp(start, self.height);
        let cells = &self.cells[start * self.width..end * self.width];
        Self {
            cells,
            width: self.width,
            height: end - start,
        }
    }
}

/// Abstraction over a named binary raster that can be labelled.
///
/// # Examples
/// ```
/// use shima_core::RasterSource;
///
/// struct Dot;
///
/// impl RasterSource for Dot {
///     fn name(&self) -> &str { "dot" }
///     fn width(&self) -> usize { 1 }
///     fn height(&self) -> usize { 1 }
///     fn cells(&self) -> &[u8] { &[1] }
/// }
///
/// let view = Dot.view()?;
/// assert_eq!(view.len(), 1);
/// # Ok::<(), shima_core::RasterError>(())
/// ```
pub trait RasterSource {
    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Returns the number of columns.
    fn width(&self) -> usize;

    /// Returns the number of rows.
    fn height(&self) -> usize;

    /// Returns the row-major cell buffer.
    fn cells(&self) -> &[u8];

    /// Validates the source and returns a [`RasterView`] over it.
    ///
    /// # Errors
    /// Returns the [`RasterError`] reported by [`RasterView::try_new`].
    fn view(&self) -> Result<RasterView<'_>, RasterError> {
        RasterView::try_new(self.cells(), self.width(), self.height())
    }
}

/// Owned binary raster with a display name.
///
/// # Examples
/// ```
/// use shima_core::{Raster, RasterSource};
///
/// let raster = Raster::from_rows("demo", &[vec![1, 0], vec![0, 1]])?;
/// assert_eq!(raster.width(), 2);
/// assert_eq!(raster.height(), 2);
/// # Ok::<(), shima_core::RasterError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    name: String,
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Raster {
    /// Creates a raster after validating it with [`RasterView::try_new`].
    ///
    /// # Errors
    /// Returns the [`RasterError`] describing the first violated precondition.
    pub fn try_new(
        name: impl Into<String>,
        width: usize,
        height: usize,
        cells: Vec<u8>,
    ) -> Result<Self, RasterError> {
        RasterView::try_new(&cells, width, height)?;
        Ok(Self {
            name: name.into(),
            width,
            height,
            cells,
        })
    }

    /// Creates a raster from equally sized rows.
    ///
    /// # Errors
    /// Returns [`RasterError::ZeroWidth`] when there are no rows (or the first
    /// row is empty), and [`RasterError::RaggedRow`] when a row length differs
    /// from the first row.
    pub fn from_rows(name: impl Into<String>, rows: &[Vec<u8>]) -> Result<Self, RasterError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(RasterError::RaggedRow {
                row,
                expected: width,
                actual: cells.len(),
            });
        }
        let cells: Vec<u8> = rows.iter().flatten().copied().collect();
        Self::try_new(name, width, height, cells)
    }

    /// Consumes the raster and returns its cell buffer.
    #[must_use]
    pub fn into_cells(self) -> Vec<u8> {
        self.cells
    }
}

impl RasterSource for Raster {
    fn name(&self) -> &str {
        &self.name
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn cells(&self) -> &[u8] {
        &self.cells
    }
}
