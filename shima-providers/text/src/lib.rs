//! Text provider for ASCII rasters implementing [`RasterSource`].
//!
//! One raster row per line. `#` and `1` mark foreground cells, `.` and `0`
//! background cells. Trailing blank lines and carriage returns are ignored;
//! every other line must match the width of the first.
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use shima_core::{Raster, RasterError, RasterSource};
use thiserror::Error;

/// Errors raised while parsing a text raster.
#[derive(Debug, Error)]
pub enum TextRasterError {
    /// The input held no rows.
    #[error("text raster has no rows")]
    EmptyInput,
    /// A character other than `#`, `1`, `.` or `0` appeared.
    #[error("line {line}, column {column}: unexpected character {found:?}")]
    InvalidCharacter {
        /// One-based line number.
        line: usize,
        /// One-based column number, in characters.
        column: usize,
        /// The offending character.
        found: char,
    },
    /// A line's width differs from the first line.
    #[error("line {line} has {actual} cells but the first line has {expected}")]
    RaggedRow {
        /// One-based line number.
        line: usize,
        /// Width of the first line.
        expected: usize,
        /// Width of the offending line.
        actual: usize,
    },
    /// The parsed grid was rejected by the core.
    #[error(transparent)]
    Raster(#[from] RasterError),
    /// Reading the input failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Binary raster parsed from ASCII art.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRasterProvider {
    raster: Raster,
}

impl TextRasterProvider {
    /// Parses a raster from a string.
    ///
    /// # Errors
    /// Returns [`TextRasterError::EmptyInput`] when there are no rows,
    /// [`TextRasterError::InvalidCharacter`] for unknown cells and
    /// [`TextRasterError::RaggedRow`] when a row has the wrong width.
    ///
    /// # Examples
    /// ```
    /// use shima_core::RasterSource;
    /// use shima_providers_text::TextRasterProvider;
    ///
    /// let provider = TextRasterProvider::try_from_str("demo", "#..\n.##\n")?;
    /// assert_eq!(provider.width(), 3);
    /// assert_eq!(provider.cells(), &[1, 0, 0, 0, 1, 1]);
    /// # Ok::<(), shima_providers_text::TextRasterError>(())
    /// ```
    pub fn try_from_str(name: impl Into<String>, text: &str) -> Result<Self, TextRasterError> {
        Self::try_from_reader(name, text.as_bytes())
    }

    /// Parses a raster from a buffered reader.
    ///
    /// # Errors
    /// Same as [`Self::try_from_str`], plus [`TextRasterError::Io`] when the
    /// reader fails.
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, TextRasterError> {
        let mut lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        let Some(first) = lines.first() else {
            return Err(TextRasterError::EmptyInput);
        };
        let width = first.trim_end_matches('\r').chars().count();

        let mut cells = Vec::with_capacity(width.saturating_mul(lines.len()));
        for (index, line) in lines.iter().enumerate() {
            let row = parse_row(line.trim_end_matches('\r'), index + 1)?;
            if row.len() != width {
                return Err(TextRasterError::RaggedRow {
                    line: index + 1,
                    expected: width,
                    actual: row.len(),
                });
            }
            cells.extend(row);
        }

        let raster = Raster::try_new(name, width, lines.len(), cells)?;
        Ok(Self { raster })
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    /// Same as [`Self::try_from_reader`].
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, TextRasterError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, BufReader::new(file))
    }

    /// Consumes the provider and returns the parsed raster.
    #[must_use]
    pub fn into_raster(self) -> Raster {
        self.raster
    }
}

fn parse_row(line: &str, line_number: usize) -> Result<Vec<u8>, TextRasterError> {
    line.chars()
        .enumerate()
        .map(|(column, found)| match found {
            '#' | '1' => Ok(1),
            '.' | '0' => Ok(0),
            _ => Err(TextRasterError::InvalidCharacter {
                line: line_number,
                column: column + 1,
                found,
            }),
        })
        .collect()
}

impl RasterSource for TextRasterProvider {
    fn name(&self) -> &str {
        self.raster.name()
    }

    fn width(&self) -> usize {
        self.raster.width()
    }

    fn height(&self) -> usize {
        self.raster.height()
    }

    fn cells(&self) -> &[u8] {
        self.raster.cells()
    }
}
