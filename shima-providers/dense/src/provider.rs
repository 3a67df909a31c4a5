//! Parquet raster provider implementation.
use std::{fs::File, path::Path};

use arrow_array::{Array, FixedSizeListArray, RecordBatchReader};
use parquet::arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder};
use parquet::file::reader::ChunkReader;
use shima_core::{Raster, RasterSource};

use crate::errors::ParquetRasterError;
use crate::ingest::{append_fixed_size_list_values, validate_fixed_size_list_field};

/// Binary raster loaded from a `FixedSizeList<UInt8, W>` column, one list per
/// row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParquetRasterProvider {
    raster: Raster,
}

impl ParquetRasterProvider {
    /// Validates the assembled cells as a raster.
    pub(crate) fn from_parts(
        name: impl Into<String>,
        width: usize,
        height: usize,
        cells: Vec<u8>,
    ) -> Result<Self, ParquetRasterError> {
        debug_assert_eq!(cells.len(), width.saturating_mul(height));
        let raster = Raster::try_new(name, width, height, cells)?;
        Ok(Self { raster })
    }

    /// Loads a raster from an Arrow [`FixedSizeListArray`].
    ///
    /// # Errors
    /// Returns [`ParquetRasterError`] for non-`UInt8` items, null rows or
    /// cells, and cells that are neither `0` nor `1`.
    pub fn try_from_fixed_size_list(
        name: impl Into<String>,
        array: &FixedSizeListArray,
    ) -> Result<Self, ParquetRasterError> {
        let mut cells = Vec::new();
        let width = append_fixed_size_list_values(array, None, 0, &mut cells)?;
        Self::from_parts(name, width, array.len(), cells)
    }

    /// Loads a raster from the `column` of the Parquet file at `path`.
    ///
    /// # Errors
    /// Same as [`Self::try_from_parquet_reader`], plus
    /// [`ParquetRasterError::Io`] when the file cannot be opened.
    pub fn try_from_parquet_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        column: &str,
    ) -> Result<Self, ParquetRasterError> {
        let file = File::open(path)?;
        Self::try_from_parquet_reader(name, file, column)
    }

    /// Loads a raster from the `column` of a Parquet reader.
    ///
    /// Rows from consecutive record batches are concatenated in order.
    ///
    /// # Errors
    /// Returns [`ParquetRasterError::ColumnNotFound`] for an unknown column,
    /// type and nullability errors for an unsuitable schema, and
    /// [`ParquetRasterError::Raster`] when the cells are not a valid binary
    /// raster (no rows, or a value other than `0` and `1`).
    pub fn try_from_parquet_reader<R>(
        name: impl Into<String>,
        reader: R,
        column: &str,
    ) -> Result<Self, ParquetRasterError>
    where
        R: ChunkReader + Send + 'static,
    {
        let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
        let mask = ProjectionMask::columns(builder.parquet_schema(), [column]);
        let reader = builder.with_projection(mask).build()?;
        let schema = reader.schema();
        let column_index =
            schema
                .index_of(column)
                .map_err(|_| ParquetRasterError::ColumnNotFound {
                    column: column.to_owned(),
                })?;
        let width = validate_fixed_size_list_field(schema.field(column_index), column)?;
        let mut cells = Vec::new();
        let mut rows = 0_usize;
        for batch in reader {
            let batch = batch?;
            let column_array = batch.column(column_index);
            let list = column_array
                .as_any()
                .downcast_ref::<FixedSizeListArray>()
                .ok_or_else(|| ParquetRasterError::InvalidColumnType {
                    column: column.to_owned(),
                    actual: column_array.data_type().clone(),
                })?;
            append_fixed_size_list_values(list, Some(width), rows, &mut cells)?;
            rows += list.len();
        }
        Self::from_parts(name, width, rows, cells)
    }

    /// Consumes the provider and returns the loaded raster.
    #[must_use]
    pub fn into_raster(self) -> Raster {
        self.raster
    }
}

impl RasterSource for ParquetRasterProvider {
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
