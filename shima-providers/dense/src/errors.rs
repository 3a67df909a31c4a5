use arrow_schema::{ArrowError, DataType};
use shima_core::RasterError;
use thiserror::Error;

/// Errors raised while loading a raster from Arrow or Parquet data.
#[derive(Debug, Error)]
pub enum ParquetRasterError {
    /// The requested column is absent from the schema.
    #[error("column `{column}` not found in Parquet schema")]
    ColumnNotFound {
        /// Name of the missing column.
        column: String,
    },
    /// The column is not a fixed-size list.
    #[error("column `{column}` must be a FixedSizeList<UInt8, _> but found {actual:?}")]
    InvalidColumnType {
        /// Name of the offending column.
        column: String,
        /// Type found in the schema.
        actual: DataType,
    },
    /// The list items are not `UInt8`.
    #[error("FixedSizeList child type must be UInt8 but found {actual:?}")]
    InvalidListValueType {
        /// Item type found in the schema.
        actual: DataType,
    },
    /// The list or its items are declared nullable.
    #[error("column `{column}` must not be nullable (nullable child: {nullable_child})")]
    NullableField {
        /// Name of the offending column.
        column: String,
        /// Whether the nullable part is the item field.
        nullable_child: bool,
    },
    /// The list length cannot be used as a raster width.
    #[error("invalid FixedSizeList width {actual}")]
    InvalidWidth {
        /// List length reported by Arrow.
        actual: i32,
    },
    /// A whole row is null.
    #[error("row {row} is null")]
    NullRow {
        /// Zero-based row index across all batches.
        row: usize,
    },
    /// A single cell is null.
    #[error("row {row} contains null value at column {column}")]
    NullValue {
        /// Zero-based row index across all batches.
        row: usize,
        /// Zero-based column of the null cell.
        column: usize,
    },
    /// A row does not hold exactly `width` cells.
    #[error("row {row} has length {actual} but expected {expected}")]
    InvalidRowLength {
        /// Zero-based row index across all batches.
        row: usize,
        /// Raster width.
        expected: usize,
        /// Cells found in the row.
        actual: usize,
    },
    /// The raster does not fit in memory-addressable space.
    #[error("raster with {rows} rows and width {width} exceeds capacity limits")]
    CapacityOverflow {
        /// Rows in the offending batch.
        rows: usize,
        /// Raster width.
        width: usize,
    },
    /// Two record batches disagree on the raster width.
    #[error("inconsistent widths across batches: expected {expected}, got {actual}")]
    InconsistentBatchWidth {
        /// Width of the first batch.
        expected: usize,
        /// Width of the offending batch.
        actual: usize,
    },
    /// The loaded cells do not form a valid binary raster.
    #[error("invalid raster: {0}")]
    Raster(#[from] RasterError),
    /// Arrow failed to decode a batch.
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// Parquet failed to read the file.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    /// Opening or reading the file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
