//! Test fixture builders for CLI tests.
//!
//! Creates small Parquet rasters so the CLI tests exercise Parquet ingestion
//! without relying on external fixtures.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use arrow_array::{ArrayRef, FixedSizeListArray, RecordBatch, UInt8Array};
use arrow_schema::{DataType, Field, Schema};
use parquet::arrow::arrow_writer::ArrowWriter;
use tempfile::TempDir;

/// Width of the raster written by [`create_parquet_file`].
pub(super) const PARQUET_WIDTH: usize = 4;

/// Creates a Parquet file with a `cells: FixedSizeList<UInt8, 4>` column.
///
/// The raster has three rows:
///
/// ```text
/// # . . #
/// # . . .
/// . . # #
/// ```
///
/// # Errors
/// Returns an error when the file cannot be created or the Parquet writer fails
/// to write the batch.
pub(super) fn create_parquet_file(
    dir: &TempDir,
    name: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.path().join(name);
    let schema = build_schema();
    let batch = build_record_batch(schema.clone())?;
    let file = File::create(&path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(path)
}

fn item_field() -> Arc<Field> {
    Arc::new(Field::new("item", DataType::UInt8, false))
}

fn build_schema() -> Arc<Schema> {
    let list_type = DataType::FixedSizeList(item_field(), 4);
    Arc::new(Schema::new(vec![Field::new("cells", list_type, false)]))
}

fn build_record_batch(schema: Arc<Schema>) -> Result<RecordBatch, Box<dyn std::error::Error>> {
    let values = UInt8Array::from(vec![1_u8, 0, 0, 1, 1, 0, 0, 0, 0, 0, 1, 1]);
    let list = FixedSizeListArray::new(item_field(), 4, Arc::new(values) as ArrayRef, None);
    Ok(RecordBatch::try_new(schema, vec![Arc::new(list) as ArrayRef])?)
}
