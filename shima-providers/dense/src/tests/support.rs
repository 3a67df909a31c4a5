use super::ParquetRasterError;
use arrow_array::{ArrayRef, FixedSizeListArray, RecordBatch, UInt8Array};
use arrow_schema::{DataType, Field, Schema};
use bytes::Bytes;
use parquet::arrow::arrow_writer::ArrowWriter;
use std::convert::TryFrom;
use std::sync::Arc;

pub(crate) fn build_list_array(rows: &[Vec<u8>], width: usize) -> FixedSizeListArray {
    assert!(rows.iter().all(|row| row.len() == width));
    let values = UInt8Array::from_iter_values(rows.iter().flatten().copied());
    FixedSizeListArray::new(
        Arc::new(Field::new("item", DataType::UInt8, false)),
        i32::try_from(width).expect("width fits in i32"),
        Arc::new(values) as ArrayRef,
        None,
    )
}

pub(crate) fn raster_field(width: usize, child_nullable: bool, list_nullable: bool) -> Field {
    Field::new(
        "cells",
        DataType::FixedSizeList(
            Arc::new(Field::new("item", DataType::UInt8, child_nullable)),
            i32::try_from(width).expect("width fits in i32"),
        ),
        list_nullable,
    )
}

pub(crate) fn record_batch(rows: &[Vec<u8>], width: usize) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![raster_field(width, false, false)]));
    RecordBatch::try_new(schema, vec![Arc::new(build_list_array(rows, width)) as ArrayRef])
        .expect("batch")
}

/// Writes `rows` as a single-column Parquet file, `rows_per_batch` rows per
/// record batch.
pub(crate) fn write_parquet(rows: &[Vec<u8>], width: usize, rows_per_batch: usize) -> Bytes {
    let schema = Arc::new(Schema::new(vec![raster_field(width, false, false)]));
    let mut buffer = Vec::new();
    {
        let mut writer = ArrowWriter::try_new(&mut buffer, schema, None).expect("writer");
        for chunk in rows.chunks(rows_per_batch) {
            writer.write(&record_batch(chunk, width)).expect("write");
        }
        writer.close().expect("close");
    }
    Bytes::from(buffer)
}

pub(crate) fn write_batch(batch: &RecordBatch) -> Bytes {
    let mut buffer = Vec::new();
    {
        let mut writer = ArrowWriter::try_new(&mut buffer, batch.schema(), None).expect("writer");
        writer.write(batch).expect("write");
        writer.close().expect("close");
    }
    Bytes::from(buffer)
}

pub(crate) fn expect_raster_error(
    result: Result<super::ParquetRasterProvider, ParquetRasterError>,
) -> shima_core::RasterError {
    match result {
        Err(ParquetRasterError::Raster(error)) => error,
        other => panic!("expected a raster error, got {other:?}"),
    }
}
