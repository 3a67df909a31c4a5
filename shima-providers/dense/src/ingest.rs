//! Helpers for ingesting fixed-size list arrays into raster buffers.
use arrow_array::{Array, FixedSizeListArray, UInt8Array};
use arrow_schema::{DataType, Field};

use crate::errors::ParquetRasterError;

pub(crate) fn validate_fixed_size_list_field(
    field: &Field,
    column: &str,
) -> Result<usize, ParquetRasterError> {
    match field.data_type() {
        DataType::FixedSizeList(child, width) => {
            if field.is_nullable() || child.is_nullable() {
                return Err(ParquetRasterError::NullableField {
                    column: column.to_owned(),
                    nullable_child: child.is_nullable(),
                });
            }
            if child.data_type() != &DataType::UInt8 {
                return Err(ParquetRasterError::InvalidListValueType {
                    actual: child.data_type().clone(),
                });
            }
            usize::try_from(*width).map_err(|_| ParquetRasterError::InvalidWidth { actual: *width })
        }
        other => Err(ParquetRasterError::InvalidColumnType {
            column: column.to_owned(),
            actual: other.clone(),
        }),
    }
}

/// Appends the rows of `array` to `out` and returns the row width.
///
/// `start_row` offsets the row numbers reported in errors so they stay
/// meaningful across record batches.
pub(crate) fn append_fixed_size_list_values(
    array: &FixedSizeListArray,
    expected_width: Option<usize>,
    start_row: usize,
    out: &mut Vec<u8>,
) -> Result<usize, ParquetRasterError> {
    let width = validate_fixed_size_list(array)?;
    if let Some(expected) = expected_width.filter(|&expected| expected != width) {
        return Err(ParquetRasterError::InconsistentBatchWidth {
            expected,
            actual: width,
        });
    }
    copy_list_values(array, width, start_row, out)?;
    Ok(width)
}

pub(crate) fn validate_fixed_size_list(
    array: &FixedSizeListArray,
) -> Result<usize, ParquetRasterError> {
    let value_type = array.value_type();
    if value_type != DataType::UInt8 {
        return Err(ParquetRasterError::InvalidListValueType { actual: value_type });
    }
    usize::try_from(array.value_length()).map_err(|_| ParquetRasterError::InvalidWidth {
        actual: array.value_length(),
    })
}

pub(crate) fn copy_list_values(
    array: &FixedSizeListArray,
    width: usize,
    start_row: usize,
    out: &mut Vec<u8>,
) -> Result<(), ParquetRasterError> {
    let rows = array.len();
    let additional = rows
        .checked_mul(width)
        .ok_or(ParquetRasterError::CapacityOverflow { rows, width })?;
    out.reserve(additional);
    for row_index in 0..rows {
        let absolute_row = start_row + row_index;
        if array.is_null(row_index) {
            return Err(ParquetRasterError::NullRow { row: absolute_row });
        }
        let row = array.value(row_index);
        let cells = row.as_any().downcast_ref::<UInt8Array>().ok_or_else(|| {
            ParquetRasterError::InvalidListValueType {
                actual: row.data_type().clone(),
            }
        })?;
        if cells.len() != width {
            return Err(ParquetRasterError::InvalidRowLength {
                row: absolute_row,
                expected: width,
                actual: cells.len(),
            });
        }
        if let Some(column) = (0..width).find(|&column| cells.is_null(column)) {
            return Err(ParquetRasterError::NullValue {
                row: absolute_row,
                column,
            });
        }
        out.extend_from_slice(cells.values());
    }
    Ok(())
}
