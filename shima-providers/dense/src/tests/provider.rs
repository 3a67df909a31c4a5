use super::{ParquetRasterError, ParquetRasterProvider, support::*};
use arrow_array::builder::{FixedSizeListBuilder, UInt8Builder};
use arrow_array::{ArrayRef, FixedSizeListArray, Int32Array};
use arrow_schema::{DataType, Field};
use rstest::rstest;
use shima_core::{Labeller, RasterError, RasterSource};
use std::sync::Arc;

#[rstest]
fn provider_from_fixed_size_list() {
    let array = build_list_array(&[vec![1, 0, 1], vec![0, 1, 0]], 3);
    let provider =
        ParquetRasterProvider::try_from_fixed_size_list("demo", &array).expect("valid raster");
    assert_eq!(provider.name(), "demo");
    assert_eq!(provider.width(), 3);
    assert_eq!(provider.height(), 2);
    assert_eq!(provider.cells(), &[1, 0, 1, 0, 1, 0]);

    let labelling = Labeller::default().run(&provider).expect("labelling must succeed");
    assert_eq!(labelling.component_count(), 1);
}

#[rstest]
fn provider_rejects_null_rows() {
    let mut builder = FixedSizeListBuilder::new(UInt8Builder::new(), 2);
    builder.values().append_value(1);
    builder.values().append_value(0);
    builder.append(true);
    builder.values().append_null();
    builder.values().append_null();
    builder.append(false);
    let array = builder.finish();
    let err = ParquetRasterProvider::try_from_fixed_size_list("demo", &array)
        .expect_err("null rows must be rejected");
    assert!(matches!(err, ParquetRasterError::NullRow { row: 1 }));
}

#[rstest]
fn provider_rejects_null_values() {
    let mut builder = FixedSizeListBuilder::new(UInt8Builder::new(), 2);
    builder.values().append_value(1);
    builder.values().append_value(0);
    builder.append(true);
    builder.values().append_value(1);
    builder.values().append_null();
    builder.append(true);
    let array = builder.finish();
    let err = ParquetRasterProvider::try_from_fixed_size_list("demo", &array)
        .expect_err("null values must be rejected");
    assert!(matches!(
        err,
        ParquetRasterError::NullValue { row: 1, column: 1 }
    ));
}

#[rstest]
fn provider_rejects_non_u8_children() {
    let field = Arc::new(Field::new("item", DataType::Int32, false));
    let values: ArrayRef = Arc::new(Int32Array::from(vec![1, 0, 0, 1]));
    let array = FixedSizeListArray::new(field, 2, values, None);
    let err = ParquetRasterProvider::try_from_fixed_size_list("demo", &array)
        .expect_err("non-u8 children must be rejected");
    assert!(matches!(
        err,
        ParquetRasterError::InvalidListValueType { .. }
    ));
}

#[rstest]
fn provider_rejects_non_binary_cells() {
    let array = build_list_array(&[vec![1, 0], vec![0, 3]], 2);
    let error =
        expect_raster_error(ParquetRasterProvider::try_from_fixed_size_list("demo", &array));
    assert_eq!(error, RasterError::NonBinaryValue { index: 3, value: 3 });
}

#[rstest]
fn provider_rejects_empty_lists() {
    let array = build_list_array(&[], 2);
    let error =
        expect_raster_error(ParquetRasterProvider::try_from_fixed_size_list("demo", &array));
    assert_eq!(error, RasterError::ZeroHeight);
}

#[rstest]
fn into_raster_keeps_cells() {
    let array = build_list_array(&[vec![0, 1]], 2);
    let provider =
        ParquetRasterProvider::try_from_fixed_size_list("demo", &array).expect("valid raster");
    assert_eq!(provider.into_raster().into_cells(), vec![0, 1]);
}
