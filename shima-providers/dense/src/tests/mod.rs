pub(crate) use super::{ParquetRasterError, ParquetRasterProvider};

mod provider;
mod support;
