//! Error types for the Shima core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, ops::Range, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// A raster rejected by [`crate::RasterView::try_new`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RasterError {
    /// The raster has no columns.
    #[error("raster width must be at least 1")]
    ZeroWidth,
    /// The raster has no rows.
    #[error("raster height must be at least 1")]
    ZeroHeight,
    /// `width * height` does not fit in `usize`.
    #[error("raster of {width}x{height} cells exceeds the addressable size")]
    DimensionOverflow {
        /// Requested column count.
        width: usize,
        /// Requested row count.
        height: usize,
    },
    /// The cell buffer does not hold exactly `width * height` values.
    #[error("raster buffer has {actual} cells but {width}x{height} requires {expected}")]
    LengthMismatch {
        /// Requested column count.
        width: usize,
        /// Requested row count.
        height: usize,
        /// Number of cells implied by the dimensions.
        expected: usize,
        /// Number of cells supplied by the caller.
        actual: usize,
    },
    /// A row built with [`crate::Raster::from_rows`] differs in length from the first row.
    #[error("row {row} has {actual} cells but the first row has {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// A cell held something other than `0` or `1`.
    #[error("cell {index} holds {value}; rasters must be binary (0 or 1)")]
    NonBinaryValue {
        /// Linear row-major index of the offending cell.
        index: usize,
        /// The value found at that cell.
        value: u8,
    },
}

define_error_codes! {
    /// Stable codes describing [`RasterError`] variants.
    enum RasterErrorCode for RasterError {
        /// The raster has no columns.
        ZeroWidth => ZeroWidth => "RASTER_ZERO_WIDTH",
        /// The raster has no rows.
        ZeroHeight => ZeroHeight => "RASTER_ZERO_HEIGHT",
        /// `width * height` does not fit in `usize`.
        DimensionOverflow => DimensionOverflow { .. } => "RASTER_DIMENSION_OVERFLOW",
        /// The cell buffer does not hold exactly `width * height` values.
        LengthMismatch => LengthMismatch { .. } => "RASTER_LENGTH_MISMATCH",
        /// A row differs in length from the first row.
        RaggedRow => RaggedRow { .. } => "RASTER_RAGGED_ROW",
        /// A cell held something other than `0` or `1`.
        NonBinaryValue => NonBinaryValue { .. } => "RASTER_NON_BINARY_VALUE",
    }
}

/// Error type produced when configuring or running a [`crate::Labeller`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LabelError {
    /// The input raster violated the labelling preconditions.
    #[error("raster `{source_name}` is invalid: {error}")]
    InvalidRaster {
        /// Identifier of the rejected raster.
        source_name: Arc<str>,
        #[source]
        /// The precondition that failed.
        error: RasterError,
    },
    /// The caller-provided output buffer does not match the raster size.
    #[error("output buffer has length {out} but the raster has {expected} cells")]
    OutputLengthMismatch {
        /// Caller-provided buffer length.
        out: usize,
        /// Number of raster cells.
        expected: usize,
    },
    /// Chunked labelling needs at least one chunk.
    #[error("chunk_count must be at least 1 (got {got})")]
    InvalidChunkCount {
        /// The invalid chunk count supplied by the caller.
        got: usize,
    },
    /// Parallel pair collection needs bands of at least one row.
    #[error("band_rows must be at least 1 (got {got})")]
    InvalidBandRows {
        /// The invalid band height supplied by the caller.
        got: usize,
    },
    /// A dedicated worker pool needs at least one thread.
    #[error("worker_threads must be at least 1 (got {got})")]
    InvalidWorkerThreads {
        /// The invalid thread count supplied by the caller.
        got: usize,
    },
    /// The dedicated worker pool could not be created.
    #[error("failed to build worker pool: {message}")]
    ThreadPool {
        /// Message reported by the pool builder.
        message: Arc<str>,
    },
    /// A synchronisation primitive became poisoned after a panic.
    #[error("lock for {resource} is poisoned")]
    LockPoisoned {
        /// Name of the locked resource that was poisoned.
        resource: &'static str,
    },
    /// More components were found than fit in the `u32` label space.
    #[error("found more than {max} components; labels are limited to u32")]
    TooManyComponents {
        /// Largest representable label.
        max: u32,
    },
    /// A chunk handed to reconciliation does not continue the row tiling.
    #[error(
        "chunk {chunk} covers rows {rows:?} with {labels} labels; expected a non-empty run \
         starting at row {expected_start}"
    )]
    ChunkLayoutMismatch {
        /// Position of the offending chunk.
        chunk: usize,
        /// Rows the chunk claims to cover.
        rows: Range<usize>,
        /// Number of labels the chunk holds.
        labels: usize,
        /// First row not covered by the preceding chunks.
        expected_start: usize,
    },
    /// The chunks handed to reconciliation stop before the last row.
    #[error("chunks cover {covered} of {height} rows")]
    UncoveredRows {
        /// Rows covered by the chunks.
        covered: usize,
        /// Raster height.
        height: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`LabelError`] variants.
    enum LabelErrorCode for LabelError {
        /// The input raster violated the labelling preconditions.
        InvalidRaster => InvalidRaster { .. } => "LABEL_INVALID_RASTER",
        /// The caller-provided output buffer does not match the raster size.
        OutputLengthMismatch => OutputLengthMismatch { .. } => "LABEL_OUTPUT_LENGTH_MISMATCH",
        /// Chunked labelling needs at least one chunk.
        InvalidChunkCount => InvalidChunkCount { .. } => "LABEL_INVALID_CHUNK_COUNT",
        /// Parallel pair collection needs bands of at least one row.
        InvalidBandRows => InvalidBandRows { .. } => "LABEL_INVALID_BAND_ROWS",
        /// A dedicated worker pool needs at least one thread.
        InvalidWorkerThreads => InvalidWorkerThreads { .. } => "LABEL_INVALID_WORKER_THREADS",
        /// The dedicated worker pool could not be created.
        ThreadPool => ThreadPool { .. } => "LABEL_THREAD_POOL",
        /// A synchronisation primitive became poisoned after a panic.
        LockPoisoned => LockPoisoned { .. } => "LABEL_LOCK_POISONED",
        /// More components were found than fit in the `u32` label space.
        TooManyComponents => TooManyComponents { .. } => "LABEL_TOO_MANY_COMPONENTS",
        /// A chunk handed to reconciliation does not continue the row tiling.
        ChunkLayoutMismatch => ChunkLayoutMismatch { .. } => "LABEL_CHUNK_LAYOUT_MISMATCH",
        /// The chunks handed to reconciliation stop before the last row.
        UncoveredRows => UncoveredRows { .. } => "LABEL_UNCOVERED_ROWS",
    }
}

impl LabelError {
    /// Retrieve the inner [`RasterErrorCode`] when the raster itself was rejected.
    pub const fn raster_code(&self) -> Option<RasterErrorCode> {
        match self {
            Self::InvalidRaster { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, LabelError>;
