//! Builder utilities for configuring labelling runs.
//!
//! Exposes the execution strategy selection surface and the builder
//! validation run before constructing [`Labeller`] instances.

use std::sync::Arc;

use rayon::ThreadPoolBuilder;

use crate::{Result, error::LabelError, labeller::Labeller, reduce::ReduceMode};

/// Rasters with at least this many cells run in parallel under
/// [`ExecutionStrategy::Auto`].
pub const AUTO_PARALLEL_THRESHOLD: usize = 65_536;

/// Indicates how [`Labeller`] schedules the labelling phases.
///
/// `Auto` resolves deterministically from the raster size: small rasters run
/// sequentially, anything from [`AUTO_PARALLEL_THRESHOLD`] cells up runs the
/// parallel pipeline.
///
/// # Examples
/// ```
/// use shima_core::ExecutionStrategy;
///
/// assert_eq!(ExecutionStrategy::Auto.resolve(16), ExecutionStrategy::Sequential);
/// assert_eq!(ExecutionStrategy::Auto.resolve(1 << 20), ExecutionStrategy::Parallel);
/// assert_eq!(ExecutionStrategy::Chunked.resolve(16), ExecutionStrategy::Chunked);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionStrategy {
    /// Let the library pick from the raster size.
    #[default]
    Auto,
    /// Run every phase on the calling thread.
    Sequential,
    /// Collect pairs and compress paths on the worker pool.
    Parallel,
    /// Label row chunks independently, then reconcile the seams.
    Chunked,
}

impl ExecutionStrategy {
    /// Returns the concrete strategy used for a raster of `cells` cells.
    #[must_use]
    pub fn resolve(self, cells: usize) -> Self {
        match self {
            Self::Auto if cells < AUTO_PARALLEL_THRESHOLD => Self::Sequential,
            Self::Auto => Self::Parallel,
            other => other,
        }
    }
}

/// Configures and constructs [`Labeller`] instances.
///
/// # Examples
/// ```
/// use shima_core::{ExecutionStrategy, LabellerBuilder};
///
/// let labeller = LabellerBuilder::new()
///     .with_execution_strategy(ExecutionStrategy::Chunked)
///     .with_chunk_count(8)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(labeller.chunk_count(), 8);
/// assert_eq!(labeller.execution_strategy(), ExecutionStrategy::Chunked);
/// ```
#[derive(Debug, Clone)]
pub struct LabellerBuilder {
    execution_strategy: ExecutionStrategy,
    chunk_count: usize,
    band_rows: usize,
    reduce_mode: ReduceMode,
    worker_threads: Option<usize>,
}

impl Default for LabellerBuilder {
    fn default() -> Self {
        Self {
            execution_strategy: ExecutionStrategy::Auto,
            chunk_count: 4,
            band_rows: 64,
            reduce_mode: ReduceMode::Sequential,
            worker_threads: None,
        }
    }
}

impl LabellerBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use shima_core::{ExecutionStrategy, LabellerBuilder, ReduceMode};
    ///
    /// let builder = LabellerBuilder::new();
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// assert_eq!(builder.chunk_count(), 4);
    /// assert_eq!(builder.band_rows(), 64);
    /// assert_eq!(builder.reduce_mode(), ReduceMode::Sequential);
    /// assert_eq!(builder.worker_threads(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the execution strategy.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Sets how many row chunks [`ExecutionStrategy::Chunked`] uses.
    ///
    /// Rasters with fewer rows than chunks use one chunk per row.
    #[must_use]
    pub fn with_chunk_count(mut self, chunks: usize) -> Self {
        self.chunk_count = chunks;
        self
    }

    /// Returns the configured chunk count.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// Sets the rows per band during parallel pair collection.
    #[must_use]
    pub fn with_band_rows(mut self, rows: usize) -> Self {
        self.band_rows = rows;
        self
    }

    /// Returns the configured band height.
    #[must_use]
    pub fn band_rows(&self) -> usize {
        self.band_rows
    }

    /// Sets how the parallel pipeline applies unions.
    ///
    /// # Examples
    /// ```
    /// use shima_core::{LabellerBuilder, ReduceMode};
    ///
    /// let builder = LabellerBuilder::new().with_reduce_mode(ReduceMode::Locked);
    /// assert_eq!(builder.reduce_mode(), ReduceMode::Locked);
    /// ```
    #[must_use]
    pub fn with_reduce_mode(mut self, mode: ReduceMode) -> Self {
        self.reduce_mode = mode;
        self
    }

    /// Returns the configured union mode.
    #[must_use]
    pub fn reduce_mode(&self) -> ReduceMode {
        self.reduce_mode
    }

    /// Runs parallel work on a dedicated pool of `threads` workers instead of
    /// the global rayon pool.
    #[must_use]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    /// Returns the dedicated pool size, if one was requested.
    #[must_use]
    pub fn worker_threads(&self) -> Option<usize> {
        self.worker_threads
    }

    /// Validates the configuration and constructs a [`Labeller`] instance.
    ///
    /// # Errors
    /// Returns [`LabelError::InvalidChunkCount`], [`LabelError::InvalidBandRows`]
    /// or [`LabelError::InvalidWorkerThreads`] for zero values, and
    /// [`LabelError::ThreadPool`] when the dedicated pool cannot start.
    ///
    /// # Examples
    /// ```
    /// use shima_core::{LabelError, LabellerBuilder};
    ///
    /// let err = LabellerBuilder::new().with_chunk_count(0).build().unwrap_err();
    /// assert_eq!(err, LabelError::InvalidChunkCount { got: 0 });
    /// ```
    pub fn build(self) -> Result<Labeller> {
        if self.chunk_count == 0 {
            return Err(LabelError::InvalidChunkCount {
                got: self.chunk_count,
            });
        }
        if self.band_rows == 0 {
            return Err(LabelError::InvalidBandRows {
                got: self.band_rows,
            });
        }
        let pool = match self.worker_threads {
            None => None,
            Some(0) => return Err(LabelError::InvalidWorkerThreads { got: 0 }),
            Some(threads) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|index| format!("shima-worker-{index}"))
                    .build()
                    .map_err(|error| LabelError::ThreadPool {
                        message: Arc::from(error.to_string()),
                    })?;
                Some(Arc::new(pool))
            }
        };

        Ok(Labeller::new(
            self.execution_strategy,
            self.chunk_count,
            self.band_rows,
            self.reduce_mode,
            pool,
        ))
    }
}
