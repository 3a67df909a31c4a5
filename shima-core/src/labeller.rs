//! Core labelling orchestration for the Shima library.
//!
//! Provides the [`Labeller`] runtime entry point, the convenience functions
//! [`label`] and [`label_into`], and the precondition checks shared by all of
//! them.

use std::sync::Arc;

use rayon::ThreadPool;
use tracing::{info, instrument, warn};

use crate::{
    Result,
    builder::{ExecutionStrategy, LabellerBuilder},
    error::LabelError,
    labelling::Labelling,
    pipeline::{run_chunked, run_parallel, run_sequential},
    raster::{RasterSource, RasterView},
    reduce::ReduceMode,
};

/// Name reported for rasters passed as bare buffers.
const BUFFER_SOURCE: &str = "buffer";

/// Entry point for running the labelling pipeline.
///
/// # Examples
/// ```
/// use shima_core::{ExecutionStrategy, LabellerBuilder, Raster};
///
/// let raster = Raster::from_rows("cross", &[
///     vec![0, 1, 0],
///     vec![1, 1, 1],
///     vec![0, 1, 0],
/// ])?;
/// let labeller = LabellerBuilder::new()
///     .with_execution_strategy(ExecutionStrategy::Parallel)
///     .build()?;
/// let labelling = labeller.run(&raster)?;
/// assert_eq!(labelling.component_count(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Labeller {
    execution_strategy: ExecutionStrategy,
    chunk_count: usize,
    band_rows: usize,
    reduce_mode: ReduceMode,
    pool: Option<Arc<ThreadPool>>,
}

impl Default for Labeller {
    fn default() -> Self {
        let defaults = LabellerBuilder::new();
        Self::new(
            defaults.execution_strategy(),
            defaults.chunk_count(),
            defaults.band_rows(),
            defaults.reduce_mode(),
            None,
        )
    }
}

impl Labeller {
    pub(crate) fn new(
        execution_strategy: ExecutionStrategy,
        chunk_count: usize,
        band_rows: usize,
        reduce_mode: ReduceMode,
        pool: Option<Arc<ThreadPool>>,
    ) -> Self {
        Self {
            execution_strategy,
            chunk_count,
            band_rows,
            reduce_mode,
            pool,
        }
    }

    /// Returns the configured execution strategy.
    #[must_use]
    #[rustfmt::skip]
    pub fn execution_strategy(&self) -> ExecutionStrategy { self.execution_strategy }

    /// Returns the chunk count used by [`ExecutionStrategy::Chunked`].
    #[must_use]
    #[rustfmt::skip]
    pub fn chunk_count(&self) -> usize { self.chunk_count }

    /// Returns the band height used by parallel pair collection.
    #[must_use]
    #[rustfmt::skip]
    pub fn band_rows(&self) -> usize { self.band_rows }

    /// Returns the union mode used by the parallel pipeline.
    #[must_use]
    #[rustfmt::skip]
    pub fn reduce_mode(&self) -> ReduceMode { self.reduce_mode }

    /// Returns the size of the dedicated worker pool, if any.
    #[must_use]
    pub fn worker_threads(&self) -> Option<usize> {
        self.pool.as_ref().map(|pool| pool.current_num_threads())
    }

    /// Labels the raster held by `source`.
    ///
    /// # Errors
    /// Returns [`LabelError::InvalidRaster`] when the source is not a valid
    /// binary raster, [`LabelError::LockPoisoned`] if a union worker panicked
    /// and [`LabelError::TooManyComponents`] if labels overflow `u32`.
    pub fn run<S: RasterSource + ?Sized>(&self, source: &S) -> Result<Labelling> {
        let view = validate(source.name(), source.view())?;
        self.label_view(source.name(), &view)
    }

    /// Labels a bare row-major buffer.
    ///
    /// # Errors
    /// Same as [`Self::run`].
    ///
    /// # Examples
    /// ```
    /// use shima_core::Labeller;
    ///
    /// let labelling = Labeller::default().label(&[1, 0, 1], 3, 1)?;
    /// assert_eq!(labelling.labels(), &[1, 0, 2]);
    /// # Ok::<(), shima_core::LabelError>(())
    /// ```
    pub fn label(&self, cells: &[u8], width: usize, height: usize) -> Result<Labelling> {
        let view = validate(BUFFER_SOURCE, RasterView::try_new(cells, width, height))?;
        self.label_view(BUFFER_SOURCE, &view)
    }

    /// Labels a bare buffer into `out` and returns the component count.
    ///
    /// Nothing is written to `out` when a precondition fails.
    ///
    /// # Errors
    /// Returns [`LabelError::OutputLengthMismatch`] when `out` is not exactly
    /// `width * height` long, plus everything [`Self::run`] returns.
    ///
    /// # Examples
    /// ```
    /// use shima_core::Labeller;
    ///
    /// let mut out = [7_u32; 4];
    /// let count = Labeller::default().label_into(&[1, 0, 0, 1], 2, 2, &mut out)?;
    /// assert_eq!(count, 1);
    /// assert_eq!(out, [1, 0, 0, 1]);
    /// # Ok::<(), shima_core::LabelError>(())
    /// ```
    pub fn label_into(
        &self,
        cells: &[u8],
        width: usize,
        height: usize,
        out: &mut [u32],
    ) -> Result<u32> {
        let view = validate(BUFFER_SOURCE, RasterView::try_new(cells, width, height))?;
        if out.len() != view.len() {
            warn!(out = out.len(), expected = view.len(), "output buffer has the wrong length");
            return Err(LabelError::OutputLengthMismatch {
                out: out.len(),
                expected: view.len(),
            });
        }
        self.dispatch(&view, out)
    }

    #[instrument(
        name = "core.label",
        err,
        skip(self, view),
        fields(
            width = view.width(),
            height = view.height(),
            strategy = ?self.execution_strategy,
        ),
    )]
    fn label_view(&self, source: &str, view: &RasterView<'_>) -> Result<Labelling> {
        let mut labels = vec![0; view.len()];
        let components = self.dispatch(view, &mut labels)?;
        info!(components, "labelling complete");
        Ok(Labelling::from_dense(
            view.width(),
            view.height(),
            labels,
            components,
        ))
    }

    fn dispatch(&self, view: &RasterView<'_>, out: &mut [u32]) -> Result<u32> {
        match self.execution_strategy.resolve(view.len()) {
            ExecutionStrategy::Sequential | ExecutionStrategy::Auto => run_sequential(view, out),
            ExecutionStrategy::Parallel => {
                self.install(|| run_parallel(view, out, self.band_rows, self.reduce_mode))
            }
            ExecutionStrategy::Chunked => self.install(|| run_chunked(view, out, self.chunk_count)),
        }
    }

    fn install<T: Send>(&self, work: impl FnOnce() -> T + Send) -> T {
        match &self.pool {
            Some(pool) => pool.install(work),
            None => work(),
        }
    }
}

fn validate<'a>(
    source: &str,
    view: core::result::Result<RasterView<'a>, crate::RasterError>,
) -> Result<RasterView<'a>> {
    view.map_err(|error| {
        warn!(source, code = %error.code(), %error, "rejecting invalid raster");
        LabelError::InvalidRaster {
            source_name: Arc::from(source),
            error,
        }
    })
}

/// Labels `cells` with the default configuration.
///
/// # Errors
/// Returns [`LabelError::InvalidRaster`] for zero dimensions, a length
/// mismatch or non-binary cells.
///
/// # Examples
/// ```
/// use shima_core::label;
///
/// let labelling = label(&[1, 1, 0, 0, 0, 1], 3, 2)?;
/// assert_eq!(labelling.labels(), &[1, 1, 0, 0, 0, 1]);
/// # Ok::<(), shima_core::LabelError>(())
/// ```
pub fn label(cells: &[u8], width: usize, height: usize) -> Result<Labelling> {
    Labeller::default().label(cells, width, height)
}

/// Labels `cells` into `out` with the default configuration.
///
/// # Errors
/// Same as [`Labeller::label_into`].
pub fn label_into(cells: &[u8], width: usize, height: usize, out: &mut [u32]) -> Result<u32> {
    Labeller::default().label_into(cells, width, height, out)
}
