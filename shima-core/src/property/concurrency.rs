//! Property 3: Scheduling independence.
//!
//! Relabels the same raster several times with the parallel strategies and
//! with every chunk count up to the raster height, asserting that each run
//! produces the baseline's exact labels. Differences here point at races in
//! pair merging or at seams the reconciler failed to stitch.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{ExecutionStrategy, Labeller, LabellerBuilder, Labelling, ReduceMode, label};

use crate::test_utils::repeat_runs;

use super::types::RasterFixture;

/// Runs the scheduling independence property for the given fixture.
pub(super) fn run_concurrency_safety_property(fixture: &RasterFixture) -> TestCaseResult {
    let baseline = label(&fixture.cells, fixture.width, fixture.height)
        .map_err(|e| TestCaseError::fail(format!("baseline labelling failed: {e}")))?;

    for mode in [ReduceMode::Sequential, ReduceMode::Locked] {
        let labeller = build(
            LabellerBuilder::new()
                .with_execution_strategy(ExecutionStrategy::Parallel)
                .with_reduce_mode(mode)
                .with_band_rows(1),
        )?;
        for run in 0..repeat_runs() {
            let labelling = run_once(&labeller, fixture)?;
            compare(&baseline, &labelling, fixture, &format!("{mode:?} run {run}"))?;
        }
    }

    for chunks in 1..=fixture.height {
        let labeller = build(
            LabellerBuilder::new()
                .with_execution_strategy(ExecutionStrategy::Chunked)
                .with_chunk_count(chunks),
        )?;
        let labelling = run_once(&labeller, fixture)?;
        compare(&baseline, &labelling, fixture, &format!("{chunks} chunks"))?;
    }

    Ok(())
}

fn build(builder: LabellerBuilder) -> Result<Labeller, TestCaseError> {
    builder
        .build()
        .map_err(|e| TestCaseError::fail(format!("labeller config rejected: {e}")))
}

fn run_once(labeller: &Labeller, fixture: &RasterFixture) -> Result<Labelling, TestCaseError> {
    labeller
        .label(&fixture.cells, fixture.width, fixture.height)
        .map_err(|e| TestCaseError::fail(format!("labelling failed: {e} ({})", fixture.describe())))
}

fn compare(
    baseline: &Labelling,
    labelling: &Labelling,
    fixture: &RasterFixture,
    context: &str,
) -> TestCaseResult {
    if !baseline.same_partition(labelling) {
        return Err(TestCaseError::fail(format!(
            "{context}: partition diverged from baseline ({})",
            fixture.describe()
        )));
    }
    // Identical partitions plus row-major numbering imply identical labels.
    if baseline.labels() != labelling.labels() {
        return Err(TestCaseError::fail(format!(
            "{context}: label numbering diverged from baseline ({})",
            fixture.describe()
        )));
    }
    Ok(())
}
