//! Property 1: Equivalence with the flood-fill oracle.
//!
//! Every execution strategy must reproduce the oracle's labels exactly: same
//! partition, same component count and, because both number components by
//! row-major first occurrence, the same label values.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{ExecutionStrategy, LabellerBuilder, ReduceMode};

use super::oracle::flood_fill_labels;
use super::types::RasterFixture;

/// Strategy configurations compared against the oracle.
const CONFIGURATIONS: [(ExecutionStrategy, ReduceMode, usize); 5] = [
    (ExecutionStrategy::Sequential, ReduceMode::Sequential, 1),
    (ExecutionStrategy::Parallel, ReduceMode::Sequential, 3),
    (ExecutionStrategy::Parallel, ReduceMode::Locked, 2),
    (ExecutionStrategy::Chunked, ReduceMode::Sequential, 4),
    (ExecutionStrategy::Chunked, ReduceMode::Sequential, 7),
];

/// Runs the oracle equivalence property for the given fixture.
pub(super) fn run_oracle_equivalence_property(fixture: &RasterFixture) -> TestCaseResult {
    let oracle = flood_fill_labels(&fixture.cells, fixture.width, fixture.height);

    for (strategy, mode, knob) in CONFIGURATIONS {
        let labeller = LabellerBuilder::new()
            .with_execution_strategy(strategy)
            .with_reduce_mode(mode)
            .with_band_rows(knob)
            .with_chunk_count(knob)
            .build()
            .map_err(|e| TestCaseError::fail(format!("labeller config rejected: {e}")))?;
        let labelling = labeller
            .label(&fixture.cells, fixture.width, fixture.height)
            .map_err(|e| {
                TestCaseError::fail(format!(
                    "{strategy:?} labelling failed: {e} ({})",
                    fixture.describe()
                ))
            })?;

        if labelling.component_count() != oracle.component_count {
            return Err(TestCaseError::fail(format!(
                "{strategy:?}/{mode:?}/{knob}: component count {} != oracle {} ({})",
                labelling.component_count(),
                oracle.component_count,
                fixture.describe(),
            )));
        }
        if labelling.labels() != oracle.labels.as_slice() {
            return Err(TestCaseError::fail(format!(
                "{strategy:?}/{mode:?}/{knob}: labels differ from oracle ({})",
                fixture.describe(),
            )));
        }
    }

    Ok(())
}
