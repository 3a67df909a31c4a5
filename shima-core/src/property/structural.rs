//! Property 2: Structural guarantees of a labelling.
//!
//! - **Background invariance**: every background cell carries label `0`.
//! - **Foreground coverage**: every foreground cell carries a non-zero label.
//! - **Density**: the non-zero labels are exactly `1..=K`.
//! - **Duplicate pairs**: replaying each pair several times, in either
//!   direction, leaves the labels unchanged.
//! - **Statistics**: component sizes add up to the foreground count and every
//!   cell lies inside its component's bounding box.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{
    CellPair, DisjointSet, Labelling, RasterView, apply_pairs, assign_labels, collect_pairs,
    compress_paths, label,
};

use super::types::RasterFixture;

/// Runs the structural invariant property for the given fixture.
pub(super) fn run_structural_invariants_property(fixture: &RasterFixture) -> TestCaseResult {
    let labelling = label(&fixture.cells, fixture.width, fixture.height)
        .map_err(|e| TestCaseError::fail(format!("labelling failed: {e}")))?;

    validate_background(fixture, &labelling)?;
    validate_density(fixture, &labelling)?;
    validate_duplicate_pairs(fixture, &labelling)?;
    validate_statistics(fixture, &labelling)?;
    Ok(())
}

fn validate_background(fixture: &RasterFixture, labelling: &Labelling) -> TestCaseResult {
    for (index, (&cell, &label)) in fixture.cells.iter().zip(labelling.labels()).enumerate() {
        if (cell == 0) != (label == 0) {
            return Err(TestCaseError::fail(format!(
                "cell {index} has value {cell} but label {label} ({})",
                fixture.describe()
            )));
        }
    }
    Ok(())
}

fn validate_density(fixture: &RasterFixture, labelling: &Labelling) -> TestCaseResult {
    let rebuilt =
        Labelling::try_from_labels(fixture.width, fixture.height, labelling.labels().to_vec())
            .map_err(|e| {
                TestCaseError::fail(format!("labels are not dense: {e} ({})", fixture.describe()))
            })?;
    if rebuilt.component_count() != labelling.component_count() {
        return Err(TestCaseError::fail(format!(
            "largest label {} differs from component count {} ({})",
            rebuilt.component_count(),
            labelling.component_count(),
            fixture.describe()
        )));
    }
    Ok(())
}

fn validate_duplicate_pairs(fixture: &RasterFixture, labelling: &Labelling) -> TestCaseResult {
    let view = RasterView::try_new(&fixture.cells, fixture.width, fixture.height)
        .map_err(|e| TestCaseError::fail(format!("fixture is invalid: {e}")))?;
    let pairs = collect_pairs(&view);
    let replayed: Vec<CellPair> = pairs
        .iter()
        .chain(pairs.iter().rev())
        .copied()
        .chain(pairs.iter().map(|&(left, right)| (right, left)))
        .collect();

    let mut set = DisjointSet::for_raster(&view);
    apply_pairs(&mut set, &replayed);
    compress_paths(&mut set);
    let (labels, count) = assign_labels(&view, &set)
        .map_err(|e| TestCaseError::fail(format!("label assignment failed: {e}")))?;

    if count != labelling.component_count() || labels != labelling.labels() {
        return Err(TestCaseError::fail(format!(
            "replaying {} pairs three times changed the labels ({})",
            pairs.len(),
            fixture.describe()
        )));
    }
    Ok(())
}

fn validate_statistics(fixture: &RasterFixture, labelling: &Labelling) -> TestCaseResult {
    let foreground = fixture.cells.iter().filter(|&&cell| cell == 1).count();
    let sizes = labelling.component_sizes();
    if sizes.iter().sum::<usize>() != foreground || sizes.contains(&0) {
        return Err(TestCaseError::fail(format!(
            "component sizes {sizes:?} do not partition {foreground} cells ({})",
            fixture.describe()
        )));
    }

    let stats = labelling.component_stats();
    for (index, &label) in labelling.labels().iter().enumerate() {
        if label == 0 {
            continue;
        }
        let (row, col) = (index / fixture.width, index % fixture.width);
        let bounds = stats[label as usize - 1].bounds;
        let inside = (bounds.min_row..=bounds.max_row).contains(&row)
            && (bounds.min_col..=bounds.max_col).contains(&col);
        if !inside {
            return Err(TestCaseError::fail(format!(
                "cell ({row}, {col}) lies outside {bounds:?} of label {label} ({})",
                fixture.describe()
            )));
        }
    }
    Ok(())
}
