//! Breadth-first flood-fill oracle for labelling property verification.
//!
//! Seeds are taken in row-major order, so the oracle numbers components by
//! first occurrence exactly as the pipeline does and its output can be
//! compared label for label.

use std::collections::VecDeque;

/// Result of the flood-fill oracle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct OracleLabels {
    /// Row-major labels, `0` for background.
    pub labels: Vec<u32>,
    /// Number of components found.
    pub component_count: u32,
}

/// Labels `cells` by flooding each unlabelled foreground cell in turn.
pub(super) fn flood_fill_labels(cells: &[u8], width: usize, height: usize) -> OracleLabels {
    let mut labels = vec![0_u32; cells.len()];
    let mut next = 0_u32;
    let mut queue = VecDeque::new();

    for seed in 0..cells.len() {
        if cells[seed] != 1 || labels[seed] != 0 {
            continue;
        }
        next += 1;
        labels[seed] = next;
        queue.push_back(seed);
        while let Some(index) = queue.pop_front() {
            let (row, col) = (index / width, index % width);
            for next_row in row.saturating_sub(1)..=(row + 1).min(height - 1) {
                for next_col in col.saturating_sub(1)..=(col + 1).min(width - 1) {
                    let other = next_row * width + next_col;
                    if cells[other] == 1 && labels[other] == 0 {
                        labels[other] = next;
                        queue.push_back(other);
                    }
                }
            }
        }
    }

    OracleLabels {
        labels,
        component_count: next,
    }
}
