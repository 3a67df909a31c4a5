//! Row-major first-occurrence label assignment.

use crate::{
    disjoint_set::DisjointSet,
    error::{LabelError, Result},
    raster::RasterView,
};

/// Maps keys from a bounded key space to dense labels `1..=K` in the order
/// the keys are first seen.
///
/// # Examples
/// ```
/// use shima_core::Relabeller;
///
/// let mut relabeller = Relabeller::new(10);
/// assert_eq!(relabeller.label_for(7)?, 1);
/// assert_eq!(relabeller.label_for(3)?, 2);
/// assert_eq!(relabeller.label_for(7)?, 1);
/// assert_eq!(relabeller.assigned(), 2);
/// # Ok::<(), shima_core::LabelError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Relabeller {
    slots: Vec<u32>,
    assigned: u32,
}

impl Relabeller {
    /// Creates a relabeller for keys in `0..key_space`.
    #[must_use]
    pub fn new(key_space: usize) -> Self {
        Self {
            slots: vec![0; key_space],
            assigned: 0,
        }
    }

    /// Returns the label of `key`, assigning the next one on first sight.
    ///
    /// # Errors
    /// Returns [`LabelError::TooManyComponents`] once `u32::MAX` labels are
    /// in use.
    pub fn label_for(&mut self, key: usize) -> Result<u32> {
        debug_assert!(key < self.slots.len(), "key {key} outside relabeller");
        let slot = &mut self.slots[key];
        if *slot == 0 {
            let next = self
                .assigned
                .checked_add(1)
                .ok_or(LabelError::TooManyComponents { max: u32::MAX })?;
            self.assigned = next;
            *slot = next;
        }
        Ok(*slot)
    }

    /// Number of labels handed out so far.
    #[must_use]
    #[rustfmt::skip]
    pub fn assigned(&self) -> u32 { self.assigned }
}

/// Writes labels for a compressed `set` into `out`, returning the component
/// count.
///
/// Cells are visited row-major; each root gets the next label on its first
/// occurrence and background cells get `0`.
///
/// # Errors
/// Returns [`LabelError::OutputLengthMismatch`] when `out` does not match the
/// raster, and [`LabelError::TooManyComponents`] if labels overflow `u32`.
pub fn assign_labels_into(
    view: &RasterView<'_>,
    set: &DisjointSet,
    out: &mut [u32],
) -> Result<u32> {
    if out.len() != view.len() {
        return Err(LabelError::OutputLengthMismatch {
            out: out.len(),
            expected: view.len(),
        });
    }
    let mut relabeller = Relabeller::new(set.len());
    for (index, slot) in out.iter_mut().enumerate() {
        *slot = if set.is_member(index) {
            relabeller.label_for(set.root_of(index))?
        } else {
            0
        };
    }
    Ok(relabeller.assigned())
}

/// Allocating form of [`assign_labels_into`].
///
/// # Errors
/// Returns [`LabelError::TooManyComponents`] if labels overflow `u32`.
pub fn assign_labels(view: &RasterView<'_>, set: &DisjointSet) -> Result<(Vec<u32>, u32)> {
    let mut labels = vec![0; view.len()];
    let count = assign_labels_into(view, set, &mut labels)?;
    Ok((labels, count))
}
