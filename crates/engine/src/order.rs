//! Substep ordering.
//!
//! Substeps with an order key come first, ascending by key with ties kept in
//! document order; unkeyed substeps follow in document order.

use substep_types::{Step, Substep};

/// Returns document-order indices of every substep of `step`, in reveal order.
pub fn sorted_substeps(step: &Step) -> Vec<usize> {
    sort_indices(&step.substeps, 0..step.substeps.len())
}

/// Same ordering as [`sorted_substeps`], restricted to visible substeps.
pub fn sorted_visible_substeps(step: &Step) -> Vec<usize> {
    let visible = step
        .substeps
        .iter()
        .enumerate()
        .filter(|(_, substep)| substep.visible)
        .map(|(index, _)| index);
    sort_indices(&step.substeps, visible)
}

fn sort_indices(substeps: &[Substep], indices: impl Iterator<Item = usize>) -> Vec<usize> {
    let (mut keyed, unkeyed): (Vec<usize>, Vec<usize>) = indices.partition(|&index| substeps[index].order.is_some());
    // stable sort keeps document order among equal keys
    keyed.sort_by_key(|&index| substeps[index].order);
    keyed.extend(unkeyed);
    keyed
}

/// Whether two substeps belong to the same keyed group. Unkeyed substeps are
/// always their own group.
pub(crate) fn same_group(left: &Substep, right: &Substep) -> bool {
    left.order.is_some() && left.order == right.order
}
