//! Reveal engine: advances the visible frontier by one group.

use substep_types::Step;

use crate::order::{same_group, sorted_substeps};

/// Reveals the next group of `step`.
///
/// Every substep loses its active flag first, so only the newly revealed group
/// ends up active. Returns the document-order index of the first member of
/// that group, or `None` once every substep is already visible.
pub fn reveal_next(step: &mut Step) -> Option<usize> {
    let order = sorted_substeps(step);
    if order.is_empty() {
        return None;
    }

    let frontier = step.substeps.iter().filter(|substep| substep.visible).count();
    for substep in &mut step.substeps {
        substep.active = false;
    }
    if frontier >= order.len() {
        return None;
    }

    let first = order[frontier];
    step.substeps[first].show_active();
    for &index in &order[frontier + 1..] {
        if !same_group(&step.substeps[first], &step.substeps[index]) {
            break;
        }
        step.substeps[index].show_active();
    }
    Some(first)
}
