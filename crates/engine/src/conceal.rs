//! Conceal engine: retreats the visible frontier by one group.

use substep_types::Step;

use crate::order::{same_group, sorted_visible_substeps};

/// Outcome of a single retreat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Retreat {
    /// The active group was hidden and the group before it became active.
    /// Carries the top-most newly active substep.
    Activated(usize),
    /// The first group was hidden; nothing is active any more.
    Emptied,
    /// Nothing was visible, so nothing changed.
    Exhausted,
}

impl Retreat {
    pub fn activated(self) -> Option<usize> {
        match self {
            Self::Activated(index) => Some(index),
            Self::Emptied | Self::Exhausted => None,
        }
    }
}

/// Hides the active group of `step` and activates the group before it.
///
/// When nothing is active (for instance right after a reset to the visible
/// baseline) the last visible group becomes active and nothing is hidden.
pub fn retreat(step: &mut Step) -> Retreat {
    let visible = sorted_visible_substeps(step);
    if visible.is_empty() {
        return Retreat::Exhausted;
    }

    let mut first_active = None;
    for (position, &index) in visible.iter().enumerate() {
        let substep = &mut step.substeps[index];
        if substep.active {
            first_active.get_or_insert(position);
            substep.hide();
        }
    }

    let first_active = first_active.unwrap_or(visible.len());
    if first_active == 0 {
        return Retreat::Emptied;
    }

    let anchor = visible[first_active - 1];
    step.substeps[anchor].active = true;
    for &index in visible[..first_active - 1].iter().rev() {
        if !same_group(&step.substeps[anchor], &step.substeps[index]) {
            break;
        }
        step.substeps[index].active = true;
    }
    Retreat::Activated(anchor)
}

/// Conceals the active group of `step`, returning the new top-most active
/// substep, or `None` when nothing is left to retreat to.
pub fn conceal_previous(step: &mut Step) -> Option<usize> {
    retreat(step).activated()
}
