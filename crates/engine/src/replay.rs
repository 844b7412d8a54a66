//! Bulk resets to the canonical baselines used on step entry.

use substep_types::Step;

use crate::{conceal::retreat, reveal::reveal_next};

/// Resets every substep of `step`.
///
/// With `to_visible == false` all flags are cleared. With `to_visible == true`
/// every substep becomes visible and none stays active.
pub fn reset_substeps(step: &mut Step, to_visible: bool) {
    for substep in &mut step.substeps {
        substep.visible = to_visible;
        substep.active = false;
    }
}

/// Hides everything, then reveals the first group if the step auto-activates.
/// Returns the revealed substep, if any.
pub fn restart(step: &mut Step) -> Option<usize> {
    reset_substeps(step, false);
    if step.active_on_entry { reveal_next(step) } else { None }
}

/// Shows everything and makes the last group active, ready to be concealed.
/// Returns the top-most active substep, if any.
pub fn rewind(step: &mut Step) -> Option<usize> {
    reset_substeps(step, true);
    retreat(step).activated()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_to_hidden_clears_both_flags() {
        let mut step = Step::with_unordered(3);
        step.substeps[0].visible = true;
        step.substeps[1].show_active();

        reset_substeps(&mut step, false);

        assert!(step.visible_indices().is_empty());
        assert!(step.active_indices().is_empty());
    }

    #[test]
    fn reset_to_visible_shows_all_without_active() {
        let mut step = Step::with_unordered(2);
        step.substeps[0].show_active();

        reset_substeps(&mut step, true);

        assert_eq!(step.visible_indices(), vec![0, 1]);
        assert!(step.active_indices().is_empty());
    }

    #[test]
    fn rewind_leaves_last_substep_active() {
        let mut step = Step::with_unordered(2);

        assert_eq!(rewind(&mut step), Some(1));
        assert_eq!(step.visible_indices(), vec![0, 1]);
        assert_eq!(step.active_indices(), vec![1]);
    }

    #[test]
    fn rewind_activates_the_whole_last_group() {
        let mut step = Step::with_order_keys(&[Some(2), Some(0), Some(2)]);

        assert_eq!(rewind(&mut step), Some(2));
        assert_eq!(step.active_indices(), vec![0, 2]);
    }

    #[test]
    fn restart_with_auto_activation_reveals_first_group() {
        let mut step = Step::with_unordered(3).with_active_on_entry(true);
        step.substeps[2].show_active();

        assert_eq!(restart(&mut step), Some(0));
        assert_eq!(step.visible_indices(), vec![0]);
        assert_eq!(step.active_indices(), vec![0]);
    }

    #[test]
    fn restart_without_auto_activation_hides_everything() {
        let mut step = Step::with_unordered(3);
        step.substeps[1].show_active();

        assert_eq!(restart(&mut step), None);
        assert!(step.visible_indices().is_empty());
        assert!(step.active_indices().is_empty());
    }
}
