//! Navigation interceptor.
//!
//! [`SubstepNavigator`] reacts to the host's semantic navigation events. On
//! `next`/`prev` it first tries to reveal or conceal a substep group on the
//! current step and, when that succeeds, tells the host to abort the step
//! transition. Once a step's substeps are exhausted the transition proceeds
//! and the destination step is reset to the baseline matching the direction
//! of travel. Direct jumps (`goto`) reset the source to its fully-visible
//! baseline and prepare the target as a fresh entry.
//!
//! The navigator also owns the [`ActiveStepPointer`], the step that receives
//! [`SubstepCommand`]s issued outside of any transition.

use substep_types::{
    NavigationReason, PreStepLeave, PrevMode, Presentation, Step, StepEnter, StepId, SubstepCommand, SubstepEvent, SubstepRef,
    Transition,
};
use tracing::debug;

use crate::{
    config::{ExhaustedConceal, SubstepConfig},
    conceal::{Retreat, retreat},
    replay::{reset_substeps, restart, rewind},
    reveal::reveal_next,
    sink::EventSink,
};

/// The step currently addressed by external show/hide commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActiveStepPointer(Option<StepId>);

impl ActiveStepPointer {
    pub fn get(&self) -> Option<StepId> {
        self.0
    }

    fn point_at(&mut self, step: Option<StepId>) {
        self.0 = step;
    }
}

/// Event-driven substep controller.
#[derive(Clone, Debug, Default)]
pub struct SubstepNavigator {
    config: SubstepConfig,
    active_step: ActiveStepPointer,
}

impl SubstepNavigator {
    pub fn new(config: SubstepConfig) -> Self {
        Self {
            config,
            active_step: ActiveStepPointer::default(),
        }
    }

    pub fn config(&self) -> &SubstepConfig {
        &self.config
    }

    pub fn active_step(&self) -> Option<StepId> {
        self.active_step.get()
    }

    /// Handles the host's pre-transition event and returns whether the host
    /// may leave the current step.
    pub fn pre_step_leave(&mut self, presentation: &mut Presentation, event: PreStepLeave, sink: &mut impl EventSink) -> Transition {
        // unknown targets are treated as missing
        let target = event.target.filter(|&target| presentation.step(target).is_some());
        if target != event.target {
            debug!(step = %event.current, target = ?event.target, "pre-leave target unknown; treating as missing");
        }
        let event = PreStepLeave { target, ..event };

        let Some(current) = presentation.step_mut(event.current) else {
            debug!(step = %event.current, reason = %event.reason, "pre-leave for unknown step ignored");
            return Transition::Proceed;
        };

        match event.reason {
            NavigationReason::Next => {
                if let Some(index) = reveal_next(current) {
                    let substep = SubstepRef::new(event.current, index);
                    sink.emit(SubstepEvent::Enter {
                        step: event.current,
                        reason: NavigationReason::Next,
                        substep,
                    });
                    return self.abort(event, substep, sink);
                }
                self.pass_through(event);
                if let Some(target) = event.target {
                    self.restart_step(presentation, target, sink);
                }
                Transition::Proceed
            }
            NavigationReason::Prev => {
                if let Some(index) = self.conceal(current) {
                    return self.abort(event, SubstepRef::new(event.current, index), sink);
                }
                self.pass_through(event);
                if let Some(target) = event.target {
                    self.enter_from_ahead(presentation, target, sink);
                }
                Transition::Proceed
            }
            NavigationReason::Goto => {
                let Some(target) = event.target else {
                    debug!(step = %event.current, "goto without target ignored");
                    return Transition::Proceed;
                };
                // leaving by jump looks the same as leaving after the last reveal
                reset_substeps(current, true);
                self.step_enter(presentation, StepEnter::jump(target), sink);
                Transition::Proceed
            }
        }
    }

    /// Handles the host's step-entered event. Only direct jumps (reason
    /// `goto` with no direction) are acted upon; every other entry was
    /// already prepared during the pre-leave phase.
    pub fn step_enter(&mut self, presentation: &mut Presentation, event: StepEnter, sink: &mut impl EventSink) {
        if event.reason != NavigationReason::Goto || event.direction.is_some() {
            return;
        }
        if presentation.step(event.step).is_none() {
            debug!(step = %event.step, "step-enter for unknown step ignored");
            return;
        }
        debug!(step = %event.step, "direct jump; resetting substeps");
        self.active_step.point_at(Some(event.step));
        self.restart_step(presentation, event.step, sink);
    }

    /// Runs an external command against the active step. Returns the
    /// revealed substep (for `ShowNext`) or the newly active one (for
    /// `HideLast`).
    pub fn handle_command(&mut self, presentation: &mut Presentation, command: SubstepCommand) -> Option<SubstepRef> {
        let step_id = self.active_step.get()?;
        let step = presentation.step_mut(step_id)?;
        let index = match command {
            SubstepCommand::ShowNext => reveal_next(step),
            SubstepCommand::HideLast => self.conceal(step),
        };
        debug!(step = %step_id, ?command, ?index, "substep command handled");
        index.map(|index| SubstepRef::new(step_id, index))
    }

    pub fn show_next(&mut self, presentation: &mut Presentation) -> Option<SubstepRef> {
        self.handle_command(presentation, SubstepCommand::ShowNext)
    }

    pub fn hide_last(&mut self, presentation: &mut Presentation) -> Option<SubstepRef> {
        self.handle_command(presentation, SubstepCommand::HideLast)
    }

    fn abort(&mut self, event: PreStepLeave, substep: SubstepRef, sink: &mut impl EventSink) -> Transition {
        debug!(step = %event.current, reason = %event.reason, %substep, "substep consumed navigation; aborting transition");
        self.active_step.point_at(Some(event.current));
        sink.emit(SubstepEvent::StepLeaveAborted {
            step: event.current,
            reason: event.reason,
            substep,
        });
        Transition::Abort
    }

    fn pass_through(&mut self, event: PreStepLeave) {
        debug!(step = %event.current, reason = %event.reason, target = ?event.target, "substeps exhausted; transition proceeds");
        self.active_step.point_at(event.target);
    }

    fn conceal(&self, step: &mut Step) -> Option<usize> {
        match retreat(step) {
            Retreat::Activated(index) => Some(index),
            Retreat::Emptied if step.active_on_entry && self.config.exhausted_conceal == ExhaustedConceal::Restart => {
                debug!("first group concealed on auto-activating step; restoring restart baseline");
                restart(step);
                None
            }
            Retreat::Emptied | Retreat::Exhausted => None,
        }
    }

    fn restart_step(&self, presentation: &mut Presentation, step_id: StepId, sink: &mut impl EventSink) {
        let Some(step) = presentation.step_mut(step_id) else {
            debug!(step = %step_id, "restart of unknown step ignored");
            return;
        };
        if let Some(index) = restart(step) {
            sink.emit(SubstepEvent::Enter {
                step: step_id,
                reason: NavigationReason::Next,
                substep: SubstepRef::new(step_id, index),
            });
        }
    }

    fn enter_from_ahead(&self, presentation: &mut Presentation, step_id: StepId, sink: &mut impl EventSink) {
        let Some(prev_mode) = presentation.step(step_id).map(|step| step.prev_mode.unwrap_or(self.config.default_prev_mode)) else {
            debug!(step = %step_id, "backward entry into unknown step ignored");
            return;
        };
        debug!(step = %step_id, ?prev_mode, "entering step from ahead");
        match prev_mode {
            PrevMode::Restart => self.restart_step(presentation, step_id, sink),
            PrevMode::Rewind => {
                if let Some(step) = presentation.step_mut(step_id) {
                    rewind(step);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::EventLog;

    fn deck() -> Presentation {
        Presentation::new(vec![
            Step::with_unordered(2),
            Step::with_unordered(3),
            Step::with_unordered(2).with_prev_mode(PrevMode::Restart),
        ])
    }

    #[test]
    fn next_reveals_and_aborts_until_exhausted() {
        let mut presentation = deck();
        let mut navigator = SubstepNavigator::default();
        let mut log = EventLog::new();

        let verdict = navigator.pre_step_leave(&mut presentation, PreStepLeave::next(StepId(0), StepId(1)), &mut log);
        assert_eq!(verdict, Transition::Abort);
        assert_eq!(navigator.active_step(), Some(StepId(0)));
        assert_eq!(
            log.events(),
            &[
                SubstepEvent::Enter {
                    step: StepId(0),
                    reason: NavigationReason::Next,
                    substep: SubstepRef::new(StepId(0), 0),
                },
                SubstepEvent::StepLeaveAborted {
                    step: StepId(0),
                    reason: NavigationReason::Next,
                    substep: SubstepRef::new(StepId(0), 0),
                },
            ]
        );

        navigator.pre_step_leave(&mut presentation, PreStepLeave::next(StepId(0), StepId(1)), &mut log);
        let verdict = navigator.pre_step_leave(&mut presentation, PreStepLeave::next(StepId(0), StepId(1)), &mut log);
        assert_eq!(verdict, Transition::Proceed);
        assert_eq!(navigator.active_step(), Some(StepId(1)));
        assert!(presentation.steps[1].visible_indices().is_empty());
    }

    #[test]
    fn prev_with_restart_policy_restarts_destination() {
        let mut presentation = deck();
        presentation.steps[2].active_on_entry = true;
        presentation.steps[2].substeps[1].show_active();
        let mut navigator = SubstepNavigator::default();
        let mut log = EventLog::new();

        let verdict = navigator.pre_step_leave(&mut presentation, PreStepLeave::prev(StepId(1), StepId(2)), &mut log);

        assert_eq!(verdict, Transition::Proceed);
        assert_eq!(presentation.steps[2].visible_indices(), vec![0]);
        assert_eq!(presentation.steps[2].active_indices(), vec![0]);
        assert_eq!(log.events().len(), 1);
        assert!(log.events()[0].is_enter());
    }

    #[test]
    fn prev_with_default_policy_rewinds_destination() {
        let mut presentation = deck();
        let mut navigator = SubstepNavigator::default();
        let mut log = EventLog::new();

        navigator.pre_step_leave(&mut presentation, PreStepLeave::prev(StepId(1), StepId(0)), &mut log);

        assert_eq!(presentation.steps[0].visible_indices(), vec![0, 1]);
        assert_eq!(presentation.steps[0].active_indices(), vec![1]);
        assert!(log.is_empty());
        assert_eq!(navigator.active_step(), Some(StepId(0)));
    }

    #[test]
    fn configured_default_prev_mode_applies_to_unset_steps() {
        let mut presentation = deck();
        presentation.steps[0].substeps[0].show_active();
        let mut navigator = SubstepNavigator::new(SubstepConfig::default().with_default_prev_mode(PrevMode::Restart));
        let mut log = EventLog::new();

        navigator.pre_step_leave(&mut presentation, PreStepLeave::prev(StepId(1), StepId(0)), &mut log);

        assert!(presentation.steps[0].visible_indices().is_empty());
    }

    #[test]
    fn unknown_current_step_is_a_no_op() {
        let mut presentation = deck();
        let mut navigator = SubstepNavigator::default();
        let mut log = EventLog::new();

        let verdict = navigator.pre_step_leave(&mut presentation, PreStepLeave::next(StepId(9), StepId(0)), &mut log);

        assert_eq!(verdict, Transition::Proceed);
        assert_eq!(navigator.active_step(), None);
        assert!(log.is_empty());
        assert_eq!(presentation, deck());
    }

    #[test]
    fn commands_without_active_step_do_nothing() {
        let mut presentation = deck();
        let mut navigator = SubstepNavigator::default();

        assert_eq!(navigator.show_next(&mut presentation), None);
        assert_eq!(navigator.hide_last(&mut presentation), None);
        assert_eq!(presentation, deck());
    }

    #[test]
    fn goto_to_unknown_target_leaves_source_untouched() {
        let mut presentation = deck();
        presentation.steps[1].substeps[0].show_active();
        let snapshot = presentation.clone();
        let mut navigator = SubstepNavigator::default();
        let mut log = EventLog::new();

        let verdict = navigator.pre_step_leave(&mut presentation, PreStepLeave::goto(StepId(1), StepId(7)), &mut log);

        assert_eq!(verdict, Transition::Proceed);
        assert_eq!(presentation, snapshot);
        assert_eq!(navigator.active_step(), None);
        assert!(log.is_empty());
    }

    #[test]
    fn pass_through_to_unknown_target_clears_active_step() {
        let mut presentation = deck();
        let mut navigator = SubstepNavigator::default();
        let mut log = EventLog::new();
        navigator.step_enter(&mut presentation, StepEnter::jump(StepId(0)), &mut log);
        assert_eq!(navigator.active_step(), Some(StepId(0)));

        let verdict = navigator.pre_step_leave(&mut presentation, PreStepLeave::prev(StepId(0), StepId(7)), &mut log);
        assert_eq!(verdict, Transition::Proceed);
        assert_eq!(navigator.active_step(), None);

        presentation.steps[0].substeps[0].visible = true;
        presentation.steps[0].substeps[1].visible = true;
        let verdict = navigator.pre_step_leave(&mut presentation, PreStepLeave::next(StepId(0), StepId(7)), &mut log);
        assert_eq!(verdict, Transition::Proceed);
        assert_eq!(navigator.active_step(), None);
        assert!(log.is_empty());
    }

    #[test]
    fn navigator_exposes_its_config() {
        let config = SubstepConfig::default()
            .with_default_prev_mode(PrevMode::Restart)
            .with_exhausted_conceal(ExhaustedConceal::Restart);
        let navigator = SubstepNavigator::new(config);
        assert_eq!(navigator.config(), &config);
        assert_eq!(SubstepNavigator::default().config(), &SubstepConfig::default());
    }
}
