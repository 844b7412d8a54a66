//! Destinations for outbound substep events.

use substep_types::{StepId, SubstepEvent};

/// Receives events emitted by the navigator, in emission order.
pub trait EventSink {
    fn emit(&mut self, event: SubstepEvent);
}

impl EventSink for Vec<SubstepEvent> {
    fn emit(&mut self, event: SubstepEvent) {
        self.push(event);
    }
}

/// Recording sink with a few lookup helpers.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<SubstepEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SubstepEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&SubstepEvent> {
        self.events.last()
    }

    /// Events concerning `step`.
    pub fn for_step(&self, step: StepId) -> impl Iterator<Item = &SubstepEvent> + '_ {
        self.events.iter().filter(move |event| event.step() == step)
    }

    /// Leave events only, for listeners that ignore enter events.
    pub fn leaves(&self) -> impl Iterator<Item = &SubstepEvent> + '_ {
        self.events.iter().filter(|event| event.is_leave())
    }

    /// Returns the recorded events and empties the log.
    pub fn drain(&mut self) -> Vec<SubstepEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: SubstepEvent) {
        self.events.push(event);
    }
}
