//! Presentation data model.
//!
//! A [`Presentation`] owns its steps, and every [`Step`] owns its substeps in
//! document order. The `visible` and `active` flags on each [`Substep`] are the
//! visibility state store mutated by the navigation engine; nothing else in
//! the model carries mutable navigation state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a step inside its [`Presentation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StepId(pub usize);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step#{}", self.0)
    }
}

/// Addresses a single substep: the owning step plus its document-order index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubstepRef {
    pub step: StepId,
    pub index: usize,
}

impl SubstepRef {
    pub fn new(step: StepId, index: usize) -> Self {
        Self { step, index }
    }
}

impl fmt::Display for SubstepRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/substep#{}", self.step, self.index)
    }
}

/// Backward-navigation policy applied when a step is entered from ahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrevMode {
    /// Hide everything, then auto-reveal the first group if the step opts in.
    Restart,
    /// Show everything, with the last group active and ready to be concealed.
    #[default]
    Rewind,
}

impl PrevMode {
    /// Parses the attribute value form (`restart` / `rewind`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "restart" => Some(Self::Restart),
            "rewind" => Some(Self::Rewind),
            _ => None,
        }
    }
}

/// A reveal unit nested inside a step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substep {
    /// Element id from the source document, when the element had one.
    #[serde(default)]
    pub element_id: Option<String>,
    /// Optional order key; substeps sharing a key form an atomic group.
    #[serde(default)]
    pub order: Option<u32>,
    /// Revealed and still on screen.
    #[serde(default)]
    pub visible: bool,
    /// Part of the most recently revealed (or next to be concealed) group.
    #[serde(default)]
    pub active: bool,
}

impl Substep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ordered(order: u32) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }

    pub fn with_element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }

    /// Marks the substep as both visible and active.
    pub fn show_active(&mut self) {
        self.visible = true;
        self.active = true;
    }

    /// Clears both flags.
    pub fn hide(&mut self) {
        self.visible = false;
        self.active = false;
    }
}

/// One slide of the presentation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub element_id: Option<String>,
    /// Reveal the first group as soon as the step is entered.
    #[serde(default)]
    pub active_on_entry: bool,
    /// Explicit backward policy; `None` defers to the configured default.
    #[serde(default)]
    pub prev_mode: Option<PrevMode>,
    /// Substeps in document order.
    #[serde(default)]
    pub substeps: Vec<Substep>,
}

impl Step {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }

    pub fn with_active_on_entry(mut self, active_on_entry: bool) -> Self {
        self.active_on_entry = active_on_entry;
        self
    }

    pub fn with_prev_mode(mut self, prev_mode: PrevMode) -> Self {
        self.prev_mode = Some(prev_mode);
        self
    }

    pub fn with_substeps(mut self, substeps: impl IntoIterator<Item = Substep>) -> Self {
        self.substeps = substeps.into_iter().collect();
        self
    }

    /// Shorthand for a step holding `count` unordered substeps.
    pub fn with_unordered(count: usize) -> Self {
        Self::new().with_substeps((0..count).map(|_| Substep::new()))
    }

    /// Shorthand for a step whose substeps carry the given order keys.
    pub fn with_order_keys(keys: &[Option<u32>]) -> Self {
        Self::new().with_substeps(keys.iter().map(|key| Substep {
            order: *key,
            ..Substep::default()
        }))
    }

    pub fn has_substeps(&self) -> bool {
        !self.substeps.is_empty()
    }

    /// Document-order indices of visible substeps.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.flagged_indices(|substep| substep.visible)
    }

    /// Document-order indices of active substeps.
    pub fn active_indices(&self) -> Vec<usize> {
        self.flagged_indices(|substep| substep.active)
    }

    fn flagged_indices(&self, predicate: impl Fn(&Substep) -> bool) -> Vec<usize> {
        self.substeps
            .iter()
            .enumerate()
            .filter(|(_, substep)| predicate(substep))
            .map(|(index, _)| index)
            .collect()
    }
}

/// The full deck of steps, in presentation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Presentation {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn step(&self, id: StepId) -> Option<&Step> {
        self.steps.get(id.0)
    }

    pub fn step_mut(&mut self, id: StepId) -> Option<&mut Step> {
        self.steps.get_mut(id.0)
    }

    pub fn substep(&self, substep: SubstepRef) -> Option<&Substep> {
        self.step(substep.step).and_then(|step| step.substeps.get(substep.index))
    }

    /// Finds a step by the id of the element it was built from.
    pub fn step_by_element_id(&self, element_id: &str) -> Option<StepId> {
        self.steps
            .iter()
            .position(|step| step.element_id.as_deref() == Some(element_id))
            .map(StepId)
    }

    pub fn step_ids(&self) -> impl Iterator<Item = StepId> + '_ {
        (0..self.steps.len()).map(StepId)
    }
}
