//! Typed navigation events exchanged with the host presentation engine.
//!
//! Inbound events ([`PreStepLeave`], [`StepEnter`], [`SubstepCommand`]) are
//! dispatched by the host one at a time. Outbound [`SubstepEvent`]s are
//! emitted by the navigator while it handles an inbound event.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{StepId, SubstepRef};

/// Why the host is moving between steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationReason {
    Next,
    Prev,
    Goto,
}

impl fmt::Display for NavigationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Next => "next",
            Self::Prev => "prev",
            Self::Goto => "goto",
        };
        f.write_str(label)
    }
}

/// Directional relation between the previous and the entered step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

/// Raised by the host before it leaves `current`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreStepLeave {
    pub current: StepId,
    #[serde(default)]
    pub target: Option<StepId>,
    pub reason: NavigationReason,
}

impl PreStepLeave {
    pub fn new(current: StepId, target: Option<StepId>, reason: NavigationReason) -> Self {
        Self { current, target, reason }
    }

    pub fn next(current: StepId, target: StepId) -> Self {
        Self::new(current, Some(target), NavigationReason::Next)
    }

    pub fn prev(current: StepId, target: StepId) -> Self {
        Self::new(current, Some(target), NavigationReason::Prev)
    }

    pub fn goto(current: StepId, target: StepId) -> Self {
        Self::new(current, Some(target), NavigationReason::Goto)
    }
}

/// Raised by the host whenever a step becomes current.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEnter {
    pub step: StepId,
    pub reason: NavigationReason,
    /// Present when the host reached the step by relative movement.
    #[serde(default)]
    pub direction: Option<Direction>,
}

impl StepEnter {
    /// A direct jump with no directional relation (reload, external navigation).
    pub fn jump(step: StepId) -> Self {
        Self {
            step,
            reason: NavigationReason::Goto,
            direction: None,
        }
    }
}

/// Zero-payload commands that act on the navigator's active step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubstepCommand {
    ShowNext,
    HideLast,
}

/// Verdict returned to the host from a pre-leave event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Proceed,
    Abort,
}

impl Transition {
    pub fn is_abort(self) -> bool {
        matches!(self, Self::Abort)
    }
}

/// Events emitted to the host and its listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubstepEvent {
    /// A group of substeps was revealed.
    Enter {
        step: StepId,
        reason: NavigationReason,
        substep: SubstepRef,
    },
    /// The pending step transition was aborted because a substep consumed the
    /// navigation. Listeners that only follow leave semantics treat this as
    /// the step's leave event; see [`SubstepEvent::is_leave`].
    StepLeaveAborted {
        step: StepId,
        reason: NavigationReason,
        substep: SubstepRef,
    },
}

impl SubstepEvent {
    pub fn step(&self) -> StepId {
        match self {
            Self::Enter { step, .. } | Self::StepLeaveAborted { step, .. } => *step,
        }
    }

    pub fn reason(&self) -> NavigationReason {
        match self {
            Self::Enter { reason, .. } | Self::StepLeaveAborted { reason, .. } => *reason,
        }
    }

    pub fn substep(&self) -> SubstepRef {
        match self {
            Self::Enter { substep, .. } | Self::StepLeaveAborted { substep, .. } => *substep,
        }
    }

    pub fn is_enter(&self) -> bool {
        matches!(self, Self::Enter { .. })
    }

    pub fn is_leave(&self) -> bool {
        matches!(self, Self::StepLeaveAborted { .. })
    }
}
