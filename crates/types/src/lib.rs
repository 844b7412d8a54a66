//! Shared types for substep navigation.
//!
//! - [`model`]: presentation, steps, substeps and their visibility flags.
//! - [`events`]: inbound navigation events and outbound substep events.
//! - [`document`]: conversion between the host element tree and the model.

pub mod document;
pub mod events;
pub mod model;

pub use document::{DocumentError, Element};
pub use events::{Direction, NavigationReason, PreStepLeave, StepEnter, SubstepCommand, SubstepEvent, Transition};
pub use model::{PrevMode, Presentation, Step, StepId, Substep, SubstepRef};
