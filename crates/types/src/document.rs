//! Document-tree boundary.
//!
//! The host keeps its slides in a tree of elements with classes and
//! string-keyed attributes. This module turns that tree into a typed
//! [`Presentation`] and writes the substep flags back as classes once the
//! navigator has mutated them. Attribute presence checks happen here and
//! nowhere else.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::model::{PrevMode, Presentation, Step, Substep};

/// Class marking a step element.
pub const STEP_CLASS: &str = "step";
/// Class marking a substep element.
pub const SUBSTEP_CLASS: &str = "substep";
/// Class carried by revealed substeps.
pub const SUBSTEP_VISIBLE_CLASS: &str = "substep-visible";
/// Class carried by the active group.
pub const SUBSTEP_ACTIVE_CLASS: &str = "substep-active";
/// Step attribute opting into auto-activation of the first group.
pub const SUBSTEP_ACTIVE_ATTR: &str = "data-substep-active";
/// Step attribute selecting the backward policy.
pub const SUBSTEP_PREV_MODE_ATTR: &str = "data-substep-prev-mode";
/// Substep attribute holding the order key.
pub const SUBSTEP_ORDER_ATTR: &str = "data-substep-order";

/// Errors raised while writing flags back to the element tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The tree no longer has the steps or substeps the presentation was built from.
    #[error("document shape does not match presentation: {0}")]
    ShapeMismatch(String),
}

/// A node in the host document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(&class.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|candidate| candidate == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|candidate| candidate != class);
    }

    pub fn set_class(&mut self, class: &str, present: bool) {
        if present {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

impl Presentation {
    /// Builds a presentation from the host document.
    ///
    /// Steps are collected depth-first and are not searched for nested steps.
    /// Every descendant of a step carrying the substep class becomes a
    /// substep, in depth-first document order. Malformed attributes are
    /// logged and fall back to their defaults.
    pub fn from_document(root: &Element) -> Self {
        let mut steps = Vec::new();
        collect_steps(root, &mut steps);
        Self::new(steps)
    }

    /// Mirrors the current substep flags onto the element tree as classes.
    pub fn write_to_document(&self, root: &mut Element) -> Result<(), DocumentError> {
        let mut cursor = 0;
        write_steps(root, &self.steps, &mut cursor)?;
        if cursor != self.steps.len() {
            return Err(DocumentError::ShapeMismatch(format!(
                "expected {} steps, found {}",
                self.steps.len(),
                cursor
            )));
        }
        Ok(())
    }
}

fn collect_steps(element: &Element, steps: &mut Vec<Step>) {
    if element.has_class(STEP_CLASS) {
        let step = build_step(element, steps.len());
        steps.push(step);
        return;
    }
    for child in &element.children {
        collect_steps(child, steps);
    }
}

fn build_step(element: &Element, step_position: usize) -> Step {
    let prev_mode = element.attribute(SUBSTEP_PREV_MODE_ATTR).and_then(|value| {
        let parsed = PrevMode::parse(value);
        if parsed.is_none() {
            warn!(step = step_position, value, "Unknown substep prev mode; using the configured default");
        }
        parsed
    });

    let mut substeps = Vec::new();
    collect_substeps(element, step_position, &mut substeps);

    Step {
        element_id: element.id.clone(),
        active_on_entry: element.attributes.contains_key(SUBSTEP_ACTIVE_ATTR),
        prev_mode,
        substeps,
    }
}

fn collect_substeps(element: &Element, step_position: usize, substeps: &mut Vec<Substep>) {
    for child in &element.children {
        if child.has_class(SUBSTEP_CLASS) {
            let order = child.attribute(SUBSTEP_ORDER_ATTR).and_then(|value| {
                let parsed = parse_order_key(value);
                if parsed.is_none() {
                    warn!(
                        step = step_position,
                        substep = substeps.len(),
                        value,
                        "Invalid substep order key; treating substep as unordered"
                    );
                }
                parsed
            });
            substeps.push(Substep {
                element_id: child.id.clone(),
                order,
                visible: child.has_class(SUBSTEP_VISIBLE_CLASS),
                active: child.has_class(SUBSTEP_ACTIVE_CLASS),
            });
        }
        collect_substeps(child, step_position, substeps);
    }
}

fn parse_order_key(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

fn write_steps(element: &mut Element, steps: &[Step], cursor: &mut usize) -> Result<(), DocumentError> {
    if element.has_class(STEP_CLASS) {
        let step = steps
            .get(*cursor)
            .ok_or_else(|| DocumentError::ShapeMismatch(format!("unexpected step element at position {}", *cursor)))?;
        let mut substep_cursor = 0;
        write_substeps(element, &step.substeps, &mut substep_cursor)?;
        if substep_cursor != step.substeps.len() {
            return Err(DocumentError::ShapeMismatch(format!(
                "step {} expected {} substeps, found {}",
                *cursor,
                step.substeps.len(),
                substep_cursor
            )));
        }
        *cursor += 1;
        return Ok(());
    }
    for child in &mut element.children {
        write_steps(child, steps, cursor)?;
    }
    Ok(())
}

fn write_substeps(element: &mut Element, substeps: &[Substep], cursor: &mut usize) -> Result<(), DocumentError> {
    for child in &mut element.children {
        if child.has_class(SUBSTEP_CLASS) {
            let substep = substeps
                .get(*cursor)
                .ok_or_else(|| DocumentError::ShapeMismatch(format!("unexpected substep element at position {}", *cursor)))?;
            child.set_class(SUBSTEP_VISIBLE_CLASS, substep.visible);
            child.set_class(SUBSTEP_ACTIVE_CLASS, substep.active);
            *cursor += 1;
        }
        write_substeps(child, substeps, cursor)?;
    }
    Ok(())
}
