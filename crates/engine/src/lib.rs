//! # Substep Engine
//!
//! Drives incremental reveal of substeps inside presentation steps. A step may
//! hold an ordered set of substeps; navigating forward reveals them one group
//! at a time and navigating backward conceals them again, and the host's step
//! transition is only allowed once the current step has nothing left to show
//! or hide.
//!
//! ## Usage
//!
//! ```rust
//! use substep_engine::{EventLog, SubstepConfig, SubstepNavigator};
//! use substep_types::{PreStepLeave, Presentation, Step, StepId, Transition};
//!
//! let mut presentation = Presentation::new(vec![Step::with_unordered(2), Step::new()]);
//! let mut navigator = SubstepNavigator::new(SubstepConfig::default());
//! let mut log = EventLog::new();
//!
//! let verdict = navigator.pre_step_leave(&mut presentation, PreStepLeave::next(StepId(0), StepId(1)), &mut log);
//! assert_eq!(verdict, Transition::Abort);
//! assert_eq!(presentation.steps[0].visible_indices(), vec![0]);
//! ```
//!
//! ## Architecture
//!
//! - **`order`**: reveal ordering of a step's substeps
//! - **`reveal`** / **`conceal`**: move the visible frontier by one group
//! - **`replay`**: hidden and fully-visible baselines, restart and rewind
//! - **`navigator`**: event handling, transition aborts, active step pointer
//! - **`sink`**: outbound event destinations
//! - **`config`**: navigator tunables

use std::{fs, path::Path};

use anyhow::{Context, Result};
use substep_types::{Element, Presentation};

pub mod conceal;
pub mod config;
pub mod navigator;
pub mod order;
pub mod replay;
pub mod reveal;
pub mod sink;

pub use conceal::{Retreat, conceal_previous, retreat};
pub use config::{CONFIG_PATH_ENV, ConfigError, ExhaustedConceal, SubstepConfig};
pub use navigator::{ActiveStepPointer, SubstepNavigator};
pub use order::{sorted_substeps, sorted_visible_substeps};
pub use replay::{reset_substeps, restart, rewind};
pub use reveal::reveal_next;
pub use sink::{EventLog, EventSink};

/// Reads a document tree from disk. Files ending in `.json` are parsed as
/// JSON; everything else is parsed as YAML.
pub fn parse_document_file(file_path: impl AsRef<Path>) -> Result<Element> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path).with_context(|| format!("Failed to read document file: {}", file_path.display()))?;

    let is_json = file_path.extension().is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    let element = if is_json {
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON document: {}", file_path.display()))?
    } else {
        serde_yaml::from_str(&content).with_context(|| format!("Invalid YAML document: {}", file_path.display()))?
    };
    Ok(element)
}

/// Reads a document tree and builds the presentation from it. The tree is
/// returned too so flags can be written back with
/// [`Presentation::write_to_document`].
pub fn load_presentation_file(file_path: impl AsRef<Path>) -> Result<(Element, Presentation)> {
    let root = parse_document_file(file_path)?;
    let presentation = Presentation::from_document(&root);
    Ok((root, presentation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_presentation_file_yaml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("deck.yaml");
        let content = r#"
id: deck
children:
  - id: intro
    classes: [step]
    attributes:
      data-substep-prev-mode: restart
    children:
      - classes: [substep]
      - classes: [substep]
        attributes:
          data-substep-order: "0"
  - id: outro
    classes: [step]
"#;
        fs::write(&path, content).unwrap();

        let (root, presentation) = load_presentation_file(&path).expect("load deck");
        assert_eq!(root.id.as_deref(), Some("deck"));
        assert_eq!(presentation.steps.len(), 2);
        assert_eq!(sorted_substeps(&presentation.steps[0]), vec![1, 0]);
    }

    #[test]
    fn test_load_presentation_file_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("deck.json");
        let content = r#"{"children": [{"id": "only", "classes": ["step"], "children": [{"classes": ["substep"]}]}]}"#;
        fs::write(&path, content).unwrap();

        let (_, presentation) = load_presentation_file(&path).expect("load deck");
        assert_eq!(presentation.step_by_element_id("only").map(|id| id.0), Some(0));
        assert_eq!(presentation.steps[0].substeps.len(), 1);
    }

    #[test]
    fn test_load_presentation_file_tolerates_bad_order_key() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("deck.yaml");
        let content = r#"
children:
  - classes: [step]
    children:
      - classes: [substep]
        attributes:
          data-substep-order: "first"
"#;
        fs::write(&path, content).unwrap();

        let (_, presentation) = load_presentation_file(&path).expect("load deck");
        assert_eq!(presentation.steps[0].substeps[0].order, None);
    }

    #[test]
    fn test_parse_document_file_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(parse_document_file(temp_dir.path().join("absent.yaml")).is_err());
    }
}
