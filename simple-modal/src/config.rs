//! Controller configuration

use serde::{Deserialize, Serialize};

/// Class names that encode the modal's visible state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalClasses {
    /// Present while the modal is shown. Default: `show`
    pub show: String,
    /// Present while the modal is hidden. Default: `hide`
    pub hide: String,
    /// Drives the opacity transition. Default: `fade`
    pub fade: String,
    /// Added alongside `fade` when closing. Default: `fade-out`
    pub fade_out: String,
}

impl Default for ModalClasses {
    fn default() -> Self {
        Self {
            show: "show".to_string(),
            hide: "hide".to_string(),
            fade: "fade".to_string(),
            fade_out: "fade-out".to_string(),
        }
    }
}

/// Configuration for a [`ModalController`](crate::ModalController).
///
/// # Example
///
/// ```
/// use simple_modal::ModalConfig;
///
/// let config = ModalConfig::default().with_id_prefix("dialog-");
/// assert_eq!(config.element_id(3), "dialog-3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    /// Prefix joined with the modal identifier to form the element id.
    ///
    /// Default: `simple-modal-`
    pub id_prefix: String,

    pub classes: ModalClasses,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            id_prefix: "simple-modal-".to_string(),
            classes: ModalClasses::default(),
        }
    }
}

impl ModalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn with_classes(mut self, classes: ModalClasses) -> Self {
        self.classes = classes;
        self
    }

    /// Element id for a modal identifier, e.g. `simple-modal-7`.
    pub fn element_id(&self, modal_id: impl std::fmt::Display) -> String {
        format!("{}{}", self.id_prefix, modal_id)
    }

    /// Selector for a modal identifier, e.g. `#simple-modal-7`.
    pub fn selector(&self, modal_id: impl std::fmt::Display) -> String {
        format!("#{}", self.element_id(modal_id))
    }
}
