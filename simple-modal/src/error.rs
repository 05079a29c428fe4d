//! Error types

/// Conditions the controller reports instead of acting.
///
/// These never reach callers of [`ModalController`](crate::ModalController)
/// operations: they are logged and the operation becomes a no-op.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModalError {
    /// No element matches the modal's selector.
    #[error("Modal with ID \"{modal_id}\" not found ({selector})")]
    NotFound { modal_id: String, selector: String },

    /// The requested action is neither `open` nor `close`.
    #[error("Unknown action: {action}")]
    UnknownAction { action: String },
}

impl ModalError {
    pub fn not_found(modal_id: impl Into<String>, selector: impl Into<String>) -> Self {
        Self::NotFound {
            modal_id: modal_id.into(),
            selector: selector.into(),
        }
    }

    pub fn unknown_action(action: impl Into<String>) -> Self {
        Self::UnknownAction {
            action: action.into(),
        }
    }
}
