use std::fmt;
use std::str::FromStr;

use simpledom::ClassList;

use crate::config::ModalClasses;
use crate::error::ModalError;

/// What a toggle should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalAction {
    Open,
    Close,
}

impl ModalAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ModalAction::Open => "open",
            ModalAction::Close => "close",
        }
    }
}

impl fmt::Display for ModalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModalAction {
    type Err = ModalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(ModalAction::Open),
            "close" => Ok(ModalAction::Close),
            other => Err(ModalError::unknown_action(other)),
        }
    }
}

/// Visible state of a modal, read off its class list.
///
/// The class list is the source of truth; this is only a view of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalState {
    Hidden,
    Opening,
    Shown,
    Closing,
}

impl ModalState {
    pub fn from_classes(list: &ClassList, classes: &ModalClasses) -> Self {
        let show = list.contains(&classes.show);
        if list.contains(&classes.fade_out) {
            ModalState::Closing
        } else if show && list.contains(&classes.fade) {
            ModalState::Opening
        } else if show {
            ModalState::Shown
        } else {
            ModalState::Hidden
        }
    }

    /// True while a fade is in progress.
    pub fn is_fading(self) -> bool {
        matches!(self, ModalState::Opening | ModalState::Closing)
    }
}
