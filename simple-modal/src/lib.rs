//! Fade modal dialogs in and out by toggling CSS classes.
//!
//! A modal is an element with id `simple-modal-<id>` whose visibility is
//! encoded in its classes (`show`, `hide`, `fade`, `fade-out`). The
//! [`ModalController`] flips those classes and the stylesheet animates the
//! result; [`Transition`]s resolve when the animation ends.
//!
//! ```
//! use simple_modal::ModalController;
//! use simpledom::{Document, Stylesheet};
//!
//! let mut doc = Document::with_stylesheet(Stylesheet::simple_modal());
//! let modal = doc.create_element("div");
//! doc.set_id(modal, "simple-modal-1").unwrap();
//! doc.add_class(modal, "hide");
//! let body = doc.body();
//! doc.append_child(body, modal).unwrap();
//!
//! let controller = ModalController::new();
//! let mut opening = controller.open(&mut doc, 1);
//! while !opening.is_settled() {
//!     doc.frame();
//! #   std::thread::sleep(std::time::Duration::from_millis(5));
//! }
//! assert!(doc.has_class(modal, "show"));
//! ```

pub mod config;
pub mod error;

mod controller;
mod lookup;
mod state;
mod transition;

pub use config::{ModalClasses, ModalConfig};
pub use controller::{ModalController, Subscription};
pub use error::ModalError;
pub use lookup::ElementLookup;
pub use state::{ModalAction, ModalState};
pub use transition::Transition;
