//! A small, deterministic, browser-like element tree.
//!
//! Elements carry ids and class lists; a class-keyed [`Stylesheet`] turns
//! class changes into CSS-style transitions, and the [`Document`] frame loop
//! reports them through `transitionstart`/`transitionend` listeners.

pub mod animation;
pub mod error;
pub mod event;
pub mod selector;
pub mod style;
pub mod transitions;

mod document;
mod node;

pub use document::{Document, FrameCallback, FrameRequestId, FrameScheduler};
pub use error::{DomError, SelectorError};
pub use event::{EventType, ListenerFn, ListenerId, ListenerOptions, TransitionEvent};
pub use node::{ClassList, NodeId};
pub use selector::Selector;
pub use style::{ComputedStyle, Declarations, Display, PropertyValue, StyleRule, Stylesheet};
pub use transitions::{Easing, TransitionConfig, TransitionProperty, Transitions};
