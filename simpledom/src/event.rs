use std::time::Duration;

use crate::node::{ClassList, NodeId};
use crate::transitions::TransitionProperty;

/// Event types listeners can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    TransitionStart,
    TransitionEnd,
}

impl EventType {
    pub fn name(self) -> &'static str {
        match self {
            EventType::TransitionStart => "transitionstart",
            EventType::TransitionEnd => "transitionend",
        }
    }
}

/// A transition event delivered to a node's listeners.
///
/// Events bubble: listeners on every ancestor of `target` see them too.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionEvent {
    pub kind: EventType,
    /// The node whose transition started or ended.
    pub target: NodeId,
    /// The node whose listener is being called.
    pub current_target: NodeId,
    pub property: TransitionProperty,
    /// How long the transition had been running (zero for `transitionstart`).
    pub elapsed: Duration,
    /// The target's classes at dispatch time.
    pub class_list: ClassList,
}

/// Identifies a registered listener so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerOptions {
    /// Remove the listener after its first invocation.
    pub once: bool,
}

impl ListenerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn once() -> Self {
        Self { once: true }
    }
}

pub type ListenerFn = Box<dyn FnMut(&TransitionEvent) + Send>;

pub(crate) struct Listener {
    pub id: ListenerId,
    pub kind: EventType,
    pub once: bool,
    pub callback: ListenerFn,
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("once", &self.once)
            .finish_non_exhaustive()
    }
}
