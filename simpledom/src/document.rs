use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::animation::AnimationState;
use crate::error::{DomError, SelectorError};
use crate::event::{EventType, Listener, ListenerId, ListenerOptions, TransitionEvent};
use crate::node::{ClassList, Node, NodeId};
use crate::selector::Selector;
use crate::style::{ComputedStyle, PropertyValue, Stylesheet};
use crate::transitions::TransitionProperty;

/// Work queued with [`Document::request_animation_frame`].
pub type FrameCallback = Box<dyn FnOnce(&mut Document) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequestId(u64);

/// Sendable handle to a document's animation frame queue.
///
/// Event listeners can't borrow the document they are called from. They
/// capture a scheduler instead and queue the work for the next frame.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    queue: Arc<Mutex<Vec<(FrameRequestId, FrameCallback)>>>,
    next_id: Arc<AtomicU64>,
}

impl FrameScheduler {
    /// Queue `callback` to run at the end of the next frame.
    pub fn request_animation_frame<F>(&self, callback: F) -> FrameRequestId
    where
        F: FnOnce(&mut Document) + Send + 'static,
    {
        let id = FrameRequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, Box::new(callback)));
        id
    }

    /// Returns false if the callback already ran or was never queued.
    pub fn cancel_animation_frame(&self, id: FrameRequestId) -> bool {
        let mut queue = self.lock();
        let before = queue.len();
        queue.retain(|(queued, _)| *queued != id);
        queue.len() != before
    }

    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    fn take(&self) -> Vec<(FrameRequestId, FrameCallback)> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(FrameRequestId, FrameCallback)>> {
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

/// An element tree with a stylesheet, transition listeners and a frame loop.
///
/// Nothing happens on its own: the owner drives time by calling
/// [`frame`](Self::frame) or [`frame_at`](Self::frame_at). Each frame
/// 1. commits pending style changes, starting transitions,
/// 2. finishes transitions whose duration has elapsed, firing `transitionend`,
/// 3. runs the animation frame callbacks queued before the frame began.
///
/// Mutations made by those callbacks commit on the following frame.
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    stylesheet: Stylesheet,
    animation: AnimationState,
    listeners: HashMap<NodeId, Vec<Listener>>,
    scheduler: FrameScheduler,
    next_listener_id: u64,
    frame_count: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("frame_count", &self.frame_count)
            .field("pending_callbacks", &self.scheduler.pending())
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create an empty document: a root `html` node holding a `body`.
    pub fn new() -> Self {
        let mut root = Node::new("html");
        let mut body = Node::new("body");
        let root_id = NodeId(0);
        let body_id = NodeId(1);
        body.parent = Some(root_id);
        root.children.push(body_id);

        Self {
            nodes: vec![root, body],
            root: root_id,
            body: body_id,
            stylesheet: Stylesheet::default(),
            animation: AnimationState::new(),
            listeners: HashMap::new(),
            scheduler: FrameScheduler::default(),
            next_listener_id: 0,
            frame_count: 0,
        }
    }

    pub fn with_stylesheet(stylesheet: Stylesheet) -> Self {
        Self {
            stylesheet,
            ..Self::new()
        }
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    pub fn set_stylesheet(&mut self, stylesheet: Stylesheet) {
        self.stylesheet = stylesheet;
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(id.0).ok_or(DomError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes.get_mut(id.0).ok_or(DomError::UnknownNode(id))
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(tag));
        id
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.node(node).ok().map(|n| n.tag.as_str())
    }

    pub fn set_id(&mut self, node: NodeId, id: impl Into<String>) -> Result<(), DomError> {
        self.node_mut(node)?.id = Some(id.into());
        Ok(())
    }

    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.node(node).ok()?.id.as_deref()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).ok()?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Whether `node` is reachable from the document root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Move `child` to the end of `parent`'s children, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.node(parent)?;
        self.node(child)?;
        if child == self.root || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        log::trace!("{child} appended to {parent}");
        Ok(())
    }

    /// Remove `node` from its parent. Detached nodes are left as they are.
    pub fn detach(&mut self, node: NodeId) -> Result<(), DomError> {
        let Some(parent) = self.node(node)?.parent else {
            return Ok(());
        };
        self.node_mut(parent)?.children.retain(|&c| c != node);
        self.node_mut(node)?.parent = None;
        Ok(())
    }

    /// Attached nodes in tree order.
    fn attached_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// First attached element matching `selector`, in tree order.
    ///
    /// Unsupported selectors are logged and match nothing.
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        match self.try_query_selector(selector) {
            Ok(found) => found,
            Err(e) => {
                log::warn!("{e}");
                None
            }
        }
    }

    pub fn try_query_selector(&self, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .attached_nodes()
            .into_iter()
            .find(|&id| self.nodes.get(id.0).is_some_and(|n| selector.matches(n))))
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let selector = Selector::Id(id.to_string());
        self.attached_nodes()
            .into_iter()
            .find(|&n| self.nodes.get(n.0).is_some_and(|node| selector.matches(node)))
    }

    // =========================================================================
    // Class list
    // =========================================================================

    pub fn class_list(&self, node: NodeId) -> Option<&ClassList> {
        self.node(node).ok().map(|n| &n.classes)
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.class_list(node).is_some_and(|c| c.contains(class))
    }

    /// Add a class. Returns true if the class list changed.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> bool {
        let changed = self.node_mut(node).is_ok_and(|n| n.classes.add(class));
        if changed {
            log::trace!("{node} +.{class}");
        }
        changed
    }

    /// Remove a class. Returns true if the class list changed.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> bool {
        let changed = self.node_mut(node).is_ok_and(|n| n.classes.remove(class));
        if changed {
            log::trace!("{node} -.{class}");
        }
        changed
    }

    /// Flip a class. Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        self.node_mut(node).is_ok_and(|n| n.classes.toggle(class))
    }

    // =========================================================================
    // Style
    // =========================================================================

    /// Style the node would have if committed now.
    pub fn computed_style(&self, node: NodeId) -> Option<ComputedStyle> {
        self.class_list(node).map(|c| self.stylesheet.compute(c))
    }

    /// Current animated value of a running transition.
    pub fn interpolated(
        &self,
        node: NodeId,
        property: TransitionProperty,
        now: Instant,
    ) -> Option<PropertyValue> {
        self.animation.interpolated(node, property, now)
    }

    pub fn is_transitioning(&self, node: NodeId, property: TransitionProperty) -> bool {
        self.animation.is_transitioning(node, property)
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.animation.set_reduced_motion(enabled);
    }

    /// True while a transition runs or animation frame callbacks are queued.
    pub fn has_pending_work(&self) -> bool {
        self.animation.has_active_transitions() || self.scheduler.pending() > 0
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub fn add_event_listener<F>(
        &mut self,
        node: NodeId,
        kind: EventType,
        options: ListenerOptions,
        callback: F,
    ) -> ListenerId
    where
        F: FnMut(&TransitionEvent) + Send + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.entry(node).or_default().push(Listener {
            id,
            kind,
            once: options.once,
            callback: Box::new(callback),
        });
        log::trace!("{node}: {} listener {:?} added", kind.name(), id);
        id
    }

    /// Returns false if no such listener was registered on `node`.
    pub fn remove_event_listener(&mut self, node: NodeId, id: ListenerId) -> bool {
        let Some(listeners) = self.listeners.get_mut(&node) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        listeners.len() != before
    }

    pub fn listener_count(&self, node: NodeId, kind: EventType) -> usize {
        self.listeners
            .get(&node)
            .map_or(0, |ls| ls.iter().filter(|l| l.kind == kind).count())
    }

    /// Deliver a synthetic `transitionend` to `node`, as if `property` had
    /// finished transitioning.
    pub fn dispatch_transition_end(&mut self, node: NodeId, property: TransitionProperty) {
        let event = self.transition_event(EventType::TransitionEnd, node, property, Default::default());
        if let Some(event) = event {
            self.dispatch(&event);
        }
    }

    fn transition_event(
        &self,
        kind: EventType,
        target: NodeId,
        property: TransitionProperty,
        elapsed: std::time::Duration,
    ) -> Option<TransitionEvent> {
        Some(TransitionEvent {
            kind,
            target,
            current_target: target,
            property,
            elapsed,
            class_list: self.class_list(target)?.clone(),
        })
    }

    /// Deliver `event` to its target, then to each ancestor up to the root.
    fn dispatch(&mut self, event: &TransitionEvent) {
        let mut path = vec![event.target];
        let mut current = event.target;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        log::debug!(
            "{}: dispatching {} ({})",
            event.target,
            event.kind.name(),
            event.property
        );

        let mut event = event.clone();
        for node in path {
            let Some(listeners) = self.listeners.get_mut(&node) else {
                continue;
            };
            event.current_target = node;
            listeners.retain_mut(|listener| {
                if listener.kind != event.kind {
                    return true;
                }
                (listener.callback)(&event);
                !listener.once
            });
        }
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Queue `callback` to run at the end of the next frame.
    pub fn request_animation_frame<F>(&mut self, callback: F) -> FrameRequestId
    where
        F: FnOnce(&mut Document) + Send + 'static,
    {
        self.scheduler.request_animation_frame(callback)
    }

    /// Returns false if the callback already ran or was never queued.
    pub fn cancel_animation_frame(&mut self, id: FrameRequestId) -> bool {
        self.scheduler.cancel_animation_frame(id)
    }

    /// A handle that queues animation frame callbacks on this document.
    pub fn scheduler(&self) -> FrameScheduler {
        self.scheduler.clone()
    }

    pub fn frame(&mut self) {
        self.frame_at(Instant::now());
    }

    /// Run one frame at time `now`.
    pub fn frame_at(&mut self, now: Instant) {
        self.frame_count += 1;
        let callbacks = self.scheduler.take();

        // Commit styles
        let attached = self.attached_nodes();
        let mut started = Vec::new();
        for &node in &attached {
            let style = self.stylesheet.compute(&self.nodes[node.0].classes);
            for property in self.animation.update(node, style, now) {
                started.push((node, property));
            }
        }
        self.animation.cleanup(&attached.into_iter().collect::<HashSet<_>>());

        for (node, property) in started {
            if let Some(event) =
                self.transition_event(EventType::TransitionStart, node, property, Default::default())
            {
                self.dispatch(&event);
            }
        }

        // Finish elapsed transitions
        for finished in self.animation.complete(now) {
            log::debug!("{}: {} transition ended", finished.node, finished.property);
            if let Some(event) = self.transition_event(
                EventType::TransitionEnd,
                finished.node,
                finished.property,
                finished.elapsed,
            ) {
                self.dispatch(&event);
            }
        }

        for (_, callback) in callbacks {
            callback(self);
        }
    }
}
