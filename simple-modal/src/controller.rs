//! Modal controller.
//!
//! Opens and closes modal elements by mutating their class list and lets the
//! stylesheet animate the change. Completion is reported through the
//! element's `transitionend` events.

use std::fmt::Display;

use simpledom::{Document, EventType, ListenerId, ListenerOptions, NodeId, TransitionEvent};

use crate::config::ModalConfig;
use crate::error::ModalError;
use crate::lookup::ElementLookup;
use crate::state::{ModalAction, ModalState};
use crate::transition::Transition;

/// Handle to a callback registered with [`ModalController::on_open`] or
/// [`ModalController::on_close`].
///
/// Dropping it keeps the callback registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    node: NodeId,
    listener: ListenerId,
}

impl Subscription {
    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// Drives `#simple-modal-<id>` elements through their fade transitions.
#[derive(Debug, Clone, Default)]
pub struct ModalController {
    config: ModalConfig,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ModalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    /// Find the element for `modal_id`, logging an error if there is none.
    pub fn get_modal_element<L>(&self, lookup: &L, modal_id: impl Display) -> Option<NodeId>
    where
        L: ElementLookup + ?Sized,
    {
        let element_id = self.config.element_id(&modal_id);
        let found = lookup.find_by_id(&element_id);
        if found.is_none() {
            let error = ModalError::not_found(modal_id.to_string(), self.config.selector(&modal_id));
            log::error!("{error}");
        }
        found
    }

    /// Current state of a modal, or `None` if it doesn't exist.
    pub fn state(&self, doc: &Document, modal_id: impl Display) -> Option<ModalState> {
        let modal = doc.find_by_id(&self.config.element_id(modal_id))?;
        let classes = doc.class_list(modal)?;
        Some(ModalState::from_classes(classes, &self.config.classes))
    }

    /// Show the modal. Resolves when its fade-in transition ends.
    pub fn open(&self, doc: &mut Document, modal_id: impl Display) -> Transition {
        self.run(doc, modal_id, ModalAction::Open)
    }

    /// Hide the modal. Resolves when its fade-out transition ends.
    pub fn close(&self, doc: &mut Document, modal_id: impl Display) -> Transition {
        self.run(doc, modal_id, ModalAction::Close)
    }

    /// Open or close by action name (`"open"` or `"close"`).
    ///
    /// Any other action is logged and does nothing.
    pub fn toggle(&self, doc: &mut Document, modal_id: impl Display, action: &str) -> Transition {
        match action.parse::<ModalAction>() {
            Ok(action) => self.run(doc, modal_id, action),
            Err(e) => {
                log::error!("{e}");
                Transition::settled()
            }
        }
    }

    fn run(&self, doc: &mut Document, modal_id: impl Display, action: ModalAction) -> Transition {
        let Some(modal) = self.get_modal_element(&*doc, &modal_id) else {
            return Transition::settled();
        };
        let classes = &self.config.classes;

        let (transition, tx) = Transition::pending();
        let mut tx = Some(tx);
        doc.add_event_listener(
            modal,
            EventType::TransitionEnd,
            ListenerOptions::once(),
            move |_| {
                if let Some(tx) = tx.take() {
                    let _ = tx.send(());
                }
            },
        );

        doc.add_class(modal, &classes.fade);

        match action {
            ModalAction::Open => {
                // Last child of body so it stacks above the rest of the page
                let body = doc.body();
                if let Err(e) = doc.append_child(body, modal) {
                    log::error!("Modal {modal_id}: cannot move to body: {e}");
                }
                doc.remove_class(modal, &classes.hide);
                doc.add_class(modal, &classes.show);

                // `show fade` has to be committed before `fade` goes away,
                // otherwise there is nothing to transition from
                let fade = classes.fade.clone();
                doc.request_animation_frame(move |doc| {
                    doc.remove_class(modal, &fade);
                });
            }
            ModalAction::Close => {
                doc.add_class(modal, &classes.fade_out);
            }
        }

        log::debug!(
            "Modal {modal_id}: {action} started ({:?})",
            doc.class_list(modal)
                .map(|c| ModalState::from_classes(c, classes))
        );
        transition
    }

    /// Call `callback` after every transition that ends while the modal
    /// carries the `show` class. Transitions on the modal's descendants
    /// count too, since `transitionend` bubbles.
    ///
    /// The callback runs while the document is dispatching, so it can't
    /// touch the document directly. To open or close another modal from it,
    /// capture [`Document::scheduler`] and queue the call for the next frame:
    ///
    /// ```
    /// # use simple_modal::ModalController;
    /// # use simpledom::Document;
    /// # let mut doc = Document::new();
    /// # let modal = doc.create_element("div");
    /// # doc.set_id(modal, "simple-modal-1").unwrap();
    /// # let body = doc.body();
    /// # doc.append_child(body, modal).unwrap();
    /// let controller = ModalController::new();
    /// let scheduler = doc.scheduler();
    /// let next = controller.clone();
    /// controller.on_open(&mut doc, 1, move || {
    ///     let next = next.clone();
    ///     scheduler.request_animation_frame(move |doc| {
    ///         let _ = next.close(doc, 1);
    ///     });
    /// });
    /// ```
    ///
    /// Returns `None` (after logging) if the modal doesn't exist.
    pub fn on_open<F>(
        &self,
        doc: &mut Document,
        modal_id: impl Display,
        callback: F,
    ) -> Option<Subscription>
    where
        F: FnMut() + Send + 'static,
    {
        let class = self.config.classes.show.clone();
        self.subscribe(doc, modal_id, class, callback)
    }

    /// Call `callback` after every transition that ends while the modal
    /// carries the `hide` class. See [`on_open`](Self::on_open) for reaching
    /// the document from the callback.
    ///
    /// Returns `None` (after logging) if the modal doesn't exist.
    pub fn on_close<F>(
        &self,
        doc: &mut Document,
        modal_id: impl Display,
        callback: F,
    ) -> Option<Subscription>
    where
        F: FnMut() + Send + 'static,
    {
        let class = self.config.classes.hide.clone();
        self.subscribe(doc, modal_id, class, callback)
    }

    fn subscribe<F>(
        &self,
        doc: &mut Document,
        modal_id: impl Display,
        class: String,
        mut callback: F,
    ) -> Option<Subscription>
    where
        F: FnMut() + Send + 'static,
    {
        let modal = self.get_modal_element(&*doc, &modal_id)?;
        log::debug!("Modal {modal_id}: callback registered for .{class}");
        // Filters on the classes present when the transition ends, not on
        // which toggle started it.
        let listener = doc.add_event_listener(
            modal,
            EventType::TransitionEnd,
            ListenerOptions::new(),
            move |event: &TransitionEvent| {
                if event.class_list.contains(&class) {
                    callback();
                }
            },
        );
        Some(Subscription {
            node: modal,
            listener,
        })
    }

    /// Remove a callback. Returns false if it was already removed.
    pub fn unsubscribe(&self, doc: &mut Document, subscription: Subscription) -> bool {
        doc.remove_event_listener(subscription.node, subscription.listener)
    }
}
