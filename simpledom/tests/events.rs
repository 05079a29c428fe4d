use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use simpledom::{
    Document, EventType, ListenerOptions, NodeId, PropertyValue, Stylesheet, TransitionEvent,
    TransitionProperty,
};

fn modal_doc(classes: &[&str]) -> (Document, NodeId) {
    let mut doc = Document::with_stylesheet(Stylesheet::simple_modal());
    let node = doc.create_element("div");
    doc.set_id(node, "m").unwrap();
    for class in classes {
        doc.add_class(node, class);
    }
    let body = doc.body();
    doc.append_child(body, node).unwrap();
    (doc, node)
}

fn record(doc: &mut Document, node: NodeId, kind: EventType, options: ListenerOptions) -> Arc<Mutex<Vec<TransitionEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    doc.add_event_listener(node, kind, options, move |e| {
        sink.lock().unwrap().push(e.clone());
    });
    seen
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

// ============================================================================
// Listener registry
// ============================================================================

#[test]
fn test_synthetic_transition_end_reaches_listener() {
    let (mut doc, node) = modal_doc(&["show"]);
    let seen = record(&mut doc, node, EventType::TransitionEnd, ListenerOptions::new());

    doc.dispatch_transition_end(node, TransitionProperty::Opacity);
    doc.dispatch_transition_end(node, TransitionProperty::OffsetY);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].target, node);
    assert_eq!(seen[0].property, TransitionProperty::Opacity);
    assert!(seen[0].class_list.contains("show"));
}

#[test]
fn test_once_listener_fires_once() {
    let (mut doc, node) = modal_doc(&[]);
    let seen = record(&mut doc, node, EventType::TransitionEnd, ListenerOptions::once());
    assert_eq!(doc.listener_count(node, EventType::TransitionEnd), 1);

    doc.dispatch_transition_end(node, TransitionProperty::Opacity);
    doc.dispatch_transition_end(node, TransitionProperty::Opacity);

    assert_eq!(seen.lock().unwrap().len(), 1);
    assert_eq!(doc.listener_count(node, EventType::TransitionEnd), 0);
}

#[test]
fn test_remove_listener() {
    let (mut doc, node) = modal_doc(&[]);
    let hits = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&hits);
    let id = doc.add_event_listener(node, EventType::TransitionEnd, ListenerOptions::new(), move |_| {
        *counter.lock().unwrap() += 1;
    });

    assert!(doc.remove_event_listener(node, id));
    assert!(!doc.remove_event_listener(node, id));
    doc.dispatch_transition_end(node, TransitionProperty::Opacity);
    assert_eq!(*hits.lock().unwrap(), 0);
}

#[test]
fn test_listener_kind_filtering() {
    let (mut doc, node) = modal_doc(&[]);
    let starts = record(&mut doc, node, EventType::TransitionStart, ListenerOptions::once());

    doc.dispatch_transition_end(node, TransitionProperty::Opacity);

    assert!(starts.lock().unwrap().is_empty());
    assert_eq!(doc.listener_count(node, EventType::TransitionStart), 1);
}

#[test]
fn test_transition_end_bubbles_to_ancestors() {
    let (mut doc, modal) = modal_doc(&["show"]);
    let content = doc.create_element("div");
    doc.add_class(content, "content");
    doc.append_child(modal, content).unwrap();
    let body = doc.body();

    let on_content = record(&mut doc, content, EventType::TransitionEnd, ListenerOptions::new());
    let on_modal = record(&mut doc, modal, EventType::TransitionEnd, ListenerOptions::once());
    let on_body = record(&mut doc, body, EventType::TransitionEnd, ListenerOptions::new());

    doc.dispatch_transition_end(content, TransitionProperty::OffsetY);

    let on_content = on_content.lock().unwrap();
    assert_eq!(on_content.len(), 1);
    assert_eq!(on_content[0].current_target, content);

    let on_modal = on_modal.lock().unwrap();
    assert_eq!(on_modal.len(), 1);
    assert_eq!(on_modal[0].target, content);
    assert_eq!(on_modal[0].current_target, modal);
    // The snapshot is the target's classes, not the listener's
    assert!(on_modal[0].class_list.contains("content"));
    assert!(!on_modal[0].class_list.contains("show"));
    assert_eq!(doc.listener_count(modal, EventType::TransitionEnd), 0);

    assert_eq!(on_body.lock().unwrap()[0].current_target, body);
}

#[test]
fn test_events_do_not_reach_descendants() {
    let (mut doc, modal) = modal_doc(&["show"]);
    let content = doc.create_element("div");
    doc.append_child(modal, content).unwrap();
    let on_content = record(&mut doc, content, EventType::TransitionEnd, ListenerOptions::new());

    doc.dispatch_transition_end(modal, TransitionProperty::Opacity);

    assert!(on_content.lock().unwrap().is_empty());
}

// ============================================================================
// Frame loop
// ============================================================================

#[test]
fn test_fade_in_fires_transition_end_after_duration() {
    let (mut doc, node) = modal_doc(&["show", "fade"]);
    let ends = record(&mut doc, node, EventType::TransitionEnd, ListenerOptions::new());
    let starts = record(&mut doc, node, EventType::TransitionStart, ListenerOptions::new());
    let t0 = Instant::now();

    // First frame only records the initial style
    doc.frame_at(t0);
    assert!(starts.lock().unwrap().is_empty());

    doc.remove_class(node, "fade");
    doc.frame_at(t0 + ms(16));
    assert_eq!(starts.lock().unwrap().len(), 1);
    assert!(doc.is_transitioning(node, TransitionProperty::Opacity));

    doc.frame_at(t0 + ms(200));
    assert!(ends.lock().unwrap().is_empty());

    doc.frame_at(t0 + ms(316));
    let ends = ends.lock().unwrap();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].property, TransitionProperty::Opacity);
    assert_eq!(ends[0].elapsed, ms(300));
    assert!(!doc.has_pending_work());
}

#[test]
fn test_interpolated_opacity_during_fade() {
    let (mut doc, node) = modal_doc(&["show"]);
    let t0 = Instant::now();
    doc.frame_at(t0);

    doc.add_class(node, "fade");
    doc.frame_at(t0);

    match doc.interpolated(node, TransitionProperty::Opacity, t0 + ms(150)) {
        Some(PropertyValue::F32(v)) => assert!(v > 0.0 && v < 1.0),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_no_transition_end_from_display_none() {
    let (mut doc, node) = modal_doc(&["hide"]);
    let ends = record(&mut doc, node, EventType::TransitionEnd, ListenerOptions::new());
    let t0 = Instant::now();
    doc.frame_at(t0);

    doc.remove_class(node, "hide");
    doc.add_class(node, "show");
    doc.add_class(node, "fade");
    doc.frame_at(t0 + ms(16));
    doc.frame_at(t0 + ms(1000));

    assert!(ends.lock().unwrap().is_empty());
}

#[test]
fn test_no_transition_without_stylesheet() {
    let mut doc = Document::new();
    let node = doc.create_element("div");
    let body = doc.body();
    doc.append_child(body, node).unwrap();
    let ends = record(&mut doc, node, EventType::TransitionEnd, ListenerOptions::new());
    let t0 = Instant::now();

    doc.frame_at(t0);
    doc.add_class(node, "fade");
    doc.frame_at(t0 + ms(16));
    doc.frame_at(t0 + ms(5000));

    assert!(ends.lock().unwrap().is_empty());
}

#[test]
fn test_animation_frame_runs_after_style_commit() {
    let (mut doc, node) = modal_doc(&["hide"]);
    let starts = record(&mut doc, node, EventType::TransitionStart, ListenerOptions::new());
    let t0 = Instant::now();
    doc.frame_at(t0);

    doc.remove_class(node, "hide");
    doc.add_class(node, "show");
    doc.add_class(node, "fade");
    doc.request_animation_frame(move |doc| {
        doc.remove_class(node, "fade");
    });

    // Commits `show fade` from display: none, then removes `fade`
    doc.frame_at(t0 + ms(16));
    assert!(!doc.has_class(node, "fade"));
    assert!(starts.lock().unwrap().is_empty());

    // Removal of `fade` commits and starts the opacity transition
    doc.frame_at(t0 + ms(32));
    assert_eq!(starts.lock().unwrap().len(), 1);
}

#[test]
fn test_cancel_animation_frame() {
    let (mut doc, node) = modal_doc(&["fade"]);
    let id = doc.request_animation_frame(move |doc| {
        doc.remove_class(node, "fade");
    });
    assert!(doc.has_pending_work());
    assert!(doc.cancel_animation_frame(id));
    assert!(!doc.cancel_animation_frame(id));

    doc.frame();
    assert!(doc.has_class(node, "fade"));
}

#[test]
fn test_scheduler_queues_work_from_listener() {
    let (mut doc, node) = modal_doc(&["show"]);
    let scheduler = doc.scheduler();
    doc.add_event_listener(node, EventType::TransitionEnd, ListenerOptions::once(), move |e| {
        let target = e.target;
        scheduler.request_animation_frame(move |doc| {
            doc.add_class(target, "done");
        });
    });

    doc.dispatch_transition_end(node, TransitionProperty::Opacity);
    assert!(doc.has_pending_work());
    assert!(!doc.has_class(node, "done"));

    doc.frame();
    assert!(doc.has_class(node, "done"));
    assert!(!doc.has_pending_work());
}

#[test]
fn test_scheduler_shares_the_document_queue() {
    let (mut doc, node) = modal_doc(&["fade"]);
    let scheduler = doc.scheduler();

    let id = scheduler.request_animation_frame(move |doc| {
        doc.remove_class(node, "fade");
    });
    assert_eq!(scheduler.pending(), 1);
    assert!(doc.cancel_animation_frame(id));
    assert!(!scheduler.cancel_animation_frame(id));

    let other = doc.request_animation_frame(|_| {});
    assert_ne!(other, id);
    assert_eq!(scheduler.pending(), 1);
}

#[test]
fn test_reduced_motion_fires_nothing() {
    let (mut doc, node) = modal_doc(&["show"]);
    doc.set_reduced_motion(true);
    let ends = record(&mut doc, node, EventType::TransitionEnd, ListenerOptions::new());
    let t0 = Instant::now();

    doc.frame_at(t0);
    doc.add_class(node, "fade");
    doc.frame_at(t0 + ms(16));
    doc.frame_at(t0 + ms(1000));

    assert!(ends.lock().unwrap().is_empty());
}

#[test]
fn test_detached_node_transition_is_dropped() {
    let (mut doc, node) = modal_doc(&["show"]);
    let ends = record(&mut doc, node, EventType::TransitionEnd, ListenerOptions::new());
    let t0 = Instant::now();

    doc.frame_at(t0);
    doc.add_class(node, "fade");
    doc.frame_at(t0 + ms(16));
    doc.detach(node).unwrap();
    doc.frame_at(t0 + ms(1000));

    assert!(ends.lock().unwrap().is_empty());
}
