//! Shared helpers for controller tests.
//!
//! Each test binary uses a different subset of them.
#![allow(dead_code)]

use std::sync::{Mutex, Once};

use log::{Level, LevelFilter, Log, Metadata, Record};
use simpledom::{Document, NodeId, Stylesheet};

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Keeps every log record in memory so tests can assert on diagnostics.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Error messages logged so far that mention `needle`.
///
/// Tests run in parallel, so filter on something unique to the test.
pub fn errors_mentioning(needle: &str) -> Vec<String> {
    RECORDS
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .iter()
        .filter(|(level, msg)| *level == Level::Error && msg.contains(needle))
        .map(|(_, msg)| msg.clone())
        .collect()
}

/// A page with the modal stylesheet and one modal nested in a `section`.
pub fn page_with_modal(modal_id: &str, classes: &[&str]) -> (Document, NodeId) {
    init_logging();
    let mut doc = Document::with_stylesheet(Stylesheet::simple_modal());
    let body = doc.body();

    let header = doc.create_element("header");
    doc.append_child(body, header).unwrap();

    let section = doc.create_element("section");
    doc.append_child(body, section).unwrap();

    let modal = doc.create_element("div");
    doc.set_id(modal, format!("simple-modal-{modal_id}")).unwrap();
    for class in classes {
        doc.add_class(modal, class);
    }
    doc.append_child(section, modal).unwrap();

    let footer = doc.create_element("footer");
    doc.append_child(body, footer).unwrap();

    (doc, modal)
}

pub fn classes(doc: &Document, node: NodeId) -> Vec<String> {
    doc.class_list(node)
        .map(|c| c.iter().map(str::to_string).collect())
        .unwrap_or_default()
}
