use std::fs::File;
use std::thread;
use std::time::{Duration, Instant};

use simple_modal::{ModalController, Transition};
use simpledom::{Document, PropertyValue, Stylesheet, TransitionProperty};
use simplelog::{Config, LevelFilter, WriteLogger};

const FRAME: Duration = Duration::from_millis(16);

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("fade.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut doc = Document::with_stylesheet(Stylesheet::simple_modal());
    let body = doc.body();
    let page = doc.create_element("main");
    doc.append_child(body, page).expect("body accepts children");

    let modal = doc.create_element("div");
    doc.set_id(modal, "simple-modal-settings")
        .expect("modal was just created");
    doc.add_class(modal, "hide");
    doc.append_child(page, modal).expect("page accepts children");

    let controller = ModalController::new();
    controller.on_open(&mut doc, "settings", || println!("-> opened"));
    controller.on_close(&mut doc, "settings", || println!("-> closed"));

    // Commit the initial styles
    doc.frame();

    println!("opening");
    let opening = controller.open(&mut doc, "settings");
    run_until_settled(&mut doc, modal, opening);

    println!("closing");
    let closing = controller.close(&mut doc, "settings");
    run_until_settled(&mut doc, modal, closing);

    // Nothing to open: logged, resolves at once
    let mut missing = controller.open(&mut doc, "missing");
    println!("missing modal settled: {}", missing.is_settled());

    Ok(())
}

fn run_until_settled(doc: &mut Document, modal: simpledom::NodeId, mut transition: Transition) {
    let start = Instant::now();
    while !transition.is_settled() {
        doc.frame();
        if let Some(PropertyValue::F32(opacity)) =
            doc.interpolated(modal, TransitionProperty::Opacity, Instant::now())
        {
            println!("  {:>4}ms opacity {opacity:.2}", start.elapsed().as_millis());
        }
        thread::sleep(FRAME);
    }
    println!(
        "  settled after {}ms with classes [{}]",
        start.elapsed().as_millis(),
        doc.class_list(modal).map(|c| c.to_string()).unwrap_or_default()
    );
}
