//! Integration tests for event delivery through the component tree.

use std::cell::RefCell;
use std::rc::Rc;

use trellis_dom::{DomTree, StyleMap};
use trellis_ui::{BarLayout, ComponentId, Event, EventTag, Ui, WidgetClass};

type Log = Rc<RefCell<Vec<(EventTag, ComponentId, ComponentId)>>>;

fn ui() -> Ui {
    Ui::new(DomTree::with_viewport(800.0, 600.0)).unwrap()
}

/// Record every `tag` event delivered to `source` as (tag, target, delivered-to).
fn record(ui: &mut Ui, log: &Log, source: ComponentId, tag: EventTag) {
    let log = Rc::clone(log);
    let _ = ui.listen(source, tag, move |event, at| {
        log.borrow_mut().push((event.tag, event.target, at));
    });
}

#[test]
fn test_attach_and_detach_are_announced() {
    let mut ui = ui();
    let log = Log::default();
    let c = ui.create_component("<div></div>");
    record(&mut ui, &log, c, EventTag::Attach);
    record(&mut ui, &log, c, EventTag::Detach);

    let _ = ui.attach(c, ui.body()).unwrap();
    assert!(ui.detach(c).unwrap());
    assert!(!ui.detach(c).unwrap());

    assert_eq!(
        *log.borrow(),
        vec![(EventTag::Attach, c, c), (EventTag::Detach, c, c)]
    );
}

#[test]
fn test_deferred_attach_announced_on_flush() {
    let mut ui = ui();
    let log = Log::default();
    let parent = ui.create_component("<div></div>");
    let child = ui.create_component("<span></span>");
    record(&mut ui, &log, child, EventTag::Attach);

    let _ = ui.attach(child, parent).unwrap();
    assert!(log.borrow().is_empty());

    let _ = ui.attach(parent, ui.body()).unwrap();
    assert_eq!(*log.borrow(), vec![(EventTag::Attach, child, child)]);
}

#[test]
fn test_layout_event_after_each_run() {
    let mut ui = ui();
    let log = Log::default();
    let c = ui
        .create_container(WidgetClass::CONTAINER, "<div></div>", None)
        .unwrap();
    record(&mut ui, &log, c, EventTag::Layout);

    let _ = ui.attach(c, ui.body()).unwrap();
    let w = ui.create_widget(WidgetClass::WIDGET, "<div></div>");
    assert!(ui.add(c, w).unwrap());
    ui.layout(c).unwrap();

    assert_eq!(log.borrow().len(), 2);
    assert!(log.borrow().iter().all(|&entry| entry == (EventTag::Layout, c, c)));
}

#[test]
fn test_bubbles_one_step_to_dom_parent() {
    let mut ui = ui();
    let log = Log::default();
    let outer = ui.create_component("<div></div>");
    let middle = ui.create_component("<div></div>");
    let inner = ui.create_component("<div></div>");
    let _ = ui.attach(outer, ui.body()).unwrap();
    let _ = ui.attach(middle, outer).unwrap();
    let _ = ui.attach(inner, middle).unwrap();
    for source in [outer, middle, inner] {
        record(&mut ui, &log, source, EventTag::Style);
    }

    ui.fire(Event::new(EventTag::Style, inner).bubbling()).unwrap();
    assert_eq!(
        *log.borrow(),
        vec![
            (EventTag::Style, inner, inner),
            (EventTag::Style, inner, middle)
        ]
    );

    log.borrow_mut().clear();
    ui.fire(Event::new(EventTag::Style, inner)).unwrap();
    assert_eq!(*log.borrow(), vec![(EventTag::Style, inner, inner)]);
}

#[test]
fn test_pending_child_bubbles_to_queued_parent() {
    let mut ui = ui();
    let log = Log::default();
    let parent = ui.create_component("<div></div>");
    let child = ui.create_component("<div></div>");
    let _ = ui.attach(child, parent).unwrap();
    record(&mut ui, &log, parent, EventTag::Style);

    assert_eq!(ui.parent(child), Some(parent));
    ui.fire(Event::new(EventTag::Style, child).bubbling()).unwrap();
    assert_eq!(*log.borrow(), vec![(EventTag::Style, child, parent)]);
}

#[test]
fn test_unlisten() {
    let mut ui = ui();
    let log = Log::default();
    let c = ui.create_component("<div></div>");
    let sink = Rc::clone(&log);
    let id = ui.listen(c, EventTag::Style, move |event, at| {
        sink.borrow_mut().push((event.tag, event.target, at));
    });

    ui.fire(Event::new(EventTag::Style, c)).unwrap();
    assert!(ui.unlisten(id));
    assert!(!ui.unlisten(id));
    ui.fire(Event::new(EventTag::Style, c)).unwrap();
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_style_event_on_container_runs_resize() {
    let mut ui = ui();
    let bar = ui
        .create_container(
            WidgetClass::CONTAINER,
            r#"<div style="width: 100px; height: 50px"></div>"#,
            Some(BarLayout::horizontal().with_align(true).into()),
        )
        .unwrap();
    let _ = ui.attach(bar, ui.body()).unwrap();
    let w = ui.create_widget(WidgetClass::WIDGET, r#"<div style="width: 10px"></div>"#);
    assert!(ui.add(bar, w).unwrap());
    assert_eq!(ui.offset_height(w), 50.0);

    // change the size behind the strategy's back, then announce it
    let mut styles = StyleMap::new();
    styles.set("height", "80px");
    ui.set_style(bar, &styles).unwrap();
    assert_eq!(ui.offset_height(w), 50.0);

    ui.fire(Event::new(EventTag::Style, bar)).unwrap();
    assert_eq!(ui.offset_height(w), 80.0);
}

#[test]
fn test_bar_announces_resized_children() {
    let mut ui = ui();
    let log = Log::default();
    let bar = ui
        .create_container(
            WidgetClass::CONTAINER,
            r#"<div style="width: 100px; height: 50px"></div>"#,
            Some(BarLayout::horizontal().with_align(true).into()),
        )
        .unwrap();
    let _ = ui.attach(bar, ui.body()).unwrap();
    let resized = ui.create_widget(WidgetClass::WIDGET, r#"<div style="width: 10px"></div>"#);
    assert!(ui.add(bar, resized).unwrap());
    record(&mut ui, &log, resized, EventTag::Style);

    ui.restyle(bar, &StyleMap::parse("height: 70px")).unwrap();
    assert_eq!(*log.borrow(), vec![(EventTag::Style, resized, resized)]);
}
