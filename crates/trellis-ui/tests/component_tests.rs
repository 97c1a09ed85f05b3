//! Integration tests for component attachment, cached state and geometry.

use trellis_dom::{DomError, DomTree, NodeId};
use trellis_ui::{Attachment, Quirks, Side, Ui, WidgetClass};

fn ui() -> Ui {
    Ui::new(DomTree::with_viewport(800.0, 600.0)).unwrap()
}

fn body_node(ui: &Ui) -> NodeId {
    ui.element(ui.body()).unwrap()
}

#[test]
fn test_new_requires_body() {
    assert!(matches!(Ui::new(DomTree::new()), Err(DomError::MissingBody)));
}

#[test]
fn test_body_is_wrapped() {
    let ui = ui();
    assert!(ui.is_materialized(ui.body()));
    assert_eq!(ui.widget_class(ui.body()), WidgetClass::BODY);
    assert_eq!(ui.parent(ui.body()), None);
    assert_eq!(ui.offset_width(ui.body()), 800.0);
}

#[test]
fn test_attach_to_materialized_parent() {
    let mut ui = ui();
    let c = ui.create_component("<div></div>");
    assert!(!ui.is_materialized(c));
    assert_eq!(ui.element_id(c), None);

    assert_eq!(ui.attach(c, ui.body()).unwrap(), Attachment::Attached);
    let node = ui.element(c).unwrap();
    assert_eq!(ui.dom().parent(node), Some(body_node(&ui)));
    assert_eq!(ui.parent(c), Some(ui.body()));

    let id = ui.element_id(c).unwrap().to_string();
    assert_eq!(ui.dom().get_attribute(node, "id").unwrap(), Some(id));
}

#[test]
fn test_cached_state_is_flushed_on_attach() {
    let mut ui = ui();
    let c = ui.create_component(r#"<div class="base"></div>"#);
    ui.set_attribute(c, "data-kind", "panel").unwrap();
    ui.set_title(c, "Hello").unwrap();
    ui.add_class(c, "extra").unwrap();
    ui.remove_class(c, "base").unwrap();
    ui.set_style_property(c, "width", "30px").unwrap();
    ui.set_style_property(c, "height", "10px").unwrap();

    assert_eq!(ui.attribute(c, "data-kind").unwrap().as_deref(), Some("panel"));
    assert_eq!(ui.title(c).unwrap().as_deref(), Some("Hello"));
    assert!(ui.has_class(c, "extra").unwrap());
    assert_eq!(ui.style(c, "width").unwrap().as_deref(), Some("30px"));

    let _ = ui.attach(c, ui.body()).unwrap();
    let node = ui.element(c).unwrap();
    assert_eq!(
        ui.dom().get_attribute(node, "data-kind").unwrap().as_deref(),
        Some("panel")
    );
    assert_eq!(ui.title(c).unwrap().as_deref(), Some("Hello"));
    assert!(ui.has_class(c, "extra").unwrap());
    assert!(!ui.has_class(c, "base").unwrap());
    assert_eq!(ui.offset_width(c), 30.0);
    assert_eq!(ui.offset_height(c), 10.0);
}

#[test]
fn test_pending_reads_see_template() {
    let mut ui = ui();
    let c = ui.create_component(
        r#"<div class="base" title="From template" style="width: 40px; height: 5px"></div>"#,
    );
    assert_eq!(ui.title(c).unwrap().as_deref(), Some("From template"));
    assert!(ui.has_class(c, "base").unwrap());
    assert_eq!(ui.style(c, "width").unwrap().as_deref(), Some("40px"));

    ui.set_title(c, "Cached").unwrap();
    ui.set_style_property(c, "width", "12px").unwrap();
    ui.remove_class(c, "base").unwrap();
    assert_eq!(ui.title(c).unwrap().as_deref(), Some("Cached"));
    assert_eq!(ui.style(c, "width").unwrap().as_deref(), Some("12px"));
    assert_eq!(ui.style(c, "height").unwrap().as_deref(), Some("5px"));
    assert!(!ui.has_class(c, "base").unwrap());
}

#[test]
fn test_invalid_attribute_name_is_rejected_before_attach() {
    let mut ui = ui();
    let c = ui.create_component("<div></div>");
    assert!(matches!(
        ui.set_attribute(c, "bad name", "x"),
        Err(DomError::InvalidAttributeName(_))
    ));
}

#[test]
fn test_deferred_attach_flushes_when_parent_materializes() {
    let mut ui = ui();
    let parent = ui.create_component("<section></section>");
    let first = ui.create_component("<p></p>");
    let second = ui.create_component("<p></p>");

    assert_eq!(ui.attach(first, parent).unwrap(), Attachment::Deferred);
    assert_eq!(ui.attach(second, parent).unwrap(), Attachment::Deferred);
    assert!(!ui.is_materialized(first));
    assert!(ui.is_attached(first));
    assert_eq!(ui.parent(first), Some(parent));

    assert_eq!(ui.attach(parent, ui.body()).unwrap(), Attachment::Attached);
    let parent_node = ui.element(parent).unwrap();
    let children = ui.dom().children(parent_node).to_vec();
    assert_eq!(
        children,
        vec![ui.element(first).unwrap(), ui.element(second).unwrap()]
    );
}

#[test]
fn test_deferred_chain_materializes_depth_first() {
    let mut ui = ui();
    let outer = ui.create_component("<div></div>");
    let middle = ui.create_component("<div></div>");
    let inner = ui.create_component("<span></span>");
    assert_eq!(ui.attach(inner, middle).unwrap(), Attachment::Deferred);
    assert_eq!(ui.attach(middle, outer).unwrap(), Attachment::Deferred);
    assert_eq!(ui.attach(outer, ui.body()).unwrap(), Attachment::Attached);

    let inner_node = ui.element(inner).unwrap();
    assert_eq!(ui.dom().parent(inner_node), ui.element(middle));
    assert!(ui.dom().is_connected(inner_node));
}

#[test]
fn test_attach_rejections() {
    let mut ui = ui();
    let a = ui.create_component("<div></div>");
    let b = ui.create_component("<div></div>");
    let body = ui.body();

    assert_eq!(ui.attach(body, a).unwrap(), Attachment::Rejected);
    assert_eq!(ui.attach(a, a).unwrap(), Attachment::Rejected);

    assert_eq!(ui.attach(b, a).unwrap(), Attachment::Deferred);
    // a is an ancestor of b
    assert_eq!(ui.attach(a, b).unwrap(), Attachment::Rejected);

    assert_eq!(ui.attach(a, body).unwrap(), Attachment::Attached);
    let other = ui.create_component("<div></div>");
    assert_eq!(ui.attach(a, other).unwrap(), Attachment::Rejected);
    assert!(!Attachment::Rejected.is_accepted());
}

#[test]
fn test_detach_keeps_element_and_state() {
    let mut ui = ui();
    let c = ui.create_component(r#"<div style="margin-left: 4px"></div>"#);
    ui.add_class(c, "kept").unwrap();
    let _ = ui.attach(c, ui.body()).unwrap();
    let node = ui.element(c).unwrap();
    let id = ui.element_id(c).map(String::from);
    let metrics = ui.metrics(c);

    assert!(ui.detach(c).unwrap());
    assert!(!ui.is_attached(c));
    assert_eq!(ui.dom().parent(node), None);
    assert!(!ui.detach(c).unwrap());

    assert_eq!(ui.attach(c, ui.body()).unwrap(), Attachment::Attached);
    assert_eq!(ui.element(c), Some(node));
    assert_eq!(ui.element_id(c).map(String::from), id);
    assert_eq!(ui.metrics(c), metrics);
    assert!(ui.has_class(c, "kept").unwrap());
}

#[test]
fn test_detach_cancels_deferred_attach() {
    let mut ui = ui();
    let parent = ui.create_component("<div></div>");
    let child = ui.create_component("<div></div>");
    let _ = ui.attach(child, parent).unwrap();
    assert!(ui.detach(child).unwrap());
    let _ = ui.attach(parent, ui.body()).unwrap();
    assert!(!ui.is_materialized(child));
    assert_eq!(ui.parent(child), None);
}

#[test]
fn test_attach_before() {
    let mut ui = ui();
    let list = ui.create_component("<ul></ul>");
    let _ = ui.attach(list, ui.body()).unwrap();
    let a = ui.create_component("<li></li>");
    let b = ui.create_component("<li></li>");
    let c = ui.create_component("<li></li>");
    let _ = ui.attach(a, list).unwrap();
    let _ = ui.attach(b, list).unwrap();
    assert_eq!(ui.attach_before(c, list, b).unwrap(), Attachment::Attached);

    let order: Vec<NodeId> = ui.dom().children(ui.element(list).unwrap()).to_vec();
    let expected: Vec<NodeId> = [a, c, b].iter().map(|&x| ui.element(x).unwrap()).collect();
    assert_eq!(order, expected);
}

#[test]
fn test_attach_before_foreign_reference_appends() {
    let mut ui = ui();
    let list = ui.create_component("<ul></ul>");
    let stranger = ui.create_component("<p></p>");
    let _ = ui.attach(list, ui.body()).unwrap();
    let _ = ui.attach(stranger, ui.body()).unwrap();
    let a = ui.create_component("<li></li>");
    let b = ui.create_component("<li></li>");
    let _ = ui.attach(a, list).unwrap();
    let _ = ui.attach_before(b, list, stranger).unwrap();

    let last = ui.dom().last_child(ui.element(list).unwrap());
    assert_eq!(last, ui.element(b));
}

#[test]
fn test_malformed_template_fails_on_attach() {
    let mut ui = ui();
    let c = ui.create_component("<p></p><p></p>");
    assert!(matches!(
        ui.attach(c, ui.body()),
        Err(DomError::MalformedTemplate { .. })
    ));
}

#[test]
fn test_metrics_calculated_after_append() {
    let mut ui = ui();
    let c = ui.create_component(
        r#"<div style="margin-left: 3px; border-top-width: 2px; padding-right: 5px"></div>"#,
    );
    assert!(!ui.metrics(c).is_calculated());
    assert_eq!(ui.metrics(c).margins(), [0.0; 4]);

    let _ = ui.attach(c, ui.body()).unwrap();
    let metrics = ui.metrics(c);
    assert!(metrics.is_calculated());
    assert_eq!(metrics.margin(Side::Left), 3.0);
    assert_eq!(metrics.border(Side::Top), 2.0);
    assert_eq!(metrics.padding(Side::Right), 5.0);
}

#[test]
fn test_margin_rounding_quirk() {
    let mut ui = Ui::with_quirks(DomTree::with_viewport(100.0, 100.0), Quirks::LEGACY).unwrap();
    let c = ui.create_component(r#"<div style="margin-top: 5px"></div>"#);
    let _ = ui.attach(c, ui.body()).unwrap();
    assert_eq!(ui.metrics(c).margin(Side::Top), 4.0);
}

#[test]
fn test_unmaterialized_geometry_is_zero() {
    let mut ui = ui();
    let c = ui.create_component(r#"<div style="width: 50px; padding-left: 4px"></div>"#);
    assert_eq!(ui.offset_width(c), 0.0);
    assert_eq!(ui.page_left(c), 0.0);
    assert_eq!(ui.content_width(c), 0.0);
    assert_eq!(ui.content_left(c), 0.0);
    assert_eq!(ui.offset_parent(c), None);
    ui.set_outer_width(c, 10.0).unwrap();
    assert_eq!(ui.style(c, "width").unwrap().as_deref(), Some("10px"));
}

#[test]
fn test_page_coordinates_add_parent_borders() {
    let mut ui = ui();
    let outer = ui.create_component(
        r#"<div style="position: absolute; left: 10px; top: 20px; width: 100px; height: 100px;
                       border-left-width: 2px; border-top-width: 3px"></div>"#,
    );
    let inner = ui.create_component(
        r#"<div style="position: absolute; left: 5px; top: 7px; width: 10px; height: 10px"></div>"#,
    );
    let _ = ui.attach(outer, ui.body()).unwrap();
    let _ = ui.attach(inner, outer).unwrap();

    assert_eq!(ui.offset_left(inner), 5.0);
    assert_eq!(ui.offset_parent(inner), ui.element(outer));
    assert_eq!(ui.page_left(inner), 17.0);
    assert_eq!(ui.page_top(inner), 30.0);
    assert_eq!(ui.page_rect(inner).right(), 27.0);
}

#[test]
fn test_page_coordinates_border_quirk() {
    let mut ui = Ui::with_quirks(DomTree::with_viewport(200.0, 200.0), Quirks::LEGACY).unwrap();
    let outer = ui.create_component(
        r#"<div style="position: absolute; left: 10px; top: 20px; border-left-width: 2px; border-top-width: 3px"></div>"#,
    );
    let inner = ui.create_component(r#"<div style="position: absolute; left: 5px; top: 7px"></div>"#);
    let _ = ui.attach(outer, ui.body()).unwrap();
    let _ = ui.attach(inner, outer).unwrap();
    assert_eq!(ui.page_left(inner), 15.0);
    assert_eq!(ui.page_top(inner), 27.0);
}

#[test]
fn test_content_box() {
    let mut ui = ui();
    let c = ui.create_component(
        r#"<div style="width: 100px; height: 50px; padding-left: 4px; padding-top: 6px;
                       border-left-width: 1px"></div>"#,
    );
    let _ = ui.attach(c, ui.body()).unwrap();
    assert_eq!(ui.offset_width(c), 105.0);
    assert_eq!(ui.content_width(c), 100.0);
    assert_eq!(ui.content_height(c), 50.0);
    assert_eq!(ui.content_left(c), 4.0);
    assert_eq!(ui.content_top(c), 6.0);
    assert_eq!(ui.content_right(c), 104.0);
    assert_eq!(ui.content_bottom(c), 56.0);
}

#[test]
fn test_outer_size_setters() {
    let mut ui = ui();
    let c = ui.create_component(
        r#"<div style="position: absolute; margin-left: 2px; margin-right: 3px;
                       padding-left: 5px; border-left-width: 1px; margin-top: 4px"></div>"#,
    );
    let _ = ui.attach(c, ui.body()).unwrap();

    ui.set_outer_width(c, 100.0).unwrap();
    assert_eq!(ui.style(c, "width").unwrap().as_deref(), Some("89px"));
    assert_eq!(ui.outer_width(c), 100.0);

    ui.set_outer_height(c, 24.0).unwrap();
    assert_eq!(ui.outer_height(c), 24.0);

    ui.set_outer_width(c, 5.0).unwrap();
    assert_eq!(ui.style(c, "width").unwrap().as_deref(), Some("0px"));
}

#[test]
fn test_place_sets_margin_box_position() {
    let mut ui = ui();
    let c = ui.create_component(r#"<div style="position: absolute; margin-left: 3px"></div>"#);
    let _ = ui.attach(c, ui.body()).unwrap();
    ui.place(c, Some(10.0), None).unwrap();
    assert_eq!(ui.style(c, "left").unwrap().as_deref(), Some("10px"));
    assert_eq!(ui.style(c, "top").unwrap(), None);
    assert_eq!(ui.offset_left(c), 13.0);
}

#[test]
fn test_wrap_existing_element() {
    let mut ui = ui();
    let body = body_node(&ui);
    let node = ui.dom_mut().create_element("div");
    ui.dom_mut().append_child(body, node).unwrap();

    let c = ui.wrap(node).unwrap();
    assert_eq!(ui.wrap(node).unwrap(), c);
    assert_eq!(ui.component_for(node), Some(c));
    assert_eq!(ui.parent(c), Some(ui.body()));
    assert!(ui.element_id(c).is_some());
    assert!(ui.metrics(c).is_calculated());
    assert_eq!(ui.attach(c, ui.body()).unwrap(), Attachment::Rejected);

    let text = ui.dom_mut().create_text("hi");
    assert!(matches!(ui.wrap(text), Err(DomError::NotAnElement(_))));
}

#[test]
fn test_widget_tags() {
    let mut ui = ui();
    let w = ui.create_widget(WidgetClass::BOX, "<div></div>");
    assert_eq!(ui.style_tags(w), &["trellis-widget", "trellis-box"]);
    let _ = ui.attach(w, ui.body()).unwrap();
    assert!(ui.has_class(w, "trellis-widget").unwrap());
    assert!(ui.has_class(w, "trellis-box").unwrap());
    assert!(!ui.has_class(w, "trellis-container").unwrap());
}
