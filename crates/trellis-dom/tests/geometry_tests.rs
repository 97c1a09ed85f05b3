//! Tests for the headless offset geometry.

use trellis_dom::{DomFacade, DomTree, NodeId};

/// Helper: create a div with the given inline style and append it.
fn div(tree: &mut DomTree, parent: NodeId, style: &str) -> NodeId {
    let id = tree.create_element("div");
    tree.set_attribute(id, "style", style).unwrap();
    tree.append_child(parent, id).unwrap();
    id
}

fn body(tree: &DomTree) -> NodeId {
    tree.body().expect("viewport documents have a body")
}

#[test]
fn test_viewport_body() {
    let tree = DomTree::with_viewport(800.0, 600.0);
    let body = body(&tree);
    assert_eq!(tree.offset_width(body), 800.0);
    assert_eq!(tree.offset_height(body), 600.0);
    assert_eq!(tree.offset_parent(body), None);
    assert_eq!(tree.offset_left(body), 0.0);
}

#[test]
fn test_detached_element_has_no_box() {
    let mut tree = DomTree::with_viewport(800.0, 600.0);
    let lone = tree.create_element("div");
    tree.set_attribute(lone, "style", "width: 50px; height: 20px")
        .unwrap();
    assert_eq!(tree.offset_width(lone), 0.0);
    assert_eq!(tree.offset_height(lone), 0.0);
    assert_eq!(tree.offset_parent(lone), None);
}

#[test]
fn test_content_box_sizing() {
    let mut tree = DomTree::with_viewport(800.0, 600.0);
    let root = body(&tree);
    let boxed = div(
        &mut tree,
        root,
        "width: 100px; height: 40px; padding-left: 5px; padding-right: 5px; \
         border-left-width: 2px; border-right-width: 3px; padding-top: 1px",
    );
    assert_eq!(tree.offset_width(boxed), 115.0);
    assert_eq!(tree.offset_height(boxed), 41.0);
}

#[test]
fn test_auto_width_fills_parent_content() {
    let mut tree = DomTree::with_viewport(800.0, 600.0);
    let root = body(&tree);
    let outer = div(&mut tree, root, "width: 300px; padding-left: 10px; padding-right: 10px");
    let inner = div(&mut tree, outer, "margin-left: 20px; height: 5px");
    assert_eq!(tree.offset_width(inner), 280.0);

    let floating = div(&mut tree, outer, "position: absolute; padding-left: 4px");
    assert_eq!(tree.offset_width(floating), 4.0);
}

#[test]
fn test_auto_height_stacks_in_flow_children() {
    let mut tree = DomTree::with_viewport(800.0, 600.0);
    let root = body(&tree);
    let outer = div(&mut tree, root, "width: 100px");
    let _ = div(&mut tree, outer, "height: 10px; margin-top: 2px");
    let _ = div(&mut tree, outer, "height: 20px");
    let _ = div(&mut tree, outer, "height: 500px; position: absolute");
    assert_eq!(tree.offset_height(outer), 32.0);
}

#[test]
fn test_in_flow_children_stack_vertically() {
    let mut tree = DomTree::with_viewport(800.0, 600.0);
    let root = body(&tree);
    let first = div(&mut tree, root, "height: 10px");
    let second = div(&mut tree, root, "height: 20px; margin-left: 7px; margin-top: 3px");
    assert_eq!(tree.offset_top(first), 0.0);
    assert_eq!(tree.offset_top(second), 13.0);
    assert_eq!(tree.offset_left(second), 7.0);
    assert_eq!(tree.offset_parent(second), Some(root));
}

#[test]
fn test_absolute_offsets_against_positioned_ancestor() {
    let mut tree = DomTree::with_viewport(800.0, 600.0);
    let root = body(&tree);
    let frame = div(
        &mut tree,
        root,
        "position: absolute; left: 100px; top: 50px; width: 200px; height: 200px; \
         border-left-width: 4px; border-top-width: 6px",
    );
    let child = div(
        &mut tree,
        frame,
        "position: absolute; left: 10px; top: 20px; margin-left: 1px; width: 5px; height: 5px",
    );
    assert_eq!(tree.offset_parent(child), Some(frame));
    assert_eq!(tree.offset_left(child), 11.0);
    assert_eq!(tree.offset_top(child), 20.0);
    assert_eq!(tree.offset_left(frame), 100.0);
    assert_eq!(tree.offset_top(frame), 50.0);
}

#[test]
fn test_static_parent_is_skipped_by_offset_parent() {
    let mut tree = DomTree::with_viewport(800.0, 600.0);
    let root = body(&tree);
    let frame = div(&mut tree, root, "position: relative; padding-left: 8px");
    let plain = div(&mut tree, frame, "padding-left: 5px; border-left-width: 1px");
    let leaf = div(&mut tree, plain, "height: 4px");
    assert_eq!(tree.offset_parent(leaf), Some(frame));
    // frame padding (8) + plain border (1) + plain padding (5)
    assert_eq!(tree.offset_left(leaf), 14.0);
}

#[test]
fn test_facade_class_helpers() {
    let mut tree = DomTree::with_viewport(10.0, 10.0);
    let root = body(&tree);
    let el = div(&mut tree, root, "");
    DomFacade::add_class(&mut tree, el, "a").unwrap();
    DomFacade::add_class(&mut tree, el, "b").unwrap();
    DomFacade::add_class(&mut tree, el, "a").unwrap();
    DomFacade::remove_class(&mut tree, el, "a").unwrap();
    assert_eq!(tree.get_attribute(el, "class").unwrap().as_deref(), Some("b"));
}
