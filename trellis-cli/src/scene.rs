//! JSON scene descriptions.
//!
//! A scene is a tree of nodes. A node with a `layout` or with `children`
//! becomes a container; anything else becomes a plain widget. Children
//! carrying a `region` are put into that border slot, the rest are added in
//! order.
//!
//! ```json
//! {
//!   "viewport": { "width": 800, "height": 600 },
//!   "root": {
//!     "name": "frame",
//!     "style": "width: 400px; height: 300px",
//!     "layout": { "type": "border" },
//!     "children": [
//!       { "name": "toolbar", "region": "north", "style": "height: 30px" },
//!       { "name": "editor", "region": "center" }
//!     ]
//!   }
//! }
//! ```

use std::fmt::Write as _;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use tracing::debug;
use trellis_dom::{DomTree, StyleMap};
use trellis_ui::{ComponentId, Layout, Quirks, Region, Ui, WidgetClass};

/// A whole scene file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Size of the headless viewport.
    #[serde(default)]
    pub viewport: Viewport,
    /// Engine corrections to emulate.
    #[serde(default)]
    pub quirks: Quirks,
    /// The node attached to the body.
    pub root: SceneNode,
}

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Viewport {
    /// Viewport width.
    pub width: f32,
    /// Viewport height.
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// One widget or container.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneNode {
    /// Label used in the printed tree.
    pub name: Option<String>,
    /// HTML template; `<div></div>` when absent.
    pub template: Option<String>,
    /// Inline style declarations applied before attaching.
    pub style: Option<String>,
    /// Extra classes.
    pub classes: Vec<String>,
    /// Tooltip title.
    pub title: Option<String>,
    /// Layout strategy; makes the node a container.
    pub layout: Option<Layout>,
    /// Border slot to put this node into.
    pub region: Option<Region>,
    /// Child nodes; makes the node a container.
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    fn is_container(&self) -> bool {
        self.layout.is_some() || !self.children.is_empty()
    }
}

/// A scene built into a live [`Ui`].
#[derive(Debug)]
pub struct Built {
    /// The widget tree.
    pub ui: Ui,
    /// The root node.
    pub root: ComponentId,
    names: Vec<(ComponentId, String)>,
}

impl Scene {
    /// Parse a scene from JSON text.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or unknown fields.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid scene description")
    }

    /// Build the scene under the body of a fresh document and lay it out.
    ///
    /// `extra_quirks` are switched on in addition to those in the file.
    ///
    /// # Errors
    ///
    /// Fails on malformed templates or when a node cannot be placed.
    pub fn build(&self, extra_quirks: Quirks) -> Result<Built> {
        let quirks = Quirks {
            legacy_margin_rounding: self.quirks.legacy_margin_rounding
                || extra_quirks.legacy_margin_rounding,
            offset_includes_parent_border: self.quirks.offset_includes_parent_border
                || extra_quirks.offset_includes_parent_border,
        };
        let dom = DomTree::with_viewport(self.viewport.width, self.viewport.height);
        let mut ui = Ui::with_quirks(dom, quirks)?;
        let mut names = Vec::new();
        let root = create(&mut ui, &self.root, &mut names)?;
        let body = ui.body();
        if !ui.attach(root, body)?.is_accepted() {
            anyhow::bail!("root could not be attached to the body");
        }
        populate(&mut ui, root, &self.root, &mut names)?;
        Ok(Built { ui, root, names })
    }
}

/// Create the component for `node`, without its children.
fn create(
    ui: &mut Ui,
    node: &SceneNode,
    names: &mut Vec<(ComponentId, String)>,
) -> Result<ComponentId> {
    let template = node.template.as_deref().unwrap_or("<div></div>");
    let id = if node.is_container() {
        ui.create_container(WidgetClass::CONTAINER, template, node.layout.clone())?
    } else {
        ui.create_widget(WidgetClass::WIDGET, template)
    };
    if let Some(style) = &node.style {
        ui.set_style(id, &StyleMap::parse(style))?;
    }
    for class in &node.classes {
        ui.add_class(id, class)?;
    }
    if let Some(title) = &node.title {
        ui.set_title(id, title)?;
    }
    if let Some(name) = &node.name {
        names.push((id, name.clone()));
    }
    Ok(id)
}

/// Create and place `node`'s children inside `container`, depth first.
fn populate(
    ui: &mut Ui,
    container: ComponentId,
    node: &SceneNode,
    names: &mut Vec<(ComponentId, String)>,
) -> Result<()> {
    for child_node in &node.children {
        let child = create(ui, child_node, names)?;
        let placed = match child_node.region {
            Some(region) => ui.set_slot(container, region.index(), child)?,
            None => ui.add(container, child)?,
        };
        if !placed {
            anyhow::bail!("{child} could not be placed in {container}");
        }
        debug!(%container, %child, "placed");
        populate(ui, child, child_node, names)?;
    }
    Ok(())
}

/// Geometry of one node, as printed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Node label.
    pub name: String,
    /// Element tag name.
    pub tag: String,
    /// Whether the node is currently in the document.
    pub visible: bool,
    /// Page left of the border box.
    pub left: f32,
    /// Page top of the border box.
    pub top: f32,
    /// Border box width.
    pub width: f32,
    /// Border box height.
    pub height: f32,
    /// Child slots; `None` for vacant ones.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Option<Report>>,
}

impl Built {
    /// Resize the root and let the layouts react.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        let mut styles = StyleMap::new();
        styles.set("width", trellis_dom::px(width));
        styles.set("height", trellis_dom::px(height));
        self.ui.restyle(self.root, &styles)?;
        Ok(())
    }

    fn name(&self, id: ComponentId) -> String {
        self.names
            .iter()
            .find(|(named, _)| *named == id)
            .map_or_else(|| id.to_string(), |(_, name)| name.clone())
    }

    /// Snapshot the geometry of the whole tree.
    #[must_use]
    pub fn report(&self) -> Report {
        self.report_node(self.root)
    }

    fn report_node(&self, id: ComponentId) -> Report {
        let rect = self.ui.page_rect(id);
        let tag = self
            .ui
            .element(id)
            .and_then(|node| self.ui.dom().as_element(node))
            .map_or_else(String::new, |element| element.tag_name.clone());
        let children = self
            .ui
            .children(id)
            .iter()
            .map(|slot| slot.map(|child| self.report_node(child)))
            .collect();
        Report {
            name: self.name(id),
            tag,
            visible: self.ui.is_attached(id),
            left: rect.x,
            top: rect.y,
            width: rect.width,
            height: rect.height,
            children,
        }
    }
}

impl Report {
    /// Render the report as an indented tree.
    #[must_use]
    pub fn render(&self, color: bool) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0, color);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize, color: bool) {
        let indent = "  ".repeat(depth);
        let label = format!("{} <{}>", self.name, self.tag);
        let geometry = format!(
            "x={:.1} y={:.1} w={:.1} h={:.1}",
            self.left, self.top, self.width, self.height
        );
        let _ = match (color, self.visible) {
            (false, true) => writeln!(out, "{indent}{label} {geometry}"),
            (false, false) => writeln!(out, "{indent}{label} (hidden)"),
            (true, true) => writeln!(out, "{indent}{} {}", label.bold(), geometry.cyan()),
            (true, false) => writeln!(out, "{indent}{}", format!("{label} (hidden)").dimmed()),
        };
        for child in &self.children {
            match child {
                Some(report) => report.render_into(out, depth + 1, color),
                None if color => {
                    let _ = writeln!(out, "{indent}  {}", "(vacant)".dimmed());
                }
                None => {
                    let _ = writeln!(out, "{indent}  (vacant)");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(json: &str) -> Built {
        Scene::from_json(json).unwrap().build(Quirks::NONE).unwrap()
    }

    #[test]
    fn test_border_scene() {
        let built = build(
            r#"{
                "viewport": { "width": 800, "height": 600 },
                "root": {
                    "name": "frame",
                    "style": "width: 400px; height: 300px",
                    "layout": { "type": "border" },
                    "children": [
                        { "name": "toolbar", "region": "north", "style": "height: 30px" },
                        { "name": "editor", "region": "center" }
                    ]
                }
            }"#,
        );
        let report = built.report();
        assert_eq!(report.name, "frame");
        assert_eq!(report.children.len(), 5);
        assert!(report.children[1..4].iter().all(Option::is_none));

        let toolbar = report.children[0].as_ref().unwrap();
        assert_eq!(
            (toolbar.left, toolbar.top, toolbar.width, toolbar.height),
            (0.0, 0.0, 400.0, 30.0)
        );
        let editor = report.children[4].as_ref().unwrap();
        assert_eq!(
            (editor.left, editor.top, editor.width, editor.height),
            (0.0, 30.0, 400.0, 270.0)
        );
    }

    #[test]
    fn test_resize_reflows() {
        let mut built = build(
            r#"{
                "root": {
                    "style": "width: 200px; height: 100px",
                    "layout": { "type": "bar", "axis": "horizontal", "align": true, "fit": true },
                    "children": [
                        { "name": "side", "style": "width: 50px" },
                        { "name": "main" }
                    ]
                }
            }"#,
        );
        built.resize(300.0, 80.0).unwrap();
        let report = built.report();
        let main = report.children[1].as_ref().unwrap();
        assert_eq!((main.left, main.width, main.height), (50.0, 250.0, 80.0));
    }

    #[test]
    fn test_render_plain() {
        let built = build(
            r#"{
                "root": {
                    "name": "deck",
                    "style": "width: 100px; height: 50px",
                    "layout": { "type": "card" },
                    "children": [{ "name": "back" }, { "name": "front" }]
                }
            }"#,
        );
        let text = built.report().render(false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "deck <div> x=0.0 y=0.0 w=100.0 h=50.0",
                "  back <div> (hidden)",
                "  front <div> x=0.0 y=0.0 w=100.0 h=50.0",
            ]
        );
    }

    #[test]
    fn test_editor_demo() {
        let built = build(include_str!("../../demos/editor.json"));
        let report = built.report();
        let rect = |r: &Report| (r.left, r.top, r.width, r.height);
        let slot = |i: usize| report.children[i].as_ref().unwrap();

        assert_eq!(rect(slot(0)), (0.0, 0.0, 800.0, 32.0));
        assert_eq!(rect(slot(1)), (0.0, 580.0, 800.0, 20.0));
        assert_eq!(rect(slot(2)), (0.0, 32.0, 180.0, 548.0));
        assert_eq!(rect(slot(4)), (180.0, 32.0, 620.0, 548.0));

        let save = slot(0).children[1].as_ref().unwrap();
        assert_eq!(rect(save), (60.0, 0.0, 60.0, 32.0));
        let symbols = slot(2).children[1].as_ref().unwrap();
        assert_eq!(rect(symbols), (0.0, 56.0, 180.0, 524.0));

        let tabs = &slot(4).children;
        assert!(!tabs[0].as_ref().unwrap().visible);
        assert_eq!(rect(tabs[1].as_ref().unwrap()), (180.0, 32.0, 620.0, 548.0));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(Scene::from_json(r#"{ "root": { "colour": "red" } }"#).is_err());
    }

    #[test]
    fn test_report_serializes() {
        let built = build(r#"{ "root": { "name": "solo", "style": "width: 10px; height: 5px" } }"#);
        let json = serde_json::to_value(built.report()).unwrap();
        assert_eq!(json["name"], "solo");
        assert_eq!(json["width"], 10.0);
        assert!(json.get("children").is_none());
    }
}
