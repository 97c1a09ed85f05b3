//! The document facade.
//!
//! [`DomFacade`] is the complete list of document operations the widget
//! layer performs. Anything that can answer these calls, be it a browser
//! binding or the headless [`DomTree`], can host widgets.

use crate::{DomError, DomTree, NodeId, StyleMap};

/// Document operations needed by components, containers and layouts.
pub trait DomFacade {
    /// The body element, if the document has one.
    fn body(&self) -> Option<NodeId>;

    /// Create a detached element with the given tag name.
    fn create_element(&mut self, tag_name: &str) -> NodeId;

    /// Create a detached element tree from an HTML template.
    ///
    /// # Errors
    ///
    /// Fails when the template is not a single well-formed element.
    fn create_from_html(&mut self, template: &str) -> Result<NodeId, DomError>;

    /// Append `child` to `parent`, moving it if it already has a parent.
    ///
    /// # Errors
    ///
    /// Fails on unknown nodes or when the insertion would create a cycle.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError>;

    /// Insert `child` into `parent` before `reference`.
    ///
    /// # Errors
    ///
    /// Fails when `reference` is not a child of `parent`, plus the
    /// [`append_child`](Self::append_child) failures.
    fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<(), DomError>;

    /// Remove `node` from its parent; a no-op for parentless nodes.
    ///
    /// # Errors
    ///
    /// Fails on unknown nodes.
    fn remove(&mut self, node: NodeId) -> Result<(), DomError>;

    /// The parent of `node`.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Read an attribute.
    ///
    /// # Errors
    ///
    /// Fails on unknown nodes and non-elements.
    fn get_attribute(&self, node: NodeId, name: &str) -> Result<Option<String>, DomError>;

    /// Write an attribute.
    ///
    /// # Errors
    ///
    /// Fails on invalid attribute names, unknown nodes and non-elements.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError>;

    /// A copy of the element's inline declaration block.
    ///
    /// # Errors
    ///
    /// Fails on unknown nodes and non-elements.
    fn inline_style(&self, node: NodeId) -> Result<StyleMap, DomError>;

    /// Merge `styles` into the element's inline declaration block.
    ///
    /// # Errors
    ///
    /// Fails on unknown nodes and non-elements.
    fn apply_style(&mut self, node: NodeId, styles: &StyleMap) -> Result<(), DomError>;

    /// The computed value of `property`.
    ///
    /// # Errors
    ///
    /// Fails on unknown nodes and non-elements.
    fn computed_style(&self, node: NodeId, property: &str) -> Result<String, DomError>;

    /// Distance from the offset parent's padding edge to the border edge.
    fn offset_left(&self, node: NodeId) -> f32;

    /// Vertical counterpart of [`offset_left`](Self::offset_left).
    fn offset_top(&self, node: NodeId) -> f32;

    /// Border-box width.
    fn offset_width(&self, node: NodeId) -> f32;

    /// Border-box height.
    fn offset_height(&self, node: NodeId) -> f32;

    /// The nearest positioned ancestor (or the body).
    fn offset_parent(&self, node: NodeId) -> Option<NodeId>;

    /// The element's id, generating a unique one if it has none.
    ///
    /// # Errors
    ///
    /// Fails on unknown nodes and non-elements.
    fn ensure_id(&mut self, node: NodeId) -> Result<String, DomError>;

    /// Add `class` to the element's class list.
    ///
    /// # Errors
    ///
    /// Fails on unknown nodes and non-elements.
    fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        let current = self.get_attribute(node, "class")?.unwrap_or_default();
        if current.split_ascii_whitespace().any(|token| token == class) {
            return Ok(());
        }
        let updated = if current.trim().is_empty() {
            class.to_string()
        } else {
            format!("{} {class}", current.trim())
        };
        self.set_attribute(node, "class", &updated)
    }

    /// Remove `class` from the element's class list.
    ///
    /// # Errors
    ///
    /// Fails on unknown nodes and non-elements.
    fn remove_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        let Some(current) = self.get_attribute(node, "class")? else {
            return Ok(());
        };
        let kept: Vec<&str> = current
            .split_ascii_whitespace()
            .filter(|token| *token != class)
            .collect();
        self.set_attribute(node, "class", &kept.join(" "))
    }
}

impl DomFacade for DomTree {
    fn body(&self) -> Option<NodeId> {
        Self::body(self)
    }

    fn create_element(&mut self, tag_name: &str) -> NodeId {
        Self::create_element(self, tag_name)
    }

    fn create_from_html(&mut self, template: &str) -> Result<NodeId, DomError> {
        Self::create_from_html(self, template)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        Self::append_child(self, parent, child)
    }

    fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<(), DomError> {
        Self::insert_before(self, parent, child, reference)
    }

    fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        Self::remove(self, node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Self::parent(self, node)
    }

    fn get_attribute(&self, node: NodeId, name: &str) -> Result<Option<String>, DomError> {
        Self::get_attribute(self, node, name)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        Self::set_attribute(self, node, name, value)
    }

    fn inline_style(&self, node: NodeId) -> Result<StyleMap, DomError> {
        Self::inline_style(self, node)
    }

    fn apply_style(&mut self, node: NodeId, styles: &StyleMap) -> Result<(), DomError> {
        Self::apply_style(self, node, styles)
    }

    fn computed_style(&self, node: NodeId, property: &str) -> Result<String, DomError> {
        Self::computed_style(self, node, property)
    }

    fn offset_left(&self, node: NodeId) -> f32 {
        Self::offset_left(self, node)
    }

    fn offset_top(&self, node: NodeId) -> f32 {
        Self::offset_top(self, node)
    }

    fn offset_width(&self, node: NodeId) -> f32 {
        Self::offset_width(self, node)
    }

    fn offset_height(&self, node: NodeId) -> f32 {
        Self::offset_height(self, node)
    }

    fn offset_parent(&self, node: NodeId) -> Option<NodeId> {
        Self::offset_parent(self, node)
    }

    fn ensure_id(&mut self, node: NodeId) -> Result<String, DomError> {
        Self::ensure_id(self, node)
    }

    fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        let data = self
            .as_element_mut(node)
            .ok_or(DomError::NotAnElement(node))?;
        let _ = data.add_class(class);
        Ok(())
    }

    fn remove_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        let data = self
            .as_element_mut(node)
            .ok_or(DomError::NotAnElement(node))?;
        let _ = data.remove_class(class);
        Ok(())
    }
}
