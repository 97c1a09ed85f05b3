//! Components: lazily materialized elements.
//!
//! A component starts out as an HTML template. Attributes, classes and
//! styles set before it has an element are cached and flushed onto the
//! element, in one go, the first time it is attached to a parent that has
//! an element of its own. Attaching to a parent that is itself still a
//! template queues the child on the parent; the queue is flushed when the
//! parent materializes.
//!
//! Detaching removes the element from the document but keeps it, so a
//! later re-attach reuses the same element with the same id, attributes and
//! metrics.

use std::mem;

use tracing::debug;
use trellis_dom::{
    DomError, DomFacade, NodeId, StyleMap, TemplateNode, parse_template, validate_attribute_name,
};

use crate::events::{Event, EventTag, HasParentLike};
use crate::metrics::BoxMetrics;
use crate::widget::WidgetClass;
use crate::{ComponentId, Ui};

/// Outcome of [`Ui::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// The child's element was inserted into the parent's element.
    Attached,
    /// The parent has no element yet; the child will be inserted when it
    /// gets one.
    Deferred,
    /// The request was refused: the child is the body, already has a
    /// parent, or is an ancestor of the requested parent.
    Rejected,
}

impl Attachment {
    /// Whether the child now has (or will have) the requested parent.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Backing {
    Template(String),
    Element(NodeId),
}

/// A child waiting for its parent to materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingChild {
    pub(crate) child: ComponentId,
    pub(crate) before: Option<ComponentId>,
}

#[derive(Debug, Clone)]
pub(crate) struct ComponentData {
    pub(crate) backing: Backing,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) added_classes: Vec<String>,
    pub(crate) removed_classes: Vec<String>,
    pub(crate) style: StyleMap,
    pub(crate) parent: Option<ComponentId>,
    pub(crate) pending: Vec<PendingChild>,
    pub(crate) metrics: BoxMetrics,
    pub(crate) class: WidgetClass,
    pub(crate) container: Option<ComponentId>,
    pub(crate) element_id: Option<String>,
}

impl ComponentData {
    fn new(backing: Backing) -> Self {
        Self {
            backing,
            attrs: Vec::new(),
            added_classes: Vec::new(),
            removed_classes: Vec::new(),
            style: StyleMap::new(),
            parent: None,
            pending: Vec::new(),
            metrics: BoxMetrics::default(),
            class: WidgetClass::COMPONENT,
            container: None,
            element_id: None,
        }
    }

    pub(crate) const fn element(&self) -> Option<NodeId> {
        match self.backing {
            Backing::Element(node) => Some(node),
            Backing::Template(_) => None,
        }
    }

    /// An attribute written on the template's root element.
    fn template_attribute(&self, name: &str) -> Option<String> {
        let Backing::Template(template) = &self.backing else {
            return None;
        };
        match parse_template(template) {
            Ok(TemplateNode::Element { attrs, .. }) => attrs
                .into_iter()
                .find(|(existing, _)| existing == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }
}

impl<D: DomFacade> Ui<D> {
    /// Create an unmaterialized component from an HTML template.
    ///
    /// The template is only parsed when the component is first attached.
    pub fn create_component(&mut self, template: &str) -> ComponentId {
        let id = ComponentId(self.components.len());
        self.components
            .push(ComponentData::new(Backing::Template(template.to_string())));
        debug!(component = %id, "created component");
        id
    }

    /// Wrap an existing element.
    ///
    /// Wrapping the same element twice returns the same component. If the
    /// element's parent is already wrapped, that component becomes the new
    /// component's parent.
    ///
    /// # Errors
    ///
    /// Fails if `node` is not an element of the document.
    pub fn wrap(&mut self, node: NodeId) -> Result<ComponentId, DomError> {
        self.wrap_as(node, WidgetClass::COMPONENT)
    }

    pub(crate) fn wrap_as(
        &mut self,
        node: NodeId,
        class: WidgetClass,
    ) -> Result<ComponentId, DomError> {
        if let Some(existing) = self.component_for(node) {
            return Ok(existing);
        }
        let element_id = self.dom.ensure_id(node)?;
        let id = ComponentId(self.components.len());
        let mut data = ComponentData::new(Backing::Element(node));
        data.class = class;
        data.element_id = Some(element_id);
        data.parent = self.dom.parent(node).and_then(|p| self.component_for(p));
        self.components.push(data);
        let _ = self.by_node.insert(node, id);
        self.calculate_metrics(id)?;
        Ok(id)
    }

    /// The component's element, once materialized.
    #[must_use]
    pub fn element(&self, id: ComponentId) -> Option<NodeId> {
        self.components[id.0].element()
    }

    /// Whether the component has an element.
    #[must_use]
    pub fn is_materialized(&self, id: ComponentId) -> bool {
        self.element(id).is_some()
    }

    /// Whether the component has a parent, either in the document or
    /// queued on a parent that has not materialized yet.
    #[must_use]
    pub fn is_attached(&self, id: ComponentId) -> bool {
        self.components[id.0].parent.is_some()
            || self
                .element(id)
                .is_some_and(|node| self.dom.parent(node).is_some())
    }

    /// The component's parent, as seen by event bubbling.
    #[must_use]
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.logical_parent(id)
    }

    /// The unique id given to the component's element when it
    /// materialized.
    #[must_use]
    pub fn element_id(&self, id: ComponentId) -> Option<&str> {
        self.components[id.0].element_id.as_deref()
    }

    /// Set an attribute, caching it until the element exists.
    ///
    /// A cached `style` attribute is merged over the template's inline
    /// style rather than replacing it.
    ///
    /// # Errors
    ///
    /// Fails on attribute names that could not appear in markup.
    pub fn set_attribute(
        &mut self,
        id: ComponentId,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        if let Some(node) = self.element(id) {
            return self.dom.set_attribute(node, name, value);
        }
        validate_attribute_name(name)?;
        let name = name.to_ascii_lowercase();
        if name == "style" {
            self.components[id.0].style.merge(&StyleMap::parse(value));
            return Ok(());
        }
        let attrs = &mut self.components[id.0].attrs;
        match attrs.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => attrs.push((name, value.to_string())),
        }
        Ok(())
    }

    /// Read an attribute.
    ///
    /// Before materialization, values set through
    /// [`set_attribute`](Self::set_attribute) shadow those written in the
    /// template.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn attribute(&self, id: ComponentId, name: &str) -> Result<Option<String>, DomError> {
        if let Some(node) = self.element(id) {
            return self.dom.get_attribute(node, name);
        }
        let name = name.to_ascii_lowercase();
        let data = &self.components[id.0];
        Ok(data
            .attrs
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, value)| value.clone())
            .or_else(|| data.template_attribute(&name)))
    }

    /// Set the tooltip title.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn set_title(&mut self, id: ComponentId, title: &str) -> Result<(), DomError> {
        self.set_attribute(id, "title", title)
    }

    /// The tooltip title.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn title(&self, id: ComponentId) -> Result<Option<String>, DomError> {
        self.attribute(id, "title")
    }

    pub(crate) fn queue_class(&mut self, id: ComponentId, class: &str) {
        let data = &mut self.components[id.0];
        data.removed_classes.retain(|c| c != class);
        if !data.added_classes.iter().any(|c| c == class) {
            data.added_classes.push(class.to_string());
        }
    }

    /// Add a class to the component's element.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn add_class(&mut self, id: ComponentId, class: &str) -> Result<(), DomError> {
        match self.element(id) {
            Some(node) => self.dom.add_class(node, class),
            None => {
                self.queue_class(id, class);
                Ok(())
            }
        }
    }

    /// Remove a class from the component's element.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn remove_class(&mut self, id: ComponentId, class: &str) -> Result<(), DomError> {
        if let Some(node) = self.element(id) {
            return self.dom.remove_class(node, class);
        }
        let data = &mut self.components[id.0];
        data.added_classes.retain(|c| c != class);
        if !data.removed_classes.iter().any(|c| c == class) {
            data.removed_classes.push(class.to_string());
        }
        Ok(())
    }

    /// Whether the component carries `class`.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn has_class(&self, id: ComponentId, class: &str) -> Result<bool, DomError> {
        match self.element(id) {
            Some(node) => Ok(self
                .dom
                .get_attribute(node, "class")?
                .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))),
            None => {
                let data = &self.components[id.0];
                let in_template = data
                    .template_attribute("class")
                    .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class));
                Ok(data.added_classes.iter().any(|c| c == class)
                    || (in_template && !data.removed_classes.iter().any(|c| c == class)))
            }
        }
    }

    /// Merge `styles` into the component's inline style.
    ///
    /// Metrics are not refreshed; use [`restyle`](Self::restyle) when the
    /// change affects borders, margins or paddings.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn set_style(&mut self, id: ComponentId, styles: &StyleMap) -> Result<(), DomError> {
        match self.element(id) {
            Some(node) => self.dom.apply_style(node, styles),
            None => {
                self.components[id.0].style.merge(styles);
                Ok(())
            }
        }
    }

    /// Set a single inline style property.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn set_style_property(
        &mut self,
        id: ComponentId,
        property: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let mut styles = StyleMap::new();
        styles.set(property, value);
        self.set_style(id, &styles)
    }

    /// Remove a single inline style property.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn remove_style_property(
        &mut self,
        id: ComponentId,
        property: &str,
    ) -> Result<(), DomError> {
        match self.element(id) {
            Some(node) => {
                let mut styles = self.dom.inline_style(node)?;
                if styles.remove(property).is_some() {
                    self.dom.set_attribute(node, "style", &styles.to_string())?;
                }
                Ok(())
            }
            None => {
                let _ = self.components[id.0].style.remove(property);
                Ok(())
            }
        }
    }

    /// An inline style value.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn style(&self, id: ComponentId, property: &str) -> Result<Option<String>, DomError> {
        match self.element(id) {
            Some(node) => Ok(self.dom.inline_style(node)?.get(property).map(String::from)),
            None => {
                let data = &self.components[id.0];
                Ok(data.style.get(property).map(String::from).or_else(|| {
                    data.template_attribute("style")
                        .and_then(|text| StyleMap::parse(&text).get(property).map(String::from))
                }))
            }
        }
    }

    /// The cached box metrics (all zero before materialization).
    #[must_use]
    pub fn metrics(&self, id: ComponentId) -> BoxMetrics {
        self.components[id.0].metrics
    }

    /// Re-read the component's box metrics from its element's computed
    /// styles. Does nothing before materialization.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn calculate_metrics(&mut self, id: ComponentId) -> Result<(), DomError> {
        if let Some(node) = self.element(id) {
            self.components[id.0].metrics = BoxMetrics::calculate(&self.dom, node, self.quirks)?;
        }
        Ok(())
    }

    /// Insert `child` as the last child of `parent`.
    ///
    /// If `parent` has an element, `child` is materialized (its cached
    /// attributes, classes and styles flushed), inserted, measured, and
    /// then its own queued children are attached. Otherwise `child` is
    /// queued on `parent`.
    ///
    /// # Errors
    ///
    /// Propagates template and document failures.
    pub fn attach(
        &mut self,
        child: ComponentId,
        parent: ComponentId,
    ) -> Result<Attachment, DomError> {
        self.attach_at(child, parent, None)
    }

    /// Like [`attach`](Self::attach), inserting before `reference` when it
    /// is a child of `parent` and appending otherwise.
    ///
    /// # Errors
    ///
    /// Propagates template and document failures.
    pub fn attach_before(
        &mut self,
        child: ComponentId,
        parent: ComponentId,
        reference: ComponentId,
    ) -> Result<Attachment, DomError> {
        self.attach_at(child, parent, Some(reference))
    }

    fn attach_at(
        &mut self,
        child: ComponentId,
        parent: ComponentId,
        before: Option<ComponentId>,
    ) -> Result<Attachment, DomError> {
        if child == self.body || self.is_attached(child) || self.is_ancestor(child, parent) {
            debug!(%child, %parent, "attach rejected");
            return Ok(Attachment::Rejected);
        }
        if !self.is_materialized(parent) {
            self.components[parent.0]
                .pending
                .push(PendingChild { child, before });
            self.components[child.0].parent = Some(parent);
            debug!(%child, %parent, "attach deferred");
            return Ok(Attachment::Deferred);
        }
        self.insert(child, parent, before)?;
        Ok(Attachment::Attached)
    }

    /// Whether `candidate` is `id` or one of its logical ancestors.
    pub(crate) fn is_ancestor(&self, candidate: ComponentId, id: ComponentId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == candidate {
                return true;
            }
            current = self.logical_parent(c);
        }
        false
    }

    /// Insert a child into a materialized parent, skipping the
    /// already-attached check (queued children carry their parent).
    fn insert(
        &mut self,
        child: ComponentId,
        parent: ComponentId,
        before: Option<ComponentId>,
    ) -> Result<(), DomError> {
        let Some(parent_node) = self.element(parent) else {
            return Ok(());
        };
        let node = self.materialize(child)?;
        let reference = before
            .and_then(|r| self.element(r))
            .filter(|&r| self.dom.parent(r) == Some(parent_node));
        match reference {
            Some(reference) => self.dom.insert_before(parent_node, node, reference)?,
            None => self.dom.append_child(parent_node, node)?,
        }
        self.components[child.0].parent = Some(parent);
        self.calculate_metrics(child)?;
        debug!(%child, %parent, "attached");

        let queued = mem::take(&mut self.components[child.0].pending);
        for PendingChild { child: grandchild, before } in queued {
            self.insert(grandchild, child, before)?;
        }
        // a container laid out before it had an element saw a zero-sized box
        self.on_resize(child)?;
        self.fire(Event::new(EventTag::Attach, child))
    }

    /// Give the component an element, flushing the cached state onto it.
    fn materialize(&mut self, id: ComponentId) -> Result<NodeId, DomError> {
        let template = match &self.components[id.0].backing {
            Backing::Element(node) => return Ok(*node),
            Backing::Template(template) => template.clone(),
        };
        let node = self.dom.create_from_html(&template)?;
        let data = &mut self.components[id.0];
        let attrs = mem::take(&mut data.attrs);
        let added = mem::take(&mut data.added_classes);
        let removed = mem::take(&mut data.removed_classes);
        let style = mem::take(&mut data.style);

        for (name, value) in &attrs {
            self.dom.set_attribute(node, name, value)?;
        }
        for class in &added {
            self.dom.add_class(node, class)?;
        }
        for class in &removed {
            self.dom.remove_class(node, class)?;
        }
        if !style.is_empty() {
            self.dom.apply_style(node, &style)?;
        }
        let element_id = self.dom.ensure_id(node)?;

        let data = &mut self.components[id.0];
        data.backing = Backing::Element(node);
        data.element_id = Some(element_id);
        let _ = self.by_node.insert(node, id);
        debug!(component = %id, ?node, "materialized");
        Ok(node)
    }

    /// Remove the component from its parent.
    ///
    /// The element and everything cached on the component are kept. Returns
    /// `false` if the component had no parent.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn detach(&mut self, id: ComponentId) -> Result<bool, DomError> {
        let parent = self.components[id.0].parent.take();
        if let Some(parent) = parent {
            self.components[parent.0].pending.retain(|p| p.child != id);
        }
        let in_document = match self.element(id) {
            Some(node) if self.dom.parent(node).is_some() => {
                self.dom.remove(node)?;
                true
            }
            _ => false,
        };
        if parent.is_none() && !in_document {
            return Ok(false);
        }
        debug!(component = %id, "detached");
        self.fire(Event::new(EventTag::Detach, id))?;
        Ok(true)
    }
}
