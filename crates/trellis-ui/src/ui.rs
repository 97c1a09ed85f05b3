//! The component arena.
//!
//! [`Ui`] owns every component, container and listener created against one
//! document, and the document facade itself. Components refer to each other
//! by [`ComponentId`] index, the same way the DOM refers to nodes by
//! `NodeId`, so the parent/child/container relations never need shared
//! ownership.

use std::collections::HashMap;
use std::fmt;
use std::mem;

use tracing::trace;
use trellis_dom::{DomError, DomFacade, DomTree, NodeId, StyleMap};

use crate::component::ComponentData;
use crate::container::ContainerData;
use crate::events::{Event, EventBus, EventTag, HasParentLike, ListenerId};
use crate::quirks::Quirks;
use crate::widget::WidgetClass;

/// Index of a component in its [`Ui`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub usize);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Components, containers and event listeners bound to one document.
pub struct Ui<D: DomFacade = DomTree> {
    pub(crate) dom: D,
    pub(crate) quirks: Quirks,
    pub(crate) components: Vec<ComponentData>,
    pub(crate) by_node: HashMap<NodeId, ComponentId>,
    pub(crate) containers: HashMap<ComponentId, ContainerData>,
    pub(crate) events: EventBus,
    pub(crate) body: ComponentId,
}

impl<D: DomFacade> fmt::Debug for Ui<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ui")
            .field("quirks", &self.quirks)
            .field("components", &self.components.len())
            .field("containers", &self.containers.len())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl<D: DomFacade> Ui<D> {
    /// Bind to a document with no engine quirks.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::MissingBody`] if the document has no body.
    pub fn new(dom: D) -> Result<Self, DomError> {
        Self::with_quirks(dom, Quirks::NONE)
    }

    /// Bind to a document, applying the given geometry corrections.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::MissingBody`] if the document has no body.
    pub fn with_quirks(dom: D, quirks: Quirks) -> Result<Self, DomError> {
        let body_node = dom.body().ok_or(DomError::MissingBody)?;
        let mut ui = Self {
            dom,
            quirks,
            components: Vec::new(),
            by_node: HashMap::new(),
            containers: HashMap::new(),
            events: EventBus::new(),
            body: ComponentId(0),
        };
        ui.body = ui.wrap_as(body_node, WidgetClass::BODY)?;
        Ok(ui)
    }

    /// The document facade.
    #[must_use]
    pub const fn dom(&self) -> &D {
        &self.dom
    }

    /// Mutable access to the document facade.
    ///
    /// Changes made behind the components' backs are not reflected in their
    /// cached metrics until [`calculate_metrics`](Self::calculate_metrics)
    /// or [`restyle`](Self::restyle) runs.
    pub const fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    /// Release the document.
    #[must_use]
    pub fn into_dom(self) -> D {
        self.dom
    }

    /// The active geometry corrections.
    #[must_use]
    pub const fn quirks(&self) -> Quirks {
        self.quirks
    }

    /// The component wrapping the document body.
    #[must_use]
    pub const fn body(&self) -> ComponentId {
        self.body
    }

    /// Number of components created so far, including the body.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Whether `id` names a component of this arena.
    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        id.0 < self.components.len()
    }

    /// The component wrapping `node`, if there is one.
    #[must_use]
    pub fn component_for(&self, node: NodeId) -> Option<ComponentId> {
        self.by_node.get(&node).copied()
    }

    /// Register a listener for `tag` events delivered to `source`.
    pub fn listen<F>(&mut self, source: ComponentId, tag: EventTag, callback: F) -> ListenerId
    where
        F: FnMut(&Event, ComponentId) + 'static,
    {
        self.events.listen(source, tag, callback)
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        self.events.unlisten(id)
    }

    /// Announce `event`.
    ///
    /// Listeners run first. A style event aimed at a container then re-runs
    /// that container's layout resize hook.
    ///
    /// # Errors
    ///
    /// Propagates document failures from the resize hook.
    pub fn fire(&mut self, event: Event) -> Result<(), DomError> {
        let mut bus = mem::take(&mut self.events);
        let delivered = bus.dispatch(&event, self);
        self.events = bus;
        trace!(tag = %event.tag, target = %event.target, delivered, "event");
        if event.tag == EventTag::Style {
            self.on_resize(event.target)?;
        }
        Ok(())
    }

    /// Apply `styles` to a component, refresh its metrics and announce the
    /// change.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn restyle(&mut self, id: ComponentId, styles: &StyleMap) -> Result<(), DomError> {
        self.set_style(id, styles)?;
        self.calculate_metrics(id)?;
        self.fire(Event::new(EventTag::Style, id))
    }
}

impl<D: DomFacade> HasParentLike for Ui<D> {
    /// The component wrapping the element's DOM parent, or the logical
    /// parent recorded for a component that is still waiting to attach.
    fn logical_parent(&self, source: ComponentId) -> Option<ComponentId> {
        let data = self.components.get(source.0)?;
        match data.element() {
            Some(node) => self
                .dom
                .parent(node)
                .and_then(|parent| self.by_node.get(&parent).copied()),
            None => data.parent,
        }
    }
}
