//! Containers: widgets that own an ordered list of child widgets and
//! delegate their placement to a [`Layout`].
//!
//! The child list may contain vacant slots, which border layouts use to
//! leave a region empty. A widget belongs to at most one container at a
//! time; the container records itself on the widget so that the exclusive
//! parentage can be checked without scanning.
//!
//! Every membership change re-runs the layout. A style notification aimed
//! at the container only runs the layout's cheaper resize hook.

use tracing::{debug, warn};
use trellis_dom::{DomError, DomFacade};

use crate::component::Attachment;
use crate::events::{Event, EventTag};
use crate::layout::Layout;
use crate::widget::WidgetClass;
use crate::{ComponentId, Ui};

#[derive(Debug, Clone, Default)]
pub(crate) struct ContainerData {
    pub(crate) children: Vec<Option<ComponentId>>,
    pub(crate) layout: Option<Layout>,
    pub(crate) dirty: bool,
}

impl<D: DomFacade> Ui<D> {
    /// Create a container widget.
    ///
    /// The element is made `position: relative` so absolutely positioned
    /// children are placed against its padding box.
    ///
    /// # Errors
    ///
    /// Propagates document failures from the initial layout run.
    pub fn create_container(
        &mut self,
        class: WidgetClass,
        template: &str,
        layout: Option<Layout>,
    ) -> Result<ComponentId, DomError> {
        let id = self.create_widget(class, template);
        self.set_style_property(id, "position", "relative")?;
        let _ = self.containers.insert(
            id,
            ContainerData {
                children: Vec::new(),
                layout,
                dirty: true,
            },
        );
        self.layout(id)?;
        Ok(id)
    }

    /// Whether the component is a container.
    #[must_use]
    pub fn is_container(&self, id: ComponentId) -> bool {
        self.containers.contains_key(&id)
    }

    /// The child list, vacant slots included. Empty for non-containers.
    #[must_use]
    pub fn children(&self, container: ComponentId) -> &[Option<ComponentId>] {
        self.containers
            .get(&container)
            .map(|data| data.children.as_slice())
            .unwrap_or(&[])
    }

    /// The children that are present, in list order.
    #[must_use]
    pub fn child_widgets(&self, container: ComponentId) -> Vec<ComponentId> {
        self.children(container).iter().flatten().copied().collect()
    }

    /// The container a widget currently belongs to.
    #[must_use]
    pub fn container_of(&self, widget: ComponentId) -> Option<ComponentId> {
        self.components[widget.0].container
    }

    /// The container's layout strategy.
    #[must_use]
    pub fn layout_of(&self, container: ComponentId) -> Option<&Layout> {
        self.containers.get(&container)?.layout.as_ref()
    }

    /// Whether a membership change is waiting for a layout run.
    #[must_use]
    pub fn is_dirty(&self, container: ComponentId) -> bool {
        self.containers.get(&container).is_some_and(|data| data.dirty)
    }

    /// Replace the layout strategy and re-run layout.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn set_layout(
        &mut self,
        container: ComponentId,
        layout: Option<Layout>,
    ) -> Result<(), DomError> {
        let Some(data) = self.containers.get_mut(&container) else {
            return Ok(());
        };
        data.layout = layout;
        data.dirty = true;
        self.layout(container)
    }

    fn can_adopt(&self, container: ComponentId, widget: ComponentId) -> bool {
        widget != self.body
            && widget != container
            && self.container_of(widget).is_none()
            && !self.is_attached(widget)
            && !self.is_ancestor(widget, container)
    }

    /// Append a widget.
    ///
    /// Returns `false`, changing nothing, when `container` is not a
    /// container, the widget already has a container or a parent, or the
    /// widget contains `container`.
    ///
    /// # Errors
    ///
    /// Propagates document failures from the layout run.
    pub fn add(&mut self, container: ComponentId, widget: ComponentId) -> Result<bool, DomError> {
        if !self.is_container(container) || !self.can_adopt(container, widget) {
            debug!(%container, %widget, "add rejected");
            return Ok(false);
        }
        self.adopt(container, widget)?;
        self.push_slot(container, Some(widget));
        self.layout(container)?;
        Ok(true)
    }

    /// Append an empty slot.
    ///
    /// # Errors
    ///
    /// Propagates document failures from the layout run.
    pub fn add_vacant(&mut self, container: ComponentId) -> Result<bool, DomError> {
        if !self.is_container(container) {
            return Ok(false);
        }
        self.push_slot(container, None);
        self.layout(container)?;
        Ok(true)
    }

    /// Put a widget into slot `index`, growing the list with vacant slots
    /// as needed. A widget already occupying the slot is released first.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn set_slot(
        &mut self,
        container: ComponentId,
        index: usize,
        widget: ComponentId,
    ) -> Result<bool, DomError> {
        if !self.is_container(container) || !self.can_adopt(container, widget) {
            return Ok(false);
        }
        let previous = self
            .children(container)
            .get(index)
            .copied()
            .flatten();
        if let Some(previous) = previous {
            self.release(previous)?;
        }
        self.adopt(container, widget)?;
        if let Some(data) = self.containers.get_mut(&container) {
            if data.children.len() <= index {
                data.children.resize(index + 1, None);
            }
            data.children[index] = Some(widget);
            data.dirty = true;
        }
        self.layout(container)?;
        Ok(true)
    }

    /// Remove a widget.
    ///
    /// Returns `false` when the widget does not belong to `container`.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn remove(
        &mut self,
        container: ComponentId,
        widget: ComponentId,
    ) -> Result<bool, DomError> {
        if self.container_of(widget) != Some(container) {
            return Ok(false);
        }
        self.release(widget)?;
        if let Some(data) = self.containers.get_mut(&container) {
            if let Some(index) = data.children.iter().position(|&c| c == Some(widget)) {
                let _ = data.children.remove(index);
            }
            data.dirty = true;
        }
        self.layout(container)?;
        Ok(true)
    }

    /// Remove every widget in a single pass, without re-running layout
    /// per child.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn remove_all(&mut self, container: ComponentId) -> Result<(), DomError> {
        let Some(data) = self.containers.get_mut(&container) else {
            return Ok(());
        };
        let children: Vec<ComponentId> = data.children.drain(..).flatten().collect();
        data.dirty = false;
        for child in children {
            self.release(child)?;
        }
        debug!(%container, "removed all children");
        Ok(())
    }

    fn push_slot(&mut self, container: ComponentId, slot: Option<ComponentId>) {
        if let Some(data) = self.containers.get_mut(&container) {
            data.children.push(slot);
            data.dirty = true;
        }
    }

    fn adopt(&mut self, container: ComponentId, widget: ComponentId) -> Result<(), DomError> {
        self.components[widget.0].container = Some(container);
        let tag = self.widget_class(container).child_tag();
        self.add_class(widget, &tag)
    }

    /// Detach a widget and drop its container back-reference and tag.
    ///
    /// The layout first undoes the sizes it wrote on the widget.
    fn release(&mut self, widget: ComponentId) -> Result<(), DomError> {
        let Some(container) = self.components[widget.0].container.take() else {
            return Ok(());
        };
        let layout = self
            .containers
            .get_mut(&container)
            .and_then(|data| data.layout.take());
        if let Some(mut layout) = layout {
            let result = layout.release(self, widget);
            self.restore_layout(container, layout);
            result?;
        }
        let _ = self.detach(widget)?;
        let tag = self.widget_class(container).child_tag();
        self.remove_class(widget, &tag)
    }

    /// Run the container's layout strategy over its children.
    ///
    /// Without a strategy the children are re-appended in list order.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn layout(&mut self, container: ComponentId) -> Result<(), DomError> {
        let Some(data) = self.containers.get_mut(&container) else {
            return Ok(());
        };
        match data.layout.take() {
            Some(mut layout) => {
                let result = layout.do_layout(self, container);
                self.restore_layout(container, layout);
                result?;
            }
            None => {
                for child in self.child_widgets(container) {
                    self.append_into(container, child)?;
                }
            }
        }
        if let Some(data) = self.containers.get_mut(&container) {
            data.dirty = false;
        }
        debug!(%container, "layout");
        self.fire(Event::new(EventTag::Layout, container))
    }

    /// Re-run only the layout's resize hook.
    pub(crate) fn on_resize(&mut self, container: ComponentId) -> Result<(), DomError> {
        let layout = self
            .containers
            .get_mut(&container)
            .and_then(|data| data.layout.take());
        let Some(mut layout) = layout else {
            return Ok(());
        };
        let result = layout.on_resize(self, container);
        self.restore_layout(container, layout);
        result
    }

    fn restore_layout(&mut self, container: ComponentId, layout: Layout) {
        if let Some(data) = self.containers.get_mut(&container)
            && data.layout.is_none()
        {
            data.layout = Some(layout);
        }
    }

    /// Make `child`'s element the last child of `host`'s element, moving
    /// it from wherever it was.
    pub(crate) fn append_into(
        &mut self,
        host: ComponentId,
        child: ComponentId,
    ) -> Result<(), DomError> {
        if self.components[child.0].parent == Some(host) {
            if let (Some(host_node), Some(child_node)) = (self.element(host), self.element(child)) {
                self.dom.append_child(host_node, child_node)?;
            }
            return Ok(());
        }
        let _ = self.detach(child)?;
        if self.attach(child, host)? == Attachment::Rejected {
            warn!(%host, %child, "child could not be placed in its container");
        }
        Ok(())
    }
}
