//! Widget classes.
//!
//! A widget is a component that declares a class: a name plus the ordered
//! list of style tags its element carries. Tags accumulate along the
//! class hierarchy, so a container is also tagged as a box and as a widget.

use crate::{ComponentId, Ui};
use trellis_dom::DomFacade;

/// A widget class: name and the style tags applied to its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetClass {
    /// Human readable class name.
    pub name: &'static str,
    /// Style tags, most general first.
    pub tags: &'static [&'static str],
}

impl WidgetClass {
    /// A bare component with no widget styling.
    pub const COMPONENT: Self = Self::new("component", &[]);

    /// The document body wrapper.
    pub const BODY: Self = Self::new("body", &[]);

    /// A plain widget.
    pub const WIDGET: Self = Self::new("widget", &["trellis-widget"]);

    /// A widget with box chrome.
    pub const BOX: Self = Self::new("box", &["trellis-widget", "trellis-box"]);

    /// A widget that owns children and a layout.
    pub const CONTAINER: Self = Self::new(
        "container",
        &["trellis-widget", "trellis-box", "trellis-container"],
    );

    /// The anonymous nested regions a border layout creates.
    pub const REGION: Self = Self::new("region", &["trellis-region"]);

    /// Declare a class.
    #[must_use]
    pub const fn new(name: &'static str, tags: &'static [&'static str]) -> Self {
        Self { name, tags }
    }

    /// The most specific style tag, if the class has any.
    #[must_use]
    pub fn primary_tag(&self) -> Option<&'static str> {
        self.tags.last().copied()
    }

    /// The tag this class gives to the children it adopts.
    #[must_use]
    pub fn child_tag(&self) -> String {
        format!("{}-child", self.primary_tag().unwrap_or(self.name))
    }
}

impl<D: DomFacade> Ui<D> {
    /// Create an unmaterialized widget of `class` from an HTML template.
    ///
    /// The class's style tags are queued on the component and land on the
    /// element when it is first attached.
    pub fn create_widget(&mut self, class: WidgetClass, template: &str) -> ComponentId {
        let id = self.create_component(template);
        self.components[id.0].class = class;
        for tag in class.tags {
            self.queue_class(id, tag);
        }
        id
    }

    /// The class a component was created with.
    #[must_use]
    pub fn widget_class(&self, id: ComponentId) -> WidgetClass {
        self.components[id.0].class
    }

    /// The style tags declared by the component's class.
    #[must_use]
    pub fn style_tags(&self, id: ComponentId) -> &'static [&'static str] {
        self.components[id.0].class.tags
    }
}
