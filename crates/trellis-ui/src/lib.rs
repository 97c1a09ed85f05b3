//! Trellis widget layer.
//!
//! Retained-mode components over a document facade:
//!
//! - [`Ui`]: the arena owning every component, container and listener
//! - components: template-backed elements with deferred attachment and
//!   cached box metrics
//! - containers: ordered child lists placed by a [`Layout`] strategy
//! - layouts: absolute, bar, border and card strategies
//! - events: per-component listeners with one-step bubbling
//!
//! # Example
//!
//! ```
//! use trellis_dom::DomTree;
//! use trellis_ui::{BarLayout, Ui, WidgetClass};
//!
//! let mut ui = Ui::new(DomTree::with_viewport(400.0, 300.0)).unwrap();
//! let bar = ui
//!     .create_container(
//!         WidgetClass::CONTAINER,
//!         r#"<div style="width: 200px; height: 120px"></div>"#,
//!         Some(BarLayout::vertical().with_align(true).into()),
//!     )
//!     .unwrap();
//! let _ = ui.attach(bar, ui.body()).unwrap();
//!
//! let item = ui.create_widget(WidgetClass::WIDGET, r#"<div style="height: 20px"></div>"#);
//! assert!(ui.add(bar, item).unwrap());
//! assert_eq!(ui.offset_width(item), 200.0);
//! ```

pub mod component;
pub mod container;
pub mod events;
pub mod geometry;
pub mod layout;
pub mod metrics;
pub mod quirks;
pub mod ui;
pub mod widget;

pub use component::Attachment;
pub use events::{Event, EventBus, EventTag, HasParentLike, ListenerId};
pub use layout::{
    AbsoluteLayout, Axis, BarLayout, BorderLayout, CardLayout, Layout, Origin, Region,
};
pub use metrics::{BoxMetrics, EdgeSizes, Rect, Side};
pub use quirks::Quirks;
pub use ui::{ComponentId, Ui};
pub use widget::WidgetClass;
