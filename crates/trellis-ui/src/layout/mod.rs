//! Layout strategies.
//!
//! A strategy positions a container's children inside the container's
//! content box. It runs in two modes:
//!
//! - [`Layout::do_layout`] after every membership change, a full pass
//!   that also moves the children's elements into place in the document
//! - [`Layout::on_resize`] when the container announces a style change,
//!   which repeats only the passes that depend on a dimension that actually
//!   changed
//!
//! Strategies keep per-container state (the last content size they saw, the
//! nested regions of a border layout), so a [`Layout`] value belongs to a
//! single container.

mod absolute;
mod bar;
mod border;
mod card;

pub use absolute::AbsoluteLayout;
pub use bar::{Axis, BarLayout, Origin};
pub use border::{BorderLayout, Region};
pub use card::CardLayout;

use serde::{Deserialize, Serialize};
use trellis_dom::{DomError, DomFacade};

use crate::{ComponentId, Ui};

/// A container's layout strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Layout {
    /// Children are absolutely positioned and placed by hand.
    Absolute(AbsoluteLayout),
    /// Children are stacked along one axis.
    Bar(BarLayout),
    /// Five named regions around a center.
    Border(BorderLayout),
    /// Only the last child is shown, filling the container.
    Card(CardLayout),
}

impl Layout {
    /// Full layout pass.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn do_layout<D: DomFacade>(
        &mut self,
        ui: &mut Ui<D>,
        container: ComponentId,
    ) -> Result<(), DomError> {
        match self {
            Self::Absolute(layout) => layout.do_layout(ui, container),
            Self::Bar(layout) => layout.do_layout(ui, container),
            Self::Border(layout) => layout.do_layout(ui, container),
            Self::Card(layout) => layout.do_layout(ui, container),
        }
    }

    /// Incremental pass after the container's size may have changed.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn on_resize<D: DomFacade>(
        &mut self,
        ui: &mut Ui<D>,
        container: ComponentId,
    ) -> Result<(), DomError> {
        match self {
            Self::Absolute(layout) => layout.on_resize(ui, container),
            Self::Bar(layout) => layout.on_resize(ui, container),
            Self::Border(layout) => layout.on_resize(ui, container),
            Self::Card(layout) => layout.on_resize(ui, container),
        }
    }

    /// Undo what the strategy wrote on `child` beyond its own styles, before
    /// the child leaves the container.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn release<D: DomFacade>(
        &mut self,
        ui: &mut Ui<D>,
        child: ComponentId,
    ) -> Result<(), DomError> {
        match self {
            Self::Absolute(_) => Ok(()),
            Self::Bar(layout) => layout.release(ui, child),
            Self::Border(layout) => layout.release(ui, child),
            Self::Card(layout) => layout.release(ui, child),
        }
    }
}

impl From<AbsoluteLayout> for Layout {
    fn from(layout: AbsoluteLayout) -> Self {
        Self::Absolute(layout)
    }
}

impl From<BarLayout> for Layout {
    fn from(layout: BarLayout) -> Self {
        Self::Bar(layout)
    }
}

impl From<BorderLayout> for Layout {
    fn from(layout: BorderLayout) -> Self {
        Self::Border(layout)
    }
}

impl From<CardLayout> for Layout {
    fn from(layout: CardLayout) -> Self {
        Self::Card(layout)
    }
}

/// Which content dimensions changed since the last pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SizeChange {
    pub(crate) width: bool,
    pub(crate) height: bool,
}

impl SizeChange {
    pub(crate) const fn any(self) -> bool {
        self.width || self.height
    }

    pub(crate) const fn along(self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Remembers the content size a strategy last laid out against.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct SizeTracker {
    last: Option<(f32, f32)>,
}

impl SizeTracker {
    /// Record the current size, reporting which dimensions differ from the
    /// previous record. The first record reports both.
    pub(crate) fn update(&mut self, width: f32, height: f32) -> SizeChange {
        let change = match self.last {
            Some((w, h)) => SizeChange {
                width: w != width,
                height: h != height,
            },
            None => SizeChange {
                width: true,
                height: true,
            },
        };
        self.last = Some((width, height));
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_tracker() {
        let mut tracker = SizeTracker::default();
        assert!(tracker.update(10.0, 10.0).any());
        assert!(!tracker.update(10.0, 10.0).any());
        let change = tracker.update(10.0, 12.0);
        assert!(!change.width);
        assert!(change.height);
        assert!(change.along(Axis::Vertical));
    }

    #[test]
    fn test_layout_serde() {
        let layout: Layout = serde_json::from_str(
            r#"{"type": "bar", "axis": "vertical", "origin": "left-top", "align": true}"#,
        )
        .unwrap();
        assert_eq!(
            layout,
            Layout::Bar(BarLayout::new(Axis::Vertical, Origin::LeftTop).with_align(true))
        );
    }
}
