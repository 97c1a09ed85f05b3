//! Component geometry queries and layout setters.
//!
//! Offsets come straight from the document facade. Everything derived from
//! them (content boxes, outer sizes, page coordinates) goes through the
//! component's cached [`BoxMetrics`](crate::BoxMetrics).
//!
//! Content coordinates are expressed in the padding-edge space of the
//! component itself, which is the space CSS `left`/`top` of an absolutely
//! positioned child refer to.

use trellis_dom::style::{parse_px, px};
use trellis_dom::{DomError, DomFacade, NodeId, StyleMap};

use crate::layout::Axis;
use crate::metrics::{Rect, Side};
use crate::{ComponentId, Ui};

impl<D: DomFacade> Ui<D> {
    /// Border-box left relative to the offset parent; zero before
    /// materialization.
    #[must_use]
    pub fn offset_left(&self, id: ComponentId) -> f32 {
        self.element(id).map_or(0.0, |node| self.dom.offset_left(node))
    }

    /// Border-box top relative to the offset parent.
    #[must_use]
    pub fn offset_top(&self, id: ComponentId) -> f32 {
        self.element(id).map_or(0.0, |node| self.dom.offset_top(node))
    }

    /// Border-box width.
    #[must_use]
    pub fn offset_width(&self, id: ComponentId) -> f32 {
        self.element(id).map_or(0.0, |node| self.dom.offset_width(node))
    }

    /// Border-box height.
    #[must_use]
    pub fn offset_height(&self, id: ComponentId) -> f32 {
        self.element(id).map_or(0.0, |node| self.dom.offset_height(node))
    }

    /// The element offsets are measured from.
    #[must_use]
    pub fn offset_parent(&self, id: ComponentId) -> Option<NodeId> {
        self.element(id).and_then(|node| self.dom.offset_parent(node))
    }

    /// Page x-coordinate of the border box.
    #[must_use]
    pub fn page_left(&self, id: ComponentId) -> f32 {
        self.page_origin(id).0
    }

    /// Page y-coordinate of the border box.
    #[must_use]
    pub fn page_top(&self, id: ComponentId) -> f32 {
        self.page_origin(id).1
    }

    /// The border box in page coordinates.
    #[must_use]
    pub fn page_rect(&self, id: ComponentId) -> Rect {
        let (x, y) = self.page_origin(id);
        Rect::new(x, y, self.offset_width(id), self.offset_height(id))
    }

    /// Walk the offset-parent chain, adding each parent's offset and border.
    fn page_origin(&self, id: ComponentId) -> (f32, f32) {
        let Some(mut node) = self.element(id) else {
            return (0.0, 0.0);
        };
        let mut x = self.dom.offset_left(node);
        let mut y = self.dom.offset_top(node);
        while let Some(parent) = self.dom.offset_parent(node) {
            let (left, top) = self.border_left_top(parent);
            x += self.quirks.parent_border(left) + self.dom.offset_left(parent);
            y += self.quirks.parent_border(top) + self.dom.offset_top(parent);
            node = parent;
        }
        (x, y)
    }

    /// Left and top border widths of any element, preferring the cached
    /// metrics of the component wrapping it.
    fn border_left_top(&self, node: NodeId) -> (f32, f32) {
        match self.component_for(node) {
            Some(component) if self.components[component.0].metrics.is_calculated() => {
                let metrics = self.components[component.0].metrics;
                (metrics.border(Side::Left), metrics.border(Side::Top))
            }
            _ => {
                let width = |property| {
                    self.dom
                        .computed_style(node, property)
                        .map_or(0.0, |value| parse_px(&value))
                };
                (width("border-left-width"), width("border-top-width"))
            }
        }
    }

    /// Width available to children: border-box width minus borders and
    /// paddings, never negative.
    #[must_use]
    pub fn content_width(&self, id: ComponentId) -> f32 {
        (self.offset_width(id) - self.metrics(id).horizontal_chrome()).max(0.0)
    }

    /// Height available to children.
    #[must_use]
    pub fn content_height(&self, id: ComponentId) -> f32 {
        (self.offset_height(id) - self.metrics(id).vertical_chrome()).max(0.0)
    }

    /// Left edge of the content box in the component's padding-edge space.
    #[must_use]
    pub fn content_left(&self, id: ComponentId) -> f32 {
        self.metrics(id).padding(Side::Left)
    }

    /// Top edge of the content box.
    #[must_use]
    pub fn content_top(&self, id: ComponentId) -> f32 {
        self.metrics(id).padding(Side::Top)
    }

    /// Right edge of the content box.
    #[must_use]
    pub fn content_right(&self, id: ComponentId) -> f32 {
        self.content_left(id) + self.content_width(id)
    }

    /// Bottom edge of the content box.
    #[must_use]
    pub fn content_bottom(&self, id: ComponentId) -> f32 {
        self.content_top(id) + self.content_height(id)
    }

    /// The content box in the component's padding-edge space.
    #[must_use]
    pub fn content_rect(&self, id: ComponentId) -> Rect {
        Rect::new(
            self.content_left(id),
            self.content_top(id),
            self.content_width(id),
            self.content_height(id),
        )
    }

    /// Border-box width plus horizontal margins.
    #[must_use]
    pub fn outer_width(&self, id: ComponentId) -> f32 {
        self.offset_width(id) + self.metrics(id).margin_edges().horizontal()
    }

    /// Border-box height plus vertical margins.
    #[must_use]
    pub fn outer_height(&self, id: ComponentId) -> f32 {
        self.offset_height(id) + self.metrics(id).margin_edges().vertical()
    }

    /// Position the margin box. `None` leaves that coordinate alone.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn place(
        &mut self,
        id: ComponentId,
        left: Option<f32>,
        top: Option<f32>,
    ) -> Result<(), DomError> {
        let mut styles = StyleMap::new();
        if let Some(left) = left {
            styles.set("left", px(left));
        }
        if let Some(top) = top {
            styles.set("top", px(top));
        }
        self.set_style(id, &styles)
    }

    /// Size the element so its margin box is `outer` pixels wide.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn set_outer_width(&mut self, id: ComponentId, outer: f32) -> Result<(), DomError> {
        let metrics = self.metrics(id);
        let width = outer - metrics.margin_edges().horizontal() - metrics.horizontal_chrome();
        self.set_style_property(id, "width", &px(width.max(0.0)))
    }

    /// Size the element so its margin box is `outer` pixels tall.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn set_outer_height(&mut self, id: ComponentId, outer: f32) -> Result<(), DomError> {
        let metrics = self.metrics(id);
        let height = outer - metrics.margin_edges().vertical() - metrics.vertical_chrome();
        self.set_style_property(id, "height", &px(height.max(0.0)))
    }

    pub(crate) fn outer_extent(&self, id: ComponentId, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.outer_width(id),
            Axis::Vertical => self.outer_height(id),
        }
    }

    pub(crate) fn set_outer_extent(
        &mut self,
        id: ComponentId,
        axis: Axis,
        outer: f32,
    ) -> Result<(), DomError> {
        match axis {
            Axis::Horizontal => self.set_outer_width(id, outer),
            Axis::Vertical => self.set_outer_height(id, outer),
        }
    }

    pub(crate) fn set_leading(
        &mut self,
        id: ComponentId,
        axis: Axis,
        position: f32,
    ) -> Result<(), DomError> {
        match axis {
            Axis::Horizontal => self.place(id, Some(position), None),
            Axis::Vertical => self.place(id, None, Some(position)),
        }
    }
}
