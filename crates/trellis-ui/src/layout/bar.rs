//! Stacking along one axis.
//!
//! A full pass runs three steps in order:
//!
//! 1. stacking: children are placed one after the other along the main
//!    axis, starting at the content edge the origin names and advancing
//!    away from it by each child's outer size
//! 2. cross axis: with `align` every child is stretched to the content
//!    extent; otherwise children sit at the content edge the origin names
//! 3. fit: with `fit` the last child grows (or shrinks) so its far edge
//!    reaches the opposite content edge
//!
//! The pass reads outer sizes from each child's cached metrics, so a
//! child's own borders, margins and paddings are always accounted for.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::debug;
use trellis_dom::{DomError, DomFacade};

use super::absolute::AbsoluteLayout;
use super::SizeTracker;
use crate::events::{Event, EventTag};
use crate::metrics::Rect;
use crate::{ComponentId, Ui};

/// Main axis of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Axis {
    /// Children advance left to right (or right to left).
    Horizontal,
    /// Children advance top to bottom (or bottom to top).
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// The CSS property sizing a box along this axis.
    #[must_use]
    pub const fn size_property(self) -> &'static str {
        match self {
            Self::Horizontal => "width",
            Self::Vertical => "height",
        }
    }

    /// Leading and trailing edge of `rect` along this axis.
    fn span(self, rect: Rect) -> (f32, f32) {
        match self {
            Self::Horizontal => (rect.x, rect.right()),
            Self::Vertical => (rect.y, rect.bottom()),
        }
    }
}

/// The corner a bar starts from.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Origin {
    /// Start at the left and top content edges.
    #[default]
    LeftTop,
    /// Start at the right and top content edges.
    RightTop,
    /// Start at the left and bottom content edges.
    LeftBottom,
    /// Start at the right and bottom content edges.
    RightBottom,
}

impl Origin {
    /// Whether the origin is the trailing content edge on `axis`: right
    /// for the horizontal axis, bottom for the vertical one.
    #[must_use]
    pub const fn is_trailing(self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => matches!(self, Self::RightTop | Self::RightBottom),
            Axis::Vertical => matches!(self, Self::LeftBottom | Self::RightBottom),
        }
    }
}

/// Where the stacking pass put a child.
#[derive(Debug, Clone, Copy)]
struct Placement {
    child: ComponentId,
    start: f32,
    size: f32,
}

/// The child the fit pass stretched, with its inline size from before.
#[derive(Debug, Clone, PartialEq)]
struct Fitted {
    child: ComponentId,
    natural: Option<String>,
}

/// Children stacked along one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    /// The stacking axis.
    pub axis: Axis,
    /// The corner stacking starts from.
    #[serde(default)]
    pub origin: Origin,
    /// Stretch children across the cross axis.
    #[serde(default)]
    pub align: bool,
    /// Let the last child fill the remaining main-axis space.
    #[serde(default)]
    pub fit: bool,
    #[serde(skip)]
    tracker: SizeTracker,
    #[serde(skip)]
    fitted: Option<Fitted>,
}

impl BarLayout {
    /// A bar with neither alignment nor fitting.
    #[must_use]
    pub fn new(axis: Axis, origin: Origin) -> Self {
        Self {
            axis,
            origin,
            align: false,
            fit: false,
            tracker: SizeTracker::default(),
            fitted: None,
        }
    }

    /// Left-to-right from the top-left corner.
    #[must_use]
    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal, Origin::LeftTop)
    }

    /// Top-to-bottom from the top-left corner.
    #[must_use]
    pub fn vertical() -> Self {
        Self::new(Axis::Vertical, Origin::LeftTop)
    }

    /// Set whether children are stretched across the cross axis.
    #[must_use]
    pub fn with_align(mut self, align: bool) -> Self {
        self.align = align;
        self
    }

    /// Set whether the last child fills the remaining space.
    #[must_use]
    pub fn with_fit(mut self, fit: bool) -> Self {
        self.fit = fit;
        self
    }

    /// Full pass over the container's present children.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn do_layout<D: DomFacade>(
        &mut self,
        ui: &mut Ui<D>,
        container: ComponentId,
    ) -> Result<(), DomError> {
        let children = ui.child_widgets(container);
        self.arrange(ui, container, &children)
    }

    /// Repeat the passes that depend on a changed content dimension.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn on_resize<D: DomFacade>(
        &mut self,
        ui: &mut Ui<D>,
        container: ComponentId,
    ) -> Result<(), DomError> {
        let children = ui.child_widgets(container);
        self.rearrange(ui, container, &children)
    }

    /// Full pass placing `children` inside `host`.
    pub(crate) fn arrange<D: DomFacade>(
        &mut self,
        ui: &mut Ui<D>,
        host: ComponentId,
        children: &[ComponentId],
    ) -> Result<(), DomError> {
        AbsoluteLayout::arrange(ui, host, children)?;
        let content = ui.content_rect(host);
        let _ = self.tracker.update(content.width, content.height);
        let sizes = Self::sizes(ui, children);
        self.restore_natural(ui)?;

        let last = self.stack(ui, children, content)?;
        self.align_cross(ui, children, content)?;
        if let Some(last) = last {
            self.fit_last(ui, last, content)?;
        }
        debug!(%host, axis = %self.axis, children = children.len(), "bar layout");
        Self::announce_resized(ui, children, &sizes)
    }

    /// Incremental pass: nothing runs unless the host's content size
    /// changed since the last pass.
    pub(crate) fn rearrange<D: DomFacade>(
        &mut self,
        ui: &mut Ui<D>,
        host: ComponentId,
        children: &[ComponentId],
    ) -> Result<(), DomError> {
        let content = ui.content_rect(host);
        let change = self.tracker.update(content.width, content.height);
        if !change.any() {
            return Ok(());
        }
        let sizes = Self::sizes(ui, children);
        let main_changed = change.along(self.axis);
        let cross_changed = change.along(self.axis.cross());

        if main_changed {
            let last = self.stack(ui, children, content)?;
            if let Some(last) = last {
                self.fit_last(ui, last, content)?;
            }
        }
        if cross_changed {
            self.align_cross(ui, children, content)?;
        }
        debug!(%host, axis = %self.axis, ?change, "bar resize");
        Self::announce_resized(ui, children, &sizes)
    }

    fn sizes<D: DomFacade>(ui: &Ui<D>, children: &[ComponentId]) -> Vec<(f32, f32)> {
        children
            .iter()
            .map(|&c| (ui.offset_width(c), ui.offset_height(c)))
            .collect()
    }

    /// Tell every child whose border box changed size.
    fn announce_resized<D: DomFacade>(
        ui: &mut Ui<D>,
        children: &[ComponentId],
        before: &[(f32, f32)],
    ) -> Result<(), DomError> {
        for (&child, &(width, height)) in children.iter().zip(before) {
            if ui.offset_width(child) != width || ui.offset_height(child) != height {
                ui.fire(Event::new(EventTag::Style, child))?;
            }
        }
        Ok(())
    }

    /// Hand `child` back its own main-axis size if the fit pass stretched
    /// it. Called before the child leaves the container.
    pub(crate) fn release<D: DomFacade>(
        &mut self,
        ui: &mut Ui<D>,
        child: ComponentId,
    ) -> Result<(), DomError> {
        if self.fitted.as_ref().is_some_and(|f| f.child == child) {
            self.restore_natural(ui)?;
        }
        Ok(())
    }

    /// Give the previously stretched child back its own size, so stacking
    /// measures it as it was before the fit pass. The child may have
    /// stopped being a member (a card that is no longer on top).
    pub(crate) fn restore_natural<D: DomFacade>(
        &mut self,
        ui: &mut Ui<D>,
    ) -> Result<(), DomError> {
        let Some(Fitted { child, natural }) = self.fitted.take() else {
            return Ok(());
        };
        let property = self.axis.size_property();
        match natural {
            Some(value) => ui.set_style_property(child, property, &value),
            None => ui.remove_style_property(child, property),
        }
    }

    const fn forward(&self) -> bool {
        !self.origin.is_trailing(self.axis)
    }

    fn stack<D: DomFacade>(
        &self,
        ui: &mut Ui<D>,
        children: &[ComponentId],
        content: Rect,
    ) -> Result<Option<Placement>, DomError> {
        let (start, end) = self.axis.span(content);
        let forward = self.forward();
        let mut offset = if forward { start } else { end };
        let mut last = None;
        for &child in children {
            let size = ui.outer_extent(child, self.axis);
            let position = if forward { offset } else { offset - size };
            ui.set_leading(child, self.axis, position)?;
            offset = if forward { offset + size } else { position };
            last = Some(Placement {
                child,
                start: position,
                size,
            });
        }
        Ok(last)
    }

    fn align_cross<D: DomFacade>(
        &self,
        ui: &mut Ui<D>,
        children: &[ComponentId],
        content: Rect,
    ) -> Result<(), DomError> {
        let axis = self.axis.cross();
        let (start, end) = axis.span(content);
        for &child in children {
            if self.align {
                ui.set_leading(child, axis, start)?;
                ui.set_outer_extent(child, axis, end - start)?;
            } else if self.origin.is_trailing(axis) {
                let size = ui.outer_extent(child, axis);
                ui.set_leading(child, axis, end - size)?;
            } else {
                ui.set_leading(child, axis, start)?;
            }
        }
        Ok(())
    }

    /// Stretch the last child from its near edge to the far content edge.
    fn fit_last<D: DomFacade>(
        &mut self,
        ui: &mut Ui<D>,
        last: Placement,
        content: Rect,
    ) -> Result<(), DomError> {
        if !self.fit {
            return Ok(());
        }
        let (start, end) = self.axis.span(content);
        let sign = if self.forward() { 1.0 } else { -1.0 };
        let (near, far) = if self.forward() {
            (last.start, end)
        } else {
            (last.start + last.size, start)
        };
        let size = (sign * (far - near)).max(0.0);
        if self.fitted.as_ref().is_none_or(|f| f.child != last.child) {
            self.fitted = Some(Fitted {
                child: last.child,
                natural: ui.style(last.child, self.axis.size_property())?,
            });
        }
        // 0 when advancing forward, 1 when advancing backward
        let blend = (1.0 - sign) / 2.0;
        ui.set_outer_extent(last.child, self.axis, size)?;
        ui.set_leading(last.child, self.axis, near - blend * size)
    }
}
