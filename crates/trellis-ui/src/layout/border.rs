//! Five named regions.
//!
//! The container's first five child slots are North, South, West, East and
//! Center. Each present border slot is paired with an anonymous remainder
//! region inside a bar that aligns and fits them:
//!
//! ```text
//! container ── bar(vertical, from top)    [north, r1]
//! r1        ── bar(vertical, from bottom) [south, r2]
//! r2        ── bar(horizontal, from left) [west,  r3]
//! r3        ── bar(horizontal, from right)[east,  r4]
//! r4        ── bar(horizontal)            [center]
//! ```
//!
//! Absent slots are skipped entirely, so the remainder of the previous
//! step simply carries on and the neighbors grow into the gap.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;
use trellis_dom::{DomError, DomFacade};

use super::bar::{Axis, BarLayout, Origin};
use super::SizeTracker;
use crate::widget::WidgetClass;
use crate::{ComponentId, Ui};

/// A border layout slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Region {
    /// Full-width strip along the top.
    North,
    /// Full-width strip along the bottom.
    South,
    /// Strip along the left, between north and south.
    West,
    /// Strip along the right, between north and south.
    East,
    /// Whatever is left.
    Center,
}

impl Region {
    /// Slot order.
    pub const ALL: [Self; 5] = [Self::North, Self::South, Self::West, Self::East, Self::Center];

    /// Index of the region's slot in the container's child list.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The bar that carves this region out of its host.
    fn bar(self) -> BarLayout {
        let (axis, origin) = match self {
            Self::North => (Axis::Vertical, Origin::LeftTop),
            Self::South => (Axis::Vertical, Origin::LeftBottom),
            Self::West | Self::Center => (Axis::Horizontal, Origin::LeftTop),
            Self::East => (Axis::Horizontal, Origin::RightTop),
        };
        BarLayout::new(axis, origin).with_align(true).with_fit(true)
    }
}

/// One nesting step: a bar placing `members` inside `host`.
#[derive(Debug, Clone, PartialEq)]
struct Step {
    host: ComponentId,
    bar: BarLayout,
    members: Vec<ComponentId>,
}

/// North/South/West/East/Center regions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BorderLayout {
    #[serde(skip)]
    regions: Vec<ComponentId>,
    #[serde(skip)]
    steps: Vec<Step>,
    #[serde(skip)]
    tracker: SizeTracker,
}

impl BorderLayout {
    /// Construct the strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The remainder regions created so far, innermost last.
    #[must_use]
    pub fn regions(&self) -> &[ComponentId] {
        &self.regions
    }

    /// Rebuild the region chain and lay every step out.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn do_layout<D: DomFacade>(
        &mut self,
        ui: &mut Ui<D>,
        container: ComponentId,
    ) -> Result<(), DomError> {
        let slots: Vec<Option<ComponentId>> = ui.children(container).to_vec();
        let slot = |region: Region| slots.get(region.index()).copied().flatten();

        let mut steps = Vec::new();
        let mut host = container;
        let mut used = 0;
        for region in [Region::North, Region::South, Region::West, Region::East] {
            let Some(widget) = slot(region) else {
                continue;
            };
            let remainder = self.region(ui, used);
            used += 1;
            steps.push(Step {
                host,
                bar: region.bar(),
                members: vec![widget, remainder],
            });
            host = remainder;
        }
        if let Some(center) = slot(Region::Center) {
            steps.push(Step {
                host,
                bar: Region::Center.bar(),
                members: vec![center],
            });
        }

        for step in &mut self.steps {
            step.bar.restore_natural(ui)?;
        }
        for &unused in &self.regions[used..] {
            let _ = ui.detach(unused)?;
        }
        for step in &mut steps {
            step.bar.arrange(ui, step.host, &step.members)?;
        }
        let content = ui.content_rect(container);
        let _ = self.tracker.update(content.width, content.height);
        debug!(%container, steps = steps.len(), "border layout");
        self.steps = steps;
        Ok(())
    }

    /// Re-fit every step, outermost first, when the container's content
    /// size changed.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn on_resize<D: DomFacade>(
        &mut self,
        ui: &mut Ui<D>,
        container: ComponentId,
    ) -> Result<(), DomError> {
        let content = ui.content_rect(container);
        if !self.tracker.update(content.width, content.height).any() {
            return Ok(());
        }
        for step in &mut self.steps {
            step.bar.rearrange(ui, step.host, &step.members)?;
        }
        Ok(())
    }

    /// Give a departing region widget back the size its step's fit pass
    /// overwrote.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn release<D: DomFacade>(
        &mut self,
        ui: &mut Ui<D>,
        widget: ComponentId,
    ) -> Result<(), DomError> {
        for step in &mut self.steps {
            step.bar.release(ui, widget)?;
        }
        Ok(())
    }

    /// The pooled remainder region at `index`, created on first use.
    fn region<D: DomFacade>(&mut self, ui: &mut Ui<D>, index: usize) -> ComponentId {
        if let Some(&region) = self.regions.get(index) {
            return region;
        }
        let region = ui.create_widget(WidgetClass::REGION, "<div></div>");
        self.regions.push(region);
        region
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_region_slots() {
        let indices: Vec<usize> = Region::iter().map(Region::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!("east".parse::<Region>().unwrap(), Region::East);
    }

    #[test]
    fn test_region_bars() {
        let north = Region::North.bar();
        assert_eq!((north.axis, north.origin), (Axis::Vertical, Origin::LeftTop));
        assert!(north.align && north.fit);
        assert_eq!(Region::South.bar().origin, Origin::LeftBottom);
        assert_eq!(Region::East.bar().origin, Origin::RightTop);
        assert_eq!(Region::Center.bar().axis, Axis::Horizontal);
    }
}
