//! Headless offset geometry.
//!
//! [CSSOM View § 7 Extensions to the HTMLElement Interface](https://www.w3.org/TR/cssom-view-1/#extensions-to-the-htmlelement-interface)
//!
//! A real user agent answers `offsetLeft`/`offsetWidth` from its layout
//! engine. The headless document derives them from inline lengths only:
//!
//! - sizes are content-box: `offsetWidth = width + padding + border`
//! - an `auto` width fills the parent's content box for in-flow boxes and
//!   collapses to the border/padding chrome for absolutely positioned boxes
//! - an `auto` height is the stacked outer height of in-flow element
//!   children, or the chrome alone when absolutely positioned
//! - in-flow boxes stack vertically inside their parent's content box
//!   (no margin collapsing, no inline formatting)
//! - absolutely positioned boxes are placed by `left`/`top` plus margins
//!   against the padding box of their nearest positioned ancestor

use crate::style::parse_px;
use crate::{DomTree, NodeId};

/// [§ 9.3.1 Choosing a positioning scheme](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionType {
    /// "The box is a normal box, laid out according to the normal flow."
    #[default]
    Static,
    /// "The box's position is calculated according to the normal flow.
    /// Then the box is offset relative to its normal position."
    Relative,
    /// "The box's position (and possibly size) is specified with the
    /// 'top', 'right', 'bottom', and 'left' properties."
    Absolute,
    /// "The box's position is calculated according to the 'absolute' model,
    /// but the box is fixed with respect to some reference."
    Fixed,
}

impl PositionType {
    /// Parse a computed `position` value; unknown keywords are `static`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "relative" | "sticky" => Self::Relative,
            "absolute" => Self::Absolute,
            "fixed" => Self::Fixed,
            _ => Self::Static,
        }
    }

    /// Whether the box is taken out of normal flow.
    #[must_use]
    pub const fn is_out_of_flow(self) -> bool {
        matches!(self, Self::Absolute | Self::Fixed)
    }
}

/// A point in page coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Point {
    x: f32,
    y: f32,
}

impl DomTree {
    /// Computed length in pixels; zero for non-elements and non-lengths.
    fn length(&self, id: NodeId, property: &str) -> f32 {
        self.computed_style(id, property)
            .map_or(0.0, |value| parse_px(&value))
    }

    /// Computed `position` of an element (`static` for anything else).
    #[must_use]
    pub fn position_type(&self, id: NodeId) -> PositionType {
        self.computed_style(id, "position")
            .map_or(PositionType::Static, |value| PositionType::parse(&value))
    }

    fn horizontal_chrome(&self, id: NodeId) -> f32 {
        self.length(id, "border-left-width")
            + self.length(id, "border-right-width")
            + self.length(id, "padding-left")
            + self.length(id, "padding-right")
    }

    fn vertical_chrome(&self, id: NodeId) -> f32 {
        self.length(id, "border-top-width")
            + self.length(id, "border-bottom-width")
            + self.length(id, "padding-top")
            + self.length(id, "padding-bottom")
    }

    fn is_auto(&self, id: NodeId, property: &str) -> bool {
        self.computed_style(id, property)
            .map_or(true, |value| parse_length(&value).is_none())
    }

    fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&p| self.as_element(p).is_some())
    }

    /// Width of the box `id`'s children are laid out in.
    fn content_width(&self, id: NodeId) -> f32 {
        (self.offset_width(id) - self.horizontal_chrome(id)).max(0.0)
    }

    /// [CSSOM View § 7 offsetWidth](https://www.w3.org/TR/cssom-view-1/#dom-htmlelement-offsetwidth)
    ///
    /// "If the element does not have any associated box return zero and
    /// terminate this algorithm."
    #[must_use]
    pub fn offset_width(&self, id: NodeId) -> f32 {
        if self.as_element(id).is_none() || !self.is_connected(id) {
            return 0.0;
        }
        let chrome = self.horizontal_chrome(id);
        if !self.is_auto(id, "width") {
            return self.length(id, "width").max(0.0) + chrome;
        }
        if self.position_type(id).is_out_of_flow() {
            return chrome;
        }
        let available = match self.parent_element(id) {
            Some(parent) => self.content_width(parent),
            None => self.viewport.map_or(0.0, |(width, _)| width),
        };
        let margins = self.length(id, "margin-left") + self.length(id, "margin-right");
        (available - margins).max(chrome)
    }

    /// [CSSOM View § 7 offsetHeight](https://www.w3.org/TR/cssom-view-1/#dom-htmlelement-offsetheight)
    #[must_use]
    pub fn offset_height(&self, id: NodeId) -> f32 {
        if self.as_element(id).is_none() || !self.is_connected(id) {
            return 0.0;
        }
        let chrome = self.vertical_chrome(id);
        if !self.is_auto(id, "height") {
            return self.length(id, "height").max(0.0) + chrome;
        }
        if self.position_type(id).is_out_of_flow() {
            return chrome;
        }
        let stacked: f32 = self
            .children(id)
            .iter()
            .filter(|&&child| self.in_flow(child))
            .map(|&child| self.outer_height(child))
            .sum();
        stacked + chrome
    }

    fn in_flow(&self, id: NodeId) -> bool {
        self.as_element(id).is_some() && !self.position_type(id).is_out_of_flow()
    }

    fn outer_height(&self, id: NodeId) -> f32 {
        self.offset_height(id) + self.length(id, "margin-top") + self.length(id, "margin-bottom")
    }

    /// [CSSOM View § 7 offsetParent](https://www.w3.org/TR/cssom-view-1/#dom-htmlelement-offsetparent)
    ///
    /// "If any of the following holds true return null and terminate this
    /// algorithm: The element does not have an associated box. The element
    /// is the root element. The element is the HTML body element. The
    /// element's computed value of the position property is fixed."
    ///
    /// "Return the nearest ancestor of the element for which at least one of
    /// the following is true ... The element is the HTML body element. The
    /// computed value of the position property of the element is not
    /// static."
    #[must_use]
    pub fn offset_parent(&self, id: NodeId) -> Option<NodeId> {
        if self.as_element(id).is_none()
            || !self.is_connected(id)
            || Some(id) == self.document_element()
            || Some(id) == self.body()
            || self.position_type(id) == PositionType::Fixed
        {
            return None;
        }
        let body = self.body();
        self.ancestors(id).find(|&ancestor| {
            self.as_element(ancestor).is_some()
                && (Some(ancestor) == body
                    || self.position_type(ancestor) != PositionType::Static)
        })
    }

    /// [CSSOM View § 7 offsetLeft](https://www.w3.org/TR/cssom-view-1/#dom-htmlelement-offsetleft)
    ///
    /// "Return the result of subtracting the x-coordinate of the left padding
    /// edge of the first CSS layout box associated with the offsetParent of
    /// the element from the x-coordinate of the left border edge of the
    /// first CSS layout box associated with the element."
    #[must_use]
    pub fn offset_left(&self, id: NodeId) -> f32 {
        self.offset_origin(id).x
    }

    /// [CSSOM View § 7 offsetTop](https://www.w3.org/TR/cssom-view-1/#dom-htmlelement-offsettop)
    #[must_use]
    pub fn offset_top(&self, id: NodeId) -> f32 {
        self.offset_origin(id).y
    }

    fn offset_origin(&self, id: NodeId) -> Point {
        if self.as_element(id).is_none() || !self.is_connected(id) {
            return Point::default();
        }
        let own = self.border_origin(id);
        match self.offset_parent(id) {
            Some(parent) => {
                let frame = self.padding_origin(parent);
                Point {
                    x: own.x - frame.x,
                    y: own.y - frame.y,
                }
            }
            None => own,
        }
    }

    /// Page position of the padding edge of `id`.
    fn padding_origin(&self, id: NodeId) -> Point {
        let border = self.border_origin(id);
        Point {
            x: border.x + self.length(id, "border-left-width"),
            y: border.y + self.length(id, "border-top-width"),
        }
    }

    /// Page position of the border edge of `id`.
    fn border_origin(&self, id: NodeId) -> Point {
        let margin = Point {
            x: self.length(id, "margin-left"),
            y: self.length(id, "margin-top"),
        };
        let offset = Point {
            x: self.length(id, "left"),
            y: self.length(id, "top"),
        };
        match self.position_type(id) {
            // [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
            //
            // "If the element has 'position: absolute', the containing block
            // is established by the nearest ancestor with a 'position' of
            // 'absolute', 'relative' or 'fixed' ... formed by the padding
            // edge of the ancestor."
            PositionType::Absolute => {
                let frame = self
                    .ancestors(id)
                    .find(|&a| {
                        self.as_element(a).is_some()
                            && self.position_type(a) != PositionType::Static
                    })
                    .map(|a| self.padding_origin(a))
                    .unwrap_or_default();
                Point {
                    x: frame.x + offset.x + margin.x,
                    y: frame.y + offset.y + margin.y,
                }
            }
            // "If the element has 'position: fixed', the containing block is
            // established by the viewport"
            PositionType::Fixed => Point {
                x: offset.x + margin.x,
                y: offset.y + margin.y,
            },
            position @ (PositionType::Static | PositionType::Relative) => {
                let content = self.parent_element(id).map_or_else(Point::default, |parent| {
                    let padding = self.padding_origin(parent);
                    Point {
                        x: padding.x + self.length(parent, "padding-left"),
                        y: padding.y + self.length(parent, "padding-top"),
                    }
                });
                let preceding: f32 = self
                    .preceding_siblings(id)
                    .filter(|&sibling| self.in_flow(sibling))
                    .map(|sibling| self.outer_height(sibling))
                    .sum();
                let shift = if position == PositionType::Relative {
                    offset
                } else {
                    Point::default()
                };
                Point {
                    x: content.x + margin.x + shift.x,
                    y: content.y + preceding + margin.y + shift.y,
                }
            }
        }
    }
}

/// Parse a definite length; `None` for `auto` and other keywords.
fn parse_length(value: &str) -> Option<f32> {
    let value = value.trim();
    if value.is_empty() || value == "auto" {
        return None;
    }
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f32>().ok().filter(|n| n.is_finite())
}
