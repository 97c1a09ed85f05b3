//! Box metrics of a component's element.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//!
//! Layouts never read computed styles directly. Every component carries a
//! [`BoxMetrics`] snapshot taken when its element is attached (or when a
//! style change is announced), and all outer-size arithmetic goes through
//! that snapshot.

use strum_macros::{Display, EnumIter};
use trellis_dom::style::parse_px;
use trellis_dom::{DomError, DomFacade, NodeId};

use crate::quirks::Quirks;

/// One side of a box.
///
/// The discriminant is the index into the metrics arrays, so the order is
/// always left, right, top, bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    /// Left edge.
    Left = 0,
    /// Right edge.
    Right = 1,
    /// Top edge.
    Top = 2,
    /// Bottom edge.
    Bottom = 3,
}

impl Side {
    /// Every side in array order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Index into a `[f32; 4]` metrics array.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A rectangle positioned in 2D space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Construct a rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal position of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Vertical position of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Area covered by the rectangle.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Whether the two rectangles share a region of positive area.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether `other` lies entirely inside this rectangle.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Edge sizes for padding, border, or margin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeSizes {
    /// Top edge size.
    pub top: f32,
    /// Right edge size.
    pub right: f32,
    /// Bottom edge size.
    pub bottom: f32,
    /// Left edge size.
    pub left: f32,
}

impl EdgeSizes {
    fn from_array(values: [f32; 4]) -> Self {
        Self {
            top: values[Side::Top.index()],
            right: values[Side::Right.index()],
            bottom: values[Side::Bottom.index()],
            left: values[Side::Left.index()],
        }
    }

    /// `left + right`.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// `top + bottom`.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Border, margin and padding widths of an element, in pixels.
///
/// All three are four-element arrays indexed by [`Side`]. The accessors
/// hand out copies, so a caller can never alter the cached snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxMetrics {
    border: [f32; 4],
    margin: [f32; 4],
    padding: [f32; 4],
    calculated: bool,
}

impl BoxMetrics {
    /// Read the twelve widths from the element's computed styles.
    ///
    /// Non-numeric values count as zero. With
    /// [`Quirks::legacy_margin_rounding`] a positive `margin-top` loses a
    /// pixel.
    ///
    /// # Errors
    ///
    /// Fails when `node` is not an element known to the document.
    pub fn calculate<D: DomFacade>(
        dom: &D,
        node: NodeId,
        quirks: Quirks,
    ) -> Result<Self, DomError> {
        let mut metrics = Self {
            calculated: true,
            ..Self::default()
        };
        for side in Side::ALL {
            let i = side.index();
            metrics.border[i] = parse_px(&dom.computed_style(node, &format!("border-{side}-width"))?);
            metrics.margin[i] = parse_px(&dom.computed_style(node, &format!("margin-{side}"))?);
            metrics.padding[i] = parse_px(&dom.computed_style(node, &format!("padding-{side}"))?);
        }
        let top = Side::Top.index();
        metrics.margin[top] = quirks.margin_top(metrics.margin[top]);
        Ok(metrics)
    }

    /// Whether the snapshot was read from an element (as opposed to the
    /// all-zero placeholder of an unmaterialized component).
    #[must_use]
    pub const fn is_calculated(&self) -> bool {
        self.calculated
    }

    /// Border widths as `[left, right, top, bottom]`.
    #[must_use]
    pub const fn borders(&self) -> [f32; 4] {
        self.border
    }

    /// Margins as `[left, right, top, bottom]`.
    #[must_use]
    pub const fn margins(&self) -> [f32; 4] {
        self.margin
    }

    /// Paddings as `[left, right, top, bottom]`.
    #[must_use]
    pub const fn paddings(&self) -> [f32; 4] {
        self.padding
    }

    /// Border width on one side.
    #[must_use]
    pub const fn border(&self, side: Side) -> f32 {
        self.border[side.index()]
    }

    /// Margin on one side.
    #[must_use]
    pub const fn margin(&self, side: Side) -> f32 {
        self.margin[side.index()]
    }

    /// Padding on one side.
    #[must_use]
    pub const fn padding(&self, side: Side) -> f32 {
        self.padding[side.index()]
    }

    /// Border widths as named edges.
    #[must_use]
    pub fn border_edges(&self) -> EdgeSizes {
        EdgeSizes::from_array(self.border)
    }

    /// Margins as named edges.
    #[must_use]
    pub fn margin_edges(&self) -> EdgeSizes {
        EdgeSizes::from_array(self.margin)
    }

    /// Paddings as named edges.
    #[must_use]
    pub fn padding_edges(&self) -> EdgeSizes {
        EdgeSizes::from_array(self.padding)
    }

    /// Horizontal border plus padding: the difference between the
    /// border-box width and the content width.
    #[must_use]
    pub fn horizontal_chrome(&self) -> f32 {
        self.border_edges().horizontal() + self.padding_edges().horizontal()
    }

    /// Vertical border plus padding.
    #[must_use]
    pub fn vertical_chrome(&self) -> f32 {
        self.border_edges().vertical() + self.padding_edges().vertical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_dom::DomTree;

    fn styled(style: &str) -> (DomTree, NodeId) {
        let mut tree = DomTree::with_viewport(100.0, 100.0);
        let body = tree.body().unwrap();
        let node = tree.create_element("div");
        tree.set_attribute(node, "style", style).unwrap();
        tree.append_child(body, node).unwrap();
        (tree, node)
    }

    #[test]
    fn test_side_order() {
        let indices: Vec<usize> = Side::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(Side::Bottom.to_string(), "bottom");
    }

    #[test]
    fn test_calculate_reads_all_sides() {
        let (tree, node) = styled(
            "border-left-width: 1px; border-top-width: 2px; margin-right: 3px; \
             margin-top: 4px; padding-bottom: 5px; padding-left: 6px",
        );
        let metrics = BoxMetrics::calculate(&tree, node, Quirks::NONE).unwrap();
        assert!(metrics.is_calculated());
        assert_eq!(metrics.borders(), [1.0, 0.0, 2.0, 0.0]);
        assert_eq!(metrics.margins(), [0.0, 3.0, 4.0, 0.0]);
        assert_eq!(metrics.paddings(), [6.0, 0.0, 0.0, 5.0]);
        assert_eq!(metrics.horizontal_chrome(), 7.0);
        assert_eq!(metrics.vertical_chrome(), 7.0);
    }

    #[test]
    fn test_non_numeric_values_are_zero() {
        let (tree, node) = styled("margin-left: auto; border-left-width: thin");
        let metrics = BoxMetrics::calculate(&tree, node, Quirks::NONE).unwrap();
        assert_eq!(metrics.margin(Side::Left), 0.0);
        assert_eq!(metrics.border(Side::Left), 0.0);
    }

    #[test]
    fn test_margin_rounding_quirk() {
        let (tree, node) = styled("margin-top: 4px");
        let metrics = BoxMetrics::calculate(&tree, node, Quirks::LEGACY).unwrap();
        assert_eq!(metrics.margin(Side::Top), 3.0);
    }

    #[test]
    fn test_accessors_return_copies() {
        let (tree, node) = styled("padding-left: 2px");
        let metrics = BoxMetrics::calculate(&tree, node, Quirks::NONE).unwrap();
        let mut copy = metrics.paddings();
        copy[0] = 99.0;
        assert_eq!(copy[0], 99.0);
        assert_eq!(metrics.padding(Side::Left), 2.0);
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(Rect::new(0.0, 0.0, 20.0, 10.0).contains(&b));
        assert_eq!(c.area(), 100.0);
    }
}
