//! Engine compatibility patches.
//!
//! Some legacy rendering engines report box geometry slightly differently.
//! The corrections are opt-in flags that the metrics and geometry code
//! consult; the core algorithms never sniff the engine themselves.

use serde::{Deserialize, Serialize};
use trellis_common::warning::warn_once;

/// Independently toggled geometry corrections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Quirks {
    /// Subtract one pixel from a positive computed `margin-top` when
    /// measuring box metrics (legacy sub-pixel rounding).
    pub legacy_margin_rounding: bool,
    /// The engine's `offsetLeft`/`offsetTop` already include the offset
    /// parent's border, so page coordinates must not add it again.
    pub offset_includes_parent_border: bool,
}

impl Quirks {
    /// No corrections: the behaviour of current engines.
    pub const NONE: Self = Self {
        legacy_margin_rounding: false,
        offset_includes_parent_border: false,
    };

    /// Every correction enabled.
    pub const LEGACY: Self = Self {
        legacy_margin_rounding: true,
        offset_includes_parent_border: true,
    };

    /// Apply the margin rounding correction to a computed `margin-top`.
    #[must_use]
    pub fn margin_top(self, margin_top: f32) -> f32 {
        if self.legacy_margin_rounding && margin_top > 0.0 {
            warn_once("Quirks", "subtracting 1px from positive margin-top");
            margin_top - 1.0
        } else {
            margin_top
        }
    }

    /// The part of an offset parent's border width that page coordinates
    /// must add for one hop up the offset-parent chain.
    #[must_use]
    pub fn parent_border(self, border: f32) -> f32 {
        if self.offset_includes_parent_border {
            warn_once("Quirks", "offsets already include the offset parent border");
            0.0
        } else {
            border
        }
    }
}
