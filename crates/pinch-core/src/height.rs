#![forbid(unsafe_code)]

//! Height bounds for pinchable rows and the state derived from them.
//!
//! # Invariants
//!
//! 1. `0 <= collapsed < expanded` for every constructed [`HeightRange`].
//! 2. [`HeightRange::percent`] is clamped to `[0.0, 1.0]`.
//! 3. [`PinchState`] is never stored; it is recomputed from a height and a
//!    direction flag on every query.

use crate::error::{PinchError, Result};

/// Collapsed/expanded pixel bounds for pinchable rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightRange {
    collapsed: i32,
    expanded: i32,
}

impl HeightRange {
    /// Create a validated range.
    ///
    /// Fails with [`PinchError::InvalidHeightRange`] unless
    /// `0 <= collapsed < expanded`.
    pub fn new(collapsed: i32, expanded: i32) -> Result<Self> {
        if collapsed < 0 || expanded <= collapsed {
            return Err(PinchError::InvalidHeightRange {
                collapsed,
                expanded,
            });
        }
        Ok(Self {
            collapsed,
            expanded,
        })
    }

    /// Height of a fully collapsed row.
    #[inline]
    #[must_use]
    pub const fn collapsed(&self) -> i32 {
        self.collapsed
    }

    /// Height of a fully expanded row.
    #[inline]
    #[must_use]
    pub const fn expanded(&self) -> i32 {
        self.expanded
    }

    /// Distance between the bounds. Always positive.
    #[inline]
    #[must_use]
    pub const fn span(&self) -> i32 {
        self.expanded - self.collapsed
    }

    /// Clamp a height into `[collapsed, expanded]`.
    #[inline]
    #[must_use]
    pub fn clamp(&self, height: i64) -> i32 {
        // Bounds are i32, so the clamped value always fits.
        height.clamp(i64::from(self.collapsed), i64::from(self.expanded)) as i32
    }

    /// Unclamped normalized position of `height` (0.0 = collapsed, 1.0 = expanded).
    #[must_use]
    pub fn fraction(&self, height: i32) -> f32 {
        (height - self.collapsed) as f32 / self.span() as f32
    }

    /// Normalized position of `height`, clamped to `[0.0, 1.0]`.
    #[must_use]
    pub fn percent(&self, height: i32) -> f32 {
        self.fraction(height).clamp(0.0, 1.0)
    }

    /// Whether `height` sits exactly on one of the bounds.
    #[inline]
    #[must_use]
    pub fn is_bound(&self, height: i32) -> bool {
        height == self.collapsed || height == self.expanded
    }
}

/// Convert density-independent units to pixels, rounding half up.
#[must_use]
pub fn dp_to_px(dp: f32, density: f32) -> i32 {
    (dp * density + 0.5) as i32
}

/// Current state of the pinchable rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinchState {
    /// Rows sit at the collapsed height.
    Collapsed,
    /// Rows are between bounds, last moving toward collapsed.
    Collapsing,
    /// Rows are between bounds, last moving toward expanded.
    Expanding,
    /// Rows sit at the expanded height.
    Expanded,
}

impl PinchState {
    /// Derive the state from a height and the last known direction.
    #[must_use]
    pub fn derive(range: &HeightRange, height: i32, expanding: bool) -> Self {
        if height == range.collapsed() {
            Self::Collapsed
        } else if height == range.expanded() {
            Self::Expanded
        } else if expanding {
            Self::Expanding
        } else {
            Self::Collapsing
        }
    }

    /// Whether the rows are at rest on a bound.
    #[inline]
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Collapsed | Self::Expanded)
    }
}
