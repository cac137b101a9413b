#![forbid(unsafe_code)]

//! Anchor selection: which row stays put while the others resize.
//!
//! # Algorithm
//!
//! 1. **Grouping search.** Restrict to rows whose top lies within
//!    `[focal_y - vicinity, focal_y + vicinity]`. Find the first maximal run
//!    of consecutive rows at the collapsed height and pick its middle row
//!    (`start + len / 2`). Anchoring on the edge of a dense run of collapsed
//!    rows makes the scroll compensation lurch; the middle does not.
//! 2. **Boundary fallback.** Otherwise pick the last row whose top is at or
//!    above `focal_y`, or the first row when the focal point is above them all.
//!
//! # Invariants
//!
//! - Returns `None` only for an empty row slice.
//! - Called once per gesture or animation; the result is not revisited
//!   while that resize is in flight.

use crate::host::RowSnapshot;

/// Chooses the anchor row for a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorLocator {
    collapsed: i32,
    vicinity: i32,
}

impl AnchorLocator {
    /// `collapsed` is the height that marks a row as collapsed; `vicinity`
    /// is the grouping radius in pixels.
    #[must_use]
    pub const fn new(collapsed: i32, vicinity: i32) -> Self {
        Self {
            collapsed,
            vicinity,
        }
    }

    /// Pick the anchor for a resize centered on `focal_y`.
    #[must_use]
    pub fn locate(&self, focal_y: f32, rows: &[RowSnapshot]) -> Option<RowSnapshot> {
        if rows.is_empty() {
            return None;
        }
        if let Some(row) = self.grouped(focal_y, rows) {
            tracing::debug!(
                target: "pinch.anchor",
                focal_y,
                index = row.index,
                "anchor from collapsed group"
            );
            return Some(row);
        }
        let row = Self::straddling(focal_y, rows);
        tracing::debug!(
            target: "pinch.anchor",
            focal_y,
            index = row.map(|r| r.index),
            "anchor from focal boundary"
        );
        row
    }

    fn grouped(&self, focal_y: f32, rows: &[RowSnapshot]) -> Option<RowSnapshot> {
        let lo = focal_y - self.vicinity as f32;
        let hi = focal_y + self.vicinity as f32;
        let window: Vec<&RowSnapshot> = rows
            .iter()
            .filter(|r| (lo..=hi).contains(&(r.top as f32)))
            .collect();

        let start = window.iter().position(|r| r.height == self.collapsed)?;
        let len = window[start..]
            .iter()
            .take_while(|r| r.height == self.collapsed)
            .count();
        Some(*window[start + len / 2])
    }

    fn straddling(focal_y: f32, rows: &[RowSnapshot]) -> Option<RowSnapshot> {
        rows.iter()
            .take_while(|r| r.top as f32 <= focal_y)
            .last()
            .or_else(|| rows.first())
            .copied()
    }
}
