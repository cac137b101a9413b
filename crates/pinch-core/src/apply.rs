#![forbid(unsafe_code)]

//! Applying a pinch height to the visible rows.
//!
//! One pass walks the visible rows top-to-bottom. Every pinchable row whose
//! height differs from the target is resized and reported to the item-pinch
//! listeners. Growth of rows above the anchor is summed and handed back to the
//! host as a single scroll request so the anchor keeps its screen position.
//!
//! "Above the anchor" is decided by data index, so the compensation stays
//! correct even when the anchor itself has scrolled out of view.

use crate::height::HeightRange;
use crate::host::{RowHost, RowSnapshot};
use crate::listener::{ItemPinch, ListenerRegistry};
use crate::session::AnchorRow;

/// What one apply pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyOutcome {
    /// Rows whose height was changed.
    pub changed: usize,
    /// Scroll compensation requested from the host (0 if none).
    pub scroll_dy: i32,
}

/// Pushes a pinch height into the host's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHeightApplier {
    range: HeightRange,
}

impl RowHeightApplier {
    #[must_use]
    pub const fn new(range: HeightRange) -> Self {
        Self { range }
    }

    /// Resize every pinchable row in `rows` to `height`.
    pub fn apply<H: RowHost + ?Sized>(
        &self,
        host: &mut H,
        rows: &[RowSnapshot],
        anchor: Option<AnchorRow>,
        height: i32,
        listeners: &mut ListenerRegistry,
    ) -> ApplyOutcome {
        let span = tracing::debug_span!(
            "pinch.apply",
            height,
            changed = tracing::field::Empty,
            scroll_dy = tracing::field::Empty,
        );
        let _guard = span.enter();

        let height_percent = self.range.fraction(height);
        let mut outcome = ApplyOutcome::default();
        let mut height_delta: i64 = 0;

        for row in rows.iter().filter(|r| r.is_pinchable && r.height != height) {
            if let Some(anchor) = anchor
                && row.index < anchor.index
            {
                height_delta += i64::from(height) - i64::from(row.height);
            }
            host.request_row_height(row.index, height);
            outcome.changed += 1;
            listeners.emit_item_pinch(&ItemPinch {
                index: row.index,
                height,
                height_percent,
            });
        }

        if anchor.is_some() && height_delta != 0 {
            let dy = height_delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
            if host.supports_scroll_by() {
                host.request_scroll_by(dy);
                outcome.scroll_dy = dy;
            } else {
                tracing::trace!(
                    target: "pinch.apply",
                    dy,
                    "scroll compensation unsupported by host; skipped"
                );
            }
        }

        span.record("changed", outcome.changed);
        span.record("scroll_dy", outcome.scroll_dy);
        tracing::debug!(
            target: "pinch.apply",
            height,
            changed = outcome.changed,
            scroll_dy = outcome.scroll_dy,
            "pinch height applied"
        );
        outcome
    }
}
