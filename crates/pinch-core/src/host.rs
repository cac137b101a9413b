#![forbid(unsafe_code)]

//! Seams between the pinch core and the scrollable list that hosts it.
//!
//! The list owns rendering, recycling, and scrolling. The core only reads a
//! per-pass view of the visible rows and issues fire-and-forget requests
//! back to the list. Nothing in here blocks.

/// Classifies rows as pinchable. Implemented by the list's data source.
pub trait PinchAdapter {
    /// Whether the data row at `index` follows the pinch height.
    fn is_row_pinchable(&self, index: usize) -> bool;
}

/// Position and size of one rendered row, as laid out by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowGeometry {
    /// Data index of the row.
    pub index: usize,
    /// Top edge in viewport coordinates.
    pub top: i32,
    /// Current height in pixels.
    pub height: i32,
}

impl RowGeometry {
    #[must_use]
    pub const fn new(index: usize, top: i32, height: i32) -> Self {
        Self { index, top, height }
    }
}

/// A visible row joined with its pinch eligibility, valid for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSnapshot {
    pub index: usize,
    pub top: i32,
    pub height: i32,
    /// False for non-pinchable rows and for rows past the data range.
    pub is_pinchable: bool,
}

impl RowSnapshot {
    #[must_use]
    pub const fn new(index: usize, top: i32, height: i32, is_pinchable: bool) -> Self {
        Self {
            index,
            top,
            height,
            is_pinchable,
        }
    }
}

/// The scrollable list hosting pinchable rows.
pub trait RowHost {
    /// The data source's pinch classification, or `None` if it has none.
    fn adapter(&self) -> Option<&dyn PinchAdapter>;

    /// Currently rendered rows, ordered top-to-bottom.
    fn visible_rows(&self) -> Vec<RowGeometry>;

    /// Number of data rows. Rows at or past this index (footers) never pinch.
    fn active_row_count(&self) -> usize;

    /// Height of the list viewport in pixels.
    fn viewport_height(&self) -> i32;

    /// Set one row's height and schedule its layout pass.
    fn request_row_height(&mut self, index: usize, height: i32);

    /// Whether [`request_scroll_by`](Self::request_scroll_by) has any effect.
    fn supports_scroll_by(&self) -> bool {
        true
    }

    /// Scroll content by `dy` pixels. Positive moves content up.
    fn request_scroll_by(&mut self, dy: i32);

    /// Ask for one call to `PinchController::on_animation_frame`.
    fn request_animation_frame(&mut self);
}

/// Build this pass's [`RowSnapshot`]s from the host's visible rows.
#[must_use]
pub fn snapshot_rows<H: RowHost + ?Sized>(host: &H) -> Vec<RowSnapshot> {
    let active = host.active_row_count();
    let rows = host.visible_rows();
    let Some(adapter) = host.adapter() else {
        return rows
            .into_iter()
            .map(|r| RowSnapshot::new(r.index, r.top, r.height, false))
            .collect();
    };
    rows.into_iter()
        .map(|r| {
            let pinchable = r.index < active && adapter.is_row_pinchable(r.index);
            RowSnapshot::new(r.index, r.top, r.height, pinchable)
        })
        .collect()
}
