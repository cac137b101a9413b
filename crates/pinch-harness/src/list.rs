#![forbid(unsafe_code)]

//! A simulated scrollable list that implements [`RowHost`].
//!
//! Rows are stacked top-to-bottom from their stored heights; the viewport is
//! a window of `viewport_height` pixels starting at `scroll_offset`. Data rows
//! are followed by optional footer rows that are never pinchable. Every
//! request the core makes is recorded so tests can assert on it.

use pinch_core::{PinchAdapter, RowGeometry, RowHost};

/// Pinch flags per data row.
#[derive(Debug, Clone, Default)]
pub struct PinchFlags(Vec<bool>);

impl PinchAdapter for PinchFlags {
    fn is_row_pinchable(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }
}

/// A request the core issued to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    RowHeight { index: usize, height: i32 },
    ScrollBy(i32),
    AnimationFrame,
}

/// In-memory list host.
#[derive(Debug, Clone)]
pub struct SimulatedList {
    flags: PinchFlags,
    has_adapter: bool,
    heights: Vec<i32>,
    footer_heights: Vec<i32>,
    scroll_offset: i32,
    viewport_height: i32,
    scroll_supported: bool,
    pending_frame: bool,
    requests: Vec<HostRequest>,
}

impl SimulatedList {
    /// One data row per flag. Pinchable rows start at `pinch_height`, the
    /// rest at `fixed_height`.
    #[must_use]
    pub fn new(flags: Vec<bool>, pinch_height: i32, fixed_height: i32, viewport_height: i32) -> Self {
        let heights = flags
            .iter()
            .map(|&p| if p { pinch_height } else { fixed_height })
            .collect();
        Self {
            flags: PinchFlags(flags),
            has_adapter: true,
            heights,
            footer_heights: Vec::new(),
            scroll_offset: 0,
            viewport_height,
            scroll_supported: true,
            pending_frame: false,
            requests: Vec::new(),
        }
    }

    /// The demo data set: rows divisible by 3 or 4 are pinchable.
    #[must_use]
    pub fn demo(rows: usize, pinch_height: i32, fixed_height: i32, viewport_height: i32) -> Self {
        let flags = (0..rows).map(|i| i % 3 == 0 || i % 4 == 0).collect();
        Self::new(flags, pinch_height, fixed_height, viewport_height)
    }

    /// Append footer rows (builder pattern).
    #[must_use]
    pub fn with_footers(mut self, heights: &[i32]) -> Self {
        self.footer_heights.extend_from_slice(heights);
        self
    }

    /// Drop the pinch adapter, modeling a plain data source (builder pattern).
    #[must_use]
    pub fn without_adapter(mut self) -> Self {
        self.has_adapter = false;
        self
    }

    /// Model a host that cannot scroll programmatically (builder pattern).
    #[must_use]
    pub fn without_scroll_support(mut self) -> Self {
        self.scroll_supported = false;
        self
    }

    /// Start scrolled to `offset` (builder pattern).
    #[must_use]
    pub fn scrolled_to(mut self, offset: i32) -> Self {
        self.scroll_offset = offset.clamp(0, self.max_scroll());
        self
    }

    #[must_use]
    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    /// Height of data row `index`.
    #[must_use]
    pub fn row_height(&self, index: usize) -> Option<i32> {
        self.heights.get(index).copied()
    }

    /// Overwrite a data row's height without recording a request, as a
    /// recycling list does when it rebinds a row.
    pub fn bind_row_height(&mut self, index: usize, height: i32) {
        if let Some(h) = self.heights.get_mut(index) {
            *h = height;
        }
    }

    /// Number of data rows.
    #[must_use]
    pub fn data_len(&self) -> usize {
        self.heights.len()
    }

    /// Viewport-relative top of any row, visible or not.
    #[must_use]
    pub fn top_of(&self, index: usize) -> Option<i32> {
        if index >= self.total_len() {
            return None;
        }
        let above: i32 = self.all_heights().take(index).sum();
        Some(above - self.scroll_offset)
    }

    /// Total content height.
    #[must_use]
    pub fn content_height(&self) -> i32 {
        self.all_heights().sum()
    }

    /// Requests recorded so far.
    #[must_use]
    pub fn requests(&self) -> &[HostRequest] {
        &self.requests
    }

    /// Take and clear the recorded requests.
    pub fn drain_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Scroll requests recorded so far.
    #[must_use]
    pub fn scroll_requests(&self) -> Vec<i32> {
        self.requests
            .iter()
            .filter_map(|r| match r {
                HostRequest::ScrollBy(dy) => Some(*dy),
                _ => None,
            })
            .collect()
    }

    /// Consume a pending frame request, if any.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.pending_frame)
    }

    fn total_len(&self) -> usize {
        self.heights.len() + self.footer_heights.len()
    }

    fn all_heights(&self) -> impl Iterator<Item = i32> + '_ {
        self.heights
            .iter()
            .chain(self.footer_heights.iter())
            .copied()
    }

    fn max_scroll(&self) -> i32 {
        (self.content_height() - self.viewport_height).max(0)
    }
}

impl RowHost for SimulatedList {
    fn adapter(&self) -> Option<&dyn PinchAdapter> {
        self.has_adapter.then_some(&self.flags as &dyn PinchAdapter)
    }

    fn visible_rows(&self) -> Vec<RowGeometry> {
        let mut rows = Vec::new();
        let mut top = -self.scroll_offset;
        for (index, height) in self.all_heights().enumerate() {
            if top >= self.viewport_height {
                break;
            }
            if top + height > 0 {
                rows.push(RowGeometry::new(index, top, height));
            }
            top += height;
        }
        rows
    }

    fn active_row_count(&self) -> usize {
        self.heights.len()
    }

    fn viewport_height(&self) -> i32 {
        self.viewport_height
    }

    fn request_row_height(&mut self, index: usize, height: i32) {
        self.requests.push(HostRequest::RowHeight { index, height });
        self.bind_row_height(index, height);
    }

    fn supports_scroll_by(&self) -> bool {
        self.scroll_supported
    }

    fn request_scroll_by(&mut self, dy: i32) {
        self.requests.push(HostRequest::ScrollBy(dy));
        if self.scroll_supported {
            self.scroll_offset = (self.scroll_offset + dy).clamp(0, self.max_scroll());
        }
    }

    fn request_animation_frame(&mut self) {
        self.requests.push(HostRequest::AnimationFrame);
        self.pending_frame = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_flags_follow_modulo_rule() {
        let list = SimulatedList::demo(13, 2, 40, 200);
        let adapter = list.adapter().unwrap();
        let pinchable: Vec<usize> = (0..13).filter(|&i| adapter.is_row_pinchable(i)).collect();
        assert_eq!(pinchable, vec![0, 3, 4, 6, 8, 9, 12]);
    }

    #[test]
    fn visible_rows_respect_viewport_and_scroll() {
        let list = SimulatedList::new(vec![false; 10], 2, 50, 120).scrolled_to(75);
        let rows = list.visible_rows();
        let indices: Vec<usize> = rows.iter().map(|r| r.index).collect();
        // Content 75..195 covers rows 1 (50..100) through 3 (150..200).
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(rows[0].top, -25);
    }

    #[test]
    fn footers_follow_data_rows() {
        let list = SimulatedList::new(vec![true; 2], 10, 40, 500).with_footers(&[30]);
        let rows = list.visible_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].index, 2);
        assert_eq!(list.active_row_count(), 2);
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut list = SimulatedList::new(vec![false; 4], 2, 50, 100);
        list.request_scroll_by(-10);
        assert_eq!(list.scroll_offset(), 0);
        list.request_scroll_by(1_000);
        assert_eq!(list.scroll_offset(), 100);
    }

    #[test]
    fn unsupported_scroll_records_but_ignores() {
        let mut list = SimulatedList::new(vec![false; 4], 2, 50, 100).without_scroll_support();
        list.request_scroll_by(30);
        assert_eq!(list.scroll_offset(), 0);
        assert_eq!(list.scroll_requests(), vec![30]);
    }

    #[test]
    fn top_of_tracks_offscreen_rows() {
        let list = SimulatedList::new(vec![false; 10], 2, 50, 100).scrolled_to(200);
        assert_eq!(list.top_of(0), Some(-200));
        assert_eq!(list.top_of(9), Some(250));
        assert_eq!(list.top_of(10), None);
    }

    #[test]
    fn frame_requests_are_one_shot() {
        let mut list = SimulatedList::new(vec![], 2, 50, 100);
        list.request_animation_frame();
        assert!(list.take_frame_request());
        assert!(!list.take_frame_request());
    }
}
