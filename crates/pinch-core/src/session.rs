#![forbid(unsafe_code)]

//! Mutable pinch state owned by the controller.

use crate::height::{HeightRange, PinchState};

/// Identity of the row kept visually fixed during one resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorRow {
    /// Data index of the anchored row.
    pub index: usize,
}

/// Pinch height, direction, and the current anchor.
///
/// `current_height` persists across gestures; `anchor` lives for a single
/// gesture or animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinchSession {
    pub current_height: i32,
    pub expanding: bool,
    pub anchor: Option<AnchorRow>,
}

impl PinchSession {
    /// A session resting at `height` with no anchor.
    #[must_use]
    pub const fn new(height: i32) -> Self {
        Self {
            current_height: height,
            expanding: false,
            anchor: None,
        }
    }

    /// Derived state for this session within `range`.
    #[must_use]
    pub fn state(&self, range: &HeightRange) -> PinchState {
        PinchState::derive(range, self.current_height, self.expanding)
    }
}
