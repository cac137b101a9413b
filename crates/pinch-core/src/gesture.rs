#![forbid(unsafe_code)]

//! Scale-gesture interpretation: turns recognizer output into a pinch height.
//!
//! The platform recognizer (two-finger tracking, focal point math) lives
//! outside this crate. It reports through [`ScaleGestureListener`], and each
//! update is folded into the session by [`GestureInterpreter`].
//!
//! # Invariants
//!
//! 1. [`GestureInterpreter::update`] always returns a height inside the range,
//!    for any scale factor including NaN and infinities.
//! 2. A sample that rounds to no change still moves the height one pixel in
//!    the current direction, unless the height already sits on that bound.
//! 3. The direction flag follows the amplified factor: `> 1.0` is expanding.

use crate::config::DEFAULT_SCALE_SENSITIVITY;
use crate::height::HeightRange;
use crate::session::PinchSession;

/// One frame of scale-recognizer output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// Span ratio since the previous sample (1.0 = unchanged).
    pub scale_factor: f32,
    /// Focal point Y in viewport coordinates.
    pub focal_y: f32,
}

impl GestureSample {
    #[must_use]
    pub const fn new(scale_factor: f32, focal_y: f32) -> Self {
        Self {
            scale_factor,
            focal_y,
        }
    }
}

/// Callbacks a scale-gesture recognizer delivers.
pub trait ScaleGestureListener {
    /// A two-finger gesture started at `focal_y`. Returns whether it is accepted.
    fn on_scale_begin(&mut self, focal_y: f32) -> bool;
    /// The gesture moved.
    fn on_scale(&mut self, sample: GestureSample);
    /// The fingers lifted.
    fn on_scale_end(&mut self);
}

/// Maps scale deltas to absolute pinch heights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureInterpreter {
    sensitivity: f32,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE_SENSITIVITY)
    }
}

impl GestureInterpreter {
    #[must_use]
    pub const fn new(sensitivity: f32) -> Self {
        Self { sensitivity }
    }

    /// Amplify a raw scale factor around 1.0.
    #[inline]
    #[must_use]
    pub fn amplify(&self, scale_factor: f32) -> f64 {
        1.0 + (f64::from(scale_factor) - 1.0) * f64::from(self.sensitivity)
    }

    /// Fold `sample` into `session`, returning the new pinch height.
    ///
    /// Writes both `current_height` and the direction flag.
    pub fn update(&self, session: &mut PinchSession, range: &HeightRange, sample: GestureSample) -> i32 {
        let amplified = self.amplify(sample.scale_factor);
        let expanding = amplified > 1.0;
        if expanding != session.expanding {
            tracing::trace!(
                target: "pinch.gesture",
                expanding,
                "pinch direction flipped"
            );
            session.expanding = expanding;
        }

        let current = i64::from(session.current_height);
        // Float-to-int casts saturate and map NaN to 0, so this cannot overflow.
        let mut candidate = (current as f64 * amplified).round() as i64;
        if candidate == current {
            candidate += if expanding { 1 } else { -1 };
        }
        let height = range.clamp(candidate);

        tracing::trace!(
            target: "pinch.gesture",
            scale_factor = sample.scale_factor,
            amplified,
            from = session.current_height,
            to = height,
            "gesture sample interpreted"
        );
        session.current_height = height;
        height
    }
}
