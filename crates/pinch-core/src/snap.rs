#![forbid(unsafe_code)]

//! Release decision: where the rows settle once the fingers lift.
//!
//! Releases near either bound snap to that bound regardless of direction.
//! Anything in between follows the last direction of travel. The settle
//! duration scales with the remaining distance and never drops below 1ms, so
//! every settle produces a completion.

use std::time::Duration;

use crate::config::PinchConfig;
use crate::height::HeightRange;
use crate::session::PinchSession;

/// Target height and duration chosen for a settle animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapDecision {
    pub target: i32,
    pub duration: Duration,
}

/// Decides settle targets and durations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapDecider {
    range: HeightRange,
    expand_above: f32,
    collapse_below: f32,
    base_duration: Duration,
}

impl SnapDecider {
    #[must_use]
    pub fn new(range: HeightRange, config: &PinchConfig) -> Self {
        Self {
            range,
            expand_above: config.snap_expand_above,
            collapse_below: config.snap_collapse_below,
            base_duration: Duration::from_millis(config.base_duration_ms),
        }
    }

    /// Choose where a released gesture settles.
    #[must_use]
    pub fn decide(&self, session: &PinchSession) -> SnapDecision {
        let position = self.range.fraction(session.current_height);
        let target = if position > self.expand_above {
            self.range.expanded()
        } else if position < self.collapse_below {
            self.range.collapsed()
        } else if session.expanding {
            self.range.expanded()
        } else {
            self.range.collapsed()
        };
        let duration = self.duration_between(session.current_height, target);
        tracing::debug!(
            target: "pinch.snap",
            position,
            expanding = session.expanding,
            target,
            duration_ms = duration.as_millis() as u64,
            "release snap decided"
        );
        SnapDecision { target, duration }
    }

    /// Duration proportional to `|to - from|` over the full span, at least 1ms.
    #[must_use]
    pub fn duration_between(&self, from: i32, to: i32) -> Duration {
        let distance = (i64::from(to) - i64::from(from)).unsigned_abs() as f64;
        let ratio = distance / f64::from(self.range.span());
        let ms = (ratio * self.base_duration.as_millis() as f64).round() as u64;
        Duration::from_millis(ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decider() -> SnapDecider {
        // Span of 100px keeps positions readable.
        SnapDecider::new(HeightRange::new(0, 100).unwrap(), &PinchConfig::default())
    }

    fn session(height: i32, expanding: bool) -> PinchSession {
        let mut s = PinchSession::new(height);
        s.expanding = expanding;
        s
    }

    #[test]
    fn near_expanded_snaps_open_in_either_direction() {
        let d = decider();
        assert_eq!(d.decide(&session(90, false)).target, 100);
        assert_eq!(d.decide(&session(90, true)).target, 100);
    }

    #[test]
    fn near_collapsed_snaps_closed_in_either_direction() {
        let d = decider();
        assert_eq!(d.decide(&session(5, true)).target, 0);
        assert_eq!(d.decide(&session(5, false)).target, 0);
    }

    #[test]
    fn midrange_follows_direction() {
        let d = decider();
        assert_eq!(d.decide(&session(50, true)).target, 100);
        assert_eq!(d.decide(&session(50, false)).target, 0);
    }

    #[test]
    fn thresholds_are_exclusive() {
        let d = decider();
        assert_eq!(d.decide(&session(85, false)).target, 0);
        assert_eq!(d.decide(&session(15, true)).target, 100);
    }

    #[test]
    fn duration_scales_with_distance() {
        let d = decider();
        assert_eq!(d.decide(&session(50, true)).duration, Duration::from_millis(100));
        assert_eq!(d.duration_between(0, 100), Duration::from_millis(200));
        assert_eq!(d.duration_between(100, 75), Duration::from_millis(50));
    }

    #[test]
    fn zero_distance_still_lasts_one_millisecond() {
        let d = decider();
        assert_eq!(d.decide(&session(100, true)).duration, Duration::from_millis(1));
        assert_eq!(d.duration_between(40, 40), Duration::from_millis(1));
    }

    #[test]
    fn custom_base_duration() {
        let config = PinchConfig::default().with_base_duration_ms(1_000);
        let d = SnapDecider::new(HeightRange::new(0, 100).unwrap(), &config);
        assert_eq!(d.duration_between(0, 10), Duration::from_millis(100));
    }
}
