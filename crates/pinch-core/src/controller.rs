#![forbid(unsafe_code)]

//! The pinch controller: owns the session and routes gestures and frames.
//!
//! [`PinchController`] wraps a [`RowHost`] and is the single owner of the
//! [`PinchSession`]. The gesture recognizer reports through
//! [`ScaleGestureListener`]; the host's frame loop reports through
//! [`on_animation_frame`](PinchController::on_animation_frame).
//!
//! # Flow
//!
//! ```text
//! on_scale_begin --> AnchorLocator ----------------------> session.anchor
//! on_scale       --> GestureInterpreter --> RowHeightApplier --> host rows
//! on_scale_end   --> SnapDecider --> InterpolatedAnimator
//! animate_to     --> AnchorLocator (viewport midpoint) --> InterpolatedAnimator
//! on_animation_frame --> InterpolatedAnimator::tick --> RowHeightApplier
//!                                   |
//!                                   +--(final frame)--> pinch-complete listeners
//! ```
//!
//! # Invariants
//!
//! 1. `session.current_height` always lies in the configured range.
//! 2. The anchor is chosen once per gesture or animation and cleared when the
//!    animation completes.
//! 3. Pinch-complete listeners fire exactly once per completed animation, and
//!    never for a superseded one.
//! 4. Disabling pinch blocks only gesture routing; programmatic animation
//!    keeps working.

use std::time::Duration;

use web_time::Instant;

use crate::anchor::AnchorLocator;
use crate::animation::{FrameClock, InterpolatedAnimator};
use crate::apply::{ApplyOutcome, RowHeightApplier};
use crate::config::PinchConfig;
use crate::error::{PinchError, Result};
use crate::gesture::{GestureInterpreter, GestureSample, ScaleGestureListener};
use crate::height::{HeightRange, PinchState};
use crate::host::{RowHost, snapshot_rows};
use crate::listener::{ItemPinch, ListenerId, ListenerRegistry};
use crate::session::{AnchorRow, PinchSession};
use crate::snap::{SnapDecider, SnapDecision};

/// What started a settle animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleCause {
    /// The fingers lifted.
    GestureEnd,
    /// `animate_to` and friends.
    Programmatic,
}

/// Pinch state machine bound to one list host.
pub struct PinchController<H: RowHost> {
    host: H,
    config: PinchConfig,
    range: HeightRange,
    session: PinchSession,
    enabled: bool,
    interpreter: GestureInterpreter,
    animator: InterpolatedAnimator<SettleCause>,
    clock: FrameClock,
    listeners: ListenerRegistry,
}

impl<H: RowHost> std::fmt::Debug for PinchController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinchController")
            .field("range", &self.range)
            .field("session", &self.session)
            .field("enabled", &self.enabled)
            .field("animating", &self.animator.is_running())
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl<H: RowHost> PinchController<H> {
    /// Attach to `host` with the given configuration.
    ///
    /// Fails if the configuration is invalid or the host's data source
    /// cannot classify rows as pinchable.
    pub fn attach(host: H, config: PinchConfig) -> Result<Self> {
        config.validate()?;
        let range = config.height_range()?;
        if host.adapter().is_none() {
            tracing::warn!(
                target: "pinch.controller",
                "refusing to attach: host has no pinch adapter"
            );
            return Err(PinchError::AdapterNotPinchable);
        }
        tracing::info!(
            target: "pinch.controller",
            collapsed = range.collapsed(),
            expanded = range.expanded(),
            "pinch controller attached"
        );
        Ok(Self {
            host,
            interpreter: GestureInterpreter::new(config.scale_sensitivity),
            config,
            range,
            session: PinchSession::new(range.collapsed()),
            enabled: true,
            animator: InterpolatedAnimator::new(),
            clock: FrameClock::new(),
            listeners: ListenerRegistry::new(),
        })
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Detach, returning the host.
    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    #[inline]
    #[must_use]
    pub fn height_range(&self) -> HeightRange {
        self.range
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &PinchConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn session(&self) -> &PinchSession {
        &self.session
    }

    /// Current pinch height in pixels.
    #[inline]
    #[must_use]
    pub fn pinch_height(&self) -> i32 {
        self.session.current_height
    }

    /// Pinch height as a fraction of the range, clamped to `[0, 1]`.
    #[must_use]
    pub fn height_percent(&self) -> f32 {
        self.range.percent(self.session.current_height)
    }

    /// Derived pinch state.
    #[must_use]
    pub fn state(&self) -> PinchState {
        self.session.state(&self.range)
    }

    /// Whether a settle animation is in flight.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    #[inline]
    #[must_use]
    pub fn is_pinchable(&self) -> bool {
        self.enabled
    }

    /// Enable or disable gesture routing. Programmatic animation is unaffected.
    pub fn set_pinchable(&mut self, pinchable: bool) {
        self.enabled = pinchable;
    }

    /// Height a freshly bound row at `index` should take.
    ///
    /// Hosts call this when recycling rows so new rows match the pinch.
    #[must_use]
    pub fn row_height_for(&self, index: usize) -> i32 {
        let pinchable = self.enabled
            && index < self.host.active_row_count()
            && self
                .host
                .adapter()
                .is_some_and(|a| a.is_row_pinchable(index));
        if pinchable {
            self.session.current_height
        } else {
            self.range.expanded()
        }
    }

    // -- Configuration ------------------------------------------------------

    /// Replace the height bounds.
    ///
    /// On error the previous range stays in effect. On success the pinch
    /// height is clamped into the new range and re-applied.
    ///
    /// A running settle animation is cancelled and its anchor dropped, so
    /// the re-apply is uncompensated. During a gesture the gesture's anchor
    /// is kept and the re-apply compensates around it.
    pub fn set_height_range(&mut self, collapsed: i32, expanded: i32) -> Result<()> {
        let range = HeightRange::new(collapsed, expanded)?;
        self.range = range;
        let clamped = range.clamp(i64::from(self.session.current_height));
        if self.animator.cancel() {
            self.session.anchor = None;
        }
        self.session.current_height = clamped;
        self.apply(clamped);
        tracing::info!(
            target: "pinch.controller",
            collapsed,
            expanded,
            height = clamped,
            "height range updated"
        );
        Ok(())
    }

    // -- Listeners ----------------------------------------------------------

    /// Subscribe to per-row height changes.
    pub fn on_item_pinch<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ItemPinch) + 'static,
    {
        self.listeners.on_item_pinch(listener)
    }

    /// Subscribe to settle notifications.
    pub fn on_pinch_complete<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(PinchState) + 'static,
    {
        self.listeners.on_pinch_complete(listener)
    }

    /// Unsubscribe a listener. Returns whether it was registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    // -- Programmatic animation ---------------------------------------------

    /// Animate pinchable rows fully open.
    pub fn animate_expanded(&mut self) {
        self.animate_to(self.range.expanded());
    }

    /// Animate pinchable rows fully closed.
    pub fn animate_collapsed(&mut self) {
        self.animate_to(self.range.collapsed());
    }

    /// Animate pinchable rows to `height`, clamped into the range.
    ///
    /// Anchors on the row at the viewport's vertical midpoint.
    pub fn animate_to(&mut self, height: i32) {
        let target = self.range.clamp(i64::from(height));
        let midpoint = self.host.viewport_height() as f32 / 2.0;
        self.lock_anchor(midpoint);
        let duration = self.snap_decider().duration_between(self.session.current_height, target);
        self.start_settle(
            SnapDecision { target, duration },
            SettleCause::Programmatic,
        );
    }

    // -- Frame loop ---------------------------------------------------------

    /// Advance the settle animation by `dt`. Called once per requested frame.
    pub fn on_animation_frame(&mut self, dt: Duration) {
        let Some(frame) = self.animator.tick(dt) else {
            return;
        };
        self.session.current_height = frame.height;
        self.apply(frame.height);

        match frame.completed {
            Some(cause) => {
                self.session.anchor = None;
                self.clock.reset();
                let state = self.state();
                tracing::debug!(
                    target: "pinch.controller",
                    ?cause,
                    ?state,
                    height = frame.height,
                    "pinch settled"
                );
                self.listeners.emit_pinch_complete(state);
            }
            None => self.host.request_animation_frame(),
        }
    }

    /// Wall-clock variant of [`on_animation_frame`](Self::on_animation_frame).
    pub fn on_animation_frame_at(&mut self, now: Instant) {
        let dt = self.clock.delta(now);
        self.on_animation_frame(dt);
    }

    // -- Internals ----------------------------------------------------------

    fn snap_decider(&self) -> SnapDecider {
        SnapDecider::new(self.range, &self.config)
    }

    fn anchor_locator(&self) -> AnchorLocator {
        AnchorLocator::new(
            self.range.collapsed(),
            self.config.grouping_vicinity_px(self.range.expanded()),
        )
    }

    fn lock_anchor(&mut self, focal_y: f32) {
        let rows = snapshot_rows(&self.host);
        self.session.anchor = self
            .anchor_locator()
            .locate(focal_y, &rows)
            .map(|row| AnchorRow { index: row.index });
    }

    fn apply(&mut self, height: i32) -> ApplyOutcome {
        let rows = snapshot_rows(&self.host);
        RowHeightApplier::new(self.range).apply(
            &mut self.host,
            &rows,
            self.session.anchor,
            height,
            &mut self.listeners,
        )
    }

    fn start_settle(&mut self, decision: SnapDecision, cause: SettleCause) {
        let from = self.session.current_height;
        if decision.target != from {
            self.session.expanding = decision.target > from;
        }
        self.clock.reset();
        self.animator
            .start(from, decision.target, decision.duration, cause);
        self.host.request_animation_frame();
    }
}

impl<H: RowHost> ScaleGestureListener for PinchController<H> {
    fn on_scale_begin(&mut self, focal_y: f32) -> bool {
        if !self.enabled {
            return false;
        }
        if self.animator.cancel() {
            tracing::debug!(
                target: "pinch.controller",
                "gesture preempted settle animation"
            );
        }
        self.lock_anchor(focal_y);
        tracing::debug!(
            target: "pinch.controller",
            focal_y,
            anchor = self.session.anchor.map(|a| a.index),
            "pinch gesture began"
        );
        true
    }

    fn on_scale(&mut self, sample: GestureSample) {
        if !self.enabled {
            return;
        }
        let height = self
            .interpreter
            .update(&mut self.session, &self.range, sample);
        self.apply(height);
    }

    fn on_scale_end(&mut self) {
        if !self.enabled {
            return;
        }
        let decision = self.snap_decider().decide(&self.session);
        self.start_settle(decision, SettleCause::GestureEnd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{PinchAdapter, RowGeometry};

    struct Pinchable;

    impl PinchAdapter for Pinchable {
        fn is_row_pinchable(&self, _index: usize) -> bool {
            true
        }
    }

    #[derive(Default)]
    struct Rows {
        heights: Vec<i32>,
        frames_requested: usize,
    }

    impl Rows {
        fn new(n: usize) -> Self {
            Self {
                heights: vec![2; n],
                frames_requested: 0,
            }
        }
    }

    impl RowHost for Rows {
        fn adapter(&self) -> Option<&dyn PinchAdapter> {
            Some(&Pinchable)
        }
        fn visible_rows(&self) -> Vec<RowGeometry> {
            let mut top = 0;
            self.heights
                .iter()
                .enumerate()
                .map(|(i, &h)| {
                    let row = RowGeometry::new(i, top, h);
                    top += h;
                    row
                })
                .collect()
        }
        fn active_row_count(&self) -> usize {
            self.heights.len()
        }
        fn viewport_height(&self) -> i32 {
            200
        }
        fn request_row_height(&mut self, index: usize, height: i32) {
            self.heights[index] = height;
        }
        fn request_scroll_by(&mut self, _dy: i32) {}
        fn request_animation_frame(&mut self) {
            self.frames_requested += 1;
        }
    }

    fn controller() -> PinchController<Rows> {
        PinchController::attach(Rows::new(3), PinchConfig::default()).unwrap()
    }

    #[test]
    fn starts_collapsed_and_idle() {
        let ctrl = controller();
        assert_eq!(ctrl.pinch_height(), 2);
        assert_eq!(ctrl.state(), PinchState::Collapsed);
        assert_eq!(ctrl.height_percent(), 0.0);
        assert!(!ctrl.is_animating());
        assert!(ctrl.is_pinchable());
    }

    #[test]
    fn animation_reports_its_direction() {
        let mut ctrl = controller();
        ctrl.animate_expanded();
        assert_eq!(ctrl.host().frames_requested, 1);
        ctrl.on_animation_frame(Duration::from_millis(50));
        assert_eq!(ctrl.state(), PinchState::Expanding);
        assert!(ctrl.host().heights.iter().all(|&h| h == ctrl.pinch_height()));

        ctrl.animate_collapsed();
        ctrl.on_animation_frame(Duration::from_millis(10));
        assert_eq!(ctrl.state(), PinchState::Collapsing);
    }

    #[test]
    fn final_frame_stops_requesting() {
        let mut ctrl = controller();
        ctrl.animate_to(41);
        ctrl.on_animation_frame(Duration::from_millis(50));
        assert_eq!(ctrl.host().frames_requested, 2);
        ctrl.on_animation_frame(Duration::from_millis(50));
        assert_eq!(ctrl.pinch_height(), 41);
        assert!(!ctrl.is_animating());
        assert_eq!(ctrl.host().frames_requested, 2);
        assert!(ctrl.session().anchor.is_none());
    }

    #[test]
    fn wall_clock_frames_measure_gaps() {
        let mut ctrl = controller();
        ctrl.animate_expanded();
        let t0 = Instant::now();
        ctrl.on_animation_frame_at(t0);
        assert_eq!(ctrl.pinch_height(), 2);
        ctrl.on_animation_frame_at(t0 + Duration::from_millis(100));
        assert_eq!(ctrl.pinch_height(), 41);
    }

    #[test]
    fn invalid_range_keeps_previous() {
        let mut ctrl = controller();
        assert!(ctrl.set_height_range(50, 10).is_err());
        assert_eq!(ctrl.height_range(), HeightRange::new(2, 80).unwrap());
    }

    #[test]
    fn range_change_cancels_animation() {
        let mut ctrl = controller();
        ctrl.animate_expanded();
        ctrl.on_animation_frame(Duration::from_millis(50));
        ctrl.set_height_range(0, 40).unwrap();
        assert!(!ctrl.is_animating());
        assert!(ctrl.session().anchor.is_none());
        assert!(ctrl.pinch_height() <= 40);
    }
}
