#![forbid(unsafe_code)]

//! Time-bounded linear interpolation between two pinch heights.
//!
//! An [`InterpolatedAnimator`] runs at most one height animation at a time.
//! The host's frame cadence drives it through [`tick`](InterpolatedAnimator::tick),
//! which yields the height for that frame. Each run owns a one-shot completion
//! token of type `C`; the token is handed back exactly once, on the frame that
//! reaches the end of the run.
//!
//! # State Machine
//!
//! ```text
//!   Idle --start--> Running --tick (t >= 1)--> Completed --(next query)--> Idle
//!                      |
//!                      +--start--> Running   (prior run superseded, token dropped)
//! ```
//!
//! # Invariants
//!
//! 1. The final frame of a run reports exactly `to`, never a rounded neighbor.
//! 2. A superseded run's completion token is dropped, never returned.
//! 3. Zero-distance runs still tick for their full duration and still complete.
//! 4. Zero durations are treated as 1ms so completion always arrives on a tick.

use std::time::Duration;

use web_time::Instant;

/// Lifecycle of the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    /// No run in progress.
    Idle,
    /// A run is interpolating.
    Running,
    /// The last run just finished; reported once, then back to `Idle`.
    Completed,
}

/// Output of one animation tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationFrame<C> {
    /// Height for this frame.
    pub height: i32,
    /// Progress in thousandths (0..=1000).
    pub progress_permille: u16,
    /// The run's completion token, present only on its final frame.
    pub completed: Option<C>,
}

impl<C> AnimationFrame<C> {
    /// Whether this is the run's final frame.
    #[inline]
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.completed.is_some()
    }
}

#[derive(Debug)]
struct Run<C> {
    from: i32,
    to: i32,
    duration: Duration,
    elapsed: Duration,
    on_complete: C,
}

impl<C> Run<C> {
    fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    fn height_at(&self, t: f64) -> i32 {
        let span = f64::from(self.to) - f64::from(self.from);
        (f64::from(self.from) + t * span).round() as i32
    }
}

/// Linear height animator with supersession semantics.
#[derive(Debug)]
pub struct InterpolatedAnimator<C = ()> {
    run: Option<Run<C>>,
    just_completed: bool,
}

impl<C> Default for InterpolatedAnimator<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InterpolatedAnimator<C> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            run: None,
            just_completed: false,
        }
    }

    /// Start animating from `from` to `to` over `duration`.
    ///
    /// Any run already in progress is superseded: its token is dropped
    /// without being returned.
    pub fn start(&mut self, from: i32, to: i32, duration: Duration, on_complete: C) {
        if let Some(prior) = self.run.take() {
            tracing::debug!(
                target: "pinch.animator",
                from = prior.from,
                to = prior.to,
                elapsed_ms = prior.elapsed.as_millis() as u64,
                "animation superseded"
            );
        }
        let duration = duration.max(Duration::from_millis(1));
        tracing::debug!(
            target: "pinch.animator",
            from,
            to,
            duration_ms = duration.as_millis() as u64,
            "animation started"
        );
        self.just_completed = false;
        self.run = Some(Run {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            on_complete,
        });
    }

    /// Drop the current run, if any, without completing it.
    ///
    /// Returns whether a run was cancelled.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.run.take().is_some();
        if cancelled {
            tracing::debug!(target: "pinch.animator", "animation cancelled");
        }
        cancelled
    }

    /// Advance the current run by `dt`.
    ///
    /// Returns `None` when idle.
    pub fn tick(&mut self, dt: Duration) -> Option<AnimationFrame<C>> {
        self.just_completed = false;
        let run = self.run.as_mut()?;
        run.elapsed = run.elapsed.saturating_add(dt);
        let t = run.progress();
        let progress_permille = (t * 1000.0).round() as u16;

        if t < 1.0 {
            return Some(AnimationFrame {
                height: run.height_at(t),
                progress_permille,
                completed: None,
            });
        }

        let run = self.run.take()?;
        self.just_completed = true;
        tracing::debug!(
            target: "pinch.animator",
            to = run.to,
            "animation completed"
        );
        Some(AnimationFrame {
            height: run.to,
            progress_permille: 1000,
            completed: Some(run.on_complete),
        })
    }

    /// Current lifecycle state.
    ///
    /// `Completed` is observed between the final tick and the next `tick` or
    /// `start`.
    #[must_use]
    pub fn state(&self) -> AnimatorState {
        if self.run.is_some() {
            AnimatorState::Running
        } else if self.just_completed {
            AnimatorState::Completed
        } else {
            AnimatorState::Idle
        }
    }

    /// Whether a run is in progress.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Target height of the current run.
    #[must_use]
    pub fn target(&self) -> Option<i32> {
        self.run.as_ref().map(|r| r.to)
    }
}

/// Converts wall-clock frame callbacks into elapsed deltas.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Elapsed time since the previous frame. Zero on the first frame.
    pub fn delta(&mut self, now: Instant) -> Duration {
        let dt = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last = Some(now);
        dt
    }

    /// Forget the previous frame so the next delta is zero.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_50: Duration = Duration::from_millis(50);

    fn drain<C>(anim: &mut InterpolatedAnimator<C>, dt: Duration) -> Vec<AnimationFrame<C>> {
        let mut frames = Vec::new();
        while let Some(frame) = anim.tick(dt) {
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn idle_animator_yields_nothing() {
        let mut anim: InterpolatedAnimator = InterpolatedAnimator::new();
        assert_eq!(anim.state(), AnimatorState::Idle);
        assert!(anim.tick(MS_50).is_none());
    }

    #[test]
    fn interpolates_linearly() {
        let mut anim = InterpolatedAnimator::new();
        anim.start(0, 100, Duration::from_millis(200), ());
        let heights: Vec<i32> = drain(&mut anim, MS_50).iter().map(|f| f.height).collect();
        assert_eq!(heights, vec![25, 50, 75, 100]);
    }

    #[test]
    fn final_frame_lands_exactly_on_target() {
        let mut anim = InterpolatedAnimator::new();
        anim.start(3, 77, Duration::from_millis(7), "done");
        let frames = drain(&mut anim, Duration::from_millis(3));
        let last = frames.last().unwrap();
        assert_eq!(last.height, 77);
        assert_eq!(last.completed, Some("done"));
        assert_eq!(last.progress_permille, 1000);
        assert_eq!(frames.iter().filter(|f| f.is_final()).count(), 1);
    }

    #[test]
    fn zero_distance_run_still_ticks_and_completes() {
        let mut anim = InterpolatedAnimator::new();
        anim.start(50, 50, Duration::from_millis(200), 7u32);
        let frames = drain(&mut anim, MS_50);
        assert_eq!(frames.len(), 4);
        assert!(frames.iter().all(|f| f.height == 50));
        let completions: Vec<u32> = frames.into_iter().filter_map(|f| f.completed).collect();
        assert_eq!(completions, vec![7]);
    }

    #[test]
    fn superseded_run_never_completes() {
        let mut anim = InterpolatedAnimator::new();
        anim.start(0, 100, Duration::from_millis(200), "first");
        anim.tick(MS_50);
        anim.start(25, 0, Duration::from_millis(100), "second");
        let completions: Vec<&str> = drain(&mut anim, MS_50)
            .into_iter()
            .filter_map(|f| f.completed)
            .collect();
        assert_eq!(completions, vec!["second"]);
    }

    #[test]
    fn state_passes_through_completed() {
        let mut anim = InterpolatedAnimator::new();
        anim.start(0, 10, Duration::from_millis(10), ());
        assert_eq!(anim.state(), AnimatorState::Running);
        assert!(anim.tick(Duration::from_millis(10)).unwrap().is_final());
        assert_eq!(anim.state(), AnimatorState::Completed);
        assert!(anim.tick(MS_50).is_none());
        assert_eq!(anim.state(), AnimatorState::Idle);
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut anim = InterpolatedAnimator::new();
        anim.start(0, 10, Duration::ZERO, ());
        let frame = anim.tick(Duration::from_millis(1)).unwrap();
        assert!(frame.is_final());
        assert_eq!(frame.height, 10);
    }

    #[test]
    fn zero_dt_tick_reports_start_height() {
        let mut anim = InterpolatedAnimator::new();
        anim.start(10, 20, Duration::from_millis(100), ());
        let frame = anim.tick(Duration::ZERO).unwrap();
        assert_eq!(frame.height, 10);
        assert!(!frame.is_final());
    }

    #[test]
    fn cancel_drops_token() {
        let mut anim = InterpolatedAnimator::new();
        anim.start(0, 10, Duration::from_millis(100), ());
        assert!(anim.cancel());
        assert!(!anim.cancel());
        assert!(anim.tick(MS_50).is_none());
    }

    #[test]
    fn frame_clock_measures_gaps() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        assert_eq!(clock.delta(t0), Duration::ZERO);
        assert_eq!(clock.delta(t0 + MS_50), MS_50);
        clock.reset();
        assert_eq!(clock.delta(t0 + MS_50 * 2), Duration::ZERO);
    }
}
