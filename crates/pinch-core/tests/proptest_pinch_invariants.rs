#![forbid(unsafe_code)]

//! Property-based invariant tests for the pinch math.
//!
//! ## Invariants
//!
//! 1. Interpreter output is always inside the height range.
//! 2. A sample never leaves the height unchanged unless it sits on a bound.
//! 3. `percent` is within `[0, 1]` and monotonic in height.
//! 4. Release targets are always a bound; durations are within `[1ms, base]`.
//! 5. The anchor is always one of the supplied rows.
//! 6. The animator ends exactly on its target and yields its token once.

use std::time::Duration;

use pinch_core::{
    AnchorLocator, GestureInterpreter, GestureSample, HeightRange, InterpolatedAnimator,
    PinchConfig, PinchSession, RowSnapshot, SnapDecider,
};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_range() -> impl Strategy<Value = HeightRange> {
    (0i32..200, 1i32..400).prop_map(|(lo, span)| {
        HeightRange::new(lo, lo + span).expect("collapsed < expanded by construction")
    })
}

fn arb_scale() -> impl Strategy<Value = f32> {
    prop_oneof![
        8 => 0.5f32..1.5,
        1 => Just(1.0f32),
        1 => any::<f32>(),
    ]
}

fn arb_rows() -> impl Strategy<Value = Vec<RowSnapshot>> {
    prop::collection::vec((prop_oneof![Just(2i32), 10i32..90], any::<bool>()), 1..40).prop_map(
        |specs| {
            let mut top = -30;
            specs
                .into_iter()
                .enumerate()
                .map(|(index, (height, pinchable))| {
                    let row = RowSnapshot::new(index, top, height, pinchable);
                    top += height;
                    row
                })
                .collect()
        },
    )
}

// ── Properties ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn interpreter_stays_in_range(
        range in arb_range(),
        start in 0i32..600,
        scales in prop::collection::vec(arb_scale(), 1..32),
    ) {
        let interpreter = GestureInterpreter::default();
        let mut session = PinchSession::new(range.clamp(i64::from(start)));
        for scale in scales {
            let h = interpreter.update(&mut session, &range, GestureSample::new(scale, 0.0));
            prop_assert!(h >= range.collapsed() && h <= range.expanded());
            prop_assert_eq!(h, session.current_height);
        }
    }

    #[test]
    fn interpreter_always_moves_off_interior(range in arb_range(), scale in 0.5f32..1.5) {
        prop_assume!(range.span() >= 2);
        let interpreter = GestureInterpreter::default();
        let start = range.collapsed() + range.span() / 2;
        let mut session = PinchSession::new(start);
        let h = interpreter.update(&mut session, &range, GestureSample::new(scale, 0.0));
        prop_assert_ne!(h, start);
    }

    #[test]
    fn percent_is_bounded_and_monotonic(range in arb_range(), a in -100i32..700, b in -100i32..700) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (plo, phi) = (range.percent(lo), range.percent(hi));
        prop_assert!((0.0..=1.0).contains(&plo));
        prop_assert!((0.0..=1.0).contains(&phi));
        prop_assert!(plo <= phi);
    }

    #[test]
    fn snap_targets_a_bound(range in arb_range(), offset in 0i32..400, expanding in any::<bool>()) {
        let config = PinchConfig::default();
        let decider = SnapDecider::new(range, &config);
        let mut session = PinchSession::new(range.clamp(i64::from(range.collapsed() + offset)));
        session.expanding = expanding;

        let decision = decider.decide(&session);
        prop_assert!(range.is_bound(decision.target));
        prop_assert!(decision.duration >= Duration::from_millis(1));
        prop_assert!(decision.duration <= Duration::from_millis(config.base_duration_ms.max(1)));
    }

    #[test]
    fn anchor_is_a_supplied_row(rows in arb_rows(), focal in -50.0f32..1000.0, vicinity in 0i32..60) {
        let anchor = AnchorLocator::new(2, vicinity).locate(focal, &rows);
        let anchor = anchor.expect("non-empty rows always yield an anchor");
        prop_assert!(rows.contains(&anchor));
    }

    #[test]
    fn animator_lands_on_target_once(
        from in -500i32..500,
        to in -500i32..500,
        duration_ms in 0u64..400,
        step_ms in 1u64..50,
    ) {
        let mut animator = InterpolatedAnimator::<u32>::new();
        animator.start(from, to, Duration::from_millis(duration_ms), 7);
        let (lo, hi) = (from.min(to), from.max(to));
        let mut tokens = 0;
        let mut last = None;
        while let Some(frame) = animator.tick(Duration::from_millis(step_ms)) {
            prop_assert!(frame.height >= lo && frame.height <= hi);
            if let Some(token) = frame.completed {
                prop_assert_eq!(token, 7);
                tokens += 1;
            }
            last = Some(frame.height);
        }
        prop_assert_eq!(tokens, 1);
        prop_assert_eq!(last, Some(to));
    }
}
