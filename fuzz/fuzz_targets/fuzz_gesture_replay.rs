#![no_main]

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pinch_core::{GestureSample, PinchConfig, PinchController, ScaleGestureListener};
use pinch_harness::{HostRequest, SimulatedList};

#[derive(Debug, Arbitrary)]
enum Op {
    Begin(u16),
    Scale { factor: u16, focal: u16 },
    End,
    Frame(u8),
    AnimateTo(i16),
    Toggle,
}

/// Where the most recently started settle must land.
#[derive(Debug, Clone, Copy)]
enum Landing {
    /// Released gesture: always a bound.
    Bound,
    /// Programmatic animation: the clamped request.
    Height(i32),
}

#[derive(Debug, Arbitrary)]
struct Input {
    rows: u8,
    scroll: u16,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let rows = usize::from(input.rows % 64) + 1;
    let list = SimulatedList::demo(rows, 2, 50, 400)
        .with_footers(&[30])
        .scrolled_to(i32::from(input.scroll));
    let Ok(mut ctrl) = PinchController::attach(list, PinchConfig::default()) else {
        return;
    };

    let completions = Rc::new(Cell::new(0usize));
    let sink = Rc::clone(&completions);
    ctrl.on_pinch_complete(move |_| sink.set(sink.get() + 1));

    let mut landing = None;
    for op in input.ops.iter().take(512) {
        let was_animating = ctrl.is_animating();
        let before = completions.get();
        match *op {
            Op::Begin(focal) => {
                ctrl.on_scale_begin(f32::from(focal % 500));
            }
            Op::Scale { factor, focal } => {
                // 0.5..1.5
                let factor = 0.5 + f32::from(factor % 1001) / 1000.0;
                ctrl.on_scale(GestureSample::new(factor, f32::from(focal % 500)));
            }
            Op::End => {
                if ctrl.is_pinchable() {
                    landing = Some(Landing::Bound);
                }
                ctrl.on_scale_end();
            }
            Op::Frame(ms) => {
                ctrl.on_animation_frame(Duration::from_millis(u64::from(ms)));
                let fired = completions.get() - before;
                assert!(fired <= 1, "one frame fired {fired} completions");
                if fired == 1 {
                    assert!(was_animating && !ctrl.is_animating());
                    match landing {
                        Some(Landing::Bound) => assert!(ctrl.state().is_settled()),
                        Some(Landing::Height(h)) => assert_eq!(ctrl.pinch_height(), h),
                        None => panic!("completion without a started settle"),
                    }
                }
            }
            Op::AnimateTo(h) => {
                let target = ctrl.height_range().clamp(i64::from(h));
                landing = Some(Landing::Height(target));
                ctrl.animate_to(i32::from(h));
            }
            Op::Toggle => ctrl.set_pinchable(!ctrl.is_pinchable()),
        }

        let range = ctrl.height_range();
        let h = ctrl.pinch_height();
        assert!(h >= range.collapsed() && h <= range.expanded(), "height {h} out of range");
    }

    let footer = rows;
    assert!(!ctrl.host().requests().iter().any(
        |r| matches!(r, HostRequest::RowHeight { index, .. } if *index >= footer)
    ));
});
