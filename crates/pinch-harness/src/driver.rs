#![forbid(unsafe_code)]

//! Deterministic frame pumping and gesture scripts.

use std::time::Duration;

use pinch_core::{GestureSample, PinchController, RowHost as _, ScaleGestureListener};

use crate::list::SimulatedList;

/// Upper bound on frames pumped for one settle; guards against runaway loops.
pub const MAX_FRAMES: usize = 10_000;

/// Default frame interval (~60Hz).
pub const FRAME_16MS: Duration = Duration::from_millis(16);

/// Delivers requested animation frames at a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDriver {
    interval: Duration,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(FRAME_16MS)
    }
}

impl FrameDriver {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Deliver one frame if the host asked for one. Returns whether it did.
    pub fn step(&self, ctrl: &mut PinchController<SimulatedList>) -> bool {
        if !ctrl.host_mut().take_frame_request() {
            return false;
        }
        ctrl.on_animation_frame(self.interval);
        true
    }

    /// Deliver frames until the host stops requesting them.
    ///
    /// Returns the number of frames delivered.
    pub fn pump(&self, ctrl: &mut PinchController<SimulatedList>) -> usize {
        let mut frames = 0;
        while frames < MAX_FRAMES && self.step(ctrl) {
            frames += 1;
        }
        if frames == MAX_FRAMES {
            tracing::warn!(frames, "frame pump hit its limit");
        }
        frames
    }
}

/// Rebind every off-screen data row to the controller's current row height,
/// as a recycling list would when rows scroll back into view.
pub fn rebind_offscreen(ctrl: &mut PinchController<SimulatedList>) {
    let visible: Vec<usize> = ctrl.host().visible_rows().iter().map(|r| r.index).collect();
    let targets: Vec<(usize, i32)> = (0..ctrl.host().data_len())
        .filter(|i| !visible.contains(i))
        .map(|i| (i, ctrl.row_height_for(i)))
        .collect();
    for (index, height) in targets {
        ctrl.host_mut().bind_row_height(index, height);
    }
}

/// One step of a scripted gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureStep {
    Begin { focal_y: f32 },
    Scale { factor: f32, focal_y: f32 },
    End,
}

/// A recorded or synthetic pinch gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureScript {
    steps: Vec<GestureStep>,
}

impl GestureScript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A full gesture at `focal_y`: begin, `samples` updates of `factor`, end.
    #[must_use]
    pub fn pinch(focal_y: f32, factor: f32, samples: usize) -> Self {
        let mut script = Self::new().begin(focal_y);
        for _ in 0..samples {
            script = script.scale(factor, focal_y);
        }
        script.end()
    }

    #[must_use]
    pub fn begin(mut self, focal_y: f32) -> Self {
        self.steps.push(GestureStep::Begin { focal_y });
        self
    }

    #[must_use]
    pub fn scale(mut self, factor: f32, focal_y: f32) -> Self {
        self.steps.push(GestureStep::Scale { factor, focal_y });
        self
    }

    #[must_use]
    pub fn end(mut self) -> Self {
        self.steps.push(GestureStep::End);
        self
    }

    #[must_use]
    pub fn steps(&self) -> &[GestureStep] {
        &self.steps
    }

    /// Feed every step to `listener` in order.
    pub fn play<L: ScaleGestureListener + ?Sized>(&self, listener: &mut L) {
        for step in &self.steps {
            match *step {
                GestureStep::Begin { focal_y } => {
                    listener.on_scale_begin(focal_y);
                }
                GestureStep::Scale { factor, focal_y } => {
                    listener.on_scale(GestureSample::new(factor, focal_y));
                }
                GestureStep::End => listener.on_scale_end(),
            }
        }
    }
}
