#![forbid(unsafe_code)]

//! Replays a scripted pinch over the demo list and logs every step.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=pinch=debug cargo run -p pinch-harness --bin pinch-replay
//! ```

use pinch_core::{PinchConfig, PinchController, PinchState};
use pinch_harness::{FrameDriver, GestureScript, SimulatedList, rebind_offscreen};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let config = PinchConfig::default();
    let range = config.height_range()?;
    let list = SimulatedList::demo(60, range.collapsed(), range.expanded(), 640).scrolled_to(400);
    let mut ctrl = PinchController::attach(list, config)?;

    ctrl.on_pinch_complete(|state: PinchState| {
        tracing::info!(?state, "pinch complete");
    });

    let driver = FrameDriver::default();
    let scripts = [
        ("spread", GestureScript::pinch(320.0, 1.04, 12)),
        ("half pinch", GestureScript::pinch(320.0, 0.98, 4)),
        ("squeeze", GestureScript::pinch(320.0, 0.9, 12)),
    ];

    for (name, script) in &scripts {
        script.play(&mut ctrl);
        let frames = driver.pump(&mut ctrl);
        rebind_offscreen(&mut ctrl);
        tracing::info!(
            script = name,
            frames,
            height = ctrl.pinch_height(),
            percent = ctrl.height_percent(),
            scroll = ctrl.host().scroll_offset(),
            "script finished"
        );
    }

    ctrl.animate_expanded();
    let frames = driver.pump(&mut ctrl);
    tracing::info!(frames, state = ?ctrl.state(), "expand-all finished");
    Ok(())
}
