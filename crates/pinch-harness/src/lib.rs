#![forbid(unsafe_code)]

//! Test harness and reference host for `pinch-core`.
//!
//! - [`SimulatedList`]: an in-memory scrollable list implementing `RowHost`,
//!   with footer rows, optional scroll support, and a request log.
//! - [`FrameDriver`]: delivers requested animation frames deterministically.
//! - [`GestureScript`]: scripted begin/scale/end sequences.

pub mod driver;
pub mod list;

pub use driver::{FRAME_16MS, FrameDriver, GestureScript, GestureStep, MAX_FRAMES, rebind_offscreen};
pub use list::{HostRequest, PinchFlags, SimulatedList};
