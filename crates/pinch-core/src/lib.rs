#![forbid(unsafe_code)]

//! Pinch-to-resize core for scrollable row lists.
//!
//! Turns a two-finger scale gesture into height updates for a subset of
//! "pinchable" rows, keeps one anchor row visually fixed while the rest
//! resize, and settles released gestures with a short linear animation.
//!
//! # Primary responsibilities
//! - **HeightRange / PinchState**: collapsed/expanded bounds and derived state.
//! - **GestureInterpreter**: scale factor to absolute pinch height.
//! - **AnchorLocator**: which row stays put, with collapsed-run grouping.
//! - **RowHeightApplier**: resizes visible rows and compensates scroll.
//! - **SnapDecider**: release target and settle duration.
//! - **InterpolatedAnimator**: time-bounded interpolation with one-shot completion.
//! - **PinchController**: owns the session and wires everything to a [`RowHost`].
//!
//! # How it fits
//! Touch recognition, rendering, and row recycling belong to the hosting list.
//! The host implements [`RowHost`] and [`PinchAdapter`], forwards recognizer
//! callbacks through [`ScaleGestureListener`], and calls
//! [`PinchController::on_animation_frame`] when a requested frame arrives.
//! Everything runs on the host's UI thread; nothing here spawns or blocks.

pub mod anchor;
pub mod animation;
pub mod apply;
pub mod config;
pub mod controller;
pub mod error;
pub mod gesture;
pub mod height;
pub mod host;
pub mod listener;
pub mod session;
pub mod snap;

pub use anchor::AnchorLocator;
pub use animation::{AnimationFrame, AnimatorState, FrameClock, InterpolatedAnimator};
pub use apply::{ApplyOutcome, RowHeightApplier};
pub use config::PinchConfig;
pub use controller::{PinchController, SettleCause};
pub use error::{PinchError, Result};
pub use gesture::{GestureInterpreter, GestureSample, ScaleGestureListener};
pub use height::{HeightRange, PinchState, dp_to_px};
pub use host::{PinchAdapter, RowGeometry, RowHost, RowSnapshot, snapshot_rows};
pub use listener::{ItemPinch, ListenerId, ListenerRegistry};
pub use session::{AnchorRow, PinchSession};
pub use snap::{SnapDecider, SnapDecision};
