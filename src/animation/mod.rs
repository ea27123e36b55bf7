//! Value types and the pure samplers built on them.
//!
//! - [`curve`]: the interpolation mapper (`BreakpointCurve::evaluate`).
//! - [`tween`]: finite keyframed animations started by triggers.
//! - [`looping`]: perpetual, time-only animations.

pub mod curve;
pub mod ease;
pub mod looping;
pub mod tween;
pub mod value;
