//! Shared primitives: time, geometry re-exports, errors, and deterministic math.

pub mod core;
pub mod error;
pub mod math;
