//! Frame-driven motion engine.
//!
//! The presentation tree mounts elements, binds progress sources, triggers,
//! sequences, and loops against them, then calls [`motion::MotionEngine::tick`]
//! once per frame with the scroll state and element geometry.

pub mod geometry;
pub mod handles;
pub mod motion;
