//! Declarative pages: JSON page descriptions mounted into a [`crate::MotionEngine`].

pub mod build;
pub mod model;
pub mod preset;
