//! Viewport triggers: intersection-driven arm/fire state machines.

pub mod trigger;
