//! Staggered child scheduling relative to a parent trigger.

pub mod sequencer;
