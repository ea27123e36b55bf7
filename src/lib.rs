//! Kinetic is a scroll- and viewport-driven animation orchestration engine.
//!
//! A presentation tree mounts elements into a [`MotionEngine`], binds motion
//! to them, and calls [`MotionEngine::tick`] once per frame:
//!
//! - Scroll progress (whole document or a tracked element) mapped through
//!   [`BreakpointCurve`]s to numbers, colors, and transforms
//! - [`ViewportTrigger`]s that fire once or on every entry
//! - Staggered child [`SequenceSpec`]s started by a trigger
//! - Perpetual [`LoopSpec`]s driven by time alone, with seeded randomness
//!
//! Every output is a pure function of the current signals and the static
//! bindings. Pages can also be described in JSON ([`PageSpec`]) and evaluated
//! with [`Scene`].
#![forbid(unsafe_code)]

mod foundation;

/// Values, easing, curves, tweens, and loops.
pub mod animation;
/// The frame-driven engine and its handles.
pub mod engine;
/// JSON page descriptions and the built-in preset.
pub mod scene;
/// Scroll progress sources.
pub mod scroll;
/// Staggered sequences.
pub mod sequence;
/// Viewport intersection triggers.
pub mod viewport;

pub use crate::foundation::core::{Affine, Millis, Point, Rect, Vec2, ViewportSize};
pub use crate::foundation::error::{KineticError, KineticResult};
pub use crate::foundation::math::Rng64;

pub use crate::animation::curve::{Breakpoint, BreakpointCurve, CurveValue};
pub use crate::animation::ease::Ease;
pub use crate::animation::looping::{LoopDriver, LoopKeyframe, LoopSpec, Period, RepeatMode};
pub use crate::animation::tween::{AnimationSpec, Tween};
pub use crate::animation::value::{Lerp, Rgba8, Rotation, Transform, Value, ValueKind};
pub use crate::engine::geometry::{Geometry, GeometryMap};
pub use crate::engine::handles::{ElementId, ProgressHandle, TriggerHandle, ValueHandle};
pub use crate::engine::motion::{
    EngineSettings, EngineStats, FrameReport, MotionEngine, ProgressTarget,
};
pub use crate::scene::build::{FrameSnapshot, Scene, TriggerSnapshot};
pub use crate::scene::model::{
    Bounds, ElementSpec, LoopBinding, PageSpec, RevealBinding, ScrollBinding,
};
pub use crate::scene::preset::portfolio;
pub use crate::scroll::progress::{
    Anchor, DEFAULT_SCROLL_EPSILON, Intersection, ScrollFrame, ScrollOffsets, TrackedRange,
};
pub use crate::sequence::sequencer::{SequenceSpec, Sequencer};
pub use crate::viewport::trigger::{
    Amount, FireEvent, Margin, Observation, TriggerState, ViewportOptions, ViewportTrigger,
};
