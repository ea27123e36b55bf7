use crate::{
    animation::curve::BreakpointCurve,
    animation::ease::Ease,
    animation::value::Value,
    foundation::core::Millis,
    foundation::error::{KineticError, KineticResult},
};

/// A finite keyframed animation of one property.
///
/// Keyframes are spread evenly over `duration`. The tween reports its first
/// keyframe until `delay` has elapsed and its last keyframe once finished.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSpec {
    pub property: String,
    pub keyframes: Vec<Value>,
    #[serde(default = "default_duration")]
    pub duration: Millis,
    #[serde(default)]
    pub delay: Millis,
    #[serde(default)]
    pub ease: Ease,
}

fn default_duration() -> Millis {
    Millis(300)
}

impl AnimationSpec {
    pub fn new(property: impl Into<String>, keyframes: Vec<Value>, duration: Millis) -> Self {
        Self {
            property: property.into(),
            keyframes,
            duration,
            delay: Millis::ZERO,
            ease: Ease::Linear,
        }
    }

    /// `from -> to` shorthand, the shape of most entrance animations.
    pub fn from_to(
        property: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
        duration: Millis,
    ) -> Self {
        Self::new(property, vec![from.into(), to.into()], duration)
    }

    pub fn with_delay(mut self, delay: Millis) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn validate(&self) -> KineticResult<()> {
        self.compile().map(|_| ())
    }

    /// Validate and precompute the keyframe curve.
    pub fn compile(&self) -> KineticResult<Tween> {
        if self.property.trim().is_empty() {
            return Err(KineticError::config("animation property must be non-empty"));
        }
        Ok(Tween {
            curve: BreakpointCurve::evenly_spaced(self.keyframes.clone(), self.ease)?,
            duration: self.duration,
            delay: self.delay,
        })
    }
}

/// A compiled [`AnimationSpec`], sampled against time since its start.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    curve: BreakpointCurve<Value>,
    duration: Millis,
    delay: Millis,
}

impl Tween {
    /// Value before the tween starts.
    pub fn initial(&self) -> Value {
        *self.curve.first()
    }

    /// Value after the tween completes.
    pub fn target(&self) -> Value {
        *self.curve.last()
    }

    /// Total time from start until the last keyframe is reached.
    pub fn span(&self) -> Millis {
        self.delay.saturating_add(self.duration)
    }

    pub fn sample(&self, elapsed: Millis) -> Value {
        let local = elapsed.since(self.delay);
        if elapsed < self.delay {
            return self.initial();
        }
        if self.duration.0 == 0 || local >= self.duration {
            return self.target();
        }
        self.curve.evaluate(local.as_f64() / self.duration.as_f64())
    }

    pub fn is_finished(&self, elapsed: Millis) -> bool {
        elapsed >= self.span()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
