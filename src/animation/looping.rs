use crate::{
    animation::curve::BreakpointCurve,
    animation::ease::Ease,
    animation::value::Value,
    foundation::core::Millis,
    foundation::error::{KineticError, KineticResult},
    foundation::math::Rng64,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// Jump back to the first keyframe at each period boundary.
    #[default]
    Restart,
    /// Alternate forward and reversed passes.
    Mirror,
}

/// A loop keyframe: a fixed value, or a number drawn once from `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum LoopKeyframe {
    Random { random: [f64; 2] },
    Fixed(Value),
}

impl From<Value> for LoopKeyframe {
    fn from(v: Value) -> Self {
        Self::Fixed(v)
    }
}

impl From<f64> for LoopKeyframe {
    fn from(v: f64) -> Self {
        Self::Fixed(Value::Number(v))
    }
}

/// Loop period: fixed, or drawn once from `[min, max)` milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Period {
    Random { random: [u64; 2] },
    Fixed(Millis),
}

impl From<Millis> for Period {
    fn from(p: Millis) -> Self {
        Self::Fixed(p)
    }
}

/// Declarative description of a perpetual animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LoopSpec {
    pub property: String,
    pub keyframes: Vec<LoopKeyframe>,
    pub period: Period,
    #[serde(default)]
    pub repeat: RepeatMode,
    #[serde(default)]
    pub phase_offset: Millis,
    #[serde(default)]
    pub delay: Millis,
    #[serde(default)]
    pub ease: Ease,
}

impl LoopSpec {
    pub fn new(
        property: impl Into<String>,
        keyframes: Vec<LoopKeyframe>,
        period: impl Into<Period>,
        repeat: RepeatMode,
    ) -> Self {
        Self {
            property: property.into(),
            keyframes,
            period: period.into(),
            repeat,
            phase_offset: Millis::ZERO,
            delay: Millis::ZERO,
            ease: Ease::Linear,
        }
    }

    pub fn with_phase_offset(mut self, offset: Millis) -> Self {
        self.phase_offset = offset;
        self
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
        self.resolve(&mut Rng64::new(0)).map(|_| ())
    }

    /// Draw any randomized parameters from `rng` and compile the keyframes.
    pub fn resolve(&self, rng: &mut Rng64) -> KineticResult<LoopDriver> {
        if self.property.trim().is_empty() {
            return Err(KineticError::config("loop property must be non-empty"));
        }

        let period = match self.period {
            Period::Fixed(p) => p,
            Period::Random { random: [lo, hi] } => {
                if lo > hi {
                    return Err(KineticError::config("random period range must be min <= max"));
                }
                Millis(rng.range_f64(lo as f64, hi as f64).floor() as u64)
            }
        };
        if period.0 == 0 {
            return Err(KineticError::config("loop period must be > 0"));
        }

        let mut values = Vec::with_capacity(self.keyframes.len());
        for kf in &self.keyframes {
            values.push(match *kf {
                LoopKeyframe::Fixed(v) => v,
                LoopKeyframe::Random { random: [lo, hi] } => {
                    if !(lo.is_finite() && hi.is_finite()) || lo > hi {
                        return Err(KineticError::config(
                            "random keyframe range must be finite with min <= max",
                        ));
                    }
                    Value::Number(rng.range_f64(lo, hi))
                }
            });
        }

        Ok(LoopDriver {
            curve: BreakpointCurve::evenly_spaced(values, self.ease)?,
            period,
            repeat: self.repeat,
            phase_offset: self.phase_offset,
            delay: self.delay,
        })
    }
}

/// A resolved loop: a pure function from elapsed time to value.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopDriver {
    curve: BreakpointCurve<Value>,
    period: Millis,
    repeat: RepeatMode,
    phase_offset: Millis,
    delay: Millis,
}

impl LoopDriver {
    pub fn period(&self) -> Millis {
        self.period
    }

    pub fn keyframes(&self) -> impl Iterator<Item = &Value> {
        self.curve.points().iter().map(|p| &p.value)
    }

    pub fn tick(&self, elapsed_since_mount: Millis) -> Value {
        if elapsed_since_mount < self.delay {
            return *self.curve.first();
        }
        let t = elapsed_since_mount
            .since(self.delay)
            .saturating_add(self.phase_offset)
            .0;
        let cycle = t / self.period.0;
        let phase = (t % self.period.0) as f64 / self.period.as_f64();

        let phase = match self.repeat {
            RepeatMode::Restart => phase,
            RepeatMode::Mirror if cycle % 2 == 1 => 1.0 - phase,
            RepeatMode::Mirror => phase,
        };
        self.curve.evaluate(phase)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/looping.rs"]
mod tests;
