use crate::{
    animation::ease::Ease,
    animation::value::{Lerp, Rgba8, Transform, Value, uniform_kind},
    foundation::error::{KineticError, KineticResult},
};

/// Values that can sit on a [`BreakpointCurve`].
pub trait CurveValue: Lerp + Clone {
    /// Reject value sets that cannot be interpolated together.
    fn check_values(values: &[Self]) -> KineticResult<()>;
}

impl CurveValue for f64 {
    fn check_values(values: &[Self]) -> KineticResult<()> {
        if values.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(KineticError::config("curve values must be finite"))
        }
    }
}

impl CurveValue for Rgba8 {
    fn check_values(_values: &[Self]) -> KineticResult<()> {
        Ok(())
    }
}

impl CurveValue for Transform {
    fn check_values(values: &[Self]) -> KineticResult<()> {
        let wrapped: Vec<Value> = values.iter().copied().map(Value::Transform).collect();
        uniform_kind(&wrapped).map(|_| ())
    }
}

impl CurveValue for Value {
    fn check_values(values: &[Self]) -> KineticResult<()> {
        uniform_kind(values).map(|_| ())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Breakpoint<T> {
    pub at: f64,
    pub value: T,
    #[serde(default)]
    pub ease: Ease, // ease applied toward the next breakpoint
}

impl<T> Breakpoint<T> {
    pub fn new(at: f64, value: T) -> Self {
        Self {
            at,
            value,
            ease: Ease::Linear,
        }
    }
}

/// Piecewise interpolation from a progress scalar to a value.
///
/// Breakpoints are strictly increasing in `at` and lie within `[0, 1]`.
/// Progress is clamped to `[0, 1]`; before the first or after the last
/// breakpoint the endpoint's value is returned unchanged.
///
/// In JSON a curve is a plain list of breakpoints, validated on load.
#[derive(Clone, Debug, PartialEq)]
pub struct BreakpointCurve<T> {
    points: Vec<Breakpoint<T>>,
}

impl<T> serde::Serialize for BreakpointCurve<T>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.points.serialize(serializer)
    }
}

impl<'de, T> serde::Deserialize<'de> for BreakpointCurve<T>
where
    T: CurveValue + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let points = Vec::<Breakpoint<T>>::deserialize(deserializer)?;
        Self::new(points).map_err(serde::de::Error::custom)
    }
}

impl<T> BreakpointCurve<T>
where
    T: CurveValue,
{
    pub fn new(points: Vec<Breakpoint<T>>) -> KineticResult<Self> {
        let curve = Self { points };
        curve.validate()?;
        Ok(curve)
    }

    /// Build from parallel input/output lists, linear between each pair.
    pub fn from_pairs(inputs: &[f64], outputs: Vec<T>) -> KineticResult<Self> {
        if inputs.len() != outputs.len() {
            return Err(KineticError::config(format!(
                "curve has {} inputs but {} outputs",
                inputs.len(),
                outputs.len()
            )));
        }
        Self::new(
            inputs
                .iter()
                .zip(outputs)
                .map(|(&at, value)| Breakpoint::new(at, value))
                .collect(),
        )
    }

    /// Spread `values` evenly over `[0, 1]`, each segment eased with `ease`.
    pub fn evenly_spaced(values: Vec<T>, ease: Ease) -> KineticResult<Self> {
        let n = values.len();
        if n == 0 {
            return Err(KineticError::config("keyframes must not be empty"));
        }
        let points = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Breakpoint {
                at: if n == 1 {
                    0.0
                } else {
                    i as f64 / (n - 1) as f64
                },
                value,
                ease,
            })
            .collect();
        Self::new(points)
    }

    pub fn validate(&self) -> KineticResult<()> {
        if self.points.is_empty() {
            return Err(KineticError::config(
                "breakpoint curve must have at least one point",
            ));
        }
        if !self.points.iter().all(|p| (0.0..=1.0).contains(&p.at)) {
            return Err(KineticError::config(
                "breakpoint positions must lie within [0, 1]",
            ));
        }
        if !self.points.windows(2).all(|w| w[0].at < w[1].at) {
            return Err(KineticError::config(
                "breakpoint positions must be strictly increasing",
            ));
        }
        let values: Vec<T> = self.points.iter().map(|p| p.value.clone()).collect();
        T::check_values(&values)
    }

    pub fn points(&self) -> &[Breakpoint<T>] {
        &self.points
    }

    pub fn first(&self) -> &T {
        &self.points[0].value
    }

    pub fn last(&self) -> &T {
        &self.points[self.points.len() - 1].value
    }

    pub fn evaluate(&self, progress: f64) -> T {
        let progress = progress.clamp(0.0, 1.0);
        let idx = self.points.partition_point(|p| p.at <= progress);

        if idx == 0 {
            return self.first().clone();
        }
        if idx >= self.points.len() {
            return self.last().clone();
        }

        let a = &self.points[idx - 1];
        let b = &self.points[idx];
        let t = (progress - a.at) / (b.at - a.at);
        T::lerp(&a.value, &b.value, a.ease.apply(t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
