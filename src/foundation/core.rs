use crate::foundation::error::{KineticError, KineticResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Milliseconds on the engine clock.
///
/// Used both as an instant (time since the engine origin) and as a duration,
/// the same way frame indices double as positions and lengths on a timeline.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    /// Zero milliseconds.
    pub const ZERO: Self = Self(0);

    /// Convert fractional seconds (as authored in motion specs) to milliseconds.
    pub fn from_secs_f64(secs: f64) -> KineticResult<Self> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(KineticError::validation(format!(
                "duration must be finite and >= 0, got {secs}"
            )));
        }
        Ok(Self((secs * 1000.0).round() as u64))
    }

    /// Milliseconds elapsed from `earlier` to `self`, saturating at zero.
    pub fn since(self, earlier: Millis) -> Millis {
        Millis(self.0.saturating_sub(earlier.0))
    }

    /// `self + other`, saturating.
    pub fn saturating_add(self, other: Millis) -> Millis {
        Millis(self.0.saturating_add(other.0))
    }

    /// `self * n`, saturating.
    pub fn saturating_mul(self, n: u64) -> Millis {
        Millis(self.0.saturating_mul(n))
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

/// Visible page area in document coordinates, plus the total scrollable height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> KineticResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(KineticError::validation(
                "viewport width and height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Viewport rectangle in document coordinates for a vertical scroll offset.
    pub fn rect_at(self, scroll_y: f64) -> Rect {
        Rect::new(0.0, scroll_y, self.width, scroll_y + self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
