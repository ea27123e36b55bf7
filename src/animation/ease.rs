/// Easing applied to a normalized segment parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    /// Spring-like response; `t` is read as seconds into a one second window.
    Spring { stiffness: f64, damping: f64 },
}

impl Ease {
    /// Stiffness/damping pair used when a transition only asks for `type: spring`.
    pub fn spring_default() -> Self {
        Self::Spring {
            stiffness: 100.0,
            damping: 10.0,
        }
    }

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Spring { stiffness, damping } => spring_response(stiffness, damping, t),
        }
    }
}

// Unit-mass damped oscillator released from 0 toward 1. The window end snaps to 1
// so a finished transition always lands exactly on its target.
fn spring_response(stiffness: f64, damping: f64, t: f64) -> f64 {
    if t >= 1.0 {
        return 1.0;
    }
    let omega = stiffness.max(1e-6).sqrt();
    let zeta = damping.max(0.0) / (2.0 * omega);
    if zeta < 1.0 {
        let wd = omega * (1.0 - zeta * zeta).sqrt();
        let decay = (-zeta * omega * t).exp();
        1.0 - decay * ((wd * t).cos() + (zeta * omega / wd) * (wd * t).sin())
    } else {
        // Critically-damped-like response.
        1.0 - (-omega * t).exp() * (1.0 + omega * t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
