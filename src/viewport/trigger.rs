use crate::{
    foundation::core::{Millis, Rect},
    foundation::error::{KineticError, KineticResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerState {
    #[default]
    Idle,
    Armed,
    Fired,
}

/// CSS-style margin applied around the observed element.
///
/// Positive values grow the element's hit area, negative values shrink it.
/// JSON accepts a number, `[vertical, horizontal]`, `[top, right, bottom, left]`,
/// or an object with named sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn expand(self, r: Rect) -> Rect {
        Rect::new(
            r.x0 - self.left,
            r.y0 - self.top,
            r.x1 + self.right,
            r.y1 + self.bottom,
        )
    }

    fn validate(self) -> KineticResult<()> {
        if [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|v| v.is_finite())
        {
            Ok(())
        } else {
            Err(KineticError::config("viewport margin must be finite"))
        }
    }
}

impl<'de> serde::Deserialize<'de> for Margin {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Uniform(f64),
            Arr(Vec<f64>),
            Sides {
                #[serde(default)]
                top: f64,
                #[serde(default)]
                right: f64,
                #[serde(default)]
                bottom: f64,
                #[serde(default)]
                left: f64,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Uniform(v) => Ok(Self::uniform(v)),
            Repr::Arr(v) => match v.as_slice() {
                [all] => Ok(Self::uniform(*all)),
                [vertical, horizontal] => Ok(Self {
                    top: *vertical,
                    right: *horizontal,
                    bottom: *vertical,
                    left: *horizontal,
                }),
                [top, right, bottom, left] => Ok(Self {
                    top: *top,
                    right: *right,
                    bottom: *bottom,
                    left: *left,
                }),
                _ => Err(serde::de::Error::custom(
                    "margin array must have 1, 2, or 4 entries",
                )),
            },
            Repr::Sides {
                top,
                right,
                bottom,
                left,
            } => Ok(Self {
                top,
                right,
                bottom,
                left,
            }),
        }
    }
}

/// How much of the element must be visible before the trigger arms.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Amount {
    /// Any overlap.
    #[default]
    Some,
    /// The whole element.
    All,
    /// At least this fraction of the element's area.
    Fraction(f64),
}

impl serde::Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Some => serializer.serialize_str("some"),
            Self::All => serializer.serialize_str("all"),
            Self::Fraction(f) => serializer.serialize_f64(*f),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Keyword(String),
            Fraction(f64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Keyword(s) => match s.trim().to_ascii_lowercase().as_str() {
                "some" => Ok(Self::Some),
                "all" => Ok(Self::All),
                other => Err(serde::de::Error::custom(format!(
                    "unknown viewport amount '{other}'"
                ))),
            },
            Repr::Fraction(f) => Ok(Self::Fraction(f)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportOptions {
    #[serde(default)]
    pub margin: Margin,
    #[serde(default)]
    pub once: bool,
    #[serde(default)]
    pub amount: Amount,
}

impl ViewportOptions {
    pub fn once() -> Self {
        Self {
            once: true,
            ..Self::default()
        }
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = amount;
        self
    }

    pub fn validate(&self) -> KineticResult<()> {
        self.margin.validate()?;
        if let Amount::Fraction(f) = self.amount {
            if !(f.is_finite() && (0.0..=1.0).contains(&f)) {
                return Err(KineticError::config(
                    "viewport amount fraction must be in [0, 1]",
                ));
            }
        }
        Ok(())
    }
}

/// True when `element`, grown by `margin`, is visible enough inside `viewport`.
pub fn in_view(element: Rect, viewport: Rect, margin: Margin, amount: Amount) -> bool {
    let target = margin.expand(element);
    if target.x0 > target.x1 || target.y0 > target.y1 {
        // A negative margin larger than the element leaves nothing to observe.
        return false;
    }
    let ix0 = target.x0.max(viewport.x0);
    let iy0 = target.y0.max(viewport.y0);
    let ix1 = target.x1.min(viewport.x1);
    let iy1 = target.y1.min(viewport.y1);
    if ix0 > ix1 || iy0 > iy1 {
        return false;
    }

    let target_area = target.area();
    let visible_area = (ix1 - ix0) * (iy1 - iy0);
    if target_area <= 0.0 {
        // Zero-area elements count as visible when they sit inside the viewport.
        return true;
    }
    match amount {
        Amount::Some => visible_area > 0.0,
        Amount::All => visible_area >= target_area,
        Amount::Fraction(f) => visible_area > 0.0 && visible_area / target_area >= f,
    }
}

/// Emitted when a trigger fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FireEvent {
    pub at: Millis,
    /// Total fires including this one.
    pub count: u32,
}

/// Result of a single [`ViewportTrigger::observe`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    /// Element geometry was missing; state is untouched.
    Unavailable,
    Unchanged,
    Fired(FireEvent),
    /// A repeatable trigger left the viewport and returned to idle.
    Reset,
}

/// Per-element intersection state machine.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportTrigger {
    options: ViewportOptions,
    state: TriggerState,
    fire_count: u32,
    fired_at: Option<Millis>,
}

impl ViewportTrigger {
    pub fn new(options: ViewportOptions) -> KineticResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            state: TriggerState::Idle,
            fire_count: 0,
            fired_at: None,
        })
    }

    pub fn options(&self) -> &ViewportOptions {
        &self.options
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn fire_count(&self) -> u32 {
        self.fire_count
    }

    /// Start time of the current run; `None` while idle.
    pub fn fired_at(&self) -> Option<Millis> {
        match self.state {
            TriggerState::Fired => self.fired_at,
            TriggerState::Idle | TriggerState::Armed => None,
        }
    }

    pub fn observe(&mut self, element: Option<Rect>, viewport: Rect, now: Millis) -> Observation {
        let Some(element) = element else {
            return Observation::Unavailable;
        };
        let hit = in_view(element, viewport, self.options.margin, self.options.amount);

        match self.state {
            TriggerState::Idle if hit => {
                self.state = TriggerState::Armed;
                self.fire(now)
            }
            TriggerState::Idle => Observation::Unchanged,
            TriggerState::Armed => self.fire(now),
            TriggerState::Fired if !hit && !self.options.once => {
                self.state = TriggerState::Idle;
                self.fired_at = None;
                Observation::Reset
            }
            TriggerState::Fired => Observation::Unchanged,
        }
    }

    // Arming fires synchronously; the run restarts from t=0 at `now`.
    fn fire(&mut self, now: Millis) -> Observation {
        self.state = TriggerState::Fired;
        self.fire_count = self.fire_count.saturating_add(1);
        self.fired_at = Some(now);
        Observation::Fired(FireEvent {
            at: now,
            count: self.fire_count,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/trigger.rs"]
mod tests;
