use std::{fmt, str::FromStr};

use crate::{
    foundation::core::Rect,
    foundation::error::{KineticError, KineticResult},
    foundation::math::clamp01,
};

/// Floor for the scrollable extent in global mode, avoiding division by zero
/// on pages that fit inside the viewport.
pub const DEFAULT_SCROLL_EPSILON: f64 = 1e-6;

/// Scroll state for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollFrame {
    pub raw_offset: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollFrame {
    pub fn new(
        raw_offset: f64,
        viewport_width: f64,
        viewport_height: f64,
        document_height: f64,
    ) -> KineticResult<Self> {
        let frame = Self {
            raw_offset,
            viewport_width,
            viewport_height,
            document_height,
        };
        frame.validate()?;
        Ok(frame)
    }

    pub fn validate(&self) -> KineticResult<()> {
        let all_finite = [
            self.raw_offset,
            self.viewport_width,
            self.viewport_height,
            self.document_height,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(KineticError::validation("scroll frame values must be finite"));
        }
        if self.viewport_width < 0.0 || self.viewport_height < 0.0 || self.document_height < 0.0 {
            return Err(KineticError::validation(
                "scroll frame sizes must be >= 0",
            ));
        }
        Ok(())
    }

    /// Visible area in document coordinates.
    pub fn viewport_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.raw_offset,
            self.viewport_width,
            self.raw_offset + self.viewport_height,
        )
    }

    /// Whole-document progress: `raw_offset / max(document - viewport, eps)`.
    pub fn global_progress(&self, epsilon: f64) -> f64 {
        let extent = (self.document_height - self.viewport_height).max(epsilon);
        clamp01(self.raw_offset / extent)
    }
}

/// A point along an element or the viewport, as a fraction of its height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    Start,
    Center,
    End,
    Fraction(f64),
}

impl Anchor {
    pub fn fraction(self) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
            Self::Fraction(f) => f,
        }
    }
}

impl FromStr for Anchor {
    type Err = KineticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            other => {
                let f: f64 = other.parse().map_err(|_| {
                    KineticError::validation(format!("unknown scroll anchor '{other}'"))
                })?;
                if !f.is_finite() {
                    return Err(KineticError::validation("scroll anchor must be finite"));
                }
                Ok(Self::Fraction(f))
            }
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Center => f.write_str("center"),
            Self::End => f.write_str("end"),
            Self::Fraction(v) => write!(f, "{v}"),
        }
    }
}

/// "Element anchor meets viewport anchor", written `"start end"` in JSON.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Intersection {
    pub element: Anchor,
    pub viewport: Anchor,
}

impl Intersection {
    pub const fn new(element: Anchor, viewport: Anchor) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this intersection holds for `bounds`.
    pub fn scroll_offset(self, bounds: Rect, viewport_height: f64) -> f64 {
        bounds.y0 + self.element.fraction() * bounds.height()
            - self.viewport.fraction() * viewport_height
    }
}

impl FromStr for Intersection {
    type Err = KineticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(element), viewport, None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(KineticError::validation(format!(
                "scroll offset '{s}' must be '<element> [<viewport>]'"
            )));
        };
        let element = element.parse()?;
        // A lone anchor pins the element point to the viewport start.
        let viewport = match viewport {
            Some(v) => v.parse()?,
            None => Anchor::Start,
        };
        Ok(Self { element, viewport })
    }
}

impl TryFrom<String> for Intersection {
    type Error = KineticError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Intersection> for String {
    fn from(i: Intersection) -> Self {
        format!("{} {}", i.element, i.viewport)
    }
}

/// Which part of an element's travel through the viewport maps to 0..1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollOffsets {
    pub start: Intersection,
    pub end: Intersection,
}

impl ScrollOffsets {
    /// From the element entering at the viewport bottom until it leaves at the top.
    pub const ENTER_EXIT: Self = Self {
        start: Intersection::new(Anchor::Start, Anchor::End),
        end: Intersection::new(Anchor::End, Anchor::Start),
    };

    /// From the element's top at the viewport top until its bottom passes the top.
    pub const START_TO_END: Self = Self {
        start: Intersection::new(Anchor::Start, Anchor::Start),
        end: Intersection::new(Anchor::End, Anchor::Start),
    };
}

impl Default for ScrollOffsets {
    fn default() -> Self {
        Self::ENTER_EXIT
    }
}

/// An element's bounds paired with the offsets that bracket its progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedRange {
    pub element_bounds: Rect,
    pub offsets: ScrollOffsets,
}

impl TrackedRange {
    pub fn entry_offset(&self, viewport_height: f64) -> f64 {
        self.offsets
            .start
            .scroll_offset(self.element_bounds, viewport_height)
    }

    pub fn exit_offset(&self, viewport_height: f64) -> f64 {
        self.offsets
            .end
            .scroll_offset(self.element_bounds, viewport_height)
    }

    /// Progress through the range; a zero-length range reports 0.
    pub fn progress(&self, frame: &ScrollFrame) -> f64 {
        let entry = self.entry_offset(frame.viewport_height);
        let exit = self.exit_offset(frame.viewport_height);
        let span = exit - entry;
        if span == 0.0 || !span.is_finite() {
            return 0.0;
        }
        clamp01((frame.raw_offset - entry) / span)
    }
}

/// Sample progress for one frame, globally or over a tracked range.
pub fn sample(frame: &ScrollFrame, range: Option<&TrackedRange>) -> f64 {
    match range {
        None => frame.global_progress(DEFAULT_SCROLL_EPSILON),
        Some(range) => range.progress(frame),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/progress.rs"]
mod tests;
