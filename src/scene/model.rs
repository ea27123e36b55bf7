use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::curve::BreakpointCurve,
    animation::looping::LoopSpec,
    animation::value::Value,
    engine::motion::EngineSettings,
    foundation::core::{Millis, Rect, ViewportSize},
    foundation::error::{KineticError, KineticResult},
    scroll::progress::ScrollOffsets,
    sequence::sequencer::SequenceSpec,
    viewport::trigger::ViewportOptions,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete animated page.
///
/// Pure data: it can be written by hand, generated by [`crate::portfolio`],
/// and round-tripped through JSON. [`crate::Scene::build`] mounts it into a
/// [`crate::MotionEngine`].
pub struct PageSpec {
    /// Engine seed and scroll tuning.
    #[serde(default)]
    pub settings: EngineSettings,
    /// Visible window size.
    pub viewport: ViewportSize,
    /// Total scrollable document height.
    pub document_height: f64,
    /// Elements keyed by stable author-facing ids.
    pub elements: BTreeMap<String, ElementSpec>,
    /// Scroll-linked values.
    #[serde(default)]
    pub scroll: Vec<ScrollBinding>,
    /// Viewport-triggered sequences.
    #[serde(default)]
    pub reveals: Vec<RevealBinding>,
    /// Perpetual time-driven animations.
    #[serde(default)]
    pub loops: Vec<LoopBinding>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// One element of the presentation tree.
pub struct ElementSpec {
    /// Layout box in document coordinates; absent until laid out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    /// Engine time at which the element mounts.
    #[serde(default)]
    pub mount_at: Millis,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Axis-aligned box as authored: origin plus size.
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    fn validate(&self, id: &str) -> KineticResult<()> {
        if ![self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(KineticError::validation(format!(
                "element '{id}' bounds must be finite"
            )));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(KineticError::validation(format!(
                "element '{id}' bounds must have width/height >= 0"
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A property driven by scroll progress.
pub struct ScrollBinding {
    /// Output name in frame snapshots.
    pub property: String,
    /// Tracked element; global document progress when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    /// Entry/exit intersections for the tracked element.
    #[serde(default)]
    pub offsets: ScrollOffsets,
    /// Progress to value mapping.
    pub curve: BreakpointCurve<Value>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A sequence revealed when an element scrolls into view.
pub struct RevealBinding {
    /// Observed element.
    pub element: String,
    /// Margin, `once`, and amount gating.
    #[serde(default)]
    pub options: ViewportOptions,
    /// Children started when the trigger fires.
    pub sequence: SequenceSpec,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A loop owned by an element.
pub struct LoopBinding {
    pub element: String,
    pub animation: LoopSpec,
}

impl PageSpec {
    /// Parse and validate a JSON page description.
    pub fn from_json(json: &str) -> KineticResult<Self> {
        let page: Self = serde_json::from_str(json)?;
        page.validate()?;
        Ok(page)
    }

    pub fn to_json_pretty(&self) -> KineticResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Largest meaningful scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport.height).max(0.0)
    }

    /// Validate page data, element references, and every binding.
    pub fn validate(&self) -> KineticResult<()> {
        self.settings.validate()?;
        ViewportSize::new(self.viewport.width, self.viewport.height)?;
        if !self.document_height.is_finite() || self.document_height < 0.0 {
            return Err(KineticError::validation(
                "document_height must be finite and >= 0",
            ));
        }

        for (id, el) in &self.elements {
            if id.trim().is_empty() {
                return Err(KineticError::validation("element id must be non-empty"));
            }
            if let Some(bounds) = &el.bounds {
                bounds.validate(id)?;
            }
        }

        let mut properties = BTreeSet::new();
        let mut claim = |property: &str| -> KineticResult<()> {
            if property.trim().is_empty() {
                return Err(KineticError::config("bound property must be non-empty"));
            }
            if !properties.insert(property.to_owned()) {
                return Err(KineticError::config(format!(
                    "property '{property}' is bound more than once"
                )));
            }
            Ok(())
        };

        for binding in &self.scroll {
            if let Some(element) = &binding.element {
                self.require_element(element, &binding.property)?;
            }
            binding.curve.validate()?;
            claim(&binding.property)?;
        }
        for reveal in &self.reveals {
            self.require_element(&reveal.element, "reveal")?;
            reveal.options.validate()?;
            reveal.sequence.validate()?;
            for child in &reveal.sequence.children {
                claim(&child.property)?;
            }
        }
        for binding in &self.loops {
            self.require_element(&binding.element, &binding.animation.property)?;
            binding.animation.validate()?;
            claim(&binding.animation.property)?;
        }
        Ok(())
    }

    fn require_element(&self, id: &str, referrer: &str) -> KineticResult<()> {
        if self.elements.contains_key(id) {
            Ok(())
        } else {
            Err(KineticError::validation(format!(
                "'{referrer}' references missing element '{id}'"
            )))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
