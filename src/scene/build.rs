use std::collections::BTreeMap;

use crate::{
    animation::value::Value,
    engine::geometry::GeometryMap,
    engine::handles::{ElementId, ProgressHandle, TriggerHandle, ValueHandle},
    engine::motion::{MotionEngine, ProgressTarget},
    foundation::core::Millis,
    foundation::error::{KineticError, KineticResult},
    scene::model::{Bounds, PageSpec},
    scroll::progress::{ScrollFrame, ScrollOffsets},
    viewport::trigger::TriggerState,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything the presentation tree needs to paint one frame.
pub struct FrameSnapshot {
    /// Engine time of the frame.
    pub now: Millis,
    /// Scroll offset the frame was evaluated at.
    pub scroll_y: f64,
    /// Whole-document progress in `[0, 1]`.
    pub progress: f64,
    /// Every bound property, keyed by name.
    pub values: BTreeMap<String, Value>,
    /// Trigger state per reveal, keyed as `<element>#<index>`.
    pub triggers: BTreeMap<String, TriggerSnapshot>,
    /// Reveals that fired during this frame.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fired: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TriggerSnapshot {
    pub state: TriggerState,
    pub fire_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fired_at: Option<Millis>,
}

/// A [`PageSpec`] mounted into a live engine.
#[derive(Clone, Debug)]
pub struct Scene {
    page: PageSpec,
    engine: MotionEngine,
    geometry: GeometryMap,
    elements: BTreeMap<String, ElementId>,
    global: ProgressHandle,
    values: Vec<(String, ValueHandle)>,
    triggers: Vec<(String, TriggerHandle)>,
}

impl Scene {
    #[tracing::instrument(skip(page), fields(elements = page.elements.len()))]
    /// Validate `page`, mount its elements, and bind everything it declares.
    pub fn build(page: &PageSpec) -> KineticResult<Self> {
        page.validate()?;
        let mut engine = MotionEngine::new(page.settings)?;
        let mut geometry = GeometryMap::new();

        let mut elements = BTreeMap::new();
        for (id, spec) in &page.elements {
            let handle = engine.mount(id.as_str(), spec.mount_at);
            if let Some(bounds) = spec.bounds {
                geometry.set(handle, bounds.to_rect());
            }
            elements.insert(id.clone(), handle);
        }
        let lookup = |id: &str| {
            elements
                .get(id)
                .copied()
                .ok_or_else(|| KineticError::validation(format!("unknown element '{id}'")))
        };

        let global = engine.bind_scroll_progress(ProgressTarget::Global)?;
        // Ranged sources are shared by bindings that track the same element and offsets.
        let mut ranged: Vec<(ElementId, ScrollOffsets, ProgressHandle)> = Vec::new();
        let mut values = Vec::new();

        for binding in &page.scroll {
            let progress = match &binding.element {
                None => global,
                Some(id) => {
                    let element = lookup(id)?;
                    let offsets = binding.offsets;
                    match ranged
                        .iter()
                        .find(|(e, o, _)| *e == element && *o == offsets)
                    {
                        Some((_, _, handle)) => *handle,
                        None => {
                            let handle = engine
                                .bind_scroll_progress(ProgressTarget::Ranged { element, offsets })?;
                            ranged.push((element, offsets, handle));
                            handle
                        }
                    }
                }
            };
            let value = engine.bind_interpolated(progress, binding.curve.clone())?;
            values.push((binding.property.clone(), value));
        }

        let mut triggers = Vec::new();
        let mut per_element: BTreeMap<&str, usize> = BTreeMap::new();
        for reveal in &page.reveals {
            let trigger = engine.bind_viewport_trigger(lookup(&reveal.element)?, reveal.options)?;
            let children = engine.bind_sequence(trigger, &reveal.sequence)?;
            values.extend(
                reveal
                    .sequence
                    .children
                    .iter()
                    .map(|c| c.property.clone())
                    .zip(children),
            );

            let index = per_element.entry(reveal.element.as_str()).or_default();
            triggers.push((format!("{}#{index}", reveal.element), trigger));
            *index += 1;
        }

        for binding in &page.loops {
            let value = engine.bind_loop(lookup(&binding.element)?, &binding.animation)?;
            values.push((binding.animation.property.clone(), value));
        }

        tracing::debug!(
            values = values.len(),
            triggers = triggers.len(),
            "scene built"
        );
        Ok(Self {
            page: page.clone(),
            engine,
            geometry,
            elements,
            global,
            values,
            triggers,
        })
    }

    pub fn page(&self) -> &PageSpec {
        &self.page
    }

    pub fn engine(&self) -> &MotionEngine {
        &self.engine
    }

    pub fn element(&self, id: &str) -> Option<ElementId> {
        self.elements.get(id).copied()
    }

    /// Trigger bound for a reveal, keyed as in [`FrameSnapshot::triggers`].
    pub fn trigger(&self, key: &str) -> Option<TriggerHandle> {
        self.triggers
            .iter()
            .find_map(|(k, h)| (k == key).then_some(*h))
    }

    /// Move an element, or clear its bounds with `None` to simulate a pending layout.
    pub fn set_bounds(&mut self, id: &str, bounds: Option<Bounds>) -> KineticResult<()> {
        let element = self
            .element(id)
            .ok_or_else(|| KineticError::validation(format!("unknown element '{id}'")))?;
        match bounds {
            Some(b) => self.geometry.set(element, b.to_rect()),
            None => {
                self.geometry.clear(element);
            }
        }
        Ok(())
    }

    /// Evaluate the page at `now` with the document scrolled to `scroll_y`.
    pub fn frame(&mut self, now: Millis, scroll_y: f64) -> KineticResult<FrameSnapshot> {
        let frame = ScrollFrame::new(
            scroll_y,
            self.page.viewport.width,
            self.page.viewport.height,
            self.page.document_height,
        )?;
        let report = self.engine.tick(now, &frame, &self.geometry)?;

        let mut values = BTreeMap::new();
        for (property, handle) in &self.values {
            let value = self.engine.value(*handle).ok_or_else(|| {
                KineticError::evaluation(format!("value for '{property}' was released"))
            })?;
            values.insert(property.clone(), value);
        }

        let mut triggers = BTreeMap::new();
        let mut fired = Vec::new();
        for (key, handle) in &self.triggers {
            let (Some(state), Some(fire_count)) = (
                self.engine.trigger_state(*handle),
                self.engine.fire_count(*handle),
            ) else {
                continue;
            };
            triggers.insert(
                key.clone(),
                TriggerSnapshot {
                    state,
                    fire_count,
                    fired_at: self.engine.fired_at(*handle),
                },
            );
            if report.fired.contains(handle) {
                fired.push(key.clone());
            }
        }

        Ok(FrameSnapshot {
            now,
            scroll_y,
            progress: self.engine.progress(self.global).unwrap_or(0.0),
            values,
            triggers,
            fired,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/build.rs"]
mod tests;
