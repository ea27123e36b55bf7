use slotmap::SlotMap;

use crate::{
    animation::curve::BreakpointCurve,
    animation::looping::{LoopDriver, LoopSpec},
    animation::value::Value,
    engine::geometry::Geometry,
    engine::handles::{ElementId, LoopId, ProgressHandle, SequenceId, TriggerHandle, ValueHandle},
    foundation::core::Millis,
    foundation::error::{KineticError, KineticResult},
    foundation::math::{Rng64, split_seed},
    scroll::progress::{DEFAULT_SCROLL_EPSILON, ScrollFrame, ScrollOffsets, TrackedRange},
    sequence::sequencer::{SequenceSpec, Sequencer},
    viewport::trigger::{Observation, TriggerState, ViewportOptions, ViewportTrigger},
};

/// Engine-wide knobs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Seed for randomized loop parameters. Each loop binding draws from its own stream.
    pub seed: u64,
    /// Lower bound for the scrollable extent in global progress.
    pub scroll_epsilon: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            scroll_epsilon: DEFAULT_SCROLL_EPSILON,
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> KineticResult<()> {
        if !(self.scroll_epsilon.is_finite() && self.scroll_epsilon > 0.0) {
            return Err(KineticError::config("scroll_epsilon must be finite and > 0"));
        }
        Ok(())
    }
}

/// What a progress source measures.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProgressTarget {
    /// Whole-document scroll progress.
    Global,
    /// Progress of one element's travel between two intersections.
    Ranged {
        element: ElementId,
        offsets: ScrollOffsets,
    },
}

/// Per-tick summary returned by [`MotionEngine::tick`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameReport {
    pub now: Millis,
    /// Triggers that fired this tick, in arena order.
    pub fired: Vec<TriggerHandle>,
    /// Repeatable triggers that left the viewport and returned to idle.
    pub reset: Vec<TriggerHandle>,
    /// Progress sources and triggers whose element had no geometry.
    pub unavailable: usize,
    /// Interpolated values holding their last known value.
    pub held: usize,
}

/// Arena occupancy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct EngineStats {
    pub elements: usize,
    pub progress_sources: usize,
    pub values: usize,
    pub triggers: usize,
    pub sequences: usize,
    pub loops: usize,
}

#[derive(Clone, Debug)]
struct ElementSlot {
    label: String,
    mounted_at: Millis,
}

#[derive(Clone, Debug)]
struct ProgressSlot {
    target: ProgressTarget,
    current: Option<f64>,
}

impl ProgressSlot {
    fn owner(&self) -> Option<ElementId> {
        match self.target {
            ProgressTarget::Global => None,
            ProgressTarget::Ranged { element, .. } => Some(element),
        }
    }
}

#[derive(Clone, Debug)]
enum ValueSource {
    Interpolated {
        progress: ProgressHandle,
        curve: BreakpointCurve<Value>,
    },
    SequenceChild {
        sequence: SequenceId,
        index: usize,
    },
    Loop(LoopId),
}

#[derive(Clone, Debug)]
struct ValueSlot {
    source: ValueSource,
    // Element whose unmount releases this value.
    owner: Option<ElementId>,
    current: Value,
}

#[derive(Clone, Debug)]
struct TriggerSlot {
    element: ElementId,
    trigger: ViewportTrigger,
    sequences: Vec<SequenceId>,
}

#[derive(Clone, Debug)]
struct SequenceSlot {
    element: ElementId,
    trigger: TriggerHandle,
    sequencer: Sequencer,
}

#[derive(Clone, Debug)]
struct LoopSlot {
    element: ElementId,
    driver: LoopDriver,
}

/// Frame-driven orchestrator for scroll, viewport, and time-based motion.
///
/// Everything is owned in generational arenas. Handles from a released slot
/// never alias a newer binding; queries on them return `None`.
#[derive(Clone, Debug)]
pub struct MotionEngine {
    settings: EngineSettings,
    now: Millis,
    elements: SlotMap<ElementId, ElementSlot>,
    progress: SlotMap<ProgressHandle, ProgressSlot>,
    values: SlotMap<ValueHandle, ValueSlot>,
    triggers: SlotMap<TriggerHandle, TriggerSlot>,
    sequences: SlotMap<SequenceId, SequenceSlot>,
    loops: SlotMap<LoopId, LoopSlot>,
    loops_bound: u64,
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::with_settings(EngineSettings::default())
    }
}

impl MotionEngine {
    pub fn new(settings: EngineSettings) -> KineticResult<Self> {
        settings.validate()?;
        Ok(Self::with_settings(settings))
    }

    fn with_settings(settings: EngineSettings) -> Self {
        Self {
            settings,
            now: Millis::ZERO,
            elements: SlotMap::with_key(),
            progress: SlotMap::with_key(),
            values: SlotMap::with_key(),
            triggers: SlotMap::with_key(),
            sequences: SlotMap::with_key(),
            loops: SlotMap::with_key(),
            loops_bound: 0,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Time of the most recent tick.
    pub fn now(&self) -> Millis {
        self.now
    }

    // ---- lifecycle ----

    #[tracing::instrument(skip(self, label))]
    /// Register an element. Loops bound to it measure time from `at`.
    pub fn mount(&mut self, label: impl Into<String>, at: Millis) -> ElementId {
        self.elements.insert(ElementSlot {
            label: label.into(),
            mounted_at: at,
        })
    }

    #[tracing::instrument(skip(self))]
    /// Release an element and everything bound to it.
    ///
    /// Drops its triggers (cancelling their sequences), its loops, ranged
    /// progress sources over it, and every value fed by those. Returns `false`
    /// for an unknown or already released element.
    pub fn unmount(&mut self, element: ElementId) -> bool {
        let Some(slot) = self.elements.remove(element) else {
            return false;
        };

        let now = self.now;
        let mut dropped = 0;
        for seq in self.sequences.values_mut().filter(|s| s.element == element) {
            dropped += seq.sequencer.cancel(now);
        }
        if dropped > 0 {
            tracing::debug!(label = %slot.label, dropped, "unmount cancelled pending children");
        }

        self.triggers.retain(|_, t| t.element != element);
        self.sequences.retain(|_, s| s.element != element);
        self.loops.retain(|_, l| l.element != element);
        self.progress.retain(|_, p| p.owner() != Some(element));
        self.values.retain(|_, v| v.owner != Some(element));
        true
    }

    #[tracing::instrument(skip(self))]
    /// Deregister a trigger and cancel its sequences.
    ///
    /// Values fed by those sequences are released with it. Returns how many
    /// child starts were still pending, or `None` for a stale handle.
    pub fn cancel_trigger(&mut self, trigger: TriggerHandle) -> Option<usize> {
        let slot = self.triggers.remove(trigger)?;
        let now = self.now;

        let mut dropped = 0;
        for id in &slot.sequences {
            if let Some(mut seq) = self.sequences.remove(*id) {
                dropped += seq.sequencer.cancel(now);
            }
        }
        self.values.retain(|_, v| match v.source {
            ValueSource::SequenceChild { sequence, .. } => !slot.sequences.contains(&sequence),
            _ => true,
        });

        tracing::debug!(dropped, "trigger cancelled");
        Some(dropped)
    }

    // ---- bindings ----

    #[tracing::instrument(skip(self))]
    pub fn bind_scroll_progress(&mut self, target: ProgressTarget) -> KineticResult<ProgressHandle> {
        if let ProgressTarget::Ranged { element, .. } = target {
            self.require_element(element)?;
        }
        Ok(self.progress.insert(ProgressSlot {
            target,
            current: None,
        }))
    }

    #[tracing::instrument(skip(self, curve))]
    /// Map a progress source through a breakpoint curve.
    ///
    /// The curve is validated here; a bad curve never reaches `tick`. Until the
    /// source first reports progress the value sits at `evaluate(0)`.
    pub fn bind_interpolated(
        &mut self,
        progress: ProgressHandle,
        curve: BreakpointCurve<Value>,
    ) -> KineticResult<ValueHandle> {
        curve.validate()?;
        let source = self
            .progress
            .get(progress)
            .ok_or_else(|| KineticError::config("unknown progress handle"))?;

        let current = curve.evaluate(source.current.unwrap_or(0.0));
        let owner = source.owner();
        Ok(self.values.insert(ValueSlot {
            source: ValueSource::Interpolated { progress, curve },
            owner,
            current,
        }))
    }

    #[tracing::instrument(skip(self))]
    pub fn bind_viewport_trigger(
        &mut self,
        element: ElementId,
        options: ViewportOptions,
    ) -> KineticResult<TriggerHandle> {
        self.require_element(element)?;
        let trigger = ViewportTrigger::new(options)?;
        Ok(self.triggers.insert(TriggerSlot {
            element,
            trigger,
            sequences: Vec::new(),
        }))
    }

    #[tracing::instrument(skip(self, spec), fields(children = spec.children.len()))]
    /// Attach a staggered sequence to a trigger, one value handle per child.
    ///
    /// Binding to a trigger that has already fired schedules from its fire time.
    pub fn bind_sequence(
        &mut self,
        trigger: TriggerHandle,
        spec: &SequenceSpec,
    ) -> KineticResult<Vec<ValueHandle>> {
        spec.validate()?;
        let mut sequencer = Sequencer::new(spec)?;
        let slot = self
            .triggers
            .get_mut(trigger)
            .ok_or_else(|| KineticError::config("unknown trigger handle"))?;

        if let Some(at) = slot.trigger.fired_at() {
            sequencer.on_fire(at);
        }
        let element = slot.element;
        let now = self.now;
        let initial = sequencer.sample_all(now);

        let sequence = self.sequences.insert(SequenceSlot {
            element,
            trigger,
            sequencer,
        });
        slot.sequences.push(sequence);

        Ok(initial
            .into_iter()
            .enumerate()
            .map(|(index, current)| {
                self.values.insert(ValueSlot {
                    source: ValueSource::SequenceChild { sequence, index },
                    owner: Some(element),
                    current,
                })
            })
            .collect())
    }

    #[tracing::instrument(skip(self, spec), fields(property = %spec.property))]
    /// Start a perpetual loop on `element`, resolving any random ranges now.
    pub fn bind_loop(&mut self, element: ElementId, spec: &LoopSpec) -> KineticResult<ValueHandle> {
        let mounted_at = self.require_element(element)?.mounted_at;

        let mut rng = Rng64::new(split_seed(self.settings.seed, self.loops_bound));
        let driver = spec.resolve(&mut rng)?;
        self.loops_bound += 1;

        let current = driver.tick(self.now.since(mounted_at));
        let id = self.loops.insert(LoopSlot { element, driver });
        Ok(self.values.insert(ValueSlot {
            source: ValueSource::Loop(id),
            owner: Some(element),
            current,
        }))
    }

    // ---- frame ----

    #[tracing::instrument(skip(self, frame, geometry))]
    /// Advance to `now` and re-evaluate every binding against `frame`.
    ///
    /// Order: progress sources, then triggers (which schedule or cancel their
    /// sequences), then values. Every output is recomputed from the current
    /// signals, so skipped or repeated ticks never drift.
    pub fn tick(
        &mut self,
        now: Millis,
        frame: &ScrollFrame,
        geometry: &impl Geometry,
    ) -> KineticResult<FrameReport> {
        frame.validate()?;
        self.now = now;
        let mut report = FrameReport {
            now,
            ..FrameReport::default()
        };

        for slot in self.progress.values_mut() {
            slot.current = match slot.target {
                ProgressTarget::Global => Some(frame.global_progress(self.settings.scroll_epsilon)),
                ProgressTarget::Ranged { element, offsets } => {
                    geometry.bounds(element).map(|element_bounds| {
                        TrackedRange {
                            element_bounds,
                            offsets,
                        }
                        .progress(frame)
                    })
                }
            };
            if slot.current.is_none() {
                report.unavailable += 1;
            }
        }

        let viewport = frame.viewport_rect();
        for (handle, slot) in self.triggers.iter_mut() {
            match slot
                .trigger
                .observe(geometry.bounds(slot.element), viewport, now)
            {
                Observation::Fired(event) => {
                    tracing::debug!(at = event.at.0, count = event.count, "trigger fired");
                    for id in &slot.sequences {
                        if let Some(seq) = self.sequences.get_mut(*id) {
                            seq.sequencer.on_fire(event.at);
                        }
                    }
                    report.fired.push(handle);
                }
                Observation::Reset => {
                    let mut dropped = 0;
                    for id in &slot.sequences {
                        if let Some(seq) = self.sequences.get_mut(*id) {
                            dropped += seq.sequencer.cancel(now);
                        }
                    }
                    tracing::debug!(dropped, "trigger reset");
                    report.reset.push(handle);
                }
                Observation::Unavailable => report.unavailable += 1,
                Observation::Unchanged => {}
            }
        }

        for slot in self.values.values_mut() {
            let next = match &slot.source {
                ValueSource::Interpolated { progress, curve } => self
                    .progress
                    .get(*progress)
                    .and_then(|p| p.current)
                    .map(|p| curve.evaluate(p)),
                ValueSource::SequenceChild { sequence, index } => self
                    .sequences
                    .get(*sequence)
                    .and_then(|s| s.sequencer.sample(*index, now)),
                ValueSource::Loop(id) => self.loops.get(*id).and_then(|l| {
                    let mounted_at = self.elements.get(l.element)?.mounted_at;
                    Some(l.driver.tick(now.since(mounted_at)))
                }),
            };
            match next {
                Some(v) if v.is_finite() => slot.current = v,
                Some(_) => {
                    return Err(KineticError::evaluation(
                        "binding produced a non-finite value",
                    ));
                }
                None => report.held += 1,
            }
        }

        tracing::trace!(
            fired = report.fired.len(),
            reset = report.reset.len(),
            held = report.held,
            "tick"
        );
        Ok(report)
    }

    // ---- queries ----

    /// Latest progress; `None` for a stale handle or when geometry was missing.
    pub fn progress(&self, handle: ProgressHandle) -> Option<f64> {
        self.progress.get(handle)?.current
    }

    pub fn value(&self, handle: ValueHandle) -> Option<Value> {
        self.values.get(handle).map(|v| v.current)
    }

    pub fn trigger_state(&self, handle: TriggerHandle) -> Option<TriggerState> {
        self.triggers.get(handle).map(|t| t.trigger.state())
    }

    pub fn fire_count(&self, handle: TriggerHandle) -> Option<u32> {
        self.triggers.get(handle).map(|t| t.trigger.fire_count())
    }

    /// Start time of the trigger's current run; `None` while idle or stale.
    pub fn fired_at(&self, handle: TriggerHandle) -> Option<Millis> {
        self.triggers.get(handle)?.trigger.fired_at()
    }

    /// Scheduled child start times of every sequence on `trigger`, in binding order.
    pub fn sequence_starts(&self, trigger: TriggerHandle) -> Option<Vec<Vec<Millis>>> {
        let slot = self.triggers.get(trigger)?;
        Some(
            slot.sequences
                .iter()
                .filter_map(|id| self.sequences.get(*id))
                .filter(|s| s.trigger == trigger)
                .map(|s| s.sequencer.start_times().map(<[Millis]>::to_vec).unwrap_or_default())
                .collect(),
        )
    }

    pub fn is_mounted(&self, element: ElementId) -> bool {
        self.elements.contains_key(element)
    }

    pub fn element_label(&self, element: ElementId) -> Option<&str> {
        self.elements.get(element).map(|e| e.label.as_str())
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            elements: self.elements.len(),
            progress_sources: self.progress.len(),
            values: self.values.len(),
            triggers: self.triggers.len(),
            sequences: self.sequences.len(),
            loops: self.loops.len(),
        }
    }

    fn require_element(&self, element: ElementId) -> KineticResult<&ElementSlot> {
        self.elements
            .get(element)
            .ok_or_else(|| KineticError::config("unknown element handle"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/motion.rs"]
mod tests;
