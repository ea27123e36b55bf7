use crate::{
    animation::tween::{AnimationSpec, Tween},
    animation::value::Value,
    foundation::core::Millis,
    foundation::error::{KineticError, KineticResult},
};

/// Children revealed in declaration order after a parent trigger fires.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequenceSpec {
    pub children: Vec<AnimationSpec>,
    #[serde(default)]
    pub base_delay: Millis,
    #[serde(default)]
    pub stagger: Millis,
}

impl SequenceSpec {
    pub fn new(children: Vec<AnimationSpec>, base_delay: Millis, stagger: Millis) -> Self {
        Self {
            children,
            base_delay,
            stagger,
        }
    }

    pub fn validate(&self) -> KineticResult<()> {
        if self.children.is_empty() {
            return Err(KineticError::config("sequence must have at least one child"));
        }
        for child in &self.children {
            child.validate()?;
        }
        Ok(())
    }
}

/// `start[i] = parent_fire_time + base_delay + i * stagger`, in declaration order.
pub fn schedule<C>(
    parent_fire_time: Millis,
    children: &[C],
    base_delay: Millis,
    stagger: Millis,
) -> Vec<Millis> {
    let first = parent_fire_time.saturating_add(base_delay);
    (0..children.len() as u64)
        .map(|i| first.saturating_add(stagger.saturating_mul(i)))
        .collect()
}

/// A compiled sequence and its pending schedule, if the parent has fired.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequencer {
    children: Vec<Tween>,
    base_delay: Millis,
    stagger: Millis,
    starts: Option<Vec<Millis>>,
}

impl Sequencer {
    pub fn new(spec: &SequenceSpec) -> KineticResult<Self> {
        if spec.children.is_empty() {
            return Err(KineticError::config("sequence must have at least one child"));
        }
        let children = spec
            .children
            .iter()
            .map(AnimationSpec::compile)
            .collect::<KineticResult<Vec<_>>>()?;
        Ok(Self {
            children,
            base_delay: spec.base_delay,
            stagger: spec.stagger,
            starts: None,
        })
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Schedule every child from a parent fire; a re-fire restarts from zero.
    pub fn on_fire(&mut self, at: Millis) {
        self.starts = Some(schedule(at, &self.children, self.base_delay, self.stagger));
    }

    /// Drop any pending starts and return children to their initial values.
    ///
    /// Returns how many children had not started yet at `now`.
    pub fn cancel(&mut self, now: Millis) -> usize {
        match self.starts.take() {
            Some(starts) => starts.iter().filter(|&&s| s > now).count(),
            None => 0,
        }
    }

    pub fn start_times(&self) -> Option<&[Millis]> {
        self.starts.as_deref()
    }

    pub fn sample(&self, index: usize, now: Millis) -> Option<Value> {
        let child = self.children.get(index)?;
        let value = match self.starts.as_ref().and_then(|s| s.get(index)) {
            Some(&start) if now >= start => child.sample(now.since(start)),
            _ => child.initial(),
        };
        Some(value)
    }

    pub fn sample_all(&self, now: Millis) -> Vec<Value> {
        (0..self.children.len())
            .filter_map(|i| self.sample(i, now))
            .collect()
    }

    /// True once every scheduled child has reached its last keyframe.
    pub fn is_settled(&self, now: Millis) -> bool {
        match &self.starts {
            None => false,
            Some(starts) => starts
                .iter()
                .zip(&self.children)
                .all(|(&s, c)| now >= s && c.is_finished(now.since(s))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/sequencer.rs"]
mod tests;
