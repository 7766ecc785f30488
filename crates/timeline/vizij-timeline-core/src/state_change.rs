//! State change contracts and the tree node types built from them.
//!
//! - `StateChange`: identity + timing (leaves and composites)
//! - `AnimatedStateChange`: the four scrubbing operations (leaves only)
//! - `Change`: a node of a composition tree
//! - `Leaf`: a flattened, directly animatable node

use std::borrow::Cow;

use crate::composite::CompositeStateChange;
use crate::error::{Result, TimelineError};
use crate::property::PropertyStateChange;
use crate::trigger::MethodTriggerStateChange;

pub trait StateChange {
    fn name(&self) -> Cow<'_, str>;

    /// Duration in seconds.
    fn duration(&self) -> f64;

    /// Rescale in place. Leaves replace their own duration; composites scale
    /// their children proportionally.
    fn set_duration(&mut self, duration: f64);

    fn with_duration(mut self, duration: f64) -> Self
    where
        Self: Sized,
    {
        self.set_duration(duration);
        self
    }
}

/// Operations the player uses to scrub a leaf back and forth.
///
/// `record_start_state` must run before `apply_end_state`/`evaluate_at_time`
/// and only captures the first time it is called.
pub trait AnimatedStateChange: StateChange {
    fn record_start_state(&mut self);

    /// `elapsed` is leaf-local time; values in `[0, duration)` are in progress.
    fn evaluate_at_time(&mut self, elapsed: f64);

    fn apply_end_state(&mut self);

    fn revert(&mut self);
}

/// A node of a composition tree.
#[derive(Debug)]
pub enum Change {
    Property(PropertyStateChange),
    Trigger(MethodTriggerStateChange),
    Composite(CompositeStateChange),
}

impl Change {
    /// Construction-time checks run by every composite add.
    pub(crate) fn validate(&self) -> Result<()> {
        let duration = self.duration();
        if !duration.is_finite() || duration < 0.0 {
            return Err(TimelineError::InvalidDuration {
                name: self.name().into_owned(),
                duration,
            });
        }
        if let Change::Property(p) = self {
            if !p.target().is_alive() {
                return Err(TimelineError::DetachedTarget {
                    name: p.name().into_owned(),
                });
            }
        }
        Ok(())
    }
}

impl StateChange for Change {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Change::Property(p) => p.name(),
            Change::Trigger(t) => t.name(),
            Change::Composite(c) => c.name(),
        }
    }

    fn duration(&self) -> f64 {
        match self {
            Change::Property(p) => p.duration(),
            Change::Trigger(t) => t.duration(),
            Change::Composite(c) => c.duration(),
        }
    }

    fn set_duration(&mut self, duration: f64) {
        match self {
            Change::Property(p) => p.set_duration(duration),
            Change::Trigger(t) => t.set_duration(duration),
            Change::Composite(c) => c.set_duration(duration),
        }
    }
}

impl From<PropertyStateChange> for Change {
    fn from(p: PropertyStateChange) -> Self {
        Change::Property(p)
    }
}

impl From<MethodTriggerStateChange> for Change {
    fn from(t: MethodTriggerStateChange) -> Self {
        Change::Trigger(t)
    }
}

impl From<CompositeStateChange> for Change {
    fn from(c: CompositeStateChange) -> Self {
        Change::Composite(c)
    }
}

impl From<Leaf> for Change {
    fn from(leaf: Leaf) -> Self {
        match leaf {
            Leaf::Property(p) => Change::Property(p),
            Leaf::Trigger(t) => Change::Trigger(t),
        }
    }
}

/// A leaf of a flattened tree.
#[derive(Debug)]
pub enum Leaf {
    Property(PropertyStateChange),
    Trigger(MethodTriggerStateChange),
}

impl Leaf {
    pub fn as_trigger(&self) -> Option<&MethodTriggerStateChange> {
        match self {
            Leaf::Trigger(t) => Some(t),
            Leaf::Property(_) => None,
        }
    }

    pub fn as_trigger_mut(&mut self) -> Option<&mut MethodTriggerStateChange> {
        match self {
            Leaf::Trigger(t) => Some(t),
            Leaf::Property(_) => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyStateChange> {
        match self {
            Leaf::Property(p) => Some(p),
            Leaf::Trigger(_) => None,
        }
    }

    fn as_animated_mut(&mut self) -> &mut dyn AnimatedStateChange {
        match self {
            Leaf::Property(p) => p,
            Leaf::Trigger(t) => t,
        }
    }
}

impl StateChange for Leaf {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Leaf::Property(p) => p.name(),
            Leaf::Trigger(t) => t.name(),
        }
    }

    fn duration(&self) -> f64 {
        match self {
            Leaf::Property(p) => p.duration(),
            Leaf::Trigger(t) => t.duration(),
        }
    }

    fn set_duration(&mut self, duration: f64) {
        self.as_animated_mut().set_duration(duration);
    }
}

impl AnimatedStateChange for Leaf {
    fn record_start_state(&mut self) {
        self.as_animated_mut().record_start_state();
    }

    fn evaluate_at_time(&mut self, elapsed: f64) {
        self.as_animated_mut().evaluate_at_time(elapsed);
    }

    fn apply_end_state(&mut self) {
        self.as_animated_mut().apply_end_state();
    }

    fn revert(&mut self) {
        self.as_animated_mut().revert();
    }
}
