//! Property interpolation leaf.

use std::borrow::Cow;

use log::warn;

use crate::ease::{Ease, Transition};
use crate::interp::interpolate;
use crate::state_change::{AnimatedStateChange, StateChange};
use crate::target::TargetRef;
use crate::value::Value;

/// Duration used when a property change is created without one.
pub const DEFAULT_DURATION: f64 = 0.5;

/// Animates one property of one target from its captured start value to `end`.
#[derive(Debug)]
pub struct PropertyStateChange {
    target: TargetRef,
    property: String,
    end: Value,
    duration: f64,
    transition: Transition,
    ease: Ease,
    name: String,
    /// Captured once; `None` until `record_start_state` succeeds.
    start: Option<Value>,
    warned_unsupported: bool,
    warned_dropped: bool,
}

impl PropertyStateChange {
    pub fn new(target: TargetRef, property: impl Into<String>, end: impl Into<Value>) -> Self {
        let property = property.into();
        let end = end.into();
        let name = format!("{}.{} -> {}", target.label(), property, end);
        Self {
            target,
            property,
            end,
            duration: DEFAULT_DURATION,
            transition: Transition::default(),
            ease: Ease::default(),
            name,
            start: None,
            warned_unsupported: false,
            warned_dropped: false,
        }
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn target(&self) -> &TargetRef {
        &self.target
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn end_value(&self) -> &Value {
        &self.end
    }

    pub fn start_value(&self) -> Option<&Value> {
        self.start.as_ref()
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    pub fn ease(&self) -> Ease {
        self.ease
    }

    fn write(&mut self, value: Value) {
        if !self.target.set(&self.property, value)
            && !self.target.is_alive()
            && !self.warned_dropped
        {
            warn!("'{}': target dropped, writes skipped", self.name);
            self.warned_dropped = true;
        }
    }

    fn value_at(&mut self, start: &Value, progress: f64) -> Value {
        match interpolate(start, &self.end, progress, self.transition, self.ease) {
            Some(v) => v,
            None => {
                if !self.warned_unsupported {
                    warn!(
                        "'{}': no interpolation from {:?} to {:?}; snapping to end value",
                        self.name,
                        start.kind(),
                        self.end.kind()
                    );
                    self.warned_unsupported = true;
                }
                self.end.clone()
            }
        }
    }
}

impl StateChange for PropertyStateChange {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    /// Replaces the duration; start and end values are untouched.
    fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
    }
}

/// Without a captured start value a leaf has nothing to restore, so it never
/// writes at all.
impl AnimatedStateChange for PropertyStateChange {
    fn record_start_state(&mut self) {
        if self.start.is_some() {
            return;
        }
        self.start = self.target.get(&self.property);
        if self.start.is_none() {
            warn!(
                "'{}': could not read '{}' from target; start state not captured",
                self.name, self.property
            );
        }
    }

    fn evaluate_at_time(&mut self, elapsed: f64) {
        let Some(start) = self.start.clone() else {
            return;
        };
        if elapsed >= self.duration {
            self.apply_end_state();
            return;
        }
        if elapsed <= 0.0 {
            self.write(start);
            return;
        }
        let value = self.value_at(&start, elapsed / self.duration);
        self.write(value);
    }

    fn apply_end_state(&mut self) {
        if self.start.is_some() {
            self.write(self.end.clone());
        }
    }

    fn revert(&mut self) {
        if let Some(start) = self.start.clone() {
            self.write(start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{shared, PropertyBag, Target};

    #[test]
    fn captures_start_exactly_once() {
        let bag = shared(PropertyBag::new("cube").with("x", 1.0));
        let mut p = PropertyStateChange::new(TargetRef::new(&bag), "x", 9.0);
        p.record_start_state();
        bag.borrow_mut().set("x", Value::f(4.0));
        p.record_start_state();
        assert_eq!(p.start_value(), Some(&Value::f(1.0)));
        p.apply_end_state();
        p.revert();
        assert_eq!(bag.borrow().float("x"), Some(1.0));
    }

    #[test]
    fn boundaries_are_exact() {
        let bag = shared(PropertyBag::new("cube").with("x", 0.3));
        let mut p = PropertyStateChange::new(TargetRef::new(&bag), "x", 0.7)
            .with_transition(Transition::Elastic);
        p.record_start_state();
        p.evaluate_at_time(0.0);
        assert_eq!(bag.borrow().float("x"), Some(0.3));
        p.evaluate_at_time(p.duration());
        assert_eq!(bag.borrow().float("x"), Some(0.7));
    }

    #[test]
    fn default_name_and_timing() {
        let bag = shared(PropertyBag::new("cube").with("x", 0.0));
        let p = PropertyStateChange::new(TargetRef::new(&bag), "x", 2.0);
        assert_eq!(p.name(), "cube.x -> 2");
        assert_eq!(p.duration(), DEFAULT_DURATION);
        assert_eq!(p.transition(), Transition::Cubic);
        assert_eq!(p.ease(), Ease::InOut);
    }

    #[test]
    fn uncaptured_leaf_never_writes() {
        let bag = shared(PropertyBag::new("cube"));
        let mut p = PropertyStateChange::new(TargetRef::new(&bag), "x", 1.0);
        p.record_start_state();
        assert_eq!(p.start_value(), None);
        p.apply_end_state();
        p.evaluate_at_time(0.25);
        p.revert();
        assert!(bag.borrow().props.is_empty());
    }

    #[test]
    fn dropped_target_warns_once() {
        let bag = shared(PropertyBag::new("cube").with("x", 0.0));
        let mut p = PropertyStateChange::new(TargetRef::new(&bag), "x", 1.0);
        p.record_start_state();
        drop(bag);
        p.apply_end_state();
        assert!(p.warned_dropped);
        p.evaluate_at_time(0.25);
        p.revert();
        assert!(p.warned_dropped);
    }

    #[test]
    fn text_snaps_to_end_mid_flight() {
        let bag = shared(PropertyBag::new("label").with("text", "old"));
        let mut p =
            PropertyStateChange::new(TargetRef::new(&bag), "text", "new").with_duration(1.0);
        p.record_start_state();
        p.evaluate_at_time(0.5);
        assert_eq!(bag.borrow().get("text"), Some(Value::from("new")));
        p.revert();
        assert_eq!(bag.borrow().get("text"), Some(Value::from("old")));
    }
}
