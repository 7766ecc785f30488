//! One-shot trigger leaf.

use std::borrow::Cow;
use std::fmt;

use crate::state_change::{AnimatedStateChange, StateChange};

/// Zero-duration action that fires at most once per forward crossing.
///
/// The player calls `execute` when live playback crosses the trigger and
/// `mark_triggered_without_executing` when a seek jumps past it. Seeking back
/// before it calls `revert`, which re-arms it.
pub struct MethodTriggerStateChange {
    callback: Box<dyn FnMut()>,
    name: String,
    triggered: bool,
}

impl MethodTriggerStateChange {
    pub fn new(callback: impl FnMut() + 'static) -> Self {
        Self {
            callback: Box::new(callback),
            name: "MethodTrigger".to_string(),
            triggered: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Run the callback unless it already ran since the last re-arm.
    pub fn execute(&mut self) {
        if self.triggered {
            return;
        }
        (self.callback)();
        self.triggered = true;
    }

    pub fn mark_triggered_without_executing(&mut self) {
        self.triggered = true;
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }
}

impl fmt::Debug for MethodTriggerStateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTriggerStateChange")
            .field("name", &self.name)
            .field("triggered", &self.triggered)
            .finish_non_exhaustive()
    }
}

impl StateChange for MethodTriggerStateChange {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }

    fn duration(&self) -> f64 {
        0.0
    }

    /// Triggers are instantaneous; rescaling leaves them at zero.
    fn set_duration(&mut self, _duration: f64) {}
}

impl AnimatedStateChange for MethodTriggerStateChange {
    fn record_start_state(&mut self) {}

    fn evaluate_at_time(&mut self, _elapsed: f64) {}

    fn apply_end_state(&mut self) {}

    fn revert(&mut self) {
        self.triggered = false;
    }
}
