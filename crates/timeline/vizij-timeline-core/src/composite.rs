//! Composition of state changes on a local time axis, and flattening into a
//! start-sorted plan.

use std::borrow::Cow;

use log::{debug, warn};

use crate::error::{Result, TimelineError};
use crate::state_change::{AnimatedStateChange, Change, Leaf, StateChange};

/// Smallest duration a composite can be rescaled to.
pub const TIME_EPSILON: f64 = 0.001;

/// A child with its start offset relative to the owning composite.
#[derive(Debug)]
pub struct Entry {
    pub change: Change,
    pub start: f64,
}

impl Entry {
    #[inline]
    pub fn end(&self) -> f64 {
        self.start + self.change.duration()
    }
}

#[derive(Debug, Default)]
pub struct CompositeStateChange {
    entries: Vec<Entry>,
    current_end: f64,
    name: Option<String>,
}

impl CompositeStateChange {
    pub fn new() -> Self {
        Self::default()
    }

    /// All children one after another.
    pub fn series<I, C>(children: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Change>,
    {
        let mut composite = Self::new();
        for child in children {
            composite.add(child, 0.0)?;
        }
        Ok(composite)
    }

    /// All children starting together at time 0.
    pub fn parallel<I, C>(children: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Change>,
    {
        let mut composite = Self::new();
        for child in children {
            composite.add_parallel(child, 0.0)?;
        }
        Ok(composite)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append after the current end, `delay` seconds later.
    pub fn add(&mut self, child: impl Into<Change>, delay: f64) -> Result<&mut Self> {
        let start = self.current_end + delay;
        self.insert(child.into(), delay, start)
    }

    /// Start alongside the most recently added child, `delay` seconds after it.
    pub fn add_parallel(&mut self, child: impl Into<Change>, delay: f64) -> Result<&mut Self> {
        let anchor = self.entries.last().map_or(0.0, |e| e.start);
        self.insert(child.into(), delay, anchor + delay)
    }

    /// Start at an absolute time on this composite's axis.
    pub fn add_at(&mut self, child: impl Into<Change>, time: f64) -> Result<&mut Self> {
        self.insert(child.into(), time, time)
    }

    fn insert(&mut self, change: Change, requested: f64, start: f64) -> Result<&mut Self> {
        change.validate()?;
        if !requested.is_finite() || !start.is_finite() || start < 0.0 {
            return Err(TimelineError::InvalidStartOffset {
                name: change.name().into_owned(),
                offset: start,
            });
        }
        let entry = Entry { change, start };
        self.current_end = self.current_end.max(entry.end());
        self.entries.push(entry);
        Ok(self)
    }

    #[inline]
    pub fn current_end_time(&self) -> f64 {
        self.current_end
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Leaves with absolute start times, stably sorted by start.
    pub fn flatten(&self, base: f64) -> Vec<(&dyn AnimatedStateChange, f64)> {
        let mut out = Vec::new();
        self.collect_refs(base, &mut out);
        out.sort_by(|a, b| a.1.total_cmp(&b.1));
        out
    }

    fn collect_refs<'a>(&'a self, base: f64, out: &mut Vec<(&'a dyn AnimatedStateChange, f64)>) {
        for entry in &self.entries {
            let at = base + entry.start;
            match &entry.change {
                Change::Property(p) => out.push((p as &dyn AnimatedStateChange, at)),
                Change::Trigger(t) => out.push((t as &dyn AnimatedStateChange, at)),
                Change::Composite(c) => c.collect_refs(at, out),
            }
        }
    }

    /// Consuming flatten: hands ownership of every leaf to the caller.
    pub fn into_plan(self, base: f64) -> Vec<(Leaf, f64)> {
        let mut out = Vec::new();
        self.collect_owned(base, &mut out);
        out.sort_by(|a, b| a.1.total_cmp(&b.1));
        debug!("flattened composite into {} leaves", out.len());
        out
    }

    fn collect_owned(self, base: f64, out: &mut Vec<(Leaf, f64)>) {
        for entry in self.entries {
            let at = base + entry.start;
            match entry.change {
                Change::Property(p) => out.push((Leaf::Property(p), at)),
                Change::Trigger(t) => out.push((Leaf::Trigger(t), at)),
                Change::Composite(c) => c.collect_owned(at, out),
            }
        }
    }
}

impl StateChange for CompositeStateChange {
    fn name(&self) -> Cow<'_, str> {
        match (&self.name, self.entries.first()) {
            (Some(name), _) => Cow::Borrowed(name),
            (None, Some(first)) => {
                Cow::Owned(format!("Composite starting with {}", first.change.name()))
            }
            (None, None) => Cow::Borrowed("Empty Composite"),
        }
    }

    fn duration(&self) -> f64 {
        self.current_end
    }

    /// Scales every offset and child duration so that the composite lasts
    /// `duration` seconds while relative timing is kept.
    fn set_duration(&mut self, duration: f64) {
        if !duration.is_finite() {
            warn!("'{}': ignoring non-finite duration {duration}", self.name());
            return;
        }
        let duration = duration.max(TIME_EPSILON);
        if self.current_end <= 0.0 {
            warn!("'{}': cannot rescale a zero-duration composite", self.name());
            return;
        }
        let scale = duration / self.current_end;
        for entry in &mut self.entries {
            entry.start *= scale;
            let child = entry.change.duration();
            if child > 0.0 {
                entry.change.set_duration(child * scale);
            }
        }
        self.current_end = duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::MethodTriggerStateChange;

    fn noop(name: &str) -> MethodTriggerStateChange {
        MethodTriggerStateChange::new(|| {}).with_name(name)
    }

    #[test]
    fn add_parallel_anchors_on_last_entry_start() {
        let mut c = CompositeStateChange::new();
        c.add(noop("a"), 1.0).unwrap();
        c.add(noop("b"), 2.0).unwrap();
        c.add_parallel(noop("c"), 0.5).unwrap();
        let starts: Vec<f64> = c.entries().iter().map(|e| e.start).collect();
        assert_eq!(starts, vec![1.0, 3.0, 3.5]);
        assert_eq!(c.duration(), 3.5);
    }

    #[test]
    fn rejects_negative_start() {
        let mut c = CompositeStateChange::new();
        let err = c.add_at(noop("early"), -1.0).unwrap_err();
        assert!(matches!(err, TimelineError::InvalidStartOffset { .. }));
        let err = c.add(noop("nan"), f64::NAN).unwrap_err();
        assert!(matches!(err, TimelineError::InvalidStartOffset { .. }));
        assert!(c.is_empty());
    }

    #[test]
    fn default_names() {
        let empty = CompositeStateChange::new();
        assert_eq!(empty.name(), "Empty Composite");
        let c = CompositeStateChange::series([noop("first")]).unwrap();
        assert_eq!(c.name(), "Composite starting with first");
        assert_eq!(c.with_name("intro").name(), "intro");
    }

    #[test]
    fn zero_duration_rescale_is_ignored() {
        let mut c = CompositeStateChange::series([noop("a"), noop("b")]).unwrap();
        c.set_duration(4.0);
        assert_eq!(c.duration(), 0.0);
    }

    #[test]
    fn flatten_is_stable_for_equal_starts() {
        let c = CompositeStateChange::parallel([noop("a"), noop("b"), noop("c")]).unwrap();
        let names: Vec<String> =
            c.flatten(0.0).iter().map(|(l, _)| l.name().into_owned()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
