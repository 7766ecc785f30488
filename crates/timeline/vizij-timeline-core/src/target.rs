//! Target capability and non-owning target handles.
//!
//! A `Target` is any host object whose properties can be read and written by
//! id. Property leaves hold a `TargetRef`, a weak handle: the host keeps
//! ownership and the timeline silently stops touching a target once it is
//! dropped.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use hashbrown::HashMap;
use log::warn;

use crate::value::Value;

/// Get/set access to named properties on a host object.
pub trait Target {
    fn get(&self, property: &str) -> Option<Value>;
    fn set(&mut self, property: &str, value: Value);

    /// Human-readable label used in default state change names.
    fn label(&self) -> String {
        "target".to_string()
    }
}

/// Shared, owned handle a host keeps for a target.
pub type SharedTarget<T> = Rc<RefCell<T>>;

/// Wrap a target so the timeline can reference it.
pub fn shared<T: Target>(target: T) -> SharedTarget<T> {
    Rc::new(RefCell::new(target))
}

/// Non-owning reference to a target.
#[derive(Clone)]
pub struct TargetRef {
    inner: Weak<RefCell<dyn Target>>,
}

impl TargetRef {
    pub fn new<T: Target + 'static>(target: &SharedTarget<T>) -> Self {
        let rc: Rc<RefCell<dyn Target>> = target.clone();
        Self {
            inner: Rc::downgrade(&rc),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn label(&self) -> String {
        let Some(rc) = self.inner.upgrade() else {
            return "<dropped>".to_string();
        };
        let label = match rc.try_borrow() {
            Ok(t) => t.label(),
            Err(_) => "<busy>".to_string(),
        };
        label
    }

    /// Read a property. `None` when the target is gone, busy, or lacks the property.
    pub fn get(&self, property: &str) -> Option<Value> {
        let rc = self.inner.upgrade()?;
        let target = rc.try_borrow().ok()?;
        target.get(property)
    }

    /// Write a property. Returns `false` when the write could not happen.
    pub fn set(&self, property: &str, value: Value) -> bool {
        let Some(rc) = self.inner.upgrade() else {
            return false;
        };
        let written = match rc.try_borrow_mut() {
            Ok(mut target) => {
                target.set(property, value);
                true
            }
            Err(_) => {
                warn!("target is already borrowed; skipped write to '{property}'");
                false
            }
        };
        written
    }
}

impl fmt::Debug for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetRef")
            .field("label", &self.label())
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Minimal map-backed target, handy for hosts without their own object model
/// and for tests.
#[derive(Clone, Debug, Default)]
pub struct PropertyBag {
    pub name: String,
    pub props: HashMap<String, Value>,
}

impl PropertyBag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            props: HashMap::new(),
        }
    }

    pub fn with(mut self, property: &str, value: impl Into<Value>) -> Self {
        self.props.insert(property.to_string(), value.into());
        self
    }

    pub fn float(&self, property: &str) -> Option<f32> {
        self.props.get(property).and_then(Value::as_float)
    }
}

impl Target for PropertyBag {
    fn get(&self, property: &str) -> Option<Value> {
        self.props.get(property).cloned()
    }

    fn set(&mut self, property: &str, value: Value) {
        self.props.insert(property.to_string(), value);
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
