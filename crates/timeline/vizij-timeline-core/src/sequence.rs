//! Caller-defined timelines.

use serde::{Deserialize, Serialize};

use crate::composite::CompositeStateChange;
use crate::error::Result;

/// A unit of authored animation. `define` runs once, when the player is built.
pub trait Sequence {
    fn define(&mut self) -> Result<CompositeStateChange>;

    fn name(&self) -> String {
        "Sequence".to_string()
    }
}

/// How several sequences are laid out on one player's timeline.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombineMode {
    /// One after another, in registration order.
    #[default]
    Series,
    /// All starting at time 0.
    Parallel,
}

/// Adapter so a closure can serve as a sequence.
pub struct FnSequence<F> {
    name: String,
    define: F,
}

impl<F> FnSequence<F> {
    pub fn new(name: impl Into<String>, define: F) -> Self
    where
        F: FnMut() -> Result<CompositeStateChange>,
    {
        Self {
            name: name.into(),
            define,
        }
    }
}

impl<F> Sequence for FnSequence<F>
where
    F: FnMut() -> Result<CompositeStateChange>,
{
    fn define(&mut self) -> Result<CompositeStateChange> {
        (self.define)()
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
