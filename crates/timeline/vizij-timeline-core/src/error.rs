//! Error types for timeline construction and configuration.

use thiserror::Error;

/// Errors raised while building a timeline. Playback itself never fails:
/// seeks clamp and unsupported interpolation snaps to the end value.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimelineError {
    /// A child's duration is negative, NaN or infinite.
    #[error("state change '{name}' has invalid duration {duration}")]
    InvalidDuration { name: String, duration: f64 },

    /// A delay/absolute time is not finite, or places the child before t=0.
    #[error("state change '{name}' would start at invalid offset {offset}")]
    InvalidStartOffset { name: String, offset: f64 },

    /// The leaf's target was dropped before the leaf was added.
    #[error("state change '{name}' targets an object that no longer exists")]
    DetachedTarget { name: String },

    /// A caller-defined sequence failed to build its composite.
    #[error("sequence '{sequence}' failed to define: {reason}")]
    Definition { sequence: String, reason: String },

    /// Player configuration is out of range or could not be parsed.
    #[error("invalid player config: {0}")]
    Config(String),
}

impl TimelineError {
    /// Convenience for `Sequence::define` implementations.
    pub fn definition(sequence: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Definition {
            sequence: sequence.into(),
            reason: reason.into(),
        }
    }
}

/// Timeline result type
pub type Result<T> = core::result::Result<T, TimelineError>;
