//! Vizij Timeline Core (engine-agnostic)
//!
//! Composable, seekable state-change timelines:
//! - leaves (`PropertyStateChange`, `MethodTriggerStateChange`) mutate host
//!   targets through the `Target` trait
//! - `CompositeStateChange` lays leaves and nested composites out in series,
//!   in parallel or at absolute times, and rescales them proportionally
//! - `SequencePlayer` flattens a tree once and scrubs it in either direction

pub mod audio;
pub mod composite;
pub mod config;
pub mod ease;
pub mod error;
pub mod events;
pub mod ids;
pub mod interp;
pub mod player;
pub mod presets;
pub mod property;
pub mod sequence;
pub mod state_change;
pub mod target;
pub mod timecode;
pub mod trigger;
pub mod value;

// Re-exports for hosts
pub use audio::{AudioSync, AudioTrack};
pub use composite::{CompositeStateChange, Entry, TIME_EPSILON};
pub use config::PlayerConfig;
pub use ease::{ease, Ease, Transition};
pub use error::{Result, TimelineError};
pub use events::{PlayerEvent, DEFAULT_EVENT_LIMIT};
pub use ids::LeafId;
pub use interp::interpolate;
pub use player::{PlanEntry, PlaybackState, PlayerBuilder, SequencePlayer};
pub use property::{PropertyStateChange, DEFAULT_DURATION};
pub use sequence::{CombineMode, FnSequence, Sequence};
pub use state_change::{AnimatedStateChange, Change, Leaf, StateChange};
pub use target::{shared, PropertyBag, SharedTarget, Target, TargetRef};
pub use timecode::{timecode, FRAMES_PER_SECOND};
pub use trigger::MethodTriggerStateChange;
pub use value::{Value, ValueKind};
