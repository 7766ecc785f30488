//! Semantic signals emitted by a `SequencePlayer`.
//!
//! Events are buffered on the player and drained by the host with
//! `take_events`, the way a frame loop would forward them to UI or logging.
//! The buffer is bounded: once full, the oldest event is dropped, so a host
//! that never drains only ever holds the most recent ones.

use std::collections::VecDeque;

use log::debug;
use serde::{Deserialize, Serialize};

/// Default number of undrained events kept by a player.
pub const DEFAULT_EVENT_LIMIT: usize = 1024;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlayerEvent {
    Started,
    Paused,
    Resumed,
    Seeked {
        from: f64,
        to: f64,
    },
    /// Emitted once per arrival at the end of the timeline.
    Finished {
        time: f64,
    },
}

/// Buffered player events, oldest first, holding at most `limit`.
///
/// A limit of 0 disables buffering.
#[derive(Clone, Debug)]
pub struct EventLog {
    events: VecDeque<PlayerEvent>,
    limit: usize,
    dropped: u64,
}

impl EventLog {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            events: VecDeque::new(),
            limit,
            dropped: 0,
        }
    }

    pub fn push(&mut self, event: PlayerEvent) {
        if self.limit == 0 {
            return;
        }
        if self.events.len() >= self.limit {
            self.events.pop_front();
            if self.dropped == 0 {
                debug!("event buffer full ({}); dropping oldest events", self.limit);
            }
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    /// Drains every buffered event and resets the drop counter.
    pub fn take(&mut self) -> Vec<PlayerEvent> {
        self.dropped = 0;
        self.events.drain(..).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events discarded since the last `take`.
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_limit(DEFAULT_EVENT_LIMIT)
    }
}
