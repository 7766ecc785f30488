//! Timeline driver: owns a flattened plan and scrubs it.
//!
//! Flow:
//! - `PlayerBuilder::build` runs every `Sequence::define`, combines the roots
//!   and hands the tree to `SequencePlayer`.
//! - The tree is flattened once into an arena of leaves plus a start-sorted
//!   plan of `PlanEntry` values that index into it.
//! - An initialization pass captures every leaf's start state, then restores
//!   the pre-timeline state.
//! - `seek_to` and `tick` both go through one seek routine: revert what has
//!   not started, apply what has finished, evaluate what is in progress.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::audio::{AudioSync, AudioTrack};
use crate::composite::CompositeStateChange;
use crate::config::PlayerConfig;
use crate::error::Result;
use crate::events::{EventLog, PlayerEvent};
use crate::ids::{LeafId, LeafIdAllocator};
use crate::sequence::{CombineMode, Sequence};
use crate::state_change::{AnimatedStateChange, Leaf, StateChange};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Built, never played.
    Ready,
    Playing,
    Paused,
    /// Reached the end during playback, or was asked to play from the end.
    Finished,
}

/// One leaf placed on the absolute timeline.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub leaf: LeafId,
    pub start: f64,
    pub end: f64,
}

pub struct SequencePlayer {
    leaves: Vec<Leaf>,
    plan: Vec<PlanEntry>,
    total: f64,
    current_time: f64,
    speed: f64,
    volume_db: f64,
    state: PlaybackState,
    audio: AudioSync,
    events: EventLog,
    finished_observers: Vec<Box<dyn FnMut()>>,
}

impl std::fmt::Debug for SequencePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequencePlayer")
            .field("leaves", &self.leaves.len())
            .field("total", &self.total)
            .field("current_time", &self.current_time)
            .field("speed", &self.speed)
            .field("state", &self.state)
            .field("audio", &self.audio)
            .finish_non_exhaustive()
    }
}

impl SequencePlayer {
    /// Build a player directly from a root composite.
    pub fn new(root: CompositeStateChange, config: PlayerConfig) -> Result<Self> {
        config.validate()?;
        let audio = AudioSync::new(config.audio_drift_tolerance);
        Ok(Self::assemble(root, &config, audio, Vec::new()))
    }

    fn assemble(
        root: CompositeStateChange,
        config: &PlayerConfig,
        mut audio: AudioSync,
        finished_observers: Vec<Box<dyn FnMut()>>,
    ) -> Self {
        let total = root.duration();
        let mut ids = LeafIdAllocator::new();
        let mut leaves = Vec::new();
        let mut plan = Vec::new();
        for (leaf, start) in root.into_plan(0.0) {
            let end = start + leaf.duration();
            plan.push(PlanEntry {
                leaf: ids.alloc(),
                start,
                end,
            });
            leaves.push(leaf);
        }

        let speed = sanitize_speed(config.playback_speed);
        audio.set_pitch(speed);
        let volume_db = audio.set_volume_db(config.volume_db);

        let mut player = Self {
            leaves,
            plan,
            total,
            current_time: 0.0,
            speed,
            volume_db,
            state: PlaybackState::Ready,
            audio,
            events: EventLog::with_limit(config.max_buffered_events),
            finished_observers,
        };
        player.capture_start_states();

        let start = if config.start_from < 0.0 {
            total
        } else {
            config.start_from.min(total)
        };
        player.apply_seek(start);
        player.current_time = start;
        debug!(
            "player ready: {} leaves, {:.3}s total, starting at {:.3}s",
            player.leaves.len(),
            total,
            start
        );

        if config.auto_play && start < total && speed > 0.0 {
            player.play();
        }
        player
    }

    /// Record each leaf's start while applying end states forward, so later
    /// leaves on the same property start where earlier ones finish. Then undo
    /// everything in reverse.
    fn capture_start_states(&mut self) {
        for entry in &self.plan {
            let leaf = &mut self.leaves[entry.leaf.index()];
            leaf.record_start_state();
            leaf.apply_end_state();
        }
        for entry in self.plan.iter().rev() {
            self.leaves[entry.leaf.index()].revert();
        }
    }

    fn apply_seek(&mut self, time: f64) {
        let live = self.state == PlaybackState::Playing;

        let mut reverted = 0usize;
        for entry in self.plan.iter().rev().filter(|e| e.start > time) {
            self.leaves[entry.leaf.index()].revert();
            reverted += 1;
        }

        let mut completed = 0usize;
        for entry in self.plan.iter().filter(|e| e.end <= time) {
            let leaf = &mut self.leaves[entry.leaf.index()];
            leaf.apply_end_state();
            if let Some(trigger) = leaf.as_trigger_mut() {
                if live {
                    trigger.execute();
                } else if entry.end < time {
                    trigger.mark_triggered_without_executing();
                } else {
                    // Landed exactly on it: armed, whatever the seek path.
                    trigger.revert();
                }
            }
            completed += 1;
        }

        let mut active = 0usize;
        for entry in self.plan.iter().filter(|e| e.start <= time && time < e.end) {
            self.leaves[entry.leaf.index()].evaluate_at_time(time - entry.start);
            active += 1;
        }
        trace!("seek {time:.4}: reverted {reverted}, completed {completed}, active {active}");
    }

    /// Jump to `time`, clamped to `[0, total_duration]`.
    pub fn seek_to(&mut self, time: f64) {
        if time.is_nan() {
            warn!("ignoring seek to NaN");
            return;
        }
        let to = time.clamp(0.0, self.total);
        let from = self.current_time;
        if self.state == PlaybackState::Finished && to < self.total {
            self.set_state(PlaybackState::Paused);
        }
        self.apply_seek(to);
        self.current_time = to;
        self.audio.on_seek(to, self.is_playing());
        self.events.push(PlayerEvent::Seeked { from, to });
    }

    /// Advance by `dt` seconds of host time, scaled by the playback speed.
    pub fn tick(&mut self, dt: f64) {
        if self.state != PlaybackState::Playing {
            return;
        }
        if !dt.is_finite() {
            warn!("ignoring non-finite tick delta {dt}");
            return;
        }
        let next = (self.current_time + dt * self.speed).clamp(0.0, self.total);
        if next >= self.total {
            self.apply_seek(self.total);
            self.current_time = self.total;
            self.finish();
        } else {
            self.apply_seek(next);
            self.current_time = next;
            self.audio.sync(next);
        }
    }

    fn finish(&mut self) {
        self.set_state(PlaybackState::Finished);
        self.audio.on_finish();
        self.events.push(PlayerEvent::Finished {
            time: self.current_time,
        });
        for observer in self.finished_observers.iter_mut() {
            observer();
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            debug!("player state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    /// Start playback from the current time.
    pub fn play(&mut self) {
        if self.state == PlaybackState::Playing {
            return;
        }
        if self.current_time >= self.total {
            self.set_state(PlaybackState::Finished);
            return;
        }
        self.set_state(PlaybackState::Playing);
        self.audio.on_play(self.current_time);
        self.events.push(PlayerEvent::Started);
    }

    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.set_state(PlaybackState::Paused);
        self.audio.on_pause();
        self.events.push(PlayerEvent::Paused);
    }

    pub fn resume(&mut self) {
        if self.state == PlaybackState::Playing {
            return;
        }
        if self.current_time >= self.total {
            self.set_state(PlaybackState::Finished);
            return;
        }
        self.set_state(PlaybackState::Playing);
        self.audio.on_resume(self.current_time);
        self.events.push(PlayerEvent::Resumed);
    }

    pub fn set_playback_speed(&mut self, speed: f64) {
        self.speed = sanitize_speed(speed);
        self.audio.set_pitch(self.speed);
    }

    pub fn playback_speed(&self) -> f64 {
        self.speed
    }

    /// Sets the audio volume, clamped to the accepted dB range.
    pub fn set_volume_db(&mut self, db: f64) {
        self.volume_db = self.audio.set_volume_db(db);
    }

    pub fn volume_db(&self) -> f64 {
        self.volume_db
    }

    /// Register a callback run each time playback reaches the end.
    pub fn on_finished(&mut self, observer: impl FnMut() + 'static) {
        self.finished_observers.push(Box::new(observer));
    }

    /// Drain buffered events, oldest first.
    ///
    /// At most `PlayerConfig::max_buffered_events` are kept between drains;
    /// older ones are discarded and counted by `dropped_events`.
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        self.events.take()
    }

    /// Events discarded since the last `take_events` because the buffer was full.
    pub fn dropped_events(&self) -> u64 {
        self.events.dropped()
    }

    #[inline]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    #[inline]
    pub fn total_duration(&self) -> f64 {
        self.total
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn plan(&self) -> &[PlanEntry] {
        &self.plan
    }

    pub fn leaf(&self, id: LeafId) -> Option<&Leaf> {
        self.leaves.get(id.index())
    }
}

#[inline]
fn sanitize_speed(speed: f64) -> f64 {
    if speed.is_finite() {
        speed.max(0.0)
    } else {
        0.0
    }
}

/// Collects sequences, audio and observers, then builds a `SequencePlayer`.
#[derive(Default)]
pub struct PlayerBuilder {
    config: PlayerConfig,
    sequences: Vec<Box<dyn Sequence>>,
    audio: Option<Box<dyn AudioTrack>>,
    finished_observers: Vec<Box<dyn FnMut()>>,
}

impl PlayerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: PlayerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn sequence(mut self, sequence: impl Sequence + 'static) -> Self {
        self.sequences.push(Box::new(sequence));
        self
    }

    pub fn audio(mut self, track: impl AudioTrack + 'static) -> Self {
        self.audio = Some(Box::new(track));
        self
    }

    pub fn on_finished(mut self, observer: impl FnMut() + 'static) -> Self {
        self.finished_observers.push(Box::new(observer));
        self
    }

    pub fn build(self) -> Result<SequencePlayer> {
        self.config.validate()?;
        let mut root = CompositeStateChange::new();
        for mut sequence in self.sequences {
            let composite = sequence.define()?;
            debug!(
                "defined sequence '{}' ({:.3}s)",
                sequence.name(),
                composite.duration()
            );
            match self.config.combine {
                CombineMode::Series => root.add(composite, 0.0)?,
                CombineMode::Parallel => root.add_at(composite, 0.0)?,
            };
        }
        let mut audio = AudioSync::new(self.config.audio_drift_tolerance);
        if let Some(track) = self.audio {
            audio.attach(track);
        }
        Ok(SequencePlayer::assemble(
            root,
            &self.config,
            audio,
            self.finished_observers,
        ))
    }
}
