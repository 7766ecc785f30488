//! Optional audio track kept in step with the timeline.
//!
//! The player never decodes or mixes audio; it only tells a host-provided
//! `AudioTrack` where the timeline is and corrects it when it drifts.

use log::debug;

/// Lowest accepted volume in decibels.
pub const MIN_VOLUME_DB: f64 = -80.0;
/// Highest accepted volume in decibels.
pub const MAX_VOLUME_DB: f64 = 24.0;

/// Host audio playback surface.
pub trait AudioTrack {
    /// Start (or restart) playback from `at` seconds.
    fn play(&mut self, at: f64);
    fn seek(&mut self, to: f64);
    fn stop(&mut self);
    fn set_paused(&mut self, paused: bool);
    fn set_pitch(&mut self, speed: f64);
    fn set_volume_db(&mut self, db: f64);
    /// Current playback position in seconds.
    fn position(&self) -> f64;
    fn is_playing(&self) -> bool;
}

/// Drift-correcting wrapper around an optional track.
pub struct AudioSync {
    track: Option<Box<dyn AudioTrack>>,
    drift_tolerance: f64,
}

impl AudioSync {
    pub fn new(drift_tolerance: f64) -> Self {
        Self {
            track: None,
            drift_tolerance,
        }
    }

    pub fn attach(&mut self, track: Box<dyn AudioTrack>) {
        self.track = Some(track);
    }

    pub fn has_track(&self) -> bool {
        self.track.is_some()
    }

    pub fn drift_tolerance(&self) -> f64 {
        self.drift_tolerance
    }

    /// A user seek: stop, then restart at `time` when the timeline is playing.
    pub fn on_seek(&mut self, time: f64, playing: bool) {
        if let Some(track) = self.track.as_mut() {
            track.stop();
            if playing {
                track.play(time);
            }
        }
    }

    pub fn on_play(&mut self, time: f64) {
        if let Some(track) = self.track.as_mut() {
            track.set_paused(false);
            track.play(time);
        }
    }

    pub fn on_pause(&mut self) {
        if let Some(track) = self.track.as_mut() {
            track.set_paused(true);
        }
    }

    pub fn on_resume(&mut self, time: f64) {
        if let Some(track) = self.track.as_mut() {
            track.set_paused(false);
            if !track.is_playing() {
                track.play(time);
            }
        }
    }

    pub fn on_finish(&mut self) {
        if let Some(track) = self.track.as_mut() {
            track.stop();
        }
    }

    /// Per-tick correction while the timeline is playing.
    pub fn sync(&mut self, time: f64) {
        let tolerance = self.drift_tolerance;
        let Some(track) = self.track.as_mut() else {
            return;
        };
        if !track.is_playing() {
            track.play(time);
            return;
        }
        let drift = (track.position() - time).abs();
        if drift > tolerance {
            debug!("audio drifted {drift:.3}s from timeline; re-seeking to {time:.3}");
            track.seek(time);
        }
    }

    pub fn set_pitch(&mut self, speed: f64) {
        if let Some(track) = self.track.as_mut() {
            track.set_pitch(speed);
        }
    }

    /// Applies `db` clamped to `[MIN_VOLUME_DB, MAX_VOLUME_DB]` and returns it.
    pub fn set_volume_db(&mut self, db: f64) -> f64 {
        let db = clamp_volume_db(db);
        if let Some(track) = self.track.as_mut() {
            track.set_volume_db(db);
        }
        db
    }
}

impl Default for AudioSync {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl std::fmt::Debug for AudioSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioSync")
            .field("attached", &self.has_track())
            .field("drift_tolerance", &self.drift_tolerance)
            .finish()
    }
}

#[inline]
pub fn clamp_volume_db(db: f64) -> f64 {
    if db.is_nan() {
        return 0.0;
    }
    db.clamp(MIN_VOLUME_DB, MAX_VOLUME_DB)
}
