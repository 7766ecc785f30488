//! Player configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};
use crate::events::DEFAULT_EVENT_LIMIT;
use crate::sequence::CombineMode;

/// Startup and playback settings for a `SequencePlayer`.
///
/// Every field has a default, so partial JSON such as `{"auto_play": false}`
/// is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial seek position in seconds. Negative means "the end".
    pub start_from: f64,
    pub playback_speed: f64,
    pub auto_play: bool,
    pub combine: CombineMode,
    /// Allowed audio/timeline drift in seconds before audio is re-seeked.
    pub audio_drift_tolerance: f64,
    pub volume_db: f64,
    /// Undrained events kept before the oldest are dropped; 0 disables the
    /// buffer.
    pub max_buffered_events: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_from: 0.0,
            playback_speed: 1.0,
            auto_play: true,
            combine: CombineMode::Series,
            audio_drift_tolerance: 0.05,
            volume_db: 0.0,
            max_buffered_events: DEFAULT_EVENT_LIMIT,
        }
    }
}

impl PlayerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| TimelineError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("start_from", self.start_from),
            ("playback_speed", self.playback_speed),
            ("audio_drift_tolerance", self.audio_drift_tolerance),
            ("volume_db", self.volume_db),
        ];
        if let Some((field, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TimelineError::Config(format!("{field} must be finite, got {value}")));
        }
        if self.audio_drift_tolerance < 0.0 {
            return Err(TimelineError::Config(format!(
                "audio_drift_tolerance must be >= 0, got {}",
                self.audio_drift_tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg =
            PlayerConfig::from_json_str(r#"{ "auto_play": false, "combine": "Parallel" }"#)
                .unwrap();
        assert!(!cfg.auto_play);
        assert_eq!(cfg.combine, CombineMode::Parallel);
        assert_eq!(cfg.playback_speed, 1.0);
        assert_eq!(cfg.audio_drift_tolerance, 0.05);
        assert_eq!(cfg.max_buffered_events, DEFAULT_EVENT_LIMIT);
    }

    #[test]
    fn rejects_negative_tolerance() {
        let err = PlayerConfig::from_json_str(r#"{ "audio_drift_tolerance": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TimelineError::Config(_)));
        assert!(PlayerConfig::from_json_str("{ not json").is_err());
    }
}
