//! Minute/second/frame time values for authoring delays and absolute times.

/// Frame rate used by `timecode`.
pub const FRAMES_PER_SECOND: u32 = 60;

/// Seconds for `minutes:seconds:frames` at `FRAMES_PER_SECOND`.
#[inline]
pub fn timecode(minutes: u32, seconds: u32, frames: u32) -> f64 {
    f64::from(minutes) * 60.0
        + f64::from(seconds)
        + f64::from(frames) / f64::from(FRAMES_PER_SECOND)
}
