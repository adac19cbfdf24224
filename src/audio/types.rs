//! Traits describing the audio output as seen by the timing engine.

use std::path::Path;

use crate::error::AudioError;

/// Sentinel returned by [`PositionFeed::position_millis`] when the output is
/// not actively producing audio (paused, stopped, drained or mid-transition).
pub const NOT_STREAMING: i64 = -1;

/// The part of the audio output the playback clock talks to.
pub trait PositionFeed {
    /// Milliseconds played since the output last (re)started streaming, or a
    /// negative value while not streaming.
    fn position_millis(&self) -> i64;

    /// Restart playback of the loaded file from `seconds`.
    fn play_from(&mut self, seconds: f64);
}

/// Full audio output interface used by the session.
pub trait AudioOutput: PositionFeed {
    /// Load a file for playback and return its duration in seconds.
    ///
    /// # Errors
    ///
    /// Returns an [`AudioError`] when the file cannot be opened or decoded.
    fn load(&mut self, path: &Path) -> Result<f64, AudioError>;

    fn pause(&mut self);

    fn unpause(&mut self);

    fn stop(&mut self);

    /// Set the output volume, clamped to `0.0..=1.0`; returns the applied value.
    fn set_volume(&mut self, volume: f32) -> f32;

    fn volume(&self) -> f32;
}

/// Clamp a requested volume into the supported range.
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}
