use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::error::AudioError;

use super::sink::{create_sink_at, probe_duration};
use super::types::{AudioOutput, NOT_STREAMING, PositionFeed, clamp_volume};

const LOG_TARGET: &str = "singalong::audio";

/// [`AudioOutput`] backed by the default `rodio` output device.
///
/// Seeking rebuilds the sink from the file, which keeps the implementation
/// independent of per-format seek support.
pub struct RodioOutput {
    stream: OutputStream,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    paused: bool,
    volume: f32,
    /// Sink position when streaming last (re)started.
    base: Duration,
}

impl RodioOutput {
    /// Open the default output device.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::NoDevice`] when no output stream can be opened.
    pub fn open(volume: f32) -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when the stream is dropped; that would garble
        // the raw-mode terminal.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            path: None,
            paused: false,
            volume: clamp_volume(volume),
            base: Duration::ZERO,
        })
    }
}

impl PositionFeed for RodioOutput {
    fn position_millis(&self) -> i64 {
        let Some(sink) = self.sink.as_ref() else {
            return NOT_STREAMING;
        };
        if self.paused || sink.is_paused() || sink.empty() {
            return NOT_STREAMING;
        }
        let played = sink.get_pos().saturating_sub(self.base);
        i64::try_from(played.as_millis()).unwrap_or(i64::MAX)
    }

    fn play_from(&mut self, seconds: f64) {
        let Some(path) = self.path.clone() else {
            return;
        };
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let start_at = Duration::try_from_secs_f64(seconds.max(0.0)).unwrap_or(Duration::ZERO);
        match create_sink_at(&self.stream, &path, start_at) {
            Ok(sink) => {
                sink.set_volume(self.volume);
                if !self.paused {
                    sink.play();
                }
                self.sink = Some(sink);
                self.base = Duration::ZERO;
                debug!(target: LOG_TARGET, "playing {} from {:.2}s", path.display(), seconds);
            }
            Err(e) => {
                warn!(target: LOG_TARGET, "failed to restart playback: {}", e);
            }
        }
    }
}

impl AudioOutput for RodioOutput {
    fn load(&mut self, path: &Path) -> Result<f64, AudioError> {
        self.stop();
        let duration = probe_duration(path)?;
        self.path = Some(path.to_path_buf());
        self.paused = false;
        debug!(
            target: LOG_TARGET,
            "loaded {} ({:.2}s)",
            path.display(),
            duration.as_secs_f64()
        );
        Ok(duration.as_secs_f64())
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
        self.paused = true;
    }

    fn unpause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            self.base = sink.get_pos();
            sink.play();
        }
        self.paused = false;
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.base = Duration::ZERO;
    }

    fn set_volume(&mut self, volume: f32) -> f32 {
        self.volume = clamp_volume(volume);
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.volume);
        }
        self.volume
    }

    fn volume(&self) -> f32 {
        self.volume
    }
}
