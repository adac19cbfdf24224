//! Helpers for building `rodio` sinks and probing file durations.
//!
//! Sinks are always created paused at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::AudioError;

fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>, AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<Sink, AudioError> {
    // `skip_duration` is the seeking primitive; Duration::ZERO is fine.
    let source = open_decoder(path)?.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}

/// Determine the duration of an audio file.
///
/// Tag/property parsing via `lofty` is tried first since it does not decode
/// audio; the decoder's own estimate is the fallback. A file that decodes but
/// reports no duration yields zero.
pub(super) fn probe_duration(path: &Path) -> Result<Duration, AudioError> {
    if let Ok(tagged) = lofty::read_from_path(path) {
        let duration = tagged.properties().duration();
        if !duration.is_zero() {
            return Ok(duration);
        }
    }

    let decoder = open_decoder(path)?;
    Ok(decoder.total_duration().unwrap_or(Duration::ZERO))
}
