//! Map a playback time onto the lyric timeline.
//!
//! Everything here is a pure function of its inputs: no state is kept between
//! queries, so the driver can call these on every tick.

use std::ops::Range;

use crate::lyrics::Timeline;

/// Reference number of lyric lines shown around the active one.
pub const DEFAULT_WINDOW: usize = 7;

/// The active lyric line and how far playback has advanced through it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveLine {
    pub index: usize,
    /// Fraction of the line's time window already played, in `0.0..=1.0`.
    pub progress: f64,
}

/// Find the active line for `current` seconds into a song of `total` seconds.
///
/// Returns `None` only for an empty timeline. Before the first timestamp the
/// first line is active (with zero progress).
pub fn locate(timeline: &Timeline, current: f64, total: f64) -> Option<ActiveLine> {
    let lines = timeline.lines();
    if lines.is_empty() {
        return None;
    }

    // Number of lines that have started; the active one is the last of them.
    let started = lines.partition_point(|l| l.timestamp <= current);
    let index = started.saturating_sub(1);

    let start = lines[index].timestamp;
    let end = lines.get(index + 1).map_or(total, |next| next.timestamp);
    let duration = end - start;

    let progress = if duration <= 0.0 {
        1.0
    } else {
        ((current - start) / duration).clamp(0.0, 1.0)
    };

    Some(ActiveLine { index, progress })
}

/// Split `text` into its sung and upcoming parts.
///
/// The first `floor(chars * progress)` characters are sung.
pub fn split_sung(text: &str, progress: f64) -> (&str, &str) {
    let chars = text.chars().count();
    let sung = (chars as f64 * progress.clamp(0.0, 1.0)).floor() as usize;
    let byte = text
        .char_indices()
        .nth(sung)
        .map_or(text.len(), |(i, _)| i);
    text.split_at(byte)
}

/// Indices of the lines to show for a timeline of `len` lines.
///
/// The window holds up to `size` lines centered on `active`. Near the end it
/// is shifted backwards so it only shrinks when the timeline itself is shorter
/// than `size`.
pub fn visible_window(len: usize, active: usize, size: usize) -> Range<usize> {
    if len == 0 || size == 0 {
        return 0..0;
    }

    let mut start = active.saturating_sub(size / 2);
    let end = (start + size).min(len);
    if end - start < size && start > 0 {
        start = end.saturating_sub(size);
    }
    start..end
}
