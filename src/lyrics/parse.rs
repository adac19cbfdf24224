use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::model::{LyricLine, Timeline};

const LOG_TARGET: &str = "singalong::lyrics";

/// Parse LRC text into a [`Timeline`].
///
/// Empty lines, `#` comments, header tags such as `[ti:...]` and malformed
/// timestamps are skipped. This never fails; an empty timeline is a valid result.
pub fn parse(text: &str) -> Timeline {
    let mut lines = Vec::new();
    let mut skipped = 0usize;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(line) {
            Some(parsed) => lines.push(parsed),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(target: LOG_TARGET, "skipped {} unparseable lyric lines", skipped);
    }

    Timeline::from_lines(lines)
}

/// Read and parse an LRC file.
///
/// An unreadable file yields an empty timeline; the caller decides how to
/// report "no lyrics".
pub fn load(path: &Path) -> Timeline {
    match fs::read_to_string(path) {
        Ok(text) => parse(&text),
        Err(e) => {
            warn!(target: LOG_TARGET, "failed to read lyrics {}: {}", path.display(), e);
            Timeline::default()
        }
    }
}

fn parse_line(line: &str) -> Option<LyricLine> {
    let rest = line.strip_prefix('[')?;
    let (tag, text) = rest.split_once(']')?;
    let timestamp = parse_timestamp(tag)?;
    Some(LyricLine::new(timestamp, text.trim()))
}

/// Parse `mm:ss` or `mm:ss.xx` into seconds.
fn parse_timestamp(tag: &str) -> Option<f64> {
    let mut fields = tag.split(':');
    let minutes = fields.next()?;
    let seconds = fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    let minutes: u64 = minutes.trim().parse().ok()?;

    let mut sec_parts = seconds.split('.');
    let whole: u64 = sec_parts.next()?.trim().parse().ok()?;
    let hundredths = match sec_parts.next() {
        Some(frac) => parse_hundredths(frac.trim())?,
        None => 0,
    };

    // Minutes too large for the seconds count make the line unparseable.
    let seconds = minutes.checked_mul(60)?.checked_add(whole)?;
    Some(seconds as f64 + f64::from(hundredths) / 100.0)
}

/// Right-pad or truncate the fraction to exactly two digits.
fn parse_hundredths(frac: &str) -> Option<u32> {
    let digits: String = frac.chars().chain(std::iter::repeat('0')).take(2).collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
