use std::time::Instant;

use crate::audio::PositionFeed;

/// Transport state of one song.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    total: f64,
    seek_offset: f64,
    epoch: Instant,
    paused: bool,
    /// Last value reported while playing; keeps time from running backwards
    /// when the source switches between wall clock and feed.
    floor: f64,
}

impl PlaybackClock {
    /// An unloaded clock (duration zero, reports 0.0).
    pub fn new(now: Instant) -> Self {
        Self {
            total: 0.0,
            seek_offset: 0.0,
            epoch: now,
            paused: false,
            floor: 0.0,
        }
    }

    /// Reset for a freshly loaded song of `total` seconds.
    pub fn load(&mut self, total: f64, now: Instant) {
        self.total = total.max(0.0);
        self.seek_offset = 0.0;
        self.epoch = now;
        self.paused = false;
        self.floor = 0.0;
    }

    pub fn total_duration(&self) -> f64 {
        self.total
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current playback time in seconds, within `[0, total]`.
    pub fn current_time(&mut self, feed: &impl PositionFeed, now: Instant) -> f64 {
        if self.paused {
            return self.seek_offset;
        }

        let millis = feed.position_millis();
        let raw = if millis >= 0 {
            self.seek_offset + millis as f64 / 1000.0
        } else {
            self.seek_offset + now.saturating_duration_since(self.epoch).as_secs_f64()
        };

        let time = self.clamp(raw).max(self.floor);
        self.floor = time;
        time
    }

    /// Freeze the clock at the current time.
    pub fn pause(&mut self, feed: &impl PositionFeed, now: Instant) {
        if self.paused {
            return;
        }
        self.seek_offset = self.current_time(feed, now);
        self.paused = true;
    }

    /// Continue from the frozen time.
    pub fn resume(&mut self, now: Instant) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.epoch = now;
        self.floor = self.seek_offset;
    }

    /// Jump to `target` seconds (clamped) and restart the feed there.
    ///
    /// Works in both paused and playing states; the paused flag is kept.
    /// Returns the applied target.
    pub fn seek(&mut self, target: f64, feed: &mut impl PositionFeed, now: Instant) -> f64 {
        let target = self.clamp(target);
        self.seek_offset = target;
        self.epoch = now;
        self.floor = target;
        feed.play_from(target);
        target
    }

    fn clamp(&self, seconds: f64) -> f64 {
        if seconds.is_nan() {
            return 0.0;
        }
        seconds.clamp(0.0, self.total)
    }
}
