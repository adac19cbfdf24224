use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::audio::AudioOutput;
use crate::clock::PlaybackClock;
use crate::config::Settings;
use crate::library;
use crate::locator::{self, ActiveLine};
use crate::lyrics::{self, Timeline};
use crate::playlist::{Playlist, PlaylistEntry};

const LOG_TARGET: &str = "singalong::session";

/// Tunables the session reads on every control and tick.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Seconds moved by one seek step.
    pub seek_step: f64,
    pub volume_step: f32,
    /// A playlist song counts as finished this many seconds before its end.
    pub end_epsilon: f64,
    pub status_ttl: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for SessionSettings {
    fn from(s: &Settings) -> Self {
        Self {
            seek_step: s.controls.seek_seconds as f64,
            volume_step: s.audio.volume_step,
            end_epsilon: Duration::from_millis(s.playback.end_epsilon_ms).as_secs_f64(),
            status_ttl: Duration::from_millis(s.playback.status_ms),
        }
    }
}

/// The song currently loaded into the output.
#[derive(Debug, Clone)]
pub struct LoadedSong {
    pub entry: PlaylistEntry,
    /// Display name from the audio tags, or the file stem.
    pub title: String,
    pub timeline: Timeline,
    pub duration: f64,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    shown_at: Instant,
}

/// Snapshot produced by one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub time: f64,
    pub duration: f64,
    pub paused: bool,
    pub active: Option<ActiveLine>,
}

impl NowPlaying {
    /// Nothing loaded.
    pub fn idle() -> Self {
        Self {
            time: 0.0,
            duration: 0.0,
            paused: false,
            active: None,
        }
    }
}

pub struct Session<A: AudioOutput> {
    output: A,
    clock: PlaybackClock,
    song: Option<LoadedSong>,
    playlist: Option<Playlist>,
    status: Option<StatusMessage>,
    settings: SessionSettings,
}

impl<A: AudioOutput> Session<A> {
    pub fn new(output: A, settings: SessionSettings, now: Instant) -> Self {
        Self {
            output,
            clock: PlaybackClock::new(now),
            song: None,
            playlist: None,
            status: None,
            settings,
        }
    }

    pub fn output(&self) -> &A {
        &self.output
    }

    pub fn song(&self) -> Option<&LoadedSong> {
        self.song.as_ref()
    }

    pub fn playlist(&self) -> Option<&Playlist> {
        self.playlist.as_ref()
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Load `entry` and start playing it from the beginning.
    ///
    /// Returns `false` (with a status message) when the audio cannot be
    /// loaded; the previous song is gone either way.
    pub fn load_song(&mut self, entry: PlaylistEntry, now: Instant) -> bool {
        self.song = None;
        let duration = match self.output.load(&entry.audio) {
            Ok(d) => d,
            Err(e) => {
                warn!(target: LOG_TARGET, "{}", e);
                self.set_status(format!("Cannot play {}", entry.title()), now);
                return false;
            }
        };

        self.clock.load(duration, now);
        let timeline = lyrics::load(&entry.lyrics);
        if timeline.is_empty() {
            self.set_status("No lyrics found", now);
        }

        let title = library::display_title(&entry.audio);
        info!(
            target: LOG_TARGET,
            "now playing {} ({:.1}s, {} lyric lines)",
            title,
            duration,
            timeline.len()
        );
        self.output.play_from(0.0);
        self.song = Some(LoadedSong {
            entry,
            title,
            timeline,
            duration,
        });
        true
    }

    /// Replace the active playlist and play it from its first song.
    pub fn load_playlist(&mut self, mut playlist: Playlist, now: Instant) -> bool {
        playlist.reset();
        let first = playlist.current_entry().cloned();
        let len = playlist.len();
        self.playlist = Some(playlist);

        match first {
            Some(entry) => self.play_entry_or_skip(entry, len, now, Playlist::next),
            None => {
                self.end_playlist(now);
                false
            }
        }
    }

    pub fn next_song(&mut self, now: Instant) -> bool {
        self.step(now, Playlist::next)
    }

    pub fn previous_song(&mut self, now: Instant) -> bool {
        self.step(now, Playlist::previous)
    }

    /// Pause or resume; a no-op without a loaded song.
    pub fn toggle_pause(&mut self, now: Instant) {
        if self.song.is_none() {
            return;
        }
        if self.clock.is_paused() {
            self.clock.resume(now);
            self.output.unpause();
            self.set_status("Playing", now);
        } else {
            self.clock.pause(&self.output, now);
            self.output.pause();
            self.set_status("Paused", now);
        }
    }

    /// Jump to `target` seconds; returns the applied (clamped) position.
    pub fn seek_to(&mut self, target: f64, now: Instant) -> Option<f64> {
        self.song.as_ref()?;
        let applied = self.clock.seek(target, &mut self.output, now);
        debug!(target: LOG_TARGET, "seek to {:.2}s", applied);
        self.set_status(format!("Seek → {}", format_time(applied)), now);
        Some(applied)
    }

    /// Seek relative to the current time by a number of seek steps.
    pub fn seek_by(&mut self, steps: f64, now: Instant) -> Option<f64> {
        self.song.as_ref()?;
        let current = self.clock.current_time(&self.output, now);
        self.seek_to(current + steps * self.settings.seek_step, now)
    }

    /// Flip shuffle on the active playlist; `None` without one.
    pub fn toggle_shuffle(&mut self, now: Instant) -> Option<bool> {
        let on = self.playlist.as_mut()?.toggle_shuffle();
        self.set_status(if on { "Shuffle on" } else { "Shuffle off" }, now);
        Some(on)
    }

    pub fn volume_up(&mut self, now: Instant) -> f32 {
        self.change_volume(self.settings.volume_step, now)
    }

    pub fn volume_down(&mut self, now: Instant) -> f32 {
        self.change_volume(-self.settings.volume_step, now)
    }

    /// Advance the session to `now`.
    ///
    /// Moves on to the next playlist song once the current one is within the
    /// end epsilon of its duration.
    pub fn tick(&mut self, now: Instant) -> NowPlaying {
        if self.song_finished(now) {
            debug!(target: LOG_TARGET, "song finished, advancing");
            self.next_song(now);
        }
        self.snapshot(now)
    }

    /// The status message, if it has not expired yet.
    pub fn status(&self, now: Instant) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|s| now.saturating_duration_since(s.shown_at) < self.settings.status_ttl)
            .map(|s| s.text.as_str())
    }

    fn snapshot(&mut self, now: Instant) -> NowPlaying {
        let Some(song) = self.song.as_ref() else {
            return NowPlaying::idle();
        };

        let time = self.clock.current_time(&self.output, now);
        let active = locator::locate(&song.timeline, time, song.duration);

        NowPlaying {
            time,
            duration: song.duration,
            paused: self.clock.is_paused(),
            active,
        }
    }

    fn song_finished(&mut self, now: Instant) -> bool {
        if self.playlist.is_none() || self.clock.is_paused() {
            return false;
        }
        let Some(duration) = self.song.as_ref().map(|s| s.duration) else {
            return false;
        };
        if duration <= 0.0 {
            return false;
        }
        // Clips shorter than the epsilon have to play to the end.
        let end = if duration > self.settings.end_epsilon {
            duration - self.settings.end_epsilon
        } else {
            duration
        };
        self.clock.current_time(&self.output, now) >= end
    }

    fn step(&mut self, now: Instant, advance: fn(&mut Playlist) -> Option<&PlaylistEntry>) -> bool {
        let Some(playlist) = self.playlist.as_mut() else {
            return false;
        };
        let len = playlist.len();
        let entry = advance(playlist).cloned();

        self.output.stop();
        self.song = None;
        match entry {
            Some(entry) => self.play_entry_or_skip(entry, len, now, advance),
            None => {
                self.end_playlist(now);
                false
            }
        }
    }

    /// Play `entry`, moving on with `advance` past songs that fail to load.
    /// Gives up after trying every song once.
    fn play_entry_or_skip(
        &mut self,
        mut entry: PlaylistEntry,
        attempts: usize,
        now: Instant,
        advance: fn(&mut Playlist) -> Option<&PlaylistEntry>,
    ) -> bool {
        for _ in 0..attempts {
            if self.load_song(entry, now) {
                self.announce_playlist_song(now);
                return true;
            }
            match self.playlist.as_mut().and_then(|p| advance(p).cloned()) {
                Some(next) => entry = next,
                None => break,
            }
        }
        self.output.stop();
        false
    }

    /// `[n/total] title`, prefixed with a marker when shuffled.
    fn announce_playlist_song(&mut self, now: Instant) {
        let (Some(playlist), Some(song)) = (self.playlist.as_ref(), self.song.as_ref()) else {
            return;
        };
        let marker = if playlist.is_shuffled() { "🔀 " } else { "" };
        let text = format!(
            "{marker}[{}/{}] {}",
            playlist.current_index() + 1,
            playlist.len(),
            song.title
        );
        self.set_status(text, now);
    }

    fn end_playlist(&mut self, now: Instant) {
        self.output.stop();
        self.song = None;
        self.set_status("Playlist ended", now);
    }

    fn change_volume(&mut self, delta: f32, now: Instant) -> f32 {
        let volume = self.output.set_volume(self.output.volume() + delta);
        self.set_status(format!("Volume {:.0}%", volume * 100.0), now);
        volume
    }

    fn set_status(&mut self, text: impl Into<String>, now: Instant) {
        self.status = Some(StatusMessage {
            text: text.into(),
            shown_at: now,
        });
    }
}

/// Format seconds as `mm:ss`; negative or NaN input shows `00:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}
