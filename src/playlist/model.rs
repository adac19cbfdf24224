use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// One song of a playlist: an audio file and its lyrics file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub audio: PathBuf,
    pub lyrics: PathBuf,
}

impl PlaylistEntry {
    pub fn new(audio: impl Into<PathBuf>, lyrics: impl Into<PathBuf>) -> Self {
        Self {
            audio: audio.into(),
            lyrics: lyrics.into(),
        }
    }

    /// Both files exist on disk.
    pub fn is_playable(&self) -> bool {
        self.audio.is_file() && self.lyrics.is_file()
    }

    /// Short name for status lines: the audio file stem.
    pub fn title(&self) -> String {
        file_stem(&self.audio)
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// A named list of songs with a cursor and optional shuffle order.
///
/// When shuffle is on, `current_index` is a position in the shuffle order,
/// not in `entries`.
#[derive(Debug, Clone)]
pub struct Playlist {
    name: String,
    entries: Vec<PlaylistEntry>,
    current_index: usize,
    shuffle: bool,
    order: Option<Vec<usize>>,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_entries(name, Vec::new())
    }

    pub fn with_entries(name: impl Into<String>, entries: Vec<PlaylistEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
            current_index: 0,
            shuffle: false,
            order: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    /// The active shuffle permutation, if one has been generated.
    pub fn shuffle_order(&self) -> Option<&[usize]> {
        self.order.as_deref()
    }

    pub fn contains(&self, entry: &PlaylistEntry) -> bool {
        self.entries.contains(entry)
    }

    /// Append a song. Duplicates are allowed.
    pub fn add(&mut self, entry: PlaylistEntry) {
        self.entries.push(entry);
        self.invalidate_order();
    }

    /// Remove the first song equal to `entry`; returns whether one was removed.
    ///
    /// In order mode a removal before the cursor shifts it back so it stays on
    /// the same song. The cursor is then clamped to the last position.
    pub fn remove(&mut self, entry: &PlaylistEntry) -> bool {
        let Some(pos) = self.entries.iter().position(|e| e == entry) else {
            return false;
        };
        self.entries.remove(pos);
        self.invalidate_order();
        if !self.shuffle && pos < self.current_index {
            self.current_index -= 1;
        }
        self.current_index = self
            .current_index
            .min(self.entries.len().saturating_sub(1));
        true
    }

    /// Set shuffle mode without touching the cursor; used when restoring a
    /// saved playlist. The permutation is generated on first use.
    pub fn set_shuffle(&mut self, shuffle: bool) {
        if self.shuffle != shuffle {
            self.shuffle = shuffle;
            self.order = None;
        }
    }

    /// The song under the cursor, or `None` for an empty playlist.
    pub fn current_entry(&mut self) -> Option<&PlaylistEntry> {
        let index = self.resolve(self.current_index)?;
        self.entries.get(index)
    }

    /// Advance the cursor, wrapping to the first song.
    pub fn next(&mut self) -> Option<&PlaylistEntry> {
        if self.entries.is_empty() {
            return None;
        }
        self.current_index = (self.current_index + 1) % self.entries.len();
        self.current_entry()
    }

    /// Move the cursor back, wrapping to the last song.
    pub fn previous(&mut self) -> Option<&PlaylistEntry> {
        if self.entries.is_empty() {
            return None;
        }
        self.current_index = match self.current_index {
            0 => self.entries.len() - 1,
            i => (i - 1).min(self.entries.len() - 1),
        };
        self.current_entry()
    }

    /// Flip shuffle mode and return the new state.
    ///
    /// Turning shuffle on draws a fresh order and starts from its first song.
    /// Turning it off keeps the current song under the cursor.
    pub fn toggle_shuffle(&mut self) -> bool {
        if self.shuffle {
            let current = self.resolve(self.current_index).unwrap_or(0);
            self.shuffle = false;
            self.order = None;
            self.current_index = current;
        } else {
            self.shuffle = true;
            self.regenerate_order();
            self.current_index = 0;
        }
        self.shuffle
    }

    /// Back to the first song; a shuffled playlist also gets a new order.
    pub fn reset(&mut self) {
        self.current_index = 0;
        if self.shuffle {
            self.regenerate_order();
        }
    }

    /// Map a cursor position to an index into `entries`.
    fn resolve(&mut self, position: usize) -> Option<usize> {
        if position >= self.entries.len() {
            return None;
        }
        if !self.shuffle {
            return Some(position);
        }
        if self.order.as_ref().is_none_or(|o| o.len() != self.entries.len()) {
            self.regenerate_order();
        }
        self.order.as_ref().and_then(|o| o.get(position).copied())
    }

    fn regenerate_order(&mut self) {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.shuffle(&mut rand::rng());
        self.order = Some(order);
    }

    fn invalidate_order(&mut self) {
        self.order = None;
    }
}
