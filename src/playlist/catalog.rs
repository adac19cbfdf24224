use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::LibrarySettings;
use crate::error::CatalogError;
use crate::library;

use super::model::{Playlist, PlaylistEntry};

const LOG_TARGET: &str = "singalong::playlist";

/// Subdirectory of the library holding one file per playlist.
pub const PLAYLISTS_DIR: &str = "playlists";

const PLAYLIST_EXT: &str = "toml";

/// Name of the playlist built from the library root.
const LIBRARY_PLAYLIST: &str = "All Songs";

/// On-disk form of a playlist. The cursor and shuffle order are not saved.
#[derive(Debug, Serialize, Deserialize)]
struct PlaylistRecord {
    name: String,
    #[serde(default)]
    shuffle: bool,
    #[serde(default)]
    songs: Vec<PlaylistEntry>,
}

impl From<&Playlist> for PlaylistRecord {
    fn from(p: &Playlist) -> Self {
        Self {
            name: p.name().to_string(),
            shuffle: p.is_shuffled(),
            songs: p.entries().to_vec(),
        }
    }
}

/// All saved playlists of one song library, keyed by name.
#[derive(Debug)]
pub struct PlaylistCatalog {
    library: PathBuf,
    dir: PathBuf,
    settings: LibrarySettings,
    playlists: BTreeMap<String, Playlist>,
}

impl PlaylistCatalog {
    /// Open (creating if needed) the catalog of the library at `library` and
    /// load every saved playlist.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] when the playlists folder cannot be
    /// created or listed. Individual unreadable playlist files are skipped.
    pub fn open(library: &Path, settings: &LibrarySettings) -> Result<Self, CatalogError> {
        let dir = library.join(PLAYLISTS_DIR);
        fs::create_dir_all(&dir).map_err(|e| CatalogError::io(&dir, e))?;

        let mut catalog = Self {
            library: library.to_path_buf(),
            dir,
            settings: settings.clone(),
            playlists: BTreeMap::new(),
        };
        catalog.load_all()?;
        Ok(catalog)
    }

    pub fn library_dir(&self) -> &Path {
        &self.library
    }

    /// Playlist names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.playlists.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&Playlist> {
        self.playlists.get(name)
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Create and save an empty playlist; `false` when the name is taken.
    ///
    /// # Errors
    ///
    /// Fails on an invalid name or when the file cannot be written.
    pub fn create(&mut self, name: &str) -> Result<bool, CatalogError> {
        validate_name(name)?;
        if self.playlists.contains_key(name) {
            return Ok(false);
        }
        self.store(&Playlist::new(name))?;
        Ok(true)
    }

    /// Delete a playlist and its file; `false` when it does not exist.
    ///
    /// # Errors
    ///
    /// Fails when the playlist file exists but cannot be removed.
    pub fn delete(&mut self, name: &str) -> Result<bool, CatalogError> {
        if self.playlists.remove(name).is_none() {
            return Ok(false);
        }
        let path = self.file_for(name);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| CatalogError::io(&path, e))?;
        }
        info!(target: LOG_TARGET, "deleted playlist {}", name);
        Ok(true)
    }

    /// Append `entry` to a saved playlist and write it; `false` when there is
    /// no playlist called `name`.
    ///
    /// # Errors
    ///
    /// Fails when the playlist cannot be written.
    pub fn add_song(&mut self, name: &str, entry: PlaylistEntry) -> Result<bool, CatalogError> {
        let Some(playlist) = self.playlists.get_mut(name) else {
            return Ok(false);
        };
        info!(target: LOG_TARGET, "adding {} to {}", entry.title(), name);
        playlist.add(entry);
        self.save(name)?;
        Ok(true)
    }

    /// Remove the first matching song from a saved playlist and write it.
    /// Returns `false` when the playlist or the song is not there.
    ///
    /// # Errors
    ///
    /// Fails when the playlist cannot be written.
    pub fn remove_song(&mut self, name: &str, entry: &PlaylistEntry) -> Result<bool, CatalogError> {
        let removed = self
            .playlists
            .get_mut(name)
            .is_some_and(|p| p.remove(entry));
        if removed {
            info!(target: LOG_TARGET, "removed {} from {}", entry.title(), name);
            self.save(name)?;
        }
        Ok(removed)
    }

    /// Insert or replace `playlist` and write it to disk.
    ///
    /// # Errors
    ///
    /// Fails on an invalid name, a path that is not valid UTF-8, or a write error.
    pub fn store(&mut self, playlist: &Playlist) -> Result<(), CatalogError> {
        validate_name(playlist.name())?;
        self.playlists
            .insert(playlist.name().to_string(), playlist.clone());
        self.save(playlist.name())
    }

    /// Write the named playlist to disk; a no-op for unknown names.
    ///
    /// # Errors
    ///
    /// Fails when the playlist cannot be serialized or written.
    pub fn save(&self, name: &str) -> Result<(), CatalogError> {
        let Some(playlist) = self.playlists.get(name) else {
            return Ok(());
        };

        let record = PlaylistRecord::from(playlist);
        let text = toml::to_string_pretty(&record).map_err(|source| CatalogError::Serialize {
            name: name.to_string(),
            source,
        })?;

        let path = self.file_for(name);
        fs::write(&path, text).map_err(|e| CatalogError::io(&path, e))?;
        debug!(target: LOG_TARGET, "saved playlist {} to {}", name, path.display());
        Ok(())
    }

    /// Build, store and return a playlist of every song in `folder`.
    ///
    /// The name defaults to the folder name. Returns `None` when the folder
    /// does not exist or holds no audio file with matching lyrics.
    ///
    /// # Errors
    ///
    /// Fails when the resulting playlist cannot be saved.
    pub fn create_from_folder(
        &mut self,
        folder: &Path,
        name: Option<&str>,
    ) -> Result<Option<&Playlist>, CatalogError> {
        if !folder.is_dir() {
            return Ok(None);
        }

        let name = match name {
            Some(n) => n.to_string(),
            None => folder
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| LIBRARY_PLAYLIST.to_string()),
        };

        let entries: Vec<PlaylistEntry> = library::scan(folder, &self.settings)
            .into_iter()
            .map(|song| song.entry)
            .collect();
        if entries.is_empty() {
            return Ok(None);
        }

        info!(
            target: LOG_TARGET,
            "created playlist {} with {} songs from {}",
            name,
            entries.len(),
            folder.display()
        );
        self.store(&Playlist::with_entries(name.as_str(), entries))?;
        Ok(self.playlists.get(&name))
    }

    /// Build the "All Songs" playlist from the library root.
    ///
    /// # Errors
    ///
    /// Fails when the playlist cannot be saved.
    pub fn create_from_library(&mut self) -> Result<Option<&Playlist>, CatalogError> {
        let library = self.library.clone();
        self.create_from_folder(&library, Some(LIBRARY_PLAYLIST))
    }

    /// Create one playlist per library subfolder; returns the names created.
    ///
    /// # Errors
    ///
    /// Fails on the first playlist that cannot be saved.
    pub fn scan_library_folders(&mut self) -> Result<Vec<String>, CatalogError> {
        let mut created = Vec::new();
        for folder in library::subfolders(&self.library) {
            if folder.file_name().is_some_and(|n| n == PLAYLISTS_DIR) {
                continue;
            }
            if let Some(playlist) = self.create_from_folder(&folder, None)? {
                created.push(playlist.name().to_string());
            }
        }
        Ok(created)
    }

    fn file_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{PLAYLIST_EXT}"))
    }

    fn load_all(&mut self) -> Result<(), CatalogError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| CatalogError::io(&self.dir, e))?;

        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PLAYLIST_EXT) {
                continue;
            }
            match read_playlist(&path) {
                Ok(playlist) => {
                    debug!(
                        target: LOG_TARGET,
                        "loaded playlist {} ({} songs)",
                        playlist.name(),
                        playlist.len()
                    );
                    self.playlists.insert(playlist.name().to_string(), playlist);
                }
                Err(e) => warn!(target: LOG_TARGET, "skipping playlist file: {}", e),
            }
        }
        Ok(())
    }
}

/// Read one playlist file, dropping songs whose files have disappeared.
///
/// A playlist left with no songs is still returned.
fn read_playlist(path: &Path) -> Result<Playlist, CatalogError> {
    let text = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    let record: PlaylistRecord = toml::from_str(&text).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let total = record.songs.len();
    let songs: Vec<PlaylistEntry> = record
        .songs
        .into_iter()
        .filter(PlaylistEntry::is_playable)
        .collect();
    if songs.len() < total {
        info!(
            target: LOG_TARGET,
            "playlist {}: dropped {} missing songs",
            record.name,
            total - songs.len()
        );
    }

    let mut playlist = Playlist::with_entries(record.name, songs);
    playlist.set_shuffle(record.shuffle);
    Ok(playlist)
}

fn validate_name(name: &str) -> Result<(), CatalogError> {
    let bad = name.trim().is_empty()
        || name.contains(['/', '\\'])
        || name == "."
        || name == "..";
    if bad {
        return Err(CatalogError::InvalidName(name.to_string()));
    }
    Ok(())
}
