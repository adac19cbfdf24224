use std::path::{Path, PathBuf};

use lofty::prelude::{Accessor, TaggedFileExt};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::playlist::PlaylistEntry;

use super::model::{Song, make_display};

const LOG_TARGET: &str = "singalong::library";

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// The lyrics file that belongs to `audio`: same folder and stem, `.lrc` extension.
pub fn lyrics_path_for(audio: &Path) -> PathBuf {
    audio.with_extension("lrc")
}

/// Display name of an audio file: `Artist - Title` from its tags, falling
/// back to the tag title alone and then to the file stem.
pub fn display_title(path: &Path) -> String {
    let mut title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "UNKNOWN".to_string());
    let mut artist: Option<String> = None;

    if let Ok(tagged) = lofty::read_from_path(path) {
        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.title().filter(|v| !v.trim().is_empty()) {
                title = v.trim().to_string();
            }
            artist = tag.artist().map(|v| v.trim().to_string());
        }
    }

    make_display(&title, artist.as_deref())
}

/// List the songs directly inside `dir` that have a matching `.lrc` file.
///
/// Audio files without lyrics are skipped. The result is sorted by display
/// name, case-insensitively.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Song> {
    let mut songs: Vec<Song> = Vec::new();

    for entry in WalkDir::new(dir)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file()
            || (!settings.include_hidden && is_hidden(path))
            || !is_audio_file(path, settings)
        {
            continue;
        }

        let lyrics = lyrics_path_for(path);
        if !lyrics.is_file() {
            debug!(target: LOG_TARGET, "no lyrics for {}, skipping", path.display());
            continue;
        }

        songs.push(Song {
            entry: PlaylistEntry::new(path, lyrics),
            display: display_title(path),
        });
    }

    songs.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));
    songs
}

/// Immediate, non-hidden subdirectories of `dir`, sorted by name.
pub fn subfolders(dir: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir() && !is_hidden(e.path()))
        .map(|e| e.into_path())
        .collect();
    dirs.sort();
    dirs
}
