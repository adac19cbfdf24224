use crate::playlist::PlaylistEntry;

/// A playable song found in the library: audio file plus lyrics file.
#[derive(Debug, Clone)]
pub struct Song {
    pub entry: PlaylistEntry,
    /// `Artist - Title` from the tags, or the file stem.
    pub display: String,
}

pub(super) fn make_display(title: &str, artist: Option<&str>) -> String {
    match artist.map(str::trim) {
        Some(a) if !a.is_empty() => format!("{} - {}", a, title.trim()),
        _ => title.trim().to_string(),
    }
}
