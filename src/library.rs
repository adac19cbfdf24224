//! Song library: folders of audio files paired with `.lrc` lyrics.

mod model;
mod scan;

pub use model::Song;
pub use scan::{display_title, lyrics_path_for, scan, subfolders};
