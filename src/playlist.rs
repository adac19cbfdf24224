//! Playlists: ordered or shuffled traversal of songs, plus on-disk catalog.
//!
//! A [`Playlist`] is plain in-memory state owned by whoever is playing it.
//! The [`PlaylistCatalog`] persists snapshots of playlists as TOML files.

mod catalog;
mod model;

pub use catalog::{PLAYLISTS_DIR, PlaylistCatalog};
pub use model::*;

#[cfg(test)]
mod tests;
