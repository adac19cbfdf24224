//! Playback session: one loaded song, its lyric timeline and an optional
//! playlist, driven by controls and a periodic [`Session::tick`].

mod model;

pub use model::*;
