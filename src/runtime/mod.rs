use std::env;
use std::io;
use std::path::Path;
use std::time::Instant;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::info;

use crate::audio::RodioOutput;
use crate::config::Settings;
use crate::library;
use crate::logging;
use crate::playlist::{Playlist, PlaylistCatalog, PlaylistEntry};
use crate::session::{Session, SessionSettings};

use self::args::Launch;
use self::lyric_feed::LyricFeed;

mod args;
mod controls;
mod event_loop;
mod lyric_feed;
mod settings;

pub use controls::{Control, controls_text};

const LOG_TARGET: &str = "singalong::runtime";

/// What to start playing once the output is open.
enum Start {
    Song(PlaylistEntry),
    Playlist(Playlist),
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    let log_path = logging::init(&settings.logging);
    info!(target: LOG_TARGET, "starting, log file {:?}", log_path);

    let launch = match args::parse(env::args().skip(1)) {
        Ok(l) => l,
        Err(msg) => {
            eprintln!("singalong: {msg}\n{}", args::USAGE);
            return Err(msg.into());
        }
    };

    let launch = match launch {
        Launch::Help => {
            println!("{}", args::USAGE);
            return Ok(());
        }
        Launch::Song { audio, lyrics } => {
            let entry = PlaylistEntry::new(audio, lyrics);
            return play(&settings, None, Start::Song(entry));
        }
        other => other,
    };

    let library = settings.library.library_dir();
    let mut catalog = PlaylistCatalog::open(&library, &settings.library)?;

    let playlist = match launch {
        Launch::List => {
            for name in catalog.names() {
                let count = catalog.get(&name).map_or(0, Playlist::len);
                println!("{name} ({count} songs)");
            }
            return Ok(());
        }
        Launch::Delete(name) => {
            if catalog.delete(&name)? {
                println!("deleted {name}");
            } else {
                println!("no playlist named {name}");
            }
            return Ok(());
        }
        Launch::Create(name) => {
            if catalog.create(&name)? {
                println!("created {name}");
            } else {
                println!("playlist {name} already exists");
            }
            return Ok(());
        }
        Launch::Add {
            name,
            audio,
            lyrics,
        } => {
            let entry = song_entry(&audio, lyrics.as_deref())?;
            if !entry.is_playable() {
                return Err(format!(
                    "{} or {} does not exist",
                    entry.audio.display(),
                    entry.lyrics.display()
                )
                .into());
            }
            if catalog.add_song(&name, entry)? {
                println!("added {} to {name}", audio.display());
            } else {
                println!("no playlist named {name}");
            }
            return Ok(());
        }
        Launch::Remove {
            name,
            audio,
            lyrics,
        } => {
            let entry = song_entry(&audio, lyrics.as_deref())?;
            if catalog.remove_song(&name, &entry)? {
                println!("removed {} from {name}", audio.display());
            } else {
                println!("{} is not in {name}", audio.display());
            }
            return Ok(());
        }
        Launch::Scan => {
            for name in catalog.scan_library_folders()? {
                println!("created {name}");
            }
            return Ok(());
        }
        Launch::Playlist(name) => catalog
            .get(&name)
            .cloned()
            .ok_or_else(|| format!("no playlist named {name}"))?,
        Launch::Folder { dir, name } => catalog
            .create_from_folder(&dir, name.as_deref())?
            .cloned()
            .ok_or_else(|| format!("no songs with lyrics in {}", dir.display()))?,
        // --library, or no arguments
        _ => catalog
            .create_from_library()?
            .cloned()
            .ok_or_else(|| format!("no songs with lyrics in {}", library.display()))?,
    };

    play(&settings, Some(&mut catalog), Start::Playlist(playlist))
}

/// Absolute entry for a song given on the command line; the lyrics default
/// to the `.lrc` next to the audio file.
fn song_entry(audio: &Path, lyrics: Option<&Path>) -> io::Result<PlaylistEntry> {
    let audio = std::path::absolute(audio)?;
    let lyrics = match lyrics {
        Some(l) => std::path::absolute(l)?,
        None => library::lyrics_path_for(&audio),
    };
    Ok(PlaylistEntry::new(audio, lyrics))
}

fn play(
    settings: &Settings,
    catalog: Option<&mut PlaylistCatalog>,
    start: Start,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = RodioOutput::open(settings.audio.volume)?;
    let now = Instant::now();
    let mut session = Session::new(output, SessionSettings::from(settings), now);

    let started = match start {
        Start::Song(entry) => session.load_song(entry, now),
        Start::Playlist(playlist) => session.load_playlist(playlist, now),
    };
    if !started {
        let reason = session.status(now).unwrap_or("nothing to play").to_string();
        return Err(reason.into());
    }

    enable_raw_mode()?;
    let mut feed = LyricFeed::new(io::stdout().lock());

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        feed.banner(&controls_text())?;
        event_loop::run(&mut session, catalog, settings, &mut feed)
    })();

    disable_raw_mode()?;
    info!(target: LOG_TARGET, "stopped");

    run_result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_entry_defaults_lyrics_next_to_the_audio() {
        let entry = song_entry(Path::new("/music/a.mp3"), None).unwrap();
        assert_eq!(entry, PlaylistEntry::new("/music/a.mp3", "/music/a.lrc"));

        let entry = song_entry(Path::new("/music/a.mp3"), Some(Path::new("/words/a.lrc"))).unwrap();
        assert_eq!(entry.lyrics, Path::new("/words/a.lrc"));
        assert!(entry.audio.is_absolute());
    }
}
