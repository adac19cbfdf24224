use std::io::Write;
use std::time::Instant;

use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, warn};

use crate::audio::AudioOutput;
use crate::config;
use crate::playlist::PlaylistCatalog;
use crate::runtime::controls::Control;
use crate::runtime::lyric_feed::LyricFeed;
use crate::session::Session;

const LOG_TARGET: &str = "singalong::runtime";

/// Main loop: tick the session, print lyric changes and apply key presses.
/// Returns `Ok(())` when the user quits.
pub fn run<A: AudioOutput, W: Write>(
    session: &mut Session<A>,
    mut catalog: Option<&mut PlaylistCatalog>,
    settings: &config::Settings,
    feed: &mut LyricFeed<W>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = settings.playback.tick_interval();

    loop {
        let now = Instant::now();
        let playing = session.tick(now);
        feed.update(session, &playing, now)?;

        if !event::poll(tick)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(control) = Control::from_key(&key) else {
            continue;
        };

        debug!(target: LOG_TARGET, "control {:?}", control);
        if apply(control, session, catalog.as_deref_mut(), Instant::now()) {
            return Ok(());
        }
    }
}

/// Apply one control; returns `true` when the player should exit.
fn apply<A: AudioOutput>(
    control: Control,
    session: &mut Session<A>,
    catalog: Option<&mut PlaylistCatalog>,
    now: Instant,
) -> bool {
    match control {
        Control::Quit => {
            return true;
        }
        Control::TogglePause => session.toggle_pause(now),
        Control::SeekBack => {
            session.seek_by(-1.0, now);
        }
        Control::SeekForward => {
            session.seek_by(1.0, now);
        }
        Control::Next => {
            session.next_song(now);
        }
        Control::Previous => {
            session.previous_song(now);
        }
        Control::ToggleShuffle => {
            if session.toggle_shuffle(now).is_some() {
                persist_playlist(session, catalog);
            }
        }
        Control::VolumeUp => {
            session.volume_up(now);
        }
        Control::VolumeDown => {
            session.volume_down(now);
        }
    }
    false
}

/// Save the shuffle flag of the active playlist, if it came from the catalog.
fn persist_playlist<A: AudioOutput>(session: &Session<A>, catalog: Option<&mut PlaylistCatalog>) {
    let (Some(playlist), Some(catalog)) = (session.playlist(), catalog) else {
        return;
    };
    if catalog.get(playlist.name()).is_none() {
        return;
    }
    if let Err(e) = catalog.store(playlist) {
        warn!(target: LOG_TARGET, "failed to save playlist {}: {}", playlist.name(), e);
    }
}
