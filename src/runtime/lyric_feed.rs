use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use crate::audio::AudioOutput;
use crate::locator;
use crate::session::{NowPlaying, Session};

/// Plain-text lyric output.
///
/// The active line is redrawn in place as `> sung|upcoming` while it plays
/// and rewritten without markers once the next line starts. Lines end in
/// `\r\n` because the terminal is in raw mode.
pub struct LyricFeed<W: Write> {
    out: W,
    song: Option<PathBuf>,
    line: Option<usize>,
    /// Text of the line drawn in place and how many characters were sung.
    drawn: Option<(String, usize)>,
    status: Option<String>,
}

impl<W: Write> LyricFeed<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            song: None,
            line: None,
            drawn: None,
            status: None,
        }
    }

    pub fn banner(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{text}\r\n")?;
        self.out.flush()
    }

    /// Print whatever changed since the previous tick.
    pub fn update<A: AudioOutput>(
        &mut self,
        session: &Session<A>,
        playing: &NowPlaying,
        now: Instant,
    ) -> io::Result<()> {
        let mut dirty = false;

        let status = session.status(now);
        if status != self.status.as_deref() {
            if let Some(text) = status {
                self.finish_line()?;
                write!(self.out, "[{text}]\r\n")?;
                dirty = true;
            }
            self.status = status.map(str::to_string);
        }

        let song = session.song();
        let path = song.map(|s| &s.entry.audio);
        if path != self.song.as_ref() {
            self.finish_line()?;
            self.song = path.cloned();
            self.line = None;
            if let Some(s) = song {
                write!(self.out, "\r\n== {} ==\r\n", s.title)?;
                dirty = true;
            }
        }

        let index = playing.active.map(|a| a.index);
        if index != self.line {
            self.finish_line()?;
            self.line = index;
            dirty = true;
        }

        let active = song.zip(playing.active).and_then(|(s, a)| {
            s.timeline.get(a.index).map(|l| (l.text.as_str(), a.progress))
        });
        if let Some((text, progress)) = active {
            let (sung, upcoming) = locator::split_sung(text, progress);
            let count = sung.chars().count();
            if self.drawn.as_ref().is_none_or(|(_, n)| *n != count) {
                write!(self.out, "\r> {sung}|{upcoming}")?;
                self.drawn = Some((text.to_string(), count));
                dirty = true;
            }
        }

        if dirty {
            self.out.flush()?;
        }
        Ok(())
    }

    /// Replace the in-place line with its plain text and move to a new row.
    fn finish_line(&mut self) -> io::Result<()> {
        if let Some((text, _)) = self.drawn.take() {
            write!(self.out, "\r  {text} \r\n")?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{NOT_STREAMING, PositionFeed};
    use crate::error::AudioError;
    use crate::playlist::PlaylistEntry;
    use crate::session::SessionSettings;
    use std::path::Path;
    use std::time::Duration;

    struct Silent;

    impl PositionFeed for Silent {
        fn position_millis(&self) -> i64 {
            NOT_STREAMING
        }
        fn play_from(&mut self, _: f64) {}
    }

    impl AudioOutput for Silent {
        fn load(&mut self, _: &Path) -> Result<f64, AudioError> {
            Ok(60.0)
        }
        fn pause(&mut self) {}
        fn unpause(&mut self) {}
        fn stop(&mut self) {}
        fn set_volume(&mut self, v: f32) -> f32 {
            v
        }
        fn volume(&self) -> f32 {
            1.0
        }
    }

    #[test]
    fn fills_the_active_line_then_prints_it_plain() {
        let dir = tempfile::tempdir().unwrap();
        let lyrics = dir.path().join("song.lrc");
        std::fs::write(&lyrics, "[00:00.00]first\n[00:02.00]second\n").unwrap();

        let t0 = Instant::now();
        let mut session = Session::new(Silent, SessionSettings::default(), t0);
        session.load_song(PlaylistEntry::new(dir.path().join("song.mp3"), lyrics), t0);

        let mut feed = LyricFeed::new(Vec::new());
        for ms in [0u64, 500, 1000, 2100, 2500] {
            let now = t0 + Duration::from_millis(ms);
            let playing = session.tick(now);
            feed.update(&session, &playing, now).unwrap();
        }

        let out = String::from_utf8(feed.into_inner()).unwrap();
        assert_eq!(
            out,
            "\r\n== song ==\r\n\r> |first\r> f|irst\r> fi|rst\r  first \r\n\r> |second"
        );
    }
}
