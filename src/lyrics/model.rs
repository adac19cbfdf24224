/// One timed lyric line.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    /// Start time in seconds from the beginning of the song.
    pub timestamp: f64,
    pub text: String,
}

impl LyricLine {
    pub fn new(timestamp: f64, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            text: text.into(),
        }
    }
}

/// Lyric lines of one song, sorted by timestamp.
///
/// Equal timestamps keep the order in which they appeared in the source text.
/// A `Timeline` is immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    lines: Vec<LyricLine>,
}

impl Timeline {
    /// Build a timeline from lines in any order (stable sort by timestamp).
    pub fn from_lines(mut lines: Vec<LyricLine>) -> Self {
        lines.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        Self { lines }
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    pub fn get(&self, index: usize) -> Option<&LyricLine> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
