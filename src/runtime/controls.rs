use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Everything a key press can ask the player to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    TogglePause,
    SeekBack,
    SeekForward,
    Next,
    Previous,
    ToggleShuffle,
    VolumeUp,
    VolumeDown,
    Quit,
}

impl Control {
    pub const ALL: [Control; 9] = [
        Control::TogglePause,
        Control::SeekBack,
        Control::SeekForward,
        Control::Next,
        Control::Previous,
        Control::ToggleShuffle,
        Control::VolumeUp,
        Control::VolumeDown,
        Control::Quit,
    ];

    /// Map a key press to a control. Ctrl+C quits since raw mode swallows SIGINT.
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Control::Quit),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Char('p') | KeyCode::Char(' ') => Some(Control::TogglePause),
            KeyCode::Left => Some(Control::SeekBack),
            KeyCode::Right => Some(Control::SeekForward),
            KeyCode::Char('n') => Some(Control::Next),
            KeyCode::Char('b') => Some(Control::Previous),
            KeyCode::Char('s') => Some(Control::ToggleShuffle),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Control::VolumeUp),
            KeyCode::Char('-') => Some(Control::VolumeDown),
            KeyCode::Char('q') => Some(Control::Quit),
            _ => None,
        }
    }

    pub fn keys(self) -> &'static str {
        match self {
            Control::TogglePause => "p/space",
            Control::SeekBack => "←",
            Control::SeekForward => "→",
            Control::Next => "n",
            Control::Previous => "b",
            Control::ToggleShuffle => "s",
            Control::VolumeUp => "+",
            Control::VolumeDown => "-",
            Control::Quit => "q",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Control::TogglePause => "pause",
            Control::SeekBack => "back",
            Control::SeekForward => "forward",
            Control::Next => "next",
            Control::Previous => "previous",
            Control::ToggleShuffle => "shuffle",
            Control::VolumeUp => "vol+",
            Control::VolumeDown => "vol-",
            Control::Quit => "quit",
        }
    }
}

/// One-line key help, e.g. `p/space pause  ← back ...`.
pub fn controls_text() -> String {
    Control::ALL
        .iter()
        .map(|c| format!("{} {}", c.keys(), c.label()))
        .collect::<Vec<_>>()
        .join("  ")
}
