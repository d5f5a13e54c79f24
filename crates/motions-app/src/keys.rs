// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

/// Terminal-independent key press. The TUI layer translates backend events
/// into this type before anything in the app crate sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Enter,
    ShiftEnter,
    Esc,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    BackTab,
}

impl Key {
    /// Canonical binding name, e.g. `n`, `esc`, `ctrl+c`, `shift+enter`.
    pub fn name(self) -> String {
        match self {
            Self::Char(' ') => "space".to_owned(),
            Self::Char(c) => c.to_string(),
            Self::Ctrl(c) => format!("ctrl+{}", c.to_ascii_lowercase()),
            Self::Enter => "enter".to_owned(),
            Self::ShiftEnter => "shift+enter".to_owned(),
            Self::Esc => "esc".to_owned(),
            Self::Backspace => "backspace".to_owned(),
            Self::Delete => "delete".to_owned(),
            Self::Left => "left".to_owned(),
            Self::Right => "right".to_owned(),
            Self::Up => "up".to_owned(),
            Self::Down => "down".to_owned(),
            Self::Home => "home".to_owned(),
            Self::End => "end".to_owned(),
            Self::PageUp => "pgup".to_owned(),
            Self::PageDown => "pgdown".to_owned(),
            Self::Tab => "tab".to_owned(),
            Self::BackTab => "shift+tab".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub keys: &'static [&'static str],
    pub help_key: &'static str,
    pub help_desc: &'static str,
}

impl KeyBinding {
    pub const fn new(
        keys: &'static [&'static str],
        help_key: &'static str,
        help_desc: &'static str,
    ) -> Self {
        Self {
            keys,
            help_key,
            help_desc,
        }
    }

    pub fn matches(&self, key: Key) -> bool {
        let name = key.name();
        self.keys.iter().any(|candidate| *candidate == name)
    }
}
