// src/app/shortcuts.rs

//! Keyboard shortcut surface.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// A key without modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
}

/// A key press with modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
            shift: false,
        }
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(Key::Char(c))
        }
    }
}

impl FromStr for KeyPress {
    type Err = AppError;

    /// Parse accelerators such as `ctrl+k`, `alt+shift+f` or `esc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::config(format!("Invalid key binding '{}'", s));

        let lowered = s.trim().to_lowercase();
        let mut parts: Vec<&str> = lowered.split('+').map(str::trim).collect();
        let key = match parts.pop() {
            Some("esc") | Some("escape") => Key::Escape,
            Some("enter") | Some("return") => Key::Enter,
            Some(k) if k.chars().count() == 1 => Key::Char(k.chars().next().ok_or_else(invalid)?),
            _ => return Err(invalid()),
        };

        let mut press = KeyPress::plain(key);
        for modifier in parts {
            match modifier {
                "ctrl" | "control" => press.ctrl = true,
                "alt" | "option" => press.alt = true,
                "shift" => press.shift = true,
                _ => return Err(invalid()),
            }
        }
        Ok(press)
    }
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("ctrl+")?;
        }
        if self.alt {
            f.write_str("alt+")?;
        }
        if self.shift {
            f.write_str("shift+")?;
        }
        match self.key {
            Key::Char(c) => write!(f, "{}", c),
            Key::Escape => f.write_str("esc"),
            Key::Enter => f.write_str("enter"),
        }
    }
}

/// What a recognized key press does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Focus the search input and switch to the directory view
    FocusSearch,
    /// Close the open detail overlay
    DismissDetail,
}

/// Key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcuts {
    focus_search: KeyPress,
}

impl Shortcuts {
    pub fn new(focus_search: KeyPress) -> Self {
        Self { focus_search }
    }

    /// Parse the configured focus accelerator.
    pub fn from_binding(binding: &str) -> Result<Self, AppError> {
        Ok(Self::new(binding.parse()?))
    }

    pub fn resolve(&self, press: KeyPress) -> Option<Shortcut> {
        if press == self.focus_search {
            Some(Shortcut::FocusSearch)
        } else if press.key == Key::Escape {
            Some(Shortcut::DismissDetail)
        } else {
            None
        }
    }
}

impl Default for Shortcuts {
    fn default() -> Self {
        Self::new(KeyPress::ctrl('k'))
    }
}
