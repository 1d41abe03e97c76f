//! Key mapping from decoded chars to engine commands.

use arrayvec::ArrayVec;

use crate::types::{Command, ConfigError, CONTROL_COUNT, DEFAULT_HELP_KEY, DEFAULT_QUIT_KEY};

/// Char produced for Ctrl-C in raw mode.
pub const CTRL_C: char = '\u{3}';

/// Five movement/interact keys plus the quit and help keys.
///
/// The five keys are, in order: forward, left, backward, right, interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlScheme {
    keys: [char; CONTROL_COUNT],
    quit: char,
    help: char,
}

impl Default for ControlScheme {
    fn default() -> Self {
        Self {
            keys: ['w', 'a', 's', 'd', 'e'],
            quit: DEFAULT_QUIT_KEY,
            help: DEFAULT_HELP_KEY,
        }
    }
}

impl ControlScheme {
    /// Build a scheme from a five-char string such as `"wasde"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_tiles_input::ControlScheme;
    /// use tui_tiles_types::Command;
    ///
    /// let scheme = ControlScheme::new("ikjlo", 'q', 'h').unwrap();
    /// assert_eq!(scheme.command_for('k'), Some(Command::Backward));
    /// assert!(ControlScheme::new("wasd", 'q', 'h').is_err());
    /// ```
    pub fn new(controls: &str, quit: char, help: char) -> Result<Self, ConfigError> {
        let count = controls.chars().count();
        if count != CONTROL_COUNT {
            return Err(ConfigError::ControlCount(count));
        }

        // Control chars are reserved for Ctrl-C and prompt editing.
        if let Some(ch) = controls.chars().chain([quit, help]).find(|c| c.is_control()) {
            return Err(ConfigError::ControlKey(ch));
        }

        let mut keys: ArrayVec<char, CONTROL_COUNT> = ArrayVec::new();
        for ch in controls.chars() {
            if keys.contains(&ch) {
                return Err(ConfigError::DuplicateControl(ch));
            }
            keys.push(ch);
        }

        if keys.contains(&quit) {
            return Err(ConfigError::ReservedKey { role: "quit", key: quit });
        }
        if keys.contains(&help) || help == quit {
            return Err(ConfigError::ReservedKey { role: "help", key: help });
        }

        let keys = keys
            .into_inner()
            .map_err(|v| ConfigError::ControlCount(v.len()))?;
        Ok(Self { keys, quit, help })
    }

    /// Same as [`ControlScheme::new`] with the default quit and help keys.
    pub fn from_controls(controls: &str) -> Result<Self, ConfigError> {
        Self::new(controls, DEFAULT_QUIT_KEY, DEFAULT_HELP_KEY)
    }

    pub fn keys(&self) -> [char; CONTROL_COUNT] {
        self.keys
    }

    pub fn quit_key(&self) -> char {
        self.quit
    }

    pub fn help_key(&self) -> char {
        self.help
    }

    /// Command bound to `key`. Ctrl-C always quits.
    pub fn command_for(&self, key: char) -> Option<Command> {
        if key == self.quit || key == CTRL_C {
            return Some(Command::Quit);
        }
        if key == self.help {
            return Some(Command::Help);
        }
        let [forward, left, backward, right, interact] = self.keys;
        match key {
            k if k == forward => Some(Command::Forward),
            k if k == left => Some(Command::Left),
            k if k == backward => Some(Command::Backward),
            k if k == right => Some(Command::Right),
            k if k == interact => Some(Command::Interact),
            _ => None,
        }
    }
}
