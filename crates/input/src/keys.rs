//! Blocking key sources.

use std::collections::VecDeque;

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::map::CTRL_C;

/// Something that yields one decoded key at a time, blocking until it can.
pub trait KeySource {
    fn read_key(&mut self) -> Result<char>;
}

/// Decode a terminal key event into the char the engine sees.
///
/// Only presses count. Keys with no char form (arrows, function keys) map to
/// `None` and are skipped by [`TerminalKeys`].
pub fn decode_key_event(key: KeyEvent) -> Option<char> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(CTRL_C)
        }
        KeyCode::Char(ch) => Some(ch),
        KeyCode::Enter => Some('\n'),
        KeyCode::Tab => Some('\t'),
        KeyCode::Backspace => Some('\u{8}'),
        KeyCode::Esc => Some('\u{1b}'),
        _ => None,
    }
}

/// Reads keys from the controlling terminal through crossterm.
///
/// The terminal must already be in raw mode, see
/// `TerminalRenderer::enter` in the term crate.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl TerminalKeys {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> Result<char> {
        loop {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(ch) = decode_key_event(key) {
                        return Ok(ch);
                    }
                    tracing::trace!(code = ?key.code, kind = ?key.kind, "skipped key event");
                }
                // Resizes and mouse events are not keys.
                _ => continue,
            }
        }
    }
}

/// Replays a fixed key sequence; errors once it runs dry.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    queue: VecDeque<char>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = char>) -> Self {
        Self {
            queue: keys.into_iter().collect(),
        }
    }

    pub fn push(&mut self, key: char) {
        self.queue.push_back(key);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> Result<char> {
        self.queue
            .pop_front()
            .ok_or_else(|| anyhow!("scripted key source exhausted"))
    }
}
