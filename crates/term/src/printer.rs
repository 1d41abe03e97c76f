//! Animated text: characters appear one at a time.

use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::console::Console;
use crate::types::style::ALL_TOKENS;
use crate::types::{Style, TEXT_CHAR_DELAY_MS, TEXT_NEWLINE_DELAY_MS, TEXT_PAUSE_MARKER};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPrinter {
    char_delay: Duration,
    newline_delay: Duration,
    pause_marker: char,
}

impl Default for TextPrinter {
    fn default() -> Self {
        Self {
            char_delay: Duration::from_millis(TEXT_CHAR_DELAY_MS),
            newline_delay: Duration::from_millis(TEXT_NEWLINE_DELAY_MS),
            pause_marker: TEXT_PAUSE_MARKER,
        }
    }
}

impl TextPrinter {
    /// A printer that never sleeps.
    pub fn instant() -> Self {
        Self::with_delays(Duration::ZERO, Duration::ZERO)
    }

    pub fn with_delays(char_delay: Duration, newline_delay: Duration) -> Self {
        Self {
            char_delay,
            newline_delay,
            ..Self::default()
        }
    }

    /// Delay after `ch`, scaled by `slowness` (1.0 is the base speed).
    pub fn delay_for(&self, ch: char, slowness: f64) -> Duration {
        if !slowness.is_finite() || slowness <= 0.0 {
            return Duration::ZERO;
        }
        let base = if ch == '\n' {
            self.newline_delay
        } else {
            self.char_delay
        };
        base.mul_f64(slowness)
    }

    /// Print `text` character by character.
    ///
    /// The pause marker is not printed but still waits one character delay.
    /// Style tokens are written whole, without a delay.
    pub fn display(&self, console: &mut dyn Console, text: &str, slowness: f64) -> Result<()> {
        console.write_text(Style::ResetAll.code())?;
        console.write_text("\n")?;

        let mut rest = text;
        let mut buf = [0u8; 4];
        while let Some(ch) = rest.chars().next() {
            if let Some(token) = ALL_TOKENS.iter().find(|t| rest.starts_with(**t)) {
                console.write_text(token)?;
                rest = &rest[token.len()..];
                continue;
            }

            if ch != self.pause_marker {
                console.write_text(ch.encode_utf8(&mut buf))?;
            }
            let delay = self.delay_for(ch, slowness);
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            rest = &rest[ch.len_utf8()..];
        }
        Ok(())
    }
}
