//! The context handed to hooks and update callbacks.

use anyhow::Result;

use crate::core::Inventory;
use crate::input::KeySource;
use crate::term::{Console, TextPrinter};
use crate::types::style::strip_tokens;

/// Host state plus the engine resources a callback may touch.
///
/// Hooks return nothing, so I/O failures inside [`Session::display_text`] and
/// [`Session::read_key`] are parked here. The engine turns the first parked
/// failure into the error of the step that caused it.
pub struct Session<S> {
    state: S,
    inventory: Inventory,
    console: Box<dyn Console>,
    keys: Box<dyn KeySource>,
    printer: TextPrinter,
    monochrome: bool,
    fault: Option<anyhow::Error>,
}

impl<S> Session<S> {
    pub fn new(
        state: S,
        inventory: Inventory,
        console: Box<dyn Console>,
        keys: Box<dyn KeySource>,
        printer: TextPrinter,
        monochrome: bool,
    ) -> Self {
        Self {
            state,
            inventory,
            console,
            keys,
            printer,
            monochrome,
            fault: None,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Print `text` one character at a time, then optionally wait for a key.
    ///
    /// `slowness` scales the per-character delay; 1.0 is normal speed.
    pub fn display_text(&mut self, text: &str, slowness: f64, wait_for_key: bool) {
        let result = self.try_display_text(text, slowness, wait_for_key);
        self.park(result);
    }

    fn try_display_text(&mut self, text: &str, slowness: f64, wait_for_key: bool) -> Result<()> {
        if self.monochrome {
            let plain = strip_tokens(text);
            self.printer.display(self.console.as_mut(), &plain, slowness)?;
        } else {
            self.printer.display(self.console.as_mut(), text, slowness)?;
        }
        if wait_for_key {
            self.keys.read_key()?;
        }
        Ok(())
    }

    /// Block for one key. Returns `None` if the key source failed.
    pub fn read_key(&mut self) -> Option<char> {
        let result = self.keys.read_key();
        match result {
            Ok(ch) => Some(ch),
            Err(err) => {
                self.park(Err(err));
                None
            }
        }
    }

    /// Remove the parked failure, if any.
    pub fn take_fault(&mut self) -> Option<anyhow::Error> {
        self.fault.take()
    }

    fn park(&mut self, result: Result<()>) {
        if let Err(err) = result {
            tracing::warn!(error = %err, "session i/o failed inside a callback");
            // Keep the first failure; later ones are usually consequences.
            if self.fault.is_none() {
                self.fault = Some(err);
            }
        }
    }

    pub(crate) fn console_mut(&mut self) -> &mut dyn Console {
        self.console.as_mut()
    }

    pub(crate) fn next_key(&mut self) -> Result<char> {
        self.keys.read_key()
    }

    pub(crate) fn write_text(&mut self, text: &str) -> Result<()> {
        self.console.write_text(text)
    }
}
