//! Prints every key the engine would see, until `q`.
//!
//! Useful for checking what a terminal sends before picking a control scheme.

use anyhow::Result;

use tui_tiles::input::{ControlScheme, KeySource, TerminalKeys};
use tui_tiles::term::{Console, TerminalRenderer};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let scheme = ControlScheme::default();
    let mut keys = TerminalKeys::new();

    term.write_text("press keys, q to quit\n")?;
    loop {
        let key = keys.read_key()?;
        let command = scheme
            .command_for(key)
            .map(|c| c.as_str())
            .unwrap_or("-");
        term.write_text(&format!("{key:?} (U+{:04X}) -> {command}\n", u32::from(key)))?;
        if key == 'q' {
            return Ok(());
        }
    }
}
