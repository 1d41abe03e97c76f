//! The engine state machine.
//!
//! ```text
//! AwaitingResize --any key--> Running --quit confirmed--> Exiting
//! ```
//!
//! A `Running` step paces the frame, runs the host update callback, renders
//! and presents the view, blocks for one key and dispatches it.

use anyhow::Result;
use tracing::{debug, info, trace};

use crate::config::EngineConfig;
use crate::core::{resolve_interact, resolve_move, Grid, Inventory, Player, Tile};
use crate::input::{KeySource, TerminalKeys, CTRL_C};
use crate::pacer::FramePacer;
use crate::session::Session;
use crate::term::{legend, render_into, sizing_prompt, Console, TerminalRenderer, TextPrinter};
use crate::types::style::strip_tokens;
use crate::types::{Command, ConfigError, Style};

/// Printed before reading the quit confirmation line.
pub const QUIT_PROMPT: &str = "Quit? (y/n) ";

/// Host callback run once per frame with the seconds since the last frame.
pub type UpdateFn<S> = Box<dyn FnMut(&mut Session<S>, f64)>;

/// A grid whose hooks receive the engine session.
pub type WorldGrid<S> = Grid<Session<S>>;

/// A tile whose hooks receive the engine session.
pub type WorldTile<S> = Tile<Session<S>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Showing the sizing prompt; the next key starts the game.
    AwaitingResize,
    Running,
    /// Quit confirmed. Further steps do nothing.
    Exiting,
}

pub struct Engine<S> {
    grid: WorldGrid<S>,
    player: Player,
    session: Session<S>,
    config: EngineConfig,
    pacer: FramePacer,
    update: Option<UpdateFn<S>>,
    state: EngineState,
    frame: Vec<String>,
}

impl<S> Engine<S> {
    /// Start building an engine around host state `state`.
    pub fn builder(state: S) -> EngineBuilder<S> {
        EngineBuilder::new(state)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn grid(&self) -> &WorldGrid<S> {
        &self.grid
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<S> {
        &mut self.session
    }

    /// The most recently composed frame.
    pub fn frame(&self) -> &[String] {
        &self.frame
    }

    /// Step until the player confirms quitting.
    pub fn run(&mut self) -> Result<()> {
        while self.step()? != EngineState::Exiting {}
        info!("engine finished");
        Ok(())
    }

    /// Perform one state transition and return the new state.
    pub fn step(&mut self) -> Result<EngineState> {
        match self.state {
            EngineState::AwaitingResize => {
                let prompt = sizing_prompt(self.config.viewport);
                self.session.console_mut().present(&prompt)?;
                self.session.next_key()?;
                debug!("viewport confirmed");
                self.state = EngineState::Running;
            }
            EngineState::Running => self.tick()?,
            EngineState::Exiting => {}
        }
        Ok(self.state)
    }

    fn tick(&mut self) -> Result<()> {
        let dt = self.pacer.wait();
        if let Some(update) = self.update.as_mut() {
            update(&mut self.session, dt);
        }
        self.surface_fault()?;

        self.render_frame()?;

        let key = self.session.next_key()?;
        self.dispatch(key)?;
        self.surface_fault()
    }

    /// Compose the current view and present it.
    pub fn render_frame(&mut self) -> Result<()> {
        let inventory = if self.config.show_inventory {
            Some(self.session.inventory())
        } else {
            None
        };
        render_into(
            &self.grid,
            &self.player,
            self.config.viewport,
            inventory,
            self.config.monochrome,
            &mut self.frame,
        );
        trace!(lines = self.frame.len(), "frame composed");
        self.session.console_mut().present(&self.frame)
    }

    fn dispatch(&mut self, key: char) -> Result<()> {
        let Some(command) = self.config.controls.command_for(key) else {
            debug!(key = ?key, "unbound key");
            return Ok(());
        };
        debug!(command = command.as_str(), "dispatch");

        match command {
            Command::Quit => {
                if self.confirm_quit()? {
                    info!("quit confirmed");
                    self.state = EngineState::Exiting;
                }
            }
            Command::Help => {
                let controls = self.config.controls;
                let mut lines = legend(controls.keys(), controls.quit_key(), controls.help_key());
                if self.config.monochrome {
                    lines.iter_mut().for_each(|line| *line = strip_tokens(line));
                }
                self.session.console_mut().present(&lines)?;
                self.session.next_key()?;
            }
            Command::Interact => {
                if let Some(trigger) = resolve_interact(&self.grid, &self.player) {
                    self.grid.fire(trigger, &mut self.session);
                }
            }
            Command::Forward | Command::Left | Command::Backward | Command::Right => {
                let outcome = resolve_move(&self.grid, &self.player, command);
                self.player = outcome.player;
                trace!(
                    row = self.player.row,
                    col = self.player.col,
                    facing = self.player.facing.as_str(),
                    "moved"
                );
                if let Some(trigger) = outcome.trigger {
                    self.grid.fire(trigger, &mut self.session);
                }
            }
        }
        Ok(())
    }

    /// Ask for confirmation and read one line. Only `y`/`Y` quits.
    fn confirm_quit(&mut self) -> Result<bool> {
        let reset = Style::ResetAll.code();
        let prompt = if self.config.monochrome {
            format!("\n{QUIT_PROMPT}")
        } else {
            format!("{reset}\n{QUIT_PROMPT}")
        };
        self.session.write_text(&prompt)?;

        let mut line = String::new();
        loop {
            match self.session.next_key()? {
                '\n' | '\r' => break,
                CTRL_C => {
                    self.session.write_text("\n")?;
                    return Ok(true);
                }
                '\u{8}' | '\u{7f}' => {
                    if line.pop().is_some() {
                        self.session.write_text("\u{8} \u{8}")?;
                    }
                }
                ch if ch.is_control() => {}
                ch => {
                    line.push(ch);
                    let mut buf = [0u8; 4];
                    self.session.write_text(ch.encode_utf8(&mut buf))?;
                }
            }
        }
        self.session.write_text("\n")?;

        Ok(matches!(line.trim(), "y" | "Y"))
    }

    fn surface_fault(&mut self) -> Result<()> {
        match self.session.take_fault() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Collects everything an [`Engine`] needs and validates it in
/// [`EngineBuilder::build`].
pub struct EngineBuilder<S> {
    state: S,
    grid: Option<WorldGrid<S>>,
    player: Player,
    config: EngineConfig,
    inventory: Inventory,
    update: Option<UpdateFn<S>>,
    console: Option<Box<dyn Console>>,
    keys: Option<Box<dyn KeySource>>,
    printer: TextPrinter,
}

impl<S> EngineBuilder<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            grid: None,
            player: Player::new(0, 0),
            config: EngineConfig::default(),
            inventory: Inventory::new(),
            update: None,
            console: None,
            keys: None,
            printer: TextPrinter::default(),
        }
    }

    pub fn grid(mut self, grid: WorldGrid<S>) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Start position, facing and glyphs.
    pub fn player(mut self, player: Player) -> Self {
        self.player = player;
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn on_update(mut self, update: impl FnMut(&mut Session<S>, f64) + 'static) -> Self {
        self.update = Some(Box::new(update));
        self
    }

    /// Output target. Defaults to a [`TerminalRenderer`].
    pub fn console(mut self, console: impl Console + 'static) -> Self {
        self.console = Some(Box::new(console));
        self
    }

    /// Key source. Defaults to [`TerminalKeys`].
    pub fn keys(mut self, keys: impl KeySource + 'static) -> Self {
        self.keys = Some(Box::new(keys));
        self
    }

    pub fn printer(mut self, printer: TextPrinter) -> Self {
        self.printer = printer;
        self
    }

    pub fn build(self) -> Result<Engine<S>, ConfigError> {
        let grid = self.grid.ok_or(ConfigError::EmptyGrid)?;
        let viewport = self.config.viewport.validate()?;
        let pacer = FramePacer::new(self.config.frame_rate_hz)?;

        let (row, col) = self.player.position();
        if row >= grid.rows() || col >= grid.cols() {
            return Err(ConfigError::PlayerOutOfBounds {
                row,
                col,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }

        let console = self
            .console
            .unwrap_or_else(|| Box::new(TerminalRenderer::new()));
        let keys = self.keys.unwrap_or_else(|| Box::new(TerminalKeys::new()));
        let session = Session::new(
            self.state,
            self.inventory,
            console,
            keys,
            self.printer,
            self.config.monochrome,
        );

        info!(
            rows = grid.rows(),
            cols = grid.cols(),
            width = viewport.width,
            height = viewport.height,
            fps = self.config.frame_rate_hz,
            "engine built"
        );

        Ok(Engine {
            grid,
            player: self.player,
            session,
            config: self.config,
            pacer,
            update: self.update,
            state: EngineState::AwaitingResize,
            frame: Vec::with_capacity(usize::from(viewport.height)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InventoryItem;
    use crate::input::ScriptedKeys;
    use crate::term::BufferConsole;
    use crate::types::{Back, Direction, Viewport};

    fn fast_config() -> EngineConfig {
        EngineConfig {
            viewport: Viewport::new(5, 5),
            frame_rate_hz: 1000,
            ..EngineConfig::default()
        }
    }

    fn engine(keys: &str) -> (Engine<u32>, BufferConsole) {
        let console = BufferConsole::new();
        let grid = Grid::filled(5, 5, Tile::solid('.', Back::Green).unwrap()).unwrap();
        let engine = Engine::builder(0)
            .grid(grid)
            .player(Player::new(2, 2))
            .config(fast_config())
            .console(console.clone())
            .keys(ScriptedKeys::new(keys.chars()))
            .printer(TextPrinter::instant())
            .build()
            .unwrap();
        (engine, console)
    }

    #[test]
    fn build_requires_a_grid() {
        let result = Engine::<()>::builder(()).config(fast_config()).build();
        assert_eq!(result.err(), Some(ConfigError::EmptyGrid));
    }

    #[test]
    fn build_rejects_player_outside_grid() {
        let grid = Grid::filled(2, 2, Tile::new('.').unwrap()).unwrap();
        let result = Engine::builder(())
            .grid(grid)
            .player(Player::new(2, 0))
            .build();
        assert_eq!(
            result.err(),
            Some(ConfigError::PlayerOutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 2
            })
        );
    }

    #[test]
    fn build_rejects_bad_viewport_and_rate() {
        let grid = || Grid::filled(2, 2, Tile::new('.').unwrap()).unwrap();
        let zero_view = EngineConfig {
            viewport: Viewport::new(0, 3),
            ..EngineConfig::default()
        };
        assert!(matches!(
            Engine::builder(()).grid(grid()).config(zero_view).build().err(),
            Some(ConfigError::EmptyViewport { .. })
        ));

        let zero_rate = EngineConfig {
            frame_rate_hz: 0,
            ..EngineConfig::default()
        };
        assert_eq!(
            Engine::builder(()).grid(grid()).config(zero_rate).build().err(),
            Some(ConfigError::ZeroFrameRate)
        );
    }

    #[test]
    fn resize_prompt_then_running() {
        let (mut engine, console) = engine("x");
        assert_eq!(engine.state(), EngineState::AwaitingResize);
        assert_eq!(engine.step().unwrap(), EngineState::Running);
        assert_eq!(console.frame_count(), 1);
        assert_eq!(console.last_frame().unwrap().len(), 5);
    }

    #[test]
    fn movement_updates_facing_and_position() {
        let (mut engine, _) = engine(" a");
        engine.step().unwrap();
        engine.step().unwrap();
        assert_eq!(engine.player().position(), (2, 1));
        assert_eq!(engine.player().facing, Direction::Left);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let (mut engine, _) = engine(" z");
        engine.step().unwrap();
        assert_eq!(engine.step().unwrap(), EngineState::Running);
        assert_eq!(engine.player().position(), (2, 2));
    }

    #[test]
    fn quit_needs_yes() {
        let (mut engine, console) = engine(" qn\nqY\n");
        engine.step().unwrap();
        assert_eq!(engine.step().unwrap(), EngineState::Running);
        assert_eq!(engine.step().unwrap(), EngineState::Exiting);
        assert!(console.text().contains(QUIT_PROMPT));
        assert!(console.text().contains('n'));
    }

    #[test]
    fn quit_line_supports_backspace() {
        let (mut engine, console) = engine(" qn\u{8}y\r");
        engine.step().unwrap();
        assert_eq!(engine.step().unwrap(), EngineState::Exiting);
        assert!(console.text().contains("\u{8} \u{8}"));
    }

    #[test]
    fn ctrl_c_quits_from_prompt() {
        let (mut engine, _) = engine(" \u{3}\u{3}");
        engine.step().unwrap();
        assert_eq!(engine.step().unwrap(), EngineState::Exiting);
        assert_eq!(engine.step().unwrap(), EngineState::Exiting);
    }

    #[test]
    fn help_consumes_one_key() {
        let (mut engine, console) = engine(" hdd");
        engine.step().unwrap();
        engine.step().unwrap();
        // The 'd' after help only dismissed the legend.
        assert_eq!(engine.player().position(), (2, 2));
        let legend = console.last_frame().unwrap();
        assert!(legend.iter().any(|l| l.contains("interact")));

        engine.step().unwrap();
        assert_eq!(engine.player().position(), (2, 3));
    }

    #[test]
    fn update_callback_sees_positive_delta() {
        let console = BufferConsole::new();
        let grid = Grid::filled(3, 3, Tile::new('.').unwrap()).unwrap();
        let mut engine = Engine::builder(0.0_f64)
            .grid(grid)
            .player(Player::new(1, 1))
            .config(fast_config())
            .console(console)
            .keys(ScriptedKeys::new("  ".chars()))
            .on_update(|s: &mut Session<f64>, dt| *s.state_mut() += dt)
            .build()
            .unwrap();

        engine.step().unwrap();
        engine.step().unwrap();
        assert!(*engine.session().state() > 0.0);
    }

    #[test]
    fn exhausted_keys_surface_as_errors() {
        let (mut engine, _) = engine(" ");
        engine.step().unwrap();
        assert!(engine.step().is_err());
    }

    #[test]
    fn hook_faults_fail_the_step() {
        let talker: WorldTile<()> = Tile::new('!')
            .unwrap()
            .on_interact(|s: &mut Session<()>| s.display_text("hello", 1.0, true));
        let floor: WorldTile<()> = Tile::new('.').unwrap();
        let grid = crate::core::GridBuilder::new()
            .tile('.', floor)
            .tile('!', talker)
            .build(&["!", "."])
            .unwrap();

        let console = BufferConsole::new();
        // Resize key, then interact; nothing left for the hook's wait.
        let mut engine = Engine::builder(())
            .grid(grid)
            .player(Player::new(1, 0))
            .config(fast_config())
            .console(console.clone())
            .keys(ScriptedKeys::new(" e".chars()))
            .printer(TextPrinter::instant())
            .build()
            .unwrap();

        engine.step().unwrap();
        assert!(engine.step().is_err());
        assert!(console.text().contains("hello"));
    }

    #[test]
    fn inventory_overlay_follows_config() {
        let console = BufferConsole::new();
        let grid = Grid::filled(5, 5, Tile::new('.').unwrap()).unwrap();
        let inventory = Inventory::new()
            .with(InventoryItem::replacing("gold", 3))
            .unwrap();
        let mut engine = Engine::builder(())
            .grid(grid)
            .player(Player::new(2, 2))
            .config(EngineConfig {
                show_inventory: false,
                ..fast_config()
            })
            .inventory(inventory)
            .console(console)
            .keys(ScriptedKeys::new("".chars()))
            .build()
            .unwrap();

        engine.render_frame().unwrap();
        assert!(engine.frame().iter().all(|l| !l.contains("gold")));
    }
}
