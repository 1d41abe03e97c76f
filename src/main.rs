//! Terminal tile demo (default binary).
//!
//! A small walled meadow with a pond, a signpost, a lamp and a few coins.
//! It drives the full engine: sizing prompt, movement and facing, enter and
//! interact hooks, animated text and the inventory overlay.

use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tui_tiles::core::{GridBuilder, Inventory, InventoryItem, ItemValue, Player, Tile};
use tui_tiles::engine::{Engine, EngineConfig, Session, WorldGrid};
use tui_tiles::input::TerminalKeys;
use tui_tiles::term::TerminalRenderer;
use tui_tiles::types::{Back, Direction, Fore, Slot, Style};

const MAP: &[&str] = &[
    "##############",
    "#....,,......#",
    "#.$..,,..~~~.#",
    "#....,,..~~~.#",
    "#..!.........#",
    "#......[o]...#",
    "#.$.......*..#",
    "#.......$....#",
    "##############",
];

#[derive(Debug, Default)]
struct Meadow {
    signs_read: u32,
    elapsed: f64,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Keep the guard alive until the game ends so buffered log lines flush.
    let _guard = setup_logging()?;

    let config = EngineConfig::from_env()?;
    if let Ok((w, h)) = crossterm::terminal::size() {
        tracing::info!(
            terminal_cols = w,
            terminal_rows = h,
            needed_cols = config.viewport.columns(),
            needed_rows = config.viewport.height,
            "terminal size"
        );
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(config: EngineConfig) -> Result<()> {
    let mut engine = Engine::builder(Meadow::default())
        .grid(meadow()?)
        .player(Player::new(4, 5).with_facing(Direction::Right))
        .inventory(inventory()?)
        .config(config)
        .on_update(|s: &mut Session<Meadow>, dt| s.state_mut().elapsed += dt)
        // The engine draws through its own handle; `main` owns raw mode.
        .console(TerminalRenderer::new())
        .keys(TerminalKeys::new())
        .build()?;

    engine.run()?;

    let meadow = engine.session().state();
    tracing::info!(
        signs_read = meadow.signs_read,
        seconds = meadow.elapsed,
        "session over"
    );
    Ok(())
}

fn meadow() -> Result<WorldGrid<Meadow>> {
    let sign_text = format!(
        "{}{}Welcome to the meadow.{}¶¶ Coins add to your purse.\nPress any key.",
        Style::Bright.code(),
        Fore::Yellow.code(),
        Style::ResetAll.code()
    );

    let grid = GridBuilder::new()
        .tile('#', Tile::solid('#', Back::White)?.blocking())
        .tile('.', Tile::solid('.', Back::Green)?)
        .tile(',', Tile::solid('"', Back::Yellow)?)
        .tile('~', Tile::solid('~', Back::Blue)?.blocking())
        .tile('[', Tile::new('[')?.with_slot(Slot::Left).blocking())
        .tile('o', Tile::new('o')?.with_slot(Slot::Center).blocking())
        .tile(']', Tile::new(']')?.with_slot(Slot::Right).blocking())
        .tile(
            '!',
            Tile::solid('!', Back::Magenta)?
                .blocking()
                .on_interact(move |s: &mut Session<Meadow>| {
                    s.state_mut().signs_read += 1;
                    s.display_text(&sign_text, 1.0, true);
                }),
        )
        .tile(
            '*',
            Tile::solid('*', Back::Yellow)?
                .blocking()
                .on_interact(|s: &mut Session<Meadow>| {
                    let lit = s
                        .inventory()
                        .get("Lamp")
                        .and_then(ItemValue::as_flag)
                        .unwrap_or(false);
                    s.inventory_mut().update("Lamp", !lit);
                }),
        )
        .tile(
            '$',
            Tile::solid('$', Back::Green)?.on_enter(|s: &mut Session<Meadow>| {
                let gold = s
                    .inventory()
                    .get("Gold")
                    .and_then(ItemValue::as_int)
                    .unwrap_or(0);
                s.inventory_mut().update("Gold", gold + 1);
            }),
        )
        .build(MAP)?;
    Ok(grid)
}

fn inventory() -> Result<Inventory> {
    let inventory = Inventory::new()
        .with(InventoryItem::new("Gold", 0, |candidate| {
            ItemValue::Int(candidate.as_int().unwrap_or(0).min(999))
        }))?
        .with(InventoryItem::replacing("Map", "meadow"))?
        .with(InventoryItem::replacing("Lamp", false))?;
    Ok(inventory)
}

/// Log to a file; stdout belongs to the game screen.
fn setup_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = std::env::var_os("TILES_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("tui-tiles"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "tui-tiles.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}/tui-tiles.log", log_dir.display());
    Ok(guard)
}
