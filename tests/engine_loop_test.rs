//! Headless engine runs driven by scripted keys.

use tui_tiles::core::{GridBuilder, Inventory, InventoryItem, ItemValue, Player, Tile};
use tui_tiles::engine::{Engine, EngineConfig, EngineState, Session, WorldGrid, QUIT_PROMPT};
use tui_tiles::input::ScriptedKeys;
use tui_tiles::term::{BufferConsole, TextPrinter};
use tui_tiles::types::style::strip_tokens;
use tui_tiles::types::{Back, Direction, Viewport};

#[derive(Debug, Default)]
struct World {
    coins: u32,
    signs: u32,
}

fn world() -> WorldGrid<World> {
    GridBuilder::new()
        .tile('.', Tile::solid('.', Back::Green).unwrap())
        .tile('#', Tile::solid('#', Back::White).unwrap().blocking())
        .tile(
            '$',
            Tile::solid('$', Back::Yellow)
                .unwrap()
                .on_enter(|s: &mut Session<World>| {
                    s.state_mut().coins += 1;
                    let gold = s.inventory().get("Gold").and_then(ItemValue::as_int).unwrap_or(0);
                    s.inventory_mut().update("Gold", gold + 5);
                }),
        )
        .tile(
            '!',
            Tile::solid('!', Back::Red)
                .unwrap()
                .blocking()
                .on_interact(|s: &mut Session<World>| {
                    s.state_mut().signs += 1;
                    s.display_text("Keep out¶", 1.0, true);
                }),
        )
        .build(&["!....", ".#...", "..$..", ".....", "....."])
        .unwrap()
}

fn start(keys: &str, config: EngineConfig) -> (Engine<World>, BufferConsole) {
    let console = BufferConsole::new();
    let inventory = Inventory::new()
        .with(InventoryItem::replacing("Gold", 0))
        .unwrap();
    let engine = Engine::builder(World::default())
        .grid(world())
        .player(Player::new(2, 0))
        .config(config)
        .inventory(inventory)
        .console(console.clone())
        .keys(ScriptedKeys::new(keys.chars()))
        .printer(TextPrinter::instant())
        .build()
        .unwrap();
    (engine, console)
}

fn config() -> EngineConfig {
    EngineConfig {
        viewport: Viewport::new(5, 5),
        frame_rate_hz: 500,
        ..EngineConfig::default()
    }
}

#[test]
fn full_session_runs_to_exit() {
    // resize, right, right (coin), quit -> no, quit -> yes
    let (mut engine, console) = start(" ddqn\nqy\n", config());
    engine.run().unwrap();

    assert_eq!(engine.state(), EngineState::Exiting);
    assert_eq!(engine.player().position(), (2, 2));
    assert_eq!(engine.session().state().coins, 1);
    assert_eq!(engine.session().inventory().get("Gold"), Some(&ItemValue::Int(5)));
    assert_eq!(console.text().matches(QUIT_PROMPT).count(), 2);

    // First frame is the sizing prompt.
    let frames = console.frames();
    assert!(frames[0].iter().any(|l| l.contains("resize")));
}

#[test]
fn inventory_overlay_tracks_updates() {
    let (mut engine, console) = start(" dd ", config());
    for _ in 0..4 {
        engine.step().unwrap();
    }
    let last = console.last_frame().unwrap();
    assert!(strip_tokens(&last[2]).ends_with("\tGold : 5"));
}

#[test]
fn enter_hooks_fire_on_each_arrival() {
    let (mut engine, _) = start(" dsw", config());
    for _ in 0..4 {
        engine.step().unwrap();
    }
    assert_eq!(engine.player().position(), (2, 1));
    assert_eq!(engine.session().state().coins, 0);

    // Onto the coin, off it upwards, and back down.
    let (mut engine, _) = start(" ddws", config());
    for _ in 0..5 {
        engine.step().unwrap();
    }
    assert_eq!(engine.player().position(), (2, 2));
    assert_eq!(engine.session().state().coins, 2);
}

#[test]
fn interact_runs_the_faced_hook_and_waits() {
    // Second step up is blocked by the sign; the trailing key ends its text.
    let (mut engine, console) = start(" wwe!", config());
    for _ in 0..4 {
        engine.step().unwrap();
    }
    assert_eq!(engine.player().position(), (1, 0));
    assert_eq!(engine.player().facing, Direction::Up);
    assert_eq!(engine.session().state().signs, 1);
    assert!(console.text().contains("Keep out"));
    assert!(!console.text().contains('¶'));
}

#[test]
fn interact_facing_the_edge_does_nothing() {
    let (mut engine, console) = start(" ae", config());
    for _ in 0..3 {
        engine.step().unwrap();
    }
    assert_eq!(engine.player().position(), (2, 0));
    assert_eq!(engine.player().facing, Direction::Left);
    assert_eq!(engine.session().state().signs, 0);
    assert_eq!(console.text(), "");
}

#[test]
fn help_shows_legend_and_eats_one_key() {
    let (mut engine, console) = start(" hqd", config());
    engine.step().unwrap();
    engine.step().unwrap();
    // 'q' closed the legend instead of quitting.
    assert_eq!(engine.state(), EngineState::Running);
    let legend: Vec<String> = console
        .last_frame()
        .unwrap()
        .iter()
        .map(|l| strip_tokens(l))
        .collect();
    assert!(legend.iter().any(|l| l.contains("[e] interact")));

    engine.step().unwrap();
    assert_eq!(engine.player().position(), (2, 1));
}

#[test]
fn monochrome_frames_carry_no_escapes() {
    let (mut engine, console) = start(" hx ", EngineConfig {
        monochrome: true,
        ..config()
    });
    for _ in 0..3 {
        engine.step().unwrap();
    }
    for frame in console.frames() {
        for line in frame {
            assert!(!line.contains('\x1b'), "{line:?}");
        }
    }
}

#[test]
fn custom_controls_drive_movement() {
    let controls = tui_tiles::input::ControlScheme::new("ijklo", 'x', '?').unwrap();
    let (mut engine, _) = start(" lxy\n", EngineConfig {
        controls,
        ..config()
    });
    engine.step().unwrap();
    engine.step().unwrap();
    assert_eq!(engine.player().position(), (2, 1));
    assert_eq!(engine.step().unwrap(), EngineState::Exiting);
}
