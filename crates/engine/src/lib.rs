//! Engine loop: wires the world, a console and a key source together.
//!
//! - [`config`]: [`EngineConfig`] with defaults and environment overrides
//! - [`session`]: [`Session`], the context every hook and update callback gets
//! - [`pacer`]: [`FramePacer`], the sleep-based frame cap
//! - [`engine`]: [`Engine`], its builder and the state machine
//!
//! The loop is single-threaded. Each [`Engine::step`] performs one state
//! transition; [`Engine::run`] repeats it until the player confirms quitting.

pub mod config;
pub mod engine;
pub mod pacer;
pub mod session;

pub use tui_tiles_core as core;
pub use tui_tiles_input as input;
pub use tui_tiles_term as term;
pub use tui_tiles_types as types;

pub use config::EngineConfig;
pub use engine::{Engine, EngineBuilder, EngineState, UpdateFn, WorldGrid, WorldTile, QUIT_PROMPT};
pub use pacer::FramePacer;
pub use session::Session;
