//! Terminal input module (engine-facing).
//!
//! Input is reduced to plain `char`s before it reaches the engine, so the
//! engine never sees a `crossterm` type:
//!
//! - [`keys`]: the blocking [`KeySource`] seam, its crossterm implementation
//!   and a scripted fake for headless runs
//! - [`map`]: the configurable [`ControlScheme`] turning chars into
//!   [`Command`](crate::types::Command)s

pub mod keys;
pub mod map;

pub use tui_tiles_types as types;

pub use keys::{decode_key_event, KeySource, ScriptedKeys, TerminalKeys};
pub use map::{ControlScheme, CTRL_C};
