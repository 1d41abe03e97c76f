//! Core engine logic - pure, deterministic, and testable
//!
//! This crate holds the world model and the rules that move the player
//! through it. It has **no dependencies** on the terminal, input devices or
//! timing, which keeps every rule unit-testable:
//!
//! - **Tiles** are immutable cells with optional hooks
//! - **Grids** own a tile arena; cells hold [`TileId`] handles, so one tile can
//!   fill many coordinates
//! - **Resolvers** are pure functions returning the next [`Player`] and the
//!   [`Trigger`] to fire, never invoking hooks themselves
//!
//! # Module Structure
//!
//! - [`tile`]: glyph cells and the [`Hook`] capability type
//! - [`grid`]: fixed-size tile grid and its builder
//! - [`player`]: position, facing and directional glyphs
//! - [`movement`]: move and interact resolution
//! - [`inventory`]: named values replaced through host update functions
//!
//! # Hook Context
//!
//! Tiles are generic over a context type `C`. Hooks receive `&mut C` when they
//! fire, so callbacks never need global state: the engine passes its session,
//! tests pass whatever recorder they like.
//!
//! # Example
//!
//! ```
//! use tui_tiles_core::{resolve_move, Grid, Player, Tile};
//! use tui_tiles_types::{Back, Command};
//!
//! #[derive(Default)]
//! struct Steps(u32);
//!
//! let grass = Tile::solid('"', Back::Green)
//!     .unwrap()
//!     .on_enter(|s: &mut Steps| s.0 += 1);
//! let grid = Grid::filled(3, 3, grass).unwrap();
//!
//! let mut steps = Steps::default();
//! let outcome = resolve_move(&grid, &Player::new(1, 1), Command::Right);
//! assert_eq!(outcome.player.position(), (1, 2));
//!
//! if let Some(trigger) = outcome.trigger {
//!     grid.fire(trigger, &mut steps);
//! }
//! assert_eq!(steps.0, 1);
//! ```

pub mod grid;
pub mod inventory;
pub mod movement;
pub mod player;
pub mod tile;

pub use tui_tiles_types as types;

// Re-export commonly used types for convenience
pub use grid::{Grid, GridBuilder, TileId};
pub use inventory::{Inventory, InventoryItem, ItemValue};
pub use movement::{
    clamp_single_branch, resolve_interact, resolve_move, MoveOutcome, Trigger, TriggerKind,
};
pub use player::{FacingGlyphs, Player};
pub use tile::{Hook, Tile};
