//! Movement and interaction resolution.
//!
//! Both resolvers are pure: they read the grid and the player and report what
//! should happen. Hooks are fired by the caller through [`Grid::fire`] after
//! the new player state has been committed.
//!
//! # Bounds clamping
//!
//! After applying the step, the target is checked in a fixed order: row below
//! zero, row past the end, column below zero, column past the end. Only the
//! first violated check is corrected, the rest are skipped for this call.
//! Independent per-axis clamping would differ at corners when starting from an
//! out-of-range position, so keep the chain as is.

use crate::grid::Grid;
use crate::player::Player;
use crate::types::Command;

/// Which hook a trigger refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Enter,
    Interact,
}

/// A hook that should fire on the tile at `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub row: usize,
    pub col: usize,
    pub kind: TriggerKind,
}

/// Result of a move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub player: Player,
    /// Enter hook to fire, only when the position changed.
    pub trigger: Option<Trigger>,
    /// The destination blocked movement and the position was reverted.
    pub blocked: bool,
}

/// Clamp `(row, col)` into `rows` x `cols`, correcting only the first
/// violated bound (see module docs).
///
/// # Examples
///
/// ```
/// use tui_tiles_core::clamp_single_branch;
///
/// assert_eq!(clamp_single_branch(-1, 2, 5, 5), (0, 2));
/// assert_eq!(clamp_single_branch(5, 2, 5, 5), (4, 2));
/// // Row wins; the column is left for a later call.
/// assert_eq!(clamp_single_branch(-1, -1, 5, 5), (0, -1));
/// ```
pub fn clamp_single_branch(row: i64, col: i64, rows: usize, cols: usize) -> (i64, i64) {
    let max_row = rows as i64 - 1;
    let max_col = cols as i64 - 1;

    if row < 0 {
        (0, col)
    } else if row > max_row {
        (max_row, col)
    } else if col < 0 {
        (row, 0)
    } else if col > max_col {
        (row, max_col)
    } else {
        (row, col)
    }
}

/// Resolve a movement command.
///
/// Facing always follows the command, even when the move is blocked.
/// Non-movement commands return the player unchanged.
pub fn resolve_move<C>(grid: &Grid<C>, player: &Player, command: Command) -> MoveOutcome {
    let unchanged = MoveOutcome {
        player: *player,
        trigger: None,
        blocked: false,
    };
    let Some(direction) = command.direction() else {
        return unchanged;
    };

    let mut next = *player;
    next.facing = direction;

    let (dr, dc) = direction.delta();
    let (row, col) = clamp_single_branch(
        player.row as i64 + dr,
        player.col as i64 + dc,
        grid.rows(),
        grid.cols(),
    );

    // A target the clamp could not repair reads as no tile, so it blocks.
    let tile = match grid.tile(row, col) {
        Some(tile) if !tile.blocks_movement() => tile,
        _ => {
            tracing::trace!(row, col, "move blocked");
            return MoveOutcome {
                player: next,
                trigger: None,
                blocked: true,
            };
        }
    };

    next.row = row as usize;
    next.col = col as usize;

    let moved = next.position() != player.position();
    let trigger = (moved && tile.enter_hook().is_bound()).then_some(Trigger {
        row: next.row,
        col: next.col,
        kind: TriggerKind::Enter,
    });

    MoveOutcome {
        player: next,
        trigger,
        blocked: false,
    }
}

/// Resolve the interact command against the tile the player faces.
///
/// Facing the grid edge is the normal "nothing there" case and yields `None`.
pub fn resolve_interact<C>(grid: &Grid<C>, player: &Player) -> Option<Trigger> {
    let (dr, dc) = player.facing.delta();
    let row = player.row as i64 + dr;
    let col = player.col as i64 + dc;

    let tile = grid.tile(row, col)?;
    if !tile.interact_hook().is_bound() {
        return None;
    }
    Some(Trigger {
        row: row as usize,
        col: col as usize,
        kind: TriggerKind::Interact,
    })
}
