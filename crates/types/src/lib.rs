//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! Everything here is plain data with no I/O, so it can be used from the
//! pure layers (grid, movement, compositor) as well as the terminal layers.
//!
//! # Tile Geometry
//!
//! Every grid tile is drawn as [`TILE_COLUMNS`] terminal columns by one row.
//! A [`Viewport`] is measured in tiles, not terminal columns.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_RATE_HZ` | 15 | Default frame cap |
//! | `TEXT_CHAR_DELAY_MS` | 40 | Animated text delay per character |
//! | `TEXT_NEWLINE_DELAY_MS` | 200 | Animated text delay after a newline |
//!
//! # Directions
//!
//! [`Direction`] is the single encoding of facing shared by movement,
//! interaction and the player overlay:
//!
//! | Direction | Index | Delta (row, col) |
//! |-----------|-------|------------------|
//! | Up        | 0     | (-1, 0)          |
//! | Left      | 1     | (0, -1)          |
//! | Down      | 2     | (1, 0)           |
//! | Right     | 3     | (0, 1)           |
//!
//! # Examples
//!
//! ```
//! use tui_tiles_types::{Command, Direction, Viewport};
//!
//! assert_eq!(Direction::Up.delta(), (-1, 0));
//! assert_eq!(Direction::from_index(3), Some(Direction::Right));
//!
//! assert_eq!(Command::Forward.direction(), Some(Direction::Up));
//! assert_eq!(Command::Interact.direction(), None);
//!
//! let vp = Viewport::new(8, 8);
//! assert_eq!(vp.half_height(), 4);
//! ```

pub mod error;
pub mod style;

pub use error::ConfigError;
pub use style::{Back, Fore, Style};

/// Terminal columns drawn per tile.
pub const TILE_COLUMNS: usize = 3;

/// Default frame cap in frames per second.
pub const FRAME_RATE_HZ: u32 = 15;

/// Default control scheme: forward, left, backward, right, interact.
pub const DEFAULT_CONTROLS: &str = "wasde";

/// Default key that opens the quit confirmation.
pub const DEFAULT_QUIT_KEY: char = 'q';

/// Default key that shows the control legend.
pub const DEFAULT_HELP_KEY: char = 'h';

/// Number of keys in a control scheme.
pub const CONTROL_COUNT: usize = 5;

/// Animated text delay per character (milliseconds).
pub const TEXT_CHAR_DELAY_MS: u64 = 40;

/// Animated text delay after a newline (milliseconds).
pub const TEXT_NEWLINE_DELAY_MS: u64 = 200;

/// Character that pauses animated text without being printed.
pub const TEXT_PAUSE_MARKER: char = '¶';

/// Glyph shown under the player when no solid neighbour is available.
pub const FALLBACK_GLYPH: char = '-';

/// Color shown under the player when no solid neighbour is available.
pub const FALLBACK_COLOR: Back = Back::Black;

/// Default player glyphs, indexed by [`Direction::index`].
pub const DEFAULT_FACING_GLYPHS: [char; 4] = ['^', '<', 'v', '>'];

/// Facing of the player token.
///
/// The discriminants are the canonical index used by every lookup table
/// keyed by direction (see [`DEFAULT_FACING_GLYPHS`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Up = 0,
    Left = 1,
    Down = 2,
    Right = 3,
}

impl Direction {
    /// All directions in canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Canonical table index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Direction::index`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_tiles_types::Direction;
    ///
    /// assert_eq!(Direction::from_index(0), Some(Direction::Up));
    /// assert_eq!(Direction::from_index(1), Some(Direction::Left));
    /// assert_eq!(Direction::from_index(4), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Single-step offset as `(row, col)`.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Down => (1, 0),
            Direction::Right => (0, 1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Down => "down",
            Direction::Right => "right",
        }
    }
}

/// Horizontal composition role of a tile.
///
/// - **Solid**: the glyph fills all three columns
/// - **Left**: glyph on the left, right neighbour fills the rest
/// - **Center**: glyph in the middle, bracketed by a neighbour
/// - **Right**: glyph first, then the left neighbour twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slot {
    #[default]
    Solid,
    Left,
    Center,
    Right,
}

/// Commands the player can issue through the control scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Step toward the top of the grid
    Forward,
    /// Step toward column 0
    Left,
    /// Step toward the bottom of the grid
    Backward,
    /// Step toward the last column
    Right,
    /// Trigger the faced tile's interaction hook
    Interact,
    /// Show the control legend
    Help,
    /// Ask for quit confirmation
    Quit,
}

impl Command {
    /// Movement direction implied by the command, if any.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Command::Forward => Some(Direction::Up),
            Command::Left => Some(Direction::Left),
            Command::Backward => Some(Direction::Down),
            Command::Right => Some(Direction::Right),
            Command::Interact | Command::Help | Command::Quit => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Forward => "forward",
            Command::Left => "left",
            Command::Backward => "backward",
            Command::Right => "right",
            Command::Interact => "interact",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

/// Size of the rendered window, in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Reject zero-sized viewports.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    pub fn half_width(&self) -> i64 {
        i64::from(self.width) / 2
    }

    pub fn half_height(&self) -> i64 {
        i64::from(self.height) / 2
    }

    /// Terminal columns covered by one rendered row.
    pub fn columns(&self) -> usize {
        usize::from(self.width) * TILE_COLUMNS
    }

    /// Parse `WIDTHxHEIGHT` (e.g. `"21x13"`).
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_tiles_types::Viewport;
    ///
    /// assert_eq!(Viewport::parse("21x13"), Some(Viewport::new(21, 13)));
    /// assert_eq!(Viewport::parse("21"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let (w, h) = s.trim().split_once(['x', 'X'])?;
        Some(Self::new(w.trim().parse().ok()?, h.trim().parse().ok()?))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(21, 13)
    }
}
