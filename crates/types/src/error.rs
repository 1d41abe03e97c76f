//! Construction-time configuration errors.

/// Rejected engine configuration.
///
/// Every variant is raised eagerly while building grids, control schemes or
/// the engine itself; nothing at runtime re-checks these invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid row {row} column {col} uses unknown legend char {ch:?}")]
    UnknownLegend { row: usize, col: usize, ch: char },

    #[error("grid cell ({row}, {col}) references missing tile id {id}")]
    UnknownTile { row: usize, col: usize, id: usize },

    #[error("viewport must be positive, got {width}x{height}")]
    EmptyViewport { width: u16, height: u16 },

    #[error("control scheme must be exactly 5 characters, got {0}")]
    ControlCount(usize),

    #[error("control scheme repeats key {0:?}")]
    DuplicateControl(char),

    #[error("{role} key {key:?} is already bound in the control scheme")]
    ReservedKey { role: &'static str, key: char },

    #[error("player start ({row}, {col}) is outside a {rows}x{cols} grid")]
    PlayerOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("glyph {0:?} is a control character")]
    ControlGlyph(char),

    #[error("inventory already has an item named {0:?}")]
    DuplicateItem(String),

    #[error("inventory item {item:?} contains control character {ch:?}")]
    ControlText { item: String, ch: char },

    #[error("control character {0:?} cannot be bound as a key")]
    ControlKey(char),

    #[error("frame rate must be positive")]
    ZeroFrameRate,

    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },
}
