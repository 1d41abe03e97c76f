//! Player token: position, facing, and one glyph per facing.

use crate::types::{ConfigError, Direction, DEFAULT_FACING_GLYPHS};

/// Overlay glyphs indexed by [`Direction::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacingGlyphs([char; 4]);

impl FacingGlyphs {
    pub fn new(up: char, left: char, down: char, right: char) -> Result<Self, ConfigError> {
        let glyphs = [up, left, down, right];
        if let Some(&bad) = glyphs.iter().find(|c| c.is_control()) {
            return Err(ConfigError::ControlGlyph(bad));
        }
        Ok(Self(glyphs))
    }

    pub fn get(&self, facing: Direction) -> char {
        self.0[facing.index()]
    }
}

impl Default for FacingGlyphs {
    fn default() -> Self {
        Self(DEFAULT_FACING_GLYPHS)
    }
}

/// The single local player.
///
/// The engine checks the start position against the grid on build; after
/// that every mutation goes through the resolvers, which keep it in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub row: usize,
    pub col: usize,
    pub facing: Direction,
    glyphs: FacingGlyphs,
}

impl Player {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            facing: Direction::Up,
            glyphs: FacingGlyphs::default(),
        }
    }

    pub fn with_facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }

    pub fn with_glyphs(mut self, glyphs: FacingGlyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn glyphs(&self) -> FacingGlyphs {
        self.glyphs
    }

    /// Overlay glyph for the current facing.
    pub fn glyph(&self) -> char {
        self.glyphs.get(self.facing)
    }
}
