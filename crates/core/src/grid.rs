//! Grid module - fixed-size tile map
//!
//! The grid owns a tile arena (the palette) and a flat row-major array of
//! [`TileId`] handles, one per cell. Placing the same handle in many cells is
//! the normal way to fill a map: the cells share one tile without aliasing.
//!
//! Coordinates are `(row, col)`. Lookups take signed coordinates so callers can
//! probe neighbours past the edge; anything outside the grid reads as `None`.

use std::fmt;

use crate::movement::{Trigger, TriggerKind};
use crate::tile::Tile;
use crate::types::ConfigError;

/// Handle into a grid's tile arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(usize);

impl TileId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Rectangular tile map. Dimensions never change after construction.
pub struct Grid<C> {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile<C>>,
    /// Row-major (row * cols + col)
    cells: Vec<TileId>,
}

impl<C> fmt::Debug for Grid<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("tiles", &self.tiles.len())
            .finish()
    }
}

impl<C> Grid<C> {
    /// Fill a `rows` x `cols` grid with a single tile.
    pub fn filled(rows: usize, cols: usize, tile: Tile<C>) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        Ok(Self {
            rows,
            cols,
            tiles: vec![tile],
            cells: vec![TileId(0); rows * cols],
        })
    }

    /// Build from a palette and rows of palette indices.
    pub fn from_ids(tiles: Vec<Tile<C>>, rows: Vec<Vec<usize>>) -> Result<Self, ConfigError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(ConfigError::RaggedRow {
                    row: r,
                    expected: cols,
                    found: row.len(),
                });
            }
            for (c, &id) in row.iter().enumerate() {
                if id >= tiles.len() {
                    return Err(ConfigError::UnknownTile { row: r, col: c, id });
                }
                cells.push(TileId(id));
            }
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            tiles,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    fn index(&self, row: i64, col: i64) -> Option<usize> {
        if row < 0 || col < 0 || row >= self.rows as i64 || col >= self.cols as i64 {
            return None;
        }
        Some((row as usize) * self.cols + (col as usize))
    }

    pub fn contains(&self, row: i64, col: i64) -> bool {
        self.index(row, col).is_some()
    }

    /// Tile at `(row, col)`, or `None` outside the grid.
    pub fn tile(&self, row: i64, col: i64) -> Option<&Tile<C>> {
        self.index(row, col)
            .map(|i| &self.tiles[self.cells[i].index()])
    }

    pub fn tile_id(&self, row: i64, col: i64) -> Option<TileId> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Tile arena in insertion order.
    pub fn palette(&self) -> &[Tile<C>] {
        &self.tiles
    }

    /// Add a tile to the arena without placing it.
    pub fn add_tile(&mut self, tile: Tile<C>) -> TileId {
        self.tiles.push(tile);
        TileId(self.tiles.len() - 1)
    }

    /// Point a cell at an arena tile.
    /// Returns false if the cell is out of bounds or the id is unknown.
    pub fn set(&mut self, row: usize, col: usize, id: TileId) -> bool {
        if id.index() >= self.tiles.len() {
            return false;
        }
        match self.index(row as i64, col as i64) {
            Some(i) => {
                self.cells[i] = id;
                true
            }
            None => false,
        }
    }

    /// Invoke the hook named by `trigger`.
    /// Returns false if the cell is gone or nothing is bound.
    pub fn fire(&self, trigger: Trigger, ctx: &mut C) -> bool {
        let Some(tile) = self.tile(trigger.row as i64, trigger.col as i64) else {
            return false;
        };
        match trigger.kind {
            TriggerKind::Enter => tile.enter_hook().invoke(ctx),
            TriggerKind::Interact => tile.interact_hook().invoke(ctx),
        }
    }
}

/// Builds a grid from text rows and a legend of one char per tile.
///
/// ```
/// use tui_tiles_core::{GridBuilder, Tile};
/// use tui_tiles_types::Back;
///
/// let grid = GridBuilder::<()>::new()
///     .tile('#', Tile::solid('▓', Back::White).unwrap().blocking())
///     .tile('.', Tile::solid(' ', Back::Green).unwrap())
///     .build(&["###", "#.#", "###"])
///     .unwrap();
///
/// assert_eq!(grid.rows(), 3);
/// assert_eq!(grid.palette().len(), 2);
/// assert!(grid.tile(0, 0).unwrap().blocks_movement());
/// ```
pub struct GridBuilder<C> {
    legend: Vec<(char, usize)>,
    tiles: Vec<Tile<C>>,
}

impl<C> Default for GridBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> GridBuilder<C> {
    pub fn new() -> Self {
        Self {
            legend: Vec::new(),
            tiles: Vec::new(),
        }
    }

    /// Bind a legend char to a tile. Rebinding a char replaces its tile.
    pub fn tile(mut self, ch: char, tile: Tile<C>) -> Self {
        if let Some(&(_, id)) = self.legend.iter().find(|(c, _)| *c == ch) {
            self.tiles[id] = tile;
        } else {
            self.tiles.push(tile);
            self.legend.push((ch, self.tiles.len() - 1));
        }
        self
    }

    pub fn build(self, rows: &[&str]) -> Result<Grid<C>, ConfigError> {
        let mut ids = Vec::with_capacity(rows.len());
        for (r, line) in rows.iter().enumerate() {
            let mut row = Vec::with_capacity(line.chars().count());
            for (c, ch) in line.chars().enumerate() {
                let id = self
                    .legend
                    .iter()
                    .find(|(l, _)| *l == ch)
                    .map(|&(_, id)| id)
                    .ok_or(ConfigError::UnknownLegend { row: r, col: c, ch })?;
                row.push(id);
            }
            ids.push(row);
        }
        Grid::from_ids(self.tiles, ids)
    }
}
