//! Compositor: maps a grid and a player into styled terminal lines.
//!
//! This module is pure (no I/O). Rendering twice with the same inputs gives
//! identical lines.
//!
//! Every tile becomes three terminal columns. How the columns are filled
//! depends on the tile's [`Slot`]:
//!
//! | Slot   | Columns                                              |
//! |--------|------------------------------------------------------|
//! | Solid  | own, own, own                                        |
//! | Left   | own, right neighbour, right neighbour                |
//! | Right  | own, left neighbour, left neighbour                  |
//! | Center | bracket, own, bracket (bracket = left, below, above) |
//!
//! Each column is prefixed by the background token of the tile it came from.

use arrayvec::ArrayVec;

use crate::core::{Grid, Inventory, Player};
use crate::types::style::strip_tokens;
use crate::types::{Back, Slot, Style, Viewport, FALLBACK_COLOR, FALLBACK_GLYPH, TILE_COLUMNS};

/// Compose the viewport centred on the player.
///
/// With `inventory`, item labels are appended to the lines starting at line 2.
/// With `monochrome`, every style token is stripped from the finished lines.
pub fn render<C>(
    grid: &Grid<C>,
    player: &Player,
    viewport: Viewport,
    inventory: Option<&Inventory>,
    monochrome: bool,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(usize::from(viewport.height));
    render_into(grid, player, viewport, inventory, monochrome, &mut lines);
    lines
}

/// Same as [`render`], reusing `out`'s allocation across frames.
pub fn render_into<C>(
    grid: &Grid<C>,
    player: &Player,
    viewport: Viewport,
    inventory: Option<&Inventory>,
    monochrome: bool,
    out: &mut Vec<String>,
) {
    out.clear();

    let player_row = player.row as i64;
    let player_col = player.col as i64;
    let top = player_row - viewport.half_height();
    let left = player_col - viewport.half_width();

    for row in top..top + i64::from(viewport.height) {
        // Tokens are 5 bytes, glyphs up to 4.
        let mut line = String::with_capacity(viewport.columns() * 9);
        for col in left..left + i64::from(viewport.width) {
            if row == player_row && col == player_col {
                push_player_cell(&mut line, grid, player);
            } else {
                push_cell(&mut line, grid, row, col);
            }
        }
        line.push_str(Style::ResetAll.code());
        out.push(line);
    }

    if let Some(inventory) = inventory {
        overlay_inventory(out, inventory);
    }

    if monochrome {
        for line in out.iter_mut() {
            *line = strip_tokens(line);
        }
    }
}

fn push_glyph(line: &mut String, color: Back, glyph: char) {
    line.push_str(color.code());
    line.push(glyph);
}

fn push_blank(line: &mut String, columns: usize) {
    line.push_str(Back::Reset.code());
    line.extend(std::iter::repeat(' ').take(columns));
}

fn push_cell<C>(line: &mut String, grid: &Grid<C>, row: i64, col: i64) {
    let Some(tile) = grid.tile(row, col) else {
        push_blank(line, TILE_COLUMNS);
        return;
    };
    let (glyph, color) = (tile.glyph(), tile.color());

    match tile.slot() {
        Slot::Solid => {
            for _ in 0..TILE_COLUMNS {
                push_glyph(line, color, glyph);
            }
        }
        Slot::Left | Slot::Right => {
            push_glyph(line, color, glyph);
            let side = if tile.slot() == Slot::Left { 1 } else { -1 };
            match grid.tile(row, col + side) {
                Some(n) => {
                    push_glyph(line, n.color(), n.glyph());
                    push_glyph(line, n.color(), n.glyph());
                }
                None => push_blank(line, TILE_COLUMNS - 1),
            }
        }
        Slot::Center => {
            let bracket = grid
                .tile(row, col - 1)
                .or_else(|| grid.tile(row + 1, col))
                .or_else(|| grid.tile(row - 1, col));
            match bracket {
                Some(n) => {
                    push_glyph(line, n.color(), n.glyph());
                    push_glyph(line, color, glyph);
                    push_glyph(line, n.color(), n.glyph());
                }
                None => {
                    line.push_str(color.code());
                    line.push(' ');
                    line.push(glyph);
                    line.push(' ');
                }
            }
        }
    }
}

/// Background glyph and color drawn around the player token.
///
/// A solid tile under the player is used as is. Otherwise the solid tiles
/// among the left, right, up and down neighbours vote: the most frequent glyph
/// and, separately, the most frequent color win, ties going to the earliest in
/// that scan order.
pub fn player_background<C>(grid: &Grid<C>, player: &Player) -> (char, Back) {
    let row = player.row as i64;
    let col = player.col as i64;

    if let Some(tile) = grid.tile(row, col) {
        if tile.slot() == Slot::Solid {
            return (tile.glyph(), tile.color());
        }
    }

    let mut glyphs = ArrayVec::<char, 4>::new();
    let mut colors = ArrayVec::<Back, 4>::new();
    for (dr, dc) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
        if let Some(tile) = grid.tile(row + dr, col + dc) {
            if tile.slot() == Slot::Solid {
                glyphs.push(tile.glyph());
                colors.push(tile.color());
            }
        }
    }

    match (most_frequent(&glyphs), most_frequent(&colors)) {
        (Some(glyph), Some(color)) => (glyph, color),
        _ => (FALLBACK_GLYPH, FALLBACK_COLOR),
    }
}

fn push_player_cell<C>(line: &mut String, grid: &Grid<C>, player: &Player) {
    let (glyph, color) = player_background(grid, player);
    push_glyph(line, color, glyph);
    line.push_str(Style::Bright.code());
    line.push(player.glyph());
    line.push_str(Style::Normal.code());
    push_glyph(line, color, glyph);
}

/// Most frequent item; the first one seen wins a tie.
fn most_frequent<T: Copy + PartialEq>(items: &[T]) -> Option<T> {
    let mut best: Option<(T, usize)> = None;
    for &candidate in items {
        let count = items.iter().filter(|&&x| x == candidate).count();
        if best.map_or(true, |(_, n)| count > n) {
            best = Some((candidate, count));
        }
    }
    best.map(|(item, _)| item)
}

fn overlay_inventory(lines: &mut [String], inventory: &Inventory) {
    for (i, item) in inventory.iter().enumerate() {
        let Some(line) = lines.get_mut(i + 2) else {
            tracing::trace!(
                dropped = inventory.len() - i,
                "inventory overlay longer than viewport"
            );
            break;
        };
        line.push('\t');
        line.push_str(&item.label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GridBuilder, InventoryItem, Tile};
    use crate::types::Direction;

    fn solid(glyph: char, color: Back) -> Tile<()> {
        Tile::solid(glyph, color).unwrap()
    }

    #[test]
    fn most_frequent_breaks_ties_by_order() {
        assert_eq!(most_frequent(&['a', 'b', 'b', 'a']), Some('a'));
        assert_eq!(most_frequent(&['a', 'b', 'b']), Some('b'));
        assert_eq!(most_frequent::<char>(&[]), None);
    }

    #[test]
    fn window_is_viewport_sized() {
        let grid = Grid::filled(3, 3, solid('.', Back::Green)).unwrap();
        let lines = render(&grid, &Player::new(1, 1), Viewport::new(5, 4), None, true);
        assert_eq!(lines.len(), 4);
        for line in &lines {
            assert_eq!(line.chars().count(), 15);
        }
    }

    #[test]
    fn out_of_bounds_cells_are_blank() {
        let grid = Grid::filled(1, 1, solid('#', Back::Red)).unwrap();
        let lines = render(&grid, &Player::new(0, 0), Viewport::new(3, 1), None, true);
        assert_eq!(lines, vec!["   #^#   ".to_string()]);
    }

    #[test]
    fn solid_cells_repeat_with_color() {
        let grid = Grid::filled(1, 2, solid('#', Back::Red)).unwrap();
        let lines = render(&grid, &Player::new(0, 1), Viewport::new(2, 1), None, false);
        let red = Back::Red.code();
        assert!(lines[0].starts_with(&format!("{red}#{red}#{red}#")));
    }

    #[test]
    fn left_slot_borrows_right_neighbour() {
        let grid = GridBuilder::new()
            .tile('.', solid('.', Back::Green))
            .tile('T', solid('T', Back::Green).with_slot(Slot::Left))
            .build(&["T.", ".."])
            .unwrap();
        let lines = render(&grid, &Player::new(1, 1), Viewport::new(2, 2), None, true);
        assert_eq!(lines[0], "T.....");
    }

    #[test]
    fn left_slot_pads_at_right_edge() {
        let grid = GridBuilder::new()
            .tile('.', solid('.', Back::Green))
            .tile('T', solid('T', Back::Green).with_slot(Slot::Left))
            .build(&[".T", ".."])
            .unwrap();
        let lines = render(&grid, &Player::new(1, 1), Viewport::new(2, 2), None, false);
        let expected = format!("{}T{}  ", Back::Green.code(), Back::Reset.code());
        assert!(lines[0].contains(&expected), "{:?}", lines[0]);
    }

    #[test]
    fn right_slot_pads_at_left_edge() {
        let grid = GridBuilder::new()
            .tile('.', solid('.', Back::Green))
            .tile('R', solid('R', Back::Green).with_slot(Slot::Right))
            .build(&["R.", ".."])
            .unwrap();
        let lines = render(&grid, &Player::new(1, 1), Viewport::new(2, 2), None, false);
        let expected = format!("{}R{}  ", Back::Green.code(), Back::Reset.code());
        assert!(lines[0].starts_with(&expected), "{:?}", lines[0]);

        let mono = render(&grid, &Player::new(1, 1), Viewport::new(2, 2), None, true);
        assert!(mono[0].starts_with("R  ..."), "{:?}", mono[0]);
    }

    #[test]
    fn right_slot_borrows_left_neighbour() {
        let grid = GridBuilder::new()
            .tile('.', solid('.', Back::Green))
            .tile('R', solid('R', Back::Green).with_slot(Slot::Right))
            .build(&[".R", ".."])
            .unwrap();
        let lines = render(&grid, &Player::new(1, 1), Viewport::new(2, 2), None, true);
        assert_eq!(lines[0], "...R..");
    }

    #[test]
    fn center_slot_brackets_with_left_neighbour() {
        let grid = GridBuilder::new()
            .tile('.', solid('.', Back::Green))
            .tile('~', solid('~', Back::Blue))
            .tile('o', solid('o', Back::Green).with_slot(Slot::Center))
            .build(&["~o", ".."])
            .unwrap();
        let lines = render(&grid, &Player::new(1, 1), Viewport::new(2, 2), None, true);
        assert_eq!(lines[0], "~~~~o~");
    }

    #[test]
    fn player_background_uses_solid_tile_underneath() {
        let grid = Grid::filled(1, 1, solid('"', Back::Green)).unwrap();
        assert_eq!(
            player_background(&grid, &Player::new(0, 0)),
            ('"', Back::Green)
        );
    }

    #[test]
    fn player_background_votes_among_solid_neighbours() {
        let grid = GridBuilder::new()
            .tile('a', solid('a', Back::Blue))
            .tile('b', solid('b', Back::Green))
            .tile('c', solid('c', Back::Green))
            .tile('o', solid('o', Back::Red).with_slot(Slot::Center))
            .build(&["obo", "aob", "oco"])
            .unwrap();

        // left a/Blue, right b/Green, up b/Green, down c/Green
        assert_eq!(
            player_background(&grid, &Player::new(1, 1)),
            ('b', Back::Green)
        );
    }

    #[test]
    fn player_background_ties_go_to_scan_order() {
        let grid = GridBuilder::new()
            .tile('a', solid('a', Back::Blue))
            .tile('c', solid('c', Back::Green))
            .tile('o', solid('o', Back::Red).with_slot(Slot::Center))
            .build(&["ooo", "aoc", "ooo"])
            .unwrap();

        assert_eq!(
            player_background(&grid, &Player::new(1, 1)),
            ('a', Back::Blue)
        );
    }

    #[test]
    fn player_background_falls_back_without_solid_neighbours() {
        let grid = Grid::filled(2, 2, solid('o', Back::Red).with_slot(Slot::Center)).unwrap();
        assert_eq!(
            player_background(&grid, &Player::new(0, 0)),
            (FALLBACK_GLYPH, FALLBACK_COLOR)
        );
    }

    #[test]
    fn player_cell_marks_direction_brightly() {
        let grid = Grid::filled(1, 1, solid('.', Back::Black)).unwrap();
        let p = Player::new(0, 0).with_facing(Direction::Left);
        let lines = render(&grid, &p, Viewport::new(1, 1), None, false);
        let black = Back::Black.code();
        assert_eq!(
            lines[0],
            format!(
                "{black}.{}<{}{black}.{}",
                Style::Bright.code(),
                Style::Normal.code(),
                Style::ResetAll.code()
            )
        );
    }

    #[test]
    fn inventory_starts_at_line_two_and_drops_overflow() {
        let grid = Grid::filled(3, 3, solid('.', Back::Black)).unwrap();
        let mut inv = Inventory::new();
        for name in ["A", "B", "C"] {
            inv.insert(InventoryItem::replacing(name, 1)).unwrap();
        }

        let lines = render(&grid, &Player::new(1, 1), Viewport::new(1, 4), Some(&inv), true);
        assert!(!lines[0].contains('\t'));
        assert!(!lines[1].contains('\t'));
        assert!(lines[2].ends_with("\tA : 1"));
        assert!(lines[3].ends_with("\tB : 1"));
        assert_eq!(lines.len(), 4);
    }
}
