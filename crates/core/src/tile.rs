//! Tile module - a single glyph cell of the grid
//!
//! A tile is immutable once built. Behaviour is attached through two hooks:
//! `on_enter` fires when the player walks onto the tile, `on_interact` fires
//! when the player uses the interact command while facing it.

use std::fmt;

use crate::types::{Back, ConfigError, Slot};

/// An optional callback fired with the caller's context.
///
/// Either nothing is bound or a callable is; there is no null function
/// pointer and no identity comparison between hooks.
pub enum Hook<C> {
    None,
    Invoke(Box<dyn Fn(&mut C)>),
}

impl<C> Hook<C> {
    pub fn new(f: impl Fn(&mut C) + 'static) -> Self {
        Hook::Invoke(Box::new(f))
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Hook::Invoke(_))
    }

    /// Run the hook. Returns false when nothing is bound.
    pub fn invoke(&self, ctx: &mut C) -> bool {
        match self {
            Hook::None => false,
            Hook::Invoke(f) => {
                f(ctx);
                true
            }
        }
    }
}

impl<C> Default for Hook<C> {
    fn default() -> Self {
        Hook::None
    }
}

impl<C> fmt::Debug for Hook<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::None => f.write_str("Hook::None"),
            Hook::Invoke(_) => f.write_str("Hook::Invoke(..)"),
        }
    }
}

/// One cell of the grid.
pub struct Tile<C> {
    glyph: char,
    slot: Slot,
    color: Back,
    blocks_movement: bool,
    on_enter: Hook<C>,
    on_interact: Hook<C>,
}

impl<C> fmt::Debug for Tile<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tile")
            .field("glyph", &self.glyph)
            .field("slot", &self.slot)
            .field("color", &self.color)
            .field("blocks_movement", &self.blocks_movement)
            .field("on_enter", &self.on_enter)
            .field("on_interact", &self.on_interact)
            .finish()
    }
}

impl<C> Tile<C> {
    /// A passable solid tile on a black background.
    ///
    /// Fails for control characters, which would corrupt terminal output.
    pub fn new(glyph: char) -> Result<Self, ConfigError> {
        if glyph.is_control() {
            return Err(ConfigError::ControlGlyph(glyph));
        }
        Ok(Self {
            glyph,
            slot: Slot::Solid,
            color: Back::Black,
            blocks_movement: false,
            on_enter: Hook::None,
            on_interact: Hook::None,
        })
    }

    pub fn solid(glyph: char, color: Back) -> Result<Self, ConfigError> {
        Ok(Self::new(glyph)?.with_color(color))
    }

    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slot = slot;
        self
    }

    pub fn with_color(mut self, color: Back) -> Self {
        self.color = color;
        self
    }

    pub fn with_blocking(mut self, blocks_movement: bool) -> Self {
        self.blocks_movement = blocks_movement;
        self
    }

    /// Shorthand for `with_blocking(true)`.
    pub fn blocking(self) -> Self {
        self.with_blocking(true)
    }

    pub fn on_enter(mut self, f: impl Fn(&mut C) + 'static) -> Self {
        self.on_enter = Hook::new(f);
        self
    }

    pub fn on_interact(mut self, f: impl Fn(&mut C) + 'static) -> Self {
        self.on_interact = Hook::new(f);
        self
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn color(&self) -> Back {
        self.color
    }

    pub fn blocks_movement(&self) -> bool {
        self.blocks_movement
    }

    pub fn enter_hook(&self) -> &Hook<C> {
        &self.on_enter
    }

    pub fn interact_hook(&self) -> &Hook<C> {
        &self.on_interact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tile_defaults_to_passable_black_solid() {
        let t: Tile<()> = Tile::new('#').unwrap();
        assert_eq!(t.glyph(), '#');
        assert_eq!(t.slot(), Slot::Solid);
        assert_eq!(t.color(), Back::Black);
        assert!(!t.blocks_movement());
        assert!(!t.enter_hook().is_bound());
        assert!(!t.interact_hook().is_bound());
    }

    #[test]
    fn control_glyphs_are_rejected() {
        assert_eq!(
            Tile::<()>::new('\n').unwrap_err(),
            ConfigError::ControlGlyph('\n')
        );
        assert!(Tile::<()>::solid('\u{1b}', Back::Red).is_err());
    }

    #[test]
    fn hooks_receive_the_context() {
        let t = Tile::new('o')
            .unwrap()
            .on_enter(|n: &mut u32| *n += 1)
            .on_interact(|n: &mut u32| *n += 10);

        let mut n = 0;
        assert!(t.enter_hook().invoke(&mut n));
        assert!(t.interact_hook().invoke(&mut n));
        assert_eq!(n, 11);
    }

    #[test]
    fn unbound_hook_is_a_no_op() {
        let hook: Hook<u32> = Hook::default();
        let mut n = 5;
        assert!(!hook.invoke(&mut n));
        assert_eq!(n, 5);
        assert_eq!(format!("{:?}", hook), "Hook::None");
    }
}
