//! Terminal rendering module.
//!
//! The pure half turns the world into styled text lines; the I/O half pushes
//! those lines to a terminal.
//!
//! - [`compositor`]: viewport composition with neighbour-aware glyph blending
//! - [`overlay`]: static screens (sizing prompt, control legend)
//! - [`printer`]: animated character-by-character text
//! - [`console`]: the output seam ([`Console`]) and an in-memory sink
//! - [`renderer`]: crossterm-backed [`TerminalRenderer`]
//!
//! Lines carry ANSI style tokens inline. Monochrome output is produced by
//! stripping those tokens after composition, see
//! [`strip_tokens`](crate::types::style::strip_tokens).

pub mod compositor;
pub mod console;
pub mod overlay;
pub mod printer;
pub mod renderer;

pub use tui_tiles_core as core;
pub use tui_tiles_types as types;

pub use compositor::{render, render_into};
pub use console::{BufferConsole, Console};
pub use overlay::{legend, sizing_prompt};
pub use printer::TextPrinter;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
