//! ANSI style tokens.
//!
//! Tokens are plain SGR escape strings so they can be concatenated into
//! composed text and later removed by exact match (monochrome mode).

/// Background color tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Back {
    #[default]
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Reset,
}

impl Back {
    pub const ALL: [Back; 9] = [
        Back::Black,
        Back::Red,
        Back::Green,
        Back::Yellow,
        Back::Blue,
        Back::Magenta,
        Back::Cyan,
        Back::White,
        Back::Reset,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Back::Black => "\x1b[40m",
            Back::Red => "\x1b[41m",
            Back::Green => "\x1b[42m",
            Back::Yellow => "\x1b[43m",
            Back::Blue => "\x1b[44m",
            Back::Magenta => "\x1b[45m",
            Back::Cyan => "\x1b[46m",
            Back::White => "\x1b[47m",
            Back::Reset => "\x1b[49m",
        }
    }
}

/// Foreground color tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Fore {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    #[default]
    White,
    Reset,
}

impl Fore {
    pub const ALL: [Fore; 9] = [
        Fore::Black,
        Fore::Red,
        Fore::Green,
        Fore::Yellow,
        Fore::Blue,
        Fore::Magenta,
        Fore::Cyan,
        Fore::White,
        Fore::Reset,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Fore::Black => "\x1b[30m",
            Fore::Red => "\x1b[31m",
            Fore::Green => "\x1b[32m",
            Fore::Yellow => "\x1b[33m",
            Fore::Blue => "\x1b[34m",
            Fore::Magenta => "\x1b[35m",
            Fore::Cyan => "\x1b[36m",
            Fore::White => "\x1b[37m",
            Fore::Reset => "\x1b[39m",
        }
    }
}

/// Intensity and reset tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Bright,
    Dim,
    Normal,
    ResetAll,
}

impl Style {
    pub const ALL: [Style; 4] = [Style::Bright, Style::Dim, Style::Normal, Style::ResetAll];

    pub fn code(self) -> &'static str {
        match self {
            Style::Bright => "\x1b[1m",
            Style::Dim => "\x1b[2m",
            Style::Normal => "\x1b[22m",
            Style::ResetAll => "\x1b[0m",
        }
    }
}

/// Every token known to the engine, in stripping order.
pub const ALL_TOKENS: [&str; 22] = [
    "\x1b[40m", "\x1b[41m", "\x1b[42m", "\x1b[43m", "\x1b[44m", "\x1b[45m", "\x1b[46m",
    "\x1b[47m", "\x1b[49m", "\x1b[30m", "\x1b[31m", "\x1b[32m", "\x1b[33m", "\x1b[34m",
    "\x1b[35m", "\x1b[36m", "\x1b[37m", "\x1b[39m", "\x1b[1m", "\x1b[2m", "\x1b[22m",
    "\x1b[0m",
];

/// Remove every known token from `text`.
///
/// Tokens are removed one kind at a time in [`ALL_TOKENS`] order. Glyphs are
/// never control characters, so a removal cannot splice a new escape
/// sequence together and the pass is idempotent.
///
/// # Examples
///
/// ```
/// use tui_tiles_types::style::{strip_tokens, Back, Style};
///
/// let text = format!("{}##{}", Back::Green.code(), Style::ResetAll.code());
/// assert_eq!(strip_tokens(&text), "##");
/// ```
pub fn strip_tokens(text: &str) -> String {
    let mut out = text.to_owned();
    for token in ALL_TOKENS {
        if out.contains(token) {
            out = out.replace(token, "");
        }
    }
    out
}
