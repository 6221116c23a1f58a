//! Escape-sequence resolution for cell colors and bold text.
//!
//! A [`Palette`] turns color requests into ANSI escape sequences:
//!
//! - [`NamedColor`]: the eight basic colors plus the terminal default,
//!   emitted as `ESC[3Xm`.
//! - Packed RGB codes (`u64`): the top three bytes of the low 32 bits are the
//!   red, green and blue channels, emitted as `ESC[38;2;R;G;Bm`. Formatted
//!   sequences are cached per code and shared on later lookups.
//!
//! Every resolver returns an empty string while color is disabled, so a
//! palette is the single gate for escape output.
//!
//! ```rust
//! use tabulite::{NamedColor, Palette};
//!
//! let palette = Palette::new(true);
//! assert_eq!(palette.named(NamedColor::Red), "\x1b[31m");
//! assert_eq!(&*palette.rgb(0xFF00_8000), "\x1b[38;2;255;0;128m");
//!
//! let plain = Palette::new(false);
//! assert_eq!(&*plain.rgb(0xFF00_8000), "");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::Lazy;

use crate::capability::{colors_enabled, ColorChoice};
use crate::error::TableError;

const BOLD: &str = "\x1b[1m";
const RESET_COLOR: &str = "\x1b[m";
const RESET_BOLD: &str = "\x1b[22m";

/// The closed set of named terminal colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    /// The terminal's default foreground.
    Default,
}

impl NamedColor {
    /// The foreground escape sequence for this color.
    pub fn sequence(&self) -> &'static str {
        match self {
            NamedColor::Black => "\x1b[30m",
            NamedColor::Red => "\x1b[31m",
            NamedColor::Green => "\x1b[32m",
            NamedColor::Yellow => "\x1b[33m",
            NamedColor::Blue => "\x1b[34m",
            NamedColor::Magenta => "\x1b[35m",
            NamedColor::Cyan => "\x1b[36m",
            NamedColor::White => "\x1b[37m",
            NamedColor::Default => "\x1b[39m",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            NamedColor::Black => "black",
            NamedColor::Red => "red",
            NamedColor::Green => "green",
            NamedColor::Yellow => "yellow",
            NamedColor::Blue => "blue",
            NamedColor::Magenta => "magenta",
            NamedColor::Cyan => "cyan",
            NamedColor::White => "white",
            NamedColor::Default => "default",
        }
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedColor {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(NamedColor::Black),
            "red" => Ok(NamedColor::Red),
            "green" => Ok(NamedColor::Green),
            "yellow" => Ok(NamedColor::Yellow),
            "blue" => Ok(NamedColor::Blue),
            "magenta" => Ok(NamedColor::Magenta),
            "cyan" => Ok(NamedColor::Cyan),
            "white" => Ok(NamedColor::White),
            "default" => Ok(NamedColor::Default),
            _ => Err(TableError::UnknownColor(s.to_string())),
        }
    }
}

/// Converts an SGR color digit (`0..=7`, or `9` for the default color).
impl TryFrom<u8> for NamedColor {
    type Error = TableError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(NamedColor::Black),
            1 => Ok(NamedColor::Red),
            2 => Ok(NamedColor::Green),
            3 => Ok(NamedColor::Yellow),
            4 => Ok(NamedColor::Blue),
            5 => Ok(NamedColor::Magenta),
            6 => Ok(NamedColor::Cyan),
            7 => Ok(NamedColor::White),
            9 => Ok(NamedColor::Default),
            other => Err(TableError::UnknownColor(other.to_string())),
        }
    }
}

/// Splits a packed color code into its red, green and blue channels.
///
/// ```rust
/// assert_eq!(tabulite::rgb_channels(0x1122_3344), (0x11, 0x22, 0x33));
/// ```
pub fn rgb_channels(code: u64) -> (u8, u8, u8) {
    (
        ((code >> 24) & 0xFF) as u8,
        ((code >> 16) & 0xFF) as u8,
        ((code >> 8) & 0xFF) as u8,
    )
}

static GLOBAL: Lazy<Palette> = Lazy::new(Palette::default);

/// Color context the renderer resolves cell styles through.
///
/// Clones share the same sequence cache. A palette is either fixed on or
/// off, or follows the process-wide capability (see
/// [`colors_enabled`](crate::colors_enabled)).
#[derive(Clone, Debug, Default)]
pub struct Palette {
    /// `None` follows the process-wide capability.
    enabled: Option<bool>,
    sequences: Arc<Mutex<HashMap<u64, Arc<str>>>>,
}

impl Palette {
    /// Creates a palette with color fixed on or off and an empty cache.
    pub fn new(enabled: bool) -> Self {
        Palette {
            enabled: Some(enabled),
            sequences: Arc::default(),
        }
    }

    /// The process-wide palette, following the process-wide capability.
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    /// Picks a palette for a user color preference.
    pub fn from_choice(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Palette::global(),
            ColorChoice::Always => Palette::new(true),
            ColorChoice::Never => Palette::new(false),
        }
    }

    /// Whether this palette currently emits escape sequences.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or_else(colors_enabled)
    }

    /// A palette fixed to this one's current on/off state, sharing its cache.
    ///
    /// Rendering pins the palette once so every sequence in one pass agrees.
    pub fn pinned(&self) -> Self {
        Palette {
            enabled: Some(self.is_enabled()),
            sequences: Arc::clone(&self.sequences),
        }
    }

    /// Sequence for a named color.
    pub fn named(&self, color: NamedColor) -> &'static str {
        if self.is_enabled() {
            color.sequence()
        } else {
            ""
        }
    }

    /// Sequence for a packed RGB code, formatted once per distinct code.
    pub fn rgb(&self, code: u64) -> Arc<str> {
        if !self.is_enabled() {
            return Arc::from("");
        }

        let mut sequences = self
            .sequences
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(sequence) = sequences.get(&code) {
            return Arc::clone(sequence);
        }

        let (r, g, b) = rgb_channels(code);
        let sequence: Arc<str> = Arc::from(format!("\x1b[38;2;{};{};{}m", r, g, b));
        tracing::trace!(code, "cached rgb sequence");
        sequences.insert(code, Arc::clone(&sequence));
        sequence
    }

    /// Sequence that starts bold text.
    pub fn bold(&self) -> &'static str {
        if self.is_enabled() {
            BOLD
        } else {
            ""
        }
    }

    /// Sequence that restores the default color.
    pub fn reset_color(&self) -> &'static str {
        if self.is_enabled() {
            RESET_COLOR
        } else {
            ""
        }
    }

    /// Sequence that ends bold text.
    pub fn reset_bold(&self) -> &'static str {
        if self.is_enabled() {
            RESET_BOLD
        } else {
            ""
        }
    }

    /// Number of distinct RGB codes formatted so far.
    pub fn cached_sequences(&self) -> usize {
        self.sequences
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
