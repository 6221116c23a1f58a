//! # Tabulite - Column-Typed Text Tables for the Terminal
//!
//! `tabulite` buffers rows of typed values and prints them as an aligned,
//! optionally ANSI-colored text table in one pass.
//!
//! ## Core Concepts
//!
//! - [`ColumnDef`]: a named column with a [`ColumnType`] and [`ColumnFlags`]
//! - [`Table`]: tracks column widths and stores encoded rows
//! - [`CellArg`]: one cell's [`Value`] plus its [`Style`] payload
//! - [`Palette`]: resolves named and RGB colors, caching RGB sequences
//! - [`set_colors_enabled`]: process-wide override of color detection
//!
//! ## Quick Start
//!
//! ```rust
//! use tabulite::{row, CellArg, ColumnDef, ColumnFlags, ColumnType, NamedColor, Palette, Table};
//!
//! let columns = [
//!     ColumnDef::new("ITEM", ColumnType::String),
//!     ColumnDef::new("QTY", ColumnType::Int).flags(ColumnFlags::JUSTIFY_RIGHT),
//!     ColumnDef::new("IN STOCK", ColumnType::Bool).flags(ColumnFlags::EXPLICIT_COLOR),
//! ];
//!
//! let mut table = Table::with_palette(&columns, Palette::new(false)).unwrap();
//! table.add_row(row!["apples", 12, CellArg::colored(NamedColor::Green, true)]).unwrap();
//! table.add_row(row!["pears", 0, CellArg::colored(NamedColor::Red, false)]).unwrap();
//!
//! let text = table.render_to_string().unwrap();
//! assert!(text.starts_with("ITEM    QTY  IN STOCK"));
//! ```
//!
//! [`Table::end`] prints to stdout and releases the table; it consumes the
//! table, so it cannot be used afterwards.
//!
//! ## Row Validation
//!
//! Every row must supply one cell per column, each matching the column's
//! type and carrying the style payload its flags require. A row that fails
//! is discarded whole and the table is left unchanged:
//!
//! ```rust
//! use tabulite::{row, ColumnDef, ColumnType, Palette, Table, TableError};
//!
//! let columns = [ColumnDef::new("N", ColumnType::Int)];
//! let mut table = Table::with_palette(&columns, Palette::new(false)).unwrap();
//!
//! let err = table.add_row(row!["not a number"]).unwrap_err();
//! assert!(matches!(err, TableError::TypeMismatch { .. }));
//! assert!(table.is_empty());
//! ```

mod capability;
mod cell;
mod column;
mod error;
mod palette;
mod render;
mod table;

pub use capability::{colors_enabled, set_color_detector, set_colors_enabled, ColorChoice};
pub use cell::{Cell, CellArg, Decorator, Phase, Style, Value, EMPTY_PLACEHOLDER};
pub use column::{parse_columns, ColumnDef, ColumnFlags, ColumnType};
pub use error::{Result, TableError};
pub use palette::{rgb_channels, NamedColor, Palette};
pub use table::{Row, Table};
