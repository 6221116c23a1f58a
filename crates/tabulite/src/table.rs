//! The table engine: column widths, row validation, and the row store.
//!
//! A [`Table`] borrows its column definitions, seeds each column's width
//! from its header, and grows the widths as rows are added. Rows are
//! buffered until [`Table::end`] prints the whole table at once.
//!
//! ```rust
//! use tabulite::{row, CellArg, ColumnDef, ColumnFlags, ColumnType, NamedColor, Palette, Table};
//!
//! let columns = [
//!     ColumnDef::new("N", ColumnType::Int).flags(ColumnFlags::JUSTIFY_RIGHT),
//!     ColumnDef::new("OK", ColumnType::Bool).flags(ColumnFlags::EXPLICIT_COLOR),
//! ];
//!
//! let mut table = Table::with_palette(&columns, Palette::new(false)).unwrap();
//! table.add_row(row![1, CellArg::colored(NamedColor::Green, true)]).unwrap();
//! table.add_row(row![22, CellArg::colored(NamedColor::Red, false)]).unwrap();
//!
//! assert_eq!(table.widths(), &[2, 3]);
//! assert_eq!(
//!     table.render_to_string().unwrap(),
//!     "N   OK  \n 1  yes  \n22  no  \n"
//! );
//! ```

use std::io::{self, Write};

use crate::cell::{encode, Cell, CellArg};
use crate::column::ColumnDef;
use crate::error::{Result, TableError};
use crate::palette::Palette;
use crate::render;

/// Builds a row argument list, converting each expression into a
/// [`CellArg`](crate::CellArg).
///
/// Bare values become plain cells; styled cells are passed as `CellArg`s.
#[macro_export]
macro_rules! row {
    ($($cell:expr),* $(,)?) => {
        vec![$($crate::CellArg::from($cell)),*]
    };
}

/// A committed row: exactly one encoded cell per column.
#[derive(Clone, Debug)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// A buffered text table over caller-owned column definitions.
#[derive(Debug)]
pub struct Table<'a> {
    columns: &'a [ColumnDef],
    widths: Vec<usize>,
    rows: Vec<Row>,
    palette: Palette,
}

impl<'a> Table<'a> {
    /// Starts a table that follows the process-wide color capability.
    pub fn begin(columns: &'a [ColumnDef]) -> Result<Self> {
        Self::with_palette(columns, Palette::global())
    }

    /// Starts a table that resolves colors through `palette`.
    ///
    /// Fails if a column combines mutually exclusive style flags or if the
    /// width storage cannot be reserved.
    pub fn with_palette(columns: &'a [ColumnDef], palette: Palette) -> Result<Self> {
        for (index, column) in columns.iter().enumerate() {
            column.validate(index)?;
        }

        let mut widths = Vec::new();
        widths.try_reserve_exact(columns.len())?;
        widths.extend(columns.iter().map(|c| c.name.len()));

        tracing::debug!(columns = columns.len(), "table begin");
        Ok(Table {
            columns,
            widths,
            rows: Vec::new(),
            palette,
        })
    }

    /// Encodes and appends one row.
    ///
    /// Cells are matched to columns in order. If any cell fails to encode,
    /// nothing is stored and the table is left exactly as it was.
    pub fn add_row<I>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = CellArg>,
    {
        match self.build_row(cells) {
            Ok(row) => {
                self.commit(row)?;
                Ok(())
            }
            Err(err) => {
                tracing::debug!(error = %err, row = self.rows.len(), "row rejected");
                Err(err)
            }
        }
    }

    fn build_row<I>(&self, cells: I) -> Result<Row>
    where
        I: IntoIterator<Item = CellArg>,
    {
        let args: Vec<CellArg> = cells.into_iter().collect();
        if args.len() != self.columns.len() {
            return Err(TableError::ArityMismatch {
                expected: self.columns.len(),
                actual: args.len(),
            });
        }

        let mut cells = Vec::new();
        cells.try_reserve_exact(args.len())?;
        for (index, (column, arg)) in self.columns.iter().zip(args).enumerate() {
            cells.push(encode(index, column, arg)?);
        }
        Ok(Row { cells })
    }

    fn commit(&mut self, row: Row) -> Result<()> {
        self.rows.try_reserve(1)?;
        for (width, cell) in self.widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.width());
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &'a [ColumnDef] {
        self.columns
    }

    /// Current column widths: the longest of each header and its cells.
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of committed rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Writes the table to `out` without consuming it.
    pub fn render_to(&self, out: &mut dyn Write) -> io::Result<()> {
        render::render(self, out)
    }

    /// Renders the table into a string.
    pub fn render_to_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.render_to(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Prints the table to stdout and releases it.
    pub fn end(self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.end_to(&mut out)
    }

    /// Writes the table to `out` and releases it.
    pub fn end_to(self, out: &mut dyn Write) -> Result<()> {
        self.render_to(out)?;
        out.flush()?;
        tracing::debug!(rows = self.rows.len(), "table end");
        Ok(())
    }
}
