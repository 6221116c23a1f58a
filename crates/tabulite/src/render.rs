//! Final rendering pass: header, then every row, padded to the column widths.
//!
//! Every cell is followed by a two-space separator. Padding is only emitted
//! for columns that are not the last one: before the text for
//! right-justified columns, after it otherwise. Per cell, the output order
//! is:
//!
//! ```text
//! [left pad] [color] [bold] [decorator start] text "  " [decorator end] [reset color] [reset bold] [right pad]
//! ```
//!
//! The table's palette is pinned at the start of a render, so a color
//! capability change mid-render cannot leave a start sequence without its
//! reset.

use std::io::{self, Write};

use crate::cell::{Cell, Phase, Style};
use crate::column::ColumnDef;
use crate::palette::Palette;
use crate::table::{Row, Table};

const SEPARATOR: &str = "  ";

pub(crate) fn render(table: &Table<'_>, out: &mut dyn Write) -> io::Result<()> {
    let columns = table.columns();
    let widths = table.widths();
    let palette = table.palette().pinned();

    write_header(columns, widths, out)?;
    for row in table.rows() {
        write_row(columns, widths, row, &palette, out)?;
    }
    Ok(())
}

fn pad(out: &mut dyn Write, n: usize) -> io::Result<()> {
    write!(out, "{:n$}", "")
}

fn write_header(columns: &[ColumnDef], widths: &[usize], out: &mut dyn Write) -> io::Result<()> {
    for (i, column) in columns.iter().enumerate() {
        write!(out, "{}{}", column.name, SEPARATOR)?;
        if i + 1 < columns.len() {
            pad(out, widths[i].saturating_sub(column.name.len()))?;
        }
    }
    writeln!(out)
}

fn write_row(
    columns: &[ColumnDef],
    widths: &[usize],
    row: &Row,
    palette: &Palette,
    out: &mut dyn Write,
) -> io::Result<()> {
    for (i, (column, cell)) in columns.iter().zip(row.cells()).enumerate() {
        let is_last = i + 1 == columns.len();
        let fill = widths[i].saturating_sub(cell.width());

        if column.is_right_justified() && !is_last {
            pad(out, fill)?;
        }
        write_cell(column, cell, palette, out)?;
        if !column.is_right_justified() && !is_last {
            pad(out, fill)?;
        }
    }
    writeln!(out)
}

fn write_cell(
    column: &ColumnDef,
    cell: &Cell,
    palette: &Palette,
    out: &mut dyn Write,
) -> io::Result<()> {
    if column.is_colored() {
        match cell.style() {
            Style::Color(color) => out.write_all(palette.named(*color).as_bytes())?,
            Style::Rgb(code) => out.write_all(palette.rgb(*code).as_bytes())?,
            Style::Plain | Style::Custom(_) => {}
        }
    }
    if column.is_bold() {
        out.write_all(palette.bold().as_bytes())?;
    }
    let decorator = cell.decorator().filter(|_| column.is_custom());
    if let Some(decorator) = decorator {
        decorator.call(Phase::Start, out)?;
    }

    write!(out, "{}{}", cell.display_text(), SEPARATOR)?;

    if let Some(decorator) = decorator {
        decorator.call(Phase::End, out)?;
    }
    if column.is_colored() {
        out.write_all(palette.reset_color().as_bytes())?;
    }
    if column.is_bold() {
        out.write_all(palette.reset_bold().as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cell::{CellArg, Decorator, Phase, Value};
    use crate::column::{ColumnDef, ColumnFlags, ColumnType};
    use crate::palette::{NamedColor, Palette};
    use crate::row;
    use crate::table::Table;

    #[test]
    fn test_header_only_for_empty_table() {
        let cols = vec![
            ColumnDef::new("ONE", ColumnType::Int),
            ColumnDef::new("TWO", ColumnType::Int),
        ];
        let table = Table::with_palette(&cols, Palette::new(false)).unwrap();
        assert_eq!(table.render_to_string().unwrap(), "ONE  TWO  \n");
    }

    #[test]
    fn test_no_columns_renders_bare_newlines() {
        let cols: Vec<ColumnDef> = Vec::new();
        let mut table = Table::with_palette(&cols, Palette::new(false)).unwrap();
        table.add_row(Vec::new()).unwrap();
        assert_eq!(table.render_to_string().unwrap(), "\n\n");
    }

    #[test]
    fn test_left_and_right_justification() {
        let cols = vec![
            ColumnDef::new("L", ColumnType::String),
            ColumnDef::new("R", ColumnType::Int).flags(ColumnFlags::JUSTIFY_RIGHT),
            ColumnDef::new("END", ColumnType::String),
        ];
        let mut table = Table::with_palette(&cols, Palette::new(false)).unwrap();
        table.add_row(row!["abc", 5, "x"]).unwrap();
        table.add_row(row!["a", 1000, "y"]).unwrap();

        let out = table.render_to_string().unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "L    R     END  ");
        assert_eq!(lines[1], "abc     5  x  ");
        assert_eq!(lines[2], "a    1000  y  ");
    }

    #[test]
    fn test_last_column_is_never_padded() {
        let cols = vec![ColumnDef::new("LAST", ColumnType::Int).flags(ColumnFlags::JUSTIFY_RIGHT)];
        let mut table = Table::with_palette(&cols, Palette::new(false)).unwrap();
        table.add_row(row![1]).unwrap();
        table.add_row(row![123456]).unwrap();
        assert_eq!(
            table.render_to_string().unwrap(),
            "LAST  \n1  \n123456  \n"
        );
    }

    #[test]
    fn test_rgb_cell_sequence() {
        let cols = vec![ColumnDef::new("C", ColumnType::String).flags(ColumnFlags::RGB_COLOR)];
        let mut table = Table::with_palette(&cols, Palette::new(true)).unwrap();
        table.add_row(row![CellArg::rgb(0xFF00_8000, "hi")]).unwrap();
        assert_eq!(
            table.render_to_string().unwrap(),
            "C  \n\x1b[38;2;255;0;128mhi  \x1b[m\n"
        );
    }

    #[test]
    fn test_bold_colored_ordering() {
        let cols = vec![ColumnDef::new("C", ColumnType::Bool)
            .flags(ColumnFlags::BOLD | ColumnFlags::EXPLICIT_COLOR)];
        let mut table = Table::with_palette(&cols, Palette::new(true)).unwrap();
        table
            .add_row(row![CellArg::colored(NamedColor::Green, true)])
            .unwrap();
        let out = table.render_to_string().unwrap();
        assert_eq!(
            out.lines().nth(1).unwrap(),
            "\x1b[32m\x1b[1myes  \x1b[m\x1b[22m"
        );
    }

    #[test]
    fn test_decorator_wraps_text_and_separator() {
        let cols = vec![
            ColumnDef::new("M", ColumnType::Long).flags(ColumnFlags::CUSTOM),
            ColumnDef::new("Z", ColumnType::Int),
        ];
        let deco = Decorator::new(|phase, out| match phase {
            Phase::Start => out.write_all(b"["),
            Phase::End => out.write_all(b"]"),
        });
        let mut table = Table::with_palette(&cols, Palette::new(false)).unwrap();
        table
            .add_row(row![CellArg::custom(deco, 42i64), 0])
            .unwrap();
        let out = table.render_to_string().unwrap();
        // Decorator output does not count toward width.
        assert_eq!(out.lines().nth(1).unwrap(), "[42  ]0  ");
    }

    #[test]
    fn test_missing_value_placeholder() {
        let cols = vec![
            ColumnDef::new("S", ColumnType::String),
            ColumnDef::new("T", ColumnType::Int),
        ];
        let mut table = Table::with_palette(&cols, Palette::new(false)).unwrap();
        table.add_row(row![Value::Missing, 1]).unwrap();
        table.add_row(row!["ab", 2]).unwrap();
        let out = table.render_to_string().unwrap();
        assert_eq!(out, "S        T  \n<empty>  1  \nab       2  \n");
    }
}
