//! Prints a table of synthetic records, one column drawn concealed.

use anyhow::{Context, Result};
use clap::Parser;
use tabulite::{
    row, CellArg, ColumnDef, ColumnFlags, ColumnType, Decorator, NamedColor, Phase, Table,
};
use tabulite_demos::{init_tracing, ColorArgs};

/// Print a table of synthetic records
#[derive(Debug, Parser)]
#[command(name = "synth")]
struct Cli {
    /// Number of rows to generate
    #[arg(long, default_value_t = 10)]
    rows: i32,

    #[command(flatten)]
    color: ColorArgs,
}

fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("FOO", ColumnType::Int).flags(ColumnFlags::JUSTIFY_RIGHT),
        ColumnDef::new("IS GREEN", ColumnType::Bool).flags(
            ColumnFlags::BOLD | ColumnFlags::JUSTIFY_RIGHT | ColumnFlags::EXPLICIT_COLOR,
        ),
        ColumnDef::new("BAR", ColumnType::String),
        ColumnDef::new("MAGIC", ColumnType::Long).flags(ColumnFlags::CUSTOM),
    ]
}

/// Toggles concealed text around a cell, only when color is on.
fn concealed(enabled: bool) -> Decorator {
    Decorator::new(move |phase, out| {
        if !enabled {
            return Ok(());
        }
        match phase {
            Phase::Start => out.write_all(b"\x1b[8m"),
            Phase::End => out.write_all(b"\x1b[28m"),
        }
    })
}

fn fill(table: &mut Table<'_>, rows: i32) -> Result<()> {
    let magic = concealed(table.palette().is_enabled());
    for i in 0..rows {
        let green = i % 2 == 1;
        let color = if green {
            NamedColor::Green
        } else {
            NamedColor::Red
        };
        table.add_row(row![
            i + 1,
            CellArg::colored(color, green),
            format!("Testing 123 -> {}", i + 42),
            CellArg::custom(magic.clone(), 42i64),
        ])?;
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let columns = columns();
    let mut table =
        Table::with_palette(&columns, cli.color.palette()).context("could not init table")?;
    fill(&mut table, cli.rows)?;
    table.end()?;
    Ok(())
}
