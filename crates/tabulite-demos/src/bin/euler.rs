//! Approximates e^x with its Taylor series, one table row per term.

use anyhow::{bail, Context, Result};
use clap::Parser;
use tabulite::{row, CellArg, ColumnDef, ColumnFlags, ColumnType, NamedColor, Table};
use tabulite_demos::{init_tracing, ColorArgs};

/// Approximate e^x with its Taylor series
#[derive(Debug, Parser)]
#[command(name = "euler")]
struct Cli {
    /// Exponent to evaluate
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    x: f64,

    /// Stop once a term is at most this large
    #[arg(long, default_value_t = 1e-6)]
    epsilon: f64,

    /// Give up after this many terms
    #[arg(long, default_value_t = 1000)]
    max_terms: i32,

    #[command(flatten)]
    color: ColorArgs,
}

fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("ITERATION", ColumnType::Int).flags(ColumnFlags::JUSTIFY_RIGHT),
        ColumnDef::new("DIFFERENCE", ColumnType::Double).flags(ColumnFlags::JUSTIFY_RIGHT),
        ColumnDef::new("CONVERGES", ColumnType::Bool).flags(ColumnFlags::EXPLICIT_COLOR),
        ColumnDef::new("EXPONENTIAL", ColumnType::Double),
    ]
}

/// Adds one row per series term until a term drops below `epsilon`.
fn taylor(table: &mut Table<'_>, x: f64, epsilon: f64, max_terms: i32) -> Result<f64> {
    let mut exp = 0.0;
    let mut term = 1.0;

    for i in 1..=max_terms {
        exp += term;
        term = term * x / f64::from(i);

        let converges = term.abs() <= epsilon;
        let color = if converges {
            NamedColor::Green
        } else {
            NamedColor::Red
        };
        table.add_row(row![i, term, CellArg::colored(color, converges), exp])?;

        if converges {
            tracing::debug!(terms = i, "series converged");
            return Ok(exp);
        }
    }
    bail!("series did not converge within {} terms", max_terms)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let columns = columns();
    let mut table =
        Table::with_palette(&columns, cli.color.palette()).context("could not init table")?;
    let result = taylor(&mut table, cli.x, cli.epsilon, cli.max_terms);
    table.end()?;
    result.map(|_| ())
}
