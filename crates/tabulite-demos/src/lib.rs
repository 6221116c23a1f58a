//! Shared command-line plumbing for the demo binaries.

use clap::Args;
use tabulite::{ColorChoice, Palette};
use tracing_subscriber::EnvFilter;

/// The `--color` flag common to every demo.
#[derive(Debug, Args)]
pub struct ColorArgs {
    /// When to emit color: auto, always or never
    #[arg(long, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

impl ColorArgs {
    pub fn palette(&self) -> Palette {
        Palette::from_choice(self.color)
    }
}

/// Logs to stderr, filtered by `RUST_LOG` (default `warn`), so stdout only
/// carries the table.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
