mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use pycells::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries cells or protocol frames, so logs go to stderr
    let filter = EnvFilter::try_from_env("PYCELLS_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "pycells=debug" } else { "warn" })
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli.run()
}
