use clap::{Parser, Subcommand};

use crate::commands;
use pycells::Result;

/// Split Python automation scripts into notebook-style cells
#[derive(Parser)]
#[command(name = "pycells")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output cells as JSON
    #[arg(long, env = "PYCELLS_JSON", global = true)]
    pub json: bool,

    /// Enable verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the cells of a Python script
    Split {
        /// Script path, or `-` for stdin
        input: String,
    },

    /// Rewrite a script with one blank line between cells
    Normalize {
        /// Script path, or `-` for stdin
        input: String,
    },

    /// Serve split/join requests over stdin/stdout
    Serve,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Split { input } => commands::split(&input, self.json),
            Commands::Normalize { input } => commands::normalize(&input),
            Commands::Serve => commands::serve(),
        }
    }
}
