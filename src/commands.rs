use pycells::{parser, stdio, PycellsError, Result};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// Marker line printed before each cell in text output.
const CELL_MARKER: &str = "# %%";

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }

    std::fs::read_to_string(input).map_err(|source| PycellsError::FileRead {
        path: PathBuf::from(input),
        source,
    })
}

pub fn split(input: &str, json: bool) -> Result<()> {
    let source = read_input(input)?;
    let cells = parser::segment_spans(&source);
    info!(input, cells = cells.len(), "split script");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        serde_json::to_writer_pretty(&mut out, &cells)?;
        writeln!(out)?;
        return Ok(());
    }

    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        debug!(
            index = cell.index,
            start = cell.start_line + 1,
            end = cell.end_line + 1,
            "cell"
        );
        writeln!(out, "{CELL_MARKER}")?;
        writeln!(out, "{}", cell.text)?;
    }
    Ok(())
}

pub fn normalize(input: &str) -> Result<()> {
    let source = read_input(input)?;
    let normalized = parser::normalize(&source);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !normalized.is_empty() {
        writeln!(out, "{normalized}")?;
    }
    Ok(())
}

pub fn serve() -> Result<()> {
    stdio::run_stdio_mode()
}
