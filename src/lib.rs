//! Split Python automation scripts into notebook-style cells.
//!
//! The scanner is line oriented and heuristic: it tracks triple-quoted
//! strings and indentation, starts a new cell on top-level statements and
//! top-level `.act(` calls, and moves comments that precede a split into the
//! cell they describe.

pub mod error;
pub mod parser;
pub mod stdio;

pub use error::{PycellsError, Result};
pub use parser::{join_cells, normalize, segment, segment_spans, Cell};
