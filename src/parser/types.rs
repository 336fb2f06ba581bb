use serde::Serialize;

/// Which triple quote opened the multi-line string we are inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Double, // """
    Single, // '''
}

impl Delimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::Double => "\"\"\"",
            Delimiter::Single => "'''",
        }
    }
}

/// One physical source line together with its zero-based line number.
#[derive(Debug, Clone, Copy)]
pub struct SourceLine<'a> {
    pub index: usize,
    pub text: &'a str,
}

impl AsRef<str> for SourceLine<'_> {
    fn as_ref(&self) -> &str {
        self.text
    }
}

/// A finished cell: trimmed text plus the source lines it was cut from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub index: usize,
    /// First non-blank source line of the cell.
    pub start_line: usize,
    /// Last non-blank source line of the cell.
    pub end_line: usize,
    pub text: String,
}

impl Cell {
    /// Build a cell from buffered lines. Returns `None` when the buffer is
    /// only whitespace.
    pub fn from_lines(index: usize, lines: &[SourceLine<'_>]) -> Option<Cell> {
        let first = lines.iter().position(|l| !l.text.trim().is_empty())?;
        let last = lines.iter().rposition(|l| !l.text.trim().is_empty())?;

        let joined = lines
            .iter()
            .map(|l| l.text)
            .collect::<Vec<_>>()
            .join("\n");

        Some(Cell {
            index,
            start_line: lines[first].index,
            end_line: lines[last].index,
            text: joined.trim().to_string(),
        })
    }
}
