use super::classify::{
    has_act_call, indentation, is_blank_or_comment, is_import, is_only_docstrings,
    is_top_level_statement,
};
use super::strings::track_line;
use super::types::{Cell, Delimiter, SourceLine};
use tracing::trace;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Split Python source into cells. Empty and whitespace-only input give an
/// empty list.
pub fn segment(source: &str) -> Vec<String> {
    segment_spans(source)
        .into_iter()
        .map(|cell| cell.text)
        .collect()
}

/// Same as [`segment`], keeping the source line range of every cell.
pub fn segment_spans(source: &str) -> Vec<Cell> {
    // a leading byte order mark is not part of the first line
    let source = source.strip_prefix(BYTE_ORDER_MARK).unwrap_or(source);

    let mut scanner = Scanner::default();
    for (index, text) in source.split('\n').enumerate() {
        scanner.feed(SourceLine { index, text });
    }
    scanner.finish()
}

/// Decide whether a code line closes the current cell.
///
/// `trimmed` must be a non-blank, non-comment line outside any multi-line
/// string; `indent` is its leading whitespace count.
pub fn should_split<T: AsRef<str>>(trimmed: &str, indent: usize, current: &[T]) -> bool {
    if current.is_empty() {
        return false;
    }

    let top_level = indent == 0;
    let triggered = is_top_level_statement(trimmed, indent) || (top_level && has_act_call(trimmed));
    if !triggered {
        return false;
    }

    let content = current
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    let content = content.trim();

    if is_import(content) && is_import(trimmed) {
        return false;
    }
    if is_only_docstrings(content) {
        return false;
    }

    true
}

/// Detach the run of blank and comment lines at the end of `lines`, keeping
/// their order.
pub fn take_trailing_comments<T: AsRef<str>>(lines: &mut Vec<T>) -> Vec<T> {
    let keep = lines
        .iter()
        .rposition(|l| !is_blank_or_comment(l.as_ref()))
        .map_or(0, |i| i + 1);
    lines.split_off(keep)
}

#[derive(Default)]
struct Scanner<'a> {
    current: Vec<SourceLine<'a>>,
    open_string: Option<Delimiter>,
    cells: Vec<Cell>,
}

impl<'a> Scanner<'a> {
    fn feed(&mut self, line: SourceLine<'a>) {
        if track_line(&mut self.open_string, line.text) {
            if self.open_string.is_none() {
                trace!(line = line.index, "multi-line string closed");
            }
            self.current.push(line);
            return;
        }
        if let Some(delim) = self.open_string {
            trace!(line = line.index, delimiter = delim.as_str(), "multi-line string opened");
        }

        let trimmed = line.text.trim();
        if is_blank_or_comment(trimmed) {
            self.current.push(line);
            return;
        }

        if should_split(trimmed, indentation(line.text), &self.current) {
            let carried = take_trailing_comments(&mut self.current);
            trace!(
                line = line.index,
                carried = carried.len(),
                "starting new cell"
            );
            self.flush();
            self.current = carried;
        }

        self.current.push(line);
    }

    fn flush(&mut self) {
        let lines = std::mem::take(&mut self.current);
        if let Some(cell) = Cell::from_lines(self.cells.len(), &lines) {
            self.cells.push(cell);
        }
    }

    fn finish(mut self) -> Vec<Cell> {
        self.flush();
        if self.open_string.is_some() {
            trace!("input ended inside a multi-line string");
        }
        self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cell_never_splits() {
        let current: Vec<&str> = Vec::new();
        assert!(!should_split("import os", 0, &current));
    }

    #[test]
    fn test_imports_group() {
        assert!(!should_split("import sys", 0, &["import os", ""]));
        assert!(!should_split("from typing import List", 0, &["import os"]));
        assert!(should_split("x = 1", 0, &["import os"]));
    }

    #[test]
    fn test_import_after_comment_splits() {
        // the comment is carried along by the caller
        assert!(should_split("import os", 0, &["# header"]));
    }

    #[test]
    fn test_docstring_only_cell_absorbs_next_statement() {
        assert!(!should_split("import x", 0, &["\"\"\"Module doc.\"\"\""]));
        assert!(should_split(
            "def f():",
            0,
            &["\"\"\"", "This is a module docstring.", "\"\"\""]
        ));
    }

    #[test]
    fn test_act_call_only_at_top_level() {
        assert!(should_split("nova.act(\"B\")", 0, &["nova.act(\"A\")"]));
        assert!(!should_split("nova.act(\"B\")", 4, &["def f():"]));
        assert!(!should_split("print(\".act(\")", 0, &["x = 1"]));
    }

    #[test]
    fn test_take_trailing_comments() {
        let mut lines = vec!["code", "# comment", ""];
        let carried = take_trailing_comments(&mut lines);
        assert_eq!(lines, vec!["code"]);
        assert_eq!(carried, vec!["# comment", ""]);
    }

    #[test]
    fn test_take_trailing_comments_whole_buffer() {
        let mut lines = vec!["", "# only notes", "    # indented"];
        let carried = take_trailing_comments(&mut lines);
        assert!(lines.is_empty());
        assert_eq!(carried.len(), 3);
    }

    #[test]
    fn test_take_trailing_comments_none() {
        let mut lines = vec!["# lead", "x = 1"];
        assert!(take_trailing_comments(&mut lines).is_empty());
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_leading_byte_order_mark_is_dropped() {
        let cells = segment_spans("\u{feff}import os\nimport sys");
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].text, "import os\nimport sys");
        assert_eq!(cells[0].start_line, 0);
    }

    #[test]
    fn test_spans_skip_carried_blanks() {
        let cells = segment_spans("x = 1\n\n\n# about y\ny = 2\n");
        assert_eq!(cells.len(), 2);
        assert_eq!((cells[0].start_line, cells[0].end_line), (0, 0));
        assert_eq!((cells[1].start_line, cells[1].end_line), (3, 4));
        assert_eq!(cells[1].index, 1);
    }
}
