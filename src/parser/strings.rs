use super::types::Delimiter;

/// Count non-overlapping occurrences of a triple quote on one line.
pub fn count_delimiter(line: &str, delim: Delimiter) -> usize {
    line.matches(delim.as_str()).count()
}

/// Triple quote left open by a line that starts outside any string.
///
/// `"""` is checked before `'''`; only the first kind found on the line is
/// counted. A single occurrence opens a string. Any other count means the
/// literals on the line are balanced (or we cannot tell), so nothing stays open.
pub fn opened_delimiter(line: &str) -> Option<Delimiter> {
    let delim = if line.contains(Delimiter::Double.as_str()) {
        Delimiter::Double
    } else if line.contains(Delimiter::Single.as_str()) {
        Delimiter::Single
    } else {
        return None;
    };

    (count_delimiter(line, delim) == 1).then_some(delim)
}

/// Advance the multi-line string state over one line.
///
/// Returns `true` when the line was already inside an open string; such a
/// line belongs to the current cell verbatim and gets no further inspection.
/// A line that merely opens a string returns `false` and is processed like
/// any other line.
pub fn track_line(open: &mut Option<Delimiter>, line: &str) -> bool {
    match *open {
        Some(delim) => {
            if count_delimiter(line, delim) % 2 == 1 {
                *open = None;
            }
            true
        }
        None => {
            *open = opened_delimiter(line);
            false
        }
    }
}
