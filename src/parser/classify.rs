/// Keywords that open a new top-level statement. Each includes its trailing
/// space or colon so `import_module(...)` or `format = ...` do not match as
/// keywords.
pub const STATEMENT_STARTERS: [&str; 9] = [
    "import ", "from ", "class ", "def ", "if ", "while ", "for ", "try:", "with ",
];

pub const MAIN_GUARD: &str = "if __name__ == \"__main__\":";

/// The automation call that always deserves its own cell.
pub const ACT_CALL: &str = ".act(";

/// Blank or `#` comment line.
pub fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Number of leading whitespace characters.
pub fn indentation(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

pub fn is_import(trimmed: &str) -> bool {
    trimmed.starts_with("import ") || trimmed.starts_with("from ")
}

pub fn starts_docstring(trimmed: &str) -> bool {
    trimmed.starts_with("\"\"\"") || trimmed.starts_with("'''")
}

/// Any `=` counts, so comparisons and keyword arguments at column 0 match
/// too. Lines continued with a trailing backslash do not.
pub fn is_assignment(trimmed: &str) -> bool {
    trimmed.contains('=') && !trimmed.ends_with('\\')
}

/// Check if a trimmed line starts a new top-level statement.
pub fn is_top_level_statement(trimmed: &str, indent: usize) -> bool {
    if indent != 0 {
        return false;
    }

    STATEMENT_STARTERS.iter().any(|k| trimmed.starts_with(k))
        || trimmed.starts_with(MAIN_GUARD)
        || starts_docstring(trimmed)
        || is_assignment(trimmed)
}

/// Cut the line at its first `#`, wherever it sits.
pub fn strip_inline_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(code, _)| code)
}

/// Remove every `'...'` or `"..."` literal on the line, quotes included.
///
/// A quote is closed by the next identical quote character. Escapes are not
/// understood. A quote with no partner is kept and scanning resumes right
/// after it.
pub fn strip_string_literals(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(pos) = rest.find(['\'', '"']) {
        let quote = rest.as_bytes()[pos] as char;
        let after = &rest[pos + 1..];
        match after.find(quote) {
            Some(close) => {
                out.push_str(&rest[..pos]);
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[..=pos]);
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Check if a line calls `.act(` outside of comments and string literals.
pub fn has_act_call(line: &str) -> bool {
    if line.trim().starts_with('#') {
        return false;
    }

    strip_string_literals(strip_inline_comment(line)).contains(ACT_CALL)
}

/// True if every code line of `content` opens a docstring and there is at
/// least one. Blank and comment lines are ignored.
pub fn is_only_docstrings(content: &str) -> bool {
    let mut seen = false;

    for line in content.split('\n') {
        let trimmed = line.trim();
        if is_blank_or_comment(trimmed) {
            continue;
        }
        if starts_docstring(trimmed) {
            seen = true;
            continue;
        }
        return false;
    }

    seen
}
