use super::segmenter::segment;

/// Separator placed between cells when they are written back as one script.
pub const CELL_SEPARATOR: &str = "\n\n";

/// Join cells into a single script.
pub fn join_cells<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(CELL_SEPARATOR)
}

/// Re-flow a script into cell form: segment it, then join the cells back.
pub fn normalize(source: &str) -> String {
    join_cells(&segment(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_cells() {
        assert_eq!(join_cells(&["import os", "x = 1"]), "import os\n\nx = 1");
        assert_eq!(join_cells::<&str>(&[]), "");
    }

    #[test]
    fn test_normalize_collapses_blank_runs() {
        let source = "import os\n\n\n\n\ndef f():\n    pass\n\n\n";
        assert_eq!(normalize(source), "import os\n\ndef f():\n    pass");
    }

    #[test]
    fn test_normalize_is_stable() {
        let source = "# setup\nimport os\nnova.act(\"A\")\n# mid\nnova.act(\"B\")\nx = 1";
        let once = normalize(source);
        assert_eq!(normalize(&once), once);
    }
}
