mod cells;
mod classify;
mod segmenter;
mod strings;
mod types;

pub use cells::{join_cells, normalize, CELL_SEPARATOR};
pub use classify::{
    has_act_call, indentation, is_blank_or_comment, is_import, is_only_docstrings,
    is_top_level_statement, strip_string_literals,
};
pub use segmenter::{segment, segment_spans, should_split, take_trailing_comments};
pub use strings::{opened_delimiter, track_line};
pub use types::{Cell, Delimiter, SourceLine};
