use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("ANSI escape pattern is valid")
});

/// Helper: Remove ANSI CSI sequences (colors, cursor movement) from `text`.
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

/// Helper: Number of terminal cells `text` occupies once styling is removed.
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).width()
}

/// Number of terminal rows the cursor travels while `frame` is written to a
/// terminal `columns` wide, counting the row the cursor is left on.
///
/// Lines longer than the terminal soft-wrap onto extra rows.
pub fn terminal_rows(frame: &str, columns: usize) -> usize {
    let columns = columns.max(1);
    frame
        .split('\n')
        .map(|line| {
            let width = visible_width(line);
            if width == 0 {
                1
            } else {
                (width + columns - 1) / columns
            }
        })
        .sum()
}

/// Helper: Pad `text` on the left to `width` characters.
pub fn pad_start(text: &str, width: usize) -> String {
    format!("{:>width$}", text, width = width)
}

/// Helper: Pad `text` on the right to `width` characters.
pub fn pad_end(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}
