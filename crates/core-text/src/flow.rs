//! Cursor-relative word flow for live printing.
//!
//! Unlike [`crate::wrap::wrap_to_width`] this layout starts from the column
//! the cursor already occupies, so the first line only has the remainder of
//! the row available. A break is taken when
//! `line + word + cursor >= surface_width`; after the first break the cursor is
//! treated as column 0 for everything that follows. The two rules are kept
//! separate on purpose: callers printing into a half-used row rely on this
//! one, static blocks rely on the other.
//!
//! Leading spaces are stripped from the input, counted, and re-attached to
//! the first word so indentation survives.
//!
//! Output shape: `lines[0]` continues at the cursor (and may be empty when the
//! first word does not fit there); every later entry starts on a fresh row.

use crate::width::str_width;

pub fn flow_from_cursor(text: &str, cursor_x: usize, surface_width: usize) -> Vec<String> {
    let trimmed = text.trim_start_matches(' ');
    let indent = text.len() - trimmed.len();

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0usize;
    let mut pos = cursor_x;

    for (i, raw) in trimmed.split(' ').enumerate() {
        let word = if i == 0 && indent > 0 {
            format!("{}{raw}", " ".repeat(indent))
        } else {
            raw.to_string()
        };
        let word_width = str_width(&word);
        if line_width + word_width + pos >= surface_width {
            lines.push(std::mem::replace(&mut line, word));
            line_width = word_width;
            pos = 0;
        } else if line.is_empty() {
            line = word;
            line_width = word_width;
        } else {
            line.push(' ');
            line.push_str(&word);
            line_width += word_width + 1;
        }
    }
    lines.push(line);
    lines
}
