//! Fixed-width greedy word wrap.
//!
//! Used for static text blocks such as the menu side panel, where every line
//! starts at column 0 of its region. Contract:
//! * Text that already fits is returned unchanged as the only line.
//! * Otherwise the text is split on single spaces and words are packed
//!   greedily; a word is pushed to a new line when
//!   `line + 1 + word > width`.
//! * A word wider than `width` is cut at exactly `width` cells. Both pieces go
//!   back to the front of the queue so the remainder is re-evaluated and cut
//!   again if it is still too long.
//! * No returned line is wider than `width` (a lone cluster wider than the
//!   whole budget is the only exception).
//!
//! Runs of spaces produce empty words which are preserved inside a line, so
//! interior spacing survives the round trip.

use crate::width::{split_at_width, str_width};
use std::collections::VecDeque;

/// Strategy for breaking a block of text into lines no wider than a budget.
///
/// The menu controller holds one of these so alternate splitting rules can be
/// selected when the controller is composed.
pub trait LineSplitter {
    fn split(&self, text: &str, width: usize) -> Vec<String>;

    /// Number of lines `text` occupies at `width`.
    fn line_count(&self, text: &str, width: usize) -> usize {
        self.split(text, width).len()
    }
}

/// Default splitter: greedy packing via [`wrap_to_width`].
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedySplitter;

impl LineSplitter for GreedySplitter {
    fn split(&self, text: &str, width: usize) -> Vec<String> {
        wrap_to_width(text, width)
    }
}

/// Greedy word-wrap of `text` into lines of at most `width` cells.
pub fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    if str_width(text) <= width {
        return vec![text.to_string()];
    }

    let mut words: VecDeque<&str> = text.split(' ').collect();
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0usize;

    while let Some(word) = words.pop_front() {
        let word_width = str_width(word);
        if word_width > width {
            let (head, tail) = split_at_width(word, width);
            if !tail.is_empty() {
                words.push_front(tail);
                words.push_front(head);
                continue;
            }
        }
        if !line.is_empty() && line_width + word_width + 1 > width {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_width = word_width;
            continue;
        }
        if line.is_empty() {
            line.push_str(word);
            line_width = word_width;
        } else {
            line.push(' ');
            line.push_str(word);
            line_width += word_width + 1;
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }

    tracing::trace!(target: "text.wrap", width, lines = lines.len(), "wrap_to_width");
    lines
}
