//! Property-based tests for the static greedy wrap.

use core_text::{flow_from_cursor, str_width, wrap_to_width};
use proptest::prelude::*;

fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,14}", 0..24)
}

proptest! {
    #[test]
    fn no_line_exceeds_width(text in "[a-z ]{0,120}", width in 1usize..40) {
        for line in wrap_to_width(&text, width) {
            prop_assert!(str_width(&line) <= width, "line {:?} wider than {}", line, width);
        }
    }

    #[test]
    fn fitting_text_is_returned_unchanged(text in "[a-z ]{0,30}", extra in 0usize..10) {
        let width = text.len() + extra;
        prop_assert_eq!(wrap_to_width(&text, width), vec![text.clone()]);
    }

    #[test]
    fn short_words_keep_their_sequence(ws in words(), width in 14usize..40) {
        let text = ws.join(" ");
        let lines = wrap_to_width(&text, width);
        prop_assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn overlong_words_split_into_width_sized_head(word in "[a-z]{20,60}", width in 1usize..20) {
        let lines = wrap_to_width(&word, width);
        prop_assert_eq!(lines[0].len(), width);
        prop_assert_eq!(lines.concat(), word);
    }

    #[test]
    fn flow_preserves_words_at_column_zero(ws in words(), width in 16usize..60) {
        let text = ws.join(" ");
        let lines = flow_from_cursor(&text, 0, width);
        let rejoined: Vec<&str> = lines
            .iter()
            .filter(|l| !l.is_empty())
            .map(String::as_str)
            .collect();
        prop_assert_eq!(rejoined.join(" "), text);
    }
}
