//! Display width helpers.
//!
//! All layout decisions in this crate are made in terminal cells rather than
//! bytes or chars. For ASCII input the two agree, which keeps the wrapping
//! rules easy to reason about; for wide clusters (CJK, emoji) a single
//! grapheme may occupy two cells.
//!
//! Invariants:
//! * Splitting never cuts through a grapheme cluster.
//! * `split_at_width` always makes progress on non-empty input, even when
//!   the first cluster alone is wider than the requested budget.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Width of a string in terminal cells.
#[inline]
pub fn str_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Width of a single grapheme cluster, never reported as zero so that the
/// cursor always advances past a printed cluster.
#[inline]
pub fn cluster_width(g: &str) -> usize {
    UnicodeWidthStr::width(g).max(1)
}

/// Split `s` so the head occupies at most `cols` cells.
///
/// The head always holds at least one cluster when `s` is non-empty.
pub fn split_at_width(s: &str, cols: usize) -> (&str, &str) {
    let mut used = 0usize;
    let mut cut = 0usize;
    for (idx, g) in s.grapheme_indices(true) {
        let w = cluster_width(g);
        if used + w > cols && cut > 0 {
            break;
        }
        used += w;
        cut = idx + g.len();
        if used >= cols {
            break;
        }
    }
    s.split_at(cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_width_matches_len() {
        assert_eq!(str_width("hello world"), 11);
        assert_eq!(str_width(""), 0);
    }

    #[test]
    fn split_ascii_exact() {
        assert_eq!(split_at_width("abcdefgh", 3), ("abc", "defgh"));
        assert_eq!(split_at_width("abc", 3), ("abc", ""));
    }

    #[test]
    fn split_keeps_wide_cluster_whole() {
        // each CJK char is two cells wide
        let (head, tail) = split_at_width("漢字漢", 3);
        assert_eq!(head, "漢");
        assert_eq!(tail, "字漢");
    }

    #[test]
    fn split_always_progresses() {
        let (head, tail) = split_at_width("漢a", 1);
        assert_eq!(head, "漢");
        assert_eq!(tail, "a");
        assert_eq!(split_at_width("", 4), ("", ""));
    }
}
