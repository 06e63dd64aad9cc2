//! Line-drawing and special glyphs.
//!
//! Callers address glyphs symbolically; the concrete character comes from a
//! static table so the mapping can change per platform without touching the
//! drawing code.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    ULCorner,
    LLCorner,
    URCorner,
    LRCorner,
    RTee,
    LTee,
    BTee,
    TTee,
    HLine,
    VLine,
    Plus,
    S1,
    S9,
    Diamond,
    CkBoard,
    Degree,
    PlMinus,
    Bullet,
    LArrow,
    RArrow,
    DArrow,
    UArrow,
    Board,
    Lantern,
    Block,
    S3,
    S7,
    LEqual,
    GEqual,
    Pi,
    NEqual,
    Sterling,
}

/// Glyph to Unicode lookup. Order is irrelevant; lookups are linear over a
/// few dozen entries.
pub static GLYPH_TABLE: &[(Glyph, char)] = &[
    (Glyph::ULCorner, '┌'),
    (Glyph::LLCorner, '└'),
    (Glyph::URCorner, '┐'),
    (Glyph::LRCorner, '┘'),
    (Glyph::RTee, '┤'),
    (Glyph::LTee, '├'),
    (Glyph::BTee, '┴'),
    (Glyph::TTee, '┬'),
    (Glyph::HLine, '─'),
    (Glyph::VLine, '│'),
    (Glyph::Plus, '┼'),
    (Glyph::S1, '⎺'),
    (Glyph::S9, '⎽'),
    (Glyph::Diamond, '◆'),
    (Glyph::CkBoard, '▒'),
    (Glyph::Degree, '°'),
    (Glyph::PlMinus, '±'),
    (Glyph::Bullet, '·'),
    (Glyph::LArrow, '←'),
    (Glyph::RArrow, '→'),
    (Glyph::DArrow, '↓'),
    (Glyph::UArrow, '↑'),
    (Glyph::Board, '░'),
    (Glyph::Lantern, '§'),
    (Glyph::Block, '█'),
    (Glyph::S3, '⎻'),
    (Glyph::S7, '⎼'),
    (Glyph::LEqual, '≤'),
    (Glyph::GEqual, '≥'),
    (Glyph::Pi, 'π'),
    (Glyph::NEqual, '≠'),
    (Glyph::Sterling, '£'),
];

impl Glyph {
    /// Character drawn for this glyph; `?` if the table lacks an entry.
    pub fn symbol(self) -> char {
        GLYPH_TABLE
            .iter()
            .find(|(g, _)| *g == self)
            .map(|(_, c)| *c)
            .unwrap_or('?')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn box_corners_resolve() {
        assert_eq!(Glyph::ULCorner.symbol(), '┌');
        assert_eq!(Glyph::LRCorner.symbol(), '┘');
        assert_eq!(Glyph::UArrow.symbol(), '↑');
    }

    #[test]
    fn table_has_unique_entries() {
        let glyphs: HashSet<_> = GLYPH_TABLE.iter().map(|(g, _)| *g).collect();
        assert_eq!(glyphs.len(), GLYPH_TABLE.len());
        assert_eq!(GLYPH_TABLE.len(), 32);
        assert!(GLYPH_TABLE.iter().all(|(g, _)| g.symbol() != '?'));
    }
}
