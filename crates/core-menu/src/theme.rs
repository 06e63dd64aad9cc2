use core_terminal::{Attr, Colour};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub colour: Colour,
    pub attrs: Attr,
}

impl TextStyle {
    pub const fn new(colour: Colour, attrs: Attr) -> Self {
        Self { colour, attrs }
    }
}

/// Colours of the fixed menu decorations. Items carry their own colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuTheme {
    pub title: TextStyle,
    pub tags: TextStyle,
    pub arrows: TextStyle,
    pub sidebox: TextStyle,
}

impl Default for MenuTheme {
    fn default() -> Self {
        Self {
            title: TextStyle::new(Colour::Cyan, Attr::BOLD),
            tags: TextStyle::new(Colour::White, Attr::BOLD),
            arrows: TextStyle::new(Colour::Green, Attr::BOLD),
            sidebox: TextStyle::default(),
        }
    }
}
