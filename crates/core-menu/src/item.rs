use crate::DISABLED;
use core_terminal::Colour;

/// One menu row. Empty text makes a separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub text: String,
    pub colour: Colour,
    /// Text shown in the side panel while this item is selected.
    pub sidebox: String,
    /// Column inside the menu window, set by layout.
    pub x: i32,
}

impl MenuItem {
    pub fn new(text: impl Into<String>, colour: Colour, sidebox: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            colour,
            sidebox: sidebox.into(),
            x: 0,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.colour == DISABLED
    }

    pub fn is_separator(&self) -> bool {
        self.text.is_empty()
    }

    /// Movement passes over separators and disabled rows.
    pub(crate) fn is_skipped(&self) -> bool {
        self.is_separator() || self.is_disabled()
    }
}
