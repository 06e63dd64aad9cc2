//! Terminal capability probing.
//!
//! Detection runs once when a backend is constructed. The only capability the
//! toolkit varies on is colour: without it, frames are emitted with attributes
//! (bold, reverse, blink) but no foreground/background colours.

use crossterm::style::available_color_count;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    pub supports_colour: bool,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        Self {
            supports_colour: available_color_count() >= 8,
        }
    }

    /// Capabilities of an in-memory terminal: everything on.
    pub fn full() -> Self {
        Self {
            supports_colour: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_enables_colour() {
        assert!(TerminalCapabilities::full().supports_colour);
    }
}
