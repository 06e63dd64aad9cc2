//! Colours and text attributes.
//!
//! Both are parsed leniently from configuration text: anything that does not
//! match degrades to the neutral value instead of failing.

use bitflags::bitflags;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Colour {
    #[default]
    None,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Colour {
    /// Foreground colour used on a black background, or `None` for the
    /// terminal default.
    pub fn to_crossterm(self) -> Option<Color> {
        match self {
            Colour::None => None,
            Colour::Black => Some(Color::Black),
            Colour::Red => Some(Color::DarkRed),
            Colour::Green => Some(Color::DarkGreen),
            Colour::Yellow => Some(Color::DarkYellow),
            Colour::Blue => Some(Color::DarkBlue),
            Colour::Magenta => Some(Color::DarkMagenta),
            Colour::Cyan => Some(Color::DarkCyan),
            Colour::White => Some(Color::Grey),
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u8 {
        const BOLD    = 0b0000_0001;
        const NL      = 0b0000_0010; // newline after the printed text
        const RAW     = 0b0000_0100; // print as-is, no word flow
        const REVERSE = 0b0000_1000;
        const DOUBLE  = 0b0001_0000; // glyph printed twice side by side
        const BLINK   = 0b0010_0000;
    }
}

impl Attr {
    /// Subset of flags that change how a cell looks (the rest steer printing).
    pub fn visual(self) -> Attr {
        self & (Attr::BOLD | Attr::REVERSE | Attr::BLINK)
    }
}

/// Case-insensitive colour name lookup; unknown names map to [`Colour::None`].
pub fn parse_colour(input: &str) -> Colour {
    match input.trim().to_ascii_uppercase().as_str() {
        "BLACK" => Colour::Black,
        "RED" => Colour::Red,
        "GREEN" => Colour::Green,
        "YELLOW" => Colour::Yellow,
        "BLUE" => Colour::Blue,
        "MAGENTA" => Colour::Magenta,
        "CYAN" => Colour::Cyan,
        "WHITE" => Colour::White,
        _ => Colour::None,
    }
}

/// Scan `input` for attribute names anywhere in the string ("bold|reverse",
/// "BOLD,NL" ...). Unrecognised text yields no flags.
pub fn parse_attrs(input: &str) -> Attr {
    let upper = input.to_ascii_uppercase();
    const NAMES: [(&str, Attr); 6] = [
        ("BOLD", Attr::BOLD),
        ("NL", Attr::NL),
        ("RAW", Attr::RAW),
        ("REVERSE", Attr::REVERSE),
        ("DOUBLE", Attr::DOUBLE),
        ("BLINK", Attr::BLINK),
    ];
    NAMES
        .iter()
        .filter(|(name, _)| upper.contains(name))
        .fold(Attr::empty(), |acc, (_, flag)| acc | *flag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_names_any_case() {
        assert_eq!(parse_colour("cyan"), Colour::Cyan);
        assert_eq!(parse_colour("Magenta"), Colour::Magenta);
        assert_eq!(parse_colour(" WHITE "), Colour::White);
    }

    #[test]
    fn unknown_colour_is_none() {
        assert_eq!(parse_colour("chartreuse"), Colour::None);
        assert_eq!(parse_colour(""), Colour::None);
    }

    #[test]
    fn attrs_are_substring_matched() {
        assert_eq!(parse_attrs("bold|reverse"), Attr::BOLD | Attr::REVERSE);
        assert_eq!(parse_attrs("RAW,nl"), Attr::RAW | Attr::NL);
        assert_eq!(parse_attrs("blinking double"), Attr::BLINK | Attr::DOUBLE);
    }

    #[test]
    fn unknown_attrs_are_empty() {
        assert_eq!(parse_attrs("italic"), Attr::empty());
        assert_eq!(parse_attrs(""), Attr::empty());
    }

    #[test]
    fn visual_drops_print_directives() {
        let a = Attr::BOLD | Attr::RAW | Attr::NL | Attr::REVERSE;
        assert_eq!(a.visual(), Attr::BOLD | Attr::REVERSE);
    }
}
