//! Line input on top of single-key reads.

use crate::TerminalBackend;
use crate::key::Key;
use crate::style::{Attr, Colour};
use crate::surface::SurfaceHandle;
use anyhow::Result;

/// Longest line accepted by [`read_line`].
pub const MAX_LINE: usize = 255;

/// Read characters until Enter, echoing them into `surface` at its cursor
/// when the backend cursor is visible. Backspace removes the last character;
/// Esc abandons the line and returns an empty string.
pub fn read_line<B: TerminalBackend + ?Sized>(
    backend: &mut B,
    surface: &SurfaceHandle,
    max: usize,
) -> Result<String> {
    let max = max.min(MAX_LINE);
    let mut line = String::new();
    loop {
        let echo = backend.cursor_visible();
        match backend.read_key()? {
            Key::Enter | Key::Char('\n') | Key::Char('\r') => break,
            Key::Esc => return Ok(String::new()),
            Key::Backspace => {
                if line.pop().is_some() && echo {
                    let (x, y) = surface.cursor();
                    if x > 0 {
                        surface.print_char(' ', Colour::None, Attr::empty(), x as i32 - 1, y as i32);
                        surface.move_cursor(x as i32 - 1, y as i32);
                    }
                }
            }
            Key::Char(c) if !c.is_control() && line.chars().count() < max => {
                line.push(c);
                if echo {
                    surface.print_char(c, Colour::None, Attr::empty(), -1, -1);
                }
            }
            _ => continue,
        }
        if echo {
            backend.flip()?;
        }
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeadlessBackend;
    use crate::surface::Rect;

    fn chars(s: &str) -> Vec<Key> {
        s.chars().map(Key::Char).collect()
    }

    #[test]
    fn reads_until_enter_with_echo() {
        let mut b = HeadlessBackend::new().with_keys(chars("hey").into_iter().chain([Key::Enter]));
        let s = b.screen().create_surface(Rect::new(0, 0, 10, 1));
        let line = read_line(&mut b, &s, MAX_LINE).unwrap();
        assert_eq!(line, "hey");
        assert_eq!(s.row_text(0), "hey       ");
    }

    #[test]
    fn backspace_and_limit() {
        let keys = chars("abcd")
            .into_iter()
            .chain([Key::Backspace])
            .chain(chars("xy"))
            .chain([Key::Enter]);
        let mut b = HeadlessBackend::new().with_keys(keys);
        let s = b.screen().create_surface(Rect::new(0, 0, 10, 1));
        let line = read_line(&mut b, &s, 4).unwrap();
        assert_eq!(line, "abcx");
    }

    #[test]
    fn hidden_cursor_disables_echo() {
        let mut b = HeadlessBackend::new().with_keys(chars("pw").into_iter().chain([Key::Enter]));
        b.set_cursor_visible(false).unwrap();
        let s = b.screen().create_surface(Rect::new(0, 0, 4, 1));
        assert_eq!(read_line(&mut b, &s, MAX_LINE).unwrap(), "pw");
        assert_eq!(s.row_text(0), "    ");
    }

    #[test]
    fn escape_abandons() {
        let mut b = HeadlessBackend::new().with_keys(chars("ab").into_iter().chain([Key::Esc]));
        let s = b.screen().create_surface(Rect::new(0, 0, 4, 1));
        assert_eq!(read_line(&mut b, &s, MAX_LINE).unwrap(), "");
    }
}
