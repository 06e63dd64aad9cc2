//! Key values delivered by a backend and the navigation predicates the menu
//! uses to interpret them.
//!
//! A terminal resize is delivered in-band as [`Key::Resize`] and polled like
//! any other key.

use crossterm::event::{KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    F(u8),
    Resize,
}

impl Key {
    /// Parse a key name as used by scripted input ("up", "enter", "esc",
    /// "resize", or a single character).
    pub fn from_name(name: &str) -> Option<Key> {
        let key = match name.trim().to_ascii_lowercase().as_str() {
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "enter" | "return" => Key::Enter,
            "space" => Key::Char(' '),
            "esc" | "escape" => Key::Esc,
            "backspace" => Key::Backspace,
            "tab" => Key::Tab,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            "resize" => Key::Resize,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

/// Navigation key interpretation. With `letter_aliases` the w/a/s/d keys (any
/// case) double as arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bindings {
    pub letter_aliases: bool,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            letter_aliases: true,
        }
    }
}

impl Bindings {
    pub fn new(letter_aliases: bool) -> Self {
        Self { letter_aliases }
    }

    fn alias(&self, key: Key, letter: char) -> bool {
        self.letter_aliases && matches!(key, Key::Char(c) if c.to_ascii_lowercase() == letter)
    }

    pub fn is_up(&self, key: Key) -> bool {
        key == Key::Up || self.alias(key, 'w')
    }

    pub fn is_down(&self, key: Key) -> bool {
        key == Key::Down || self.alias(key, 's')
    }

    pub fn is_left(&self, key: Key) -> bool {
        key == Key::Left || self.alias(key, 'a')
    }

    pub fn is_right(&self, key: Key) -> bool {
        key == Key::Right || self.alias(key, 'd')
    }

    pub fn is_select(&self, key: Key) -> bool {
        matches!(key, Key::Enter | Key::Char(' ') | Key::Char('\n') | Key::Char('\r'))
    }

    pub fn is_cancel(&self, key: Key) -> bool {
        key == Key::Esc
    }
}

/// Map a crossterm key event into a [`Key`].
///
/// Release events and key codes without a counterpart (media keys, lone
/// modifiers) yield `None`.
pub(crate) fn map_key_event(event: &CKeyEvent) -> Option<Key> {
    if matches!(event.kind, CKeyEventKind::Release) {
        return None;
    }
    let key = match event.code {
        CKeyCode::Char(c) => Key::Char(c),
        CKeyCode::Enter => Key::Enter,
        CKeyCode::Esc => Key::Esc,
        CKeyCode::Backspace => Key::Backspace,
        CKeyCode::Tab | CKeyCode::BackTab => Key::Tab,
        CKeyCode::Up => Key::Up,
        CKeyCode::Down => Key::Down,
        CKeyCode::Left => Key::Left,
        CKeyCode::Right => Key::Right,
        CKeyCode::Home => Key::Home,
        CKeyCode::End => Key::End,
        CKeyCode::PageUp => Key::PageUp,
        CKeyCode::PageDown => Key::PageDown,
        CKeyCode::Insert => Key::Insert,
        CKeyCode::Delete => Key::Delete,
        CKeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState as CKeyEventState, KeyModifiers as CKeyModifiers};

    fn key_event(code: CKeyCode, kind: CKeyEventKind) -> CKeyEvent {
        CKeyEvent {
            code,
            modifiers: CKeyModifiers::NONE,
            kind,
            state: CKeyEventState::NONE,
        }
    }

    #[test]
    fn arrows_and_letter_aliases() {
        let b = Bindings::default();
        assert!(b.is_up(Key::Up));
        assert!(b.is_up(Key::Char('w')));
        assert!(b.is_up(Key::Char('W')));
        assert!(b.is_down(Key::Char('s')));
        assert!(b.is_left(Key::Char('A')));
        assert!(b.is_right(Key::Right));
        assert!(!b.is_up(Key::Down));
    }

    #[test]
    fn aliases_can_be_disabled() {
        let b = Bindings::new(false);
        assert!(!b.is_up(Key::Char('w')));
        assert!(b.is_up(Key::Up));
    }

    #[test]
    fn select_and_cancel() {
        let b = Bindings::default();
        assert!(b.is_select(Key::Enter));
        assert!(b.is_select(Key::Char(' ')));
        assert!(!b.is_select(Key::Char('x')));
        assert!(b.is_cancel(Key::Esc));
        assert!(!b.is_cancel(Key::Char('q')));
    }

    #[test]
    fn names_parse() {
        assert_eq!(Key::from_name("Down"), Some(Key::Down));
        assert_eq!(Key::from_name("space"), Some(Key::Char(' ')));
        assert_eq!(Key::from_name("resize"), Some(Key::Resize));
        assert_eq!(Key::from_name("q"), Some(Key::Char('q')));
        assert_eq!(Key::from_name("nope"), None);
    }

    #[test]
    fn release_events_are_ignored() {
        assert_eq!(
            map_key_event(&key_event(CKeyCode::Up, CKeyEventKind::Release)),
            None
        );
        assert_eq!(
            map_key_event(&key_event(CKeyCode::Up, CKeyEventKind::Press)),
            Some(Key::Up)
        );
        assert_eq!(
            map_key_event(&key_event(CKeyCode::Char('x'), CKeyEventKind::Repeat)),
            Some(Key::Char('x'))
        );
    }
}
