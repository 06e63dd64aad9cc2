//! In-memory backend.
//!
//! Keys come from a scripted queue and every flip captures the composed
//! frame, which makes whole render loops testable without a tty. Running out
//! of scripted keys is an error rather than a hang.

use crate::key::Key;
use crate::surface::{Frame, Screen};
use crate::{MIN_COLUMNS, MIN_ROWS, TerminalBackend, floor_size};
use anyhow::{Result, bail};
use std::collections::VecDeque;

#[derive(Debug)]
pub struct HeadlessBackend {
    screen: Screen,
    size: (u16, u16),
    keys: VecDeque<Key>,
    frames: Vec<Frame>,
    cursor_visible: bool,
    title: Option<String>,
    entered: bool,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::with_size(MIN_COLUMNS, MIN_ROWS)
    }

    pub fn with_size(columns: u16, rows: u16) -> Self {
        Self {
            screen: Screen::new(),
            size: floor_size(columns, rows),
            keys: VecDeque::new(),
            frames: Vec::new(),
            cursor_visible: true,
            title: None,
            entered: false,
        }
    }

    pub fn with_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.keys.extend(keys);
        self
    }

    pub fn push_key(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    /// Change the reported size and queue the matching resize key.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.size = floor_size(columns, rows);
        self.keys.push_back(Key::Resize);
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }
}

impl TerminalBackend for HeadlessBackend {
    fn enter(&mut self) -> Result<()> {
        self.entered = true;
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        self.entered = false;
        self.cursor_visible = true;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.title = Some(title.to_string());
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn screen(&self) -> Screen {
        self.screen.clone()
    }

    fn read_key(&mut self) -> Result<Key> {
        match self.keys.pop_front() {
            Some(key) => Ok(key),
            None => bail!("headless input exhausted"),
        }
    }

    fn flip(&mut self) -> Result<()> {
        let (w, h) = self.size;
        self.frames.push(self.screen.compose(w, h));
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    fn flush_input(&mut self) -> Result<()> {
        self.keys.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Attr, Colour};
    use crate::surface::Rect;

    #[test]
    fn size_is_floored() {
        let b = HeadlessBackend::with_size(40, 10);
        assert_eq!(b.size(), (80, 24));
        let b = HeadlessBackend::with_size(120, 40);
        assert_eq!(b.size(), (120, 40));
    }

    #[test]
    fn flip_captures_frame() {
        let mut b = HeadlessBackend::new();
        let s = b.screen().create_surface(Rect::new(1, 1, 5, 1));
        s.print("hello", Colour::None, Attr::RAW, 0, 0);
        b.flip().unwrap();
        let frame = b.last_frame().unwrap();
        assert_eq!(&frame.row_text(1)[..6], " hello");
    }

    #[test]
    fn exhausted_input_is_an_error() {
        let mut b = HeadlessBackend::new().with_keys([Key::Up]);
        assert_eq!(b.read_key().unwrap(), Key::Up);
        assert!(b.read_key().is_err());
    }

    #[test]
    fn resize_queues_key() {
        let mut b = HeadlessBackend::new();
        b.resize(100, 30);
        assert_eq!(b.size(), (100, 30));
        assert_eq!(b.read_key().unwrap(), Key::Resize);
    }
}
