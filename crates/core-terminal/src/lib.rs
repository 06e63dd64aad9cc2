//! Terminal backend abstraction and crossterm implementation.
//!
//! A backend owns the physical terminal (or a stand-in for it): it enters
//! and leaves raw/alternate-screen mode, reports the display size, hands out
//! the shared [`Screen`] that windows draw into, reads keys and flips the
//! composed screen onto the display.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event},
    execute,
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::stdout;
use std::time::Duration;
use tracing::{debug, trace};

pub mod capabilities;
pub mod glyph;
pub mod headless;
pub mod input;
pub mod key;
pub mod style;
pub mod surface;
pub mod writer;

pub use capabilities::TerminalCapabilities;
pub use glyph::Glyph;
pub use headless::HeadlessBackend;
pub use input::read_line;
pub use key::{Bindings, Key};
pub use style::{Attr, Colour, parse_attrs, parse_colour};
pub use surface::{Cell, Frame, Rect, Screen, SurfaceHandle, SurfaceId};
pub use writer::Writer;

/// The display is never reported smaller than this.
pub const MIN_COLUMNS: u16 = 80;
pub const MIN_ROWS: u16 = 24;

pub(crate) fn floor_size(columns: u16, rows: u16) -> (u16, u16) {
    (columns.max(MIN_COLUMNS), rows.max(MIN_ROWS))
}

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// Display size in cells, floored to 80x24.
    fn size(&self) -> (u16, u16);
    /// Shared surface store drawn by the next [`flip`](Self::flip).
    fn screen(&self) -> Screen;
    /// Block until a key is available. A display resize is reported as
    /// [`Key::Resize`] after the new size has been recorded.
    fn read_key(&mut self) -> Result<Key>;
    /// Compose every visible surface and push the result to the display.
    fn flip(&mut self) -> Result<()>;
    fn set_cursor_visible(&mut self, visible: bool) -> Result<()>;
    fn cursor_visible(&self) -> bool;
    /// Discard keys typed ahead of the next read.
    fn flush_input(&mut self) -> Result<()>;
}

pub struct CrosstermBackend {
    entered: bool,
    screen: Screen,
    size: (u16, u16),
    cursor_visible: bool,
    caps: TerminalCapabilities,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
    active: bool,
}

impl TerminalGuard<'_> {
    pub fn backend(&mut self) -> &mut CrosstermBackend {
        self.backend
    }
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        let (w, h) = terminal::size().unwrap_or((MIN_COLUMNS, MIN_ROWS));
        Self {
            entered: false,
            screen: Screen::new(),
            size: floor_size(w, h),
            cursor_visible: false,
            caps: TerminalCapabilities::detect(),
        }
    }

    pub fn capabilities(&self) -> TerminalCapabilities {
        self.caps
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard {
            backend: self,
            active: true,
        })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
            self.entered = true;
            self.cursor_visible = false;
            debug!(target: "terminal", cols = self.size.0, rows = self.size.1, colour = self.caps.supports_colour, "enter");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
            self.cursor_visible = true;
            debug!(target: "terminal", "leave");
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn screen(&self) -> Screen {
        self.screen.clone()
    }

    fn read_key(&mut self) -> Result<Key> {
        loop {
            match event::read()? {
                Event::Key(ev) => {
                    if let Some(key) = key::map_key_event(&ev) {
                        trace!(target: "terminal.input", ?key, "key");
                        return Ok(key);
                    }
                }
                Event::Resize(w, h) => {
                    self.size = floor_size(w, h);
                    debug!(target: "terminal", cols = self.size.0, rows = self.size.1, "resize");
                    return Ok(Key::Resize);
                }
                _ => {}
            }
        }
    }

    fn flip(&mut self) -> Result<()> {
        let (w, h) = self.size;
        let frame = self.screen.compose(w, h);
        Writer::from_frame(&frame, self.caps.supports_colour).flush()?;
        match frame.cursor {
            Some((x, y)) if self.cursor_visible => execute!(stdout(), MoveTo(x, y), Show)?,
            _ => execute!(stdout(), Hide)?,
        }
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        self.cursor_visible = visible;
        if visible {
            execute!(stdout(), Show)?;
        } else {
            execute!(stdout(), Hide)?;
        }
        Ok(())
    }

    fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    fn flush_input(&mut self) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            let _ = event::read()?;
        }
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl<'a> Drop for TerminalGuard<'a> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.backend.leave();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_size_keeps_minimum() {
        assert_eq!(floor_size(10, 5), (80, 24));
        assert_eq!(floor_size(132, 50), (132, 50));
        assert_eq!(floor_size(132, 10), (132, 24));
    }
}
