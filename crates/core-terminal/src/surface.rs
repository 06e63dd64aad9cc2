//! Surfaces: rectangular cell grids stacked into a screen.
//!
//! A [`Screen`] is the shared store of every live surface plus their stacking
//! order. Creation order defines z-order (most recently created or raised is
//! topmost). A backend composes the visible surfaces bottom to top into a
//! [`Frame`] on every flip.
//!
//! Ownership: each surface is owned by exactly one [`SurfaceHandle`]. Dropping
//! the handle releases the surface from the store, so a caller that replaces a
//! handle never leaks a stale surface on screen.
//!
//! Cell model: a cell holds one character. A double-width character occupies
//! its leader cell plus a continuation cell to the right; continuation cells
//! never print on their own. Composition repairs any pair that overlap split
//! apart (the orphaned half becomes a blank).
//!
//! Cursor semantics follow a classic curses window: printing advances the
//! cursor and wraps to the next row at the right edge; on the last row the
//! cursor parks past the edge and further output is dropped until it moves.

use crate::glyph::Glyph;
use crate::style::{Attr, Colour};
use core_text::flow_from_cursor;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{trace, warn};
use unicode_width::UnicodeWidthChar;

/// Screen-space rectangle; the origin may lie off screen (clipped on compose).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    /// Right half of a double-width leader; never printed.
    pub continuation: bool,
    pub colour: Colour,
    pub attrs: Attr,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        symbol: ' ',
        continuation: false,
        colour: Colour::None,
        attrs: Attr::empty(),
    };

    fn styled(symbol: char, colour: Colour, attrs: Attr) -> Self {
        Self {
            symbol,
            continuation: false,
            colour,
            attrs: attrs.visual(),
        }
    }

    fn is_wide(&self) -> bool {
        !self.continuation && UnicodeWidthChar::width(self.symbol) == Some(2)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::BLANK
    }
}

#[derive(Debug)]
struct Surface {
    id: SurfaceId,
    rect: Rect,
    cells: Vec<Cell>,
    cursor_x: u16,
    cursor_y: u16,
    visible: bool,
}

impl Surface {
    fn new(id: SurfaceId, rect: Rect) -> Self {
        let len = rect.width as usize * rect.height as usize;
        Self {
            id,
            rect,
            cells: vec![Cell::BLANK; len],
            cursor_x: 0,
            cursor_y: 0,
            visible: true,
        }
    }

    fn width(&self) -> u16 {
        self.rect.width
    }

    fn height(&self) -> u16 {
        self.rect.height
    }

    fn is_degenerate(&self) -> bool {
        self.rect.width == 0 || self.rect.height == 0
    }

    fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }
        let idx = y as usize * self.width() as usize + x as usize;
        self.cells[idx] = cell;
    }

    fn get(&self, x: u16, y: u16) -> Option<Cell> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.cells[y as usize * self.width() as usize + x as usize])
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    fn clear_to_eol(&mut self) {
        if self.is_degenerate() || self.cursor_y >= self.height() {
            return;
        }
        for x in self.cursor_x..self.width() {
            self.set(x as i32, self.cursor_y as i32, Cell::BLANK);
        }
    }

    /// Move the cursor; `-1` keeps the current value on that axis. Targets
    /// outside the surface are ignored.
    fn move_cursor(&mut self, x: i32, y: i32) {
        if x == -1 && y == -1 {
            return;
        }
        let nx = if x == -1 { self.cursor_x as i32 } else { x };
        let ny = if y == -1 { self.cursor_y as i32 } else { y };
        if nx < 0 || ny < 0 || nx >= self.width() as i32 || ny >= self.height() as i32 {
            trace!(target: "terminal.surface", x = nx, y = ny, "cursor_move_out_of_bounds");
            return;
        }
        self.cursor_x = nx as u16;
        self.cursor_y = ny as u16;
    }

    fn advance(&mut self, cols: u16) {
        self.cursor_x = self.cursor_x.saturating_add(cols);
        if self.cursor_x >= self.width() {
            if self.cursor_y + 1 < self.height() {
                self.cursor_x = 0;
                self.cursor_y += 1;
            } else {
                self.cursor_x = self.width();
            }
        }
    }

    fn newline(&mut self) {
        if self.is_degenerate() {
            return;
        }
        self.clear_to_eol();
        self.cursor_x = 0;
        if self.cursor_y + 1 < self.height() {
            self.cursor_y += 1;
        }
    }

    fn put_char(&mut self, ch: char, colour: Colour, attrs: Attr) {
        if ch == '\n' {
            self.newline();
            return;
        }
        if self.is_degenerate() || self.cursor_x >= self.width() {
            return;
        }
        let cols = match UnicodeWidthChar::width(ch) {
            Some(w) if w > 0 => w as u16,
            _ => return,
        };
        if cols == 2 && self.cursor_x + 1 >= self.width() {
            // no room for both halves on this row
            self.advance(1);
            if self.cursor_x >= self.width() {
                return;
            }
        }
        let (x, y) = (self.cursor_x as i32, self.cursor_y as i32);
        self.set(x, y, Cell::styled(ch, colour, attrs));
        if cols == 2 {
            let mut tail = Cell::styled(' ', colour, attrs);
            tail.continuation = true;
            self.set(x + 1, y, tail);
        }
        self.advance(cols);
    }

    fn write_str(&mut self, s: &str, colour: Colour, attrs: Attr) {
        for ch in s.chars() {
            self.put_char(ch, colour, attrs);
        }
    }

    /// Flow `text` from the cursor column, breaking between words so that no
    /// word is split across the right edge unless it is wider than a row.
    fn print_wrapped(&mut self, text: &str, colour: Colour, attrs: Attr) {
        let lines = flow_from_cursor(text, self.cursor_x as usize, self.width() as usize);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 && self.cursor_x != 0 {
                self.newline();
            }
            self.write_str(line, colour, attrs);
        }
    }

    fn draw_box(&mut self, colour: Colour, attrs: Attr) {
        if self.is_degenerate() {
            return;
        }
        let (w, h) = (self.width() as i32, self.height() as i32);
        let cell = |g: Glyph| Cell::styled(g.symbol(), colour, attrs);
        for x in 1..w - 1 {
            self.set(x, 0, cell(Glyph::HLine));
            self.set(x, h - 1, cell(Glyph::HLine));
        }
        for y in 1..h - 1 {
            self.set(0, y, cell(Glyph::VLine));
            self.set(w - 1, y, cell(Glyph::VLine));
        }
        self.set(0, 0, cell(Glyph::ULCorner));
        self.set(w - 1, 0, cell(Glyph::URCorner));
        self.set(0, h - 1, cell(Glyph::LLCorner));
        self.set(w - 1, h - 1, cell(Glyph::LRCorner));
    }

    fn row_text(&self, y: u16) -> String {
        (0..self.width())
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.continuation)
            .map(|c| c.symbol)
            .collect()
    }
}

/// Composed screen contents produced by [`Screen::compose`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
    /// Cursor of the topmost visible surface, in screen coordinates.
    pub cursor: Option<(u16, u16)>,
}

impl Frame {
    pub fn blank(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width as usize * height as usize],
            cursor: None,
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    /// Printable text of one row (continuation cells skipped).
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.cell(x, y))
            .filter(|c| !c.continuation)
            .map(|c| c.symbol)
            .collect()
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row_text(y)).collect()
    }

    fn repair_wide_pairs(&mut self) {
        let w = self.width as usize;
        for y in 0..self.height as usize {
            for x in 0..w {
                let i = y * w + x;
                if self.cells[i].continuation {
                    let has_leader = x > 0 && self.cells[i - 1].is_wide();
                    if !has_leader {
                        self.cells[i].continuation = false;
                        self.cells[i].symbol = ' ';
                    }
                } else if self.cells[i].is_wide() {
                    let has_tail = x + 1 < w && self.cells[i + 1].continuation;
                    if !has_tail {
                        self.cells[i].symbol = ' ';
                    }
                }
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct SurfaceStack {
    // bottom to top
    surfaces: Vec<Surface>,
    next_id: u64,
}

impl SurfaceStack {
    fn create(&mut self, rect: Rect) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        self.surfaces.push(Surface::new(id, rect));
        id
    }

    fn release(&mut self, id: SurfaceId) -> bool {
        let before = self.surfaces.len();
        self.surfaces.retain(|s| s.id != id);
        before != self.surfaces.len()
    }

    fn get_mut(&mut self, id: SurfaceId) -> Option<&mut Surface> {
        self.surfaces.iter_mut().find(|s| s.id == id)
    }

    fn get(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.id == id)
    }

    fn raise(&mut self, id: SurfaceId) {
        if let Some(pos) = self.surfaces.iter().position(|s| s.id == id) {
            let s = self.surfaces.remove(pos);
            self.surfaces.push(s);
        }
    }

    fn compose(&self, width: u16, height: u16) -> Frame {
        let mut frame = Frame::blank(width, height);
        for s in self.surfaces.iter().filter(|s| s.visible) {
            for sy in 0..s.height() {
                let fy = s.rect.y + sy as i32;
                if fy < 0 || fy >= height as i32 {
                    continue;
                }
                for sx in 0..s.width() {
                    let fx = s.rect.x + sx as i32;
                    if fx < 0 || fx >= width as i32 {
                        continue;
                    }
                    let idx = fy as usize * width as usize + fx as usize;
                    frame.cells[idx] = s.cells[sy as usize * s.width() as usize + sx as usize];
                }
            }
        }
        frame.cursor = self.surfaces.iter().rev().find(|s| s.visible).and_then(|s| {
            let cx = s.rect.x + s.cursor_x.min(s.width().saturating_sub(1)) as i32;
            let cy = s.rect.y + s.cursor_y as i32;
            (cx >= 0 && cy >= 0 && cx < width as i32 && cy < height as i32)
                .then_some((cx as u16, cy as u16))
        });
        frame.repair_wide_pairs();
        frame
    }
}

/// Shared store of live surfaces. Cloning yields another view of the same
/// store (single-threaded; not `Send`).
#[derive(Debug, Clone, Default)]
pub struct Screen {
    stack: Rc<RefCell<SurfaceStack>>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface on top of the stack.
    pub fn create_surface(&self, rect: Rect) -> SurfaceHandle {
        let id = self.stack.borrow_mut().create(rect);
        trace!(target: "terminal.surface", ?id, x = rect.x, y = rect.y, w = rect.width, h = rect.height, "surface_create");
        SurfaceHandle {
            id,
            screen: self.clone(),
        }
    }

    /// Compose all visible surfaces into a frame of the given size.
    pub fn compose(&self, width: u16, height: u16) -> Frame {
        self.stack.borrow().compose(width, height)
    }

    pub fn surface_count(&self) -> usize {
        self.stack.borrow().surfaces.len()
    }

    /// Live surfaces, bottom to top.
    pub fn stacking_order(&self) -> Vec<SurfaceId> {
        self.stack.borrow().surfaces.iter().map(|s| s.id).collect()
    }

    fn with_surface<R>(&self, id: SurfaceId, f: impl FnOnce(&mut Surface) -> R) -> Option<R> {
        let mut stack = self.stack.borrow_mut();
        let surface = stack.get_mut(id);
        debug_assert!(surface.is_some(), "live handle without surface");
        surface.map(f)
    }

    fn read_surface<R>(&self, id: SurfaceId, f: impl FnOnce(&Surface) -> R) -> Option<R> {
        self.stack.borrow().get(id).map(f)
    }
}

/// Exclusive owner of one surface. Dropping it releases the surface.
#[derive(Debug)]
pub struct SurfaceHandle {
    id: SurfaceId,
    screen: Screen,
}

impl SurfaceHandle {
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.screen.read_surface(self.id, |s| s.rect).unwrap_or_default()
    }

    pub fn width(&self) -> u16 {
        self.rect().width
    }

    pub fn height(&self) -> u16 {
        self.rect().height
    }

    pub fn mid_col(&self) -> u16 {
        self.width() / 2
    }

    pub fn mid_row(&self) -> u16 {
        self.height() / 2
    }

    pub fn cursor(&self) -> (u16, u16) {
        self.screen
            .read_surface(self.id, |s| (s.cursor_x, s.cursor_y))
            .unwrap_or((0, 0))
    }

    pub fn is_visible(&self) -> bool {
        self.screen.read_surface(self.id, |s| s.visible).unwrap_or(false)
    }

    /// Reposition on screen without resizing or changing stacking order.
    pub fn move_to(&self, x: i32, y: i32) {
        self.screen.with_surface(self.id, |s| {
            s.rect.x = x;
            s.rect.y = y;
        });
    }

    /// Bring to the top of the stacking order.
    pub fn raise(&self) {
        self.screen.stack.borrow_mut().raise(self.id);
    }

    /// Showing a surface also raises it.
    pub fn set_visible(&self, visible: bool) {
        self.screen.with_surface(self.id, |s| s.visible = visible);
        if visible {
            self.raise();
        }
    }

    pub fn clear(&self) {
        self.screen.with_surface(self.id, Surface::clear);
    }

    /// Clear from the cursor to the end of its row.
    pub fn clear_line(&self) {
        self.screen.with_surface(self.id, Surface::clear_to_eol);
    }

    pub fn draw_box(&self, colour: Colour, attrs: Attr) {
        self.screen.with_surface(self.id, |s| s.draw_box(colour, attrs));
    }

    pub fn move_cursor(&self, x: i32, y: i32) {
        self.screen.with_surface(self.id, |s| s.move_cursor(x, y));
    }

    /// Print text at `(x, y)` (`-1` keeps the cursor's axis). Without
    /// [`Attr::RAW`] the text flows word by word from the cursor column;
    /// with [`Attr::NL`] a newline follows unless the cursor already sits at
    /// column 0. Empty text is a no-op and does not move the cursor.
    pub fn print(&self, text: &str, colour: Colour, attrs: Attr, x: i32, y: i32) {
        if text.is_empty() {
            return;
        }
        self.screen.with_surface(self.id, |s| {
            s.move_cursor(x, y);
            if attrs.contains(Attr::RAW) {
                s.write_str(text, colour, attrs);
                if attrs.contains(Attr::NL) {
                    s.newline();
                }
                return;
            }
            s.print_wrapped(text, colour, attrs);
            if attrs.contains(Attr::NL) && s.cursor_x != 0 {
                s.newline();
            }
        });
    }

    /// Print one character; [`Attr::DOUBLE`] prints it twice.
    pub fn print_char(&self, ch: char, colour: Colour, attrs: Attr, x: i32, y: i32) {
        self.screen.with_surface(self.id, |s| {
            s.move_cursor(x, y);
            s.put_char(ch, colour, attrs);
            if attrs.contains(Attr::DOUBLE) {
                s.put_char(ch, colour, attrs);
            }
        });
    }

    pub fn print_glyph(&self, glyph: Glyph, colour: Colour, attrs: Attr, x: i32, y: i32) {
        self.print_char(glyph.symbol(), colour, attrs, x, y);
    }

    pub fn newline(&self, count: usize) {
        self.screen.with_surface(self.id, |s| {
            for _ in 0..count {
                s.newline();
            }
        });
    }

    /// Draw a `w` x `h` grid of 3x1 cells with its top-left corner at
    /// `(x, y)`. Each grid cell spans 4 columns and 2 rows including lines.
    pub fn render_grid(&self, x: i32, y: i32, w: i32, h: i32, colour: Colour) {
        let glyph = |g: Glyph, gx: i32, gy: i32| {
            self.print_glyph(g, colour, Attr::empty(), gx, gy);
        };
        for gx in 0..w {
            for gy in 0..h {
                let (sx, sy) = (x + gx * 4, y + gy * 2);
                let (mut left, mut right) = (Glyph::Plus, Glyph::Plus);
                if gy == 0 {
                    left = Glyph::TTee;
                    right = Glyph::TTee;
                    if gx == 0 {
                        left = Glyph::ULCorner;
                    } else if gx == w - 1 {
                        right = Glyph::URCorner;
                    }
                } else if gx == 0 {
                    left = Glyph::LTee;
                } else if gx == w - 1 {
                    right = Glyph::RTee;
                }
                glyph(left, sx, sy);
                for i in 1..=3 {
                    glyph(Glyph::HLine, sx + i, sy);
                }
                glyph(Glyph::VLine, sx, sy + 1);
                if gx == w - 1 {
                    glyph(right, sx + 4, sy);
                    glyph(Glyph::VLine, sx + 4, sy + 1);
                }
                if gy == h - 1 {
                    let bottom_left = if gx == 0 {
                        Glyph::LLCorner
                    } else {
                        Glyph::BTee
                    };
                    glyph(bottom_left, sx, sy + 2);
                    for i in 1..=3 {
                        glyph(Glyph::HLine, sx + i, sy + 2);
                    }
                    if gx == w - 1 {
                        glyph(Glyph::LRCorner, sx + 4, sy + 2);
                    }
                }
            }
        }
    }

    pub fn cell_at(&self, x: u16, y: u16) -> Option<Cell> {
        self.screen.read_surface(self.id, |s| s.get(x, y)).flatten()
    }

    /// Surface-local text of row `y`.
    pub fn row_text(&self, y: u16) -> String {
        self.screen
            .read_surface(self.id, |s| s.row_text(y))
            .unwrap_or_default()
    }
}

impl Drop for SurfaceHandle {
    fn drop(&mut self) {
        match self.screen.stack.try_borrow_mut() {
            Ok(mut stack) => {
                stack.release(self.id);
                trace!(target: "terminal.surface", id = ?self.id, "surface_release");
            }
            Err(_) => {
                warn!(target: "terminal.surface", id = ?self.id, "surface_release_while_borrowed");
            }
        }
    }
}
