use crate::{
    DISABLED, LeftRight, MAX_MENU_HEIGHT, MID_COL, MID_ROW, MenuChoice, MenuItem, MenuTheme,
    SIDEBOX_WIDTH, VISIBLE_ROWS,
};
use anyhow::Result;
use core_terminal::{Attr, Bindings, Colour, Glyph, Key, Rect, TerminalBackend};
use core_text::{GreedySplitter, LineSplitter, str_width};
use core_window::{Window, WindowCompositor};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuPhase {
    #[default]
    Idle,
    LaidOut,
    Rendering,
}

/// Result of feeding one key to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    /// The display changed size; lay out again before the next draw.
    Relayout,
    Done(MenuChoice),
}

/// Computed placement of a menu. Columns for the title and tags are relative
/// to the menu window; `x`/`y` are screen coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
    pub x: i32,
    pub y: i32,
    pub title_x: i32,
    pub tag_left_x: i32,
    pub tag_right_x: i32,
    pub item_x: Vec<i32>,
    /// Side panel rectangle when the side panel is enabled.
    pub side: Option<Rect>,
}

pub struct Menu {
    items: Vec<MenuItem>,
    selected: usize,
    offset: usize,
    title: String,
    tag_left: String,
    tag_right: String,
    allowed: LeftRight,
    centered_text: bool,
    sidebox: bool,
    redraw_on_exit: bool,
    sidebox_height: usize,
    theme: MenuTheme,
    bindings: Bindings,
    splitter: Box<dyn LineSplitter>,
    geometry: Option<Geometry>,
    window: Option<Window>,
    side_window: Option<Window>,
    phase: MenuPhase,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            offset: 0,
            title: String::new(),
            tag_left: String::new(),
            tag_right: String::new(),
            allowed: LeftRight::empty(),
            centered_text: true,
            sidebox: false,
            redraw_on_exit: true,
            sidebox_height: 0,
            theme: MenuTheme::default(),
            bindings: Bindings::default(),
            splitter: Box::new(GreedySplitter),
            geometry: None,
            window: None,
            side_window: None,
            phase: MenuPhase::Idle,
        }
    }

    pub fn with_theme(mut self, theme: MenuTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_bindings(mut self, bindings: Bindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Replace the strategy used to wrap side panel text.
    pub fn with_splitter(mut self, splitter: Box<dyn LineSplitter>) -> Self {
        self.splitter = splitter;
        self
    }

    pub fn add_item(&mut self, text: impl Into<String>, colour: Colour, sidebox: impl Into<String>) {
        let item = MenuItem::new(text, colour, sidebox);
        if !item.sidebox.is_empty() {
            let lines = self.splitter.line_count(&item.sidebox, SIDEBOX_WIDTH);
            self.sidebox_height = self.sidebox_height.max(lines);
        }
        trace!(target: "menu", index = self.items.len(), text = %item.text, ?colour, "add_item");
        self.items.push(item);
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> &MenuItem {
        assert!(
            index < self.items.len(),
            "menu item {index} out of range ({} items)",
            self.items.len()
        );
        &self.items[index]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn phase(&self) -> MenuPhase {
        self.phase
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tags(&self) -> (&str, &str) {
        (&self.tag_left, &self.tag_right)
    }

    pub fn allowed(&self) -> LeftRight {
        self.allowed
    }

    pub fn sidebox_height(&self) -> usize {
        self.sidebox_height
    }

    /// Geometry of the last layout, if any.
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    pub fn side_window(&self) -> Option<&Window> {
        self.side_window.as_ref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Set the bottom-left and bottom-right tags; an empty string keeps the
    /// current tag on that side.
    pub fn set_tags(&mut self, left: &str, right: &str) {
        if !left.is_empty() {
            self.tag_left = left.to_string();
        }
        if !right.is_empty() {
            self.tag_right = right.to_string();
        }
    }

    /// Let left and/or right keys end the loop. Flags only ever add.
    pub fn allow_left_right(&mut self, flags: LeftRight) {
        self.allowed |= flags;
    }

    /// Select `index` and scroll until it is visible.
    ///
    /// # Panics
    /// When `index` is not an item of the menu (always, for an empty menu).
    pub fn set_selected(&mut self, index: usize) {
        assert!(
            index < self.items.len(),
            "selected index {index} out of range ({} items)",
            self.items.len()
        );
        self.selected = index;
        self.scroll_into_view();
    }

    /// Leave the menu on screen after the render loop returns.
    pub fn no_redraw_on_exit(&mut self) {
        self.redraw_on_exit = false;
    }

    pub fn set_centered_text(&mut self, centered: bool) {
        self.centered_text = centered;
    }

    pub fn set_sidebox(&mut self, enabled: bool) {
        self.sidebox = enabled;
    }

    /// Compute placement from the current items, tags and title. `None` for
    /// an empty menu.
    pub fn layout(&self) -> Option<Geometry> {
        if self.items.is_empty() {
            return None;
        }
        let tags = str_width(&self.tag_left) + str_width(&self.tag_right);
        let widest = self
            .items
            .iter()
            .map(|item| str_width(&item.text))
            .max()
            .unwrap_or(0)
            .max(tags)
            .max(str_width(&self.title));
        let width = u16::try_from(widest + 4).unwrap_or(u16::MAX);
        let height = (self.items.len() + 2).min(MAX_MENU_HEIGHT) as u16;
        let mut x = MID_COL - i32::from(width / 2);
        let y = MID_ROW - i32::from(height / 2);
        let side = if self.sidebox {
            x += (SIDEBOX_WIDTH as i32 + 2) / 2;
            let side_width = SIDEBOX_WIDTH as u16 + 4;
            let side_height = u16::try_from(self.sidebox_height + 2).unwrap_or(u16::MAX);
            Some(Rect::new(x - i32::from(side_width), y, side_width, side_height))
        } else {
            None
        };
        let mid = i32::from(width / 2);
        let centred = |text: &str| mid - (str_width(text) / 2) as i32;
        let item_x = self
            .items
            .iter()
            .map(|item| if self.centered_text { centred(&item.text) } else { 2 })
            .collect();
        Some(Geometry {
            width,
            height,
            x,
            y,
            title_x: centred(&self.title),
            tag_left_x: 1,
            tag_right_x: i32::from(width) - str_width(&self.tag_right) as i32 - 1,
            item_x,
            side,
        })
    }

    /// Lay the menu out again and replace its windows. Does nothing for an
    /// empty menu.
    pub fn reposition(&mut self, compositor: &WindowCompositor) {
        let Some(geometry) = self.layout() else {
            return;
        };
        for (item, x) in self.items.iter_mut().zip(&geometry.item_x) {
            item.x = *x;
        }
        // Old windows go first so the new ones are the only menu surfaces.
        self.window = None;
        self.side_window = None;
        self.window = Some(compositor.create_window(
            geometry.width,
            geometry.height,
            geometry.x,
            geometry.y,
            false,
        ));
        self.side_window = geometry
            .side
            .map(|r| compositor.create_window(r.width, r.height, r.x, r.y, false));
        debug!(target: "menu", x = geometry.x, y = geometry.y, w = geometry.width, h = geometry.height, side = geometry.side.is_some(), "reposition");
        self.geometry = Some(geometry);
        if self.phase == MenuPhase::Idle {
            self.phase = MenuPhase::LaidOut;
        }
    }

    /// Run the key loop until a choice is made. An empty menu returns
    /// [`MenuChoice::Cancelled`] without drawing anything.
    pub fn render<B: TerminalBackend + ?Sized>(&mut self, backend: &mut B) -> Result<MenuChoice> {
        if self.items.is_empty() {
            debug!(target: "menu", "render_empty");
            return Ok(MenuChoice::Cancelled);
        }
        self.adopt_enabled();
        let compositor = WindowCompositor::new(backend.screen());
        self.reposition(&compositor);
        self.phase = MenuPhase::Rendering;
        let outcome = self.run(backend, &compositor);
        self.phase = MenuPhase::LaidOut;
        let choice = outcome?;
        if self.redraw_on_exit {
            self.window = None;
            self.side_window = None;
            self.phase = MenuPhase::Idle;
            backend.flip()?;
        }
        debug!(target: "menu", code = choice.code(), "render_done");
        Ok(choice)
    }

    fn run<B: TerminalBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        compositor: &WindowCompositor,
    ) -> Result<MenuChoice> {
        loop {
            self.draw();
            backend.flip()?;
            let key = backend.read_key()?;
            match self.handle_key(key) {
                KeyOutcome::Continue => {}
                KeyOutcome::Relayout => self.reposition(compositor),
                KeyOutcome::Done(choice) => return Ok(choice),
            }
        }
    }

    /// Apply one key to the selection. Movement skips separators and
    /// disabled items and refuses to land on a disabled one.
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if self.items.is_empty() {
            return KeyOutcome::Done(MenuChoice::Cancelled);
        }
        let last = self.items.len() - 1;
        let b = self.bindings;
        if key == Key::Resize {
            return KeyOutcome::Relayout;
        } else if b.is_up(key) && self.selected > 0 {
            let old = self.selected;
            let mut pos = old - 1;
            while pos > 0 && self.items[pos].is_skipped() {
                pos -= 1;
            }
            self.selected = if self.items[pos].is_disabled() { old } else { pos };
        } else if b.is_down(key) && self.selected < last {
            let old = self.selected;
            let mut pos = old + 1;
            while pos < last && self.items[pos].is_skipped() {
                pos += 1;
            }
            self.selected = if self.items[pos].is_disabled() { old } else { pos };
        } else if b.is_left(key) && self.allowed.contains(LeftRight::LEFT) {
            return KeyOutcome::Done(MenuChoice::Left);
        } else if b.is_right(key) && self.allowed.contains(LeftRight::RIGHT) {
            return KeyOutcome::Done(MenuChoice::Right);
        } else if b.is_select(key) {
            return KeyOutcome::Done(MenuChoice::Selected(self.selected));
        } else if b.is_cancel(key) {
            return KeyOutcome::Done(MenuChoice::Cancelled);
        }
        self.scroll_step();
        trace!(target: "menu", ?key, selected = self.selected, offset = self.offset, "key");
        KeyOutcome::Continue
    }

    fn adopt_enabled(&mut self) {
        if !self.items[self.selected].is_disabled() {
            return;
        }
        let enabled = |i: &usize| self.items[*i].colour != DISABLED;
        let found = (self.selected + 1..self.items.len())
            .find(enabled)
            .or_else(|| (0..self.selected).find(enabled));
        if let Some(index) = found {
            debug!(target: "menu", from = self.selected, to = index, "adopt_enabled");
            self.selected = index;
        }
        self.scroll_into_view();
    }

    fn scroll_step(&mut self) {
        if self.selected > self.offset + VISIBLE_ROWS - 1 {
            self.offset += 1;
        } else if self.selected < self.offset {
            self.offset -= 1;
        }
    }

    fn scroll_into_view(&mut self) {
        while self.selected > self.offset + VISIBLE_ROWS - 1 || self.selected < self.offset {
            self.scroll_step();
        }
    }

    fn draw(&self) {
        let (Some(window), Some(geo)) = (&self.window, &self.geometry) else {
            return;
        };
        let s = window.surface();
        let (w, h) = (i32::from(geo.width), i32::from(geo.height));
        s.clear();
        s.draw_box(Colour::None, Attr::empty());

        if !self.title.is_empty() {
            let style = self.theme.title;
            s.move_cursor(geo.title_x - 1, 0);
            s.print_glyph(Glyph::RTee, Colour::None, Attr::empty(), -1, -1);
            s.print(&self.title, style.colour, style.attrs | Attr::RAW, -1, -1);
            s.print_glyph(Glyph::LTee, Colour::None, Attr::empty(), -1, -1);
        }
        let tags = self.theme.tags;
        s.print(&self.tag_left, tags.colour, tags.attrs | Attr::RAW, geo.tag_left_x, h - 1);
        s.print(&self.tag_right, tags.colour, tags.attrs | Attr::RAW, geo.tag_right_x, h - 1);

        let end = self.items.len().min(self.offset + VISIBLE_ROWS);
        for (row, index) in (self.offset..end).enumerate() {
            let item = &self.items[index];
            let mut attrs = Attr::BOLD | Attr::RAW;
            if index == self.selected {
                attrs |= Attr::REVERSE;
            }
            s.print(&item.text, item.colour, attrs, item.x, row as i32 + 1);
        }
        let arrows = self.theme.arrows;
        if self.offset > 0 {
            s.print_glyph(Glyph::UArrow, arrows.colour, arrows.attrs, w - 1, 1);
        }
        if end < self.items.len() {
            s.print_glyph(Glyph::DArrow, arrows.colour, arrows.attrs, w - 1, h - 2);
        }

        if let Some(side) = &self.side_window {
            let side = side.surface();
            side.clear();
            side.draw_box(Colour::None, Attr::empty());
            let text = &self.items[self.selected].sidebox;
            if !text.is_empty() {
                let style = self.theme.sidebox;
                for (i, line) in self.splitter.split(text, SIDEBOX_WIDTH).iter().enumerate() {
                    side.print(line, style.colour, style.attrs | Attr::RAW, 2, i as i32 + 1);
                }
            }
        }
    }
}
