//! Windows and the compositor that creates them.
//!
//! A [`Window`] exclusively owns one surface and, optionally, a border
//! [`Window`] drawn as a box around it. The border is itself a plain window
//! covering the outer rectangle; the content sits 2 columns and 1 row inside
//! it and is 4 columns narrower and 2 rows shorter.
//!
//! Lifetime rules:
//! * Dropping a window releases its content surface first, then the border.
//! * Geometry is fixed at creation. A caller needing another size builds a
//!   new window and drops the old one.
//! * Z-order is creation order, most recent on top; [`WindowCompositor::raise_window`]
//!   and showing a window move it (border first) back to the top.

use core_terminal::{Attr, Colour, Rect, Screen, SurfaceHandle};
use tracing::{trace, warn};

/// Columns between the border's left edge and the content.
pub const BORDER_PAD_X: i32 = 2;
/// Rows between the border's top edge and the content.
pub const BORDER_PAD_Y: i32 = 1;

#[derive(Debug)]
pub struct Window {
    width: u16,
    height: u16,
    x: i32,
    y: i32,
    // Declared before `border` so the content surface is released first.
    surface: SurfaceHandle,
    border: Option<Box<Window>>,
}

impl Window {
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn surface(&self) -> &SurfaceHandle {
        &self.surface
    }

    pub fn border(&self) -> Option<&Window> {
        self.border.as_deref()
    }

    pub fn has_border(&self) -> bool {
        self.border.is_some()
    }

    /// Rectangle covered on screen, border included.
    pub fn outer_rect(&self) -> Rect {
        match &self.border {
            Some(b) => b.outer_rect(),
            None => Rect::new(self.x, self.y, self.width, self.height),
        }
    }
}

/// Creates windows on a shared [`Screen`].
#[derive(Debug, Clone)]
pub struct WindowCompositor {
    screen: Screen,
}

impl WindowCompositor {
    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Create a window covering `width` x `height` at `(x, y)`. With a border
    /// the outer rectangle is boxed and the content window is created inside
    /// it, above the border in stacking order.
    pub fn create_window(&self, width: u16, height: u16, x: i32, y: i32, with_border: bool) -> Window {
        if !with_border {
            let surface = self.screen.create_surface(Rect::new(x, y, width, height));
            trace!(target: "window", x, y, width, height, "window_create");
            return Window {
                width,
                height,
                x,
                y,
                surface,
                border: None,
            };
        }
        let outer = self.create_window(width, height, x, y, false);
        outer.surface.draw_box(Colour::None, Attr::empty());
        let mut inner = self.create_window(
            width.saturating_sub(4),
            height.saturating_sub(2),
            x + BORDER_PAD_X,
            y + BORDER_PAD_Y,
            false,
        );
        inner.border = Some(Box::new(outer));
        inner
    }

    /// Release a window and, recursively, its border.
    pub fn destroy_window(&self, window: Window) {
        trace!(target: "window", x = window.x, y = window.y, border = window.has_border(), "window_destroy");
        drop(window);
    }

    /// Move a window so its outer rectangle starts at `(x, y)`. Size and
    /// stacking order are unchanged; the content keeps its offset inside the
    /// border.
    pub fn move_window(&self, window: &mut Window, x: i32, y: i32) {
        let (cx, cy) = match window.border.as_deref_mut() {
            Some(border) => {
                self.move_window(border, x, y);
                (x + BORDER_PAD_X, y + BORDER_PAD_Y)
            }
            None => (x, y),
        };
        window.x = cx;
        window.y = cy;
        window.surface.move_to(cx, cy);
    }

    /// Re-box the border in `colour`. A window without a border is left
    /// untouched.
    pub fn redraw_border(&self, window: &Window, colour: Colour) {
        match &window.border {
            Some(border) => border.surface.draw_box(colour, Attr::empty()),
            None => warn!(target: "window", x = window.x, y = window.y, "redraw_border_without_border"),
        }
    }

    pub fn raise_window(&self, window: &Window) {
        if let Some(border) = &window.border {
            self.raise_window(border);
        }
        window.surface.raise();
    }

    /// Show or hide a window with its border. Showing also raises it.
    pub fn set_visible(&self, window: &Window, visible: bool) {
        if let Some(border) = &window.border {
            self.set_visible(border, visible);
        }
        window.surface.set_visible(visible);
    }
}
