//! Scrollable menu state machine.
//!
//! A [`Menu`] collects items, lays itself out centred on an 80x24 logical
//! screen and runs a blocking key loop against a
//! [`TerminalBackend`](core_terminal::TerminalBackend) until the user picks,
//! cancels or (when enabled) presses left/right.
//!
//! Phases:
//! * [`MenuPhase::Idle`]: constructed or exited with redraw; no windows.
//! * [`MenuPhase::LaidOut`]: geometry computed and windows created.
//! * [`MenuPhase::Rendering`]: inside the key loop.
//!
//! Invariants after every state-changing call:
//! * `selected < items.len()` whenever the menu is non-empty.
//! * `offset <= selected <= offset + VISIBLE_ROWS - 1`.
//!
//! Items coloured [`DISABLED`] are never selectable by movement; the first
//! render moves selection off a disabled item when an enabled one exists.

mod choice;
mod item;
mod menu;
mod theme;

pub use choice::{LeftRight, MenuChoice};
pub use item::MenuItem;
pub use menu::{Geometry, KeyOutcome, Menu, MenuPhase};
pub use theme::{MenuTheme, TextStyle};

use core_terminal::Colour;

/// Items visible at once (24 rows minus the top and bottom border).
pub const VISIBLE_ROWS: usize = 22;
/// Tallest a menu window gets.
pub const MAX_MENU_HEIGHT: usize = VISIBLE_ROWS + 2;
/// Wrap width of the side panel text.
pub const SIDEBOX_WIDTH: usize = 20;
/// Colour marking an item as disabled.
pub const DISABLED: Colour = Colour::Black;
/// Centre of the logical screen menus are laid out on.
pub const MID_COL: i32 = 40;
pub const MID_ROW: i32 = 12;
