use core_menu::{DISABLED, LeftRight, Menu, MenuChoice, MenuPhase};
use core_terminal::{Attr, Colour, Frame, HeadlessBackend, Key, TerminalBackend};
use pretty_assertions::assert_eq;

fn span(frame: &Frame, x: usize, y: u16, len: usize) -> String {
    frame.row_text(y).chars().skip(x).take(len).collect()
}

#[test]
fn empty_menu_cancels_without_drawing() {
    let mut backend = HeadlessBackend::new().with_keys([Key::Enter]);
    let mut menu = Menu::new();
    assert_eq!(menu.render(&mut backend).unwrap(), MenuChoice::Cancelled);
    assert_eq!(menu.render(&mut backend).unwrap().code(), -1);
    assert!(backend.frames().is_empty());
    assert_eq!(backend.pending_keys(), 1);
    assert_eq!(backend.screen().surface_count(), 0);
}

#[test]
fn disabled_first_item_is_skipped_on_entry() {
    let mut backend = HeadlessBackend::new().with_keys([Key::Enter]);
    let mut menu = Menu::new();
    menu.add_item("A", DISABLED, "");
    menu.add_item("B", Colour::None, "");
    menu.add_item("C", Colour::None, "");
    assert_eq!(menu.render(&mut backend).unwrap(), MenuChoice::Selected(1));
    assert_eq!(menu.selected(), 1);
}

#[test]
fn disabled_selection_adopts_next_enabled_then_wraps() {
    let mut menu = Menu::new();
    menu.add_item("A", Colour::None, "");
    menu.add_item("B", DISABLED, "");
    menu.add_item("C", DISABLED, "");
    menu.set_selected(2);
    let mut backend = HeadlessBackend::new().with_keys([Key::Enter]);
    assert_eq!(menu.render(&mut backend).unwrap(), MenuChoice::Selected(0));
}

#[test]
fn all_disabled_keeps_selection() {
    let mut menu = Menu::new();
    menu.add_item("A", DISABLED, "");
    menu.add_item("B", DISABLED, "");
    let mut backend = HeadlessBackend::new().with_keys([Key::Down, Key::Enter]);
    assert_eq!(menu.render(&mut backend).unwrap(), MenuChoice::Selected(0));
}

#[test]
fn draws_box_title_and_items() {
    let mut backend = HeadlessBackend::new().with_keys([Key::Enter]);
    let mut menu = Menu::new();
    menu.set_title("Pick");
    menu.add_item("Alpha", Colour::None, "");
    menu.add_item("Beta", Colour::Red, "");
    assert_eq!(menu.render(&mut backend).unwrap(), MenuChoice::Selected(0));

    let frame = &backend.frames()[0];
    assert_eq!(span(frame, 36, 10, 9), "┌┤Pick├─┐");
    assert_eq!(span(frame, 36, 11, 9), "│ Alpha │");
    assert_eq!(span(frame, 36, 12, 9), "│ Beta  │");
    assert_eq!(span(frame, 36, 13, 9), "└───────┘");

    let title = frame.cell(38, 10).unwrap();
    assert_eq!(title.colour, Colour::Cyan);
    assert!(title.attrs.contains(Attr::BOLD));
    let selected = frame.cell(38, 11).unwrap();
    assert!(selected.attrs.contains(Attr::REVERSE | Attr::BOLD));
    let other = frame.cell(38, 12).unwrap();
    assert_eq!(other.colour, Colour::Red);
    assert!(!other.attrs.contains(Attr::REVERSE));
}

#[test]
fn exit_redraws_background_by_default() {
    let mut backend = HeadlessBackend::new().with_keys([Key::Esc]);
    let mut menu = Menu::new();
    menu.add_item("Alpha", Colour::None, "");
    assert_eq!(menu.render(&mut backend).unwrap(), MenuChoice::Cancelled);
    assert_eq!(backend.frames().len(), 2);
    let last = backend.last_frame().unwrap();
    assert_eq!(last.row_text(12).trim(), "");
    assert_eq!(menu.phase(), MenuPhase::Idle);
    assert_eq!(backend.screen().surface_count(), 0);
}

#[test]
fn no_redraw_on_exit_leaves_menu_up() {
    let mut backend = HeadlessBackend::new().with_keys([Key::Esc]);
    let mut menu = Menu::new();
    menu.add_item("Alpha", Colour::None, "");
    menu.no_redraw_on_exit();
    menu.render(&mut backend).unwrap();
    assert_eq!(backend.frames().len(), 1);
    assert_eq!(menu.phase(), MenuPhase::LaidOut);
    assert_eq!(backend.screen().surface_count(), 1);
}

#[test]
fn scrolls_through_thirty_items() {
    let mut keys = vec![Key::Down; 25];
    keys.push(Key::Enter);
    let mut backend = HeadlessBackend::new().with_keys(keys);
    let mut menu = Menu::new();
    for i in 0..30 {
        menu.add_item(format!("item {i}"), Colour::None, "");
    }
    menu.no_redraw_on_exit();
    assert_eq!(menu.render(&mut backend).unwrap(), MenuChoice::Selected(25));
    assert_eq!(menu.offset(), 4);
    assert_eq!(menu.selected(), menu.offset() + 21);

    let first = &backend.frames()[0];
    assert_eq!(first.cell(45, 1).unwrap().symbol, '│');
    assert_eq!(first.cell(45, 22).unwrap().symbol, '↓');

    let last = backend.last_frame().unwrap();
    assert_eq!(last.cell(45, 1).unwrap().symbol, '↑');
    assert_eq!(last.cell(45, 1).unwrap().colour, Colour::Green);
    assert_eq!(last.cell(45, 22).unwrap().symbol, '↓');
    assert_eq!(span(last, 37, 1, 6), "item 4");
    assert_eq!(span(last, 37, 22, 7), "item 25");
}

#[test]
fn left_and_right_need_permission() {
    let mut menu = Menu::new();
    menu.add_item("Alpha", Colour::None, "");
    menu.allow_left_right(LeftRight::RIGHT);
    let mut backend = HeadlessBackend::new().with_keys([Key::Left, Key::Right]);
    assert_eq!(menu.render(&mut backend).unwrap(), MenuChoice::Right);
    assert_eq!(backend.frames().len(), 3);

    menu.allow_left_right(LeftRight::LEFT);
    let mut backend = HeadlessBackend::new().with_keys([Key::Char('a')]);
    assert_eq!(menu.render(&mut backend).unwrap().code(), -2);
}

#[test]
fn resize_lays_out_again_without_moving_selection() {
    let mut menu = Menu::new();
    menu.add_item("Alpha", Colour::None, "");
    menu.add_item("Beta", Colour::None, "");
    let mut backend = HeadlessBackend::new().with_keys([Key::Down]);
    backend.resize(120, 40);
    backend.push_key(Key::Enter);
    menu.no_redraw_on_exit();
    assert_eq!(menu.render(&mut backend).unwrap(), MenuChoice::Selected(1));
    let frames = backend.frames();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[2].width, 120);
    assert_eq!(span(&frames[2], 36, 12, 9), "│ Beta  │");
    assert_eq!(backend.screen().surface_count(), 1);
}

#[test]
fn side_panel_shows_selected_text() {
    let mut menu = Menu::new();
    menu.add_item("Alpha", Colour::None, "Hello side");
    menu.add_item("Beta", Colour::None, "");
    menu.set_sidebox(true);
    menu.no_redraw_on_exit();
    let mut backend = HeadlessBackend::new().with_keys([Key::Down, Key::Enter]);
    menu.render(&mut backend).unwrap();

    // menu at x = 36 + 11, side panel 24 columns to its left
    let first = &backend.frames()[0];
    assert_eq!(span(first, 23, 10, 24), format!("┌{}┐", "─".repeat(22)));
    assert_eq!(span(first, 25, 11, 10), "Hello side");
    let last = backend.last_frame().unwrap();
    assert_eq!(span(last, 25, 11, 10), "          ");
}

#[test]
fn exhausted_input_surfaces_as_error() {
    let mut menu = Menu::new();
    menu.add_item("Alpha", Colour::None, "");
    let mut backend = HeadlessBackend::new();
    assert!(menu.render(&mut backend).is_err());
    assert_eq!(menu.phase(), MenuPhase::LaidOut);
}
