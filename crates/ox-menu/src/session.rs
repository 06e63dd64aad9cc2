use crate::cli::{Args, parse_item};
use anyhow::{Result, bail};
use core_config::{ConfigFile, ThemeConfig};
use core_menu::{LeftRight, MID_COL, MID_ROW, Menu, MenuChoice, MenuTheme, TextStyle};
use core_terminal::input::MAX_LINE;
use core_terminal::{Attr, Bindings, Colour, TerminalBackend, parse_attrs, parse_colour, read_line};
use core_text::str_width;
use core_window::WindowCompositor;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub choice: MenuChoice,
    /// Text entered at the prompt, when one was asked for.
    pub answer: Option<String>,
}

impl Outcome {
    /// Line printed on exit: the choice code, then the answer after a tab.
    pub fn report(&self) -> String {
        match &self.answer {
            Some(answer) => format!("{}\t{}", self.choice.code(), answer),
            None => self.choice.code().to_string(),
        }
    }
}

fn style(colour: &str, attrs: &str) -> TextStyle {
    TextStyle::new(parse_colour(colour), parse_attrs(attrs))
}

pub fn theme_from_config(theme: &ThemeConfig) -> MenuTheme {
    MenuTheme {
        title: style(&theme.title, &theme.title_attrs),
        tags: style(&theme.tags, &theme.tags_attrs),
        arrows: style(&theme.arrows, &theme.arrows_attrs),
        sidebox: style(&theme.sidebox, &theme.sidebox_attrs),
    }
}

pub fn build_menu(args: &Args, config: &ConfigFile) -> Result<Menu> {
    let mut menu = Menu::new()
        .with_theme(theme_from_config(&config.theme))
        .with_bindings(Bindings::new(config.input.wasd));
    for spec in args.items.iter().map(|s| parse_item(s)) {
        menu.add_item(spec.text, spec.colour, spec.sidebox);
    }
    if let Some(title) = &args.title {
        menu.set_title(title.as_str());
    }
    menu.set_tags(
        args.tag_left.as_deref().unwrap_or_default(),
        args.tag_right.as_deref().unwrap_or_default(),
    );
    let mut flags = LeftRight::empty();
    flags.set(LeftRight::LEFT, args.allow_left);
    flags.set(LeftRight::RIGHT, args.allow_right);
    menu.allow_left_right(flags);
    menu.set_sidebox(args.sidebox);
    menu.set_centered_text(config.menu.centered_text);
    if !config.menu.redraw_on_exit {
        menu.no_redraw_on_exit();
    }
    if let Some(index) = args.selected {
        if index >= menu.len() {
            bail!("--selected {index} is out of range ({} items)", menu.len());
        }
        menu.set_selected(index);
    }
    Ok(menu)
}

/// Show the menu, then optionally prompt for a line of text.
pub fn run_session<B: TerminalBackend + ?Sized>(
    backend: &mut B,
    args: &Args,
    config: &ConfigFile,
) -> Result<Outcome> {
    backend.set_title(&config.terminal.title)?;
    let mut menu = build_menu(args, config)?;
    info!(target: "runtime", items = menu.len(), sidebox = args.sidebox, "menu_start");
    let choice = menu.render(backend)?;
    let answer = match (&args.prompt, choice) {
        (Some(prompt), MenuChoice::Selected(_)) => {
            let theme = theme_from_config(&config.theme);
            Some(prompt_line(backend, prompt, theme.title.colour)?)
        }
        _ => None,
    };
    info!(target: "runtime", code = choice.code(), answered = answer.is_some(), "menu_done");
    Ok(Outcome { choice, answer })
}

fn prompt_line<B: TerminalBackend + ?Sized>(
    backend: &mut B,
    prompt: &str,
    border: Colour,
) -> Result<String> {
    let compositor = WindowCompositor::new(backend.screen());
    let width = (str_width(prompt) + 4).clamp(24, 76) as u16;
    let window = compositor.create_window(width, 5, MID_COL - i32::from(width / 2), MID_ROW - 2, true);
    compositor.redraw_border(&window, border);
    let surface = window.surface();
    surface.print(prompt, Colour::None, Attr::NL, 0, 0);

    let cursor_was_visible = backend.cursor_visible();
    backend.set_cursor_visible(true)?;
    backend.flip()?;
    let line = read_line(backend, surface, MAX_LINE);
    backend.set_cursor_visible(cursor_was_visible)?;
    compositor.destroy_window(window);
    backend.flip()?;
    debug!(target: "runtime", ok = line.is_ok(), "prompt_done");
    line
}
