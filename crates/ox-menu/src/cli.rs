use anyhow::{Result, anyhow};
use clap::Parser;
use core_terminal::{Colour, Key, parse_colour};
use std::path::PathBuf;

/// CLI arguments.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "ox-menu", version, about = "Scrollable terminal menu")]
pub struct Args {
    /// Menu items as `text[|colour[|side panel text]]`. Empty text is a
    /// separator; colour `black` disables the item.
    pub items: Vec<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long = "tag-left")]
    pub tag_left: Option<String>,
    #[arg(long = "tag-right")]
    pub tag_right: Option<String>,
    /// Show the side panel with the selected item's extra text.
    #[arg(long)]
    pub sidebox: bool,
    #[arg(long = "allow-left")]
    pub allow_left: bool,
    #[arg(long = "allow-right")]
    pub allow_right: bool,
    /// Initially selected item index.
    #[arg(long)]
    pub selected: Option<usize>,
    /// After a selection, ask for a line of text with this prompt.
    #[arg(long)]
    pub prompt: Option<String>,
    /// Optional configuration file path (overrides discovery of `ox-menu.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Run without a terminal, reading comma-separated key names
    /// (e.g. `down,down,enter`).
    #[arg(long, value_name = "KEYS")]
    pub headless: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub text: String,
    pub colour: Colour,
    pub sidebox: String,
}

pub fn parse_item(spec: &str) -> ItemSpec {
    let mut parts = spec.splitn(3, '|');
    let text = parts.next().unwrap_or_default().to_string();
    let colour = parts.next().map(parse_colour).unwrap_or_default();
    let sidebox = parts.next().unwrap_or_default().to_string();
    ItemSpec {
        text,
        colour,
        sidebox,
    }
}

pub fn parse_keys(list: &str) -> Result<Vec<Key>> {
    list.split(',')
        .filter(|name| !name.is_empty())
        .map(|name| Key::from_name(name).ok_or_else(|| anyhow!("unknown key name: {name:?}")))
        .collect()
}
