//! Configuration loading and parsing.
//!
//! Reads `ox-menu.toml` (or an override path given by the binary). Every
//! section and key is optional; absent values take the defaults below.
//! Unknown fields are ignored so older binaries accept newer files.
//!
//! ```toml
//! [terminal]
//! title = "ox-menu"
//!
//! [input]
//! wasd = true          # w/a/s/d double as arrow keys
//!
//! [theme]
//! title = "cyan"
//! title_attrs = "bold"
//! tags = "white"
//! tags_attrs = "bold"
//! arrows = "green"
//! arrows_attrs = "bold"
//! sidebox = "none"
//! sidebox_attrs = ""
//!
//! [menu]
//! centered_text = true
//! redraw_on_exit = true
//! ```
//!
//! Colour and attribute values stay as text here; they are interpreted by the
//! terminal layer, which maps anything unrecognised to a neutral default.
//!
//! [`load_from`] never fails on a missing or malformed file: it logs and
//! falls back to defaults. [`load_strict`] reports those cases as
//! [`ConfigError`] for callers that asked for a specific file.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, io, path::PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const FILE_NAME: &str = "ox-menu.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    #[serde(default = "TerminalConfig::default_title")]
    pub title: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
        }
    }
}

impl TerminalConfig {
    fn default_title() -> String {
        "ox-menu".to_string()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_wasd")]
    pub wasd: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wasd: Self::default_wasd(),
        }
    }
}

impl InputConfig {
    const fn default_wasd() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeConfig {
    pub title: String,
    pub title_attrs: String,
    pub tags: String,
    pub tags_attrs: String,
    pub arrows: String,
    pub arrows_attrs: String,
    pub sidebox: String,
    pub sidebox_attrs: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            title: "cyan".into(),
            title_attrs: "bold".into(),
            tags: "white".into(),
            tags_attrs: "bold".into(),
            arrows: "green".into(),
            arrows_attrs: "bold".into(),
            sidebox: "none".into(),
            sidebox_attrs: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    #[serde(default = "MenuConfig::default_true")]
    pub centered_text: bool,
    #[serde(default = "MenuConfig::default_true")]
    pub redraw_on_exit: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            centered_text: true,
            redraw_on_exit: true,
        }
    }
}

impl MenuConfig {
    const fn default_true() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub terminal: TerminalConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub menu: MenuConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file text when one was read
    pub path: Option<PathBuf>,
    pub file: ConfigFile,
}

/// Best-effort config path: `ox-menu.toml` in the working directory, then the
/// platform config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("ox-menu").join(FILE_NAME);
    }
    local
}

/// Parse config text.
pub fn parse(content: &str) -> std::result::Result<ConfigFile, toml::de::Error> {
    toml::from_str::<ConfigFile>(content)
}

/// Load `path` (or the discovered path), failing on unreadable or invalid
/// files.
pub fn load_strict(path: Option<PathBuf>) -> std::result::Result<Config, ConfigError> {
    let path = path.unwrap_or_else(discover);
    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let file = parse(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    Ok(Config {
        raw: Some(content),
        path: Some(path),
        file,
    })
}

/// Load `path` (or the discovered path), using defaults when the file is
/// missing or invalid.
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    match load_strict(path) {
        Ok(cfg) => {
            debug!(target: "config", path = ?cfg.path, "config_loaded");
            Ok(cfg)
        }
        Err(ConfigError::Read { path, source }) if source.kind() == io::ErrorKind::NotFound => {
            debug!(target: "config", path = %path.display(), "config_missing_using_defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!(target: "config", error = %e, "config_unusable_using_defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn write_tmp(content: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), content).unwrap();
        tmp
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.file, ConfigFile::default());
        assert!(cfg.raw.is_none());
        assert!(cfg.file.input.wasd);
        assert!(cfg.file.menu.centered_text);
        assert!(cfg.file.menu.redraw_on_exit);
        assert_eq!(cfg.file.theme.title, "cyan");
        assert_eq!(cfg.file.terminal.title, "ox-menu");
    }

    #[test]
    fn parses_all_sections() {
        let tmp = write_tmp(
            "[terminal]\ntitle = \"Shop\"\n\n[input]\nwasd = false\n\n\
             [theme]\ntitle = \"yellow\"\narrows_attrs = \"bold blink\"\n\n\
             [menu]\ncentered_text = false\nredraw_on_exit = false\n",
        );
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.terminal.title, "Shop");
        assert!(!cfg.file.input.wasd);
        assert_eq!(cfg.file.theme.title, "yellow");
        assert_eq!(cfg.file.theme.arrows_attrs, "bold blink");
        // untouched keys keep defaults
        assert_eq!(cfg.file.theme.tags, "white");
        assert!(!cfg.file.menu.centered_text);
        assert!(!cfg.file.menu.redraw_on_exit);
        assert!(cfg.raw.is_some());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let cfg = parse("[menu]\nfuture_knob = 3\n[other]\nx = 1\n").unwrap();
        assert_eq!(cfg, ConfigFile::default());
    }

    #[test]
    fn strict_loading_reports_errors() {
        let missing = load_strict(Some(PathBuf::from("__nonexistent_strict__.toml")));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));

        let tmp = write_tmp("[menu]\ncentered_text = \"yes\"\n");
        let err = load_strict(Some(tmp.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid config file"));
    }

    #[test]
    fn invalid_file_falls_back_and_warns() {
        let tmp = write_tmp("[input\nwasd = ");
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || load_from(Some(tmp.path().to_path_buf()))).unwrap();
        assert_eq!(cfg.file, ConfigFile::default());

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("WARN config:"));
        assert!(log_output.contains("config_unusable_using_defaults"));
    }
}
