use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Storage key for the persisted theme flag.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Value stored under the `theme` key.
    pub fn storage_value(self) -> &'static str {
        match self {
            Theme::Light => "light-mode",
            Theme::Dark => "dark-mode",
        }
    }

    pub fn from_storage(value: &str) -> Option<Self> {
        match value {
            "light-mode" => Some(Theme::Light),
            "dark-mode" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Matching editor syntax-highlighting theme.
    pub fn editor_theme(self) -> &'static str {
        match self {
            Theme::Light => "github",
            Theme::Dark => "dracula",
        }
    }

    /// Label for the toggle control: names the theme it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "dark",
            Theme::Dark => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// One-value file store for the theme flag, read at startup and written
/// on toggle.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    /// The store lives in `config_dir`, created on demand.
    pub fn new(config_dir: impl AsRef<Path>) -> Result<Self> {
        let config_dir = config_dir.as_ref();
        create_dir_all(config_dir)?;
        Ok(Self {
            path: config_dir.join(THEME_KEY),
        })
    }

    pub fn load(&self) -> Option<Theme> {
        let content = fs::read_to_string(&self.path).ok()?;
        Theme::from_storage(content.trim())
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        fs::write(&self.path, theme.storage_value())?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
