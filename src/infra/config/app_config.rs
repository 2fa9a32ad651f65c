use std::{collections::HashMap, path::PathBuf};

use crate::domain::display::ServerIdentity;
use crate::ui::DEFAULT_ICON_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub display: DisplayConfig,
    pub navigation: NavigationConfig,
    pub fixture: FixtureConfig,
    pub locale: LocaleConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// Overrides the platform state directory for the log file.
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    pub show_server_identity: ServerIdentity,
    pub prefix_at: bool,
    pub icon_size: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_server_identity: ServerIdentity::Both,
            prefix_at: false,
            icon_size: DEFAULT_ICON_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationConfig {
    /// Server opened at startup; defaults to the fixture's first server.
    pub server: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FixtureConfig {
    /// Client state snapshot; the built-in demo data is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocaleConfig {
    pub overrides: HashMap<String, String>,
}
