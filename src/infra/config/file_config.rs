use std::{collections::HashMap, path::PathBuf};

use serde::Deserialize;

use crate::{
    domain::display::ServerIdentity,
    infra::config::{
        AppConfig, DisplayConfig, FixtureConfig, LocaleConfig, LogConfig, NavigationConfig,
    },
};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub display: Option<FileDisplayConfig>,
    pub navigation: Option<FileNavigationConfig>,
    pub fixture: Option<FileFixtureConfig>,
    pub locale: Option<HashMap<String, String>>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(display) = self.display {
            display.merge_into(&mut config.display);
        }

        if let Some(navigation) = self.navigation {
            navigation.merge_into(&mut config.navigation);
        }

        if let Some(fixture) = self.fixture {
            fixture.merge_into(&mut config.fixture);
        }

        if let Some(overrides) = self.locale {
            merge_locale(overrides, &mut config.locale);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub directory: Option<PathBuf>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(directory) = self.directory {
            config.directory = Some(directory);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileDisplayConfig {
    pub show_server_identity: Option<ServerIdentity>,
    pub prefix_at: Option<bool>,
    pub icon_size: Option<u16>,
}

impl FileDisplayConfig {
    fn merge_into(self, config: &mut DisplayConfig) {
        if let Some(identity) = self.show_server_identity {
            config.show_server_identity = identity;
        }

        if let Some(prefix_at) = self.prefix_at {
            config.prefix_at = prefix_at;
        }

        if let Some(icon_size) = self.icon_size {
            config.icon_size = icon_size;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileNavigationConfig {
    pub server: Option<String>,
}

impl FileNavigationConfig {
    fn merge_into(self, config: &mut NavigationConfig) {
        if let Some(server) = self.server {
            config.server = Some(server);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileFixtureConfig {
    pub path: Option<PathBuf>,
}

impl FileFixtureConfig {
    fn merge_into(self, config: &mut FixtureConfig) {
        if let Some(path) = self.path {
            config.path = Some(path);
        }
    }
}

fn merge_locale(overrides: HashMap<String, String>, config: &mut LocaleConfig) {
    config.overrides.extend(overrides);
}
