use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistrySettings,
}

/// What happens when a font is added under a name that is already active.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the existing entries and stack a new one on top.
    #[default]
    Stack,
    /// Remove every existing entry with that name first.
    Replace,
}

/// What happens to an entry's resource handle when the entry is removed.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HandlePolicy {
    #[default]
    Release,
    /// Leave handles alive until the session ends.
    Retain,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RegistrySettings {
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
    #[serde(default)]
    pub handles: HandlePolicy,
    pub max_rules: Option<usize>,
}

impl Config {
    pub fn load() -> Self {
        match config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Config::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Failed to read config file: {}", e);
                return Config::default();
            }
        };

        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to parse config file: {}", e);
                Config::default()
            }
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("font-registry").join("config.toml"))
}
