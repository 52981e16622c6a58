use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::infra::tvmaze::TVMAZE_API_BASE;

pub const DEFAULT_COUNTRY: &str = "US";
pub const DEFAULT_SCHEDULE_LIMIT: usize = 20;

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    api_base_url: Option<String>,
    country: Option<String>,
    schedule_limit: Option<usize>,
    log_level: Option<String>,
}

/// Effective settings after merging defaults, the config file and CLI overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub country: String,
    pub schedule_limit: usize,
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: TVMAZE_API_BASE.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            schedule_limit: DEFAULT_SCHEDULE_LIMIT,
            log_level: None,
        }
    }
}

/// Values from flags or their environment variables; these win over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub api_base_url: Option<String>,
    pub country: Option<String>,
}

impl Settings {
    pub fn load(overrides: Overrides) -> Result<Self> {
        let file = read_config_file(&get_config_path())?;
        Ok(Self::resolve(file, overrides))
    }

    fn resolve(file: ConfigFile, flags: Overrides) -> Self {
        let defaults = Settings::default();
        Self {
            api_base_url: flags
                .api_base_url
                .or(file.api_base_url)
                .unwrap_or(defaults.api_base_url),
            country: flags
                .country
                .or(file.country)
                .map(|c| c.to_uppercase())
                .unwrap_or(defaults.country),
            schedule_limit: file
                .schedule_limit
                .filter(|limit| *limit > 0)
                .unwrap_or(defaults.schedule_limit),
            log_level: file.log_level,
        }
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

fn get_config_dir_path() -> PathBuf {
    xdir::config()
        .map(|path| path.join("showtrackr"))
        // If the standard path could not be found (e.g.`$HOME` is not set),
        // default to the current directory.
        .unwrap_or_default()
}

pub fn get_config_path() -> PathBuf {
    get_config_dir_path().join("config.toml")
}
