use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::render::DEFAULT_SIGNATURE;
use crate::theme::Theme;
use crate::tz::Tz;

const CONFIG_PATH_ENV_VAR: &str = "YEAR_PROGRESS_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("year-progress").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".year-progress.toml"));
    }

    locations
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
    pub timezone: Tz,
    pub refresh_secs: u64,
    pub signature: String,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            width: 1080,
            height: 2400,
            output: PathBuf::from("year-progress.png"),
            timezone: Tz::default(),
            refresh_secs: 3600,
            signature: DEFAULT_SIGNATURE.to_owned(),
            theme: Theme::default(),
        }
    }
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::from(e).with_msg(&format!("{}", path.display())))?;

        content.parse()
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }
}

impl std::str::FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Config> {
        Ok(toml::from_str(s)?)
    }
}

pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        if !path.is_file() {
            return Err(Error::new(
                ErrorKind::IOError(io::Error::from(io::ErrorKind::NotFound)),
                &format!("config file '{}' does not exist", path.display()),
            ));
        }
        log::info!("Loading config from {}", path.display());
        return Config::from_path(path);
    }

    match find_configfile_locations().into_iter().find(|p| p.is_file()) {
        Some(found) => {
            log::info!("Loading config from {}", found.display());
            Config::from_path(&found)
        }
        None => {
            log::debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
