use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Catalog file to use instead of the bundled challenges.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Directory holding the progress files.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl UserConfig {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_config_dir)
    }
}

pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("codele")
}

pub fn get_config_path() -> PathBuf {
    default_config_dir().join("config.json")
}

pub fn load_config() -> UserConfig {
    load_config_from(&get_config_path())
}

pub fn load_config_from(path: &Path) -> UserConfig {
    if !path.exists() {
        return UserConfig::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!("ignoring unparsable config {}: {}", path.display(), e);
            UserConfig::default()
        }),
        Err(e) => {
            warn!("failed to read config {}: {}", path.display(), e);
            UserConfig::default()
        }
    }
}

pub fn save_config(config: &UserConfig) -> Result<(), std::io::Error> {
    save_config_to(&get_config_path(), config)
}

pub fn save_config_to(path: &Path, config: &UserConfig) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents)
}
