use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// JSON question file; the bundled catalog is used when unset.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_shuffle_choices")]
    pub shuffle_choices: bool,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_data_dir() -> PathBuf {
    crate::store::json_store::default_data_dir()
}
fn default_shuffle_choices() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            catalog_path: None,
            data_dir: default_data_dir(),
            shuffle_choices: default_shuffle_choices(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quizr")
            .join("config.toml")
    }
}
