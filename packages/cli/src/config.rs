use std::path::{Path, PathBuf};

use common::config::{GameConfig, StoreConfig};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub game: GameConfig,
}

impl CliConfig {
    /// Layer defaults, the config file at `path` (or `config/config.toml`)
    /// and `ROULETTE__*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = path
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "config/config".into());

        let mut builder = Config::builder();
        if let Some(data_path) = default_store_path() {
            builder = builder.set_default("store.path", data_path.to_string_lossy().into_owned())?;
        }

        let s = builder
            .add_source(File::with_name(&file).required(path.is_some()))
            .add_source(Environment::with_prefix("ROULETTE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

/// Local document under the user's data directory, e.g.
/// `~/.local/share/cloud-roulette/cloud-roulette.json`.
fn default_store_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("cloud-roulette").join("cloud-roulette.json"))
}
