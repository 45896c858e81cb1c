use common::config::{GameConfig, StoreConfig};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub game: GameConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("ROULETTE_CONFIG").unwrap_or_else(|_| "config/config".into());

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("store.backend", "local")?
            .set_default("store.path", "data/cloud-roulette.json")?
            // Load from config/config.toml unless ROULETTE_CONFIG points elsewhere
            .add_source(File::with_name(&path).required(false))
            // Override from environment (e.g., ROULETTE__STORE__BACKEND=database)
            .add_source(Environment::with_prefix("ROULETTE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
