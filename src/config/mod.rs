pub mod schema;

pub use schema::{AgentConfig, WeatherSource, DEFAULT_MODEL_ID, WEATHER_KEY_PLACEHOLDER};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable holding the weather provider key.
pub const WEATHER_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Default config location (~/.agent-tools/config.toml).
pub fn default_config_path() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".agent-tools").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".agent-tools/config.toml"))
}

/// Expand a leading `~` in a user-supplied path.
pub fn resolve_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Load config from the given path, or return defaults.
pub fn load_config(path: &Path) -> Result<AgentConfig> {
    if path.exists() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AgentConfig =
            toml::from_str(&contents).context("Failed to parse agent config (TOML)")?;
        Ok(config)
    } else {
        Ok(AgentConfig::default())
    }
}

/// Read the weather key from the process environment, once.
pub fn weather_key_from_env() -> Option<String> {
    std::env::var(WEATHER_KEY_ENV).ok()
}
