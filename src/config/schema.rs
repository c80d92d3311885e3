//! Configuration schema for config.toml.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Model used when neither the config file, the CLI nor the preset names one.
pub const DEFAULT_MODEL_ID: &str = "ollama/qwen2:7b";

/// Value of the weather credential that means "no key configured".
pub const WEATHER_KEY_PLACEHOLDER: &str = "demo_key_for_testing";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Model identifier. An `ollama/` provider prefix is accepted and stripped.
    /// Unset means the preset's model, then [`DEFAULT_MODEL_ID`].
    pub model_id: Option<String>,

    /// Base URL of the OpenAI-compatible model server.
    pub api_base: String,

    /// Bearer key for the model server (empty for local Ollama).
    pub api_key: String,

    /// Maximum tool-calling steps per prompt before forcing an answer.
    pub max_steps: u32,

    /// Maximum tokens per inference call.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f64,

    /// Timeout for every outbound tool request.
    pub http_timeout_secs: u64,

    /// DuckDuckGo Instant Answer endpoint.
    pub search_api_url: String,

    /// OpenWeatherMap current-weather endpoint.
    pub weather_api_url: String,

    /// OpenWeatherMap key. Overridden by OPENWEATHER_API_KEY when set.
    pub weather_api_key: String,

    /// Log level (debug, info, warn, error).
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model_id: None,
            api_base: "http://localhost:11434".into(),
            api_key: String::new(),
            max_steps: 5,
            max_tokens: 1024,
            temperature: 0.2,
            http_timeout_secs: 10,
            search_api_url: "https://api.duckduckgo.com/".into(),
            weather_api_url: "http://api.openweathermap.org/data/2.5/weather".into(),
            weather_api_key: String::new(),
            log_level: "warn".into(),
        }
    }
}

/// Where weather reports come from, decided once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherSource {
    /// Query the provider with this key.
    Live { api_key: String },
    /// Serve the built-in demo table.
    Demo,
}

impl WeatherSource {
    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo)
    }
}

impl AgentConfig {
    /// Model name as the server expects it.
    pub fn model_name(&self) -> &str {
        let id = self.model_id.as_deref().unwrap_or(DEFAULT_MODEL_ID);
        id.strip_prefix("ollama/").unwrap_or(id)
    }

    /// Use `model` only if nothing chose a model yet.
    pub fn fill_model(&mut self, model: Option<&str>) {
        if self.model_id.is_none() {
            self.model_id = model.map(str::to_string);
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Pick the weather source from the environment value (if any) and the
    /// configured key. A set environment value always wins.
    pub fn weather_source(&self, env_key: Option<String>) -> WeatherSource {
        let key = env_key.unwrap_or_else(|| self.weather_api_key.clone());
        let key = key.trim();
        if key.is_empty() || key == WEATHER_KEY_PLACEHOLDER {
            WeatherSource::Demo
        } else {
            WeatherSource::Live {
                api_key: key.to_string(),
            }
        }
    }
}
