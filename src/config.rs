//! Configuration management for Lexibot.
//!
//! Settings come from built-in defaults, an optional TOML file, a `.env`
//! file and finally the process environment, in that order of precedence.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application name used for config directory.
const APP_NAME: &str = "Lexibot";

/// Default config filename.
const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable names.
pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_USERNAME: &str = "BLUESKY_USERNAME";
pub const ENV_PASSWORD: &str = "BLUESKY_PASSWORD";
pub const ENV_DEBUG: &str = "DEBUG";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dictionary API key.
    pub api_key: String,

    /// Social network login identifier.
    pub username: String,

    /// Social network (app) password.
    pub password: String,

    /// Dry-run against a local fixture instead of the live services.
    pub debug: bool,

    /// Remote endpoints for the word and its definition.
    pub sources: SourcesConfig,

    /// Outbound HTTP settings.
    pub http: HttpConfig,

    /// Bluesky settings.
    pub bluesky: BlueskyConfig,

    /// Debug-mode fixture settings.
    pub fixtures: FixtureConfig,
}

/// Remote endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Page that names the word of the day.
    pub word_of_day_url: String,

    /// Base URL of the collegiate dictionary JSON API.
    pub dictionary_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            word_of_day_url: "https://www.merriam-webster.com/word-of-the-day".to_string(),
            dictionary_url: "https://dictionaryapi.com/api/v3/references/collegiate/json/"
                .to_string(),
        }
    }
}

/// Outbound HTTP configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    pub timeout_sec: u64,

    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_sec: 30,
            user_agent: concat!("lexibot/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Bluesky configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BlueskyConfig {
    /// PDS / entryway the session is created against.
    pub service_url: String,
}

impl Default for BlueskyConfig {
    fn default() -> Self {
        Self {
            service_url: "https://bsky.social".to_string(),
        }
    }
}

/// Fixture configuration used in debug mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Word used instead of scraping the live page.
    pub word: String,

    /// Directory holding `sample_api_response_<word>.json` files.
    pub data_directory: PathBuf,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            word: "rapport".to_string(),
            data_directory: PathBuf::from("data"),
        }
    }
}

impl FixtureConfig {
    /// Path of the recorded dictionary response for `word`.
    pub fn response_path(&self, word: &str) -> PathBuf {
        self.data_directory
            .join(format!("sample_api_response_{}.json", word))
    }
}

impl Config {
    /// Returns the full path to the optional user config file.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_NAME).join(CONFIG_FILENAME))
    }

    /// Loads configuration from every source.
    ///
    /// An explicit `path` must exist; the default user config file is only
    /// read when present. A `.env` file in the working directory overrides
    /// already-set environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => match Self::config_path().filter(|p| p.exists()) {
                Some(default_path) => Self::load_from(&default_path)?,
                None => Config::default(),
            },
        };

        load_dotenv()?;
        config.apply_env(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// Loads configuration from a specific TOML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Overrides values with whatever `lookup` returns for the known
    /// environment variables.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api_key = key;
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            self.username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = password;
        }
        if let Some(debug) = lookup(ENV_DEBUG) {
            self.debug = debug.trim().eq_ignore_ascii_case("true");
        }
    }

    /// Validates the configuration for the selected mode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.debug {
            let required = [
                (ENV_API_KEY, &self.api_key),
                (ENV_USERNAME, &self.username),
                (ENV_PASSWORD, &self.password),
            ];
            for (name, value) in required {
                if value.trim().is_empty() {
                    return Err(ConfigError::MissingValue(name.to_string()));
                }
            }
        }

        if self.http.timeout_sec == 0 {
            return Err(ConfigError::InvalidValue {
                key: "http.timeout_sec".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if self.fixtures.word.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "fixtures.word".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Loads `.env` from the working directory if one exists.
fn load_dotenv() -> Result<(), ConfigError> {
    match dotenvy::dotenv_override() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded .env file");
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::DotenvError(e.to_string())),
    }
}
