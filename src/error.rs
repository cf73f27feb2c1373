//! Error types for the Lexibot job.
//!
//! Uses `thiserror` for structured error definitions. Every stage of the
//! pipeline has its own error type, and [`BotError`] composes them so the
//! orchestrator can abort on the first failure.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of an outbound HTTP GET.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("Fetch failed for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status.
    #[error("Fetch failed for {url}: {detail}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        detail: String,
    },
}

impl FetchError {
    /// Removes the query string from the reported URL.
    ///
    /// Lookup URLs carry the API key as a query parameter.
    pub fn without_query(self) -> Self {
        fn strip(url: String) -> String {
            match url.split_once('?') {
                Some((base, _)) => base.to_string(),
                None => url,
            }
        }

        match self {
            FetchError::Transport { url, source } => FetchError::Transport {
                url: strip(url),
                source: source.without_url(),
            },
            FetchError::Status {
                url,
                status,
                detail,
            } => FetchError::Status {
                url: strip(url),
                status,
                detail,
            },
        }
    }
}

/// Error type for scraping the word-of-the-day page.
#[derive(Error, Debug)]
pub enum ScraperError {
    /// Page could not be retrieved.
    #[error(transparent)]
    FetchFailed(#[from] FetchError),

    /// The expected HTML element is missing.
    #[error("Element not found: {0}")]
    NotFound(String),
}

/// Error type for dictionary lookups and response parsing.
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// Lookup request failed.
    #[error(transparent)]
    FetchFailed(#[from] FetchError),

    /// Response body was not valid JSON.
    #[error("Dictionary response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A required field or path is missing from the response.
    #[error("Unexpected dictionary response structure: {0}")]
    StructureMismatch(String),

    /// The lookup URL could not be built.
    #[error("Invalid dictionary URL: {0}")]
    InvalidUrl(String),
}

/// Error type for the social network client.
#[derive(Error, Debug)]
pub enum SocialError {
    /// Login was rejected or could not be performed.
    #[error("Login failed: {0}")]
    AuthFailed(String),

    /// Publishing the post was rejected or could not be performed.
    #[error("Post failed: {0}")]
    PostFailed(String),

    /// `post` was called before a successful `login`.
    #[error("Not logged in")]
    NotLoggedIn,

    /// Service URL is malformed.
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),
}

/// Error type for configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse config file
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Failed to load the `.env` file
    #[error("Failed to load .env file: {0}")]
    DotenvError(String),

    /// Missing required configuration value
    #[error("Missing required config value: {0}")]
    MissingValue(String),

    /// Invalid configuration value
    #[error("Invalid config value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Any failure that aborts a pipeline run.
#[derive(Error, Debug)]
pub enum BotError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scraper(#[from] ScraperError),

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error(transparent)]
    Social(#[from] SocialError),

    /// HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Debug fixture could not be read.
    #[error("Failed to read fixture {}: {source}", path.display())]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Debug fixture is not valid JSON.
    #[error("Failed to parse fixture {}: {source}", path.display())]
    FixtureParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
