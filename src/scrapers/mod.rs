//! Page fetching and HTML scraping.
//!
//! This module holds the shared HTTP client setup and the plain GET used by
//! every outbound read, along with the word-of-the-day scraper.

mod word_of_day;

pub use word_of_day::{WordOfDayScraper, parse_word_of_the_day};

use crate::config::HttpConfig;
use crate::error::FetchError;
use crate::utils::check_response_status;
use reqwest::StatusCode;
use std::time::Duration;

/// Body and status of a successful GET.
#[derive(Debug, Clone)]
pub struct RawPage {
    /// HTTP status (always a success status).
    pub status: StatusCode,

    /// Response body as text.
    pub body: String,
}

/// Common HTTP client configuration for every outbound call.
pub fn create_http_client(config: &HttpConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_sec))
        .build()
}

/// Performs a GET and returns the body.
///
/// Transport failures and non-2xx statuses are both returned as
/// [`FetchError`]; a failed response is never handed back to the caller.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<RawPage, FetchError> {
    // Query strings may hold credentials; keep them out of the logs.
    let shown = url.split('?').next().unwrap_or(url);
    tracing::debug!(url = shown, "GET");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let response = check_response_status(response, url).await?;
    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    tracing::debug!(url = shown, %status, bytes = body.len(), "fetched");

    Ok(RawPage {
        status,
        body,
    })
}
