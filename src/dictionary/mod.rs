//! Dictionary lookup client and response parsing.
//!
//! The client talks to the collegiate dictionary JSON API; [`parse_response`]
//! turns its loosely structured answer into the fields of a post.

mod cleanup;
mod entry;
mod parse;

pub use cleanup::{clean_definition, clean_quote};
pub use entry::{Entry, first_entry};
pub use parse::{ParsedEntry, parse_response};

use crate::error::DictionaryError;
use crate::scrapers::fetch_page;
use serde_json::Value;
use url::Url;

/// Client for word lookups.
pub struct DictionaryClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl DictionaryClient {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, DictionaryError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DictionaryError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(DictionaryError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Builds `<base>/<word>?key=<key>`.
    pub fn lookup_url(&self, word: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(word);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("key", &self.api_key);
        url
    }

    /// Looks up `word` and returns the raw JSON response.
    pub async fn lookup(&self, word: &str) -> Result<Value, DictionaryError> {
        let url = self.lookup_url(word);
        tracing::info!(word, "looking up word");

        let page = fetch_page(&self.client, url.as_str())
            .await
            .map_err(|e| e.without_query())?;
        let response = serde_json::from_str(&page.body)?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::scrapers::create_http_client;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base: &str) -> DictionaryClient {
        let http = create_http_client(&HttpConfig::default()).unwrap();
        DictionaryClient::new(http, base, "secret").unwrap()
    }

    #[test]
    fn test_lookup_url() {
        let client = client_for("https://dictionaryapi.com/api/v3/references/collegiate/json/");
        assert_eq!(
            client.lookup_url("rapport").as_str(),
            "https://dictionaryapi.com/api/v3/references/collegiate/json/rapport?key=secret"
        );
    }

    #[test]
    fn test_lookup_url_without_trailing_slash() {
        let client = client_for("https://dictionaryapi.com/api/v3/references/collegiate/json");
        assert_eq!(
            client.lookup_url("rapport").as_str(),
            "https://dictionaryapi.com/api/v3/references/collegiate/json/rapport?key=secret"
        );
    }

    #[test]
    fn test_lookup_url_escapes_word() {
        let client = client_for("https://example.com/json/");
        assert_eq!(
            client.lookup_url("a priori").as_str(),
            "https://example.com/json/a%20priori?key=secret"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let http = create_http_client(&HttpConfig::default()).unwrap();
        assert!(matches!(
            DictionaryClient::new(http, "not a url", "k"),
            Err(DictionaryError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_lookup_returns_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json/rapport"))
            .and(query_param("key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"fl": "noun"}])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&format!("{}/json/", server.uri()));
        let response = client.lookup("rapport").await.unwrap();
        assert_eq!(response[0]["fl"], "noun");
    }

    #[tokio::test]
    async fn test_lookup_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Invalid API key."))
            .mount(&server)
            .await;

        let client = client_for(&format!("{}/json/", server.uri()));
        assert!(matches!(
            client.lookup("rapport").await,
            Err(DictionaryError::InvalidJson(_))
        ));
    }

    #[tokio::test]
    async fn test_lookup_http_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&format!("{}/json/", server.uri()));
        let err = client.lookup("rapport").await.unwrap_err();

        assert!(matches!(err, DictionaryError::FetchFailed(_)));
        assert!(!err.to_string().contains("secret"));
    }
}
