//! Word-of-the-day page scraper.

use super::fetch_page;
use crate::error::ScraperError;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// The header element holding the word of the day.
static WORD_HEADER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".word-header-txt").unwrap());

/// Extracts the word of the day from the page HTML.
///
/// The first `.word-header-txt` element wins; its text is trimmed and
/// lowercased.
pub fn parse_word_of_the_day(html: &str) -> Result<String, ScraperError> {
    let doc = Html::parse_document(html);

    let word = doc
        .select(&WORD_HEADER)
        .next()
        .map(|elem| elem.text().collect::<String>().trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .ok_or_else(|| ScraperError::NotFound("word of the day header".to_string()))?;

    Ok(word)
}

/// Scraper for the word-of-the-day page.
pub struct WordOfDayScraper {
    client: reqwest::Client,
    url: String,
}

impl WordOfDayScraper {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Fetches the page and extracts today's word.
    pub async fn fetch_word(&self) -> Result<String, ScraperError> {
        let page = fetch_page(&self.client, &self.url).await?;
        parse_word_of_the_day(&page.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::scrapers::create_http_client;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <div class="word-and-pronunciation">
    <div class="word-header">
      <h2 class="word-header-txt">
        Rapport
      </h2>
    </div>
  </div>
</body>
</html>"#;

    #[test]
    fn test_parse_word() {
        assert_eq!(parse_word_of_the_day(PAGE).unwrap(), "rapport");
    }

    #[test]
    fn test_parse_word_first_match_wins() {
        let html = r#"<h2 class="word-header-txt">Quixotic</h2><h2 class="word-header-txt">Other</h2>"#;
        assert_eq!(parse_word_of_the_day(html).unwrap(), "quixotic");
    }

    #[test]
    fn test_parse_word_with_extra_classes() {
        let html = r#"<h1 class="headline word-header-txt big"> ÉLAN </h1>"#;
        assert_eq!(parse_word_of_the_day(html).unwrap(), "élan");
    }

    #[test]
    fn test_parse_word_missing_header() {
        let html = "<html><body><h2 class=\"word-header\">nope</h2></body></html>";
        assert!(matches!(
            parse_word_of_the_day(html),
            Err(ScraperError::NotFound(_))
        ));
    }

    #[test]
    fn test_parse_word_empty_header() {
        let html = r#"<h2 class="word-header-txt">   </h2>"#;
        assert!(matches!(
            parse_word_of_the_day(html),
            Err(ScraperError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_word_live_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/word-of-the-day"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let client = create_http_client(&HttpConfig::default()).unwrap();
        let scraper = WordOfDayScraper::new(client, format!("{}/word-of-the-day", server.uri()));

        assert_eq!(scraper.fetch_word().await.unwrap(), "rapport");
    }

    #[tokio::test]
    async fn test_fetch_word_http_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = create_http_client(&HttpConfig::default()).unwrap();
        let scraper = WordOfDayScraper::new(client, format!("{}/word-of-the-day", server.uri()));

        assert!(matches!(
            scraper.fetch_word().await,
            Err(ScraperError::FetchFailed(_))
        ));
    }
}
