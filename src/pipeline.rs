//! The word-of-the-day run, end to end.
//!
//! A run is strictly linear: obtain the word and its dictionary response
//! (live or from a fixture), build the post, and publish it unless in debug
//! mode. The first failure aborts the run.

use crate::config::Config;
use crate::console::Console;
use crate::dictionary::{DictionaryClient, parse_response};
use crate::error::BotError;
use crate::post::{PostContent, create_post_text};
use crate::scrapers::{WordOfDayScraper, create_http_client};
use crate::social::{BlueskyClient, PostReceipt, Publisher};
use serde::Serialize;
use serde_json::Value;

/// Confirmation message returned by a successful invocation.
const DONE_MESSAGE: &str = "Done!";

/// Artifacts of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub word: String,
    pub api_response: Value,
    pub content: PostContent,
    pub post_text: String,
    /// Set when the post was published (live mode only).
    pub receipt: Option<PostReceipt>,
}

/// Response document of a function-style invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    /// JSON-encoded body.
    pub body: String,
}

impl InvocationResponse {
    fn new(status_code: u16, message: &str) -> Self {
        let body = serde_json::to_string(message).unwrap_or_else(|_| format!("\"{}\"", message));
        Self { status_code, body }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// Runs the job once.
pub struct Pipeline<'a> {
    config: &'a Config,
    console: &'a Console,
    http: reqwest::Client,
    publisher: Box<dyn Publisher>,
}

impl<'a> Pipeline<'a> {
    /// Builds a pipeline that publishes to Bluesky.
    pub fn new(config: &'a Config, console: &'a Console) -> Result<Self, BotError> {
        let http = create_http_client(&config.http).map_err(BotError::HttpClient)?;
        let publisher = BlueskyClient::new(http.clone(), &config.bluesky.service_url)?;
        Ok(Self::with_publisher(config, console, http, Box::new(publisher)))
    }

    /// Builds a pipeline around an existing client and publisher.
    pub fn with_publisher(
        config: &'a Config,
        console: &'a Console,
        http: reqwest::Client,
        publisher: Box<dyn Publisher>,
    ) -> Self {
        Self {
            config,
            console,
            http,
            publisher,
        }
    }

    /// Executes the run.
    pub async fn run(&mut self) -> Result<RunReport, BotError> {
        let (word, api_response) = if self.config.debug {
            self.console.warning("Debug mode: using local fixture, nothing will be posted");
            self.load_fixture().await?
        } else {
            self.fetch_live().await?
        };

        self.console.step("Parsing dictionary response...");
        let parsed = parse_response(&api_response, &mut rand::thread_rng())?;
        let content = PostContent::new(word.clone(), parsed);
        let post_text = create_post_text(&content);

        self.console.dump("API response", &api_response);
        match serde_json::to_value(&content) {
            Ok(value) => self.console.dump("Post content", &value),
            Err(e) => tracing::warn!(error = %e, "could not serialize post content"),
        }
        self.console.block("Post text", &post_text);

        let receipt = if self.config.debug {
            None
        } else {
            Some(self.publish(&post_text).await?)
        };

        Ok(RunReport {
            word,
            api_response,
            content,
            post_text,
            receipt,
        })
    }

    async fn fetch_live(&self) -> Result<(String, Value), BotError> {
        self.console.step("Fetching word of the day...");
        let scraper =
            WordOfDayScraper::new(self.http.clone(), &self.config.sources.word_of_day_url);
        let word = scraper.fetch_word().await?;
        self.console
            .success(&format!("Word of the day: {}", self.console.highlight(&word)));

        self.console.step("Looking up definition...");
        let dictionary = DictionaryClient::new(
            self.http.clone(),
            &self.config.sources.dictionary_url,
            self.config.api_key.clone(),
        )?;
        let api_response = dictionary.lookup(&word).await?;

        Ok((word, api_response))
    }

    async fn load_fixture(&self) -> Result<(String, Value), BotError> {
        let word = self.config.fixtures.word.trim().to_lowercase();
        self.console
            .info(&format!("Word of the day: {}", self.console.highlight(&word)));

        let path = self.config.fixtures.response_path(&word);
        tracing::debug!(path = %path.display(), "reading fixture");

        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| BotError::FixtureRead {
                path: path.clone(),
                source,
            })?;
        let api_response =
            serde_json::from_str(&raw).map_err(|source| BotError::FixtureParse { path, source })?;

        Ok((word, api_response))
    }

    async fn publish(&mut self, text: &str) -> Result<PostReceipt, BotError> {
        let network = self.publisher.name();

        self.console.step(&format!("Logging in to {}...", network));
        let session = self
            .publisher
            .login(&self.config.username, &self.config.password)
            .await?;
        self.console
            .success(&format!("Logged in as {} ({})", session.handle, session.account_id));

        self.console.step("Posting text...");
        let receipt = self.publisher.post(text).await?;
        self.console.success(&format!("Posted: {}", receipt.uri));

        Ok(receipt)
    }
}

/// Runs the job as a function-style invocation.
///
/// Success maps to status 200 with a fixed confirmation body; any failure
/// maps to status 500 with the error message as body.
pub async fn invoke(config: &Config, console: &Console) -> InvocationResponse {
    match run_validated(config, console).await {
        Ok(_) => InvocationResponse::new(200, DONE_MESSAGE),
        Err(e) => {
            console.error(&e.to_string());
            InvocationResponse::new(500, &e.to_string())
        }
    }
}

async fn run_validated(config: &Config, console: &Console) -> Result<RunReport, BotError> {
    config.validate()?;
    Pipeline::new(config, console)?.run().await
}
