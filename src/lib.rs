//! Lexibot - posts the dictionary word of the day to Bluesky.
//!
//! This library provides functionality for:
//! - Scraping the word of the day from the dictionary's website
//! - Looking the word up in the collegiate dictionary API and extracting post fields
//! - Formatting and publishing the post

pub mod config;
pub mod console;
pub mod dictionary;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod post;
pub mod scrapers;
pub mod social;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use console::Console;
pub use error::{BotError, ConfigError, DictionaryError, FetchError, ScraperError, SocialError};
pub use pipeline::{InvocationResponse, Pipeline, RunReport, invoke};
pub use post::{PostContent, create_post_text};
pub use social::{BlueskyClient, PostReceipt, Publisher, Session};
