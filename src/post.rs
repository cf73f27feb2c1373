//! Post content and its text rendering.

use crate::dictionary::ParsedEntry;
use serde::Serialize;

/// Everything known about today's word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostContent {
    pub word: String,
    pub pos: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciations: Option<String>,
    pub definitions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
}

impl PostContent {
    /// Attaches `word` to the fields parsed from the dictionary.
    pub fn new(word: impl Into<String>, parsed: ParsedEntry) -> Self {
        Self {
            word: word.into(),
            pos: parsed.pos,
            pronunciations: parsed.pronunciations,
            definitions: parsed.definitions,
            quote: parsed.quote,
        }
    }
}

/// Renders the four-line post.
///
/// A missing pronunciation leaves the line empty after the colon.
pub fn create_post_text(content: &PostContent) -> String {
    format!(
        "🌟 Word of the day: {}\n\
         📚 Part of Speech: {}\n\
         🔊 Pronunciation: {}\n\
         📖 Definition: {}",
        content.word,
        content.pos,
        content.pronunciations.as_deref().unwrap_or(""),
        content.definitions,
    )
}
