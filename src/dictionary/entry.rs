//! Typed view of a collegiate dictionary entry.
//!
//! Only the fields the post needs are decoded. Tagged arrays such as
//! `["sense", {...}]` and `["text", "..."]` are decoded as two-element
//! tuples and inspected through the accessors below.

use crate::error::DictionaryError;
use serde::Deserialize;
use serde_json::Value;

/// One entry of the lookup response array.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    /// Functional label (part of speech).
    pub fl: Option<String>,

    /// Headword information.
    pub hwi: Option<HeadwordInfo>,

    /// Definition sections.
    #[serde(default)]
    pub def: Vec<DefinitionSection>,

    /// Usage quotes; the API may send `null`.
    pub quotes: Option<Vec<Quote>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadwordInfo {
    /// Pronunciation variants.
    #[serde(default)]
    pub prs: Vec<Pronunciation>,
}

/// A pronunciation variant.
#[derive(Debug, Clone, Deserialize)]
pub struct Pronunciation {
    /// Written pronunciation.
    pub mw: Option<String>,

    /// Audio reference, present only for variants with a recording.
    pub sound: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefinitionSection {
    /// Sense sequence: a list of groups, each a list of tagged nodes.
    #[serde(default)]
    pub sseq: Vec<Vec<TaggedNode>>,
}

/// A `[tag, payload]` pair.
#[derive(Debug, Clone, Deserialize)]
pub struct TaggedNode(pub String, pub Value);

impl TaggedNode {
    pub fn tag(&self) -> &str {
        &self.0
    }

    pub fn payload(&self) -> &Value {
        &self.1
    }
}

/// Payload of a `"sense"` node.
#[derive(Debug, Clone, Deserialize)]
pub struct Sense {
    /// Defining text chunks, e.g. `["text", "{bc}..."]`, `["vis", [...]]`.
    #[serde(default)]
    pub dt: Vec<TaggedNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Quote {
    /// Quote text with inline markup.
    pub t: Option<String>,
}

fn mismatch(message: impl Into<String>) -> DictionaryError {
    DictionaryError::StructureMismatch(message.into())
}

/// Decodes the first entry of a lookup response.
///
/// Unknown words produce an array of spelling suggestions (bare strings)
/// instead of entry objects; that case is a structure mismatch as well.
pub fn first_entry(response: &Value) -> Result<Entry, DictionaryError> {
    let entries = response
        .as_array()
        .ok_or_else(|| mismatch("expected a JSON array of entries"))?;

    let first = entries
        .first()
        .ok_or_else(|| mismatch("response contains no entries"))?;

    if !first.is_object() {
        let suggestions: Vec<&str> = entries.iter().filter_map(Value::as_str).take(5).collect();
        return Err(mismatch(format!(
            "entries[0] is not an entry object (suggestions: {})",
            suggestions.join(", ")
        )));
    }

    Entry::deserialize(first).map_err(|e| mismatch(format!("entries[0]: {}", e)))
}

impl Entry {
    /// The part of speech (`fl`). Required.
    pub fn part_of_speech(&self) -> Result<&str, DictionaryError> {
        self.fl
            .as_deref()
            .ok_or_else(|| mismatch("entries[0].fl (part of speech) is missing"))
    }

    /// Written form of the first pronunciation that has a sound recording.
    pub fn sound_pronunciation(&self) -> Option<&str> {
        self.hwi
            .as_ref()?
            .prs
            .iter()
            .filter(|p| p.sound.is_some())
            .find_map(|p| p.mw.as_deref())
    }

    /// Raw text of the first defining-text chunk of the first sense.
    ///
    /// Only the first group of the first definition section is looked at,
    /// and only its first `"sense"` node. Nodes with other tags are skipped.
    pub fn first_definition_text(&self) -> Result<String, DictionaryError> {
        let section = self
            .def
            .first()
            .ok_or_else(|| mismatch("entries[0].def[0] is missing"))?;

        let group = section
            .sseq
            .first()
            .ok_or_else(|| mismatch("entries[0].def[0].sseq[0] is missing"))?;

        let node = group
            .iter()
            .find(|node| node.tag() == "sense")
            .ok_or_else(|| mismatch("no \"sense\" node in entries[0].def[0].sseq[0]"))?;

        let sense = Sense::deserialize(node.payload())
            .map_err(|e| mismatch(format!("sense payload: {}", e)))?;

        let chunk = sense
            .dt
            .first()
            .ok_or_else(|| mismatch("sense.dt[0] is missing"))?;

        chunk
            .payload()
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch("sense.dt[0][1] is not a string"))
    }

    /// Texts of the quotes that have one.
    pub fn quote_texts(&self) -> Vec<&str> {
        self.quotes
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|q| q.t.as_deref())
            .collect()
    }
}
