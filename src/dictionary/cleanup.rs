//! Removal of the dictionary's inline `{...}` markup.
//!
//! Definitions use tokens such as `{bc}`, `{it}…{/it}` and cross-reference
//! runs like `{d_link|affinity|affinity:1}`. Quotes wrap the headword in
//! `{qword}…{/qword}`.

use regex::Regex;
use std::sync::LazyLock;

/// Cross-reference runs `{tag|payload|...}`; group 1 is the payload.
static LINK_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[a-z_]+\|([^|}]+)(?:\|[^|}]*)*\}").unwrap());

/// Any remaining `{...}` run.
static FORMAT_MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^}]*\}").unwrap());

/// Quote tokens made of lowercase letters, underscores, slashes and pipes.
static QUOTE_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[a-z_\\/|]*\}").unwrap());

/// Cleans a raw definition string.
///
/// Cross-references are collapsed to their visible text first, then every
/// leftover formatting token is dropped. Swapping the passes would erase the
/// cross-reference text together with its braces.
pub fn clean_definition(raw: &str) -> String {
    let linked = LINK_MARKUP.replace_all(raw, "$1");
    FORMAT_MARKUP.replace_all(&linked, "").into_owned()
}

/// Strips formatting tokens from a quote.
pub fn clean_quote(raw: &str) -> String {
    QUOTE_MARKUP.replace_all(raw, "").into_owned()
}
