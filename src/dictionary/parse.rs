//! Extraction of post fields from a lookup response.

use super::cleanup::{clean_definition, clean_quote};
use super::entry::first_entry;
use crate::error::DictionaryError;
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::Value;

/// Fields extracted from a dictionary response, before the word is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub pos: String,
    pub pronunciations: Option<String>,
    pub definitions: String,
    pub quote: Option<String>,
}

/// Parses a lookup response into post fields.
///
/// Selection is positional: the first entry, the first `"sense"` node of
/// its first sense group, and that sense's first defining-text chunk. When
/// the entry has quotes, one is chosen with `rng`.
pub fn parse_response<R>(response: &Value, rng: &mut R) -> Result<ParsedEntry, DictionaryError>
where
    R: Rng + ?Sized,
{
    let entry = first_entry(response)?;

    let pos = entry.part_of_speech()?.to_string();
    let pronunciations = entry.sound_pronunciation().map(str::to_string);
    let definitions = clean_definition(&entry.first_definition_text()?);
    let quote = entry.quote_texts().choose(rng).map(|t| clean_quote(t));

    Ok(ParsedEntry {
        pos,
        pronunciations,
        definitions,
        quote,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    fn sample() -> Value {
        json!([{
            "fl": "noun",
            "hwi": {"hw": "rap*port", "prs": [{"mw": "ra-ˈpȯr", "sound": {"audio": "rappor01"}}]},
            "def": [{"sseq": [[
                ["sense", {"dt": [["text", "{bc}relation marked by {d_link|harmony|harmony:1}"]]}]
            ]]}],
            "quotes": [
                {"t": "A {qword}rapport{/qword} formed."},
                {"t": "Their {qword}rapport{/qword} was obvious."}
            ]
        }])
    }

    #[test]
    fn test_parse_response() {
        let mut rng = StdRng::seed_from_u64(7);
        let parsed = parse_response(&sample(), &mut rng).unwrap();

        assert_eq!(parsed.pos, "noun");
        assert_eq!(parsed.pronunciations.as_deref(), Some("ra-ˈpȯr"));
        assert_eq!(parsed.definitions, "relation marked by harmony");
    }

    #[test]
    fn test_quote_is_one_of_the_cleaned_quotes() {
        let expected = ["A rapport formed.", "Their rapport was obvious."];
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let parsed = parse_response(&sample(), &mut rng).unwrap();
            let quote = parsed.quote.expect("quote should be chosen");
            assert!(expected.contains(&quote.as_str()), "unexpected quote {:?}", quote);
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let a = parse_response(&sample(), &mut StdRng::seed_from_u64(42)).unwrap();
        let b = parse_response(&sample(), &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_optional_fields_omitted() {
        let response = json!([{
            "fl": "adjective",
            "hwi": {"hw": "terse"},
            "def": [{"sseq": [[["sense", {"dt": [["text", "{bc}brief"]]}]]]}],
            "quotes": []
        }]);
        let parsed = parse_response(&response, &mut rand::thread_rng()).unwrap();

        assert_eq!(parsed.pronunciations, None);
        assert_eq!(parsed.quote, None);
        assert_eq!(parsed.definitions, "brief");
    }

    #[test]
    fn test_quote_chosen_among_quotes_with_text() {
        let response = json!([{
            "fl": "noun",
            "def": [{"sseq": [[["sense", {"dt": [["text", "brief"]]}]]]}],
            "quotes": [{"aq": {}}, {"t": "Only {qword}this{/qword} one."}]
        }]);
        for seed in 0..10 {
            let parsed = parse_response(&response, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(parsed.quote.as_deref(), Some("Only this one."));
        }
    }

    #[test]
    fn test_null_quotes_omit_quote() {
        let response = json!([{
            "fl": "noun",
            "def": [{"sseq": [[["sense", {"dt": [["text", "brief"]]}]]]}],
            "quotes": null
        }]);
        let parsed = parse_response(&response, &mut rand::thread_rng()).unwrap();
        assert_eq!(parsed.quote, None);
    }

    #[test]
    fn test_missing_pos_is_structure_mismatch() {
        let response = json!([{
            "hwi": {"hw": "terse"},
            "def": [{"sseq": [[["sense", {"dt": [["text", "brief"]]}]]]}]
        }]);
        let err = parse_response(&response, &mut rand::thread_rng()).unwrap_err();
        assert!(matches!(err, DictionaryError::StructureMismatch(_)));
    }

    #[test]
    fn test_missing_sense_is_structure_mismatch() {
        let response = json!([{
            "fl": "noun",
            "def": [{"sseq": [[["bs", {"sense": {"dt": [["text", "x"]]}}]]]}]
        }]);
        let err = parse_response(&response, &mut rand::thread_rng()).unwrap_err();
        assert!(matches!(err, DictionaryError::StructureMismatch(_)));
    }
}
