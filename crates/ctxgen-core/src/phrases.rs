//! Value phrases detected in natural-language text
//!
//! A phrase is a literal taken verbatim from a question or intent
//! ("New York", "John Doe") tagged with one or more semantic types.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Type tag used when a phrase carries no tags at all
pub const FALLBACK_TYPE: &str = "value";

/// Mapping of literal phrase to its semantic type tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<String>>", into = "BTreeMap<String, Vec<String>>")]
pub struct PhraseSet {
    phrases: BTreeMap<String, Vec<String>>,
}

impl PhraseSet {
    /// Create an empty phrase set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a phrase with its type tags. Empty phrases are ignored.
    pub fn insert(&mut self, phrase: impl Into<String>, types: Vec<String>) {
        let phrase = phrase.into();
        if phrase.is_empty() {
            return;
        }
        self.phrases.insert(phrase, types);
    }

    /// Builder-style insert
    pub fn with(mut self, phrase: impl Into<String>, types: &[&str]) -> Self {
        self.insert(phrase, types.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.contains_key(phrase)
    }

    /// Type tags for a phrase
    pub fn types(&self, phrase: &str) -> Option<&[String]> {
        self.phrases.get(phrase).map(|t| t.as_slice())
    }

    /// First type tag of a phrase, or [`FALLBACK_TYPE`]
    pub fn primary_type(&self, phrase: &str) -> &str {
        self.phrases
            .get(phrase)
            .and_then(|t| t.first())
            .map(|t| t.as_str())
            .unwrap_or(FALLBACK_TYPE)
    }

    /// Phrases ordered longest first.
    ///
    /// A longer phrase that contains a shorter one ("New York" / "York")
    /// must be handled before it. Length is counted in characters, not
    /// bytes. Equal lengths keep map order.
    pub fn longest_first(&self) -> Vec<&str> {
        let mut ordered: Vec<&str> = self.phrases.keys().map(|k| k.as_str()).collect();
        ordered.sort_by_key(|phrase| Reverse(phrase.chars().count()));
        ordered
    }

    /// Parse the response shape of a phrase extraction call:
    /// `{"value_phrases": [{"key": "...", "value": ["type"]}]}`
    ///
    /// Blank input yields an empty set.
    pub fn from_extraction_json(text: &str) -> Result<Self, PhraseError> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }

        let response: ExtractionResponse = serde_json::from_str(text)
            .map_err(|e| PhraseError::ParseError(e.to_string()))?;

        Ok(response.into())
    }

    /// Parse either accepted shape: an extraction response or a plain
    /// `{"phrase": ["type"]}` object.
    ///
    /// Blank input yields an empty set.
    pub fn from_json(text: &str) -> Result<Self, PhraseError> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }

        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| PhraseError::ParseError(e.to_string()))?;

        Self::from_value(value)
    }

    /// Same as [`PhraseSet::from_json`] for an already parsed value.
    ///
    /// The extraction response shape is tried first; anything it rejects,
    /// including a plain object with a phrase named `value_phrases`, is
    /// read as a phrase map.
    pub fn from_value(value: serde_json::Value) -> Result<Self, PhraseError> {
        match ExtractionResponse::deserialize(&value) {
            Ok(response) => Ok(response.into()),
            Err(_) => serde_json::from_value(value)
                .map_err(|e| PhraseError::ParseError(e.to_string())),
        }
    }
}

impl FromIterator<(String, Vec<String>)> for PhraseSet {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (phrase, types) in iter {
            set.insert(phrase, types);
        }
        set
    }
}

impl From<BTreeMap<String, Vec<String>>> for PhraseSet {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        map.into_iter().collect()
    }
}

impl From<PhraseSet> for BTreeMap<String, Vec<String>> {
    fn from(set: PhraseSet) -> Self {
        set.phrases
    }
}

/// A single phrase/type pair as returned by an extraction call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuePhrasePair {
    /// The extracted literal
    pub key: String,

    /// Identified types for the literal
    #[serde(default)]
    pub value: Vec<String>,
}

/// Extraction call response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionResponse {
    #[serde(default)]
    pub value_phrases: Vec<ValuePhrasePair>,
}

impl From<ExtractionResponse> for PhraseSet {
    fn from(response: ExtractionResponse) -> Self {
        response
            .value_phrases
            .into_iter()
            .map(|pair| (pair.key, pair.value))
            .collect()
    }
}

/// Phrase parsing errors
#[derive(Debug, thiserror::Error)]
pub enum PhraseError {
    #[error("Invalid value phrase response: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_first_puts_containing_phrase_first() {
        let phrases = PhraseSet::new()
            .with("York", &["city"])
            .with("New York", &["city"])
            .with("NY", &["region"]);

        assert_eq!(phrases.longest_first(), vec!["New York", "York", "NY"]);
    }

    #[test]
    fn longest_first_counts_characters() {
        // "Köln" is 4 characters but 5 bytes
        let phrases = PhraseSet::new()
            .with("Köln", &["city"])
            .with("Paris", &["city"])
            .with("Bonn", &["city"]);

        assert_eq!(phrases.longest_first(), vec!["Paris", "Bonn", "Köln"]);
    }

    #[test]
    fn empty_phrase_is_ignored() {
        let phrases = PhraseSet::new().with("", &["city"]);
        assert!(phrases.is_empty());
    }

    #[test]
    fn primary_type_falls_back() {
        let phrases = PhraseSet::new()
            .with("Paris", &["city", "person"])
            .with("42", &[]);

        assert_eq!(phrases.primary_type("Paris"), "city");
        assert_eq!(phrases.primary_type("42"), FALLBACK_TYPE);
        assert_eq!(phrases.primary_type("missing"), FALLBACK_TYPE);
    }

    #[test]
    fn parse_extraction_response() {
        let text = r#"{"value_phrases": [
            {"key": "New York", "value": ["city"]},
            {"key": "John Doe", "value": ["person"]}
        ]}"#;

        let phrases = PhraseSet::from_extraction_json(text).unwrap();
        assert_eq!(phrases.len(), 2);
        assert_eq!(phrases.types("John Doe"), Some(&["person".to_string()][..]));
    }

    #[test]
    fn blank_or_empty_response_is_empty_set() {
        assert!(PhraseSet::from_extraction_json("").unwrap().is_empty());
        assert!(PhraseSet::from_extraction_json(r#"{"value_phrases": []}"#).unwrap().is_empty());
        assert!(PhraseSet::from_extraction_json("{}").unwrap().is_empty());
    }

    #[test]
    fn from_json_accepts_both_shapes() {
        let response = PhraseSet::from_json(r#"{"value_phrases": [{"key": "Oslo", "value": ["city"]}]}"#).unwrap();
        assert_eq!(response.primary_type("Oslo"), "city");

        let plain = PhraseSet::from_json(r#"{"Oslo": ["city"]}"#).unwrap();
        assert_eq!(plain, response);
    }

    #[test]
    fn phrase_named_value_phrases_is_a_plain_map() {
        let phrases = PhraseSet::from_json(r#"{"value_phrases": ["column"], "Oslo": ["city"]}"#).unwrap();

        assert_eq!(phrases.len(), 2);
        assert_eq!(phrases.primary_type("value_phrases"), "column");
        assert_eq!(phrases.primary_type("Oslo"), "city");
    }

    #[test]
    fn malformed_response_is_error() {
        assert!(PhraseSet::from_extraction_json("not json").is_err());
    }

    #[test]
    fn deserialize_drops_empty_phrase() {
        let parsed: PhraseSet = serde_json::from_str(r#"{"": ["city"], "Rome": ["city"]}"#).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(parsed.contains("Rome"));
    }

    #[test]
    fn serializes_as_plain_object() {
        let phrases = PhraseSet::new().with("Berlin", &["city"]);
        let json = serde_json::to_string(&phrases).unwrap();
        assert_eq!(json, r#"{"Berlin":["city"]}"#);

        let parsed: PhraseSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phrases);
    }
}
