//! Generation errors

use ctxgen_match::MatchError;

/// Errors that abort a generation batch
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Invalid JSON format for {what}. Expected a JSON array: {reason}")]
    InvalidJson { what: &'static str, reason: String },

    #[error("Item {index}: each item must have a '{field}' key.")]
    MissingField { index: usize, field: &'static str },

    #[error("No valid question/SQL pairs found in input.")]
    NoValidItems,

    #[error(transparent)]
    Match(#[from] MatchError),
}

pub type Result<T> = std::result::Result<T, GenerateError>;

/// Parse a JSON array of generator inputs
pub(crate) fn parse_items<T: serde::de::DeserializeOwned>(json: &str, what: &'static str) -> Result<Vec<T>> {
    serde_json::from_str(json).map_err(|e| GenerateError::InvalidJson {
        what,
        reason: e.to_string(),
    })
}
