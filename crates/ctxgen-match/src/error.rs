//! Match template lookup errors
//!
//! Every variant names the offending value and the valid options so the
//! caller can correct its request.

/// Match template error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("Dialect '{dialect}' not supported. Supported dialects: {supported:?}")]
    UnsupportedDialect { dialect: String, supported: Vec<String> },

    #[error("Dialect '{dialect}' has no configuration registered.")]
    MissingConfig { dialect: String },

    #[error("Version '{version}' is not supported for dialect '{dialect}'. Supported versions: {supported:?}")]
    UnsupportedVersion {
        version: String,
        dialect: String,
        supported: Vec<String>,
    },

    #[error("Match function '{function}' not found. Supported match templates: {available:?}")]
    UnknownFunction { function: String, available: Vec<String> },
}
