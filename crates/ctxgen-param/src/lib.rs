//! Value phrase parameterization
//!
//! This crate handles:
//! - Substituting detected value phrases with dialect placeholders in a
//!   SQL string and its paired intent
//! - Generating placeholder-free manifests from natural language
//!
//! Everything here is a pure function over in-memory strings.

pub mod parameterizer;
pub mod manifest;

pub use parameterizer::{
    parameterize, Parameterizer, ParameterizationResult, Substitution, PhrasePatterns, MatchForm,
    MATCH_PRIORITY,
};
pub use manifest::generate_manifest;
