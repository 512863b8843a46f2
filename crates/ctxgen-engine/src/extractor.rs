//! Phrase extraction seam
//!
//! Detecting value phrases in natural language is done by an external
//! collaborator (typically a generative model). Generators only see it
//! through [`PhraseExtractor`].

use async_trait::async_trait;
use ctxgen_core::PhraseSet;
use std::collections::HashMap;

/// Detects literal value phrases in a natural-language string
#[async_trait]
pub trait PhraseExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<PhraseSet, ExtractError>;
}

/// Errors that can occur during phrase extraction
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Phrase extraction failed: {0}")]
    Failed(String),

    #[error("Invalid extraction response: {0}")]
    InvalidResponse(String),
}

impl From<ctxgen_core::PhraseError> for ExtractError {
    fn from(e: ctxgen_core::PhraseError) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}

/// Extractor that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPhrases;

#[async_trait]
impl PhraseExtractor for NoPhrases {
    async fn extract(&self, _text: &str) -> Result<PhraseSet, ExtractError> {
        Ok(PhraseSet::new())
    }
}

/// Extractor backed by phrases known ahead of time, keyed by the exact text
#[derive(Debug, Clone, Default)]
pub struct InlinePhrases {
    by_text: HashMap<String, PhraseSet>,
}

impl InlinePhrases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: impl Into<String>, phrases: PhraseSet) -> Self {
        self.by_text.insert(text.into(), phrases);
        self
    }

    /// Load from a JSON object mapping text to extraction responses
    /// (`{"value_phrases": [...]}`) or to plain phrase objects
    pub fn from_json(json: &str) -> Result<Self, ExtractError> {
        let raw: HashMap<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| ExtractError::InvalidResponse(e.to_string()))?;

        let mut inline = Self::new();
        for (text, value) in raw {
            inline.by_text.insert(text, PhraseSet::from_value(value)?);
        }

        Ok(inline)
    }
}

#[async_trait]
impl PhraseExtractor for InlinePhrases {
    async fn extract(&self, text: &str) -> Result<PhraseSet, ExtractError> {
        Ok(self.by_text.get(text).cloned().unwrap_or_default())
    }
}

/// Run the extractor, treating any failure as "no phrases found"
pub async fn extract_or_empty(extractor: &dyn PhraseExtractor, text: &str) -> PhraseSet {
    match extractor.extract(text).await {
        Ok(phrases) => phrases,
        Err(e) => {
            tracing::warn!(error = %e, text, "phrase extraction failed, continuing without phrases");
            PhraseSet::new()
        }
    }
}
