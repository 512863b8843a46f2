//! Context generator shared by the template, facet and golden paths

use ctxgen_core::{Dialect, PhraseSet};
use ctxgen_param::{generate_manifest, ParameterizationResult, Parameterizer};
use crate::extractor::{extract_or_empty, PhraseExtractor};

/// Turns concrete NL/SQL pairs into parameterized context entries
pub struct ContextGenerator<'a> {
    parameterizer: Parameterizer,
    extractor: &'a dyn PhraseExtractor,
}

/// Output of running one NL/SQL pair through extraction and parameterization
#[derive(Debug, Clone)]
pub(crate) struct Generalized {
    pub manifest: String,
    pub parameterized: ParameterizationResult,
}

impl<'a> ContextGenerator<'a> {
    pub fn new(dialect: Dialect, extractor: &'a dyn PhraseExtractor) -> Self {
        Self {
            parameterizer: Parameterizer::new(dialect),
            extractor,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.parameterizer.dialect()
    }

    /// Phrases supplied with the item win; otherwise ask the extractor
    pub(crate) async fn phrases_for(&self, supplied: Option<&PhraseSet>, text: &str) -> PhraseSet {
        match supplied {
            Some(phrases) => phrases.clone(),
            None => extract_or_empty(self.extractor, text).await,
        }
    }

    /// Build the manifest from `source_text` and parameterize the pair
    pub(crate) fn generalize(&self, phrases: &PhraseSet, source_text: &str, sql: &str, intent: &str) -> Generalized {
        let manifest = generate_manifest(source_text, phrases);
        let parameterized = self.parameterizer.parameterize(phrases, sql, intent);

        let skipped = phrases.len() - parameterized.substitutions.len();
        if skipped > 0 {
            tracing::debug!(skipped, intent, "phrases not present in both SQL and intent were left as literals");
        }

        Generalized { manifest, parameterized }
    }
}
