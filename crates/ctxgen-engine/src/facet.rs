//! Facet generation from intent/SQL snippet pairs

use ctxgen_core::{ContextSet, Facet, ParameterizedFacet, PhraseSet};
use serde::{Deserialize, Serialize};
use crate::error::{parse_items, GenerateError, Result};
use crate::generator::ContextGenerator;

/// An intent paired with a SQL snippet (e.g. a WHERE clause)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetInput {
    #[serde(default, alias = "fragment")]
    pub sql_snippet: Option<String>,

    #[serde(default)]
    pub intent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_phrases: Option<PhraseSet>,
}

impl FacetInput {
    pub fn new(intent: impl Into<String>, sql_snippet: impl Into<String>) -> Self {
        Self {
            sql_snippet: Some(sql_snippet.into()),
            intent: Some(intent.into()),
            value_phrases: None,
        }
    }

    pub fn with_phrases(mut self, phrases: PhraseSet) -> Self {
        self.value_phrases = Some(phrases);
        self
    }
}

fn required<'i>(value: &'i Option<String>, index: usize, field: &'static str) -> Result<&'i str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(GenerateError::MissingField { index, field })
}

impl ContextGenerator<'_> {
    /// Generate one facet per input.
    ///
    /// Phrases are detected in the intent, which also seeds the manifest.
    /// An input without `sql_snippet` or `intent` fails the whole batch.
    pub async fn facets(&self, inputs: &[FacetInput]) -> Result<ContextSet> {
        let mut facets = Vec::with_capacity(inputs.len());

        for (index, input) in inputs.iter().enumerate() {
            let sql_snippet = required(&input.sql_snippet, index, "sql_snippet")?;
            let intent = required(&input.intent, index, "intent")?;

            let phrases = self.phrases_for(input.value_phrases.as_ref(), intent).await;
            let generalized = self.generalize(&phrases, intent, sql_snippet, intent);

            facets.push(Facet {
                sql_snippet: sql_snippet.to_string(),
                intent: intent.to_string(),
                manifest: generalized.manifest,
                parameterized: ParameterizedFacet {
                    parameterized_sql_snippet: generalized.parameterized.sql,
                    parameterized_intent: generalized.parameterized.intent,
                },
            });
        }

        tracing::info!(count = facets.len(), dialect = %self.dialect(), "generated facets");
        Ok(ContextSet::from_facets(facets))
    }

    /// Generate facets from a JSON array of [`FacetInput`]
    pub async fn facets_from_json(&self, json: &str) -> Result<ContextSet> {
        let inputs: Vec<FacetInput> = parse_items(json, "facet inputs")?;
        self.facets(&inputs).await
    }
}
