//! Template generation from question/SQL pairs

use ctxgen_core::{ContextSet, ParameterizedTemplate, PhraseSet, Template};
use serde::{Deserialize, Serialize};
use crate::error::{parse_items, Result};
use crate::generator::ContextGenerator;

/// A question/SQL pair to turn into a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateInput {
    pub question: String,

    pub sql: String,

    /// Defaults to the question
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,

    /// Phrases known up front; skips extraction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_phrases: Option<PhraseSet>,
}

impl TemplateInput {
    pub fn new(question: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            sql: sql.into(),
            intent: None,
            value_phrases: None,
        }
    }

    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    pub fn with_phrases(mut self, phrases: PhraseSet) -> Self {
        self.value_phrases = Some(phrases);
        self
    }
}

impl ContextGenerator<'_> {
    /// Generate one template per input.
    ///
    /// Phrases are detected in the question, which also seeds the manifest.
    pub async fn templates(&self, inputs: &[TemplateInput]) -> ContextSet {
        let mut templates = Vec::with_capacity(inputs.len());

        for input in inputs {
            let intent = input.intent.as_deref().unwrap_or(&input.question);
            let phrases = self.phrases_for(input.value_phrases.as_ref(), &input.question).await;
            let generalized = self.generalize(&phrases, &input.question, &input.sql, intent);

            templates.push(Template {
                nl_query: input.question.clone(),
                sql: input.sql.clone(),
                intent: intent.to_string(),
                manifest: generalized.manifest,
                parameterized: ParameterizedTemplate {
                    parameterized_sql: generalized.parameterized.sql,
                    parameterized_intent: generalized.parameterized.intent,
                },
            });
        }

        tracing::info!(count = templates.len(), dialect = %self.dialect(), "generated templates");
        ContextSet::from_templates(templates)
    }

    /// Generate templates from a JSON array of [`TemplateInput`]
    pub async fn templates_from_json(&self, json: &str) -> Result<ContextSet> {
        let inputs: Vec<TemplateInput> = parse_items(json, "template inputs")?;
        Ok(self.templates(&inputs).await)
    }
}
