//! Golden question/SQL file conversion
//!
//! Golden files are JSON arrays of `{"question": ..., "SQL": ...}`
//! records (lowercase `sql` is accepted too).

use ctxgen_core::{ContextSet, PhraseSet};
use serde::Deserialize;
use crate::error::{parse_items, GenerateError, Result};
use crate::generator::ContextGenerator;
use crate::template::TemplateInput;

/// One record of a golden file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoldenRecord {
    #[serde(default)]
    pub question: Option<String>,

    #[serde(default, rename = "SQL")]
    pub sql_upper: Option<String>,

    #[serde(default)]
    pub sql: Option<String>,

    #[serde(default)]
    pub value_phrases: Option<PhraseSet>,
}

impl GoldenRecord {
    /// Convert to a template input, if both question and SQL are present
    pub fn to_input(&self) -> Option<TemplateInput> {
        let question = self.question.as_deref().filter(|q| !q.is_empty())?;
        let sql = self
            .sql_upper
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.sql.as_deref().filter(|s| !s.is_empty()))?;

        let mut input = TemplateInput::new(question, sql);
        input.value_phrases = self.value_phrases.clone();
        Some(input)
    }
}

impl ContextGenerator<'_> {
    /// Convert golden records into templates.
    ///
    /// Records missing a question or SQL are skipped with a warning; no
    /// usable record at all is an error.
    pub async fn convert_goldens(&self, records: &[GoldenRecord]) -> Result<ContextSet> {
        let mut inputs = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            match record.to_input() {
                Some(input) => inputs.push(input),
                None => tracing::warn!(index, "skipping golden record with missing question or SQL"),
            }
        }

        if inputs.is_empty() {
            return Err(GenerateError::NoValidItems);
        }

        tracing::info!(count = inputs.len(), skipped = records.len() - inputs.len(), "converting golden records");
        Ok(self.templates(&inputs).await)
    }

    /// Convert a golden JSON array
    pub async fn convert_goldens_json(&self, json: &str) -> Result<ContextSet> {
        let records: Vec<GoldenRecord> = parse_items(json, "golden file")?;
        self.convert_goldens(&records).await
    }
}
