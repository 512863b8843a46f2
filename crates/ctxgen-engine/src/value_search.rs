//! Value search generation
//!
//! Resolves a match template for the target engine and fills in the
//! table, column and concept type. `$value` stays as the bind placeholder.

use ctxgen_core::{ContextSet, ValueSearch};
use ctxgen_match::TemplateResolver;
use serde::{Deserialize, Serialize};
use crate::error::Result;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Parameters of a single value search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSearchRequest {
    pub table: String,
    pub column: String,

    /// Semantic type of the column values (e.g. "City")
    pub concept_type: String,

    /// Match function name (e.g. "EXACT_MATCH_STRINGS")
    pub match_function: String,

    /// Database engine (e.g. "postgresql")
    pub engine: String,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

static SLOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(table|column|concept_type)\}").expect("slot pattern is valid"));

/// Fill the `{table}`, `{column}` and `{concept_type}` slots of a template.
///
/// All slots are filled in a single left-to-right pass: slot text inside
/// a filled value is kept as is.
pub fn fill_template(sql_template: &str, table: &str, column: &str, concept_type: &str) -> String {
    SLOT.replace_all(sql_template, |caps: &Captures<'_>| match &caps[1] {
        "table" => table,
        "column" => column,
        _ => concept_type,
    })
    .into_owned()
}

/// Build a value search using the given resolver
pub fn generate_value_search_with(resolver: &TemplateResolver<'_>, request: &ValueSearchRequest) -> Result<ValueSearch> {
    let record = resolver.resolve(&request.engine, &request.match_function, request.version.as_deref())?;

    tracing::debug!(
        engine = %request.engine,
        function = %request.match_function,
        version = ?request.version,
        "resolved match template"
    );

    Ok(ValueSearch {
        query: fill_template(&record.sql_template, &request.table, &request.column, &request.concept_type),
        concept_type: request.concept_type.clone(),
        description: request.description.clone(),
    })
}

/// Build a context set holding a single value search from the shipped templates
pub fn generate_value_search(request: &ValueSearchRequest) -> Result<ContextSet> {
    let value_search = generate_value_search_with(&TemplateResolver::builtin(), request)?;
    Ok(ContextSet::from_value_searches(vec![value_search]))
}
