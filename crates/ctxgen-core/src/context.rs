//! Context set schema (templates, facets, value searches)
//!
//! This is the file format consumed by the downstream NL2SQL engine.
//! Facets were previously called "fragments"; the old field names are
//! still accepted on read and never written.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameterized form of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterizedTemplate {
    /// SQL with value placeholders (e.g. `$1`)
    pub parameterized_sql: String,

    /// Intent with the same placeholders
    pub parameterized_intent: String,
}

/// A complete question/SQL template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Natural language question
    pub nl_query: String,

    /// The corresponding SQL query
    pub sql: String,

    /// The user's specific intent
    pub intent: String,

    /// General description of what the template does
    pub manifest: String,

    pub parameterized: ParameterizedTemplate,
}

/// Parameterized form of a facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterizedFacet {
    #[serde(alias = "parameterized_fragment")]
    pub parameterized_sql_snippet: String,

    pub parameterized_intent: String,
}

/// A reusable SQL snippet paired with an intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    #[serde(alias = "fragment")]
    pub sql_snippet: String,

    pub intent: String,

    pub manifest: String,

    pub parameterized: ParameterizedFacet,
}

/// A value search query for a single column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSearch {
    /// SQL query, still carrying the `$value` placeholder
    pub query: String,

    /// Semantic type of the values (e.g. "City")
    pub concept_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A set of templates, facets and value searches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<Template>>,

    #[serde(default, alias = "fragments", skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<Facet>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_searches: Option<Vec<ValueSearch>>,
}

impl ContextSet {
    /// Context set holding only templates
    pub fn from_templates(templates: Vec<Template>) -> Self {
        Self {
            templates: Some(templates),
            ..Self::default()
        }
    }

    /// Context set holding only facets
    pub fn from_facets(facets: Vec<Facet>) -> Self {
        Self {
            facets: Some(facets),
            ..Self::default()
        }
    }

    /// Context set holding only value searches
    pub fn from_value_searches(value_searches: Vec<ValueSearch>) -> Self {
        Self {
            value_searches: Some(value_searches),
            ..Self::default()
        }
    }

    /// Total number of entries across all lists
    pub fn len(&self) -> usize {
        self.templates.as_ref().map_or(0, Vec::len)
            + self.facets.as_ref().map_or(0, Vec::len)
            + self.value_searches.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append every entry of `other` after the entries of `self`
    pub fn merge(&mut self, other: ContextSet) {
        append(&mut self.templates, other.templates);
        append(&mut self.facets, other.facets);
        append(&mut self.value_searches, other.value_searches);
    }

    /// Parse a context set from JSON (legacy names accepted)
    pub fn from_json(json: &str) -> Result<Self, ContextError> {
        serde_json::from_str(json).map_err(|e| ContextError::ParseError(e.to_string()))
    }

    /// Serialize as pretty JSON, omitting absent lists
    pub fn to_json(&self) -> Result<String, ContextError> {
        serde_json::to_string_pretty(self).map_err(|e| ContextError::SerializeError(e.to_string()))
    }

    /// Load a context set from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ContextError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ContextError::IoError(path.display().to_string(), e.to_string()))?;

        Self::from_json(&contents)
    }

    /// Write this context set to a file, replacing its contents
    pub fn save_to_file(&self, path: &Path) -> Result<(), ContextError> {
        let json = self.to_json()?;

        std::fs::write(path, json)
            .map_err(|e| ContextError::IoError(path.display().to_string(), e.to_string()))
    }

    /// Append this context set to the one stored at `path`.
    ///
    /// A missing file is created. Existing entries come first and are
    /// rewritten under the current field names.
    pub fn attach_to_file(&self, path: &Path) -> Result<ContextSet, ContextError> {
        let mut combined = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };

        combined.merge(self.clone());
        combined.save_to_file(path)?;

        Ok(combined)
    }
}

fn append<T>(target: &mut Option<Vec<T>>, extra: Option<Vec<T>>) {
    if let Some(extra) = extra {
        target.get_or_insert_with(Vec::new).extend(extra);
    }
}

/// Context set error types
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("IO error for {0}: {1}")]
    IoError(String, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
