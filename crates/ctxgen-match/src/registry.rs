//! Match template registry
//!
//! Per-dialect configuration of value search SQL templates: defaults,
//! the engine versions accepted, and per-version overrides.
//!
//! Template SQL carries `{table}`, `{column}` and `{concept_type}` slots
//! plus the `$value` bind placeholder.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::LazyLock;
use crate::error::MatchError;

/// Dialects with registered match templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchDialect {
    Postgresql,
}

impl MatchDialect {
    pub const ALL: [MatchDialect; 1] = [MatchDialect::Postgresql];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgresql => "postgresql",
        }
    }

    pub fn supported() -> Vec<String> {
        Self::ALL.iter().map(|d| d.as_str().to_string()).collect()
    }
}

impl std::fmt::Display for MatchDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MatchDialect {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| MatchError::UnsupportedDialect {
                dialect: s.to_string(),
                supported: Self::supported(),
            })
    }
}

/// A value search SQL template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub sql_template: String,
    pub description: String,
}

impl TemplateRecord {
    pub fn new(sql_template: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            sql_template: sql_template.into(),
            description: description.into(),
        }
    }
}

/// Templates registered for one dialect
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectConfig {
    /// Engine versions a caller may ask for
    pub supported_versions: Vec<String>,

    /// Fallback template per function name
    pub defaults: BTreeMap<String, TemplateRecord>,

    /// Version -> function name -> template, shadowing `defaults`
    #[serde(default)]
    pub overrides: BTreeMap<String, BTreeMap<String, TemplateRecord>>,
}

impl DialectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions(mut self, versions: &[&str]) -> Self {
        self.supported_versions = versions.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn with_default(mut self, function: impl Into<String>, record: TemplateRecord) -> Self {
        self.defaults.insert(function.into(), record);
        self
    }

    pub fn with_override(
        mut self,
        version: impl Into<String>,
        function: impl Into<String>,
        record: TemplateRecord,
    ) -> Self {
        self.overrides
            .entry(version.into())
            .or_default()
            .insert(function.into(), record);
        self
    }

    pub fn supports_version(&self, version: &str) -> bool {
        self.supported_versions.iter().any(|v| v == version)
    }

    /// Function names, in name order
    pub fn function_names(&self) -> Vec<&str> {
        self.defaults.keys().map(|k| k.as_str()).collect()
    }

    /// Override for `version` if present, else the default
    pub fn lookup(&self, function: &str, version: Option<&str>) -> Option<&TemplateRecord> {
        version
            .and_then(|v| self.overrides.get(v))
            .and_then(|templates| templates.get(function))
            .or_else(|| self.defaults.get(function))
    }
}

/// Match templates for every dialect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchRegistry {
    configs: HashMap<MatchDialect, DialectConfig>,
}

static BUILTIN: LazyLock<MatchRegistry> = LazyLock::new(MatchRegistry::builtin);

impl MatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the configuration of a dialect
    pub fn with_dialect(mut self, dialect: MatchDialect, config: DialectConfig) -> Self {
        self.configs.insert(dialect, config);
        self
    }

    pub fn config(&self, dialect: MatchDialect) -> Option<&DialectConfig> {
        self.configs.get(&dialect)
    }

    /// Process-wide registry of shipped templates
    pub fn global() -> &'static MatchRegistry {
        &BUILTIN
    }

    /// Registry of shipped templates
    pub fn builtin() -> Self {
        Self::new().with_dialect(MatchDialect::Postgresql, postgresql())
    }
}

pub const EXACT_MATCH_STRINGS: &str = "EXACT_MATCH_STRINGS";
pub const FUZZY_MATCH_STRINGS: &str = "FUZZY_MATCH_STRINGS";

fn postgresql() -> DialectConfig {
    DialectConfig::new()
        .with_versions(&["13", "14", "15", "16", "17"])
        .with_default(
            EXACT_MATCH_STRINGS,
            TemplateRecord::new(
                "SELECT $value as value, '{table}.{column}' as columns, \
                 '{concept_type}' as concept_type, 0 as distance, \
                 '' as context FROM {table} T WHERE T.{column} = $value LIMIT 1",
                "Exact match (Standard SQL)",
            ),
        )
        .with_default(
            FUZZY_MATCH_STRINGS,
            TemplateRecord::new(
                "SELECT T.{column} as value, '{table}.{column}' as columns, \
                 '{concept_type}' as concept_type, levenshtein(T.{column}, $value) as distance, \
                 '' as context FROM {table} T ORDER BY distance LIMIT 10",
                "Fuzzy match using standard levenshtein (requires fuzzystrmatch extension)",
            ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_postgres_has_defaults() {
        let registry = MatchRegistry::builtin();
        let config = registry.config(MatchDialect::Postgresql).unwrap();

        assert_eq!(config.function_names(), vec![EXACT_MATCH_STRINGS, FUZZY_MATCH_STRINGS]);
        assert!(config.supports_version("16"));
        assert!(!config.supports_version("12"));
    }

    #[test]
    fn builtin_templates_carry_slots() {
        let config = MatchRegistry::builtin()
            .config(MatchDialect::Postgresql)
            .cloned()
            .unwrap();

        for name in config.function_names() {
            let record = &config.defaults[name];
            assert!(record.sql_template.contains("{table}"), "{name}");
            assert!(record.sql_template.contains("{column}"), "{name}");
            assert!(record.sql_template.contains("{concept_type}"), "{name}");
            assert!(record.sql_template.contains("$value"), "{name}");
        }
    }

    #[test]
    fn overrides_reference_known_functions() {
        let registry = MatchRegistry::builtin();

        for dialect in MatchDialect::ALL {
            let config = registry.config(dialect).unwrap();
            for templates in config.overrides.values() {
                for function in templates.keys() {
                    assert!(config.defaults.contains_key(function), "{dialect}: {function}");
                }
            }
        }
    }

    #[test]
    fn lookup_prefers_override() {
        let config = DialectConfig::new()
            .with_versions(&["15"])
            .with_default("F", TemplateRecord::new("DEFAULT", "d"))
            .with_override("15", "F", TemplateRecord::new("OVERRIDE", "o"));

        assert_eq!(config.lookup("F", Some("15")).unwrap().sql_template, "OVERRIDE");
        assert_eq!(config.lookup("F", Some("14")).unwrap().sql_template, "DEFAULT");
        assert_eq!(config.lookup("F", None).unwrap().sql_template, "DEFAULT");
        assert!(config.lookup("G", Some("15")).is_none());
    }

    #[test]
    fn dialect_parse_normalizes() {
        assert_eq!("PostgreSQL".parse::<MatchDialect>().unwrap(), MatchDialect::Postgresql);
        assert!("mysql".parse::<MatchDialect>().is_err());
    }
}
