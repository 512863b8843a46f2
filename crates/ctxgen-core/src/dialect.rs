//! SQL dialects and their bind-parameter placeholder policy

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// SQL dialect used for parameterization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL (numbered `$n` bind parameters)
    #[default]
    Postgresql,

    /// MySQL
    Mysql,

    /// GoogleSQL (BigQuery, Spanner)
    Googlesql,
}

/// How a dialect spells a bind parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `$1`, `$2`, ... numbered by position
    Positional,

    /// A single `?` token repeated for every parameter
    Generic,
}

impl PlaceholderStyle {
    /// Render the placeholder for the parameter at `index` (1-based)
    pub fn render(&self, index: usize) -> String {
        match self {
            Self::Positional => format!("${}", index),
            Self::Generic => "?".to_string(),
        }
    }
}

impl Dialect {
    /// Every supported dialect, in declaration order
    pub const ALL: [Dialect; 3] = [Dialect::Postgresql, Dialect::Mysql, Dialect::Googlesql];

    /// Stable lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgresql => "postgresql",
            Self::Mysql => "mysql",
            Self::Googlesql => "googlesql",
        }
    }

    /// Placeholder syntax for this dialect
    pub fn placeholder_style(&self) -> PlaceholderStyle {
        match self {
            Self::Postgresql => PlaceholderStyle::Positional,
            Self::Mysql | Self::Googlesql => PlaceholderStyle::Generic,
        }
    }

    /// Placeholder token for the parameter at `index` (1-based)
    pub fn placeholder(&self, index: usize) -> String {
        self.placeholder_style().render(index)
    }

    /// Names of all supported dialects
    pub fn supported() -> Vec<&'static str> {
        Self::ALL.iter().map(|d| d.as_str()).collect()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| DialectError::Unsupported {
                value: s.to_string(),
                supported: Self::supported().join(", "),
            })
    }
}

/// Dialect error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialectError {
    #[error("Invalid database dialect specified: '{value}'. Supported dialects: [{supported}]")]
    Unsupported { value: String, supported: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_postgresql() {
        assert_eq!(Dialect::default(), Dialect::Postgresql);
        assert_eq!(Dialect::default().placeholder_style(), PlaceholderStyle::Positional);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("PostgreSQL".parse::<Dialect>().unwrap(), Dialect::Postgresql);
        assert_eq!(" mysql ".parse::<Dialect>().unwrap(), Dialect::Mysql);
        assert_eq!("googlesql".parse::<Dialect>().unwrap(), Dialect::Googlesql);
    }

    #[test]
    fn unknown_dialect_lists_supported() {
        let err = "oracle".parse::<Dialect>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'oracle'"));
        assert!(message.contains("postgresql, mysql, googlesql"));
    }

    #[test]
    fn placeholder_policy() {
        assert_eq!(Dialect::Postgresql.placeholder(1), "$1");
        assert_eq!(Dialect::Postgresql.placeholder(12), "$12");
        assert_eq!(Dialect::Mysql.placeholder(1), "?");
        assert_eq!(Dialect::Googlesql.placeholder(7), "?");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Dialect::Googlesql).unwrap();
        assert_eq!(json, "\"googlesql\"");
        let parsed: Dialect = serde_json::from_str("\"mysql\"").unwrap();
        assert_eq!(parsed, Dialect::Mysql);
    }
}
