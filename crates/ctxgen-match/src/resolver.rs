//! Match template resolution
//!
//! Validation runs in a fixed order (dialect, then version, then
//! function) and the override-over-default merge is evaluated on every
//! call against whatever registry is passed in.

use crate::error::MatchError;
use crate::registry::{DialectConfig, MatchDialect, MatchRegistry, TemplateRecord};

/// Resolves match templates against a registry
#[derive(Debug, Clone, Copy)]
pub struct TemplateResolver<'r> {
    registry: &'r MatchRegistry,
}

impl TemplateResolver<'static> {
    /// Resolver over the shipped templates
    pub fn builtin() -> Self {
        Self::new(MatchRegistry::global())
    }
}

impl<'r> TemplateResolver<'r> {
    pub fn new(registry: &'r MatchRegistry) -> Self {
        Self { registry }
    }

    /// Return the template for `function_name`.
    ///
    /// A given `version` must be one of the dialect's supported versions;
    /// its override wins over the default. Without a version only the
    /// defaults are consulted.
    pub fn resolve(
        &self,
        dialect: &str,
        function_name: &str,
        version: Option<&str>,
    ) -> Result<&'r TemplateRecord, MatchError> {
        let (config, version) = self.validated(dialect, version)?;

        config
            .lookup(function_name, version)
            .ok_or_else(|| MatchError::UnknownFunction {
                function: function_name.to_string(),
                available: owned(config.function_names()),
            })
    }

    /// Function names available for a dialect (and version, if given)
    pub fn list_functions(&self, dialect: &str, version: Option<&str>) -> Result<Vec<&'r str>, MatchError> {
        let (config, _) = self.validated(dialect, version)?;
        Ok(config.function_names())
    }

    fn validated<'v>(
        &self,
        dialect: &str,
        version: Option<&'v str>,
    ) -> Result<(&'r DialectConfig, Option<&'v str>), MatchError> {
        let parsed: MatchDialect = dialect.parse()?;

        let config = self
            .registry
            .config(parsed)
            .ok_or_else(|| MatchError::MissingConfig {
                dialect: parsed.to_string(),
            })?;

        let version = version.map(str::trim).filter(|v| !v.is_empty());

        if let Some(version) = version {
            if !config.supports_version(version) {
                return Err(MatchError::UnsupportedVersion {
                    version: version.to_string(),
                    dialect: dialect.to_string(),
                    supported: config.supported_versions.clone(),
                });
            }
        }

        Ok((config, version))
    }
}

fn owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}

/// Resolve a template from the shipped registry
pub fn resolve(
    dialect: &str,
    function_name: &str,
    version: Option<&str>,
) -> Result<&'static TemplateRecord, MatchError> {
    TemplateResolver::builtin().resolve(dialect, function_name, version)
}

/// List function names from the shipped registry
pub fn list_functions(dialect: &str, version: Option<&str>) -> Result<Vec<&'static str>, MatchError> {
    TemplateResolver::builtin().list_functions(dialect, version)
}
