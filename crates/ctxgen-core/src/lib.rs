//! ctxgen Core
//!
//! Shared domain model for building NL2SQL context sets: dialects and
//! their placeholder policy, detected value phrases, the context set
//! file format and project configuration.

pub mod dialect;
pub mod phrases;
pub mod context;
pub mod config;

pub use dialect::{Dialect, DialectError, PlaceholderStyle};
pub use phrases::{PhraseSet, PhraseError, ValuePhrasePair, ExtractionResponse, FALLBACK_TYPE};
pub use context::{
    ContextSet, ContextError, Template, ParameterizedTemplate, Facet, ParameterizedFacet, ValueSearch,
};
pub use config::{Config, ConfigError, ValueSearchConfig};
