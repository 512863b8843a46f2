//! Match template registry and resolution
//!
//! This crate handles:
//! - The static per-dialect table of value search SQL templates
//! - Strict engine version validation
//! - Override-over-default template lookup

pub mod error;
pub mod registry;
pub mod resolver;

pub use error::MatchError;
pub use registry::{
    DialectConfig, MatchDialect, MatchRegistry, TemplateRecord, EXACT_MATCH_STRINGS, FUZZY_MATCH_STRINGS,
};
pub use resolver::{list_functions, resolve, TemplateResolver};
