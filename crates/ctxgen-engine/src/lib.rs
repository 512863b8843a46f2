//! Context set generation
//!
//! This crate handles:
//! - Turning question/SQL pairs into parameterized templates
//! - Turning intent/SQL snippet pairs into parameterized facets
//! - Converting golden question/SQL files
//! - Building value searches from match templates
//!
//! Phrase detection is delegated to a [`PhraseExtractor`].

pub mod error;
pub mod extractor;
pub mod generator;
pub mod template;
pub mod facet;
pub mod goldens;
pub mod value_search;

pub use error::{GenerateError, Result};
pub use extractor::{extract_or_empty, ExtractError, InlinePhrases, NoPhrases, PhraseExtractor};
pub use generator::ContextGenerator;
pub use template::TemplateInput;
pub use facet::FacetInput;
pub use goldens::GoldenRecord;
pub use value_search::{fill_template, generate_value_search, generate_value_search_with, ValueSearchRequest};
