//! Manifest generation
//!
//! A manifest is a placeholder-free description of what a template or
//! facet does: "Find users in New York" becomes "Find users in a given city".

use ctxgen_core::PhraseSet;

/// Replace each phrase in `text` with "a given {type}", longest phrase first.
///
/// Uses the first type tag of each phrase. Plain substring replacement:
/// the phrase does not need to appear in any SQL.
pub fn generate_manifest(text: &str, phrases: &PhraseSet) -> String {
    phrases
        .longest_first()
        .into_iter()
        .fold(text.to_string(), |manifest, phrase| {
            manifest.replace(phrase, &format!("a given {}", phrases.primary_type(phrase)))
        })
}
