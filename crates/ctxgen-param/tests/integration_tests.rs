//! Integration tests for value phrase parameterization

use ctxgen_core::{Dialect, PhraseSet};
use ctxgen_param::{generate_manifest, parameterize};
use pretty_assertions::assert_eq;

#[test]
fn end_to_end_postgres() {
    let phrases = PhraseSet::new().with("New York", &["city"]);
    let result = parameterize(
        &phrases,
        "SELECT * FROM users WHERE city = 'New York'",
        "Find users in New York",
        Dialect::Postgresql,
    );

    assert_eq!(result.sql, "SELECT * FROM users WHERE city = $1");
    assert_eq!(result.intent, "Find users in $1");
}

#[test]
fn end_to_end_generic_dialect() {
    let phrases = PhraseSet::new().with("New York", &["city"]);
    let result = parameterize(
        &phrases,
        "SELECT * FROM users WHERE city = 'New York'",
        "Find users in New York",
        Dialect::Mysql,
    );

    assert_eq!(result.sql, "SELECT * FROM users WHERE city = ?");
    assert_eq!(result.intent, "Find users in ?");
}

#[test]
fn two_phrases_take_positions_in_processing_order() {
    let phrases = PhraseSet::new()
        .with("John Doe", &["person"])
        .with("New York", &["city"]);

    let result = parameterize(
        &phrases,
        "SELECT * FROM users WHERE name = 'John Doe' AND city = 'New York'",
        "Find users named John Doe in New York",
        Dialect::Postgresql,
    );

    assert_eq!(result.sql, "SELECT * FROM users WHERE name = $1 AND city = $2");
    assert_eq!(result.intent, "Find users named $1 in $2");

    let generic = parameterize(
        &phrases,
        "SELECT * FROM users WHERE name = 'John Doe' AND city = 'New York'",
        "Find users named John Doe in New York",
        Dialect::Googlesql,
    );

    assert_eq!(generic.sql, "SELECT * FROM users WHERE name = ? AND city = ?");
    assert_eq!(generic.intent, "Find users named ? in ?");
}

#[test]
fn longest_match_first() {
    let phrases = PhraseSet::new()
        .with("York", &["city"])
        .with("New York", &["city"]);

    let result = parameterize(
        &phrases,
        "SELECT * FROM users WHERE city = 'New York'",
        "Find users in New York",
        Dialect::Postgresql,
    );

    assert_eq!(result.sql, "SELECT * FROM users WHERE city = $1");
    assert_eq!(result.intent, "Find users in $1");
    assert_eq!(result.substitutions.len(), 1);
    assert_eq!(result.substitutions[0].phrase, "New York");
}

#[test]
fn phrase_only_in_sql_is_untouched() {
    let phrases = PhraseSet::new()
        .with("active", &["status"])
        .with("Berlin", &["city"]);

    let result = parameterize(
        &phrases,
        "SELECT * FROM users WHERE status = 'active' AND city = 'Berlin'",
        "Find users in Berlin",
        Dialect::Postgresql,
    );

    assert_eq!(result.sql, "SELECT * FROM users WHERE status = 'active' AND city = $1");
    assert_eq!(result.intent, "Find users in $1");
}

#[test]
fn phrase_only_in_intent_is_untouched() {
    let phrases = PhraseSet::new().with("Lisbon", &["city"]);
    let sql = "SELECT * FROM users";
    let intent = "Find users in Lisbon";

    let result = parameterize(&phrases, sql, intent, Dialect::Postgresql);

    assert_eq!(result.sql, sql);
    assert_eq!(result.intent, intent);
}

#[test]
fn unmatched_phrase_does_not_consume_a_number() {
    let phrases = PhraseSet::new()
        .with("Jane Doe", &["person"])
        .with("Oslo", &["city"]);

    let result = parameterize(
        &phrases,
        "SELECT * FROM users WHERE city = 'Oslo'",
        "Find users in Oslo",
        Dialect::Postgresql,
    );

    assert_eq!(result.sql, "SELECT * FROM users WHERE city = $1");
    assert_eq!(result.intent, "Find users in $1");
}

#[test]
fn reparameterizing_output_adds_nothing() {
    let phrases = PhraseSet::new()
        .with("John Doe", &["person"])
        .with("1", &["number"])
        .with("New York", &["city"]);

    let first = parameterize(
        &phrases,
        "SELECT * FROM users WHERE name = 'John Doe' AND city = 'New York'",
        "Find users named John Doe in New York",
        Dialect::Postgresql,
    );
    let second = parameterize(&phrases, &first.sql, &first.intent, Dialect::Postgresql);

    assert_eq!(second.sql, first.sql);
    assert_eq!(second.intent, first.intent);
    assert!(second.substitutions.is_empty());
}

#[test]
fn manifest_example() {
    let phrases = PhraseSet::new().with("New York", &["city"]);
    assert_eq!(
        generate_manifest("Find users in New York", &phrases),
        "Find users in a given city"
    );
}

#[test]
fn numbering_counts_characters_not_bytes() {
    let phrases = PhraseSet::new()
        .with("Köln", &["city"])
        .with("Paris", &["city"]);
    let result = parameterize(
        &phrases,
        "WHERE a = 'Köln' OR b = 'Paris'",
        "From Köln to Paris",
        Dialect::Postgresql,
    );

    assert_eq!(result.sql, "WHERE a = $2 OR b = $1");
    assert_eq!(result.intent, "From $2 to $1");
}
