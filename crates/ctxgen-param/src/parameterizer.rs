//! Value phrase substitution
//!
//! Replaces literal value phrases in a SQL string and its paired intent
//! with bind-parameter placeholders, so both sides of the pair stay in
//! sync. Purely textual: no SQL parsing happens here.

use ctxgen_core::{Dialect, PhraseSet};
use regex::Regex;
use std::ops::Range;

/// Character that introduces a placeholder. Text right after it is
/// never substituted again.
const PLACEHOLDER_SIGIL: char = '$';

/// How a phrase occurs in a string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchForm {
    /// Wrapped in single quotes: `'New York'`
    Quoted,

    /// As a whole word: `New York`
    Unquoted,
}

/// (sql form, intent form) pairs in priority order.
///
/// The first pair present in both strings decides how the phrase is
/// substituted. If none is present in both, the phrase is left alone.
pub const MATCH_PRIORITY: [(MatchForm, MatchForm); 4] = [
    (MatchForm::Quoted, MatchForm::Quoted),
    (MatchForm::Quoted, MatchForm::Unquoted),
    (MatchForm::Unquoted, MatchForm::Quoted),
    (MatchForm::Unquoted, MatchForm::Unquoted),
];

/// Compiled match patterns for one phrase
#[derive(Debug, Clone)]
pub struct PhrasePatterns {
    quoted: Regex,
    unquoted: Regex,
}

impl PhrasePatterns {
    /// Build the quoted and whole-word patterns for a phrase
    pub fn new(phrase: &str) -> Result<Self, regex::Error> {
        let escaped = regex::escape(phrase);

        Ok(Self {
            quoted: Regex::new(&format!("'{}'", escaped))?,
            unquoted: Regex::new(&format!(r"\b{}\b", escaped))?,
        })
    }

    fn pattern(&self, form: MatchForm) -> &Regex {
        match form {
            MatchForm::Quoted => &self.quoted,
            MatchForm::Unquoted => &self.unquoted,
        }
    }

    /// Whether `text` holds an occurrence in the given form
    pub fn is_match(&self, form: MatchForm, text: &str) -> bool {
        first_unguarded(self.pattern(form), text, 0).is_some()
    }

    /// Replace every occurrence in the given form
    pub fn replace_all(&self, form: MatchForm, text: &str, placeholder: &str) -> String {
        let pattern = self.pattern(form);
        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        let mut pos = 0;

        while let Some(range) = first_unguarded(pattern, text, pos) {
            output.push_str(&text[last..range.start]);
            output.push_str(placeholder);
            last = range.end;
            pos = range.end;
        }

        output.push_str(&text[last..]);
        output
    }

    /// First (sql, intent) form pair from [`MATCH_PRIORITY`] present in both strings
    pub fn select_forms(&self, sql: &str, intent: &str) -> Option<(MatchForm, MatchForm)> {
        MATCH_PRIORITY
            .iter()
            .copied()
            .find(|&(sql_form, intent_form)| {
                self.is_match(sql_form, sql) && self.is_match(intent_form, intent)
            })
    }
}

/// Find the first match at or after `start` that is not directly
/// preceded by the placeholder sigil.
///
/// A rejected match only advances the search by one character, so a
/// later overlapping occurrence can still be found.
fn first_unguarded(pattern: &Regex, text: &str, start: usize) -> Option<Range<usize>> {
    let mut pos = start;

    while pos <= text.len() {
        let found = pattern.find_at(text, pos)?;

        if !text[..found.start()].ends_with(PLACEHOLDER_SIGIL) {
            return Some(found.range());
        }

        let step = text[found.start()..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        pos = found.start() + step;
    }

    None
}

/// A phrase that was replaced in both strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub phrase: String,
    pub placeholder: String,
    pub sql_form: MatchForm,
    pub intent_form: MatchForm,
}

/// Parameterized SQL and intent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterizationResult {
    pub sql: String,
    pub intent: String,

    /// Applied substitutions, in placeholder order
    pub substitutions: Vec<Substitution>,
}

/// Substitutes value phrases with the placeholders of one dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct Parameterizer {
    dialect: Dialect,
}

impl Parameterizer {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Replace phrases in `sql` and `intent` with placeholders.
    ///
    /// Phrases are processed longest first. A phrase is only replaced
    /// when it occurs in both strings, and only replaced phrases take a
    /// placeholder number, so numbering stays dense.
    pub fn parameterize(&self, phrases: &PhraseSet, sql: &str, intent: &str) -> ParameterizationResult {
        let mut psql = sql.to_string();
        let mut pintent = intent.to_string();
        let mut substitutions = Vec::new();
        let mut index = 1;

        for phrase in phrases.longest_first() {
            // Escaped literals only fail to compile past the regex size limit
            let Ok(patterns) = PhrasePatterns::new(phrase) else {
                continue;
            };

            let Some((sql_form, intent_form)) = patterns.select_forms(&psql, &pintent) else {
                continue;
            };

            let placeholder = self.dialect.placeholder(index);
            psql = patterns.replace_all(sql_form, &psql, &placeholder);
            pintent = patterns.replace_all(intent_form, &pintent, &placeholder);

            substitutions.push(Substitution {
                phrase: phrase.to_string(),
                placeholder,
                sql_form,
                intent_form,
            });
            index += 1;
        }

        ParameterizationResult {
            sql: psql,
            intent: pintent,
            substitutions,
        }
    }
}

/// Replace phrases in `sql` and `intent` with `dialect` placeholders
pub fn parameterize(phrases: &PhraseSet, sql: &str, intent: &str, dialect: Dialect) -> ParameterizationResult {
    Parameterizer::new(dialect).parameterize(phrases, sql, intent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn city(phrase: &str) -> PhraseSet {
        PhraseSet::new().with(phrase, &["city"])
    }

    #[test]
    fn quoted_in_sql_unquoted_in_intent() {
        let result = parameterize(
            &city("New York"),
            "SELECT * FROM users WHERE city = 'New York'",
            "Find users in New York",
            Dialect::Postgresql,
        );

        assert_eq!(result.sql, "SELECT * FROM users WHERE city = $1");
        assert_eq!(result.intent, "Find users in $1");
        assert_eq!(result.substitutions.len(), 1);
        assert_eq!(result.substitutions[0].sql_form, MatchForm::Quoted);
        assert_eq!(result.substitutions[0].intent_form, MatchForm::Unquoted);
    }

    #[test]
    fn generic_placeholder_dialects() {
        for dialect in [Dialect::Mysql, Dialect::Googlesql] {
            let result = parameterize(
                &city("New York"),
                "SELECT * FROM users WHERE city = 'New York'",
                "Find users in New York",
                dialect,
            );

            assert_eq!(result.sql, "SELECT * FROM users WHERE city = ?");
            assert_eq!(result.intent, "Find users in ?");
        }
    }

    #[test]
    fn priority_prefers_quoted_pair() {
        let patterns = PhrasePatterns::new("Paris").unwrap();

        assert_eq!(
            patterns.select_forms("city = 'Paris'", "users in 'Paris'"),
            Some((MatchForm::Quoted, MatchForm::Quoted))
        );
        assert_eq!(
            patterns.select_forms("city = 'Paris'", "users in Paris"),
            Some((MatchForm::Quoted, MatchForm::Unquoted))
        );
        assert_eq!(
            patterns.select_forms("city = Paris", "users in 'Paris'"),
            Some((MatchForm::Unquoted, MatchForm::Quoted))
        );
        assert_eq!(
            patterns.select_forms("city = Paris", "users in Paris"),
            Some((MatchForm::Unquoted, MatchForm::Unquoted))
        );
        assert_eq!(patterns.select_forms("city = Paris", "all users"), None);
    }

    #[test]
    fn both_quoted_drops_quotes_on_both_sides() {
        let result = parameterize(
            &city("Paris"),
            "WHERE city = 'Paris'",
            "users in 'Paris'",
            Dialect::Postgresql,
        );

        assert_eq!(result.sql, "WHERE city = $1");
        assert_eq!(result.intent, "users in $1");
    }

    #[test]
    fn whole_word_only() {
        let phrases = PhraseSet::new().with("Art", &["work of art"]);
        let result = parameterize(
            &phrases,
            "SELECT * FROM articles WHERE genre = 'Art'",
            "Article about Art",
            Dialect::Postgresql,
        );

        assert_eq!(result.intent, "Article about $1");
        assert_eq!(result.sql, "SELECT * FROM articles WHERE genre = $1");
    }

    #[test]
    fn placeholder_text_is_not_rematched() {
        let phrases = PhraseSet::new().with("1", &["number"]);
        let result = parameterize(&phrases, "LIMIT $1", "top $1", Dialect::Postgresql);

        assert_eq!(result.sql, "LIMIT $1");
        assert_eq!(result.intent, "top $1");
        assert!(result.substitutions.is_empty());
    }

    #[test]
    fn guard_skips_only_the_guarded_occurrence() {
        let phrases = PhraseSet::new().with("5", &["number"]);
        let result = parameterize(
            &phrases,
            "WHERE a = $5 AND b = 5",
            "rank 5",
            Dialect::Mysql,
        );

        assert_eq!(result.sql, "WHERE a = $5 AND b = ?");
        assert_eq!(result.intent, "rank ?");
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let phrases = PhraseSet::new().with("A.B. Smith", &["person"]);
        let result = parameterize(
            &phrases,
            "WHERE name = 'A.B. Smith'",
            "Find A.B. Smith and AxBx Smith",
            Dialect::Postgresql,
        );

        assert_eq!(result.sql, "WHERE name = $1");
        assert_eq!(result.intent, "Find $1 and AxBx Smith");
    }

    #[test]
    fn every_occurrence_is_replaced() {
        let result = parameterize(
            &city("Rome"),
            "WHERE origin = 'Rome' OR destination = 'Rome'",
            "Trips from or to Rome",
            Dialect::Postgresql,
        );

        assert_eq!(result.sql, "WHERE origin = $1 OR destination = $1");
        assert_eq!(result.intent, "Trips from or to $1");
    }

    #[test]
    fn empty_phrase_set_is_noop() {
        let sql = "SELECT * FROM users WHERE city = 'Oslo'";
        let intent = "Users in Oslo";
        let result = parameterize(&PhraseSet::new(), sql, intent, Dialect::Postgresql);

        assert_eq!(result.sql, sql);
        assert_eq!(result.intent, intent);
        assert!(result.substitutions.is_empty());
    }

    #[test]
    fn parameterizer_keeps_dialect() {
        let parameterizer = Parameterizer::new(Dialect::Googlesql);
        assert_eq!(parameterizer.dialect(), Dialect::Googlesql);
        assert_eq!(Parameterizer::default().dialect(), Dialect::Postgresql);
    }
}
