//! Discovery — map informal keywords onto the controlled vocabulary.
//!
//! Pure functions over (input, vocabulary snapshot): the maintained
//! keyword table answers first; otherwise a fuzzy scan across all
//! enumerable fields ranks candidates by similarity.

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::{SearchError, SearchResult};
use crate::index::FilterField;
use crate::vocab::{VocabSnapshot, normalize_keyword};

/// Minimum similarity for a fuzzy discovery candidate. Looser than the
/// normalizer's subject threshold — discovery ranks suggestions, it does
/// not commit to one.
const DISCOVERY_FUZZY_THRESHOLD: f64 = 0.7;
/// Cap on returned suggestions.
const MAX_SUGGESTIONS: usize = 10;

/// One ranked discovery result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub field: FilterField,
    pub value: String,
    pub score: f64,
}

/// Rank the canonical values a keyword plausibly refers to.
///
/// Exact table entries win outright; otherwise candidates are scored by
/// Jaro–Winkler similarity, ties broken by field priority (attributes >
/// requirement designations > subject > instruction mode — the
/// [`FilterField`] declaration order).
pub fn suggest_values(keyword: &str, vocab: &VocabSnapshot) -> SearchResult<Vec<Suggestion>> {
    let normalized = normalize_keyword(keyword);
    if normalized.is_empty() {
        return Err(SearchError::InvalidKeyword);
    }

    if let Some(mappings) = vocab.keyword_mappings(&normalized) {
        return Ok(mappings
            .iter()
            .map(|m| Suggestion {
                field: m.field,
                value: m.value.clone(),
                score: m.score,
            })
            .collect());
    }

    let mut suggestions: Vec<Suggestion> = Vec::new();
    for field in FilterField::ENUMERABLE {
        for value in vocab.values_for(field) {
            let score = jaro_winkler(&normalized, &value.to_lowercase());
            if score >= DISCOVERY_FUZZY_THRESHOLD {
                suggestions.push(Suggestion {
                    field,
                    value: value.clone(),
                    score,
                });
            }
        }
    }
    // Department names count toward their subject code.
    for (name, code) in vocab.subject_name_entries() {
        let score = jaro_winkler(&normalized, name);
        if score >= DISCOVERY_FUZZY_THRESHOLD
            && vocab
                .values_for(FilterField::Subject)
                .iter()
                .any(|c| c == code)
        {
            suggestions.push(Suggestion {
                field: FilterField::Subject,
                value: code.to_string(),
                score,
            });
        }
    }

    // Best score per (field, value); then score descending with the
    // field declaration order as tie-break.
    suggestions.sort_by(|a, b| {
        (a.field, &a.value)
            .cmp(&(b.field, &b.value))
            .then(b.score.total_cmp(&a.score))
    });
    suggestions.dedup_by(|a, b| a.field == b.field && a.value == b.value);
    suggestions.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.field.cmp(&b.field))
            .then(a.value.cmp(&b.value))
    });
    suggestions.truncate(MAX_SUGGESTIONS);
    Ok(suggestions)
}

/// The full canonical value set for one enumerable field, as of the
/// current vocabulary snapshot.
pub fn list_values(field: FilterField, vocab: &VocabSnapshot) -> SearchResult<Vec<String>> {
    if !field.is_enumerable() {
        return Err(SearchError::invalid_filter(
            field.as_str(),
            "",
            "field has no enumerable value set",
        ));
    }
    Ok(vocab.values_for(field).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keyword_is_invalid() {
        let vocab = VocabSnapshot::with_sample_values();
        assert_eq!(
            suggest_values("", &vocab).unwrap_err(),
            SearchError::InvalidKeyword
        );
        assert_eq!(
            suggest_values("   ", &vocab).unwrap_err(),
            SearchError::InvalidKeyword
        );
    }

    #[test]
    fn table_hit_wins_outright() {
        let vocab = VocabSnapshot::with_sample_values();
        let suggestions = suggest_values("honors", &vocab).unwrap();
        assert_eq!(suggestions[0].field, FilterField::RequirementDesignations);
        assert_eq!(suggestions[0].value, "HON");
    }

    #[test]
    fn table_lookup_normalizes_case_and_whitespace() {
        let vocab = VocabSnapshot::with_sample_values();
        let suggestions = suggest_values("  GEN   ED ", &vocab).unwrap();
        assert!(!suggestions.is_empty());
        assert!(suggestions.iter().all(|s| s.field == FilterField::Attributes));
    }

    #[test]
    fn fuzzy_fallback_ranks_by_score() {
        let vocab = VocabSnapshot::with_sample_values();
        // Not in the table; close to the department name "mathematics".
        let suggestions = suggest_values("mathematic", &vocab).unwrap();
        assert!(!suggestions.is_empty());
        assert_eq!(suggestions[0].field, FilterField::Subject);
        assert_eq!(suggestions[0].value, "MATH");
        for pair in suggestions.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn tie_break_prefers_attributes() {
        let mut vocab = VocabSnapshot::builtin();
        vocab.set_values(FilterField::Attributes, ["HON"]);
        vocab.set_values(FilterField::RequirementDesignations, ["HON"]);

        // "hon" is no table entry; both fields score identically.
        let suggestions = suggest_values("hon", &vocab).unwrap();
        assert!(suggestions.len() >= 2);
        assert_eq!(suggestions[0].field, FilterField::Attributes);
        assert_eq!(suggestions[1].field, FilterField::RequirementDesignations);
    }

    #[test]
    fn list_values_for_enumerable_field() {
        let vocab = VocabSnapshot::with_sample_values();
        let subjects = list_values(FilterField::Subject, &vocab).unwrap();
        assert!(subjects.contains(&"CS".to_string()));
    }

    #[test]
    fn list_values_rejects_non_enumerable_field() {
        let vocab = VocabSnapshot::with_sample_values();
        assert!(list_values(FilterField::Instructor, &vocab).is_err());
        assert!(list_values(FilterField::MeetingTime, &vocab).is_err());
    }
}
