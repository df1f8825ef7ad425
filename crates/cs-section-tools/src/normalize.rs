//! Filter normalization — raw, loosely-specified filter arguments become
//! exact index predicates.
//!
//! Everything here is a pure function over (input, vocabulary snapshot):
//! deterministic, no I/O. Unknown fields are rejected rather than
//! silently dropped, so callers get a clear signal.

use serde_json::Value;
use strsim::jaro_winkler;

use cs_protocol::{AcademicLevel, InstructionMode, TermCode, parse_clock};

use crate::error::{SearchError, SearchResult};
use crate::index::{FilterField, Predicate, PredicateSet};
use crate::vocab::VocabSnapshot;

/// Minimum Jaro–Winkler similarity for a fuzzy subject match.
const SUBJECT_FUZZY_THRESHOLD: f64 = 0.85;
/// Candidates scoring within this band of the best are reported as
/// ambiguous instead of auto-picked.
const AMBIGUITY_BAND: f64 = 0.02;

/// Informal meeting-time buckets, minutes since midnight, end-exclusive.
const MORNING: (u16, u16) = (360, 720); // 06:00-11:59
const AFTERNOON: (u16, u16) = (720, 1020); // 12:00-16:59
const EVENING: (u16, u16) = (1020, 1380); // 17:00-22:59

/// Turn a raw filter-argument object into a canonical predicate set.
///
/// `ignore` lists argument keys that belong to the calling tool (paging,
/// schedule windows, sort preferences) and are not filters; any other
/// unrecognized key fails with `InvalidFilterSyntax`.
pub fn normalize(
    args: &serde_json::Map<String, Value>,
    vocab: &VocabSnapshot,
    ignore: &[&str],
) -> SearchResult<PredicateSet> {
    let mut predicates = PredicateSet::new();

    for (key, value) in args {
        if ignore.contains(&key.as_str()) || value.is_null() {
            continue;
        }
        let field = FilterField::parse(key).ok_or_else(|| {
            SearchError::invalid_filter(key.clone(), value.to_string(), "unknown filter field")
        })?;

        let predicate = match field {
            FilterField::Term => {
                let raw = expect_str(field, value)?;
                let term = TermCode::parse(raw).map_err(|e| {
                    SearchError::invalid_filter(field.as_str(), raw, e.to_string())
                })?;
                Predicate::Exact { value: term.code() }
            }
            FilterField::Subject => Predicate::Exact {
                value: resolve_subject(expect_str(field, value)?, vocab)?,
            },
            FilterField::CatalogNumber => resolve_catalog(expect_str(field, value)?)?,
            FilterField::Instructor => resolve_instructor(expect_str(field, value)?)?,
            FilterField::InstructionMode => {
                let raw = expect_str(field, value)?;
                let mode = InstructionMode::resolve(raw).ok_or_else(|| {
                    SearchError::invalid_filter(field.as_str(), raw, "unknown instruction mode")
                })?;
                Predicate::Exact {
                    value: mode.key().to_string(),
                }
            }
            FilterField::AcademicLevel => {
                let raw = expect_str(field, value)?;
                let level = AcademicLevel::resolve(raw).ok_or_else(|| {
                    SearchError::invalid_filter(field.as_str(), raw, "unknown academic level")
                })?;
                Predicate::Exact {
                    value: level.key().to_string(),
                }
            }
            FilterField::Attributes | FilterField::RequirementDesignations => {
                let raws = expect_str_list(field, value)?;
                let resolved = raws
                    .iter()
                    .map(|raw| resolve_vocab_value(field, raw, vocab))
                    .collect::<SearchResult<Vec<String>>>()?;
                Predicate::AnyOf { values: resolved }
            }
            FilterField::Credits => {
                let credits = value.as_f64().ok_or_else(|| {
                    SearchError::invalid_filter(
                        field.as_str(),
                        value.to_string(),
                        "expected a number of credit hours",
                    )
                })?;
                Predicate::Exact {
                    value: format!("{credits}"),
                }
            }
            FilterField::MeetingTime => resolve_meeting_time(expect_str(field, value)?)?,
            FilterField::HasOpenSeats => {
                let flag = value.as_bool().ok_or_else(|| {
                    SearchError::invalid_filter(
                        field.as_str(),
                        value.to_string(),
                        "expected true or false",
                    )
                })?;
                Predicate::Flag { value: flag }
            }
            FilterField::Keyword => {
                let raw = expect_str(field, value)?.trim();
                if raw.len() <= 2 {
                    return Err(SearchError::invalid_filter(
                        field.as_str(),
                        raw,
                        "search query must be more than 2 characters",
                    ));
                }
                Predicate::Text {
                    value: raw.to_string(),
                }
            }
        };
        predicates.insert(field, predicate);
    }

    Ok(predicates)
}

fn expect_str<'v>(field: FilterField, value: &'v Value) -> SearchResult<&'v str> {
    value.as_str().ok_or_else(|| {
        SearchError::invalid_filter(field.as_str(), value.to_string(), "expected a string")
    })
}

fn expect_str_list(field: FilterField, value: &Value) -> SearchResult<Vec<String>> {
    match value {
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    SearchError::invalid_filter(
                        field.as_str(),
                        item.to_string(),
                        "expected a string",
                    )
                })
            })
            .collect(),
        other => Err(SearchError::invalid_filter(
            field.as_str(),
            other.to_string(),
            "expected a string or array of strings",
        )),
    }
}

/// Resolve a department name or code to its canonical subject code.
///
/// Order: exact code, exact full-name synonym, fuzzy match against both.
/// Several candidates inside the ambiguity band fail with
/// `AmbiguousFilterValue` — the engine never guesses between peers.
pub fn resolve_subject(raw: &str, vocab: &VocabSnapshot) -> SearchResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SearchError::invalid_filter(
            "subject",
            raw,
            "must not be empty",
        ));
    }
    let lower = trimmed.to_lowercase();
    let codes = vocab.values_for(FilterField::Subject);

    if let Some(code) = codes.iter().find(|c| c.eq_ignore_ascii_case(trimmed)) {
        return Ok(code.clone());
    }
    if let Some(code) = vocab.subject_for_name(&lower) {
        if codes.is_empty() || codes.iter().any(|c| c == code) {
            return Ok(code.to_string());
        }
    }
    // Vocabulary not yet refreshed: pass the code through uppercased and
    // let the index decide.
    if codes.is_empty() {
        return Ok(trimmed.to_uppercase());
    }

    let mut scored: Vec<(String, f64)> = Vec::new();
    for code in codes {
        scored.push((code.clone(), jaro_winkler(&lower, &code.to_lowercase())));
    }
    for (name, code) in vocab.subject_name_entries() {
        if codes.iter().any(|c| c == code) {
            scored.push((code.to_string(), jaro_winkler(&lower, name)));
        }
    }
    // Keep the best score per candidate code.
    scored.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.total_cmp(&a.1)));
    scored.dedup_by(|a, b| a.0 == b.0);
    scored.retain(|(_, score)| *score >= SUBJECT_FUZZY_THRESHOLD);
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    match scored.as_slice() {
        [] => Err(SearchError::invalid_filter(
            "subject",
            trimmed,
            "no matching subject; use get_filter_options to see available subjects",
        )),
        [(best, _)] => Ok(best.clone()),
        [(best, best_score), rest @ ..] => {
            let mut candidates = vec![best.clone()];
            candidates.extend(
                rest.iter()
                    .take_while(|(_, s)| best_score - s <= AMBIGUITY_BAND)
                    .map(|(c, _)| c.clone()),
            );
            if candidates.len() > 1 {
                Err(SearchError::AmbiguousFilterValue {
                    field: "subject".into(),
                    value: trimmed.to_string(),
                    candidates,
                })
            } else {
                Ok(best.clone())
            }
        }
    }
}

/// Catalog numbers accept a single trailing `*` wildcard meaning "this
/// digit prefix, any suffix".
pub fn resolve_catalog(raw: &str) -> SearchResult<Predicate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SearchError::invalid_filter(
            "catalogNumber",
            raw,
            "must not be empty",
        ));
    }
    match trimmed.find('*') {
        None => Ok(Predicate::Exact {
            value: trimmed.to_uppercase(),
        }),
        Some(pos) if pos == trimmed.len() - 1 => {
            let prefix = &trimmed[..pos];
            if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
                return Err(SearchError::invalid_filter(
                    "catalogNumber",
                    trimmed,
                    "wildcard prefix must be a digit sequence",
                ));
            }
            Ok(Predicate::Prefix {
                value: prefix.to_string(),
            })
        }
        Some(_) => Err(SearchError::invalid_filter(
            "catalogNumber",
            trimmed,
            "wildcard may only appear as the final character",
        )),
    }
}

fn resolve_instructor(raw: &str) -> SearchResult<Predicate> {
    let tokens: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
    if raw.trim().len() < 2 || tokens.is_empty() {
        return Err(SearchError::invalid_filter(
            "instructor",
            raw,
            "instructor name must be at least 2 characters",
        ));
    }
    Ok(Predicate::AnyOf { values: tokens })
}

/// Informal buckets map to fixed minute ranges; literal
/// `"start-end"` clock ranges pass through unchanged.
pub fn resolve_meeting_time(raw: &str) -> SearchResult<Predicate> {
    let (start, end) = match raw.trim().to_lowercase().as_str() {
        "morning" => MORNING,
        "afternoon" => AFTERNOON,
        "evening" => EVENING,
        literal => {
            let (from, to) = literal.split_once('-').ok_or_else(|| {
                SearchError::invalid_filter(
                    "meetingTime",
                    raw,
                    "expected morning, afternoon, evening, or a start-end time range",
                )
            })?;
            let start = parse_clock(from).ok_or_else(|| {
                SearchError::invalid_filter("meetingTime", from, "unparseable start time")
            })?;
            let end = parse_clock(to).ok_or_else(|| {
                SearchError::invalid_filter("meetingTime", to, "unparseable end time")
            })?;
            if start >= end {
                return Err(SearchError::invalid_filter(
                    "meetingTime",
                    raw,
                    "start time must be before end time",
                ));
            }
            (start, end)
        }
    };
    Ok(Predicate::StartsWithin { start, end })
}

/// Resolve an attribute or requirement-designation value against the
/// canonical vocabulary: exact match, then keyword table, then unique
/// substring containment.
fn resolve_vocab_value(
    field: FilterField,
    raw: &str,
    vocab: &VocabSnapshot,
) -> SearchResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SearchError::invalid_filter(
            field.as_str(),
            raw,
            "must not be empty",
        ));
    }
    let canonical = vocab.values_for(field);
    if let Some(hit) = canonical.iter().find(|v| v.eq_ignore_ascii_case(trimmed)) {
        return Ok(hit.clone());
    }
    let lower = trimmed.to_lowercase();
    if let Some(mappings) = vocab.keyword_mappings(&crate::vocab::normalize_keyword(trimmed)) {
        if let Some(mapping) = mappings.iter().find(|m| m.field == field) {
            return Ok(mapping.value.clone());
        }
    }
    if canonical.is_empty() {
        // Not yet refreshed; defer to the index.
        return Ok(trimmed.to_string());
    }
    let contained: Vec<&String> = canonical
        .iter()
        .filter(|v| v.to_lowercase().contains(&lower))
        .collect();
    match contained.as_slice() {
        [] => Err(SearchError::invalid_filter(
            field.as_str(),
            trimmed,
            "no matching canonical value",
        )),
        [only] => Ok((*only).clone()),
        many => Err(SearchError::AmbiguousFilterValue {
            field: field.as_str().into(),
            value: trimmed.to_string(),
            candidates: many.iter().map(|v| (*v).clone()).collect(),
        }),
    }
}
