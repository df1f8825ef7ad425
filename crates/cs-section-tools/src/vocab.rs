//! Controlled vocabulary — canonical filter values and the keyword table.
//!
//! Per-field value sets are refreshed from the index's distinct values on
//! a bounded cadence. The keyword table is maintained data, not derived:
//! informal phrasing ("gen ed", "honors") cannot be inferred from the
//! indexed values themselves.
//!
//! Readers always see a complete snapshot — refresh builds a new
//! `VocabSnapshot` and swaps the `Arc`, never mutating in place.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SearchResult;
use crate::index::{FilterField, SearchIndex};

/// Default refresh cadence; staleness up to one interval is accepted.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// One discovery mapping: an informal keyword points at a canonical
/// filter value with a relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMapping {
    pub field: FilterField,
    pub value: String,
    pub score: f64,
}

/// An immutable vocabulary snapshot.
#[derive(Debug, Clone, Default)]
pub struct VocabSnapshot {
    /// Canonical values per enumerable field, as stored in the index.
    values: BTreeMap<FilterField, Vec<String>>,
    /// Maintained keyword → ranked canonical mappings table.
    keywords: HashMap<String, Vec<KeywordMapping>>,
    /// Lowercased department name → canonical subject code.
    subject_names: HashMap<String, String>,
    /// When the value sets were last rebuilt from the index.
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Lowercase, trim, and collapse internal whitespace.
pub fn normalize_keyword(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl VocabSnapshot {
    /// The compiled-in tables: subject synonyms and the keyword map.
    /// Field value sets start empty until the first refresh.
    pub fn builtin() -> Self {
        let subject_names: HashMap<String, String> = [
            ("computer science", "CS"),
            ("mathematics", "MATH"),
            ("biology", "BIOL"),
            ("chemistry", "CHEM"),
            ("physics", "PHYS"),
            ("english", "ENGL"),
            ("history", "HIST"),
            ("psychology", "PSYC"),
            ("economics", "ECON"),
            ("political science", "POLS"),
            ("sociology", "SOC"),
            ("philosophy", "PHIL"),
            ("engineering", "ENGR"),
            ("music", "MUS"),
            ("art", "ART"),
            ("business", "BUS"),
            ("accounting", "ACCT"),
            ("marketing", "MKTG"),
            ("management", "MGT"),
            ("finance", "FIN"),
            ("communication", "COMM"),
            ("nursing", "NURS"),
            ("education", "EDUC"),
            ("kinesiology", "KINES"),
        ]
        .into_iter()
        .map(|(name, code)| (name.to_string(), code.to_string()))
        .collect();

        let mut keywords: HashMap<String, Vec<KeywordMapping>> = HashMap::new();
        let mut add = |keyword: &str, field: FilterField, value: &str, score: f64| {
            keywords
                .entry(normalize_keyword(keyword))
                .or_default()
                .push(KeywordMapping {
                    field,
                    value: value.to_string(),
                    score,
                });
        };

        add("honors", FilterField::RequirementDesignations, "HON", 1.0);
        add(
            "service learning",
            FilterField::RequirementDesignations,
            "SERV",
            1.0,
        );
        for keyword in ["gen ed", "gen-ed", "general education"] {
            add(
                keyword,
                FilterField::Attributes,
                "Foundations of Humanities",
                0.9,
            );
            add(
                keyword,
                FilterField::Attributes,
                "Foundations of Social Sciences",
                0.9,
            );
            add(
                keyword,
                FilterField::Attributes,
                "Foundations of Mathematics",
                0.9,
            );
        }
        add("writing", FilterField::Attributes, "Foundations of Writing", 0.95);
        add(
            "quantitative",
            FilterField::Attributes,
            "Foundations of Mathematics",
            0.9,
        );
        add("online", FilterField::InstructionMode, "online", 1.0);
        add("in person", FilterField::InstructionMode, "in_person", 1.0);
        add("face to face", FilterField::InstructionMode, "in_person", 0.9);
        add("hybrid", FilterField::InstructionMode, "hybrid", 1.0);
        add("asynchronous", FilterField::InstructionMode, "online", 0.8);
        add("night", FilterField::MeetingTime, "evening", 0.9);
        add("grad", FilterField::AcademicLevel, "graduate", 1.0);
        add("undergrad", FilterField::AcademicLevel, "undergraduate", 1.0);

        for mappings in keywords.values_mut() {
            mappings.sort_by(|a, b| b.score.total_cmp(&a.score));
        }

        Self {
            values: BTreeMap::new(),
            keywords,
            subject_names,
            refreshed_at: None,
        }
    }

    /// A snapshot pre-populated with a small campus vocabulary, matching
    /// the mock index catalog. Test and development constructor.
    pub fn with_sample_values() -> Self {
        let mut snapshot = Self::builtin();
        snapshot.set_values(
            FilterField::Subject,
            ["ACCT", "BIOL", "CS", "ENGL", "HIST", "MATH", "PSYC"],
        );
        snapshot.set_values(
            FilterField::InstructionMode,
            ["hybrid", "in_person", "online", "remote"],
        );
        snapshot.set_values(
            FilterField::AcademicLevel,
            ["graduate", "undergraduate"],
        );
        snapshot.set_values(
            FilterField::Attributes,
            [
                "Foundations of Arts",
                "Foundations of Humanities",
                "Foundations of Mathematics",
                "Foundations of Natural Sciences",
                "Foundations of Social Sciences",
                "Foundations of Writing",
            ],
        );
        snapshot.set_values(FilterField::RequirementDesignations, ["HON", "SERV"]);
        snapshot.refreshed_at = Some(Utc::now());
        snapshot
    }

    pub(crate) fn set_values<I, S>(&mut self, field: FilterField, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values: Vec<String> = values.into_iter().map(Into::into).collect();
        values.sort();
        self.values.insert(field, values);
    }

    /// Canonical values for one field; empty slice when unrefreshed.
    pub fn values_for(&self, field: FilterField) -> &[String] {
        self.values.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Exact keyword-table lookup (input already normalized by caller).
    pub fn keyword_mappings(&self, keyword: &str) -> Option<&[KeywordMapping]> {
        self.keywords.get(keyword).map(Vec::as_slice)
    }

    /// Canonical subject code for a lowercased department name.
    pub fn subject_for_name(&self, name: &str) -> Option<&str> {
        self.subject_names.get(name).map(String::as_str)
    }

    /// (name, code) pairs, for fuzzy scans.
    pub fn subject_name_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.subject_names
            .iter()
            .map(|(name, code)| (name.as_str(), code.as_str()))
    }
}

/// Process-wide vocabulary holder.
///
/// The only shared mutable state in the engine. `refresh` builds a fresh
/// snapshot and swaps the inner `Arc`; readers clone the `Arc` and are
/// never exposed to a partially-updated vocabulary.
pub struct VocabularyStore {
    snapshot: RwLock<Arc<VocabSnapshot>>,
    refresh_interval: Duration,
}

impl VocabularyStore {
    pub fn new(refresh_interval: Duration) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(VocabSnapshot::builtin())),
            refresh_interval,
        }
    }

    pub fn with_snapshot(snapshot: VocabSnapshot, refresh_interval: Duration) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            refresh_interval,
        }
    }

    /// Test/development constructor with the sample campus vocabulary.
    pub fn with_sample_values() -> Self {
        Self::with_snapshot(VocabSnapshot::with_sample_values(), DEFAULT_REFRESH_INTERVAL)
    }

    /// Current snapshot. Cheap: clones an `Arc`.
    pub fn snapshot(&self) -> Arc<VocabSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Whether the value sets are due for a rebuild.
    pub fn is_stale(&self) -> bool {
        match self.snapshot().refreshed_at {
            None => true,
            Some(at) => {
                let age = Utc::now().signed_duration_since(at);
                age.to_std().map_or(true, |age| age >= self.refresh_interval)
            }
        }
    }

    /// Rebuild the per-field value sets from the index and swap the
    /// snapshot in one step. The keyword and synonym tables carry over.
    pub async fn refresh(&self, index: &dyn SearchIndex) -> SearchResult<()> {
        let mut next = VocabSnapshot::builtin();
        for field in FilterField::ENUMERABLE {
            let values = index.distinct_values(field).await?;
            next.set_values(field, values);
        }
        next.refreshed_at = Some(Utc::now());

        let count: usize = FilterField::ENUMERABLE
            .iter()
            .map(|f| next.values_for(*f).len())
            .sum();
        tracing::info!(values = count, "vocabulary refreshed");

        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(next);
        Ok(())
    }
}

impl Default for VocabularyStore {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL)
    }
}
