//! Search index abstraction — the engine's only external collaborator.
//!
//! `SearchIndex` trait with `search`/`fetch`/`distinct_values`. Two impls:
//! - `HttpSearchIndex` — talks to the managed index over HTTP
//! - `MockSearchIndex` — in-memory catalog for tests (in `mock.rs`)
//!
//! The engine never approximates a numeric or enum field; only `Text`
//! predicates use the index's relevance scoring.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use cs_protocol::{ClassSection, SectionPage};

use crate::error::{SearchError, SearchResult};

/// Default page size when the caller does not specify one.
pub const DEFAULT_PER_PAGE: u32 = 10;
/// Hard cap; larger requests are clamped, not rejected.
pub const MAX_PER_PAGE: u32 = 50;

// ── Filter fields ─────────────────────────────────────────────

/// Filterable document fields, in discovery-priority order.
///
/// Declaration order matters — `#[derive(Ord)]` uses it for the
/// tie-break in discovery ranking (attributes first) and for the
/// deterministic predicate ordering in [`PredicateSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    Attributes,
    RequirementDesignations,
    Subject,
    InstructionMode,
    AcademicLevel,
    Term,
    CatalogNumber,
    Instructor,
    Credits,
    MeetingTime,
    HasOpenSeats,
    Keyword,
}

impl FilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attributes => "attributes",
            Self::RequirementDesignations => "requirementDesignations",
            Self::Subject => "subject",
            Self::InstructionMode => "instructionMode",
            Self::AcademicLevel => "academicLevel",
            Self::Term => "termCode",
            Self::CatalogNumber => "catalogNumber",
            Self::Instructor => "instructor",
            Self::Credits => "credits",
            Self::MeetingTime => "meetingTime",
            Self::HasOpenSeats => "hasOpenSeats",
            Self::Keyword => "query",
        }
    }

    /// Parse a caller-supplied field name, case-insensitive, accepting
    /// both camelCase and snake_case spellings.
    pub fn parse(raw: &str) -> Option<Self> {
        let folded: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "attributes" | "attribute" | "foundations" => Some(Self::Attributes),
            "requirementdesignations" | "requirementdesignation" => {
                Some(Self::RequirementDesignations)
            }
            "subject" | "subjectcode" => Some(Self::Subject),
            "instructionmode" => Some(Self::InstructionMode),
            "academiclevel" => Some(Self::AcademicLevel),
            "termcode" | "term" => Some(Self::Term),
            "catalognumber" => Some(Self::CatalogNumber),
            "instructor" => Some(Self::Instructor),
            "credits" => Some(Self::Credits),
            "meetingtime" => Some(Self::MeetingTime),
            "hasopenseats" => Some(Self::HasOpenSeats),
            "query" | "keyword" => Some(Self::Keyword),
            _ => None,
        }
    }

    /// Fields whose canonical value sets can be enumerated from the index
    /// (and therefore cached in the vocabulary and listed to callers).
    pub fn is_enumerable(&self) -> bool {
        matches!(
            self,
            Self::Attributes
                | Self::RequirementDesignations
                | Self::Subject
                | Self::InstructionMode
                | Self::AcademicLevel
        )
    }

    pub const ENUMERABLE: [FilterField; 5] = [
        FilterField::Attributes,
        FilterField::RequirementDesignations,
        FilterField::Subject,
        FilterField::InstructionMode,
        FilterField::AcademicLevel,
    ];
}

impl std::fmt::Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Predicates ────────────────────────────────────────────────

/// One canonical filter in the index's native terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Predicate {
    /// Exact match on a keyword field.
    Exact { value: String },
    /// Starts-with match (wildcard catalog numbers).
    Prefix { value: String },
    /// OR across several exact values within one field.
    AnyOf { values: Vec<String> },
    /// Relevance-scored free-text match; title/keyword fields only.
    Text { value: String },
    /// Meeting blocks starting within `[start, end)` minutes of the day.
    StartsWithin { start: u16, end: u16 },
    /// Derived boolean filter (seat availability).
    Flag { value: bool },
}

/// Canonical field → predicate map produced by the normalizer.
///
/// `BTreeMap` keyed by [`FilterField`] keeps iteration order fixed, so an
/// identical filter set always produces an identical index request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredicateSet {
    fields: BTreeMap<FilterField, Predicate>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FilterField, predicate: Predicate) {
        self.fields.insert(field, predicate);
    }

    pub fn get(&self, field: FilterField) -> Option<&Predicate> {
        self.fields.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterField, &Predicate)> {
        self.fields.iter().map(|(f, p)| (*f, p))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ── Pagination & sorting ──────────────────────────────────────

/// 1-indexed pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page: u32,
    pub per_page: u32,
}

impl Page {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Clamp to the engine limits: page 0 becomes 1, oversized pages are
    /// cut to [`MAX_PER_PAGE`]. Out-of-range requests are never rejected.
    pub fn clamped(self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    CatalogNumber,
    Title,
    Enrollment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sort {
    pub by: SortBy,
    pub direction: SortDirection,
}

/// A fully-canonical search request, ready for the index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub predicates: PredicateSet,
    pub page: Page,
    pub sort: Sort,
}

// ── The index trait ───────────────────────────────────────────

/// Contract for the external search index.
///
/// Implementations must never silently return an empty result on
/// backend trouble — unreachable or malformed responses surface as
/// [`SearchError::BackendUnavailable`].
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Execute a canonical query. AND across fields, OR within a
    /// multi-valued field.
    async fn search(&self, query: &SearchQuery) -> SearchResult<SectionPage>;

    /// Single-document lookup by registration id.
    async fn fetch(&self, class_number: u32) -> SearchResult<ClassSection>;

    /// Enumerate the distinct stored values of one field.
    async fn distinct_values(&self, field: FilterField) -> SearchResult<Vec<String>>;
}

// ── HTTP implementation ───────────────────────────────────────

/// Talks to the managed search index over HTTP.
///
/// Request/response shapes follow the index service's JSON API:
/// `POST /api/search` with a filter list, `GET /api/class/{n}`,
/// `GET /api/filter-options/{field}`.
pub struct HttpSearchIndex {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponseBody {
    total_hits: u64,
    documents: Vec<ClassSection>,
}

#[derive(Debug, Deserialize)]
struct FilterOptionsBody {
    values: Vec<String>,
}

impl HttpSearchIndex {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SearchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::BackendUnavailable(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn search_body(query: &SearchQuery) -> serde_json::Value {
        let filters: Vec<serde_json::Value> = query
            .predicates
            .iter()
            .map(|(field, predicate)| {
                json!({
                    "field": field.as_str(),
                    "predicate": predicate,
                })
            })
            .collect();
        json!({
            "filters": filters,
            "page": query.page.page,
            "perPage": query.page.per_page,
            "sortBy": query.sort.by,
            "sortDirection": query.sort.direction,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> SearchResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::BackendUnavailable(e.to_string()))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SearchError::NotFound(url.to_string()));
        }
        if !response.status().is_success() {
            return Err(SearchError::BackendUnavailable(format!(
                "index returned status {}",
                response.status()
            )));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| SearchError::BackendUnavailable(format!("malformed response: {e}")))
    }
}

#[async_trait]
impl SearchIndex for HttpSearchIndex {
    async fn search(&self, query: &SearchQuery) -> SearchResult<SectionPage> {
        let url = format!("{}/api/search", self.base_url);
        let body = Self::search_body(query);
        tracing::debug!(filters = query.predicates.len(), "index search");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::BackendUnavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(SearchError::BackendUnavailable(format!(
                "index returned status {}",
                response.status()
            )));
        }
        let parsed: SearchResponseBody = response
            .json()
            .await
            .map_err(|e| SearchError::BackendUnavailable(format!("malformed response: {e}")))?;

        Ok(SectionPage {
            sections: parsed.documents,
            total_hits: parsed.total_hits,
            page: query.page.page,
            per_page: query.page.per_page,
        })
    }

    async fn fetch(&self, class_number: u32) -> SearchResult<ClassSection> {
        let url = format!("{}/api/class/{class_number}", self.base_url);
        self.get_json(&url)
            .await
            .map_err(|e| match e {
                SearchError::NotFound(_) => {
                    SearchError::NotFound(format!("class number {class_number}"))
                }
                other => other,
            })
    }

    async fn distinct_values(&self, field: FilterField) -> SearchResult<Vec<String>> {
        let url = format!("{}/api/filter-options/{}", self.base_url, field.as_str());
        let body: FilterOptionsBody = self.get_json(&url).await?;
        Ok(body.values)
    }
}
