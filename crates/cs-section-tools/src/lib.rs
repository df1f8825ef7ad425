//! Class search engine for CourseScout.
//!
//! Sits between the tool-call layer and the external search index:
//! normalizes loose filter input into exact predicates, runs the
//! schedule overlap/containment math, maps informal keywords onto the
//! controlled vocabulary, and exposes the nine caller-visible tools.

pub mod discovery;
pub mod error;
pub mod index;
pub mod mock;
pub mod normalize;
pub mod schedule;
pub mod tools;
pub mod types;
pub mod vocab;

// Re-export key types for convenience
pub use error::{SearchError, SearchResult};
pub use index::{
    FilterField, HttpSearchIndex, Page, Predicate, PredicateSet, SearchIndex, SearchQuery, Sort,
    SortBy, SortDirection,
};
pub use mock::MockSearchIndex;
pub use types::{SectionTool, ToolContext, ToolResult};
pub use vocab::{VocabSnapshot, VocabularyStore};
