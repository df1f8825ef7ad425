//! Shared application state for the Axum server.
//!
//! Supports two modes:
//! - **HTTP index mode**: talks to the external search index (production).
//! - **Mock catalog mode**: serves the in-memory sample catalog (tests
//!   and development).

use std::sync::Arc;
use std::time::Duration;

use cs_section_tools::index::{HttpSearchIndex, SearchIndex};
use cs_section_tools::mock::MockSearchIndex;
use cs_section_tools::types::ToolContext;
use cs_section_tools::vocab::VocabularyStore;

use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::registry::ToolRegistry;

/// Shared application state, wrapped in `Arc` for Axum handler sharing.
#[derive(Clone)]
pub struct AppState {
    /// The external search index collaborator.
    pub index: Arc<dyn SearchIndex>,
    /// Shared vocabulary store (snapshot-swapped by the refresh task).
    pub vocab: Arc<VocabularyStore>,
    /// The nine section tools, dispatchable by name.
    pub tools: Arc<ToolRegistry>,
}

impl AppState {
    /// Create state over an arbitrary index implementation.
    pub fn with_index(index: Arc<dyn SearchIndex>, vocab: VocabularyStore) -> Self {
        Self {
            index,
            vocab: Arc::new(vocab),
            tools: Arc::new(ToolRegistry::with_defaults()),
        }
    }

    /// Create state backed by the external HTTP index.
    pub fn with_http_index(config: &ApiConfig, base_url: &str) -> ApiResult<Self> {
        let index = HttpSearchIndex::new(base_url, Duration::from_secs(config.index_timeout_secs))
            .map_err(crate::error::ApiError::from)?;
        let vocab = VocabularyStore::new(Duration::from_secs(config.vocab_refresh_secs));
        Ok(Self::with_index(Arc::new(index), vocab))
    }

    /// Create state over the in-memory sample catalog (for tests and
    /// development without a reachable index).
    pub fn with_mock_catalog() -> Self {
        Self::with_index(
            Arc::new(MockSearchIndex::with_sample_catalog()),
            VocabularyStore::with_sample_values(),
        )
    }

    /// Tool execution context borrowing this state's collaborators.
    pub fn tool_context(&self) -> ToolContext<'_> {
        ToolContext {
            index: self.index.as_ref(),
            vocab: &self.vocab,
        }
    }
}
