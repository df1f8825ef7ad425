//! Shared test harness for E2E integration tests.
//!
//! Builds the real router over the mock index and sample vocabulary,
//! exercising real code paths across all crate boundaries.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use cs_query_api::routes::build_router;
use cs_query_api::state::AppState;
use cs_section_tools::mock::MockSearchIndex;
use cs_section_tools::vocab::VocabularyStore;

/// End-to-end test harness: the full API router over an in-memory index.
pub struct TestHarness {
    /// Application state (mock index + sample vocabulary).
    pub state: AppState,
    /// Axum router for HTTP requests via `tower::oneshot`.
    pub router: Router,
}

impl TestHarness {
    /// Harness over the sample campus catalog.
    pub fn with_sample_catalog() -> Self {
        let state = AppState::with_mock_catalog();
        let router = build_router(state.clone());
        Self { state, router }
    }

    /// Harness whose index fails every call (backend-outage scenarios).
    pub fn unavailable() -> Self {
        let state = AppState::with_index(
            Arc::new(MockSearchIndex::unavailable()),
            VocabularyStore::with_sample_values(),
        );
        let router = build_router(state.clone());
        Self { state, router }
    }

    /// GET a path. Returns (status, parsed JSON body).
    pub async fn get(&self, path: &str) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    /// POST a JSON body to a path. Returns (status, parsed JSON body).
    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::post(path)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    /// Invoke a tool through the generic dispatch route.
    pub async fn invoke_tool(
        &self,
        name: &str,
        args: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.post_json(&format!("/api/v1/tools/{name}"), &args).await
    }
}
