//! Liveness endpoint.

use axum::Json;
use serde_json::{Value, json};

/// GET /health — service liveness.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "cs-query-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
