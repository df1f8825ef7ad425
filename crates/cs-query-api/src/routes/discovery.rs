//! Discovery endpoints — keyword suggestion and filter value listing.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::json;

use cs_section_tools::types::ToolResult;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    keyword: String,
}

/// GET /api/v1/filters/suggest?keyword= — canonical values a keyword
/// plausibly refers to.
pub async fn suggest_values(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> ApiResult<Json<ToolResult>> {
    let ctx = state.tool_context();
    let result = state
        .tools
        .execute(
            "suggest_filter_values",
            json!({"keyword": query.keyword}),
            &ctx,
        )
        .await?;
    Ok(Json(result))
}

/// GET /api/v1/filters/:field — the canonical value set for one field.
pub async fn filter_options(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> ApiResult<Json<ToolResult>> {
    let ctx = state.tool_context();
    let result = state
        .tools
        .execute("get_filter_options", json!({"field": field}), &ctx)
        .await?;
    Ok(Json(result))
}
