//! Search endpoints — thin wrappers over the search-style tools.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::json;

use cs_section_tools::types::ToolResult;

use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/v1/search — filtered section search.
pub async fn search_classes(
    State(state): State<AppState>,
    Json(args): Json<serde_json::Value>,
) -> ApiResult<Json<ToolResult>> {
    let ctx = state.tool_context();
    let result = state.tools.execute("search_classes", args, &ctx).await?;
    Ok(Json(result))
}

/// POST /api/v1/search/by-schedule — sections fitting the free windows.
pub async fn find_by_schedule(
    State(state): State<AppState>,
    Json(args): Json<serde_json::Value>,
) -> ApiResult<Json<ToolResult>> {
    let ctx = state.tool_context();
    let result = state
        .tools
        .execute("find_classes_by_schedule", args, &ctx)
        .await?;
    Ok(Json(result))
}

/// POST /api/v1/search/conflicts — sections clear of the busy blocks.
pub async fn check_conflicts(
    State(state): State<AppState>,
    Json(args): Json<serde_json::Value>,
) -> ApiResult<Json<ToolResult>> {
    let ctx = state.tool_context();
    let result = state
        .tools
        .execute("check_schedule_conflicts", args, &ctx)
        .await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorQuery {
    instructor_name: String,
    term_code: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
}

/// GET /api/v1/search/instructor — sections by instructor name fragment.
pub async fn search_by_instructor(
    State(state): State<AppState>,
    Query(query): Query<InstructorQuery>,
) -> ApiResult<Json<ToolResult>> {
    let mut args = json!({ "instructorName": query.instructor_name });
    if let Some(term) = query.term_code {
        args["termCode"] = json!(term);
    }
    if let Some(page) = query.page {
        args["page"] = json!(page);
    }
    if let Some(per_page) = query.per_page {
        args["perPage"] = json!(per_page);
    }

    let ctx = state.tool_context();
    let result = state
        .tools
        .execute("search_by_instructor", args, &ctx)
        .await?;
    Ok(Json(result))
}
