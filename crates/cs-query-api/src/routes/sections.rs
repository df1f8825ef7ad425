//! Course and section lookup endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::json;

use cs_protocol::TermCode;
use cs_section_tools::types::ToolResult;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermQuery {
    term_code: String,
}

/// GET /api/v1/courses/:subject/:catalog/sections?termCode= — all
/// sections of one course in a term, ordered by section number.
pub async fn compare_sections(
    State(state): State<AppState>,
    Path((subject, catalog)): Path<(String, String)>,
    Query(query): Query<TermQuery>,
) -> ApiResult<Json<ToolResult>> {
    let args = json!({
        "subject": subject,
        "catalogNumber": catalog,
        "termCode": query.term_code,
    });
    let ctx = state.tool_context();
    let result = state.tools.execute("compare_sections", args, &ctx).await?;
    Ok(Json(result))
}

/// Parse and validate the term path segment; the class number must also
/// belong to that term or the lookup is a miss.
fn validate_term(raw: &str) -> ApiResult<TermCode> {
    TermCode::parse(raw).map_err(|e| ApiError::InvalidFilter {
        field: "termCode".into(),
        value: raw.to_string(),
        message: e.to_string(),
    })
}

fn ensure_term_matches(result: &ToolResult, term: TermCode, class_number: u32) -> ApiResult<()> {
    let section_term = result
        .data
        .as_ref()
        .and_then(|d| d["term"].as_str())
        .unwrap_or_default()
        .to_string();
    if section_term != term.code() {
        return Err(ApiError::NotFound(format!(
            "class number {class_number} in term {}",
            term.code()
        )));
    }
    Ok(())
}

/// GET /api/v1/classes/:term/:class_number — full section details.
pub async fn get_class_details(
    State(state): State<AppState>,
    Path((term, class_number)): Path<(String, u32)>,
) -> ApiResult<Json<ToolResult>> {
    let term = validate_term(&term)?;
    let ctx = state.tool_context();
    let result = state
        .tools
        .execute("get_class_details", json!({"classNumber": class_number}), &ctx)
        .await?;
    ensure_term_matches(&result, term, class_number)?;
    Ok(Json(result))
}

/// GET /api/v1/classes/:term/:class_number/availability — seat status.
pub async fn check_availability(
    State(state): State<AppState>,
    Path((term, class_number)): Path<(String, u32)>,
) -> ApiResult<Json<ToolResult>> {
    let term = validate_term(&term)?;
    let ctx = state.tool_context();
    let result = state
        .tools
        .execute("check_availability", json!({"classNumber": class_number}), &ctx)
        .await?;
    ensure_term_matches(&result, term, class_number)?;
    Ok(Json(result))
}
