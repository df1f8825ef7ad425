//! Tool-call surface: list registered tools, invoke one by name.

use axum::Json;
use axum::extract::{Path, State};

use cs_section_tools::types::ToolResult;

use crate::error::ApiResult;
use crate::registry::ToolInfo;
use crate::state::AppState;

/// GET /api/v1/tools — list all tools with their parameter schemas.
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolInfo>> {
    Json(state.tools.list_tools())
}

/// POST /api/v1/tools/:name — invoke a tool with a JSON argument object.
pub async fn invoke_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(args): Json<serde_json::Value>,
) -> ApiResult<Json<ToolResult>> {
    tracing::info!(tool = %name, "tool invocation");
    let ctx = state.tool_context();
    let result = state.tools.execute(&name, args, &ctx).await?;
    Ok(Json(result))
}
