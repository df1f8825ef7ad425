//! The SectionTool trait and its execution types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SearchResult;
use crate::index::SearchIndex;
use crate::vocab::VocabularyStore;

/// Collaborators a tool executes against: the external search index and
/// the shared vocabulary store.
pub struct ToolContext<'a> {
    pub index: &'a dyn SearchIndex,
    pub vocab: &'a VocabularyStore,
}

/// Result of executing a section search tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool name that produced this result.
    pub tool_name: String,
    /// Whether the tool execution succeeded.
    pub success: bool,
    /// Structured result data (JSON).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Human-readable summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Error message if success is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(
        tool_name: impl Into<String>,
        data: serde_json::Value,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            data: Some(data),
            summary: Some(summary.into()),
            error: None,
        }
    }

    pub fn failure(tool_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            data: None,
            summary: None,
            error: Some(error.into()),
        }
    }
}

/// Trait for class search tools.
///
/// One implementation per caller-visible operation; the registry in the
/// API crate dispatches by `name()`.
#[async_trait]
pub trait SectionTool: Send + Sync {
    /// Tool name (e.g., "search_classes").
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema describing accepted arguments.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with JSON arguments against the context.
    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> SearchResult<ToolResult>;
}
