//! get_filter_options — enumerate the canonical values of one field.

use async_trait::async_trait;
use serde_json::json;

use crate::discovery;
use crate::error::{SearchError, SearchResult};
use crate::index::FilterField;
use crate::tools::args_object;
use crate::types::{SectionTool, ToolContext, ToolResult};

pub struct GetFilterOptions;

#[async_trait]
impl SectionTool for GetFilterOptions {
    fn name(&self) -> &str {
        "get_filter_options"
    }

    fn description(&self) -> &str {
        "List the canonical values available for one filterable field"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "field": {
                    "type": "string",
                    "description": "Field to enumerate: subject, instructionMode, academicLevel, attributes, or requirementDesignations"
                }
            },
            "required": ["field"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> SearchResult<ToolResult> {
        let args = args_object(&args)?;
        let raw = args
            .get("field")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                SearchError::invalid_filter("field", "", "required string argument")
            })?;
        let field = FilterField::parse(raw).ok_or_else(|| {
            SearchError::invalid_filter("field", raw, "unknown filter field")
        })?;

        let snapshot = ctx.vocab.snapshot();
        let mut values = discovery::list_values(field, &snapshot)?;

        // Snapshot not yet refreshed for this field: one bounded
        // round-trip straight to the index's distinct values.
        if values.is_empty() {
            values = ctx.index.distinct_values(field).await?;
        }

        let summary = format!("{} has {} available value(s)", field, values.len());
        let data = json!({
            "field": field,
            "optionCount": values.len(),
            "options": values,
        });
        Ok(ToolResult::success(self.name(), data, summary))
    }
}
