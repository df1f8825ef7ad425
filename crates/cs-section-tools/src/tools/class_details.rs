//! get_class_details — single-section lookup by registration id.

use async_trait::async_trait;
use serde_json::json;

use crate::error::{SearchError, SearchResult};
use crate::tools::{args_object, summarize_section};
use crate::types::{SectionTool, ToolContext, ToolResult};

pub struct GetClassDetails;

#[async_trait]
impl SectionTool for GetClassDetails {
    fn name(&self) -> &str {
        "get_class_details"
    }

    fn description(&self) -> &str {
        "Get full details for one class section by its class number"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "classNumber": {
                    "type": "integer",
                    "description": "Unique registration id of the section"
                }
            },
            "required": ["classNumber"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> SearchResult<ToolResult> {
        let args = args_object(&args)?;
        let class_number = parse_class_number(&args)?;

        let section = ctx.index.fetch(class_number).await?;
        let summary = summarize_section(&section);
        let data = json!({
            "term": section.term.code(),
            "termDescription": section.term.describe(),
            "availability": section.availability(),
            "section": section,
        });
        Ok(ToolResult::success(self.name(), data, summary))
    }
}

pub(crate) fn parse_class_number(
    args: &serde_json::Map<String, serde_json::Value>,
) -> SearchResult<u32> {
    let value = args.get("classNumber").ok_or_else(|| {
        SearchError::invalid_filter("classNumber", "", "required integer argument")
    })?;
    // Accept both a JSON integer and a numeric string.
    let number = match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    number
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            SearchError::invalid_filter(
                "classNumber",
                value.to_string(),
                "expected a class number",
            )
        })
}
