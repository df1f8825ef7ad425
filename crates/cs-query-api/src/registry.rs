//! Tool registry — name-indexed dispatch over the section tools.
//!
//! This is the tool-call surface: a calling agent lists the registered
//! tools (with their JSON parameter schemas) and invokes them by name.

use std::collections::HashMap;

use cs_section_tools::error::{SearchError, SearchResult};
use cs_section_tools::types::{SectionTool, ToolContext, ToolResult};

/// Metadata about a registered tool (used by the tool listing route).
#[derive(Debug, serde::Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub schema: serde_json::Value,
}

/// Name-indexed registry over the section tools.
pub struct ToolRegistry {
    tools: Vec<Box<dyn SectionTool>>,
    /// Map from tool name → index into `tools`.
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Box<dyn SectionTool>>) -> Self {
        let index = tools
            .iter()
            .enumerate()
            .map(|(i, tool)| (tool.name().to_string(), i))
            .collect();
        Self { tools, index }
    }

    /// Build with the full set of section tools.
    pub fn with_defaults() -> Self {
        Self::new(cs_section_tools::tools::all_tools())
    }

    /// Execute a tool by name. Unknown names surface as `NotFound`.
    pub async fn execute(
        &self,
        name: &str,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> SearchResult<ToolResult> {
        let i = *self
            .index
            .get(name)
            .ok_or_else(|| SearchError::NotFound(format!("tool '{name}'")))?;
        self.tools[i].execute(args, ctx).await
    }

    /// List all registered tools with metadata.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|tool| ToolInfo {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                schema: tool.parameters_schema(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_section_tools::mock::MockSearchIndex;
    use cs_section_tools::vocab::VocabularyStore;

    #[test]
    fn registry_with_defaults() {
        let reg = ToolRegistry::with_defaults();
        assert_eq!(reg.len(), 9);
    }

    #[test]
    fn list_tools_has_all() {
        let reg = ToolRegistry::with_defaults();
        let tools = reg.list_tools();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&"search_classes"));
        assert!(names.contains(&"find_classes_by_schedule"));
        assert!(names.contains(&"check_schedule_conflicts"));
        assert!(names.contains(&"search_by_instructor"));
        assert!(names.contains(&"compare_sections"));
        assert!(names.contains(&"get_class_details"));
        assert!(names.contains(&"check_availability"));
        assert!(names.contains(&"suggest_filter_values"));
        assert!(names.contains(&"get_filter_options"));
    }

    #[tokio::test]
    async fn dispatch_by_name() {
        let reg = ToolRegistry::with_defaults();
        let index = MockSearchIndex::with_sample_catalog();
        let vocab = VocabularyStore::with_sample_values();
        let ctx = ToolContext {
            index: &index,
            vocab: &vocab,
        };

        let result = reg
            .execute(
                "check_availability",
                serde_json::json!({"classNumber": 10421}),
                &ctx,
            )
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.tool_name, "check_availability");
    }

    #[tokio::test]
    async fn unknown_tool_is_not_found() {
        let reg = ToolRegistry::with_defaults();
        let index = MockSearchIndex::new();
        let vocab = VocabularyStore::with_sample_values();
        let ctx = ToolContext {
            index: &index,
            vocab: &vocab,
        };

        let err = reg
            .execute("register_for_class", serde_json::json!({}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::NotFound(_)));
    }
}
