//! suggest_filter_values — map an informal keyword to canonical filter
//! values.

use async_trait::async_trait;
use serde_json::json;

use crate::discovery;
use crate::error::SearchResult;
use crate::tools::args_object;
use crate::types::{SectionTool, ToolContext, ToolResult};

pub struct SuggestFilterValues;

#[async_trait]
impl SectionTool for SuggestFilterValues {
    fn name(&self) -> &str {
        "suggest_filter_values"
    }

    fn description(&self) -> &str {
        "Suggest which canonical filter values an informal keyword most likely refers to"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "keyword": {
                    "type": "string",
                    "description": "Informal keyword (e.g. 'gen ed', 'honors', 'online')"
                }
            },
            "required": ["keyword"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> SearchResult<ToolResult> {
        let args = args_object(&args)?;
        let keyword = args
            .get("keyword")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        let snapshot = ctx.vocab.snapshot();
        let suggestions = discovery::suggest_values(keyword, &snapshot)?;

        let summary = if suggestions.is_empty() {
            format!("No canonical filter values resemble '{}'", keyword.trim())
        } else {
            format!(
                "'{}' most likely means {}={}",
                keyword.trim(),
                suggestions[0].field,
                suggestions[0].value
            )
        };
        let data = json!({
            "keyword": keyword.trim(),
            "suggestions": suggestions,
        });
        Ok(ToolResult::success(self.name(), data, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::mock::MockSearchIndex;
    use crate::vocab::VocabularyStore;

    #[tokio::test]
    async fn keyword_table_hit() {
        let index = MockSearchIndex::with_sample_catalog();
        let vocab = VocabularyStore::with_sample_values();
        let ctx = ToolContext {
            index: &index,
            vocab: &vocab,
        };

        let result = SuggestFilterValues
            .execute(json!({"keyword": "honors"}), &ctx)
            .await
            .unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["suggestions"][0]["field"], "requirementDesignations");
        assert_eq!(data["suggestions"][0]["value"], "HON");
    }

    #[tokio::test]
    async fn blank_keyword_is_invalid() {
        let index = MockSearchIndex::with_sample_catalog();
        let vocab = VocabularyStore::with_sample_values();
        let ctx = ToolContext {
            index: &index,
            vocab: &vocab,
        };

        let err = SuggestFilterValues
            .execute(json!({"keyword": "   "}), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err, SearchError::InvalidKeyword);

        let err = SuggestFilterValues.execute(json!({}), &ctx).await.unwrap_err();
        assert_eq!(err, SearchError::InvalidKeyword);
    }

    #[tokio::test]
    async fn fuzzy_suggestion_for_department_name() {
        let index = MockSearchIndex::with_sample_catalog();
        let vocab = VocabularyStore::with_sample_values();
        let ctx = ToolContext {
            index: &index,
            vocab: &vocab,
        };

        let result = SuggestFilterValues
            .execute(json!({"keyword": "psycholgy"}), &ctx)
            .await
            .unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["suggestions"][0]["field"], "subject");
        assert_eq!(data["suggestions"][0]["value"], "PSYC");
    }
}
