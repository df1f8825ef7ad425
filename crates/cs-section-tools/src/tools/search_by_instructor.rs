//! search_by_instructor — all sections taught by a matching instructor.

use async_trait::async_trait;
use serde_json::json;

use cs_protocol::TermCode;

use crate::error::{SearchError, SearchResult};
use crate::index::{FilterField, Predicate, PredicateSet, SearchQuery};
use crate::tools::{args_object, page_payload, parse_page};
use crate::types::{SectionTool, ToolContext, ToolResult};

pub struct SearchByInstructor;

#[async_trait]
impl SectionTool for SearchByInstructor {
    fn name(&self) -> &str {
        "search_by_instructor"
    }

    fn description(&self) -> &str {
        "Find all class sections taught by an instructor matching a name fragment"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "instructorName": {
                    "type": "string",
                    "description": "Instructor first and/or last name (at least 2 characters)"
                },
                "termCode": {
                    "type": "string",
                    "description": "Optional term code to restrict the search"
                },
                "page": { "type": "integer", "default": 1 },
                "perPage": { "type": "integer", "default": 10 }
            },
            "required": ["instructorName"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> SearchResult<ToolResult> {
        let args = args_object(&args)?;
        let name = args
            .get("instructorName")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .unwrap_or_default();
        if name.len() < 2 {
            return Err(SearchError::invalid_filter(
                "instructorName",
                name,
                "instructor name must be at least 2 characters",
            ));
        }

        let mut predicates = PredicateSet::new();
        predicates.insert(
            FilterField::Instructor,
            Predicate::AnyOf {
                values: name.split_whitespace().map(str::to_string).collect(),
            },
        );
        if let Some(raw) = args.get("termCode").and_then(|v| v.as_str()) {
            let term = TermCode::parse(raw)
                .map_err(|e| SearchError::invalid_filter("termCode", raw, e.to_string()))?;
            predicates.insert(FilterField::Term, Predicate::Exact { value: term.code() });
        }

        let query = SearchQuery {
            predicates,
            page: parse_page(&args)?,
            sort: Default::default(),
        };
        let page = ctx.index.search(&query).await?;
        let summary = if page.total_hits == 0 {
            format!("No classes found for instructor matching '{name}'")
        } else {
            format!("Found {} classes taught by '{name}'", page.total_hits)
        };
        let mut data = page_payload(&page);
        data["instructorQuery"] = json!(name);
        Ok(ToolResult::success(self.name(), data, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSearchIndex;
    use crate::vocab::VocabularyStore;

    #[tokio::test]
    async fn finds_by_last_name() {
        let index = MockSearchIndex::with_sample_catalog();
        let vocab = VocabularyStore::with_sample_values();
        let ctx = ToolContext {
            index: &index,
            vocab: &vocab,
        };

        let result = SearchByInstructor
            .execute(
                json!({"instructorName": "Hopper", "termCode": "1263"}),
                &ctx,
            )
            .await
            .unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["totalHits"], 2); // CS 121-002 and CS 321-001
    }

    #[tokio::test]
    async fn either_token_matches() {
        let index = MockSearchIndex::with_sample_catalog();
        let vocab = VocabularyStore::with_sample_values();
        let ctx = ToolContext {
            index: &index,
            vocab: &vocab,
        };

        // "Ada Noether" matches both Ada Lovelace and Emmy Noether.
        let result = SearchByInstructor
            .execute(
                json!({"instructorName": "Ada Noether", "termCode": "1263"}),
                &ctx,
            )
            .await
            .unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["totalHits"], 2); // CS 121-001 and MATH 170-001
    }

    #[tokio::test]
    async fn short_name_is_rejected() {
        let index = MockSearchIndex::with_sample_catalog();
        let vocab = VocabularyStore::with_sample_values();
        let ctx = ToolContext {
            index: &index,
            vocab: &vocab,
        };

        let err = SearchByInstructor
            .execute(json!({"instructorName": "a"}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidFilterSyntax { .. }));
    }

    #[tokio::test]
    async fn no_match_is_empty_not_error() {
        let index = MockSearchIndex::with_sample_catalog();
        let vocab = VocabularyStore::with_sample_values();
        let ctx = ToolContext {
            index: &index,
            vocab: &vocab,
        };

        let result = SearchByInstructor
            .execute(json!({"instructorName": "Nobody"}), &ctx)
            .await
            .unwrap();
        assert!(result.success);
        let data = result.data.unwrap();
        assert_eq!(data["totalHits"], 0);
    }
}
