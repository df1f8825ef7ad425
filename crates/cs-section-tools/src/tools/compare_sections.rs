//! compare_sections — all sections of one course, side by side.

use async_trait::async_trait;
use serde_json::json;

use cs_protocol::TermCode;

use crate::error::{SearchError, SearchResult};
use crate::index::{FilterField, MAX_PER_PAGE, Page, Predicate, PredicateSet, SearchQuery};
use crate::normalize;
use crate::tools::{args_object, summarize_section};
use crate::types::{SectionTool, ToolContext, ToolResult};

pub struct CompareSections;

#[async_trait]
impl SectionTool for CompareSections {
    fn name(&self) -> &str {
        "compare_sections"
    }

    fn description(&self) -> &str {
        "List every section of one course in a term, ordered by section number, \
         for side-by-side comparison"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "subject": { "type": "string", "description": "Department code or name" },
                "catalogNumber": { "type": "string", "description": "Exact course number (no wildcard)" },
                "termCode": { "type": "string", "description": "4-digit term code" }
            },
            "required": ["subject", "catalogNumber", "termCode"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> SearchResult<ToolResult> {
        let args = args_object(&args)?;
        let subject_raw = require_str(&args, "subject")?;
        let catalog_raw = require_str(&args, "catalogNumber")?;
        let term_raw = require_str(&args, "termCode")?;

        let snapshot = ctx.vocab.snapshot();
        let subject = normalize::resolve_subject(subject_raw, &snapshot)?;
        let catalog = match normalize::resolve_catalog(catalog_raw)? {
            Predicate::Exact { value } => value,
            _ => {
                return Err(SearchError::invalid_filter(
                    "catalogNumber",
                    catalog_raw,
                    "comparison needs an exact course number, not a wildcard",
                ));
            }
        };
        let term = TermCode::parse(term_raw)
            .map_err(|e| SearchError::invalid_filter("termCode", term_raw, e.to_string()))?;

        let mut predicates = PredicateSet::new();
        predicates.insert(
            FilterField::Subject,
            Predicate::Exact {
                value: subject.clone(),
            },
        );
        predicates.insert(
            FilterField::CatalogNumber,
            Predicate::Exact {
                value: catalog.clone(),
            },
        );
        predicates.insert(FilterField::Term, Predicate::Exact { value: term.code() });

        let query = SearchQuery {
            predicates,
            page: Page::new(1, MAX_PER_PAGE),
            sort: Default::default(),
        };
        let page = ctx.index.search(&query).await?;

        let mut sections = page.sections;
        sections.sort_by(|a, b| a.section_number.cmp(&b.section_number));

        let summary = if sections.is_empty() {
            format!(
                "{subject} {catalog} has no sections in {}",
                term.describe()
            )
        } else {
            format!(
                "{subject} {catalog} has {} section(s) in {}",
                sections.len(),
                term.describe()
            )
        };
        let data = json!({
            "subject": subject,
            "catalogNumber": catalog,
            "term": term.code(),
            "termDescription": term.describe(),
            "sectionCount": sections.len(),
            "summaries": sections.iter().map(summarize_section).collect::<Vec<_>>(),
            "sections": sections,
        });
        Ok(ToolResult::success(self.name(), data, summary))
    }
}

fn require_str<'a>(
    args: &'a serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> SearchResult<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SearchError::invalid_filter(key, "", "required string argument"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSearchIndex;
    use crate::vocab::VocabularyStore;

    #[tokio::test]
    async fn sections_ordered_by_section_number() {
        let index = MockSearchIndex::with_sample_catalog();
        let vocab = VocabularyStore::with_sample_values();
        let ctx = ToolContext {
            index: &index,
            vocab: &vocab,
        };

        let result = CompareSections
            .execute(
                json!({"subject": "computer science", "catalogNumber": "121", "termCode": "1263"}),
                &ctx,
            )
            .await
            .unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["sectionCount"], 3);
        let numbers: Vec<&str> = data["sections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["sectionNumber"].as_str().unwrap())
            .collect();
        assert_eq!(numbers, vec!["001", "002", "003"]);
    }

    #[tokio::test]
    async fn zero_sections_is_empty_list_not_error() {
        let index = MockSearchIndex::with_sample_catalog();
        let vocab = VocabularyStore::with_sample_values();
        let ctx = ToolContext {
            index: &index,
            vocab: &vocab,
        };

        let result = CompareSections
            .execute(
                json!({"subject": "CS", "catalogNumber": "999", "termCode": "1263"}),
                &ctx,
            )
            .await
            .unwrap();
        assert!(result.success);
        let data = result.data.unwrap();
        assert_eq!(data["sectionCount"], 0);
    }

    #[tokio::test]
    async fn wildcard_catalog_is_rejected() {
        let index = MockSearchIndex::with_sample_catalog();
        let vocab = VocabularyStore::with_sample_values();
        let ctx = ToolContext {
            index: &index,
            vocab: &vocab,
        };

        let err = CompareSections
            .execute(
                json!({"subject": "CS", "catalogNumber": "1*", "termCode": "1263"}),
                &ctx,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidFilterSyntax { .. }));
    }

    #[tokio::test]
    async fn term_scopes_the_comparison() {
        let index = MockSearchIndex::with_sample_catalog();
        let vocab = VocabularyStore::with_sample_values();
        let ctx = ToolContext {
            index: &index,
            vocab: &vocab,
        };

        let result = CompareSections
            .execute(
                json!({"subject": "CS", "catalogNumber": "121", "termCode": "1269"}),
                &ctx,
            )
            .await
            .unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["sectionCount"], 1);
        assert_eq!(data["termDescription"], "Fall 2026");
    }
}
