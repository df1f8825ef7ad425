//! check_schedule_conflicts — drop sections colliding with the caller's
//! existing commitments.

use async_trait::async_trait;
use serde_json::json;

use cs_protocol::SectionPage;

use crate::error::SearchResult;
use crate::index::{MAX_PER_PAGE, Page, SearchQuery};
use crate::normalize;
use crate::schedule;
use crate::tools::{args_object, page_payload, parse_page, parse_sort, parse_windows};
use crate::types::{SectionTool, ToolContext, ToolResult};

const CONTROL_KEYS: &[&str] = &["busyBlocks", "page", "perPage", "sortBy", "sortDirection"];

pub struct CheckScheduleConflicts;

#[async_trait]
impl SectionTool for CheckScheduleConflicts {
    fn name(&self) -> &str {
        "check_schedule_conflicts"
    }

    fn description(&self) -> &str {
        "Search for class sections that do not collide with the given busy time blocks"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "busyBlocks": {
                    "type": "array",
                    "description": "Existing commitments; sections overlapping any block on any shared day are dropped",
                    "items": {
                        "type": "object",
                        "properties": {
                            "days": { "type": "array", "items": { "type": "string" } },
                            "start": { "description": "Minute of day or clock time" },
                            "end": { "description": "Minute of day or clock time" }
                        },
                        "required": ["days", "start", "end"]
                    }
                },
                "termCode": { "type": "string" },
                "subject": { "type": "string" },
                "catalogNumber": { "type": "string" },
                "instructionMode": { "type": "string" },
                "academicLevel": { "type": "string" },
                "hasOpenSeats": { "type": "boolean" },
                "page": { "type": "integer", "default": 1 },
                "perPage": { "type": "integer", "default": 10 }
            },
            "required": ["busyBlocks"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> SearchResult<ToolResult> {
        let args = args_object(&args)?;
        let busy = parse_windows(&args, "busyBlocks")?;
        let snapshot = ctx.vocab.snapshot();
        let predicates = normalize::normalize(&args, &snapshot, CONTROL_KEYS)?;
        let page = parse_page(&args)?;
        let sort = parse_sort(&args)?;

        let pool_query = SearchQuery {
            predicates,
            page: Page::new(1, MAX_PER_PAGE),
            sort,
        };
        let pool = ctx.index.search(&pool_query).await?;
        let pool_truncated = pool.total_hits > u64::from(MAX_PER_PAGE);
        if pool_truncated {
            tracing::debug!(
                total = pool.total_hits,
                scanned = pool.sections.len(),
                "conflict filter candidate pool truncated"
            );
        }

        let clear: Vec<_> = pool
            .sections
            .into_iter()
            .filter(|s| !schedule::conflicts_with_any(s, &busy))
            .collect();
        let total = clear.len() as u64;
        let start = ((page.page - 1) * page.per_page) as usize;
        let sections: Vec<_> = clear
            .into_iter()
            .skip(start)
            .take(page.per_page as usize)
            .collect();

        let result_page = SectionPage {
            sections,
            total_hits: total,
            page: page.page,
            per_page: page.per_page,
        };
        let mut data = page_payload(&result_page);
        data["candidatePoolTruncated"] = json!(pool_truncated);
        let summary = format!("{total} matching sections are conflict-free");
        Ok(ToolResult::success(self.name(), data, summary))
    }
}
