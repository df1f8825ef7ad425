//! find_classes_by_schedule — sections whose every meeting block fits
//! inside the caller's free time windows.

use async_trait::async_trait;
use serde_json::json;

use cs_protocol::SectionPage;

use crate::error::SearchResult;
use crate::index::{MAX_PER_PAGE, Page, SearchQuery};
use crate::normalize;
use crate::schedule;
use crate::tools::{args_object, page_payload, parse_page, parse_sort, parse_windows};
use crate::types::{SectionTool, ToolContext, ToolResult};

const CONTROL_KEYS: &[&str] = &["freeWindows", "page", "perPage", "sortBy", "sortDirection"];

pub struct FindClassesBySchedule;

#[async_trait]
impl SectionTool for FindClassesBySchedule {
    fn name(&self) -> &str {
        "find_classes_by_schedule"
    }

    fn description(&self) -> &str {
        "Find class sections that fit entirely inside the given free time windows"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "freeWindows": {
                    "type": "array",
                    "description": "Free time windows; every meeting block of a matching section fits in one of them",
                    "items": {
                        "type": "object",
                        "properties": {
                            "days": { "type": "array", "items": { "type": "string" } },
                            "start": { "description": "Minute of day or clock time (e.g. \"8:00\")" },
                            "end": { "description": "Minute of day or clock time (e.g. \"12:00\")" }
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
            "required": ["freeWindows"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> SearchResult<ToolResult> {
        let args = args_object(&args)?;
        let windows = parse_windows(&args, "freeWindows")?;
        let snapshot = ctx.vocab.snapshot();
        let predicates = normalize::normalize(&args, &snapshot, CONTROL_KEYS)?;
        let page = parse_page(&args)?;
        let sort = parse_sort(&args)?;

        // One bounded round-trip: pull the largest candidate page the
        // index allows, then apply the schedule filter in-engine.
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
                "schedule filter candidate pool truncated"
            );
        }

        let fitting: Vec<_> = pool
            .sections
            .into_iter()
            .filter(|s| schedule::fits_within_any(s, &windows))
            .collect();
        let total = fitting.len() as u64;
        let start = ((page.page - 1) * page.per_page) as usize;
        let sections: Vec<_> = fitting
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
        let summary = format!(
            "{} of the matching sections fit inside the given free windows",
            total
        );
        Ok(ToolResult::success(self.name(), data, summary))
    }
}
