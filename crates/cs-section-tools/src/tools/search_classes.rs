//! search_classes — filtered section search with pagination and sorting.

use async_trait::async_trait;
use serde_json::json;

use crate::error::SearchResult;
use crate::index::SearchQuery;
use crate::normalize;
use crate::tools::{args_object, page_payload, parse_page, parse_sort};
use crate::types::{SectionTool, ToolContext, ToolResult};

/// Argument keys that belong to paging/sorting, not filtering.
const CONTROL_KEYS: &[&str] = &["page", "perPage", "sortBy", "sortDirection"];

pub struct SearchClasses;

#[async_trait]
impl SectionTool for SearchClasses {
    fn name(&self) -> &str {
        "search_classes"
    }

    fn description(&self) -> &str {
        "Search for class sections with flexible filters (subject, catalog number, \
         instructor, meeting time, instruction mode, attributes, seat availability)"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "termCode": {
                    "type": "string",
                    "description": "4-digit term code (e.g. 1263 for Spring 2026)"
                },
                "subject": {
                    "type": "string",
                    "description": "Department code or name (e.g. CS, Computer Science)"
                },
                "catalogNumber": {
                    "type": "string",
                    "description": "Course number, optionally with a trailing * wildcard (e.g. 1*)"
                },
                "instructor": {
                    "type": "string",
                    "description": "Instructor name or name fragment"
                },
                "query": {
                    "type": "string",
                    "description": "Free-text title/keyword search (more than 2 characters)"
                },
                "meetingTime": {
                    "type": "string",
                    "description": "morning, afternoon, evening, or a literal range like 9:00-12:00"
                },
                "instructionMode": {
                    "type": "string",
                    "description": "Delivery mode (in-person, online, hybrid, remote, or codes P/IN/HY/RM)"
                },
                "academicLevel": {
                    "type": "string",
                    "description": "undergraduate or graduate (codes UGRD/GRAD)"
                },
                "attributes": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Course attribute tags (e.g. gen-ed foundations); OR within the list"
                },
                "requirementDesignation": {
                    "type": "string",
                    "description": "Special designation (e.g. honors, service learning)"
                },
                "credits": {
                    "type": "number",
                    "description": "Exact credit hours"
                },
                "hasOpenSeats": {
                    "type": "boolean",
                    "description": "Only sections with (or without) open seats"
                },
                "page": { "type": "integer", "default": 1 },
                "perPage": { "type": "integer", "default": 10 },
                "sortBy": {
                    "type": "string",
                    "enum": ["catalog_number", "title", "enrollment"]
                },
                "sortDirection": {
                    "type": "string",
                    "enum": ["ascending", "descending"]
                }
            }
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> SearchResult<ToolResult> {
        let args = args_object(&args)?;
        let snapshot = ctx.vocab.snapshot();
        let query = SearchQuery {
            predicates: normalize::normalize(&args, &snapshot, CONTROL_KEYS)?,
            page: parse_page(&args)?,
            sort: parse_sort(&args)?,
        };

        let page = ctx.index.search(&query).await?;
        let summary = if page.total_hits == 0 {
            "No classes found matching your criteria. Try broadening your search.".to_string()
        } else {
            format!(
                "Found {} classes (showing {})",
                page.total_hits,
                page.showing()
            )
        };
        Ok(ToolResult::success(self.name(), page_payload(&page), summary))
    }
}
