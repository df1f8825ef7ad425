//! check_availability — seat and waitlist status for one section.

use async_trait::async_trait;
use serde_json::json;

use cs_protocol::{AvailabilityStatus, SeatAvailability};

use crate::error::SearchResult;
use crate::tools::args_object;
use crate::tools::class_details::parse_class_number;
use crate::types::{SectionTool, ToolContext, ToolResult};

pub struct CheckAvailability;

#[async_trait]
impl SectionTool for CheckAvailability {
    fn name(&self) -> &str {
        "check_availability"
    }

    fn description(&self) -> &str {
        "Check current seat and waitlist availability for one class section"
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
        let availability = SeatAvailability::from_section(&section);
        let summary = match availability.status {
            AvailabilityStatus::Open => format!(
                "{} has {} seat(s) available",
                section.label(),
                availability.seats_open
            ),
            AvailabilityStatus::FullWaitlistOpen => format!(
                "{} is full, but {} waitlist spot(s) are available",
                section.label(),
                availability.waitlist_open
            ),
            AvailabilityStatus::FullWaitlistClosed => {
                format!("{} is full with no waitlist availability", section.label())
            }
            AvailabilityStatus::Closed => {
                format!("{} is not accepting enrollment", section.label())
            }
        };
        let data = json!({
            "label": section.label(),
            "term": section.term.code(),
            "availability": availability,
        });
        Ok(ToolResult::success(self.name(), data, summary))
    }
}
