//! The nine caller-visible class search tools.

pub mod check_availability;
pub mod check_conflicts;
pub mod class_details;
pub mod compare_sections;
pub mod filter_options;
pub mod find_by_schedule;
pub mod search_by_instructor;
pub mod search_classes;
pub mod suggest_filter_values;

use serde_json::{Map, Value, json};

use cs_protocol::{ClassSection, DaySet, SectionPage, TimeWindow, Weekday, minute_from_json};

use crate::error::{SearchError, SearchResult};
use crate::index::{Page, Sort, SortBy, SortDirection};

/// All tools, in registry order.
pub fn all_tools() -> Vec<Box<dyn crate::types::SectionTool>> {
    vec![
        Box::new(search_classes::SearchClasses),
        Box::new(find_by_schedule::FindClassesBySchedule),
        Box::new(check_conflicts::CheckScheduleConflicts),
        Box::new(search_by_instructor::SearchByInstructor),
        Box::new(compare_sections::CompareSections),
        Box::new(class_details::GetClassDetails),
        Box::new(check_availability::CheckAvailability),
        Box::new(suggest_filter_values::SuggestFilterValues),
        Box::new(filter_options::GetFilterOptions),
    ]
}

// ── Shared argument parsing ───────────────────────────────────

/// Tool arguments must be a JSON object (or absent entirely).
pub(crate) fn args_object(args: &Value) -> SearchResult<Map<String, Value>> {
    match args {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map.clone()),
        other => Err(SearchError::invalid_filter(
            "arguments",
            other.to_string(),
            "tool arguments must be a JSON object",
        )),
    }
}

pub(crate) fn parse_page(args: &Map<String, Value>) -> SearchResult<Page> {
    let mut page = Page::default();
    if let Some(v) = args.get("page") {
        page.page = expect_u32("page", v)?;
    }
    if let Some(v) = args.get("perPage") {
        page.per_page = expect_u32("perPage", v)?;
    }
    Ok(page.clamped())
}

fn expect_u32(field: &str, value: &Value) -> SearchResult<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            SearchError::invalid_filter(field, value.to_string(), "expected a non-negative integer")
        })
}

pub(crate) fn parse_sort(args: &Map<String, Value>) -> SearchResult<Sort> {
    let mut sort = Sort::default();
    if let Some(v) = args.get("sortBy") {
        let raw = v.as_str().ok_or_else(|| {
            SearchError::invalid_filter("sortBy", v.to_string(), "expected a string")
        })?;
        sort.by = match raw.to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "catalog_number" | "catalognumber" => SortBy::CatalogNumber,
            "title" | "alphabetical" => SortBy::Title,
            "enrollment" => SortBy::Enrollment,
            other => {
                return Err(SearchError::invalid_filter(
                    "sortBy",
                    other,
                    "expected catalog_number, title, or enrollment",
                ));
            }
        };
    }
    if let Some(v) = args.get("sortDirection") {
        let raw = v.as_str().ok_or_else(|| {
            SearchError::invalid_filter("sortDirection", v.to_string(), "expected a string")
        })?;
        sort.direction = match raw.to_ascii_lowercase().as_str() {
            "ascending" | "asc" => SortDirection::Ascending,
            "descending" | "desc" => SortDirection::Descending,
            other => {
                return Err(SearchError::invalid_filter(
                    "sortDirection",
                    other,
                    "expected ascending or descending",
                ));
            }
        };
    }
    Ok(sort)
}

/// Parse a list of `{days, start, end}` windows from a tool argument.
/// Bounds accept minute integers or clock strings.
pub(crate) fn parse_windows(args: &Map<String, Value>, key: &str) -> SearchResult<Vec<TimeWindow>> {
    let items = args
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| SearchError::invalid_filter(key, "", "expected an array of time windows"))?;
    if items.is_empty() {
        return Err(SearchError::invalid_filter(
            key,
            "[]",
            "at least one time window is required",
        ));
    }

    items
        .iter()
        .map(|item| {
            let obj = item.as_object().ok_or_else(|| {
                SearchError::invalid_filter(key, item.to_string(), "window must be an object")
            })?;
            let day_values = obj.get("days").and_then(Value::as_array).ok_or_else(|| {
                SearchError::invalid_filter(key, item.to_string(), "window needs a 'days' array")
            })?;
            let mut days = DaySet::EMPTY;
            for d in day_values {
                let name = d.as_str().ok_or_else(|| {
                    SearchError::invalid_filter(key, d.to_string(), "day must be a string")
                })?;
                let day = Weekday::parse(name).ok_or_else(|| {
                    SearchError::invalid_filter(key, name, "unknown day name")
                })?;
                days.insert(day);
            }

            let start = window_bound(obj, key, "start", "startMinute")?;
            let end = window_bound(obj, key, "end", "endMinute")?;
            TimeWindow::new(days, start, end)
                .map_err(|e| SearchError::invalid_filter(key, item.to_string(), e.to_string()))
        })
        .collect()
}

fn window_bound(
    obj: &Map<String, Value>,
    key: &str,
    name: &str,
    alt_name: &str,
) -> SearchResult<u16> {
    let value = obj.get(name).or_else(|| obj.get(alt_name)).ok_or_else(|| {
        SearchError::invalid_filter(key, "", format!("window needs a '{name}' bound"))
    })?;
    minute_from_json(value).map_err(|e| {
        SearchError::invalid_filter(key, value.to_string(), e.to_string())
    })
}

// ── Shared result formatting ──────────────────────────────────

/// One-line section summary for tool output.
pub(crate) fn summarize_section(s: &ClassSection) -> String {
    let schedule = if s.meetings.is_empty() {
        "asynchronous".to_string()
    } else {
        s.meetings
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    };
    format!(
        "{}: {} (#{}) | {} cr | {} | {} | {} | {}/{} seats open | {}",
        s.label(),
        s.title,
        s.class_number,
        s.credits,
        s.instructor,
        schedule,
        s.location.as_deref().unwrap_or("TBA"),
        s.open_seats(),
        s.seats_capacity,
        s.instruction_mode
    )
}

/// Common page payload shape shared by the search-style tools.
pub(crate) fn page_payload(page: &SectionPage) -> Value {
    json!({
        "totalHits": page.total_hits,
        "page": page.page,
        "perPage": page.per_page,
        "showing": page.showing(),
        "sections": page.sections,
        "summaries": page.sections.iter().map(summarize_section).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_and_sort_parsing() {
        let args = json!({"page": 2, "perPage": 25, "sortBy": "title", "sortDirection": "desc"});
        let map = args.as_object().unwrap();
        let page = parse_page(map).unwrap();
        assert_eq!((page.page, page.per_page), (2, 25));
        let sort = parse_sort(map).unwrap();
        assert_eq!(sort.by, SortBy::Title);
        assert_eq!(sort.direction, SortDirection::Descending);
    }

    #[test]
    fn oversized_page_is_clamped() {
        let args = json!({"perPage": 9999});
        let page = parse_page(args.as_object().unwrap()).unwrap();
        assert_eq!(page.per_page, crate::index::MAX_PER_PAGE);
    }

    #[test]
    fn bad_sort_is_rejected() {
        let args = json!({"sortBy": "popularity"});
        assert!(parse_sort(args.as_object().unwrap()).is_err());
    }

    #[test]
    fn windows_accept_clock_strings_and_minutes() {
        let args = json!({
            "freeWindows": [
                {"days": ["tue", "thu"], "start": "8:00", "end": "12:00"},
                {"days": ["monday"], "startMinute": 780, "endMinute": 900},
            ]
        });
        let windows = parse_windows(args.as_object().unwrap(), "freeWindows").unwrap();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].start_minute, 480);
        assert_eq!(windows[0].end_minute, 720);
        assert_eq!(windows[1].start_minute, 780);
    }

    #[test]
    fn empty_window_list_is_rejected() {
        let args = json!({"busyBlocks": []});
        assert!(parse_windows(args.as_object().unwrap(), "busyBlocks").is_err());
    }

    #[test]
    fn inverted_window_is_rejected() {
        let args = json!({"busyBlocks": [{"days": ["mon"], "start": 600, "end": 540}]});
        assert!(parse_windows(args.as_object().unwrap(), "busyBlocks").is_err());
    }

    #[test]
    fn registry_order_is_stable() {
        let tools = all_tools();
        assert_eq!(tools.len(), 9);
        assert_eq!(tools[0].name(), "search_classes");
        assert_eq!(tools[8].name(), "get_filter_options");
    }
}
