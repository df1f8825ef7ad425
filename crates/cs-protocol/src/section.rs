//! Class section documents as stored in the search index.
//!
//! Sections are read-only snapshots sourced from the index per query; the
//! engine never mutates them.

use serde::{Deserialize, Serialize};

use crate::meeting::MeetingBlock;
use crate::term::TermCode;

// ── Instruction mode ──────────────────────────────────────────

/// Delivery method for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionMode {
    InPerson,
    Online,
    Hybrid,
    Remote,
}

impl InstructionMode {
    /// Registrar short code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InPerson => "P",
            Self::Online => "IN",
            Self::Hybrid => "HY",
            Self::Remote => "RM",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InPerson => "In-Person",
            Self::Online => "Online",
            Self::Hybrid => "Hybrid",
            Self::Remote => "Remote",
        }
    }

    /// The value as stored in index documents (serde form).
    pub fn key(&self) -> &'static str {
        match self {
            Self::InPerson => "in_person",
            Self::Online => "online",
            Self::Hybrid => "hybrid",
            Self::Remote => "remote",
        }
    }

    /// Resolve either the registrar code or a human name, case-insensitive.
    pub fn resolve(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "p" | "in-person" | "in person" | "inperson" => Some(Self::InPerson),
            "in" | "online" => Some(Self::Online),
            "hy" | "hybrid" => Some(Self::Hybrid),
            "rm" | "remote" => Some(Self::Remote),
            _ => None,
        }
    }
}

impl std::fmt::Display for InstructionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Academic level ────────────────────────────────────────────

/// Academic career of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcademicLevel {
    Undergraduate,
    Graduate,
}

impl AcademicLevel {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Undergraduate => "UGRD",
            Self::Graduate => "GRAD",
        }
    }

    /// The value as stored in index documents (serde form).
    pub fn key(&self) -> &'static str {
        match self {
            Self::Undergraduate => "undergraduate",
            Self::Graduate => "graduate",
        }
    }

    pub fn resolve(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ugrd" | "undergrad" | "undergraduate" => Some(Self::Undergraduate),
            "grad" | "graduate" => Some(Self::Graduate),
            _ => None,
        }
    }
}

// ── Class section ─────────────────────────────────────────────

/// One scheduled, enrollable offering of a course for a given term.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSection {
    /// Department code (e.g. "CS").
    pub subject: String,
    /// Course number; may carry trailing letters (e.g. "301L").
    pub catalog_number: String,
    /// Section number, unique within (subject, catalog_number, term).
    pub section_number: String,
    pub term: TermCode,
    /// Unique registration id.
    pub class_number: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Instructor name, "TBA" when unassigned.
    pub instructor: String,
    pub credits: f32,
    pub instruction_mode: InstructionMode,
    pub academic_level: AcademicLevel,
    /// Canonical attribute tags (e.g. gen-ed foundations).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirement_designations: Vec<String>,
    /// Academic session code (e.g. "1", "7W1").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_code: Option<String>,
    /// Building/room, None when TBA.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub seats_capacity: u32,
    pub seats_filled: u32,
    pub waitlist_capacity: u32,
    pub waitlist_filled: u32,
    /// Weekly meeting blocks; empty = asynchronous, no fixed meeting time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meetings: Vec<MeetingBlock>,
}

impl ClassSection {
    /// "CS 121-001" style label.
    pub fn label(&self) -> String {
        format!(
            "{} {}-{}",
            self.subject, self.catalog_number, self.section_number
        )
    }

    /// Open seats, never negative even if source data over-enrolls.
    pub fn open_seats(&self) -> u32 {
        self.seats_capacity.saturating_sub(self.seats_filled)
    }

    /// Over-enrolled source data counts as full, not as an error.
    pub fn has_open_seats(&self) -> bool {
        self.seats_filled < self.seats_capacity
    }

    pub fn open_waitlist_spots(&self) -> u32 {
        self.waitlist_capacity.saturating_sub(self.waitlist_filled)
    }

    /// No fixed meeting times — matched only by mode filters, never by
    /// conflict or window checks.
    pub fn is_asynchronous(&self) -> bool {
        self.meetings.is_empty()
    }

    pub fn availability(&self) -> AvailabilityStatus {
        if self.seats_capacity == 0 {
            AvailabilityStatus::Closed
        } else if self.has_open_seats() {
            AvailabilityStatus::Open
        } else if self.open_waitlist_spots() > 0 {
            AvailabilityStatus::FullWaitlistOpen
        } else {
            AvailabilityStatus::FullWaitlistClosed
        }
    }
}

// ── Availability ──────────────────────────────────────────────

/// Seat status derived from the capacity counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// Seats remain.
    Open,
    /// Seats full, waitlist has room.
    FullWaitlistOpen,
    /// Seats and waitlist both full.
    FullWaitlistClosed,
    /// Zero seat capacity — not accepting enrollment.
    Closed,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::FullWaitlistOpen => "Full-WaitlistOpen",
            Self::FullWaitlistClosed => "Full-WaitlistClosed",
            Self::Closed => "Closed",
        }
    }
}

/// Snapshot answer for an availability check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAvailability {
    pub class_number: u32,
    pub status: AvailabilityStatus,
    pub seats_capacity: u32,
    pub seats_filled: u32,
    pub seats_open: u32,
    pub waitlist_capacity: u32,
    pub waitlist_filled: u32,
    pub waitlist_open: u32,
}

impl SeatAvailability {
    pub fn from_section(section: &ClassSection) -> Self {
        Self {
            class_number: section.class_number,
            status: section.availability(),
            seats_capacity: section.seats_capacity,
            seats_filled: section.seats_filled,
            seats_open: section.open_seats(),
            waitlist_capacity: section.waitlist_capacity,
            waitlist_filled: section.waitlist_filled,
            waitlist_open: section.open_waitlist_spots(),
        }
    }
}

// ── Section page ──────────────────────────────────────────────

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPage {
    pub sections: Vec<ClassSection>,
    /// Total matches across all pages.
    pub total_hits: u64,
    /// 1-indexed page number.
    pub page: u32,
    pub per_page: u32,
}

impl SectionPage {
    pub fn empty(page: u32, per_page: u32) -> Self {
        Self {
            sections: Vec::new(),
            total_hits: 0,
            page,
            per_page,
        }
    }

    /// "1-10 of 42" style range description.
    pub fn showing(&self) -> String {
        if self.total_hits == 0 {
            return "0 of 0".to_string();
        }
        let first = u64::from(self.page - 1) * u64::from(self.per_page) + 1;
        let last = (first + self.sections.len() as u64).saturating_sub(1);
        format!("{first}-{last} of {}", self.total_hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::{DaySet, Weekday};
    use crate::term::TermCode;

    fn sample() -> ClassSection {
        ClassSection {
            subject: "CS".into(),
            catalog_number: "121".into(),
            section_number: "001".into(),
            term: TermCode::parse("1263").unwrap(),
            class_number: 10421,
            title: "Computer Science I".into(),
            description: None,
            instructor: "Ada Lovelace".into(),
            credits: 3.0,
            instruction_mode: InstructionMode::InPerson,
            academic_level: AcademicLevel::Undergraduate,
            attributes: vec!["FM".into()],
            requirement_designations: vec![],
            session_code: Some("1".into()),
            location: Some("CCP 221".into()),
            seats_capacity: 30,
            seats_filled: 12,
            waitlist_capacity: 10,
            waitlist_filled: 0,
            meetings: vec![
                MeetingBlock::new(DaySet::new(&[Weekday::Mon, Weekday::Wed]), 540, 615).unwrap(),
            ],
        }
    }

    #[test]
    fn seat_derivations() {
        let mut s = sample();
        assert!(s.has_open_seats());
        assert_eq!(s.open_seats(), 18);
        assert_eq!(s.availability(), AvailabilityStatus::Open);

        s.seats_filled = 30;
        assert_eq!(s.availability(), AvailabilityStatus::FullWaitlistOpen);

        s.waitlist_filled = 10;
        assert_eq!(s.availability(), AvailabilityStatus::FullWaitlistClosed);

        s.seats_capacity = 0;
        assert_eq!(s.availability(), AvailabilityStatus::Closed);
    }

    #[test]
    fn over_enrolled_counts_as_full() {
        let mut s = sample();
        s.seats_filled = 35; // source data violates capacity
        assert!(!s.has_open_seats());
        assert_eq!(s.open_seats(), 0);
        assert_eq!(s.availability(), AvailabilityStatus::FullWaitlistOpen);
    }

    #[test]
    fn instruction_mode_resolution() {
        assert_eq!(InstructionMode::resolve("P"), Some(InstructionMode::InPerson));
        assert_eq!(
            InstructionMode::resolve("in person"),
            Some(InstructionMode::InPerson)
        );
        assert_eq!(InstructionMode::resolve("IN"), Some(InstructionMode::Online));
        assert_eq!(InstructionMode::resolve("hybrid"), Some(InstructionMode::Hybrid));
        assert_eq!(InstructionMode::resolve("carrier-pigeon"), None);
    }

    #[test]
    fn academic_level_resolution() {
        assert_eq!(
            AcademicLevel::resolve("UGRD"),
            Some(AcademicLevel::Undergraduate)
        );
        assert_eq!(AcademicLevel::resolve("graduate"), Some(AcademicLevel::Graduate));
        assert_eq!(AcademicLevel::resolve("postdoc"), None);
    }

    #[test]
    fn section_serde_round_trip() {
        let s = sample();
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains(r#""catalogNumber":"121""#));
        assert!(json.contains(r#""term":"1263""#));
        assert!(!json.contains("description")); // skip_serializing_if = None
        let back: ClassSection = serde_json::from_str(&json).unwrap();
        assert_eq!(back.class_number, 10421);
        assert_eq!(back.meetings.len(), 1);
    }

    #[test]
    fn page_showing_ranges() {
        let mut page = SectionPage::empty(1, 10);
        assert_eq!(page.showing(), "0 of 0");

        page.total_hits = 42;
        page.sections = vec![sample(); 10];
        assert_eq!(page.showing(), "1-10 of 42");

        page.page = 5;
        page.sections = vec![sample(); 2];
        assert_eq!(page.showing(), "41-42 of 42");
    }
}
