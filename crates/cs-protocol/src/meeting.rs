//! Meeting-time types — weekday sets and minute-of-day ranges.
//!
//! Days are an explicit enumerated set and times are integer minutes since
//! midnight, so overlap and containment arithmetic stays exact. Free-form
//! day strings never enter the engine.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minutes in a day; `end_minute` may equal this (midnight exclusive bound).
pub const MINUTES_PER_DAY: u16 = 1440;

/// Errors produced when constructing a meeting block or time window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeRangeError {
    #[error("start minute {start} must be before end minute {end}")]
    Inverted { start: u16, end: u16 },

    #[error("minute {0} is out of range (0..=1440)")]
    OutOfRange(u16),
}

// ── Weekday ───────────────────────────────────────────────────

/// Day of week. Declaration order matters — [`DaySet`] bit positions and
/// `#[derive(Ord)]` both use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mon => "Mon",
            Self::Tue => "Tue",
            Self::Wed => "Wed",
            Self::Thu => "Thu",
            Self::Fri => "Fri",
            Self::Sat => "Sat",
            Self::Sun => "Sun",
        }
    }

    /// Parse a day name: full ("monday"), short ("mon"), case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mon" | "monday" => Some(Self::Mon),
            "tue" | "tues" | "tuesday" => Some(Self::Tue),
            "wed" | "wednesday" => Some(Self::Wed),
            "thu" | "thur" | "thurs" | "thursday" => Some(Self::Thu),
            "fri" | "friday" => Some(Self::Fri),
            "sat" | "saturday" => Some(Self::Sat),
            "sun" | "sunday" => Some(Self::Sun),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

// ── DaySet ────────────────────────────────────────────────────

/// An unordered set of weekdays, stored as a 7-bit mask.
///
/// Serialized as an array of day names so index documents stay readable.
/// An empty set means "no fixed meeting days" (asynchronous).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DaySet(u8);

impl DaySet {
    pub const EMPTY: DaySet = DaySet(0);

    pub fn new(days: &[Weekday]) -> Self {
        let mut set = Self::EMPTY;
        for d in days {
            set.insert(*d);
        }
        set
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= day.bit();
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & day.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// True if the two sets share at least one day.
    pub fn intersects(&self, other: DaySet) -> bool {
        self.0 & other.0 != 0
    }

    /// True if every day in `self` is also in `other`.
    pub fn is_subset_of(&self, other: DaySet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .iter()
            .copied()
            .filter(|d| self.contains(*d))
            .collect()
    }
}

impl std::fmt::Display for DaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("TBA");
        }
        let names: Vec<&str> = self.days().iter().map(|d| d.as_str()).collect();
        f.write_str(&names.join("/"))
    }
}

impl FromIterator<Weekday> for DaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for d in iter {
            set.insert(d);
        }
        set
    }
}

impl Serialize for DaySet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.days().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DaySet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let days = Vec::<Weekday>::deserialize(deserializer)?;
        Ok(Self::new(&days))
    }
}

// ── Meeting block / time window ───────────────────────────────

fn check_range(start: u16, end: u16) -> Result<(), TimeRangeError> {
    if start >= MINUTES_PER_DAY {
        return Err(TimeRangeError::OutOfRange(start));
    }
    if end > MINUTES_PER_DAY {
        return Err(TimeRangeError::OutOfRange(end));
    }
    if start >= end {
        return Err(TimeRangeError::Inverted { start, end });
    }
    Ok(())
}

/// One recurring weekly time range for a section. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingBlock {
    pub days: DaySet,
    pub start_minute: u16,
    pub end_minute: u16,
}

impl MeetingBlock {
    pub fn new(days: DaySet, start_minute: u16, end_minute: u16) -> Result<Self, TimeRangeError> {
        check_range(start_minute, end_minute)?;
        Ok(Self {
            days,
            start_minute,
            end_minute,
        })
    }
}

impl std::fmt::Display for MeetingBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.days,
            minutes_to_clock(self.start_minute),
            minutes_to_clock(self.end_minute)
        )
    }
}

/// A caller-supplied day-set + time range: a busy block for conflict
/// checks, or a free window for fit checks. Same shape and invariants as
/// [`MeetingBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub days: DaySet,
    pub start_minute: u16,
    pub end_minute: u16,
}

impl TimeWindow {
    pub fn new(days: DaySet, start_minute: u16, end_minute: u16) -> Result<Self, TimeRangeError> {
        check_range(start_minute, end_minute)?;
        Ok(Self {
            days,
            start_minute,
            end_minute,
        })
    }
}

// ── Clock helpers ─────────────────────────────────────────────

/// Parse a clock string to minutes since midnight.
///
/// Accepts `"9:00"`, `"09:00"`, `"14:30"`, `"9"`, and 12-hour forms with
/// AM/PM (`"2:30 PM"`).
pub fn parse_clock(raw: &str) -> Option<u16> {
    let s = raw.trim().to_ascii_uppercase();
    let is_pm = s.ends_with("PM");
    let is_am = s.ends_with("AM");
    let s = s.trim_end_matches("AM").trim_end_matches("PM").trim();

    let (h, m) = match s.split_once(':') {
        Some((h, m)) => (h.parse::<u16>().ok()?, m.parse::<u16>().ok()?),
        None => (s.parse::<u16>().ok()?, 0),
    };
    if m >= 60 {
        return None;
    }
    let h = match (is_pm, is_am, h) {
        (true, _, h) if h < 12 => h + 12,
        (_, true, 12) => 0,
        (_, _, h) => h,
    };
    let minutes = h * 60 + m;
    (minutes < MINUTES_PER_DAY).then_some(minutes)
}

/// Format minutes since midnight as a 12-hour clock string.
pub fn minutes_to_clock(minutes: u16) -> String {
    let h = minutes / 60;
    let m = minutes % 60;
    match h {
        0 => format!("12:{m:02} AM"),
        1..=11 => format!("{h}:{m:02} AM"),
        12 => format!("12:{m:02} PM"),
        _ => format!("{}:{m:02} PM", h - 12),
    }
}

/// Deserialize helper for tool arguments: accepts either minute integers
/// or clock strings for window bounds.
pub fn minute_from_json(value: &serde_json::Value) -> Result<u16, serde_json::Error> {
    match value {
        serde_json::Value::Number(n) => {
            let n = n
                .as_u64()
                .ok_or_else(|| serde_json::Error::custom("minute must be a non-negative integer"))?;
            u16::try_from(n)
                .ok()
                .filter(|m| *m <= MINUTES_PER_DAY)
                .ok_or_else(|| serde_json::Error::custom("minute out of range (0..=1440)"))
        }
        serde_json::Value::String(s) => parse_clock(s)
            .ok_or_else(|| serde_json::Error::custom(format!("unparseable clock time: {s:?}"))),
        _ => Err(serde_json::Error::custom(
            "expected a minute integer or a clock string",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_set_operations() {
        let mwf = DaySet::new(&[Weekday::Mon, Weekday::Wed, Weekday::Fri]);
        let tth = DaySet::new(&[Weekday::Tue, Weekday::Thu]);
        let mon = DaySet::new(&[Weekday::Mon]);

        assert_eq!(mwf.len(), 3);
        assert!(mwf.contains(Weekday::Wed));
        assert!(!mwf.contains(Weekday::Tue));
        assert!(mwf.intersects(mon));
        assert!(!mwf.intersects(tth));
        assert!(mon.is_subset_of(mwf));
        assert!(!mwf.is_subset_of(mon));
        assert!(DaySet::EMPTY.is_subset_of(tth));
    }

    #[test]
    fn day_set_display() {
        let mwf = DaySet::new(&[Weekday::Fri, Weekday::Mon, Weekday::Wed]);
        assert_eq!(mwf.to_string(), "Mon/Wed/Fri");
        assert_eq!(DaySet::EMPTY.to_string(), "TBA");
    }

    #[test]
    fn day_set_serde_as_name_array() {
        let tth = DaySet::new(&[Weekday::Tue, Weekday::Thu]);
        let json = serde_json::to_string(&tth).unwrap();
        assert_eq!(json, r#"["tue","thu"]"#);
        let back: DaySet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tth);
    }

    #[test]
    fn weekday_parse_variants() {
        assert_eq!(Weekday::parse("Monday"), Some(Weekday::Mon));
        assert_eq!(Weekday::parse("thurs"), Some(Weekday::Thu));
        assert_eq!(Weekday::parse("SUN"), Some(Weekday::Sun));
        assert_eq!(Weekday::parse("noday"), None);
    }

    #[test]
    fn meeting_block_validation() {
        let days = DaySet::new(&[Weekday::Mon]);
        assert!(MeetingBlock::new(days, 540, 615).is_ok());
        assert_eq!(
            MeetingBlock::new(days, 615, 540),
            Err(TimeRangeError::Inverted {
                start: 615,
                end: 540
            })
        );
        assert_eq!(
            MeetingBlock::new(days, 540, 540),
            Err(TimeRangeError::Inverted {
                start: 540,
                end: 540
            })
        );
        assert_eq!(
            MeetingBlock::new(days, 1440, 1441),
            Err(TimeRangeError::OutOfRange(1440))
        );
        // End may touch midnight.
        assert!(MeetingBlock::new(days, 1380, 1440).is_ok());
    }

    #[test]
    fn clock_parsing() {
        assert_eq!(parse_clock("9:00"), Some(540));
        assert_eq!(parse_clock("09:00"), Some(540));
        assert_eq!(parse_clock("14:30"), Some(870));
        assert_eq!(parse_clock("2:30 PM"), Some(870));
        assert_eq!(parse_clock("12:00 AM"), Some(0));
        assert_eq!(parse_clock("12:15 PM"), Some(735));
        assert_eq!(parse_clock("9"), Some(540));
        assert_eq!(parse_clock("25:00"), None);
        assert_eq!(parse_clock("9:75"), None);
        assert_eq!(parse_clock("noon"), None);
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(minutes_to_clock(0), "12:00 AM");
        assert_eq!(minutes_to_clock(540), "9:00 AM");
        assert_eq!(minutes_to_clock(735), "12:15 PM");
        assert_eq!(minutes_to_clock(1055), "5:35 PM");
    }
}
