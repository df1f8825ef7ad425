//! Term codes — the registrar's 4-character term identifier.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by [`TermCode::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermCodeError {
    #[error("term must be a 4-digit code (e.g. 1263 for Spring 2026)")]
    Length,

    #[error("term must contain only digits")]
    NonDigit,

    #[error("first digit must be 1")]
    Institution,

    #[error("last digit must be 3 (Spring), 6 (Summer), or 9 (Fall)")]
    Season,
}

/// Academic season, encoded as the term code's final digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn digit(&self) -> char {
        match self {
            Self::Spring => '3',
            Self::Summer => '6',
            Self::Fall => '9',
        }
    }

    pub fn from_digit(d: char) -> Option<Self> {
        match d {
            '3' => Some(Self::Spring),
            '6' => Some(Self::Summer),
            '9' => Some(Self::Fall),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
        }
    }
}

/// A validated term identifier.
///
/// Wire format is `1YYS`: leading `1` (institution), two-digit year,
/// season digit. Parsing is strict — invalid codes are rejected, never
/// coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermCode {
    /// Full calendar year (e.g. 2026).
    pub year: u16,
    pub season: Season,
}

impl TermCode {
    pub fn new(year: u16, season: Season) -> Self {
        Self { year, season }
    }

    /// Parse a raw 4-character code like `"1263"`.
    pub fn parse(raw: &str) -> Result<Self, TermCodeError> {
        if raw.len() != 4 {
            return Err(TermCodeError::Length);
        }
        let bytes = raw.as_bytes();
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(TermCodeError::NonDigit);
        }
        if bytes[0] != b'1' {
            return Err(TermCodeError::Institution);
        }
        let season = Season::from_digit(bytes[3] as char).ok_or(TermCodeError::Season)?;
        let yy = (bytes[1] - b'0') as u16 * 10 + (bytes[2] - b'0') as u16;
        Ok(Self {
            year: 2000 + yy,
            season,
        })
    }

    /// The 4-character wire form (e.g. `"1263"`).
    pub fn code(&self) -> String {
        format!("1{:02}{}", self.year % 100, self.season.digit())
    }

    /// Human-readable form (e.g. `"Spring 2026"`).
    pub fn describe(&self) -> String {
        format!("{} {}", self.season.name(), self.year)
    }
}

impl std::fmt::Display for TermCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code())
    }
}

impl std::str::FromStr for TermCode {
    type Err = TermCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TermCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code())
    }
}

impl<'de> Deserialize<'de> for TermCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_spring_2026() {
        let term = TermCode::parse("1263").unwrap();
        assert_eq!(term.year, 2026);
        assert_eq!(term.season, Season::Spring);
        assert_eq!(term.describe(), "Spring 2026");
    }

    #[test]
    fn encode_round_trip() {
        let term = TermCode::new(2026, Season::Spring);
        assert_eq!(term.code(), "1263");
        assert_eq!(TermCode::parse(&term.code()).unwrap(), term);

        let fall = TermCode::new(2027, Season::Fall);
        assert_eq!(fall.code(), "1279");
    }

    #[test]
    fn reject_wrong_institution() {
        assert_eq!(TermCode::parse("2263"), Err(TermCodeError::Institution));
    }

    #[test]
    fn reject_bad_season_digit() {
        assert_eq!(TermCode::parse("1265"), Err(TermCodeError::Season));
    }

    #[test]
    fn reject_length_and_non_digit() {
        assert_eq!(TermCode::parse("126"), Err(TermCodeError::Length));
        assert_eq!(TermCode::parse("12633"), Err(TermCodeError::Length));
        assert_eq!(TermCode::parse("12a3"), Err(TermCodeError::NonDigit));
        assert_eq!(TermCode::parse(""), Err(TermCodeError::Length));
    }

    #[test]
    fn serde_as_string() {
        let term = TermCode::parse("1269").unwrap();
        assert_eq!(serde_json::to_string(&term).unwrap(), r#""1269""#);
        let back: TermCode = serde_json::from_str(r#""1269""#).unwrap();
        assert_eq!(back, term);
        assert!(serde_json::from_str::<TermCode>(r#""9999""#).is_err());
    }
}
