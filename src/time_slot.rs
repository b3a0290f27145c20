use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";
const TIMESTAMP_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const TIMESTAMP_FRACTION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A `[start, end)` interval of local time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimeSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeSlotParseError {
    #[error("Could not parse start date '{0}'")]
    StartDate(String),
    #[error("Could not parse end date '{0}'")]
    EndDate(String),
}

impl TimeSlot {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, TimeSlotParseError> {
        let start = parse_timestamp(start)
            .ok_or_else(|| TimeSlotParseError::StartDate(start.to_string()))?;
        let end =
            parse_timestamp(end).ok_or_else(|| TimeSlotParseError::EndDate(end.to_string()))?;
        Ok(Self { start, end })
    }

    /// Half-open intersection: slots that only touch at an endpoint do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Accepts `YYYY-MM-DDTHH:MM` with optional seconds and fractional seconds.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FRACTION_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT))
        .ok()
}

/// Seconds and fractions are written only when present, so parsing the
/// output yields the same instant.
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    let format = if timestamp.nanosecond() != 0 {
        TIMESTAMP_FRACTION_FORMAT
    } else if timestamp.second() != 0 {
        TIMESTAMP_SECONDS_FORMAT
    } else {
        TIMESTAMP_FORMAT
    };
    timestamp.format(format).to_string()
}

pub fn timestamp_to_string<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(timestamp))
}

pub fn timestamp_from_string<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", s)))
}
