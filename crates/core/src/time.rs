//! Commit timestamps
//!
//! Payload timestamps arrive as ISO-8601 strings, with or without an offset.
//! Strings without an offset are wall-clock times and are shown unchanged.
//! Headers show times as `5/7/96 1:15 AM`, converting zoned ones into the
//! configured display zone.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};

const HEADER_FORMAT: &str = "%-m/%-d/%y %-I:%M %p";

/// A commit creation time as delivered by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Carried an explicit offset; displayed in the configured zone
    Zoned(DateTime<Utc>),
    /// No offset; displayed as-is
    Local(NaiveDateTime),
}

/// Parse a payload creation time
pub fn parse_timestamp(value: &str) -> Result<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(Timestamp::Zoned(dt.with_timezone(&Utc)));
    }

    value
        .parse::<NaiveDateTime>()
        .map(Timestamp::Local)
        .map_err(|source| Error::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
}

/// Zone in which header times are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayZone(FixedOffset);

impl Default for DisplayZone {
    fn default() -> Self {
        Self(Utc.fix())
    }
}

impl DisplayZone {
    pub fn new(offset: FixedOffset) -> Self {
        Self(offset)
    }

    /// Parse an offset such as `+05:30`, `-0800`, `+2` or `UTC`
    pub fn parse(s: &str) -> Result<Self> {
        parse_utc_offset(s).map(Self).map_err(Error::ConfigError)
    }

    pub fn offset(&self) -> FixedOffset {
        self.0
    }

    /// Format a timestamp as month/day/2-digit-year, 12-hour clock, no seconds
    pub fn format(&self, timestamp: &Timestamp) -> String {
        match timestamp {
            Timestamp::Zoned(dt) => dt.with_timezone(&self.0).format(HEADER_FORMAT).to_string(),
            Timestamp::Local(naive) => naive.format(HEADER_FORMAT).to_string(),
        }
    }
}

fn parse_utc_offset(s: &str) -> std::result::Result<FixedOffset, String> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("utc") || s == "Z" {
        return Ok(Utc.fix());
    }

    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(format!("Invalid UTC offset: {} (expected e.g. +05:30)", s)),
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 && rest.is_ascii() => rest.split_at(2),
        None => (rest, "0"),
    };

    // u32::from_str accepts a leading '+', so check for digits first
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(hours) || !digits(minutes) {
        return Err(format!("Invalid UTC offset: {} (expected e.g. +05:30)", s));
    }

    let hours: u32 = hours
        .parse()
        .map_err(|_| format!("Invalid UTC offset hours: {}", s))?;
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| format!("Invalid UTC offset minutes: {}", s))?;

    if hours > 23 || minutes > 59 {
        return Err(format!("UTC offset out of range: {}", s));
    }

    let seconds = (hours * 3600 + minutes * 60) as i32;
    FixedOffset::east_opt(sign * seconds)
        .ok_or_else(|| format!("UTC offset out of range: {}", s))
}
