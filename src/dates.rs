//! Explicit two-valued date parsing.
//!
//! The message exports carry dates in several shapes (RFC 3339, space- or
//! T-separated timestamps, bare dates). A cell either parses into a real
//! timestamp or is explicitly `Unparseable` — downstream rules branch on
//! that marker instead of receiving a silently wrong date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse outcome for a message date field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailDate {
    Parsed(NaiveDateTime),
    Unparseable,
}

impl EmailDate {
    /// Parse an optional raw date string. Absent and unparseable collapse
    /// into the same explicit marker.
    pub fn parse(raw: Option<&str>) -> EmailDate {
        match raw {
            Some(s) => parse_datetime(s)
                .map(EmailDate::Parsed)
                .unwrap_or(EmailDate::Unparseable),
            None => EmailDate::Unparseable,
        }
    }

    pub fn timestamp(self) -> Option<NaiveDateTime> {
        match self {
            EmailDate::Parsed(ts) => Some(ts),
            EmailDate::Unparseable => None,
        }
    }

    pub fn is_parsed(self) -> bool {
        matches!(self, EmailDate::Parsed(_))
    }

    /// Whole days from this date up to the reference timestamp.
    /// `None` when the date never parsed.
    pub fn days_until(self, reference: NaiveDateTime) -> Option<i64> {
        self.timestamp().map(|ts| (reference - ts).num_days())
    }
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}
