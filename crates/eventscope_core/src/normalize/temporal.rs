//! Timestamp normalization for mixed upstream formats.
//!
//! Strategies run in order and the first success wins:
//! 1. RFC 2822, then ISO-8601 style forms (RFC 3339 with offset, or naive
//!    date/date-time with a four-digit year).
//! 2. The upstream short form `D/M/YY H:MM`, day first, year `2000 + YY`.
//!
//! Anything else yields `None` and callers display the raw string.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Calendar date plus time of day in local time.
pub type NormalizedInstant = NaiveDateTime;

const FULL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SHORT_FORMAT: &str = "%m-%d %H:%M";

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];
const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

// chrono's `%Y` accepts short years, so `26/5/25` would otherwise parse as
// year 26 through the slash formats.
static ISO_DATE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}[-/]").expect("valid iso date prefix regex"));

static SHORT_DAY_FIRST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2})\s+(\d{1,2}):(\d{2})$")
        .expect("valid short timestamp regex")
});

/// Parses `raw` into a local instant, or `None` when no strategy applies.
pub fn parse_timestamp(raw: &str) -> Option<NormalizedInstant> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_iso_like(trimmed).or_else(|| parse_short_day_first(trimmed))
}

/// `YYYY-MM-DD HH:MM:SS`.
pub fn format_full(instant: &NormalizedInstant) -> String {
    instant.format(FULL_FORMAT).to_string()
}

/// `MM-DD HH:MM`.
pub fn format_short(instant: &NormalizedInstant) -> String {
    instant.format(SHORT_FORMAT).to_string()
}

fn parse_iso_like(value: &str) -> Option<NormalizedInstant> {
    if let Ok(with_offset) = DateTime::parse_from_rfc2822(value) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }
    if !ISO_DATE_PREFIX_RE.is_match(value) {
        return None;
    }
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NAIVE_DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

// Day-first is fixed by the upstream export; never guess month-first.
fn parse_short_day_first(value: &str) -> Option<NormalizedInstant> {
    let caps = SHORT_DAY_FIRST_RE.captures(value)?;
    let field = |index: usize| caps.get(index)?.as_str().parse::<u32>().ok();

    let day = field(1)?;
    let month = field(2)?;
    let year = 2000 + i32::try_from(field(3)?).ok()?;
    let hour = field(4)?;
    let minute = field(5)?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

/// A raw upstream time value paired with its parse result.
///
/// Both presentation modes derive from the stored instant; when parsing
/// failed they return the raw text verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTime {
    raw: String,
    instant: Option<NormalizedInstant>,
}

impl DisplayTime {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let instant = parse_timestamp(&raw);
        Self { raw, instant }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> Option<&NormalizedInstant> {
        self.instant.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    pub fn full(&self) -> String {
        self.instant
            .as_ref()
            .map(format_full)
            .unwrap_or_else(|| self.raw.clone())
    }

    pub fn short(&self) -> String {
        self.instant
            .as_ref()
            .map(format_short)
            .unwrap_or_else(|| self.raw.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_iso_like, parse_short_day_first};

    #[test]
    fn short_form_requires_two_digit_minutes() {
        assert!(parse_short_day_first("1/2/25 8:5").is_none());
        assert!(parse_short_day_first("1/2/25 8:05").is_some());
    }

    #[test]
    fn iso_strategy_needs_a_four_digit_year() {
        assert!(parse_iso_like("26/5/25 8:20").is_none());
        assert!(parse_iso_like("2025/5/26 8:20").is_some());
    }

    #[test]
    fn short_form_rejects_out_of_range_hour() {
        assert!(parse_short_day_first("1/2/25 24:00").is_none());
    }
}
