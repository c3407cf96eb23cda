use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Parser for commit dates that arrive only as legacy free-text strings
///
/// Commits written by older store versions carry no epoch attribute, only a
/// locale-formatted date string. Parsing those is inherently ambiguous
/// (`DD/MM` vs `MM/DD`), so the fallback is isolated behind this trait: the
/// grouping and filtering logic only ever sees the resolved instant, and the
/// guessing strategy can be swapped (e.g. for a strict ISO-8601 parser)
/// without touching it.
pub trait FallbackDateParser {
    fn parse(&self, raw: &str) -> Option<DateTime<Utc>>;
}

/// Datetime formats tried against legacy date strings, day-first before
/// month-first
const LEGACY_DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Date-only formats tried when no time component parses; midnight is assumed
const LEGACY_DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%m/%d/%Y", "%d.%m.%Y", "%Y-%m-%d"];

/// Best-effort parser over the legacy locale formats
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyDateParser;

impl FallbackDateParser for LegacyDateParser {
    fn parse(&self, raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();

        for format in LEGACY_DATETIME_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(datetime.and_utc());
            }
        }

        for format in LEGACY_DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
                return Some(date.and_time(NaiveTime::MIN).and_utc());
            }
        }

        tracing::warn!(raw, "unparsable legacy commit date");
        None
    }
}
