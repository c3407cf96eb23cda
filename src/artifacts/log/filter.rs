use crate::artifacts::commit::CommitRecord;
use chrono::{Days, NaiveDate, NaiveTime};
use derive_new::new;

/// Default date-range floor when the caller sets no range
const RANGE_FLOOR: (i32, u32, u32) = (1970, 1, 2);
/// Default date-range ceiling when the caller sets no range
const RANGE_CEIL: (i32, u32, u32) = (2080, 1, 1);

/// The date range used when the caller sets no bounds; also the source of
/// the missing bound when only one of start/end is given
pub fn default_range() -> (NaiveDate, NaiveDate) {
    let floor = NaiveDate::from_ymd_opt(RANGE_FLOOR.0, RANGE_FLOOR.1, RANGE_FLOOR.2);
    let ceil = NaiveDate::from_ymd_opt(RANGE_CEIL.0, RANGE_CEIL.1, RANGE_CEIL.2);
    match (floor, ceil) {
        (Some(floor), Some(ceil)) => (floor, ceil),
        _ => unreachable!("default range bounds are valid dates"),
    }
}

/// Predicates a commit must pass to appear in the audit view
///
/// All predicates are conjunctive; an unset predicate always passes. The
/// user and message filters are case-insensitive substring matches against
/// the author display name and the commit message text. The date range is
/// inclusive of the entire end day.
#[derive(Debug, Clone, Default, new)]
pub struct AuditFilter {
    user: Option<String>,
    message: Option<String>,
    date_range: Option<(NaiveDate, NaiveDate)>,
}

impl AuditFilter {
    /// Epoch-second bounds of the active date range
    ///
    /// The end date is extended by one day so the test
    /// `start <= commit <= end` covers the whole end day.
    pub fn epoch_bounds(&self) -> (i64, i64) {
        let (start, end) = self.date_range.unwrap_or_else(default_range);

        let start_epoch = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let end_epoch = end
            .checked_add_days(Days::new(1))
            .unwrap_or(end)
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();

        (start_epoch, end_epoch)
    }

    /// Whether a commit with the given resolved epoch passes every predicate
    ///
    /// A commit whose date could not be resolved (`None`) is treated as out
    /// of range.
    pub fn admits(&self, commit: &CommitRecord, resolved_epoch: Option<i64>) -> bool {
        self.admits_date(resolved_epoch)
            && Self::contains_ci(self.user.as_deref(), &commit.author().name)
            && Self::contains_ci(self.message.as_deref(), &commit.message().display_text())
    }

    fn admits_date(&self, resolved_epoch: Option<i64>) -> bool {
        let Some(epoch) = resolved_epoch else {
            return false;
        };
        let (start, end) = self.epoch_bounds();

        start <= epoch && epoch <= end
    }

    fn contains_ci(needle: Option<&str>, haystack: &str) -> bool {
        match needle {
            None => true,
            Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        }
    }
}
