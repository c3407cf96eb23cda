use crate::artifacts::commit::CommitRecord;
use crate::artifacts::log::RevisionLog;
use crate::artifacts::log::date_fallback::FallbackDateParser;
use crate::artifacts::log::filter::AuditFilter;
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

const SECONDS_PER_DAY: i64 = 86_400;

/// One calendar-day group of the audit trail
///
/// Buckets are produced in non-decreasing `days_ago` order matching the
/// log's temporal order; commits keep their log order within a bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket<'log> {
    label: String,
    days_ago: i64,
    commits: Vec<&'log CommitRecord>,
}

impl<'log> DayBucket<'log> {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn days_ago(&self) -> i64 {
        self.days_ago
    }

    pub fn commits(&self) -> &[&'log CommitRecord] {
        &self.commits
    }
}

/// Bucket a revision log into calendar-day groups relative to `now`
///
/// Commits are processed in log order. Each commit's timestamp is resolved
/// (epoch preferred, legacy free-text fallback otherwise); a commit whose
/// date cannot be resolved at all is excluded with a warning and never halts
/// processing. Included commits must pass every active filter predicate.
/// A new bucket opens only on a strict increase of `days_ago`, so commits of
/// one calendar day share a bucket even when interleaved with filtered-out
/// commits of other days.
pub fn group_by_day<'log>(
    log: &'log RevisionLog,
    now: DateTime<Utc>,
    filter: &AuditFilter,
    fallback: &dyn FallbackDateParser,
) -> Vec<DayBucket<'log>> {
    let mut buckets: Vec<DayBucket<'log>> = Vec::new();
    let mut days_passed: i64 = -1;

    for commit in log.commits() {
        let Some(epoch) = resolve_epoch(commit, fallback) else {
            tracing::warn!(
                hash = commit.hash(),
                "commit date could not be resolved; excluded from audit view"
            );
            continue;
        };
        if !filter.admits(commit, Some(epoch)) {
            continue;
        }

        // Future-dated commits (clock skew) group under "Today".
        let days_ago = ((now.timestamp() - epoch) / SECONDS_PER_DAY).max(0);

        if days_ago > days_passed {
            buckets.push(DayBucket {
                label: day_label(epoch, days_ago, now),
                days_ago,
                commits: Vec::new(),
            });
            days_passed = days_ago;
        }

        if let Some(bucket) = buckets.last_mut() {
            bucket.commits.push(commit);
        }
    }

    buckets
}

/// Resolve a commit's instant: explicit epoch first, legacy free-text parse
/// as the lossy fallback
pub fn resolve_epoch(commit: &CommitRecord, fallback: &dyn FallbackDateParser) -> Option<i64> {
    if let Some(epoch) = commit.date_epoch() {
        return Some(epoch);
    }

    commit
        .date_raw()
        .and_then(|raw| fallback.parse(raw))
        .map(|datetime| datetime.timestamp())
}

/// Human-readable relative label for a day bucket
///
/// `Today` and `Yesterday` for the two most recent days; otherwise the
/// commit's month and day, with the year appended once the bucket crosses
/// into a prior calendar year (i.e. `days_ago` exceeds the days elapsed
/// since January 1 of the current year).
fn day_label(epoch: i64, days_ago: i64, now: DateTime<Utc>) -> String {
    match days_ago {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        _ => {
            let Some(date) = DateTime::from_timestamp(epoch, 0) else {
                return format!("{days_ago} days ago");
            };

            if days_ago > i64::from(now.ordinal0()) {
                date.format("%b %-d, %Y").to_string()
            } else {
                date.format("%b %-d").to_string()
            }
        }
    }
}
