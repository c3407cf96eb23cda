//! Revision logs and history grouping
//!
//! This module owns everything built on the flat commit sequence of a repro
//! stream:
//!
//! - `RevisionLog`: normalized, ordered commit sequence with latest-marking
//! - `filter`: the audit-view predicates (user, message, date range)
//! - `day_groups`: calendar-day bucketing relative to a reference instant
//! - `date_fallback`: the isolated legacy free-text date parser

pub mod date_fallback;
pub mod day_groups;
pub mod filter;

use crate::artifacts::commit::{CommitRecord, RawCommit};
use std::collections::HashSet;

/// Ordered sequence of commits for one repro stream
///
/// Order is the order received from the store. Callers are responsible for
/// supplying the log newest-first so that "first encountered" means "most
/// recent" for latest-marking. No two records share a hash.
#[derive(Debug, Clone, PartialEq)]
pub struct RevisionLog {
    repro: String,
    commits: Vec<CommitRecord>,
}

impl RevisionLog {
    /// Normalize a raw commit sequence into a revision log
    ///
    /// Processes records in input order. Malformed records and duplicate
    /// hashes are skipped with a warning; one bad record never aborts the
    /// rest. The first single-id commit seen for a content id keeps
    /// `latest = true`; later ones for the same id are demoted. Multi-id
    /// commits are neither demoted nor recorded against their ids.
    pub fn from_raw(repro: &str, raw: Vec<RawCommit>) -> Self {
        let mut commits = Vec::with_capacity(raw.len());
        let mut seen_hashes: HashSet<String> = HashSet::new();
        let mut seen_single_ids: HashSet<String> = HashSet::new();

        for entry in raw {
            let mut record = match CommitRecord::from_raw(entry) {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!(repro, error = %err, "skipping malformed commit record");
                    continue;
                }
            };

            if record.repro() != repro {
                tracing::warn!(
                    repro,
                    hash = record.hash(),
                    record_repro = record.repro(),
                    "skipping commit from foreign repro stream"
                );
                continue;
            }

            if !seen_hashes.insert(record.hash().to_string()) {
                tracing::warn!(repro, hash = record.hash(), "skipping duplicate commit hash");
                continue;
            }

            if let Some(content_id) = record.message().single_content_id() {
                if seen_single_ids.contains(content_id) {
                    record.mark_superseded();
                } else {
                    seen_single_ids.insert(content_id.to_string());
                }
            }

            commits.push(record);
        }

        RevisionLog {
            repro: repro.to_string(),
            commits,
        }
    }

    pub fn repro(&self) -> &str {
        &self.repro
    }

    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// The sub-log of commits still marked as the latest version of their
    /// content id
    ///
    /// Applied by the audit porcelain before grouping when the caller asks
    /// for latest versions only; the grouper itself never re-checks the flag.
    pub fn restrict_to_latest(&self) -> RevisionLog {
        RevisionLog {
            repro: self.repro.clone(),
            commits: self
                .commits
                .iter()
                .filter(|commit| commit.latest())
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::commit::{RawAuthor, RawMessage};

    fn raw(hash: &str, crud: &str, id: &str) -> RawCommit {
        RawCommit {
            hash: hash.to_string(),
            repro: "project-data".to_string(),
            author: RawAuthor::new("u1".to_string(), "Ada".to_string()),
            date_epoch: Some(1_700_000_000),
            date: None,
            message: RawMessage::new(crud.to_string(), "Section".to_string(), id.to_string()),
        }
    }

    #[test]
    fn first_single_id_commit_stays_latest() {
        let log = RevisionLog::from_raw(
            "project-data",
            vec![
                raw("c3", "u", "sec-1"),
                raw("c2", "u", "sec-1"),
                raw("c1", "c", "sec-1"),
            ],
        );

        let latest: Vec<bool> = log.commits().iter().map(|c| c.latest()).collect();
        assert_eq!(latest, [true, false, false]);
    }

    #[test]
    fn latest_marking_is_per_content_id() {
        let log = RevisionLog::from_raw(
            "project-data",
            vec![
                raw("c4", "u", "sec-1"),
                raw("c3", "u", "sec-2"),
                raw("c2", "u", "sec-1"),
                raw("c1", "c", "sec-2"),
            ],
        );

        let latest: Vec<bool> = log.commits().iter().map(|c| c.latest()).collect();
        assert_eq!(latest, [true, true, false, false]);
    }

    #[test]
    fn multi_id_commits_are_not_deduplicated_against() {
        // A multi-id commit neither claims its ids nor is demoted by them.
        let log = RevisionLog::from_raw(
            "project-data",
            vec![
                raw("c3", "transform", "sec-1,sec-2"),
                raw("c2", "u", "sec-1"),
                raw("c1", "transform", "sec-1,sec-2"),
            ],
        );

        let latest: Vec<bool> = log.commits().iter().map(|c| c.latest()).collect();
        assert_eq!(latest, [true, true, true]);
    }

    #[test]
    fn latest_marking_is_idempotent_across_runs() {
        let input = vec![
            raw("c4", "u", "sec-1"),
            raw("c3", "transform", "sec-1,sec-2"),
            raw("c2", "u", "sec-2"),
            raw("c1", "u", "sec-1"),
        ];

        let first = RevisionLog::from_raw("project-data", input.clone());
        let second = RevisionLog::from_raw("project-data", input);

        assert_eq!(first, second);

        // Exactly one latest commit per distinct single content id
        let latest_for = |id: &str| {
            first
                .commits()
                .iter()
                .filter(|c| c.latest() && c.message().single_content_id() == Some(id))
                .count()
        };
        assert_eq!(latest_for("sec-1"), 1);
        assert_eq!(latest_for("sec-2"), 1);
    }

    #[test]
    fn malformed_records_are_skipped_not_fatal() {
        let log = RevisionLog::from_raw(
            "project-data",
            vec![
                raw("c3", "u", "sec-1"),
                raw("c2", "bogus", "sec-1"),
                raw("c1", "u", "sec-2"),
            ],
        );

        let hashes: Vec<&str> = log.commits().iter().map(|c| c.hash()).collect();
        assert_eq!(hashes, ["c3", "c1"]);
    }

    #[test]
    fn duplicate_hashes_are_skipped() {
        let log = RevisionLog::from_raw(
            "project-data",
            vec![raw("c1", "u", "sec-1"), raw("c1", "u", "sec-2")],
        );

        assert_eq!(log.len(), 1);
        assert_eq!(log.commits()[0].message().content_ids(), ["sec-1"]);
    }

    #[test]
    fn foreign_repro_records_are_skipped() {
        let mut foreign = raw("c2", "u", "sec-2");
        foreign.repro = "site-structure".to_string();

        let log = RevisionLog::from_raw("project-data", vec![raw("c1", "u", "sec-1"), foreign]);

        assert_eq!(log.len(), 1);
        assert_eq!(log.commits()[0].hash(), "c1");
    }

    #[test]
    fn restrict_to_latest_keeps_only_latest_records() {
        let log = RevisionLog::from_raw(
            "project-data",
            vec![
                raw("c3", "u", "sec-1"),
                raw("c2", "u", "sec-1"),
                raw("c1", "u", "sec-2"),
            ],
        );

        let restricted = log.restrict_to_latest();

        let hashes: Vec<&str> = restricted.commits().iter().map(|c| c.hash()).collect();
        assert_eq!(hashes, ["c3", "c1"]);
    }
}
