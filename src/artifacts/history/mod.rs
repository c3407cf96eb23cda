//! Per-section version history
//!
//! Given the revision log of the project-data stream, this module extracts
//! the sub-sequence of commits that affected one content identifier, bounded
//! by the commit the caller is currently viewing:
//!
//! - `resolve`: maps a human-facing section reference onto one per-language
//!   candidate (with default-language fallback and ambiguity reporting)
//! - extraction: initial-snapshot backfill, candidate filtering, and the
//!   exclusive boundary cut

pub mod resolve;

use crate::artifacts::commit::crud::CrudFilter;
use crate::artifacts::commit::{Author, CommitRecord};
use crate::artifacts::log::RevisionLog;
use serde::{Deserialize, Serialize};

/// What kind of content object a history request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    /// A content section, matched by its stable site-structure id
    Section,
    /// A hierarchy node, matched by its raw file reference
    Hierarchy,
}

/// Resolved target of a section history request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTarget {
    kind: SectionKind,
    content_id: String,
    file_name: String,
    linkname: String,
}

impl SectionTarget {
    pub fn new(kind: SectionKind, content_id: String, file_name: String, linkname: String) -> Self {
        SectionTarget {
            kind,
            content_id,
            file_name,
            linkname,
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn linkname(&self) -> &str {
        &self.linkname
    }

    /// The identifier commits are matched against: the content id for
    /// sections, the raw file reference for hierarchy nodes
    pub fn match_key(&self) -> &str {
        match self.kind {
            SectionKind::Section => &self.content_id,
            SectionKind::Hierarchy => &self.file_name,
        }
    }
}

/// Files touched by the repository's initial (`v0.0`) snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitialSnapshot {
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_epoch: Option<i64>,
}

impl InitialSnapshot {
    pub fn touches(&self, file_name: &str) -> bool {
        self.files.iter().any(|file| file == file_name)
    }
}

/// Presentation record for one entry of a section's history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub hash: String,
    pub linkname: String,
    pub repro: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_epoch: Option<i64>,
    pub author: Author,
}

impl From<&CommitRecord> for HistoryEntry {
    fn from(commit: &CommitRecord) -> Self {
        HistoryEntry {
            hash: commit.hash().to_string(),
            linkname: commit.message().linkname().to_string(),
            repro: commit.repro().to_string(),
            date_epoch: commit.date_epoch(),
            author: commit.author().clone(),
        }
    }
}

/// Extract the target's history, bounded by (and excluding) the boundary
/// commit
///
/// The working sequence is the log with a synthesized initial-snapshot
/// record appended at the end when the target's file appears in the `v0.0`
/// snapshot (the chronologically oldest entry). Collection starts strictly
/// after the commit whose hash equals `boundary_hash`; commits are collected
/// when their content ids mention the target's match key and their crud is a
/// content-affecting kind. The boundary commit itself is never part of the
/// result, and an absent boundary hash yields an empty result. Selected
/// records are cloned, never moved, so the same log can serve concurrent
/// requests for different identifiers.
pub fn extract(
    log: &RevisionLog,
    target: &SectionTarget,
    boundary_hash: &str,
    snapshot: Option<&InitialSnapshot>,
) -> Vec<CommitRecord> {
    let synthesized = snapshot
        .filter(|snapshot| snapshot.touches(target.file_name()))
        .map(|snapshot| {
            CommitRecord::initial_snapshot(
                log.repro(),
                target.match_key(),
                target.linkname(),
                snapshot.date_epoch,
            )
        });

    let mut result = Vec::new();
    let mut past_boundary = false;

    for commit in log.commits().iter().chain(synthesized.as_ref()) {
        if !past_boundary {
            past_boundary = commit.hash() == boundary_hash;
            continue;
        }

        let affects_target = commit.message().mentions(target.match_key());
        if affects_target && CrudFilter::CONTENT.matches(commit.message().crud()) {
            result.push(commit.clone());
        }
    }

    if !past_boundary {
        tracing::warn!(
            boundary_hash,
            match_key = target.match_key(),
            "boundary hash not found in revision log; empty history"
        );
    }

    result
}
