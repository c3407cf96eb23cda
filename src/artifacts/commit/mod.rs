//! Commit records from the content store
//!
//! A commit is one recorded change in the underlying content-versioning
//! store. The raw wire form (`RawCommit`) is whatever the store returns for
//! a repro stream; `CommitRecord` is the normalized, immutable in-memory
//! representation the history views are built from. The only derived
//! attributes are the cached time-of-day string (computed once at
//! construction) and the `latest` flag (set exactly once during log
//! normalization).

pub mod crud;

use crate::artifacts::commit::crud::CrudKind;
use anyhow::Context;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Reserved hash of the synthetic initial-snapshot commit
pub const INITIAL_SNAPSHOT_HASH: &str = "v0.0";

/// Author of a commit as recorded by the store
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, new)]
pub struct Author {
    pub id: String,
    pub name: String,
}

/// Structured commit message payload
///
/// `content_ids` holds the ordered list of content identifiers the commit
/// affected; commonly one, occasionally many (comma-joined in the raw form).
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CommitMessage {
    crud: CrudKind,
    linkname: String,
    content_ids: Vec<String>,
}

impl CommitMessage {
    pub fn new(crud: CrudKind, linkname: String, content_ids: Vec<String>) -> Self {
        CommitMessage {
            crud,
            linkname,
            content_ids,
        }
    }

    pub fn crud(&self) -> CrudKind {
        self.crud
    }

    pub fn linkname(&self) -> &str {
        &self.linkname
    }

    pub fn content_ids(&self) -> &[String] {
        &self.content_ids
    }

    /// The single content id this commit affected, if it affected exactly one
    ///
    /// Multi-id commits return `None`; latest-marking only considers
    /// single-id commits.
    pub fn single_content_id(&self) -> Option<&str> {
        match self.content_ids.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    pub fn mentions(&self, content_id: &str) -> bool {
        self.content_ids.iter().any(|id| id == content_id)
    }

    /// Free text shown in the audit trail, e.g. "Edited Balance sheet"
    pub fn display_text(&self) -> String {
        format!("{} {}", self.crud.verb(), self.linkname)
    }
}

/// One normalized content-store commit
///
/// Owned by the `RevisionLog` it belongs to; immutable once constructed
/// apart from the `latest` flag.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct CommitRecord {
    hash: String,
    repro: String,
    author: Author,
    message: CommitMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_epoch: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_of_day: Option<String>,
    latest: bool,
}

impl CommitRecord {
    /// Build a record from its raw wire form
    ///
    /// Fails on an empty hash, an unknown crud code, or an id field with no
    /// identifiers; the normalizer skips such records with a warning.
    pub fn from_raw(raw: RawCommit) -> anyhow::Result<Self> {
        if raw.hash.is_empty() {
            anyhow::bail!("commit record with empty hash");
        }

        let crud = CrudKind::try_parse(&raw.message.crud).with_context(|| {
            format!(
                "unknown crud code `{}` on commit {}",
                raw.message.crud, raw.hash
            )
        })?;

        let content_ids = raw
            .message
            .id
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
        if content_ids.is_empty() {
            anyhow::bail!("commit {} affects no content ids", raw.hash);
        }

        let time_of_day = raw
            .date_epoch
            .and_then(|epoch| chrono::DateTime::from_timestamp(epoch, 0))
            .map(|dt| dt.format("%H:%M:%S").to_string());

        Ok(CommitRecord {
            hash: raw.hash,
            repro: raw.repro,
            author: Author::new(raw.author.id, raw.author.name),
            message: CommitMessage::new(crud, raw.message.linkname, content_ids),
            date_epoch: raw.date_epoch,
            date_raw: raw.date,
            time_of_day,
            latest: true,
        })
    }

    /// Synthesize the pseudo-commit for content present since the initial
    /// repository snapshot
    ///
    /// Represents the earliest known state of a section: hash is the
    /// reserved `v0.0` sentinel and the record is never the latest version.
    pub fn initial_snapshot(
        repro: &str,
        content_id: &str,
        linkname: &str,
        date_epoch: Option<i64>,
    ) -> Self {
        let time_of_day = date_epoch
            .and_then(|epoch| chrono::DateTime::from_timestamp(epoch, 0))
            .map(|dt| dt.format("%H:%M:%S").to_string());

        CommitRecord {
            hash: INITIAL_SNAPSHOT_HASH.to_string(),
            repro: repro.to_string(),
            author: Author::new(String::new(), String::new()),
            message: CommitMessage::new(
                CrudKind::Create,
                format!("{linkname} (original version)"),
                vec![content_id.to_string()],
            ),
            date_epoch,
            date_raw: None,
            time_of_day,
            latest: false,
        }
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn repro(&self) -> &str {
        &self.repro
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn message(&self) -> &CommitMessage {
        &self.message
    }

    pub fn date_epoch(&self) -> Option<i64> {
        self.date_epoch
    }

    pub fn date_raw(&self) -> Option<&str> {
        self.date_raw.as_deref()
    }

    /// Cached `HH:MM:SS` form of the commit timestamp
    pub fn time_of_day(&self) -> Option<&str> {
        self.time_of_day.as_deref()
    }

    pub fn latest(&self) -> bool {
        self.latest
    }

    pub(crate) fn mark_superseded(&mut self) {
        self.latest = false;
    }
}

/// Raw commit entry as returned by the commit source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCommit {
    pub hash: String,
    pub repro: String,
    pub author: RawAuthor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_epoch: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub message: RawMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize, new)]
pub struct RawAuthor {
    pub id: String,
    pub name: String,
}

/// Raw structured message: crud code, display name, comma-joined content ids
#[derive(Debug, Clone, Serialize, Deserialize, new)]
pub struct RawMessage {
    pub crud: String,
    pub linkname: String,
    pub id: String,
}
