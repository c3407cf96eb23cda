use crate::artifacts::commit::RawCommit;
use crate::artifacts::history::InitialSnapshot;
use crate::artifacts::history::resolve::SectionCandidate;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Boundary to the external content store
///
/// The engine only ever needs three lookups from the store: the raw commit
/// sequence of a repro stream, the files touched by the initial (`v0.0`)
/// snapshot, and the per-language candidates a human-facing section
/// reference can map to. Everything behind these calls (git storage, the
/// document service) is out of scope.
pub trait ContentStore {
    fn fetch_commits(&self, repro: &str) -> anyhow::Result<Vec<RawCommit>>;

    fn initial_snapshot(&self) -> anyhow::Result<Option<InitialSnapshot>>;

    fn lookup_section(&self, reference: &str) -> anyhow::Result<Vec<SectionCandidate>>;
}

/// On-disk form of a store export: every dataset the engine consumes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreDocument {
    /// Raw commit sequences keyed by repro tag, newest-first
    #[serde(default)]
    pub commits: HashMap<String, Vec<RawCommit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_snapshot: Option<InitialSnapshot>,
    /// Section reference lookup, keyed by the human-facing reference
    #[serde(default)]
    pub sections: HashMap<String, Vec<SectionCandidate>>,
}

/// Content store backed by a single JSON export file
///
/// Used by the CLI and the integration tests; the real platform talks to
/// the document service instead.
#[derive(Debug, Clone)]
pub struct JsonStore {
    document: StoreDocument,
}

impl JsonStore {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read store file {}", path.display()))?;
        let document: StoreDocument = serde_json::from_str(&content)
            .with_context(|| format!("invalid store document {}", path.display()))?;

        Ok(JsonStore { document })
    }

    pub fn from_document(document: StoreDocument) -> Self {
        JsonStore { document }
    }
}

impl ContentStore for JsonStore {
    fn fetch_commits(&self, repro: &str) -> anyhow::Result<Vec<RawCommit>> {
        Ok(self.document.commits.get(repro).cloned().unwrap_or_default())
    }

    fn initial_snapshot(&self) -> anyhow::Result<Option<InitialSnapshot>> {
        Ok(self.document.initial_snapshot.clone())
    }

    fn lookup_section(&self, reference: &str) -> anyhow::Result<Vec<SectionCandidate>> {
        Ok(self
            .document
            .sections
            .get(reference)
            .cloned()
            .unwrap_or_default())
    }
}
