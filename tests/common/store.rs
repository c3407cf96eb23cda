use derive_new::new;
use redline::areas::store::StoreDocument;
use redline::artifacts::commit::{RawAuthor, RawCommit, RawMessage};
use redline::artifacts::history::InitialSnapshot;
use redline::artifacts::history::resolve::SectionCandidate;
use std::path::{Path, PathBuf};

/// One commit of a store fixture, newest-first within its stream
#[derive(Debug, Clone, new)]
pub struct CommitSpec {
    pub hash: String,
    pub author: String,
    pub crud: String,
    pub linkname: String,
    pub ids: String,
    pub epoch: i64,
}

impl CommitSpec {
    fn into_raw(self, repro: &str) -> RawCommit {
        RawCommit {
            hash: self.hash,
            repro: repro.to_string(),
            author: RawAuthor::new("u-test".to_string(), self.author),
            date_epoch: Some(self.epoch),
            date: None,
            message: RawMessage::new(self.crud, self.linkname, self.ids),
        }
    }
}

#[derive(Debug, Default)]
pub struct StoreFixture {
    document: StoreDocument,
}

impl StoreFixture {
    pub fn new() -> Self {
        StoreFixture::default()
    }

    pub fn with_commits(mut self, repro: &str, commits: Vec<CommitSpec>) -> Self {
        self.document.commits.insert(
            repro.to_string(),
            commits
                .into_iter()
                .map(|spec| spec.into_raw(repro))
                .collect(),
        );
        self
    }

    pub fn with_snapshot(mut self, files: &[&str], date_epoch: Option<i64>) -> Self {
        self.document.initial_snapshot = Some(InitialSnapshot {
            files: files.iter().map(|f| f.to_string()).collect(),
            date_epoch,
        });
        self
    }

    pub fn with_section(mut self, reference: &str, candidates: Vec<SectionCandidate>) -> Self {
        self.document
            .sections
            .insert(reference.to_string(), candidates);
        self
    }

    /// Serialize the fixture into `store.json` under the given directory
    pub fn write_to(self, dir: &Path) -> PathBuf {
        let path = dir.join("store.json");
        let json = serde_json::to_string_pretty(&self.document).expect("serializable fixture");
        std::fs::write(&path, json).expect("fixture file written");
        path
    }
}

pub fn candidate(language: &str, content_id: &str, file_name: &str, linkname: &str) -> SectionCandidate {
    SectionCandidate::new(
        language.to_string(),
        content_id.to_string(),
        file_name.to_string(),
        linkname.to_string(),
    )
}
