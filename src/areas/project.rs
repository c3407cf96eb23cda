use crate::areas::cache::{CacheKey, LogCache};
use crate::areas::store::ContentStore;
use crate::artifacts::log::RevisionLog;
use std::cell::{RefCell, RefMut};
use std::sync::Arc;

/// High-level coordinator for one authoring project
///
/// Owns the content-store boundary, the short-lived log cache, the
/// configured default output language, and the output writer commands
/// write through. The porcelain and plumbing operations are implemented as
/// `impl Project` blocks under `src/commands/`.
pub struct Project {
    store: Box<dyn ContentStore>,
    cache: LogCache,
    default_language: String,
    writer: RefCell<Box<dyn std::io::Write>>,
}

impl Project {
    pub fn new(
        store: Box<dyn ContentStore>,
        default_language: &str,
        writer: Box<dyn std::io::Write>,
    ) -> Self {
        Project {
            store,
            cache: LogCache::default(),
            default_language: default_language.to_string(),
            writer: RefCell::new(writer),
        }
    }

    pub fn store(&self) -> &dyn ContentStore {
        self.store.as_ref()
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    /// Fetch and normalize the revision log of a repro stream, read-through
    /// cached per `(repro, language, user)`
    pub fn revision_log(
        &self,
        repro: &str,
        language: &str,
        user: &str,
    ) -> anyhow::Result<Arc<RevisionLog>> {
        let key = CacheKey::new(repro.to_string(), language.to_string(), user.to_string());

        if let Some(log) = self.cache.get(&key) {
            return Ok(log);
        }

        let raw = self.store.fetch_commits(repro)?;
        let log = Arc::new(RevisionLog::from_raw(repro, raw));
        self.cache.put(key, log.clone());

        Ok(log)
    }
}
