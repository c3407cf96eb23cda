use crate::areas::project::Project;
use crate::artifacts::log::RevisionLog;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub repro: String,
}

impl Project {
    /// Fetch a repro stream and dump its normalized revision log as JSON
    ///
    /// Always fetches fresh from the store so the dump reflects what the
    /// normalizer produces right now, not a cached view.
    pub fn normalize(&self, opts: &NormalizeOptions) -> anyhow::Result<()> {
        let raw = self.store().fetch_commits(&opts.repro)?;
        let log = RevisionLog::from_raw(&opts.repro, raw);

        let json = serde_json::to_string_pretty(log.commits())?;
        writeln!(self.writer(), "{json}")?;

        Ok(())
    }
}
