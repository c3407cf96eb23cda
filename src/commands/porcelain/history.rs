use crate::HistoryDisplayFormat;
use crate::areas::project::Project;
use crate::artifacts::history::resolve::{HistoryError, resolve_section};
use crate::artifacts::history::{HistoryEntry, SectionKind, SectionTarget, extract};
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct HistoryOptions {
    pub repro: String,
    pub reference: String,
    pub boundary_hash: String,
    pub kind: SectionKind,
    pub linkname_hint: Option<String>,
    pub user_id: String,
    pub format: HistoryDisplayFormat,
}

/// Resolved section history plus the resolution context the caller must see
#[derive(Debug, Clone)]
pub struct SectionHistoryReport {
    pub entries: Vec<HistoryEntry>,
    pub language: String,
    pub used_default_language: bool,
}

impl Project {
    /// Render a section's version history bounded by the viewed commit
    ///
    /// Failures are presented as "temporarily unavailable" with the
    /// disambiguation context where one exists; internal diagnostics go to
    /// the log only.
    pub fn history(&self, opts: &HistoryOptions) -> anyhow::Result<()> {
        let report = match self.section_history(opts) {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(
                    reference = %opts.reference,
                    error = %err,
                    "section history unavailable"
                );
                writeln!(
                    self.writer(),
                    "History is temporarily unavailable for `{}`.",
                    opts.reference
                )?;
                if let HistoryError::AmbiguousReference { languages, .. } = &err {
                    writeln!(
                        self.writer(),
                        "The reference exists in several output languages: {}. \
                         Narrow it with a link name.",
                        languages.join(", ")
                    )?;
                }
                return Ok(());
            }
        };

        if report.used_default_language {
            writeln!(
                self.writer(),
                "note: reference was ambiguous; showing the default output language `{}`",
                report.language
            )?;
        }

        match opts.format {
            HistoryDisplayFormat::Json => {
                let json = serde_json::to_string_pretty(&report.entries)?;
                writeln!(self.writer(), "{json}")?;
            }
            HistoryDisplayFormat::Table => self.show_history_table(&report)?,
        }

        Ok(())
    }

    /// Compute the bounded history of one section reference
    pub fn section_history(
        &self,
        opts: &HistoryOptions,
    ) -> Result<SectionHistoryReport, HistoryError> {
        let candidates = self
            .store()
            .lookup_section(&opts.reference)
            .map_err(HistoryError::StoreUnavailable)?;
        let resolved = resolve_section(
            &opts.reference,
            &opts.repro,
            opts.linkname_hint.as_deref(),
            candidates,
            self.default_language(),
        )?;

        let target = SectionTarget::new(
            opts.kind,
            resolved.candidate.content_id.clone(),
            resolved.candidate.file_name.clone(),
            resolved.candidate.linkname.clone(),
        );

        let log = self
            .revision_log(&opts.repro, &resolved.candidate.language, &opts.user_id)
            .map_err(HistoryError::StoreUnavailable)?;
        let snapshot = self
            .store()
            .initial_snapshot()
            .map_err(HistoryError::MissingSnapshot)?;

        let commits = extract(&log, &target, &opts.boundary_hash, snapshot.as_ref());

        Ok(SectionHistoryReport {
            entries: commits.iter().map(HistoryEntry::from).collect(),
            language: resolved.candidate.language,
            used_default_language: resolved.used_default_language,
        })
    }

    fn show_history_table(&self, report: &SectionHistoryReport) -> anyhow::Result<()> {
        if report.entries.is_empty() {
            writeln!(self.writer(), "No earlier versions.")?;
            return Ok(());
        }

        for entry in &report.entries {
            let date = entry
                .date_epoch
                .and_then(|epoch| chrono::DateTime::from_timestamp(epoch, 0))
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "unknown date".to_string());

            writeln!(
                self.writer(),
                "{:<10} {}  {} ({})",
                entry.hash.yellow(),
                date,
                entry.linkname,
                entry.author.name
            )?;
        }

        Ok(())
    }
}
