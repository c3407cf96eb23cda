use crate::AuditDisplayFormat;
use crate::areas::project::Project;
use crate::artifacts::commit::CommitRecord;
use crate::artifacts::commit::crud::CrudKind;
use crate::artifacts::log::date_fallback::LegacyDateParser;
use crate::artifacts::log::day_groups::{DayBucket, group_by_day};
use crate::artifacts::log::filter::AuditFilter;
use chrono::{DateTime, Utc};
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct AuditOptions {
    pub repro: String,
    pub language: String,
    pub user_id: String,
    pub filter: AuditFilter,
    pub latest_only: bool,
    pub now: DateTime<Utc>,
    pub format: AuditDisplayFormat,
}

impl Project {
    /// Render the day-grouped, filtered audit trail of a repro stream
    pub fn audit(&self, opts: &AuditOptions) -> anyhow::Result<()> {
        let log = self.revision_log(&opts.repro, &opts.language, &opts.user_id)?;

        // latest-only is applied to the log before grouping; the grouper
        // never re-checks the flag
        let restricted;
        let log = if opts.latest_only {
            restricted = log.restrict_to_latest();
            &restricted
        } else {
            &*log
        };

        let buckets = group_by_day(log, opts.now, &opts.filter, &LegacyDateParser);

        match opts.format {
            AuditDisplayFormat::Json => {
                let json = serde_json::to_string_pretty(&buckets)?;
                writeln!(self.writer(), "{json}")?;
            }
            AuditDisplayFormat::Grouped => self.show_grouped(&buckets)?,
        }

        Ok(())
    }

    fn show_grouped(&self, buckets: &[DayBucket<'_>]) -> anyhow::Result<()> {
        if buckets.is_empty() {
            writeln!(self.writer(), "No commits match the active filters.")?;
            return Ok(());
        }

        for bucket in buckets {
            writeln!(self.writer(), "{}", bucket.label().bold().underline())?;
            for commit in bucket.commits() {
                self.show_audit_line(commit)?;
            }
            writeln!(self.writer())?;
        }

        Ok(())
    }

    fn show_audit_line(&self, commit: &CommitRecord) -> anyhow::Result<()> {
        let verb = commit.message().crud().verb();
        let verb = match commit.message().crud() {
            CrudKind::Create => verb.green(),
            CrudKind::Delete => verb.red(),
            CrudKind::ContentDataRestore => verb.cyan(),
            _ => verb.yellow(),
        };

        writeln!(
            self.writer(),
            "  {:<10} {:>8}  {} {} ({})",
            commit.hash().chars().take(10).collect::<String>(),
            commit.time_of_day().unwrap_or(""),
            verb,
            commit.message().linkname(),
            commit.author().name
        )?;

        Ok(())
    }
}
