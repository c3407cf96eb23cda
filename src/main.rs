use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use redline::areas::project::Project;
use redline::areas::store::JsonStore;
use redline::artifacts::core::long_output_writer;
use redline::artifacts::history::SectionKind;
use redline::artifacts::log::filter::{AuditFilter, default_range};
use redline::commands::plumbing::normalize::NormalizeOptions;
use redline::commands::porcelain::audit::AuditOptions;
use redline::commands::porcelain::history::HistoryOptions;
use redline::commands::porcelain::simplify::SimplifyOptions;
use redline::{AuditDisplayFormat, HistoryDisplayFormat, SimplifyDisplayFormat};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "redline",
    version = "0.1.0",
    about = "Revision history and track changes for versioned report content",
    long_about = "redline turns the flat commit log of a content store into browsable \
    history views: a day-grouped audit trail, per-section version histories, \
    and simplified track-changes markup.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "audit",
        about = "Show the day-grouped audit trail of a repro stream",
        long_about = "This command fetches the commit log of a repro stream from the \
        content-store export and renders it as a day-grouped, filterable audit trail."
    )]
    Audit {
        #[arg(long, help = "Path to the content-store export file")]
        store: PathBuf,
        #[arg(long, default_value = "project-data", help = "Repro stream to audit")]
        repro: String,
        #[arg(long, help = "Only commits whose author name contains this text")]
        user: Option<String>,
        #[arg(long, help = "Only commits whose message contains this text")]
        message: Option<String>,
        #[arg(long, help = "Start of the date range (YYYY-MM-DD, inclusive)")]
        since: Option<NaiveDate>,
        #[arg(long, help = "End of the date range (YYYY-MM-DD, inclusive)")]
        until: Option<NaiveDate>,
        #[arg(long, help = "Only commits still marked as a section's latest version")]
        latest_only: bool,
        #[arg(long, value_enum, default_value = "grouped", help = "Output format")]
        format: AuditDisplayFormat,
        #[arg(long, help = "Reference instant for relative day labels (RFC 3339)")]
        now: Option<DateTime<Utc>>,
        #[arg(long, default_value = "en", help = "Site language of the requesting view")]
        language: String,
        #[arg(long, default_value = "", help = "Requesting user id (cache key)")]
        user_id: String,
    },
    #[command(
        name = "history",
        about = "Show a section's version history bounded by a commit",
        long_about = "This command resolves a human-facing section reference and lists the \
        versions strictly older than the boundary commit, including the original \
        version from the initial repository snapshot where one exists."
    )]
    History {
        #[arg(long, help = "Path to the content-store export file")]
        store: PathBuf,
        #[arg(long, default_value = "project-data", help = "Repro stream to search")]
        repro: String,
        #[arg(long, help = "Section reference (site-structure id or file reference)")]
        section: String,
        #[arg(long, help = "Boundary commit hash; only older versions are listed")]
        boundary: String,
        #[arg(long, help = "Treat the reference as a hierarchy node, not a section")]
        hierarchy: bool,
        #[arg(long, help = "Link name hint for disambiguating multi-language references")]
        linkname: Option<String>,
        #[arg(long, value_enum, default_value = "table", help = "Output format")]
        format: HistoryDisplayFormat,
        #[arg(long, default_value = "en", help = "Default output language fallback")]
        default_language: String,
        #[arg(long, default_value = "", help = "Requesting user id (cache key)")]
        user_id: String,
    },
    #[command(
        name = "simplify",
        about = "Simplify the track-changes operations of a diff fragment",
        long_about = "This command pairs the del/ins fragments of a comparison result by \
        operation index and trims each pair down to its genuinely differing core."
    )]
    Simplify {
        #[arg(index = 1, help = "Path to the diff fragment file")]
        input: PathBuf,
        #[arg(long, value_enum, default_value = "marked", help = "Output format")]
        format: SimplifyDisplayFormat,
    },
    #[command(
        name = "normalize",
        about = "Dump the normalized revision log of a repro stream as JSON",
        long_about = "This plumbing command fetches a repro stream and prints the normalized \
        commit records, latest flags populated, exactly as the engine sees them."
    )]
    Normalize {
        #[arg(long, help = "Path to the content-store export file")]
        store: PathBuf,
        #[arg(long, default_value = "project-data", help = "Repro stream to normalize")]
        repro: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Audit {
            store,
            repro,
            user,
            message,
            since,
            until,
            latest_only,
            format,
            now,
            language,
            user_id,
        } => {
            let store = JsonStore::open(&store)?;
            let (writer, pager) = match format {
                AuditDisplayFormat::Grouped => long_output_writer(),
                AuditDisplayFormat::Json => (Box::new(std::io::stdout()) as Box<dyn Write>, None),
            };
            let project = Project::new(Box::new(store), &language, writer);

            let date_range = match (since, until) {
                (None, None) => None,
                (since, until) => {
                    let (floor, ceil) = default_range();
                    Some((since.unwrap_or(floor), until.unwrap_or(ceil)))
                }
            };

            project.audit(&AuditOptions {
                repro,
                language: language.clone(),
                user_id,
                filter: AuditFilter::new(user, message, date_range),
                latest_only,
                now: now.unwrap_or_else(Utc::now),
                format,
            })?;

            if let Some(pager) = pager {
                minus::page_all(pager)?;
            }
        }
        Commands::History {
            store,
            repro,
            section,
            boundary,
            hierarchy,
            linkname,
            format,
            default_language,
            user_id,
        } => {
            let store = JsonStore::open(&store)?;
            let project = Project::new(
                Box::new(store),
                &default_language,
                Box::new(std::io::stdout()),
            );

            project.history(&HistoryOptions {
                repro,
                reference: section,
                boundary_hash: boundary,
                kind: if hierarchy {
                    SectionKind::Hierarchy
                } else {
                    SectionKind::Section
                },
                linkname_hint: linkname,
                user_id,
                format,
            })?;
        }
        Commands::Simplify { input, format } => {
            let store = JsonStore::from_document(Default::default());
            let project = Project::new(Box::new(store), "en", Box::new(std::io::stdout()));

            project.simplify(&SimplifyOptions { input, format })?;
        }
        Commands::Normalize { store, repro } => {
            let store = JsonStore::open(&store)?;
            let project = Project::new(Box::new(store), "en", Box::new(std::io::stdout()));

            project.normalize(&NormalizeOptions { repro })?;
        }
    }

    Ok(())
}
