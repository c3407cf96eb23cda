//! redline — revision history and track-changes engine
//!
//! Turns a flat, append-only log of content-store commits into browsable
//! history views for a versioned report-authoring platform:
//!
//! - a day-grouped, filterable audit trail of every change in a repro stream
//! - a per-section version history bounded by a chosen commit
//! - simplified del/ins markup pairs for rendering track changes
//!
//! The crate is organized into three layers:
//!
//! - `areas`: the building blocks a project is wired from (content store,
//!   log cache, the `Project` coordinator)
//! - `artifacts`: the core data structures and algorithms (commit records,
//!   revision logs, day grouping, section history, track-changes trimming)
//! - `commands`: plumbing and porcelain operations exposed by the CLI

pub mod areas;
pub mod artifacts;
pub mod commands;

use clap::ValueEnum;

/// Output format for the audit trail command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AuditDisplayFormat {
    /// Day-grouped, colored listing
    #[default]
    Grouped,
    /// The bucket sequence as JSON
    Json,
}

/// Output format for the section history command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HistoryDisplayFormat {
    /// One line per version
    #[default]
    Table,
    /// The history entries as JSON
    Json,
}

/// Output format for the simplify command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SimplifyDisplayFormat {
    /// Re-assembled track-changes markup, one operation per line
    #[default]
    Marked,
    /// The simplified operations as JSON
    Json,
}
