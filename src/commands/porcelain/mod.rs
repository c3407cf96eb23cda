//! Porcelain commands (user-facing history views)
//!
//! ## Commands
//!
//! - `audit`: Day-grouped, filterable audit trail of a repro stream
//! - `history`: Per-section version history bounded by a chosen commit
//! - `simplify`: Track-changes simplification of a diff fragment

pub mod audit;
pub mod history;
pub mod simplify;
