//! Core project components
//!
//! This module contains the fundamental building blocks a project is wired
//! from:
//!
//! - `store`: Content-store boundary (commit source, initial snapshot,
//!   section lookup) and the JSON-file-backed implementation
//! - `cache`: Short-lived read-through cache of normalized revision logs
//! - `project`: High-level coordination of store, cache, and output

pub mod cache;
pub mod project;
pub mod store;
