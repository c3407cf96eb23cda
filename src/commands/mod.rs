//! Command implementations
//!
//! This module contains all command implementations, organized into two
//! categories:
//!
//! - `plumbing`: Low-level commands for inspecting the engine's data
//!   (normalize)
//! - `porcelain`: User-facing history views (audit, history, simplify)
//!
//! Plumbing commands expose raw engine output, while porcelain commands
//! compose the engine into presentable workflows.

pub mod plumbing;
pub mod porcelain;
