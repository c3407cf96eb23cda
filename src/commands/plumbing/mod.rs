//! Plumbing commands (low-level engine inspection)
//!
//! ## Commands
//!
//! - `normalize`: Fetch a repro stream and dump the normalized revision log
//!   (latest flags populated) as JSON

pub mod normalize;
