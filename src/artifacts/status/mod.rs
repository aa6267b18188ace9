//! Working tree status inspection
//!
//! Compares the working tree against the current commit and the staging
//! index.
//!
//! ## Components
//!
//! - `file_change`: kinds of unstaged change
//! - `inspector`: per-file change detection
//! - `status_info`: report aggregation and rendering

pub mod file_change;
pub mod inspector;
pub mod status_info;
