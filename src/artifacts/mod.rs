//! Version-control data structures and algorithms
//!
//! - `branch`: Branch names
//! - `checkout`: Working-tree migration and untracked-file detection
//! - `core`: Shared utilities (pager wrapper)
//! - `log`: First-parent history and log formatting
//! - `merge`: Split-point search and per-file merge resolution
//! - `objects`: Stored object types (blob, commit) and their IDs
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
