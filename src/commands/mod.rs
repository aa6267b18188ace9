//! Command implementations
//!
//! Every command is an `impl Repository` block, in one of two groups:
//!
//! - `plumbing`: Direct object-store access (hash-object, cat-file)
//! - `porcelain`: The user-facing workflow (init, add, commit, checkout, merge, etc.)

pub mod plumbing;
pub mod porcelain;
