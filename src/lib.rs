//! A small, local, single-user version control system
//!
//! - `areas`: persistent repository state (object store, branch registry,
//!   staging index, working tree)
//! - `artifacts`: object types and algorithms (commits, checkout planning,
//!   merge, log and status rendering)
//! - `commands`: operations, as `impl Repository` blocks
//! - `config`: environment-driven settings
//! - `errors`: user-facing failure categories

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;
