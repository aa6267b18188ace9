//! Persistent repository state
//!
//! - `database`: content-addressed blob and commit storage
//! - `index`: staged additions and removals
//! - `refs`: the branch registry
//! - `repository`: handle tying the areas to one working tree
//! - `workspace`: working-tree file access

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
