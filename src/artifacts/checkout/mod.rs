//! Working-tree synchronization
//!
//! Switching branches, resetting, and fast-forward merges all replace the
//! working tree with a destination commit's snapshot. This module plans that
//! replacement:
//! - Detecting untracked files the destination would clobber
//! - Deciding which live files to delete
//! - Listing which tracked files to copy in
//!
//! Conflicts are detected before any file is touched.
//!
//! The switch is a *clean* one: every working file the destination does not
//! track is deleted, including scratch files that were never staged or
//! committed under either commit.

pub mod conflict;
pub mod migration;
