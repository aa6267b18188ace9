//! Merge algorithms
//!
//! - `split_point`: the commit both branches last shared
//! - `resolution`: per-file three-way decisions against that commit
//!
//! A merge compares three snapshots: the split point (S), the current tip
//! (H, "head") and the tip being merged in (O, "other"). Only files whose
//! content differs between H and O need a decision.

pub mod resolution;
pub mod split_point;
