//! Plumbing commands
//!
//! Direct access to the object store, for scripting and debugging.
//!
//! ## Commands
//!
//! - `hash-object`: Compute a file's blob ID and optionally store it
//! - `cat-file`: Print a stored blob or commit

pub mod cat_file;
pub mod hash_object;
