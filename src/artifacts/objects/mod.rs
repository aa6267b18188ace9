//! Stored object types and operations
//!
//! Everything the repository persists permanently is an object identified by a
//! SHA-1 hash. There are two types:
//!
//! - **Blob**: File content (raw bytes, hashed as-is)
//! - **Commit**: Snapshot with metadata (message, timestamp, parent links, path to blob map)
//!
//! Objects are immutable once stored and are never deleted.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Shortest abbreviation accepted when resolving a commit by prefix
pub const MIN_PREFIX_LENGTH: usize = 6;
