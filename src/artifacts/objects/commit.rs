//! Commit object
//!
//! Commits represent snapshots of the working tree at specific points in time.
//! They contain:
//! - A commit message
//! - A timestamp (the root commit always uses the Unix epoch)
//! - The parent commit ID (absent only for the root commit)
//! - A merge parent ID (present only on merge commits)
//! - A snapshot mapping each tracked path to its blob ID
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! merge <merge-parent-sha>
//! date <unix-seconds> <timezone>
//! file <blob-sha> <path>
//! file <blob-sha> <path>
//!
//! <commit message>
//! ```
//!
//! File lines are written in path order, so two commits with the same fields
//! always serialize (and therefore hash) identically.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Message of the commit created by `init`
pub const ROOT_MESSAGE: &str = "initial commit";

/// Human-readable timestamp layout, e.g. `Thu Jan 1 00:00:00 1970 +0000`
pub const TIMESTAMP_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// Tracked path to blob ID mapping
pub type Snapshot = BTreeMap<PathBuf, ObjectId>;

/// Commit object
///
/// Immutable once created. Its identity is the digest of its serialized form,
/// computed after every field is fixed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    message: String,
    timestamp: DateTime<FixedOffset>,
    parent: Option<ObjectId>,
    merge_parent: Option<ObjectId>,
    snapshot: Snapshot,
}

impl Commit {
    /// The root commit: fixed epoch timestamp, empty snapshot, no parents
    ///
    /// Every repository starts from the same root, so its digest is identical
    /// across independent initializations.
    pub fn root() -> Self {
        Commit {
            message: ROOT_MESSAGE.to_string(),
            timestamp: DateTime::<Utc>::UNIX_EPOCH.fixed_offset(),
            parent: None,
            merge_parent: None,
            snapshot: Snapshot::new(),
        }
    }

    /// Create a new non-root commit
    ///
    /// # Arguments
    ///
    /// * `message` - Commit message
    /// * `timestamp` - Creation time
    /// * `parent` - The commit this one descends from
    /// * `merge_parent` - The other side of a merge, if any
    /// * `snapshot` - Complete tracked-file mapping
    pub fn new(
        message: String,
        timestamp: DateTime<FixedOffset>,
        parent: ObjectId,
        merge_parent: Option<ObjectId>,
        snapshot: Snapshot,
    ) -> Self {
        Commit {
            message,
            timestamp,
            parent: Some(parent),
            merge_parent,
            snapshot,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    /// Parent first, then merge parent
    pub fn parents(&self) -> impl Iterator<Item = &ObjectId> {
        self.parent.iter().chain(self.merge_parent.iter())
    }

    pub fn is_merge(&self) -> bool {
        self.merge_parent.is_some()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn tracks(&self, path: &Path) -> bool {
        self.snapshot.contains_key(path)
    }

    pub fn blob_oid(&self, path: &Path) -> Option<&ObjectId> {
        self.snapshot.get(path)
    }

    fn body(&self) -> String {
        let mut lines = vec![];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent));
        }
        if let Some(merge_parent) = &self.merge_parent {
            lines.push(format!("merge {}", merge_parent));
        }
        lines.push(format!(
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (path, oid) in &self.snapshot {
            lines.push(format!("file {} {}", oid, path.to_string_lossy()));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}

fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let (seconds, timezone) = value
        .split_once(' ')
        .context("Invalid commit object: malformed date line")?;
    let seconds = seconds
        .parse::<i64>()
        .context("Invalid commit object: invalid timestamp")?;

    let sign = match timezone.get(..1) {
        Some("+") => 1,
        Some("-") => -1,
        _ => anyhow::bail!("Invalid commit object: invalid timezone {}", timezone),
    };
    let hours = timezone
        .get(1..3)
        .and_then(|hours| hours.parse::<i32>().ok())
        .context("Invalid commit object: invalid timezone hours")?;
    let minutes = timezone
        .get(3..5)
        .and_then(|minutes| minutes.parse::<i32>().ok())
        .context("Invalid commit object: invalid timezone minutes")?;
    let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .context("Invalid commit object: timezone out of range")?;

    let datetime = DateTime::<Utc>::from_timestamp(seconds, 0)
        .context("Invalid commit object: timestamp out of range")?;

    Ok(datetime.with_timezone(&offset))
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let body = self.body();

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), body.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(body.as_bytes())?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parent = None;
        let mut merge_parent = None;
        let mut timestamp = None;
        let mut snapshot = Snapshot::new();

        for line in header.lines() {
            let (key, value) = line
                .split_once(' ')
                .with_context(|| format!("Invalid commit object: malformed line {:?}", line))?;

            match key {
                "parent" => parent = Some(ObjectId::try_parse(value.to_string())?),
                "merge" => merge_parent = Some(ObjectId::try_parse(value.to_string())?),
                "date" => timestamp = Some(parse_timestamp(value)?),
                "file" => {
                    let (oid, path) = value
                        .split_once(' ')
                        .context("Invalid commit object: malformed file line")?;
                    snapshot.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
                }
                _ => anyhow::bail!("Invalid commit object: unknown field {}", key),
            }
        }

        Ok(Commit {
            message: message.to_string(),
            timestamp: timestamp.context("Invalid commit object: missing date line")?,
            parent,
            merge_parent,
            snapshot,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.body()
    }
}
