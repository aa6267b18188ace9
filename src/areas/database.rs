//! Object database
//!
//! Content-addressed, append-only storage for blobs and commits.
//!
//! ## Layout
//!
//! ```text
//! .gitlet/
//! ├── branches          reserved: branch registry (see `refs`)
//! ├── <commit-sha>      one file per commit
//! └── blobs/
//!     └── <blob-sha>    one file per distinct file content
//! ```
//!
//! Objects are written through a temp file and a rename, and an object that
//! already exists is never rewritten.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::VcsError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

/// Reserved name of the branch registry file at the repository root
pub const REGISTRY_FILE: &str = "branches";

const BLOBS_DIR: &str = "blobs";

#[derive(Debug)]
pub struct Database {
    /// Repository root (typically `.gitlet`)
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn blobs_path(&self) -> PathBuf {
        self.path.join(BLOBS_DIR)
    }

    /// Store a blob unless an identical one exists and return its ID
    pub fn store_blob(&self, blob: &Blob) -> anyhow::Result<ObjectId> {
        let oid = blob.object_id()?;
        let blob_path = self.blobs_path().join(oid.as_ref());

        if !blob_path.exists() {
            self.write_object(blob_path, blob.content().clone())?;
            tracing::debug!(blob = %oid, "stored blob");
        }

        Ok(oid)
    }

    pub fn load_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        let blob_path = self.blobs_path().join(oid.as_ref());

        if !blob_path.is_file() {
            anyhow::bail!(VcsError::BlobNotFound(oid.clone()));
        }

        let content = std::fs::read(&blob_path)
            .with_context(|| format!("Unable to read blob file {}", blob_path.display()))?;

        Ok(Blob::new(content.into()))
    }

    pub fn has_blob(&self, oid: &ObjectId) -> bool {
        self.blobs_path().join(oid.as_ref()).is_file()
    }

    /// Persist a commit and return its ID
    ///
    /// The ID is computed from every other field, so storing the same commit
    /// twice is a no-op.
    pub fn store_commit(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        let oid = commit.object_id()?;
        let commit_path = self.path.join(oid.as_ref());

        if !commit_path.exists() {
            self.write_object(commit_path, commit.serialize()?)?;
        }

        Ok(oid)
    }

    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        let commit_path = self.path.join(oid.as_ref());

        if !commit_path.is_file() {
            anyhow::bail!(VcsError::NoSuchCommit);
        }

        let content = std::fs::read(&commit_path)
            .with_context(|| format!("Unable to read commit file {}", commit_path.display()))?;

        Self::parse_commit(content.into())
            .map_err(|e| VcsError::CorruptObject(oid.clone(), e.to_string()).into())
    }

    fn parse_commit(content: Bytes) -> anyhow::Result<Commit> {
        let total_len = content.len();
        let mut reader = Cursor::new(content);

        let (object_type, size) = ObjectType::parse_header(&mut reader)?;
        if object_type != ObjectType::Commit {
            anyhow::bail!("expected a commit, found a {}", object_type);
        }

        let body_len = total_len - reader.position() as usize;
        if body_len != size {
            anyhow::bail!("header declares {} bytes but the body has {}", size, body_len);
        }

        Commit::deserialize(reader)
    }

    pub fn has_commit(&self, oid: &ObjectId) -> bool {
        self.path.join(oid.as_ref()).is_file()
    }

    /// Every stored commit ID, in lexicographic order
    ///
    /// Enumerates the repository root, skipping the registry file and anything
    /// whose name is not a full object ID (directories, temp files).
    pub fn list_commits(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut commits = std::fs::read_dir(&self.path)
            .with_context(|| format!("Unable to list {}", self.path.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| name != REGISTRY_FILE)
            .filter_map(|name| ObjectId::try_parse(name).ok())
            .collect::<Vec<_>>();

        commits.sort();
        Ok(commits)
    }

    /// Resolve a full commit ID or an abbreviation of at least 6 hex characters
    ///
    /// Ambiguous prefixes are not detected: the lexicographically first match wins.
    pub fn resolve_prefix(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        if prefix.len() == OBJECT_ID_LENGTH
            && let Ok(oid) = ObjectId::try_parse(prefix.to_string())
            && self.has_commit(&oid)
        {
            return Ok(oid);
        }

        if !ObjectId::is_valid_prefix(prefix) {
            anyhow::bail!(VcsError::NoSuchCommit);
        }

        self.list_commits()?
            .into_iter()
            .find(|oid| oid.starts_with(prefix))
            .ok_or_else(|| VcsError::NoSuchCommit.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

/// Memoizing commit loader for graph traversals
///
/// Ancestor searches may reach the same commit along several paths; each
/// commit is read from disk at most once per cache.
#[derive(Debug, Default)]
pub struct CommitCache {
    commits: RefCell<HashMap<ObjectId, Vec<ObjectId>>>,
}

impl CommitCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parent IDs of `oid`, first parent first
    pub fn get_or_load_parents(
        &self,
        database: &Database,
        oid: &ObjectId,
    ) -> anyhow::Result<Vec<ObjectId>> {
        if let Some(parents) = self.commits.borrow().get(oid) {
            return Ok(parents.clone());
        }

        let commit = database.load_commit(oid)?;
        let parents = commit.parents().cloned().collect::<Vec<_>>();
        self.commits.borrow_mut().insert(oid.clone(), parents.clone());

        Ok(parents)
    }
}
