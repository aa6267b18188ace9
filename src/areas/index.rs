//! Staging index
//!
//! The index holds the edits that the next commit will apply on top of its
//! parent's snapshot:
//!
//! - pending additions: paths with a copy of the file content taken when the
//!   path was staged (later edits to the working copy do not affect it)
//! - pending removals: paths only
//!
//! A path is never in both sets; staging it in one removes it from the other.
//!
//! ## On-disk Format
//!
//! ```text
//! .gitlet/staging/
//! ├── add/<path>    staged content snapshot
//! └── rm/<path>     zero-length removal marker
//! ```

use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const ADDITIONS_DIR: &str = "add";
const REMOVALS_DIR: &str = "rm";

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the staging directory (typically `.gitlet/staging`)
    path: Box<Path>,
    additions: BTreeMap<PathBuf, Blob>,
    removals: BTreeSet<PathBuf>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn additions_path(&self) -> PathBuf {
        self.path.join(ADDITIONS_DIR)
    }

    fn removals_path(&self) -> PathBuf {
        self.path.join(REMOVALS_DIR)
    }

    /// Load both staged sets from disk, discarding in-memory state
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.additions.clear();
        self.removals.clear();
        self.changed = false;

        let additions_path = self.additions_path();
        for path in Self::list_staged(&additions_path)? {
            let content = std::fs::read(additions_path.join(&path))
                .with_context(|| format!("Unable to read staged file {:?}", path))?;
            self.additions.insert(path, Blob::new(content.into()));
        }

        self.removals = Self::list_staged(&self.removals_path())?
            .into_iter()
            .collect();

        Ok(())
    }

    fn list_staged(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
        if !root.exists() {
            return Ok(vec![]);
        }

        WalkDir::new(root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                entry
                    .path()
                    .strip_prefix(root)
                    .map(Path::to_path_buf)
                    .with_context(|| format!("Invalid staged path {:?}", entry.path()))
            })
            .collect()
    }

    /// Persist the index if it changed since it was loaded
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        if self.path.exists() {
            std::fs::remove_dir_all(&self.path)
                .with_context(|| format!("Unable to clear staging area {:?}", self.path))?;
        }

        let additions_path = self.additions_path();
        let removals_path = self.removals_path();
        std::fs::create_dir_all(&additions_path)?;
        std::fs::create_dir_all(&removals_path)?;

        for (path, blob) in &self.additions {
            Self::write_staged(&additions_path.join(path), blob.content())?;
        }
        for path in &self.removals {
            Self::write_staged(&removals_path.join(path), &[])?;
        }

        self.changed = false;
        Ok(())
    }

    fn write_staged(path: &Path, content: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content).with_context(|| format!("Unable to stage {:?}", path))
    }

    /// Stage `path` for addition with the given content snapshot
    pub fn add(&mut self, path: PathBuf, blob: Blob) {
        self.removals.remove(&path);
        self.additions.insert(path, blob);
        self.changed = true;
    }

    /// Stage `path` for removal
    pub fn remove(&mut self, path: PathBuf) {
        self.additions.remove(&path);
        self.removals.insert(path);
        self.changed = true;
    }

    /// Drop `path` from the additions set
    pub fn unstage_addition(&mut self, path: &Path) {
        if self.additions.remove(path).is_some() {
            self.changed = true;
        }
    }

    /// Drop `path` from the removals set
    pub fn unstage_removal(&mut self, path: &Path) {
        if self.removals.remove(path) {
            self.changed = true;
        }
    }

    /// Empty both sets
    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.changed = true;
        }

        self.additions.clear();
        self.removals.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn additions(&self) -> impl Iterator<Item = (&PathBuf, &Blob)> {
        self.additions.iter()
    }

    pub fn removals(&self) -> impl Iterator<Item = &PathBuf> {
        self.removals.iter()
    }

    pub fn staged_blob(&self, path: &Path) -> Option<&Blob> {
        self.additions.get(path)
    }

    pub fn is_staged_for_addition(&self, path: &Path) -> bool {
        self.additions.contains_key(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.removals.contains(path)
    }
}
