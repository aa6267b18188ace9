//! Clean-switch migration planning
//!
//! A migration moves the working tree from the current commit to a
//! destination commit:
//!
//! 1. Refuse if an untracked file is in the way (see `conflict`)
//! 2. Delete every working file the destination does not track
//! 3. Copy in every file the destination tracks, overwriting without merging
//!
//! Planning is pure; `Workspace::apply_migration` performs the file operations.

use crate::artifacts::checkout::conflict::untracked_in_the_way;
use crate::artifacts::objects::commit::{Commit, Snapshot};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    deletions: BTreeSet<PathBuf>,
    writes: Snapshot,
}

impl Migration {
    /// Plan the switch from `current` to `destination`
    ///
    /// # Errors
    ///
    /// `UntrackedFileConflict` if a working file untracked by `current` is
    /// tracked by `destination`.
    pub fn plan(
        workspace_files: &[PathBuf],
        current: &Commit,
        destination: &Commit,
    ) -> anyhow::Result<Self> {
        let in_the_way = untracked_in_the_way(workspace_files, current, destination);
        if !in_the_way.is_empty() {
            tracing::debug!(paths = ?in_the_way, "untracked files would be overwritten");
            anyhow::bail!(VcsError::UntrackedFileConflict);
        }

        let deletions = workspace_files
            .iter()
            .filter(|path| !destination.tracks(path))
            .inspect(|path| {
                if !current.tracks(path) {
                    tracing::warn!(
                        path = %path.display(),
                        "deleting a file that no commit tracks"
                    );
                }
            })
            .cloned()
            .collect();

        Ok(Migration {
            deletions,
            writes: destination.snapshot().clone(),
        })
    }

    pub fn deletions(&self) -> impl Iterator<Item = &PathBuf> {
        self.deletions.iter()
    }

    pub fn writes(&self) -> impl Iterator<Item = (&PathBuf, &ObjectId)> {
        self.writes.iter()
    }
}
