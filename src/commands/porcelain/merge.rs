use crate::areas::database::CommitCache;
use crate::areas::index::Index;
use crate::areas::refs::BranchRegistry;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::conflict::untracked_in_the_way;
use crate::artifacts::merge::resolution::{Resolution, conflict_content, resolve_snapshots};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;
use std::io::Write;
use std::path::Path;

const ANCESTOR_NOTICE: &str = "Given branch is an ancestor of the current branch.";
const FAST_FORWARD_NOTICE: &str = "Current branch fast-forwarded.";
const CONFLICT_NOTICE: &str = "Encountered a merge conflict.";

/// How a merge finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The other branch had nothing new; nothing changed
    AlreadyUpToDate,
    /// The current branch moved forward to the other tip; no commit was made
    FastForward(ObjectId),
    /// A two-parent commit was made, possibly with conflicts left in the
    /// working tree
    Merged { commit: ObjectId, conflicted: bool },
}

impl Repository {
    /// Merge the tip of `branch` into the current branch
    ///
    /// Every precondition is checked before the working tree is touched.
    /// Conflicts do not abort the merge: the commit is made, then reported.
    pub fn merge(&mut self, branch: &str) -> anyhow::Result<MergeOutcome> {
        let mut registry = self.load_registry()?;
        let mut index = self.load_index()?;

        if !index.is_empty() {
            anyhow::bail!(VcsError::UncommittedChanges);
        }

        let other_name =
            BranchName::try_parse(branch.to_string()).map_err(|_| VcsError::NoSuchBranch)?;
        let other_oid = registry
            .branch_oid(&other_name)
            .cloned()
            .ok_or(VcsError::NoSuchBranch)?;
        let head_oid = registry.current_commit_oid().clone();

        let head = self.database().load_commit(&head_oid)?;
        let other = self.database().load_commit(&other_oid)?;
        let workspace_files = self.workspace().list_files()?;
        if !untracked_in_the_way(&workspace_files, &head, &other).is_empty() {
            anyhow::bail!(VcsError::UntrackedFileConflict);
        }

        if registry.is_current_branch(&other_name) {
            anyhow::bail!(VcsError::MergeWithSelf);
        }

        let split_oid = self.find_split_point(&head_oid, &other_oid)?;

        if split_oid == other_oid {
            writeln!(self.writer(), "{}", ANCESTOR_NOTICE)?;
            return Ok(MergeOutcome::AlreadyUpToDate);
        }

        if split_oid == head_oid {
            self.switch_working_tree(&registry, &other_oid)?;
            registry.move_current_branch(other_oid.clone());
            self.refs().save(&registry)?;

            writeln!(self.writer(), "{}", FAST_FORWARD_NOTICE)?;
            return Ok(MergeOutcome::FastForward(other_oid));
        }

        let split = self.database().load_commit(&split_oid)?;
        let conflicted = self.apply_resolutions(&registry, &mut index, &split, &head, &other)?;

        let message = format!("Merged {} into {}.", other_name, registry.current_branch());
        let commit_oid = self.write_commit(&mut registry, &mut index, message, Some(other_oid))?;

        self.refs().save(&registry)?;
        index.write_updates()?;

        if conflicted {
            tracing::warn!(commit = %commit_oid, "merge committed with conflicts");
            writeln!(self.writer(), "{}", CONFLICT_NOTICE)?;
        }

        Ok(MergeOutcome::Merged {
            commit: commit_oid,
            conflicted,
        })
    }

    fn find_split_point(
        &self,
        head_oid: &ObjectId,
        other_oid: &ObjectId,
    ) -> anyhow::Result<ObjectId> {
        let commit_cache = CommitCache::new();
        let database = self.database();

        let finder = SplitPointFinder::new(|oid| commit_cache.get_or_load_parents(database, oid));

        finder
            .find_split_point(head_oid, other_oid)?
            .ok_or_else(|| {
                anyhow::anyhow!("no common ancestor between {} and {}", head_oid, other_oid)
            })
    }

    /// Carry out the per-file decisions; returns whether any file conflicted
    fn apply_resolutions(
        &self,
        registry: &BranchRegistry,
        index: &mut Index,
        split: &Commit,
        head: &Commit,
        other: &Commit,
    ) -> anyhow::Result<bool> {
        let mut conflicted = false;

        let resolutions = resolve_snapshots(split.snapshot(), head.snapshot(), other.snapshot());

        for (path, resolution) in resolutions {
            tracing::debug!(path = %path.display(), ?resolution, "merge decision");

            match resolution {
                Resolution::TakeOther(blob_oid) => {
                    let blob = self.database().load_blob(&blob_oid)?;
                    self.workspace().write_file(&path, blob.content())?;
                    self.stage_addition(registry, index, &path)?;
                }
                Resolution::Remove => {
                    self.stage_removal(registry, index, &path)?;
                }
                Resolution::Conflict {
                    head: head_oid,
                    other: other_oid,
                } => {
                    self.write_conflict(&path, head_oid.as_ref(), other_oid.as_ref())?;
                    if self.config().stage_conflicts {
                        self.stage_addition(registry, index, &path)?;
                    }
                    conflicted = true;
                }
            }
        }

        Ok(conflicted)
    }

    fn write_conflict(
        &self,
        path: &Path,
        head_oid: Option<&ObjectId>,
        other_oid: Option<&ObjectId>,
    ) -> anyhow::Result<()> {
        let head_blob = head_oid
            .map(|oid| self.database().load_blob(oid))
            .transpose()?;
        let other_blob = other_oid
            .map(|oid| self.database().load_blob(oid))
            .transpose()?;

        let content = conflict_content(
            head_blob.as_ref().map(|blob| &blob.content()[..]),
            other_blob.as_ref().map(|blob| &blob.content()[..]),
        );

        self.workspace().write_file(path, &content)
    }
}
