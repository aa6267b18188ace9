use crate::areas::index::Index;
use crate::areas::refs::BranchRegistry;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let mut registry = self.load_registry()?;
        let mut index = self.load_index()?;

        self.write_commit(&mut registry, &mut index, message.to_string(), None)?;

        self.refs().save(&registry)?;
        index.write_updates()
    }

    /// Record the staged changes as a child of the current commit
    ///
    /// The new snapshot is the parent's with staged additions stored and
    /// applied and staged removals dropped. The current branch moves to the
    /// new commit and the index is cleared; persisting both is left to the
    /// caller.
    ///
    /// Merge commits (those with a `merge_parent`) may have nothing staged.
    pub(crate) fn write_commit(
        &self,
        registry: &mut BranchRegistry,
        index: &mut Index,
        message: String,
        merge_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        if message.trim().is_empty() {
            anyhow::bail!(VcsError::EmptyMessage);
        }
        if index.is_empty() && merge_parent.is_none() {
            anyhow::bail!(VcsError::NothingToCommit);
        }

        let parent_oid = registry.current_commit_oid().clone();
        let mut snapshot = self.current_commit(registry)?.snapshot().clone();

        for (path, blob) in index.additions() {
            let blob_oid = self.database().store_blob(blob)?;
            snapshot.insert(path.clone(), blob_oid);
        }
        for path in index.removals() {
            snapshot.remove(path);
        }

        let commit = Commit::new(
            message,
            self.config().commit_timestamp(),
            parent_oid,
            merge_parent,
            snapshot,
        );
        let commit_oid = self.database().store_commit(&commit)?;

        tracing::info!(
            commit = %commit_oid,
            files = commit.snapshot().len(),
            merge = commit.is_merge(),
            "created commit"
        );

        registry.move_current_branch(commit_oid.clone());
        index.clear();

        Ok(commit_oid)
    }
}
