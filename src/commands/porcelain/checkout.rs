use crate::areas::refs::BranchRegistry;
use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;

impl Repository {
    /// Restore `file` from the current commit
    pub fn checkout_file(&mut self, file: &str) -> anyhow::Result<()> {
        let registry = self.load_registry()?;

        self.restore_file(registry.current_commit_oid(), file)
    }

    /// Restore `file` from the commit named by a full ID or a prefix
    pub fn checkout_commit_file(&mut self, commit: &str, file: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let commit_oid = self.database().resolve_prefix(commit)?;

        self.restore_file(&commit_oid, file)
    }

    fn restore_file(&self, commit_oid: &ObjectId, file: &str) -> anyhow::Result<()> {
        let path = Workspace::relative_path(file)?;
        let commit = self.database().load_commit(commit_oid)?;
        let blob_oid = commit
            .blob_oid(&path)
            .ok_or(VcsError::FileNotInCommit)?;
        let blob = self.database().load_blob(blob_oid)?;

        self.workspace().write_file(&path, blob.content())
    }

    /// Switch to `branch`, replacing the working tree with its tip's snapshot
    pub fn checkout_branch(&mut self, branch: &str) -> anyhow::Result<()> {
        let mut registry = self.load_registry()?;
        let mut index = self.load_index()?;

        let name = BranchName::try_parse(branch.to_string())
            .map_err(|_| VcsError::NoSuchCheckoutBranch)?;
        let target_oid = registry
            .branch_oid(&name)
            .cloned()
            .ok_or(VcsError::NoSuchCheckoutBranch)?;
        if registry.is_current_branch(&name) {
            anyhow::bail!(VcsError::AlreadyOnBranch);
        }

        self.switch_working_tree(&registry, &target_oid)?;

        tracing::info!(from = %registry.current_branch(), to = %name, "switched branch");
        registry.set_current_branch(name)?;
        index.clear();

        self.refs().save(&registry)?;
        index.write_updates()
    }

    /// Move the current branch to `commit` and replace the working tree with
    /// its snapshot
    pub fn reset(&mut self, commit: &str) -> anyhow::Result<()> {
        let mut registry = self.load_registry()?;
        let mut index = self.load_index()?;

        let target_oid = self.database().resolve_prefix(commit)?;

        self.switch_working_tree(&registry, &target_oid)?;

        registry.move_current_branch(target_oid);
        index.clear();

        self.refs().save(&registry)?;
        index.write_updates()
    }

    /// Replace the working tree's tracked content with `target_oid`'s snapshot
    ///
    /// Fails before touching anything if a file the current commit does not
    /// track would be overwritten. Every other file the target does not track
    /// is deleted, whether or not any commit ever tracked it.
    pub(crate) fn switch_working_tree(
        &self,
        registry: &BranchRegistry,
        target_oid: &ObjectId,
    ) -> anyhow::Result<()> {
        let current = self.current_commit(registry)?;
        let target = self.database().load_commit(target_oid)?;
        let workspace_files = self.workspace().list_files()?;

        let migration = Migration::plan(&workspace_files, &current, &target)?;
        self.workspace().apply_migration(&migration, self.database())
    }
}
