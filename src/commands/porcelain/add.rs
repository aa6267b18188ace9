use crate::areas::index::Index;
use crate::areas::refs::BranchRegistry;
use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object::Object;
use crate::errors::VcsError;
use std::path::Path;

impl Repository {
    pub fn add(&mut self, file: &str) -> anyhow::Result<()> {
        let registry = self.load_registry()?;
        let mut index = self.load_index()?;

        self.stage_addition(&registry, &mut index, &Workspace::relative_path(file)?)?;

        index.write_updates()
    }

    /// Stage the working copy of `path` for the next commit
    ///
    /// Content identical to what the current commit tracks is unstaged
    /// instead, and any pending removal of `path` is dropped either way.
    pub(crate) fn stage_addition(
        &self,
        registry: &BranchRegistry,
        index: &mut Index,
        path: &Path,
    ) -> anyhow::Result<()> {
        if !self.workspace().file_exists(path) {
            anyhow::bail!(VcsError::FileNotFound);
        }

        let blob = self.workspace().parse_blob(path)?;
        let blob_oid = blob.object_id()?;
        let head = self.current_commit(registry)?;

        index.unstage_removal(path);

        if head.blob_oid(path) == Some(&blob_oid) {
            tracing::debug!(path = %path.display(), "content matches the current commit, unstaging");
            index.unstage_addition(path);
        } else {
            index.add(path.to_path_buf(), blob);
        }

        Ok(())
    }
}
