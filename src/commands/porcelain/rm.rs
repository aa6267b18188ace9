use crate::areas::index::Index;
use crate::areas::refs::BranchRegistry;
use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::errors::VcsError;
use std::path::Path;

impl Repository {
    pub fn rm(&mut self, file: &str) -> anyhow::Result<()> {
        let registry = self.load_registry()?;
        let mut index = self.load_index()?;

        self.stage_removal(&registry, &mut index, &Workspace::relative_path(file)?)?;

        index.write_updates()
    }

    /// Unstage `path`, and if the current commit tracks it, stage its removal
    /// and delete the working copy
    pub(crate) fn stage_removal(
        &self,
        registry: &BranchRegistry,
        index: &mut Index,
        path: &Path,
    ) -> anyhow::Result<()> {
        let head = self.current_commit(registry)?;
        let is_tracked = head.tracks(path);

        if !is_tracked && !index.is_staged_for_addition(path) {
            anyhow::bail!(VcsError::NothingToRemove);
        }

        index.unstage_addition(path);

        if is_tracked {
            index.remove(path.to_path_buf());
            self.workspace().remove_file(path)?;
        }

        Ok(())
    }
}
