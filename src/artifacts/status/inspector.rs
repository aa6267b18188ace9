use crate::areas::workspace::Workspace;
use crate::artifacts::merge::resolution::has_conflict_markers;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::path::Path;

/// How one path is known outside the working tree
#[derive(Debug, Clone, Copy, new)]
pub struct TrackedState<'s> {
    /// Blob recorded by the current commit
    head_oid: Option<&'s ObjectId>,
    /// Content snapshot staged for addition
    staged: Option<&'s Blob>,
    staged_for_removal: bool,
}

#[derive(new)]
pub struct Inspector<'w> {
    workspace: &'w Workspace,
}

impl Inspector<'_> {
    /// Unstaged change of `path`, if any
    ///
    /// A missing file counts as deleted when it is staged for addition, or
    /// tracked and not staged for removal. A present file counts as modified
    /// when it differs from its staged snapshot or, when unstaged, from the
    /// tracked blob. Tracked files that still carry conflict markers are left
    /// out, so a conflicted merge does not list them.
    pub fn check_workspace_file(
        &self,
        path: &Path,
        state: TrackedState<'_>,
    ) -> anyhow::Result<Option<WorkspaceChangeType>> {
        if !self.workspace.file_exists(path) {
            let deleted =
                state.staged.is_some() || (state.head_oid.is_some() && !state.staged_for_removal);
            return Ok(deleted.then_some(WorkspaceChangeType::Deleted));
        }

        let content = self.workspace.read_file(path)?;
        let oid = ObjectId::hash(&content);

        let modified = match state.staged {
            Some(blob) => blob.object_id()? != oid,
            None => {
                state.head_oid.is_some_and(|head_oid| head_oid != &oid)
                    && !has_conflict_markers(&content)
            }
        };

        Ok(modified.then_some(WorkspaceChangeType::Modified))
    }
}
