use crate::areas::index::Index;
use crate::areas::refs::BranchRegistry;
use crate::areas::repository::Repository;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::inspector::{Inspector, TrackedState};
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChangeType>;
pub type FileSet = BTreeSet<PathBuf>;

/// Everything `status` prints, already sorted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) current_branch: String,
    pub(crate) branches: Vec<String>,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl Status<'_> {
    pub fn initialize(
        &self,
        registry: &BranchRegistry,
        index: &Index,
    ) -> anyhow::Result<StatusInfo> {
        let head = self.repository.current_commit(registry)?;
        let workspace_files = self.repository.workspace().list_files()?;
        let inspector = Inspector::new(self.repository.workspace());

        // every path the working tree, the commit or the index knows about
        let candidates = workspace_files
            .iter()
            .chain(head.snapshot().keys())
            .chain(index.additions().map(|(path, _)| path))
            .collect::<BTreeSet<_>>();

        let mut workspace_changeset = ChangeSet::new();
        for path in candidates {
            let state = TrackedState::new(
                head.blob_oid(path),
                index.staged_blob(path),
                index.is_staged_for_removal(path),
            );
            if let Some(change) = inspector.check_workspace_file(path, state)? {
                workspace_changeset.insert(path.clone(), change);
            }
        }

        let untracked_files = workspace_files
            .into_iter()
            .filter(|path| !head.tracks(path) && !index.is_staged_for_addition(path))
            .collect();

        Ok(StatusInfo {
            current_branch: registry.current_branch().to_string(),
            branches: registry
                .sorted_branch_names()
                .into_iter()
                .map(|name| name.to_string())
                .collect(),
            staged_files: index.additions().map(|(path, _)| path.clone()).collect(),
            removed_files: index.removals().cloned().collect(),
            workspace_changeset,
            untracked_files,
        })
    }
}

fn write_section(
    f: &mut fmt::Formatter<'_>,
    header: &str,
    lines: impl Iterator<Item = String>,
) -> fmt::Result {
    writeln!(f, "=== {} ===", header)?;
    for line in lines {
        writeln!(f, "{}", line)?;
    }
    writeln!(f)
}

impl fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_section(
            f,
            "Branches",
            self.branches.iter().map(|branch| {
                if branch == &self.current_branch {
                    format!("*{}", branch)
                } else {
                    branch.clone()
                }
            }),
        )?;
        write_section(
            f,
            "Staged Files",
            self.staged_files.iter().map(|path| path.display().to_string()),
        )?;
        write_section(
            f,
            "Removed Files",
            self.removed_files.iter().map(|path| path.display().to_string()),
        )?;
        write_section(
            f,
            "Modifications Not Staged For Commit",
            self.workspace_changeset
                .iter()
                .map(|(path, change)| format!("{} {}", path.display(), change)),
        )?;
        write_section(
            f,
            "Untracked Files",
            self.untracked_files.iter().map(|path| path.display().to_string()),
        )
    }
}
