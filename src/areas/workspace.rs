use crate::areas::database::Database;
use crate::areas::repository::REPOSITORY_DIR;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::blob::Blob;
use crate::errors::VcsError;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [REPOSITORY_DIR, ".", ".."];

/// The live file tree the repository tracks
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every file in the tree as a sorted, root-relative path
    ///
    /// The repository directory itself is skipped.
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = WalkDir::new(&self.path)
            .into_iter()
            .filter_entry(|entry| {
                let relative_path = entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .unwrap_or(entry.path());
                !Self::is_ignored(relative_path)
            })
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }

    fn is_ignored(path: &Path) -> bool {
        // Check if any component of the path is in IGNORED_PATHS
        path.components().any(|component| {
            if let Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    /// Normalize a user-supplied path to the root-relative form used as a key
    ///
    /// `./` components are dropped. Paths that are absolute, climb out with
    /// `..`, point into the repository directory or name the root itself are
    /// reported as `FileNotFound`.
    pub fn relative_path(file: &str) -> anyhow::Result<PathBuf> {
        let mut relative = PathBuf::new();

        for component in Path::new(file).components() {
            match component {
                Component::CurDir => {}
                Component::Normal(name) if name != REPOSITORY_DIR => relative.push(name),
                _ => {
                    tracing::debug!(operand = %file, "path escapes the working tree");
                    anyhow::bail!(VcsError::FileNotFound);
                }
            }
        }

        if relative.as_os_str().is_empty() {
            anyhow::bail!(VcsError::FileNotFound);
        }

        Ok(relative)
    }

    pub fn file_exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content.into())
    }

    pub fn parse_blob(&self, file_path: &Path) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    /// Overwrite (or create) a file, creating parent directories as needed
    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for: {:?}", file_path))?;
        }

        std::fs::write(&full_path, content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))
    }

    /// Delete a file, then prune any parent directories it leaves empty
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        self.prune_empty_parent_dirs(&full_path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.starts_with(self.path.as_ref())
            && parent.is_dir()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("failed to remove empty directory at {:?}", parent))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    // Deletions are applied before writes so that a file replaced by a
    // directory (or the reverse) never collides with its old self.
    pub fn apply_migration(&self, migration: &Migration, database: &Database) -> anyhow::Result<()> {
        for file_path in migration.deletions() {
            tracing::debug!(path = %file_path.display(), "deleting file not tracked by destination");
            self.remove_file(file_path)?;
        }

        for (file_path, oid) in migration.writes() {
            let blob = database.load_blob(oid)?;
            self.write_file(file_path, blob.content())?;
        }

        Ok(())
    }
}
